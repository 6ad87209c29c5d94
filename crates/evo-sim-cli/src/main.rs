use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use evo_sim_core::{ReproductionMode, RunSummary, SimConfig, Simulation};
use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};
use tracing::info;

#[derive(Parser)]
#[command(name = "evo-sim")]
#[command(about = "Predator/forager evolution simulation CLI")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run an experiment from a config file
    Run {
        /// Path to config file (JSON)
        #[arg(long)]
        config: PathBuf,

        /// Output directory for results (optional)
        #[arg(long)]
        out: Option<PathBuf>,

        /// Override the configured number of generations
        #[arg(long)]
        generations: Option<usize>,
    },
    /// Dump the default configuration to stdout
    DumpDefaultConfig,
    /// Run every reproduction mode from the same seed and compare outcomes
    Compare {
        #[arg(long, default_value_t = 42)]
        seed: u64,

        #[arg(long, default_value_t = 20)]
        generations: usize,
    },
}

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .try_init();
}

fn load_config(path: &Path) -> Result<SimConfig> {
    let file = File::open(path)
        .with_context(|| format!("failed to open config file {}", path.display()))?;
    let config: SimConfig =
        serde_json::from_reader(BufReader::new(file)).context("failed to parse config")?;
    Ok(config)
}

fn run_config(config: SimConfig) -> Result<RunSummary> {
    let mut sim = Simulation::new(config).context("config validation error")?;
    Ok(sim.run_experiment())
}

fn write_summary(out_dir: &Path, summary: &RunSummary) -> Result<()> {
    std::fs::create_dir_all(out_dir).context("failed to create output directory")?;
    let summary_path = out_dir.join("summary.json");
    let file = File::create(&summary_path).context("failed to create summary file")?;
    serde_json::to_writer_pretty(file, summary).context("failed to write summary")?;
    info!(path = %summary_path.display(), "wrote run summary");
    Ok(())
}

fn describe(summary: &RunSummary) -> String {
    let last = summary.generations.last();
    format!(
        "{:<13} generations={:<4} survivors={:<4} creature_steps={:<8} speed={:.2} size={:.2} sense={:.2}",
        summary.mode.label(),
        summary.generations_run,
        summary.final_survivors,
        summary.total_creature_steps,
        last.map_or(0.0, |m| m.speed_mean),
        last.map_or(0.0, |m| m.size_mean),
        last.map_or(0.0, |m| m.sense_range_mean),
    )
}

fn main() -> Result<()> {
    init_tracing();
    let cli = Cli::parse();

    match cli.command {
        Commands::DumpDefaultConfig => {
            let config = SimConfig::default();
            println!("{}", serde_json::to_string_pretty(&config)?);
        }
        Commands::Run {
            config,
            out,
            generations,
        } => {
            let mut sim_config = load_config(&config)?;
            if let Some(generations) = generations {
                sim_config.generations = generations;
            }
            println!("Loaded config from {}", config.display());
            println!(
                "Simulating up to {} generations ({} mode)...",
                sim_config.generations,
                sim_config.reproduction.label()
            );

            let summary = run_config(sim_config)?;
            if let Some(out_dir) = out {
                write_summary(&out_dir, &summary)?;
                println!("Run complete. Results saved to {}", out_dir.display());
            } else {
                println!("Run complete. {}", describe(&summary));
            }
        }
        Commands::Compare { seed, generations } => {
            println!("=== Reproduction mode comparison (seed {seed}) ===");
            for mode in ReproductionMode::ALL {
                let config = SimConfig {
                    seed,
                    generations,
                    reproduction: mode,
                    ..SimConfig::default()
                };
                let summary = run_config(config)
                    .with_context(|| format!("{} run failed", mode.label()))?;
                println!("{}", describe(&summary));
            }
        }
    }
    Ok(())
}
