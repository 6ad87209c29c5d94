use crate::config::{SimConfig, SimConfigError};
use crate::creature::Creature;
use crate::food::Food;
use crate::generation::{Generation, PipelineParams};
use crate::metrics::{GenerationMetrics, RunSummary};
use crate::rng::create_rng;
use crate::stage::Stage;
use rand_chacha::ChaCha12Rng;
use thiserror::Error;
use tracing::info;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum SimulationError {
    #[error("invalid configuration: {0}")]
    InvalidConfig(#[from] SimConfigError),
    #[error("generations ({actual}) exceeds supported maximum ({max})")]
    TooManyGenerations { max: usize, actual: usize },
}

/// A multi-generation experiment over one stage and one random stream.
pub struct Simulation {
    config: SimConfig,
    stage: Stage,
    params: PipelineParams,
    rng: ChaCha12Rng,
}

impl Simulation {
    pub const MAX_GENERATIONS: usize = 100_000;

    pub fn new(config: SimConfig) -> Result<Self, SimulationError> {
        config.validate()?;
        if config.generations > Self::MAX_GENERATIONS {
            return Err(SimulationError::TooManyGenerations {
                max: Self::MAX_GENERATIONS,
                actual: config.generations,
            });
        }
        Ok(Self {
            stage: Stage::new(config.stage_size),
            params: PipelineParams::from(&config),
            rng: create_rng(config.seed),
            config,
        })
    }

    pub fn config(&self) -> &SimConfig {
        &self.config
    }

    pub fn stage(&self) -> &Stage {
        &self.stage
    }

    /// `population` creatures with the configured traits, each on the edge
    /// point nearest a random location.
    pub fn initial_population(&mut self) -> Vec<Creature> {
        (0..self.config.population)
            .map(|_| {
                let spot = self.stage.random_location(&mut self.rng);
                Creature::new(
                    self.stage.nearest_edge_point(spot),
                    self.config.initial_traits,
                    self.config.initial_energy,
                )
            })
            .collect()
    }

    /// Run generation `index` on `creatures` with freshly generated food,
    /// sized by the food schedule when one is configured.
    pub fn run_generation(&mut self, index: usize, creatures: Vec<Creature>) -> Generation {
        let food = self
            .config
            .food_for_generation(index)
            .generate(&self.stage, &mut self.rng)
            .into_iter()
            .map(Food::new)
            .collect();
        let mut generation = Generation::new(creatures, food, self.params);
        generation.run(&self.stage, &mut self.rng);
        generation
    }

    /// Run up to `config.generations` generations starting from `creatures`,
    /// stopping early once a generation leaves no survivors.
    pub fn run(&mut self, creatures: Vec<Creature>) -> RunSummary {
        let mode = self.config.reproduction;
        let mut population = creatures;
        let mut metrics = Vec::with_capacity(self.config.generations);
        let mut final_survivors = 0;

        for index in 0..self.config.generations {
            let generation = self.run_generation(index, population);
            let m = GenerationMetrics::collect(index, &generation);
            info!(
                generation = index,
                population = m.population,
                survivors = m.survivors,
                steps = m.steps,
                food_eaten = m.food_eaten,
                creatures_eaten = m.creatures_eaten,
                speed_mean = m.speed_mean,
                "generation complete"
            );
            final_survivors = m.survivors;
            metrics.push(m);
            if final_survivors == 0 {
                break;
            }
            population = mode.reproduce(
                generation.survivors(),
                &self.stage,
                self.config.population,
                self.config.initial_energy,
                &mut self.rng,
            );
        }

        RunSummary {
            schema_version: 1,
            seed: self.config.seed,
            mode,
            generations_run: metrics.len(),
            total_creature_steps: metrics.iter().map(|m| m.creature_steps).sum(),
            final_survivors,
            generations: metrics,
        }
    }

    /// Seed a population and run the configured experiment.
    pub fn run_experiment(&mut self) -> RunSummary {
        let creatures = self.initial_population();
        self.run(creatures)
    }
}
