use crate::creature::Creature;
use crate::generation::Generation;
use crate::reproduction::ReproductionMode;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GenerationMetrics {
    pub generation: usize,
    /// Creatures that started the generation.
    pub population: usize,
    pub survivors: usize,
    pub steps: usize,
    pub creature_steps: usize,
    pub food_items: usize,
    pub food_eaten: usize,
    pub creatures_eaten: usize,
    pub speed_mean: f64,
    pub speed_std: f64,
    pub size_mean: f64,
    pub size_std: f64,
    pub sense_range_mean: f64,
    pub sense_range_std: f64,
    pub mean_age: f64,
}

impl GenerationMetrics {
    /// Summarize a finished generation. Trait statistics cover the whole
    /// starting population, not just survivors.
    pub fn collect(generation_index: usize, generation: &Generation) -> Self {
        let creatures = generation.creatures();
        let (speed_mean, speed_std) = mean_std(creatures, Creature::effective_speed);
        let (size_mean, size_std) = mean_std(creatures, Creature::effective_size);
        let (sense_range_mean, sense_range_std) =
            mean_std(creatures, Creature::effective_sense_range);
        let (mean_age, _) = mean_std(creatures, |c| f64::from(c.age()));
        let food_items = generation.food().len();

        Self {
            generation: generation_index,
            population: creatures.len(),
            survivors: generation.survivors().count(),
            steps: generation.steps_run(),
            creature_steps: generation.creature_steps(),
            food_items,
            food_eaten: food_items - generation.available_food_count(),
            creatures_eaten: generation.creatures_eaten(),
            speed_mean,
            speed_std,
            size_mean,
            size_std,
            sense_range_mean,
            sense_range_std,
            mean_age,
        }
    }
}

/// Mean and sample standard deviation; zero for fewer than two values.
fn mean_std(creatures: &[Creature], value: impl Fn(&Creature) -> f64) -> (f64, f64) {
    if creatures.is_empty() {
        return (0.0, 0.0);
    }
    let n = creatures.len() as f64;
    let mean = creatures.iter().map(&value).sum::<f64>() / n;
    if creatures.len() < 2 {
        return (mean, 0.0);
    }
    let var = creatures
        .iter()
        .map(|c| (value(c) - mean).powi(2))
        .sum::<f64>()
        / (n - 1.0);
    (mean, var.sqrt())
}

fn default_schema_version() -> u32 {
    1
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct RunSummary {
    #[serde(default = "default_schema_version")]
    pub schema_version: u32,
    pub seed: u64,
    pub mode: ReproductionMode,
    pub generations_run: usize,
    pub generations: Vec<GenerationMetrics>,
    #[serde(default)]
    pub final_survivors: usize,
    #[serde(default)]
    pub total_creature_steps: usize,
}
