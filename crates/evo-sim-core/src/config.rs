use crate::constants::{
    DEFAULT_AGE_LIMIT_VARIANCE, DEFAULT_MAX_STEPS_PER_GENERATION, DEFAULT_PREDATION_SIZE_RATIO,
};
use crate::creature::{CreatureTraits, MutableTrait};
use crate::food::{self, FoodLayout};
use crate::reproduction::ReproductionMode;
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimConfig {
    /// Seed of the single random stream threaded through the whole run.
    pub seed: u64,
    /// Side length of the square stage.
    pub stage_size: f64,
    /// Size of the initial population, and of every random-mode population.
    pub population: usize,
    /// Upper bound on generations; a run stops early once nobody survives.
    pub generations: usize,
    /// Step at which any still-active creature is killed.
    pub max_steps_per_generation: usize,
    /// Predation requires `predator_size * ratio >= prey_size`.
    pub predation_size_ratio: f64,
    /// Standard deviation of the per-generation lifetime draw.
    pub age_limit_variance: f64,
    /// Shuffle creature order at the start of every step.
    pub shuffle_each_step: bool,
    pub food: FoodLayout,
    /// Optional `(generation, count)` points overriding the layout's item
    /// count per generation by linear interpolation. Empty keeps the layout
    /// count for every generation.
    pub food_schedule: Vec<(usize, f64)>,
    pub initial_traits: CreatureTraits,
    /// Energy every creature starts a generation with.
    pub initial_energy: f64,
    pub reproduction: ReproductionMode,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            seed: 42,
            stage_size: 500.0,
            population: 50,
            generations: 50,
            max_steps_per_generation: DEFAULT_MAX_STEPS_PER_GENERATION,
            predation_size_ratio: DEFAULT_PREDATION_SIZE_RATIO,
            age_limit_variance: DEFAULT_AGE_LIMIT_VARIANCE,
            shuffle_each_step: false,
            food: FoodLayout::default(),
            food_schedule: Vec::new(),
            initial_traits: CreatureTraits::default(),
            initial_energy: 500.0,
            reproduction: ReproductionMode::default(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum SimConfigError {
    #[error("stage_size must be positive and finite")]
    InvalidStageSize,
    #[error("stage_size ({actual}) exceeds supported maximum ({max})")]
    StageSizeTooLarge { max: f64, actual: f64 },
    #[error("population must be greater than 0")]
    InvalidPopulation,
    #[error("population ({actual}) exceeds supported maximum ({max})")]
    PopulationTooLarge { max: usize, actual: usize },
    #[error("generations must be greater than 0")]
    InvalidGenerations,
    #[error("max_steps_per_generation must be greater than 1")]
    InvalidMaxSteps,
    #[error("predation_size_ratio must be finite and within (0,1]")]
    InvalidPredationSizeRatio,
    #[error("age_limit_variance must be positive and finite")]
    InvalidAgeLimitVariance,
    #[error("food count ({actual}) exceeds supported maximum ({max})")]
    TooMuchFood { max: usize, actual: usize },
    #[error("food_schedule point {index} must have a finite, non-negative count")]
    InvalidFoodScheduleCount { index: usize },
    #[error("food_schedule point {index} is out of generation order")]
    UnsortedFoodSchedule { index: usize },
    #[error("clustered food needs at least one cluster when count > 0")]
    InvalidFoodClusters,
    #[error("clustered food spread must be finite and non-negative")]
    InvalidFoodSpread,
    #[error("initial trait `{name}` must be finite with a non-negative variance")]
    InvalidTrait { name: &'static str },
    #[error("initial trait `{name}` must have a positive value")]
    NonPositiveTrait { name: &'static str },
    #[error("initial_energy must be positive and finite")]
    InvalidInitialEnergy,
}

impl SimConfig {
    pub const MAX_STAGE_SIZE: f64 = 1.0e6;
    /// Pairwise passes are quadratic in the population per step.
    pub const MAX_POPULATION: usize = 10_000;
    pub const MAX_FOOD: usize = 100_000;

    pub fn validate(&self) -> Result<(), SimConfigError> {
        self.validate_stage()?;
        self.validate_population()?;
        self.validate_pipeline()?;
        self.validate_food()?;
        self.validate_traits()?;
        Ok(())
    }

    fn validate_stage(&self) -> Result<(), SimConfigError> {
        if !(self.stage_size.is_finite() && self.stage_size > 0.0) {
            return Err(SimConfigError::InvalidStageSize);
        }
        if self.stage_size > Self::MAX_STAGE_SIZE {
            return Err(SimConfigError::StageSizeTooLarge {
                max: Self::MAX_STAGE_SIZE,
                actual: self.stage_size,
            });
        }
        Ok(())
    }

    fn validate_population(&self) -> Result<(), SimConfigError> {
        if self.population == 0 {
            return Err(SimConfigError::InvalidPopulation);
        }
        if self.population > Self::MAX_POPULATION {
            return Err(SimConfigError::PopulationTooLarge {
                max: Self::MAX_POPULATION,
                actual: self.population,
            });
        }
        if self.generations == 0 {
            return Err(SimConfigError::InvalidGenerations);
        }
        if !(self.initial_energy.is_finite() && self.initial_energy > 0.0) {
            return Err(SimConfigError::InvalidInitialEnergy);
        }
        Ok(())
    }

    fn validate_pipeline(&self) -> Result<(), SimConfigError> {
        // Step counting starts at 1, so a cap of 1 never runs a step.
        if self.max_steps_per_generation < 2 {
            return Err(SimConfigError::InvalidMaxSteps);
        }
        if !(self.predation_size_ratio.is_finite()
            && self.predation_size_ratio > 0.0
            && self.predation_size_ratio <= 1.0)
        {
            return Err(SimConfigError::InvalidPredationSizeRatio);
        }
        // A zero sd would skip the INIT lifetime draws and shift the stream.
        if !(self.age_limit_variance.is_finite() && self.age_limit_variance > 0.0) {
            return Err(SimConfigError::InvalidAgeLimitVariance);
        }
        Ok(())
    }

    fn validate_food(&self) -> Result<(), SimConfigError> {
        for (index, &(generation, count)) in self.food_schedule.iter().enumerate() {
            if !(count.is_finite() && count >= 0.0) {
                return Err(SimConfigError::InvalidFoodScheduleCount { index });
            }
            if index > 0 && generation < self.food_schedule[index - 1].0 {
                return Err(SimConfigError::UnsortedFoodSchedule { index });
            }
        }
        let max_count = self
            .food_schedule
            .iter()
            .map(|&(_, count)| count.round())
            .fold(self.food.count() as f64, f64::max);
        if max_count > Self::MAX_FOOD as f64 {
            return Err(SimConfigError::TooMuchFood {
                max: Self::MAX_FOOD,
                actual: max_count as usize,
            });
        }
        if let FoodLayout::Clustered {
            clusters, spread, ..
        } = self.food
        {
            if max_count > 0.0 && clusters == 0 {
                return Err(SimConfigError::InvalidFoodClusters);
            }
            if !(spread.is_finite() && spread >= 0.0) {
                return Err(SimConfigError::InvalidFoodSpread);
            }
        }
        Ok(())
    }

    /// Food layout for the 0-based `generation`, with the scheduled count
    /// applied when a schedule is configured.
    pub fn food_for_generation(&self, generation: usize) -> FoodLayout {
        match food::scheduled_food_count(&self.food_schedule, generation) {
            Some(count) => self.food.with_count(count),
            None => self.food,
        }
    }

    fn validate_traits(&self) -> Result<(), SimConfigError> {
        let t = &self.initial_traits;
        let named = [
            ("speed", t.speed),
            ("size", t.size),
            ("sense_range", t.sense_range),
            ("reach", t.reach),
            ("flee_distance", t.flee_distance),
            ("life_span", t.life_span),
        ];
        for (name, value) in named {
            if !is_well_formed(value) {
                return Err(SimConfigError::InvalidTrait { name });
            }
        }
        for (name, value) in [("size", t.size), ("reach", t.reach), ("life_span", t.life_span)] {
            if value.value <= 0.0 {
                return Err(SimConfigError::NonPositiveTrait { name });
            }
        }
        Ok(())
    }
}

fn is_well_formed(t: MutableTrait) -> bool {
    t.value.is_finite() && t.value >= 0.0 && t.variance.is_finite() && t.variance >= 0.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validate_accepts_default() {
        assert!(SimConfig::default().validate().is_ok());
    }

    #[test]
    fn validate_rejects_invalid_stage_size() {
        let config = SimConfig {
            stage_size: 0.0,
            ..SimConfig::default()
        };
        assert_eq!(config.validate(), Err(SimConfigError::InvalidStageSize));

        let config = SimConfig {
            stage_size: SimConfig::MAX_STAGE_SIZE * 2.0,
            ..SimConfig::default()
        };
        assert!(matches!(
            config.validate(),
            Err(SimConfigError::StageSizeTooLarge { .. })
        ));
    }

    #[test]
    fn validate_rejects_invalid_counts() {
        let config = SimConfig {
            population: 0,
            ..SimConfig::default()
        };
        assert_eq!(config.validate(), Err(SimConfigError::InvalidPopulation));

        let config = SimConfig {
            generations: 0,
            ..SimConfig::default()
        };
        assert_eq!(config.validate(), Err(SimConfigError::InvalidGenerations));

        let config = SimConfig {
            max_steps_per_generation: 1,
            ..SimConfig::default()
        };
        assert_eq!(config.validate(), Err(SimConfigError::InvalidMaxSteps));
    }

    #[test]
    fn validate_rejects_invalid_pipeline_parameters() {
        let config = SimConfig {
            predation_size_ratio: 1.5,
            ..SimConfig::default()
        };
        assert_eq!(
            config.validate(),
            Err(SimConfigError::InvalidPredationSizeRatio)
        );

        for age_limit_variance in [f64::NAN, -1.0, 0.0] {
            let config = SimConfig {
                age_limit_variance,
                ..SimConfig::default()
            };
            assert_eq!(config.validate(), Err(SimConfigError::InvalidAgeLimitVariance));
        }
    }

    #[test]
    fn validate_enforces_population_and_food_limits() {
        let config = SimConfig {
            population: SimConfig::MAX_POPULATION,
            ..SimConfig::default()
        };
        assert!(config.validate().is_ok());

        let config = SimConfig {
            population: SimConfig::MAX_POPULATION + 1,
            ..SimConfig::default()
        };
        assert_eq!(
            config.validate(),
            Err(SimConfigError::PopulationTooLarge {
                max: SimConfig::MAX_POPULATION,
                actual: SimConfig::MAX_POPULATION + 1,
            })
        );

        let config = SimConfig {
            food: FoodLayout::Uniform {
                count: SimConfig::MAX_FOOD + 1,
            },
            ..SimConfig::default()
        };
        assert!(matches!(
            config.validate(),
            Err(SimConfigError::TooMuchFood { .. })
        ));

        let config = SimConfig {
            food_schedule: vec![(0, 10.0), (5, (SimConfig::MAX_FOOD + 1) as f64)],
            ..SimConfig::default()
        };
        assert!(matches!(
            config.validate(),
            Err(SimConfigError::TooMuchFood { .. })
        ));
    }

    #[test]
    fn validate_rejects_malformed_food_schedule() {
        let config = SimConfig {
            food_schedule: vec![(0, 10.0), (4, f64::INFINITY)],
            ..SimConfig::default()
        };
        assert_eq!(
            config.validate(),
            Err(SimConfigError::InvalidFoodScheduleCount { index: 1 })
        );

        let config = SimConfig {
            food_schedule: vec![(0, -1.0)],
            ..SimConfig::default()
        };
        assert_eq!(
            config.validate(),
            Err(SimConfigError::InvalidFoodScheduleCount { index: 0 })
        );

        let config = SimConfig {
            food_schedule: vec![(0, 10.0), (8, 5.0), (3, 1.0)],
            ..SimConfig::default()
        };
        assert_eq!(
            config.validate(),
            Err(SimConfigError::UnsortedFoodSchedule { index: 2 })
        );
    }

    #[test]
    fn food_schedule_overrides_layout_count_per_generation() {
        let config = SimConfig {
            food: FoodLayout::Uniform { count: 50 },
            food_schedule: vec![(0, 40.0), (10, 0.0)],
            ..SimConfig::default()
        };
        assert!(config.validate().is_ok());
        assert_eq!(config.food_for_generation(0).count(), 40);
        assert_eq!(config.food_for_generation(5).count(), 20);
        assert_eq!(config.food_for_generation(12).count(), 0);

        let unscheduled = SimConfig::default();
        assert_eq!(unscheduled.food_for_generation(7), unscheduled.food);
    }

    #[test]
    fn food_schedule_parses_from_json_pairs() {
        let json = r#"{ "food_schedule": [[0, 60.0], [20, 15.0]] }"#;
        let cfg: SimConfig = serde_json::from_str(json).expect("schedule should parse");
        assert_eq!(cfg.food_schedule, vec![(0, 60.0), (20, 15.0)]);
        assert!(cfg.validate().is_ok());
    }

    #[test]
    fn validate_rejects_clustered_food_without_clusters() {
        let config = SimConfig {
            food: FoodLayout::Clustered {
                count: 10,
                clusters: 0,
                spread: 5.0,
            },
            ..SimConfig::default()
        };
        assert_eq!(config.validate(), Err(SimConfigError::InvalidFoodClusters));
    }

    #[test]
    fn validate_rejects_negative_trait_variance() {
        let mut config = SimConfig::default();
        config.initial_traits.sense_range = MutableTrait::new(20.0, -0.5);
        assert_eq!(
            config.validate(),
            Err(SimConfigError::InvalidTrait {
                name: "sense_range"
            })
        );

        let mut config = SimConfig::default();
        config.initial_traits.size = MutableTrait::fixed(0.0);
        assert_eq!(
            config.validate(),
            Err(SimConfigError::NonPositiveTrait { name: "size" })
        );
    }

    #[test]
    fn zero_speed_is_a_valid_if_doomed_configuration() {
        let mut config = SimConfig::default();
        config.initial_traits.speed = MutableTrait::fixed(0.0);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn legacy_config_json_deserializes_with_defaults() {
        let legacy_json = r#"{
            "seed": 7,
            "stage_size": 200.0,
            "population": 10
        }"#;
        let cfg: SimConfig = serde_json::from_str(legacy_json).expect("legacy config should parse");
        assert_eq!(cfg.seed, 7);
        assert_eq!(cfg.population, 10);
        assert_eq!(cfg.reproduction, ReproductionMode::Evolutionary);
        assert_eq!(cfg.max_steps_per_generation, DEFAULT_MAX_STEPS_PER_GENERATION);
        assert_eq!(cfg.initial_traits, CreatureTraits::default());
        assert!(cfg.validate().is_ok());
    }

    #[test]
    fn partial_trait_json_keeps_default_traits() {
        let json = r#"{
            "initial_traits": { "speed": { "value": 4.0, "variance": 0.0 } },
            "food": { "kind": "clustered", "count": 30, "clusters": 3, "spread": 12.5 }
        }"#;
        let cfg: SimConfig = serde_json::from_str(json).expect("partial config should parse");
        assert_eq!(cfg.initial_traits.speed, MutableTrait::fixed(4.0));
        assert_eq!(cfg.initial_traits.size, CreatureTraits::default().size);
        assert_eq!(cfg.food.count(), 30);
    }

    #[test]
    fn unknown_reproduction_mode_fails_deserialization() {
        let invalid_json = r#"{ "reproduction": "asexual" }"#;
        let result = serde_json::from_str::<SimConfig>(invalid_json);
        assert!(
            result.is_err(),
            "unknown reproduction mode should fail during deserialization"
        );
    }

    #[test]
    fn config_round_trips_through_json() {
        let config = SimConfig {
            reproduction: ReproductionMode::Random,
            shuffle_each_step: true,
            food_schedule: vec![(0, 30.0), (10, 5.0)],
            ..SimConfig::default()
        };
        let json = serde_json::to_string(&config).expect("serialize");
        let back: SimConfig = serde_json::from_str(&json).expect("deserialize");
        assert_eq!(back, config);
    }
}
