use crate::config::SimConfig;
use crate::constants::{
    DEFAULT_AGE_LIMIT_VARIANCE, DEFAULT_MAX_STEPS_PER_GENERATION, DEFAULT_PREDATION_SIZE_RATIO,
};
use crate::creature::Creature;
use crate::food::{Food, FoodKind};
use crate::stage::Stage;
use rand::seq::SliceRandom;
use rand::Rng;
use tracing::{debug, warn};

/// Tunables the behavior pipeline reads on every step.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PipelineParams {
    /// A predator must satisfy `predator_size * ratio >= prey_size`.
    pub predation_size_ratio: f64,
    /// Standard deviation of the INIT lifetime draw.
    pub age_limit_variance: f64,
    /// Active creatures are killed once the step counter reaches this value.
    pub max_steps: usize,
    pub shuffle_each_step: bool,
}

impl Default for PipelineParams {
    fn default() -> Self {
        Self {
            predation_size_ratio: DEFAULT_PREDATION_SIZE_RATIO,
            age_limit_variance: DEFAULT_AGE_LIMIT_VARIANCE,
            max_steps: DEFAULT_MAX_STEPS_PER_GENERATION,
            shuffle_each_step: false,
        }
    }
}

impl From<&SimConfig> for PipelineParams {
    fn from(config: &SimConfig) -> Self {
        Self {
            predation_size_ratio: config.predation_size_ratio,
            age_limit_variance: config.age_limit_variance,
            max_steps: config.max_steps_per_generation,
            shuffle_each_step: config.shuffle_each_step,
        }
    }
}

/// One population lifecycle: INIT, then steps until nobody is active, then
/// FINAL.
#[derive(Clone, Debug)]
pub struct Generation {
    creatures: Vec<Creature>,
    food: Vec<Food>,
    step: usize,
    creature_steps: usize,
    params: PipelineParams,
}

impl Generation {
    pub fn new(creatures: Vec<Creature>, food: Vec<Food>, params: PipelineParams) -> Self {
        Self {
            creatures,
            food,
            step: 1,
            creature_steps: 0,
            params,
        }
    }

    pub fn creatures(&self) -> &[Creature] {
        &self.creatures
    }

    pub fn food(&self) -> &[Food] {
        &self.food
    }

    pub fn params(&self) -> &PipelineParams {
        &self.params
    }

    /// Index of the next step to run. Starts at 1.
    pub fn step(&self) -> usize {
        self.step
    }

    /// Number of steps run so far.
    pub fn steps_run(&self) -> usize {
        self.step - 1
    }

    /// Sum over steps of the number of creatures active at the start of it.
    pub fn creature_steps(&self) -> usize {
        self.creature_steps
    }

    pub fn available_food_count(&self) -> usize {
        self.food.iter().filter(|f| !f.is_eaten()).count()
    }

    pub fn has_living_creatures(&self) -> bool {
        self.creatures.iter().any(Creature::is_alive)
    }

    pub fn has_active_creatures(&self) -> bool {
        self.creatures.iter().any(Creature::is_active)
    }

    pub fn survivors(&self) -> impl Iterator<Item = &Creature> + '_ {
        self.creatures.iter().filter(|c| c.is_alive())
    }

    /// Creatures eaten by predators so far.
    pub fn creatures_eaten(&self) -> usize {
        self.creatures
            .iter()
            .flat_map(Creature::foods_eaten)
            .filter(|r| r.kind == FoodKind::Creature)
            .count()
    }

    pub fn into_creatures(self) -> Vec<Creature> {
        self.creatures
    }

    /// Run the generation to completion.
    pub fn run<R: Rng + ?Sized>(&mut self, stage: &Stage, rng: &mut R) {
        self.step_init_phase(rng);
        while self.has_active_creatures() {
            if self.step >= self.params.max_steps {
                let stragglers = self.kill_active();
                warn!(
                    step = self.step,
                    stragglers, "generation hit the step cap; killing active creatures"
                );
                break;
            }
            self.advance(stage, rng);
        }
        self.step_final_phase();
        debug!(
            steps = self.steps_run(),
            creature_steps = self.creature_steps,
            survivors = self.survivors().count(),
            food_left = self.available_food_count(),
            creatures_eaten = self.creatures_eaten(),
            "generation finished"
        );
    }

    /// One simulation step: PRE, ORIENT, MOVE, ACT, POST.
    pub fn advance<R: Rng + ?Sized>(&mut self, stage: &Stage, rng: &mut R) {
        if self.params.shuffle_each_step {
            self.creatures.shuffle(rng);
        }
        self.creature_steps += self.creatures.iter().filter(|c| c.is_active()).count();
        self.step_pre_phase(stage);
        self.step_orient_phase(stage, rng);
        self.step_move_phase(stage);
        self.step_act_phase();
        self.step_post_phase();
        self.step += 1;
    }

    fn kill_active(&mut self) -> usize {
        let mut killed = 0;
        for c in self.creatures.iter_mut().filter(|c| c.is_active()) {
            c.kill();
            killed += 1;
        }
        killed
    }
}

mod phases;
