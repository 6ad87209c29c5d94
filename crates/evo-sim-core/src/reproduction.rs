use crate::creature::{Creature, CreatureTraits, MutableTrait};
use crate::stage::Stage;
use rand::Rng;
use serde::{Deserialize, Serialize};

/// How the next generation is derived from the survivors of the last one.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReproductionMode {
    /// Well-fed survivors add a mutated offspring; every survivor carries on.
    #[default]
    Evolutionary,
    /// Well-fed survivors add an identical-trait offspring; every survivor
    /// carries on.
    Clone,
    /// Survivors are discarded and a fresh random population is drawn.
    Random,
}

impl ReproductionMode {
    pub fn label(self) -> &'static str {
        match self {
            Self::Evolutionary => "evolutionary",
            Self::Clone => "clone",
            Self::Random => "random",
        }
    }

    pub const ALL: [ReproductionMode; 3] = [Self::Evolutionary, Self::Clone, Self::Random];

    /// Build the next population. `population` and `energy_budget` are only
    /// used by [`ReproductionMode::Random`].
    pub fn reproduce<'a, R, I>(
        self,
        survivors: I,
        stage: &Stage,
        population: usize,
        energy_budget: f64,
        rng: &mut R,
    ) -> Vec<Creature>
    where
        R: Rng + ?Sized,
        I: IntoIterator<Item = &'a Creature>,
    {
        match self {
            Self::Evolutionary => survivors
                .into_iter()
                .filter(|c| c.is_alive())
                .flat_map(|c| {
                    let child = (c.foods_eaten_count() > 1).then(|| c.mutate(rng));
                    child.into_iter().chain(std::iter::once(c.age_forward()))
                })
                .collect(),
            Self::Clone => survivors
                .into_iter()
                .filter(|c| c.is_alive())
                .flat_map(|c| {
                    let child = (c.foods_eaten_count() > 1).then(|| c.clone_offspring());
                    child.into_iter().chain(std::iter::once(c.age_forward()))
                })
                .collect(),
            Self::Random => random_population(stage, population, energy_budget, rng),
        }
    }
}

/// Fixed-trait creatures with uniformly drawn speed, size and sense range,
/// each spawned on the stage edge nearest a random location.
pub fn random_population<R: Rng + ?Sized>(
    stage: &Stage,
    population: usize,
    energy_budget: f64,
    rng: &mut R,
) -> Vec<Creature> {
    (0..population)
        .map(|_| {
            let speed = rng.random_range(1.0..20.0);
            let size = rng.random_range(1.0..20.0);
            let sense_range = rng.random_range(1.0..40.0);
            let traits = CreatureTraits {
                speed: MutableTrait::fixed(speed),
                size: MutableTrait::fixed(size),
                sense_range: MutableTrait::fixed(sense_range),
                reach: MutableTrait::fixed(1.0),
                flee_distance: MutableTrait::fixed(1e12),
                life_span: MutableTrait::fixed(1e4),
            };
            let position = stage.nearest_edge_point(stage.random_location(rng));
            Creature::new(position, traits, energy_budget)
        })
        .collect()
}
