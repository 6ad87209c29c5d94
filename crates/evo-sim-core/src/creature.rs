use crate::constants::{DEFAULT_HEADING, ENERGY_COST_SCALE_FACTOR};
use crate::food::{FoodKind, FoodRecord};
use crate::geometry::{self, Vec2};
use crate::objective::{self, Objective};
use crate::rng::gaussian;
use rand::Rng;
use serde::{Deserialize, Serialize};

/// A heritable trait: the expressed base value and the spread used when an
/// offspring draws its own value.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct MutableTrait {
    pub value: f64,
    pub variance: f64,
}

impl MutableTrait {
    pub const fn new(value: f64, variance: f64) -> Self {
        Self { value, variance }
    }

    /// Fixed trait that never changes across generations.
    pub const fn fixed(value: f64) -> Self {
        Self::new(value, 0.0)
    }

    /// Offspring value for a trait that must stay strictly positive.
    fn mutate_positive_non_zero<R: Rng + ?Sized>(&self, rng: &mut R) -> Self {
        let value = gaussian(rng, self.value, self.variance).max(f64::MIN_POSITIVE);
        Self::new(value, self.variance)
    }

    /// Offspring value for a trait that must stay non-negative.
    fn mutate_non_negative<R: Rng + ?Sized>(&self, rng: &mut R) -> Self {
        let value = gaussian(rng, self.value, self.variance).max(0.0);
        Self::new(value, self.variance)
    }
}

/// Complete heritable trait set of a creature.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CreatureTraits {
    pub speed: MutableTrait,
    pub size: MutableTrait,
    pub sense_range: MutableTrait,
    pub reach: MutableTrait,
    pub flee_distance: MutableTrait,
    pub life_span: MutableTrait,
}

impl Default for CreatureTraits {
    fn default() -> Self {
        Self {
            speed: MutableTrait::new(10.0, 0.5),
            size: MutableTrait::new(10.0, 0.5),
            sense_range: MutableTrait::new(20.0, 0.5),
            reach: MutableTrait::fixed(1.0),
            flee_distance: MutableTrait::fixed(1e12),
            life_span: MutableTrait::fixed(1e4),
        }
    }
}

impl CreatureTraits {
    /// Trait set with the given speed, size and sense range and no variance.
    pub fn fixed(speed: f64, size: f64, sense_range: f64) -> Self {
        Self {
            speed: MutableTrait::fixed(speed),
            size: MutableTrait::fixed(size),
            sense_range: MutableTrait::fixed(sense_range),
            ..Self::default()
        }
    }

    /// Draw an offspring trait set. One draw per trait with non-zero variance,
    /// in declaration order.
    pub fn mutate<R: Rng + ?Sized>(&self, rng: &mut R) -> Self {
        Self {
            speed: self.speed.mutate_positive_non_zero(rng),
            size: self.size.mutate_positive_non_zero(rng),
            sense_range: self.sense_range.mutate_non_negative(rng),
            reach: self.reach.mutate_positive_non_zero(rng),
            flee_distance: self.flee_distance.mutate_non_negative(rng),
            life_span: self.life_span.mutate_positive_non_zero(rng),
        }
    }
}

/// Runtime values derived once from the base traits.
#[derive(Clone, Copy, Debug, PartialEq)]
struct EffectiveTraits {
    size: f64,
    speed: f64,
    sense_range: f64,
    reach: f64,
    motion_energy_cost: f64,
}

impl EffectiveTraits {
    fn derive(traits: &CreatureTraits) -> Self {
        let size = traits.size.value;
        let speed = traits.speed.value * size / 10.0;
        let sense_range = traits.sense_range.value;
        let reach = traits.reach.value.max(size / 4.0);
        let motion_energy_cost =
            ENERGY_COST_SCALE_FACTOR * (size.powi(3) * speed.powi(2) + sense_range);
        Self {
            size,
            speed,
            sense_range,
            reach,
            motion_energy_cost,
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LifeState {
    #[default]
    Active,
    Asleep,
    Dead,
}

#[derive(Clone, Debug)]
pub struct Creature {
    // Traits are private; effective values must stay consistent with them.
    traits: CreatureTraits,
    effective: EffectiveTraits,
    position: Vec2,
    previous_position: Option<Vec2>,
    home_position: Vec2,
    energy_budget: f64,
    energy_consumed: f64,
    age: u32,
    foods_eaten: Vec<FoodRecord>,
    state: LifeState,
    objective: Option<Objective>,
}

impl Creature {
    pub fn new(position: Vec2, traits: CreatureTraits, energy_budget: f64) -> Self {
        Self {
            effective: EffectiveTraits::derive(&traits),
            traits,
            position,
            previous_position: None,
            home_position: position,
            energy_budget,
            energy_consumed: 0.0,
            age: 0,
            foods_eaten: Vec::new(),
            state: LifeState::Active,
            objective: None,
        }
    }

    pub fn with_age(mut self, age: u32) -> Self {
        self.age = age;
        self
    }

    pub fn traits(&self) -> &CreatureTraits {
        &self.traits
    }

    pub fn position(&self) -> Vec2 {
        self.position
    }

    /// Position before the most recent move, if the creature has moved.
    pub fn previous_position(&self) -> Option<Vec2> {
        self.previous_position
    }

    pub fn home_position(&self) -> Vec2 {
        self.home_position
    }

    pub fn set_home_position(&mut self, home: Vec2) {
        self.home_position = home;
    }

    pub fn effective_size(&self) -> f64 {
        self.effective.size
    }

    pub fn effective_speed(&self) -> f64 {
        self.effective.speed
    }

    pub fn effective_sense_range(&self) -> f64 {
        self.effective.sense_range
    }

    pub fn effective_reach(&self) -> f64 {
        self.effective.reach
    }

    pub fn motion_energy_cost(&self) -> f64 {
        self.effective.motion_energy_cost
    }

    pub fn flee_distance(&self) -> f64 {
        self.traits.flee_distance.value
    }

    pub fn life_span(&self) -> f64 {
        self.traits.life_span.value
    }

    pub fn energy_budget(&self) -> f64 {
        self.energy_budget
    }

    pub fn energy_consumed(&self) -> f64 {
        self.energy_consumed
    }

    pub fn energy_left(&self) -> f64 {
        (self.energy_budget - self.energy_consumed).max(0.0)
    }

    pub fn age(&self) -> u32 {
        self.age
    }

    pub fn foods_eaten(&self) -> &[FoodRecord] {
        &self.foods_eaten
    }

    pub fn foods_eaten_count(&self) -> usize {
        self.foods_eaten.len()
    }

    pub fn state(&self) -> LifeState {
        self.state
    }

    pub fn is_alive(&self) -> bool {
        self.state != LifeState::Dead
    }

    pub fn is_active(&self) -> bool {
        self.state == LifeState::Active
    }

    pub fn objective(&self) -> Option<&Objective> {
        self.objective.as_ref()
    }

    pub fn clear_objective(&mut self) {
        self.objective = None;
    }

    /// Charge `cost` energy; the creature dies once nothing is left.
    pub fn apply_energy_cost(&mut self, cost: f64) {
        self.energy_consumed += cost;
        if self.energy_left() <= 0.0 {
            self.state = LifeState::Dead;
        }
    }

    /// Relocate, then pay for the move. A creature that cannot afford the
    /// move still arrives and dies on arrival.
    pub fn move_to(&mut self, position: Vec2) {
        self.previous_position = Some(self.position);
        self.position = position;
        self.apply_energy_cost(self.effective.motion_energy_cost);
    }

    pub fn can_see(&self, point: Vec2) -> bool {
        geometry::distance_sq(point, self.position) <= self.effective.sense_range.powi(2)
    }

    pub fn can_reach_now(&self, point: Vec2) -> bool {
        geometry::distance(point, self.position) <= self.effective.reach
    }

    /// Reachable now, or swept by the reach radius along the last move.
    pub fn can_reach(&self, point: Vec2) -> bool {
        if self.can_reach_now(point) {
            return true;
        }
        let Some(last) = self.previous_position else {
            return false;
        };
        geometry::distance_to_segment(self.position, last, point)
            .is_some_and(|d| d <= self.effective.reach)
    }

    /// Visible and strictly closer than the flee distance.
    pub fn within_flee_distance(&self, point: Vec2) -> bool {
        let d_sq = geometry::distance_sq(point, self.position);
        if d_sq > self.effective.sense_range.powi(2) {
            return false;
        }
        d_sq < self.traits.flee_distance.value.powi(2)
    }

    /// Unit heading: toward (or away from) the objective, else along the last
    /// displacement, else the default heading.
    pub fn direction(&self) -> Vec2 {
        if let Some(obj) = &self.objective {
            let mut d = geometry::sub(obj.target, self.position);
            if obj.intensity.is_aversion() {
                d = geometry::scale(d, -1.0);
            }
            if let Some(unit) = geometry::normalize(d) {
                return unit;
            }
        }
        self.previous_position
            .and_then(|last| geometry::normalize(geometry::sub(self.position, last)))
            .unwrap_or(DEFAULT_HEADING)
    }

    /// Offer a candidate objective; it replaces the current one only if it is
    /// more intense, or equally intense and strictly closer.
    pub fn add_objective(&mut self, candidate: Objective) {
        self.objective = Some(objective::arbitrate(
            self.objective,
            candidate,
            self.position,
        ));
    }

    pub fn eat_food(&mut self, step: usize, kind: FoodKind) {
        self.foods_eaten.push(FoodRecord { step, kind });
    }

    pub fn sleep(&mut self) {
        self.state = LifeState::Asleep;
    }

    pub fn kill(&mut self) {
        self.state = LifeState::Dead;
    }

    /// Offspring with freshly drawn traits, born at this creature's home.
    pub fn mutate<R: Rng + ?Sized>(&self, rng: &mut R) -> Creature {
        Creature::new(
            self.home_position,
            self.traits.mutate(rng),
            self.energy_budget,
        )
    }

    /// This creature carried into the next generation, one generation older.
    pub fn age_forward(&self) -> Creature {
        Creature::new(self.home_position, self.traits, self.energy_budget)
            .with_age(self.age.saturating_add(1))
    }

    /// Identical-trait newborn at this creature's home.
    pub fn clone_offspring(&self) -> Creature {
        Creature::new(self.home_position, self.traits, self.energy_budget)
    }
}
