//! Pairwise predator/prey and forager/food interactions.
//!
//! Per-creature values are read into index-addressed snapshots before any
//! creature is mutated; the mutations themselves run strictly in iteration
//! order so later pairs observe earlier kills and claims. Distance tables are
//! filled one source row at a time, so memory stays linear in the population
//! and food counts.

use crate::constants::{
    HEADING_NOISE, HOMESICK_CALM_THRESHOLD, HOMESICK_MINOR_THRESHOLD, SATIETY_LIMIT,
};
use crate::creature::Creature;
use crate::food::{Food, FoodKind};
use crate::geometry::{self, Vec2};
use crate::objective::{Intensity, Objective, Reason};
use rand::Rng;

/// Distances from one source point to a fixed set of targets. The buffer is
/// reused across sources.
#[derive(Clone, Debug)]
pub struct DistanceRow<'a> {
    targets: &'a [Vec2],
    data: Vec<f64>,
}

impl<'a> DistanceRow<'a> {
    pub fn new(targets: &'a [Vec2]) -> Self {
        Self {
            targets,
            data: Vec::with_capacity(targets.len()),
        }
    }

    /// Recompute the row for `from`.
    pub fn fill(&mut self, from: Vec2) {
        self.data.clear();
        self.data
            .extend(self.targets.iter().map(|t| geometry::distance(from, *t)));
    }

    #[inline]
    pub fn get(&self, col: usize) -> f64 {
        self.data[col]
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Column of the smallest entry among columns where `allowed` holds.
    /// Lowest index wins ties.
    pub fn argmin(&self, allowed: impl Fn(usize) -> bool) -> Option<usize> {
        let mut best: Option<(usize, f64)> = None;
        for (col, &d) in self.data.iter().enumerate() {
            if !allowed(col) {
                continue;
            }
            if best.is_none_or(|(_, best_d)| d < best_d) {
                best = Some((col, d));
            }
        }
        best.map(|(col, _)| col)
    }
}

/// Per-creature values read once at the start of a pairwise pass.
#[derive(Clone, Debug)]
pub struct PopulationSnapshot {
    pub positions: Vec<Vec2>,
    pub sizes: Vec<f64>,
    pub speeds: Vec<f64>,
    pub active: Vec<bool>,
}

impl PopulationSnapshot {
    pub fn capture(creatures: &[Creature]) -> Self {
        let n = creatures.len();
        let mut snap = Self {
            positions: Vec::with_capacity(n),
            sizes: Vec::with_capacity(n),
            speeds: Vec::with_capacity(n),
            active: Vec::with_capacity(n),
        };
        for c in creatures {
            snap.positions.push(c.position());
            snap.sizes.push(c.effective_size());
            snap.speeds.push(c.effective_speed());
            snap.active.push(c.is_active());
        }
        snap
    }

    pub fn len(&self) -> usize {
        self.positions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }
}

/// Decide who hunts whom for the unordered pair `(a, b)`.
///
/// The strictly larger creature is the candidate predator (`b` on equal
/// size). Returns `(predator, prey)` only when the predator is large enough
/// relative to the prey.
#[inline]
pub fn predator_prey_roles(a: usize, b: usize, sizes: &[f64], ratio: f64) -> Option<(usize, usize)> {
    let (predator, prey) = if sizes[a] > sizes[b] { (a, b) } else { (b, a) };
    if sizes[predator] * ratio < sizes[prey] {
        return None;
    }
    Some((predator, prey))
}

/// Visit every unordered active pair `(a, b)` with `a < b`, outer index
/// ascending then inner, reading activity from `active` at visit time.
fn for_each_active_pair(active: &[bool], mut visit: impl FnMut(usize, usize) -> Option<usize>) {
    let mut active = active.to_vec();
    let n = active.len();
    for a in 0..n {
        for b in (a + 1)..n {
            if !active[a] || !active[b] {
                continue;
            }
            if let Some(killed) = visit(a, b) {
                active[killed] = false;
            }
        }
    }
}

/// ORIENT-phase predation: prey raise flee aversions, predators raise chase
/// cravings.
///
/// Each predator locks onto the slowest prey it has seen this step and only
/// switches to a strictly slower one. One uniform angle is drawn per fleeing
/// prey per pair, in pair order.
pub fn orient_predation<R: Rng + ?Sized>(creatures: &mut [Creature], size_ratio: f64, rng: &mut R) {
    if creatures.len() < 2 {
        return;
    }
    // Positions do not change during ORIENT, so the live sense and flee
    // checks agree with the snapshot.
    let snap = PopulationSnapshot::capture(creatures);
    let mut locked_prey_speed: Vec<Option<f64>> = vec![None; snap.len()];

    for_each_active_pair(&snap.active, |a, b| {
        let (predator, prey) = predator_prey_roles(a, b, &snap.sizes, size_ratio)?;
        let predator_pos = snap.positions[predator];
        let prey_pos = snap.positions[prey];

        if creatures[prey].within_flee_distance(predator_pos) {
            let angle = rng.random_range(-HEADING_NOISE..HEADING_NOISE);
            let threat = geometry::sub(predator_pos, prey_pos);
            let target = geometry::add(prey_pos, geometry::rotate(threat, angle));
            creatures[prey].add_objective(Objective::new(
                target,
                Intensity::VitalAversion,
                Reason::RunningAway,
            ));
        }

        if !creatures[predator].can_see(prey_pos) {
            return None;
        }
        let prey_speed = snap.speeds[prey];
        if locked_prey_speed[predator].is_some_and(|locked| locked <= prey_speed) {
            return None;
        }
        locked_prey_speed[predator] = Some(prey_speed);

        let intensity = Intensity::for_satiety(creatures[predator].foods_eaten_count());
        creatures[predator].add_objective(Objective::new(prey_pos, intensity, Reason::SeePrey));
        None
    });
}

/// ACT-phase predation: a predator that can reach its prey, now or along its
/// last move, eats it. Prey killed earlier in the pass are skipped.
///
/// Returns the number of kills.
pub fn act_predation(creatures: &mut [Creature], size_ratio: f64, step: usize) -> usize {
    if creatures.len() < 2 {
        return 0;
    }
    let snap = PopulationSnapshot::capture(creatures);
    let mut kills = 0;

    for_each_active_pair(&snap.active, |a, b| {
        let (predator, prey) = predator_prey_roles(a, b, &snap.sizes, size_ratio)?;
        // Predators do not move during ACT; `can_reach` covers both the
        // instantaneous reach and the swept last move.
        if !creatures[predator].can_reach(snap.positions[prey]) {
            return None;
        }
        creatures[predator].eat_food(step, FoodKind::Creature);
        creatures[prey].kill();
        kills += 1;
        Some(prey)
    });
    kills
}

/// Indices of food items that have not been eaten.
pub fn available_food(food: &[Food]) -> Vec<usize> {
    food.iter()
        .enumerate()
        .filter(|(_, f)| !f.is_eaten())
        .map(|(i, _)| i)
        .collect()
}

/// ORIENT-phase foraging: each hungry active creature targets its nearest
/// visible uneaten food at satiety-tiered intensity.
pub fn orient_scavenge(creatures: &mut [Creature], food: &[Food]) {
    let available = available_food(food);
    if available.is_empty() || creatures.is_empty() {
        return;
    }
    let food_positions: Vec<Vec2> = available.iter().map(|&i| food[i].position()).collect();
    let mut row = DistanceRow::new(&food_positions);

    for c in creatures.iter_mut() {
        if !c.is_active() || c.foods_eaten_count() >= SATIETY_LIMIT {
            continue;
        }
        row.fill(c.position());
        let Some(nearest) = row.argmin(|_| true) else {
            continue;
        };
        if c.can_see(food_positions[nearest]) {
            let intensity = Intensity::for_satiety(c.foods_eaten_count());
            c.add_objective(Objective::new(
                food_positions[nearest],
                intensity,
                Reason::SeeFood,
            ));
        }
    }
}

/// ACT-phase foraging: hungry active creatures, in order, try to eat their
/// nearest food not yet claimed this pass. First come, first served.
///
/// Returns the number of items eaten.
pub fn act_scavenge(creatures: &mut [Creature], food: &mut [Food], step: usize) -> usize {
    let available = available_food(food);
    if available.is_empty() || creatures.is_empty() {
        return 0;
    }
    let food_positions: Vec<Vec2> = available.iter().map(|&i| food[i].position()).collect();
    let mut row = DistanceRow::new(&food_positions);
    let mut claimed = vec![false; available.len()];
    let mut eaten = 0;

    for c in creatures.iter_mut() {
        if !c.is_active() || c.foods_eaten_count() >= SATIETY_LIMIT {
            continue;
        }
        row.fill(c.position());
        let Some(nearest) = row.argmin(|j| !claimed[j]) else {
            continue;
        };
        let item = &mut food[available[nearest]];
        if item.is_eaten() {
            continue;
        }
        if c.can_reach(item.position()) {
            c.eat_food(step, FoodKind::Food);
            item.mark_eaten(step);
            claimed[nearest] = true;
            eaten += 1;
        }
    }
    eaten
}

/// Urgency of heading home for a creature that has eaten exactly one item.
///
/// Compares the moves the creature can still afford against the moves needed
/// to get home. `None` means there is enough slack to keep foraging.
pub fn homesick_objective(creature: &Creature) -> Option<Objective> {
    let home = creature.home_position();
    let speed = creature.effective_speed();
    if speed == 0.0 {
        return Some(Objective::new(home, Intensity::VitalCraving, Reason::LowEnergy));
    }
    let cost = creature.motion_energy_cost();
    if cost == 0.0 {
        return None;
    }
    let steps_to_home = geometry::distance(creature.position(), home) / speed;
    let factor = creature.energy_left() / cost - steps_to_home;
    let intensity = if factor > HOMESICK_CALM_THRESHOLD {
        return None;
    } else if factor > HOMESICK_MINOR_THRESHOLD {
        Intensity::MinorCraving
    } else if factor > 0.0 {
        Intensity::MajorCraving
    } else {
        Intensity::VitalCraving
    };
    Some(Objective::new(home, intensity, Reason::LowEnergy))
}

/// ORIENT-phase homing: sated creatures head home, creatures with one item
/// head home when energy runs short. Any creature that raised a homing
/// objective and can already reach home falls asleep.
pub fn orient_satisfied(creatures: &mut [Creature]) {
    for c in creatures.iter_mut().filter(|c| c.is_active()) {
        let objective = match c.foods_eaten_count() {
            0 => None,
            1 => homesick_objective(c),
            _ => Some(Objective::new(
                c.home_position(),
                Intensity::MajorCraving,
                Reason::Satisfied,
            )),
        };
        let Some(objective) = objective else {
            continue;
        };
        c.add_objective(objective);
        if c.can_reach(c.home_position()) {
            c.sleep();
        }
    }
}
