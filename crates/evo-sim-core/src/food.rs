use crate::geometry::Vec2;
use crate::rng::gaussian;
use crate::stage::Stage;
use rand::Rng;
use serde::{Deserialize, Serialize};

/// What a creature ate.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FoodKind {
    Food,
    Creature,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct FoodRecord {
    pub step: usize,
    pub kind: FoodKind,
}

/// A food item placed for one generation. Inert once eaten.
#[derive(Clone, Debug, PartialEq)]
pub struct Food {
    position: Vec2,
    eaten_step: Option<usize>,
}

impl Food {
    pub fn new(position: Vec2) -> Self {
        Self {
            position,
            eaten_step: None,
        }
    }

    pub fn position(&self) -> Vec2 {
        self.position
    }

    pub fn is_eaten(&self) -> bool {
        self.eaten_step.is_some()
    }

    pub fn eaten_step(&self) -> Option<usize> {
        self.eaten_step
    }

    /// Mark eaten at `step`. The first claim sticks.
    pub fn mark_eaten(&mut self, step: usize) {
        if self.eaten_step.is_none() {
            self.eaten_step = Some(step);
        }
    }
}

/// How food positions are laid out at the start of a generation.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum FoodLayout {
    /// `count` items scattered uniformly over the stage.
    Uniform { count: usize },
    /// `count` items scattered around `clusters` uniformly placed centers
    /// with per-axis normal spread, clamped to the stage.
    Clustered {
        count: usize,
        clusters: usize,
        spread: f64,
    },
}

impl Default for FoodLayout {
    fn default() -> Self {
        Self::Uniform { count: 50 }
    }
}

impl FoodLayout {
    pub fn count(&self) -> usize {
        match *self {
            Self::Uniform { count } | Self::Clustered { count, .. } => count,
        }
    }

    /// Same layout with a different item count.
    pub fn with_count(self, count: usize) -> Self {
        match self {
            Self::Uniform { .. } => Self::Uniform { count },
            Self::Clustered {
                clusters, spread, ..
            } => Self::Clustered {
                count,
                clusters,
                spread,
            },
        }
    }

    pub fn generate<R: Rng + ?Sized>(&self, stage: &Stage, rng: &mut R) -> Vec<Vec2> {
        match *self {
            Self::Uniform { count } => (0..count).map(|_| stage.random_location(rng)).collect(),
            Self::Clustered {
                count,
                clusters,
                spread,
            } => {
                if clusters == 0 {
                    return Vec::new();
                }
                let centers: Vec<Vec2> =
                    (0..clusters).map(|_| stage.random_location(rng)).collect();
                (0..count)
                    .map(|_| {
                        let center = centers[rng.random_range(0..clusters)];
                        let x = gaussian(rng, center[0], spread);
                        let y = gaussian(rng, center[1], spread);
                        stage.clamp([x, y])
                    })
                    .collect()
            }
        }
    }
}

/// Food count for `generation` from `(generation, count)` points sorted by
/// generation.
///
/// Linear between neighbouring points, held at the first value before the
/// first point and at the last value from the last point on, rounded to the
/// nearest whole item. `None` for an empty schedule.
pub fn scheduled_food_count(schedule: &[(usize, f64)], generation: usize) -> Option<usize> {
    let (&(first_gen, first_count), &(last_gen, last_count)) =
        (schedule.first()?, schedule.last()?);
    let count = if generation < first_gen {
        first_count
    } else if generation >= last_gen {
        last_count
    } else {
        let upper = schedule
            .iter()
            .position(|&(g, _)| generation < g)
            .unwrap_or(schedule.len() - 1);
        let (x1, y1) = schedule[upper - 1];
        let (x2, y2) = schedule[upper];
        let t = (generation - x1) as f64 / (x2 - x1) as f64;
        y1 + (y2 - y1) * t
    };
    Some(count.max(0.0).round() as usize)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rng::create_rng;

    #[test]
    fn mark_eaten_is_first_come() {
        let mut f = Food::new([1.0, 2.0]);
        assert!(!f.is_eaten());
        f.mark_eaten(3);
        f.mark_eaten(9);
        assert_eq!(f.eaten_step(), Some(3));
    }

    #[test]
    fn uniform_layout_stays_on_stage() {
        let stage = Stage::new(50.0);
        let mut rng = create_rng(1);
        let positions = FoodLayout::Uniform { count: 200 }.generate(&stage, &mut rng);
        assert_eq!(positions.len(), 200);
        assert!(positions.iter().all(|p| stage.contains(*p)));
    }

    #[test]
    fn clustered_layout_is_clamped_and_deterministic() {
        let stage = Stage::new(30.0);
        let layout = FoodLayout::Clustered {
            count: 100,
            clusters: 3,
            spread: 40.0,
        };
        let a = layout.generate(&stage, &mut create_rng(8));
        let b = layout.generate(&stage, &mut create_rng(8));
        assert_eq!(a, b);
        assert!(a.iter().all(|p| stage.contains(*p)));
    }

    #[test]
    fn clustered_layout_without_clusters_is_empty() {
        let layout = FoodLayout::Clustered {
            count: 10,
            clusters: 0,
            spread: 1.0,
        };
        assert!(layout.generate(&Stage::new(10.0), &mut create_rng(0)).is_empty());
    }

    #[test]
    fn schedule_interpolates_linearly_and_clamps_at_the_ends() {
        let schedule = [(2, 100.0), (6, 20.0), (10, 20.0)];
        assert_eq!(scheduled_food_count(&schedule, 0), Some(100));
        assert_eq!(scheduled_food_count(&schedule, 2), Some(100));
        assert_eq!(scheduled_food_count(&schedule, 3), Some(80));
        assert_eq!(scheduled_food_count(&schedule, 5), Some(40));
        assert_eq!(scheduled_food_count(&schedule, 6), Some(20));
        assert_eq!(scheduled_food_count(&schedule, 8), Some(20));
        assert_eq!(scheduled_food_count(&schedule, 10), Some(20));
        assert_eq!(scheduled_food_count(&schedule, 500), Some(20));
    }

    #[test]
    fn schedule_rounds_to_nearest_item() {
        let schedule = [(0, 10.0), (4, 11.0)];
        assert_eq!(scheduled_food_count(&schedule, 1), Some(10));
        assert_eq!(scheduled_food_count(&schedule, 2), Some(11));
        assert_eq!(scheduled_food_count(&schedule, 3), Some(11));
    }

    #[test]
    fn schedule_with_repeated_generation_steps_without_division_by_zero() {
        let schedule = [(0, 50.0), (3, 50.0), (3, 5.0), (6, 5.0)];
        assert_eq!(scheduled_food_count(&schedule, 2), Some(50));
        assert_eq!(scheduled_food_count(&schedule, 3), Some(5));
        assert_eq!(scheduled_food_count(&schedule, 4), Some(5));
    }

    #[test]
    fn empty_schedule_defers_to_the_layout() {
        assert_eq!(scheduled_food_count(&[], 3), None);
        let layout = FoodLayout::Clustered {
            count: 10,
            clusters: 2,
            spread: 4.0,
        };
        assert_eq!(layout.with_count(3).count(), 3);
        assert!(matches!(
            layout.with_count(3),
            FoodLayout::Clustered { clusters: 2, .. }
        ));
    }
}
