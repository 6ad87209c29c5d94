use crate::geometry::{self, Vec2};
use rand::Rng;
use serde::{Deserialize, Serialize};

/// Square arena `[0, size] x [0, size]`. Creatures live between the edges
/// and return to an edge to rest.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Stage {
    size: f64,
}

impl Stage {
    pub fn new(size: f64) -> Self {
        Self { size }
    }

    pub fn size(&self) -> f64 {
        self.size
    }

    pub fn center(&self) -> Vec2 {
        [0.5 * self.size, 0.5 * self.size]
    }

    /// Edges in order bottom, right, top, left.
    pub fn edges(&self) -> [(Vec2, Vec2); 4] {
        let s = self.size;
        [
            ([0.0, 0.0], [s, 0.0]),
            ([s, 0.0], [s, s]),
            ([s, s], [0.0, s]),
            ([0.0, s], [0.0, 0.0]),
        ]
    }

    pub fn random_location<R: Rng + ?Sized>(&self, rng: &mut R) -> Vec2 {
        let x = rng.random_range(0.0..self.size);
        let y = rng.random_range(0.0..self.size);
        [x, y]
    }

    pub fn contains(&self, p: Vec2) -> bool {
        (0.0..=self.size).contains(&p[0]) && (0.0..=self.size).contains(&p[1])
    }

    pub fn clamp(&self, p: Vec2) -> Vec2 {
        [p[0].clamp(0.0, self.size), p[1].clamp(0.0, self.size)]
    }

    /// Snap the coordinate closer to its nearest wall onto that wall.
    pub fn nearest_edge_point(&self, p: Vec2) -> Vec2 {
        let half = 0.5 * self.size;
        let x = if p[0] > half { self.size } else { 0.0 };
        let y = if p[1] > half { self.size } else { 0.0 };
        if (x - p[0]).abs() < (y - p[1]).abs() {
            [x, p[1]]
        } else {
            [p[0], y]
        }
    }

    /// Perpendicular foot of `p` on the nearest edge; first edge wins ties.
    pub fn compute_edge_home(&self, p: Vec2) -> Vec2 {
        let mut best: Option<(f64, Vec2)> = None;
        for (start, end) in self.edges() {
            let Some(offset) = geometry::project_onto_segment(start, end, p) else {
                continue;
            };
            let d = geometry::norm(geometry::sub(offset, geometry::sub(p, start)));
            if best.is_none_or(|(best_d, _)| d < best_d) {
                best = Some((d, geometry::add(start, offset)));
            }
        }
        best.map_or_else(|| self.nearest_edge_point(p), |(_, home)| home)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f64 = 1e-9;

    fn close(a: Vec2, b: Vec2) -> bool {
        (a[0] - b[0]).abs() < EPS && (a[1] - b[1]).abs() < EPS
    }

    #[test]
    fn center_and_bounds() {
        let stage = Stage::new(100.0);
        assert_eq!(stage.center(), [50.0, 50.0]);
        assert!(stage.contains([0.0, 100.0]));
        assert!(!stage.contains([-0.1, 50.0]));
        assert_eq!(stage.clamp([-5.0, 130.0]), [0.0, 100.0]);
    }

    #[test]
    fn edge_home_projects_onto_nearest_wall() {
        let stage = Stage::new(100.0);
        assert!(close(stage.compute_edge_home([10.0, 40.0]), [0.0, 40.0]));
        assert!(close(stage.compute_edge_home([70.0, 95.0]), [70.0, 100.0]));
        assert!(close(stage.compute_edge_home([99.0, 60.0]), [100.0, 60.0]));
        assert!(close(stage.compute_edge_home([30.0, 2.0]), [30.0, 0.0]));
    }

    #[test]
    fn edge_home_tie_prefers_first_edge() {
        let stage = Stage::new(100.0);
        // Equidistant from bottom and left; bottom is listed first.
        assert!(close(stage.compute_edge_home([5.0, 5.0]), [5.0, 0.0]));
    }

    #[test]
    fn nearest_edge_point_snaps_closer_axis() {
        let stage = Stage::new(100.0);
        assert_eq!(stage.nearest_edge_point([90.0, 40.0]), [100.0, 40.0]);
        assert_eq!(stage.nearest_edge_point([40.0, 10.0]), [40.0, 0.0]);
    }
}
