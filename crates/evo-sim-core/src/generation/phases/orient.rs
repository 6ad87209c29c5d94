use super::super::Generation;
use crate::constants::HEADING_NOISE;
use crate::geometry;
use crate::kernels;
use crate::objective::{Intensity, Objective, Reason};
use crate::stage::Stage;
use rand::Rng;

impl Generation {
    /// Raise candidate objectives in fixed order: wander, predation and
    /// flight, foraging, homing.
    pub fn step_orient_phase<R: Rng + ?Sized>(&mut self, stage: &Stage, rng: &mut R) {
        self.orient_wander(stage, rng);
        kernels::orient_predation(&mut self.creatures, self.params.predation_size_ratio, rng);
        kernels::orient_scavenge(&mut self.creatures, &self.food);
        kernels::orient_satisfied(&mut self.creatures);
    }

    fn orient_wander<R: Rng + ?Sized>(&mut self, stage: &Stage, rng: &mut R) {
        for c in self.creatures.iter_mut().filter(|c| c.is_active()) {
            let angle = rng.random_range(-HEADING_NOISE..HEADING_NOISE);
            let heading = geometry::rotate(c.direction(), angle);
            let ahead = geometry::add(c.position(), heading);
            let target = if stage.contains(ahead) {
                ahead
            } else {
                stage.center()
            };
            c.add_objective(Objective::new(
                target,
                Intensity::MinorCraving,
                Reason::Wandering,
            ));
        }
    }
}
