use super::super::Generation;
use crate::geometry;
use crate::stage::Stage;

impl Generation {
    /// Advance each active creature one full stride along its heading,
    /// clamped to the stage. Paying for the move may kill it.
    pub fn step_move_phase(&mut self, stage: &Stage) {
        for c in self.creatures.iter_mut().filter(|c| c.is_active()) {
            let stride = geometry::scale(c.direction(), c.effective_speed());
            let next = stage.clamp(geometry::add(c.position(), stride));
            c.move_to(next);
        }
    }
}
