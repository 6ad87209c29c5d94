use super::super::Generation;
use crate::stage::Stage;

impl Generation {
    /// Reset objectives and re-home every living creature on its nearest edge.
    pub fn step_pre_phase(&mut self, stage: &Stage) {
        for c in self.creatures.iter_mut().filter(|c| c.is_alive()) {
            c.clear_objective();
            c.set_home_position(stage.compute_edge_home(c.position()));
        }
    }
}
