use super::super::Generation;
use crate::kernels;

impl Generation {
    /// Predation first, then foraging among whoever is still active.
    pub fn step_act_phase(&mut self) {
        let step = self.step;
        kernels::act_predation(&mut self.creatures, self.params.predation_size_ratio, step);
        kernels::act_scavenge(&mut self.creatures, &mut self.food, step);
    }
}
