use super::super::Generation;

impl Generation {
    pub fn step_final_phase(&mut self) {
        for c in self.creatures.iter_mut() {
            if c.is_alive() && c.foods_eaten_count() == 0 {
                c.kill();
            }
        }
    }
}
