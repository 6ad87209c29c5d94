use super::super::Generation;

impl Generation {
    /// Once the food is gone, active creatures that never ate starve.
    pub fn step_post_phase(&mut self) {
        if self.available_food_count() > 0 {
            return;
        }
        for c in self.creatures.iter_mut() {
            if c.is_active() && c.foods_eaten_count() == 0 {
                c.kill();
            }
        }
    }
}
