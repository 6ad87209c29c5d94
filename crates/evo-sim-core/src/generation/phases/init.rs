use super::super::Generation;
use crate::rng::gaussian;
use rand::Rng;

impl Generation {
    /// Cull creatures that cannot move, then those past a freshly drawn
    /// lifetime. One draw per surviving creature, in population order.
    pub fn step_init_phase<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        for c in self.creatures.iter_mut() {
            if c.effective_speed() == 0.0 {
                c.kill();
            }
        }
        let sd = self.params.age_limit_variance;
        for c in self.creatures.iter_mut().filter(|c| c.is_alive()) {
            let lifetime = gaussian(rng, c.life_span(), sd);
            if f64::from(c.age()) > lifetime {
                c.kill();
            }
        }
    }
}
