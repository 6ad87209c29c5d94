use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha12Rng;
use rand_distr::{Distribution, Normal};

/// Create a deterministic RNG from a seed.
pub fn create_rng(seed: u64) -> ChaCha12Rng {
    ChaCha12Rng::seed_from_u64(seed)
}

/// Draw from `Normal(mean, sd)`.
///
/// A zero (or invalid) standard deviation returns `mean` without touching the
/// stream, so zero-variance traits copy exactly and keep later draws aligned.
pub fn gaussian<R: Rng + ?Sized>(rng: &mut R, mean: f64, sd: f64) -> f64 {
    if sd == 0.0 {
        return mean;
    }
    match Normal::new(mean, sd) {
        Ok(normal) => normal.sample(rng),
        Err(_) => mean,
    }
}
