//! Point proposal strategies over a bound box.

use bb_types::Bounds;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Common trait for strategies that propose points to evaluate.
pub trait SearchStrategy: Send {
    /// Generate the next batch of points to evaluate.
    fn suggest(&mut self, count: usize) -> Vec<Vec<f64>>;

    /// Human-readable strategy name.
    fn name(&self) -> &str;
}

/// Builds an RNG from an optional seed, falling back to OS entropy.
pub fn make_rng(seed: Option<u64>) -> StdRng {
    match seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_os_rng(),
    }
}

/// Uniform point in `[lower, upper)`.
pub fn uniform_point<R: Rng + ?Sized>(bounds: &Bounds, rng: &mut R) -> Vec<f64> {
    let unit: Vec<f64> = (0..bounds.dimension()).map(|_| rng.random::<f64>()).collect();
    bounds.scale_unit(&unit)
}

/// Restart point: `lower + (u1 + u2) * (upper - lower) / 2` with independent
/// uniform `u1`, `u2`. Concentrated toward the middle of the box.
pub fn restart_point<R: Rng + ?Sized>(bounds: &Bounds, rng: &mut R) -> Vec<f64> {
    let unit: Vec<f64> = (0..bounds.dimension())
        .map(|_| (rng.random::<f64>() + rng.random::<f64>()) / 2.0)
        .collect();
    bounds.scale_unit(&unit)
}

// ---- Random search ----

/// Independent uniform sampling across the bound box.
#[derive(Debug, Clone)]
pub struct RandomSearch {
    bounds: Bounds,
    rng: StdRng,
}

impl RandomSearch {
    pub fn new(bounds: Bounds, seed: Option<u64>) -> Self {
        Self {
            bounds,
            rng: make_rng(seed),
        }
    }

    fn sample_one(&mut self) -> Vec<f64> {
        uniform_point(&self.bounds, &mut self.rng)
    }
}

impl SearchStrategy for RandomSearch {
    fn suggest(&mut self, count: usize) -> Vec<Vec<f64>> {
        (0..count).map(|_| self.sample_one()).collect()
    }

    fn name(&self) -> &str {
        "random"
    }
}
