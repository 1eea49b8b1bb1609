//! Raw objective functions, before instance shifts and transforms.

use std::f64::consts::PI;

/// A pure scalar objective over `R^n`.
pub trait Objective: Send + Sync {
    fn value(&self, x: &[f64]) -> f64;
}

impl<F> Objective for F
where
    F: Fn(&[f64]) -> f64 + Send + Sync,
{
    fn value(&self, x: &[f64]) -> f64 {
        self(x)
    }
}

pub fn sphere(x: &[f64]) -> f64 {
    x.iter().map(|xi| xi * xi).sum()
}

/// Separable ellipsoid with condition number `1e6`.
pub fn ellipsoid(x: &[f64]) -> f64 {
    let n = x.len();
    if n < 2 {
        return sphere(x);
    }
    x.iter()
        .enumerate()
        .map(|(i, xi)| 10f64.powf(6.0 * i as f64 / (n - 1) as f64) * xi * xi)
        .sum()
}

pub fn rastrigin(x: &[f64]) -> f64 {
    let cosines: f64 = x.iter().map(|xi| (2.0 * PI * xi).cos()).sum();
    10.0 * (x.len() as f64 - cosines) + sphere(x)
}

/// Minimum `0` at `(1, ..., 1)`.
pub fn rosenbrock(x: &[f64]) -> f64 {
    x.windows(2)
        .map(|w| 100.0 * (w[0] * w[0] - w[1]).powi(2) + (w[0] - 1.0).powi(2))
        .sum()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn minima_are_zero() {
        let origin = vec![0.0; 5];
        assert_eq!(sphere(&origin), 0.0);
        assert_eq!(ellipsoid(&origin), 0.0);
        assert!(rastrigin(&origin).abs() < 1e-12);
        assert_eq!(rosenbrock(&vec![1.0; 5]), 0.0);
    }

    #[test]
    fn ellipsoid_is_ill_conditioned() {
        let first = ellipsoid(&[1.0, 0.0, 0.0]);
        let last = ellipsoid(&[0.0, 0.0, 1.0]);
        assert_eq!(first, 1.0);
        assert!((last - 1e6).abs() < 1e-6);
    }

    #[test]
    fn closures_are_objectives() {
        let shifted = |x: &[f64]| sphere(x) + 1.0;
        assert_eq!(shifted.value(&[0.0, 0.0]), 1.0);
    }
}
