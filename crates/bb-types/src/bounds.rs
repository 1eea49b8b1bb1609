//! Box constraints of a problem's region of interest.

use serde::{Deserialize, Serialize};

use crate::errors::ProblemError;

/// Componentwise `[lower, upper]` box.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Bounds {
    lower: Vec<f64>,
    upper: Vec<f64>,
}

impl Bounds {
    /// Creates a box, validating that both sides have the same non-zero
    /// length and that every `lower[i] < upper[i]`.
    pub fn new(lower: Vec<f64>, upper: Vec<f64>) -> Result<Self, ProblemError> {
        if lower.is_empty() {
            return Err(ProblemError::InvalidBounds {
                message: "bounds must have at least one dimension".to_string(),
            });
        }
        if lower.len() != upper.len() {
            return Err(ProblemError::InvalidBounds {
                message: format!(
                    "lower has {} entries but upper has {}",
                    lower.len(),
                    upper.len()
                ),
            });
        }
        for (i, (l, u)) in lower.iter().zip(&upper).enumerate() {
            if !(l.is_finite() && u.is_finite() && l < u) {
                return Err(ProblemError::InvalidBounds {
                    message: format!("component {i}: [{l}, {u}] is not a finite non-empty interval"),
                });
            }
        }
        Ok(Self { lower, upper })
    }

    /// The same `[low, high]` interval in every one of `dimension` components.
    pub fn uniform(dimension: usize, low: f64, high: f64) -> Result<Self, ProblemError> {
        Self::new(vec![low; dimension], vec![high; dimension])
    }

    pub fn dimension(&self) -> usize {
        self.lower.len()
    }

    pub fn lower(&self) -> &[f64] {
        &self.lower
    }

    pub fn upper(&self) -> &[f64] {
        &self.upper
    }

    /// Midpoint of the box.
    pub fn center(&self) -> Vec<f64> {
        self.lower
            .iter()
            .zip(&self.upper)
            .map(|(l, u)| 0.5 * (l + u))
            .collect()
    }

    /// Whether `x` lies inside the closed box.
    pub fn contains(&self, x: &[f64]) -> bool {
        x.len() == self.dimension()
            && x
                .iter()
                .zip(self.lower.iter().zip(&self.upper))
                .all(|(xi, (l, u))| *xi >= *l && *xi <= *u)
    }

    /// Projects `x` onto the box.
    pub fn clamp(&self, x: &[f64]) -> Vec<f64> {
        x.iter()
            .zip(self.lower.iter().zip(&self.upper))
            .map(|(xi, (l, u))| xi.clamp(*l, *u))
            .collect()
    }

    /// Maps a point of the unit cube into the box: `lower + (upper - lower) * u`.
    pub fn scale_unit(&self, unit: &[f64]) -> Vec<f64> {
        unit.iter()
            .zip(self.lower.iter().zip(&self.upper))
            .map(|(t, (l, u))| l + (u - l) * t)
            .collect()
    }

    /// Sum of squared distances from `x` to the box. Zero inside.
    pub fn squared_violation(&self, x: &[f64]) -> f64 {
        x.iter()
            .zip(self.lower.iter().zip(&self.upper))
            .map(|(xi, (l, u))| {
                if xi > u {
                    (xi - u).powi(2)
                } else if xi < l {
                    (l - xi).powi(2)
                } else {
                    0.0
                }
            })
            .sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_mismatched_or_empty_bounds() {
        assert!(Bounds::new(vec![], vec![]).is_err());
        assert!(Bounds::new(vec![0.0, 0.0], vec![1.0]).is_err());
        assert!(Bounds::new(vec![1.0], vec![1.0]).is_err());
        assert!(Bounds::new(vec![0.0], vec![f64::INFINITY]).is_err());
    }

    #[test]
    fn scale_unit_maps_corners() {
        let bounds = Bounds::new(vec![-5.0, 0.0], vec![5.0, 2.0]).unwrap();
        assert_eq!(bounds.scale_unit(&[0.0, 0.0]), vec![-5.0, 0.0]);
        assert_eq!(bounds.scale_unit(&[1.0, 1.0]), vec![5.0, 2.0]);
        assert_eq!(bounds.scale_unit(&[0.5, 0.5]), bounds.center());
    }

    #[test]
    fn clamp_and_violation() {
        let bounds = Bounds::uniform(3, -1.0, 1.0).unwrap();
        let x = [2.0, -3.0, 0.5];
        assert_eq!(bounds.clamp(&x), vec![1.0, -1.0, 0.5]);
        assert!(!bounds.contains(&x));
        assert!(bounds.contains(&bounds.clamp(&x)));
        assert_eq!(bounds.squared_violation(&x), 1.0 + 4.0);
        assert_eq!(bounds.squared_violation(&[0.0, 0.0, 0.0]), 0.0);
    }
}
