//! Latin Hypercube designs in the unit cube.

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::Rng;

use crate::search::make_rng;

/// Produces space-filling designs of `samples` points in `[0, 1)^dimension`.
pub trait HypercubeSampler {
    fn lhs(&mut self, dimension: usize, samples: usize) -> Vec<Vec<f64>>;
}

/// Classic Latin Hypercube: every axis is cut into `samples` equal strata,
/// each stratum receives exactly one uniformly placed coordinate, and the
/// strata are matched across axes by independent random permutations.
#[derive(Debug, Clone)]
pub struct ClassicLhs {
    rng: StdRng,
}

impl ClassicLhs {
    pub fn new(seed: Option<u64>) -> Self {
        Self { rng: make_rng(seed) }
    }
}

impl HypercubeSampler for ClassicLhs {
    fn lhs(&mut self, dimension: usize, samples: usize) -> Vec<Vec<f64>> {
        let mut design = vec![vec![0.0; dimension]; samples];
        if samples == 0 {
            return design;
        }

        let width = 1.0 / samples as f64;
        let mut column: Vec<f64> = Vec::with_capacity(samples);
        for axis in 0..dimension {
            column.clear();
            column.extend((0..samples).map(|stratum| {
                let offset: f64 = self.rng.random();
                ((stratum as f64 + offset) * width).min(1.0 - f64::EPSILON)
            }));
            column.shuffle(&mut self.rng);
            for (row, value) in design.iter_mut().zip(&column) {
                row[axis] = *value;
            }
        }
        design
    }
}

/// A precomputed design consumed front to back, like a grid cursor.
#[derive(Debug, Clone, PartialEq)]
pub struct Design {
    points: Vec<Vec<f64>>,
    cursor: usize,
}

impl Design {
    pub fn new(points: Vec<Vec<f64>>) -> Self {
        Self { points, cursor: 0 }
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Points not handed out yet.
    pub fn remaining(&self) -> usize {
        self.points.len() - self.cursor
    }

    /// The next `count` points (fewer at the end of the design).
    pub fn next_chunk(&mut self, count: usize) -> &[Vec<f64>] {
        let start = self.cursor;
        let end = (start + count).min(self.points.len());
        self.cursor = end;
        &self.points[start..end]
    }
}
