//! Objective wrappers applied on top of raw functions.
//!
//! Each wrapper owns its inner objective, so transforms compose by nesting:
//! `Offset::new(Penalized::new(Shifted::new(rastrigin, x_opt), bounds, 100.0), f_opt)`.

use bb_types::Bounds;

use crate::objective::Objective;

/// Evaluates the inner objective at `x - shift`.
pub struct Shifted<O> {
    inner: O,
    shift: Vec<f64>,
}

impl<O: Objective> Shifted<O> {
    pub fn new(inner: O, shift: Vec<f64>) -> Self {
        Self { inner, shift }
    }
}

impl<O: Objective> Objective for Shifted<O> {
    fn value(&self, x: &[f64]) -> f64 {
        let z: Vec<f64> = x.iter().zip(&self.shift).map(|(xi, s)| xi - s).collect();
        self.inner.value(&z)
    }
}

/// Monotone oscillation of every variable (BBOB `T_osz`).
pub struct Oscillated<O> {
    inner: O,
}

impl<O: Objective> Oscillated<O> {
    pub fn new(inner: O) -> Self {
        Self { inner }
    }
}

impl<O: Objective> Objective for Oscillated<O> {
    fn value(&self, x: &[f64]) -> f64 {
        let z: Vec<f64> = x.iter().copied().map(oscillate).collect();
        self.inner.value(&z)
    }
}

/// `T_osz` for a single component. Keeps the sign and maps `0` to `0`.
pub fn oscillate(x: f64) -> f64 {
    if x == 0.0 {
        return 0.0;
    }
    let h = x.abs().ln();
    let (c1, c2) = if x > 0.0 { (10.0, 7.9) } else { (5.5, 3.1) };
    x.signum() * (h + 0.049 * ((c1 * h).sin() + (c2 * h).sin())).exp()
}

/// Adds `factor` times the squared distance to `bounds` to the inner value.
pub struct Penalized<O> {
    inner: O,
    bounds: Bounds,
    factor: f64,
}

impl<O: Objective> Penalized<O> {
    pub fn new(inner: O, bounds: Bounds, factor: f64) -> Self {
        Self {
            inner,
            bounds,
            factor,
        }
    }
}

impl<O: Objective> Objective for Penalized<O> {
    fn value(&self, x: &[f64]) -> f64 {
        self.inner.value(x) + self.factor * self.bounds.squared_violation(x)
    }
}

/// Adds a constant to the inner value.
pub struct Offset<O> {
    inner: O,
    offset: f64,
}

impl<O: Objective> Offset<O> {
    pub fn new(inner: O, offset: f64) -> Self {
        Self { inner, offset }
    }
}

impl<O: Objective> Objective for Offset<O> {
    fn value(&self, x: &[f64]) -> f64 {
        self.inner.value(x) + self.offset
    }
}

/// Mixed-integer view of an objective defined on a continuous frame.
///
/// Integer variables are rounded to the nearest integer, then every variable
/// is mapped affinely from its `outer` interval onto the matching `frame`
/// interval, where the inner objective is evaluated.
pub struct Discretized<O> {
    inner: O,
    axes: Vec<Axis>,
}

struct Axis {
    integer: bool,
    scale: f64,
    offset: f64,
}

impl<O: Objective> Discretized<O> {
    pub fn new(inner: O, outer: &Bounds, frame: &Bounds, integer: &[bool]) -> Self {
        let axes = outer
            .lower()
            .iter()
            .zip(outer.upper())
            .zip(frame.lower().iter().zip(frame.upper()))
            .zip(integer)
            .map(|(((l, u), (a, b)), &integer)| {
                let scale = (b - a) / (u - l);
                Axis {
                    integer,
                    scale,
                    offset: a - l * scale,
                }
            })
            .collect();
        Self { inner, axes }
    }
}

impl<O: Objective> Objective for Discretized<O> {
    fn value(&self, x: &[f64]) -> f64 {
        let z: Vec<f64> = x
            .iter()
            .zip(&self.axes)
            .map(|(xi, axis)| {
                let xi = if axis.integer { xi.round() } else { *xi };
                axis.offset + axis.scale * xi
            })
            .collect();
        self.inner.value(&z)
    }
}
