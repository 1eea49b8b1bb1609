//! Mixed-integer variant of the analytic suite.
//!
//! The first variable stays continuous on `[-5, 5]`. Every other variable is
//! an integer whose range depends on dimension and instance. The analytic
//! objective is evaluated after rounding the integers and mapping them back
//! onto `[-5, 5]`.

use bb_types::{BbResult, Bounds, ProblemError, ProblemInfo};

use crate::analytic::{
    instance_objective, AnalyticFunction, InstanceOptimum, ANALYTIC_LOWER, ANALYTIC_UPPER,
};
use crate::objective::Objective;
use crate::problem::BenchmarkProblem;
use crate::suite::SuiteBackend;
use crate::transforms::Discretized;

/// First benchmark year of the mixed-integer suite.
const FIRST_YEAR: usize = 2018;

/// Region of interest of one mixed-integer problem.
#[derive(Debug, Clone, PartialEq)]
pub struct MixedIntegerRegion {
    pub bounds: Bounds,
    pub integer: Vec<bool>,
}

impl MixedIntegerRegion {
    /// Variable `0` spans `[-5, 5]`. Variable `i > 0` spans
    /// `[0, round(max(2, 10^((dimension + instance + i) % 5)))]`.
    pub fn new(dimension: usize, instance: usize) -> Result<Self, ProblemError> {
        let integer: Vec<bool> = (0..dimension).map(|i| i > 0).collect();
        let lower = integer
            .iter()
            .map(|&integer| if integer { 0.0 } else { ANALYTIC_LOWER })
            .collect();
        let upper = (0..dimension)
            .map(|i| {
                if i == 0 {
                    return ANALYTIC_UPPER;
                }
                let exponent = ((dimension + instance + i) % 5) as i32;
                10f64.powi(exponent).max(2.0).round()
            })
            .collect();
        Ok(Self {
            bounds: Bounds::new(lower, upper)?,
            integer,
        })
    }

    /// Moves each integer coordinate of `x_opt`, given in the analytic frame,
    /// onto the nearest point an integer input can reach.
    fn snap(&self, x_opt: &mut [f64]) {
        let width = ANALYTIC_UPPER - ANALYTIC_LOWER;
        for ((x, &integer), upper) in x_opt.iter_mut().zip(&self.integer).zip(self.bounds.upper()) {
            if integer {
                let step = width / upper;
                *x = ANALYTIC_LOWER + ((*x - ANALYTIC_LOWER) / step).round() * step;
            }
        }
    }
}

/// Backend serving `bbob-mixint`: the analytic functions over a
/// mixed-integer region of interest.
#[derive(Debug, Clone, Default)]
pub struct MixintBackend;

impl MixintBackend {
    pub fn new() -> Self {
        Self
    }
}

impl SuiteBackend for MixintBackend {
    fn name(&self) -> &str {
        "bbob-mixint"
    }

    fn functions(&self) -> Vec<usize> {
        AnalyticFunction::ALL.iter().map(|f| f.index()).collect()
    }

    fn default_dimensions(&self) -> Vec<usize> {
        vec![2, 3, 5, 10, 20, 40]
    }

    fn default_instances(&self) -> Vec<usize> {
        (1..=15).collect()
    }

    fn supports_dimension(&self, dimension: usize) -> bool {
        dimension >= 2
    }

    fn default_instance(&self) -> &str {
        "year: 2018"
    }

    fn year_instances(&self, year: usize) -> Option<Vec<usize>> {
        (year >= FIRST_YEAR).then(|| self.default_instances())
    }

    fn build(&self, info: ProblemInfo) -> BbResult<BenchmarkProblem> {
        let function = AnalyticFunction::from_index(info.function).ok_or_else(|| {
            ProblemError::UnknownFunction {
                suite: info.suite.clone(),
                function: info.function,
            }
        })?;
        if !self.supports_dimension(info.dimension) {
            return Err(ProblemError::UnsupportedDimension {
                suite: info.suite.clone(),
                dimension: info.dimension,
            }
            .into());
        }

        let region = MixedIntegerRegion::new(info.dimension, info.instance)?;
        let frame = Bounds::uniform(info.dimension, ANALYTIC_LOWER, ANALYTIC_UPPER)?;
        let InstanceOptimum { mut x_opt, f_opt } =
            InstanceOptimum::generate(info.function, info.instance, info.dimension);
        region.snap(&mut x_opt);

        let inner = instance_objective(function, x_opt, f_opt, &frame);
        let objective = Discretized::new(
            move |z: &[f64]| inner.value(z),
            &region.bounds,
            &frame,
            &region.integer,
        );

        let initial_solution = region
            .bounds
            .center()
            .into_iter()
            .zip(&region.integer)
            .map(|(x, &integer)| if integer { x.round() } else { x })
            .collect();
        Ok(BenchmarkProblem::new(
            info,
            region.bounds,
            Box::new(objective),
            initial_solution,
        )?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bb_types::Problem;

    fn build(function: usize, instance: usize, dimension: usize) -> BenchmarkProblem {
        MixintBackend::new()
            .build(ProblemInfo::new("bbob-mixint", function, instance, dimension))
            .unwrap()
    }

    #[test]
    fn region_of_interest_depends_on_dimension_and_instance() {
        let problem = build(1, 1, 5);
        assert_eq!(problem.info().id, "bbob-mixint_f001_i01_d05");
        assert_eq!(problem.lower_bounds(), &[-5.0, 0.0, 0.0, 0.0, 0.0]);
        // (5 + 1 + i) % 5 for i = 1..4 gives exponents 2, 3, 4, 0
        assert_eq!(problem.upper_bounds(), &[5.0, 100.0, 1000.0, 10_000.0, 2.0]);

        let region = MixedIntegerRegion::new(5, 1).unwrap();
        assert_eq!(region.integer, vec![false, true, true, true, true]);

        // Exponent 1 gives 10
        let region = MixedIntegerRegion::new(2, 3).unwrap();
        assert_eq!(region.bounds.upper(), &[5.0, 10.0]);
    }

    #[test]
    fn fractional_integers_evaluate_as_rounded() {
        for function in AnalyticFunction::ALL {
            let mut problem = build(function.index(), 1, 5);
            let fractional = problem.evaluate(&[0.3, 41.4, 512.6, 7.2, 0.8]).unwrap();
            let rounded = problem.evaluate(&[0.3, 41.0, 513.0, 7.0, 1.0]).unwrap();
            assert_eq!(fractional, rounded, "{}", function.name());

            // The continuous variable is not rounded
            let moved = problem.evaluate(&[0.7, 41.0, 513.0, 7.0, 1.0]).unwrap();
            assert_ne!(moved, rounded, "{}", function.name());
        }
    }

    #[test]
    fn optimum_is_reachable_on_the_integer_grid() {
        let (function, instance, dimension) = (1, 2, 3);
        let region = MixedIntegerRegion::new(dimension, instance).unwrap();
        let InstanceOptimum { x_opt, f_opt } =
            InstanceOptimum::generate(function, instance, dimension);

        let mut target = vec![x_opt[0]];
        for (i, x) in x_opt.iter().enumerate().skip(1) {
            let step = 10.0 / region.bounds.upper()[i];
            target.push(((x + 5.0) / step).round());
        }

        let mut problem = build(function, instance, dimension);
        let value = problem.evaluate(&target).unwrap();
        assert!((value - f_opt).abs() < 1e-9, "{value} vs {f_opt}");
    }

    #[test]
    fn initial_solution_is_integral_inside_the_box() {
        let problem = build(3, 4, 10);
        let x0 = problem.initial_solution();
        assert!(problem.bounds().contains(&x0));
        assert_eq!(x0[0], 0.0);
        assert!(x0[1..].iter().all(|x| x.fract() == 0.0));
    }

    #[test]
    fn year_2018_selects_the_default_instances() {
        let backend = MixintBackend::new();
        assert_eq!(backend.default_instance(), "year: 2018");
        assert_eq!(backend.year_instances(2018), Some((1..=15).collect()));
        assert_eq!(backend.year_instances(2009), None);
    }
}
