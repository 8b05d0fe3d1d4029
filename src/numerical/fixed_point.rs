//!  Example
//! ```
//!  use RustedNonlinSys::numerical::fixed_point::FixedPoint;
//!  use RustedNonlinSys::numerical::systems::fixed_point_defect;
//!    let mut FP_instance = FixedPoint::new();
//!    FP_instance.set_problem(&[1.0, 1.0], 1e-6, 1000).unwrap();
//!    let result = FP_instance.main_loop().unwrap();
//!    let (x, y) = *result.value().unwrap();
//!    assert!(fixed_point_defect(x, y) < 1e-6);
//!    println!("result = {:?}, iterations = {:?}", (x, y), result.iterations());
//!  ```
use crate::Utils::logger::{elapsed_time, init_logger, parse_loglevel, statistics_table};
use crate::numerical::errors::{SolverError, validate_guess, validate_tolerance};
use crate::numerical::iteration::{IterationResult, iterate_until_converged};
use crate::numerical::systems::{f1, f2, fixed_point_defect};
use log::{info, warn};
use std::time::Instant;

pub const DEFAULT_TOLERANCE: f64 = 1e-6;
pub const DEFAULT_MAX_ITERATIONS: usize = 1000;

pub type UpdateFn = Box<dyn Fn(f64, f64) -> f64>;

/// Fixed-point iteration x_{n+1} = f1(x_n, y_n), y_{n+1} = f2(x_n, y_n).
/// Both coordinates must move less than `tolerance` in the same pass to stop.
pub struct FixedPoint {
    pub f1: UpdateFn,
    pub f2: UpdateFn,
    pub initial_guess: (f64, f64), // initial guess
    pub tolerance: f64,            // tolerance on each coordinate
    pub max_iterations: usize,     // max number of iterations
    pub loglevel: Option<String>,
    pub result: Option<IterationResult<(f64, f64)>>, // result of the iteration
    calc_statistics: Vec<(String, String)>,
}

impl FixedPoint {
    pub fn new() -> FixedPoint {
        FixedPoint {
            f1: Box::new(f1),
            f2: Box::new(f2),
            initial_guess: (1.0, 1.0),
            tolerance: DEFAULT_TOLERANCE,
            max_iterations: DEFAULT_MAX_ITERATIONS,
            loglevel: Some("info".to_string()),
            result: None,
            calc_statistics: Vec::new(),
        }
    }
    ////////////////////////////SETTERS///////////////////////////////////////////////////////////////////
    pub fn set_update_functions(&mut self, f1: UpdateFn, f2: UpdateFn) {
        self.f1 = f1;
        self.f2 = f2;
    }

    pub fn set_problem(
        &mut self,
        initial_guess: &[f64],
        tolerance: f64,
        max_iterations: usize,
    ) -> Result<(), SolverError> {
        self.initial_guess = validate_guess(initial_guess)?;
        self.tolerance = validate_tolerance(tolerance)?;
        self.max_iterations = max_iterations;
        Ok(())
    }

    pub fn set_loglevel(&mut self, loglevel: Option<String>) -> Result<(), SolverError> {
        if let Some(level) = &loglevel {
            parse_loglevel(level)?;
        }
        self.loglevel = loglevel;
        Ok(())
    }
    /////////////////////////////////////////////////////////////////////////////////////////////
    //                ITERATIONS
    /////////////////////////////////////////////////////////////////////////////////////////////
    /// one pass: both new coordinates are computed from the old pair
    pub fn iteration(&self, x: f64, y: f64) -> Result<(f64, f64), SolverError> {
        let x_new = (self.f1)(x, y);
        let y_new = (self.f2)(x, y);
        if !x_new.is_finite() || !y_new.is_finite() {
            return Err(SolverError::NonFiniteEvaluation { x, y });
        }
        Ok((x_new, y_new))
    }

    pub fn main_loop(&mut self) -> Result<IterationResult<(f64, f64)>, SolverError> {
        self.result = None;
        let tolerance = self.tolerance;
        let mut i = 0;
        let result = iterate_until_converged(
            self.initial_guess,
            self.max_iterations,
            |&(x, y)| self.iteration(x, y),
            |&(x, y), &(x_new, y_new)| {
                i += 1;
                let (dx, dy) = ((x_new - x).abs(), (y_new - y).abs());
                info!("iteration = {}, |dx| = {:e}, |dy| = {:e}", i, dx, dy);
                dx < tolerance && dy < tolerance
            },
        )?;
        self.result = Some(result);
        Ok(result)
    }
    ////////////////////////////////////////////////////////////////////////////////////////////
    //          main functions to start the solver and caclulate statistics
    ////////////////////////////////////////////////////////////////////////////////////////////
    /// wrapper around main_loop: installs the logger, times the run and logs statistics
    pub fn solve(&mut self) -> Result<IterationResult<(f64, f64)>, SolverError> {
        let logging = init_logger(&self.loglevel)?;
        let begin = Instant::now();
        let result = self.main_loop()?;
        let (unit, time) = elapsed_time(begin.elapsed());
        self.calc_statistics = vec![(format!("time elapsed,{}", unit), format!("{}", time))];
        if logging {
            self.calc_statistics();
        }
        Ok(result)
    }

    pub fn get_result(&self) -> Option<IterationResult<(f64, f64)>> {
        self.result
    }

    fn calc_statistics(&mut self) {
        match self.result {
            Some(IterationResult::Converged {
                value: (x, y),
                iterations,
            }) => {
                self.calc_statistics
                    .push(("number of iterations".to_string(), iterations.to_string()));
                self.calc_statistics.push((
                    "fixed-point defect".to_string(),
                    format!("{:e}", fixed_point_defect(x, y)),
                ));
            }
            _ => {
                warn!("no converged solution, statistics are incomplete");
                self.calc_statistics.push((
                    "number of iterations".to_string(),
                    self.max_iterations.to_string(),
                ));
            }
        }
        info!(
            "\n \n CALC STATISTICS \n \n {}",
            statistics_table(&self.calc_statistics)
        );
    }
}

impl Default for FixedPoint {
    fn default() -> Self {
        Self::new()
    }
}

/// Solves the first system by fixed-point iteration.
pub fn fixed_point_iteration(
    x0: f64,
    y0: f64,
    eps: f64,
    max_iter: usize,
) -> Result<IterationResult<(f64, f64)>, SolverError> {
    let mut FP_instance = FixedPoint::new();
    FP_instance.set_problem(&[x0, y0], eps, max_iter)?;
    FP_instance.main_loop()
}

/// Fixed-point iteration for arbitrary update functions.
pub fn fixed_point_iteration_with<F1, F2>(
    f1: F1,
    f2: F2,
    x0: f64,
    y0: f64,
    eps: f64,
    max_iter: usize,
) -> Result<IterationResult<(f64, f64)>, SolverError>
where
    F1: Fn(f64, f64) -> f64 + 'static,
    F2: Fn(f64, f64) -> f64 + 'static,
{
    let mut FP_instance = FixedPoint::new();
    FP_instance.set_update_functions(Box::new(f1), Box::new(f2));
    FP_instance.set_problem(&[x0, y0], eps, max_iter)?;
    FP_instance.main_loop()
}

////////////////////////////////////////////////////////////////////////////////////////////
//                                     TESTS
////////////////////////////////////////////////////////////////////////////////////////////
#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_fixed_point_default_problem() {
        let result = fixed_point_iteration(1.0, 1.0, 1e-6, 1000).unwrap();
        let (x, y) = *result.value().unwrap();
        let iterations = result.iterations().unwrap();
        assert!(iterations > 0 && iterations <= 1000);
        assert!((x - f1(x, y)).abs() < 1e-6);
        assert!((y - f2(x, y)).abs() < 1e-6);
    }

    #[test]
    fn test_fixed_point_restart_converges_immediately() {
        let first = fixed_point_iteration(1.0, 1.0, 1e-6, 1000).unwrap();
        let (x, y) = *first.value().unwrap();
        let second = fixed_point_iteration(x, y, 1e-6, 1000).unwrap();
        assert_eq!(second.iterations(), Some(1));
    }

    #[test]
    fn test_fixed_point_reports_new_values() {
        // constant maps converge on the first pass, reporting the image, not the guess
        let result = fixed_point_iteration_with(|_, _| 2.0, |_, _| -3.0, 2.0, -3.0, 1e-6, 10).unwrap();
        assert_eq!(
            result,
            IterationResult::Converged {
                value: (2.0, -3.0),
                iterations: 1
            }
        );
    }

    #[test]
    fn test_fixed_point_coordinates_checked_independently() {
        // x is fixed at once, y creeps toward 0 by halving: only y decides the count
        // y: 1 -> 0.5 (0.5) -> 0.25 (0.25) -> 0.125 (0.125) -> 0.0625 (0.0625 < 0.1)
        let result =
            fixed_point_iteration_with(|_, _| 1.0, |_, y| y / 2.0, 1.0, 1.0, 0.1, 100).unwrap();
        assert_eq!(result.iterations(), Some(4));
        let (x, y) = *result.value().unwrap();
        assert_relative_eq!(x, 1.0);
        assert_relative_eq!(y, 0.0625);
    }

    #[test]
    fn test_fixed_point_not_enough_iterations() {
        let result = fixed_point_iteration(1.0, 1.0, 1e-6, 2).unwrap();
        assert_eq!(result, IterationResult::NotConverged);
        let result = fixed_point_iteration(1.0, 1.0, 1e-6, 0).unwrap();
        assert_eq!(result, IterationResult::NotConverged);
    }

    #[test]
    fn test_fixed_point_diverging_map_is_reported() {
        let result = fixed_point_iteration_with(|x, _| x * 1e200, |_, y| y, 1e200, 0.0, 1e-6, 10);
        assert!(matches!(result, Err(SolverError::NonFiniteEvaluation { .. })));
    }

    #[test]
    fn test_fixed_point_failed_run_clears_previous_result() {
        let mut FP_instance = FixedPoint::new();
        FP_instance.set_problem(&[1.0, 1.0], 1e-6, 1000).unwrap();
        let result = FP_instance.main_loop().unwrap();
        assert!(result.is_converged());
        assert_eq!(FP_instance.get_result(), Some(result));
        FP_instance.set_update_functions(Box::new(|x, _| x * 1e200), Box::new(|_, y| y));
        FP_instance.set_problem(&[1e200, 0.0], 1e-6, 10).unwrap();
        let err = FP_instance.main_loop().unwrap_err();
        assert!(matches!(err, SolverError::NonFiniteEvaluation { .. }));
        assert_eq!(FP_instance.get_result(), None);
    }

    #[test]
    fn test_fixed_point_invalid_input() {
        let mut FP_instance = FixedPoint::new();
        assert_eq!(
            FP_instance.set_problem(&[1.0], 1e-6, 10),
            Err(SolverError::InvalidInput { expected: 2, got: 1 })
        );
        assert!(FP_instance.set_problem(&[1.0, 1.0], 0.0, 10).is_err());
        assert!(FP_instance.set_loglevel(Some("chatty".to_string())).is_err());
    }

    #[test]
    fn test_fixed_point_solve_with_logging() {
        let mut FP_instance = FixedPoint::new();
        FP_instance.set_problem(&[1.0, 1.0], 1e-6, 1000).unwrap();
        FP_instance.set_loglevel(Some("info".to_string())).unwrap();
        let result = FP_instance.solve().unwrap();
        assert!(result.is_converged());
        assert_eq!(FP_instance.get_result(), Some(result));
    }
}
