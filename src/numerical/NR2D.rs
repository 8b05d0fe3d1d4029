//!  Example#1
//! ```
//!  use RustedNonlinSys::numerical::NR2D::{NR2D, LinearSysMethod};
//!  use RustedNonlinSys::numerical::systems::residual_norm;
//!    // the second system with the default initial guess (0.5, 0.5)
//!    let mut NR_instance = NR2D::new();
//!    NR_instance.set_problem(&[0.5, 0.5], 1e-12, 100).unwrap();
//!    NR_instance.set_solver_params(None, Some(LinearSysMethod::SIMQ)).unwrap();
//!    let result = NR_instance.main_loop().unwrap();
//!    let solution = result.value().unwrap();
//!    assert!(residual_norm(solution) < 1e-10);
//!    println!("result = {:?} \n", solution);
//!  ```
//! Example#2
//! ```
//!    // any 2x2 system with an analytic Jacobian: x^2 + y^2 - 10 = 0, x - y - 4 = 0
//!  use RustedNonlinSys::numerical::NR2D::{newton_solve, LinearSysMethod};
//!  use nalgebra::{Matrix2, Vector2};
//!    let equations = |v: &Vector2<f64>| Vector2::new(v[0] * v[0] + v[1] * v[1] - 10.0, v[0] - v[1] - 4.0);
//!    let jacobian = |v: &Vector2<f64>| Matrix2::new(2.0 * v[0], 2.0 * v[1], 1.0, -1.0);
//!    let result = newton_solve(equations, jacobian, &[4.0, 0.0], 1e-12, 100, LinearSysMethod::MINV).unwrap();
//!    let solution = result.value().unwrap();
//!    assert!((solution[0] - 3.0).abs() < 1e-10 && (solution[1] + 1.0).abs() < 1e-10);
//!  ```
use crate::Utils::logger::{elapsed_time, init_logger, parse_loglevel, statistics_table};
use crate::numerical::errors::{SolverError, validate_guess, validate_tolerance};
use crate::numerical::iteration::{IterationResult, iterate_until_converged};
use crate::numerical::systems::{equations, jacobian, residual_norm};
use crate::somelinalg::linear_sys_diagnostics::{
    SINGULARITY_EPS, condition_number, is_singular, poorly_conditioned,
};
use log::{info, warn};
use nalgebra::{Matrix2, Vector2};
use std::time::Instant;
use strum_macros::{Display, EnumIter};

/// tolerance used by the reference runs of the second system
pub const DEFAULT_TOLERANCE: f64 = 1e-15;
pub const DEFAULT_MAX_ITERATIONS: usize = 100;
const CONDITION_NUMBER_THRESHOLD: f64 = 1e10;

pub type EquationsFn = Box<dyn Fn(&Vector2<f64>) -> Vector2<f64>>;
pub type JacobianFn = Box<dyn Fn(&Vector2<f64>) -> Matrix2<f64>>;

/// How the Newton step dx is obtained from J·dx = -F
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, EnumIter)]
pub enum LinearSysMethod {
    /// solve the linear system directly (LU with partial pivoting)
    SIMQ,
    /// invert the Jacobian explicitly, dx = -J⁻¹·F
    MINV,
}

/// Newton iterate: current point and the step that produced it
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NewtonState {
    pub point: Vector2<f64>,
    pub step: Vector2<f64>,
}

pub struct NR2D {
    pub equations: EquationsFn, // vector of functions
    pub jacobian: JacobianFn,   // jacobian matrix function
    pub initial_guess: Vector2<f64>,
    pub tolerance: f64,        // tolerance on the Euclidean norm of the step
    pub max_iterations: usize, // max number of iterations
    pub linear_sys_method: LinearSysMethod,
    pub loglevel: Option<String>,
    pub jac: Option<Matrix2<f64>>, // last evaluated jacobian
    pub result: Option<IterationResult<Vector2<f64>>>,
    max_error: f64,
    calc_statistics: Vec<(String, String)>,
}

impl NR2D {
    pub fn new() -> NR2D {
        NR2D {
            equations: Box::new(equations),
            jacobian: Box::new(jacobian),
            initial_guess: Vector2::new(0.5, 0.5),
            tolerance: DEFAULT_TOLERANCE,
            max_iterations: DEFAULT_MAX_ITERATIONS,
            linear_sys_method: LinearSysMethod::SIMQ,
            loglevel: Some("info".to_string()),
            jac: None,
            result: None,
            max_error: 0.0,
            calc_statistics: Vec::new(),
        }
    }
    ////////////////////////////SETTERS///////////////////////////////////////////////////////////////////
    pub fn set_equation_system(&mut self, equations: EquationsFn, jacobian: JacobianFn) {
        self.equations = equations;
        self.jacobian = jacobian;
    }

    pub fn set_problem(
        &mut self,
        initial_guess: &[f64],
        tolerance: f64,
        max_iterations: usize,
    ) -> Result<(), SolverError> {
        let (x0, y0) = validate_guess(initial_guess)?;
        self.initial_guess = Vector2::new(x0, y0);
        self.tolerance = validate_tolerance(tolerance)?;
        self.max_iterations = max_iterations;
        Ok(())
    }

    pub fn set_solver_params(
        &mut self,
        loglevel: Option<String>,
        linear_sys_method: Option<LinearSysMethod>,
    ) -> Result<(), SolverError> {
        if let Some(level) = loglevel {
            parse_loglevel(&level)?;
            self.loglevel = Some(level);
        }
        if let Some(method) = linear_sys_method {
            self.linear_sys_method = method;
        }
        Ok(())
    }
    /////////////////////////////////////////////////////////////////////////////////////////////
    //                ITERATIONS
    /////////////////////////////////////////////////////////////////////////////////////////////
    /// realize iteration of Newton-Raphson - calculate new iteration vector by using Jacobian matrix
    pub fn iteration(&self, x: &Vector2<f64>) -> Result<(NewtonState, Matrix2<f64>), SolverError> {
        let f = (self.equations)(x);
        let J = (self.jacobian)(x);
        if f.iter().chain(J.iter()).any(|v| !v.is_finite()) {
            return Err(SolverError::NonFiniteEvaluation { x: x[0], y: x[1] });
        }
        let dx = Self::solve_linear_system(self.linear_sys_method, &J, &f).ok_or(
            SolverError::SingularJacobian {
                x: x[0],
                y: x[1],
                det: J.determinant(),
            },
        )?;
        let state = NewtonState {
            point: x + dx,
            step: dx,
        };
        Ok((state, J))
    }

    /// main function to solve the system of equations
    pub fn main_loop(&mut self) -> Result<IterationResult<Vector2<f64>>, SolverError> {
        // a failed run must not leave the previous run's solution behind
        self.result = None;
        self.jac = None;
        let tolerance = self.tolerance;
        let mut last_jac = None;
        let mut max_error = 0.0;
        let mut i = 0;
        let initial = NewtonState {
            point: self.initial_guess,
            step: Vector2::zeros(),
        };
        let result = iterate_until_converged(
            initial,
            self.max_iterations,
            |state| {
                let (new_state, J) = self.iteration(&state.point)?;
                last_jac = Some(J);
                Ok(new_state)
            },
            |_, new_state| {
                let error = new_state.step.norm();
                if (error > max_error) && (i > 0) {
                    warn!("Error is increasing");
                }
                max_error = error;
                i += 1;
                info!("iteration = {}, error = {:e}", i, error);
                error < tolerance
            },
        );
        self.jac = last_jac;
        self.max_error = max_error;
        let result = result?.map(|state| state.point);
        self.result = Some(result);
        Ok(result)
    }
    ////////////////////////////////////////////////////////////////////////////////////////////
    //          main functions to start the solver and caclulate statistics
    ////////////////////////////////////////////////////////////////////////////////////////////
    // wrapper around main_loop to implement logging
    pub fn solve(&mut self) -> Result<IterationResult<Vector2<f64>>, SolverError> {
        let logging = init_logger(&self.loglevel)?;
        info!("Newton method using {}", self.linear_sys_method);
        let begin = Instant::now();
        let result = self.main_loop()?;
        let (unit, time) = elapsed_time(begin.elapsed());
        self.calc_statistics = vec![(format!("time elapsed,{}", unit), format!("{}", time))];
        if logging {
            self.calc_statistics();
        }
        Ok(result)
    }

    pub fn get_result(&self) -> Option<IterationResult<Vector2<f64>>> {
        self.result
    }

    fn calc_statistics(&mut self) {
        let iterations = match self.result {
            Some(IterationResult::Converged { iterations, .. }) => iterations,
            _ => self.max_iterations,
        };
        let mut stats = vec![
            ("linear system method".to_string(), self.linear_sys_method.to_string()),
            ("number of iterations".to_string(), iterations.to_string()),
            ("last step norm".to_string(), format!("{:e}", self.max_error)),
        ];
        if let Some(J) = &self.jac {
            poorly_conditioned(J, CONDITION_NUMBER_THRESHOLD);
            stats.push((
                "jacobian condition number".to_string(),
                format!("{:.4}", condition_number(J)),
            ));
        }
        if let Some(solution) = self.result.as_ref().and_then(|r| r.value()) {
            stats.push((
                "residual norm".to_string(),
                format!("{:e}", (self.equations)(solution).norm()),
            ));
        }
        self.calc_statistics.extend(stats);
        info!(
            "\n \n CALC STATISTICS \n \n {}",
            statistics_table(&self.calc_statistics)
        );
    }
    //////////////////////////////////////////////////////////////////////////////////////////////
    //                 LINEAR SYSTEM SOLVERS
    //////////////////////////////////////////////////////////////////////////////////////////////
    /// Newton step for J·dx = -f, or `None` when J is singular or the step is not finite
    pub fn solve_linear_system(
        method: LinearSysMethod,
        J: &Matrix2<f64>,
        f: &Vector2<f64>,
    ) -> Option<Vector2<f64>> {
        if is_singular(J, SINGULARITY_EPS) {
            return None;
        }
        let dx = match method {
            LinearSysMethod::SIMQ => J.lu().solve(&(-f))?,
            LinearSysMethod::MINV => {
                let J_inv = J.try_inverse()?;
                -(J_inv * f)
            }
        };
        dx.iter().all(|v| v.is_finite()).then_some(dx)
    }
}

impl Default for NR2D {
    fn default() -> Self {
        Self::new()
    }
}

/// Newton-Raphson for an arbitrary 2x2 system with an analytic Jacobian.
pub fn newton_solve<F, J>(
    equations: F,
    jacobian: J,
    initial_guess: &[f64],
    eps: f64,
    max_iter: usize,
    method: LinearSysMethod,
) -> Result<IterationResult<Vector2<f64>>, SolverError>
where
    F: Fn(&Vector2<f64>) -> Vector2<f64> + 'static,
    J: Fn(&Vector2<f64>) -> Matrix2<f64> + 'static,
{
    let mut NR_instance = NR2D::new();
    NR_instance.set_equation_system(Box::new(equations), Box::new(jacobian));
    NR_instance.set_problem(initial_guess, eps, max_iter)?;
    NR_instance.set_solver_params(None, Some(method))?;
    NR_instance.main_loop()
}

/// Second system by Newton's method, solving J·dx = -F directly.
pub fn newton_simq(
    initial_guess: &[f64],
    eps: f64,
    max_iter: usize,
) -> Result<IterationResult<Vector2<f64>>, SolverError> {
    newton_solve(equations, jacobian, initial_guess, eps, max_iter, LinearSysMethod::SIMQ)
}

/// Second system by Newton's method, inverting J explicitly.
pub fn newton_minv(
    initial_guess: &[f64],
    eps: f64,
    max_iter: usize,
) -> Result<IterationResult<Vector2<f64>>, SolverError> {
    newton_solve(equations, jacobian, initial_guess, eps, max_iter, LinearSysMethod::MINV)
}

/// residual of the second system at a Newton result, if it converged
pub fn solution_residual(result: &IterationResult<Vector2<f64>>) -> Option<f64> {
    result.value().map(residual_norm)
}
