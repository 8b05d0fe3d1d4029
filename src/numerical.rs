//! iterative solvers for small nonlinear systems
/// error type shared by all solvers
pub mod errors;
/// generic iterate-until-converged loop and its tagged result
pub mod iteration;
/// the two fixed systems: update functions, equations and analytic Jacobian
pub mod systems;
///  Example
/// ```
///  use RustedNonlinSys::numerical::fixed_point::fixed_point_iteration;
///    let result = fixed_point_iteration(1.0, 1.0, 1e-6, 1000).unwrap();
///    println!("result = {:?} \n", result);
/// ```
pub mod fixed_point;
///  Example
/// ```
///  use RustedNonlinSys::numerical::NR2D::{newton_simq, newton_minv};
///    let simq = newton_simq(&[0.5, 0.5], 1e-15, 100).unwrap();
///    let minv = newton_minv(&[0.5, 0.5], 1e-15, 100).unwrap();
///    println!("SIMQ = {:?}, MINV = {:?} \n", simq, minv);
/// ```
pub mod NR2D;
/// formatting of solver results
pub mod report;
