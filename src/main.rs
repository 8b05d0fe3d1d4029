#![allow(non_snake_case)]
use RustedNonlinSys::numerical::NR2D::{self as newton, LinearSysMethod, NR2D};
use RustedNonlinSys::numerical::errors::SolverError;
use RustedNonlinSys::numerical::fixed_point::{self, FixedPoint};
use RustedNonlinSys::numerical::iteration::IterationResult;
use RustedNonlinSys::numerical::report::{Procedure, as_pair, format_solution, summary_table};

fn run_fixed_point(loglevel: &Option<String>) -> Result<IterationResult<(f64, f64)>, SolverError> {
    let mut FP_instance = FixedPoint::new();
    FP_instance.set_problem(&[1.0, 1.0], fixed_point::DEFAULT_TOLERANCE, fixed_point::DEFAULT_MAX_ITERATIONS)?;
    FP_instance.set_loglevel(loglevel.clone())?;
    FP_instance.solve()
}

fn run_newton(
    method: LinearSysMethod,
    loglevel: &Option<String>,
) -> Result<IterationResult<(f64, f64)>, SolverError> {
    let mut NR_instance = NR2D::new();
    NR_instance.set_problem(&[0.5, 0.5], newton::DEFAULT_TOLERANCE, newton::DEFAULT_MAX_ITERATIONS)?;
    NR_instance.set_solver_params(loglevel.clone(), Some(method))?;
    Ok(as_pair(NR_instance.solve()?))
}

fn main() {
    // optional first argument: debug, info, warn, error or off
    let loglevel = Some(std::env::args().nth(1).unwrap_or_else(|| "warn".to_string()));

    let runs = [
        (Procedure::FixedPoint, run_fixed_point(&loglevel)),
        (Procedure::NewtonSIMQ, run_newton(LinearSysMethod::SIMQ, &loglevel)),
        (Procedure::NewtonMINV, run_newton(LinearSysMethod::MINV, &loglevel)),
    ];

    let mut finished = Vec::new();
    for (procedure, run) in runs {
        match run {
            Ok(result) => {
                println!("{}", format_solution(procedure, &result));
                finished.push((procedure, result));
            }
            Err(e) => println!("{}: {}", procedure, e),
        }
    }
    println!("\n{}", summary_table(&finished));
}
