//! Generic "iterate until converged" loop shared by all solvers.
//!
//! Every solver in this crate has the same skeleton:
//! evaluate -> compute new iterate -> check stopping criterion -> stop or continue.
//! The step function produces a *new* iterate from the current one, the stopping
//! predicate compares the previous and the new iterate.
use crate::numerical::errors::SolverError;
use log::error;

/// Outcome of one solver invocation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum IterationResult<S> {
    /// converged iterate and the number of passes, the converging pass included
    Converged { value: S, iterations: usize },
    /// iteration cap reached without meeting the stopping criterion
    NotConverged,
}

impl<S> IterationResult<S> {
    pub fn is_converged(&self) -> bool {
        matches!(self, IterationResult::Converged { .. })
    }

    pub fn value(&self) -> Option<&S> {
        match self {
            IterationResult::Converged { value, .. } => Some(value),
            IterationResult::NotConverged => None,
        }
    }

    pub fn iterations(&self) -> Option<usize> {
        match self {
            IterationResult::Converged { iterations, .. } => Some(*iterations),
            IterationResult::NotConverged => None,
        }
    }

    pub fn map<T, F: FnOnce(S) -> T>(self, f: F) -> IterationResult<T> {
        match self {
            IterationResult::Converged { value, iterations } => IterationResult::Converged {
                value: f(value),
                iterations,
            },
            IterationResult::NotConverged => IterationResult::NotConverged,
        }
    }
}

/// Runs at most `max_iterations` passes of `step`, stopping as soon as
/// `converged(previous, new)` holds.
///
/// - `step` errors abort the loop and are propagated as is.
/// - `max_iterations == 0` performs no evaluation and returns `NotConverged`.
pub fn iterate_until_converged<S, Step, Stop>(
    initial: S,
    max_iterations: usize,
    mut step: Step,
    mut converged: Stop,
) -> Result<IterationResult<S>, SolverError>
where
    Step: FnMut(&S) -> Result<S, SolverError>,
    Stop: FnMut(&S, &S) -> bool,
{
    let mut current = initial;
    for i in 1..=max_iterations {
        let candidate = step(&current)?;
        if converged(&current, &candidate) {
            return Ok(IterationResult::Converged {
                value: candidate,
                iterations: i,
            });
        }
        current = candidate;
    }
    error!("Maximum number of iterations reached. No solution found.");
    Ok(IterationResult::NotConverged)
}
