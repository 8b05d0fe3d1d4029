//! Error type shared by the fixed-point and Newton-Raphson solvers.
//!
//! ┌ [`SolverError::SingularJacobian`]    : linear step undefined at the current iterate
//! ├ [`SolverError::NonFiniteEvaluation`] : equations or update functions returned NaN/Inf
//! ├ [`SolverError::InvalidInput`]        : initial guess is not a 2-vector
//! ├ [`SolverError::InvalidTolerance`]    : tolerance must be finite and > 0
//! └ [`SolverError::InvalidLogLevel`]     : unknown log level string
//!
//! Running out of iterations is *not* an error: it is reported as
//! [`crate::numerical::iteration::IterationResult::NotConverged`].
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum SolverError {
    #[error("singular Jacobian at x={x}, y={y}: determinant = {det:e}")]
    SingularJacobian { x: f64, y: f64, det: f64 },

    #[error("non-finite evaluation at x={x}, y={y}")]
    NonFiniteEvaluation { x: f64, y: f64 },

    #[error("invalid initial guess: expected {expected} components, got {got}")]
    InvalidInput { expected: usize, got: usize },

    #[error("invalid tolerance: must be finite and > 0. got {got}")]
    InvalidTolerance { got: f64 },

    #[error("invalid loglevel `{got}`: must be debug, info, warn, error, off or none")]
    InvalidLogLevel { got: String },
}

/// Checks a tolerance the way all solver setters do.
pub(crate) fn validate_tolerance(tolerance: f64) -> Result<f64, SolverError> {
    if !tolerance.is_finite() || tolerance <= 0.0 {
        return Err(SolverError::InvalidTolerance { got: tolerance });
    }
    Ok(tolerance)
}

/// Turns a caller-supplied slice into an `(x, y)` pair.
pub(crate) fn validate_guess(initial_guess: &[f64]) -> Result<(f64, f64), SolverError> {
    match initial_guess {
        [x, y] => Ok((*x, *y)),
        _ => Err(SolverError::InvalidInput {
            expected: 2,
            got: initial_guess.len(),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_guess() {
        assert_eq!(validate_guess(&[1.0, 2.0]), Ok((1.0, 2.0)));
        assert_eq!(
            validate_guess(&[1.0, 2.0, 3.0]),
            Err(SolverError::InvalidInput { expected: 2, got: 3 })
        );
        assert_eq!(
            validate_guess(&[]),
            Err(SolverError::InvalidInput { expected: 2, got: 0 })
        );
    }

    #[test]
    fn test_validate_tolerance() {
        assert_eq!(validate_tolerance(1e-6), Ok(1e-6));
        assert!(validate_tolerance(0.0).is_err());
        assert!(validate_tolerance(-1e-3).is_err());
        assert!(validate_tolerance(f64::NAN).is_err());
        assert!(validate_tolerance(f64::INFINITY).is_err());
    }

    #[test]
    fn test_error_messages() {
        let err = SolverError::InvalidInput { expected: 2, got: 3 };
        assert_eq!(
            err.to_string(),
            "invalid initial guess: expected 2 components, got 3"
        );
        let err = SolverError::InvalidLogLevel {
            got: "loud".to_string(),
        };
        assert!(err.to_string().contains("loud"));
    }
}
