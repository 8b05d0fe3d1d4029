use log::warn;
use nalgebra::Matrix2;

/// relative threshold below which a 2x2 Jacobian is treated as singular
pub const SINGULARITY_EPS: f64 = 1e-12;

/// A 2x2 matrix is treated as singular when its determinant vanishes relative to the
/// squared magnitude of its largest entry: |det(A)| <= epsilon * max|a_ij|^2.
/// Non-finite determinants and the zero matrix count as singular.
pub fn is_singular(A: &Matrix2<f64>, epsilon: f64) -> bool {
    let det = A.determinant();
    let scale = A.amax();
    let is_singular = !det.is_finite() || scale == 0.0 || det.abs() <= epsilon * scale * scale;
    if is_singular {
        warn!("Matrix is singular. Determinant = {:.8e}", det);
    }
    is_singular
}

/// ratio of the largest to the smallest singular value; infinite for singular matrices
pub fn condition_number(A: &Matrix2<f64>) -> f64 {
    let singular_values = A.singular_values();
    let max_sigma = singular_values.max();
    let min_sigma = singular_values.min();
    if min_sigma == 0.0 {
        return f64::INFINITY;
    }
    max_sigma / min_sigma
}

pub fn poorly_conditioned(A: &Matrix2<f64>, threshold: f64) -> bool {
    let condition_number = condition_number(A);
    let poorly_conditioned = condition_number > threshold;
    if poorly_conditioned {
        warn!(
            "The system of linear equations is poorly conditioned. Condition number = {:.2}",
            condition_number
        );
    }
    poorly_conditioned
}
