//! the two nonlinear systems solved by this crate
//!
//! first system, written in fixed-point form x = f1(x, y), y = f2(x, y):
//!     x = 0.8 - cos(y + 0.5)
//!     y = (sin(x) - 1.5) / 2
//!
//! second system, written as F(x, y) = 0:
//!     sin(x + y) - 1.4x = 0
//!     x^2 + y^2 - 1     = 0
use nalgebra::{Matrix2, Vector2};

/// first update function of the first system
pub fn f1(_x: f64, y: f64) -> f64 {
    0.8 - (y + 0.5).cos()
}

/// second update function of the first system
pub fn f2(x: f64, _y: f64) -> f64 {
    (x.sin() - 1.5) / 2.0
}

/// largest coordinate-wise distance between (x, y) and its image (f1, f2)
pub fn fixed_point_defect(x: f64, y: f64) -> f64 {
    (f1(x, y) - x).abs().max((f2(x, y) - y).abs())
}

/// residual vector of the second system
pub fn equations(v: &Vector2<f64>) -> Vector2<f64> {
    let (x, y) = (v[0], v[1]);
    let eq1 = (x + y).sin() - 1.4 * x;
    let eq2 = x.powi(2) + y.powi(2) - 1.0;
    Vector2::new(eq1, eq2)
}

/// analytic Jacobian of the second system
pub fn jacobian(v: &Vector2<f64>) -> Matrix2<f64> {
    let (x, y) = (v[0], v[1]);
    let j11 = (x + y).cos() - 1.4;
    let j12 = (x + y).cos();
    let j21 = 2.0 * x;
    let j22 = 2.0 * y;
    Matrix2::new(j11, j12, j21, j22)
}

/// Euclidean norm of the residual of the second system
pub fn residual_norm(v: &Vector2<f64>) -> f64 {
    equations(v).norm()
}
