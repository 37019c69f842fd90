//! Math utilities and types
//!
//! Double precision throughout: the algebra compares against a tolerance
//! of `1e-11`, which is below `f32` resolution.

pub use nalgebra::{Vector2, Vector3};

/// 2D vector type
pub type Vec2 = Vector2<f64>;

/// 3D vector type
pub type Vec3 = Vector3<f64>;

/// Magnitude at or below which a coefficient is treated as zero.
///
/// Call sites depend on this exact value for near-zero snapping, so it is
/// not user configurable inside the algebra.
pub const EPSILON: f64 = 1e-11;

/// Returns true when `value` lies within [`EPSILON`] of zero.
///
/// `NaN` is never zeroish.
pub fn zeroish(value: f64) -> bool {
    zeroish_within(value, EPSILON)
}

/// Returns true when `value` lies within `epsilon` of zero.
pub fn zeroish_within(value: f64, epsilon: f64) -> bool {
    !value.is_nan() && value <= epsilon && value >= -epsilon
}

/// Math utility functions
pub mod utils {
    /// Linear interpolation
    pub fn lerp(a: f64, b: f64, t: f64) -> f64 {
        a + (b - a) * t
    }
}
