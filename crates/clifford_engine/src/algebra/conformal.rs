//! Conformal model: Euclidean points as null vectors
//!
//! The model adds two basis vectors, `o0` (squares to +1) and `i0`
//! (squares to −1), and builds the null vectors
//!
//! ```text
//! origin   = ½(o0 + i0)
//! infinity = −o0 + i0
//! ```
//!
//! A Euclidean vector `v` embeds as `v + origin + ½|v|²·infinity`, so the
//! inner product of two normalized points is `−½` times their squared
//! distance.
//!
//! [`create_rotation`] is the only conformal versor constructor.
//! Translation, reflection, dilation and inversion versors are not
//! provided; they are open extension points for this module.

use std::collections::BTreeMap;
use std::sync::OnceLock;

use super::basis::{BasisVector, Blade};
use super::multivector::Multivector;
use crate::GeometryError;

fn null_vector(positive: f64, negative: f64) -> Multivector {
    Multivector::from_components(BTreeMap::from([
        (Blade::from(BasisVector::positive(0)), positive),
        (Blade::from(BasisVector::negative(0)), negative),
    ]))
}

/// The conformal origin `½(o0 + i0)`
pub fn origin_point() -> &'static Multivector {
    static ORIGIN: OnceLock<Multivector> = OnceLock::new();
    ORIGIN.get_or_init(|| null_vector(0.5, 0.5))
}

/// The point at infinity `−o0 + i0`
pub fn infinity_point() -> &'static Multivector {
    static INFINITY: OnceLock<Multivector> = OnceLock::new();
    INFINITY.get_or_init(|| null_vector(-1.0, 1.0))
}

impl Multivector {
    /// Embed this Euclidean vector as a conformal point
    pub fn create_point(&self) -> Result<Self, GeometryError> {
        let lift = infinity_point().scale(self.quadrance()? / 2.0);
        Ok(self.plus(origin_point()).plus(&lift))
    }

    /// Weight of a conformal point, `−(infinity · self)`; one once
    /// normalized
    pub fn conformal_weight(&self) -> f64 {
        -infinity_point().inner(self).scalar()
    }

    /// Rescale a conformal point to unit weight
    pub fn normalize_point(&self) -> Result<Self, GeometryError> {
        Ok(self.divide(&infinity_point().inner(self))?.negate())
    }

    /// Recover the Euclidean vector of a conformal point
    pub fn vectorize_point(&self) -> Result<Self, GeometryError> {
        self.normalize_point()?.reject(&origin_point().wedge(infinity_point()))
    }
}

/// Squared Euclidean distance between two conformal points
pub fn conformal_quadrance(first: &Multivector, second: &Multivector) -> Result<f64, GeometryError> {
    let product = first.normalize_point()?.dot(&second.normalize_point()?);
    Ok(-2.0 * product.scalar())
}

/// Euclidean distance between two conformal points
pub fn conformal_distance(first: &Multivector, second: &Multivector) -> Result<f64, GeometryError> {
    conformal_quadrance(first, second).map(f64::sqrt)
}

/// Rotor turning by `angle` in the plane of `bivector`:
/// `sin(−angle/2)·B̂ + cos(−angle/2)`
pub fn create_rotation(bivector: &Multivector, angle: f64) -> Result<Multivector, GeometryError> {
    let half = -angle / 2.0;
    Ok(bivector.normalize()?.scale(half.sin()) + half.cos())
}
