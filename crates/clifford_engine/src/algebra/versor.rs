//! Versor construction and sandwich application
//!
//! A versor `v` acts on `x` as `v * x / v`. Rotors are the even unit
//! versors, for which the inverse is the conjugate and the cheaper
//! `v * x * conjugate(v)` gives the same result.

use super::multivector::Multivector;
use crate::foundation::math::zeroish;
use crate::GeometryError;

/// The ways a rotation versor can be specified
#[derive(Debug, Clone, Copy)]
pub enum Rotation<'a> {
    /// Rotate in the plane of two vectors by the angle between them.
    ///
    /// The versor is `f̂(f̂ + ŝ)`, the composition of reflections in `first`
    /// and in the bisector. It turns from `second` towards `first`, so
    /// `first` itself lands on the mirror image of `second` (`o1` turned by
    /// `(o1, o2)` becomes `−o2`).
    Between {
        /// Vector the turn is measured towards
        first: &'a Multivector,
        /// Vector the turn is measured from
        second: &'a Multivector,
    },
    /// Versor `bivector·sin(angle) + cos(angle)`; for a unit bivector
    /// this turns by `−2·angle` in its plane
    Plane {
        /// Plane of rotation
        bivector: &'a Multivector,
        /// Half of the (negated) rotation angle
        angle: f64,
    },
    /// Exponential of a blade
    Exponential(&'a Multivector),
}

impl Rotation<'_> {
    /// Build the versor this rotation applies
    pub fn versor(&self) -> Result<Multivector, GeometryError> {
        match *self {
            Self::Between { first, second } => {
                if first.homogeneous_grade() != Some(1) || second.homogeneous_grade() != Some(1) {
                    return Err(GeometryError::NotVectors {
                        first: first.to_string(),
                        second: second.to_string(),
                    });
                }
                let first = first.normalize()?;
                let second = second.normalize()?;
                Ok(first.multiply(&first.plus(&second)))
            }
            Self::Plane { bivector, angle } => {
                if !bivector.is_bivector() {
                    return Err(GeometryError::NotABlade {
                        value: bivector.to_string(),
                        square: bivector.multiply(bivector).to_string(),
                    });
                }
                Ok(bivector.scale(angle.sin()) + angle.cos())
            }
            Self::Exponential(blade) => exp_blade(blade),
        }
    }
}

/// Exponential map of a blade.
///
/// For `b` with scalar square `s`: `cos θ + (sin θ / θ)·b` with `θ = √−s`
/// when `s < 0`, `cosh θ + (sinh θ / θ)·b` with `θ = √s` when `s > 0`,
/// and `1 + b` when `s` is zero.
pub fn exp_blade(blade: &Multivector) -> Result<Multivector, GeometryError> {
    let square = blade.multiply(blade);
    if !square.is_scalar() {
        return Err(GeometryError::NotABlade { value: blade.to_string(), square: square.to_string() });
    }

    let s = square.scalar();
    if zeroish(s) {
        Ok(blade + 1.0)
    } else if s < 0.0 {
        let theta = (-s).sqrt();
        Ok(blade.scale(theta.sin() / theta) + theta.cos())
    } else {
        let theta = s.sqrt();
        Ok(blade.scale(theta.sinh() / theta) + theta.cosh())
    }
}

impl Multivector {
    /// `versor * self / versor`
    pub fn apply_versor(&self, versor: &Self) -> Result<Self, GeometryError> {
        versor.multiply(self).divide(versor)
    }

    /// Apply each versor in turn, first to last
    pub fn apply_versors<'a, I>(&self, versors: I) -> Result<Self, GeometryError>
    where
        I: IntoIterator<Item = &'a Self>,
    {
        versors.into_iter().try_fold(self.clone(), |acc, versor| acc.apply_versor(versor))
    }

    /// `rotor * self * conjugate(rotor)`.
    ///
    /// The rotor is trusted: nothing checks that it is an even unit
    /// versor. Use [`Multivector::is_rotor`] when that is in doubt.
    pub fn apply_rotor(&self, rotor: &Self) -> Self {
        rotor.multiply(self).multiply(&rotor.conjugate())
    }

    /// Apply each rotor in turn, first to last
    pub fn apply_rotors<'a, I>(&self, rotors: I) -> Self
    where
        I: IntoIterator<Item = &'a Self>,
    {
        rotors.into_iter().fold(self.clone(), |acc, rotor| acc.apply_rotor(rotor))
    }

    /// Sandwich with `v`; for a vector `v` this mirrors across its line
    pub fn reflect(&self, v: &Self) -> Result<Self, GeometryError> {
        self.apply_versor(v)
    }

    /// Apply the versor of `rotation`
    pub fn rotate(&self, rotation: Rotation<'_>) -> Result<Self, GeometryError> {
        self.apply_versor(&rotation.versor()?)
    }

    /// True for an even unit versor whose conjugate is its inverse
    pub fn is_rotor(&self) -> bool {
        let unit = self.conjugate().multiply(self).equals(&Self::one());
        unit
            && self.norm().is_ok_and(|norm| zeroish(norm - 1.0))
            && self.components().all(|(blade, _)| blade.grade() % 2 == 0)
    }
}
