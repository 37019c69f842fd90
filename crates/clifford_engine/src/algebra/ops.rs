//! Conjugation, norms, inverses and grade queries

use std::collections::BTreeMap;

use super::multivector::Multivector;
use crate::foundation::math::zeroish;
use crate::GeometryError;

impl Multivector {
    /// Reversion: negates each grade-k component where `k(k−1)/2` is odd
    pub fn conjugate(&self) -> Self {
        let components: BTreeMap<_, _> = self
            .components()
            .map(|(blade, value)| {
                let k = blade.grade();
                let sign = if (k * k.saturating_sub(1) / 2) % 2 == 1 { -1.0 } else { 1.0 };
                (blade.clone(), sign * value)
            })
            .collect();
        Self::from_components(components)
    }

    /// Scalar part of `conjugate(self) * self`.
    ///
    /// Computed once per value. Fails when the conjugate product has
    /// components beyond the scalar, i.e. for most mixed-grade values.
    pub fn quadrance(&self) -> Result<f64, GeometryError> {
        let cached = *self.quadrance_cell().get_or_init(|| {
            let product = self.conjugate().multiply(self);
            product.is_scalar().then_some(product.scalar())
        });
        cached.ok_or_else(|| GeometryError::NonScalarQuadrance {
            product: self.conjugate().multiply(self).to_string(),
            value: self.to_string(),
        })
    }

    /// Square root of the quadrance
    pub fn norm(&self) -> Result<f64, GeometryError> {
        self.quadrance().map(f64::sqrt)
    }

    /// This value scaled to unit norm
    pub fn normalize(&self) -> Result<Self, GeometryError> {
        let norm = self.norm()?;
        let result = self.scale(norm.recip());
        if zeroish(norm) || !result.components().all(|(_, value)| value.is_finite()) {
            return Err(GeometryError::NonNormalizable { norm, value: self.to_string() });
        }
        Ok(result)
    }

    /// Multiplicative inverse `conjugate(self) / quadrance(self)`
    pub fn inverse(&self) -> Result<Self, GeometryError> {
        let quadrance = self.quadrance()?;
        let result = self.conjugate().scale(quadrance.recip());
        if zeroish(quadrance) || !result.components().all(|(_, value)| value.is_finite()) {
            return Err(GeometryError::NonInvertible { quadrance, value: self.to_string() });
        }
        Ok(result)
    }

    /// `self * inverse(other)`
    pub fn divide(&self, other: &Self) -> Result<Self, GeometryError> {
        Ok(self.multiply(&other.inverse()?))
    }

    /// Projection onto `space`: `contract(space) / space`
    pub fn project(&self, space: &Self) -> Result<Self, GeometryError> {
        self.contract(space).divide(space)
    }

    /// Rejection from `space`: `wedge(space) / space`
    pub fn reject(&self, space: &Self) -> Result<Self, GeometryError> {
        self.wedge(space).divide(space)
    }

    /// Highest grade present; `None` for zero
    pub fn grade(&self) -> Option<usize> {
        self.components().map(|(blade, _)| blade.grade()).max()
    }

    /// The single grade shared by every component; `None` when mixed or
    /// zero
    pub fn homogeneous_grade(&self) -> Option<usize> {
        let mut grades = self.components().map(|(blade, _)| blade.grade());
        let first = grades.next()?;
        grades.all(|grade| grade == first).then_some(first)
    }

    /// True when every component has the same grade
    pub fn is_homogeneous(&self) -> bool {
        self.homogeneous_grade().is_some()
    }

    /// True for zero or a value made only of grade-`grade` components
    pub fn is_grade(&self, grade: usize) -> bool {
        self.zeroish() || self.homogeneous_grade() == Some(grade)
    }

    /// Grade 0 (or zero)
    pub fn is_scalar(&self) -> bool {
        self.is_grade(0)
    }

    /// Grade 1 (or zero)
    pub fn is_vector(&self) -> bool {
        self.is_grade(1)
    }

    /// Grade 2 (or zero)
    pub fn is_bivector(&self) -> bool {
        self.is_grade(2)
    }

    /// Grade 3 (or zero)
    pub fn is_trivector(&self) -> bool {
        self.is_grade(3)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ErrorKind;
    use approx::assert_relative_eq;

    fn mv(text: &str) -> Multivector {
        text.parse().unwrap()
    }

    #[test]
    fn test_conjugate_by_grade() {
        assert_eq!(
            mv("2 + o1 + o1o2 + o1o2o3 + o1o2o3i1").conjugate(),
            mv("2 + o1 - o1o2 - o1o2o3 + o1o2o3i1")
        );
        let mixed = mv("3 - 2o2o3 + o1");
        assert_eq!(mixed.conjugate().conjugate(), mixed);
    }

    #[test]
    fn test_quadrance_and_norm() {
        let v = Multivector::from([3.0, 4.0]);
        assert_relative_eq!(v.quadrance().unwrap(), 25.0);
        assert_relative_eq!(v.norm().unwrap(), 5.0);
        assert_relative_eq!(mv("2o1o2").quadrance().unwrap(), 4.0);
        assert_relative_eq!(mv("i1").quadrance().unwrap(), -1.0);
        assert_eq!(Multivector::zero().quadrance().unwrap(), 0.0);
    }

    #[test]
    fn test_mixed_quadrance_is_an_error() {
        let err = mv("1 + o1").quadrance().unwrap_err();
        assert!(matches!(err, GeometryError::NonScalarQuadrance { .. }));
        assert_eq!(err.kind(), ErrorKind::NonInvertible);
        assert_eq!(mv("1 + o1").norm().unwrap_err(), err);
    }

    #[test]
    fn test_normalize() {
        let unit = Multivector::from([3.0, 4.0]).normalize().unwrap();
        assert_eq!(unit, Multivector::from([0.6, 0.8]));
        assert!(matches!(
            Multivector::zero().normalize(),
            Err(GeometryError::NonNormalizable { .. })
        ));
    }

    #[test]
    fn test_inverse_and_divide() {
        for text in ["2o1", "o1 + 3o2", "3o1o2", "2 + o1o2", "i1"] {
            let a = mv(text);
            assert!(a.multiply(&a.inverse().unwrap()).equals(&Multivector::one()), "{text}");
        }
        assert_eq!(mv("o1o2").divide(&mv("o2")).unwrap(), mv("o1"));
        assert!(matches!(
            Multivector::zero().inverse(),
            Err(GeometryError::NonInvertible { .. })
        ));
        // Null vector: i0 + o0 squares to zero
        assert!(mv("o0 + i0").inverse().is_err());
    }

    #[test]
    fn test_project_and_reject() {
        let v = Multivector::from([3.0, 4.0, 5.0]);
        let plane = mv("o1o2");
        assert_eq!(v.project(&plane).unwrap(), Multivector::from([3.0, 4.0]));
        assert_eq!(v.reject(&plane).unwrap(), mv("5o3"));
        assert_eq!(v.project(&mv("o1")).unwrap() + v.reject(&mv("o1")).unwrap(), v);
    }

    #[test]
    fn test_grades() {
        assert_eq!(mv("1 + o1o2").grade(), Some(2));
        assert_eq!(Multivector::zero().grade(), None);
        assert_eq!(mv("o1 + o2").homogeneous_grade(), Some(1));
        assert_eq!(mv("o1 + o2o3").homogeneous_grade(), None);
        assert!(!mv("o1 + o2o3").is_homogeneous());

        assert!(mv("7").is_scalar());
        assert!(mv("o1 - o3").is_vector());
        assert!(mv("o1o3").is_bivector());
        assert!(mv("o1o2o3").is_trivector());
        assert!(!mv("1 + o1").is_scalar());

        let zero = Multivector::zero();
        assert!(zero.is_scalar() && zero.is_vector() && zero.is_bivector() && zero.is_trivector());
    }
}
