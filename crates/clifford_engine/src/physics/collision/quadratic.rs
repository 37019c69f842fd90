//! Real roots of quadratics

use std::iter::Flatten;

use crate::foundation::math::{zeroish_within, EPSILON};

/// Real roots of `a·t² + b·t + c = 0`
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum QuadraticRoots {
    /// No real roots, or a degenerate constant expression
    Empty,
    /// A linear root or a double root
    Single(f64),
    /// Two distinct roots, `(−b + √Δ) / 2a` first
    Pair(f64, f64),
}

impl QuadraticRoots {
    /// Number of roots
    pub const fn len(&self) -> usize {
        match self {
            Self::Empty => 0,
            Self::Single(_) => 1,
            Self::Pair(..) => 2,
        }
    }

    /// True when there are no roots
    pub const fn is_empty(&self) -> bool {
        matches!(self, Self::Empty)
    }
}

impl IntoIterator for QuadraticRoots {
    type Item = f64;
    type IntoIter = Flatten<std::array::IntoIter<Option<f64>, 2>>;

    fn into_iter(self) -> Self::IntoIter {
        let pair = match self {
            Self::Empty => [None, None],
            Self::Single(root) => [Some(root), None],
            Self::Pair(first, second) => [Some(first), Some(second)],
        };
        pair.into_iter().flatten()
    }
}

/// Roots of `a·t² + b·t + c` using the default tolerance
pub fn quadratic_roots(a: f64, b: f64, c: f64) -> QuadraticRoots {
    quadratic_roots_within(a, b, c, EPSILON)
}

/// Roots of `a·t² + b·t + c`, treating coefficients and the discriminant
/// within `epsilon` of zero as zero
pub fn quadratic_roots_within(a: f64, b: f64, c: f64, epsilon: f64) -> QuadraticRoots {
    if zeroish_within(a, epsilon) {
        if zeroish_within(b, epsilon) {
            return QuadraticRoots::Empty;
        }
        return QuadraticRoots::Single(-c / b);
    }

    let discriminant = b.mul_add(b, -4.0 * a * c);
    if zeroish_within(discriminant, epsilon) {
        QuadraticRoots::Single(-b / (2.0 * a))
    } else if discriminant < 0.0 {
        QuadraticRoots::Empty
    } else {
        let root = discriminant.sqrt();
        QuadraticRoots::Pair((-b + root) / (2.0 * a), (-b - root) / (2.0 * a))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_two_roots() {
        // (t - 1)(t - 2)
        assert_eq!(quadratic_roots(1.0, -3.0, 2.0), QuadraticRoots::Pair(2.0, 1.0));
        let roots: Vec<_> = quadratic_roots(16.0, -48.0, 32.0).into_iter().collect();
        assert_eq!(roots, vec![2.0, 1.0]);
    }

    #[test]
    fn test_double_root() {
        assert_eq!(quadratic_roots(1.0, -2.0, 1.0), QuadraticRoots::Single(1.0));
    }

    #[test]
    fn test_no_real_roots() {
        assert!(quadratic_roots(1.0, 0.0, 1.0).is_empty());
        assert_eq!(quadratic_roots(1.0, 0.0, 1.0).into_iter().count(), 0);
    }

    #[test]
    fn test_linear_fallback() {
        match quadratic_roots(0.0, 4.0, -1.0) {
            QuadraticRoots::Single(root) => assert_relative_eq!(root, 0.25),
            other => panic!("expected a single root, got {other:?}"),
        }
        assert_eq!(quadratic_roots(1e-12, 2.0, -1.0), QuadraticRoots::Single(0.5));
    }

    #[test]
    fn test_constant_has_no_roots() {
        assert_eq!(quadratic_roots(0.0, 0.0, 5.0), QuadraticRoots::Empty);
        assert_eq!(quadratic_roots(0.0, 1e-12, 0.0), QuadraticRoots::Empty);
        assert_eq!(quadratic_roots(0.0, 0.0, 0.0).len(), 0);
    }

    #[test]
    fn test_custom_tolerance() {
        assert_eq!(quadratic_roots_within(1e-6, 1.0, -1.0, 1e-5), QuadraticRoots::Single(1.0));
        assert_eq!(quadratic_roots_within(1e-6, 1e-6, 3.0, 1e-5).len(), 0);
    }
}
