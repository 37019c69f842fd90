//! Sums and the five blade products
//!
//! Every product runs the same combinator: for each pair of components the
//! basis cache canonicalizes the concatenated blade, and the pair's
//! `sign * left * right` is accumulated under the result blade unless the
//! product's grade filter rejects it.

use std::collections::BTreeMap;
use std::iter::Sum;
use std::ops::{Add, Mul, Neg, Sub};

use super::basis::BasisCache;
use super::multivector::Multivector;

/// Which terms of the full geometric product a product keeps
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Product {
    /// Every term
    Geometric,
    /// Terms whose grade is the sum of the operand grades (wedge)
    Outer,
    /// Terms whose grade is not the sum of the operand grades
    Inner,
    /// Terms whose grade is the absolute grade difference
    Dot,
    /// Terms whose grade is right grade minus left grade
    Contract,
}

impl Product {
    /// Grade filter for a term from a grade-`left` blade times a
    /// grade-`right` blade landing on grade `result`
    pub const fn keeps(self, left: usize, right: usize, result: usize) -> bool {
        match self {
            Self::Geometric => true,
            Self::Outer => left + right == result,
            Self::Inner => left + right != result,
            Self::Dot => left.abs_diff(right) == result,
            Self::Contract => right >= left && right - left == result,
        }
    }

    /// Compute `left ∘ right` through the process-wide basis cache
    pub fn apply(self, left: &Multivector, right: &Multivector) -> Multivector {
        self.apply_with(BasisCache::global(), left, right)
    }

    /// Compute `left ∘ right` through a specific basis cache
    pub fn apply_with(self, cache: &BasisCache, left: &Multivector, right: &Multivector) -> Multivector {
        let mut components = BTreeMap::new();
        for (lb, lc) in left.components() {
            for (rb, rc) in right.components() {
                let canonical = cache.product(lb, rb);
                if !self.keeps(lb.grade(), rb.grade(), canonical.grade) {
                    continue;
                }
                *components.entry(canonical.blade).or_insert(0.0) += canonical.sign * lc * rc;
            }
        }
        Multivector::from_components(components)
    }

    /// Left fold of the product over `values`; `None` when empty
    pub fn fold<'a, I>(self, values: I) -> Option<Multivector>
    where
        I: IntoIterator<Item = &'a Multivector>,
    {
        let mut values = values.into_iter();
        let first = values.next()?.clone();
        Some(values.fold(first, |acc, next| self.apply(&acc, next)))
    }
}

/// Label-wise `left + factor * right`
fn accumulate(left: &Multivector, right: &Multivector, factor: f64) -> Multivector {
    let mut components: BTreeMap<_, _> =
        left.components().map(|(blade, value)| (blade.clone(), value)).collect();
    for (blade, value) in right.components() {
        *components.entry(blade.clone()).or_insert(0.0) += factor * value;
    }
    Multivector::from_components(components)
}

impl Multivector {
    /// Component-wise sum
    pub fn plus(&self, other: &Self) -> Self {
        accumulate(self, other, 1.0)
    }

    /// Component-wise difference
    pub fn minus(&self, other: &Self) -> Self {
        accumulate(self, other, -1.0)
    }

    /// Geometric product
    pub fn multiply(&self, other: &Self) -> Self {
        Product::Geometric.apply(self, other)
    }

    /// Multiply every coefficient by `factor`
    pub fn scale(&self, factor: f64) -> Self {
        let components = self
            .components()
            .map(|(blade, value)| (blade.clone(), value * factor))
            .collect();
        Self::from_components(components)
    }

    /// Additive inverse
    pub fn negate(&self) -> Self {
        self.scale(-1.0)
    }

    /// Outer product
    pub fn wedge(&self, other: &Self) -> Self {
        Product::Outer.apply(self, other)
    }

    /// Inner product
    pub fn inner(&self, other: &Self) -> Self {
        Product::Inner.apply(self, other)
    }

    /// Dot product
    pub fn dot(&self, other: &Self) -> Self {
        Product::Dot.apply(self, other)
    }

    /// Left contraction
    pub fn contract(&self, other: &Self) -> Self {
        Product::Contract.apply(self, other)
    }

    /// Sum of all values; zero when empty
    pub fn sum<'a, I>(values: I) -> Self
    where
        I: IntoIterator<Item = &'a Self>,
    {
        values.into_iter().fold(Self::zero(), |acc, next| acc.plus(next))
    }

    /// Geometric product of all values from left to right; one when empty
    pub fn product<'a, I>(values: I) -> Self
    where
        I: IntoIterator<Item = &'a Self>,
    {
        values.into_iter().fold(Self::one(), |acc, next| acc.multiply(next))
    }
}

macro_rules! impl_binary_op {
    ($trait:ident, $method:ident, $inherent:ident) => {
        impl $trait<&Multivector> for &Multivector {
            type Output = Multivector;

            fn $method(self, rhs: &Multivector) -> Multivector {
                self.$inherent(rhs)
            }
        }

        impl $trait<Multivector> for Multivector {
            type Output = Multivector;

            fn $method(self, rhs: Multivector) -> Multivector {
                self.$inherent(&rhs)
            }
        }

        impl $trait<&Multivector> for Multivector {
            type Output = Multivector;

            fn $method(self, rhs: &Multivector) -> Multivector {
                self.$inherent(rhs)
            }
        }

        impl $trait<Multivector> for &Multivector {
            type Output = Multivector;

            fn $method(self, rhs: Multivector) -> Multivector {
                self.$inherent(&rhs)
            }
        }

        impl $trait<f64> for Multivector {
            type Output = Multivector;

            fn $method(self, rhs: f64) -> Multivector {
                self.$inherent(&Multivector::from(rhs))
            }
        }

        impl $trait<f64> for &Multivector {
            type Output = Multivector;

            fn $method(self, rhs: f64) -> Multivector {
                self.$inherent(&Multivector::from(rhs))
            }
        }
    };
}

impl_binary_op!(Add, add, plus);
impl_binary_op!(Sub, sub, minus);
impl_binary_op!(Mul, mul, multiply);

impl Mul<Multivector> for f64 {
    type Output = Multivector;

    fn mul(self, rhs: Multivector) -> Multivector {
        rhs.scale(self)
    }
}

impl Mul<&Multivector> for f64 {
    type Output = Multivector;

    fn mul(self, rhs: &Multivector) -> Multivector {
        rhs.scale(self)
    }
}

impl Neg for Multivector {
    type Output = Self;

    fn neg(self) -> Self {
        self.negate()
    }
}

impl Neg for &Multivector {
    type Output = Multivector;

    fn neg(self) -> Multivector {
        self.negate()
    }
}

impl Sum for Multivector {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Self::zero(), |acc, next| acc.plus(&next))
    }
}

impl<'a> Sum<&'a Multivector> for Multivector {
    fn sum<I: Iterator<Item = &'a Multivector>>(iter: I) -> Self {
        iter.fold(Self::zero(), |acc, next| acc.plus(next))
    }
}
