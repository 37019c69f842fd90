//! The multivector value type
//!
//! A multivector is an immutable sparse map from canonical [`Blade`] to a
//! real coefficient. Coefficients within [`EPSILON`] of zero are dropped
//! on construction, and the scalar, `o1`, `o2` and `o3` coefficients are
//! kept on hand as `scalar`, `x`, `y` and `z` for rendering code.
//!
//! Equality is tolerance based everywhere, including `PartialEq`, because
//! every coefficient comes out of floating point arithmetic.

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;
use std::sync::OnceLock;

use approx::{AbsDiffEq, RelativeEq};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use super::basis::{BasisCache, Blade};
use super::parse::parse_terms;
use crate::foundation::math::{zeroish, zeroish_within, Vec2, Vec3, EPSILON};
use crate::GeometryError;

/// Every shape of input a multivector can be built from
#[derive(Debug, Clone, PartialEq)]
pub enum MultivectorSource {
    /// A plain number
    Scalar(f64),
    /// Component `i` becomes the coefficient of `o{i + 1}`
    Vector(Vec<f64>),
    /// Text such as `"2o1 + o2"`
    Text(String),
    /// Basis token to coefficient pairs, e.g. `("o2o1", 1.0)`
    Map(Vec<(String, f64)>),
    /// Polar (`phi` absent) or spherical coordinates; `r` defaults to 1
    Polar {
        /// Radius
        r: Option<f64>,
        /// Angle from `o1` toward `o2`
        theta: f64,
        /// Elevation toward `o3`
        phi: Option<f64>,
    },
    /// An existing value
    Copy(Multivector),
}

/// Sum of coefficient-weighted basis blades
#[derive(Debug, Clone, Default)]
pub struct Multivector {
    components: BTreeMap<Blade, f64>,
    scalar: f64,
    x: f64,
    y: f64,
    z: f64,
    quadrance: OnceLock<Option<f64>>,
}

impl Multivector {
    /// Build from any supported source
    pub fn new(source: MultivectorSource) -> Result<Self, GeometryError> {
        match source {
            MultivectorSource::Scalar(value) => Ok(Self::from(value)),
            MultivectorSource::Vector(values) => Ok(Self::from(values.as_slice())),
            MultivectorSource::Text(text) => text.parse(),
            MultivectorSource::Map(entries) => Self::from_map(entries),
            MultivectorSource::Polar { r, theta, phi } => {
                Ok(Self::polar(r.unwrap_or(1.0), theta, phi))
            }
            MultivectorSource::Copy(value) => Ok(value),
        }
    }

    /// The zero multivector
    pub fn zero() -> Self {
        Self::default()
    }

    /// The scalar unit
    pub fn one() -> Self {
        Self::from(1.0)
    }

    /// Build from basis token / coefficient pairs.
    ///
    /// Keys are canonicalized, so `("o2o1", 1.0)` lands on `o1o2` with
    /// coefficient −1, and repeated blades accumulate.
    pub fn from_map<I, K>(entries: I) -> Result<Self, GeometryError>
    where
        I: IntoIterator<Item = (K, f64)>,
        K: AsRef<str>,
    {
        let cache = BasisCache::global();
        let mut components = BTreeMap::new();
        for (key, value) in entries {
            let canonical = cache.canonicalize(key.as_ref())?;
            if zeroish(value) {
                continue;
            }
            *components.entry(canonical.blade).or_insert(0.0) += canonical.sign * value;
        }
        Ok(Self::from_components(components))
    }

    /// Vector of length `r` at angle `theta` in the `o1o2` plane, lifted
    /// toward `o3` by `phi` when given
    pub fn polar(r: f64, theta: f64, phi: Option<f64>) -> Self {
        let mut components = BTreeMap::new();
        let mut factor = r;
        if let Some(phi) = phi {
            components.insert(Blade::vector(2), factor * phi.sin());
            factor *= phi.cos();
        }
        components.insert(Blade::vector(0), factor * theta.cos());
        components.insert(Blade::vector(1), factor * theta.sin());
        Self::from_components(components)
    }

    /// Drop negligible coefficients and cache the named accessors.
    pub(crate) fn from_components(mut components: BTreeMap<Blade, f64>) -> Self {
        components.retain(|_, value| !zeroish(*value));
        let lookup = |blade: &Blade| components.get(blade).copied().unwrap_or(0.0);
        Self {
            scalar: lookup(&Blade::scalar()),
            x: lookup(&Blade::vector(0)),
            y: lookup(&Blade::vector(1)),
            z: lookup(&Blade::vector(2)),
            components,
            quadrance: OnceLock::new(),
        }
    }

    /// Scalar (grade 0) coefficient
    pub const fn scalar(&self) -> f64 {
        self.scalar
    }

    /// Coefficient of `o1`
    pub const fn x(&self) -> f64 {
        self.x
    }

    /// Coefficient of `o2`
    pub const fn y(&self) -> f64 {
        self.y
    }

    /// Coefficient of `o3`
    pub const fn z(&self) -> f64 {
        self.z
    }

    /// Coefficient of a canonical blade (zero when absent)
    pub fn coefficient(&self, blade: &Blade) -> f64 {
        self.components.get(blade).copied().unwrap_or(0.0)
    }

    /// Coefficient for a basis token, honoring the token's reordering sign
    pub fn component(&self, basis: &str) -> Result<f64, GeometryError> {
        let canonical = BasisCache::global().canonicalize(basis)?;
        Ok(canonical.sign * self.coefficient(&canonical.blade))
    }

    /// Non-negligible components in blade order
    pub fn components(&self) -> impl Iterator<Item = (&Blade, f64)> + '_ {
        self.components.iter().map(|(blade, value)| (blade, *value))
    }

    /// Number of non-negligible components
    pub fn len(&self) -> usize {
        self.components.len()
    }

    /// True for the zero multivector
    pub fn is_empty(&self) -> bool {
        self.components.is_empty()
    }

    /// `o1` and `o2` as a nalgebra vector
    pub fn to_vec2(&self) -> Vec2 {
        Vec2::new(self.x, self.y)
    }

    /// `o1`, `o2` and `o3` as a nalgebra vector
    pub fn to_vec3(&self) -> Vec3 {
        Vec3::new(self.x, self.y, self.z)
    }

    pub(super) const fn quadrance_cell(&self) -> &OnceLock<Option<f64>> {
        &self.quadrance
    }

    /// True when every coefficient is within [`EPSILON`] of zero
    pub fn zeroish(&self) -> bool {
        self.components.values().all(|value| zeroish(*value))
    }

    /// True when every operand is zeroish
    pub fn all_zeroish<'a, I>(values: I) -> bool
    where
        I: IntoIterator<Item = &'a Self>,
    {
        values.into_iter().all(Self::zeroish)
    }

    /// Component-wise equality within [`EPSILON`]
    pub fn equals(&self, other: &Self) -> bool {
        self.equals_within(other, EPSILON)
    }

    /// Component-wise equality within `epsilon`
    pub fn equals_within(&self, other: &Self, epsilon: f64) -> bool {
        self.components
            .keys()
            .chain(other.components.keys())
            .all(|blade| zeroish_within(self.coefficient(blade) - other.coefficient(blade), epsilon))
    }

    /// True when every operand equals the first (vacuously true for fewer
    /// than two)
    pub fn all_equal<'a, I>(values: I) -> bool
    where
        I: IntoIterator<Item = &'a Self>,
    {
        let mut values = values.into_iter();
        values.next().map_or(true, |first| values.all(|other| first.equals(other)))
    }
}

impl From<f64> for Multivector {
    fn from(value: f64) -> Self {
        Self::from_components(BTreeMap::from([(Blade::scalar(), value)]))
    }
}

impl From<&[f64]> for Multivector {
    fn from(values: &[f64]) -> Self {
        let components = values
            .iter()
            .enumerate()
            .map(|(index, value)| (Blade::vector(index), *value))
            .collect();
        Self::from_components(components)
    }
}

impl From<Vec<f64>> for Multivector {
    fn from(values: Vec<f64>) -> Self {
        Self::from(values.as_slice())
    }
}

impl<const N: usize> From<[f64; N]> for Multivector {
    fn from(values: [f64; N]) -> Self {
        Self::from(values.as_slice())
    }
}

impl From<Vec2> for Multivector {
    fn from(vector: Vec2) -> Self {
        Self::from(vector.as_slice())
    }
}

impl From<Vec3> for Multivector {
    fn from(vector: Vec3) -> Self {
        Self::from(vector.as_slice())
    }
}

impl FromStr for Multivector {
    type Err = GeometryError;

    fn from_str(text: &str) -> Result<Self, Self::Err> {
        parse_terms(text, BasisCache::global()).map(Self::from_components)
    }
}

impl fmt::Display for Multivector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for (blade, &value) in &self.components {
            if first {
                if blade.is_scalar() || !zeroish(value - 1.0) {
                    write!(f, "{value}")?;
                }
            } else if value >= 0.0 {
                f.write_str(" + ")?;
                if !zeroish(value - 1.0) {
                    write!(f, "{value}")?;
                }
            } else {
                f.write_str(" - ")?;
                if !zeroish(value + 1.0) {
                    write!(f, "{}", -value)?;
                }
            }
            write!(f, "{blade}")?;
            first = false;
        }
        if first {
            f.write_str("0")?;
        }
        Ok(())
    }
}

impl PartialEq for Multivector {
    fn eq(&self, other: &Self) -> bool {
        self.equals(other)
    }
}

impl AbsDiffEq for Multivector {
    type Epsilon = f64;

    fn default_epsilon() -> f64 {
        EPSILON
    }

    fn abs_diff_eq(&self, other: &Self, epsilon: f64) -> bool {
        self.equals_within(other, epsilon)
    }
}

impl RelativeEq for Multivector {
    fn default_max_relative() -> f64 {
        f64::default_max_relative()
    }

    fn relative_eq(&self, other: &Self, epsilon: f64, max_relative: f64) -> bool {
        self.components.keys().chain(other.components.keys()).all(|blade| {
            self.coefficient(blade)
                .relative_eq(&other.coefficient(blade), epsilon, max_relative)
        })
    }
}

impl Serialize for Multivector {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_map(self.components.iter().map(|(blade, value)| (blade.to_string(), value)))
    }
}

impl<'de> Deserialize<'de> for Multivector {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let entries = BTreeMap::<String, f64>::deserialize(deserializer)?;
        Self::from_map(entries).map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use std::f64::consts::PI;

    #[test]
    fn test_accessors() {
        assert_eq!(Multivector::from(PI).scalar(), PI);
        assert_eq!(Multivector::from([2.0, 1.0]).x(), 2.0);

        let parsed: Multivector = "2o1 + o2".parse().unwrap();
        assert_eq!(parsed.x(), 2.0);
        assert_eq!(parsed.y(), 1.0);
        assert_eq!(parsed.z(), 0.0);

        let mapped = Multivector::from_map([("x", 2.0), ("y", 1.0)]).unwrap();
        assert_eq!(mapped.x(), 2.0);
        assert_eq!(mapped.y(), 1.0);
    }

    #[test]
    fn test_every_source_builds() {
        let sources = [
            MultivectorSource::Scalar(3.0),
            MultivectorSource::Vector(vec![3.0]),
            MultivectorSource::Text("3o1o2".to_owned()),
            MultivectorSource::Map(vec![("o2o1".to_owned(), -3.0)]),
            MultivectorSource::Polar { r: Some(3.0), theta: 0.0, phi: None },
            MultivectorSource::Copy(Multivector::from(3.0)),
        ];
        let built: Vec<_> = sources.into_iter().map(|s| Multivector::new(s).unwrap()).collect();

        assert_eq!(built[0].scalar(), 3.0);
        assert_eq!(built[1].x(), 3.0);
        assert_eq!(built[2].component("o1o2").unwrap(), 3.0);
        assert_eq!(built[3], built[2]);
        assert_eq!(built[4], built[1]);
        assert_eq!(built[5], built[0]);
    }

    #[test]
    fn test_polar_and_spherical() {
        let planar = Multivector::polar(2.0, PI / 2.0, None);
        assert_relative_eq!(planar.x(), 0.0, epsilon = 1e-12);
        assert_relative_eq!(planar.y(), 2.0);

        let spherical = Multivector::polar(1.0, 0.0, Some(PI / 6.0));
        assert_relative_eq!(spherical.z(), 0.5, epsilon = 1e-12);
        assert_relative_eq!(spherical.x(), (PI / 6.0).cos());
    }

    #[test]
    fn test_negligible_components_are_dropped() {
        let value = Multivector::from_map([("", 1e-12), ("o1", 2.0), ("o2", -1e-13)]).unwrap();
        assert_eq!(value.len(), 1);
        assert!(Multivector::from(1e-12).is_empty());
        assert!(Multivector::zero().zeroish());
    }

    #[test]
    fn test_map_keys_are_canonicalized() {
        let value = Multivector::from_map([("o2o1", 1.0), ("o1o2", 3.0)]).unwrap();
        assert_eq!(value.component("o1o2").unwrap(), 2.0);
        assert_eq!(value.component("o2o1").unwrap(), -2.0);
        assert!(matches!(
            Multivector::from_map([("q1", 1.0)]),
            Err(GeometryError::InvalidBasis(_))
        ));
    }

    #[test]
    fn test_tolerant_equality() {
        let a = Multivector::from([1.0, 2.0]);
        let b = Multivector::from([1.0 + 1e-12, 2.0]);
        let c = Multivector::from([1.0, 2.0, 1e-6]);
        assert!(a.equals(&b));
        assert!(!a.equals(&c));
        assert!(Multivector::all_equal([&a, &b]));
        assert!(!Multivector::all_equal([&a, &b, &c]));
        assert!(Multivector::all_equal(std::iter::empty()));
        assert!(Multivector::all_zeroish([&Multivector::zero(), &Multivector::from(1e-12)]));
        approx::assert_abs_diff_eq!(a, c, epsilon = 1e-5);
    }

    #[test]
    fn test_display() {
        let cases = [
            ("0", "0"),
            ("3", "3"),
            ("o1", "o1"),
            ("-o1", "-1o1"),
            ("2o1 + o2", "2o1 + o2"),
            ("2o1o2 + 2.5 - 3o1o2", "2.5 - o1o2"),
            ("o1 - 0.5o2", "o1 - 0.5o2"),
        ];
        for (input, expected) in cases {
            let value: Multivector = input.parse().unwrap();
            assert_eq!(value.to_string(), expected, "{input}");
            assert_eq!(expected.parse::<Multivector>().unwrap(), value);
        }
    }

    #[test]
    fn test_nalgebra_round_trip() {
        let vector = Vec3::new(1.0, -2.0, 0.5);
        let value = Multivector::from(vector);
        assert_eq!(value.to_vec3(), vector);
        assert_eq!(value.to_vec2(), Vec2::new(1.0, -2.0));
    }

    #[test]
    fn test_serde_uses_basis_keys() {
        let value: Multivector = "2 + o2o1".parse().unwrap();
        let text = ron::to_string(&value).unwrap();
        assert!(text.contains("\"o1o2\""), "{text}");
        assert_eq!(ron::from_str::<Multivector>(&text).unwrap(), value);

        let loaded: Multivector = ron::from_str(r#"{"o2o1": 1.0, "": 2.0}"#).unwrap();
        assert_eq!(loaded, value);
    }
}
