//! Canonical basis blades and the process-wide canonicalization cache
//!
//! A basis token string is a run of ortho-normal basis vectors such as
//! `o1o2`, `i0` or the shorthand `xy`. Canonicalization sorts the factors
//! (negative signature first, then by subscript), flips the sign once per
//! transposition and collapses repeated factors using `o_k² = +1` and
//! `i_k² = −1`.

use std::collections::HashMap;
use std::fmt;
use std::sync::OnceLock;

use parking_lot::RwLock;

use crate::GeometryError;

/// Signature of an ortho-normal basis vector
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Signature {
    /// Squares to −1, written `i`
    Negative,
    /// Squares to +1, written `o`
    Positive,
}

impl Signature {
    /// Value of the basis vector times itself
    pub const fn square(self) -> f64 {
        match self {
            Self::Positive => 1.0,
            Self::Negative => -1.0,
        }
    }

    const fn letter(self) -> char {
        match self {
            Self::Positive => 'o',
            Self::Negative => 'i',
        }
    }
}

/// One ortho-normal basis vector, e.g. `o1` or `i0`
///
/// Ordering is by signature and then subscript, which is the canonical
/// factor order inside a [`Blade`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct BasisVector {
    /// Positive or negative signature
    pub signature: Signature,
    /// Subscript distinguishing vectors of the same signature
    pub subscript: u32,
}

impl BasisVector {
    /// Basis vector `o{subscript}`
    pub const fn positive(subscript: u32) -> Self {
        Self { signature: Signature::Positive, subscript }
    }

    /// Basis vector `i{subscript}`
    pub const fn negative(subscript: u32) -> Self {
        Self { signature: Signature::Negative, subscript }
    }
}

impl fmt::Display for BasisVector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.signature.letter(), self.subscript)
    }
}

/// A canonical basis blade: distinct basis vectors in canonical order
///
/// The empty blade is the scalar unit. Blades sort first by their factor
/// sequence, so iteration over a map keyed by `Blade` is deterministic.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Blade(Vec<BasisVector>);

impl Blade {
    /// The scalar unit
    pub const fn scalar() -> Self {
        Self(Vec::new())
    }

    /// The vector blade for array component `index`, i.e. `o{index + 1}`
    pub fn vector(index: usize) -> Self {
        let subscript = u32::try_from(index + 1).unwrap_or(u32::MAX);
        Self(vec![BasisVector::positive(subscript)])
    }

    /// Number of basis vector factors
    pub fn grade(&self) -> usize {
        self.0.len()
    }

    /// True for the empty (scalar) blade
    pub fn is_scalar(&self) -> bool {
        self.0.is_empty()
    }

    /// Factors in canonical order
    pub fn factors(&self) -> &[BasisVector] {
        &self.0
    }
}

impl From<BasisVector> for Blade {
    fn from(factor: BasisVector) -> Self {
        Self(vec![factor])
    }
}

impl fmt::Display for Blade {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.iter().try_for_each(|factor| write!(f, "{factor}"))
    }
}

/// Result of canonicalizing a basis token string
#[derive(Debug, Clone, PartialEq)]
pub struct Canonical {
    /// Canonical blade
    pub blade: Blade,
    /// Number of surviving factors
    pub grade: usize,
    /// Either `1.0` or `-1.0`
    pub sign: f64,
}

/// Reads one basis vector from the front of `text`.
///
/// Returns the vector and the number of bytes consumed, or `None` when
/// `text` does not start with a basis token.
pub(crate) fn scan_factor(text: &str) -> Option<(BasisVector, usize)> {
    let signature = match text.as_bytes().first()? {
        b'x' | b'X' => return Some((BasisVector::positive(1), 1)),
        b'y' | b'Y' => return Some((BasisVector::positive(2), 1)),
        b'z' | b'Z' => return Some((BasisVector::positive(3), 1)),
        b'o' | b'O' => Signature::Positive,
        b'i' | b'I' => Signature::Negative,
        _ => return None,
    };

    let digits = text[1..].bytes().take_while(u8::is_ascii_digit).count();
    // Subscripts are `0` or a number without leading zeros
    if digits == 0 || (digits > 1 && text.as_bytes()[1] == b'0') {
        return None;
    }
    let subscript = text[1..=digits].parse().ok()?;
    Some((BasisVector { signature, subscript }, 1 + digits))
}

/// Splits a basis token string into basis vectors in written order
pub fn tokenize(raw: &str) -> Result<Vec<BasisVector>, GeometryError> {
    let mut factors = Vec::new();
    let mut rest = raw;
    while !rest.is_empty() {
        let (factor, used) =
            scan_factor(rest).ok_or_else(|| GeometryError::InvalidBasis(raw.to_owned()))?;
        factors.push(factor);
        rest = &rest[used..];
    }
    Ok(factors)
}

/// Sorts and collapses a factor sequence into canonical form.
fn reorder(mut factors: Vec<BasisVector>) -> Canonical {
    let mut sign = 1.0;

    // Bubble sort, one sign flip per swap of distinct vectors
    for squeeze in 1..factors.len() {
        let mut swapped = false;
        for ii in 0..factors.len() - squeeze {
            if factors[ii] > factors[ii + 1] {
                factors.swap(ii, ii + 1);
                sign = -sign;
                swapped = true;
            }
        }
        if !swapped {
            break;
        }
    }

    let mut kept = Vec::with_capacity(factors.len());
    let mut sorted = factors.into_iter().peekable();
    while let Some(factor) = sorted.next() {
        if sorted.peek() == Some(&factor) {
            sorted.next();
            sign *= factor.signature.square();
        } else {
            kept.push(factor);
        }
    }

    Canonical { grade: kept.len(), blade: Blade(kept), sign }
}

/// Append-only memo of canonicalized basis token strings
///
/// Entries are never rewritten or evicted. Concurrent inserts of the same
/// key keep whichever entry landed first; both are identical, so a lost
/// race only costs a recomputation.
#[derive(Debug, Default)]
pub struct BasisCache {
    entries: RwLock<HashMap<String, Canonical>>,
}

impl BasisCache {
    /// Create an empty cache, e.g. for an isolated test
    pub fn new() -> Self {
        Self::default()
    }

    /// The process-wide cache used by [`Multivector`](super::Multivector)
    pub fn global() -> &'static Self {
        static GLOBAL: OnceLock<BasisCache> = OnceLock::new();
        GLOBAL.get_or_init(Self::new)
    }

    /// Canonicalize a raw basis token string such as `"o2o1"`
    pub fn canonicalize(&self, raw: &str) -> Result<Canonical, GeometryError> {
        if let Some(hit) = self.lookup(raw) {
            return Ok(hit);
        }
        let canonical = reorder(tokenize(raw)?);
        Ok(self.remember(raw.to_owned(), canonical))
    }

    /// Canonical form of the product `left * right` of two blades
    pub fn product(&self, left: &Blade, right: &Blade) -> Canonical {
        let key = format!("{left}{right}");
        if let Some(hit) = self.lookup(&key) {
            return hit;
        }
        let factors = left.0.iter().chain(&right.0).copied().collect();
        self.remember(key, reorder(factors))
    }

    /// Number of memoized token strings
    pub fn len(&self) -> usize {
        self.entries.read().len()
    }

    /// True when nothing has been memoized yet
    pub fn is_empty(&self) -> bool {
        self.entries.read().is_empty()
    }

    fn lookup(&self, key: &str) -> Option<Canonical> {
        self.entries.read().get(key).cloned()
    }

    fn remember(&self, key: String, canonical: Canonical) -> Canonical {
        log::trace!("basis cache: {key:?} -> {} (sign {})", canonical.blade, canonical.sign);
        self.entries.write().entry(key).or_insert(canonical).clone()
    }
}

/// Canonicalize through the process-wide cache
pub fn canonicalize(raw: &str) -> Result<Canonical, GeometryError> {
    BasisCache::global().canonicalize(raw)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn label(raw: &str) -> (String, usize, f64) {
        let canonical = BasisCache::new().canonicalize(raw).unwrap();
        (canonical.blade.to_string(), canonical.grade, canonical.sign)
    }

    #[test]
    fn test_already_canonical() {
        assert_eq!(label(""), (String::new(), 0, 1.0));
        assert_eq!(label("o1"), ("o1".to_owned(), 1, 1.0));
        assert_eq!(label("o1o2o3"), ("o1o2o3".to_owned(), 3, 1.0));
    }

    #[test]
    fn test_swaps_flip_sign() {
        assert_eq!(label("o2o1"), ("o1o2".to_owned(), 2, -1.0));
        assert_eq!(label("o3o2o1"), ("o1o2o3".to_owned(), 3, -1.0));
        assert_eq!(label("o2o3o1"), ("o1o2o3".to_owned(), 3, 1.0));
    }

    #[test]
    fn test_squares_collapse_by_signature() {
        assert_eq!(label("o1o1"), (String::new(), 0, 1.0));
        assert_eq!(label("i1i1"), (String::new(), 0, -1.0));
        assert_eq!(label("o1o2o1"), ("o2".to_owned(), 1, -1.0));
        assert_eq!(label("o1o1o1"), ("o1".to_owned(), 1, 1.0));
    }

    #[test]
    fn test_negative_signature_sorts_first() {
        assert_eq!(label("o0i0"), ("i0o0".to_owned(), 2, -1.0));
        assert_eq!(label("i0o0"), ("i0o0".to_owned(), 2, 1.0));
    }

    #[test]
    fn test_shorthand_and_case() {
        assert_eq!(label("yx"), ("o1o2".to_owned(), 2, -1.0));
        assert_eq!(label("Z"), ("o3".to_owned(), 1, 1.0));
        assert_eq!(label("O1I2"), ("i2o1".to_owned(), 2, -1.0));
    }

    #[test]
    fn test_subscripts_sort_numerically() {
        assert_eq!(label("o10o2"), ("o2o10".to_owned(), 2, -1.0));
    }

    #[test]
    fn test_residue_is_rejected() {
        let cache = BasisCache::new();
        for raw in ["o", "o1q", "o01", "e1", "o1 o2", "-o1"] {
            assert_eq!(
                cache.canonicalize(raw),
                Err(GeometryError::InvalidBasis(raw.to_owned())),
                "{raw}"
            );
        }
        assert!(cache.is_empty());
    }

    #[test]
    fn test_canonicalize_is_idempotent() {
        let cache = BasisCache::new();
        for raw in ["o3o1o2", "i1o1i1", "zyx", "o1o1o2"] {
            let once = cache.canonicalize(raw).unwrap();
            let again = cache.canonicalize(&once.blade.to_string()).unwrap();
            assert_eq!(again.blade, once.blade);
            assert_eq!(again.grade, once.grade);
            assert_eq!(again.sign, 1.0);
            assert_eq!(cache.canonicalize(raw).unwrap(), once);
        }
    }

    #[test]
    fn test_cache_is_append_only() {
        let cache = BasisCache::new();
        cache.canonicalize("o2o1").unwrap();
        cache.canonicalize("o2o1").unwrap();
        assert_eq!(cache.len(), 1);

        let left = cache.canonicalize("o1o2").unwrap().blade;
        let right = cache.canonicalize("o1").unwrap().blade;
        let product = cache.product(&left, &right);
        assert_eq!(product.blade.to_string(), "o2");
        assert_eq!(product.sign, -1.0);
        assert_eq!(cache.len(), 4);
    }

    #[test]
    fn test_concurrent_canonicalization_agrees() {
        const TOKENS: [&str; 6] = ["o2o1", "o3o2o1", "i1o1i1", "zyx", "o1o1", "i0o0"];
        let cache = BasisCache::new();

        let results: Vec<Vec<Canonical>> = std::thread::scope(|scope| {
            let workers: Vec<_> = (0..8)
                .map(|_| {
                    scope.spawn(|| {
                        TOKENS.iter().map(|raw| cache.canonicalize(raw).unwrap()).collect::<Vec<_>>()
                    })
                })
                .collect();
            workers.into_iter().map(|worker| worker.join().unwrap()).collect()
        });

        assert_eq!(cache.len(), TOKENS.len());
        let expected: Vec<_> = TOKENS.iter().map(|raw| BasisCache::new().canonicalize(raw).unwrap()).collect();
        for result in results {
            assert_eq!(result, expected);
        }
    }

    #[test]
    fn test_vector_blade() {
        assert_eq!(Blade::vector(0).to_string(), "o1");
        assert_eq!(Blade::vector(2).grade(), 1);
        assert!(Blade::scalar().is_scalar());
    }
}
