//! Multivector text parser
//!
//! Grammar: terms of the form `[sign] [coefficient] [basis-token]*`,
//! joined by `+` or `-`. Whitespace may surround separators but not split
//! a coefficient from its basis tokens. A term with basis tokens and no
//! coefficient has coefficient 1. Blank text is zero.
//!
//! ```text
//! "2o1 + o2"           ->  2·o1 + o2
//! "2.25 - 3o1o2"       ->  2.25 − 3·o1o2
//! "-o2o1 + 1e-3"       ->  o1o2 + 0.001
//! ```

use std::collections::BTreeMap;

use super::basis::{scan_factor, BasisCache, Blade};
use crate::GeometryError;

/// Byte cursor over the input text
struct Cursor<'a> {
    input: &'a str,
    pos: usize,
}

impl<'a> Cursor<'a> {
    const fn new(input: &'a str) -> Self {
        Self { input, pos: 0 }
    }

    fn rest(&self) -> &'a str {
        &self.input[self.pos..]
    }

    fn peek(&self) -> Option<u8> {
        self.input.as_bytes().get(self.pos).copied()
    }

    fn at_end(&self) -> bool {
        self.pos >= self.input.len()
    }

    fn skip_whitespace(&mut self) {
        let skipped = self.rest().len() - self.rest().trim_start().len();
        self.pos += skipped;
    }

    fn digits(&mut self) -> usize {
        let count = self.rest().bytes().take_while(u8::is_ascii_digit).count();
        self.pos += count;
        count
    }

    /// Consume `[0-9]*(\.[0-9]+)?([eE][-+]?[0-9]+)?`, returning its value.
    fn number(&mut self) -> Option<f64> {
        let start = self.pos;
        let mut mantissa = self.digits();

        if self.peek() == Some(b'.') {
            let dot = self.pos;
            self.pos += 1;
            let fraction = self.digits();
            if fraction == 0 {
                self.pos = dot;
            }
            mantissa += fraction;
        }
        if mantissa == 0 {
            self.pos = start;
            return None;
        }

        if matches!(self.peek(), Some(b'e' | b'E')) {
            let marker = self.pos;
            self.pos += 1;
            if matches!(self.peek(), Some(b'+' | b'-')) {
                self.pos += 1;
            }
            if self.digits() == 0 {
                self.pos = marker;
            }
        }

        self.input[start..self.pos].parse().ok()
    }

    /// Consume a run of basis tokens, returning the raw token text.
    fn basis(&mut self) -> &'a str {
        let start = self.pos;
        while let Some((_, used)) = scan_factor(self.rest()) {
            self.pos += used;
        }
        &self.input[start..self.pos]
    }

    fn syntax_error(&self) -> GeometryError {
        GeometryError::Syntax { input: self.input.to_owned(), offset: self.pos }
    }
}

/// Parse multivector text into summed coefficients per canonical blade.
///
/// Repeated blades accumulate, so `"o1 + o1"` yields `2·o1`. The result
/// may still hold zeroish coefficients; the caller polishes them away.
pub(crate) fn parse_terms(
    input: &str,
    cache: &BasisCache,
) -> Result<BTreeMap<Blade, f64>, GeometryError> {
    let mut components = BTreeMap::new();
    let mut cursor = Cursor::new(input);
    let mut operator = 1.0;

    cursor.skip_whitespace();
    if cursor.at_end() {
        return Ok(components);
    }

    loop {
        let mut sign = operator;
        match cursor.peek() {
            Some(b'-') => {
                sign = -sign;
                cursor.pos += 1;
            }
            Some(b'+') => cursor.pos += 1,
            _ => {}
        }

        let term_start = cursor.pos;
        let coefficient = cursor.number();
        let raw_basis = cursor.basis();
        if coefficient.is_none() && raw_basis.is_empty() {
            cursor.pos = term_start;
            return Err(cursor.syntax_error());
        }

        let canonical = cache.canonicalize(raw_basis)?;
        *components.entry(canonical.blade).or_insert(0.0) +=
            sign * canonical.sign * coefficient.unwrap_or(1.0);

        cursor.skip_whitespace();
        operator = match cursor.peek() {
            None => break,
            Some(b'+') => 1.0,
            Some(b'-') => -1.0,
            Some(_) => return Err(cursor.syntax_error()),
        };
        cursor.pos += 1;
        cursor.skip_whitespace();
    }

    Ok(components)
}
