//! Integer Laurent polynomials in one indeterminate `A`.

use crate::types::{Result, YamadaError};
use num_traits::{One, Pow, Zero};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::iter::{Product, Sum};
use std::ops::{Add, AddAssign, Mul, MulAssign, Neg, Sub};
use std::str::FromStr;

/// A Laurent polynomial `Σ c·A^e` with integer coefficients.
///
/// Zero coefficients are never stored, so structural equality is value
/// equality. The derived order is an arbitrary but total one, used to key
/// ordered maps.
#[derive(Debug, Clone, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct LaurentPoly {
    terms: BTreeMap<i32, i64>,
}

impl LaurentPoly {
    /// `c·A^e`.
    #[must_use]
    pub fn monomial(coefficient: i64, exponent: i32) -> Self {
        let mut poly = Self::default();
        poly.add_term(exponent, coefficient);
        poly
    }

    /// The indeterminate `A`.
    #[must_use]
    pub fn a() -> Self {
        Self::monomial(1, 1)
    }

    /// `A^-1`.
    #[must_use]
    pub fn a_inverse() -> Self {
        Self::monomial(1, -1)
    }

    /// Build from `(exponent, coefficient)` terms; repeated exponents add up.
    pub fn from_terms<I: IntoIterator<Item = (i32, i64)>>(terms: I) -> Self {
        let mut poly = Self::default();
        for (exponent, coefficient) in terms {
            poly.add_term(exponent, coefficient);
        }
        poly
    }

    /// Build from coefficients of `A^start, A^(start+1), ...`.
    #[must_use]
    pub fn from_coefficients(start: i32, coefficients: &[i64]) -> Self {
        Self::from_terms(
            coefficients
                .iter()
                .zip(start..)
                .map(|(&coefficient, exponent)| (exponent, coefficient)),
        )
    }

    fn add_term(&mut self, exponent: i32, coefficient: i64) {
        if coefficient == 0 {
            return;
        }
        let entry = self.terms.entry(exponent).or_insert(0);
        *entry += coefficient;
        if *entry == 0 {
            self.terms.remove(&exponent);
        }
    }

    #[must_use]
    pub fn coefficient(&self, exponent: i32) -> i64 {
        self.terms.get(&exponent).copied().unwrap_or(0)
    }

    /// Non-zero `(exponent, coefficient)` terms in ascending exponent order.
    pub fn terms(&self) -> impl DoubleEndedIterator<Item = (i32, i64)> + '_ {
        self.terms.iter().map(|(&e, &c)| (e, c))
    }

    /// Non-zero `(coefficient, exponent)` pairs in ascending exponent order.
    #[must_use]
    pub fn coefficient_exponent_pairs(&self) -> Vec<(i64, i32)> {
        self.terms().map(|(e, c)| (c, e)).collect()
    }

    #[must_use]
    pub fn min_exponent(&self) -> Option<i32> {
        self.terms.keys().next().copied()
    }

    #[must_use]
    pub fn max_exponent(&self) -> Option<i32> {
        self.terms.keys().next_back().copied()
    }

    /// Dense coefficients of `A^lo ..= A^hi`.
    #[must_use]
    pub fn coefficients(&self, lo: i32, hi: i32) -> Vec<i64> {
        (lo..=hi).map(|e| self.coefficient(e)).collect()
    }

    /// Multiply by `A^k`.
    #[must_use]
    pub fn shift(&self, k: i32) -> Self {
        Self {
            terms: self.terms.iter().map(|(&e, &c)| (e + k, c)).collect(),
        }
    }

    /// Multiply by an integer.
    #[must_use]
    pub fn scale(&self, factor: i64) -> Self {
        Self::from_terms(self.terms().map(|(e, c)| (e, c * factor)))
    }
}

// =============================================================================
// ARITHMETIC
// =============================================================================

impl Add<&LaurentPoly> for &LaurentPoly {
    type Output = LaurentPoly;

    fn add(self, rhs: &LaurentPoly) -> LaurentPoly {
        let mut sum = self.clone();
        sum += rhs;
        sum
    }
}

impl Add for LaurentPoly {
    type Output = LaurentPoly;

    fn add(mut self, rhs: LaurentPoly) -> LaurentPoly {
        self += &rhs;
        self
    }
}

impl AddAssign<&LaurentPoly> for LaurentPoly {
    fn add_assign(&mut self, rhs: &LaurentPoly) {
        for (e, c) in rhs.terms() {
            self.add_term(e, c);
        }
    }
}

impl AddAssign for LaurentPoly {
    fn add_assign(&mut self, rhs: LaurentPoly) {
        *self += &rhs;
    }
}

impl Neg for &LaurentPoly {
    type Output = LaurentPoly;

    fn neg(self) -> LaurentPoly {
        LaurentPoly {
            terms: self.terms.iter().map(|(&e, &c)| (e, -c)).collect(),
        }
    }
}

impl Neg for LaurentPoly {
    type Output = LaurentPoly;

    fn neg(self) -> LaurentPoly {
        -&self
    }
}

impl Sub<&LaurentPoly> for &LaurentPoly {
    type Output = LaurentPoly;

    fn sub(self, rhs: &LaurentPoly) -> LaurentPoly {
        self + &(-rhs)
    }
}

impl Sub for LaurentPoly {
    type Output = LaurentPoly;

    fn sub(self, rhs: LaurentPoly) -> LaurentPoly {
        &self - &rhs
    }
}

impl Mul<&LaurentPoly> for &LaurentPoly {
    type Output = LaurentPoly;

    fn mul(self, rhs: &LaurentPoly) -> LaurentPoly {
        let mut product = LaurentPoly::default();
        for (e1, c1) in self.terms() {
            for (e2, c2) in rhs.terms() {
                product.add_term(e1 + e2, c1 * c2);
            }
        }
        product
    }
}

impl Mul for LaurentPoly {
    type Output = LaurentPoly;

    fn mul(self, rhs: LaurentPoly) -> LaurentPoly {
        &self * &rhs
    }
}

impl MulAssign<&LaurentPoly> for LaurentPoly {
    fn mul_assign(&mut self, rhs: &LaurentPoly) {
        *self = &*self * rhs;
    }
}

impl Pow<u32> for &LaurentPoly {
    type Output = LaurentPoly;

    fn pow(self, exponent: u32) -> LaurentPoly {
        let mut result = LaurentPoly::one();
        let mut base = self.clone();
        let mut remaining = exponent;
        while remaining > 0 {
            if remaining & 1 == 1 {
                result *= &base;
            }
            remaining >>= 1;
            if remaining > 0 {
                base = &base * &base;
            }
        }
        result
    }
}

impl Pow<u32> for LaurentPoly {
    type Output = LaurentPoly;

    fn pow(self, exponent: u32) -> LaurentPoly {
        (&self).pow(exponent)
    }
}

impl Zero for LaurentPoly {
    fn zero() -> Self {
        Self::default()
    }

    fn is_zero(&self) -> bool {
        self.terms.is_empty()
    }
}

impl One for LaurentPoly {
    fn one() -> Self {
        Self::monomial(1, 0)
    }
}

impl Sum for LaurentPoly {
    fn sum<I: Iterator<Item = LaurentPoly>>(iter: I) -> Self {
        iter.fold(Self::zero(), |acc, p| acc + p)
    }
}

impl Product for LaurentPoly {
    fn product<I: Iterator<Item = LaurentPoly>>(iter: I) -> Self {
        iter.fold(Self::one(), |acc, p| acc * p)
    }
}

// =============================================================================
// TEXT FORM
// =============================================================================

/// Highest degree first: `-A^2 - A - 1`, `2*A^3 + A^-1`.
impl fmt::Display for LaurentPoly {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.terms.is_empty() {
            return f.write_str("0");
        }
        for (position, (exponent, coefficient)) in self.terms().rev().enumerate() {
            let magnitude = coefficient.unsigned_abs();
            match (position, coefficient < 0) {
                (0, true) => f.write_str("-")?,
                (0, false) => {}
                (_, true) => f.write_str(" - ")?,
                (_, false) => f.write_str(" + ")?,
            }
            match exponent {
                0 => write!(f, "{magnitude}")?,
                _ => {
                    if magnitude != 1 {
                        write!(f, "{magnitude}*")?;
                    }
                    if exponent == 1 {
                        f.write_str("A")?;
                    } else {
                        write!(f, "A^{exponent}")?;
                    }
                }
            }
        }
        Ok(())
    }
}

impl FromStr for LaurentPoly {
    type Err = YamadaError;

    /// Accepts the `Display` form plus `2A^3`, `A^(-2)` and free spacing.
    fn from_str(s: &str) -> Result<Self> {
        let compact: String = s.chars().filter(|c| !c.is_whitespace()).collect();
        if compact.is_empty() {
            return Err(YamadaError::Parse("empty polynomial".to_string()));
        }
        if compact == "0" {
            return Ok(Self::zero());
        }

        let mut pieces = Vec::new();
        let mut start = 0;
        let mut previous: Option<char> = None;
        for (i, c) in compact.char_indices() {
            let splits = (c == '+' || c == '-')
                && i > start
                && !matches!(previous, Some('^' | '('));
            if splits {
                pieces.push(&compact[start..i]);
                start = i;
            }
            previous = Some(c);
        }
        pieces.push(&compact[start..]);

        let mut poly = Self::zero();
        for piece in pieces {
            let (exponent, coefficient) = parse_term(piece)?;
            poly.add_term(exponent, coefficient);
        }
        Ok(poly)
    }
}

fn parse_term(piece: &str) -> Result<(i32, i64)> {
    let bad = || YamadaError::Parse(format!("malformed term '{piece}'"));
    let (sign, body) = match piece.as_bytes().first() {
        Some(b'-') => (-1, &piece[1..]),
        Some(b'+') => (1, &piece[1..]),
        _ => (1, piece),
    };
    if body.is_empty() {
        return Err(bad());
    }
    let Some((head, tail)) = body.split_once('A') else {
        let constant: i64 = body.parse().map_err(|_| bad())?;
        return Ok((0, sign * constant));
    };
    let head = head.strip_suffix('*').unwrap_or(head);
    let coefficient: i64 = if head.is_empty() {
        1
    } else {
        head.parse().map_err(|_| bad())?
    };
    let exponent: i32 = match tail.strip_prefix('^') {
        None if tail.is_empty() => 1,
        None => return Err(bad()),
        Some(power) => {
            let power = power
                .strip_prefix('(')
                .and_then(|p| p.strip_suffix(')'))
                .unwrap_or(power);
            power.parse().map_err(|_| bad())?
        }
    };
    Ok((exponent, sign * coefficient))
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn sigma() -> LaurentPoly {
        LaurentPoly::from_coefficients(-1, &[1, 1, 1])
    }

    #[test]
    fn zero_terms_are_dropped() {
        let p = LaurentPoly::a() - LaurentPoly::a();
        assert!(p.is_zero());
        assert_eq!(p.min_exponent(), None);
    }

    #[test]
    fn multiplication_with_negative_exponents() {
        let p = &LaurentPoly::a() * &LaurentPoly::a_inverse();
        assert_eq!(p, LaurentPoly::one());
        let square = sigma().pow(2);
        assert_eq!(square, LaurentPoly::from_coefficients(-2, &[1, 2, 3, 2, 1]));
    }

    #[test]
    fn pow_zero_is_one() {
        assert_eq!(sigma().pow(0), LaurentPoly::one());
    }

    #[test]
    fn display_highest_degree_first() {
        let unknot = LaurentPoly::from_coefficients(0, &[-1, -1, -1]);
        assert_eq!(unknot.to_string(), "-A^2 - A - 1");
        let mixed = LaurentPoly::from_terms([(-2, 3), (1, -2), (0, 1)]);
        assert_eq!(mixed.to_string(), "-2*A + 1 + 3*A^-2");
        assert_eq!(LaurentPoly::zero().to_string(), "0");
    }

    #[test]
    fn parse_accepts_display_form() {
        let p = LaurentPoly::from_terms([(-5, 1), (2, -2), (8, 1), (0, -1)]);
        let back: LaurentPoly = p.to_string().parse().expect("parse");
        assert_eq!(back, p);
    }

    #[test]
    fn parse_accepts_compact_forms() {
        let p: LaurentPoly = "A^-5+A^-4-1-2A^2+A^(8)".parse().expect("parse");
        assert_eq!(p.coefficient(-5), 1);
        assert_eq!(p.coefficient(-4), 1);
        assert_eq!(p.coefficient(0), -1);
        assert_eq!(p.coefficient(2), -2);
        assert_eq!(p.coefficient(8), 1);
    }

    #[test]
    fn parse_rejects_garbage() {
        assert!("A^x".parse::<LaurentPoly>().is_err());
        assert!("".parse::<LaurentPoly>().is_err());
        assert!("2B".parse::<LaurentPoly>().is_err());
    }

    #[test]
    fn sum_and_product_fold() {
        let total: LaurentPoly = vec![LaurentPoly::a(), LaurentPoly::one()].into_iter().sum();
        assert_eq!(total, LaurentPoly::from_coefficients(0, &[1, 1]));
        let product: LaurentPoly = vec![LaurentPoly::a(), LaurentPoly::a()].into_iter().product();
        assert_eq!(product, LaurentPoly::monomial(1, 2));
    }
}
