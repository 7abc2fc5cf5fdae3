//! Reflection and unit normalization of Yamada polynomials.
//!
//! The Yamada polynomial of a spatial graph is defined up to multiplication
//! by `(-A)^k` and the mirror substitution `A -> A^-1`. `normalize_poly`
//! picks one representative per class, so diagrams of the same spatial
//! graph compare equal.

use super::LaurentPoly;
use num_traits::Zero;

/// Substitute `A -> A^-1`.
#[must_use]
pub fn reverse_poly(p: &LaurentPoly) -> LaurentPoly {
    LaurentPoly::from_terms(p.terms().map(|(e, c)| (-e, c)))
}

/// Canonical representative of `p` under `(-A)^k` and `A -> A^-1`.
///
/// Both candidates start at exponent 0 and span the same degree range;
/// the one whose coefficient list (lowest exponent first) is
/// lexicographically smaller wins. Zero maps to zero.
#[must_use]
pub fn normalize_poly(p: &LaurentPoly) -> LaurentPoly {
    let (Some(lo), Some(hi)) = (p.min_exponent(), p.max_exponent()) else {
        return LaurentPoly::zero();
    };
    let forward = times_minus_a_power(p, -lo);
    let mirrored = times_minus_a_power(&reverse_poly(p), hi);
    let span = hi - lo;
    if forward.coefficients(0, span) <= mirrored.coefficients(0, span) {
        forward
    } else {
        mirrored
    }
}

/// `(-A)^k · p`.
fn times_minus_a_power(p: &LaurentPoly, k: i32) -> LaurentPoly {
    let sign = if k.rem_euclid(2) == 1 { -1 } else { 1 };
    p.shift(k).scale(sign)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reverse_negates_exponents() {
        let p = LaurentPoly::from_terms([(-2, 3), (5, -1)]);
        let r = reverse_poly(&p);
        assert_eq!(r.coefficient(2), 3);
        assert_eq!(r.coefficient(-5), -1);
    }

    #[test]
    fn raw_unknot_normalizes_to_reference() {
        let raw = LaurentPoly::from_coefficients(1, &[1, 1, 1]);
        assert_eq!(
            normalize_poly(&raw),
            LaurentPoly::from_coefficients(0, &[-1, -1, -1])
        );
        let circle = LaurentPoly::from_coefficients(-1, &[1, 1, 1]);
        assert_eq!(normalize_poly(&circle).to_string(), "-A^2 - A - 1");
    }

    #[test]
    fn unit_multiples_share_a_normal_form() {
        let p = LaurentPoly::from_terms([(-3, 2), (-1, -1), (4, 7)]);
        let q = p.shift(5).scale(-1);
        assert_eq!(normalize_poly(&p), normalize_poly(&q));
        assert_eq!(normalize_poly(&p), normalize_poly(&reverse_poly(&p)));
    }

    #[test]
    fn zero_stays_zero() {
        assert!(normalize_poly(&LaurentPoly::zero()).is_zero());
    }

    #[test]
    fn constants_normalize_to_themselves() {
        let one = LaurentPoly::from_coefficients(0, &[1]);
        assert_eq!(normalize_poly(&one), one);
    }
}
