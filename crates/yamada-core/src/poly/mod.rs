//! # Polynomials
//!
//! The Laurent polynomial value type and the canonical form used to compare
//! Yamada polynomials up to `±A^k` and `A -> A^-1`.

mod laurent;
mod normalize;

pub use laurent::LaurentPoly;
pub use normalize::{normalize_poly, reverse_poly};
