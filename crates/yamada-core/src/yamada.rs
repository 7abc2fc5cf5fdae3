//! # Yamada Polynomial
//!
//! State-sum expansion of a diagram into crossing-free graphs.
//!
//! Every crossing is resolved three ways:
//!
//! | Resolution   | Pairing      | Weight |
//! |--------------|--------------|--------|
//! | Vertex       | 4-valent node| `1`    |
//! | A-smoothing  | `0-1`, `2-3` | `A`    |
//! | B-smoothing  | `0-3`, `1-2` | `A^-1` |
//!
//! `Y(D) = Σ_states A^(#A - #B) · H(traced graph)`.

use crate::diagram::{Passage, SpatialGraphDiagram};
use crate::hpoly::{HPolyCache, h_poly_with_cache};
use crate::poly::{LaurentPoly, normalize_poly};
use crate::primitives::{A_SMOOTHING_PAIRING, B_SMOOTHING_PAIRING, MAX_EXPANSION_CROSSINGS};
use crate::types::{Label, Result, YamadaError};
use num_traits::{One, Zero};
use std::collections::BTreeMap;

/// How one crossing is resolved in a state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Resolution {
    Vertex,
    ASmoothing,
    BSmoothing,
}

impl Resolution {
    const ALL: [Self; 3] = [Self::Vertex, Self::ASmoothing, Self::BSmoothing];

    /// Exponent of `A` contributed by this resolution.
    #[must_use]
    pub fn weight(self) -> i32 {
        match self {
            Self::Vertex => 0,
            Self::ASmoothing => 1,
            Self::BSmoothing => -1,
        }
    }

    fn passage(self) -> Passage {
        match self {
            Self::Vertex => Passage::Node,
            Self::ASmoothing => Passage::Through(&A_SMOOTHING_PAIRING),
            Self::BSmoothing => Passage::Through(&B_SMOOTHING_PAIRING),
        }
    }

    fn next(self) -> Option<Self> {
        match self {
            Self::Vertex => Some(Self::ASmoothing),
            Self::ASmoothing => Some(Self::BSmoothing),
            Self::BSmoothing => None,
        }
    }
}

impl SpatialGraphDiagram {
    /// Raw Yamada polynomial with a fresh H-polynomial cache.
    pub fn yamada_polynomial(&self) -> Result<LaurentPoly> {
        self.yamada_polynomial_with_cache(&mut HPolyCache::new())
    }

    /// Raw Yamada polynomial, sharing `cache` with other evaluations.
    ///
    /// The expansion visits `3^n` states; more than
    /// `MAX_EXPANSION_CROSSINGS` crossings is rejected.
    pub fn yamada_polynomial_with_cache(&self, cache: &mut HPolyCache) -> Result<LaurentPoly> {
        let crossings = self.crossing_labels();
        if crossings.len() > MAX_EXPANSION_CROSSINGS {
            return Err(YamadaError::TooManyCrossings {
                count: crossings.len(),
                limit: MAX_EXPANSION_CROSSINGS,
            });
        }
        let slot_of: BTreeMap<&Label, usize> =
            crossings.iter().enumerate().map(|(i, l)| (l, i)).collect();

        let mut state = vec![Resolution::Vertex; crossings.len()];
        let mut total = LaurentPoly::zero();
        loop {
            let graph = self.trace_graph(|crossing| {
                slot_of
                    .get(crossing.label())
                    .map(|&i| state[i].passage())
                    .unwrap_or(Passage::Node)
            })?;
            let h = h_poly_with_cache(&graph, cache);
            if !h.is_zero() {
                let power: i32 = state.iter().map(|r| r.weight()).sum();
                total += &(LaurentPoly::monomial(1, power) * h);
            }
            if !advance(&mut state) {
                break;
            }
        }
        Ok(total)
    }

    /// Yamada polynomial in normal form, invariant under mirror and unit
    /// multiples.
    pub fn normalized_yamada_polynomial(&self) -> Result<LaurentPoly> {
        self.yamada_polynomial().map(|p| normalize_poly(&p))
    }

    /// Normalized polynomial, sharing `cache`.
    pub fn normalized_yamada_polynomial_with_cache(
        &self,
        cache: &mut HPolyCache,
    ) -> Result<LaurentPoly> {
        self.yamada_polynomial_with_cache(cache)
            .map(|p| normalize_poly(&p))
    }
}

/// Odometer step over `Resolution::ALL`; false once every state was seen.
fn advance(state: &mut [Resolution]) -> bool {
    for slot in state.iter_mut() {
        if let Some(next) = slot.next() {
            *slot = next;
            return true;
        }
        *slot = Resolution::ALL[0];
    }
    false
}

/// Yamada polynomial of the empty diagram.
#[must_use]
pub fn trivial_polynomial() -> LaurentPoly {
    LaurentPoly::one()
}

// =============================================================================
// TESTS
// =============================================================================
