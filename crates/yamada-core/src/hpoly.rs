//! # H-Polynomial Engine
//!
//! The crossing-free building block of the Yamada polynomial: a memoized
//! deletion/contraction recursion over abstract multigraphs.
//!
//! ## Recursion
//!
//! 1. The empty graph gives `1`.
//! 2. A disconnected graph gives the product over its components.
//! 3. Reuse a cached value of an isomorphic graph.
//! 4. A bridge gives `0`.
//! 5. Splice out degree-2 nodes and strip loops; each loop multiplies the
//!    result by `-(A^-1 + 1 + A)`.
//! 6. One node gives `-1`; two nodes joined by `q` edges use the closed
//!    form `-Σ_{k=1}^{q-1} (-σ)^k`; otherwise `H(G/e) + H(G-e)`.
//!
//! The cache is an explicit value. Share one across a batch of diagrams by
//! passing the same `HPolyCache` to every call.

use crate::graph::MultiGraph;
use crate::poly::LaurentPoly;
use num_traits::{One, Pow, Zero};
use std::collections::BTreeMap;

// =============================================================================
// CACHE
// =============================================================================

/// Memo table keyed by structural hash, confirmed by isomorphism.
#[derive(Debug, Clone, Default)]
pub struct HPolyCache {
    buckets: BTreeMap<u64, Vec<(MultiGraph, LaurentPoly)>>,
    hits: u64,
    misses: u64,
}

impl HPolyCache {
    /// Create an empty cache.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored graphs.
    #[must_use]
    pub fn len(&self) -> usize {
        self.buckets.values().map(Vec::len).sum()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.buckets.is_empty()
    }

    #[must_use]
    pub fn hits(&self) -> u64 {
        self.hits
    }

    #[must_use]
    pub fn misses(&self) -> u64 {
        self.misses
    }

    fn lookup(&mut self, key: u64, graph: &MultiGraph) -> Option<LaurentPoly> {
        let found = self.buckets.get(&key).and_then(|bucket| {
            bucket
                .iter()
                .find(|(stored, _)| stored.is_isomorphic(graph))
                .map(|(_, poly)| poly.clone())
        });
        if found.is_some() {
            self.hits += 1;
        } else {
            self.misses += 1;
        }
        found
    }

    fn store(&mut self, key: u64, graph: MultiGraph, poly: LaurentPoly) {
        self.buckets.entry(key).or_default().push((graph, poly));
    }
}

// =============================================================================
// RECURSION
// =============================================================================

/// `-(A^-1 + 1 + A)`: the factor of one removed loop.
#[must_use]
pub fn loop_value() -> LaurentPoly {
    -LaurentPoly::from_coefficients(-1, &[1, 1, 1])
}

/// H-polynomial of `graph` with a fresh cache.
#[must_use]
pub fn h_poly(graph: &MultiGraph) -> LaurentPoly {
    h_poly_with_cache(graph, &mut HPolyCache::new())
}

/// H-polynomial of `graph`, reading and filling `cache`.
pub fn h_poly_with_cache(graph: &MultiGraph, cache: &mut HPolyCache) -> LaurentPoly {
    if graph.is_empty() {
        return LaurentPoly::one();
    }

    let components = graph.components();
    if components.len() > 1 {
        let mut product = LaurentPoly::one();
        for component in &components {
            let factor = h_poly_with_cache(component, cache);
            if factor.is_zero() {
                return factor;
            }
            product *= &factor;
        }
        return product;
    }

    let key = graph.structural_hash();
    if let Some(known) = cache.lookup(key, graph) {
        return known;
    }
    let value = evaluate_connected(graph, cache);
    cache.store(key, graph.clone(), value.clone());
    value
}

fn evaluate_connected(graph: &MultiGraph, cache: &mut HPolyCache) -> LaurentPoly {
    if graph.has_cut_edge() {
        return LaurentPoly::zero();
    }

    let mut reduced = graph.clone();
    let mut loop_factor = LaurentPoly::one();
    loop {
        let mut changed = false;
        while let Some(node) = reduced.splice_candidate() {
            reduced.splice(node);
            changed = true;
        }
        let loops = reduced.remove_loops();
        if loops > 0 {
            loop_factor *= &loop_value().pow(loops as u32);
            changed = true;
        }
        if !changed {
            break;
        }
    }

    match reduced.node_count() {
        0 | 1 => -loop_factor,
        2 => &loop_factor * &banana(reduced.edge_count()),
        _ => {
            let contracted = h_poly_with_cache(&reduced.contract_edge(0), cache);
            let deleted = h_poly_with_cache(&reduced.delete_edge(0), cache);
            &loop_factor * &(contracted + deleted)
        }
    }
}

/// Two nodes joined by `q` parallel edges: `-Σ_{k=1}^{q-1} (-σ)^k`.
fn banana(q: usize) -> LaurentPoly {
    let step = loop_value();
    let mut power = LaurentPoly::one();
    let mut sum = LaurentPoly::zero();
    for _ in 1..q {
        power *= &step;
        sum += &power;
    }
    -sum
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
    fn empty_graph_is_one() {
        assert_eq!(h_poly(&MultiGraph::new()), LaurentPoly::one());
    }

    #[test]
    fn single_node_is_minus_one() {
        let point = MultiGraph::from_edges(1, &[]);
        assert_eq!(h_poly(&point), -LaurentPoly::one());
    }

    #[test]
    fn circle_is_sigma() {
        let circle = MultiGraph::from_edges(1, &[(0, 0)]);
        assert_eq!(h_poly(&circle), sigma());
        let subdivided = MultiGraph::from_edges(3, &[(0, 1), (1, 2), (2, 0)]);
        assert_eq!(h_poly(&subdivided), sigma());
    }

    #[test]
    fn bridge_gives_zero() {
        let dumbbell = MultiGraph::from_edges(2, &[(0, 0), (0, 1), (1, 1)]);
        assert!(h_poly(&dumbbell).is_zero());
    }

    #[test]
    fn theta_closed_form() {
        let theta = MultiGraph::from_edges(2, &[(0, 1), (0, 1), (0, 1)]);
        let expected = LaurentPoly::from_coefficients(-2, &[-1, -1, -2, -1, -1]);
        assert_eq!(h_poly(&theta), expected);
    }

    #[test]
    fn general_branch_fills_cache() {
        // Doubled triangle: three nodes after reduction.
        let graph = MultiGraph::from_edges(
            3,
            &[(0, 1), (0, 1), (1, 2), (1, 2), (2, 0), (2, 0)],
        );
        let mut cache = HPolyCache::new();
        let value = h_poly_with_cache(&graph, &mut cache);
        assert!(!value.is_zero());
        assert!(!cache.is_empty());
        let again = h_poly_with_cache(&graph, &mut cache);
        assert_eq!(value, again);
        assert!(cache.hits() > 0);
    }

    #[test]
    fn disjoint_union_multiplies() {
        let two_circles = MultiGraph::from_edges(2, &[(0, 0), (1, 1)]);
        assert_eq!(h_poly(&two_circles), &sigma() * &sigma());
    }

    #[test]
    fn isomorphic_graphs_share_cache_entries() {
        let mut cache = HPolyCache::new();
        let a = MultiGraph::from_edges(4, &[(0, 1), (1, 2), (2, 3), (3, 0), (0, 2), (1, 3)]);
        let b = MultiGraph::from_edges(4, &[(3, 2), (2, 1), (1, 0), (0, 3), (3, 1), (2, 0)]);
        let first = h_poly_with_cache(&a, &mut cache);
        let stored = cache.len();
        let second = h_poly_with_cache(&b, &mut cache);
        assert_eq!(first, second);
        assert_eq!(cache.len(), stored);
    }
}
