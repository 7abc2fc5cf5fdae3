//! # Crossing-Change Distance
//!
//! Smallest set of crossing flips taking a diagram to a given normalized
//! Yamada polynomial. Subsets are tried by increasing size, then in
//! lexicographic order of crossing position, each on its own copy.

use crate::diagram::SpatialGraphDiagram;
use crate::hpoly::HPolyCache;
use crate::types::{Label, Result};

/// A successful search.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DistanceResult {
    /// Crossings flipped, in insertion order.
    pub flips: Vec<Label>,
    /// The diagram after flipping.
    pub diagram: SpatialGraphDiagram,
}

impl DistanceResult {
    #[must_use]
    pub fn distance(&self) -> usize {
        self.flips.len()
    }
}

/// Search up to `max_flips` flips for the normalized polynomial of `target`.
///
/// `None` when no subset of that size matches.
pub fn crossing_change_distance(
    diagram: &SpatialGraphDiagram,
    target: &SpatialGraphDiagram,
    max_flips: usize,
) -> Result<Option<DistanceResult>> {
    let mut cache = HPolyCache::new();
    let wanted = target.normalized_yamada_polynomial_with_cache(&mut cache)?;
    let labels = diagram.crossing_labels();
    for size in 0..=max_flips.min(labels.len()) {
        let mut picked: Vec<usize> = (0..size).collect();
        loop {
            let mut candidate = diagram.copy();
            for &i in &picked {
                candidate.flip_crossing(labels[i].as_str())?;
            }
            if candidate.normalized_yamada_polynomial_with_cache(&mut cache)? == wanted {
                return Ok(Some(DistanceResult {
                    flips: picked.iter().map(|&i| labels[i].clone()).collect(),
                    diagram: candidate,
                }));
            }
            if !next_combination(&mut picked, labels.len()) {
                break;
            }
        }
    }
    Ok(None)
}

/// Advance `picked` to the next `k`-subset of `0..n`.
fn next_combination(picked: &mut [usize], n: usize) -> bool {
    let k = picked.len();
    for i in (0..k).rev() {
        if picked[i] < n - k + i {
            picked[i] += 1;
            for j in i + 1..k {
                picked[j] = picked[j - 1] + 1;
            }
            return true;
        }
    }
    false
}

// =============================================================================
// TESTS
// =============================================================================
