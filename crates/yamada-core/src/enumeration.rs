//! # Enumeration
//!
//! Crossing assignments of a shadow and deduplication of candidate
//! diagrams by normalized Yamada polynomial.
//!
//! Generation of shadows is external; this module only filters and
//! classifies what it is given. One `HPolyCache` is shared by every
//! candidate of a run.

use crate::diagram::SpatialGraphDiagram;
use crate::graph::MultiGraph;
use crate::hpoly::HPolyCache;
use crate::poly::LaurentPoly;
use crate::primitives::MAX_ASSIGNMENT_CROSSINGS;
use crate::reidemeister::{has_r1, has_r2, has_r6};
use crate::types::{Label, Result, YamadaError};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

// =============================================================================
// CROSSING ASSIGNMENTS
// =============================================================================

/// Iterator over over/under assignments of a shadow.
///
/// Assignment `k` flips the crossings whose bit is set in `k`. With
/// `mirror_reduced` the first crossing is never flipped, halving the run;
/// the global mirror has the same normalized polynomial.
#[derive(Debug, Clone)]
pub struct CrossingAssignments {
    shadow: SpatialGraphDiagram,
    free: Vec<Label>,
    next: u64,
    end: u64,
}

impl CrossingAssignments {
    /// Number of assignments still to come.
    #[must_use]
    pub fn remaining(&self) -> u64 {
        self.end - self.next
    }
}

impl Iterator for CrossingAssignments {
    type Item = Result<SpatialGraphDiagram>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.next >= self.end {
            return None;
        }
        let mask = self.next;
        self.next += 1;
        let mut diagram = self.shadow.copy();
        for (bit, label) in self.free.iter().enumerate() {
            if mask & (1 << bit) != 0 {
                if let Err(e) = diagram.flip_crossing(label.as_str()) {
                    return Some(Err(e));
                }
            }
        }
        Some(Ok(diagram))
    }
}

/// All assignments of `shadow`: `2^(n-1)` when `mirror_reduced`, else `2^n`.
pub fn crossing_assignments(
    shadow: &SpatialGraphDiagram,
    mirror_reduced: bool,
) -> Result<CrossingAssignments> {
    let labels = shadow.crossing_labels();
    if labels.len() > MAX_ASSIGNMENT_CROSSINGS {
        return Err(YamadaError::TooManyCrossings {
            count: labels.len(),
            limit: MAX_ASSIGNMENT_CROSSINGS,
        });
    }
    let skip = usize::from(mirror_reduced && !labels.is_empty());
    let free: Vec<Label> = labels.into_iter().skip(skip).collect();
    Ok(CrossingAssignments {
        shadow: shadow.copy(),
        end: 1u64 << free.len(),
        free,
        next: 0,
    })
}

// =============================================================================
// CLASSIFICATION
// =============================================================================

/// Filters applied before a candidate is classified.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EnumerationOptions {
    /// Required crossing count.
    pub crossings: usize,
    /// Also reject candidates with an R6 configuration.
    pub reject_r6: bool,
}

/// Why a candidate was dropped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Rejection {
    CrossingCount,
    GraphMismatch,
    HasR1,
    HasR2,
    HasR6,
}

impl fmt::Display for Rejection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            Self::CrossingCount => "wrong crossing count",
            Self::GraphMismatch => "underlying graph differs",
            Self::HasR1 => "R1 reducible",
            Self::HasR2 => "R2 reducible",
            Self::HasR6 => "R6 configuration",
        };
        f.write_str(text)
    }
}

/// Outcome of one candidate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Verdict {
    /// First representative of its polynomial.
    New(LaurentPoly),
    /// Polynomial already seen.
    Duplicate(LaurentPoly),
    Rejected(Rejection),
}

/// Summary of a classification run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EnumerationReport {
    /// One representative per normalized polynomial.
    pub classes: BTreeMap<LaurentPoly, SpatialGraphDiagram>,
    /// Candidates seen.
    pub examined: usize,
    /// Candidates that passed every filter, duplicates included.
    pub accepted: usize,
    /// Dropped candidates by reason.
    pub rejected: BTreeMap<Rejection, usize>,
}

impl EnumerationReport {
    #[must_use]
    pub fn rejected_total(&self) -> usize {
        self.rejected.values().sum()
    }
}

/// Incremental classifier for a stream of candidates.
#[derive(Debug)]
pub struct Classifier {
    target: MultiGraph,
    options: EnumerationOptions,
    cache: HPolyCache,
    report: EnumerationReport,
}

impl Classifier {
    #[must_use]
    pub fn new(target: MultiGraph, options: EnumerationOptions) -> Self {
        Self {
            target,
            options,
            cache: HPolyCache::new(),
            report: EnumerationReport::default(),
        }
    }

    /// Filter and classify one candidate.
    pub fn examine(&mut self, candidate: SpatialGraphDiagram) -> Result<Verdict> {
        self.report.examined += 1;
        if let Some(reason) = self.screen(&candidate)? {
            *self.report.rejected.entry(reason).or_default() += 1;
            return Ok(Verdict::Rejected(reason));
        }
        self.report.accepted += 1;
        let poly = candidate.normalized_yamada_polynomial_with_cache(&mut self.cache)?;
        if self.report.classes.contains_key(&poly) {
            return Ok(Verdict::Duplicate(poly));
        }
        self.report.classes.insert(poly.clone(), candidate);
        Ok(Verdict::New(poly))
    }

    fn screen(&self, candidate: &SpatialGraphDiagram) -> Result<Option<Rejection>> {
        if candidate.crossing_count() != self.options.crossings {
            return Ok(Some(Rejection::CrossingCount));
        }
        if !candidate.underlying_graph()?.is_isomorphic(&self.target) {
            return Ok(Some(Rejection::GraphMismatch));
        }
        if !has_r1(candidate)?.is_empty() {
            return Ok(Some(Rejection::HasR1));
        }
        if !has_r2(candidate)?.is_empty() {
            return Ok(Some(Rejection::HasR2));
        }
        if self.options.reject_r6 && !has_r6(candidate)?.is_empty() {
            return Ok(Some(Rejection::HasR6));
        }
        Ok(None)
    }

    /// Cache shared by the run so far.
    #[must_use]
    pub fn cache(&self) -> &HPolyCache {
        &self.cache
    }

    #[must_use]
    pub fn finish(self) -> EnumerationReport {
        self.report
    }
}

/// Classify a batch of candidates against `target`.
pub fn classify_candidates<I>(
    candidates: I,
    target: &MultiGraph,
    options: EnumerationOptions,
) -> Result<EnumerationReport>
where
    I: IntoIterator<Item = SpatialGraphDiagram>,
{
    let mut classifier = Classifier::new(target.clone(), options);
    for candidate in candidates {
        classifier.examine(candidate)?;
    }
    Ok(classifier.finish())
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::formats::from_pd_code;

    fn trefoil() -> SpatialGraphDiagram {
        from_pd_code(&[[1, 5, 2, 4], [3, 1, 4, 6], [5, 3, 6, 2]]).expect("trefoil")
    }

    fn circle() -> MultiGraph {
        MultiGraph::from_edges(1, &[(0, 0)])
    }

    #[test]
    fn assignments_fix_first_crossing() {
        let all: Vec<_> = crossing_assignments(&trefoil(), true)
            .expect("assignments")
            .collect::<Result<_>>()
            .expect("flip");
        assert_eq!(all.len(), 4);
        assert_eq!(all[0], trefoil());
        let full = crossing_assignments(&trefoil(), false).expect("assignments");
        assert_eq!(full.remaining(), 8);
    }

    #[test]
    fn trefoil_assignments_split_into_classes() {
        let candidates = crossing_assignments(&trefoil(), true)
            .expect("assignments")
            .collect::<Result<Vec<_>>>()
            .expect("flip");
        let options = EnumerationOptions {
            crossings: 3,
            reject_r6: true,
        };
        let report = classify_candidates(candidates, &circle(), options).expect("classify");
        assert_eq!(report.examined, 4);
        // Every non-alternating assignment has a bigon.
        assert_eq!(report.accepted, 1);
        assert_eq!(report.rejected.get(&Rejection::HasR2), Some(&3));
        assert_eq!(report.classes.len(), 1);
    }

    #[test]
    fn wrong_graph_is_rejected() {
        let mut classifier = Classifier::new(
            MultiGraph::from_edges(2, &[(0, 1), (0, 1), (0, 1)]),
            EnumerationOptions {
                crossings: 3,
                reject_r6: false,
            },
        );
        let verdict = classifier.examine(trefoil()).expect("examine");
        assert_eq!(verdict, Verdict::Rejected(Rejection::GraphMismatch));
        let verdict = classifier.examine(SpatialGraphDiagram::empty()).expect("examine");
        assert_eq!(verdict, Verdict::Rejected(Rejection::CrossingCount));
        let report = classifier.finish();
        assert_eq!(report.rejected_total(), 2);
        assert!(report.classes.is_empty());
    }

    #[test]
    fn repeated_candidate_is_duplicate() {
        let mut classifier = Classifier::new(
            circle(),
            EnumerationOptions {
                crossings: 3,
                reject_r6: false,
            },
        );
        assert!(matches!(classifier.examine(trefoil()).expect("first"), Verdict::New(_)));
        assert!(matches!(
            classifier.examine(trefoil()).expect("second"),
            Verdict::Duplicate(_)
        ));
        assert!(classifier.cache().hits() > 0);
    }
}
