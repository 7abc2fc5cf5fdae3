//! Simplification driver: monotone R1/R2 reduction with exploratory R3.

use super::{apply_r1, apply_r2, apply_r3, has_r1, has_r2, has_r3};
use crate::diagram::SpatialGraphDiagram;
use crate::primitives::{DEFAULT_R3_TRIES, MAX_MONOTONE_ITERATIONS};
use crate::types::{Result, YamadaError};

#[cfg(feature = "random-moves")]
use rand::{Rng, SeedableRng, rngs::StdRng};

/// How an R3 descriptor is chosen when several are available.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum R3Strategy {
    /// Try `i mod len` on the `i`-th attempt.
    #[default]
    RoundRobin,
    /// Uniform choice from a seeded generator.
    #[cfg(feature = "random-moves")]
    Random { seed: u64 },
}

/// Knobs of `reidemeister_simplify_with`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SimplifyOptions {
    /// Upper bound on exploratory R3 moves.
    pub n_tries: usize,
    pub strategy: R3Strategy,
}

impl Default for SimplifyOptions {
    fn default() -> Self {
        Self {
            n_tries: DEFAULT_R3_TRIES,
            strategy: R3Strategy::RoundRobin,
        }
    }
}

/// Result of a simplification run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SimplifyOutcome {
    pub diagram: SpatialGraphDiagram,
    pub r1: usize,
    pub r2: usize,
    pub r3: usize,
}

impl SimplifyOutcome {
    /// Total moves applied.
    #[must_use]
    pub fn moves(&self) -> usize {
        self.r1 + self.r2 + self.r3
    }
}

enum Picker {
    RoundRobin,
    #[cfg(feature = "random-moves")]
    Random(StdRng),
}

impl Picker {
    fn new(strategy: R3Strategy) -> Self {
        match strategy {
            R3Strategy::RoundRobin => Self::RoundRobin,
            #[cfg(feature = "random-moves")]
            R3Strategy::Random { seed } => Self::Random(StdRng::seed_from_u64(seed)),
        }
    }

    fn pick(&mut self, attempt: usize, len: usize) -> usize {
        match self {
            Self::RoundRobin => attempt % len,
            #[cfg(feature = "random-moves")]
            Self::Random(rng) => rng.gen_range(0..len),
        }
    }
}

/// Simplify with round-robin R3 selection.
pub fn reidemeister_simplify(
    diagram: &SpatialGraphDiagram,
    n_tries: usize,
) -> Result<SimplifyOutcome> {
    reidemeister_simplify_with(
        diagram,
        &SimplifyOptions {
            n_tries,
            ..SimplifyOptions::default()
        },
    )
}

/// Best-effort crossing reduction.
///
/// Applies R1 (preferred) and R2 until neither is available, then up to
/// `n_tries` times applies one R3 move followed by another monotone pass.
/// Stops early once no R3 move exists. The input is never modified.
pub fn reidemeister_simplify_with(
    diagram: &SpatialGraphDiagram,
    options: &SimplifyOptions,
) -> Result<SimplifyOutcome> {
    let mut outcome = SimplifyOutcome {
        diagram: diagram.normalized_copy()?,
        r1: 0,
        r2: 0,
        r3: 0,
    };
    monotone_pass(&mut outcome)?;

    let mut picker = Picker::new(options.strategy);
    for attempt in 0..options.n_tries {
        let candidates = has_r3(&outcome.diagram)?;
        if candidates.is_empty() {
            break;
        }
        let chosen = &candidates[picker.pick(attempt, candidates.len())];
        outcome.diagram = apply_r3(&outcome.diagram, chosen)?;
        outcome.r3 += 1;
        monotone_pass(&mut outcome)?;
    }
    Ok(outcome)
}

fn monotone_pass(outcome: &mut SimplifyOutcome) -> Result<()> {
    for _ in 0..MAX_MONOTONE_ITERATIONS {
        if let Some(crossing) = has_r1(&outcome.diagram)?.first() {
            outcome.diagram = apply_r1(&outcome.diagram, crossing.as_str())?;
            outcome.r1 += 1;
        } else if let Some((a, b)) = has_r2(&outcome.diagram)?.first() {
            outcome.diagram = apply_r2(&outcome.diagram, (a.as_str(), b.as_str()))?;
            outcome.r2 += 1;
        } else {
            return Ok(());
        }
    }
    Err(YamadaError::IterationLimit {
        context: "monotone R1/R2 pass",
        limit: MAX_MONOTONE_ITERATIONS,
    })
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::diagram::BuildOptions;
    use crate::element::Element;

    fn double_kink() -> SpatialGraphDiagram {
        // Two infinity kinks chained into one circle.
        let mut d = SpatialGraphDiagram::empty();
        d.add_element(Element::crossing("x")).expect("x");
        d.add_element(Element::crossing("y")).expect("y");
        d.add_edge("e1", "x", 0, "x", 1).expect("e1");
        d.add_edge("e2", "y", 0, "y", 1).expect("e2");
        d.add_edge("e3", "x", 2, "y", 3).expect("e3");
        d.add_edge("e4", "y", 2, "x", 3).expect("e4");
        d.finish(BuildOptions::default()).expect("finish")
    }

    #[test]
    fn kinks_are_removed_by_r1() {
        let d = double_kink();
        let before = d.normalized_yamada_polynomial().expect("poly");
        let outcome = reidemeister_simplify(&d, 5).expect("simplify");
        assert_eq!(outcome.r1, 2);
        assert_eq!(outcome.r2, 0);
        assert_eq!(outcome.diagram.crossing_count(), 0);
        assert_eq!(outcome.moves(), 2);
        assert_eq!(
            outcome.diagram.normalized_yamada_polynomial().expect("poly"),
            before
        );
    }

    #[test]
    fn zero_tries_still_runs_monotone_pass() {
        let outcome = reidemeister_simplify(&double_kink(), 0).expect("simplify");
        assert_eq!(outcome.r3, 0);
        assert_eq!(outcome.diagram.crossing_count(), 0);
    }

    #[test]
    fn default_strategy_is_round_robin() {
        let options = SimplifyOptions::default();
        assert_eq!(options.strategy, R3Strategy::RoundRobin);
        assert_eq!(options.n_tries, DEFAULT_R3_TRIES);
        let mut picker = Picker::new(options.strategy);
        assert_eq!(picker.pick(7, 3), 1);
    }

    #[cfg(feature = "random-moves")]
    #[test]
    fn seeded_picker_is_reproducible() {
        let mut a = Picker::new(R3Strategy::Random { seed: 42 });
        let mut b = Picker::new(R3Strategy::Random { seed: 42 });
        let first: Vec<usize> = (0..16).map(|i| a.pick(i, 5)).collect();
        let second: Vec<usize> = (0..16).map(|i| b.pick(i, 5)).collect();
        assert_eq!(first, second);
        assert!(first.iter().all(|&k| k < 5));
    }
}
