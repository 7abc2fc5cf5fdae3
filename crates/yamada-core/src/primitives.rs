//! # Engine Primitives
//!
//! Fixed conventions and hard limits of the diagram engine.
//!
//! These are compiled in; callers can only choose values below the caps.

// =============================================================================
// CROSSING CONVENTION
// =============================================================================

/// Degree of every crossing.
pub const CROSSING_DEGREE: usize = 4;

/// Degree of every edge.
pub const EDGE_DEGREE: usize = 2;

/// Corner pairing of a crossing read as a straight pass-through.
///
/// Corner `i` continues at `UNDERLYING_PAIRING[i]`, i.e. `(i + 2) mod 4`.
pub const UNDERLYING_PAIRING: [usize; 4] = [2, 3, 0, 1];

/// Corner pairing of the A-smoothing: joins `0-1` and `2-3`.
pub const A_SMOOTHING_PAIRING: [usize; 4] = [1, 0, 3, 2];

/// Corner pairing of the B-smoothing: joins `0-3` and `1-2`.
pub const B_SMOOTHING_PAIRING: [usize; 4] = [3, 2, 1, 0];

// =============================================================================
// ITERATION LIMITS
// =============================================================================

/// Hard cap on the monotone R1/R2 pass.
///
/// Each step removes at least one crossing, so a well-formed diagram never
/// reaches it.
pub const MAX_MONOTONE_ITERATIONS: usize = 10_000;

/// Hard cap on strand walks through two-valent elements.
pub const MAX_STRAND_LENGTH: usize = 100_000;

/// Hard cap on normal-form rewriting steps after an edit.
pub const MAX_SIMPLIFY_STEPS: usize = 1_000_000;

/// Largest crossing count accepted by the state-sum expansion (3^n states).
pub const MAX_EXPANSION_CROSSINGS: usize = 24;

/// Largest crossing count accepted by exhaustive crossing assignment.
pub const MAX_ASSIGNMENT_CROSSINGS: usize = 40;

/// Largest number of parallel-edge pairings tried while decoding a planar map.
pub const MAX_PAIRING_CANDIDATES: usize = 100_000;

// =============================================================================
// DEFAULTS
// =============================================================================

/// Default number of exploratory R3 moves in `reidemeister_simplify`.
pub const DEFAULT_R3_TRIES: usize = 20;

/// Default bound on crossing flips in the distance search.
pub const DEFAULT_MAX_FLIPS: usize = 3;

/// Refinement rounds of the structural graph hash.
///
/// Three rounds separate all multigraphs the evaluator meets in practice;
/// collisions are resolved by a full isomorphism check.
pub const STRUCTURAL_HASH_ROUNDS: usize = 3;

// =============================================================================
// LABEL PREFIXES
// =============================================================================

/// Prefix of synthesized two-valent vertices.
pub const VERTEX_PREFIX: &str = "v";

/// Prefix of synthesized edges.
pub const EDGE_PREFIX: &str = "e";

/// Prefix of crossings created by the planar-map and PD readers.
pub const CROSSING_PREFIX: &str = "x";
