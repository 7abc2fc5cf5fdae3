//! # yamada-core
//!
//! The deterministic engine for spatial graph diagrams and their Yamada
//! polynomial.
//!
//! The crate covers:
//! - The diagram arena (vertices, edges, crossings wired by `(label, corner)`
//!   slots) with correction, simplification and face tracing
//! - The memoized H-polynomial recursion over abstract multigraphs
//! - The state-sum Yamada polynomial and its normal form
//! - Reidemeister moves R1/R2/R3, R6 detection and the simplification driver
//! - Crossing assignments, enumeration dedup and crossing-change distance
//! - Interchange records, PD codes and plantri `planar_code` input
//!
//! ## Architectural Constraints
//!
//! - Pure Rust: NO async, NO I/O, NO logging
//! - Ordered collections only; every run produces the same labels,
//!   warnings and polynomials
//! - Caches are explicit values, never globals
//! - Moves never mutate their input; they return a validated copy

// =============================================================================
// MODULES
// =============================================================================

pub mod diagram;
pub mod distance;
pub mod element;
pub mod enumeration;
pub mod formats;
pub mod graph;
pub mod hpoly;
pub mod poly;
pub mod primitives;
pub mod reidemeister;
pub mod types;
pub mod yamada;

// =============================================================================
// RE-EXPORTS: Core Types (from types module)
// =============================================================================

pub use types::{
    DiagramWarning, ElementKind, EntryPoint, Face, Label, MoveKind, Result, Slot, YamadaError,
};

// =============================================================================
// RE-EXPORTS: Diagram Engine
// =============================================================================

pub use diagram::{BuildOptions, SpatialGraphDiagram};
pub use element::{Element, connect_own_slots, connect_slots};
pub use graph::{MultiGraph, NodeId};
pub use hpoly::{HPolyCache, h_poly, h_poly_with_cache, loop_value};
pub use poly::{LaurentPoly, normalize_poly, reverse_poly};
pub use yamada::{Resolution, trivial_polynomial};

// =============================================================================
// RE-EXPORTS: Moves, Enumeration, Distance
// =============================================================================

pub use distance::{DistanceResult, crossing_change_distance};
pub use enumeration::{
    Classifier, CrossingAssignments, EnumerationOptions, EnumerationReport, Rejection, Verdict,
    classify_candidates, crossing_assignments,
};
pub use reidemeister::{
    R3Move, R3Strategy, SimplifyOptions, SimplifyOutcome, StrandEnd, apply_r1, apply_r2,
    apply_r3, has_r1, has_r2, has_r3, has_r6, reidemeister_simplify, reidemeister_simplify_with,
    strand_end,
};

// =============================================================================
// RE-EXPORTS: Formats (from formats module)
// =============================================================================

pub use formats::{
    ConnectionRecord, DiagramRecord, PlanarMap, VertexRecord, from_pd_code, parse_pd_code,
    read_planar_code,
};
