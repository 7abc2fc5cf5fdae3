//! # Reidemeister Move Engine
//!
//! Detection and application of R1, R2 and R3 moves, R6 detection for
//! enumeration filtering, and the simplification driver.
//!
//! ## Contract
//!
//! - `has_*` queries read the diagram and report candidates; they never fail
//!   on a well-formed diagram with no candidates.
//! - `apply_*` never mutates its input. It works on a corrected,
//!   simplified copy and returns that copy, validated.
//! - Crossing labels survive every move; edge labels may not.

mod moves;
mod simplify;

pub use moves::{apply_r1, apply_r2, apply_r3, has_r1, has_r2, has_r3, has_r6};
pub use simplify::{
    R3Strategy, SimplifyOptions, SimplifyOutcome, reidemeister_simplify,
    reidemeister_simplify_with,
};

use crate::diagram::SpatialGraphDiagram;
use crate::primitives::MAX_STRAND_LENGTH;
use crate::types::{Face, Label, Result, Slot, YamadaError};
use serde::{Deserialize, Serialize};
use std::fmt;

/// One R3 opportunity inside a triangular face.
///
/// Slots are the face's entry corners. The moving strand runs between the
/// two `moving` crossings and slides across `stationary`.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub struct R3Move {
    pub stationary: Slot,
    pub moving: [Slot; 2],
}

impl fmt::Display for R3Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} over {} and {}",
            self.stationary, self.moving[0], self.moving[1]
        )
    }
}

/// Where a strand leaving a corner first meets an element of degree other
/// than 2.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StrandEnd {
    /// Corner of the element that ends the strand.
    pub end: Slot,
    /// Edges and two-valent vertices passed on the way, in order.
    pub interior: Vec<Label>,
}

/// Follow the strand that leaves `from` through degree-2 elements.
pub fn strand_end(diagram: &SpatialGraphDiagram, from: &Slot) -> Result<StrandEnd> {
    let mut current = diagram.neighbor(from.label.as_str(), from.index)?;
    let mut interior = Vec::new();
    while diagram.degree_of(current.label.as_str())? == 2 {
        if interior.len() >= MAX_STRAND_LENGTH {
            return Err(YamadaError::IterationLimit {
                context: "strand walk",
                limit: MAX_STRAND_LENGTH,
            });
        }
        interior.push(current.label.clone());
        current = diagram.neighbor(current.label.as_str(), 1 - current.index)?;
    }
    Ok(StrandEnd {
        end: current,
        interior,
    })
}

/// A face with its degree-2 entries dropped.
pub(crate) fn stripped_face(diagram: &SpatialGraphDiagram, face: &Face) -> Result<Vec<Slot>> {
    let mut kept = Vec::new();
    for entry in face {
        if diagram.degree_of(entry.label.as_str())? != 2 {
            kept.push(entry.clone());
        }
    }
    Ok(kept)
}

/// Every face of `diagram`, stripped.
pub(crate) fn stripped_faces(diagram: &SpatialGraphDiagram) -> Result<Vec<Vec<Slot>>> {
    diagram
        .faces()?
        .iter()
        .map(|face| stripped_face(diagram, face))
        .collect()
}
