//! # Core Type Definitions
//!
//! Shared identifiers and result types for the diagram engine:
//! - Labels and half-edge addressing (`Label`, `Slot`, `EntryPoint`)
//! - Element variants (`ElementKind`) and move kinds (`MoveKind`)
//! - Non-fatal repair notes (`DiagramWarning`)
//! - Error types (`YamadaError`)
//!
//! ## Determinism Guarantees
//!
//! Every identifier implements `Ord`, so collections keyed by them iterate
//! in the same order on every run.

use serde::{Deserialize, Serialize};
use std::borrow::Borrow;
use std::fmt;
use thiserror::Error;

// =============================================================================
// LABELS & SLOTS
// =============================================================================

/// Stable identity of a diagram element.
///
/// Labels are unique across vertices, edges and crossings of one diagram.
/// Move algorithms refer to elements only through their label.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Label(pub String);

impl Label {
    /// Create a new label from a string.
    #[must_use]
    pub fn new(s: impl Into<String>) -> Self {
        Self(s.into())
    }

    /// Get the label as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Label {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for Label {
    fn from(s: &str) -> Self {
        Self(s.to_owned())
    }
}

impl From<String> for Label {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl From<&Label> for Label {
    fn from(label: &Label) -> Self {
        label.clone()
    }
}

impl Borrow<str> for Label {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl AsRef<str> for Label {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// One corner of one element: the half-edge primitive.
///
/// A connected slot always has a partner that points back at it.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Slot {
    /// Element owning the corner.
    pub label: Label,
    /// Corner index, `0..degree`.
    pub index: usize,
}

impl Slot {
    /// Create a new slot.
    #[must_use]
    pub fn new(label: impl Into<Label>, index: usize) -> Self {
        Self {
            label: label.into(),
            index,
        }
    }
}

impl fmt::Display for Slot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}[{}]", self.label, self.index)
    }
}

/// A corner from which a face is entered.
///
/// Faces are cyclic sequences of entry points.
pub type EntryPoint = Slot;

/// A face of the diagram, in tracing order.
pub type Face = Vec<EntryPoint>;

// =============================================================================
// ELEMENT & MOVE KINDS
// =============================================================================

/// The closed set of diagram element variants.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum ElementKind {
    /// Graph node of arbitrary positive degree.
    Vertex,
    /// Un-crossed strand, degree 2.
    Edge,
    /// Four-valent crossing; corners 0 and 2 under, 1 and 3 over.
    Crossing,
}

impl fmt::Display for ElementKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Vertex => f.write_str("vertex"),
            Self::Edge => f.write_str("edge"),
            Self::Crossing => f.write_str("crossing"),
        }
    }
}

/// Local diagram moves known to the engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum MoveKind {
    R1,
    R2,
    R3,
}

impl fmt::Display for MoveKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::R1 => f.write_str("R1"),
            Self::R2 => f.write_str("R2"),
            Self::R3 => f.write_str("R3"),
        }
    }
}

// =============================================================================
// WARNINGS
// =============================================================================

/// A repair performed while correcting an incomplete diagram.
///
/// Warnings are non-fatal; the diagram stays usable.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum DiagramWarning {
    /// Two edge ends met directly; a two-valent vertex was inserted.
    MissingTwoValentVertex { first: Slot, second: Slot },
    /// Two non-edge corners met directly; an edge was inserted.
    MissingEdge { first: Slot, second: Slot },
    /// The diagram holds no elements.
    EmptyDiagram,
}

impl fmt::Display for DiagramWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingTwoValentVertex { first, second } => write!(
                f,
                "Edges {first} and {second} should be connected by a two-valent vertex."
            ),
            Self::MissingEdge { first, second } => write!(
                f,
                "Vertices {first} and {second} should be connected by an edge."
            ),
            Self::EmptyDiagram => f.write_str("Diagram is empty; it represents the trivial diagram."),
        }
    }
}

// =============================================================================
// ERROR TYPES
// =============================================================================

/// Errors that can occur in the diagram engine.
///
/// - Structural violations are fatal for the current operation
/// - Use `Result<T, YamadaError>` for fallible operations
/// - The engine never panics on bad input
#[derive(Debug, Error)]
pub enum YamadaError {
    /// An element was built with a degree its kind does not allow.
    #[error("Invalid degree {degree} for {kind} {label}")]
    InvalidDegree {
        label: Label,
        kind: ElementKind,
        degree: usize,
    },

    /// Two elements share a label.
    #[error("Duplicate label: {0}")]
    DuplicateLabel(Label),

    /// A label does not name a live element.
    #[error("Unknown label: {0}")]
    UnknownLabel(Label),

    /// A corner index exceeds the element's degree.
    #[error("Corner {corner} out of range for {label} (degree {degree})")]
    CornerOutOfRange {
        label: Label,
        corner: usize,
        degree: usize,
    },

    /// A corner has no partner.
    #[error("Corner {0} is not connected")]
    UnconnectedCorner(Slot),

    /// A corner's partner does not point back at it.
    #[error("Corner {slot} points at {partner}, which does not point back")]
    AsymmetricSlot { slot: Slot, partner: Slot },

    /// A corner was asked to connect to itself.
    #[error("Corner {0} cannot be connected to itself")]
    SelfSlot(Slot),

    /// Face tracing did not return to its start within the corner bound.
    #[error("Face starting at {start} did not close within {bound} corners")]
    FaceNotClosed { start: EntryPoint, bound: usize },

    /// A move was applied where its local configuration is absent.
    #[error("{kind} move not applicable: {detail}")]
    MoveNotApplicable { kind: MoveKind, detail: String },

    /// A bounded loop hit its hard cap.
    #[error("Iteration limit of {limit} exceeded in {context}")]
    IterationLimit { context: &'static str, limit: usize },

    /// A diagram has more crossings than an exhaustive expansion supports.
    #[error("Too many crossings: {count} (limit {limit})")]
    TooManyCrossings { count: usize, limit: usize },

    /// Text input could not be parsed.
    #[error("Parse error: {0}")]
    Parse(String),

    /// Structured input is inconsistent.
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// An I/O error occurred at the application boundary.
    #[error("I/O error: {0}")]
    IoError(String),
}

/// Result alias for engine operations.
pub type Result<T> = std::result::Result<T, YamadaError>;

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn slot_display_uses_bracket_form() {
        assert_eq!(Slot::new("e1", 0).to_string(), "e1[0]");
    }

    #[test]
    fn two_valent_warning_text() {
        let warning = DiagramWarning::MissingTwoValentVertex {
            first: Slot::new("e1", 1),
            second: Slot::new("e2", 0),
        };
        assert_eq!(
            warning.to_string(),
            "Edges e1[1] and e2[0] should be connected by a two-valent vertex."
        );
    }

    #[test]
    fn labels_order_lexicographically() {
        let mut labels = vec![Label::from("e2"), Label::from("a"), Label::from("e10")];
        labels.sort();
        assert_eq!(labels, vec![Label::from("a"), Label::from("e10"), Label::from("e2")]);
    }

    #[test]
    fn label_serializes_as_plain_string() {
        let json = serde_json::to_string(&Label::from("x0")).expect("serialize");
        assert_eq!(json, "\"x0\"");
    }
}
