//! # Diagram Elements
//!
//! The atomic objects of a spatial graph diagram: vertices, edges and
//! crossings. Each has a fixed degree and an anticlockwise list of corners,
//! and every corner holds the [`Slot`] of its partner (or nothing yet).
//!
//! Elements never own each other. Cross references are `(label, corner)`
//! pairs resolved through the diagram arena.

use crate::primitives::{CROSSING_DEGREE, EDGE_DEGREE};
use crate::types::{ElementKind, Label, Result, Slot, YamadaError};
use serde::{Deserialize, Serialize};

/// A vertex, edge or crossing with its corner adjacency.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawElement")]
pub struct Element {
    label: Label,
    kind: ElementKind,
    adjacent: Vec<Option<Slot>>,
}

/// Wire form of [`Element`], checked through [`Element::new`] on the way in.
#[derive(Deserialize)]
struct RawElement {
    label: Label,
    kind: ElementKind,
    adjacent: Vec<Option<Slot>>,
}

impl TryFrom<RawElement> for Element {
    type Error = YamadaError;

    fn try_from(raw: RawElement) -> Result<Self> {
        let mut element = Self::new(raw.label, raw.kind, raw.adjacent.len())?;
        element.adjacent = raw.adjacent;
        Ok(element)
    }
}

impl Element {
    /// Create an unconnected element of the given kind and degree.
    ///
    /// Edges must have degree 2, crossings degree 4, vertices at least 1.
    pub fn new(label: impl Into<Label>, kind: ElementKind, degree: usize) -> Result<Self> {
        let label = label.into();
        let valid = match kind {
            ElementKind::Vertex => degree > 0,
            ElementKind::Edge => degree == EDGE_DEGREE,
            ElementKind::Crossing => degree == CROSSING_DEGREE,
        };
        if !valid {
            return Err(YamadaError::InvalidDegree {
                label,
                kind,
                degree,
            });
        }
        Ok(Self {
            label,
            kind,
            adjacent: vec![None; degree],
        })
    }

    /// Create an unconnected vertex.
    pub fn vertex(label: impl Into<Label>, degree: usize) -> Result<Self> {
        Self::new(label, ElementKind::Vertex, degree)
    }

    /// Create an unconnected edge.
    #[must_use]
    pub fn edge(label: impl Into<Label>) -> Self {
        Self {
            label: label.into(),
            kind: ElementKind::Edge,
            adjacent: vec![None; EDGE_DEGREE],
        }
    }

    /// Create an unconnected crossing.
    #[must_use]
    pub fn crossing(label: impl Into<Label>) -> Self {
        Self {
            label: label.into(),
            kind: ElementKind::Crossing,
            adjacent: vec![None; CROSSING_DEGREE],
        }
    }

    #[must_use]
    pub fn label(&self) -> &Label {
        &self.label
    }

    #[must_use]
    pub fn kind(&self) -> ElementKind {
        self.kind
    }

    #[must_use]
    pub fn degree(&self) -> usize {
        self.adjacent.len()
    }

    #[must_use]
    pub fn is_edge(&self) -> bool {
        self.kind == ElementKind::Edge
    }

    #[must_use]
    pub fn is_crossing(&self) -> bool {
        self.kind == ElementKind::Crossing
    }

    /// Whether the element is a vertex of degree other than 2.
    ///
    /// These are the nodes of the underlying graph.
    #[must_use]
    pub fn is_graph_node(&self) -> bool {
        self.kind == ElementKind::Vertex && self.degree() != 2
    }

    /// This element's own corner `i`, reduced modulo the degree.
    ///
    /// This is the address of the corner, not its neighbor.
    #[must_use]
    pub fn slot(&self, i: usize) -> Slot {
        Slot::new(self.label.clone(), i % self.degree())
    }

    /// The partner of corner `i` (modulo the degree).
    #[must_use]
    pub fn adjacent(&self, i: usize) -> Option<&Slot> {
        self.adjacent[i % self.degree()].as_ref()
    }

    /// All corners in anticlockwise order.
    #[must_use]
    pub fn corners(&self) -> &[Option<Slot>] {
        &self.adjacent
    }

    /// The corner a strand entering at `i` leaves through.
    ///
    /// Edges and two-valent vertices pass `i` to `(i + 1) mod 2`; crossings
    /// pass straight through to `(i + 2) mod 4`. Other vertices end strands.
    #[must_use]
    pub fn opposite(&self, i: usize) -> Option<usize> {
        match (self.kind, self.degree()) {
            (ElementKind::Crossing, d) => Some((i + 2) % d),
            (_, 2) => Some((i + 1) % 2),
            _ => None,
        }
    }

    /// The partner of the corner opposite `i`: where the strand continues.
    #[must_use]
    pub fn flow(&self, i: usize) -> Option<&Slot> {
        self.opposite(i).and_then(|j| self.adjacent(j))
    }

    /// Whether any corner already connects to `other`.
    #[must_use]
    pub fn already_assigned(&self, other: &Label) -> bool {
        self.adjacent
            .iter()
            .flatten()
            .any(|slot| &slot.label == other)
    }

    pub(crate) fn check_corner(&self, corner: usize) -> Result<()> {
        if corner < self.degree() {
            Ok(())
        } else {
            Err(YamadaError::CornerOutOfRange {
                label: self.label.clone(),
                corner,
                degree: self.degree(),
            })
        }
    }

    pub(crate) fn set(&mut self, corner: usize, partner: Option<Slot>) {
        self.adjacent[corner] = partner;
    }

    /// Rotate corners so that new corner `i` is old corner `i + 1`.
    ///
    /// Returns the old adjacency for the caller to re-point partners.
    pub(crate) fn rotate_corners(&mut self) -> Vec<Option<Slot>> {
        let old = self.adjacent.clone();
        self.adjacent.rotate_left(1);
        old
    }
}

/// Symmetrically connect corner `i` of `a` with corner `j` of `b`.
///
/// Previous partners of either corner are not touched; wiring is expected
/// to happen before the elements are handed to a diagram, which validates
/// symmetry.
pub fn connect_slots(a: &mut Element, i: usize, b: &mut Element, j: usize) -> Result<()> {
    a.check_corner(i)?;
    b.check_corner(j)?;
    a.set(i, Some(b.slot(j)));
    b.set(j, Some(a.slot(i)));
    Ok(())
}

/// Connect two corners of the same element, forming a self-loop.
pub fn connect_own_slots(a: &mut Element, i: usize, j: usize) -> Result<()> {
    a.check_corner(i)?;
    a.check_corner(j)?;
    if i == j {
        return Err(YamadaError::SelfSlot(a.slot(i)));
    }
    a.set(i, Some(a.slot(j)));
    a.set(j, Some(a.slot(i)));
    Ok(())
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_zero_degree_vertex() {
        assert!(matches!(
            Element::vertex("v", 0),
            Err(YamadaError::InvalidDegree { degree: 0, .. })
        ));
    }

    #[test]
    fn rejects_edge_of_wrong_degree() {
        assert!(Element::new("e", ElementKind::Edge, 3).is_err());
        assert!(Element::new("x", ElementKind::Crossing, 2).is_err());
    }

    #[test]
    fn slot_wraps_modulo_degree() {
        let x = Element::crossing("x");
        assert_eq!(x.slot(5), Slot::new("x", 1));
    }

    #[test]
    fn connect_is_symmetric() {
        let mut e = Element::edge("e");
        let mut x = Element::crossing("x");
        connect_slots(&mut e, 1, &mut x, 3).expect("connect");
        assert_eq!(e.adjacent(1), Some(&Slot::new("x", 3)));
        assert_eq!(x.adjacent(3), Some(&Slot::new("e", 1)));
        assert!(e.already_assigned(&Label::from("x")));
        assert!(!x.already_assigned(&Label::from("y")));
    }

    #[test]
    fn deserialize_checks_degree() {
        let mut x = Element::crossing("x");
        connect_own_slots(&mut x, 0, 1).expect("loop");
        let value = serde_json::to_value(&x).expect("serialize");
        let back: Element = serde_json::from_value(value.clone()).expect("deserialize");
        assert_eq!(back, x);

        let mut cornerless = value.clone();
        cornerless["adjacent"] = serde_json::json!([]);
        assert!(serde_json::from_value::<Element>(cornerless).is_err());

        let mut short = value;
        short["adjacent"] = serde_json::json!([null, null]);
        assert!(serde_json::from_value::<Element>(short).is_err());
    }

    #[test]
    fn flow_follows_strand() {
        let mut x = Element::crossing("x");
        let mut e = Element::edge("e");
        connect_slots(&mut x, 2, &mut e, 0).expect("connect");
        assert_eq!(x.flow(0), Some(&Slot::new("e", 0)));
        assert_eq!(e.opposite(0), Some(1));
        let v = Element::vertex("v", 3).expect("vertex");
        assert_eq!(v.opposite(0), None);
    }

    #[test]
    fn own_slot_loop_rejects_same_corner() {
        let mut e = Element::edge("e");
        assert!(connect_own_slots(&mut e, 0, 0).is_err());
        connect_own_slots(&mut e, 0, 1).expect("loop");
        assert_eq!(e.adjacent(0), Some(&Slot::new("e", 1)));
    }

    #[test]
    fn corner_out_of_range_is_reported() {
        let mut a = Element::edge("a");
        let mut b = Element::edge("b");
        assert!(matches!(
            connect_slots(&mut a, 2, &mut b, 0),
            Err(YamadaError::CornerOutOfRange { corner: 2, .. })
        ));
    }
}
