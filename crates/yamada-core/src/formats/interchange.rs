//! # Diagram Interchange Record
//!
//! A plain serde record of a diagram: element lists plus one entry per
//! connected corner pair. Rebuilding inserts crossings, then vertices, then
//! edges, each list in record order.
//!
//! ```json
//! {
//!   "vertices": [{"label": "a", "degree": 3}],
//!   "edges": ["e0"],
//!   "crossings": ["x0"],
//!   "connections": [["e0", 0, "a", 0]]
//! }
//! ```

use crate::diagram::{BuildOptions, SpatialGraphDiagram};
use crate::element::Element;
use crate::types::{ElementKind, Label, Result, Slot, YamadaError};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// A vertex with its degree.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VertexRecord {
    pub label: Label,
    pub degree: usize,
}

/// `a[i]` joined to `b[j]`, serialized as `[a, i, b, j]`.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ConnectionRecord(pub Label, pub usize, pub Label, pub usize);

/// Serializable form of a [`SpatialGraphDiagram`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiagramRecord {
    #[serde(default)]
    pub vertices: Vec<VertexRecord>,
    #[serde(default)]
    pub edges: Vec<Label>,
    #[serde(default)]
    pub crossings: Vec<Label>,
    #[serde(default)]
    pub connections: Vec<ConnectionRecord>,
}

impl SpatialGraphDiagram {
    /// Export every element and each connected corner pair once.
    #[must_use]
    pub fn to_record(&self) -> DiagramRecord {
        let mut record = DiagramRecord::default();
        for element in self.elements() {
            match element.kind() {
                ElementKind::Vertex => record.vertices.push(VertexRecord {
                    label: element.label().clone(),
                    degree: element.degree(),
                }),
                ElementKind::Edge => record.edges.push(element.label().clone()),
                ElementKind::Crossing => record.crossings.push(element.label().clone()),
            }
            for corner in 0..element.degree() {
                let here = element.slot(corner);
                if let Some(there) = element.adjacent(corner) {
                    if here < *there {
                        record.connections.push(ConnectionRecord(
                            here.label,
                            here.index,
                            there.label.clone(),
                            there.index,
                        ));
                    }
                }
            }
        }
        record
    }

    /// Rebuild a diagram from a record.
    ///
    /// A corner may appear in at most one connection.
    pub fn from_record(record: &DiagramRecord, options: BuildOptions) -> Result<Self> {
        let mut diagram = Self::empty();
        for crossing in &record.crossings {
            diagram.add_element(Element::crossing(crossing))?;
        }
        for vertex in &record.vertices {
            diagram.add_element(Element::vertex(&vertex.label, vertex.degree)?)?;
        }
        for edge in &record.edges {
            diagram.add_element(Element::edge(edge))?;
        }

        let mut used: BTreeSet<Slot> = BTreeSet::new();
        for ConnectionRecord(a, i, b, j) in &record.connections {
            for slot in [Slot::new(a, *i), Slot::new(b, *j)] {
                if !used.insert(slot.clone()) {
                    return Err(YamadaError::InvalidInput(format!(
                        "corner {slot} is connected more than once"
                    )));
                }
            }
            diagram.connect(a.as_str(), *i, b.as_str(), *j)?;
        }
        diagram.finish(options)
    }
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn theta_record() -> DiagramRecord {
        let mut record = DiagramRecord {
            vertices: vec![
                VertexRecord {
                    label: Label::from("a"),
                    degree: 3,
                },
                VertexRecord {
                    label: Label::from("b"),
                    degree: 3,
                },
            ],
            ..DiagramRecord::default()
        };
        for i in 0..3 {
            let edge = Label::new(format!("e{i}"));
            record.edges.push(edge.clone());
            record
                .connections
                .push(ConnectionRecord(Label::from("a"), i, edge.clone(), 0));
            record
                .connections
                .push(ConnectionRecord(edge, 1, Label::from("b"), 2 - i));
        }
        record
    }

    #[test]
    fn record_rebuilds_same_diagram() {
        let diagram =
            SpatialGraphDiagram::from_record(&theta_record(), BuildOptions::default())
                .expect("build");
        let again = SpatialGraphDiagram::from_record(&diagram.to_record(), BuildOptions::raw())
            .expect("rebuild");
        assert_eq!(again.to_record(), diagram.to_record());
        assert_eq!(again.faces().expect("faces").len(), 3);
    }

    #[test]
    fn record_json_uses_positional_connections() {
        let json = r#"{"edges":["e"],"vertices":[{"label":"v","degree":2}],
                       "connections":[["e",0,"v",0],["e",1,"v",1]]}"#;
        let record: DiagramRecord = serde_json::from_str(json).expect("parse");
        assert!(record.crossings.is_empty());
        let diagram =
            SpatialGraphDiagram::from_record(&record, BuildOptions::default()).expect("build");
        assert_eq!(diagram.len(), 2);
        let out = serde_json::to_string(&diagram.to_record()).expect("serialize");
        assert!(out.contains(r#"["e",0,"v",0]"#));
    }

    #[test]
    fn corner_listed_twice_is_rejected() {
        let mut record = theta_record();
        record
            .connections
            .push(ConnectionRecord(Label::from("a"), 0, Label::from("e1"), 0));
        assert!(matches!(
            SpatialGraphDiagram::from_record(&record, BuildOptions::default()),
            Err(YamadaError::InvalidInput(_))
        ));
    }

    #[test]
    fn unknown_label_is_reported() {
        let mut record = theta_record();
        record
            .connections
            .push(ConnectionRecord(Label::from("zz"), 0, Label::from("zz"), 1));
        assert!(matches!(
            SpatialGraphDiagram::from_record(&record, BuildOptions::default()),
            Err(YamadaError::UnknownLabel(_))
        ));
    }
}
