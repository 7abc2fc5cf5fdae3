//! # PD Code Reader
//!
//! Knot and link diagrams from planar-diagram codes. Each 4-tuple is one
//! crossing, listed anticlockwise from the incoming under-strand, so tuple
//! position is crossing corner. Every arc label occurs exactly twice and
//! becomes an edge `e{arc}`; crossings are `x{n}` in tuple order.

use crate::diagram::{BuildOptions, SpatialGraphDiagram};
use crate::element::Element;
use crate::primitives::{CROSSING_PREFIX, EDGE_PREFIX};
use crate::types::{Label, Result, Slot, YamadaError};
use std::collections::BTreeMap;

/// Build a diagram from PD tuples.
pub fn from_pd_code(code: &[[u32; 4]]) -> Result<SpatialGraphDiagram> {
    let mut diagram = SpatialGraphDiagram::empty();
    let mut ends: BTreeMap<u32, Vec<Slot>> = BTreeMap::new();
    for (n, tuple) in code.iter().enumerate() {
        let crossing = Label::new(format!("{CROSSING_PREFIX}{n}"));
        diagram.add_element(Element::crossing(&crossing))?;
        for (corner, arc) in tuple.iter().enumerate() {
            ends.entry(*arc)
                .or_default()
                .push(Slot::new(&crossing, corner));
        }
    }
    for (arc, slots) in &ends {
        let [a, b] = slots.as_slice() else {
            return Err(YamadaError::Parse(format!(
                "arc {arc} occurs {} times, expected 2",
                slots.len()
            )));
        };
        let edge = format!("{EDGE_PREFIX}{arc}");
        diagram.add_edge(&edge, a.label.as_str(), a.index, b.label.as_str(), b.index)?;
    }
    diagram.finish(BuildOptions::default())
}

/// Parse `[[1,5,2,4],...]`, `X[1,5,2,4] X[...]` or whitespace-separated
/// numbers into PD tuples.
pub fn parse_pd_code(text: &str) -> Result<Vec<[u32; 4]>> {
    let mut numbers = Vec::new();
    let mut digits = String::new();
    for ch in text.chars().chain(std::iter::once(' ')) {
        if ch.is_ascii_digit() {
            digits.push(ch);
        } else if !digits.is_empty() {
            let value = digits
                .parse::<u32>()
                .map_err(|e| YamadaError::Parse(format!("PD label {digits}: {e}")))?;
            numbers.push(value);
            digits.clear();
        }
    }
    if numbers.is_empty() {
        return Err(YamadaError::Parse("PD code has no crossings".to_string()));
    }
    if numbers.len() % 4 != 0 {
        return Err(YamadaError::Parse(format!(
            "PD code has {} labels, not a multiple of 4",
            numbers.len()
        )));
    }
    Ok(numbers
        .chunks_exact(4)
        .map(|c| [c[0], c[1], c[2], c[3]])
        .collect())
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_both_notations() {
        let nested = parse_pd_code("[[1,5,2,4],[3,1,4,6],[5,3,6,2]]").expect("nested");
        let mathematica = parse_pd_code("X[1,5,2,4] X[3,1,4,6] X[5,3,6,2]").expect("x-form");
        assert_eq!(nested, mathematica);
        assert_eq!(nested[1], [3, 1, 4, 6]);
    }

    #[test]
    fn rejects_ragged_code() {
        assert!(matches!(parse_pd_code("[[1,2,3]]"), Err(YamadaError::Parse(_))));
        assert!(matches!(parse_pd_code("[]"), Err(YamadaError::Parse(_))));
    }

    #[test]
    fn arc_used_three_times_is_rejected() {
        let result = from_pd_code(&[[1, 1, 2, 1]]);
        assert!(matches!(result, Err(YamadaError::Parse(_))));
    }

    #[test]
    fn trefoil_shape() {
        let d = from_pd_code(&[[1, 5, 2, 4], [3, 1, 4, 6], [5, 3, 6, 2]]).expect("trefoil");
        assert_eq!(d.crossing_count(), 3);
        assert_eq!(d.edges().count(), 6);
        assert_eq!(d.faces().expect("faces").len(), 5);
        assert!(d.warnings().is_empty());
    }
}
