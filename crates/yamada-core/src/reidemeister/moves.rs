//! R1, R2 and R3 detection and surgery, plus R6 detection.
//!
//! Corner arithmetic is modulo 4 around a crossing. A face entry `(X, c)`
//! means the face arrives at corner `c` of `X` and leaves through `c + 1`.

use super::{R3Move, StrandEnd, strand_end, stripped_faces};
use crate::diagram::SpatialGraphDiagram;
use crate::primitives::{CROSSING_DEGREE, EDGE_PREFIX};
use crate::types::{ElementKind, Label, MoveKind, Result, Slot, YamadaError};
use std::collections::BTreeSet;

fn corner(i: usize) -> usize {
    i % CROSSING_DEGREE
}

fn not_applicable(kind: MoveKind, detail: String) -> YamadaError {
    YamadaError::MoveNotApplicable { kind, detail }
}

fn finish_move(mut diagram: SpatialGraphDiagram) -> Result<SpatialGraphDiagram> {
    diagram.simplify_diagram()?;
    diagram.validate()?;
    Ok(diagram)
}

// =============================================================================
// R1
// =============================================================================

/// The kink corner of `crossing`: a corner whose strand returns at the next
/// corner.
fn kink(diagram: &SpatialGraphDiagram, crossing: &Label) -> Result<Option<(usize, StrandEnd)>> {
    for i in 0..CROSSING_DEGREE {
        let strand = strand_end(diagram, &Slot::new(crossing, i))?;
        if strand.end == Slot::new(crossing, corner(i + 1)) {
            return Ok(Some((i, strand)));
        }
    }
    Ok(None)
}

/// Crossings with a one-crossing kink, in insertion order.
pub fn has_r1(diagram: &SpatialGraphDiagram) -> Result<Vec<Label>> {
    let mut found = Vec::new();
    for label in diagram.crossing_labels() {
        if kink(diagram, &label)?.is_some() {
            found.push(label);
        }
    }
    Ok(found)
}

/// Untwist the kink at `crossing`.
///
/// The loop strand and the crossing are removed and the two remaining
/// corners are joined.
pub fn apply_r1(diagram: &SpatialGraphDiagram, crossing: &str) -> Result<SpatialGraphDiagram> {
    let mut d = diagram.normalized_copy()?;
    let label = Label::new(crossing);
    if d.kind_of(crossing)? != ElementKind::Crossing {
        return Err(not_applicable(MoveKind::R1, format!("{crossing} is not a crossing")));
    }
    let Some((i, strand)) = kink(&d, &label)? else {
        return Err(not_applicable(MoveKind::R1, format!("{crossing} has no kink")));
    };
    let p = d.neighbor(crossing, i + 2)?;
    let q = d.neighbor(crossing, i + 3)?;
    let interior: BTreeSet<Label> = strand.interior.into_iter().collect();
    for middle in &interior {
        d.remove_element(middle.as_str())?;
    }
    d.remove_element(crossing)?;
    d.connect(p.label.as_str(), p.index, q.label.as_str(), q.index)?;
    finish_move(d)
}

// =============================================================================
// R2
// =============================================================================

/// Bigon faces between two crossings whose bounding strands are both over
/// or both under: `((X, c), (Y, d))` in face order.
fn bigons(diagram: &SpatialGraphDiagram) -> Result<Vec<(Slot, Slot)>> {
    let mut found = Vec::new();
    for face in stripped_faces(diagram)? {
        let [x, y] = face.as_slice() else { continue };
        if x.label == y.label
            || diagram.kind_of(x.label.as_str())? != ElementKind::Crossing
            || diagram.kind_of(y.label.as_str())? != ElementKind::Crossing
        {
            continue;
        }
        if (x.index + 1) % 2 == y.index % 2 {
            found.push((x.clone(), y.clone()));
        }
    }
    Ok(found)
}

fn sorted_pair(a: &Label, b: &Label) -> (Label, Label) {
    if a <= b {
        (a.clone(), b.clone())
    } else {
        (b.clone(), a.clone())
    }
}

/// Crossing pairs bounding an R2 bigon, each pair sorted, in face order.
pub fn has_r2(diagram: &SpatialGraphDiagram) -> Result<Vec<(Label, Label)>> {
    let mut found: Vec<(Label, Label)> = Vec::new();
    for (x, y) in bigons(diagram)? {
        let pair = sorted_pair(&x.label, &y.label);
        if !found.contains(&pair) {
            found.push(pair);
        }
    }
    Ok(found)
}

/// Pull apart the bigon between the two crossings of `pair`.
pub fn apply_r2(
    diagram: &SpatialGraphDiagram,
    pair: (&str, &str),
) -> Result<SpatialGraphDiagram> {
    let mut d = diagram.normalized_copy()?;
    let wanted = sorted_pair(&Label::new(pair.0), &Label::new(pair.1));
    let Some((x, y)) = bigons(&d)?
        .into_iter()
        .find(|(x, y)| sorted_pair(&x.label, &y.label) == wanted)
    else {
        return Err(not_applicable(
            MoveKind::R2,
            format!("no bigon between {} and {}", wanted.0, wanted.1),
        ));
    };
    let (xl, c) = (x.label.as_str(), x.index);
    let (yl, e) = (y.label.as_str(), y.index);

    let s1 = d.neighbor(xl, c + 1)?.label;
    let s2 = d.neighbor(xl, c)?.label;
    for side in [&s1, &s2] {
        if d.kind_of(side.as_str())? != ElementKind::Edge {
            return Err(not_applicable(
                MoveKind::R2,
                format!("bigon side {side} is not an edge"),
            ));
        }
    }
    let p1 = d.neighbor(xl, c + 3)?;
    let q1 = d.neighbor(yl, e + 2)?;
    let p2 = d.neighbor(yl, e + 3)?;
    let q2 = d.neighbor(xl, c + 2)?;

    let doomed: BTreeSet<Label> = [s1, s2, x.label.clone(), y.label.clone()]
        .into_iter()
        .collect();
    for label in &doomed {
        d.remove_element(label.as_str())?;
    }
    d.connect(p1.label.as_str(), p1.index, q1.label.as_str(), q1.index)?;
    d.connect(p2.label.as_str(), p2.index, q2.label.as_str(), q2.index)?;
    finish_move(d)
}

// =============================================================================
// R3
// =============================================================================

/// R3 descriptors of every triangular face bounded by three crossings.
pub fn has_r3(diagram: &SpatialGraphDiagram) -> Result<Vec<R3Move>> {
    let mut found = Vec::new();
    for face in stripped_faces(diagram)? {
        let [a, b, c] = face.as_slice() else { continue };
        let labels: BTreeSet<&Label> = [&a.label, &b.label, &c.label].into_iter().collect();
        if labels.len() != 3 {
            continue;
        }
        let mut all_crossings = true;
        for label in &labels {
            all_crossings &= diagram.kind_of(label.as_str())? == ElementKind::Crossing;
        }
        if !all_crossings {
            continue;
        }
        for k in 0..3 {
            let first = &face[k];
            let second = &face[(k + 1) % 3];
            if (first.index + 1) % 2 == second.index % 2 {
                found.push(R3Move {
                    stationary: face[(k + 2) % 3].clone(),
                    moving: [first.clone(), second.clone()],
                });
            }
        }
    }
    Ok(found)
}

/// Slide the moving strand of `mv` across its stationary crossing.
///
/// The two face edges touching the stationary crossing are replaced by two
/// new edges on its far side; the crossing count is unchanged.
pub fn apply_r3(diagram: &SpatialGraphDiagram, mv: &R3Move) -> Result<SpatialGraphDiagram> {
    let mut d = diagram.normalized_copy()?;
    if !has_r3(&d)?.contains(mv) {
        return Err(not_applicable(MoveKind::R3, format!("no triangle for {mv}")));
    }
    let (x, a) = (mv.stationary.label.as_str(), mv.stationary.index);
    let (y, b) = (mv.moving[0].label.as_str(), mv.moving[0].index);
    let (z, c) = (mv.moving[1].label.as_str(), mv.moving[1].index);

    let px2 = d.neighbor(x, a + 2)?;
    let px3 = d.neighbor(x, a + 3)?;
    let py2 = d.neighbor(y, b + 2)?;
    let py3 = d.neighbor(y, b + 3)?;
    let pz2 = d.neighbor(z, c + 2)?;
    let pz3 = d.neighbor(z, c + 3)?;

    let exy = d.neighbor(x, a + 1)?.label;
    let eyz = d.neighbor(y, b + 1)?.label;
    let ezx = d.neighbor(z, c + 1)?.label;
    for side in [&exy, &eyz, &ezx] {
        if d.kind_of(side.as_str())? != ElementKind::Edge {
            return Err(not_applicable(
                MoveKind::R3,
                format!("triangle side {side} is not an edge"),
            ));
        }
    }
    d.remove_element(exy.as_str())?;
    d.remove_element(ezx.as_str())?;

    let rewire = [
        (x, a, &pz3),
        (x, a + 1, &py2),
        (z, c + 1, &px2),
        (y, b, &px3),
        (y, b + 1, &pz2),
        (z, c, &py3),
    ];
    for (label, i, target) in rewire {
        d.connect(label, corner(i), target.label.as_str(), target.index)?;
    }
    d.connect(eyz.as_str(), 0, y, corner(b + 3))?;
    d.connect(eyz.as_str(), 1, z, corner(c + 2))?;

    let n1 = d.fresh_label(EDGE_PREFIX);
    d.add_edge(n1.as_str(), x, corner(a + 3), y, corner(b + 2))?;
    let n2 = d.fresh_label(EDGE_PREFIX);
    d.add_edge(n2.as_str(), z, corner(c + 3), x, corner(a + 2))?;
    finish_move(d)
}

// =============================================================================
// R6
// =============================================================================

/// `(vertex, crossing)` pairs bounding a bigon between a graph vertex and a
/// crossing, in face order without repeats.
pub fn has_r6(diagram: &SpatialGraphDiagram) -> Result<Vec<(Label, Label)>> {
    let mut found: Vec<(Label, Label)> = Vec::new();
    for face in stripped_faces(diagram)? {
        let [p, q] = face.as_slice() else { continue };
        let pair = match (
            diagram.kind_of(p.label.as_str())?,
            diagram.kind_of(q.label.as_str())?,
        ) {
            (ElementKind::Vertex, ElementKind::Crossing) => (p.label.clone(), q.label.clone()),
            (ElementKind::Crossing, ElementKind::Vertex) => (q.label.clone(), p.label.clone()),
            _ => continue,
        };
        if !found.contains(&pair) {
            found.push(pair);
        }
    }
    Ok(found)
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::diagram::BuildOptions;
    use crate::element::Element;

    fn infinity() -> SpatialGraphDiagram {
        let mut d = SpatialGraphDiagram::empty();
        d.add_element(Element::crossing("x")).expect("x");
        d.add_edge("e1", "x", 0, "x", 1).expect("e1");
        d.add_edge("e2", "x", 2, "x", 3).expect("e2");
        d.finish(BuildOptions::default()).expect("finish")
    }

    /// Two crossings stacked into the 2-component unlink: a single bigon
    /// between them bounded by two over-passes of one strand.
    fn r2_unlink() -> SpatialGraphDiagram {
        // Closure of the braid word s1 s1^-1.
        let mut d = SpatialGraphDiagram::empty();
        d.add_element(Element::crossing("x0")).expect("x0");
        d.add_element(Element::crossing("x1")).expect("x1");
        // x0 positive: NE=0, NW=1, SW=2, SE=3. x1 negative: NW=0, SW=1, SE=2, NE=3.
        d.add_edge("a", "x0", 2, "x1", 0).expect("a");
        d.add_edge("b", "x0", 3, "x1", 3).expect("b");
        d.add_edge("c", "x1", 1, "x0", 1).expect("c");
        d.add_edge("f", "x1", 2, "x0", 0).expect("f");
        d.finish(BuildOptions::default()).expect("finish")
    }

    #[test]
    fn infinity_has_r1() {
        let d = infinity();
        assert_eq!(has_r1(&d).expect("r1"), vec![Label::from("x")]);
        assert!(has_r2(&d).expect("r2").is_empty());
        assert!(has_r3(&d).expect("r3").is_empty());
    }

    #[test]
    fn r1_leaves_a_circle() {
        let d = infinity();
        let after = apply_r1(&d, "x").expect("apply");
        assert_eq!(after.crossing_count(), 0);
        after.validate().expect("valid");
        assert_eq!(
            after.yamada_polynomial().expect("poly"),
            crate::poly::LaurentPoly::from_coefficients(-1, &[1, 1, 1])
        );
        // Input untouched.
        assert_eq!(d.crossing_count(), 1);
    }

    #[test]
    fn r1_on_missing_kink_is_rejected() {
        let d = r2_unlink();
        assert!(matches!(
            apply_r1(&d, "x0"),
            Err(YamadaError::MoveNotApplicable { kind: MoveKind::R1, .. })
        ));
    }

    #[test]
    fn r2_pulls_apart_unlink() {
        let d = r2_unlink();
        let pairs = has_r2(&d).expect("r2");
        assert!(pairs.contains(&(Label::from("x0"), Label::from("x1"))));
        let after = apply_r2(&d, ("x1", "x0")).expect("apply");
        assert_eq!(after.crossing_count(), 0);
        assert_eq!(
            after.normalized_yamada_polynomial().expect("poly"),
            d.normalized_yamada_polynomial().expect("poly")
        );
    }

    #[test]
    fn r3_rejects_unknown_descriptor() {
        let d = infinity();
        let mv = R3Move {
            stationary: Slot::new("x", 0),
            moving: [Slot::new("x", 1), Slot::new("x", 2)],
        };
        assert!(matches!(
            apply_r3(&d, &mv),
            Err(YamadaError::MoveNotApplicable { kind: MoveKind::R3, .. })
        ));
    }

    #[test]
    fn plain_diagram_has_no_r6() {
        assert!(has_r6(&infinity()).expect("r6").is_empty());
    }
}
