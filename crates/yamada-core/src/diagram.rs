//! # Spatial Graph Diagram
//!
//! The diagram container: an arena of [`Element`]s keyed by label, with
//! every cross reference stored as a `(label, corner)` [`Slot`].
//!
//! ## Normal form
//!
//! After `correct_diagram()` every connection joins an edge to a non-edge
//! (vertex or crossing). After `simplify_diagram()` no two-valent vertex
//! sits between two distinct edges and no edge touches another edge
//! directly; a closed circle is one two-valent vertex plus one edge.
//!
//! ## Lifecycle
//!
//! Build from elements (`new`, `with_options`, `from_parts`) or start
//! `empty()` and wire with `add_element` + `connect`, then `finish`.
//! `copy()` is a deep clone; diagrams never share state.

use crate::element::Element;
use crate::graph::{MultiGraph, NodeId};
use crate::primitives::{
    EDGE_PREFIX, MAX_SIMPLIFY_STEPS, MAX_STRAND_LENGTH, UNDERLYING_PAIRING, VERTEX_PREFIX,
};
use crate::types::{DiagramWarning, ElementKind, Face, Label, Result, Slot, YamadaError};
use std::collections::{BTreeMap, BTreeSet};

/// Pass-through pairing of two-valent elements.
const TWO_VALENT_PAIRING: [usize; 2] = [1, 0];

/// Which post-construction passes to run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BuildOptions {
    /// Insert missing two-valent vertices and edges.
    pub correct: bool,
    /// Collapse redundant two-valent vertices and edges.
    pub simplify: bool,
}

impl Default for BuildOptions {
    fn default() -> Self {
        Self {
            correct: true,
            simplify: true,
        }
    }
}

impl BuildOptions {
    /// Keep the diagram exactly as wired.
    #[must_use]
    pub fn raw() -> Self {
        Self {
            correct: false,
            simplify: false,
        }
    }
}

/// How a traced element behaves when building an abstract graph.
#[derive(Debug, Clone, Copy)]
pub(crate) enum Passage {
    /// The element becomes a graph node.
    Node,
    /// Strands pass through, corner `i` continuing at `pairing[i]`.
    Through(&'static [usize]),
}

/// A planar diagram of a spatial graph.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SpatialGraphDiagram {
    elements: BTreeMap<Label, Element>,
    order: Vec<Label>,
    counter: usize,
    warnings: Vec<DiagramWarning>,
}

impl SpatialGraphDiagram {
    // =========================================================================
    // CONSTRUCTION
    // =========================================================================

    /// A diagram with no elements. Its Yamada polynomial is `1`.
    #[must_use]
    pub fn empty() -> Self {
        Self::default()
    }

    /// Build from pre-wired elements, correcting and simplifying.
    pub fn new(elements: impl IntoIterator<Item = Element>) -> Result<Self> {
        Self::with_options(elements, BuildOptions::default())
    }

    /// Build from pre-wired elements with the chosen passes.
    ///
    /// Every stored slot must name an element of the input and be mirrored
    /// by its partner.
    pub fn with_options(
        elements: impl IntoIterator<Item = Element>,
        options: BuildOptions,
    ) -> Result<Self> {
        let mut diagram = Self::empty();
        for element in elements {
            diagram.add_element(element)?;
        }
        diagram.check_symmetry()?;
        diagram.finish(options)
    }

    /// Build from separately typed lists; crossings first, then vertices,
    /// then edges.
    pub fn from_parts(
        vertices: Vec<Element>,
        edges: Vec<Element>,
        crossings: Vec<Element>,
        options: BuildOptions,
    ) -> Result<Self> {
        let typed = [
            (ElementKind::Vertex, &vertices),
            (ElementKind::Edge, &edges),
            (ElementKind::Crossing, &crossings),
        ];
        for (kind, list) in typed {
            if let Some(wrong) = list.iter().find(|e| e.kind() != kind) {
                return Err(YamadaError::InvalidInput(format!(
                    "{} {} listed among {kind}s",
                    wrong.kind(),
                    wrong.label()
                )));
            }
        }
        Self::with_options(
            crossings.into_iter().chain(vertices).chain(edges),
            options,
        )
    }

    /// Run the chosen passes and check every corner is connected.
    pub fn finish(mut self, options: BuildOptions) -> Result<Self> {
        if options.correct {
            self.correct_diagram()?;
        }
        if options.simplify {
            self.simplify_diagram()?;
        }
        self.validate()?;
        Ok(self)
    }

    /// Insert an element; its label must be new.
    pub fn add_element(&mut self, element: Element) -> Result<()> {
        if self.elements.contains_key(element.label()) {
            return Err(YamadaError::DuplicateLabel(element.label().clone()));
        }
        self.order.push(element.label().clone());
        self.elements.insert(element.label().clone(), element);
        Ok(())
    }

    /// Deep clone: same labels and topology, no shared state.
    #[must_use]
    pub fn copy(&self) -> Self {
        self.clone()
    }

    // =========================================================================
    // ACCESS
    // =========================================================================

    #[must_use]
    pub fn get(&self, label: &str) -> Option<&Element> {
        self.elements.get(label)
    }

    pub fn element(&self, label: &str) -> Result<&Element> {
        self.elements
            .get(label)
            .ok_or_else(|| YamadaError::UnknownLabel(Label::new(label)))
    }

    fn element_mut(&mut self, label: &str) -> Result<&mut Element> {
        self.elements
            .get_mut(label)
            .ok_or_else(|| YamadaError::UnknownLabel(Label::new(label)))
    }

    #[must_use]
    pub fn contains(&self, label: &str) -> bool {
        self.elements.contains_key(label)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.elements.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    /// All elements in insertion order.
    pub fn elements(&self) -> impl Iterator<Item = &Element> + '_ {
        self.order.iter().filter_map(|label| self.elements.get(label))
    }

    fn of_kind(&self, kind: ElementKind) -> impl Iterator<Item = &Element> + '_ {
        self.elements().filter(move |e| e.kind() == kind)
    }

    pub fn vertices(&self) -> impl Iterator<Item = &Element> + '_ {
        self.of_kind(ElementKind::Vertex)
    }

    pub fn edges(&self) -> impl Iterator<Item = &Element> + '_ {
        self.of_kind(ElementKind::Edge)
    }

    pub fn crossings(&self) -> impl Iterator<Item = &Element> + '_ {
        self.of_kind(ElementKind::Crossing)
    }

    /// Crossing labels in insertion order.
    #[must_use]
    pub fn crossing_labels(&self) -> Vec<Label> {
        self.crossings().map(|e| e.label().clone()).collect()
    }

    #[must_use]
    pub fn crossing_count(&self) -> usize {
        self.crossings().count()
    }

    /// Warnings accumulated by `correct_diagram()`.
    #[must_use]
    pub fn warnings(&self) -> &[DiagramWarning] {
        &self.warnings
    }

    /// Partner of `label[corner]` (corner taken modulo the degree).
    pub fn neighbor(&self, label: &str, corner: usize) -> Result<Slot> {
        let element = self.element(label)?;
        element
            .adjacent(corner)
            .cloned()
            .ok_or_else(|| YamadaError::UnconnectedCorner(element.slot(corner)))
    }

    pub(crate) fn kind_of(&self, label: &str) -> Result<ElementKind> {
        Ok(self.element(label)?.kind())
    }

    pub(crate) fn degree_of(&self, label: &str) -> Result<usize> {
        Ok(self.element(label)?.degree())
    }

    fn total_corners(&self) -> usize {
        self.elements.values().map(Element::degree).sum()
    }

    // =========================================================================
    // VALIDATION
    // =========================================================================

    /// Check the one-partner-per-corner invariant.
    ///
    /// Every corner must be connected to a live element's corner that
    /// points back.
    pub fn validate(&self) -> Result<()> {
        for element in self.elements() {
            for corner in 0..element.degree() {
                let slot = element.slot(corner);
                let partner = element
                    .adjacent(corner)
                    .ok_or_else(|| YamadaError::UnconnectedCorner(slot.clone()))?;
                self.check_partner(&slot, partner)?;
            }
        }
        Ok(())
    }

    /// Like `validate`, but unconnected corners are allowed.
    fn check_symmetry(&self) -> Result<()> {
        for element in self.elements() {
            for corner in 0..element.degree() {
                if let Some(partner) = element.adjacent(corner) {
                    self.check_partner(&element.slot(corner), partner)?;
                }
            }
        }
        Ok(())
    }

    fn check_partner(&self, slot: &Slot, partner: &Slot) -> Result<()> {
        if slot == partner {
            return Err(YamadaError::SelfSlot(slot.clone()));
        }
        let other = self.element(partner.label.as_str())?;
        other.check_corner(partner.index)?;
        if other.corners()[partner.index].as_ref() != Some(slot) {
            return Err(YamadaError::AsymmetricSlot {
                slot: slot.clone(),
                partner: partner.clone(),
            });
        }
        Ok(())
    }

    // =========================================================================
    // EDITING PRIMITIVES
    // =========================================================================

    /// Wire `a[i]` to `b[j]` symmetrically.
    ///
    /// Former partners of either corner are left unconnected if they still
    /// pointed back.
    pub fn connect(&mut self, a: &str, i: usize, b: &str, j: usize) -> Result<()> {
        self.element(a)?.check_corner(i)?;
        self.element(b)?.check_corner(j)?;
        let first = Slot::new(a, i);
        let second = Slot::new(b, j);
        if first == second {
            return Err(YamadaError::SelfSlot(first));
        }
        self.detach(&first);
        self.detach(&second);
        self.element_mut(a)?.set(i, Some(second.clone()));
        self.element_mut(b)?.set(j, Some(first));
        Ok(())
    }

    fn connect_slots(&mut self, a: &Slot, b: &Slot) -> Result<()> {
        self.connect(a.label.as_str(), a.index, b.label.as_str(), b.index)
    }

    fn detach(&mut self, slot: &Slot) {
        let Some(old) = self
            .elements
            .get(slot.label.as_str())
            .and_then(|e| e.adjacent(slot.index))
            .cloned()
        else {
            return;
        };
        if let Some(partner) = self.elements.get_mut(old.label.as_str()) {
            if partner.corners().get(old.index).and_then(Option::as_ref) == Some(slot) {
                partner.set(old.index, None);
            }
        }
    }

    /// Remove a vertex without re-wiring its corners.
    pub fn remove_vertex(&mut self, label: &str) -> Result<Element> {
        self.remove_kind(label, ElementKind::Vertex)
    }

    /// Remove an edge without re-wiring its corners.
    pub fn remove_edge(&mut self, label: &str) -> Result<Element> {
        self.remove_kind(label, ElementKind::Edge)
    }

    /// Remove a crossing without re-wiring its corners.
    pub fn remove_crossing(&mut self, label: &str) -> Result<Element> {
        self.remove_kind(label, ElementKind::Crossing)
    }

    fn remove_kind(&mut self, label: &str, kind: ElementKind) -> Result<Element> {
        let found = self.kind_of(label)?;
        if found != kind {
            return Err(YamadaError::InvalidInput(format!(
                "{label} is a {found}, not a {kind}"
            )));
        }
        self.remove_element(label)
    }

    pub(crate) fn remove_element(&mut self, label: &str) -> Result<Element> {
        let element = self
            .elements
            .remove(label)
            .ok_or_else(|| YamadaError::UnknownLabel(Label::new(label)))?;
        self.order.retain(|l| l.as_str() != label);
        Ok(element)
    }

    /// Insert a new edge `label` joining `a[i]` and `b[j]`.
    pub fn add_edge(&mut self, label: &str, a: &str, i: usize, b: &str, j: usize) -> Result<()> {
        self.element(a)?.check_corner(i)?;
        self.element(b)?.check_corner(j)?;
        self.add_element(Element::edge(label))?;
        self.connect(label, 0, a, i)?;
        self.connect(label, 1, b, j)
    }

    /// A label with `prefix` not used by any element.
    pub(crate) fn fresh_label(&mut self, prefix: &str) -> Label {
        loop {
            self.counter += 1;
            let candidate = format!("{prefix}{}", self.counter);
            if !self.elements.contains_key(candidate.as_str()) {
                return Label::new(candidate);
            }
        }
    }

    /// Fuse two edges that meet directly or through one two-valent vertex.
    ///
    /// The lower label survives and is returned.
    pub fn merge_edges(&mut self, e1: &str, e2: &str) -> Result<Label> {
        for label in [e1, e2] {
            if self.kind_of(label)? != ElementKind::Edge {
                return Err(YamadaError::InvalidInput(format!("{label} is not an edge")));
            }
        }
        if e1 == e2 {
            return Err(YamadaError::InvalidInput(format!(
                "cannot merge {e1} with itself"
            )));
        }
        if self.element(e1)?.already_assigned(&Label::new(e2)) {
            for k in 0..2 {
                let partner = self.neighbor(e1, k)?;
                if partner.label.as_str() == e2 {
                    return self.fuse_adjacent(&Slot::new(e1, k), &partner);
                }
            }
        }
        for k in 0..2 {
            let middle = self.neighbor(e1, k)?;
            let element = self.element(middle.label.as_str())?;
            if element.kind() != ElementKind::Vertex || element.degree() != 2 {
                continue;
            }
            let far = self.neighbor(middle.label.as_str(), 1 - middle.index)?;
            if far.label.as_str() == e2 {
                self.remove_element(middle.label.as_str())?;
                let near = Slot::new(e1, k);
                self.connect_slots(&near, &far)?;
                return self.fuse_adjacent(&near, &far);
            }
        }
        Err(YamadaError::InvalidInput(format!(
            "edges {e1} and {e2} do not share a two-valent vertex"
        )))
    }

    /// Fuse two distinct edges whose corners `a` and `b` are joined.
    fn fuse_adjacent(&mut self, a: &Slot, b: &Slot) -> Result<Label> {
        let (keep, gone) = if a.label <= b.label { (a, b) } else { (b, a) };
        let far = self.neighbor(gone.label.as_str(), 1 - gone.index)?;
        self.remove_element(gone.label.as_str())?;
        self.connect_slots(keep, &far)?;
        Ok(keep.label.clone())
    }

    /// Swap over and under at a crossing.
    ///
    /// Corners rotate by one position, so the planar picture is unchanged
    /// while the under-strand becomes the over-strand.
    pub fn flip_crossing(&mut self, label: &str) -> Result<()> {
        let crossing = self.element_mut(label)?;
        if !crossing.is_crossing() {
            return Err(YamadaError::InvalidInput(format!("{label} is not a crossing")));
        }
        let degree = crossing.degree();
        let old = crossing.rotate_corners();
        for (corner, entry) in (0..degree).zip(old.iter().cycle().skip(1)) {
            let Some(partner) = entry else { continue };
            if partner.label.as_str() == label {
                let moved = Slot::new(label, (partner.index + degree - 1) % degree);
                self.element_mut(label)?.set(corner, Some(moved));
            } else {
                self.element_mut(partner.label.as_str())?
                    .set(partner.index, Some(Slot::new(label, corner)));
            }
        }
        Ok(())
    }

    // =========================================================================
    // CORRECTION & SIMPLIFICATION
    // =========================================================================

    /// Insert missing two-valent vertices and edges.
    ///
    /// Scans elements in label order. Edge ends that meet directly get a
    /// two-valent vertex; vertex or crossing corners that meet directly get
    /// an edge. One warning per repair, also kept in `warnings()`. An empty
    /// diagram yields a single `EmptyDiagram` warning.
    pub fn correct_diagram(&mut self) -> Result<Vec<DiagramWarning>> {
        let found = self.repair()?;
        self.warnings.extend(found.iter().cloned());
        Ok(found)
    }

    fn repair(&mut self) -> Result<Vec<DiagramWarning>> {
        if self.elements.is_empty() {
            return Ok(vec![DiagramWarning::EmptyDiagram]);
        }
        let mut found = Vec::new();
        let labels: Vec<Label> = self.elements.keys().cloned().collect();
        for label in labels {
            let Some(degree) = self.get(label.as_str()).map(Element::degree) else {
                continue;
            };
            for corner in 0..degree {
                let here = Slot::new(&label, corner);
                let Ok(there) = self.neighbor(label.as_str(), corner) else {
                    continue;
                };
                if here >= there {
                    continue;
                }
                let Ok(there_kind) = self.kind_of(there.label.as_str()) else {
                    continue;
                };
                let here_edge = self.kind_of(label.as_str())? == ElementKind::Edge;
                let there_edge = there_kind == ElementKind::Edge;
                if here_edge && there_edge {
                    let vertex = self.fresh_label(VERTEX_PREFIX);
                    self.add_element(Element::vertex(&vertex, 2)?)?;
                    self.connect_slots(&here, &Slot::new(&vertex, 0))?;
                    self.connect_slots(&there, &Slot::new(&vertex, 1))?;
                    found.push(DiagramWarning::MissingTwoValentVertex {
                        first: here,
                        second: there,
                    });
                } else if !here_edge && !there_edge {
                    let edge = self.fresh_label(EDGE_PREFIX);
                    self.add_element(Element::edge(&edge))?;
                    self.connect_slots(&here, &Slot::new(&edge, 0))?;
                    self.connect_slots(&there, &Slot::new(&edge, 1))?;
                    found.push(DiagramWarning::MissingEdge {
                        first: here,
                        second: there,
                    });
                }
            }
        }
        Ok(found)
    }

    /// Collapse strands to normal form; the polynomial is unchanged.
    pub fn simplify_diagram(&mut self) -> Result<()> {
        for _ in 0..MAX_SIMPLIFY_STEPS {
            if !self.simplify_step()? {
                return Ok(());
            }
        }
        Err(YamadaError::IterationLimit {
            context: "diagram simplification",
            limit: MAX_SIMPLIFY_STEPS,
        })
    }

    fn simplify_step(&mut self) -> Result<bool> {
        let edges: Vec<Label> = self
            .elements
            .values()
            .filter(|e| e.is_edge())
            .map(|e| e.label().clone())
            .collect();
        for label in &edges {
            for k in 0..2 {
                let Ok(partner) = self.neighbor(label.as_str(), k) else {
                    continue;
                };
                if self.kind_of(partner.label.as_str())? != ElementKind::Edge {
                    continue;
                }
                if &partner.label == label {
                    let vertex = self.fresh_label(VERTEX_PREFIX);
                    self.add_element(Element::vertex(&vertex, 2)?)?;
                    self.connect(label.as_str(), 0, vertex.as_str(), 0)?;
                    self.connect(label.as_str(), 1, vertex.as_str(), 1)?;
                } else {
                    self.fuse_adjacent(&Slot::new(label, k), &partner)?;
                }
                return Ok(true);
            }
        }

        let candidates: Vec<(Label, Slot, Slot)> = self
            .elements
            .values()
            .filter(|e| e.kind() == ElementKind::Vertex && e.degree() == 2)
            .filter_map(|v| match (v.adjacent(0), v.adjacent(1)) {
                (Some(p), Some(q)) => Some((v.label().clone(), p.clone(), q.clone())),
                _ => None,
            })
            .collect();
        for (vertex, p, q) in candidates {
            if p.label == q.label {
                continue;
            }
            if self.kind_of(p.label.as_str())? == ElementKind::Edge
                && self.kind_of(q.label.as_str())? == ElementKind::Edge
            {
                self.remove_element(vertex.as_str())?;
                self.connect_slots(&p, &q)?;
                return Ok(true);
            }
        }
        Ok(false)
    }

    /// Corrected, simplified, validated copy; repair warnings are dropped.
    pub(crate) fn normalized_copy(&self) -> Result<Self> {
        let mut copy = self.copy();
        copy.repair()?;
        copy.simplify_diagram()?;
        copy.validate()?;
        Ok(copy)
    }

    // =========================================================================
    // FACES & PLANARITY
    // =========================================================================

    /// All faces, each traced by "next corner, then follow the slot".
    ///
    /// Starts from every unvisited corner in insertion order, so the outer
    /// face is included.
    pub fn faces(&self) -> Result<Vec<Face>> {
        let bound = self.total_corners();
        let mut seen: BTreeSet<Slot> = BTreeSet::new();
        let mut faces = Vec::new();
        for element in self.elements() {
            for corner in 0..element.degree() {
                let start = element.slot(corner);
                if seen.contains(&start) {
                    continue;
                }
                seen.insert(start.clone());
                let mut face = vec![start.clone()];
                let mut current = start.clone();
                loop {
                    let next = self.neighbor(current.label.as_str(), current.index + 1)?;
                    if next == start {
                        break;
                    }
                    if face.len() >= bound || !seen.insert(next.clone()) {
                        return Err(YamadaError::FaceNotClosed { start, bound });
                    }
                    face.push(next.clone());
                    current = next;
                }
                faces.push(face);
            }
        }
        Ok(faces)
    }

    /// Euler check `V - E + F = 2C` for a sphere embedding.
    pub fn is_planar(&self) -> Result<bool> {
        let vertices = self.elements.len() as i64;
        let edges = (self.total_corners() / 2) as i64;
        let faces = self.faces()?.len() as i64;
        let components = self.projection_graph()?.component_count() as i64;
        Ok(vertices - edges + faces == 2 * components)
    }

    // =========================================================================
    // ABSTRACT GRAPHS
    // =========================================================================

    /// The spatial graph itself: crossings pass strands straight through.
    pub fn underlying_graph(&self) -> Result<MultiGraph> {
        self.trace_graph(|_| Passage::Through(&UNDERLYING_PAIRING))
    }

    /// The planar shadow: crossings become 4-valent nodes.
    pub fn projection_graph(&self) -> Result<MultiGraph> {
        self.trace_graph(|_| Passage::Node)
    }

    /// Trace strands into a multigraph.
    ///
    /// Vertices of degree other than 2 are always nodes, edges and
    /// two-valent vertices always pass through, and `crossing` decides for
    /// each crossing. A closed strand that meets no node becomes a node with
    /// a loop.
    pub(crate) fn trace_graph<F>(&self, mut crossing: F) -> Result<MultiGraph>
    where
        F: FnMut(&Element) -> Passage,
    {
        let mut graph = MultiGraph::new();
        let mut nodes: BTreeMap<&Label, NodeId> = BTreeMap::new();
        let mut routes: BTreeMap<&Label, &'static [usize]> = BTreeMap::new();
        for element in self.elements() {
            let passage = match element.kind() {
                ElementKind::Vertex if element.degree() != 2 => Passage::Node,
                ElementKind::Vertex | ElementKind::Edge => Passage::Through(&TWO_VALENT_PAIRING),
                ElementKind::Crossing => crossing(element),
            };
            match passage {
                Passage::Node => {
                    nodes.insert(element.label(), graph.add_node(element.label().clone()));
                }
                Passage::Through(pairing) => {
                    routes.insert(element.label(), pairing);
                }
            }
        }

        let bound = self.total_corners();
        let mut used: BTreeSet<Slot> = BTreeSet::new();
        for element in self.elements() {
            let Some(&node) = nodes.get(element.label()) else {
                continue;
            };
            for corner in 0..element.degree() {
                if !used.insert(element.slot(corner)) {
                    continue;
                }
                let mut current = self.neighbor(element.label().as_str(), corner)?;
                let mut steps = 0;
                while let Some(pairing) = routes.get(&current.label) {
                    let exit = pairing[current.index];
                    used.insert(current.clone());
                    used.insert(Slot::new(&current.label, exit));
                    current = self.neighbor(current.label.as_str(), exit)?;
                    steps += 1;
                    if steps > bound.min(MAX_STRAND_LENGTH) {
                        return Err(YamadaError::IterationLimit {
                            context: "strand tracing",
                            limit: bound,
                        });
                    }
                }
                used.insert(current.clone());
                let end = nodes
                    .get(&current.label)
                    .copied()
                    .ok_or_else(|| YamadaError::UnknownLabel(current.label.clone()))?;
                graph.add_edge(node, end);
            }
        }

        for element in self.elements() {
            let Some(pairing) = routes.get(element.label()) else {
                continue;
            };
            for corner in 0..element.degree() {
                if used.contains(&element.slot(corner)) {
                    continue;
                }
                let circle = graph.add_node(Label::new(format!("{}:{corner}", element.label())));
                graph.add_edge(circle, circle);
                let mut current = element.slot(corner);
                let mut exit = pairing[corner];
                let mut steps = 0;
                while used.insert(current.clone()) {
                    used.insert(Slot::new(&current.label, exit));
                    current = self.neighbor(current.label.as_str(), exit)?;
                    exit = routes
                        .get(&current.label)
                        .map(|p| p[current.index])
                        .ok_or_else(|| YamadaError::UnknownLabel(current.label.clone()))?;
                    steps += 1;
                    if steps > bound {
                        return Err(YamadaError::IterationLimit {
                            context: "closed strand tracing",
                            limit: bound,
                        });
                    }
                }
            }
        }
        Ok(graph)
    }
}

// =============================================================================
// TESTS
// =============================================================================
