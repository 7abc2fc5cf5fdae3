//! # Abstract Multigraph
//!
//! Undirected multigraphs with loops, the input of the H-polynomial
//! recursion and the result of tracing a diagram's strands.
//!
//! Node ids are dense integers handed out in insertion order; edges are a
//! list of normalized `(low, high)` endpoint pairs, so parallel edges and
//! loops are simply repeated or diagonal entries.
//!
//! ## Isomorphism
//!
//! `structural_hash()` is a bounded colour-refinement fingerprint. Equal
//! graphs always share it; unequal graphs usually do not. `is_isomorphic()`
//! is the exact check and delegates to petgraph's VF2 matcher.

use crate::primitives::STRUCTURAL_HASH_ROUNDS;
use crate::types::Label;
use petgraph::algo::is_isomorphic_matching;
use petgraph::graph::{NodeIndex, UnGraph};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};
use std::hash::{DefaultHasher, Hash, Hasher};

/// Identifier of a node within one multigraph.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct NodeId(pub usize);

/// An undirected multigraph with loops.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MultiGraph {
    nodes: BTreeMap<NodeId, Label>,
    edges: Vec<(NodeId, NodeId)>,
    next_id: usize,
}

impl MultiGraph {
    /// Create an empty graph.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a graph with nodes `0..node_count` and the given edges.
    ///
    /// Endpoints out of range are ignored.
    #[must_use]
    pub fn from_edges(node_count: usize, edges: &[(usize, usize)]) -> Self {
        let mut graph = Self::new();
        let ids: Vec<NodeId> = (0..node_count)
            .map(|i| graph.add_node(Label::new(format!("n{i}"))))
            .collect();
        for &(u, v) in edges {
            if let (Some(&a), Some(&b)) = (ids.get(u), ids.get(v)) {
                graph.add_edge(a, b);
            }
        }
        graph
    }

    /// Add a node and return its id.
    pub fn add_node(&mut self, label: Label) -> NodeId {
        let id = NodeId(self.next_id);
        self.next_id += 1;
        self.nodes.insert(id, label);
        id
    }

    /// Add an edge between two existing nodes (a loop when `u == v`).
    ///
    /// Returns `false` if either endpoint is unknown.
    pub fn add_edge(&mut self, u: NodeId, v: NodeId) -> bool {
        if !self.nodes.contains_key(&u) || !self.nodes.contains_key(&v) {
            return false;
        }
        self.edges.push(ordered(u, v));
        true
    }

    #[must_use]
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    #[must_use]
    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Nodes in id order.
    pub fn nodes(&self) -> impl Iterator<Item = (NodeId, &Label)> + '_ {
        self.nodes.iter().map(|(id, label)| (*id, label))
    }

    /// Edges as normalized endpoint pairs.
    #[must_use]
    pub fn edges(&self) -> &[(NodeId, NodeId)] {
        &self.edges
    }

    #[must_use]
    pub fn label(&self, node: NodeId) -> Option<&Label> {
        self.nodes.get(&node)
    }

    /// Number of edge ends at `node`; a loop counts twice.
    #[must_use]
    pub fn degree(&self, node: NodeId) -> usize {
        self.edges
            .iter()
            .map(|&(u, v)| usize::from(u == node) + usize::from(v == node))
            .sum()
    }

    /// Number of edges joining `u` and `v`.
    #[must_use]
    pub fn multiplicity(&self, u: NodeId, v: NodeId) -> usize {
        let key = ordered(u, v);
        self.edges.iter().filter(|&&e| e == key).count()
    }

    #[must_use]
    pub fn loop_count(&self) -> usize {
        self.edges.iter().filter(|(u, v)| u == v).count()
    }

    // =========================================================================
    // CONNECTIVITY
    // =========================================================================

    /// Split into connected components, ordered by their smallest node id.
    ///
    /// Each component keeps the original node ids and labels.
    #[must_use]
    pub fn components(&self) -> Vec<MultiGraph> {
        let adjacency = self.adjacency(None);
        let mut seen = BTreeSet::new();
        let mut components = Vec::new();
        for &start in self.nodes.keys() {
            if seen.contains(&start) {
                continue;
            }
            let members = reachable(&adjacency, start);
            seen.extend(members.iter().copied());
            components.push(self.induced(&members));
        }
        components
    }

    #[must_use]
    pub fn component_count(&self) -> usize {
        self.components().len()
    }

    #[must_use]
    pub fn is_connected(&self) -> bool {
        self.component_count() <= 1
    }

    /// Whether some single, non-parallel, non-loop edge is a bridge.
    #[must_use]
    pub fn has_cut_edge(&self) -> bool {
        self.edges.iter().enumerate().any(|(index, &(u, v))| {
            u != v
                && self.multiplicity(u, v) == 1
                && !reachable(&self.adjacency(Some(index)), u).contains(&v)
        })
    }

    // =========================================================================
    // DELETION / CONTRACTION
    // =========================================================================

    /// Copy of the graph without edge `index`.
    #[must_use]
    pub fn delete_edge(&self, index: usize) -> MultiGraph {
        let mut graph = self.clone();
        if index < graph.edges.len() {
            graph.edges.remove(index);
        }
        graph
    }

    /// Copy of the graph with edge `index` contracted.
    ///
    /// The higher endpoint merges into the lower one; edges parallel to the
    /// contracted edge become loops and are kept.
    #[must_use]
    pub fn contract_edge(&self, index: usize) -> MultiGraph {
        let Some(&(keep, gone)) = self.edges.get(index) else {
            return self.clone();
        };
        let mut graph = self.delete_edge(index);
        if keep == gone {
            return graph;
        }
        graph.nodes.remove(&gone);
        for edge in &mut graph.edges {
            let u = if edge.0 == gone { keep } else { edge.0 };
            let v = if edge.1 == gone { keep } else { edge.1 };
            *edge = ordered(u, v);
        }
        graph
    }

    /// A node of degree 2 whose two edge ends belong to two distinct edges.
    pub(crate) fn splice_candidate(&self) -> Option<NodeId> {
        if self.nodes.len() <= 1 {
            return None;
        }
        self.nodes.keys().copied().find(|&node| {
            self.degree(node) == 2 && self.incident(node).len() == 2
        })
    }

    /// Remove a degree-2 node, joining its two neighbors by one edge.
    pub(crate) fn splice(&mut self, node: NodeId) {
        let incident = self.incident(node);
        let &[first, second] = incident.as_slice() else {
            return;
        };
        let other = |(u, v): (NodeId, NodeId)| if u == node { v } else { u };
        let joined = ordered(other(self.edges[first]), other(self.edges[second]));
        self.edges.remove(second);
        self.edges.remove(first);
        self.edges.push(joined);
        self.nodes.remove(&node);
    }

    /// Delete every loop and return how many there were.
    pub(crate) fn remove_loops(&mut self) -> usize {
        let before = self.edges.len();
        self.edges.retain(|(u, v)| u != v);
        before - self.edges.len()
    }

    fn incident(&self, node: NodeId) -> Vec<usize> {
        self.edges
            .iter()
            .enumerate()
            .filter(|(_, (u, v))| *u == node || *v == node)
            .map(|(index, _)| index)
            .collect()
    }

    fn adjacency(&self, skip: Option<usize>) -> BTreeMap<NodeId, Vec<NodeId>> {
        let mut adjacency: BTreeMap<NodeId, Vec<NodeId>> =
            self.nodes.keys().map(|&id| (id, Vec::new())).collect();
        for (index, &(u, v)) in self.edges.iter().enumerate() {
            if Some(index) == skip {
                continue;
            }
            adjacency.entry(u).or_default().push(v);
            adjacency.entry(v).or_default().push(u);
        }
        adjacency
    }

    fn induced(&self, members: &BTreeSet<NodeId>) -> MultiGraph {
        MultiGraph {
            nodes: self
                .nodes
                .iter()
                .filter(|(id, _)| members.contains(*id))
                .map(|(id, label)| (*id, label.clone()))
                .collect(),
            edges: self
                .edges
                .iter()
                .copied()
                .filter(|(u, _)| members.contains(u))
                .collect(),
            next_id: self.next_id,
        }
    }

    // =========================================================================
    // ISOMORPHISM
    // =========================================================================

    /// Isomorphism-invariant fingerprint by bounded colour refinement.
    #[must_use]
    pub fn structural_hash(&self) -> u64 {
        let index: BTreeMap<NodeId, usize> = self
            .nodes
            .keys()
            .enumerate()
            .map(|(i, &id)| (id, i))
            .collect();
        let n = index.len();
        let mut neighbors = vec![Vec::new(); n];
        let mut loops = vec![0usize; n];
        for (u, v) in &self.edges {
            let (a, b) = (index[u], index[v]);
            if a == b {
                loops[a] += 1;
            } else {
                neighbors[a].push(b);
                neighbors[b].push(a);
            }
        }

        let mut colors: Vec<u64> = (0..n)
            .map(|k| hash_of(&(neighbors[k].len(), loops[k])))
            .collect();
        for _ in 0..STRUCTURAL_HASH_ROUNDS {
            colors = (0..n)
                .map(|k| {
                    let mut around: Vec<u64> = neighbors[k].iter().map(|&m| colors[m]).collect();
                    around.sort_unstable();
                    hash_of(&(colors[k], around))
                })
                .collect();
        }
        colors.sort_unstable();
        hash_of(&(n, self.edges.len(), colors))
    }

    /// Exact multigraph isomorphism, respecting loops and multiplicities.
    #[must_use]
    pub fn is_isomorphic(&self, other: &MultiGraph) -> bool {
        if self.node_count() != other.node_count() || self.edge_count() != other.edge_count() {
            return false;
        }
        let ours = self.to_petgraph();
        let theirs = other.to_petgraph();
        is_isomorphic_matching(&ours, &theirs, |a, b| a == b, |a, b| a == b)
    }

    /// Simple-graph view: node weight = loop count, edge weight = multiplicity.
    fn to_petgraph(&self) -> UnGraph<usize, usize> {
        let mut graph = UnGraph::with_capacity(self.nodes.len(), self.edges.len());
        let mut index: BTreeMap<NodeId, NodeIndex> = BTreeMap::new();
        for &id in self.nodes.keys() {
            index.insert(id, graph.add_node(0));
        }
        let mut bundles: BTreeMap<(NodeId, NodeId), usize> = BTreeMap::new();
        for &(u, v) in &self.edges {
            if u == v {
                if let Some(weight) = graph.node_weight_mut(index[&u]) {
                    *weight += 1;
                }
            } else {
                *bundles.entry((u, v)).or_default() += 1;
            }
        }
        for ((u, v), multiplicity) in bundles {
            graph.add_edge(index[&u], index[&v], multiplicity);
        }
        graph
    }
}

fn ordered(u: NodeId, v: NodeId) -> (NodeId, NodeId) {
    if u <= v { (u, v) } else { (v, u) }
}

fn reachable(adjacency: &BTreeMap<NodeId, Vec<NodeId>>, start: NodeId) -> BTreeSet<NodeId> {
    let mut seen = BTreeSet::new();
    let mut stack = vec![start];
    while let Some(node) = stack.pop() {
        if !seen.insert(node) {
            continue;
        }
        if let Some(next) = adjacency.get(&node) {
            stack.extend(next.iter().copied().filter(|n| !seen.contains(n)));
        }
    }
    seen
}

fn hash_of<T: Hash>(value: &T) -> u64 {
    let mut hasher = DefaultHasher::new();
    value.hash(&mut hasher);
    hasher.finish()
}

// =============================================================================
// TESTS
// =============================================================================
