//! # planar_code Reader
//!
//! Decoder for the binary `planar_code` stream written by plantri.
//!
//! ## Layout
//!
//! - Optional header `>>planar_code<<` (or `>>planar_code le<<` /
//!   `>>planar_code be<<`).
//! - Per graph: vertex count `n`, then for each vertex its neighbors,
//!   1-based and clockwise, terminated by `0`.
//! - A leading `0` byte switches that graph to 16-bit entries (byte order
//!   from the header, little-endian by default).

use crate::diagram::{BuildOptions, SpatialGraphDiagram};
use crate::element::Element;
use crate::primitives::{CROSSING_DEGREE, CROSSING_PREFIX, EDGE_PREFIX, MAX_PAIRING_CANDIDATES};
use crate::types::{Label, Result, YamadaError};
use std::collections::BTreeMap;

const HEADER_PREFIX: &[u8] = b">>planar_code";
const HEADER_SUFFIX: &[u8] = b"<<";

/// Prefix of graph vertices created from map nodes.
const NODE_PREFIX: &str = "n";

/// A rotation system: for every node, its neighbors in clockwise order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlanarMap {
    rotations: Vec<Vec<usize>>,
}

impl PlanarMap {
    /// Build from 0-based clockwise neighbor lists.
    ///
    /// Adjacency must be symmetric with matching multiplicities.
    pub fn new(rotations: Vec<Vec<usize>>) -> Result<Self> {
        let n = rotations.len();
        let mut multiplicity: BTreeMap<(usize, usize), i64> = BTreeMap::new();
        for (u, around) in rotations.iter().enumerate() {
            for &v in around {
                if v >= n {
                    return Err(YamadaError::InvalidInput(format!(
                        "node {u} lists neighbor {v} of {n}"
                    )));
                }
                let key = (u.min(v), u.max(v));
                *multiplicity.entry(key).or_default() += if u <= v { 1 } else { -1 };
            }
        }
        if let Some(((u, v), _)) = multiplicity.iter().find(|&(&(u, v), &m)| u != v && m != 0) {
            return Err(YamadaError::InvalidInput(format!(
                "nodes {u} and {v} disagree on their edge count"
            )));
        }
        Ok(Self { rotations })
    }

    #[must_use]
    pub fn node_count(&self) -> usize {
        self.rotations.len()
    }

    #[must_use]
    pub fn degree(&self, node: usize) -> usize {
        self.rotations.get(node).map_or(0, Vec::len)
    }

    /// Clockwise neighbors of `node`.
    #[must_use]
    pub fn rotation(&self, node: usize) -> &[usize] {
        self.rotations.get(node).map(Vec::as_slice).unwrap_or(&[])
    }

    fn node_label(&self, node: usize) -> Label {
        let prefix = if self.degree(node) == CROSSING_DEGREE {
            CROSSING_PREFIX
        } else {
            NODE_PREFIX
        };
        Label::new(format!("{prefix}{}", node + 1))
    }

    /// The unassigned diagram of this map.
    ///
    /// Four-valent nodes become crossings `x{k}`, the others vertices
    /// `n{k}`, and every map edge becomes an edge. Rotations are reversed
    /// into anticlockwise corner order. Parallel edges are paired so the
    /// result embeds in the sphere.
    pub fn to_shadow(&self) -> Result<SpatialGraphDiagram> {
        for node in 0..self.node_count() {
            if self.degree(node) == 0 {
                return Err(YamadaError::InvalidInput(format!("node {} is isolated", node + 1)));
            }
            if self.rotation(node).contains(&node) {
                return Err(YamadaError::InvalidInput(format!("node {} has a loop", node + 1)));
            }
        }

        let bundles = self.bundles();
        let mut choice = vec![0usize; bundles.len()];
        for _ in 0..MAX_PAIRING_CANDIDATES {
            let diagram = self.build(&bundles, &choice)?;
            if diagram.is_planar()? {
                return Ok(diagram);
            }
            if !advance(&mut choice, &bundles) {
                return Err(YamadaError::InvalidInput(
                    "no pairing of parallel edges embeds in the sphere".to_string(),
                ));
            }
        }
        Err(YamadaError::IterationLimit {
            context: "parallel edge pairing",
            limit: MAX_PAIRING_CANDIDATES,
        })
    }

    /// Anticlockwise corner lists of every node pair `u < v`.
    fn bundles(&self) -> Vec<Bundle> {
        let mut corners: BTreeMap<(usize, usize), (Vec<usize>, Vec<usize>)> = BTreeMap::new();
        for node in 0..self.node_count() {
            for (corner, &other) in self.rotation(node).iter().rev().enumerate() {
                let entry = corners.entry((node.min(other), node.max(other))).or_default();
                if node < other {
                    entry.0.push(corner);
                } else {
                    entry.1.push(corner);
                }
            }
        }
        corners
            .into_iter()
            .map(|((low, high), (low_corners, high_corners))| Bundle {
                low,
                high,
                low_corners,
                high_corners,
            })
            .collect()
    }

    fn build(&self, bundles: &[Bundle], choice: &[usize]) -> Result<SpatialGraphDiagram> {
        let mut diagram = SpatialGraphDiagram::empty();
        for node in 0..self.node_count() {
            let label = self.node_label(node);
            let element = if self.degree(node) == CROSSING_DEGREE {
                Element::crossing(label)
            } else {
                Element::vertex(label, self.degree(node))?
            };
            diagram.add_element(element)?;
        }
        let mut count = 0;
        for (bundle, &shift) in bundles.iter().zip(choice) {
            let low = self.node_label(bundle.low);
            let high = self.node_label(bundle.high);
            let m = bundle.low_corners.len();
            for (t, &low_corner) in bundle.low_corners.iter().enumerate() {
                // Reversed order, rotated by `shift`.
                let high_corner = bundle.high_corners[(m - 1 - t + shift) % m];
                count += 1;
                let edge = format!("{EDGE_PREFIX}{count}");
                diagram.add_edge(&edge, low.as_str(), low_corner, high.as_str(), high_corner)?;
            }
        }
        diagram.finish(BuildOptions::raw())
    }
}

/// Parallel edges between `low` and `high`, as corner lists on each end.
#[derive(Debug)]
struct Bundle {
    low: usize,
    high: usize,
    low_corners: Vec<usize>,
    high_corners: Vec<usize>,
}

/// Odometer over the cyclic shift of each bundle.
fn advance(choice: &mut [usize], bundles: &[Bundle]) -> bool {
    for (shift, bundle) in choice.iter_mut().zip(bundles) {
        if *shift + 1 < bundle.low_corners.len() {
            *shift += 1;
            return true;
        }
        *shift = 0;
    }
    false
}

// =============================================================================
// STREAM DECODING
// =============================================================================

struct Reader<'a> {
    bytes: &'a [u8],
    pos: usize,
    wide: bool,
    big_endian: bool,
}

impl Reader<'_> {
    fn at_end(&self) -> bool {
        self.pos >= self.bytes.len()
    }

    fn byte(&mut self) -> Result<u8> {
        let value = self
            .bytes
            .get(self.pos)
            .copied()
            .ok_or_else(|| YamadaError::Parse(format!("truncated at byte {}", self.pos)))?;
        self.pos += 1;
        Ok(value)
    }

    fn entry(&mut self) -> Result<usize> {
        if !self.wide {
            return self.byte().map(usize::from);
        }
        let pair = [self.byte()?, self.byte()?];
        let value = if self.big_endian {
            u16::from_be_bytes(pair)
        } else {
            u16::from_le_bytes(pair)
        };
        Ok(usize::from(value))
    }

    fn graph(&mut self) -> Result<PlanarMap> {
        self.wide = false;
        let mut n = self.entry()?;
        if n == 0 {
            self.wide = true;
            n = self.entry()?;
        }
        let mut rotations = Vec::with_capacity(n);
        for _ in 0..n {
            let mut around = Vec::new();
            loop {
                let neighbor = self.entry()?;
                if neighbor == 0 {
                    break;
                }
                if neighbor > n {
                    return Err(YamadaError::Parse(format!(
                        "neighbor {neighbor} exceeds vertex count {n}"
                    )));
                }
                around.push(neighbor - 1);
            }
            rotations.push(around);
        }
        PlanarMap::new(rotations)
    }
}

/// Decode every map in a `planar_code` stream.
pub fn read_planar_code(bytes: &[u8]) -> Result<Vec<PlanarMap>> {
    let mut start = 0;
    let mut big_endian = false;
    if bytes.starts_with(HEADER_PREFIX) {
        let end = bytes
            .windows(HEADER_SUFFIX.len())
            .position(|w| w == HEADER_SUFFIX)
            .ok_or_else(|| YamadaError::Parse("unterminated planar_code header".to_string()))?;
        big_endian = bytes[HEADER_PREFIX.len()..end].ends_with(b"be");
        start = end + HEADER_SUFFIX.len();
    }
    let mut reader = Reader {
        bytes: &bytes[start..],
        pos: 0,
        wide: false,
        big_endian,
    };
    let mut maps = Vec::new();
    while !reader.at_end() {
        maps.push(reader.graph()?);
    }
    Ok(maps)
}

// =============================================================================
// TESTS
// =============================================================================
