//! Diagram builders shared by the integration tests.
//!
//! Braids run downward. Generator `k > 0` crosses strands `k-1` and `k`
//! positively, `k < 0` negatively. The first time a strand position is
//! touched its upper end is recorded as the strand's top.

#![allow(dead_code)]

use std::collections::BTreeMap;
use yamada_core::{BuildOptions, Element, LaurentPoly, Slot, SpatialGraphDiagram};

/// How the open braid ends are closed up.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Closure {
    /// Each strand position joins its own top.
    Plain,
    /// Positions 0 and 1 hang off two trivalent vertices `U` and `W`.
    Graph,
    /// Positions 0 and 1 meet at one 4-valent vertex `Q`.
    Four,
}

struct Builder {
    diagram: SpatialGraphDiagram,
    counter: usize,
}

impl Builder {
    fn fresh(&mut self, prefix: &str) -> String {
        self.counter += 1;
        format!("{prefix}{}", self.counter)
    }

    fn link(&mut self, a: &Slot, b: &Slot) {
        let label = self.fresh("e");
        self.diagram
            .add_edge(&label, a.label.as_str(), a.index, b.label.as_str(), b.index)
            .expect("link");
    }

    fn vertex(&mut self, label: &str, degree: usize) {
        self.diagram
            .add_element(Element::vertex(label, degree).expect("vertex"))
            .expect("add vertex");
    }

    fn circle(&mut self) {
        let v = self.fresh("v");
        self.vertex(&v, 2);
        self.link(&Slot::new(v.as_str(), 0), &Slot::new(v.as_str(), 1));
    }
}

fn open_braid(word: &[i32]) -> (Builder, BTreeMap<usize, Slot>, BTreeMap<usize, Slot>) {
    let mut b = Builder {
        diagram: SpatialGraphDiagram::empty(),
        counter: 0,
    };
    let mut top: BTreeMap<usize, Slot> = BTreeMap::new();
    let mut bottom: BTreeMap<usize, Slot> = BTreeMap::new();
    for (k, &g) in word.iter().enumerate() {
        let i = (g.unsigned_abs() as usize) - 1;
        let x = format!("x{k}");
        b.diagram
            .add_element(Element::crossing(x.as_str()))
            .expect("crossing");
        let (ne, nw, sw, se) = if g > 0 { (0, 1, 2, 3) } else { (3, 0, 1, 2) };
        for (p, c) in [(i, nw), (i + 1, ne)] {
            let here = Slot::new(x.as_str(), c);
            match bottom.get(&p).cloned() {
                Some(prev) => b.link(&prev, &here),
                None => {
                    top.insert(p, here);
                }
            }
        }
        bottom.insert(i, Slot::new(x.as_str(), sw));
        bottom.insert(i + 1, Slot::new(x.as_str(), se));
    }
    (b, top, bottom)
}

/// Closed braid on `strands` positions, corrected and simplified.
pub fn braid(strands: usize, word: &[i32], closure: Closure) -> SpatialGraphDiagram {
    let (mut b, top, bottom) = open_braid(word);
    let mut start = 0;
    match closure {
        Closure::Plain => {}
        Closure::Graph => {
            b.vertex("U", 3);
            b.vertex("W", 3);
            b.link(&Slot::new("U", 0), &Slot::new("W", 2));
            for (p, uc, wc) in [(0, 1, 1), (1, 2, 0)] {
                match (top.get(&p), bottom.get(&p)) {
                    (Some(t), Some(bt)) => {
                        b.link(&Slot::new("U", uc), t);
                        b.link(bt, &Slot::new("W", wc));
                    }
                    _ => b.link(&Slot::new("U", uc), &Slot::new("W", wc)),
                }
            }
            start = 2;
        }
        Closure::Four => {
            b.vertex("Q", 4);
            for (p, up, down) in [(0, 0, 3), (1, 1, 2)] {
                match (top.get(&p), bottom.get(&p)) {
                    (Some(t), Some(bt)) => {
                        b.link(t, &Slot::new("Q", up));
                        b.link(bt, &Slot::new("Q", down));
                    }
                    _ => b.link(&Slot::new("Q", up), &Slot::new("Q", down)),
                }
            }
            start = 2;
        }
    }
    for p in start..strands {
        match (top.get(&p), bottom.get(&p)) {
            (Some(t), Some(bt)) => b.link(bt, t),
            _ => b.circle(),
        }
    }
    b.diagram
        .finish(BuildOptions::default())
        .expect("braid closure")
}

/// Braid whose tops all meet at `U` and bottoms at `W`.
pub fn theta_closure(strands: usize, word: &[i32]) -> SpatialGraphDiagram {
    let (mut b, top, bottom) = open_braid(word);
    b.vertex("U", strands);
    b.vertex("W", strands);
    for p in 0..strands {
        let u = Slot::new("U", p);
        let w = Slot::new("W", strands - 1 - p);
        match (top.get(&p), bottom.get(&p)) {
            (Some(t), Some(bt)) => {
                b.link(&u, t);
                b.link(bt, &w);
            }
            _ => b.link(&u, &w),
        }
    }
    b.diagram.finish(BuildOptions::default()).expect("theta closure")
}

/// The one-crossing unknot: corners 0-1 and 2-3 each joined by an edge.
pub fn infinity() -> SpatialGraphDiagram {
    let mut d = SpatialGraphDiagram::empty();
    d.add_element(Element::crossing("x")).expect("x");
    d.add_edge("e1", "x", 0, "x", 1).expect("e1");
    d.add_edge("e2", "x", 2, "x", 3).expect("e2");
    d.finish(BuildOptions::default()).expect("infinity")
}

/// Two trivalent vertices joined by three edges.
pub fn theta() -> SpatialGraphDiagram {
    let mut d = SpatialGraphDiagram::empty();
    d.add_element(Element::vertex("a", 3).expect("a")).expect("a");
    d.add_element(Element::vertex("b", 3).expect("b")).expect("b");
    for i in 0..3 {
        d.add_edge(&format!("e{i}"), "a", i, "b", 2 - i).expect("edge");
    }
    d.finish(BuildOptions::default()).expect("theta")
}

/// Normalized theta polynomial `-A^4 - A^3 - 2*A^2 - A - 1`.
pub fn theta_normalized() -> LaurentPoly {
    LaurentPoly::from_coefficients(0, &[-1, -1, -2, -1, -1])
}

/// Normalized unknot polynomial `-A^2 - A - 1`.
pub fn unknot_normalized() -> LaurentPoly {
    LaurentPoly::from_coefficients(0, &[-1, -1, -1])
}
