//! # Property-Based Tests
//!
//! Normal-form laws of the polynomial and move invariance over random
//! braid and theta closures.

mod common;

use common::{Closure, braid, theta_closure};
use proptest::collection::vec;
use proptest::prelude::*;
use proptest::test_runner::TestCaseError;
use yamada_core::{
    LaurentPoly, MultiGraph, SpatialGraphDiagram, apply_r1, apply_r2, apply_r3, has_r1, has_r2,
    has_r3, normalize_poly, reidemeister_simplify, reverse_poly,
};

fn poly_strategy() -> impl Strategy<Value = LaurentPoly> {
    (-8i32..8, vec(-5i64..=5, 0..10))
        .prop_map(|(start, coefficients)| LaurentPoly::from_coefficients(start, &coefficients))
}

fn closure_strategy() -> impl Strategy<Value = Closure> {
    prop_oneof![Just(Closure::Plain), Just(Closure::Graph), Just(Closure::Four)]
}

fn word(strands: usize, letters: &[(bool, usize)]) -> Vec<i32> {
    letters
        .iter()
        .map(|&(positive, k)| {
            let generator = (1 + k % (strands - 1)) as i32;
            if positive { generator } else { -generator }
        })
        .collect()
}

/// Random closed braid with 2 to 4 strands and up to 5 crossings.
fn diagram_strategy() -> impl Strategy<Value = SpatialGraphDiagram> {
    (2usize..=4, vec((any::<bool>(), 0usize..3), 1..=5), closure_strategy())
        .prop_map(|(strands, letters, closure)| braid(strands, &word(strands, &letters), closure))
}

/// Braid closures of every kind plus three-strand theta closures, up to 7
/// crossings.
fn mixed_diagram_strategy() -> impl Strategy<Value = SpatialGraphDiagram> {
    let letters = vec((any::<bool>(), 0usize..3), 1..=7);
    prop_oneof![
        (2usize..=4, letters.clone(), closure_strategy()).prop_map(
            |(strands, letters, closure)| braid(strands, &word(strands, &letters), closure)
        ),
        letters.prop_map(|letters| theta_closure(3, &word(3, &letters))),
    ]
}

/// Checks that `after` is a valid sphere diagram of the same spatial graph.
fn same_class(
    after: &SpatialGraphDiagram,
    graph: &MultiGraph,
    crossings: usize,
    expected: &LaurentPoly,
) -> Result<(), TestCaseError> {
    after.validate().expect("valid");
    prop_assert_eq!(after.crossing_count(), crossings);
    prop_assert!(after.is_planar().expect("planar"));
    prop_assert!(after.underlying_graph().expect("graph").is_isomorphic(graph));
    prop_assert_eq!(&after.normalized_yamada_polynomial().expect("poly"), expected);
    Ok(())
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(48))]

    /// Normalizing twice changes nothing.
    #[test]
    fn normalize_is_idempotent(p in poly_strategy()) {
        let once = normalize_poly(&p);
        prop_assert_eq!(normalize_poly(&once), once);
    }

    /// Mirror substitution is an involution.
    #[test]
    fn reverse_is_involution(p in poly_strategy()) {
        prop_assert_eq!(reverse_poly(&reverse_poly(&p)), p);
    }

    /// Unit multiples and the mirror share a normal form.
    #[test]
    fn normal_form_ignores_units_and_mirror(p in poly_strategy(), k in -6i32..6) {
        let target = normalize_poly(&p);
        let sign = if k.rem_euclid(2) == 0 { 1 } else { -1 };
        prop_assert_eq!(normalize_poly(&p.shift(k).scale(sign)), target.clone());
        prop_assert_eq!(normalize_poly(&reverse_poly(&p)), target);
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(24))]

    /// Every available move keeps the normalized polynomial and the sphere
    /// embedding, and changes the crossing count by its fixed amount.
    #[test]
    fn moves_are_invariant(d in diagram_strategy()) {
        let expected = d.normalized_yamada_polynomial().expect("poly");
        let graph = d.underlying_graph().expect("graph");
        let n = d.crossing_count();

        for crossing in has_r1(&d).expect("r1") {
            let after = apply_r1(&d, crossing.as_str()).expect("apply r1");
            same_class(&after, &graph, n - 1, &expected)?;
        }
        for (a, b) in has_r2(&d).expect("r2") {
            let after = apply_r2(&d, (a.as_str(), b.as_str())).expect("apply r2");
            same_class(&after, &graph, n - 2, &expected)?;
        }
        for mv in has_r3(&d).expect("r3") {
            let after = apply_r3(&d, &mv).expect("apply r3");
            same_class(&after, &graph, n, &expected)?;
        }
    }

    /// A chain of R3 moves followed by every R2 and R1 move, then a full
    /// simplification, never leaves the isotopy class.
    #[test]
    fn move_chains_are_invariant(
        d in mixed_diagram_strategy(),
        picks in vec(any::<usize>(), 1..=4),
    ) {
        let expected = d.normalized_yamada_polynomial().expect("poly");
        let graph = d.underlying_graph().expect("graph");
        let n = d.crossing_count();

        let mut current = d;
        for pick in picks {
            let moves = has_r3(&current).expect("r3");
            if moves.is_empty() {
                break;
            }
            current = apply_r3(&current, &moves[pick % moves.len()]).expect("apply r3");
            same_class(&current, &graph, n, &expected)?;
        }

        for (a, b) in has_r2(&current).expect("r2") {
            let after = apply_r2(&current, (a.as_str(), b.as_str())).expect("apply r2");
            same_class(&after, &graph, n - 2, &expected)?;
        }
        for crossing in has_r1(&current).expect("r1") {
            let after = apply_r1(&current, crossing.as_str()).expect("apply r1");
            same_class(&after, &graph, n - 1, &expected)?;
        }

        let outcome = reidemeister_simplify(&current, 4).expect("simplify");
        let left = outcome.diagram.crossing_count();
        same_class(&outcome.diagram, &graph, left, &expected)?;
    }

    /// Simplification never adds crossings and keeps the polynomial.
    #[test]
    fn simplify_is_monotone(d in diagram_strategy()) {
        let outcome = reidemeister_simplify(&d, 4).expect("simplify");
        prop_assert!(outcome.diagram.crossing_count() <= d.crossing_count());
        prop_assert_eq!(
            outcome.diagram.crossing_count() + outcome.r1 + 2 * outcome.r2,
            d.crossing_count()
        );
        prop_assert_eq!(
            outcome.diagram.normalized_yamada_polynomial().expect("poly"),
            d.normalized_yamada_polynomial().expect("poly")
        );
    }

    /// Copies are independent and equal.
    #[test]
    fn copy_preserves_everything(d in diagram_strategy()) {
        let copy = d.copy();
        prop_assert_eq!(&copy, &d);
        prop_assert_eq!(copy.faces().expect("faces"), d.faces().expect("faces"));
        prop_assert!(d.is_planar().expect("planar"));
    }
}
