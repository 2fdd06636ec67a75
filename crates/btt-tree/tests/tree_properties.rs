//! Structural properties of the Bruhat-Tits tree over ℚ_p and 𝔽_3(x).
//!
//! Vertices come both from shallow coordinates and from walks 64 to 90
//! levels deep, where `π`-powers and matrix entries leave machine integers.

use btt_fields::{Adic, DVField, ExtendedInt, FunctionField, Rational, Ring};
use btt_linalg::Matrix;
use btt_tree::{BruhatTitsTree, UnrootedTree, Vertex};
use proptest::prelude::*;

/* ---------------------------------- strategies --------------------------------- */

prop_compose! {
    fn adic_vertex(p: i64)(num in 0i64..400, shift in 0u32..4, n in -3i64..5) -> (Rational, i64) {
        (Rational::new(num, p.pow(shift)).unwrap(), n)
    }
}

prop_compose! {
    fn adic_matrix()(entries in prop::collection::vec(-30i64..30, 4)) -> [i64; 4] {
        [entries[0], entries[1], entries[2], entries[3]]
    }
}

prop_compose! {
    /// `num · 3^(−shift)` at level `n`, with a full-width numerator.
    fn deep_adic_vertex()(num in any::<i64>(), shift in 0i64..40, n in -70i64..70) -> (Rational, i64) {
        let f = Adic::new(3).unwrap();
        (f.multiply(&Rational::int(num), &f.from_val(ExtendedInt::Finite(-shift))), n)
    }
}

#[track_caller]
fn tree(p: i64) -> BruhatTitsTree<Adic> {
    BruhatTitsTree::new(Adic::new(p).unwrap()).unwrap()
}

#[track_caller]
fn matrix<F: DVField + Clone>(t: &BruhatTitsTree<F>, e: [i64; 4]) -> Matrix<F::Element> {
    t.algebra().from_ints(&[&[e[0], e[1]], &[e[2], e[3]]]).unwrap()
}

/// Follow the children named by `digits`, starting at `from`.
#[track_caller]
fn walk<F: DVField + Clone>(t: &BruhatTitsTree<F>, from: &Vertex<F::Element>, digits: &[u64]) -> Vertex<F::Element> {
    digits.iter().fold(from.clone(), |v, &d| t.apply(&v, d))
}

/* ------------------------------------ checks ----------------------------------- */

#[track_caller]
fn check_neighbors<F: DVField + Clone>(t: &BruhatTitsTree<F>, v: &Vertex<F::Element>) {
    let n = t.neighbors(v).unwrap();
    assert_eq!(n.len() as u64, t.p() + 1);
    for (i, a) in n.iter().enumerate() {
        assert_eq!(a.edge, i as u64);
        assert!(n[..i].iter().all(|b| b.vertex != a.vertex), "duplicate neighbor");
        assert_eq!(t.mat_to_vertex(&t.vertex_to_mat(&a.vertex)).unwrap(), a.vertex);
        let back = t.reverse(v, a).unwrap();
        assert!(t.neighbors(&a.vertex).unwrap().contains(&back));
        assert_eq!(t.distance(v, &a.vertex).unwrap(), 1);
    }
}

#[track_caller]
fn check_path<F: DVField + Clone>(t: &BruhatTitsTree<F>, a: &Vertex<F::Element>, b: &Vertex<F::Element>) {
    let path = t.path(a, b).unwrap();
    let mut current = a.clone();
    for step in &path {
        let n = t.neighbors(&current).unwrap();
        assert!(n.contains(step), "{step:?} is not adjacent to {current:?}");
        current = step.vertex.clone();
    }
    assert_eq!(&current, b);
    assert_eq!(t.distance(b, a).unwrap(), path.len());
}

proptest! {
    #![proptest_config(ProptestConfig { cases: 64, .. ProptestConfig::default() })]

    #[test]
    fn vertex_round_trip(p in prop::sample::select(vec![2i64, 3, 5]), (u, n) in adic_vertex(3)) {
        let t = tree(p);
        let v = t.vertex(&u, n).unwrap();
        prop_assert_eq!(t.mat_to_vertex(&t.vertex_to_mat(&v)).unwrap(), v.clone());
        prop_assert_eq!(t.action(&t.algebra().one(), &v).unwrap(), v);
    }

    #[test]
    fn neighbors_are_regular((u, n) in adic_vertex(3)) {
        let t = tree(3);
        check_neighbors(&t, &t.vertex(&u, n).unwrap());
    }

    #[test]
    fn paths_connect((u1, n1) in adic_vertex(3), (u2, n2) in adic_vertex(3)) {
        let t = tree(3);
        check_path(&t, &t.vertex(&u1, n1).unwrap(), &t.vertex(&u2, n2).unwrap());
    }

    #[test]
    fn matrix_round_trip_is_same_class(e in adic_matrix()) {
        let t = tree(3);
        let m = matrix(&t, e);
        prop_assume!(!t.algebra().is_singular(&m));
        let v = t.mat_to_vertex(&m).unwrap();
        prop_assert!(t.is_same_class(&t.vertex_to_mat(&v), &m).unwrap());
        prop_assert_eq!(t.length_of_image(&m, t.origin()).unwrap(), t.distance(t.origin(), &v).unwrap() as i64);
    }

    #[test]
    fn action_is_an_isometry(e in adic_matrix(), (u1, n1) in adic_vertex(3), (u2, n2) in adic_vertex(3)) {
        let t = tree(3);
        let m = matrix(&t, e);
        prop_assume!(!t.algebra().is_singular(&m));
        let (a, b) = (t.vertex(&u1, n1).unwrap(), t.vertex(&u2, n2).unwrap());
        let (ma, mb) = (t.action(&m, &a).unwrap(), t.action(&m, &b).unwrap());
        prop_assert_eq!(t.distance(&ma, &mb).unwrap(), t.distance(&a, &b).unwrap());
        prop_assert_eq!(t.translation_distance(&m, &a).unwrap(), t.distance(&a, &ma).unwrap() as i64);
    }

    #[test]
    fn translation_distance_is_bounded_below(e in adic_matrix(), (u, n) in adic_vertex(3)) {
        let t = tree(3);
        let m = matrix(&t, e);
        prop_assume!(!t.algebra().is_singular(&m));
        let v = t.vertex(&u, n).unwrap();
        let d = t.translation_distance(&m, &v).unwrap();
        prop_assert!(d >= t.min_vertex_translation_distance(&m).unwrap());
        prop_assert!(d >= t.translation_length(&m).unwrap());
    }

    #[test]
    fn hyperbolic_min_vertex_is_on_axis(e in adic_matrix()) {
        let t = tree(3);
        let m = matrix(&t, e);
        prop_assume!(!t.algebra().is_singular(&m));
        prop_assume!(t.translation_length(&m).unwrap() > 0);
        let v = t.min_translation_vertex(&m).unwrap();
        prop_assert!(t.is_on_axis(&m, &v).unwrap());
        prop_assert_eq!(t.translation_distance(&m, &v).unwrap(), t.min_vertex_translation_distance(&m).unwrap());
    }

    #[test]
    fn deep_walks_and_paths(p in prop::sample::select(vec![2i64, 3, 5]),
                            first in prop::collection::vec(any::<u64>(), 64..90),
                            split in 0usize..64,
                            second in prop::collection::vec(any::<u64>(), 0..20)) {
        let t = tree(p);
        let q = t.p();
        let first: Vec<u64> = first.into_iter().map(|d| d % q).collect();
        let second: Vec<u64> = first[..split].iter().copied().chain(second.into_iter().map(|d| d % q)).collect();
        let a = walk(&t, t.origin(), &first);
        let b = walk(&t, t.origin(), &second);
        prop_assert_eq!(a.n as usize, first.len());

        let path = t.path(t.origin(), &a).unwrap();
        prop_assert_eq!(path.iter().map(|s| s.edge).collect::<Vec<_>>(), first.clone());
        prop_assert_eq!(t.mat_to_vertex(&t.vertex_to_mat(&a)).unwrap(), a.clone());

        let shared = first.iter().zip(&second).take_while(|(x, y)| x == y).count();
        prop_assert_eq!(t.distance(&a, &b).unwrap(), first.len() + second.len() - 2 * shared);
        check_path(&t, &a, &b);
        check_neighbors(&t, &a);
    }

    #[test]
    fn deep_coordinates_are_regular((u1, n1) in deep_adic_vertex(), (u2, n2) in deep_adic_vertex()) {
        let t = tree(3);
        let (a, b) = (t.vertex(&u1, n1).unwrap(), t.vertex(&u2, n2).unwrap());
        prop_assert_eq!(t.mat_to_vertex(&t.vertex_to_mat(&a)).unwrap(), a.clone());
        check_neighbors(&t, &a);
        check_path(&t, &a, &b);
    }

    #[test]
    fn large_matrices_act_isometrically(e in prop::collection::vec(any::<i32>(), 4), (u1, n1) in deep_adic_vertex(), (u2, n2) in deep_adic_vertex()) {
        let t = tree(3);
        let m = matrix(&t, [e[0].into(), e[1].into(), e[2].into(), e[3].into()]);
        prop_assume!(!t.algebra().is_singular(&m));
        // push the entries past 64 bits as well
        let m = t.algebra().multiply(&m, &t.vertex_to_mat(&Vertex { u: Rational::int(0), n: 45 }));
        let (a, b) = (t.vertex(&u1, n1).unwrap(), t.vertex(&u2, n2).unwrap());
        let (ma, mb) = (t.action(&m, &a).unwrap(), t.action(&m, &b).unwrap());
        prop_assert_eq!(t.distance(&ma, &mb).unwrap(), t.distance(&a, &b).unwrap());
        prop_assert_eq!(t.translation_distance(&m, &a).unwrap(), t.distance(&a, &ma).unwrap() as i64);
    }

    #[test]
    fn function_field_paths(a in prop::collection::vec(0i64..3, 0..4), n1 in -2i64..4,
                            b in prop::collection::vec(0i64..3, 0..4), n2 in -2i64..4) {
        let f = FunctionField::new(3).unwrap();
        let t = BruhatTitsTree::new(f.clone()).unwrap();
        let va = t.vertex(&f.from_ints(&a), n1).unwrap();
        let vb = t.vertex(&f.from_ints(&b), n2).unwrap();
        check_neighbors(&t, &va);
        check_path(&t, &va, &vb);
    }
}

#[test]
fn deep_function_field_walk() {
    let f = FunctionField::new(3).unwrap();
    let t = BruhatTitsTree::new(f).unwrap();
    let digits: Vec<u64> = (0..70u64).map(|i| (i * i + 1) % 3).collect();
    let v = walk(&t, t.origin(), &digits);
    assert_eq!(v.n, 70);
    let path = t.path(t.origin(), &v).unwrap();
    assert_eq!(path.iter().map(|s| s.edge).collect::<Vec<_>>(), digits);
    assert_eq!(t.distance(&v, &t.apply_inf(t.origin()).unwrap()).unwrap(), 71);
}

#[test]
fn ball_sizes_follow_regularity() {
    for p in [2i64, 3, 5] {
        let t = tree(p);
        let q = usize::try_from(p).unwrap();
        // 1 + (p+1) + (p+1)p + (p+1)p^2
        let expected = 1 + (q + 1) * (1 + q + q * q);
        assert_eq!(t.ball(t.origin(), 3).unwrap().len(), expected);
    }
}
