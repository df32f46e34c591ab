//! Property-based tests for the index and distance functions.
//!
//! These check invariants that must hold for any input:
//! - a sample finds itself at distance zero
//! - results are sorted ascending by independently recomputed distance
//! - result length is min(k, n)
//! - all-ones weights reproduce unweighted distance
//! - the tree agrees with exhaustive search under arbitrary weights

use adaptive_knn::knn::brute_force;
use adaptive_knn::{Dataset, Sample, build_index, distance};
use proptest::prelude::*;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

const DIM: usize = 3;

prop_compose! {
    fn arb_vector(dim: usize)(vec in prop::collection::vec(-10.0f64..10.0, dim)) -> Vec<f64> {
        vec
    }
}

prop_compose! {
    fn arb_dataset(max_len: usize)(
        points in prop::collection::vec(arb_vector(DIM), 1..max_len)
    ) -> Dataset<f64> {
        let samples = points
            .into_iter()
            .enumerate()
            .map(|(i, p)| Sample::new(p, (i % 2) as i32))
            .collect();
        Dataset::new(DIM, samples).unwrap()
    }
}

prop_compose! {
    fn arb_weights(dim: usize)(vec in prop::collection::vec(0.0f64..5.0, dim)) -> Vec<f64> {
        vec
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn every_sample_finds_itself(ds in arb_dataset(60)) {
        let index = build_index(&ds);
        let ones = [1.0; DIM];
        for i in 0..ds.len() {
            let found = index
                .find_k_nearest_with_distances(ds.features(i), 1, Some(&ones[..]))
                .unwrap();
            prop_assert_eq!(found.len(), 1);
            prop_assert_eq!(found[0].distance, 0.0);
        }
    }

    #[test]
    fn results_are_sorted_and_sized(
        ds in arb_dataset(60),
        query in arb_vector(DIM),
        weights in arb_weights(DIM),
        k in 1usize..80,
    ) {
        let index = build_index(&ds);
        let result = index.find_k_nearest(&query, k, Some(&weights[..])).unwrap();
        prop_assert_eq!(result.len(), k.min(ds.len()));

        let recomputed: Vec<f64> = result
            .iter()
            .map(|&i| distance(&query, ds.features(i), Some(&weights[..])).unwrap())
            .collect();
        prop_assert!(
            recomputed.windows(2).all(|w| w[0] <= w[1]),
            "distances not ascending: {:?}", recomputed
        );

        let mut unique = result.clone();
        unique.sort_unstable();
        unique.dedup();
        prop_assert_eq!(unique.len(), result.len(), "duplicate indices in {:?}", result);
    }

    #[test]
    fn tree_agrees_with_exhaustive_search(
        ds in arb_dataset(80),
        query in arb_vector(DIM),
        weights in arb_weights(DIM),
        k in 1usize..12,
    ) {
        let index = build_index(&ds);
        let tree: Vec<f64> = index
            .find_k_nearest_with_distances(&query, k, Some(&weights[..]))
            .unwrap()
            .iter()
            .map(|n| n.distance)
            .collect();
        let exhaustive: Vec<f64> = brute_force::k_nearest(&ds, &query, k, Some(&weights[..]))
            .unwrap()
            .iter()
            .map(|n| n.distance)
            .collect();
        prop_assert_eq!(tree, exhaustive);
    }

    #[test]
    fn unit_weights_equal_unweighted(
        a in arb_vector(7),
        b in arb_vector(7),
    ) {
        let ones = [1.0; 7];
        let weighted = distance(&a, &b, Some(&ones[..])).unwrap();
        let plain = distance(&a, &b, None).unwrap();
        prop_assert!((weighted - plain).abs() <= 1e-12 * plain.max(1.0));
    }

    #[test]
    fn radius_search_matches_filtered_exhaustive(
        ds in arb_dataset(60),
        query in arb_vector(DIM),
        weights in arb_weights(DIM),
        radius in 0.1f64..15.0,
    ) {
        let index = build_index(&ds);
        let mut got: Vec<usize> = index
            .find_within_radius(&query, radius, Some(&weights[..]))
            .unwrap()
            .iter()
            .map(|n| n.index)
            .collect();
        got.sort_unstable();

        let expected: Vec<usize> = (0..ds.len())
            .filter(|&i| distance(&query, ds.features(i), Some(&weights[..])).unwrap() <= radius)
            .collect();
        prop_assert_eq!(got, expected);
    }
}

fn random_dataset(rng: &mut StdRng, n: usize, dim: usize) -> Dataset<f64> {
    let samples = (0..n)
        .map(|_| {
            let features = (0..dim).map(|_| rng.gen_range(0.0..1.0)).collect();
            Sample::new(features, rng.gen_range(0..2))
        })
        .collect();
    Dataset::new(dim, samples).unwrap()
}

#[test]
fn large_seven_feature_dataset_matches_exhaustive_search() {
    let mut rng = StdRng::seed_from_u64(42);
    let ds = random_dataset(&mut rng, 2_000, 7);
    let index = build_index(&ds);
    assert_eq!(index.depth(), 11); // ceil(log2(2001))

    let weights = [2.0, 3.0, 1.5, 1.0, 1.0, 1.2, 0.5];
    for _ in 0..100 {
        let query: Vec<f64> = (0..7).map(|_| rng.gen_range(-0.2..1.2)).collect();
        let tree: Vec<f64> = index
            .find_k_nearest_with_distances(&query, 5, Some(&weights[..]))
            .unwrap()
            .iter()
            .map(|n| n.distance)
            .collect();
        let exhaustive: Vec<f64> = brute_force::k_nearest(&ds, &query, 5, Some(&weights[..]))
            .unwrap()
            .iter()
            .map(|n| n.distance)
            .collect();
        assert_eq!(tree, exhaustive);
    }
}

#[test]
fn duplicate_points_are_all_reachable() {
    let samples = (0..9).map(|i| Sample::new(vec![1.0, 1.0], i % 2)).collect();
    let ds = Dataset::new(2, samples).unwrap();
    let index = build_index(&ds);
    let mut found = index.find_k_nearest(&[1.0, 1.0], 9, None).unwrap();
    found.sort_unstable();
    assert_eq!(found, (0..9usize).collect::<Vec<_>>());
}
