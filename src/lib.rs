//! Weighted k-nearest-neighbor binary classification.
//!
//! A [`KdTree`] is built once over a borrowed training [`Dataset`] by
//! recursive median partitioning and answers "k nearest under weight vector W"
//! queries by branch-and-bound search. A [`KnnClassifier`] majority-votes the
//! neighbors' labels and, in adaptive mode, feeds every labeled outcome back
//! into an [`AdaptiveWeights`] tracker before the next query.
//!
//! # Quick start
//!
//! ```
//! use adaptive_knn::{Dataset, KnnClassifier, Sample, WeightProvider};
//!
//! let training = Dataset::new(
//!     2,
//!     vec![
//!         Sample::new(vec![0.0, 0.0], 1),
//!         Sample::new(vec![1.0, 0.0], 0),
//!         Sample::new(vec![0.0, 1.0], 1),
//!         Sample::new(vec![10.0, 10.0], 0),
//!     ],
//! )
//! .unwrap();
//!
//! let mut classifier = KnnClassifier::new(&training, 3, WeightProvider::adaptive(2).unwrap()).unwrap();
//! let label = classifier.classify(&Sample::new(vec![0.1, 0.2], 1)).unwrap();
//! assert_eq!(label, 1);
//! ```

pub mod common_types;
pub mod config;
pub mod error;
pub mod knn;
pub mod weights;

#[cfg(feature = "python")]
mod python;

pub use common_types::{Dataset, Label, NEGATIVE, POSITIVE, Sample, UNLABELED};
pub use config::{ClassifierConfig, WeightMode};
pub use error::KnnError;
pub use knn::{
    BoundedNeighborList, KdTree, KnnClassifier, Neighbor, Prediction, classify, distance,
    euclidean_distance, majority_vote, weighted_euclidean_distance,
};
pub use weights::{AdaptiveWeights, FeatureStat, WeightProvider};

/// Builds a k-d tree over `dataset`. The tree borrows the dataset.
pub fn build_index<F>(dataset: &Dataset<F>) -> KdTree<'_, F>
where
    F: num_traits::Float + num_traits::AsPrimitive<f64>,
{
    KdTree::build(dataset)
}

/// Indices of the `k` nearest samples to `features`, ascending by distance.
pub fn query<F>(
    index: &KdTree<'_, F>,
    features: &[F],
    k: usize,
    weights: Option<&[f64]>,
) -> Result<Vec<usize>, KnnError>
where
    F: num_traits::Float + num_traits::AsPrimitive<f64>,
{
    index.find_k_nearest(features, k, weights)
}

/// A fresh adaptive weight tracker for `n_features` features.
pub fn new_tracker(n_features: usize) -> Result<AdaptiveWeights, KnnError> {
    AdaptiveWeights::new(n_features)
}
