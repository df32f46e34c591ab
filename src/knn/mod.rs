//! Nearest-neighbor search and classification.

pub mod brute_force;
pub mod classifier;
pub mod distance;
pub mod kd_tree;
pub mod neighbor_list;

pub use classifier::{KnnClassifier, Prediction, classify, majority_vote, predict_with};
pub use distance::{distance, euclidean_distance, weighted_euclidean_distance};
pub use kd_tree::KdTree;
pub use neighbor_list::{BoundedNeighborList, Neighbor};
