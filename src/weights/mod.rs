//! Sources of the per-feature weight vector used by distance computations.

pub mod adaptive;

pub use adaptive::{AdaptiveWeights, FeatureStat};

use num_traits::AsPrimitive;

use crate::common_types::Dataset;
use crate::error::{KnnError, check_dimension};

/// Where a classifier gets its weights from.
#[derive(Debug, Clone, PartialEq)]
pub enum WeightProvider {
    /// Plain Euclidean distance, no weighting.
    Unweighted,
    /// A caller-supplied vector that stays fixed for the whole run.
    Static(Vec<f64>),
    /// A tracker whose weights move after every labeled query.
    Adaptive(AdaptiveWeights),
}

impl WeightProvider {
    pub fn fixed(weights: Vec<f64>) -> Self {
        WeightProvider::Static(weights)
    }

    pub fn adaptive(n_features: usize) -> Result<Self, KnnError> {
        Ok(WeightProvider::Adaptive(AdaptiveWeights::new(n_features)?))
    }

    /// Picks a provider from an optional static vector and an adaptive flag.
    ///
    /// Asking for both is `ConflictingWeightModes`.
    pub fn from_options(
        n_features: usize,
        weights: Option<Vec<f64>>,
        adaptive: bool,
    ) -> Result<Self, KnnError> {
        match (weights, adaptive) {
            (Some(_), true) => Err(KnnError::ConflictingWeightModes),
            (None, true) => Self::adaptive(n_features),
            (Some(w), false) => Ok(Self::fixed(w)),
            (None, false) => Ok(WeightProvider::Unweighted),
        }
    }

    /// Current weight vector, or `None` for unweighted distance.
    pub fn current(&self) -> Option<&[f64]> {
        match self {
            WeightProvider::Unweighted => None,
            WeightProvider::Static(weights) => Some(weights.as_slice()),
            WeightProvider::Adaptive(tracker) => Some(tracker.weights()),
        }
    }

    pub fn is_adaptive(&self) -> bool {
        matches!(self, WeightProvider::Adaptive(_))
    }

    /// Checks that the provider can weight `n_features`-dimensional vectors.
    pub fn check_features(&self, n_features: usize) -> Result<(), KnnError> {
        match self.current() {
            Some(weights) => check_dimension(n_features, weights.len()),
            None => Ok(()),
        }
    }

    /// Feeds a query outcome back to an adaptive tracker.
    ///
    /// Returns whether any weights were touched; fixed providers ignore the outcome.
    pub fn record_outcome<F: AsPrimitive<f64>>(
        &mut self,
        query: &[F],
        neighbors: &[usize],
        dataset: &Dataset<F>,
        prediction_was_correct: bool,
    ) -> Result<bool, KnnError> {
        match self {
            WeightProvider::Adaptive(tracker) => {
                tracker.update(query, neighbors, dataset, prediction_was_correct)?;
                Ok(true)
            }
            WeightProvider::Unweighted | WeightProvider::Static(_) => Ok(false),
        }
    }
}
