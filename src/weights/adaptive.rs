//! Online per-feature weight adaptation driven by prediction outcomes.
//!
//! After each labeled query every feature is judged "helpful" when the query
//! and its neighbors agree closely on it. A feature scores a success when its
//! helpfulness matches the correctness of the prediction, and its weight is
//! rebuilt from the running success rate:
//!
//! ```text
//! weight[f] = successes[f] / uses[f] * 2.0 + 0.5        // in [0.5, 2.5]
//! ```
//!
//! There is no learning rate or decay; the same sequence of outcomes always
//! produces the same weights.

use num_traits::AsPrimitive;
use tracing::trace;

use crate::common_types::Dataset;
use crate::error::{KnnError, check_dimension};

/// Success/use counters for one feature.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FeatureStat {
    pub successes: u32,
    pub uses: u32,
}

impl FeatureStat {
    pub fn new(successes: u32, uses: u32) -> Self {
        FeatureStat { successes, uses }
    }

    /// `successes / uses`, or `None` before the first use.
    pub fn success_rate(&self) -> Option<f64> {
        (self.uses > 0).then(|| self.successes as f64 / self.uses as f64)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct AdaptiveWeights {
    weights: Vec<f64>,
    stats: Vec<FeatureStat>,
}

impl AdaptiveWeights {
    /// Weight of a feature that has not been used yet.
    pub const INITIAL_WEIGHT: f64 = 1.0;
    /// Mean absolute difference below which a feature counts as helpful.
    pub const HELPFUL_THRESHOLD: f64 = 0.5;
    pub const SUCCESS_SCALE: f64 = 2.0;
    pub const WEIGHT_FLOOR: f64 = 0.5;

    pub fn new(n_features: usize) -> Result<Self, KnnError> {
        if n_features == 0 {
            return Err(KnnError::ZeroFeatures);
        }
        Ok(AdaptiveWeights {
            weights: vec![Self::INITIAL_WEIGHT; n_features],
            stats: vec![FeatureStat::default(); n_features],
        })
    }

    /// Restores a tracker from saved counters; weights are recomputed from them.
    pub fn from_stats(stats: Vec<FeatureStat>) -> Result<Self, KnnError> {
        if stats.is_empty() {
            return Err(KnnError::ZeroFeatures);
        }
        let weights = stats.iter().map(Self::weight_for).collect();
        Ok(AdaptiveWeights { weights, stats })
    }

    fn weight_for(stat: &FeatureStat) -> f64 {
        match stat.success_rate() {
            Some(rate) => rate * Self::SUCCESS_SCALE + Self::WEIGHT_FLOOR,
            None => Self::INITIAL_WEIGHT,
        }
    }

    pub fn n_features(&self) -> usize {
        self.weights.len()
    }

    /// The most recently written weight vector.
    pub fn weights(&self) -> &[f64] {
        &self.weights
    }

    /// An owned copy of the current weights.
    pub fn snapshot(&self) -> Vec<f64> {
        self.weights.clone()
    }

    pub fn stats(&self) -> &[FeatureStat] {
        &self.stats
    }

    /// Folds one labeled query outcome into the counters and weights.
    ///
    /// `neighbors` are the dataset positions the query was classified from.
    /// All inputs are validated before anything is mutated.
    pub fn update<F: AsPrimitive<f64>>(
        &mut self,
        query: &[F],
        neighbors: &[usize],
        dataset: &Dataset<F>,
        prediction_was_correct: bool,
    ) -> Result<(), KnnError> {
        check_dimension(self.n_features(), query.len())?;
        check_dimension(self.n_features(), dataset.n_features())?;
        if neighbors.is_empty() {
            return Err(KnnError::EmptyNeighborhood);
        }
        if let Some(&index) = neighbors.iter().find(|&&i| i >= dataset.len()) {
            return Err(KnnError::NeighborOutOfRange {
                index,
                len: dataset.len(),
            });
        }

        for f in 0..self.n_features() {
            let helpful = Self::is_feature_helpful(f, query, neighbors, dataset);
            let stat = &mut self.stats[f];
            stat.uses += 1;
            if helpful == prediction_was_correct {
                stat.successes += 1;
            }
            self.weights[f] = Self::weight_for(stat);
            trace!(
                feature = f,
                helpful,
                successes = stat.successes,
                uses = stat.uses,
                weight = self.weights[f],
                "adaptive weight updated"
            );
        }
        Ok(())
    }

    fn is_feature_helpful<F: AsPrimitive<f64>>(
        feature: usize,
        query: &[F],
        neighbors: &[usize],
        dataset: &Dataset<F>,
    ) -> bool {
        let q = query[feature].as_();
        let total: f64 = neighbors
            .iter()
            .map(|&i| (q - dataset.features(i)[feature].as_()).abs())
            .sum();
        let avg_diff = total / neighbors.len() as f64;
        avg_diff < Self::HELPFUL_THRESHOLD
    }
}
