//! Configuration for a k-NN classification run.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::error::{KnnError, check_dimension};
use crate::weights::WeightProvider;

/// How distances are weighted during a run. Fixed at classifier construction.
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum WeightMode {
    #[default]
    Unweighted,
    /// One weight per feature, constant for the run.
    Static(Vec<f64>),
    /// Weights start at 1.0 and adapt after every labeled query.
    Adaptive,
}

/// Configuration for a k-NN classifier.
///
/// # Example
///
/// ```
/// use adaptive_knn::{ClassifierConfig, WeightMode};
///
/// let config = ClassifierConfig::new(5).with_static_weights(vec![2.0, 3.0, 1.5]);
///
/// assert_eq!(config.k(), 5);
/// assert!(config.validate(3).is_ok());
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ClassifierConfig {
    /// Number of neighbors that vote.
    k: usize,
    mode: WeightMode,
}

impl ClassifierConfig {
    pub const DEFAULT_K: usize = 5;

    pub fn new(k: usize) -> Self {
        Self {
            k,
            mode: WeightMode::Unweighted,
        }
    }

    pub fn with_mode(mut self, mode: WeightMode) -> Self {
        self.mode = mode;
        self
    }

    pub fn with_static_weights(self, weights: Vec<f64>) -> Self {
        self.with_mode(WeightMode::Static(weights))
    }

    pub fn with_adaptive_weights(self) -> Self {
        self.with_mode(WeightMode::Adaptive)
    }

    pub fn k(&self) -> usize {
        self.k
    }

    pub fn mode(&self) -> &WeightMode {
        &self.mode
    }

    /// Validates this configuration against a dataset of `n_features` features.
    ///
    /// Returns an error if k < 1 or a static weight vector has the wrong length.
    pub fn validate(&self, n_features: usize) -> Result<(), KnnError> {
        if self.k < 1 {
            return Err(KnnError::InvalidK { k: self.k });
        }
        if n_features == 0 {
            return Err(KnnError::ZeroFeatures);
        }
        if let WeightMode::Static(weights) = &self.mode {
            check_dimension(n_features, weights.len())?;
        }
        Ok(())
    }

    /// Validates, then turns the weight mode into a ready provider.
    pub fn into_provider(self, n_features: usize) -> Result<WeightProvider, KnnError> {
        self.validate(n_features)?;
        match self.mode {
            WeightMode::Unweighted => Ok(WeightProvider::Unweighted),
            WeightMode::Static(weights) => Ok(WeightProvider::fixed(weights)),
            WeightMode::Adaptive => WeightProvider::adaptive(n_features),
        }
    }
}

impl Default for ClassifierConfig {
    fn default() -> Self {
        Self::new(Self::DEFAULT_K)
    }
}
