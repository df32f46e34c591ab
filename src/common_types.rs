//! Samples and datasets shared by the index, the weight tracker and the classifier.

use crate::error::{KnnError, check_dimension};

/// Binary class label. `UNLABELED` marks a sample whose outcome is unknown.
pub type Label = i32;

pub const NEGATIVE: Label = 0;
pub const POSITIVE: Label = 1;
pub const UNLABELED: Label = -1;

/// A single sample: a fixed-length feature vector and its label.
///
/// - `F`: The feature element type (e.g., `f64`, `f32`).
#[derive(Debug, Clone, PartialEq)]
pub struct Sample<F> {
    pub features: Vec<F>,
    pub label: Label,
}

impl<F> Sample<F> {
    pub fn new(features: Vec<F>, label: Label) -> Self {
        Sample { features, label }
    }

    /// A sample whose label is not known (e.g. a query from a test set).
    pub fn unlabeled(features: Vec<F>) -> Self {
        Sample {
            features,
            label: UNLABELED,
        }
    }

    pub fn is_labeled(&self) -> bool {
        self.label != UNLABELED
    }
}

/// An ordered, fixed-size collection of samples that all share `n_features`.
///
/// Indexes and trackers borrow from a `Dataset`; they never take ownership of it.
#[derive(Debug, Clone, PartialEq)]
pub struct Dataset<F> {
    n_features: usize,
    samples: Vec<Sample<F>>,
}

impl<F> Dataset<F> {
    /// Validates and wraps `samples`.
    ///
    /// Every sample must have exactly `n_features` features and a label in `{0, 1, -1}`.
    pub fn new(n_features: usize, samples: Vec<Sample<F>>) -> Result<Self, KnnError> {
        if n_features == 0 {
            return Err(KnnError::ZeroFeatures);
        }
        for (index, sample) in samples.iter().enumerate() {
            check_dimension(n_features, sample.features.len())?;
            if !matches!(sample.label, NEGATIVE | POSITIVE | UNLABELED) {
                return Err(KnnError::InvalidLabel {
                    index,
                    label: sample.label,
                });
            }
        }
        Ok(Dataset {
            n_features,
            samples,
        })
    }

    /// Pairs feature rows with labels; without labels every row is unlabeled.
    ///
    /// `n_features` is explicit so that an empty set of rows still has a shape.
    pub fn from_rows(
        n_features: usize,
        rows: Vec<Vec<F>>,
        labels: Option<Vec<Label>>,
    ) -> Result<Self, KnnError> {
        let labels = labels.unwrap_or_else(|| vec![UNLABELED; rows.len()]);
        if labels.len() != rows.len() {
            return Err(KnnError::LabelCountMismatch {
                rows: rows.len(),
                labels: labels.len(),
            });
        }
        let samples = rows
            .into_iter()
            .zip(labels)
            .map(|(features, label)| Sample::new(features, label))
            .collect();
        Self::new(n_features, samples)
    }

    pub fn empty(n_features: usize) -> Result<Self, KnnError> {
        Self::new(n_features, Vec::new())
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    pub fn n_features(&self) -> usize {
        self.n_features
    }

    pub fn samples(&self) -> &[Sample<F>] {
        &self.samples
    }

    pub fn get(&self, index: usize) -> Option<&Sample<F>> {
        self.samples.get(index)
    }

    /// Feature vector of sample `index`.
    ///
    /// # Panics
    /// Panics if `index` is out of range.
    pub fn features(&self, index: usize) -> &[F] {
        &self.samples[index].features
    }

    /// Label of sample `index`.
    ///
    /// # Panics
    /// Panics if `index` is out of range.
    pub fn label(&self, index: usize) -> Label {
        self.samples[index].label
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Sample<F>> {
        self.samples.iter()
    }

    /// Position of the first unlabeled sample, if any.
    pub fn first_unlabeled(&self) -> Option<usize> {
        self.samples.iter().position(|s| !s.is_labeled())
    }
}

impl<'a, F> IntoIterator for &'a Dataset<F> {
    type Item = &'a Sample<F>;
    type IntoIter = std::slice::Iter<'a, Sample<F>>;

    fn into_iter(self) -> Self::IntoIter {
        self.samples.iter()
    }
}
