//! Majority-vote classification over the k-d tree, with optional adaptive feedback.

use num_traits::{AsPrimitive, Float};
use tracing::{debug, warn};

use super::kd_tree::KdTree;
use crate::common_types::{Dataset, Label, NEGATIVE, POSITIVE, Sample, UNLABELED};
use crate::config::ClassifierConfig;
use crate::error::{KnnError, check_dimension};
use crate::weights::WeightProvider;

/// A predicted label together with the neighbors that voted for it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Prediction {
    pub label: Label,
    /// Training-set positions, nearest first.
    pub neighbors: Vec<usize>,
}

/// Binary majority vote over neighbor labels.
///
/// Predicts `POSITIVE` iff `2 * positive_votes >= neighbor_count`, so an even
/// split resolves to the positive class. With no neighbors there is nothing to
/// vote on and the result is [`KnnError::EmptyTrainingSet`].
pub fn majority_vote<I>(labels: I) -> Result<Label, KnnError>
where
    I: IntoIterator<Item = Label>,
{
    let mut positive_votes = 0usize;
    let mut neighbor_count = 0usize;
    for label in labels {
        neighbor_count += 1;
        if label == POSITIVE {
            positive_votes += 1;
        }
    }
    if neighbor_count == 0 {
        return Err(KnnError::EmptyTrainingSet);
    }
    Ok(if 2 * positive_votes >= neighbor_count {
        POSITIVE
    } else {
        NEGATIVE
    })
}

/// Queries `index` with the provider's current weights and votes.
///
/// A neighbor carrying the unknown label is an `UnlabeledTrainingSample` error,
/// never a vote.
pub fn predict_with<F>(
    index: &KdTree<'_, F>,
    weights: &WeightProvider,
    features: &[F],
    k: usize,
) -> Result<Prediction, KnnError>
where
    F: Float + AsPrimitive<f64>,
{
    let neighbors = index.find_k_nearest(features, k, weights.current())?;
    let dataset = index.dataset();
    if let Some(&unlabeled) = neighbors.iter().find(|&&i| dataset.label(i) == UNLABELED) {
        return Err(KnnError::UnlabeledTrainingSample { index: unlabeled });
    }
    let label = majority_vote(neighbors.iter().map(|&i| dataset.label(i)))?;
    Ok(Prediction { label, neighbors })
}

/// Predicted label for `features`; see [`predict_with`].
pub fn classify<F>(
    index: &KdTree<'_, F>,
    weights: &WeightProvider,
    features: &[F],
    k: usize,
) -> Result<Label, KnnError>
where
    F: Float + AsPrimitive<f64>,
{
    predict_with(index, weights, features, k).map(|p| p.label)
}

/// The k-nearest-neighbors classifier.
///
/// In static or unweighted mode predictions have no side effects. In adaptive
/// mode every labeled query updates the weights before the next query reads
/// them, so queries must go through `&mut self` one at a time.
#[derive(Debug)]
pub struct KnnClassifier<'a, F> {
    index: KdTree<'a, F>,
    weights: WeightProvider,
    k: usize,
}

impl<'a, F> KnnClassifier<'a, F>
where
    F: Float + AsPrimitive<f64>,
{
    /// Builds the index over `training` and fixes the weight mode for the run.
    ///
    /// Every training sample must be labeled. An empty training set is
    /// accepted here; classification against it fails with `EmptyTrainingSet`.
    pub fn new(
        training: &'a Dataset<F>,
        k: usize,
        weights: WeightProvider,
    ) -> Result<Self, KnnError> {
        if k == 0 {
            return Err(KnnError::InvalidK { k });
        }
        weights.check_features(training.n_features())?;
        if let Some(index) = training.first_unlabeled() {
            return Err(KnnError::UnlabeledTrainingSample { index });
        }

        let index = KdTree::build(training);
        debug!(k, adaptive = weights.is_adaptive(), "constructed k-NN classifier");
        Ok(Self { index, weights, k })
    }

    pub fn from_config(
        training: &'a Dataset<F>,
        config: ClassifierConfig,
    ) -> Result<Self, KnnError> {
        let k = config.k();
        let weights = config.into_provider(training.n_features())?;
        Self::new(training, k, weights)
    }

    pub fn k(&self) -> usize {
        self.k
    }

    pub fn index(&self) -> &KdTree<'a, F> {
        &self.index
    }

    pub fn weights(&self) -> &WeightProvider {
        &self.weights
    }

    /// The weight vector the next query will use; `None` when unweighted.
    pub fn current_weights(&self) -> Option<&[f64]> {
        self.weights.current()
    }

    pub fn is_adaptive(&self) -> bool {
        self.weights.is_adaptive()
    }

    /// Releases the index and hands back the (possibly adapted) weights.
    pub fn into_weights(self) -> WeightProvider {
        self.weights
    }

    /// Predicts without feeding anything back, regardless of mode.
    pub fn predict_one(&self, features: &[F]) -> Result<Prediction, KnnError> {
        predict_with(&self.index, &self.weights, features, self.k)
    }

    /// Predicts the label of `sample`; in adaptive mode a labeled sample then
    /// updates the weights.
    pub fn classify(&mut self, sample: &Sample<F>) -> Result<Label, KnnError> {
        self.classify_sample(sample).map(|p| p.label)
    }

    fn classify_sample(&mut self, sample: &Sample<F>) -> Result<Prediction, KnnError> {
        let prediction = self.predict_one(&sample.features)?;
        self.observe(sample, &prediction)?;
        Ok(prediction)
    }

    /// Returns whether the weights were updated.
    fn observe(&mut self, sample: &Sample<F>, prediction: &Prediction) -> Result<bool, KnnError> {
        if !sample.is_labeled() {
            return Ok(false);
        }
        let correct = prediction.label == sample.label;
        self.weights.record_outcome(
            &sample.features,
            &prediction.neighbors,
            self.index.dataset(),
            correct,
        )
    }

    /// Predicts every sample of `test` in order.
    pub fn predict(&mut self, test: &Dataset<F>) -> Result<Vec<Label>, KnnError> {
        Ok(self
            .predict_with_neighbors(test)?
            .into_iter()
            .map(|p| p.label)
            .collect())
    }

    /// Predicts every sample of `test` in order, keeping each neighbor set.
    ///
    /// Samples are processed strictly sequentially; in adaptive mode each
    /// labeled sample's update is applied before the next sample is queried.
    pub fn predict_with_neighbors(
        &mut self,
        test: &Dataset<F>,
    ) -> Result<Vec<Prediction>, KnnError> {
        check_dimension(self.index.n_features(), test.n_features())?;

        let mut predictions = Vec::with_capacity(test.len());
        let mut updates = 0usize;
        for sample in test {
            let prediction = self.predict_one(&sample.features)?;
            if self.observe(sample, &prediction)? {
                updates += 1;
            }
            predictions.push(prediction);
        }

        if self.is_adaptive() && updates == 0 && !test.is_empty() {
            warn!(
                queries = test.len(),
                "adaptive run saw no labeled queries; weights did not change"
            );
        }
        debug!(queries = test.len(), updates, "batch prediction finished");
        Ok(predictions)
    }
}
