//! Unweighted and weighted Euclidean distance between feature vectors.
//!
//! All arithmetic happens in `f64` regardless of the feature element type.
//! The weighted and unweighted forms share one summation order so that an
//! all-ones weight vector reproduces the unweighted result bit for bit.

use num_traits::AsPrimitive;

use crate::error::{KnnError, check_dimension};

/// Squared Euclidean distance. Callers guarantee equal lengths.
pub(crate) fn squared_euclidean<F: AsPrimitive<f64>>(a: &[F], b: &[F]) -> f64 {
    a.iter()
        .zip(b.iter())
        .map(|(&x, &y)| {
            let diff = x.as_() - y.as_();
            diff * diff
        })
        .sum()
}

/// `Σ w[i] * (a[i] - b[i])^2`. Callers guarantee equal lengths.
pub(crate) fn squared_weighted_euclidean<F: AsPrimitive<f64>>(
    a: &[F],
    b: &[F],
    weights: &[f64],
) -> f64 {
    a.iter()
        .zip(b.iter())
        .zip(weights.iter())
        .map(|((&x, &y), &w)| {
            let diff = x.as_() - y.as_();
            w * diff * diff
        })
        .sum()
}

/// Squared distance, weighted when `weights` is present.
pub(crate) fn squared_distance<F: AsPrimitive<f64>>(
    a: &[F],
    b: &[F],
    weights: Option<&[f64]>,
) -> f64 {
    match weights {
        Some(w) => squared_weighted_euclidean(a, b, w),
        None => squared_euclidean(a, b),
    }
}

/// Calculates the Euclidean distance between two feature vectors.
pub fn euclidean_distance<F: AsPrimitive<f64>>(a: &[F], b: &[F]) -> Result<f64, KnnError> {
    check_dimension(a.len(), b.len())?;
    Ok(squared_euclidean(a, b).sqrt())
}

/// Calculates `sqrt(Σ w[i] * (a[i] - b[i])^2)`.
///
/// Weights are assumed finite and non-negative; they are not sanitized.
pub fn weighted_euclidean_distance<F: AsPrimitive<f64>>(
    a: &[F],
    b: &[F],
    weights: &[f64],
) -> Result<f64, KnnError> {
    check_dimension(a.len(), b.len())?;
    check_dimension(a.len(), weights.len())?;
    Ok(squared_weighted_euclidean(a, b, weights).sqrt())
}

/// Distance between `a` and `b`, weighted when a weight vector is supplied.
pub fn distance<F: AsPrimitive<f64>>(
    a: &[F],
    b: &[F],
    weights: Option<&[f64]>,
) -> Result<f64, KnnError> {
    match weights {
        Some(w) => weighted_euclidean_distance(a, b, w),
        None => euclidean_distance(a, b),
    }
}
