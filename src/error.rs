//! Error types for the adaptive_knn crate.

/// Error type for all fallible operations in the adaptive_knn crate.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum KnnError {
    /// Two vectors that are combined (or a vector and a weight vector) differ in length.
    #[error("dimension mismatch: expected {expected} features, found {found}")]
    DimensionMismatch {
        /// Dimensionality the operation was set up for.
        expected: usize,
        /// Dimensionality that was actually supplied.
        found: usize,
    },

    /// Classification was requested against an index built from zero samples.
    #[error("cannot classify: the training set is empty")]
    EmptyTrainingSet,

    /// Returned when k is zero.
    #[error("k must be >= 1, got {k}")]
    InvalidK {
        /// The invalid k value.
        k: usize,
    },

    /// A dataset or weight tracker was declared with zero features.
    #[error("feature count must be >= 1")]
    ZeroFeatures,

    /// A sample carries a label outside `{0, 1, -1}`.
    #[error("sample {index} has label {label}, expected 0, 1 or -1")]
    InvalidLabel {
        /// Position of the offending sample.
        index: usize,
        /// The label it carried.
        label: i32,
    },

    /// A training sample has the unknown label and would be counted as a vote.
    #[error("training sample {index} is unlabeled")]
    UnlabeledTrainingSample {
        /// Position of the offending sample.
        index: usize,
    },

    /// Feature rows and labels were supplied in different numbers.
    #[error("label count mismatch: {rows} feature rows but {labels} labels")]
    LabelCountMismatch {
        /// Number of feature rows.
        rows: usize,
        /// Number of labels.
        labels: usize,
    },

    /// A static weight vector was supplied together with adaptive weighting.
    #[error("static weights cannot be combined with adaptive weighting")]
    ConflictingWeightModes,

    /// An adaptive update was given no neighbors to average over.
    #[error("adaptive update requires at least one neighbor")]
    EmptyNeighborhood,

    /// A neighbor index does not address a sample of the dataset.
    #[error("neighbor index {index} out of range for dataset of {len} samples")]
    NeighborOutOfRange {
        /// The out-of-range index.
        index: usize,
        /// Number of samples in the dataset.
        len: usize,
    },
}

/// Checks that `found` matches the `expected` dimensionality.
pub(crate) fn check_dimension(expected: usize, found: usize) -> Result<(), KnnError> {
    if expected != found {
        return Err(KnnError::DimensionMismatch { expected, found });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_dimension_mismatch() {
        let e = KnnError::DimensionMismatch {
            expected: 7,
            found: 6,
        };
        assert_eq!(
            e.to_string(),
            "dimension mismatch: expected 7 features, found 6"
        );
    }

    #[test]
    fn error_invalid_k() {
        let e = KnnError::InvalidK { k: 0 };
        assert_eq!(e.to_string(), "k must be >= 1, got 0");
    }

    #[test]
    fn error_invalid_label() {
        let e = KnnError::InvalidLabel { index: 3, label: 2 };
        assert_eq!(e.to_string(), "sample 3 has label 2, expected 0, 1 or -1");
    }

    #[test]
    fn error_neighbor_out_of_range() {
        let e = KnnError::NeighborOutOfRange { index: 9, len: 4 };
        assert_eq!(
            e.to_string(),
            "neighbor index 9 out of range for dataset of 4 samples"
        );
    }

    #[test]
    fn error_label_count_mismatch() {
        let e = KnnError::LabelCountMismatch { rows: 3, labels: 2 };
        assert_eq!(
            e.to_string(),
            "label count mismatch: 3 feature rows but 2 labels"
        );
    }

    #[test]
    fn check_dimension_reports_both_sides() {
        assert!(check_dimension(3, 3).is_ok());
        assert_eq!(
            check_dimension(3, 2),
            Err(KnnError::DimensionMismatch {
                expected: 3,
                found: 2
            })
        );
    }

    #[test]
    fn error_is_send_and_sync() {
        fn assert_impl<T: std::error::Error + Send + Sync>() {}
        assert_impl::<KnnError>();
    }
}
