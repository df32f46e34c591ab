//! Python bindings, enabled with the `python` feature.

use pyo3::exceptions::PyValueError;
use pyo3::prelude::*;

use crate::common_types::Dataset;
use crate::error::KnnError;
use crate::knn::{KnnClassifier, distance};
use crate::weights::WeightProvider;

impl From<KnnError> for PyErr {
    fn from(err: KnnError) -> Self {
        PyValueError::new_err(err.to_string())
    }
}

/// Euclidean distance between two vectors of floats.
#[pyfunction]
#[pyo3(name = "euclidean_distance")]
fn euclidean_distance_py(a: Vec<f64>, b: Vec<f64>) -> PyResult<f64> {
    Ok(distance(&a, &b, None)?)
}

/// Weighted Euclidean distance: `sqrt(sum(w * (a - b)^2))`.
#[pyfunction]
#[pyo3(name = "weighted_distance")]
fn weighted_distance_py(a: Vec<f64>, b: Vec<f64>, weights: Vec<f64>) -> PyResult<f64> {
    Ok(distance(&a, &b, Some(&weights[..]))?)
}

/// Owns its training data; the Rust classifier borrows it for each call.
#[pyclass(name = "KnnClassifier")]
struct PyKnnClassifier {
    training: Dataset<f64>,
    k: usize,
    weights: WeightProvider,
}

#[pymethods]
impl PyKnnClassifier {
    /// `n_features` defaults to the row length, then to the weight count, so
    /// an empty training set can still be given a shape.
    #[new]
    #[pyo3(signature = (features, labels, k, weights = None, adaptive = false, n_features = None))]
    fn new(
        features: Vec<Vec<f64>>,
        labels: Vec<i32>,
        k: usize,
        weights: Option<Vec<f64>>,
        adaptive: bool,
        n_features: Option<usize>,
    ) -> PyResult<Self> {
        let n_features = n_features
            .or_else(|| features.first().map(Vec::len))
            .or_else(|| weights.as_ref().map(Vec::len))
            .unwrap_or(0);
        let training = Dataset::from_rows(n_features, features, Some(labels))?;
        let provider = WeightProvider::from_options(training.n_features(), weights, adaptive)?;
        // Validate everything up front so `predict` cannot fail on construction.
        let weights = KnnClassifier::new(&training, k, provider)?.into_weights();
        Ok(PyKnnClassifier {
            training,
            k,
            weights,
        })
    }

    /// Predicts each row in order. Labeled rows update adaptive weights.
    #[pyo3(signature = (features, labels = None))]
    fn predict(&mut self, features: Vec<Vec<f64>>, labels: Option<Vec<i32>>) -> PyResult<Vec<i32>> {
        if features.is_empty() {
            return Ok(Vec::new());
        }
        let test = Dataset::from_rows(self.training.n_features(), features, labels)?;
        let provider = std::mem::replace(&mut self.weights, WeightProvider::Unweighted);
        let mut classifier = KnnClassifier::new(&self.training, self.k, provider)?;
        let result = classifier.predict(&test);
        self.weights = classifier.into_weights();
        Ok(result?)
    }

    #[getter]
    fn weights(&self) -> Option<Vec<f64>> {
        self.weights.current().map(|w| w.to_vec())
    }
}

#[pymodule]
fn adaptive_knn(m: &Bound<'_, PyModule>) -> PyResult<()> {
    m.add_function(wrap_pyfunction!(euclidean_distance_py, m)?)?;
    m.add_function(wrap_pyfunction!(weighted_distance_py, m)?)?;
    m.add_class::<PyKnnClassifier>()?;
    Ok(())
}
