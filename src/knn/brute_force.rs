//! Exhaustive nearest-neighbor search: scores every sample, then sorts.
//!
//! Same contract as [`KdTree::find_k_nearest_with_distances`](super::kd_tree::KdTree::find_k_nearest_with_distances);
//! useful to cross-check the tree and for very small training sets.

use num_traits::AsPrimitive;

use super::distance::squared_distance;
use super::neighbor_list::Neighbor;
use crate::common_types::Dataset;
use crate::error::{KnnError, check_dimension};

pub fn k_nearest<F: AsPrimitive<f64>>(
    dataset: &Dataset<F>,
    query: &[F],
    k: usize,
    weights: Option<&[f64]>,
) -> Result<Vec<Neighbor>, KnnError> {
    if k == 0 {
        return Err(KnnError::InvalidK { k });
    }
    check_dimension(dataset.n_features(), query.len())?;
    if let Some(w) = weights {
        check_dimension(dataset.n_features(), w.len())?;
    }

    let mut scored: Vec<Neighbor> = dataset
        .iter()
        .enumerate()
        .map(|(i, sample)| Neighbor::new(i, squared_distance(query, &sample.features, weights)))
        .collect();

    // Stable sort keeps dataset order among equal distances.
    scored.sort_by(Neighbor::cmp_by_distance);
    scored.truncate(k);
    Ok(scored
        .into_iter()
        .map(|n| Neighbor::new(n.index, n.distance.sqrt()))
        .collect())
}
