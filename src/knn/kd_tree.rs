//! The k-d tree index over a borrowed [`Dataset`].
//!
//! Nodes hold a borrowed slice of one sample's features, never a copy, so a
//! `KdTree<'a, F>` cannot outlive the dataset it was built from. Children are
//! exclusively owned boxes; dropping the tree releases every node exactly once.

use num_traits::{AsPrimitive, Float};
use ordered_float::OrderedFloat;
use tracing::debug;

use super::distance::squared_distance;
use super::neighbor_list::{BoundedNeighborList, Neighbor};
use crate::common_types::Dataset;
use crate::error::{KnnError, check_dimension};

#[derive(Debug)]
pub struct KdTree<'a, F> {
    root: Option<Box<TreeNode<'a, F>>>,
    dataset: &'a Dataset<F>,
}

#[derive(Debug)]
struct TreeNode<'a, F> {
    point: &'a [F],
    /// Position of `point`'s sample in the dataset.
    index: usize,
    splitting_dimension: usize,
    left: Option<Box<TreeNode<'a, F>>>,
    right: Option<Box<TreeNode<'a, F>>>,
}

impl<'a, F> KdTree<'a, F>
where
    F: Float + AsPrimitive<f64>,
{
    /// Builds the tree by recursive median partitioning.
    ///
    /// The splitting dimension cycles with depth (`depth % n_features`). At each
    /// level the median is placed with a selection rather than a full sort, so
    /// construction is O(n log n) expected. An empty dataset yields an empty tree.
    pub fn build(dataset: &'a Dataset<F>) -> Self {
        let mut indices: Vec<usize> = (0..dataset.len()).collect();
        let root = Self::build_recursive(dataset, &mut indices, 0);
        let tree = KdTree { root, dataset };
        debug!(
            samples = dataset.len(),
            features = dataset.n_features(),
            depth = tree.depth(),
            "built k-d tree"
        );
        tree
    }

    fn build_recursive(
        dataset: &'a Dataset<F>,
        indices: &mut [usize],
        depth: usize,
    ) -> Option<Box<TreeNode<'a, F>>> {
        if indices.is_empty() {
            return None;
        }

        let splitting_dimension = depth % dataset.n_features();
        let median_idx = indices.len() / 2;

        let (left_slice, median, right_slice) = indices
            .select_nth_unstable_by_key(median_idx, |&i| {
                OrderedFloat(dataset.features(i)[splitting_dimension].as_())
            });
        let index = *median;

        let left = Self::build_recursive(dataset, left_slice, depth + 1);
        let right = Self::build_recursive(dataset, right_slice, depth + 1);

        Some(Box::new(TreeNode {
            point: dataset.features(index),
            index,
            splitting_dimension,
            left,
            right,
        }))
    }

    pub fn len(&self) -> usize {
        self.dataset.len()
    }

    pub fn is_empty(&self) -> bool {
        self.root.is_none()
    }

    pub fn n_features(&self) -> usize {
        self.dataset.n_features()
    }

    /// The dataset this tree borrows from.
    pub fn dataset(&self) -> &'a Dataset<F> {
        self.dataset
    }

    /// Number of levels; 0 for an empty tree.
    pub fn depth(&self) -> usize {
        fn depth_of<F>(node: &Option<Box<TreeNode<'_, F>>>) -> usize {
            match node {
                Some(n) => 1 + depth_of(&n.left).max(depth_of(&n.right)),
                None => 0,
            }
        }
        depth_of(&self.root)
    }

    fn check_query(&self, query: &[F], weights: Option<&[f64]>) -> Result<(), KnnError> {
        check_dimension(self.n_features(), query.len())?;
        if let Some(w) = weights {
            check_dimension(self.n_features(), w.len())?;
        }
        Ok(())
    }

    /// Indices of the `k` nearest samples to `query`, ascending by distance.
    ///
    /// Returns fewer than `k` indices when the dataset has fewer than `k`
    /// samples, and an empty vector for an empty tree.
    pub fn find_k_nearest(
        &self,
        query: &[F],
        k: usize,
        weights: Option<&[f64]>,
    ) -> Result<Vec<usize>, KnnError> {
        Ok(self
            .search(query, k, weights)?
            .into_indices())
    }

    /// Like [`find_k_nearest`](Self::find_k_nearest) but keeps the (weighted) distances.
    pub fn find_k_nearest_with_distances(
        &self,
        query: &[F],
        k: usize,
        weights: Option<&[f64]>,
    ) -> Result<Vec<Neighbor>, KnnError> {
        Ok(self
            .search(query, k, weights)?
            .into_neighbors()
            .into_iter()
            .map(|n| Neighbor::new(n.index, n.distance.sqrt()))
            .collect())
    }

    fn search(
        &self,
        query: &[F],
        k: usize,
        weights: Option<&[f64]>,
    ) -> Result<BoundedNeighborList, KnnError> {
        if k == 0 {
            return Err(KnnError::InvalidK { k });
        }
        self.check_query(query, weights)?;

        let mut best_k = BoundedNeighborList::new(k.min(self.len()));
        Self::search_recursive(&self.root, query, weights, &mut best_k);
        Ok(best_k)
    }

    /// Branch-and-bound descent. `best_k` holds weighted squared distances.
    fn search_recursive(
        current_node_opt: &Option<Box<TreeNode<'a, F>>>,
        query: &[F],
        weights: Option<&[f64]>,
        best_k: &mut BoundedNeighborList,
    ) {
        let Some(current_node) = current_node_opt else {
            return;
        };

        best_k.offer(
            squared_distance(query, current_node.point, weights),
            current_node.index,
        );

        let dim = current_node.splitting_dimension;
        let weight = weights.map_or(1.0, |w| w[dim]);
        let gap = query[dim].as_() - current_node.point[dim].as_();

        let (near_child, far_child) = if gap * weight < 0.0 {
            (&current_node.left, &current_node.right)
        } else {
            (&current_node.right, &current_node.left)
        };

        Self::search_recursive(near_child, query, weights, best_k);

        // Every point across the hyperplane is at least this far away, on the
        // same weighted squared scale as the kept distances.
        let hyperplane_sq = weight * gap * gap;
        if best_k
            .worst_distance()
            .map_or(true, |worst| hyperplane_sq < worst)
        {
            Self::search_recursive(far_child, query, weights, best_k);
        }
    }

    /// All samples within `radius` of `query` (inclusive), ascending by distance.
    ///
    /// A non-positive or NaN radius yields an empty result.
    pub fn find_within_radius(
        &self,
        query: &[F],
        radius: f64,
        weights: Option<&[f64]>,
    ) -> Result<Vec<Neighbor>, KnnError> {
        self.check_query(query, weights)?;
        if radius.is_nan() || radius <= 0.0 {
            return Ok(Vec::new());
        }

        let mut found = Vec::new();
        Self::search_radius_recursive(&self.root, query, radius, weights, &mut found);
        found.sort_by(Neighbor::cmp_by_distance);
        Ok(found)
    }

    /// Like `search_recursive`, but on rooted distances against a fixed radius.
    fn search_radius_recursive(
        current_node_opt: &Option<Box<TreeNode<'a, F>>>,
        query: &[F],
        radius: f64,
        weights: Option<&[f64]>,
        found: &mut Vec<Neighbor>,
    ) {
        let Some(current_node) = current_node_opt else {
            return;
        };

        let dist = squared_distance(query, current_node.point, weights).sqrt();
        if dist <= radius {
            found.push(Neighbor::new(current_node.index, dist));
        }

        let dim = current_node.splitting_dimension;
        let weight = weights.map_or(1.0, |w| w[dim]);
        let gap = query[dim].as_() - current_node.point[dim].as_();

        let (near_child, far_child) = if gap * weight < 0.0 {
            (&current_node.left, &current_node.right)
        } else {
            (&current_node.right, &current_node.left)
        };

        Self::search_radius_recursive(near_child, query, radius, weights, found);
        if (weight * gap * gap).sqrt() <= radius {
            Self::search_radius_recursive(far_child, query, radius, weights, found);
        }
    }
}
