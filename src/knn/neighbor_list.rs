//! Fixed-capacity, always-sorted list of the best neighbor candidates seen so far.

use std::cmp::Ordering;

use ordered_float::OrderedFloat;

/// A candidate neighbor: a sample position and its distance to the query.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Neighbor {
    pub index: usize,
    pub distance: f64,
}

impl Neighbor {
    pub fn new(index: usize, distance: f64) -> Self {
        Neighbor { index, distance }
    }

    /// Orders by distance, NaN-safe.
    pub fn cmp_by_distance(&self, other: &Self) -> Ordering {
        OrderedFloat(self.distance).cmp(&OrderedFloat(other.distance))
    }
}

/// Keeps the `capacity` smallest-distance candidates, sorted ascending.
///
/// The list is scale-agnostic: the k-d tree feeds it squared distances and
/// converts on the way out.
#[derive(Debug, Clone)]
pub struct BoundedNeighborList {
    capacity: usize,
    entries: Vec<Neighbor>,
}

impl BoundedNeighborList {
    pub fn new(capacity: usize) -> Self {
        BoundedNeighborList {
            capacity,
            entries: Vec::with_capacity(capacity),
        }
    }

    /// Offers a candidate; returns whether it was kept.
    ///
    /// A candidate is kept when the list has room or it is strictly closer than
    /// the current worst entry, which is then evicted. Equal distances land
    /// after the entries already present.
    pub fn offer(&mut self, distance: f64, index: usize) -> bool {
        if self.capacity == 0 {
            return false;
        }
        if self.is_full() {
            match self.entries.last() {
                Some(worst) if distance < worst.distance => {
                    self.entries.pop();
                }
                _ => return false,
            }
        }
        let pos = self.entries.partition_point(|n| n.distance <= distance);
        self.entries.insert(pos, Neighbor::new(index, distance));
        true
    }

    pub fn is_full(&self) -> bool {
        self.entries.len() >= self.capacity
    }

    /// Worst kept distance once the list is full; `None` means an unbounded search radius.
    pub fn worst_distance(&self) -> Option<f64> {
        if self.is_full() {
            self.entries.last().map(|n| n.distance)
        } else {
            None
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn as_slice(&self) -> &[Neighbor] {
        &self.entries
    }

    pub fn into_neighbors(self) -> Vec<Neighbor> {
        self.entries
    }

    pub fn into_indices(self) -> Vec<usize> {
        self.entries.into_iter().map(|n| n.index).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bounded_list_logic() {
        let mut best = BoundedNeighborList::new(3);

        assert!(best.offer(10.0, 10));
        assert!(best.offer(5.0, 5));
        assert_eq!(best.worst_distance(), None); // not full yet
        assert!(best.offer(12.0, 12));

        assert_eq!(best.len(), 3);
        assert_eq!(best.worst_distance(), Some(12.0));

        // 4.0 beats 12.0, which is evicted
        assert!(best.offer(4.0, 4));
        assert_eq!(best.len(), 3);
        assert_eq!(best.worst_distance(), Some(10.0));

        // 15.0 does not beat 10.0
        assert!(!best.offer(15.0, 15));
        assert_eq!(best.worst_distance(), Some(10.0));

        assert_eq!(best.into_indices(), vec![4, 5, 10]);
    }

    #[test]
    fn test_tie_with_worst_is_not_kept() {
        let mut best = BoundedNeighborList::new(2);
        best.offer(1.0, 0);
        best.offer(2.0, 1);
        assert!(!best.offer(2.0, 2));
        assert_eq!(best.into_indices(), vec![0, 1]);
    }

    #[test]
    fn test_equal_distances_keep_arrival_order() {
        let mut best = BoundedNeighborList::new(4);
        best.offer(1.0, 7);
        best.offer(1.0, 3);
        best.offer(0.5, 9);
        assert_eq!(best.into_indices(), vec![9, 7, 3]);
    }

    #[test]
    fn test_zero_capacity_keeps_nothing() {
        let mut best = BoundedNeighborList::new(0);
        assert!(!best.offer(0.0, 0));
        assert!(best.is_empty());
        assert!(best.is_full());
    }

    #[test]
    fn test_partially_filled_list_stays_sorted() {
        let mut best = BoundedNeighborList::new(10);
        for (i, d) in [3.0, 1.0, 2.0].into_iter().enumerate() {
            best.offer(d, i);
        }
        let distances: Vec<f64> = best.as_slice().iter().map(|n| n.distance).collect();
        assert_eq!(distances, vec![1.0, 2.0, 3.0]);
        assert_eq!(best.capacity(), 10);
    }

    #[test]
    fn test_neighbor_ordering() {
        let a = Neighbor::new(0, 1.0);
        let b = Neighbor::new(1, 2.0);
        assert_eq!(a.cmp_by_distance(&b), Ordering::Less);
        assert_eq!(b.cmp_by_distance(&a), Ordering::Greater);
    }
}
