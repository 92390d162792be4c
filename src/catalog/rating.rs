//! Max-priority selection of facilities by rating.

use geofacility_types::Facility;
use std::cmp::Ordering;
use std::collections::BinaryHeap;
use std::sync::Arc;

#[derive(Debug, Clone)]
struct Rated {
    facility: Arc<Facility>,
    seq: u64,
}

impl PartialEq for Rated {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Rated {}

impl PartialOrd for Rated {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Rated {
    // higher rating first; among equal ratings the earlier push wins
    fn cmp(&self, other: &Self) -> Ordering {
        self.facility
            .rating
            .total_cmp(&other.facility.rating)
            .then_with(|| other.seq.cmp(&self.seq))
    }
}

/// Max-heap of facilities keyed on rating.
///
/// Equal ratings come out in push order, so feeding it a distance-sorted
/// list yields nearest-first among ties.
#[derive(Debug, Clone, Default)]
pub struct RatingSelector {
    heap: BinaryHeap<Rated>,
    next_seq: u64,
}

impl RatingSelector {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, facility: Arc<Facility>) {
        self.heap.push(Rated {
            facility,
            seq: self.next_seq,
        });
        self.next_seq += 1;
    }

    /// Highest rated facility without removing it.
    pub fn peek_max(&self) -> Option<&Arc<Facility>> {
        self.heap.peek().map(|r| &r.facility)
    }

    pub fn pop_max(&mut self) -> Option<Arc<Facility>> {
        self.heap.pop().map(|r| r.facility)
    }

    /// Pop every facility sharing the current highest rating.
    pub fn top_ties(&mut self) -> Vec<Arc<Facility>> {
        let Some(best) = self.peek_max().map(|f| f.rating) else {
            return Vec::new();
        };
        let mut ties = Vec::new();
        while self.peek_max().is_some_and(|f| f.rating.total_cmp(&best).is_eq()) {
            if let Some(f) = self.pop_max() {
                ties.push(f);
            }
        }
        ties
    }

    /// Pop at most `k` facilities, best first.
    pub fn take_top(&mut self, k: usize) -> Vec<Arc<Facility>> {
        std::iter::from_fn(|| self.pop_max()).take(k).collect()
    }

    pub fn len(&self) -> usize {
        self.heap.len()
    }

    pub fn is_empty(&self) -> bool {
        self.heap.is_empty()
    }
}

impl FromIterator<Arc<Facility>> for RatingSelector {
    fn from_iter<I: IntoIterator<Item = Arc<Facility>>>(iter: I) -> Self {
        let mut selector = Self::new();
        for facility in iter {
            selector.push(facility);
        }
        selector
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rated(name: &str, rating: f64) -> Arc<Facility> {
        Arc::new(Facility::new(name, "", 0.0, 0.0, rating, ""))
    }

    fn names(list: &[Arc<Facility>]) -> Vec<&str> {
        list.iter().map(|f| f.name.as_str()).collect()
    }

    #[test]
    fn test_pop_in_rating_order() {
        let mut selector: RatingSelector = [rated("a", 4.1), rated("b", 4.8), rated("c", 4.5)]
            .into_iter()
            .collect();

        assert_eq!(selector.len(), 3);
        assert_eq!(selector.peek_max().map(|f| f.name.as_str()), Some("b"));
        assert_eq!(names(&selector.take_top(2)), ["b", "c"]);
        assert_eq!(selector.pop_max().map(|f| f.name.clone()).as_deref(), Some("a"));
        assert!(selector.pop_max().is_none());
        assert!(selector.is_empty());
    }

    #[test]
    fn test_top_ties_in_push_order() {
        let mut selector: RatingSelector = [
            rated("near", 4.6),
            rated("low", 4.2),
            rated("far", 4.6),
            rated("mid", 4.6),
        ]
        .into_iter()
        .collect();

        assert_eq!(names(&selector.top_ties()), ["near", "far", "mid"]);
        assert_eq!(names(&selector.top_ties()), ["low"]);
        assert!(selector.top_ties().is_empty());
    }

    #[test]
    fn test_top_ties_never_empty_with_nan_on_top() {
        let mut selector: RatingSelector = [rated("good", 4.0), rated("nan", f64::NAN)]
            .into_iter()
            .collect();

        // NaN sorts above every number under total ordering
        assert_eq!(names(&selector.top_ties()), ["nan"]);
        assert_eq!(names(&selector.top_ties()), ["good"]);
    }

    #[test]
    fn test_take_top_more_than_available() {
        let mut selector = RatingSelector::new();
        selector.push(rated("only", 1.0));
        assert_eq!(selector.take_top(5).len(), 1);
    }
}
