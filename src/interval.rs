//! Interval partitioning for paging long episode lists.

use crate::types::{Episode, Interval};
use log::debug;
use std::sync::Arc;

/// Maximum number of episodes shown per interval.
pub const INTERVAL_SIZE: usize = 100;

/// Split `len` episode indices into consecutive intervals of at most
/// [`INTERVAL_SIZE`] items.
///
/// An interval opens at every index that is a multiple of the interval size
/// and ends 99 indices later or at the last episode, whichever comes first.
///
/// # Examples
///
/// ```
/// use episode_browser::interval::partition;
/// use episode_browser::types::Interval;
///
/// assert_eq!(
///     partition(150),
///     vec![Interval::new(0, 99), Interval::new(100, 149)]
/// );
/// assert!(partition(0).is_empty());
/// ```
pub fn partition(len: usize) -> Vec<Interval> {
    (0..len)
        .step_by(INTERVAL_SIZE)
        .map(|start| Interval::new(start, (start + INTERVAL_SIZE - 1).min(len - 1)))
        .collect()
}

/// Memoized interval list for an episode sequence.
///
/// The cache is keyed by the identity of the shared episode slice, so it is
/// only rebuilt when the caller hands over a different sequence.
#[derive(Debug, Default)]
pub struct IntervalCache {
    source: Option<Arc<[Episode]>>,
    intervals: Vec<Interval>,
    recomputations: usize,
}

impl IntervalCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Intervals for `episodes`, recomputed only if the sequence changed.
    pub fn get(&mut self, episodes: &Arc<[Episode]>) -> &[Interval] {
        let fresh = self
            .source
            .as_ref()
            .is_some_and(|cached| Arc::ptr_eq(cached, episodes));

        if !fresh {
            self.intervals = partition(episodes.len());
            self.source = Some(Arc::clone(episodes));
            self.recomputations += 1;
            debug!(
                "Partitioned {} episodes into {} intervals",
                episodes.len(),
                self.intervals.len()
            );
        }

        &self.intervals
    }

    /// How many times the interval list has been computed.
    pub fn recomputations(&self) -> usize {
        self.recomputations
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn episodes(count: usize) -> Arc<[Episode]> {
        (1..=count)
            .map(|n| Episode {
                id: format!("e{}", n),
                number: n as i64,
                title: format!("Episode {}", n),
                image: String::new(),
            })
            .collect()
    }

    #[test]
    fn test_partition_counts() {
        assert_eq!(partition(0).len(), 0);
        assert_eq!(partition(1).len(), 1);
        assert_eq!(partition(99).len(), 1);
        assert_eq!(partition(100).len(), 1);
        assert_eq!(partition(101).len(), 2);
        assert_eq!(partition(250).len(), 3);
    }

    #[test]
    fn test_partition_bounds() {
        let intervals = partition(250);
        assert_eq!(
            intervals,
            vec![
                Interval::new(0, 99),
                Interval::new(100, 199),
                Interval::new(200, 249),
            ]
        );
    }

    #[test]
    fn test_partition_covers_every_index_once() {
        for len in [1, 7, 100, 101, 199, 200, 1001] {
            let intervals = partition(len);
            let mut expected_start = 0;
            for interval in &intervals {
                assert_eq!(interval.start, expected_start);
                assert_eq!(interval.start % INTERVAL_SIZE, 0);
                assert!(interval.start <= interval.end);
                assert_eq!(interval.end, (interval.start + 99).min(len - 1));
                expected_start = interval.end + 1;
            }
            assert_eq!(expected_start, len);
        }
    }

    #[test]
    fn test_cache_reuses_same_sequence() {
        let eps = episodes(150);
        let mut cache = IntervalCache::new();

        assert_eq!(cache.get(&eps).len(), 2);
        assert_eq!(cache.get(&Arc::clone(&eps)).len(), 2);
        assert_eq!(cache.recomputations(), 1);
    }

    #[test]
    fn test_cache_recomputes_on_new_sequence() {
        let mut cache = IntervalCache::new();

        assert_eq!(cache.get(&episodes(150)).len(), 2);
        // Same content, different allocation.
        assert_eq!(cache.get(&episodes(150)).len(), 2);
        assert_eq!(cache.get(&episodes(10)).len(), 1);
        assert_eq!(cache.recomputations(), 3);
    }

    #[test]
    fn test_cache_empty_sequence() {
        let mut cache = IntervalCache::new();
        assert!(cache.get(&episodes(0)).is_empty());
        assert_eq!(cache.recomputations(), 1);
    }
}
