//! Reduction over partial aggregates
//!
//! Shards build accumulators independently; [`merge_all`] combines them
//! pairwise in a balanced tree. The combination shape depends only on the
//! input order, so the same inputs always round the same way.

use crate::traits::Aggregator;

#[cfg(feature = "std")]
use std::vec::Vec;

#[cfg(not(feature = "std"))]
extern crate alloc;
#[cfg(not(feature = "std"))]
use alloc::vec::Vec;

/// Merge any number of accumulators into one
///
/// Returns an empty accumulator when `parts` is empty.
///
/// # Example
///
/// ```
/// use flowmetrics::reduce::merge_all;
/// use flowmetrics::regression::RegressionMetrics;
///
/// let shards: Vec<RegressionMetrics> = [[1.0, 2.5], [3.0, 4.5], [5.0, 6.5]]
///     .iter()
///     .map(|targets| {
///         let mut shard = RegressionMetrics::new();
///         shard.add(&[0.0, 0.0], targets).unwrap();
///         shard
///     })
///     .collect();
///
/// let total = merge_all(shards);
/// assert_eq!(total.count(), 6);
/// ```
pub fn merge_all<A, I>(parts: I) -> A
where
    A: Aggregator,
    I: IntoIterator<Item = A>,
{
    let mut level: Vec<A> = parts.into_iter().collect();

    while level.len() > 1 {
        let mut next = Vec::with_capacity((level.len() + 1) / 2);
        let mut iter = level.into_iter();
        while let Some(mut left) = iter.next() {
            if let Some(right) = iter.next() {
                left.merge_from(&right);
            }
            next.push(left);
        }
        level = next;
    }

    level.pop().unwrap_or_default()
}
