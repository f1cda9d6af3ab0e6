//! Exact set-partition enumeration
//!
//! Generates every way to split N row indices into exactly K non-empty,
//! unordered subsets, as a lazy sequence. The number of partitions produced
//! is the Stirling number of the second kind S(N, K), with no duplicates —
//! exact mode's optimality guarantee rests on this exhaustiveness.

use crate::pipeline::error::GroupingError;

/// One set partition: disjoint, non-empty index subsets covering `0..n`.
pub type Partition = Vec<Vec<usize>>;

/// Lazy enumeration of all partitions of `0..n` into exactly `k` parts.
pub struct SetPartitions {
    inner: Box<dyn Iterator<Item = Partition>>,
}

impl SetPartitions {
    /// Fails when `k < 1`; yields an empty sequence when `k > n` (no valid
    /// partition exists).
    pub fn new(n: usize, k: usize) -> Result<Self, GroupingError> {
        if k < 1 {
            return Err(GroupingError::InvalidArgument(
                "cannot partition into zero groups; at least one group is required".to_string(),
            ));
        }
        if k > n {
            return Ok(Self {
                inner: Box::new(std::iter::empty()),
            });
        }
        Ok(Self {
            inner: partitions_of((0..n).collect(), k),
        })
    }
}

impl Iterator for SetPartitions {
    type Item = Partition;

    fn next(&mut self) -> Option<Partition> {
        self.inner.next()
    }
}

/// Every partition of `0..n`, for every part count 1..=n.
pub fn all_partitions(n: usize) -> impl Iterator<Item = Partition> {
    (1..=n).flat_map(move |k| partitions_of((0..n).collect(), k))
}

/// Flatten a partition into per-row group labels.
///
/// Row `i` is labeled with the position of the part containing it, so the
/// first part listed becomes group 0. Scoring is label-permutation
/// invariant, so part numbering never affects the search result.
pub fn assignment_from_partition(partition: &Partition, n_rows: usize) -> Vec<u32> {
    let mut labels = vec![0u32; n_rows];
    for (group, part) in partition.iter().enumerate() {
        for &row in part {
            labels[row] = group as u32;
        }
    }
    labels
}

/// Defer construction of a sub-iterator until it is first polled.
///
/// Both recursion branches below would otherwise be built eagerly at every
/// level, expanding the whole recursion tree before the first partition is
/// yielded.
fn defer<I, F>(f: F) -> impl Iterator<Item = I::Item>
where
    I: Iterator,
    F: FnOnce() -> I,
{
    std::iter::once(f).flat_map(|f| f())
}

/// Partitions of `items` into exactly `k` parts; callers guarantee
/// `1 <= k <= items.len()`.
///
/// Splitting off the first item `e`: either `e` forms its own part next to a
/// (k-1)-partition of the rest, or `e` joins one of the k parts of a
/// k-partition of the rest. Base cases: one part holding everything, or
/// every item alone.
fn partitions_of(items: Vec<usize>, k: usize) -> Box<dyn Iterator<Item = Partition>> {
    let n = items.len();
    if k == 1 {
        return Box::new(std::iter::once(vec![items]));
    }
    if k == n {
        return Box::new(std::iter::once(items.into_iter().map(|e| vec![e]).collect()));
    }

    let first = items[0];
    let rest = items[1..].to_vec();
    let rest_again = rest.clone();

    let alone = defer(move || partitions_of(rest, k - 1)).map(move |mut sub| {
        let mut parts = Partition::with_capacity(sub.len() + 1);
        parts.push(vec![first]);
        parts.append(&mut sub);
        parts
    });

    let joined = defer(move || partitions_of(rest_again, k)).flat_map(move |sub| {
        let slots = sub.len();
        (0..slots).map(move |slot| {
            let mut parts = sub.clone();
            parts[slot].insert(0, first);
            parts
        })
    });

    Box::new(alone.chain(joined))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single_group_and_singletons() {
        let whole: Vec<Partition> = SetPartitions::new(3, 1).unwrap().collect();
        assert_eq!(whole, vec![vec![vec![0, 1, 2]]]);

        let singles: Vec<Partition> = SetPartitions::new(3, 3).unwrap().collect();
        assert_eq!(singles, vec![vec![vec![0], vec![1], vec![2]]]);
    }

    #[test]
    fn test_three_items_two_parts() {
        // Mirrors the textbook enumeration: {a}{bc}, {ab}{c}, {b}{ac}
        let parts: Vec<Partition> = SetPartitions::new(3, 2).unwrap().collect();
        assert_eq!(
            parts,
            vec![
                vec![vec![0], vec![1, 2]],
                vec![vec![0, 1], vec![2]],
                vec![vec![1], vec![0, 2]],
            ]
        );
    }

    #[test]
    fn test_zero_groups_is_rejected() {
        assert!(SetPartitions::new(4, 0).is_err());
    }

    #[test]
    fn test_more_groups_than_items_is_empty() {
        assert_eq!(SetPartitions::new(2, 3).unwrap().count(), 0);
    }

    #[test]
    fn test_assignment_labels_follow_part_order() {
        let partition: Partition = vec![vec![1, 3], vec![0, 2]];
        assert_eq!(assignment_from_partition(&partition, 4), vec![1, 0, 1, 0]);
    }

    #[test]
    fn test_all_partitions_counts_bell_number() {
        // Bell(4) = 15
        assert_eq!(all_partitions(4).count(), 15);
    }
}
