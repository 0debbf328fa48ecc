//! Assertion functions for testing pipeline outputs and partition layouts.

use crate::partition::PartitionSet;
use std::fmt::Debug;

/// Assert that two collections are equal in order and content.
///
/// # Panics
///
/// Panics if the collections differ in length or content.
///
/// # Example
///
/// ```
/// use flare::testing::assert_collections_equal;
///
/// assert_collections_equal(&[1, 2, 3], &[1, 2, 3]);
/// ```
pub fn assert_collections_equal<T: Debug + PartialEq>(actual: &[T], expected: &[T]) {
    assert_eq!(
        actual.len(),
        expected.len(),
        "Collection length mismatch:\n  Expected length: {}\n  Actual length: {}\n  Expected: {expected:?}\n  Actual: {actual:?}",
        expected.len(),
        actual.len()
    );

    for (i, (a, e)) in actual.iter().zip(expected.iter()).enumerate() {
        assert_eq!(
            a, e,
            "Collection mismatch at index {i}:\n  Expected: {e:?}\n  Actual: {a:?}\n  Full expected: {expected:?}\n  Full actual: {actual:?}"
        );
    }
}

/// Assert that `set` is a valid partitioning of `data`.
///
/// Checks that the ranges are contiguous, start at `0`, end at `data.len()`,
/// and that every non-empty range ends right after a `\n` or at the end of
/// the data.
///
/// # Panics
///
/// Panics on the first violated property.
///
/// # Example
///
/// ```
/// use flare::partition::PartitionSet;
/// use flare::testing::assert_partition_layout;
/// use std::io::Cursor;
///
/// let data = b"one\ntwo\nthree\n";
/// let set = PartitionSet::compute(Cursor::new(data), data.len() as u64, 2).unwrap();
/// assert_partition_layout(&set, data);
/// ```
pub fn assert_partition_layout(set: &PartitionSet, data: &[u8]) {
    let size = data.len() as u64;
    assert_eq!(
        set.file_size(),
        size,
        "Partition set built for {} bytes, data has {size}",
        set.file_size()
    );

    assert!(
        set.ranges().len() <= set.len(),
        "{} data ranges for {} partitions",
        set.ranges().len(),
        set.len()
    );

    // workers past `ranges()` read the empty range at the end by construction
    let mut expected_start = 0u64;
    for (i, r) in set.ranges().iter().enumerate() {
        assert_eq!(
            r.start, expected_start,
            "Range {i} starts at {} but previous range ended at {expected_start}\n  Ranges: {:?}",
            r.start,
            set.ranges()
        );
        assert!(
            r.start <= r.end,
            "Range {i} is inverted: [{}, {})",
            r.start,
            r.end
        );
        if !r.is_empty() && r.end != size {
            // `end` is at least 1 here, the range being non-empty
            let last = data[(r.end - 1) as usize];
            assert_eq!(
                last, b'\n',
                "Range {i} [{}, {}) does not end after a line terminator",
                r.start, r.end
            );
        }
        expected_start = r.end;
    }
    assert_eq!(
        expected_start, size,
        "Ranges stop at {expected_start}, data has {size} bytes\n  Ranges: {:?}",
        set.ranges()
    );
}
