//! Assertion functions for pipeline outputs.
//!
//! Besides plain comparisons, these check the structural contracts of the
//! sequence primitives: windows are contiguous slices, batches partition the
//! input, and groups are order-preserving partitions.

use crate::transforms::Groups;
use std::collections::HashMap;
use std::fmt::Debug;
use std::hash::Hash;

/// Assert that two collections are equal in order and content.
///
/// # Panics
///
/// Panics if the collections differ in length or content.
///
/// ```
/// use ironpipe::testing::assert_collections_equal;
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

    for (i, (a, e)) in actual.iter().zip(expected).enumerate() {
        assert_eq!(
            a, e,
            "Collection mismatch at index {i}:\n  Expected: {e:?}\n  Actual: {a:?}"
        );
    }
}

/// Assert that `actual` holds exactly the elements of `expected`, counting
/// duplicates, in any order.
///
/// # Panics
///
/// Panics if some element occurs a different number of times.
///
/// ```
/// use ironpipe::testing::assert_is_permutation;
///
/// assert_is_permutation(&[3, 1, 3, 2], &[1, 2, 3, 3]);
/// ```
pub fn assert_is_permutation<T: Debug + Eq + Hash>(actual: &[T], expected: &[T]) {
    let mut counts: HashMap<&T, isize> = HashMap::new();
    for e in expected {
        *counts.entry(e).or_default() += 1;
    }
    for a in actual {
        *counts.entry(a).or_default() -= 1;
    }
    let off: Vec<_> = counts.into_iter().filter(|(_, n)| *n != 0).collect();
    assert!(
        off.is_empty(),
        "Not a permutation (positive = missing, negative = extra): {off:?}\n  Expected: {expected:?}\n  Actual: {actual:?}"
    );
}

/// Assert that `windows` is exactly the sliding-window output for `input`:
/// `max(0, (n - size) / step + 1)` windows, window `i` equal to
/// `input[i * step..i * step + size]`.
///
/// # Panics
///
/// Panics on a wrong window count or a window that is not the expected slice.
pub fn assert_windows_contiguous<T: Debug + PartialEq>(
    input: &[T],
    windows: &[Vec<T>],
    size: usize,
    step: usize,
) {
    let expected_count = if input.len() >= size {
        (input.len() - size) / step + 1
    } else {
        0
    };
    assert_eq!(
        windows.len(),
        expected_count,
        "Window count mismatch for n={}, size={size}, step={step}",
        input.len()
    );
    for (i, window) in windows.iter().enumerate() {
        let start = i * step;
        assert_eq!(
            window.as_slice(),
            &input[start..start + size],
            "Window {i} is not the slice starting at {start}"
        );
    }
}

/// Assert that `chunks` is `input` split into consecutive runs of
/// `batch_size`, with only the last run allowed to be shorter.
///
/// # Panics
///
/// Panics on a wrong chunk count, an undersized inner chunk, or content that
/// does not concatenate back to `input`.
pub fn assert_batches_partition<T: Debug + PartialEq>(
    input: &[T],
    chunks: &[Vec<T>],
    batch_size: usize,
) {
    assert_eq!(
        chunks.len(),
        input.len().div_ceil(batch_size),
        "Chunk count mismatch for n={}, batch_size={batch_size}",
        input.len()
    );
    if let Some((last, full)) = chunks.split_last() {
        for (i, chunk) in full.iter().enumerate() {
            assert_eq!(chunk.len(), batch_size, "Chunk {i} is not full: {chunk:?}");
        }
        assert!(
            (1..=batch_size).contains(&last.len()),
            "Last chunk has bad length {}: {last:?}",
            last.len()
        );
    }
    let rejoined: Vec<&T> = chunks.iter().flatten().collect();
    let original: Vec<&T> = input.iter().collect();
    assert_eq!(rejoined, original, "Chunks do not concatenate back to the input");
}

/// Assert that `groups` is an order-preserving partition of `input`: the
/// groups together are a permutation of the input, and each group lists its
/// elements in their input order.
///
/// # Panics
///
/// Panics if an element is lost, duplicated, or reordered within its group.
pub fn assert_groups_partition<K, T>(input: &[T], groups: &Groups<K, T>)
where
    K: Debug,
    T: Debug + Eq + Hash,
{
    let concatenated: Vec<&T> = groups.iter().flat_map(|(_, vs)| vs.iter()).collect();
    let original: Vec<&T> = input.iter().collect();
    assert_is_permutation(&concatenated, &original);

    for (key, members) in groups.iter() {
        let mut rest = input.iter();
        for member in members {
            assert!(
                rest.any(|x| x == member),
                "Group {key:?} is not in input order: {members:?}"
            );
        }
    }
}

/// Assert that all elements in a collection satisfy a predicate.
///
/// # Panics
///
/// Panics if any element does not satisfy the predicate.
///
/// ```
/// use ironpipe::testing::assert_all;
///
/// assert_all(&[2, 4, 6, 8], |x| x % 2 == 0);
/// ```
pub fn assert_all<T: Debug>(collection: &[T], predicate: impl Fn(&T) -> bool) {
    for (i, item) in collection.iter().enumerate() {
        assert!(
            predicate(item),
            "Predicate failed for element at index {i}:\n  Element: {item:?}\n  Collection: {collection:?}"
        );
    }
}
