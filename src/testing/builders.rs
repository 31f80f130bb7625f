//! Test data builders for flat and nested inputs.

use crate::transforms::Nested;
use std::ops::RangeInclusive;

/// A fluent builder for creating test data.
///
/// ```
/// use ironpipe::testing::TestDataBuilder;
///
/// let data = TestDataBuilder::new()
///     .add_range(1..=10)
///     .add_value(100)
///     .add_repeated(42, 5)
///     .build();
///
/// assert_eq!(data.len(), 16);
/// ```
#[derive(Default)]
pub struct TestDataBuilder<T> {
    data: Vec<T>,
}

impl<T> TestDataBuilder<T> {
    /// Create an empty builder.
    #[must_use]
    pub const fn new() -> Self {
        Self { data: Vec::new() }
    }

    /// Add a single value.
    #[must_use]
    pub fn add_value(mut self, value: T) -> Self {
        self.data.push(value);
        self
    }

    /// Add every value from an iterator.
    #[must_use]
    pub fn add_values(mut self, values: impl IntoIterator<Item = T>) -> Self {
        self.data.extend(values);
        self
    }

    /// Add `value` repeated `count` times.
    #[must_use]
    pub fn add_repeated(mut self, value: T, count: usize) -> Self
    where
        T: Clone,
    {
        self.data.extend(std::iter::repeat_n(value, count));
        self
    }

    /// Build the final collection.
    #[must_use]
    pub fn build(self) -> Vec<T> {
        self.data
    }

    /// Number of values added so far.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.data.len()
    }

    /// True when nothing has been added.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.data.is_empty()
    }
}

impl<T: From<i32>> TestDataBuilder<T> {
    /// Add an inclusive range of integers, converted to `T`.
    #[must_use]
    pub fn add_range(mut self, range: RangeInclusive<i32>) -> Self {
        self.data.extend(range.map(T::from));
        self
    }
}

/// Sequential integers `start..=end`.
///
/// ```
/// use ironpipe::testing::sequential_data;
///
/// assert_eq!(sequential_data(1, 5), vec![1, 2, 3, 4, 5]);
/// ```
#[must_use]
pub fn sequential_data(start: i32, end: i32) -> Vec<i32> {
    (start..=end).collect()
}

/// A "staircase" of nesting: `[0, [1, [2, ... [depth]]]]`, as a top-level
/// sequence with `depth` levels of lists below it.
///
/// ```
/// use ironpipe::testing::staircase;
/// use ironpipe::Nested;
///
/// assert_eq!(staircase(1), vec![Nested::Item(0), Nested::list([Nested::Item(1)])]);
/// ```
#[must_use]
pub fn staircase(depth: usize) -> Vec<Nested<i32>> {
    let mut inner: Option<Nested<i32>> = None;
    for level in (1..=depth).rev() {
        let mut items = vec![Nested::Item(level as i32)];
        items.extend(inner.take());
        inner = Some(Nested::List(items));
    }
    let mut top = vec![Nested::Item(0)];
    top.extend(inner);
    top
}

/// Wrap every element of `items` in `depth` singleton lists.
#[must_use]
pub fn wrap_each<T>(items: Vec<T>, depth: usize) -> Vec<Nested<T>> {
    items
        .into_iter()
        .map(|item| (0..depth).fold(Nested::Item(item), |acc, _| Nested::List(vec![acc])))
        .collect()
}
