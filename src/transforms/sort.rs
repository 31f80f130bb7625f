//! Stable sorting by natural order or by a derived key.

use crate::error::Result;
use crate::transform::{Transform, impl_compose_operator};
use ordered_float::OrderedFloat;
use std::cmp::Ordering;
use std::sync::Arc;

type Sorter<T> = Arc<dyn Fn(&mut Vec<T>, bool) -> Result<()> + Send + Sync>;

/// Stable sort, ascending unless [`reversed`](Sort::reversed).
///
/// Elements that compare equal keep their original relative order in both
/// directions. Key functions run once per element, before any comparison.
pub struct Sort<T> {
    sorter: Sorter<T>,
    reverse: bool,
}

#[inline]
fn directed(ord: Ordering, reverse: bool) -> Ordering {
    if reverse { ord.reverse() } else { ord }
}

impl<T: Ord + 'static> Sort<T> {
    /// Sort by the elements' own ordering.
    pub fn new() -> Self {
        Self {
            sorter: Arc::new(|items: &mut Vec<T>, reverse| {
                items.sort_by(|a, b| directed(a.cmp(b), reverse));
                Ok(())
            }),
            reverse: false,
        }
    }
}

impl<T: Ord + 'static> Default for Sort<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: 'static> Sort<T> {
    /// Sort by `key_fn(element)`.
    pub fn by_key<K, F>(key_fn: F) -> Self
    where
        K: Ord + 'static,
        F: Fn(&T) -> K + Send + Sync + 'static,
    {
        Self::try_by_key(move |item: &T| Ok::<K, anyhow::Error>(key_fn(item)))
    }

    /// Like [`Sort::by_key`], for a key function that can fail. On error the
    /// input is consumed and the error returned unchanged.
    pub fn try_by_key<K, E, F>(key_fn: F) -> Self
    where
        K: Ord + 'static,
        E: Into<anyhow::Error>,
        F: Fn(&T) -> std::result::Result<K, E> + Send + Sync + 'static,
    {
        Self {
            sorter: Arc::new(move |items: &mut Vec<T>, reverse| {
                let mut keyed = Vec::with_capacity(items.len());
                for item in items.drain(..) {
                    let key = key_fn(&item).map_err(Into::into)?;
                    keyed.push((key, item));
                }
                keyed.sort_by(|a, b| directed(a.0.cmp(&b.0), reverse));
                items.extend(keyed.into_iter().map(|(_, item)| item));
                Ok(())
            }),
            reverse: false,
        }
    }

    /// Sort by a floating-point key, using IEEE total order (`NaN` sorts last).
    pub fn by_float_key<F>(key_fn: F) -> Self
    where
        F: Fn(&T) -> f64 + Send + Sync + 'static,
    {
        Self::by_key(move |item: &T| OrderedFloat(key_fn(item)))
    }
}

impl<T> Sort<T> {
    /// Flip the direction to descending.
    #[must_use]
    pub fn reversed(mut self) -> Self {
        self.reverse = !self.reverse;
        self
    }

    /// Set the direction explicitly.
    #[must_use]
    pub fn reverse(mut self, reverse: bool) -> Self {
        self.reverse = reverse;
        self
    }

    /// True when sorting descending.
    pub fn is_reversed(&self) -> bool {
        self.reverse
    }
}

impl<T> Transform for Sort<T> {
    type Input = Vec<T>;
    type Output = Vec<T>;

    fn apply(&self, input: Vec<T>) -> Result<Vec<T>> {
        let mut items = input;
        (self.sorter)(&mut items, self.reverse)?;
        Ok(items)
    }

    fn name(&self) -> &'static str {
        "sort"
    }
}

impl_compose_operator!(Sort<T>);
