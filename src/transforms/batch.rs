//! Fixed-size chunking.

use crate::error::{Result, TransformError};
use crate::transform::{Transform, impl_compose_operator};
use std::marker::PhantomData;

/// Split a sequence into consecutive chunks of `batch_size`.
///
/// Every chunk but the last is full; the last holds the remainder, giving
/// `ceil(n / batch_size)` chunks for `n` elements. Elements are moved, not
/// cloned.
#[derive(Debug, Clone, Copy)]
pub struct Batch<T> {
    size: usize,
    _t: PhantomData<fn(T) -> T>,
}

impl<T> Batch<T> {
    /// Chunks of `batch_size`; zero fails with [`TransformError::InvalidParameter`].
    ///
    /// ```
    /// use ironpipe::*;
    ///
    /// # fn main() -> anyhow::Result<()> {
    /// assert_eq!(Batch::new(2)?.apply(vec![1, 2, 3])?, vec![vec![1, 2], vec![3]]);
    /// assert!(Batch::<u8>::new(0).is_err());
    /// # Ok(())
    /// # }
    /// ```
    pub fn new(batch_size: usize) -> Result<Self> {
        if batch_size == 0 {
            return Err(TransformError::invalid("batch_size", "batch size must be > 0").into());
        }
        Ok(Self {
            size: batch_size,
            _t: PhantomData,
        })
    }

    /// The configured chunk size.
    pub fn batch_size(&self) -> usize {
        self.size
    }
}

impl<T> Transform for Batch<T> {
    type Input = Vec<T>;
    type Output = Vec<Vec<T>>;

    fn apply(&self, input: Vec<T>) -> Result<Vec<Vec<T>>> {
        let mut chunks = Vec::with_capacity(input.len().div_ceil(self.size));
        let mut items = input.into_iter().peekable();
        while items.peek().is_some() {
            chunks.push(items.by_ref().take(self.size).collect());
        }
        Ok(chunks)
    }

    fn name(&self) -> &'static str {
        "batch"
    }
}

impl_compose_operator!(Batch<T>);
