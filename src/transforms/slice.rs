//! Prefix slicing: [`Take`] and [`Skip`].

use crate::error::Result;
use crate::transform::{Transform, impl_compose_operator};
use std::marker::PhantomData;

/// Keep only the first `n` elements.
#[derive(Debug, Clone, Copy)]
pub struct Take<T> {
    n: usize,
    _t: PhantomData<fn(T) -> T>,
}

impl<T> Take<T> {
    /// Keep at most `n` elements.
    pub fn new(n: usize) -> Self {
        Self { n, _t: PhantomData }
    }
}

impl<T> Transform for Take<T> {
    type Input = Vec<T>;
    type Output = Vec<T>;

    fn apply(&self, mut input: Vec<T>) -> Result<Vec<T>> {
        input.truncate(self.n);
        Ok(input)
    }

    fn name(&self) -> &'static str {
        "take"
    }
}

impl_compose_operator!(Take<T>);

/// Drop the first `n` elements.
#[derive(Debug, Clone, Copy)]
pub struct Skip<T> {
    n: usize,
    _t: PhantomData<fn(T) -> T>,
}

impl<T> Skip<T> {
    /// Skip `n` elements.
    pub fn new(n: usize) -> Self {
        Self { n, _t: PhantomData }
    }
}

impl<T> Transform for Skip<T> {
    type Input = Vec<T>;
    type Output = Vec<T>;

    fn apply(&self, mut input: Vec<T>) -> Result<Vec<T>> {
        let cut = self.n.min(input.len());
        Ok(input.split_off(cut))
    }

    fn name(&self) -> &'static str {
        "skip"
    }
}

impl_compose_operator!(Skip<T>);
