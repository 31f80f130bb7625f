//! Element-wise transforms: [`Filter`] and [`Map`].
//!
//! Both walk the input once, in order, and stop at the first error returned
//! by the user callable.

use crate::error::Result;
use crate::transform::{Transform, impl_compose_operator};
use std::sync::Arc;

/// Keep the elements for which a predicate holds, preserving order.
pub struct Filter<T> {
    predicate: Arc<dyn Fn(&T) -> Result<bool> + Send + Sync>,
}

impl<T: 'static> Filter<T> {
    /// Keep elements where `predicate` returns true.
    pub fn new<P>(predicate: P) -> Self
    where
        P: Fn(&T) -> bool + Send + Sync + 'static,
    {
        Self {
            predicate: Arc::new(move |item| Ok(predicate(item))),
        }
    }

    /// Like [`Filter::new`], for a predicate that can fail.
    pub fn try_new<P, E>(predicate: P) -> Self
    where
        E: Into<anyhow::Error>,
        P: Fn(&T) -> std::result::Result<bool, E> + Send + Sync + 'static,
    {
        Self {
            predicate: Arc::new(move |item| predicate(item).map_err(Into::into)),
        }
    }
}

impl<T> Transform for Filter<T> {
    type Input = Vec<T>;
    type Output = Vec<T>;

    fn apply(&self, input: Vec<T>) -> Result<Vec<T>> {
        let mut kept = Vec::with_capacity(input.len());
        for item in input {
            if (self.predicate)(&item)? {
                kept.push(item);
            }
        }
        Ok(kept)
    }

    fn name(&self) -> &'static str {
        "filter"
    }
}

impl_compose_operator!(Filter<T>);

/// Apply a function to every element, preserving order.
pub struct Map<T, U> {
    mapper: Arc<dyn Fn(&T) -> Result<U> + Send + Sync>,
}

impl<T: 'static, U: 'static> Map<T, U> {
    /// Map every element through `mapper`.
    pub fn new<F>(mapper: F) -> Self
    where
        F: Fn(&T) -> U + Send + Sync + 'static,
    {
        Self {
            mapper: Arc::new(move |item| Ok(mapper(item))),
        }
    }

    /// Like [`Map::new`], for a mapper that can fail.
    pub fn try_new<F, E>(mapper: F) -> Self
    where
        E: Into<anyhow::Error>,
        F: Fn(&T) -> std::result::Result<U, E> + Send + Sync + 'static,
    {
        Self {
            mapper: Arc::new(move |item| mapper(item).map_err(Into::into)),
        }
    }
}

impl<T, U> Transform for Map<T, U> {
    type Input = Vec<T>;
    type Output = Vec<U>;

    fn apply(&self, input: Vec<T>) -> Result<Vec<U>> {
        input.iter().map(|item| (self.mapper)(item)).collect()
    }

    fn name(&self) -> &'static str {
        "map"
    }
}

impl_compose_operator!(Map<T, U>);
