//! Lazy, restartable pipelines.
//!
//! A [`LazyPipeline`] binds a [`Source`] to a sequence of stages without
//! running anything. Builder calls ([`map`](LazyPipeline::map),
//! [`filter`](LazyPipeline::filter), [`take`](LazyPipeline::take),
//! [`skip`](LazyPipeline::skip), ...) return a new pipeline and leave the
//! receiver as it was, so partial chains can be reused.
//!
//! Work happens only in [`materialize`](LazyPipeline::materialize). Every call
//! resolves the source again (a producer runs once per call, its result is
//! never cached) and runs every stage again, so one instance can be
//! materialized any number of times.
//!
//! ```
//! use ironpipe::*;
//!
//! # fn main() -> anyhow::Result<()> {
//! let squares = LazyPipeline::from_fn(|| (1..=10).collect::<Vec<u32>>())
//!     .map(|x| x * x)
//!     .filter(|x| x % 2 == 1)
//!     .skip(1)
//!     .take(2);
//!
//! assert_eq!(squares.materialize()?, vec![9, 25]);
//! assert_eq!(squares.materialize()?, vec![9, 25]);
//! # Ok(())
//! # }
//! ```

use crate::error::Result;
use crate::pipeline::Pipeline;
use crate::stage::erase;
use crate::transform::Transform;
use crate::transforms::{Filter, Map, Skip, Take};
use log::debug;
use std::fmt;
use std::marker::PhantomData;
use std::sync::Arc;

/// Where a lazy pipeline's input comes from.
pub enum Source<T> {
    /// A fixed value, cloned on every materialization.
    Value(T),
    /// A producer, called on every materialization.
    Producer(Arc<dyn Fn() -> Result<T> + Send + Sync>),
}

impl<T: Clone> Source<T> {
    /// Produce the input for one materialization.
    pub fn resolve(&self) -> Result<T> {
        match self {
            Source::Value(value) => Ok(value.clone()),
            Source::Producer(produce) => produce(),
        }
    }
}

impl<T> Source<T> {
    fn kind(&self) -> &'static str {
        match self {
            Source::Value(_) => "value",
            Source::Producer(_) => "producer",
        }
    }
}

impl<T: Clone> Clone for Source<T> {
    fn clone(&self) -> Self {
        match self {
            Source::Value(value) => Source::Value(value.clone()),
            Source::Producer(produce) => Source::Producer(Arc::clone(produce)),
        }
    }
}

impl<T: fmt::Debug> fmt::Debug for Source<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Source::Value(value) => f.debug_tuple("Value").field(value).finish(),
            Source::Producer(_) => f.write_str("Producer(..)"),
        }
    }
}

/// A deferred pipeline over a `Vec<S>` source, currently producing `Vec<T>`.
pub struct LazyPipeline<S, T = S> {
    source: Source<Vec<S>>,
    stages: Pipeline,
    _t: PhantomData<fn() -> T>,
}

impl<S: Clone, T> Clone for LazyPipeline<S, T> {
    fn clone(&self) -> Self {
        Self {
            source: self.source.clone(),
            stages: self.stages.clone(),
            _t: PhantomData,
        }
    }
}

impl<S> LazyPipeline<S, S>
where
    S: Clone + Send + Sync + 'static,
{
    /// Bind `source` to an empty stage sequence.
    pub fn new(source: Source<Vec<S>>) -> Self {
        Self {
            source,
            stages: Pipeline::named("lazy"),
            _t: PhantomData,
        }
    }

    /// Lazily process a fixed vector.
    pub fn from_vec(data: Vec<S>) -> Self {
        Self::new(Source::Value(data))
    }

    /// Lazily process whatever `producer` returns at materialization time.
    pub fn from_fn<F>(producer: F) -> Self
    where
        F: Fn() -> Vec<S> + Send + Sync + 'static,
    {
        Self::new(Source::Producer(Arc::new(move || Ok(producer()))))
    }

    /// Like [`from_fn`](LazyPipeline::from_fn), for a producer that can fail.
    pub fn from_try_fn<F, E>(producer: F) -> Self
    where
        E: Into<anyhow::Error>,
        F: Fn() -> std::result::Result<Vec<S>, E> + Send + Sync + 'static,
    {
        Self::new(Source::Producer(Arc::new(move || {
            producer().map_err(Into::into)
        })))
    }
}

impl<S, T> LazyPipeline<S, T>
where
    S: Clone + Send + Sync + 'static,
    T: Send + Sync + 'static,
{
    /// Extend with any sequence transform.
    pub fn then<X, U>(&self, transform: X) -> LazyPipeline<S, U>
    where
        X: Transform<Input = Vec<T>, Output = Vec<U>> + 'static,
        U: Send + Sync + 'static,
    {
        let mut stages = self.stages.clone();
        stages.push_linked(erase(transform));
        LazyPipeline {
            source: self.source.clone(),
            stages,
            _t: PhantomData,
        }
    }

    /// Apply `mapper` to every element.
    pub fn map<U, F>(&self, mapper: F) -> LazyPipeline<S, U>
    where
        U: Send + Sync + 'static,
        F: Fn(&T) -> U + Send + Sync + 'static,
    {
        self.then(Map::new(mapper))
    }

    /// Like [`map`](LazyPipeline::map), for a mapper that can fail.
    pub fn try_map<U, F, E>(&self, mapper: F) -> LazyPipeline<S, U>
    where
        U: Send + Sync + 'static,
        E: Into<anyhow::Error>,
        F: Fn(&T) -> std::result::Result<U, E> + Send + Sync + 'static,
    {
        self.then(Map::try_new(mapper))
    }

    /// Keep the elements for which `predicate` holds.
    pub fn filter<P>(&self, predicate: P) -> LazyPipeline<S, T>
    where
        P: Fn(&T) -> bool + Send + Sync + 'static,
    {
        self.then(Filter::new(predicate))
    }

    /// Like [`filter`](LazyPipeline::filter), for a predicate that can fail.
    pub fn try_filter<P, E>(&self, predicate: P) -> LazyPipeline<S, T>
    where
        E: Into<anyhow::Error>,
        P: Fn(&T) -> std::result::Result<bool, E> + Send + Sync + 'static,
    {
        self.then(Filter::try_new(predicate))
    }

    /// Keep the first `n` elements of the sequence at this point of the chain.
    pub fn take(&self, n: usize) -> LazyPipeline<S, T> {
        self.then(Take::new(n))
    }

    /// Drop the first `n` elements of the sequence at this point of the chain.
    pub fn skip(&self, n: usize) -> LazyPipeline<S, T> {
        self.then(Skip::new(n))
    }

    /// Number of stages queued behind the source.
    pub fn len(&self) -> usize {
        self.stages.len()
    }

    /// True when no stage is queued.
    pub fn is_empty(&self) -> bool {
        self.stages.is_empty()
    }

    /// Resolve the source and run every stage.
    pub fn materialize(&self) -> Result<Vec<T>> {
        debug!(
            "materializing lazy pipeline from {} source ({} stage(s))",
            self.source.kind(),
            self.stages.len()
        );
        let input = self.source.resolve()?;
        self.stages.invoke::<Vec<S>, Vec<T>>(input)
    }

    /// Materialize and iterate the result.
    pub fn iter(&self) -> Result<std::vec::IntoIter<T>> {
        Ok(self.materialize()?.into_iter())
    }
}

impl<S, T> fmt::Debug for LazyPipeline<S, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LazyPipeline")
            .field("source", &self.source.kind())
            .field("stages", &self.stages.stage_names())
            .finish()
    }
}
