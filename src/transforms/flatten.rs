//! Depth-bounded flattening of nested sequences.
//!
//! Flattening works on any [`Nestable`] element: a value that is either a
//! list of further values or a leaf. [`Nested<T>`] is the typed form; with the
//! `json` feature, `serde_json::Value` arrays count as lists too.

use crate::error::{Result, TransformError};
use crate::transform::{Transform, impl_compose_operator};
use serde::{Deserialize, Serialize};
use std::marker::PhantomData;

/// A value that may hold a list of further values.
pub trait Nestable: Sized {
    /// Split a list into its elements; hand a leaf back unchanged.
    fn into_list(self) -> std::result::Result<Vec<Self>, Self>;
}

/// A leaf or an arbitrarily deep list of leaves.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Nested<T> {
    Item(T),
    List(Vec<Nested<T>>),
}

impl<T> Nested<T> {
    /// A leaf.
    pub fn item(value: T) -> Self {
        Nested::Item(value)
    }

    /// A list of nested values.
    pub fn list(items: impl IntoIterator<Item = Nested<T>>) -> Self {
        Nested::List(items.into_iter().collect())
    }

    /// True for a list, false for a leaf.
    pub fn is_list(&self) -> bool {
        matches!(self, Nested::List(_))
    }

    /// Levels of list nesting: 0 for a leaf, 1 for a list of leaves (or an empty list).
    pub fn depth(&self) -> usize {
        match self {
            Nested::Item(_) => 0,
            Nested::List(items) => 1 + items.iter().map(Nested::depth).max().unwrap_or(0),
        }
    }
}

impl<T> From<Vec<T>> for Nested<T> {
    fn from(items: Vec<T>) -> Self {
        Nested::List(items.into_iter().map(Nested::Item).collect())
    }
}

impl<T> Nestable for Nested<T> {
    fn into_list(self) -> std::result::Result<Vec<Self>, Self> {
        match self {
            Nested::List(items) => Ok(items),
            leaf => Err(leaf),
        }
    }
}

#[cfg(feature = "json")]
impl Nestable for serde_json::Value {
    fn into_list(self) -> std::result::Result<Vec<Self>, Self> {
        match self {
            serde_json::Value::Array(items) => Ok(items),
            other => Err(other),
        }
    }
}

/// Remove up to `depth` levels of nesting.
///
/// Each level replaces every list element with its contents and keeps leaves
/// where they are. Once no lists remain, further levels change nothing.
#[derive(Debug, Clone, Copy)]
pub struct Flatten<T> {
    depth: usize,
    _t: PhantomData<fn(T) -> T>,
}

impl<T> Flatten<T> {
    /// Flatten one level.
    pub fn new() -> Self {
        Self {
            depth: 1,
            _t: PhantomData,
        }
    }

    /// Flatten `depth` levels; zero fails with [`TransformError::InvalidParameter`].
    pub fn with_depth(depth: usize) -> Result<Self> {
        if depth == 0 {
            return Err(TransformError::invalid("depth", "flatten depth must be >= 1").into());
        }
        Ok(Self {
            depth,
            _t: PhantomData,
        })
    }

    /// Levels removed per application.
    pub fn depth(&self) -> usize {
        self.depth
    }
}

impl<T> Default for Flatten<T> {
    fn default() -> Self {
        Self::new()
    }
}

/// Returns the flattened level and whether any list was expanded.
fn flatten_once<T: Nestable>(items: Vec<T>) -> (Vec<T>, bool) {
    let mut out = Vec::with_capacity(items.len());
    let mut expanded = false;
    for item in items {
        match item.into_list() {
            Ok(children) => {
                expanded = true;
                out.extend(children);
            }
            Err(leaf) => out.push(leaf),
        }
    }
    (out, expanded)
}

impl<T: Nestable> Transform for Flatten<T> {
    type Input = Vec<T>;
    type Output = Vec<T>;

    fn apply(&self, input: Vec<T>) -> Result<Vec<T>> {
        let mut current = input;
        for _ in 0..self.depth {
            let (next, expanded) = flatten_once(current);
            current = next;
            if !expanded {
                break;
            }
        }
        Ok(current)
    }

    fn name(&self) -> &'static str {
        "flatten"
    }
}

impl_compose_operator!(Flatten<T>);
