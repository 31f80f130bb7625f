//! # Ironpipe
//!
//! A library of **composable data transforms** for Rust. Small, single-purpose
//! transforms (filter, map, reduce, group, sort, window, flatten, batch, cache)
//! snap together into larger ones, and run either eagerly through a
//! [`Pipeline`] or on demand through a [`LazyPipeline`].
//!
//! ## Key Features
//!
//! - **One contract** - every unit implements [`Transform`], with typed input and output
//! - **Composition algebra** - chain with [`Transform::then`], `|`, or [`compose!`]
//! - **Eager pipelines** - heterogeneous stages, junctions checked when a stage is added
//! - **Lazy pipelines** - nothing runs until [`LazyPipeline::materialize`], and every run starts fresh
//! - **Record grouping** - group maps and JSON objects by a named field
//! - **Errors pass through** - a failing user callable aborts the run with its own error
//!
//! ## Quick Start
//!
//! ```
//! use ironpipe::*;
//!
//! # fn main() -> anyhow::Result<()> {
//! // Compose statically
//! let evens_doubled = Filter::new(|x: &i32| x % 2 == 0) | Map::new(|x: &i32| x * 2);
//! assert_eq!(evens_doubled.apply(vec![1, 2, 3, 4, 5, 6])?, vec![4, 8, 12]);
//!
//! // Or build a pipeline at run time
//! let windows = pipe![Window::<i32>::with_step(3, 2)?]?;
//! let out: Vec<Vec<i32>> = windows.invoke(vec![1, 2, 3, 4, 5])?;
//! assert_eq!(out, vec![vec![1, 2, 3], vec![3, 4, 5]]);
//!
//! // Or defer the work
//! let lazy = LazyPipeline::from_vec(vec![5, 3, 8]).map(|x| x + 1).take(2);
//! assert_eq!(lazy.materialize()?, vec![6, 4]);
//! # Ok(())
//! # }
//! ```
//!
//! ## Core Concepts
//!
//! ### Transform
//!
//! A [`Transform`] maps one `Input` value to one `Output` value and may fail.
//! Sequence primitives take a `Vec<T>`; [`Reduce`] and [`GroupBy`] turn it into
//! a single value or a [`Groups`] map.
//!
//! ### Pipeline
//!
//! A [`Pipeline`] holds type-erased stages. Adding a stage whose input type does
//! not match the previous stage's output fails with
//! [`TransformError::UnsupportedComposition`].
//!
//! ### Lazy Pipeline
//!
//! A [`LazyPipeline`] pairs a [`Source`] (a value or a producer) with queued
//! sequence stages. Builders return new pipelines; the receiver is unchanged.
//!
//! ## Feature Flags
//!
//! - `json` (default): [`Record`] for `serde_json` objects, [`FieldKey`], and
//!   [`Flatten`] over JSON arrays.
//!
//! ## Logging
//!
//! Pipeline runs are logged through the [`log`] facade at `debug` level and
//! cache lookups at `trace` level. Install any logger (such as `env_logger`)
//! to see them.

pub mod error;
pub mod lazy;
pub mod pipeline;
pub mod record;
mod stage;
pub mod testing;
pub mod transform;
pub mod transforms;
pub mod type_token;

// General re-exports
pub use error::{Result, TransformError};
pub use lazy::{LazyPipeline, Source};
pub use pipeline::Pipeline;
pub use record::Record;
pub use transform::{Composed, FnTransform, Identity, Transform, from_fn, identity, try_from_fn};
pub use transforms::*;
pub use type_token::TypeTag;

// Gated re-exports
#[cfg(feature = "json")]
pub use record::FieldKey;
