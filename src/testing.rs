//! Testing utilities for transform pipelines.
//!
//! Helpers for writing tests against pipeline output:
//!
//! - **Assertions**: compare outputs, and check the structural guarantees of
//!   windowing, batching and grouping
//! - **Test data builders**: generate flat and nested inputs
//! - **Fixtures**: small record datasets for grouping and sorting
//!
//! # Quick Start
//!
//! ```
//! use ironpipe::*;
//! use ironpipe::testing::*;
//!
//! # fn main() -> anyhow::Result<()> {
//! let input = TestDataBuilder::<i32>::new().add_range(1..=7).build();
//! let chunks = Batch::new(3)?.apply(input.clone())?;
//!
//! assert_batches_partition(&input, &chunks, 3);
//! assert_collections_equal(&chunks[2], &[7]);
//! # Ok(())
//! # }
//! ```

pub mod assertions;
pub mod builders;
pub mod fixtures;

pub use assertions::*;
pub use builders::*;
pub use fixtures::*;
