//! Built-in transform primitives.
//!
//! Every primitive implements [`Transform`](crate::Transform) and the `|`
//! composition operator. Sequence primitives take a `Vec<T>` by value and
//! return a fresh container; none of them touch their input in place.
//!
//! | Primitive | Input | Output |
//! |---|---|---|
//! | [`Filter`] | `Vec<T>` | `Vec<T>` |
//! | [`Map`] | `Vec<T>` | `Vec<U>` |
//! | [`Reduce`] | `Vec<T>` | `U` |
//! | [`GroupBy`] | `Vec<T>` | [`Groups<K, T>`] |
//! | [`Sort`] | `Vec<T>` | `Vec<T>` |
//! | [`Window`] | `Vec<T>` | `Vec<Vec<T>>` |
//! | [`Batch`] | `Vec<T>` | `Vec<Vec<T>>` |
//! | [`Flatten`] | `Vec<T: Nestable>` | `Vec<T>` |
//! | [`Take`] / [`Skip`] | `Vec<T>` | `Vec<T>` |
//! | [`Cache`] | `T` | `T` |

mod batch;
mod cache;
mod elementwise;
mod flatten;
mod group_by;
mod reduce;
mod slice;
mod sort;
mod window;

pub use batch::Batch;
pub use cache::Cache;
pub use elementwise::{Filter, Map};
pub use flatten::{Flatten, Nestable, Nested};
pub use group_by::{GroupBy, Groups};
pub use reduce::Reduce;
pub use slice::{Skip, Take};
pub use sort::Sort;
pub use window::Window;
