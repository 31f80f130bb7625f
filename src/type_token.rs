//! Runtime type tags for type-erased stages.
//!
//! A [`Pipeline`](crate::Pipeline) holds stages of different concrete types in
//! one ordered sequence. Each stage is erased to a [`Partition`] in / [`Partition`]
//! out function and carries a [`TypeTag`] for its input and output, so the
//! pipeline can check that adjacent stages line up when they are linked rather
//! than when data flows through them.

use std::any::{Any, TypeId, type_name};
use std::fmt;

/// A type-erased value carried between stages at runtime.
///
/// Stages downcast the partition to their declared input type before applying
/// their work and box their output again for the next stage.
pub type Partition = Box<dyn Any + Send + Sync>;

/// A lightweight runtime type tag.
///
/// `TypeTag` carries the `TypeId` used for comparisons and a readable type
/// name used in error messages and log output.
///
/// ```
/// use ironpipe::TypeTag;
/// let tag = TypeTag::of::<Vec<u32>>();
/// assert!(tag.name.ends_with("Vec<u32>"));
/// assert_eq!(tag, TypeTag::of::<Vec<u32>>());
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct TypeTag {
    /// Stable Rust type identifier.
    pub id: TypeId,
    /// Human-readable type name (best-effort).
    pub name: &'static str,
}

impl TypeTag {
    /// Construct a tag for `T`.
    pub fn of<T: 'static>() -> Self {
        Self {
            id: TypeId::of::<T>(),
            name: type_name::<T>(),
        }
    }

    /// True when this tag describes `T`.
    pub fn is<T: 'static>(&self) -> bool {
        self.id == TypeId::of::<T>()
    }
}

impl fmt::Display for TypeTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name)
    }
}
