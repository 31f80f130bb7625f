//! Type-erased pipeline stages.
//!
//! A [`Pipeline`](crate::Pipeline) stores transforms of unrelated concrete
//! types in one ordered sequence. Each is wrapped in a [`DynStage`] that moves
//! values across as [`Partition`]s and reports the [`TypeTag`]s of its input
//! and output so junctions can be checked when stages are linked.

use crate::error::{Result, TransformError};
use crate::transform::Transform;
use crate::type_token::{Partition, TypeTag};
use std::sync::Arc;

pub(crate) trait DynStage: Send + Sync {
    fn apply(&self, input: Partition) -> Result<Partition>;
    fn input_tag(&self) -> TypeTag;
    fn output_tag(&self) -> TypeTag;
    fn name(&self) -> &'static str;
}

struct TypedStage<X>(X);

impl<X> DynStage for TypedStage<X>
where
    X: Transform,
    X::Input: Send + Sync + 'static,
    X::Output: Send + Sync + 'static,
{
    fn apply(&self, input: Partition) -> Result<Partition> {
        let input = input
            .downcast::<X::Input>()
            .map_err(|_| TransformError::TypeMismatch {
                expected: std::any::type_name::<X::Input>(),
                found: "a value of another type",
            })?;
        let output = self.0.apply(*input)?;
        Ok(Box::new(output))
    }

    fn input_tag(&self) -> TypeTag {
        TypeTag::of::<X::Input>()
    }

    fn output_tag(&self) -> TypeTag {
        TypeTag::of::<X::Output>()
    }

    fn name(&self) -> &'static str {
        self.0.name()
    }
}

/// Erase a transform into a shareable stage.
pub(crate) fn erase<X>(transform: X) -> Arc<dyn DynStage>
where
    X: Transform + 'static,
    X::Input: Send + Sync + 'static,
    X::Output: Send + Sync + 'static,
{
    Arc::new(TypedStage(transform))
}
