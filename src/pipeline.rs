//! Eager pipelines.
//!
//! A [`Pipeline`] is an ordered sequence of stages run immediately and fully
//! by [`Pipeline::invoke`]. Stages can be any [`Transform`] or plain closure,
//! with different input and output types; each junction is type-checked when a
//! stage is linked, so a mis-ordered pipeline fails at construction with
//! [`TransformError::UnsupportedComposition`] instead of at run time.
//!
//! ```
//! use ironpipe::*;
//!
//! # fn main() -> anyhow::Result<()> {
//! let mut p = Pipeline::named("evens");
//! p.add(Filter::new(|x: &i32| x % 2 == 0))?
//!     .add(Map::new(|x: &i32| x * 2))?
//!     .add(Reduce::with_initial(0, |acc: i32, x: i32| acc + x))?;
//!
//! let total: i32 = p.invoke(vec![1, 2, 3, 4, 5, 6])?;
//! assert_eq!(total, 24);
//! # Ok(())
//! # }
//! ```
//!
//! Cloning a pipeline, or combining it with [`Pipeline::concat`] and
//! [`Pipeline::with`], shares the stage objects rather than copying them; a
//! [`Cache`](crate::Cache) stage keeps one memo table across all of them.

use crate::error::{Result, TransformError};
use crate::stage::{DynStage, erase};
use crate::transform::{Transform, from_fn, try_from_fn};
use crate::type_token::{Partition, TypeTag};
use log::{debug, trace};
use std::fmt;
use std::ops::BitOr;
use std::sync::Arc;

/// An ordered, growable sequence of type-checked stages.
///
/// The empty pipeline is the identity transform.
#[derive(Clone, Default)]
pub struct Pipeline {
    label: Option<String>,
    stages: Vec<Arc<dyn DynStage>>,
}

fn check_junction(left: TypeTag, right: TypeTag) -> Result<()> {
    if left == right {
        Ok(())
    } else {
        Err(TransformError::UnsupportedComposition {
            left: left.name,
            right: right.name,
        }
        .into())
    }
}

impl Pipeline {
    /// An empty, unlabelled pipeline.
    pub fn new() -> Self {
        Self::default()
    }

    /// A pipeline whose label appears in log output.
    pub fn named(label: impl Into<String>) -> Self {
        Self {
            label: Some(label.into()),
            stages: Vec::new(),
        }
    }

    /// The label, or `"pipeline"` when none was given.
    pub fn label(&self) -> &str {
        self.label.as_deref().unwrap_or("pipeline")
    }

    /// Append a transform.
    ///
    /// Fails with [`TransformError::UnsupportedComposition`] when the
    /// transform's input type differs from the pipeline's current output type;
    /// the pipeline is left unchanged in that case.
    pub fn add<X>(&mut self, transform: X) -> Result<&mut Self>
    where
        X: Transform + 'static,
        X::Input: Send + Sync + 'static,
        X::Output: Send + Sync + 'static,
    {
        self.link(erase(transform))?;
        Ok(self)
    }

    /// Append a plain closure.
    pub fn add_fn<In, Out, F>(&mut self, f: F) -> Result<&mut Self>
    where
        In: Send + Sync + 'static,
        Out: Send + Sync + 'static,
        F: Fn(In) -> Out + Send + Sync + 'static,
    {
        self.add(from_fn(f))
    }

    /// Append a fallible closure; its errors surface from [`invoke`](Pipeline::invoke) unchanged.
    pub fn add_try_fn<In, Out, E, F>(&mut self, f: F) -> Result<&mut Self>
    where
        In: Send + Sync + 'static,
        Out: Send + Sync + 'static,
        E: Into<anyhow::Error>,
        F: Fn(In) -> std::result::Result<Out, E> + Send + Sync + 'static,
    {
        self.add(try_from_fn(f))
    }

    /// A new pipeline: this one followed by `transform`. `self` is untouched.
    pub fn with<X>(&self, transform: X) -> Result<Pipeline>
    where
        X: Transform + 'static,
        X::Input: Send + Sync + 'static,
        X::Output: Send + Sync + 'static,
    {
        let mut next = self.clone();
        next.add(transform)?;
        Ok(next)
    }

    /// A new pipeline: this one followed by the closure `f`.
    pub fn with_fn<In, Out, F>(&self, f: F) -> Result<Pipeline>
    where
        In: Send + Sync + 'static,
        Out: Send + Sync + 'static,
        F: Fn(In) -> Out + Send + Sync + 'static,
    {
        self.with(from_fn(f))
    }

    /// A new pipeline running this one's stages, then `other`'s.
    ///
    /// The result keeps this pipeline's label.
    pub fn concat(&self, other: &Pipeline) -> Result<Pipeline> {
        if let (Some(left), Some(right)) = (self.output_type(), other.input_type()) {
            check_junction(left, right)?;
        }
        let mut stages = Vec::with_capacity(self.stages.len() + other.stages.len());
        stages.extend(self.stages.iter().cloned());
        stages.extend(other.stages.iter().cloned());
        debug!(
            "`{}`: concatenated {} + {} stage(s) from `{}`",
            self.label(),
            self.stages.len(),
            other.stages.len(),
            other.label()
        );
        Ok(Pipeline {
            label: self.label.clone(),
            stages,
        })
    }

    fn link(&mut self, stage: Arc<dyn DynStage>) -> Result<()> {
        if let Some(current) = self.output_type() {
            check_junction(current, stage.input_tag())?;
        }
        trace!(
            "`{}`: linking stage #{} `{}` ({} -> {})",
            self.label(),
            self.stages.len(),
            stage.name(),
            stage.input_tag(),
            stage.output_tag()
        );
        self.stages.push(stage);
        Ok(())
    }

    /// Append a stage whose input type is already known to match.
    pub(crate) fn push_linked(&mut self, stage: Arc<dyn DynStage>) {
        debug_assert!(
            self.output_type().is_none_or(|t| t == stage.input_tag()),
            "stage input does not match pipeline output"
        );
        self.stages.push(stage);
    }

    /// Number of stages.
    pub fn len(&self) -> usize {
        self.stages.len()
    }

    /// True for the empty (identity) pipeline.
    pub fn is_empty(&self) -> bool {
        self.stages.is_empty()
    }

    /// Input type of the first stage, `None` for the empty pipeline.
    pub fn input_type(&self) -> Option<TypeTag> {
        self.stages.first().map(|s| s.input_tag())
    }

    /// Output type of the last stage, `None` for the empty pipeline.
    pub fn output_type(&self) -> Option<TypeTag> {
        self.stages.last().map(|s| s.output_tag())
    }

    /// Stage names in execution order.
    pub fn stage_names(&self) -> Vec<&'static str> {
        self.stages.iter().map(|s| s.name()).collect()
    }

    /// Run `data` through every stage in order and return the final value.
    ///
    /// `In` must be the first stage's input type and `Out` the last stage's
    /// output type (for the empty pipeline, `Out` must equal `In` and `data` is
    /// returned as-is). A mismatch fails with [`TransformError::TypeMismatch`]
    /// before any stage runs. The first stage error aborts the run and is
    /// returned unchanged.
    pub fn invoke<In, Out>(&self, data: In) -> Result<Out>
    where
        In: Send + Sync + 'static,
        Out: 'static,
    {
        let given = TypeTag::of::<In>();
        if let Some(expected) = self.input_type() {
            if expected != given {
                return Err(TransformError::TypeMismatch {
                    expected: expected.name,
                    found: given.name,
                }
                .into());
            }
        }
        let produced = self.output_type().unwrap_or(given);
        let wanted = TypeTag::of::<Out>();
        if produced != wanted {
            return Err(TransformError::TypeMismatch {
                expected: produced.name,
                found: wanted.name,
            }
            .into());
        }

        debug!("invoking `{}` ({} stage(s))", self.label(), self.stages.len());
        let mut current: Partition = Box::new(data);
        for (i, stage) in self.stages.iter().enumerate() {
            debug!(
                "`{}` stage #{i} `{}`: {} -> {}",
                self.label(),
                stage.name(),
                stage.input_tag(),
                stage.output_tag()
            );
            current = stage.apply(current)?;
        }

        current.downcast::<Out>().map(|out| *out).map_err(|_| {
            TransformError::TypeMismatch {
                expected: produced.name,
                found: wanted.name,
            }
            .into()
        })
    }
}

impl fmt::Debug for Pipeline {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Pipeline")
            .field("label", &self.label())
            .field("stages", &self.stage_names())
            .finish()
    }
}

/// `&a | &b` is [`a.concat(&b)`](Pipeline::concat).
impl BitOr<&Pipeline> for &Pipeline {
    type Output = Result<Pipeline>;

    fn bitor(self, rhs: &Pipeline) -> Result<Pipeline> {
        self.concat(rhs)
    }
}

impl BitOr for Pipeline {
    type Output = Result<Pipeline>;

    fn bitor(self, rhs: Pipeline) -> Result<Pipeline> {
        self.concat(&rhs)
    }
}

/// Build a [`Pipeline`] from a list of transforms, checking every junction.
///
/// Evaluates to `Result<Pipeline>`.
///
/// ```
/// use ironpipe::*;
///
/// # fn main() -> anyhow::Result<()> {
/// let p = pipe![Sort::<i32>::new().reversed(), Take::<i32>::new(2)]?;
/// assert_eq!(p.invoke::<_, Vec<i32>>(vec![4, 9, 1, 7])?, vec![9, 7]);
/// # Ok(())
/// # }
/// ```
#[macro_export]
macro_rules! pipe {
    ($($stage:expr),* $(,)?) => {
        (|| -> $crate::Result<$crate::Pipeline> {
            #[allow(unused_mut)]
            let mut pipeline = $crate::Pipeline::new();
            $( pipeline.add($stage)?; )*
            ::core::result::Result::Ok(pipeline)
        })()
    };
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::transforms::{Filter, Map, Reduce};

    #[test]
    fn empty_pipeline_is_identity() -> Result<()> {
        let p = Pipeline::new();
        assert!(p.is_empty());
        assert_eq!(p.invoke::<Vec<u8>, Vec<u8>>(vec![1, 2])?, vec![1, 2]);
        assert_eq!(p.invoke::<_, &str>("x")?, "x");
        Ok(())
    }

    #[test]
    fn stages_run_in_order() -> Result<()> {
        let mut p = Pipeline::new();
        p.add_fn(|s: String| s + "a")?
            .add_fn(|s: String| s + "b")?
            .add_fn(|s: String| s.len())?;
        assert_eq!(p.invoke::<_, usize>(String::from("_"))?, 3);
        assert_eq!(p.stage_names(), vec!["fn", "fn", "fn"]);
        Ok(())
    }

    #[test]
    fn incompatible_stage_is_rejected_at_link_time() -> Result<()> {
        let mut p = Pipeline::new();
        p.add(Map::new(|x: &i32| x.to_string()))?;
        let err = p.add(Filter::new(|x: &i32| *x > 0)).unwrap_err();
        match err.downcast_ref::<TransformError>() {
            Some(TransformError::UnsupportedComposition { left, right }) => {
                assert!(left.contains("String"));
                assert!(right.contains("i32"));
            }
            other => panic!("unexpected error: {other:?}"),
        }
        assert_eq!(p.len(), 1);
        Ok(())
    }

    #[test]
    fn invoke_checks_endpoint_types() -> Result<()> {
        let mut p = Pipeline::new();
        p.add(Reduce::new(|a: i64, b: i64| a + b))?;
        assert!(p.invoke::<_, i64>(vec![1i32]).is_err());
        let err = p.invoke::<_, String>(vec![1i64]).unwrap_err();
        assert!(matches!(
            err.downcast_ref::<TransformError>(),
            Some(TransformError::TypeMismatch { .. })
        ));
        assert_eq!(p.invoke::<_, i64>(vec![1i64, 2, 3])?, 6);
        Ok(())
    }

    #[test]
    fn with_and_concat_leave_operands_untouched() -> Result<()> {
        let mut base = Pipeline::named("base");
        base.add_fn(|x: u32| x + 1)?;

        let extended = base.with_fn(|x: u32| x * 10)?;
        let doubled = base.concat(&extended)?;
        assert_eq!(base.len(), 1);
        assert_eq!(extended.len(), 2);
        assert_eq!(doubled.len(), 3);
        assert_eq!(doubled.label(), "base");
        assert_eq!(doubled.invoke::<u32, u32>(1)?, (1 + 1 + 1) * 10);

        let via_operator = (&base | &extended)?;
        assert_eq!(via_operator.invoke::<u32, u32>(1)?, 30);
        Ok(())
    }

    #[test]
    fn concat_checks_the_junction() -> Result<()> {
        let mut left = Pipeline::new();
        left.add_fn(|x: u8| x as u64)?;
        let mut right = Pipeline::new();
        right.add_fn(|x: u8| x)?;
        assert!(left.concat(&right).is_err());
        assert!(left.concat(&Pipeline::new()).is_ok());
        assert!(Pipeline::new().concat(&right).is_ok());
        Ok(())
    }

    #[test]
    fn pipe_macro_builds_and_validates() -> Result<()> {
        let p = pipe![Filter::new(|x: &u8| *x > 1), Map::new(|x: &u8| *x as u32)]?;
        assert_eq!(p.invoke::<_, Vec<u32>>(vec![0u8, 1, 2, 3])?, vec![2, 3]);
        assert!(pipe![Map::new(|x: &u8| *x as u32), Filter::new(|x: &u8| *x > 1)].is_err());
        assert!(pipe![]?.is_empty());
        Ok(())
    }
}
