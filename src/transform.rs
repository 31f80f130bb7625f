//! The [`Transform`] contract and the composition algebra built on it.
//!
//! A transform turns one value into another and may fail. Transforms compose
//! with [`Transform::then`] (or the `|` operator, implemented for every
//! primitive in [`crate::transforms`]): the output of the first feeds the input
//! of the second. Composition is checked by the compiler, since the second
//! transform's `Input` must equal the first one's `Output`.
//!
//! Plain closures become transforms through [`from_fn`] and [`try_from_fn`].
//!
//! ```
//! use ironpipe::*;
//!
//! # fn main() -> anyhow::Result<()> {
//! let evens_doubled = Filter::new(|x: &i32| x % 2 == 0) | Map::new(|x: &i32| x * 2);
//! assert_eq!(evens_doubled.apply(vec![1, 2, 3, 4, 5, 6])?, vec![4, 8, 12]);
//! # Ok(())
//! # }
//! ```

use crate::error::Result;
use std::marker::PhantomData;
use std::sync::Arc;

/// A unit converting a value of type `Input` into a value of type `Output`.
///
/// Implementations must not swallow errors coming from user callables; they
/// return them to the caller unchanged.
pub trait Transform: Send + Sync {
    type Input;
    type Output;

    /// Apply the transform to `input`.
    fn apply(&self, input: Self::Input) -> Result<Self::Output>;

    /// Short name used in log output.
    fn name(&self) -> &'static str {
        "transform"
    }

    /// Chain `next` after this transform.
    ///
    /// Neither operand is modified; the result owns both.
    fn then<Next>(self, next: Next) -> Composed<Self, Next>
    where
        Self: Sized,
        Next: Transform<Input = Self::Output>,
    {
        Composed::new(self, next)
    }
}

/// Implements `|` as [`Transform::then`] for a transform type.
macro_rules! impl_compose_operator {
    ($ty:ident < $($g:ident),* >) => {
        impl<$($g,)* Rhs> ::std::ops::BitOr<Rhs> for $ty<$($g),*>
        where
            $ty<$($g),*>: $crate::transform::Transform,
            Rhs: $crate::transform::Transform<
                Input = <$ty<$($g),*> as $crate::transform::Transform>::Output,
            >,
        {
            type Output = $crate::transform::Composed<$ty<$($g),*>, Rhs>;

            fn bitor(self, rhs: Rhs) -> $crate::transform::Composed<$ty<$($g),*>, Rhs> {
                $crate::transform::Composed::new(self, rhs)
            }
        }
    };
}
pub(crate) use impl_compose_operator;

/// Two transforms run back to back: `second(first(input))`.
pub struct Composed<A, B> {
    first: A,
    second: B,
}

impl<A, B> Composed<A, B> {
    /// Run `first`, then `second` on its output.
    pub fn new(first: A, second: B) -> Self {
        Self { first, second }
    }

    /// The transform applied first.
    pub fn first(&self) -> &A {
        &self.first
    }

    /// The transform applied to the first one's output.
    pub fn second(&self) -> &B {
        &self.second
    }
}

impl<A, B> Transform for Composed<A, B>
where
    A: Transform,
    B: Transform<Input = A::Output>,
{
    type Input = A::Input;
    type Output = B::Output;

    fn apply(&self, input: A::Input) -> Result<B::Output> {
        let mid = self.first.apply(input)?;
        self.second.apply(mid)
    }

    fn name(&self) -> &'static str {
        "composed"
    }
}

impl_compose_operator!(Composed<A, B>);

/// A closure lifted into a [`Transform`].
pub struct FnTransform<In, Out> {
    f: Arc<dyn Fn(In) -> Result<Out> + Send + Sync>,
}

impl<In, Out> Clone for FnTransform<In, Out> {
    fn clone(&self) -> Self {
        Self { f: Arc::clone(&self.f) }
    }
}

impl<In: 'static, Out: 'static> Transform for FnTransform<In, Out> {
    type Input = In;
    type Output = Out;

    fn apply(&self, input: In) -> Result<Out> {
        (self.f)(input)
    }

    fn name(&self) -> &'static str {
        "fn"
    }
}

impl_compose_operator!(FnTransform<In, Out>);

/// Lift an infallible closure into a transform.
pub fn from_fn<In, Out, F>(f: F) -> FnTransform<In, Out>
where
    F: Fn(In) -> Out + Send + Sync + 'static,
{
    FnTransform {
        f: Arc::new(move |input| Ok(f(input))),
    }
}

/// Lift a fallible closure into a transform. Its errors are returned as-is.
pub fn try_from_fn<In, Out, E, F>(f: F) -> FnTransform<In, Out>
where
    E: Into<anyhow::Error>,
    F: Fn(In) -> std::result::Result<Out, E> + Send + Sync + 'static,
{
    FnTransform {
        f: Arc::new(move |input| f(input).map_err(Into::into)),
    }
}

/// The transform that returns its input unchanged.
pub struct Identity<T>(PhantomData<fn(T) -> T>);

impl<T> Identity<T> {
    /// Create an identity transform.
    pub fn new() -> Self {
        Self(PhantomData)
    }
}

impl<T> Default for Identity<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Transform for Identity<T> {
    type Input = T;
    type Output = T;

    fn apply(&self, input: T) -> Result<T> {
        Ok(input)
    }

    fn name(&self) -> &'static str {
        "identity"
    }
}

impl_compose_operator!(Identity<T>);

/// Shorthand for [`Identity::new`].
pub fn identity<T>() -> Identity<T> {
    Identity::new()
}

/// Chain transforms left to right: `compose!(a, b, c)` is `a.then(b).then(c)`.
///
/// ```
/// use ironpipe::*;
///
/// # fn main() -> anyhow::Result<()> {
/// let t = compose!(
///     Map::new(|x: &i32| x + 1),
///     Filter::new(|x: &i32| x % 2 == 0),
///     Reduce::new(|acc: i32, x: i32| acc + x),
/// );
/// assert_eq!(t.apply(vec![1, 2, 3, 4])?, 2 + 4);
/// # Ok(())
/// # }
/// ```
#[macro_export]
macro_rules! compose {
    ($first:expr $(, $rest:expr)* $(,)?) => {{
        let composed = $first;
        $( let composed = $crate::Transform::then(composed, $rest); )*
        composed
    }};
}
