//! Left fold over a sequence.

use crate::error::{Result, TransformError};
use crate::transform::{Transform, impl_compose_operator};
use std::sync::Arc;

enum Seed<T, U> {
    /// Fold starts at a fresh copy of `value` and covers every element.
    Initial { value: U, fresh: fn(&U) -> U },
    /// Fold starts at the first element and covers the rest.
    First(fn(T) -> U),
}

/// Fold a sequence into a single value.
///
/// With an initial value, the fold starts there and visits every element; an
/// empty input yields the initial value itself. Without one, the first element
/// seeds the fold and an empty input fails with
/// [`TransformError::EmptySequence`]. Presence is what matters: an explicit
/// `0` or empty initial value is used like any other.
pub struct Reduce<T, U = T> {
    reducer: Arc<dyn Fn(U, T) -> Result<U> + Send + Sync>,
    seed: Seed<T, U>,
}

impl<T: 'static> Reduce<T, T> {
    /// Fold seeded by the first element.
    pub fn new<F>(reducer: F) -> Self
    where
        F: Fn(T, T) -> T + Send + Sync + 'static,
    {
        Self {
            reducer: Arc::new(move |acc, item| Ok(reducer(acc, item))),
            seed: Seed::First(std::convert::identity),
        }
    }

    /// Like [`Reduce::new`], for a reducer that can fail.
    pub fn try_new<F, E>(reducer: F) -> Self
    where
        E: Into<anyhow::Error>,
        F: Fn(T, T) -> std::result::Result<T, E> + Send + Sync + 'static,
    {
        Self {
            reducer: Arc::new(move |acc, item| reducer(acc, item).map_err(Into::into)),
            seed: Seed::First(std::convert::identity),
        }
    }
}

impl<T: 'static, U: Clone + 'static> Reduce<T, U> {
    /// Fold starting from `initial`.
    pub fn with_initial<F>(initial: U, reducer: F) -> Self
    where
        F: Fn(U, T) -> U + Send + Sync + 'static,
    {
        Self {
            reducer: Arc::new(move |acc, item| Ok(reducer(acc, item))),
            seed: Seed::Initial {
                value: initial,
                fresh: U::clone,
            },
        }
    }

    /// Like [`Reduce::with_initial`], for a reducer that can fail.
    pub fn try_with_initial<F, E>(initial: U, reducer: F) -> Self
    where
        E: Into<anyhow::Error>,
        F: Fn(U, T) -> std::result::Result<U, E> + Send + Sync + 'static,
    {
        Self {
            reducer: Arc::new(move |acc, item| reducer(acc, item).map_err(Into::into)),
            seed: Seed::Initial {
                value: initial,
                fresh: U::clone,
            },
        }
    }
}

impl<T, U> Reduce<T, U> {
    /// The initial value, if one was supplied.
    pub fn initial(&self) -> Option<&U> {
        match &self.seed {
            Seed::Initial { value, .. } => Some(value),
            Seed::First(_) => None,
        }
    }
}

impl<T, U> Transform for Reduce<T, U>
where
    U: Send + Sync,
{
    type Input = Vec<T>;
    type Output = U;

    fn apply(&self, input: Vec<T>) -> Result<U> {
        let mut items = input.into_iter();
        let mut acc = match &self.seed {
            Seed::Initial { value, fresh } => fresh(value),
            Seed::First(lift) => match items.next() {
                Some(first) => lift(first),
                None => return Err(TransformError::EmptySequence.into()),
            },
        };
        for item in items {
            acc = (self.reducer)(acc, item)?;
        }
        Ok(acc)
    }

    fn name(&self) -> &'static str {
        "reduce"
    }
}

impl_compose_operator!(Reduce<T, U>);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_without_initial_fails() {
        let sum = Reduce::new(|a: i32, b: i32| a + b);
        let err = sum.apply(Vec::new()).unwrap_err();
        assert_eq!(
            err.downcast_ref::<TransformError>(),
            Some(&TransformError::EmptySequence)
        );
    }

    #[test]
    fn single_element_is_returned_unchanged() -> Result<()> {
        let never_called = Reduce::new(|_: String, _: String| -> String { unreachable!() });
        assert_eq!(never_called.apply(vec!["only".to_string()])?, "only");
        Ok(())
    }

    #[test]
    fn empty_with_initial_returns_initial() -> Result<()> {
        let r = Reduce::with_initial(7u64, |acc, x: u64| acc * x);
        assert_eq!(r.apply(Vec::new())?, 7);
        assert_eq!(r.initial(), Some(&7));
        Ok(())
    }

    #[test]
    fn zero_initial_is_still_an_initial() -> Result<()> {
        // Seeding with the first element instead would give 10 + 3 + 1 = 14.
        let r = Reduce::with_initial(0, |acc: i32, x: i32| acc + x + 1);
        assert_eq!(r.apply(vec![10, 3])?, 15);
        Ok(())
    }

    #[test]
    fn initial_changes_output_type() -> Result<()> {
        let joined = Reduce::with_initial(String::new(), |mut acc: String, c: char| {
            acc.push(c);
            acc
        });
        assert_eq!(joined.apply(vec!['a', 'b', 'c'])?, "abc");
        Ok(())
    }

    #[test]
    fn fold_is_left_associative() -> Result<()> {
        let r = Reduce::new(|a: i32, b: i32| a - b);
        assert_eq!(r.apply(vec![10, 1, 2, 3])?, ((10 - 1) - 2) - 3);
        Ok(())
    }

    #[test]
    fn first_seeded_fold_accepts_non_clone_elements() -> Result<()> {
        #[derive(Debug, PartialEq)]
        struct Tally(u32);

        let total = Reduce::new(|a: Tally, b: Tally| Tally(a.0 + b.0));
        assert_eq!(total.apply(vec![Tally(1), Tally(2), Tally(4)])?, Tally(7));
        Ok(())
    }

    #[test]
    fn reducer_error_passes_through() {
        let r = Reduce::try_new(|a: u8, b: u8| a.checked_add(b).ok_or_else(|| anyhow::anyhow!("overflow")));
        assert_eq!(r.apply(vec![200, 100]).unwrap_err().to_string(), "overflow");
    }
}
