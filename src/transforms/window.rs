//! Fixed-size sliding windows over a sequence.

use crate::error::{Result, TransformError};
use crate::transform::{Transform, impl_compose_operator};
use std::marker::PhantomData;

/// Sliding windows of exactly `size` consecutive elements.
///
/// Windows start at index 0 and advance by `step` (default: `size`, giving
/// non-overlapping windows). A window is emitted only if it fits entirely in
/// the input, so trailing elements that cannot fill one are dropped. For an
/// input of length `n` that is `max(0, (n - size) / step + 1)` windows.
///
/// ```
/// use ironpipe::*;
///
/// # fn main() -> anyhow::Result<()> {
/// let w = Window::with_step(3, 2)?;
/// assert_eq!(w.apply(vec![1, 2, 3, 4, 5, 6])?, vec![vec![1, 2, 3], vec![3, 4, 5]]);
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone, Copy)]
pub struct Window<T> {
    size: usize,
    step: usize,
    _t: PhantomData<fn(T) -> T>,
}

impl<T> Window<T> {
    /// Non-overlapping windows of `size`.
    pub fn new(size: usize) -> Result<Self> {
        Self::with_step(size, size)
    }

    /// Windows of `size` advancing by `step`.
    ///
    /// A zero `size` or `step` fails with [`TransformError::InvalidParameter`].
    pub fn with_step(size: usize, step: usize) -> Result<Self> {
        if size == 0 {
            return Err(TransformError::invalid("size", "window size must be > 0").into());
        }
        if step == 0 {
            return Err(TransformError::invalid("step", "window step must be > 0").into());
        }
        Ok(Self {
            size,
            step,
            _t: PhantomData,
        })
    }

    /// Elements per window.
    pub fn size(&self) -> usize {
        self.size
    }

    /// Distance between window starts.
    pub fn step(&self) -> usize {
        self.step
    }

    /// Number of windows produced for an input of length `len`.
    pub fn count_for(&self, len: usize) -> usize {
        if len < self.size {
            0
        } else {
            (len - self.size) / self.step + 1
        }
    }
}

impl<T: Clone> Transform for Window<T> {
    type Input = Vec<T>;
    type Output = Vec<Vec<T>>;

    fn apply(&self, input: Vec<T>) -> Result<Vec<Vec<T>>> {
        let windows = (0..self.count_for(input.len()))
            .map(|i| {
                let start = i * self.step;
                input[start..start + self.size].to_vec()
            })
            .collect();
        Ok(windows)
    }

    fn name(&self) -> &'static str {
        "window"
    }
}

impl_compose_operator!(Window<T>);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn overlapping_windows_drop_incomplete_tail() -> Result<()> {
        let w = Window::with_step(3, 2)?;
        assert_eq!(w.apply(vec![1, 2, 3, 4, 5, 6])?, vec![vec![1, 2, 3], vec![3, 4, 5]]);
        Ok(())
    }

    #[test]
    fn default_step_is_size() -> Result<()> {
        let w = Window::new(2)?;
        assert_eq!(w.step(), 2);
        assert_eq!(w.apply(vec!['a', 'b', 'c', 'd', 'e'])?, vec![vec!['a', 'b'], vec!['c', 'd']]);
        Ok(())
    }

    #[test]
    fn oversized_window_yields_nothing() -> Result<()> {
        let w = Window::new(4)?;
        assert!(w.apply(vec![1, 2, 3])?.is_empty());
        assert!(w.apply(Vec::<i32>::new())?.is_empty());
        Ok(())
    }

    #[test]
    fn step_larger_than_size_skips_elements() -> Result<()> {
        let w = Window::with_step(2, 3)?;
        assert_eq!(w.apply((0..8).collect())?, vec![vec![0, 1], vec![3, 4], vec![6, 7]]);
        Ok(())
    }

    #[test]
    fn zero_parameters_are_rejected() {
        for (size, step, field) in [(0, 1, "size"), (1, 0, "step")] {
            let err = Window::<u8>::with_step(size, step).unwrap_err();
            match err.downcast_ref::<TransformError>() {
                Some(TransformError::InvalidParameter { name, .. }) => assert_eq!(*name, field),
                other => panic!("unexpected error: {other:?}"),
            }
        }
    }

    #[test]
    fn count_matches_formula() -> Result<()> {
        for n in 0..20usize {
            for size in 1..6 {
                for step in 1..6 {
                    let w = Window::with_step(size, step)?;
                    let expected = if n >= size { (n - size) / step + 1 } else { 0 };
                    assert_eq!(w.apply(vec![0u8; n])?.len(), expected, "n={n} size={size} step={step}");
                }
            }
        }
        Ok(())
    }
}
