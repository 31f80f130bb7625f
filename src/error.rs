//! Error types for transform evaluation and pipeline construction.
//!
//! Every fallible call in this crate returns [`Result`], an alias for
//! [`anyhow::Result`]. Errors the core raises itself are [`TransformError`]
//! values; recover them with `err.downcast_ref::<TransformError>()`.
//!
//! Errors returned by user-supplied predicates, mappers, reducers and key
//! functions are passed through untouched. No context is attached, so the
//! caller can still downcast them to their original type.

use thiserror::Error;

/// Crate-wide result type.
pub type Result<T> = anyhow::Result<T>;

/// Errors raised by the transform core.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TransformError {
    /// A reduce without an initial value was applied to an empty sequence.
    #[error("cannot reduce an empty sequence without an initial value")]
    EmptySequence,

    /// Two stages were linked whose output and input types differ.
    #[error("cannot compose a stage producing `{left}` with a stage consuming `{right}`")]
    UnsupportedComposition {
        left: &'static str,
        right: &'static str,
    },

    /// A pipeline was invoked with (or asked to produce) a type it does not handle.
    #[error("type mismatch: pipeline expects `{expected}`, got `{found}`")]
    TypeMismatch {
        expected: &'static str,
        found: &'static str,
    },

    /// A field-name group key referenced a field the record does not have.
    #[error("record has no field `{field}`")]
    MissingField { field: String },

    /// A primitive was constructed with an out-of-range parameter.
    #[error("invalid `{name}`: {reason}")]
    InvalidParameter { name: &'static str, reason: String },
}

impl TransformError {
    /// Shorthand for an [`InvalidParameter`](Self::InvalidParameter) error.
    pub(crate) fn invalid(name: &'static str, reason: impl Into<String>) -> Self {
        Self::InvalidParameter {
            name,
            reason: reason.into(),
        }
    }
}
