//! Error types for tirea-optics operations.

use crate::Key;
use thiserror::Error;

/// Result type alias for tirea-optics operations.
pub type OpticsResult<T> = Result<T, OpticsError>;

/// Errors raised by [`set`](crate::set) and [`over`](crate::over).
///
/// Reads never fail, and a write that cannot find its slot is a no-op rather
/// than an error. Apart from `IndexTooLarge`, these are programming errors in
/// the lens.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum OpticsError {
    /// A step used a key of a kind that cannot address a container.
    #[error("invalid lens key of kind {kind} in {lens}")]
    InvalidKey {
        /// The rejected key kind.
        kind: &'static str,
        /// The lens that contained the key.
        lens: String,
    },

    /// A single-key lens was written into a null target.
    #[error("cannot set {key} on a null target; use a path lens to vivify")]
    AbsentTarget {
        /// The key that was applied.
        key: Key,
    },

    /// Padding a list up to an index could not be allocated.
    #[error("index {index} is too large to write")]
    IndexTooLarge {
        /// The requested index.
        index: i64,
    },
}

impl OpticsError {
    /// Create an invalid key error.
    #[inline]
    pub fn invalid_key(kind: &'static str, lens: impl Into<String>) -> Self {
        OpticsError::InvalidKey {
            kind,
            lens: lens.into(),
        }
    }

    /// Create an absent target error.
    #[inline]
    pub fn absent_target(key: Key) -> Self {
        OpticsError::AbsentTarget { key }
    }

    /// Create an index too large error.
    #[inline]
    pub fn index_too_large(index: i64) -> Self {
        OpticsError::IndexTooLarge { index }
    }
}
