//! Error types for the representation engine.
//!
//! The engine itself is total: producing a representation never fails, and
//! conditions like cycles or exceeded limits are rendered inline rather than
//! reported as errors (see the crate docs). The error type here covers the
//! two boundaries where a `Result` is still the honest signature:
//!
//! - capturing a native Rust value into a [`Value`](crate::Value) via serde,
//!   where a type's own `Serialize` impl may fail, and
//! - writing the tree-mode output, where the final JSON string is produced
//!   by `serde_json`.
//!
//! Member-access failures are *not* errors: they are data, carried on the
//! value model as [`MemberError`](crate::MemberError) and rendered as inline
//! placeholders scoped to the one member that failed.

use std::fmt;
use thiserror::Error;

/// Represents the errors that can occur while capturing a value or writing
/// tree output.
#[derive(Debug, Error)]
pub enum Error {
    /// A native value could not be hosted in the dynamic value model.
    #[error("Unsupported value: {0}")]
    Unsupported(String),

    /// The tree-mode JSON writer failed.
    #[error("Tree output error: {0}")]
    Tree(#[from] serde_json::Error),

    /// Custom error
    #[error("Error: {0}")]
    Custom(String),
}

impl Error {
    /// Creates an unsupported-value error for shapes the value model cannot host.
    pub fn unsupported(msg: &str) -> Self {
        Error::Unsupported(msg.to_string())
    }

    /// Creates a custom error with a display message.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use reprs::Error;
    ///
    /// let err = Error::custom("something went wrong");
    /// assert!(err.to_string().contains("something went wrong"));
    /// ```
    pub fn custom<T: fmt::Display>(msg: T) -> Self {
        Error::Custom(msg.to_string())
    }
}

impl serde::ser::Error for Error {
    fn custom<T: fmt::Display>(msg: T) -> Self {
        Error::Custom(msg.to_string())
    }
}

pub type Result<T> = std::result::Result<T, Error>;
