#![forbid(unsafe_code)]

//! Error types for behavior setup.
//!
//! Only `attach` can fail at runtime. Update-list shape mismatches and
//! calls on a spent controller are caller contract violations and never
//! surface here.

use thiserror::Error;

/// Boxed source error carried by [`BehaviorError`].
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Result type for [`attach`](crate::attach) and [`attach_with`](crate::attach_with).
pub type Result<T> = std::result::Result<T, AttachError>;

/// A failure raised by a behavior while it sets itself up on a host.
#[derive(Debug, Error)]
#[error("{message}")]
pub struct BehaviorError {
    message: String,
    #[source]
    source: Option<BoxError>,
}

impl BehaviorError {
    #[must_use]
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            source: None,
        }
    }

    /// Wrap an underlying error with a short description.
    #[must_use]
    pub fn with_source(message: impl Into<String>, source: impl Into<BoxError>) -> Self {
        Self {
            message: message.into(),
            source: Some(source.into()),
        }
    }

    #[must_use]
    pub fn message(&self) -> &str {
        &self.message
    }
}

impl From<String> for BehaviorError {
    fn from(message: String) -> Self {
        Self::new(message)
    }
}

impl From<&str> for BehaviorError {
    fn from(message: &str) -> Self {
        Self::new(message)
    }
}

/// Error returned when attaching a binding list fails.
#[derive(Debug, Error)]
pub enum AttachError {
    /// The behavior at `index` returned an error. Bindings before it were
    /// already attached and are not rolled back; bindings after it never ran.
    #[error("behavior at position {index} failed to attach: {source}")]
    Behavior {
        index: usize,
        #[source]
        source: BehaviorError,
    },
}

impl AttachError {
    /// Position of the binding whose behavior failed.
    #[must_use]
    pub fn failed_index(&self) -> usize {
        match self {
            Self::Behavior { index, .. } => *index,
        }
    }
}
