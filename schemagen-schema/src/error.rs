//! Error types for schema derivation.

use thiserror::Error;

/// Error raised by a caller-supplied filter.
#[derive(Debug, Error)]
#[error("{message}")]
pub struct FilterError {
    message: String,
    #[source]
    source: Option<Box<dyn std::error::Error + Send + Sync>>,
}

impl FilterError {
    /// Creates a filter error with the given message.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            source: None,
        }
    }

    /// Creates a filter error wrapping an underlying cause.
    pub fn with_source(
        message: impl Into<String>,
        source: impl Into<Box<dyn std::error::Error + Send + Sync>>,
    ) -> Self {
        Self {
            message: message.into(),
            source: Some(source.into()),
        }
    }

    /// Returns the error message.
    #[must_use]
    pub fn message(&self) -> &str {
        &self.message
    }
}

/// Error type for schema derivation.
#[derive(Debug, Error)]
pub enum DeriveError {
    /// A filter aborted the derivation.
    #[error("filter failed on field '{field}' of '{subject}': {source}")]
    Filter {
        /// Type being derived.
        subject: String,
        /// Field the filter was processing.
        field: String,
        /// Filter error.
        #[source]
        source: FilterError,
    },

    /// Two fields produced the same key at one nesting level.
    #[error("key \"{key}\" conflicts with key already in the schema of '{subject}'")]
    Collision {
        /// Type being derived.
        subject: String,
        /// Conflicting key.
        key: String,
    },

    /// A field wrapped in `Option`, `Rc` or `Arc` was marked for promotion.
    ///
    /// Promoted keys are assigned through the owner field, which only plain
    /// and boxed owners allow.
    #[error("field '{field}' of '{subject}' cannot be flattened through {wrapper}")]
    Unflattenable {
        /// Type being derived.
        subject: String,
        /// Field marked for promotion.
        field: String,
        /// Wrapper type in the way.
        wrapper: String,
    },

    /// A composite type contains itself on the current derivation path.
    #[error("recursive type reference detected: {path}")]
    RecursiveType {
        /// Chain of type paths ending in the repeated type.
        path: String,
    },
}

impl DeriveError {
    /// Creates a collision error.
    pub fn collision(subject: impl Into<String>, key: impl Into<String>) -> Self {
        Self::Collision {
            subject: subject.into(),
            key: key.into(),
        }
    }

    /// Returns the conflicting key, if this is a collision error.
    #[must_use]
    pub fn collision_key(&self) -> Option<&str> {
        match self {
            Self::Collision { key, .. } => Some(key),
            _ => None,
        }
    }
}
