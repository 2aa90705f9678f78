//! Error types for code generation.

use thiserror::Error;

/// Error type for code generation operations.
#[derive(Debug, Error)]
pub enum CodegenError {
    /// Schema derivation error.
    #[error("derive error: {0}")]
    Derive(#[from] schemagen_schema::DeriveError),

    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// An attribute value has no source rendering.
    #[error("cannot render value {value} of attribute '{attribute}'")]
    Unrenderable {
        /// Attribute name.
        attribute: String,
        /// Debug form of the value.
        value: String,
    },

    /// Code generation error.
    #[error("generation error: {message}")]
    Generation {
        /// Error message.
        message: String,
    },
}

impl CodegenError {
    /// Creates a generation error with the given message.
    pub fn generation(message: impl Into<String>) -> Self {
        Self::Generation {
            message: message.into(),
        }
    }

    /// Creates an unrenderable-value error.
    pub fn unrenderable(attribute: impl Into<String>, value: impl std::fmt::Debug) -> Self {
        Self::Unrenderable {
            attribute: attribute.into(),
            value: format!("{value:?}"),
        }
    }
}
