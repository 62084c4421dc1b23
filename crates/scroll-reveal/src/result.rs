//! Result and error types for scroll-reveal.

use thiserror::Error;

use crate::host::ElementRole;

/// Result type for scroll-reveal operations
pub type RevealResult<T> = Result<T, RevealError>;

/// Errors that can occur while mounting or driving the reveal
#[derive(Debug, Error)]
pub enum RevealError {
    /// A required element could not be found in the document
    #[error("Required {role} element not found: #{id}")]
    MissingElement {
        /// Which of the three elements is missing
        role: ElementRole,
        /// Identifier that failed to resolve
        id: String,
    },

    /// Configuration rejected by validation
    #[error("Invalid configuration: {message}")]
    InvalidConfig {
        /// Error message
        message: String,
    },

    /// A host call failed (style write, frame request, measurement)
    #[error("Host error: {message}")]
    Host {
        /// Error message
        message: String,
    },

    /// JSON error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl RevealError {
    /// Build an [`RevealError::InvalidConfig`]
    pub fn invalid_config(message: impl Into<String>) -> Self {
        Self::InvalidConfig {
            message: message.into(),
        }
    }

    /// Build an [`RevealError::Host`]
    pub fn host(message: impl Into<String>) -> Self {
        Self::Host {
            message: message.into(),
        }
    }

    /// Whether this error is the startup "element missing" condition
    #[must_use]
    pub const fn is_missing_element(&self) -> bool {
        matches!(self, Self::MissingElement { .. })
    }
}
