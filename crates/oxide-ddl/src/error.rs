//! Error types for expression building and rendering.

use crate::provider::DatabaseProvider;

/// Errors raised while rendering or playing back migration expressions.
#[derive(Debug, thiserror::Error)]
pub enum DdlError {
    /// A relationship required for rendering was never established
    /// (for example a foreign key whose table was never named).
    #[error("Invalid expression configuration: {0}")]
    Configuration(String),

    /// The dialect has no statement form for the requested operation.
    #[error("{operation} is not supported by the {provider} dialect")]
    UnsupportedSyntax {
        /// Dialect that was asked to render.
        provider: DatabaseProvider,
        /// Operation that has no template.
        operation: &'static str,
    },

    /// A provider name could not be resolved.
    #[error("Unknown database provider: {0}")]
    UnknownProvider(String),

    /// The SQL executor rejected a rendered statement.
    #[error("Failed to execute statement: {0}")]
    Execution(String),

    /// Migration settings could not be read.
    #[error("Invalid migration settings: {0}")]
    Settings(#[from] serde_json::Error),
}

impl DdlError {
    /// Shorthand for a [`DdlError::Configuration`] error.
    pub fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration(message.into())
    }
}

/// Result type for expression rendering and playback.
pub type Result<T> = std::result::Result<T, DdlError>;
