//! Error types for SbcForge

use thiserror::Error;

/// Main error type for SbcForge operations
#[derive(Debug, Error)]
pub enum SbcError {
    /// Error in rule configuration
    #[error("Configuration error: {0}")]
    Config(String),

    /// The compiled model violates a configuration contract
    #[error("Model invalid: {0}")]
    ModelInvalid(String),

    /// Formation template name is not known
    #[error("Unknown formation: {0}")]
    UnknownFormation(String),

    /// Error reported by the solver backend
    #[error("Solver error: {0}")]
    Solver(String),

    /// Solve was cancelled before completion
    #[error("Solve was cancelled")]
    Cancelled,

    /// Internal error (should not occur in normal operation)
    #[error("Internal error: {0}")]
    Internal(String),
}

/// Result type alias for SbcForge operations
pub type Result<T> = std::result::Result<T, SbcError>;
