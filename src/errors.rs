//! Error handling for the structlog-forge crate
//!
//! This module provides structured error types following Rust best practices
//! as outlined in The Rust Book Chapter 9 on Error Handling.

use thiserror::Error;

/// Main error type for the logging pipeline
#[derive(Error, Debug)]
pub enum LogError {
    #[error("Configuration error: {message}")]
    Config { message: String },

    #[error("I/O operation failed: {operation}")]
    Io {
        operation: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Serialization failed: {context}")]
    Serialization {
        context: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("Logger installation failed: {message}")]
    Install { message: String },
}

impl LogError {
    /// Create a configuration error
    pub fn config(message: impl Into<String>) -> Self {
        LogError::Config {
            message: message.into(),
        }
    }

    /// Create an I/O error with operation context
    pub fn io(operation: impl Into<String>, source: std::io::Error) -> Self {
        LogError::Io {
            operation: operation.into(),
            source,
        }
    }

    /// Create a serialization error with context
    pub fn serialization(context: impl Into<String>, source: serde_json::Error) -> Self {
        LogError::Serialization {
            context: context.into(),
            source,
        }
    }
}

/// Convenience result type for logging operations
pub type Result<T> = std::result::Result<T, LogError>;
