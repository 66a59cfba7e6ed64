//! Library root for the `structlog-forge` crate
//!
//! Structured JSON logging with a pluggable field-injection formatter,
//! size-based file rotation, terminal output, and a `log` facade bridge.

// Core error handling
pub mod errors;

// Record model
pub mod level;
pub mod record;

// Formatting & the AddFields extension point
pub mod format;

// Sinks
pub mod rotate;

// Configuration
pub mod config;

// Wiring & operational helpers
pub mod manager;

// `log` facade backend
pub mod bridge;

#[cfg(test)]
mod tests {
    pub mod config_tests;
    pub mod format_tests;
    pub mod rotation_tests;
}

// Re-export the working surface
pub use config::LogConfig;
pub use errors::{LogError, Result};
pub use format::{AddFields, FieldMap, JsonFormatter, TextFormatter};
pub use level::LogLevel;
pub use manager::{default_logger, default_manager, LogManager, Logger, ScopedLog};
pub use record::{LogRecord, SourceLocation};
pub use rotate::RotatingFileWriter;
