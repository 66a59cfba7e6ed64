// Purpose: Structured record of a single log event, created fresh per emission
// and discarded after serialization.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde_json::Value;

use crate::level::LogLevel;

/// Optional source location carried by a record. Absent attributes are
/// omitted from output rather than treated as failures.
#[derive(Debug, Clone, Default)]
pub struct SourceLocation {
    pub module: Option<String>,
    pub file: Option<String>,
    pub line: Option<u32>,
}

/// LogRecord is a structured record of one runtime log event.
#[derive(Debug, Clone)]
pub struct LogRecord {
    pub logger: String,
    pub level: LogLevel,
    pub message: String,
    pub timestamp: DateTime<Utc>,
    pub source: Option<SourceLocation>,
    /// Message-time key/value pairs supplied at the call site. Ordered so
    /// two records with identical content serialize identically.
    pub extras: BTreeMap<String, Value>,
}

impl LogRecord {
    /// Generates a new record stamped with the current UTC time
    pub fn new(logger: &str, level: LogLevel, message: impl Into<String>) -> Self {
        Self {
            logger: logger.to_string(),
            level,
            message: message.into(),
            timestamp: Utc::now(),
            source: None,
            extras: BTreeMap::new(),
        }
    }

    /// Overrides the emission timestamp
    pub fn with_timestamp(mut self, timestamp: DateTime<Utc>) -> Self {
        self.timestamp = timestamp;
        self
    }

    /// Attaches the originating source location
    pub fn with_source(mut self, source: SourceLocation) -> Self {
        self.source = Some(source);
        self
    }

    /// Adds a single call-site field
    pub fn with_extra(mut self, key: &str, value: Value) -> Self {
        self.extras.insert(key.to_string(), value);
        self
    }

    /// Merges a full set of call-site fields
    pub fn with_extras(mut self, extras: BTreeMap<String, Value>) -> Self {
        self.extras.extend(extras);
        self
    }
}
