// Purpose: Render log records to their wire shapes. The JSON path runs
// through the `AddFields` extension point so callers can inject fields
// without touching the base formatter.

use chrono::SecondsFormat;
use serde_json::{Map, Value};

use crate::errors::{LogError, Result};
use crate::record::LogRecord;

/// Mutable output mapping built up per record before serialization.
pub type FieldMap = Map<String, Value>;

/// Extension point for structured output.
///
/// The base formatter calls this once per record with the in-progress output
/// mapping, the originating record, and the already-rendered message-time
/// fields. Implementations mutate `log_record` in place and perform no I/O.
///
/// Guarantees an implementation must uphold:
/// - every pre-existing key not deliberately overwritten is preserved;
/// - every surfaced key has a stable, documented name;
/// - key collisions resolve last-write-wins, deterministically;
/// - absent optional record attributes are omitted, never an error.
pub trait AddFields {
    fn add_fields(&self, log_record: &mut FieldMap, record: &LogRecord, message_fields: &FieldMap);
}

/// JSON formatter producing one object per line.
///
/// Surfaced keys, in insertion order: `timestamp` (RFC 3339, millisecond
/// precision), `level`, `logger`, `message`, then `module`/`file`/`line`
/// when a source location is present, then every message-time field, then
/// every record extra. Later writes win on collision.
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonFormatter;

impl JsonFormatter {
    /// Format a record as a single JSON line
    pub fn format(&self, record: &LogRecord) -> Result<String> {
        let mut fields = FieldMap::new();
        let message_fields = FieldMap::new();
        self.add_fields(&mut fields, record, &message_fields);
        serde_json::to_string(&Value::Object(fields))
            .map_err(|e| LogError::serialization("log record", e))
    }
}

impl AddFields for JsonFormatter {
    fn add_fields(&self, log_record: &mut FieldMap, record: &LogRecord, message_fields: &FieldMap) {
        log_record.insert(
            "timestamp".to_string(),
            Value::String(record.timestamp.to_rfc3339_opts(SecondsFormat::Millis, true)),
        );
        log_record.insert(
            "level".to_string(),
            Value::String(record.level.as_str().to_string()),
        );
        log_record.insert("logger".to_string(), Value::String(record.logger.clone()));
        log_record.insert("message".to_string(), Value::String(record.message.clone()));

        if let Some(source) = &record.source {
            if let Some(module) = &source.module {
                log_record.insert("module".to_string(), Value::String(module.clone()));
            }
            if let Some(file) = &source.file {
                log_record.insert("file".to_string(), Value::String(file.clone()));
            }
            if let Some(line) = source.line {
                log_record.insert("line".to_string(), Value::from(line));
            }
        }

        for (key, value) in message_fields {
            log_record.insert(key.clone(), value.clone());
        }
        for (key, value) in &record.extras {
            log_record.insert(key.clone(), value.clone());
        }
    }
}

/// Human-readable single-line formatter for terminal output
#[derive(Debug, Clone, Copy, Default)]
pub struct TextFormatter;

impl TextFormatter {
    pub fn format(&self, record: &LogRecord) -> String {
        let mut line = format!(
            "{} - {} - {} - {}",
            record.timestamp.to_rfc3339_opts(SecondsFormat::Millis, true),
            record.logger,
            record.level,
            record.message,
        );
        for (key, value) in &record.extras {
            match value {
                Value::String(s) => line.push_str(&format!(" {key}={s}")),
                other => line.push_str(&format!(" {key}={other}")),
            }
        }
        line
    }
}
