// Purpose: Wire the formatter and sinks together and expose the operational
// surface: logger handles, scoped operation contexts, timing and failure
// helpers, and the env-configured default manager.

use std::collections::BTreeMap;
use std::fmt::Display;
use std::path::Path;
use std::sync::{Arc, Mutex};
use std::time::Instant;

use chrono::{DateTime, SecondsFormat, Utc};
use lazy_static::lazy_static;
use serde_json::{json, Value};
use uuid::Uuid;

use crate::config::LogConfig;
use crate::errors::Result;
use crate::format::{JsonFormatter, TextFormatter};
use crate::level::LogLevel;
use crate::record::LogRecord;
use crate::rotate::RotatingFileWriter;

struct ManagerCore {
    config: LogConfig,
    json_formatter: JsonFormatter,
    text_formatter: TextFormatter,
    file_sink: Option<Mutex<RotatingFileWriter>>,
}

impl ManagerCore {
    fn enabled(&self, level: LogLevel) -> bool {
        level >= self.config.level
    }

    fn emit(&self, record: &LogRecord) {
        if !self.enabled(record.level) {
            return;
        }
        self.write(record);
    }

    /// Write one record to every configured sink, level gating already
    /// applied by the caller. Sink failures are reported on stderr and the
    /// record is dropped; logging must never take the application down.
    fn write(&self, record: &LogRecord) {
        if let Some(sink) = &self.file_sink {
            match self.json_formatter.format(record) {
                Ok(line) => {
                    // A poisoned lock only means another thread panicked
                    // mid-write; the writer state is a file handle and a
                    // byte counter, both still usable.
                    let mut writer = match sink.lock() {
                        Ok(guard) => guard,
                        Err(poisoned) => poisoned.into_inner(),
                    };
                    if let Err(err) = writer.write_line(&line) {
                        eprintln!("structlog: dropped record: {err}");
                    }
                }
                Err(err) => eprintln!("structlog: dropped record: {err}"),
            }
        }

        if self.config.terminal_output {
            println!("{}", self.text_formatter.format(record));
        }
    }
}

/// Manager owning the configured sinks. Cheap to clone; clones share sinks.
#[derive(Clone)]
pub struct LogManager {
    core: Arc<ManagerCore>,
}

impl LogManager {
    /// Build a manager from an explicit configuration, creating the log
    /// directory when JSON file output is enabled.
    pub fn new(config: LogConfig) -> Result<Self> {
        config.validate()?;

        let file_sink = if config.json_output {
            Some(Mutex::new(RotatingFileWriter::new(
                Path::new(&config.log_dir),
                &config.app_name,
                config.max_bytes,
                config.backup_count,
            )?))
        } else {
            None
        };

        Ok(Self {
            core: Arc::new(ManagerCore {
                config,
                json_formatter: JsonFormatter,
                text_formatter: TextFormatter,
                file_sink,
            }),
        })
    }

    /// Build a manager from `structlog.toml` and `STRUCTLOG_*` env variables
    pub fn from_env() -> Result<Self> {
        Self::new(LogConfig::load()?)
    }

    /// Terminal-only manager that cannot fail to construct
    pub fn terminal_only(app_name: &str) -> Self {
        Self {
            core: Arc::new(ManagerCore {
                config: LogConfig {
                    app_name: app_name.to_string(),
                    json_output: false,
                    ..LogConfig::default()
                },
                json_formatter: JsonFormatter,
                text_formatter: TextFormatter,
                file_sink: None,
            }),
        }
    }

    pub fn config(&self) -> &LogConfig {
        &self.core.config
    }

    /// Logger handle named after the configured application
    pub fn logger(&self) -> Logger {
        self.named(&self.core.config.app_name)
    }

    /// Logger handle with an explicit name, for subsystems
    pub fn named(&self, name: &str) -> Logger {
        Logger {
            core: self.core.clone(),
            name: name.to_string(),
        }
    }

    pub(crate) fn emit(&self, record: &LogRecord) {
        self.core.emit(record);
    }

    /// Write a record whose level gating the caller has already decided.
    /// Used by the facade bridge, which filters against the facade's own
    /// level scale before translating records.
    pub(crate) fn write(&self, record: &LogRecord) {
        self.core.write(record);
    }

    /// Start a scoped operation context. The returned guard accumulates
    /// context fields and emits a completion record with the elapsed
    /// duration when dropped.
    pub fn scoped(&self, operation: &str, context: BTreeMap<String, Value>) -> ScopedLog {
        ScopedLog {
            logger: self.logger(),
            operation: operation.to_string(),
            trace_id: Uuid::new_v4().to_string(),
            started: Instant::now(),
            started_at: Utc::now(),
            context,
        }
    }

    /// Run a closure and log its wall-clock duration
    pub fn time_fn<T>(&self, name: &str, f: impl FnOnce() -> T) -> T {
        let started = Instant::now();
        let result = f();
        let duration = started.elapsed().as_secs_f64();

        let record = LogRecord::new(
            &self.core.config.app_name,
            LogLevel::Info,
            format!("Function {name} executed"),
        )
        .with_extra("function", json!(name))
        .with_extra("duration_secs", json!(duration));
        self.core.emit(&record);

        result
    }

    /// Run a fallible closure; failures are logged at Error severity and
    /// propagated unchanged.
    pub fn log_failures<T, E: Display>(
        &self,
        name: &str,
        f: impl FnOnce() -> std::result::Result<T, E>,
    ) -> std::result::Result<T, E> {
        match f() {
            Ok(value) => Ok(value),
            Err(err) => {
                let record = LogRecord::new(
                    &self.core.config.app_name,
                    LogLevel::Error,
                    format!("Failure in {name}"),
                )
                .with_extra("function", json!(name))
                .with_extra("error", json!(err.to_string()));
                self.core.emit(&record);
                Err(err)
            }
        }
    }
}

/// Named handle for emitting records through a manager's sinks
#[derive(Clone)]
pub struct Logger {
    core: Arc<ManagerCore>,
    name: String,
}

impl Logger {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn log(&self, level: LogLevel, message: &str) {
        self.log_with(level, message, BTreeMap::new());
    }

    /// Emit a record carrying call-site key/value fields
    pub fn log_with(&self, level: LogLevel, message: &str, extras: BTreeMap<String, Value>) {
        let record = LogRecord::new(&self.name, level, message).with_extras(extras);
        self.core.emit(&record);
    }

    pub fn debug(&self, message: &str) {
        self.log(LogLevel::Debug, message);
    }

    pub fn info(&self, message: &str) {
        self.log(LogLevel::Info, message);
    }

    pub fn warn(&self, message: &str) {
        self.log(LogLevel::Warn, message);
    }

    pub fn error(&self, message: &str) {
        self.log(LogLevel::Error, message);
    }

    pub fn critical(&self, message: &str) {
        self.log(LogLevel::Critical, message);
    }
}

/// RAII guard for an in-flight operation. Dropping it emits one Info record
/// with the operation name, trace id, starting timestamp, accumulated
/// context, and elapsed duration nested under a `context` field.
pub struct ScopedLog {
    logger: Logger,
    operation: String,
    trace_id: String,
    started: Instant,
    started_at: DateTime<Utc>,
    context: BTreeMap<String, Value>,
}

impl ScopedLog {
    /// Logger for mid-operation records
    pub fn logger(&self) -> &Logger {
        &self.logger
    }

    pub fn trace_id(&self) -> &str {
        &self.trace_id
    }

    /// Add a context field carried on the completion record
    pub fn annotate(&mut self, key: &str, value: Value) {
        self.context.insert(key.to_string(), value);
    }
}

impl Drop for ScopedLog {
    fn drop(&mut self) {
        let duration = self.started.elapsed().as_secs_f64();

        let mut context = std::mem::take(&mut self.context);
        context.insert("operation".to_string(), json!(self.operation));
        context.insert("trace_id".to_string(), json!(self.trace_id));
        context.insert(
            "started_at".to_string(),
            json!(self.started_at.to_rfc3339_opts(SecondsFormat::Millis, true)),
        );
        context.insert("duration_secs".to_string(), json!(duration));

        let record = LogRecord::new(
            self.logger.name(),
            LogLevel::Info,
            format!("Operation {} completed", self.operation),
        )
        .with_extra("context", Value::Object(context.into_iter().collect()));
        self.logger.core.emit(&record);
    }
}

lazy_static! {
    static ref DEFAULT_MANAGER: LogManager = LogManager::from_env().unwrap_or_else(|err| {
        eprintln!("structlog: falling back to terminal-only logging: {err}");
        LogManager::terminal_only("structlog")
    });
}

/// Process-wide manager configured from the environment. Falls back to a
/// terminal-only manager when the environment configuration is unusable.
pub fn default_manager() -> &'static LogManager {
    &DEFAULT_MANAGER
}

/// Logger handle on the process-wide default manager
pub fn default_logger() -> Logger {
    DEFAULT_MANAGER.logger()
}
