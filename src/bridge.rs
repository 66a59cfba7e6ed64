// Purpose: Back the `log` crate facade with a LogManager so `log::info!`
// and friends flow through the JSON and terminal sinks. Structured key/value
// pairs from the facade's kv API land in the record's extra fields.

use std::collections::BTreeMap;

use log::kv::{self, VisitSource};
use serde_json::{json, Value};

use crate::errors::{LogError, Result};
use crate::level::LogLevel;
use crate::manager::LogManager;
use crate::record::{LogRecord, SourceLocation};

struct BridgeLogger {
    manager: LogManager,
    filter: log::LevelFilter,
}

impl log::Log for BridgeLogger {
    fn enabled(&self, metadata: &log::Metadata<'_>) -> bool {
        metadata.level() <= self.filter
    }

    fn log(&self, record: &log::Record<'_>) {
        if !self.enabled(record.metadata()) {
            return;
        }

        let mut extras = BTreeMap::new();
        let mut collector = KvCollector {
            fields: &mut extras,
        };
        // A source that fails to visit loses its pairs, nothing more.
        let _ = record.key_values().visit(&mut collector);

        let source = SourceLocation {
            module: record.module_path().map(str::to_owned),
            file: record.file().map(str::to_owned),
            line: record.line(),
        };
        let own = LogRecord::new(
            record.target(),
            level_from_facade(record.level()),
            record.args().to_string(),
        )
        .with_source(source)
        .with_extras(extras);
        // Gating happened above on the facade's level scale; write directly
        // so a Critical threshold does not re-drop translated records.
        self.manager.write(&own);
    }

    fn flush(&self) {}
}

struct KvCollector<'a> {
    fields: &'a mut BTreeMap<String, Value>,
}

impl<'a, 'kvs> VisitSource<'kvs> for KvCollector<'a> {
    fn visit_pair(
        &mut self,
        key: kv::Key<'kvs>,
        value: kv::Value<'kvs>,
    ) -> std::result::Result<(), kv::Error> {
        self.fields.insert(key.to_string(), json_value(&value));
        Ok(())
    }
}

/// Coerce a facade value to JSON, preserving primitives where possible
fn json_value(value: &kv::Value<'_>) -> Value {
    if let Some(v) = value.to_bool() {
        return Value::Bool(v);
    }
    if let Some(v) = value.to_u64() {
        return json!(v);
    }
    if let Some(v) = value.to_i64() {
        return json!(v);
    }
    if let Some(v) = value.to_f64() {
        return json!(v);
    }
    if let Some(v) = value.to_borrowed_str() {
        return Value::String(v.to_owned());
    }
    Value::String(value.to_string())
}

fn level_from_facade(level: log::Level) -> LogLevel {
    match level {
        log::Level::Error => LogLevel::Error,
        log::Level::Warn => LogLevel::Warn,
        log::Level::Info => LogLevel::Info,
        log::Level::Debug | log::Level::Trace => LogLevel::Debug,
    }
}

fn facade_filter(level: LogLevel) -> log::LevelFilter {
    match level {
        LogLevel::Debug => log::LevelFilter::Debug,
        LogLevel::Info => log::LevelFilter::Info,
        LogLevel::Warn => log::LevelFilter::Warn,
        LogLevel::Error | LogLevel::Critical => log::LevelFilter::Error,
    }
}

/// Register a manager as the process-wide `log` backend. Installing a second
/// logger is an error surfaced as `LogError::Install`.
///
/// The facade has no Critical level, so a manager configured at Critical
/// maps to the facade's Error filter: `log::error!` records still flow
/// through (recorded at `ERROR`), everything below is dropped. Facade
/// `Trace` folds into `Debug`.
pub fn install(manager: LogManager) -> Result<()> {
    let filter = facade_filter(manager.config().level);
    log::set_boxed_logger(Box::new(BridgeLogger { manager, filter }))
        .map_err(|e| LogError::Install {
            message: e.to_string(),
        })?;
    log::set_max_level(filter);
    Ok(())
}

impl LogManager {
    /// Install this manager as the `log` facade backend
    pub fn install(self) -> Result<()> {
        install(self)
    }
}
