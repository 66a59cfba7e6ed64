//! The `log` facade has no Critical level, so a Critical-configured manager
//! maps to the facade's Error filter: `log::error!` must still reach the
//! sinks while lower severities are dropped. Separate file because the
//! facade allows one global backend per process.

use serde_json::{json, Value};
use tempfile::TempDir;

use structlog_forge::{LogConfig, LogLevel, LogManager};

#[test]
fn critical_threshold_still_receives_facade_errors() {
    let dir = TempDir::new().unwrap();
    let config = LogConfig {
        app_name: "critical_app".to_string(),
        level: LogLevel::Critical,
        log_dir: dir.path().to_string_lossy().into_owned(),
        terminal_output: false,
        ..LogConfig::default()
    };
    LogManager::new(config).unwrap().install().unwrap();

    log::error!("catastrophic");
    log::warn!("ignored");
    log::info!("also ignored");

    let content = std::fs::read_to_string(dir.path().join("critical_app.log")).unwrap();
    let lines: Vec<Value> = content
        .lines()
        .map(|line| serde_json::from_str(line).unwrap())
        .collect();
    assert_eq!(lines.len(), 1);
    assert_eq!(lines[0]["level"], json!("ERROR"));
    assert_eq!(lines[0]["message"], json!("catastrophic"));
}
