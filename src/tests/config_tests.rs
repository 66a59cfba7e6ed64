// Unit tests for configuration loading and validation

use std::env;

use figment::providers::{Env, Serialized};
use figment::Figment;

use crate::config::LogConfig;
use crate::level::LogLevel;

#[test]
fn defaults_are_sensible() {
    let config = LogConfig::default();

    assert_eq!(config.app_name, "structlog");
    assert_eq!(config.level, LogLevel::Info);
    assert_eq!(config.log_dir, "logs");
    assert_eq!(config.max_bytes, 10 * 1024 * 1024);
    assert_eq!(config.backup_count, 5);
    assert!(config.terminal_output);
    assert!(config.json_output);
}

#[test]
fn env_layer_overrides_defaults() {
    // Test-unique prefix so parallel tests cannot collide.
    env::set_var("STRUCTLOG_ENVTEST_APP_NAME", "env_app");
    env::set_var("STRUCTLOG_ENVTEST_LEVEL", "DEBUG");
    env::set_var("STRUCTLOG_ENVTEST_LOG_DIR", "/tmp/env_logs");
    env::set_var("STRUCTLOG_ENVTEST_BACKUP_COUNT", "9");

    let figment = Figment::from(Serialized::defaults(LogConfig::default()))
        .merge(Env::prefixed("STRUCTLOG_ENVTEST_"));
    let config = LogConfig::load_from(figment).unwrap();

    assert_eq!(config.app_name, "env_app");
    assert_eq!(config.level, LogLevel::Debug);
    assert_eq!(config.log_dir, "/tmp/env_logs");
    assert_eq!(config.backup_count, 9);
    assert!(config.json_output);
}

#[test]
fn empty_app_name_fails_validation() {
    let config = LogConfig {
        app_name: "   ".to_string(),
        ..LogConfig::default()
    };

    let result = config.validate();
    assert!(result.is_err());
    assert!(result.unwrap_err().to_string().contains("app_name"));
}

#[test]
fn empty_log_dir_fails_only_with_file_output() {
    let config = LogConfig {
        log_dir: String::new(),
        ..LogConfig::default()
    };
    assert!(config.validate().is_err());

    let terminal_only = LogConfig {
        log_dir: String::new(),
        json_output: false,
        ..LogConfig::default()
    };
    assert!(terminal_only.validate().is_ok());
}

#[test]
fn env_layer_accepts_lowercase_and_alias_level_names() {
    env::set_var("STRUCTLOG_LCLEVEL_LEVEL", "info");
    let figment = Figment::from(Serialized::defaults(LogConfig::default()))
        .merge(Env::prefixed("STRUCTLOG_LCLEVEL_"));
    let config = LogConfig::load_from(figment).unwrap();
    assert_eq!(config.level, LogLevel::Info);

    env::set_var("STRUCTLOG_ALIASLEVEL_LEVEL", "warning");
    let figment = Figment::from(Serialized::defaults(LogConfig::default()))
        .merge(Env::prefixed("STRUCTLOG_ALIASLEVEL_"));
    let config = LogConfig::load_from(figment).unwrap();
    assert_eq!(config.level, LogLevel::Warn);
}

#[test]
fn levels_serialize_to_stable_uppercase_names() {
    assert_eq!(
        serde_json::to_value(LogLevel::Warn).unwrap(),
        serde_json::json!("WARN")
    );
    assert_eq!(
        serde_json::from_value::<LogLevel>(serde_json::json!("critical")).unwrap(),
        LogLevel::Critical
    );
}

#[test]
fn unknown_level_name_is_a_config_error() {
    env::set_var("STRUCTLOG_BADLEVEL_LEVEL", "LOUD");

    let figment = Figment::from(Serialized::defaults(LogConfig::default()))
        .merge(Env::prefixed("STRUCTLOG_BADLEVEL_"));
    assert!(LogConfig::load_from(figment).is_err());
}

#[test]
fn level_parsing_accepts_aliases() {
    assert_eq!("warning".parse::<LogLevel>().unwrap(), LogLevel::Warn);
    assert_eq!("fatal".parse::<LogLevel>().unwrap(), LogLevel::Critical);
    assert_eq!(" info ".parse::<LogLevel>().unwrap(), LogLevel::Info);
    assert!("loud".parse::<LogLevel>().is_err());
}

#[test]
fn levels_order_by_severity() {
    assert!(LogLevel::Debug < LogLevel::Info);
    assert!(LogLevel::Info < LogLevel::Warn);
    assert!(LogLevel::Warn < LogLevel::Error);
    assert!(LogLevel::Error < LogLevel::Critical);
}
