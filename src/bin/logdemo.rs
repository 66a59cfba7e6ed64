// Demo binary exercising the logging surface end to end: plain records,
// call-site extras, scoped operation contexts, timing, and failure logging.

use std::collections::BTreeMap;

use clap::Parser;
use serde_json::json;

use structlog_forge::{LogConfig, LogLevel, LogManager};

#[derive(Parser, Debug)]
#[clap(author, version, about, long_about = None)]
struct Args {
    #[clap(short, long, default_value = "demo_app")]
    app_name: String,

    #[clap(short, long, default_value = "DEBUG")]
    level: String,

    #[clap(long, default_value = "demo_logs")]
    log_dir: String,

    /// Disable the JSON file sink
    #[clap(long)]
    no_json: bool,

    /// Disable terminal output
    #[clap(long)]
    no_terminal: bool,
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let config = LogConfig {
        app_name: args.app_name,
        level: args.level.parse()?,
        log_dir: args.log_dir,
        terminal_output: !args.no_terminal,
        json_output: !args.no_json,
        ..LogConfig::default()
    };
    let manager = LogManager::new(config)?;
    let logger = manager.logger();

    // Basic logging
    logger.info("This is a basic info message");
    logger.warn("This is a warning message");
    logger.error("This is an error message");

    // Logging with call-site extras
    logger.log_with(
        LogLevel::Info,
        "User action completed",
        BTreeMap::from([
            ("user_id".to_string(), json!("12345")),
            ("action".to_string(), json!("login")),
            ("status".to_string(), json!("success")),
            ("duration_ms".to_string(), json!(150)),
        ]),
    );

    // Scoped operation context
    let items = ["item1", "item2", "item3"];
    {
        let scope = manager.scoped(
            "process_items",
            BTreeMap::from([("item_count".to_string(), json!(items.len()))]),
        );
        scope.logger().info("Starting to process items");
        for item in &items {
            scope.logger().info(&format!("Processing item: {item}"));
        }
        scope.logger().info("Finished processing items");
    }

    // Execution-time logging
    let numbers = [1, 2, 3, 4, 5];
    let total = manager.time_fn("calculate_sum", || numbers.iter().sum::<i64>());
    logger.info(&format!("Sum calculation result: {total}"));

    // Failure logging
    let outcome = manager.log_failures("divide_numbers", || divide(10, 0));
    if let Err(err) = outcome {
        logger.error(&format!("Division error: {err}"));
    }

    Ok(())
}

fn divide(a: i64, b: i64) -> Result<i64, String> {
    if b == 0 {
        return Err("Cannot divide by zero".to_string());
    }
    Ok(a / b)
}
