//! Tracing setup
//!
//! The terminal belongs to the editor UI, so logs go to a daily rolling file
//! under `~/.xaviedit/logs/`. Filtering follows RUST_LOG, falling back to the
//! configured `log-level`:
//! - `RUST_LOG=debug` - all debug logs
//! - `RUST_LOG=xaviedit::session=debug` - session transitions only

use std::fs;
use std::path::PathBuf;

use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer};

use crate::config::home_dir;

/// `~/.xaviedit/logs/`
pub fn logs_dir() -> Option<PathBuf> {
    home_dir().map(|home| home.join(".xaviedit").join("logs"))
}

/// Install the file subscriber. Must run before raw mode so the warning is visible.
pub fn init(default_level: &str) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    let Some(dir) = logs_dir() else {
        eprintln!("Warning: no home directory, logging disabled");
        return;
    };
    if let Err(e) = fs::create_dir_all(&dir) {
        eprintln!("Warning: Could not initialize file logging: {}", e);
        return;
    }

    let file_appender = tracing_appender::rolling::daily(dir, "xaviedit.log");
    let file_layer = fmt::layer()
        .with_writer(file_appender)
        .with_ansi(false)
        .with_target(true)
        .with_line_number(true)
        .with_filter(filter);

    // A second init (tests, embedding) is harmless
    let _ = tracing_subscriber::registry().with(file_layer).try_init();
}
