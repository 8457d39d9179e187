//! Logging configuration and initialization for roomhub.
//!
//! Events from roomhub and the HTTP trace layer are kept at the configured
//! level; everything else (hyper, tungstenite) only reports warnings.
//! `RUST_LOG`, when set, replaces these defaults entirely.

use std::fs::{self, File};
use std::path::PathBuf;
use std::sync::Arc;

use tracing::Level;
use tracing_subscriber::fmt::writer::MakeWriterExt;
use tracing_subscriber::prelude::*;
use tracing_subscriber::EnvFilter;

use crate::config::LoggingConfig;
use crate::Result;

/// Parse log level string to tracing Level.
fn parse_level(level: &str) -> Level {
    match level.to_lowercase().as_str() {
        "trace" => Level::TRACE,
        "debug" => Level::DEBUG,
        "info" => Level::INFO,
        "warn" | "warning" => Level::WARN,
        "error" => Level::ERROR,
        _ => Level::INFO,
    }
}

/// Default filter directives for a configured level.
fn default_directives(level: Level) -> String {
    let level = level.to_string().to_lowercase();
    format!("warn,roomhub={level},tower_http={level}")
}

/// Build the filter from `RUST_LOG`, falling back to [`default_directives`].
fn build_filter(level: &str) -> EnvFilter {
    EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directives(parse_level(level))))
}

/// Resolve the log file path, creating its directory.
///
/// Returns `None` when file output is disabled.
fn prepare_log_file(file: &str) -> Result<Option<PathBuf>> {
    let file = file.trim();
    if file.is_empty() {
        return Ok(None);
    }

    let path = PathBuf::from(file);
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() && !parent.exists() {
            fs::create_dir_all(parent)?;
        }
    }
    Ok(Some(path))
}

/// Initialize logging to stdout and, unless disabled, the configured log file.
pub fn init(config: &LoggingConfig) -> Result<()> {
    let filter = build_filter(&config.level);

    let Some(path) = prepare_log_file(&config.file)? else {
        init_console_only(&config.level);
        return Ok(());
    };

    let log_file = Arc::new(File::create(&path)?);
    let writer = std::io::stdout.and(log_file);

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(writer)
                .with_ansi(false)
                .with_target(true),
        )
        .with(filter)
        .init();

    tracing::debug!(file = %path.display(), "File logging enabled");
    Ok(())
}

/// Initialize console-only logging (for development/testing).
pub fn init_console_only(level: &str) {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stdout)
                .with_ansi(true)
                .with_target(true),
        )
        .with(build_filter(level))
        .init();
}
