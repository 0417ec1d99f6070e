//! Logging utilities for Danceflow.
//!
//! Every crate logs through `tracing`. This module installs the subscriber
//! once at process start: a console layer always, and a daily rolling file
//! when `logging.directory` is configured.

use danceflow_config::LoggingConfig;
use std::str::FromStr;
use tracing::{error, info, warn, Level};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Initialize the tracing subscriber at INFO.
///
/// # Examples
///
/// ```
/// use danceflow_common::logging;
///
/// logging::init();
/// logging::init_with_level(tracing::Level::DEBUG);
/// ```
pub fn init() {
    init_with_level(Level::INFO);
}

/// Initialize the tracing subscriber with a specific log level.
///
/// `RUST_LOG` takes precedence when set. Calling this more than once is
/// harmless; only the first call installs a subscriber.
pub fn init_with_level(level: Level) {
    let result = tracing_subscriber::registry()
        .with(console_layer())
        .with(build_filter(level))
        .try_init();

    if result.is_ok() {
        info!("Logging initialized at level: {}", level);
    }
}

/// Initialize logging from the `logging` config section.
///
/// Returns the file writer's guard when a log directory is configured; keep
/// it alive for the lifetime of the process or buffered lines are lost.
///
/// An unrecognized `logging.level` falls back to INFO and is reported at
/// WARN once the subscriber is installed.
pub fn init_from_config(config: &LoggingConfig) -> Option<WorkerGuard> {
    let parsed = Level::from_str(&config.level).ok();
    let level = parsed.unwrap_or(Level::INFO);
    let warn_unknown_level = || {
        if parsed.is_none() {
            warn!(level = %config.level, "Unknown log level, using info");
        }
    };

    let Some(directory) = config.directory.as_deref() else {
        init_with_level(level);
        warn_unknown_level();
        return None;
    };

    let appender = tracing_appender::rolling::daily(directory, &config.file_prefix);
    let (writer, guard) = tracing_appender::non_blocking(appender);

    let result = tracing_subscriber::registry()
        .with(console_layer())
        .with(fmt::layer().with_ansi(false).with_writer(writer))
        .with(build_filter(level))
        .try_init();

    match result {
        Ok(()) => {
            info!(directory, "Logging initialized at level: {}", level);
            warn_unknown_level();
            Some(guard)
        }
        Err(_) => None,
    }
}

fn console_layer<S>() -> impl tracing_subscriber::Layer<S>
where
    S: tracing::Subscriber + for<'a> tracing_subscriber::registry::LookupSpan<'a>,
{
    fmt::layer()
        .with_target(true)
        .with_file(true)
        .with_line_number(true)
}

fn build_filter(level: Level) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new(format!("warn,danceflow={}", level.as_str().to_lowercase()))
    })
}

/// Log an error with context at the ERROR level.
pub fn log_error<E: std::fmt::Display>(error: E, context: &str) {
    error!("{}: {}", context, error);
}

/// Logs a success message at INFO or the error at ERROR, then hands the
/// result back unchanged.
pub fn log_result<T, E: std::fmt::Display>(
    result: Result<T, E>,
    success_message: &str,
    error_context: &str,
) -> Result<T, E> {
    match &result {
        Ok(_) => info!("{}", success_message),
        Err(e) => error!("{}: {}", error_context, e),
    }
    result
}
