//! Telemetry setup

use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::error::AppError;

const DEFAULT_FILTER: &str = "info,bhatti=debug,tower_http=info";

/// Install the global subscriber: stdout (pretty or JSON via `LOG_FORMAT`)
/// plus a daily-rolling file under `logs/`.
pub fn init_telemetry(app_name: &str) -> Result<(), AppError> {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(DEFAULT_FILTER))
        .map_err(|e| AppError::TelemetryError(e.to_string()))?;

    let log_format = std::env::var("LOG_FORMAT").unwrap_or_else(|_| "pretty".to_string());

    let file_appender = RollingFileAppender::builder()
        .rotation(Rotation::DAILY)
        .filename_prefix(app_name)
        .filename_suffix("log")
        .build("logs")
        .map_err(|e| AppError::TelemetryError(e.to_string()))?;

    let result = match log_format.as_str() {
        "json" => tracing_subscriber::registry()
            .with(filter)
            .with(
                fmt::layer()
                    .json()
                    .with_writer(std::io::stdout)
                    .with_target(true)
                    .with_thread_ids(true),
            )
            .with(fmt::layer().json().with_writer(file_appender).with_target(true))
            .try_init(),
        _ => tracing_subscriber::registry()
            .with(filter)
            .with(fmt::layer().pretty().with_writer(std::io::stdout).with_target(true))
            .with(
                fmt::layer()
                    .with_writer(file_appender)
                    .with_target(true)
                    .with_ansi(false),
            )
            .try_init(),
    };

    result.map_err(|e| AppError::TelemetryError(e.to_string()))
}

/// Stdout-only subscriber for short-lived tools.
pub fn init_cli_telemetry() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn,bhatti=info"));
    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().compact().with_target(false))
        .try_init();
}
