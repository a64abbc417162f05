//! Structured Logger
//!
//! Wraps `tracing` with a console layer (plain or JSON), an optional daily
//! rolling NDJSON file, and environment-based level control.

use std::path::PathBuf;
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// File name prefix for rolled log files (`hairscope.log.YYYY-MM-DD`).
const LOG_FILE_PREFIX: &str = "hairscope.log";

#[derive(Debug, Clone)]
pub struct LogSettings {
    /// Filter used when `RUST_LOG` is unset.
    pub level: String,
    /// Directory for rolling files; no file output when `None`.
    pub dir: Option<PathBuf>,
    /// JSON lines on the console instead of human-readable output.
    pub json: bool,
}

impl Default for LogSettings {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            dir: None,
            json: false,
        }
    }
}

/// Initialize the global subscriber. Later calls are no-ops.
pub fn init_logger(settings: &LogSettings) {
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&settings.level));

    let console_json = settings
        .json
        .then(|| fmt::layer().json().with_writer(std::io::stdout));
    let console_plain = (!settings.json).then(|| {
        fmt::layer()
            .with_writer(std::io::stdout)
            .with_target(false)
            .with_ansi(true)
    });

    let file_layer = settings.dir.as_ref().map(|dir| {
        let appender = RollingFileAppender::new(Rotation::DAILY, dir, LOG_FILE_PREFIX);
        fmt::layer().json().with_writer(appender).with_ansi(false)
    });

    let _ = tracing_subscriber::registry()
        .with(env_filter)
        .with(console_json)
        .with(console_plain)
        .with(file_layer)
        .try_init();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn repeated_init_is_harmless() {
        init_logger(&LogSettings::default());
        init_logger(&LogSettings {
            json: true,
            ..Default::default()
        });
        tracing::info!("still logging");
    }
}
