//! tracing subscriber setup
//!
//! One rolling log file (non-blocking writer) plus, in text mode, a coloured
//! stdout layer. `RUST_LOG` takes precedence over the configured level.

use tracing_appender::non_blocking::WorkerGuard;
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

use crate::config::AppConfig;

/// Crates whose info-level output is per-statement noise
const QUIET_TARGETS: &[&str] = &["sqlx", "hyper", "tower_http"];

/// Map the `rotation` config value. Unknown values never rotate.
pub fn parse_rotation(value: &str) -> Rotation {
    match value.to_ascii_lowercase().as_str() {
        "minutely" => Rotation::MINUTELY,
        "hourly" => Rotation::HOURLY,
        "daily" => Rotation::DAILY,
        _ => Rotation::NEVER,
    }
}

/// Filter directive: the configured level with noisy crates held at `warn`
pub fn filter_directive(level: &str) -> String {
    let mut directive = level.to_string();
    for target in QUIET_TARGETS {
        directive.push_str(&format!(",{}=warn", target));
    }
    directive
}

/// Install the global subscriber. The returned guard flushes the file
/// writer on drop; hold it for the life of the process.
pub fn init_logging(config: &AppConfig) -> WorkerGuard {
    let appender = RollingFileAppender::new(
        parse_rotation(&config.rotation),
        &config.log_dir,
        &config.log_file,
    );
    let (writer, guard) = tracing_appender::non_blocking(appender);

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(filter_directive(&config.log_level)));
    let registry = tracing_subscriber::registry().with(filter);

    if config.use_json {
        registry
            .with(
                fmt::layer()
                    .json()
                    .with_current_span(false)
                    .with_writer(writer)
                    .with_ansi(false),
            )
            .init();
    } else {
        registry
            .with(fmt::layer().with_target(false).with_writer(writer).with_ansi(false))
            .with(fmt::layer().with_target(false))
            .init();
    }

    guard
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rotation_values() {
        assert_eq!(parse_rotation("daily"), Rotation::DAILY);
        assert_eq!(parse_rotation("Hourly"), Rotation::HOURLY);
        assert_eq!(parse_rotation("never"), Rotation::NEVER);
        assert_eq!(parse_rotation("weekly"), Rotation::NEVER);
    }

    #[test]
    fn test_filter_directive_quiets_sqlx() {
        let directive = filter_directive("debug");
        assert!(directive.starts_with("debug,"));
        assert!(directive.contains("sqlx=warn"));
        assert!(EnvFilter::try_new(&directive).is_ok());
    }
}
