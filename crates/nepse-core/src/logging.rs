//! Logging initialization using the `tracing` ecosystem.
//!
//! A collector run always logs to the console; passing a log directory adds
//! a daily-rotating file appender next to it. The active level comes from
//! the `RUST_LOG` env var when set, otherwise from the explicit default.

use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

/// Initialize the global tracing subscriber.
///
/// Call once at process start, before the first `tracing` macro fires.
///
/// # Parameters
///
/// - `default_level`: level used when `RUST_LOG` is not set (e.g. `"info"`)
/// - `log_dir`: optional directory for daily-rotating log files
/// - `file_prefix`: names the rotated files inside `log_dir`
///   (e.g. `"nepse-collector"` becomes `nepse-collector.2025-08-23`)
pub fn init_logging(default_level: &str, log_dir: Option<&str>, file_prefix: &str) {
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    // The collector is a short-lived single-threaded batch process, so the
    // console layer skips thread ids and targets.
    let console_layer = fmt::layer().with_target(false).with_ansi(true);

    match log_dir {
        Some(dir) => {
            let file_appender = tracing_appender::rolling::daily(dir, file_prefix);
            let file_layer = fmt::layer().with_writer(file_appender).with_ansi(false);

            tracing_subscriber::registry()
                .with(env_filter)
                .with(console_layer)
                .with(file_layer)
                .init();
        }
        None => {
            tracing_subscriber::registry()
                .with(env_filter)
                .with(console_layer)
                .init();
        }
    }
}
