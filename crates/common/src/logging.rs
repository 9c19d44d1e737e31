//! Logging and tracing initialization.

use crate::config::LoggingConfig;

/// Crate targets that a bare level such as `"debug"` applies to.
const STEADYCAM_TARGETS: &[&str] = &[
    "steadycam",
    "steadycam_cli",
    "steadycam_common",
    "steadycam_director",
    "steadycam_frame_model",
];

/// Expand the configured level into filter directives.
///
/// A bare level is scoped to the Steadycam crates, with everything else kept
/// at `warn`. Anything containing a directive (`target=level`) is used as-is.
pub fn filter_directives(level: &str) -> String {
    let level = level.trim();
    if level.is_empty() {
        return filter_directives(&LoggingConfig::default().level);
    }
    if level.contains('=') || level.contains(',') {
        return level.to_string();
    }

    std::iter::once("warn".to_string())
        .chain(STEADYCAM_TARGETS.iter().map(|t| format!("{t}={level}")))
        .collect::<Vec<_>>()
        .join(",")
}

/// Initialize the tracing subscriber with the given configuration.
///
/// `RUST_LOG` takes precedence over the configured level.
pub fn init_logging(config: &LoggingConfig) {
    use tracing_subscriber::{fmt, EnvFilter};

    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(filter_directives(&config.level)))
        .unwrap_or_else(|_| EnvFilter::new("warn"));

    if config.json {
        let subscriber = fmt::Subscriber::builder()
            .with_env_filter(env_filter)
            .with_writer(std::io::stderr)
            .json()
            .finish();
        tracing::subscriber::set_global_default(subscriber).ok();
    } else {
        let subscriber = fmt::Subscriber::builder()
            .with_env_filter(env_filter)
            .with_writer(std::io::stderr)
            .with_target(true)
            .with_thread_ids(false)
            .with_file(false)
            .with_line_number(false)
            .finish();
        tracing::subscriber::set_global_default(subscriber).ok();
    }
}
