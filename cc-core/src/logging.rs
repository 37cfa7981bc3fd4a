//! Logging for the front desk.
//!
//! Everything goes to stderr in compact form and to a daily log file named
//! after the app (`candychipaws.log.YYYY-MM-DD`). The file can be plain text
//! or one JSON object per line.

use std::path::Path;

use tracing_appender::non_blocking::WorkerGuard;
use tracing_appender::rolling;
use tracing_subscriber::filter::Directive;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::LoggingConfig;
use crate::constants::APP_NAME;
use crate::error::CcResult;

/// Pool chatter is only interesting when something is wrong.
const QUIET_DIRECTIVES: &[&str] = &["r2d2=warn"];

/// File name prefix for the rolling log, e.g. `candychipaws.log`.
pub fn log_file_prefix() -> String {
    format!("{}.log", APP_NAME.to_lowercase())
}

/// Build the filter for `level`, falling back to `info` when it does not parse.
pub fn level_filter(level: &str) -> EnvFilter {
    let filter = EnvFilter::try_new(level).unwrap_or_else(|_| EnvFilter::new("info"));
    QUIET_DIRECTIVES
        .iter()
        .filter_map(|directive| directive.parse::<Directive>().ok())
        .fold(filter, |filter, directive| filter.add_directive(directive))
}

/// Install the global subscriber using the `[logging]` config section.
///
/// `verbose` forces `debug` regardless of the configured level. Keep the
/// returned guard alive until exit so the file writer flushes.
pub fn init_logging(config: &LoggingConfig, log_dir: &Path, verbose: bool) -> CcResult<LogGuard> {
    std::fs::create_dir_all(log_dir)?;

    let level = if verbose { "debug" } else { config.level.as_str() };
    let (writer, guard) = tracing_appender::non_blocking(rolling::daily(log_dir, log_file_prefix()));

    let console = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(false)
        .compact();

    let (json_file, text_file) = if config.json_output {
        (Some(fmt::layer().with_writer(writer).json().with_target(true)), None)
    } else {
        (None, Some(fmt::layer().with_writer(writer).with_ansi(false).with_target(true)))
    };

    let _ = tracing_subscriber::registry()
        .with(level_filter(level))
        .with(console)
        .with(json_file)
        .with(text_file)
        .try_init();

    tracing::debug!(level, dir = %log_dir.display(), "logging initialized");
    Ok(LogGuard { _guard: guard })
}

/// Keeps the non-blocking file writer alive.
pub struct LogGuard {
    _guard: WorkerGuard,
}

/// Stderr-only logging, for tests and one-off tools.
pub fn init_console_logging(level: &str) {
    let _ = tracing_subscriber::registry()
        .with(level_filter(level))
        .with(fmt::layer().with_writer(std::io::stderr).compact())
        .try_init();
}
