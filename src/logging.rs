//! File logging.
//!
//! The terminal belongs to the panel, so logs go to a daily rolling file
//! under `<data dir>/uniwork/logs/`.

use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::prelude::*;

/// Environment variable holding a log filter directive.
pub const LOG_ENV: &str = "UNIWORK_LOG";

const DEFAULT_FILTER: &str = "info";

/// Installs the global subscriber writing to the log directory.
///
/// The returned guard flushes buffered lines when dropped and must be held
/// until exit. Returns `None`, leaving logging off, when the log directory
/// cannot be created.
pub fn init_logging(log_level: Option<&str>) -> Option<WorkerGuard> {
    let logs_dir = uniwork_config::persistence::log_dir().ok()?;
    std::fs::create_dir_all(&logs_dir).ok()?;

    let file_appender = tracing_appender::rolling::daily(&logs_dir, "uniwork.log");
    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

    let filter = build_env_filter(log_level, |name| std::env::var(name).ok());
    let subscriber = tracing_subscriber::registry().with(filter).with(
        tracing_subscriber::fmt::layer()
            .with_writer(non_blocking)
            .with_ansi(false)
            .with_target(true),
    );

    // Already set (e.g. by a test harness): keep the guard anyway.
    let _ = tracing::subscriber::set_global_default(subscriber);

    Some(guard)
}

/// Picks the first valid directive: config file, then [`LOG_ENV`], then
/// `info`.
fn build_env_filter(
    log_level: Option<&str>,
    lookup: impl Fn(&str) -> Option<String>,
) -> EnvFilter {
    log_level
        .and_then(|level| EnvFilter::try_new(level).ok())
        .or_else(|| lookup(LOG_ENV).and_then(|level| EnvFilter::try_new(level).ok()))
        .unwrap_or_else(|| EnvFilter::new(DEFAULT_FILTER))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_level_wins() {
        let filter = build_env_filter(Some("debug"), |_| Some("trace".to_string()));
        assert_eq!(filter.to_string(), "debug");
    }

    #[test]
    fn env_used_without_config_level() {
        let filter = build_env_filter(None, |name| {
            (name == LOG_ENV).then(|| "uniwork_trello=trace".to_string())
        });
        assert_eq!(filter.to_string(), "uniwork_trello=trace");
    }

    #[test]
    fn invalid_directives_fall_through() {
        let filter = build_env_filter(Some("uniwork=loud"), |_| {
            Some("uniwork=verbose".to_string())
        });
        assert_eq!(filter.to_string(), DEFAULT_FILTER);
    }
}
