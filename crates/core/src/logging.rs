use crate::config::LoggingSettings;
use std::path::PathBuf;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

/// Directory holding rolled log files (`~/.jarsmith/logs`)
pub fn log_dir() -> PathBuf {
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".jarsmith")
        .join("logs")
}

/// `RUST_LOG` wins over the configured level.
fn filter(settings: &LoggingSettings) -> EnvFilter {
    EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&settings.level))
        .unwrap_or_else(|_| EnvFilter::new("info"))
}

/// Install the global subscriber for one `jarsmith` command.
///
/// Events go to a daily-rolled file named after `component` and, with
/// `settings.stderr`, to stderr. stdout stays reserved for command output
/// such as `UPGRADE` lines. The returned guard flushes the file on drop.
pub fn init_logging(component: &str, settings: &LoggingSettings) -> Option<WorkerGuard> {
    let (file_layer, guard) = if settings.file {
        let dir = settings
            .dir
            .as_deref()
            .map(crate::config::expand_home)
            .unwrap_or_else(log_dir);
        let _ = std::fs::create_dir_all(&dir);

        // e.g. check-versions.log.2026-10-17
        let appender = tracing_appender::rolling::daily(&dir, format!("{}.log", component));
        let (writer, guard) = tracing_appender::non_blocking(appender);
        let layer = fmt::layer()
            .with_writer(writer)
            .with_ansi(false)
            .with_target(true);
        (Some(layer), Some(guard))
    } else {
        (None, None)
    };

    let stderr_layer = settings.stderr.then(|| {
        fmt::layer()
            .with_writer(std::io::stderr)
            .with_ansi(true)
            .with_target(false)
            .without_time()
    });

    let _ = tracing_subscriber::registry()
        .with(filter(settings))
        .with(file_layer)
        .with(stderr_layer)
        .try_init();

    guard
}
