//! Tracing subscriber setup.

use std::ffi::OsStr;
use std::path::Path;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{
    EnvFilter, Layer,
    fmt::{self, format::FmtSpan},
    layer::SubscriberExt,
    util::SubscriberInitExt,
};

/// Where log output is going.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogTarget {
    /// JSON lines on stdout, picked up by CloudWatch.
    Lambda,
    /// Coloured stderr, plus a rolling JSON file when `LOG_FILE_PATH` is set.
    Local,
}

fn filter(var: &str, default: &str) -> EnvFilter {
    EnvFilter::try_from_env(var).unwrap_or_else(|_| EnvFilter::new(default))
}

/// Installs the global subscriber. Keep the returned guard alive until exit so
/// the file writer flushes.
pub fn init(target: LogTarget) -> Option<WorkerGuard> {
    match target {
        LogTarget::Lambda => {
            let json_layer = fmt::layer()
                .json()
                .with_current_span(true)
                .with_span_list(true)
                .with_ansi(false)
                .without_time()
                .with_target(true)
                .with_writer(std::io::stdout)
                .with_filter(filter("RUST_LOG", "info"));

            tracing_subscriber::registry().with(json_layer).init();
            None
        }
        LogTarget::Local => {
            let stderr_layer = fmt::layer()
                .with_target(true)
                .with_span_events(FmtSpan::CLOSE)
                .with_ansi(true)
                .with_writer(std::io::stderr)
                .with_filter(filter("RUST_LOG", "info"));

            let (file_layer, guard) = match std::env::var("LOG_FILE_PATH") {
                Ok(log_file_path) => {
                    let path = Path::new(&log_file_path);
                    let log_dir = path.parent().unwrap_or(Path::new("logs"));
                    let log_file_name = path.file_name().unwrap_or(OsStr::new("docs_proxy.log"));

                    let file_appender = tracing_appender::rolling::daily(log_dir, log_file_name);
                    let (non_blocking_file, guard) = tracing_appender::non_blocking(file_appender);

                    let layer = fmt::layer()
                        .json()
                        .with_current_span(true)
                        .with_span_list(true)
                        .with_writer(non_blocking_file)
                        .with_filter(filter("RUST_LOG_JSON", "debug"));
                    (Some(layer), Some(guard))
                }
                Err(_) => (None, None),
            };

            tracing_subscriber::registry()
                .with(stderr_layer)
                .with(file_layer)
                .init();
            guard
        }
    }
}
