use tracing_appender::non_blocking::WorkerGuard;
use tracing_appender::rolling;

/// Install the global subscriber: rolling daily file, non-blocking writer.
///
/// Call once at application startup and keep the returned guard alive for the
/// lifetime of the process, or buffered log lines are lost on exit.
pub fn init() -> WorkerGuard {
    let file_appender = rolling::daily("logs", "app.log");
    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

    tracing_subscriber::fmt()
        .with_writer(non_blocking)
        .with_max_level(tracing::Level::DEBUG)
        .with_ansi(false)
        .with_target(false)
        .with_level(true)
        .with_thread_ids(false)
        .with_thread_names(false)
        .pretty()
        .init();

    guard
}
