//! Logging system initialization

use tracing_appender::rolling;

use crate::config::LoggingConfig;

/// Initialize the tracing subscriber from the logging section of the config.
///
/// The returned guard must be kept alive for the lifetime of the program so
/// that the non-blocking writer flushes on exit. Call this once, after the
/// configuration has been loaded.
pub fn init_logging(config: &LoggingConfig) -> tracing_appender::non_blocking::WorkerGuard {
    let writer: Box<dyn std::io::Write + Send + Sync> = match config.file.as_deref() {
        Some(log_file) if !log_file.is_empty() && config.enable_rotation => {
            let path = std::path::Path::new(log_file);
            let dir = path.parent().unwrap_or(std::path::Path::new("."));
            let filename = path
                .file_name()
                .and_then(|f| f.to_str())
                .unwrap_or("linkshelf.log");
            match rolling::Builder::new()
                .rotation(rolling::Rotation::DAILY)
                .filename_prefix(filename.trim_end_matches(".log"))
                .filename_suffix("log")
                .max_log_files(config.max_backups as usize)
                .build(dir)
            {
                Ok(appender) => Box::new(appender),
                Err(e) => {
                    eprintln!("[ERROR] Failed to create rolling log appender: {}", e);
                    Box::new(std::io::stdout())
                }
            }
        }
        Some(log_file) if !log_file.is_empty() => {
            // 不轮转，直接追加
            match std::fs::OpenOptions::new()
                .create(true)
                .append(true)
                .open(log_file)
            {
                Ok(file) => Box::new(file),
                Err(e) => {
                    eprintln!("[ERROR] Failed to open log file {}: {}", log_file, e);
                    Box::new(std::io::stdout())
                }
            }
        }
        _ => Box::new(std::io::stdout()),
    };

    let (non_blocking_writer, guard) = tracing_appender::non_blocking(writer);
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(config.level.clone()));

    let subscriber_builder = tracing_subscriber::fmt()
        .with_writer(non_blocking_writer)
        .with_env_filter(filter)
        .with_level(true)
        .with_ansi(config.file.as_ref().is_none_or(|f| f.is_empty()));

    if config.format == "json" {
        subscriber_builder.json().init();
    } else {
        subscriber_builder.init();
    }

    guard
}
