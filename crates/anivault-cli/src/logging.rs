use anyhow::Result;
use std::io;
use std::io::IsTerminal;
use std::path::PathBuf;
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::fmt::{self, time::ChronoUtc};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Registry};

/// Set up the tracing subscriber. Logs go to stderr by default; `remind watch`
/// passes a log file so notifications keep the terminal to themselves.
///
/// Verbosity: 0 = info, 1 = debug (HTTP internals suppressed), 2+ = trace.
/// RUST_LOG still wins when set, and RUST_LOG_JSON=true (or a non-terminal
/// stdout) switches to JSON lines.
pub fn init_logging_with_file(
    verbose_level: u8,
    quiet: bool,
    log_file: Option<PathBuf>,
) -> Result<()> {
    let filter = if quiet {
        EnvFilter::new("error")
    } else {
        let default_filter = match verbose_level {
            0 => "info",
            // -v: our debug lines without the hyper/rustls wire noise
            1 => "debug,hyper=warn,rustls=warn",
            _ => "trace",
        };
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter))
    };

    let json = std::env::var("RUST_LOG_JSON")
        .map(|v| v == "true")
        .unwrap_or_else(|_| !io::stdout().is_terminal());

    let registry = Registry::default().with(filter);

    if let Some(log_path) = log_file {
        let log_dir = log_path
            .parent()
            .ok_or_else(|| anyhow::anyhow!("Log file path has no parent directory"))?;
        std::fs::create_dir_all(log_dir)?;

        let log_filename = log_path
            .file_name()
            .and_then(|n| n.to_str())
            .ok_or_else(|| anyhow::anyhow!("Invalid log filename"))?;
        // Rotation prefix without the extension ("anivault" from "anivault.log")
        let log_prefix = log_filename.rsplitn(2, '.').nth(1).unwrap_or(log_filename);

        let file_appender = RollingFileAppender::new(Rotation::DAILY, log_dir, log_prefix);

        if json {
            registry
                .with(
                    fmt::layer()
                        .json()
                        .with_timer(ChronoUtc::rfc_3339())
                        .with_writer(file_appender),
                )
                .init();
        } else {
            registry
                .with(
                    fmt::layer()
                        .with_timer(ChronoUtc::rfc_3339())
                        .with_ansi(false)
                        .with_writer(file_appender),
                )
                .init();
        }
    } else if json {
        registry
            .with(
                fmt::layer()
                    .json()
                    .with_timer(ChronoUtc::rfc_3339())
                    .with_writer(io::stderr),
            )
            .init();
    } else {
        registry
            .with(
                fmt::layer()
                    .with_timer(ChronoUtc::rfc_3339())
                    .with_writer(io::stderr),
            )
            .init();
    }

    Ok(())
}
