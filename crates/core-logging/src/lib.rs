//! Subscriber installation for render timing output.
//!
//! Timers emit plain `tracing` events; this crate decides where they go. The
//! filter comes from `RUST_LOG` (e.g. `RUST_LOG=render.timing=info`). File
//! output uses a non-blocking writer: keep the returned [`LogGuard`] alive for
//! the lifetime of the process or buffered lines are lost on exit.

use anyhow::{Context, Result};
use std::path::PathBuf;
use std::sync::Once;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::EnvFilter;

pub const DEFAULT_LOG_FILE: &str = "render-timer.log";

/// Destination for formatted log lines.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LogSink {
    Stderr,
    /// Fresh file `dir/file_name`; an existing file is replaced.
    File { dir: PathBuf, file_name: String },
}

impl LogSink {
    pub fn file_in(dir: impl Into<PathBuf>) -> Self {
        LogSink::File {
            dir: dir.into(),
            file_name: DEFAULT_LOG_FILE.to_string(),
        }
    }
}

/// Keeps the background writer alive. `installed` is false when another global
/// subscriber was already present.
#[must_use = "dropping the guard stops the background log writer"]
pub struct LogGuard {
    _worker: Option<WorkerGuard>,
    installed: bool,
}

impl LogGuard {
    pub fn installed(&self) -> bool {
        self.installed
    }
}

/// Install the global subscriber. A subscriber that is already installed is
/// left in place and reported through [`LogGuard::installed`].
pub fn init(sink: LogSink) -> Result<LogGuard> {
    let filter = EnvFilter::from_default_env();
    match sink {
        LogSink::Stderr => {
            let installed = tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_writer(std::io::stderr)
                .try_init()
                .is_ok();
            Ok(LogGuard {
                _worker: None,
                installed,
            })
        }
        LogSink::File { dir, file_name } => {
            let log_path = dir.join(&file_name);
            if log_path.exists() {
                let _ = std::fs::remove_file(&log_path);
            }
            let appender = RollingFileAppender::builder()
                .rotation(Rotation::NEVER)
                .filename_prefix(&file_name)
                .build(&dir)
                .with_context(|| format!("creating log file {}", log_path.display()))?;
            let (nb_writer, guard) = tracing_appender::non_blocking(appender);
            match tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_ansi(false)
                .with_writer(nb_writer)
                .try_init()
            {
                Ok(_) => Ok(LogGuard {
                    _worker: Some(guard),
                    installed: true,
                }),
                // Global tracing subscriber already installed; drop guard so writer shuts down.
                Err(_err) => Ok(LogGuard {
                    _worker: None,
                    installed: false,
                }),
            }
        }
    }
}

/// Route panics through `tracing` before the previous hook runs. Idempotent.
pub fn install_panic_hook() {
    static HOOK: Once = Once::new();
    HOOK.call_once(|| {
        let default_panic = std::panic::take_hook();
        std::panic::set_hook(Box::new(move |info| {
            tracing::error!(target: "runtime.panic", ?info, "panic");
            default_panic(info);
        }));
    });
}
