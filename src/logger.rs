//! Tracing subscriber setup.
//!
//! The terminal is in raw mode on the alternate screen while the game runs,
//! so events go to a log file instead of stderr.

use crate::constants::{LOG_ENV_VAR, LOG_FILE_NAME};
use std::fs::OpenOptions;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use tracing::level_filters::LevelFilter;
use tracing_subscriber::{fmt::time, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Install the global subscriber, appending to `<dir>/flappy-owl.log`.
///
/// The filter is read from `FLAPPY_OWL_LOG` (same syntax as `RUST_LOG`) and
/// defaults to `info`. Returns the log file path.
pub fn init(dir: &Path) -> io::Result<PathBuf> {
    let path = dir.join(LOG_FILE_NAME);
    let file = OpenOptions::new().create(true).append(true).open(&path)?;

    let filter = EnvFilter::builder()
        .with_default_directive(LevelFilter::INFO.into())
        .with_env_var(LOG_ENV_VAR)
        .from_env_lossy();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .with_ansi(false)
                .with_timer(time::uptime())
                .with_writer(Mutex::new(file)),
        )
        .with(filter)
        .try_init()
        .map_err(|e| io::Error::new(io::ErrorKind::AlreadyExists, e))?;

    Ok(path)
}
