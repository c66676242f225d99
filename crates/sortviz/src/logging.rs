#![forbid(unsafe_code)]

//! File logging.
//!
//! The UI owns the terminal, so log output goes to a file. Logging is off
//! unless `SORTVIZ_LOG` holds a filter directive (`info`,
//! `sortviz_runtime=debug`, ...). `SORTVIZ_LOG_FILE` names the file.

use std::env;
use std::fs::{File, OpenOptions};
use std::io;
use std::path::PathBuf;
use std::sync::Mutex;

use tracing_subscriber::EnvFilter;

/// Filter directive variable.
pub const LOG_ENV: &str = "SORTVIZ_LOG";
/// Log path variable.
pub const LOG_FILE_ENV: &str = "SORTVIZ_LOG_FILE";
/// Log path when `SORTVIZ_LOG_FILE` is unset.
pub const DEFAULT_LOG_FILE: &str = "sortviz.log";

/// Where and what to log.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogConfig {
    pub filter: String,
    pub path: PathBuf,
}

impl LogConfig {
    /// Read the logging variables. `None` when logging is disabled.
    pub fn from_env() -> Option<Self> {
        Self::from_vars(|key| env::var(key).ok())
    }

    fn from_vars<F>(var: F) -> Option<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let filter = var(LOG_ENV).filter(|f| !f.trim().is_empty())?;
        let path = var(LOG_FILE_ENV)
            .filter(|p| !p.is_empty())
            .unwrap_or_else(|| DEFAULT_LOG_FILE.to_string());
        Some(Self {
            filter,
            path: PathBuf::from(path),
        })
    }

    /// Install the global subscriber.
    ///
    /// # Errors
    ///
    /// Fails if the log file cannot be opened, the filter does not parse,
    /// or a global subscriber is already set.
    pub fn install(&self) -> io::Result<()> {
        let filter = EnvFilter::try_new(&self.filter)
            .map_err(|err| io::Error::new(io::ErrorKind::InvalidInput, err))?;
        let file: File = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)?;

        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(Mutex::new(file))
            .with_ansi(false)
            .with_thread_names(true)
            .try_init()
            .map_err(io::Error::other)?;

        tracing::info!(path = %self.path.display(), filter = %self.filter, "logging started");
        Ok(())
    }
}
