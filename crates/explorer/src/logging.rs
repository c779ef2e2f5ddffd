//! Tracing setup.
//!
//! The filter comes from `EXPLORER_LOG` (same syntax as `RUST_LOG`) and
//! defaults to `info`.  The interactive UI owns the terminal, so it logs to
//! a file or not at all; the print commands log to stderr.

use std::fs::OpenOptions;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use tracing_subscriber::EnvFilter;

use crate::error::{AppError, Result};

pub const FILTER_ENV: &str = "EXPLORER_LOG";

/// Where log lines go.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LogTarget {
    Stderr,
    File(PathBuf),
    Disabled,
}

impl LogTarget {
    /// Target for the interactive UI: the given file, or nothing.
    pub fn for_tui(log_file: Option<&Path>) -> Self {
        match log_file {
            Some(path) => LogTarget::File(path.to_path_buf()),
            None => LogTarget::Disabled,
        }
    }
}

fn env_filter() -> EnvFilter {
    EnvFilter::try_from_env(FILTER_ENV).unwrap_or_else(|_| EnvFilter::new("info"))
}

/// Install the global subscriber.
pub fn init(target: &LogTarget) -> Result<()> {
    let builder = tracing_subscriber::fmt()
        .with_env_filter(env_filter())
        .with_target(false)
        .compact();

    let installed = match target {
        LogTarget::Disabled => return Ok(()),
        LogTarget::Stderr => builder.with_writer(std::io::stderr).try_init(),
        LogTarget::File(path) => {
            let file = OpenOptions::new()
                .create(true)
                .append(true)
                .open(path)
                .map_err(|source| AppError::LogFile {
                    path: path.clone(),
                    source,
                })?;
            builder
                .with_ansi(false)
                .with_writer(Mutex::new(file))
                .try_init()
        }
    };

    installed.map_err(|err| AppError::Logging(err.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tui_logs_only_with_a_file() {
        assert_eq!(LogTarget::for_tui(None), LogTarget::Disabled);
        assert_eq!(
            LogTarget::for_tui(Some(Path::new("explorer.log"))),
            LogTarget::File(PathBuf::from("explorer.log"))
        );
    }

    #[test]
    fn disabled_installs_nothing() {
        assert!(init(&LogTarget::Disabled).is_ok());
    }

    #[test]
    fn unwritable_log_file_is_reported() {
        let path = PathBuf::from("/nonexistent-explorer-dir/explorer.log");
        match init(&LogTarget::File(path.clone())) {
            Err(AppError::LogFile { path: reported, .. }) => assert_eq!(reported, path),
            other => panic!("unexpected: {other:?}"),
        }
    }
}
