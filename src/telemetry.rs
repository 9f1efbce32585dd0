use std::fs::{self, OpenOptions};
use std::path::Path;
use std::sync::Mutex;

use tracing_subscriber::EnvFilter;

use crate::error::StoreError;

/// Default filter for a `-v` count when RUST_LOG is not set.
pub fn default_directive(verbosity: u8) -> &'static str {
    match verbosity {
        0 => "steadykeys=info",
        1 => "steadykeys=debug",
        _ => "steadykeys=trace",
    }
}

/// Install a global subscriber writing to `log_path`. The terminal belongs to
/// the UI, so logs never go to stdout or stderr.
pub fn init(verbosity: u8, log_path: &Path) -> Result<(), StoreError> {
    if let Some(parent) = log_path.parent() {
        fs::create_dir_all(parent).map_err(|source| StoreError::Io {
            path: parent.to_path_buf(),
            source,
        })?;
    }
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(log_path)
        .map_err(|source| StoreError::Io {
            path: log_path.to_path_buf(),
            source,
        })?;

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directive(verbosity)));

    // A subscriber may already be installed (tests, embedding hosts); keep it.
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .try_init();
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn verbosity_levels() {
        assert_eq!(default_directive(0), "steadykeys=info");
        assert_eq!(default_directive(1), "steadykeys=debug");
        assert_eq!(default_directive(5), "steadykeys=trace");
    }

    #[test]
    fn init_creates_log_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("logs").join("steadykeys.log");
        init(0, &path).unwrap();
        assert!(path.exists());
    }
}
