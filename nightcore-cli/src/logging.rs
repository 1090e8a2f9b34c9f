// ============================================================================
// nightcore-cli/src/logging.rs
// ============================================================================
//
// LOGGING UTILITIES: Helper Functions for Logging
//
// The logger itself (log4rs, console on stderr plus an optional file) is
// installed by `nightcore_core::logging::setup_logging`. This file decides
// the console level and the log file name for a CLI run.

use log::LevelFilter;
use std::path::{Path, PathBuf};

/// Returns the current local timestamp formatted as "YYYYMMDD_HHMMSS".
///
/// # Example
/// ```
/// let log_filename = format!("nightcore_{}.log", nightcore_cli::logging::get_timestamp());
/// assert!(log_filename.starts_with("nightcore_"));
/// ```
pub fn get_timestamp() -> String {
    chrono::Local::now().format("%Y%m%d_%H%M%S").to_string()
}

/// Console threshold for the `--verbose` flag.
pub fn console_level(verbose: bool) -> LevelFilter {
    if verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Info
    }
}

/// Log file for this run inside `log_dir`.
pub fn log_file_path(log_dir: &Path) -> PathBuf {
    log_dir.join(format!("nightcore_{}.log", get_timestamp()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_timestamp_shape() {
        let stamp = get_timestamp();
        assert_eq!(stamp.len(), 15);
        assert_eq!(&stamp[8..9], "_");
        assert!(stamp.chars().filter(|c| *c != '_').all(|c| c.is_ascii_digit()));
    }

    #[test]
    fn test_log_file_path() {
        let path = log_file_path(Path::new("/var/log/nightcore"));
        assert!(path.starts_with("/var/log/nightcore"));
        let name = path.file_name().unwrap().to_string_lossy().into_owned();
        assert!(name.starts_with("nightcore_") && name.ends_with(".log"), "{name}");
    }

    #[test]
    fn test_console_level() {
        assert_eq!(console_level(true), LevelFilter::Debug);
        assert_eq!(console_level(false), LevelFilter::Info);
    }
}
