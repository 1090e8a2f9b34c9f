//! Temporary file management utilities.
//!
//! Every job gets its own uniquely named directory under the staging root,
//! so two uploads with the same file name can never collide on their derived
//! output path. The directory is a `tempfile::TempDir` and disappears when
//! dropped, even on error paths.

use crate::config::{ConverterConfig, STAGING_DIR_PREFIX};
use crate::error::CoreResult;
use log::{debug, warn};
use std::io;
use std::path::Path;
use tempfile::{Builder as TempFileBuilder, TempDir};

/// Creates a unique job directory under the configured staging root.
pub fn create_job_dir(config: &ConverterConfig) -> CoreResult<TempDir> {
    std::fs::create_dir_all(&config.staging_dir)?;

    Ok(TempFileBuilder::new()
        .prefix(STAGING_DIR_PREFIX)
        .tempdir_in(&config.staging_dir)?)
}

/// Removes a file, or a directory tree, if it exists. Returns true when
/// something was deleted.
///
/// Failures are logged and swallowed: cleanup must never replace the result
/// the caller is about to see.
pub fn remove_if_present(path: &Path) -> bool {
    let is_dir = std::fs::symlink_metadata(path).is_ok_and(|meta| meta.is_dir());
    let removed = if is_dir {
        std::fs::remove_dir_all(path)
    } else {
        std::fs::remove_file(path)
    };

    match removed {
        Ok(()) => {
            debug!("Removed {}", path.display());
            true
        }
        Err(e) if e.kind() == io::ErrorKind::NotFound => false,
        Err(e) => {
            warn!("Failed to remove {}: {}", path.display(), e);
            false
        }
    }
}

/// Best-effort removal of several paths.
pub fn cleanup_paths(paths: &[&Path]) {
    for path in paths {
        remove_if_present(path);
    }
}
