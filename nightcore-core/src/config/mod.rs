//! Configuration structures and constants for the nightcore-core library.
//!
//! This module holds the settings that surround a conversion: where the
//! engine lives, where uploads are staged, and how large an upload may be.
//! Effect parameters themselves live in `crate::params`.

mod builder;

use crate::error::{CoreError, CoreResult};
use crate::external::ProcessSpawner;
use std::path::PathBuf;

pub use builder::ConverterConfigBuilder;

// Default constants

/// Engine binary looked up on `PATH` when no explicit path is configured.
pub const DEFAULT_ENGINE_PATH: &str = "ffmpeg";

/// Maximum accepted upload size: 100 MiB.
pub const DEFAULT_MAX_UPLOAD_BYTES: u64 = 100 * 1024 * 1024;

/// Prefix of the per-job staging directories.
pub const STAGING_DIR_PREFIX: &str = "nightcore_job_";

/// Main configuration structure for the nightcore-core library.
///
/// Created by the consumer of the library (e.g., nightcore-cli) and passed
/// to the staging and conversion entry points. All fields have sensible
/// defaults; the builder provides a fluent way to override them.
///
/// # Examples
///
/// ```rust
/// use nightcore_core::config::ConverterConfigBuilder;
///
/// let config = ConverterConfigBuilder::new()
///     .engine_path("/usr/local/bin/ffmpeg")
///     .max_upload_bytes(10 * 1024 * 1024)
///     .build();
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone)]
pub struct ConverterConfig {
    /// Engine binary, either a bare command name or a path.
    pub engine_path: PathBuf,

    /// Root under which each job gets its own unique directory.
    pub staging_dir: PathBuf,

    /// Uploads larger than this are rejected.
    pub max_upload_bytes: u64,

    /// Pass `-hide_banner` to the engine.
    pub hide_banner: bool,
}

impl Default for ConverterConfig {
    fn default() -> Self {
        Self {
            engine_path: PathBuf::from(DEFAULT_ENGINE_PATH),
            staging_dir: std::env::temp_dir(),
            max_upload_bytes: DEFAULT_MAX_UPLOAD_BYTES,
            hide_banner: true,
        }
    }
}

impl ConverterConfig {
    /// Checks the configuration for values that can never work.
    pub fn validate(&self) -> CoreResult<()> {
        if self.engine_path.as_os_str().is_empty() {
            return Err(CoreError::Config("engine path must not be empty".to_string()));
        }
        if self.staging_dir.as_os_str().is_empty() {
            return Err(CoreError::Config("staging directory must not be empty".to_string()));
        }
        if self.max_upload_bytes == 0 {
            return Err(CoreError::Config(
                "maximum upload size must be greater than zero".to_string(),
            ));
        }
        Ok(())
    }

    /// Engine spawner for the configured binary.
    pub fn engine(&self) -> ProcessSpawner {
        ProcessSpawner::new(self.engine_path.clone())
    }
}
