// ============================================================================
// nightcore-core/src/config/builder.rs
// ============================================================================
//
// CONFIGURATION BUILDER: Builder Pattern for ConverterConfig
//
// Fluent construction of ConverterConfig with defaults for everything that
// is not set explicitly.

// ---- Standard library imports ----
use std::path::PathBuf;

// ---- Internal crate imports ----
use super::ConverterConfig;

/// Builder for creating ConverterConfig instances.
///
/// # Examples
///
/// ```rust
/// use nightcore_core::config::ConverterConfigBuilder;
/// use std::path::PathBuf;
///
/// let config = ConverterConfigBuilder::new()
///     .engine_path("ffmpeg")
///     .staging_dir(PathBuf::from("/var/tmp/nightcore"))
///     .hide_banner(false)
///     .build();
/// assert_eq!(config.staging_dir, PathBuf::from("/var/tmp/nightcore"));
/// ```
#[derive(Debug, Clone)]
pub struct ConverterConfigBuilder {
    config: ConverterConfig,
}

impl Default for ConverterConfigBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl ConverterConfigBuilder {
    /// Creates a new builder with default values.
    pub fn new() -> Self {
        Self {
            config: ConverterConfig::default(),
        }
    }

    /// Sets the engine binary.
    pub fn engine_path<P: Into<PathBuf>>(mut self, engine_path: P) -> Self {
        self.config.engine_path = engine_path.into();
        self
    }

    /// Sets the root directory for per-job staging directories.
    pub fn staging_dir<P: Into<PathBuf>>(mut self, staging_dir: P) -> Self {
        self.config.staging_dir = staging_dir.into();
        self
    }

    /// Sets the maximum accepted upload size in bytes.
    pub fn max_upload_bytes(mut self, max_upload_bytes: u64) -> Self {
        self.config.max_upload_bytes = max_upload_bytes;
        self
    }

    /// Sets whether the engine banner is suppressed.
    pub fn hide_banner(mut self, hide_banner: bool) -> Self {
        self.config.hide_banner = hide_banner;
        self
    }

    /// Builds the configuration.
    pub fn build(self) -> ConverterConfig {
        self.config
    }
}
