// ============================================================================
// nightcore-core/src/upload.rs
// ============================================================================
//
// UPLOAD STAGING: Accepting an Audio File onto Local Storage
//
// Before a conversion job can run, the uploaded bytes must sit on disk under
// a name that is safe to use in a path and unique to the request. This
// module validates the client-supplied name, sanitizes it, and writes the
// upload into a fresh per-job directory while enforcing the size limit.

use crate::config::ConverterConfig;
use crate::error::{CoreError, CoreResult};
use crate::temp_files::create_job_dir;
use log::{debug, info};
use std::fs::File;
use std::io::{self, Read, Write};
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// File extensions accepted for conversion, compared case-insensitively.
pub const ALLOWED_EXTENSIONS: &[&str] = &["mp3", "wav", "ogg"];

/// Returns true when `filename` carries one of the allowed extensions.
pub fn is_allowed_file(filename: &str) -> bool {
    filename.rsplit_once('.').is_some_and(|(_, ext)| {
        ALLOWED_EXTENSIONS
            .iter()
            .any(|allowed| allowed.eq_ignore_ascii_case(ext))
    })
}

/// Reduces a client-supplied filename to a safe single path component.
///
/// Directory components are discarded, runs of whitespace become `_`, any
/// character outside `[A-Za-z0-9._-]` is dropped, and leading or trailing
/// `.`/`_` are stripped. Returns `None` if nothing usable is left.
pub fn sanitize_filename(filename: &str) -> Option<String> {
    let base = filename.rsplit(['/', '\\']).next().unwrap_or(filename);
    let joined = base.split_whitespace().collect::<Vec<_>>().join("_");
    let cleaned: String = joined
        .chars()
        .filter(|c| c.is_ascii_alphanumeric() || matches!(c, '.' | '_' | '-'))
        .collect();
    let trimmed = cleaned.trim_matches(|c| c == '.' || c == '_');

    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

/// An upload written to its own job directory.
///
/// The directory, and anything still inside it, is removed on drop.
#[derive(Debug)]
pub struct StagedUpload {
    dir: TempDir,
    input_path: PathBuf,
    original_name: String,
    size: u64,
}

impl StagedUpload {
    /// Path of the staged input file, suitable for a `ConversionJob`.
    pub fn input_path(&self) -> &Path {
        &self.input_path
    }

    /// Directory owned by this job.
    pub fn job_dir(&self) -> &Path {
        self.dir.path()
    }

    /// Filename as supplied by the client, before sanitizing.
    pub fn original_name(&self) -> &str {
        &self.original_name
    }

    /// Number of bytes staged.
    pub fn size(&self) -> u64 {
        self.size
    }
}

/// Writes an upload into a new job directory under the staging root.
///
/// Rejects unusable names, unsupported types, and uploads above the
/// configured size limit. Nothing is left on disk when staging fails.
pub fn stage_upload<R: Read>(
    config: &ConverterConfig,
    original_name: &str,
    reader: R,
) -> CoreResult<StagedUpload> {
    let filename = sanitize_filename(original_name)
        .ok_or_else(|| CoreError::InvalidFilename(original_name.to_string()))?;
    if !is_allowed_file(&filename) {
        return Err(CoreError::UnsupportedFileType(original_name.to_string()));
    }

    let dir = create_job_dir(config)?;
    let input_path = dir.path().join(&filename);
    let limit = config.max_upload_bytes;

    let mut file = File::create(&input_path)?;
    let size = io::copy(&mut reader.take(limit.saturating_add(1)), &mut file)?;
    if size > limit {
        debug!("Upload '{}' exceeded {} bytes", original_name, limit);
        return Err(CoreError::UploadTooLarge { limit });
    }
    file.flush()?;

    info!(
        "Staged upload '{}' as {} ({} bytes)",
        original_name,
        input_path.display(),
        size
    );

    Ok(StagedUpload {
        dir,
        input_path,
        original_name: original_name.to_string(),
        size,
    })
}

/// Stages a copy of a local file, leaving the original untouched.
pub fn stage_file(config: &ConverterConfig, path: &Path) -> CoreResult<StagedUpload> {
    let name = path
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .ok_or_else(|| CoreError::InvalidFilename(path.display().to_string()))?;
    let file = File::open(path).map_err(|e| {
        CoreError::PathError(format!("Failed to open '{}': {}", path.display(), e))
    })?;
    stage_upload(config, &name, file)
}
