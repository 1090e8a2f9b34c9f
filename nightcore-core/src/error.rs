// ============================================================================
// nightcore-core/src/error.rs
// ============================================================================
//
// ERROR HANDLING: Conversion Failure Taxonomy and Core Error Type
//
// A conversion job reports exactly one failure value, `ConversionError`,
// tagged with one of four kinds. Everything else the library can fail at
// (upload staging, configuration, JSON parameter files) is expressed through
// `CoreError`, which wraps `ConversionError` so callers can use a single `?`
// chain while still matching on the conversion kind.

use serde::Serialize;
use std::fmt;
use std::io;
use std::path::{Path, PathBuf};
use std::process::ExitStatus;
use thiserror::Error;

/// Classification of a failed conversion.
///
/// Callers map kinds to their own transport codes; the message text is for
/// humans only and is not a stable contract.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum ConversionErrorKind {
    /// The engine executable is missing or cannot be executed.
    EngineUnavailable,
    /// The engine ran and exited non-zero.
    EngineExecutionFailed,
    /// The engine exited successfully but left no output behind.
    OutputMissing,
    /// Input unreadable, output unwritable, or another storage problem.
    IoFailure,
}

impl ConversionErrorKind {
    /// Machine-friendly identifier for this kind.
    pub const fn as_str(self) -> &'static str {
        match self {
            ConversionErrorKind::EngineUnavailable => "engine_unavailable",
            ConversionErrorKind::EngineExecutionFailed => "engine_execution_failed",
            ConversionErrorKind::OutputMissing => "output_missing",
            ConversionErrorKind::IoFailure => "io_failure",
        }
    }
}

impl fmt::Display for ConversionErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The single failure value produced by `ConversionJob::convert`.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{kind}: {message}")]
pub struct ConversionError {
    kind: ConversionErrorKind,
    message: String,
}

impl ConversionError {
    pub fn new<S: Into<String>>(kind: ConversionErrorKind, message: S) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }

    pub fn engine_unavailable(engine: &Path) -> Self {
        Self::new(
            ConversionErrorKind::EngineUnavailable,
            format!(
                "Audio engine '{}' is not installed or not executable",
                engine.display()
            ),
        )
    }

    /// Builds an execution failure from the exit status and the engine's
    /// captured diagnostic text.
    pub fn execution_failed(status: ExitStatus, diagnostics: &str) -> Self {
        let diagnostics = diagnostics.trim();
        let message = if diagnostics.is_empty() {
            format!("Audio engine failed ({status}) without diagnostic output")
        } else {
            format!("Audio engine failed ({status}): {diagnostics}")
        };
        Self::new(ConversionErrorKind::EngineExecutionFailed, message)
    }

    pub fn output_missing(output: &Path) -> Self {
        Self::new(
            ConversionErrorKind::OutputMissing,
            format!(
                "Audio engine reported success but produced no output at {}",
                output.display()
            ),
        )
    }

    pub fn io<C: fmt::Display>(context: C, err: &io::Error) -> Self {
        Self::new(ConversionErrorKind::IoFailure, format!("{context}: {err}"))
    }

    pub fn kind(&self) -> ConversionErrorKind {
        self.kind
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

/// Error type for every fallible operation in nightcore-core.
#[derive(Error, Debug)]
pub enum CoreError {
    #[error(transparent)]
    Conversion(#[from] ConversionError),

    #[error("Unsupported file type: '{0}' (allowed: mp3, wav, ogg)")]
    UnsupportedFileType(String),

    #[error("Invalid filename: '{0}'")]
    InvalidFilename(String),

    #[error("Upload exceeds the maximum size of {limit} bytes")]
    UploadTooLarge { limit: u64 },

    #[error("Invalid configuration: {0}")]
    Config(String),

    #[error("Path error: {0}")]
    PathError(String),

    #[error("Invalid parameter file {path}: {source}")]
    ParameterFile {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("{0}")]
    OperationFailed(String),
}

impl CoreError {
    /// Returns the conversion kind when this error came out of a job.
    pub fn conversion_kind(&self) -> Option<ConversionErrorKind> {
        match self {
            CoreError::Conversion(err) => Some(err.kind()),
            _ => None,
        }
    }
}

/// Result type for nightcore-core operations
pub type CoreResult<T> = std::result::Result<T, CoreError>;
