// ============================================================================
// nightcore-cli/src/error.rs
// ============================================================================
//
// CLI ERROR HANDLING: Error types and utilities for the CLI
//
// This module provides error handling utilities for the CLI that integrate
// with the nightcore-core error types while adding CLI-specific error
// contexts, and maps every error to the process exit code.
//
// KEY COMPONENTS:
// - CliResult: Type alias for CLI operations
// - exit_code: CoreError to sysexits-style exit code
// - CliErrorContext: context helpers for Result and Option

// ---- Internal crate imports ----
use nightcore_core::{ConversionErrorKind, CoreError, CoreResult};

// ---- Standard library imports ----
use std::fmt;

// ============================================================================
// RESULT TYPE ALIAS
// ============================================================================

/// Type alias for CLI results using CoreError.
pub type CliResult<T> = CoreResult<T>;

// ============================================================================
// EXIT CODES
// ============================================================================

pub const EXIT_FAILURE: i32 = 1;
pub const EXIT_DATA_ERROR: i32 = 65;
pub const EXIT_NO_INPUT: i32 = 66;
pub const EXIT_UNAVAILABLE: i32 = 69;
pub const EXIT_SOFTWARE: i32 = 70;
pub const EXIT_IO_ERROR: i32 = 74;
pub const EXIT_CONFIG: i32 = 78;

/// Maps an error to the exit code the binary terminates with.
pub fn exit_code(error: &CoreError) -> i32 {
    match error {
        CoreError::Conversion(err) => match err.kind() {
            ConversionErrorKind::EngineUnavailable => EXIT_UNAVAILABLE,
            ConversionErrorKind::EngineExecutionFailed | ConversionErrorKind::OutputMissing => {
                EXIT_SOFTWARE
            }
            ConversionErrorKind::IoFailure => EXIT_IO_ERROR,
        },
        CoreError::UnsupportedFileType(_)
        | CoreError::InvalidFilename(_)
        | CoreError::UploadTooLarge { .. }
        | CoreError::ParameterFile { .. }
        | CoreError::Json(_) => EXIT_DATA_ERROR,
        CoreError::PathError(_) => EXIT_NO_INPUT,
        CoreError::Config(_) => EXIT_CONFIG,
        CoreError::Io(_) => EXIT_IO_ERROR,
        CoreError::OperationFailed(_) => EXIT_FAILURE,
    }
}

// ============================================================================
// ERROR CONVERSION UTILITIES
// ============================================================================

/// Extension trait for adding context to errors in the CLI.
///
/// Similar to anyhow's context methods, but produces a CoreError.
pub trait CliErrorContext<T> {
    /// Add context to an error.
    fn cli_context<C>(self, context: C) -> CliResult<T>
    where
        C: fmt::Display;

    /// Add context using a closure (for lazy evaluation).
    fn cli_with_context<C, F>(self, f: F) -> CliResult<T>
    where
        C: fmt::Display,
        F: FnOnce() -> C;
}

impl<T, E> CliErrorContext<T> for Result<T, E>
where
    E: Into<CoreError>,
{
    fn cli_context<C>(self, context: C) -> CliResult<T>
    where
        C: fmt::Display,
    {
        self.map_err(|e| {
            let core_error: CoreError = e.into();
            CoreError::OperationFailed(format!("{}: {}", context, core_error))
        })
    }

    fn cli_with_context<C, F>(self, f: F) -> CliResult<T>
    where
        C: fmt::Display,
        F: FnOnce() -> C,
    {
        self.map_err(|e| {
            let core_error: CoreError = e.into();
            CoreError::OperationFailed(format!("{}: {}", f(), core_error))
        })
    }
}

impl<T> CliErrorContext<T> for Option<T> {
    fn cli_context<C>(self, context: C) -> CliResult<T>
    where
        C: fmt::Display,
    {
        self.ok_or_else(|| CoreError::OperationFailed(context.to_string()))
    }

    fn cli_with_context<C, F>(self, f: F) -> CliResult<T>
    where
        C: fmt::Display,
        F: FnOnce() -> C,
    {
        self.ok_or_else(|| CoreError::OperationFailed(f().to_string()))
    }
}
