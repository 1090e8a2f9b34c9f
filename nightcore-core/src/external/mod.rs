// ============================================================================
// nightcore-core/src/external/mod.rs
// ============================================================================
//
// EXTERNAL TOOLS: Interactions with the ffmpeg Audio Engine
//
// This module encapsulates everything that touches the external engine:
// the availability probe, command construction and process execution. The
// execution side sits behind the `EngineSpawner`/`EngineProcess` traits so
// conversion jobs can be driven by a mock in tests.
//
// KEY COMPONENTS:
// - probe_engine: side-effect-free `-version` check
// - EngineCommandBuilder: builds the conversion command line
// - EngineSpawner / EngineProcess: execution abstraction
// - ProcessSpawner: production implementation via ffmpeg-sidecar

use log::{debug, error, warn};
use std::io;
use std::path::Path;
use std::process::{Command, Stdio};

// ============================================================================
// SUBMODULES
// ============================================================================

/// Contains the ffmpeg command builder for conversions
pub mod ffmpeg_builder;

/// Contains traits and implementations for executing ffmpeg commands
pub mod ffmpeg_executor;

/// Mock engine for tests
#[cfg(test)]
pub mod mocks;

// ============================================================================
// RE-EXPORTS
// ============================================================================

pub use ffmpeg_builder::EngineCommandBuilder;
pub use ffmpeg_executor::{EngineProcess, EngineSpawner, ProcessSpawner, SidecarProcess};

// ============================================================================
// AVAILABILITY PROBE
// ============================================================================

/// Argument used to ask the engine for its version banner.
const VERSION_ARG: &str = "-version";

/// Outcome of an engine availability probe.
///
/// `version_line` is free-form diagnostic text; only `available` is a
/// contract.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct EngineProbe {
    pub available: bool,
    pub version_line: Option<String>,
}

impl EngineProbe {
    pub fn unavailable() -> Self {
        Self::default()
    }
}

/// Checks whether the engine at `engine` can be started.
///
/// Runs `<engine> -version` with stdin and stderr detached. Any process that
/// starts counts as available, whatever its exit status; a binary that cannot
/// be found or executed does not. Nothing is cached between calls.
pub fn probe_engine(engine: &Path) -> EngineProbe {
    let result = Command::new(engine)
        .arg(VERSION_ARG)
        .stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::null())
        .output();

    match result {
        Ok(output) => {
            let version_line = String::from_utf8_lossy(&output.stdout)
                .lines()
                .map(str::trim)
                .find(|line| !line.is_empty())
                .map(str::to_string);
            debug!(
                "Engine '{}' is available ({})",
                engine.display(),
                version_line.as_deref().unwrap_or("no version banner")
            );
            EngineProbe {
                available: true,
                version_line,
            }
        }
        Err(e) if e.kind() == io::ErrorKind::NotFound => {
            warn!("Engine '{}' not found.", engine.display());
            EngineProbe::unavailable()
        }
        Err(e) => {
            error!("Failed to start engine probe '{}': {}", engine.display(), e);
            EngineProbe::unavailable()
        }
    }
}
