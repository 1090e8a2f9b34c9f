// ============================================================================
// nightcore-core/src/external/ffmpeg_executor.rs
// ============================================================================
//
// FFMPEG EXECUTOR: Engine Process Management and Abstraction
//
// This module provides abstractions for spawning and interacting with the
// engine process. A conversion job only needs three things from it: start a
// prepared command, stream its stderr events, and wait for the exit status.
//
// KEY COMPONENTS:
// - EngineProcess: Trait representing a running engine process
// - EngineSpawner: Trait for probing and starting the engine
// - ProcessSpawner: Concrete implementation using ffmpeg-sidecar

use super::{EngineProbe, probe_engine};
use ffmpeg_sidecar::child::FfmpegChild;
use ffmpeg_sidecar::command::FfmpegCommand;
use ffmpeg_sidecar::event::FfmpegEvent;
use std::io;
use std::path::{Path, PathBuf};
use std::process::ExitStatus;

/// Trait representing an active engine process instance.
pub trait EngineProcess {
    /// Feeds every event parsed from the process output to `handler`, until
    /// the process closes its output streams.
    fn handle_events<F>(&mut self, handler: F) -> io::Result<()>
    where
        F: FnMut(FfmpegEvent);

    /// Waits for the process to exit and returns its status.
    fn wait(&mut self) -> io::Result<ExitStatus>;
}

/// Trait representing something that can start the engine.
pub trait EngineSpawner {
    type Process: EngineProcess;

    /// Path (or bare command name) of the engine binary.
    fn engine_path(&self) -> &Path;

    /// Checks whether the engine can be started right now.
    fn probe(&self) -> EngineProbe {
        probe_engine(self.engine_path())
    }

    /// Spawns the command, consuming it.
    fn spawn(&self, cmd: FfmpegCommand) -> io::Result<Self::Process>;
}

// --- Concrete Implementation using ffmpeg-sidecar ---

/// Wrapper around `ffmpeg_sidecar::child::FfmpegChild` implementing `EngineProcess`.
pub struct SidecarProcess(FfmpegChild);

impl EngineProcess for SidecarProcess {
    fn handle_events<F>(&mut self, mut handler: F) -> io::Result<()>
    where
        F: FnMut(FfmpegEvent),
    {
        let iterator = self.0.iter().map_err(|e| {
            log::error!("Failed to get engine event iterator: {}", e);
            io::Error::other(e.to_string())
        })?;
        for event in iterator {
            handler(event);
        }
        Ok(())
    }

    fn wait(&mut self) -> io::Result<ExitStatus> {
        self.0.wait()
    }
}

/// Starts the engine as a child process via `ffmpeg-sidecar`.
#[derive(Debug, Clone)]
pub struct ProcessSpawner {
    engine_path: PathBuf,
}

impl ProcessSpawner {
    pub fn new<P: Into<PathBuf>>(engine_path: P) -> Self {
        Self {
            engine_path: engine_path.into(),
        }
    }
}

impl Default for ProcessSpawner {
    fn default() -> Self {
        Self::new(crate::config::DEFAULT_ENGINE_PATH)
    }
}

impl EngineSpawner for ProcessSpawner {
    type Process = SidecarProcess;

    fn engine_path(&self) -> &Path {
        &self.engine_path
    }

    fn spawn(&self, mut cmd: FfmpegCommand) -> io::Result<Self::Process> {
        cmd.spawn().map(SidecarProcess)
    }
}
