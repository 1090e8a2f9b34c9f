// nightcore-core/src/external/mocks.rs

// --- Mocking Infrastructure (for testing) ---

use super::{EngineProbe, EngineProcess, EngineSpawner};
use ffmpeg_sidecar::command::FfmpegCommand;
use ffmpeg_sidecar::event::{FfmpegEvent, LogLevel};
use std::io;
use std::path::{Path, PathBuf};
use std::process::ExitStatus;
use std::sync::{Arc, Mutex};

/// What the mock engine does when a conversion is spawned.
#[derive(Debug, Clone)]
pub enum MockOutcome {
    /// Exit 0, optionally writing `output` to the final argument.
    Succeed { output: Option<Vec<u8>> },
    /// Exit with `exit_code`, emitting `stderr` lines as error log events.
    Fail { exit_code: i32, stderr: Vec<String> },
    /// The spawn itself fails with this error kind.
    SpawnError(io::ErrorKind),
}

/// Mock implementation of `EngineProcess`.
pub struct MockEngineProcess {
    events: Vec<FfmpegEvent>,
    exit_status: ExitStatus,
}

impl EngineProcess for MockEngineProcess {
    fn handle_events<F>(&mut self, mut handler: F) -> io::Result<()>
    where
        F: FnMut(FfmpegEvent),
    {
        for event in self.events.drain(..) {
            handler(event);
        }
        Ok(())
    }

    fn wait(&mut self) -> io::Result<ExitStatus> {
        Ok(self.exit_status)
    }
}

/// Mock implementation of `EngineSpawner` that records every invocation.
#[derive(Debug, Clone)]
pub struct MockEngineSpawner {
    engine_path: PathBuf,
    available: bool,
    outcome: MockOutcome,
    received_calls: Arc<Mutex<Vec<Vec<String>>>>,
    probe_count: Arc<Mutex<usize>>,
}

impl MockEngineSpawner {
    /// An available engine that exits 0 and writes a small output file.
    pub fn succeeding() -> Self {
        Self::with_outcome(MockOutcome::Succeed {
            output: Some(b"mock nightcore audio".to_vec()),
        })
    }

    /// An available engine that exits 0 without writing anything.
    pub fn silent() -> Self {
        Self::with_outcome(MockOutcome::Succeed { output: None })
    }

    /// An available engine that exits with `exit_code`.
    pub fn failing(exit_code: i32, stderr: &[&str]) -> Self {
        Self::with_outcome(MockOutcome::Fail {
            exit_code,
            stderr: stderr.iter().map(|line| line.to_string()).collect(),
        })
    }

    /// An engine the probe reports as missing.
    pub fn unavailable() -> Self {
        let mut spawner = Self::succeeding();
        spawner.available = false;
        spawner
    }

    pub fn with_outcome(outcome: MockOutcome) -> Self {
        Self {
            engine_path: PathBuf::from("mock-ffmpeg"),
            available: true,
            outcome,
            received_calls: Arc::new(Mutex::new(Vec::new())),
            probe_count: Arc::new(Mutex::new(0)),
        }
    }

    /// Arguments of every spawned command, in order.
    pub fn received_calls(&self) -> Vec<Vec<String>> {
        self.received_calls
            .lock()
            .map(|calls| calls.clone())
            .unwrap_or_default()
    }

    /// How many times the engine was probed.
    pub fn probe_count(&self) -> usize {
        self.probe_count.lock().map(|count| *count).unwrap_or_default()
    }
}

impl EngineSpawner for MockEngineSpawner {
    type Process = MockEngineProcess;

    fn engine_path(&self) -> &Path {
        &self.engine_path
    }

    fn probe(&self) -> EngineProbe {
        if let Ok(mut count) = self.probe_count.lock() {
            *count += 1;
        }
        EngineProbe {
            available: self.available,
            version_line: self.available.then(|| "ffmpeg version mock".to_string()),
        }
    }

    fn spawn(&self, cmd: FfmpegCommand) -> io::Result<Self::Process> {
        let args: Vec<String> = cmd
            .get_args()
            .map(|arg| arg.to_string_lossy().into_owned())
            .collect();
        if let Ok(mut calls) = self.received_calls.lock() {
            calls.push(args.clone());
        }

        match &self.outcome {
            MockOutcome::SpawnError(kind) => Err(io::Error::new(*kind, "mock spawn failure")),
            MockOutcome::Succeed { output } => {
                if let (Some(bytes), Some(target)) = (output, args.last()) {
                    std::fs::write(target, bytes)?;
                }
                Ok(MockEngineProcess {
                    events: vec![FfmpegEvent::Log(
                        LogLevel::Info,
                        "mock conversion finished".to_string(),
                    )],
                    exit_status: exit_status(0),
                })
            }
            MockOutcome::Fail { exit_code, stderr } => Ok(MockEngineProcess {
                events: stderr
                    .iter()
                    .map(|line| FfmpegEvent::Log(LogLevel::Error, line.clone()))
                    .collect(),
                exit_status: exit_status(*exit_code),
            }),
        }
    }
}

#[cfg(unix)]
fn exit_status(code: i32) -> ExitStatus {
    use std::os::unix::process::ExitStatusExt;
    ExitStatus::from_raw(code << 8)
}

#[cfg(windows)]
fn exit_status(code: i32) -> ExitStatus {
    use std::os::windows::process::ExitStatusExt;
    ExitStatus::from_raw(code as u32)
}
