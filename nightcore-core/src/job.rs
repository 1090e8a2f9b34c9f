// ============================================================================
// nightcore-core/src/job.rs
// ============================================================================
//
// CONVERSION JOB: One Input File, One Engine Invocation, Guaranteed Cleanup
//
// A `ConversionJob` owns an input path and the output path derived from it.
// `convert()` walks a fixed state machine:
//
//   Created -> Validating -> Invoking -> ValidatingOutput -> Succeeded
//                  |             |              |
//                  +-------------+--------------+--> Failed(kind)
//
// On failure both paths are removed before the error is returned. On
// success the paths move into a `ConvertedAudio` guard, which removes them
// when the caller is done streaming the result. `convert()` consumes the
// job, so a job can only ever run once.

use crate::error::{ConversionError, ConversionErrorKind};
use crate::external::{EngineCommandBuilder, EngineProcess, EngineSpawner};
use crate::filter_graph::FilterGraph;
use crate::params::ConversionParameters;
use crate::temp_files::cleanup_paths;

use ffmpeg_sidecar::event::FfmpegEvent;
use log::{debug, info, trace};

use std::collections::VecDeque;
use std::ffi::OsString;
use std::fmt;
use std::fs::{self, File};
use std::io;
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

/// Prefix prepended to the input basename to form the output name.
pub const OUTPUT_PREFIX: &str = "nightcore_";

/// Number of trailing engine log lines kept as diagnostic text.
pub const DIAGNOSTIC_TAIL_LINES: usize = 40;

/// Derives `<same directory>/nightcore_<basename>` from an input path.
///
/// Returns `None` when the path has no file name component.
pub fn derive_output_path(input: &Path) -> Option<PathBuf> {
    let name = input.file_name()?;
    let mut output_name = OsString::from(OUTPUT_PREFIX);
    output_name.push(name);
    Some(input.with_file_name(output_name))
}

/// Lifecycle states of a conversion job.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JobState {
    Created,
    Validating,
    Invoking,
    ValidatingOutput,
    Succeeded,
    Failed(ConversionErrorKind),
}

impl fmt::Display for JobState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            JobState::Created => f.write_str("created"),
            JobState::Validating => f.write_str("validating"),
            JobState::Invoking => f.write_str("invoking"),
            JobState::ValidatingOutput => f.write_str("validating-output"),
            JobState::Succeeded => f.write_str("succeeded"),
            JobState::Failed(kind) => write!(f, "failed ({kind})"),
        }
    }
}

/// Converts one staged input file through the engine.
pub struct ConversionJob<'a, S: EngineSpawner> {
    engine: &'a S,
    input_path: PathBuf,
    output_path: PathBuf,
    params: ConversionParameters,
    hide_banner: bool,
    state: JobState,
}

impl<'a, S: EngineSpawner> ConversionJob<'a, S> {
    /// Creates a job for `input_path`.
    ///
    /// Fails with `IoFailure` when no output path can be derived (the input
    /// has no file name). Existence of the input is checked by `convert`.
    pub fn new<P: Into<PathBuf>>(
        engine: &'a S,
        input_path: P,
        params: ConversionParameters,
    ) -> Result<Self, ConversionError> {
        let input_path = input_path.into();
        let output_path = derive_output_path(&input_path).ok_or_else(|| {
            ConversionError::new(
                ConversionErrorKind::IoFailure,
                format!("Input path '{}' has no file name", input_path.display()),
            )
        })?;

        Ok(Self {
            engine,
            input_path,
            output_path,
            params,
            hide_banner: true,
            state: JobState::Created,
        })
    }

    /// Sets whether the engine banner is suppressed.
    #[must_use]
    pub fn with_hide_banner(mut self, hide_banner: bool) -> Self {
        self.hide_banner = hide_banner;
        self
    }

    pub fn input_path(&self) -> &Path {
        &self.input_path
    }

    pub fn output_path(&self) -> &Path {
        &self.output_path
    }

    pub fn params(&self) -> &ConversionParameters {
        &self.params
    }

    pub fn state(&self) -> JobState {
        self.state
    }

    /// The graph this job will hand to the engine.
    pub fn filter_graph(&self) -> FilterGraph {
        FilterGraph::build(&self.params)
    }

    /// Runs the conversion to a terminal state.
    ///
    /// Blocks until the engine exits; no timeout is applied. On error the
    /// input and output files have already been removed.
    pub fn convert(mut self) -> Result<ConvertedAudio, ConversionError> {
        let started = Instant::now();
        info!(
            "Starting conversion: {} -> {}",
            self.input_path.display(),
            self.output_path.display()
        );

        match self.run() {
            Ok((size, filter_graph)) => {
                self.transition(JobState::Succeeded);
                let elapsed = started.elapsed();
                info!(
                    "Conversion finished: {} ({} bytes in {:.2}s)",
                    self.output_path.display(),
                    size,
                    elapsed.as_secs_f64()
                );
                let ConversionJob {
                    input_path,
                    output_path,
                    ..
                } = self;
                Ok(ConvertedAudio {
                    input_path,
                    output_path,
                    size,
                    filter_graph,
                    elapsed,
                })
            }
            Err(err) => {
                self.transition(JobState::Failed(err.kind()));
                debug!("Conversion of {} failed: {}", self.input_path.display(), err);
                cleanup_paths(&[&self.input_path, &self.output_path]);
                Err(err)
            }
        }
    }

    fn run(&mut self) -> Result<(u64, FilterGraph), ConversionError> {
        self.transition(JobState::Validating);
        if !self.engine.probe().available {
            return Err(ConversionError::engine_unavailable(self.engine.engine_path()));
        }
        verify_input(&self.input_path)?;

        self.transition(JobState::Invoking);
        let graph = FilterGraph::build(&self.params);
        debug!("Filter graph: {graph}");
        let cmd = EngineCommandBuilder::new(self.engine.engine_path())
            .with_hide_banner(self.hide_banner)
            .build_conversion(&self.input_path, &graph, &self.output_path);
        debug!("Engine command: {cmd:?}");

        let mut process = self
            .engine
            .spawn(cmd)
            .map_err(|e| classify_spawn_error(self.engine.engine_path(), &e))?;

        let mut diagnostics = DiagnosticTail::new(DIAGNOSTIC_TAIL_LINES);
        process
            .handle_events(|event| diagnostics.record(event))
            .map_err(|e| ConversionError::io("Failed to read engine output", &e))?;
        let status = process
            .wait()
            .map_err(|e| ConversionError::io("Failed to wait for engine", &e))?;

        if !status.success() {
            return Err(ConversionError::execution_failed(status, &diagnostics.text()));
        }

        self.transition(JobState::ValidatingOutput);
        let size = verify_output(&self.output_path)?;
        Ok((size, graph))
    }

    fn transition(&mut self, next: JobState) {
        debug!(
            "Job {}: {} -> {}",
            self.input_path.display(),
            self.state,
            next
        );
        self.state = next;
    }
}

/// Confirms the input is a readable regular file.
fn verify_input(input: &Path) -> Result<(), ConversionError> {
    let file = File::open(input).map_err(|e| {
        ConversionError::io(format!("Cannot read input {}", input.display()), &e)
    })?;
    let metadata = file.metadata().map_err(|e| {
        ConversionError::io(format!("Cannot inspect input {}", input.display()), &e)
    })?;
    if !metadata.is_file() {
        return Err(ConversionError::new(
            ConversionErrorKind::IoFailure,
            format!("Input {} is not a regular file", input.display()),
        ));
    }
    Ok(())
}

/// Returns the output size, or `OutputMissing` if there is nothing usable.
fn verify_output(output: &Path) -> Result<u64, ConversionError> {
    match fs::metadata(output) {
        Ok(metadata) if metadata.is_file() && metadata.len() > 0 => Ok(metadata.len()),
        Ok(_) => Err(ConversionError::output_missing(output)),
        Err(e) if e.kind() == io::ErrorKind::NotFound => {
            Err(ConversionError::output_missing(output))
        }
        Err(e) => Err(ConversionError::io(
            format!("Cannot inspect output {}", output.display()),
            &e,
        )),
    }
}

fn classify_spawn_error(engine: &Path, err: &io::Error) -> ConversionError {
    match err.kind() {
        io::ErrorKind::NotFound | io::ErrorKind::PermissionDenied => {
            ConversionError::engine_unavailable(engine)
        }
        _ => ConversionError::io(format!("Failed to start {}", engine.display()), err),
    }
}

/// Keeps the last few lines the engine wrote to stderr.
struct DiagnosticTail {
    lines: VecDeque<String>,
    capacity: usize,
}

impl DiagnosticTail {
    fn new(capacity: usize) -> Self {
        Self {
            lines: VecDeque::with_capacity(capacity),
            capacity,
        }
    }

    fn record(&mut self, event: FfmpegEvent) {
        match event {
            FfmpegEvent::Log(_, line) | FfmpegEvent::Error(line) => {
                trace!(target: "nightcore::engine", "{line}");
                if self.lines.len() == self.capacity {
                    self.lines.pop_front();
                }
                self.lines.push_back(line);
            }
            _ => {}
        }
    }

    fn text(&self) -> String {
        self.lines.iter().map(String::as_str).collect::<Vec<_>>().join("\n")
    }
}

/// A successful conversion.
///
/// Holds the output until the caller has streamed or copied it; dropping the
/// value removes both the input and the output file.
#[derive(Debug)]
pub struct ConvertedAudio {
    input_path: PathBuf,
    output_path: PathBuf,
    size: u64,
    filter_graph: FilterGraph,
    elapsed: Duration,
}

impl ConvertedAudio {
    pub fn output_path(&self) -> &Path {
        &self.output_path
    }

    pub fn input_path(&self) -> &Path {
        &self.input_path
    }

    /// Output size in bytes.
    pub fn size(&self) -> u64 {
        self.size
    }

    pub fn filter_graph(&self) -> &FilterGraph {
        &self.filter_graph
    }

    /// Wall-clock time spent in `convert`.
    pub fn elapsed(&self) -> Duration {
        self.elapsed
    }

    /// Name to offer the requester for the download.
    pub fn download_name(&self) -> String {
        self.output_path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_default()
    }

    /// Opens the output for streaming.
    pub fn open(&self) -> io::Result<File> {
        File::open(&self.output_path)
    }

    /// Copies the output to `destination`, creating parent directories.
    /// Returns the number of bytes copied.
    pub fn persist_to(&self, destination: &Path) -> io::Result<u64> {
        if let Some(parent) = destination.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }
        let bytes = fs::copy(&self.output_path, destination)?;
        debug!(
            "Copied {} to {} ({} bytes)",
            self.output_path.display(),
            destination.display(),
            bytes
        );
        Ok(bytes)
    }
}

impl Drop for ConvertedAudio {
    fn drop(&mut self) {
        cleanup_paths(&[&self.input_path, &self.output_path]);
    }
}
