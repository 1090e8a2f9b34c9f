//! Core library for nightcore audio conversion using ffmpeg.
//!
//! This crate turns a set of effect parameters into an ffmpeg audio filter
//! graph, runs ffmpeg over a staged input file, and hands back the converted
//! output. Every input and output file a job touches is removed once the job
//! is finished with it, whether it succeeded or not.
//!
//! ## Usage Example
//!
//! ```rust,no_run
//! use nightcore_core::config::ConverterConfigBuilder;
//! use nightcore_core::{ConversionJob, ParameterOverrides, stage_file};
//! use std::path::Path;
//!
//! let config = ConverterConfigBuilder::new().build();
//! let engine = config.engine();
//!
//! let mut overrides = ParameterOverrides::new();
//! overrides.speed = Some(1.5);
//! overrides.echo = Some(25);
//!
//! let staged = stage_file(&config, Path::new("song.mp3")).unwrap();
//! let converted = ConversionJob::new(&engine, staged.input_path(), overrides.resolve())
//!     .unwrap()
//!     .convert()
//!     .unwrap();
//! converted.persist_to(Path::new("nightcore_song.mp3")).unwrap();
//! ```

pub mod config;
pub mod error;
pub mod external;
pub mod filter_graph;
pub mod job;
pub mod logging;
pub mod params;
pub mod temp_files;
pub mod upload;
pub mod utils;

// Re-exports for public API
pub use config::{ConverterConfig, ConverterConfigBuilder};
pub use error::{ConversionError, ConversionErrorKind, CoreError, CoreResult};
pub use external::{EngineProbe, EngineSpawner, ProcessSpawner, probe_engine};
pub use filter_graph::{FilterGraph, FilterStage, build_filter_graph};
pub use job::{ConversionJob, ConvertedAudio, JobState, derive_output_path};
pub use params::{ConversionParameters, ParameterOverrides};
pub use upload::{StagedUpload, is_allowed_file, sanitize_filename, stage_file, stage_upload};
pub use utils::{format_bytes, format_duration};
