// nightcore-cli/src/cli.rs
//
// Defines the command-line argument structures using clap.

use clap::{Args, Parser, Subcommand};
use nightcore_core::{ConversionParameters, CoreResult, ParameterOverrides};
use std::path::PathBuf;

// --- CLI Argument Definition ---

#[derive(Parser, Debug)]
#[command(
    author,
    version, // Reads from Cargo.toml via "cargo" feature in clap
    about = "Nightcore: audio effect converter",
    long_about = "Speeds up, pitch-shifts and colours audio files using ffmpeg via nightcore-core."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Enable debug output on the console
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Optional: Directory for log files (nothing is written to disk when omitted)
    #[arg(long, global = true, value_name = "LOG_DIR")]
    pub log_dir: Option<PathBuf>,

    /// ffmpeg binary to run, either a command name on PATH or a path
    #[arg(
        long,
        global = true,
        value_name = "PATH",
        env = "NIGHTCORE_ENGINE",
        default_value = nightcore_core::config::DEFAULT_ENGINE_PATH
    )]
    pub engine: PathBuf,

    /// Optional: Root directory for per-job staging (defaults to the system temp dir)
    #[arg(long, global = true, value_name = "DIR", env = "NIGHTCORE_STAGING_DIR")]
    pub staging_dir: Option<PathBuf>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Converts an audio file, writing nightcore_<name> next to it or to --output
    Convert(ConvertArgs),
    /// Reports whether the ffmpeg binary can be started
    Check,
    /// Prints the ffmpeg filter graph for a set of effect parameters
    Graph(EffectArgs),
}

/// Effect overrides shared by `convert` and `graph`.
///
/// Out-of-range values are clamped, never rejected.
#[derive(Args, Debug, Default, Clone)]
pub struct EffectArgs {
    /// Tempo ratio (1.0-2.0, default 1.3)
    #[arg(long, value_name = "RATIO", allow_negative_numbers = true)]
    pub speed: Option<f64>,

    /// Pitch shift in semitones (0-12, default 4)
    #[arg(long, value_name = "SEMITONES", allow_negative_numbers = true)]
    pub pitch: Option<i64>,

    /// Linear gain (0.0-2.0, default 1.0)
    #[arg(long, value_name = "GAIN", allow_negative_numbers = true)]
    pub volume: Option<f64>,

    /// Low shelf gain in dB (-10 to 10, default 0)
    #[arg(long, value_name = "DB", allow_negative_numbers = true)]
    pub bass_boost: Option<i64>,

    /// High shelf gain in dB (-10 to 10, default 0)
    #[arg(long, value_name = "DB", allow_negative_numbers = true)]
    pub treble: Option<i64>,

    /// Reverb intensity in percent (0-100, default 0)
    #[arg(long, value_name = "PERCENT", allow_negative_numbers = true)]
    pub reverb: Option<i64>,

    /// Echo intensity in percent (0-100, default 0)
    #[arg(long, value_name = "PERCENT", allow_negative_numbers = true)]
    pub echo: Option<i64>,

    /// Optional: JSON file with parameter overrides; flags given on the command line win
    #[arg(long, value_name = "FILE")]
    pub params: Option<PathBuf>,
}

impl EffectArgs {
    /// Overrides from the flags alone, ignoring `--params`.
    pub fn flag_overrides(&self) -> ParameterOverrides {
        ParameterOverrides {
            speed: self.speed,
            pitch: self.pitch,
            volume: self.volume,
            bass_boost: self.bass_boost,
            treble: self.treble,
            reverb: self.reverb,
            echo: self.echo,
        }
    }

    /// Overrides from `--params` (if any) with the flags layered on top.
    pub fn overrides(&self) -> CoreResult<ParameterOverrides> {
        let base = match &self.params {
            Some(path) => ParameterOverrides::from_json_file(path)?,
            None => ParameterOverrides::new(),
        };
        Ok(base.merge(self.flag_overrides()))
    }

    /// Resolved, clamped parameters.
    pub fn resolve(&self) -> CoreResult<ConversionParameters> {
        Ok(self.overrides()?.resolve())
    }
}

#[derive(Args, Debug)]
pub struct ConvertArgs {
    /// Audio file to convert (.mp3, .wav or .ogg)
    #[arg(required = true, value_name = "INPUT_FILE")]
    pub input: PathBuf,

    /// Optional: Output file or existing directory (defaults to nightcore_<name> beside the input)
    #[arg(short, long, value_name = "OUTPUT")]
    pub output: Option<PathBuf>,

    #[command(flatten)]
    pub effects: EffectArgs,

    /// Print a JSON report on stdout instead of a summary
    #[arg(long)]
    pub json: bool,

    /// Optional: Largest accepted input in MiB (default 100)
    #[arg(long, value_name = "MIB", value_parser = clap::value_parser!(u64).range(1..))]
    pub max_upload_mb: Option<u64>,
}
