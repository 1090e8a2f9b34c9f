//! Conversion parameters.
//!
//! Every knob is clamped into its documented range when a
//! `ConversionParameters` value is constructed. Out-of-range input is never
//! rejected, so any combination of overrides produces a usable parameter set.

use crate::error::{CoreError, CoreResult};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Default tempo ratio.
pub const DEFAULT_SPEED: f64 = 1.3;
pub const MIN_SPEED: f64 = 1.0;
pub const MAX_SPEED: f64 = 2.0;

/// Default pitch shift in semitones.
pub const DEFAULT_PITCH: u32 = 4;
pub const MIN_PITCH: u32 = 0;
pub const MAX_PITCH: u32 = 12;

/// Default linear gain.
pub const DEFAULT_VOLUME: f64 = 1.0;
pub const MIN_VOLUME: f64 = 0.0;
pub const MAX_VOLUME: f64 = 2.0;

/// Shelf gains in dB, shared by bass and treble.
pub const DEFAULT_SHELF_GAIN_DB: i32 = 0;
pub const MIN_SHELF_GAIN_DB: i32 = -10;
pub const MAX_SHELF_GAIN_DB: i32 = 10;

/// Reverb and echo intensities in percent.
pub const DEFAULT_INTENSITY: u32 = 0;
pub const MIN_INTENSITY: u32 = 0;
pub const MAX_INTENSITY: u32 = 100;

/// A fully resolved, range-checked set of effect parameters.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ConversionParameters {
    speed: f64,
    pitch: u32,
    volume: f64,
    bass_boost: i32,
    treble: i32,
    reverb: u32,
    echo: u32,
}

impl Default for ConversionParameters {
    fn default() -> Self {
        Self {
            speed: DEFAULT_SPEED,
            pitch: DEFAULT_PITCH,
            volume: DEFAULT_VOLUME,
            bass_boost: DEFAULT_SHELF_GAIN_DB,
            treble: DEFAULT_SHELF_GAIN_DB,
            reverb: DEFAULT_INTENSITY,
            echo: DEFAULT_INTENSITY,
        }
    }
}

impl ConversionParameters {
    /// Builds a parameter set, clamping each value into its range.
    ///
    /// A NaN ratio or gain falls back to the field default.
    pub fn new(
        speed: f64,
        pitch: i64,
        volume: f64,
        bass_boost: i64,
        treble: i64,
        reverb: i64,
        echo: i64,
    ) -> Self {
        Self {
            speed: clamp_float(speed, MIN_SPEED, MAX_SPEED, DEFAULT_SPEED),
            pitch: clamp_int(pitch, MIN_PITCH, MAX_PITCH),
            volume: clamp_float(volume, MIN_VOLUME, MAX_VOLUME, DEFAULT_VOLUME),
            bass_boost: clamp_int(bass_boost, MIN_SHELF_GAIN_DB, MAX_SHELF_GAIN_DB),
            treble: clamp_int(treble, MIN_SHELF_GAIN_DB, MAX_SHELF_GAIN_DB),
            reverb: clamp_int(reverb, MIN_INTENSITY, MAX_INTENSITY),
            echo: clamp_int(echo, MIN_INTENSITY, MAX_INTENSITY),
        }
    }

    pub fn speed(&self) -> f64 {
        self.speed
    }

    pub fn pitch(&self) -> u32 {
        self.pitch
    }

    pub fn volume(&self) -> f64 {
        self.volume
    }

    pub fn bass_boost(&self) -> i32 {
        self.bass_boost
    }

    pub fn treble(&self) -> i32 {
        self.treble
    }

    pub fn reverb(&self) -> u32 {
        self.reverb
    }

    pub fn echo(&self) -> u32 {
        self.echo
    }

    /// Tempo multiplier handed to the pitch/tempo stage.
    pub fn tempo_factor(&self) -> f64 {
        self.speed
    }

    /// Frequency ratio for the configured semitone shift: `2^(pitch/12)`.
    pub fn pitch_scale(&self) -> f64 {
        2f64.powf(f64::from(self.pitch) / 12.0)
    }
}

fn clamp_float(value: f64, min: f64, max: f64, fallback: f64) -> f64 {
    if value.is_nan() {
        fallback
    } else {
        value.clamp(min, max)
    }
}

/// Clamps a wide caller-supplied integer into a field's narrower range.
fn clamp_int<T>(value: i64, min: T, max: T) -> T
where
    T: Copy + Into<i64> + TryFrom<i64>,
{
    T::try_from(value.clamp(min.into(), max.into())).unwrap_or(min)
}

/// Partially specified parameters, as supplied by a caller.
///
/// Absent fields take their defaults when resolved. JSON keys use camelCase
/// (`bassBoost`), matching the form fields of the upload endpoint.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ParameterOverrides {
    pub speed: Option<f64>,
    pub pitch: Option<i64>,
    pub volume: Option<f64>,
    pub bass_boost: Option<i64>,
    pub treble: Option<i64>,
    pub reverb: Option<i64>,
    pub echo: Option<i64>,
}

impl ParameterOverrides {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parses overrides from a JSON object.
    pub fn from_json_str(json: &str) -> CoreResult<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Reads overrides from a JSON file.
    pub fn from_json_file(path: &Path) -> CoreResult<Self> {
        let contents = std::fs::read_to_string(path).map_err(|e| {
            CoreError::PathError(format!(
                "Failed to read parameter file '{}': {}",
                path.display(),
                e
            ))
        })?;
        serde_json::from_str(&contents).map_err(|source| CoreError::ParameterFile {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Layers `other` on top of `self`; fields set in `other` win.
    #[must_use]
    pub fn merge(self, other: Self) -> Self {
        Self {
            speed: other.speed.or(self.speed),
            pitch: other.pitch.or(self.pitch),
            volume: other.volume.or(self.volume),
            bass_boost: other.bass_boost.or(self.bass_boost),
            treble: other.treble.or(self.treble),
            reverb: other.reverb.or(self.reverb),
            echo: other.echo.or(self.echo),
        }
    }

    /// Resolves the overrides against the defaults and clamps the result.
    pub fn resolve(&self) -> ConversionParameters {
        let defaults = ConversionParameters::default();
        ConversionParameters {
            speed: self.speed.map_or(defaults.speed, |v| {
                clamp_float(v, MIN_SPEED, MAX_SPEED, DEFAULT_SPEED)
            }),
            pitch: self
                .pitch
                .map_or(defaults.pitch, |v| clamp_int(v, MIN_PITCH, MAX_PITCH)),
            volume: self.volume.map_or(defaults.volume, |v| {
                clamp_float(v, MIN_VOLUME, MAX_VOLUME, DEFAULT_VOLUME)
            }),
            bass_boost: self.bass_boost.map_or(defaults.bass_boost, |v| {
                clamp_int(v, MIN_SHELF_GAIN_DB, MAX_SHELF_GAIN_DB)
            }),
            treble: self.treble.map_or(defaults.treble, |v| {
                clamp_int(v, MIN_SHELF_GAIN_DB, MAX_SHELF_GAIN_DB)
            }),
            reverb: self
                .reverb
                .map_or(defaults.reverb, |v| clamp_int(v, MIN_INTENSITY, MAX_INTENSITY)),
            echo: self
                .echo
                .map_or(defaults.echo, |v| clamp_int(v, MIN_INTENSITY, MAX_INTENSITY)),
        }
    }
}

impl From<ParameterOverrides> for ConversionParameters {
    fn from(overrides: ParameterOverrides) -> Self {
        overrides.resolve()
    }
}
