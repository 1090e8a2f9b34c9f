//! Audio filter graph compiler.
//!
//! Turns a `ConversionParameters` value into the `-af` descriptor handed to
//! ffmpeg. Compilation is pure: the same parameters always produce the same
//! graph, and the graph always holds at least one stage.

use crate::params::ConversionParameters;
use std::fmt;

/// Separator between stages in the rendered descriptor.
pub const STAGE_SEPARATOR: &str = ",";

/// Centre frequency of the low shelf, in Hz.
pub const BASS_SHELF_FREQUENCY_HZ: u32 = 100;

/// Centre frequency of the high shelf, in Hz.
pub const TREBLE_SHELF_FREQUENCY_HZ: u32 = 10_000;

/// Width shared by both shelf stages.
pub const SHELF_WIDTH: f64 = 0.5;

/// Reverb: input gain, output gain, delay at 100% intensity, decay.
pub const REVERB_IN_GAIN: f64 = 0.8;
pub const REVERB_OUT_GAIN: f64 = 0.88;
pub const REVERB_MAX_DELAY: f64 = 60.0;
pub const REVERB_DECAY: f64 = 0.4;

/// Echo: input gain, output gain, delay divisor, decay.
pub const ECHO_IN_GAIN: f64 = 0.8;
pub const ECHO_OUT_GAIN: f64 = 0.9;
pub const ECHO_DELAY_DIVISOR: f64 = 1000.0;
pub const ECHO_DECAY: f64 = 0.3;

const NEUTRAL_SPEED: f64 = 1.0;
const NEUTRAL_VOLUME: f64 = 1.0;

/// One stage of the filter pipeline.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FilterStage {
    /// Combined tempo change and pitch shift.
    PitchTempo { tempo: f64, pitch_scale: f64 },
    Volume { gain: f64 },
    BassShelf { gain_db: i32 },
    TrebleShelf { gain_db: i32 },
    Reverb { delay: f64 },
    Echo { delay: f64 },
    /// No-op stage used when nothing else applies.
    Passthrough,
}

impl FilterStage {
    /// The ffmpeg filter name used for this stage.
    pub const fn filter_name(&self) -> &'static str {
        match self {
            FilterStage::PitchTempo { .. } => "rubberband",
            FilterStage::Volume { .. } => "volume",
            FilterStage::BassShelf { .. } => "bass",
            FilterStage::TrebleShelf { .. } => "treble",
            FilterStage::Reverb { .. } | FilterStage::Echo { .. } => "aecho",
            FilterStage::Passthrough => "anull",
        }
    }
}

impl fmt::Display for FilterStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = self.filter_name();
        match *self {
            FilterStage::PitchTempo { tempo, pitch_scale } => write!(
                f,
                "{name}=tempo={}:pitch={}",
                format_number(tempo),
                format_number(pitch_scale)
            ),
            FilterStage::Volume { gain } => write!(f, "{name}={}", format_number(gain)),
            FilterStage::BassShelf { gain_db } => write!(
                f,
                "{name}=g={gain_db}:f={BASS_SHELF_FREQUENCY_HZ}:w={}",
                format_number(SHELF_WIDTH)
            ),
            FilterStage::TrebleShelf { gain_db } => write!(
                f,
                "{name}=g={gain_db}:f={TREBLE_SHELF_FREQUENCY_HZ}:w={}",
                format_number(SHELF_WIDTH)
            ),
            FilterStage::Reverb { delay } => write!(
                f,
                "{name}={}:{}:{}:{}",
                format_number(REVERB_IN_GAIN),
                format_number(REVERB_OUT_GAIN),
                format_number(delay),
                format_number(REVERB_DECAY)
            ),
            FilterStage::Echo { delay } => write!(
                f,
                "{name}={}:{}:{}:{}",
                format_number(ECHO_IN_GAIN),
                format_number(ECHO_OUT_GAIN),
                format_number(delay),
                format_number(ECHO_DECAY)
            ),
            FilterStage::Passthrough => f.write_str(name),
        }
    }
}

/// Renders a factor with at most six decimals and no trailing zeros.
fn format_number(value: f64) -> String {
    let fixed = format!("{value:.6}");
    let trimmed = fixed.trim_end_matches('0').trim_end_matches('.');
    if trimmed == "-0" {
        "0".to_string()
    } else {
        trimmed.to_string()
    }
}

/// Builder for constructing audio filter chains
#[derive(Debug, Default)]
pub struct AudioFilterChain {
    stages: Vec<FilterStage>,
}

impl AudioFilterChain {
    /// Creates a new empty filter chain
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a stage to the chain
    #[must_use]
    pub fn add_stage(mut self, stage: FilterStage) -> Self {
        self.stages.push(stage);
        self
    }

    /// Finishes the chain, falling back to a passthrough stage when empty.
    #[must_use]
    pub fn build(self) -> FilterGraph {
        let stages = if self.stages.is_empty() {
            vec![FilterStage::Passthrough]
        } else {
            self.stages
        };
        FilterGraph { stages }
    }
}

/// An ordered, non-empty list of filter stages.
#[derive(Debug, Clone, PartialEq)]
pub struct FilterGraph {
    stages: Vec<FilterStage>,
}

impl FilterGraph {
    /// Compiles the parameters into a graph.
    ///
    /// Stage order is fixed: pitch/tempo, volume, equalizer (bass then
    /// treble), reverb, echo. Each group is present only when its
    /// parameters differ from neutral.
    pub fn build(params: &ConversionParameters) -> Self {
        let mut chain = AudioFilterChain::new();

        if params.speed() != NEUTRAL_SPEED || params.pitch() != 0 {
            chain = chain.add_stage(FilterStage::PitchTempo {
                tempo: params.tempo_factor(),
                pitch_scale: params.pitch_scale(),
            });
        }

        if params.volume() != NEUTRAL_VOLUME {
            chain = chain.add_stage(FilterStage::Volume {
                gain: params.volume(),
            });
        }

        if params.bass_boost() != 0 || params.treble() != 0 {
            chain = chain
                .add_stage(FilterStage::BassShelf {
                    gain_db: params.bass_boost(),
                })
                .add_stage(FilterStage::TrebleShelf {
                    gain_db: params.treble(),
                });
        }

        if params.reverb() > 0 {
            chain = chain.add_stage(FilterStage::Reverb {
                delay: REVERB_MAX_DELAY * f64::from(params.reverb()) / 100.0,
            });
        }

        if params.echo() > 0 {
            chain = chain.add_stage(FilterStage::Echo {
                delay: f64::from(params.echo()) / ECHO_DELAY_DIVISOR,
            });
        }

        chain.build()
    }

    pub fn stages(&self) -> &[FilterStage] {
        &self.stages
    }

    pub fn len(&self) -> usize {
        self.stages.len()
    }

    /// Always false; kept for API symmetry with `len`.
    pub fn is_empty(&self) -> bool {
        self.stages.is_empty()
    }

    /// True when the graph only forwards audio unchanged.
    pub fn is_passthrough(&self) -> bool {
        self.stages == [FilterStage::Passthrough]
    }
}

impl fmt::Display for FilterGraph {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, stage) in self.stages.iter().enumerate() {
            if i > 0 {
                f.write_str(STAGE_SEPARATOR)?;
            }
            write!(f, "{stage}")?;
        }
        Ok(())
    }
}

/// Compiles the parameters straight to the descriptor string.
pub fn build_filter_graph(params: &ConversionParameters) -> String {
    FilterGraph::build(params).to_string()
}
