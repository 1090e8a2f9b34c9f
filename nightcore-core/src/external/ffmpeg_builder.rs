//! FFmpeg command builder for audio conversions
//!
//! Produces the engine invocation used by a conversion job:
//! `<engine> [-hide_banner] -i <input> -af <graph> -y <output>`.

use crate::filter_graph::FilterGraph;
use ffmpeg_sidecar::command::FfmpegCommand;
use std::path::Path;

/// Builder for creating engine commands with common configurations
pub struct EngineCommandBuilder {
    cmd: FfmpegCommand,
    hide_banner: bool,
}

impl EngineCommandBuilder {
    /// Creates a new builder for the engine binary at `engine_path`
    #[must_use]
    pub fn new(engine_path: &Path) -> Self {
        Self {
            cmd: FfmpegCommand::new_with_path(engine_path),
            hide_banner: true,
        }
    }

    /// Sets whether to hide the `FFmpeg` banner
    #[must_use]
    pub fn with_hide_banner(mut self, hide: bool) -> Self {
        self.hide_banner = hide;
        self
    }

    /// Builds the conversion command: input, audio filter graph, overwrite
    /// directive and the output path as the final positional argument.
    #[must_use]
    pub fn build_conversion(
        mut self,
        input: &Path,
        graph: &FilterGraph,
        output: &Path,
    ) -> FfmpegCommand {
        if self.hide_banner {
            self.cmd.arg("-hide_banner");
        }

        let descriptor = graph.to_string();
        self.cmd.input(input.to_string_lossy().as_ref());
        self.cmd.args(["-af", descriptor.as_str()]);
        self.cmd.arg("-y");
        self.cmd.output(output.to_string_lossy().as_ref());

        self.cmd
    }
}
