// nightcore-cli/src/commands/graph.rs
//
// Prints the filter graph descriptor for a parameter set without touching
// any audio. Only the descriptor goes to stdout, so the output can be pasted
// straight into an ffmpeg `-af` argument.

use crate::cli::EffectArgs;
use crate::error::CliResult;

use log::debug;
use nightcore_core::FilterGraph;

/// Runs the `graph` command.
pub fn run_graph(effects: &EffectArgs) -> CliResult<()> {
    let params = effects.resolve()?;
    let graph = FilterGraph::build(&params);
    debug!("{} stage(s) for {:?}", graph.len(), params);
    println!("{graph}");
    Ok(())
}
