// nightcore-cli/src/lib.rs
//
// Library portion of the Nightcore CLI application.
// Contains argument definitions and command logic.

pub mod cli;
pub mod commands;
pub mod config;
pub mod error;
pub mod logging;
pub mod output;

// Re-export items needed by the binary or integration tests
pub use cli::{Cli, Commands, ConvertArgs, EffectArgs};
pub use commands::check::run_check;
pub use commands::convert::run_convert;
pub use commands::graph::run_graph;
pub use config::build_config;
pub use error::{CliResult, exit_code};
