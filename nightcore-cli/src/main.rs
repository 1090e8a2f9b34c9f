// nightcore-cli/src/main.rs
//
// Entry point for the nightcore binary.
//
// Responsibilities include:
// - Parsing command-line arguments.
// - Setting up logging to the console and, with --log-dir, to a file.
// - Building the nightcore-core configuration.
// - Dispatching to the selected command.
// - Mapping errors to process exit codes.

use clap::Parser;
use log::debug;
use nightcore_cli::commands::convert::error_report;
use nightcore_cli::logging::{console_level, log_file_path};
use nightcore_cli::output::print_error;
use nightcore_cli::{
    Cli, CliResult, Commands, build_config, exit_code, run_check, run_convert, run_graph,
};
use nightcore_core::logging::setup_logging;
use std::process;

fn run(cli: &Cli) -> CliResult<()> {
    let config = build_config(cli)?;
    debug!("Configuration: {config:?}");

    match &cli.command {
        Commands::Convert(args) => run_convert(&config, args),
        Commands::Check => run_check(&config),
        Commands::Graph(effects) => run_graph(effects),
    }
}

fn main() {
    let cli = Cli::parse();

    let log_file = cli.log_dir.as_deref().map(log_file_path);
    if let Err(e) = setup_logging(console_level(cli.verbose), log_file.as_deref()) {
        eprintln!("Warning: failed to initialize logging: {e:#}");
    }

    if let Err(err) = run(&cli) {
        if matches!(&cli.command, Commands::Convert(args) if args.json) {
            println!("{}", error_report(&err));
        }
        print_error(&err.to_string());
        process::exit(exit_code(&err));
    }
}
