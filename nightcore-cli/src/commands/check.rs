// nightcore-cli/src/commands/check.rs
//
// Probes the configured engine. Exits with the engine-unavailable code when
// it cannot be started, so scripts can gate on `nightcore check`.

use crate::error::CliResult;
use crate::output::{print_info, print_success};

use nightcore_core::{ConversionError, ConverterConfig, EngineSpawner};

/// Runs the `check` command.
pub fn run_check(config: &ConverterConfig) -> CliResult<()> {
    let engine = config.engine();
    let probe = engine.probe();
    if !probe.available {
        return Err(ConversionError::engine_unavailable(engine.engine_path()).into());
    }

    print_success(&format!("{} is available", engine.engine_path().display()));
    if let Some(version) = probe.version_line {
        print_info("Version", version);
    }
    Ok(())
}
