// nightcore-cli/src/config.rs
//
// Turns the parsed command line into a `ConverterConfig` for nightcore-core.

use crate::cli::{Cli, Commands};
use crate::error::CliResult;

use nightcore_core::{ConverterConfig, ConverterConfigBuilder};

const BYTES_PER_MIB: u64 = 1024 * 1024;

/// Builds and validates the core configuration for this run.
pub fn build_config(cli: &Cli) -> CliResult<ConverterConfig> {
    let mut builder = ConverterConfigBuilder::new().engine_path(cli.engine.clone());

    if let Some(staging_dir) = &cli.staging_dir {
        builder = builder.staging_dir(staging_dir.clone());
    }

    if let Commands::Convert(args) = &cli.command {
        if let Some(mib) = args.max_upload_mb {
            builder = builder.max_upload_bytes(mib.saturating_mul(BYTES_PER_MIB));
        }
    }

    let config = builder.build();
    config.validate()?;
    Ok(config)
}
