// ============================================================================
// nightcore-cli/src/commands/convert.rs
// ============================================================================
//
// CONVERT COMMAND: One File In, One Nightcore File Out
//
// The input is never handed to the engine directly. It is first copied into
// a per-job staging directory, converted there, and the result is copied to
// the destination. The staged copy and the engine output are removed when
// the command finishes, so the user's original file is left untouched.

use crate::cli::ConvertArgs;
use crate::error::{CliErrorContext, CliResult};
use crate::output::{print_heading, print_info, print_success};

use nightcore_core::job::OUTPUT_PREFIX;
use nightcore_core::{
    ConversionError, ConversionJob, ConvertedAudio, ConverterConfig, CoreError, format_bytes,
    format_duration, stage_file,
};

use log::{debug, info};
use serde_json::{Value, json};
use std::ffi::OsString;
use std::path::{Path, PathBuf};

/// Work out where the converted file should be written.
///
/// Without `--output` it lands beside the input as `nightcore_<name>`. An
/// existing directory receives `nightcore_<name>`; anything else is taken as
/// the exact output file path.
pub fn resolve_destination(input: &Path, output: Option<&Path>) -> CliResult<PathBuf> {
    let file_name = input
        .file_name()
        .cli_with_context(|| format!("Input path '{}' has no file name", input.display()))?;
    let mut output_name = OsString::from(OUTPUT_PREFIX);
    output_name.push(file_name);

    Ok(match output {
        Some(dir) if dir.is_dir() => dir.join(output_name),
        Some(path) => path.to_path_buf(),
        None => input.with_file_name(output_name),
    })
}

/// Runs the `convert` command.
pub fn run_convert(config: &ConverterConfig, args: &ConvertArgs) -> CliResult<()> {
    let input = args.input.canonicalize().map_err(|e| {
        CoreError::PathError(format!(
            "Invalid input path '{}': {}",
            args.input.display(),
            e
        ))
    })?;
    if !input.is_file() {
        return Err(CoreError::PathError(format!(
            "Input path '{}' is not a file",
            input.display()
        )));
    }

    let params = args.effects.resolve()?;
    let destination = resolve_destination(&input, args.output.as_deref())?;
    debug!("Resolved parameters: {params:?}");
    info!("Converting {} -> {}", input.display(), destination.display());

    let staged = stage_file(config, &input)?;
    let engine = config.engine();
    let converted = ConversionJob::new(&engine, staged.input_path(), params)?
        .with_hide_banner(config.hide_banner)
        .convert()?;

    let bytes = converted.persist_to(&destination).map_err(|e| {
        ConversionError::io(format!("Failed to write {}", destination.display()), &e)
    })?;

    if args.json {
        println!("{}", success_report(&input, &destination, &converted, bytes));
    } else {
        print_summary(&input, &destination, &converted, bytes);
    }
    Ok(())
}

fn print_summary(input: &Path, destination: &Path, converted: &ConvertedAudio, bytes: u64) {
    print_heading("Conversion complete");
    print_info("Input", input.display());
    print_info("Output", destination.display());
    print_info("Size", format_bytes(bytes));
    print_info("Filters", converted.filter_graph());
    print_info("Elapsed", format_duration(converted.elapsed()));
    print_success(&format!("Wrote {}", destination.display()));
}

/// JSON report for a successful conversion.
pub fn success_report(
    input: &Path,
    destination: &Path,
    converted: &ConvertedAudio,
    bytes: u64,
) -> Value {
    json!({
        "status": "ok",
        "input": input.display().to_string(),
        "output": destination.display().to_string(),
        "bytes": bytes,
        "filterGraph": converted.filter_graph().to_string(),
        "elapsedMs": u64::try_from(converted.elapsed().as_millis()).unwrap_or(u64::MAX),
    })
}

/// JSON report for a failed command. `kind` is null for errors that did not
/// come out of a conversion job.
pub fn error_report(error: &CoreError) -> Value {
    json!({
        "status": "error",
        "kind": error.conversion_kind().map(|kind| kind.as_str()),
        "message": error.to_string(),
    })
}
