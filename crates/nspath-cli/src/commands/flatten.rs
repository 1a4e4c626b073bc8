//! Flatten command implementations
//!
//! Reads a document, turns it into a namespace and writes it out in the
//! requested format.

use crate::cli::FlattenArgs;
use anyhow::{Context, Result};
use nspath_cli_core::{
    format_namespace, CliUtils, CommonArgs, FlattenConfig, FlattenSettings,
};
use tracing::{debug, info};

/// Merge config file values with command-line flags
pub fn load_settings(args: &FlattenArgs) -> Result<FlattenSettings> {
    let file = match &args.config {
        Some(path) => {
            debug!("Loading config from {}", path.display());
            FlattenConfig::load(path)
                .with_context(|| format!("failed to load config {}", path.display()))?
        }
        None => FlattenConfig::default(),
    };
    Ok(file.resolve(args.overrides()))
}

/// Flatten `data` into a finished (sorted/deduplicated as configured) namespace
pub fn build_namespace(data: &[u8], input: &str, settings: &FlattenSettings) -> Result<Vec<String>> {
    let format = CliUtils::resolve_format(input, settings.input_format);
    debug!("Parsing {} as {}", input, format);

    let value = format
        .parse(data)
        .with_context(|| format!("failed to parse {} as {}", input, format))?;

    let mut paths = Vec::new();
    settings
        .flattener()
        .flatten(&value, &settings.root, &mut paths)
        .with_context(|| format!("failed to flatten {}", input))?;

    Ok(settings.finish(paths))
}

/// Execute flatten command
pub fn cmd_flatten(args: &FlattenArgs, common: &CommonArgs) -> Result<()> {
    let settings = load_settings(args)?;
    info!("Flattening {} under '{}'", args.input, settings.root);

    let data = CliUtils::read_input(&args.input)?;
    let paths = build_namespace(&data, &args.input, &settings)?;

    let rendered = format_namespace(&paths, &settings.root, &common.format)?;
    CliUtils::write_output(&rendered, common.output.as_deref())?;

    info!("Emitted {} paths", paths.len());
    Ok(())
}

/// Execute count command
pub fn cmd_count(args: &FlattenArgs, common: &CommonArgs) -> Result<()> {
    let settings = load_settings(args)?;
    let data = CliUtils::read_input(&args.input)?;
    let paths = build_namespace(&data, &args.input, &settings)?;

    CliUtils::write_output(&format!("{}\n", paths.len()), common.output.as_deref())?;
    Ok(())
}
