//! Output formatting for namespaces

use crate::{CliError, CliResult};
use serde::Serialize;

/// Output format options
#[derive(Clone, Copy, Debug, PartialEq, Eq, clap::ValueEnum, Default)]
pub enum OutputFormat {
    /// One path per line
    #[value(name = "lines")]
    #[default]
    Lines,
    /// JSON array of paths
    #[value(name = "json")]
    Json,
    /// TOML document with a `paths` array
    #[value(name = "toml")]
    Toml,
}

#[derive(Serialize)]
struct TomlNamespace<'a> {
    root: &'a str,
    count: usize,
    paths: &'a [String],
}

/// Render a namespace in the requested format
///
/// Every format ends with a newline; an empty namespace in `lines` format
/// renders as an empty string.
pub fn format_namespace(paths: &[String], root: &str, format: &OutputFormat) -> CliResult<String> {
    match format {
        OutputFormat::Lines => Ok(paths.iter().map(|p| format!("{}\n", p)).collect()),
        OutputFormat::Json => {
            let mut out = serde_json::to_string_pretty(paths).map_err(CliError::Json)?;
            out.push('\n');
            Ok(out)
        }
        OutputFormat::Toml => {
            let doc = TomlNamespace {
                root,
                count: paths.len(),
                paths,
            };
            toml::to_string_pretty(&doc).map_err(|e| CliError::Processing(e.to_string()))
        }
    }
}
