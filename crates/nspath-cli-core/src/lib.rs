//! Shared CLI core functionality
//!
//! Argument types, error handling, configuration loading and output
//! formatting shared by the nspath command-line tools. The flattening itself
//! lives in `nspath-core`; this crate only moves bytes in and paths out.

use clap::Parser;
use std::fs;
use std::io::Read;
use std::path::Path;

pub mod config;
pub mod formatters;

pub use config::{FlattenConfig, FlattenSettings, InputFormat};
pub use formatters::{format_namespace, OutputFormat};

/// Common CLI arguments shared across all nspath binaries
#[derive(Parser, Debug, Clone)]
pub struct CommonArgs {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Output format
    #[arg(short, long, value_enum, default_value = "lines", global = true)]
    pub format: OutputFormat,

    /// Output file (stdout if not specified)
    #[arg(short, long, global = true)]
    pub output: Option<String>,
}

/// Common result type for CLI operations
pub type CliResult<T> = Result<T, CliError>;

/// Common error type for CLI operations
#[derive(Debug, thiserror::Error)]
pub enum CliError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Namespace error: {0}")]
    Namespace(#[from] nspath_core::NamespaceError),

    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("File not found: {0}")]
    FileNotFound(String),

    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("Processing error: {0}")]
    Processing(String),
}

/// Marker for reading input from stdin instead of a file
pub const STDIN_MARKER: &str = "-";

/// Common CLI utilities
pub struct CliUtils;

impl CliUtils {
    /// Read a file and return its contents
    pub fn read_file<P: AsRef<Path>>(path: P) -> CliResult<String> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(CliError::FileNotFound(path.to_string_lossy().to_string()));
        }

        fs::read_to_string(path).map_err(CliError::Io)
    }

    /// Read raw bytes from a file, or from stdin when `input` is `-`
    pub fn read_input(input: &str) -> CliResult<Vec<u8>> {
        if input == STDIN_MARKER {
            let mut buf = Vec::new();
            std::io::stdin().read_to_end(&mut buf)?;
            return Ok(buf);
        }

        let path = Path::new(input);
        if !path.exists() {
            return Err(CliError::FileNotFound(input.to_string()));
        }
        fs::read(path).map_err(CliError::Io)
    }

    /// Write content to a file or stdout
    pub fn write_output(content: &str, output_path: Option<&str>) -> CliResult<()> {
        match output_path {
            Some(path) => {
                fs::write(path, content).map_err(CliError::Io)?;
                tracing::debug!("Output written to: {}", path);
            }
            None => {
                print!("{}", content);
            }
        }
        Ok(())
    }

    /// Pick the input format: explicit choice first, then file extension,
    /// then JSON
    pub fn resolve_format(input: &str, explicit: Option<InputFormat>) -> nspath_core::Format {
        if let Some(format) = explicit {
            return format.into();
        }

        Path::new(input)
            .extension()
            .and_then(|ext| ext.to_str())
            .and_then(nspath_core::Format::from_extension)
            .unwrap_or_default()
    }

    /// Validate file extension
    pub fn validate_file_extension<P: AsRef<Path>>(path: P, expected_exts: &[&str]) -> CliResult<()> {
        let path = path.as_ref();
        let ext = path.extension().and_then(|e| e.to_str()).unwrap_or("");

        if !expected_exts.contains(&ext) {
            return Err(CliError::InvalidArgument(format!(
                "Expected file extension: {}, got: {}",
                expected_exts.join(", "),
                ext
            )));
        }

        Ok(())
    }
}

/// Install the global tracing subscriber
///
/// Logs go to stderr so that stdout carries only the namespace. `--verbose`
/// forces DEBUG; otherwise `RUST_LOG` is honoured, defaulting to INFO.
#[cfg(feature = "std")]
pub fn init_tracing(verbose: bool) -> CliResult<()> {
    use tracing_subscriber::EnvFilter;

    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))
    };

    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .finish();
    tracing::subscriber::set_global_default(subscriber)
        .map_err(|e| CliError::Configuration(e.to_string()))
}

/// Macro for consistent error handling across CLI binaries
#[macro_export]
macro_rules! cli_error {
    ($($arg:tt)*) => {
        return Err($crate::CliError::Processing(format!($($arg)*)))
    };
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_read_missing_file() {
        let err = CliUtils::read_input("/definitely/not/here.json").unwrap_err();
        assert!(matches!(err, CliError::FileNotFound(_)));
    }

    #[test]
    fn test_read_input_bytes() {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(br#"{"a": 1}"#).unwrap();

        let data = CliUtils::read_input(file.path().to_str().unwrap()).unwrap();
        assert_eq!(data, br#"{"a": 1}"#);
    }

    #[test]
    fn test_resolve_format() {
        use nspath_core::Format;

        assert_eq!(CliUtils::resolve_format("conf.yml", None), Format::Yaml);
        assert_eq!(CliUtils::resolve_format("conf.toml", None), Format::Toml);
        assert_eq!(CliUtils::resolve_format("conf.txt", None), Format::Json);
        assert_eq!(CliUtils::resolve_format("-", None), Format::Json);
        assert_eq!(
            CliUtils::resolve_format("conf.yml", Some(InputFormat::Json)),
            Format::Json
        );
    }

    #[test]
    fn test_validate_file_extension() {
        assert!(CliUtils::validate_file_extension("a.toml", &["toml", "json"]).is_ok());
        assert!(CliUtils::validate_file_extension("a.ini", &["toml", "json"]).is_err());
    }

    #[test]
    fn test_write_output_to_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.txt");
        CliUtils::write_output("root/a\n", path.to_str()).unwrap();
        assert_eq!(CliUtils::read_file(&path).unwrap(), "root/a\n");
    }

    fn failing(flag: bool) -> CliResult<u8> {
        if flag {
            cli_error!("failed with {}", 42);
        }
        Ok(1)
    }

    #[test]
    fn test_cli_error_macro() {
        let err = failing(true).unwrap_err();
        assert_eq!(err.to_string(), "Processing error: failed with 42");
        assert_eq!(failing(false).unwrap(), 1);
    }
}
