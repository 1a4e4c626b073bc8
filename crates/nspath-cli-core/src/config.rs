//! Flatten configuration
//!
//! Settings come from an optional config file (TOML or JSON) and are then
//! overridden by command-line flags.

use crate::{CliError, CliResult, CliUtils};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Default path prefix when neither the config file nor the CLI sets one
pub const DEFAULT_ROOT: &str = "root";

/// Input formats selectable on the command line or in a config file
#[derive(Clone, Copy, Debug, PartialEq, Eq, clap::ValueEnum, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InputFormat {
    Json,
    Toml,
    #[value(alias = "yml")]
    #[serde(alias = "yml")]
    Yaml,
}

impl From<InputFormat> for nspath_core::Format {
    fn from(format: InputFormat) -> Self {
        match format {
            InputFormat::Json => nspath_core::Format::Json,
            InputFormat::Toml => nspath_core::Format::Toml,
            InputFormat::Yaml => nspath_core::Format::Yaml,
        }
    }
}

/// Contents of a `--config` file; every key is optional
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct FlattenConfig {
    /// Prefix for every emitted path
    pub root: Option<String>,
    /// Maximum container nesting before the run fails
    pub max_depth: Option<usize>,
    /// Input format when it can't be inferred from the file name
    pub input_format: Option<InputFormat>,
    /// Sort paths lexicographically before output
    pub sort: bool,
    /// Drop repeated paths (only possible when keys contain `/`)
    pub dedup: bool,
}

impl FlattenConfig {
    /// Load configuration from a `.toml` or `.json` file
    pub fn load<P: AsRef<Path>>(path: P) -> CliResult<Self> {
        let path = path.as_ref();
        CliUtils::validate_file_extension(path, &["toml", "json"])?;
        let content = CliUtils::read_file(path)?;

        match path.extension().and_then(|e| e.to_str()) {
            Some("toml") => toml::from_str(&content).map_err(|e| {
                CliError::Configuration(format!("{}: {}", path.display(), e))
            }),
            _ => serde_json::from_str(&content).map_err(CliError::Json),
        }
    }

    /// Apply command-line overrides on top of the file values
    pub fn resolve(self, overrides: FlattenConfig) -> FlattenSettings {
        FlattenSettings {
            root: overrides
                .root
                .or(self.root)
                .unwrap_or_else(|| DEFAULT_ROOT.to_string()),
            max_depth: overrides.max_depth.or(self.max_depth),
            input_format: overrides.input_format.or(self.input_format),
            sort: overrides.sort || self.sort,
            dedup: overrides.dedup || self.dedup,
        }
    }
}

/// Fully resolved settings for one flatten run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FlattenSettings {
    pub root: String,
    pub max_depth: Option<usize>,
    pub input_format: Option<InputFormat>,
    pub sort: bool,
    pub dedup: bool,
}

impl Default for FlattenSettings {
    fn default() -> Self {
        FlattenConfig::default().resolve(FlattenConfig::default())
    }
}

impl FlattenSettings {
    /// Traversal configured from these settings
    pub fn flattener(&self) -> nspath_core::Flattener {
        let flattener = nspath_core::Flattener::new();
        match self.max_depth {
            Some(limit) => flattener.max_depth(limit),
            None => flattener,
        }
    }

    /// Apply sort/dedup to a finished namespace
    pub fn finish(&self, mut paths: Vec<String>) -> Vec<String> {
        if self.sort || self.dedup {
            paths.sort();
        }
        if self.dedup {
            paths.dedup();
        }
        paths
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::fs;

    #[test]
    fn test_defaults() {
        let settings = FlattenSettings::default();
        assert_eq!(settings.root, DEFAULT_ROOT);
        assert_eq!(settings.max_depth, None);
        assert!(!settings.sort);
        assert_eq!(settings.flattener().depth_limit(), None);
    }

    #[test]
    fn test_load_toml_config() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nspath.toml");
        fs::write(&path, "root = \"cfg\"\nmax_depth = 4\ninput_format = \"yml\"\nsort = true\n").unwrap();

        let config = FlattenConfig::load(&path).unwrap();
        assert_eq!(config.root.as_deref(), Some("cfg"));
        assert_eq!(config.max_depth, Some(4));
        assert_eq!(config.input_format, Some(InputFormat::Yaml));
        assert!(config.sort);
        assert!(!config.dedup);
    }

    #[test]
    fn test_load_json_config_rejects_unknown_keys() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nspath.json");
        fs::write(&path, r#"{"root": "x", "colour": "blue"}"#).unwrap();

        assert!(matches!(FlattenConfig::load(&path), Err(CliError::Json(_))));
    }

    #[test]
    fn test_load_rejects_other_extensions() {
        let err = FlattenConfig::load("nspath.ini").unwrap_err();
        assert!(matches!(err, CliError::InvalidArgument(_)));
    }

    #[test]
    fn test_cli_overrides_file() {
        let file = FlattenConfig {
            root: Some("file".into()),
            max_depth: Some(3),
            input_format: Some(InputFormat::Toml),
            sort: true,
            dedup: false,
        };
        let cli = FlattenConfig {
            root: Some("cli".into()),
            dedup: true,
            ..Default::default()
        };

        let settings = file.resolve(cli);
        assert_eq!(settings.root, "cli");
        assert_eq!(settings.max_depth, Some(3));
        assert_eq!(settings.input_format, Some(InputFormat::Toml));
        assert!(settings.sort);
        assert!(settings.dedup);
        assert_eq!(settings.flattener().depth_limit(), Some(3));
    }

    #[test]
    fn test_finish_sorts_and_dedups() {
        let settings = FlattenSettings {
            dedup: true,
            ..Default::default()
        };
        let paths = vec!["r/b".to_string(), "r/a".to_string(), "r/b".to_string()];
        assert_eq!(settings.finish(paths), ["r/a", "r/b"]);

        let unsorted = FlattenSettings::default();
        let paths = vec!["r/b".to_string(), "r/a".to_string()];
        assert_eq!(unsorted.finish(paths), ["r/b", "r/a"]);
    }
}
