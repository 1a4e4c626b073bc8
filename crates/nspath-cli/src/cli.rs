//! Command-line interface definitions for the nspath tool
//!
//! This module contains all the clap-related structures for argument parsing
//! and command definitions.

use clap::{Args, Parser, Subcommand};
use nspath_cli_core::{CommonArgs, FlattenConfig, InputFormat};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "nspath")]
#[command(about = "Flatten nested documents into slash-delimited namespace paths")]
#[command(version)]
pub struct Cli {
    #[command(flatten)]
    pub common: CommonArgs,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Print one path per leaf of a document
    Flatten(FlattenArgs),

    /// Print the number of leaves in a document
    Count(FlattenArgs),
}

#[derive(Args, Debug, Clone)]
pub struct FlattenArgs {
    /// Input file, or '-' for stdin
    #[arg(value_name = "INPUT", default_value = "-")]
    pub input: String,

    /// Prefix for every path [default: root]
    #[arg(short, long)]
    pub root: Option<String>,

    /// Input format (inferred from the file extension when omitted)
    #[arg(short = 'i', long, value_enum)]
    pub input_format: Option<InputFormat>,

    /// Fail if containers nest deeper than this
    #[arg(long)]
    pub max_depth: Option<usize>,

    /// Sort paths before output
    #[arg(long)]
    pub sort: bool,

    /// Drop repeated paths (implies --sort)
    #[arg(long)]
    pub dedup: bool,

    /// Config file (.toml or .json) providing defaults for these options
    #[arg(short, long)]
    pub config: Option<PathBuf>,
}

impl FlattenArgs {
    /// Flags given on the command line, in config-file shape
    pub fn overrides(&self) -> FlattenConfig {
        FlattenConfig {
            root: self.root.clone(),
            max_depth: self.max_depth,
            input_format: self.input_format,
            sort: self.sort,
            dedup: self.dedup,
        }
    }
}
