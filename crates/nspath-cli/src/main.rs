//! CLI tool for structural namespace flattening
//!
//! This binary provides the `nspath` command-line interface: it reads a JSON,
//! TOML or YAML document and prints one slash-delimited path per leaf.

use anyhow::Result;
use clap::Parser;

mod cli;
mod commands;

use cli::{Cli, Commands};
use commands::{cmd_count, cmd_flatten};

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize tracing
    nspath_cli_core::init_tracing(cli.common.verbose)?;

    match &cli.command {
        Commands::Flatten(args) => cmd_flatten(args, &cli.common),
        Commands::Count(args) => cmd_count(args, &cli.common),
    }
}
