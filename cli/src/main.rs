#![deny(missing_docs)]

//! # API Doc CLI
//!
//! Command Line Interface for the OpenAPI documentation builder.
//!
//! Supported Commands:
//! - `inspect`: Prints the full documentation model as JSON.
//! - `endpoints`: Prints one line per endpoint with its section and module.

use clap::{Parser, Subcommand};
use log::LevelFilter;

use crate::error::CliResult;

mod endpoints;
mod error;
mod inspect;
mod loader;

#[derive(Parser, Debug)]
#[clap(author, version, about = "OpenAPI documentation model builder")]
struct Cli {
    /// Log at debug level (overrides `RUST_LOG`).
    #[clap(short, long, global = true)]
    verbose: bool,

    #[clap(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Build the documentation model and print it as JSON.
    Inspect(inspect::InspectArgs),
    /// List every endpoint with the section and module it was grouped into.
    Endpoints(endpoints::EndpointsArgs),
}

fn init_logging(verbose: bool) {
    let mut builder =
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn"));
    if verbose {
        builder.filter_level(LevelFilter::Debug);
    }
    builder.init();
}

fn main() -> CliResult<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match &cli.command {
        Commands::Inspect(args) => inspect::execute(args)?,
        Commands::Endpoints(args) => endpoints::execute(args)?,
    }

    Ok(())
}
