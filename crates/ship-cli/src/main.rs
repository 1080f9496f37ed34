//! procship CLI
//!
//! Builds and sequences Snowflake stored-procedure deployments from a
//! directory of procedure sources plus a hierarchical `.procship.yml`.

mod cli;
mod commands;
mod error;
mod project;

use clap::Parser;
use colored::Colorize;
use tracing::Level;
use tracing_subscriber::FmtSubscriber;

use cli::{Cli, Commands};
use error::Result;

fn main() {
    if let Err(e) = run() {
        eprintln!("{}: {}", "error".red().bold(), e);
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let cli = Cli::parse();

    // Setup tracing if verbose
    if cli.verbose {
        let subscriber = FmtSubscriber::builder()
            .with_max_level(Level::DEBUG)
            .with_target(true)
            .finish();
        tracing::subscriber::set_global_default(subscriber)
            .expect("Failed to set tracing subscriber");
        tracing::debug!("Verbose mode enabled");
    }

    match cli.command {
        Commands::Build {
            dir,
            target,
            only,
            show,
        } => commands::run_build(&dir, &target, &only, show),
        Commands::Liftoff {
            dir,
            script,
            only,
            show,
        } => commands::run_liftoff(&dir, &script, &only, show),
    }
}
