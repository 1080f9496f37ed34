//! CLI argument parsing using clap derive

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// procship - Build and deploy Snowflake stored procedures from source trees
#[derive(Parser, Debug)]
#[command(name = "procship")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// The command to run
    #[command(subcommand)]
    pub command: Commands,
}

/// Available commands
#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// Render CREATE PROCEDURE statements into a target directory
    ///
    /// Discovers procedure sources under the project directory, resolves
    /// each one against .procship.yml, and writes one .sql file per
    /// procedure.
    Build {
        /// Project directory containing .procship.yml
        #[arg(default_value = ".")]
        dir: PathBuf,

        /// Output directory for generated SQL, relative to the project dir
        #[arg(long, default_value = "target/procship")]
        target: PathBuf,

        /// Build only the named procedures (repeatable)
        #[arg(long = "only")]
        only: Vec<String>,

        /// Print rendered SQL to stdout
        #[arg(long)]
        show: bool,
    },

    /// Produce an ordered deployment script (role switches, creates, grants)
    Liftoff {
        /// Project directory containing .procship.yml
        #[arg(default_value = ".")]
        dir: PathBuf,

        /// Where to write the deployment script, relative to the project dir
        #[arg(long, default_value = "target/procship/liftoff.sql")]
        script: PathBuf,

        /// Deploy only the named procedures (repeatable)
        #[arg(long = "only")]
        only: Vec<String>,

        /// Print the deployment statements to stdout
        #[arg(long)]
        show: bool,
    },
}
