//! Liftoff command: produce an ordered deployment script

use std::fs;
use std::path::Path;

use colored::Colorize;

use ship_deploy::{Deployer, SqlScript};
use ship_render::Renderer;

use crate::error::{CliError, Result};
use crate::project::{Project, discover, filter_only};

use super::{display_name, prepare};

/// Run the liftoff command.
///
/// Renders every selected procedure and sequences its deployment statements
/// (role switch, create, grants) into one script. Per-procedure failures are
/// reported and skipped; the command fails afterwards if anything failed.
pub fn run_liftoff(dir: &Path, script: &Path, only: &[String], show: bool) -> Result<()> {
    println!("{} procship lifting off!", "=>".blue().bold());

    let project = Project::load(dir)?;
    let renderer = Renderer::new()?;
    let deployer = Deployer::new(project.snowflake.role.clone());

    let script_path = dir.join(script);
    let skip = script_path.parent().unwrap_or(dir).to_path_buf();
    if let Some(parent) = script_path.parent() {
        fs::create_dir_all(parent)?;
    }

    let files = discover(&project.root, &skip);
    let (files, not_found) = filter_only(files, only);
    if !not_found.is_empty() {
        println!(
            "{} Could not find procedure(s): {}",
            "warning".yellow().bold(),
            not_found.join(", ")
        );
    }

    let mut sql_script = SqlScript::new();
    let mut failed = 0usize;
    for file in &files {
        match prepare(&project, &renderer, file) {
            Ok(rendered) => {
                deployer.deploy(&rendered, &mut sql_script)?;
                let msg = format!(
                    "launched into schema {}",
                    format!("{}.{}", rendered.database, rendered.schema).cyan()
                );
                println!("{} {msg}", rendered.name.green().bold());
                if show {
                    println!("{}", rendered.sql);
                }
            }
            Err(e) => {
                failed += 1;
                println!(
                    "{} {}",
                    display_name(file).red().bold(),
                    "could not be launched"
                );
                eprintln!("{e}");
            }
        }
    }

    fs::write(&script_path, sql_script.render())?;
    println!(
        "Deployment script written to {}",
        script_path.display().to_string().cyan()
    );

    if failed > 0 {
        return Err(CliError::user(format!(
            "{failed} procedure(s) failed to launch"
        )));
    }
    Ok(())
}
