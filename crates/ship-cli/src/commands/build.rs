//! Build command: render procedures into a target directory

use std::fs;
use std::path::Path;

use colored::Colorize;

use ship_render::Renderer;

use crate::error::{CliError, Result};
use crate::project::{Project, discover, filter_only};

use super::{display_name, prepare};

/// Run the build command.
///
/// Per-procedure failures are reported and counted but do not stop the run;
/// the command fails afterwards if anything failed.
pub fn run_build(dir: &Path, target: &Path, only: &[String], show: bool) -> Result<()> {
    println!("{} Building procship project...", "=>".blue().bold());

    let project = Project::load(dir)?;
    let renderer = Renderer::new()?;

    let out_dir = dir.join(target);
    fs::create_dir_all(&out_dir)?;

    let files = discover(&project.root, &out_dir);
    let (files, not_found) = filter_only(files, only);
    if !not_found.is_empty() {
        println!(
            "{} Could not find procedure(s): {}",
            "warning".yellow().bold(),
            not_found.join(", ")
        );
    }

    let mut failed = 0usize;
    for file in &files {
        match build_one(&project, &renderer, file, &out_dir) {
            Ok(sql) => {
                println!(
                    "{} {}",
                    display_name(file).green().bold(),
                    "successfully built"
                );
                if show {
                    println!("{sql}");
                }
            }
            Err(e) => {
                failed += 1;
                println!(
                    "{} {}",
                    display_name(file).red().bold(),
                    "could not be built"
                );
                eprintln!("{e}");
            }
        }
    }

    if failed > 0 {
        return Err(CliError::user(format!(
            "{failed} procedure(s) failed to build"
        )));
    }
    Ok(())
}

fn build_one(
    project: &Project,
    renderer: &Renderer,
    file: &Path,
    out_dir: &Path,
) -> Result<String> {
    let rendered = prepare(project, renderer, file)?;
    let out_path = out_dir.join(format!("{}.sql", rendered.name));
    fs::write(&out_path, &rendered.sql)?;
    tracing::debug!(procedure = rendered.name, path = %out_path.display(), "built");
    Ok(rendered.sql)
}
