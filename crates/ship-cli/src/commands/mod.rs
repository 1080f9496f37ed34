//! Command implementations

mod build;
mod liftoff;

pub use build::run_build;
pub use liftoff::run_liftoff;

use std::fs;
use std::path::Path;

use serde_json::json;
use ship_render::{RenderedProcedure, Renderer};

use crate::error::Result;
use crate::project::Project;

/// Run one procedure file through the whole pipeline:
/// path mapping -> frontmatter extraction -> resolution -> validation ->
/// rendering.
///
/// Errors identify the procedure via the `Err` side's message; the caller
/// decides whether to keep going with other procedures.
pub(crate) fn prepare(
    project: &Project,
    renderer: &Renderer,
    path: &Path,
) -> Result<RenderedProcedure> {
    let segments = ship_config::to_segments(path, &project.root)?;
    // to_segments guarantees at least one segment.
    let name = segments.last().cloned().unwrap_or_default();

    let source = fs::read_to_string(path)?;
    let (overrides, body) = ship_config::extract(&source)?;

    let mut config = ship_config::resolve(&project.tree, &segments, &overrides);
    config.insert("name", json!(name));
    config.insert("path", json!(path.display().to_string()));

    ship_render::validate(&config, &name)?;
    Ok(renderer.render(&config, body)?)
}

/// Display name for a procedure file in status and error lines.
pub(crate) fn display_name(path: &Path) -> String {
    path.file_stem()
        .map(|stem| stem.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}
