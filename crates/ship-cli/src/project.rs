//! Project loading and procedure discovery
//!
//! A project is a directory holding `.procship.yml` and procedure sources.
//! The config file is rendered through minijinja first, so connection
//! secrets can be pulled from the environment:
//!
//! ```yaml
//! snowflake:
//!   account: "{{ env_var('SNOWFLAKE_ACCOUNT') }}"
//!   role: "{{ env_var('SNOWFLAKE_ROLE', 'sysadmin') }}"
//! procedures:
//!   "+database": analytics
//! ```
//!
//! By the time the declaration tree loader sees the document, every value is
//! already a plain scalar.

use serde::Deserialize;
use serde_json::Value;
use std::collections::BTreeSet;
use std::fs;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

use ship_config::DeclarationTree;

use crate::error::{CliError, Result};

/// Name of the project configuration file.
pub const CONFIG_FILE: &str = ".procship.yml";

/// Extensions recognized as procedure sources.
pub const SOURCE_EXTENSIONS: &[&str] = &["js", "py"];

/// Connection profile from the `snowflake:` section.
///
/// Only the fields the CLI itself consumes are modeled; credentials are the
/// transport's concern and are passed through untouched by never being read.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SnowflakeProfile {
    pub account: Option<String>,
    pub user: Option<String>,
    pub role: Option<String>,
    pub warehouse: Option<String>,
    pub database: Option<String>,
    pub schema: Option<String>,
}

/// A loaded project: root directory, connection profile, declaration tree.
#[derive(Debug)]
pub struct Project {
    pub root: PathBuf,
    pub snowflake: SnowflakeProfile,
    pub tree: DeclarationTree,
}

impl Project {
    /// Load the project at `dir`.
    ///
    /// # Errors
    ///
    /// Fails if the config file is absent, fails to render or parse, or if
    /// the `procedures:` section is a malformed declaration tree. All of
    /// these abort the run before any procedure is touched.
    pub fn load(dir: &Path) -> Result<Self> {
        let config_path = dir.join(CONFIG_FILE);
        if !config_path.is_file() {
            return Err(CliError::user(format!(
                "Configuration file not found: {}",
                config_path.display()
            )));
        }

        tracing::debug!(path = %config_path.display(), "loading project configuration");
        let raw = fs::read_to_string(&config_path)?;
        let rendered = render_config(&raw)?;
        let document: Value = serde_yaml::from_str(&rendered).map_err(|e| {
            CliError::user(format!("Failed to load configuration: {e}"))
        })?;

        let snowflake = match document.get("snowflake") {
            Some(section) => serde_json::from_value(section.clone()).map_err(|e| {
                CliError::user(format!("Invalid snowflake profile: {e}"))
            })?,
            None => SnowflakeProfile::default(),
        };

        let tree = DeclarationTree::from_value(
            document.get("procedures").unwrap_or(&Value::Null),
        )?;

        Ok(Self {
            root: dir.to_path_buf(),
            snowflake,
            tree,
        })
    }
}

/// Render the raw config text, resolving `env_var()` substitutions.
fn render_config(raw: &str) -> Result<String> {
    let mut env = minijinja::Environment::new();
    env.add_function(
        "env_var",
        |name: String, default: Option<String>| -> std::result::Result<String, minijinja::Error> {
            std::env::var(&name).ok().or(default).ok_or_else(|| {
                minijinja::Error::new(
                    minijinja::ErrorKind::UndefinedError,
                    format!("environment variable `{name}` is not set"),
                )
            })
        },
    );
    env.render_str(raw, minijinja::context! {})
        .map_err(|e| CliError::user(format!("Failed to load configuration: {e}")))
}

/// Discover procedure sources under `root`, sorted for deterministic runs.
///
/// Hidden directories and everything under `skip` (the output directory)
/// are left out.
pub fn discover(root: &Path, skip: &Path) -> Vec<PathBuf> {
    let mut files: Vec<PathBuf> = WalkDir::new(root)
        .into_iter()
        .filter_entry(|entry| !is_hidden(entry.path(), root) && !entry.path().starts_with(skip))
        .filter_map(std::result::Result::ok)
        .filter(|entry| entry.file_type().is_file())
        .map(walkdir::DirEntry::into_path)
        .filter(|path| {
            path.extension()
                .and_then(|ext| ext.to_str())
                .is_some_and(|ext| SOURCE_EXTENSIONS.contains(&ext))
        })
        .collect();
    files.sort();
    files
}

fn is_hidden(path: &Path, root: &Path) -> bool {
    path != root
        && path
            .file_name()
            .and_then(|name| name.to_str())
            .is_some_and(|name| name.starts_with('.'))
}

/// Keep only files whose stem is listed in `only`; report names that matched
/// nothing. An empty `only` keeps everything.
pub fn filter_only(files: Vec<PathBuf>, only: &[String]) -> (Vec<PathBuf>, Vec<String>) {
    if only.is_empty() {
        return (files, Vec::new());
    }

    let wanted: BTreeSet<&str> = only.iter().map(String::as_str).collect();
    let mut found: BTreeSet<String> = BTreeSet::new();
    let selected = files
        .into_iter()
        .filter(|file| {
            let stem = file.file_stem().and_then(|stem| stem.to_str());
            match stem {
                Some(stem) if wanted.contains(stem) => {
                    found.insert(stem.to_string());
                    true
                }
                _ => false,
            }
        })
        .collect();

    let not_found = wanted
        .into_iter()
        .filter(|name| !found.contains(*name))
        .map(str::to_string)
        .collect();
    (selected, not_found)
}
