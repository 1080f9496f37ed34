//! The resolution engine: one flat configuration per procedure
//!
//! `resolve` is a total, pure function of the declaration tree, a procedure's
//! path segments, and its inline overrides. Precedence, low to high:
//!
//! 1. cascading defaults, root first (a closer ancestor overwrites a more
//!    distant one),
//! 2. the procedure's exact declarations,
//! 3. inline frontmatter overrides.
//!
//! Every merge is a shallow, whole-value replace per key: structured values
//! such as argument lists are opaque and never merged element-wise.

use serde_json::{Map, Value};

use crate::tree::DeclarationTree;

/// Inline overrides parsed from a procedure's frontmatter.
pub type Overrides = Map<String, Value>;

/// The final flat configuration for exactly one procedure.
///
/// Built by [`resolve`]; not mutated afterwards except for the caller seeding
/// bookkeeping keys (`name`, `path`) before validation and rendering.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ResolvedConfig {
    values: Map<String, Value>,
}

impl ResolvedConfig {
    /// The value for a key, if any layer declared it.
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.values.get(key)
    }

    /// The value for a key as a string slice, if declared and a string.
    pub fn get_str(&self, key: &str) -> Option<&str> {
        self.values.get(key).and_then(Value::as_str)
    }

    /// Whether any layer declared the key (a declared `null` counts).
    pub fn contains(&self, key: &str) -> bool {
        self.values.contains_key(key)
    }

    /// Insert or replace a key. Used by callers to seed bookkeeping keys;
    /// the engine itself never calls this after construction.
    pub fn insert(&mut self, key: impl Into<String>, value: Value) {
        self.values.insert(key.into(), value);
    }

    /// All resolved key/value pairs, deterministically ordered.
    pub fn values(&self) -> &Map<String, Value> {
        &self.values
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

impl From<ResolvedConfig> for Map<String, Value> {
    fn from(config: ResolvedConfig) -> Self {
        config.values
    }
}

/// Resolve the configuration for the procedure at `segments`.
///
/// `segments` is the procedure's path relative to the declaration root, the
/// last segment being the procedure's own name (see [`crate::to_segments`]).
/// Path segments with no corresponding tree node contribute nothing; a path
/// with no declared nodes at all resolves to exactly the inline overrides.
pub fn resolve(
    tree: &DeclarationTree,
    segments: &[String],
    overrides: &Overrides,
) -> ResolvedConfig {
    let mut values = Map::new();

    // Cascading layer: the root and every directory level down to the
    // procedure's parent, nearer levels overwriting per key. Defaults
    // declared at the procedure's own node do not apply to it.
    let dir_count = segments.len().saturating_sub(1);
    let mut current = Some(tree.root());
    for depth in 0..=dir_count {
        let Some(node) = current else { break };
        for (key, value) in node.cascading() {
            values.insert(key.clone(), value.clone());
        }
        if depth < dir_count {
            current = node.child(&segments[depth]);
        }
    }

    // Exact layer: declarations at the procedure's own node, if any.
    if let Some(node) = tree.node_at(segments) {
        for (key, value) in node.exact() {
            values.insert(key.clone(), value.clone());
        }
    } else {
        tracing::debug!(path = segments.join("/"), "no exact declaration node");
    }

    // Inline overrides beat everything.
    for (key, value) in overrides {
        values.insert(key.clone(), value.clone());
    }

    ResolvedConfig { values }
}
