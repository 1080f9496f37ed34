//! CREATE PROCEDURE rendering through embedded minijinja templates
//!
//! One template per supported language; the resolved configuration supplies
//! the context, the procedure file (minus frontmatter) supplies the body.
//! Argument names are emitted quoted and uppercased, types uppercased,
//! matching how Snowflake reports procedure signatures.

use minijinja::Environment;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::collections::BTreeMap;

use ship_config::ResolvedConfig;

use crate::{Error, Result};

/// One argument descriptor from the `args` list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Arg {
    pub name: String,
    #[serde(rename = "type")]
    pub ty: String,
}

/// A fully rendered procedure, carrying everything the deploy layer needs
/// without re-parsing configuration.
#[derive(Debug, Clone)]
pub struct RenderedProcedure {
    pub name: String,
    pub database: String,
    pub schema: String,
    /// The complete CREATE OR REPLACE PROCEDURE statement.
    pub sql: String,
    /// Argument types in declaration order, verbatim as configured.
    pub arg_types: Vec<String>,
    /// Role to switch to before deploying, if configured.
    pub use_role: Option<String>,
    /// Grantee kind (role, user) to grantees, from `grant_usage`.
    pub grants: BTreeMap<String, Vec<String>>,
}

/// Renders resolved configurations into SQL statements.
pub struct Renderer {
    env: Environment<'static>,
}

impl Renderer {
    /// Build a renderer with the embedded per-language templates.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Template`] if an embedded template fails to parse.
    pub fn new() -> Result<Self> {
        let mut env = Environment::new();
        env.add_template("javascript", include_str!("../templates/javascript.sql"))?;
        env.add_template("python", include_str!("../templates/python.sql"))?;
        Ok(Self { env })
    }

    /// Render one procedure from its validated configuration and body.
    ///
    /// The configuration is expected to have passed [`crate::validate`];
    /// key lookups here still fail cleanly rather than panic.
    pub fn render(&self, config: &ResolvedConfig, body: &str) -> Result<RenderedProcedure> {
        let name = required_str(config, "name")?;
        let database = required_str(config, "database")?;
        let schema = required_str(config, "schema")?;
        let language = required_str(config, "language")?;
        let args = parse_args(config, &name)?;
        let grants = parse_grants(config, &name)?;

        let context = build_context(config, &name, &database, &schema, &args, body);
        tracing::debug!(procedure = name, language, "rendering procedure");
        let sql = self.env.get_template(language.as_str())?.render(&context)?;

        Ok(RenderedProcedure {
            arg_types: args.into_iter().map(|arg| arg.ty).collect(),
            use_role: config.get_str("use_role").map(str::to_string),
            name,
            database,
            schema,
            sql,
            grants,
        })
    }
}

fn build_context(
    config: &ResolvedConfig,
    name: &str,
    database: &str,
    schema: &str,
    args: &[Arg],
    body: &str,
) -> Value {
    let mut context = Map::new();
    context.insert("name".into(), Value::String(name.to_string()));
    context.insert("database".into(), Value::String(database.to_string()));
    context.insert("schema".into(), Value::String(schema.to_string()));
    context.insert(
        "args".into(),
        serde_json::to_value(args).unwrap_or_else(|_| Value::Array(Vec::new())),
    );
    context.insert("body".into(), Value::String(body.trim_end().to_string()));

    for key in ["returns", "execute_as", "runtime_version", "handler", "packages"] {
        if let Some(value) = config.get(key) {
            context.insert(key.into(), value.clone());
        }
    }
    if let Some(comment) = config.get("comment").filter(|v| !v.is_null()) {
        let text = comment
            .as_str()
            .map_or_else(|| comment.to_string(), str::to_string);
        context.insert("comment".into(), Value::String(text));
    }

    Value::Object(context)
}

fn required_str(config: &ResolvedConfig, key: &str) -> Result<String> {
    config
        .get_str(key)
        .map(str::to_string)
        .ok_or_else(|| Error::InvalidValue {
            procedure: config.get_str("name").unwrap_or("<unnamed>").to_string(),
            key: key.to_string(),
            reason: "expected a string".to_string(),
        })
}

fn parse_args(config: &ResolvedConfig, procedure: &str) -> Result<Vec<Arg>> {
    match config.get("args") {
        None | Some(Value::Null) => Ok(Vec::new()),
        Some(value) => {
            serde_json::from_value(value.clone()).map_err(|e| Error::InvalidValue {
                procedure: procedure.to_string(),
                key: "args".to_string(),
                reason: format!("expected a list of name/type entries: {e}"),
            })
        }
    }
}

fn parse_grants(
    config: &ResolvedConfig,
    procedure: &str,
) -> Result<BTreeMap<String, Vec<String>>> {
    match config.get("grant_usage") {
        None | Some(Value::Null) => Ok(BTreeMap::new()),
        Some(value) => {
            serde_json::from_value(value.clone()).map_err(|e| Error::InvalidValue {
                procedure: procedure.to_string(),
                key: "grant_usage".to_string(),
                reason: format!("expected a mapping of grantee kind to names: {e}"),
            })
        }
    }
}
