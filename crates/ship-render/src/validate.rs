//! Required-key and enum-value validation for resolved configurations
//!
//! The resolution engine returns whatever the layers declared; this module
//! decides whether that is enough to render a procedure. A declared `null`
//! counts as missing.

use serde_json::Value;
use ship_config::ResolvedConfig;

use crate::{Error, Result};

/// Keys every procedure must resolve before rendering.
pub const REQUIRED_KEYS: &[&str] = &["database", "schema", "returns", "language", "execute_as"];

/// Additional keys a python procedure must resolve: Snowflake cannot create
/// a python procedure without a handler and a runtime version.
pub const PYTHON_REQUIRED_KEYS: &[&str] = &["handler", "runtime_version"];

const SUPPORTED_LANGUAGES: &[&str] = &["javascript", "python"];
const VALID_EXECUTE_AS: &[&str] = &["owner", "caller"];

/// Validate a resolved configuration for the named procedure.
///
/// # Errors
///
/// * [`Error::MissingRequiredKeys`] listing every absent or null required key.
/// * [`Error::UnsupportedLanguage`] / [`Error::InvalidExecuteAs`] for values
///   outside the supported sets.
pub fn validate(config: &ResolvedConfig, procedure: &str) -> Result<()> {
    let mut missing = missing_keys(config, REQUIRED_KEYS);
    if config.get_str("language") == Some("python") {
        missing.extend(missing_keys(config, PYTHON_REQUIRED_KEYS));
    }
    if !missing.is_empty() {
        return Err(Error::MissingRequiredKeys {
            procedure: procedure.to_string(),
            fields: missing,
        });
    }

    let language = string_value(config, procedure, "language")?;
    if !SUPPORTED_LANGUAGES.contains(&language) {
        return Err(Error::UnsupportedLanguage {
            procedure: procedure.to_string(),
            language: language.to_string(),
        });
    }

    let execute_as = string_value(config, procedure, "execute_as")?;
    if !VALID_EXECUTE_AS.contains(&execute_as) {
        return Err(Error::InvalidExecuteAs {
            procedure: procedure.to_string(),
            value: execute_as.to_string(),
        });
    }

    Ok(())
}

fn missing_keys(config: &ResolvedConfig, keys: &[&str]) -> Vec<String> {
    keys.iter()
        .filter(|key| config.get(key).is_none_or(Value::is_null))
        .map(|key| (*key).to_string())
        .collect()
}

fn string_value<'a>(config: &'a ResolvedConfig, procedure: &str, key: &str) -> Result<&'a str> {
    config.get_str(key).ok_or_else(|| Error::InvalidValue {
        procedure: procedure.to_string(),
        key: key.to_string(),
        reason: "expected a string".to_string(),
    })
}
