//! Identifier quoting following Snowflake's rules
//!
//! Identifiers are wrapped in double quotes with internal double quotes
//! doubled, so arbitrary configured names cannot break out of a statement.

/// Quote an identifier (database, schema, role, procedure name).
///
/// # Examples
///
/// ```
/// use ship_render::quote_identifier;
///
/// assert_eq!(quote_identifier("my_database"), "\"my_database\"");
/// assert_eq!(quote_identifier("my\"weird\"name"), "\"my\"\"weird\"\"name\"");
/// ```
pub fn quote_identifier(identifier: &str) -> String {
    format!("\"{}\"", identifier.replace('"', "\"\""))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plain_identifier_is_wrapped() {
        assert_eq!(quote_identifier("analyst"), "\"analyst\"");
    }

    #[test]
    fn embedded_quotes_are_doubled() {
        assert_eq!(quote_identifier("a\"b"), "\"a\"\"b\"");
    }

    #[test]
    fn empty_identifier_stays_quoted() {
        assert_eq!(quote_identifier(""), "\"\"");
    }
}
