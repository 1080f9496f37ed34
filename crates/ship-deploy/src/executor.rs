//! The statement-execution seam
//!
//! [`StatementExecutor`] is the boundary between sequencing and transport.
//! The executor shipped here renders statements into a reviewable script;
//! a live-connection executor would implement the same trait.

use crate::Result;

/// Executes SQL statements in the order they are given.
pub trait StatementExecutor {
    /// Execute one statement.
    fn execute(&mut self, sql: &str) -> Result<()>;
}

/// A [`StatementExecutor`] that records statements and renders them as a
/// `;`-terminated deployment script.
#[derive(Debug, Default)]
pub struct SqlScript {
    statements: Vec<String>,
}

impl SqlScript {
    pub fn new() -> Self {
        Self::default()
    }

    /// Statements recorded so far, in execution order.
    pub fn statements(&self) -> &[String] {
        &self.statements
    }

    pub fn is_empty(&self) -> bool {
        self.statements.is_empty()
    }

    /// Render the recorded statements as one script.
    pub fn render(&self) -> String {
        let mut script = String::new();
        for statement in &self.statements {
            script.push_str(statement);
            script.push_str(";\n\n");
        }
        script
    }
}

impl StatementExecutor for SqlScript {
    fn execute(&mut self, sql: &str) -> Result<()> {
        self.statements.push(sql.trim_end().to_string());
        Ok(())
    }
}
