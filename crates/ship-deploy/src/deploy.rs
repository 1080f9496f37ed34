//! Per-procedure deployment sequencing
//!
//! For each procedure: switch to its deployment role (or the profile
//! default), run the CREATE statement, then grant usage to every configured
//! grantee. Roles are uppercased and quoted; grantee names are quoted
//! verbatim.

use ship_render::{RenderedProcedure, quote_identifier};

use crate::executor::StatementExecutor;
use crate::Result;

/// Sequences deployment statements for rendered procedures.
#[derive(Debug, Clone, Default)]
pub struct Deployer {
    default_role: Option<String>,
}

impl Deployer {
    /// Create a deployer. `default_role` is used for procedures that do not
    /// configure `use_role` themselves; with neither, no role switch is
    /// issued.
    pub fn new(default_role: Option<String>) -> Self {
        Self { default_role }
    }

    /// Deploy one procedure through the executor.
    ///
    /// # Errors
    ///
    /// Propagates the first executor failure; later statements for this
    /// procedure are not attempted.
    pub fn deploy(
        &self,
        procedure: &RenderedProcedure,
        executor: &mut dyn StatementExecutor,
    ) -> Result<()> {
        let role = procedure.use_role.as_deref().or(self.default_role.as_deref());
        if let Some(role) = role {
            tracing::debug!(procedure = procedure.name, role, "switching role");
            executor.execute(&use_role_statement(role))?;
        }

        executor.execute(&procedure.sql)?;

        for statement in grant_statements(procedure) {
            executor.execute(&statement)?;
        }
        Ok(())
    }
}

/// The role-switch statement for a deployment role.
pub fn use_role_statement(role: &str) -> String {
    format!("USE ROLE {}", quote_identifier(&role.to_uppercase()))
}

/// GRANT USAGE statements for a procedure, one per grantee, ordered by
/// grantee kind then declaration order.
pub fn grant_statements(procedure: &RenderedProcedure) -> Vec<String> {
    let signature = format!(
        "{}.{}.{}({})",
        quote_identifier(&procedure.database),
        quote_identifier(&procedure.schema),
        quote_identifier(&procedure.name),
        procedure.arg_types.join(",")
    );

    let mut statements = Vec::new();
    for (kind, grantees) in &procedure.grants {
        for grantee in grantees {
            statements.push(format!(
                "GRANT USAGE ON PROCEDURE {signature} TO {} {}",
                kind.to_uppercase(),
                quote_identifier(grantee)
            ));
        }
    }
    statements
}
