//! Deployment statement sequencing for procship
//!
//! Turns rendered procedures into the ordered statements a deployment runs:
//! a role switch, the CREATE statement, then usage grants. Statements are
//! issued through the [`StatementExecutor`] trait; the transport behind that
//! trait (a live connection, a script file) is not this crate's concern.

pub mod deploy;
pub mod error;
pub mod executor;

pub use deploy::{Deployer, grant_statements, use_role_statement};
pub use error::{Error, Result};
pub use executor::{SqlScript, StatementExecutor};
