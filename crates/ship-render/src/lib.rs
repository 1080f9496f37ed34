//! Validation and SQL rendering for procship
//!
//! Consumes a [`ship_config::ResolvedConfig`] plus the procedure body and
//! produces a complete `CREATE OR REPLACE PROCEDURE` statement. The resolution
//! engine itself never fails on missing keys; detecting a required key that no
//! layer declared is this crate's job, reported per procedure before any SQL
//! is generated.

pub mod error;
pub mod identifier;
pub mod renderer;
pub mod validate;

pub use error::{Error, Result};
pub use identifier::quote_identifier;
pub use renderer::{Arg, RenderedProcedure, Renderer};
pub use validate::{REQUIRED_KEYS, validate};
