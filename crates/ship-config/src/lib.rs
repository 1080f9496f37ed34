//! Deployment-configuration resolution for procship
//!
//! A procedure file gets its final configuration from three layered sources:
//! cascading (`+`-prefixed) defaults declared along its directory path,
//! declarations at its exact path, and inline frontmatter overrides embedded
//! in the file itself. This crate owns that resolution: the declaration tree,
//! the engine that walks it, the path mapper, and the frontmatter extractor.
//!
//! All components here are pure and synchronous. The tree is parsed once and
//! shared immutably; each resolution allocates its own accumulator, so
//! independent procedures can be resolved concurrently without locking.

pub mod error;
pub mod frontmatter;
pub mod path;
pub mod resolve;
pub mod tree;

pub use error::{Error, Result};
pub use frontmatter::extract;
pub use path::to_segments;
pub use resolve::{Overrides, ResolvedConfig, resolve};
pub use tree::{DeclarationTree, Node};
