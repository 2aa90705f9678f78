//! Rust code generation modules.

pub mod expand;
pub mod schema;

pub use expand::{ExpandEmitter, expand};
pub use schema::{SchemaPrinter, serialize};
