//! # schemagen Codegen
//!
//! Rust source generation from derived schemas.
//!
//! This crate provides:
//! - Schema serialization as `schema_map!` source
//! - Expand function generation from the derivation metadata
//! - Structured and delimiter-balance indentation
//! - Generators and a printer that writes generated files

pub mod emit;
pub mod error;
pub mod generator;
pub mod indent;
pub mod printer;
pub mod rust;

pub use emit::{Fragment, IndentStyle, RenderOptions};
pub use error::CodegenError;
pub use generator::{Generator, SchemaGenerator};
pub use indent::IndentWriter;
pub use printer::Printer;
pub use rust::{ExpandEmitter, SchemaPrinter, expand, serialize};

use schemagen_core::Reflect;

/// Generates the schema function and expand functions for `T`, without
/// `use` declarations or a filter.
///
/// # Arguments
/// * `function_name` - Name of the generated schema function
///
/// # Returns
/// Generated Rust code as a string.
///
/// # Errors
/// Returns `CodegenError` if derivation or rendering fails.
pub fn generate_for<T: Reflect + ?Sized>(function_name: &str) -> Result<String, CodegenError> {
    let options = RenderOptions::new().with_imports(Vec::<String>::new());
    SchemaGenerator::of::<T>(format!("{function_name}.rs"), function_name)
        .with_options(options)
        .generate()
}
