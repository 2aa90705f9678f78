//! # schemagen
//!
//! Derive declarative field schemas and expand functions from Rust structs.
//!
//! schemagen walks the fields of a type, classifies each one into a schema
//! value kind and renders two artifacts as Rust source: a function returning
//! the schema mapping, and `expand_*` functions that build the typed value
//! back from its generic key/value representation.
//!
//! ## Features
//!
//! - **Static reflection** - `#[derive(Reflect)]` builds type descriptors
//! - **Filters** - rename, retype, skip or flatten any field during the walk
//! - **Deterministic output** - keys are always emitted in sorted order
//! - **Printer** - write generated files into a module directory
//!
//! ## Quick Start
//!
//! ```ignore
//! use schemagen::prelude::*;
//!
//! #[derive(Default, Reflect)]
//! struct Uplink {
//!     name: String,
//!     mtu: u32,
//! }
//!
//! let printer = Printer::new("uplink", "src/generated")
//!     .with_generator(SchemaGenerator::of::<Uplink>("uplink.rs", "uplink_schema"));
//! printer.run()?;
//! ```
//!
//! ## Crate Organization
//!
//! - [`core`] - Type descriptors, `Reflect` and naming
//! - [`schema`] - Schema vocabulary, classifier, filters and the walker
//! - [`codegen`] - Serializer, expand emitter, generators and printer

pub mod prelude;

/// Type descriptors and the `Reflect` trait.
pub mod core {
    pub use schemagen_core::*;
}

/// Schema vocabulary and derivation.
pub mod schema {
    pub use schemagen_schema::*;
}

/// Source generation from derived schemas.
pub mod codegen {
    pub use schemagen_codegen::*;
}

pub use schemagen_derive::Reflect;

// Re-export commonly used items at the crate root
pub use schemagen_codegen::{CodegenError, Generator, Printer, SchemaGenerator};
pub use schemagen_schema::{Derivation, DeriveError, derive, derive_type};
