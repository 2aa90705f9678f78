//! Prelude module for convenient imports.
//!
//! This module re-exports the most commonly used types and traits.
//!
//! ```ignore
//! use schemagen::prelude::*;
//! ```

// Descriptors
pub use schemagen_core::{FieldDesc, FieldHints, Reflect, Shape, TypeDesc, underscore};
pub use schemagen_derive::Reflect;

// Schema vocabulary and derivation
pub use schemagen_schema::{
    Action, AttrValue, Derivation, DeriveError, Elem, Filter, FilterChain, FilterError,
    GenFieldState, Resource, ResourceData, Schema, SchemaMap, ValueKind, Walker, derive,
    derive_type, schema_map,
};

// Code generation
pub use schemagen_codegen::{
    CodegenError, ExpandEmitter, Generator, IndentStyle, Printer, RenderOptions,
    SchemaGenerator, SchemaPrinter,
};
