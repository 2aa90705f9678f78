//! # schemagen Schema
//!
//! Schema vocabulary and struct-to-schema derivation.
//!
//! This crate provides:
//! - The target schema records (`Schema`, `Elem`, `Resource`, `ValueKind`)
//! - Type classification into schema value kinds
//! - The field filter extension point
//! - The walker that derives a schema and its metadata tree from a type
//! - `ResourceData`, the runtime accessor generated expand functions read

pub mod classify;
pub mod error;
pub mod filter;
pub mod ir;
pub mod runtime;
pub mod types;
pub mod walker;

pub use classify::classify;
pub use error::{DeriveError, FilterError};
pub use filter::{Action, Filter, FilterChain, GenFieldState};
pub use ir::{Derivation, MetaResource, MetaSchema};
pub use runtime::ResourceData;
pub use types::{AttrValue, Elem, Resource, Schema, SchemaMap, Validator, ValueKind};
pub use walker::{Walker, derive, derive_type};

/// Re-exported so generated expand functions need no direct dependency.
pub use serde_json;
