//! # schemagen Core
//!
//! Static type descriptors for struct-to-schema generation.
//!
//! This crate provides:
//! - [`TypeDesc`] and [`Shape`], the descriptor model the walker consumes
//! - The [`Reflect`] trait with implementations for standard types
//! - Field descriptors with derive hints
//! - The snake case naming transform used for emitted keys

pub mod naming;
pub mod reflect;
pub mod types;

pub use naming::underscore;
pub use reflect::Reflect;
pub use types::{
    FieldDesc, FieldHints, MapKind, PointerKind, PrimitiveType, SeqKind, Shape, TypeDesc, TypeRef,
};
