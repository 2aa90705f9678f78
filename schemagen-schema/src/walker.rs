//! Schema derivation from type descriptors.
//!
//! The [`Walker`] visits every field of a struct descriptor, runs the
//! caller's [`Filter`] on it, classifies what the filter left unset and
//! recurses into nested structs. It produces a [`Derivation`]: the schema
//! mapping plus a metadata tree with the same shape.

use crate::classify::classify;
use crate::error::DeriveError;
use crate::filter::{Action, Filter, GenFieldState};
use crate::ir::{Derivation, MetaResource, MetaSchema};
use crate::types::{Elem, Resource, Schema, SchemaMap};
use schemagen_core::{FieldDesc, PointerKind, Reflect, Shape, TypeDesc};

/// Derives a schema from a type descriptor.
///
/// # Errors
/// See [`Walker::derive`].
pub fn derive(subject: &TypeDesc, filter: Option<&dyn Filter>) -> Result<Derivation, DeriveError> {
    Walker { filter }.derive(subject)
}

/// Derives a schema from `T` without a filter.
///
/// # Errors
/// See [`Walker::derive`].
pub fn derive_type<T: Reflect + ?Sized>() -> Result<Derivation, DeriveError> {
    Walker::new().derive(&T::type_desc())
}

/// Walks struct descriptors and builds schemas.
#[derive(Clone, Copy, Default)]
pub struct Walker<'f> {
    filter: Option<&'f dyn Filter>,
}

impl<'f> Walker<'f> {
    /// Creates a walker without a filter.
    #[must_use]
    pub fn new() -> Self {
        Self { filter: None }
    }

    /// Creates a walker that runs `filter` on every field.
    #[must_use]
    pub fn with_filter(filter: &'f dyn Filter) -> Self {
        Self {
            filter: Some(filter),
        }
    }

    /// Derives a schema from a struct descriptor.
    ///
    /// Pointer layers around the subject are looked through. A subject that
    /// is not a struct yields an empty schema.
    ///
    /// # Errors
    /// Returns an error if the filter fails on any field, if two fields
    /// produce the same key at one level, or if a struct contains itself.
    pub fn derive(&self, subject: &TypeDesc) -> Result<Derivation, DeriveError> {
        let mut stack = Vec::new();
        let (schema, meta) = self.walk(subject, &mut stack)?;
        tracing::debug!(
            "derived schema for '{}' with {} top-level keys",
            meta.ty.path,
            schema.len()
        );
        Ok(Derivation { schema, meta })
    }

    fn walk(
        &self,
        subject: &TypeDesc,
        stack: &mut Vec<String>,
    ) -> Result<(SchemaMap, MetaResource), DeriveError> {
        let ty = subject.effective();
        let path = ty.path.to_string();
        if stack.contains(&path) {
            let mut chain = stack.clone();
            chain.push(path);
            return Err(DeriveError::RecursiveType {
                path: chain.join(" -> "),
            });
        }

        stack.push(path);
        let result = self.walk_fields(&ty, stack);
        stack.pop();
        result
    }

    fn walk_fields(
        &self,
        ty: &TypeDesc,
        stack: &mut Vec<String>,
    ) -> Result<(SchemaMap, MetaResource), DeriveError> {
        let mut schema = SchemaMap::new();
        let mut meta = MetaResource::new(ty.clone());

        for field in ty.fields() {
            let mut state = GenFieldState::new(field.clone());
            if let Some(filter) = self.filter {
                state = filter
                    .filter(state)
                    .map_err(|source| DeriveError::Filter {
                        subject: ty.path.to_string(),
                        field: field.name.to_string(),
                        source,
                    })?;
            }

            if state.action() == Action::Skip {
                tracing::trace!("skipping field '{}' of '{}'", field.name, ty.path);
                continue;
            }

            let (name, field, mut entry, action) = state.into_parts();
            let field_ty = field.effective_type();

            if entry.kind.is_none() {
                entry.kind = classify(&field_ty);
                if entry.kind.is_none() {
                    tracing::debug!(
                        "dropping field '{}' of '{}': no schema kind for {} type '{}'",
                        field.name,
                        ty.path,
                        field_ty.shape_label(),
                        field_ty.path
                    );
                    continue;
                }
            }

            let mut elem_meta = None;
            if entry.kind.is_some_and(|kind| kind.is_collection()) {
                match &field_ty.shape {
                    Shape::Seq(_, elem) => {
                        let elem_ty = elem().effective();
                        if elem_ty.is_struct() {
                            let (nested, nested_meta) = self.walk(&elem_ty, stack)?;
                            entry.elem = Some(Elem::Resource(Resource::new(nested)));
                            elem_meta = Some(nested_meta);
                        } else {
                            entry.elem = Some(Elem::Schema(Box::new(Schema {
                                kind: classify(&elem_ty),
                                ..Schema::default()
                            })));
                        }
                    }
                    Shape::Struct(_) => {
                        if action == Action::Promote {
                            check_flattenable(ty, &field)?;
                        }
                        let (nested, nested_meta) = self.walk(&field_ty, stack)?;
                        if action == Action::Promote {
                            promote(ty, &field, &mut schema, &mut meta, nested, nested_meta)?;
                            continue;
                        }
                        entry.elem = Some(Elem::Resource(Resource::new(nested)));
                        entry.max_items = 1;
                        elem_meta = Some(nested_meta);
                    }
                    _ => {}
                }
            }

            if name.is_empty() {
                tracing::debug!("dropping field '{}' of '{}': empty name", field.name, ty.path);
                continue;
            }
            if schema.contains_key(&name) {
                return Err(DeriveError::collision(ty.path.as_ref(), name));
            }

            tracing::trace!("adding key '{}' to '{}'", name, ty.path);
            schema.insert(name.clone(), entry);
            meta.schema.insert(
                name,
                MetaSchema {
                    field,
                    elem: elem_meta,
                    owners: Vec::new(),
                },
            );
        }

        Ok((schema, meta))
    }
}

/// Fails unless every pointer layer around `owner` is a `Box`.
fn check_flattenable(ty: &TypeDesc, owner: &FieldDesc) -> Result<(), DeriveError> {
    let blocking = owner
        .declared_type()
        .pointer_layers()
        .into_iter()
        .find(|layer| *layer != PointerKind::Box);
    match blocking {
        Some(layer) => Err(DeriveError::Unflattenable {
            subject: ty.path.to_string(),
            field: owner.name.to_string(),
            wrapper: layer.type_name().to_string(),
        }),
        None => Ok(()),
    }
}

/// Merges a nested level into the current one, in key order.
fn promote(
    ty: &TypeDesc,
    owner: &FieldDesc,
    schema: &mut SchemaMap,
    meta: &mut MetaResource,
    mut nested: SchemaMap,
    mut nested_meta: MetaResource,
) -> Result<(), DeriveError> {
    let mut keys: Vec<String> = nested.keys().cloned().collect();
    keys.sort_unstable();

    for key in keys {
        if schema.contains_key(&key) {
            return Err(DeriveError::collision(ty.path.as_ref(), key));
        }
        if let Some(entry) = nested.remove(&key) {
            schema.insert(key.clone(), entry);
        }
        if let Some(mut entry_meta) = nested_meta.schema.remove(&key) {
            entry_meta.owners.insert(0, owner.name.clone());
            meta.schema.insert(key, entry_meta);
        }
    }
    Ok(())
}
