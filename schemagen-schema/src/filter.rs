//! Field filters: the walker's extension point.
//!
//! A filter receives the [`GenFieldState`] of each field before the walker
//! processes it and returns the state the walker should use instead. This is
//! the only way to rename a key, change schema attributes, redirect an opaque
//! field to a concrete type, or request `Skip`/`Promote`.

use crate::error::FilterError;
use crate::types::Schema;
use schemagen_core::{FieldDesc, Reflect, TypeRef, underscore};

/// What the walker does with a field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Action {
    /// Emit the field normally.
    #[default]
    Default,
    /// Drop the field from the output.
    Skip,
    /// Merge a struct field's nested fields into the current level.
    ///
    /// Ignored for fields that are not structs.
    Promote,
}

/// In-progress generation state of a single field.
///
/// Filters receive the state by value and return the (possibly modified)
/// state, so nothing is shared between the walker and the filter.
#[derive(Debug, Clone)]
pub struct GenFieldState {
    name: String,
    field: FieldDesc,
    schema: Schema,
    action: Action,
}

impl GenFieldState {
    /// Creates the initial state for a field.
    ///
    /// The name is the snake case form of the field identifier unless a
    /// `rename` hint is present; `skip` and `flatten` hints seed the action.
    #[must_use]
    pub fn new(field: FieldDesc) -> Self {
        let name = match &field.hints.rename {
            Some(rename) => rename.to_string(),
            None => underscore(field.binding_name()),
        };
        let action = if field.hints.skip {
            Action::Skip
        } else if field.hints.flatten {
            Action::Promote
        } else {
            Action::Default
        };
        Self {
            name,
            field,
            schema: Schema::default(),
            action,
        }
    }

    /// Returns the key the field will be emitted under.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the field being processed.
    #[must_use]
    pub fn field(&self) -> &FieldDesc {
        &self.field
    }

    /// Returns the schema built so far.
    #[must_use]
    pub fn schema(&self) -> &Schema {
        &self.schema
    }

    /// Returns the requested action.
    #[must_use]
    pub fn action(&self) -> Action {
        self.action
    }

    /// Changes the emitted key. An empty name drops the field.
    #[must_use]
    pub fn rename(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Redirects the walker to a different declared type.
    #[must_use]
    pub fn redirect(mut self, ty: TypeRef) -> Self {
        self.field.ty = ty;
        self
    }

    /// Redirects the walker to `T`.
    #[must_use]
    pub fn retype<T: Reflect>(self) -> Self {
        self.redirect(T::type_desc)
    }

    /// Applies changes to the schema.
    #[must_use]
    pub fn with_schema(mut self, f: impl FnOnce(&mut Schema)) -> Self {
        f(&mut self.schema);
        self
    }

    /// Returns a mutable reference to the schema.
    pub fn schema_mut(&mut self) -> &mut Schema {
        &mut self.schema
    }

    /// Sets the action.
    #[must_use]
    pub fn with_action(mut self, action: Action) -> Self {
        self.action = action;
        self
    }

    /// Drops the field.
    #[must_use]
    pub fn skip(self) -> Self {
        self.with_action(Action::Skip)
    }

    /// Promotes the nested struct's fields to the current level.
    #[must_use]
    pub fn promote(self) -> Self {
        self.with_action(Action::Promote)
    }

    pub(crate) fn into_parts(self) -> (String, FieldDesc, Schema, Action) {
        (self.name, self.field, self.schema, self.action)
    }
}

/// Customizes schema generation per field.
///
/// Implementations must return fields they do not recognize unchanged.
pub trait Filter {
    /// Transforms the state of one field.
    ///
    /// # Errors
    /// Returns `FilterError` to abort the whole derivation.
    fn filter(&self, state: GenFieldState) -> Result<GenFieldState, FilterError>;
}

impl<F> Filter for F
where
    F: Fn(GenFieldState) -> Result<GenFieldState, FilterError>,
{
    fn filter(&self, state: GenFieldState) -> Result<GenFieldState, FilterError> {
        self(state)
    }
}

/// Runs several filters in order, each seeing the previous one's output.
#[derive(Default)]
pub struct FilterChain {
    filters: Vec<Box<dyn Filter + Send + Sync>>,
}

impl FilterChain {
    /// Creates an empty chain.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a filter to the chain.
    #[must_use]
    pub fn then(mut self, filter: impl Filter + Send + Sync + 'static) -> Self {
        self.filters.push(Box::new(filter));
        self
    }

    /// Returns the number of filters in the chain.
    #[must_use]
    pub fn len(&self) -> usize {
        self.filters.len()
    }

    /// Returns true if the chain has no filters.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.filters.is_empty()
    }
}

impl Filter for FilterChain {
    fn filter(&self, state: GenFieldState) -> Result<GenFieldState, FilterError> {
        self.filters.iter().try_fold(state, |state, f| f.filter(state))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::ValueKind;
    use schemagen_core::{FieldHints, PrimitiveType, TypeDesc};
    use std::borrow::Cow;

    fn string_desc() -> TypeDesc {
        TypeDesc::primitive(PrimitiveType::String)
    }

    fn int_desc() -> TypeDesc {
        TypeDesc::primitive(PrimitiveType::Int64)
    }

    #[test]
    fn test_initial_state_uses_naming_transform() {
        let state = GenFieldState::new(FieldDesc::new("StringField", string_desc));
        assert_eq!(state.name(), "string_field");
        assert_eq!(state.action(), Action::Default);
        assert_eq!(state.schema(), &Schema::default());
    }

    #[test]
    fn test_initial_state_honours_hints() {
        let field = FieldDesc::new("r#type", string_desc).with_hints(FieldHints {
            rename: Some(Cow::Borrowed("kind")),
            ..FieldHints::default()
        });
        assert_eq!(GenFieldState::new(field).name(), "kind");

        let field = FieldDesc::new("r#type", string_desc);
        assert_eq!(GenFieldState::new(field).name(), "type");

        let field = FieldDesc::new("cache", string_desc).with_hints(FieldHints {
            skip: true,
            ..FieldHints::default()
        });
        assert_eq!(GenFieldState::new(field).action(), Action::Skip);

        let field = FieldDesc::new("base", string_desc).with_hints(FieldHints {
            flatten: true,
            ..FieldHints::default()
        });
        assert_eq!(GenFieldState::new(field).action(), Action::Promote);
    }

    #[test]
    fn test_builder_overrides() {
        let state = GenFieldState::new(FieldDesc::new("foo", string_desc))
            .rename("foo_bar")
            .redirect(int_desc)
            .with_schema(|s| s.required = true)
            .promote();
        assert_eq!(state.name(), "foo_bar");
        assert_eq!(
            state.field().declared_type().as_primitive(),
            Some(PrimitiveType::Int64)
        );
        assert!(state.schema().required);
        assert_eq!(state.action(), Action::Promote);
    }

    #[test]
    fn test_closure_filter_and_chain() {
        let chain = FilterChain::new()
            .then(|state: GenFieldState| -> Result<GenFieldState, FilterError> {
                if state.name() == "foo" {
                    Ok(state.rename("foo_bar"))
                } else {
                    Ok(state)
                }
            })
            .then(|mut state: GenFieldState| -> Result<GenFieldState, FilterError> {
                if state.name() == "foo_bar" {
                    state.schema_mut().kind = Some(ValueKind::String);
                }
                Ok(state)
            });
        assert_eq!(chain.len(), 2);

        let state = chain
            .filter(GenFieldState::new(FieldDesc::new("foo", string_desc)))
            .expect("filter failed");
        assert_eq!(state.name(), "foo_bar");
        assert_eq!(state.schema().kind, Some(ValueKind::String));

        let untouched = chain
            .filter(GenFieldState::new(FieldDesc::new("other", string_desc)))
            .expect("filter failed");
        assert_eq!(untouched.name(), "other");
        assert_eq!(untouched.schema().kind, None);
    }

    #[test]
    fn test_chain_stops_on_error() {
        let chain = FilterChain::new()
            .then(|_: GenFieldState| -> Result<GenFieldState, FilterError> {
                Err(FilterError::new("unsupported field"))
            })
            .then(|state: GenFieldState| -> Result<GenFieldState, FilterError> {
                Ok(state.rename("unreachable"))
            });
        let err = chain
            .filter(GenFieldState::new(FieldDesc::new("foo", string_desc)))
            .unwrap_err();
        assert_eq!(err.message(), "unsupported field");
    }
}
