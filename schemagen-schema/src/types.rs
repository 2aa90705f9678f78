//! Target schema vocabulary.
//!
//! This module contains the records the walker produces and the serializer
//! renders: value kinds, schema entries, nested element specifications and
//! default values.

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

/// Field name to schema entry mapping for one struct level.
///
/// The mapping has no iteration order of its own; renderers sort keys.
pub type SchemaMap = HashMap<String, Schema>;

/// Builds a [`SchemaMap`] from `"key" => Schema` pairs.
///
/// This is the form the schema serializer emits.
///
/// ```
/// use schemagen_schema::{Schema, ValueKind, schema_map};
///
/// let map = schema_map! {
///     "name" => Schema::of_kind(ValueKind::String),
/// };
/// assert_eq!(map.len(), 1);
/// ```
#[macro_export]
macro_rules! schema_map {
    () => {
        $crate::SchemaMap::new()
    };
    ($($key:literal => $value:expr),+ $(,)?) => {{
        let mut map = $crate::SchemaMap::new();
        $(
            map.insert(::std::string::String::from($key), $value);
        )+
        map
    }};
}

/// Schema value kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ValueKind {
    /// Boolean.
    Bool,
    /// Integer.
    Int,
    /// Floating point.
    Float,
    /// String.
    String,
    /// Ordered collection, or a nested block.
    List,
    /// Keyed collection of scalars.
    Map,
    /// Unordered collection of unique elements.
    Set,
}

impl ValueKind {
    /// Returns the variant name used in generated code.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Bool => "Bool",
            Self::Int => "Int",
            Self::Float => "Float",
            Self::String => "String",
            Self::List => "List",
            Self::Map => "Map",
            Self::Set => "Set",
        }
    }

    /// Returns true for the collection kinds that can carry an element.
    #[must_use]
    pub const fn is_collection(&self) -> bool {
        matches!(self, Self::List | Self::Set)
    }
}

impl fmt::Display for ValueKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Attribute value used for defaults.
#[derive(Debug, Clone, PartialEq)]
pub enum AttrValue {
    /// Boolean value.
    Bool(bool),
    /// Integer value.
    Int(i64),
    /// Floating point value.
    Float(f64),
    /// String value.
    String(String),
    /// List of values.
    List(Vec<AttrValue>),
}

impl AttrValue {
    /// Returns the variant name used in generated code.
    #[must_use]
    pub const fn variant(&self) -> &'static str {
        match self {
            Self::Bool(_) => "Bool",
            Self::Int(_) => "Int",
            Self::Float(_) => "Float",
            Self::String(_) => "String",
            Self::List(_) => "List",
        }
    }
}

impl From<bool> for AttrValue {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

impl From<i64> for AttrValue {
    fn from(value: i64) -> Self {
        Self::Int(value)
    }
}

impl From<i32> for AttrValue {
    fn from(value: i32) -> Self {
        Self::Int(i64::from(value))
    }
}

impl From<f64> for AttrValue {
    fn from(value: f64) -> Self {
        Self::Float(value)
    }
}

impl From<&str> for AttrValue {
    fn from(value: &str) -> Self {
        Self::String(value.to_string())
    }
}

impl From<String> for AttrValue {
    fn from(value: String) -> Self {
        Self::String(value)
    }
}

type ValidateFn = dyn Fn(&AttrValue) -> Result<(), String> + Send + Sync;

/// Function-valued validation attribute.
///
/// Validators exist only at runtime; the serializer never renders them.
#[derive(Clone)]
pub struct Validator(Arc<ValidateFn>);

impl Validator {
    /// Wraps a validation function.
    pub fn new<F>(f: F) -> Self
    where
        F: Fn(&AttrValue) -> Result<(), String> + Send + Sync + 'static,
    {
        Self(Arc::new(f))
    }

    /// Runs the validator against a value.
    ///
    /// # Errors
    /// Returns the validator's message if the value is rejected.
    pub fn check(&self, value: &AttrValue) -> Result<(), String> {
        (self.0)(value)
    }
}

impl fmt::Debug for Validator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Validator(..)")
    }
}

impl PartialEq for Validator {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }
}

/// Nested resource: a schema mapping one level down.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Resource {
    /// Nested field mapping.
    pub schema: SchemaMap,
}

impl Resource {
    /// Creates a resource from a nested mapping.
    #[must_use]
    pub fn new(schema: SchemaMap) -> Self {
        Self { schema }
    }
}

/// Element specification of a collection or nested block.
#[derive(Debug, Clone, PartialEq)]
pub enum Elem {
    /// Homogeneous collection of scalars.
    Schema(Box<Schema>),
    /// Collection or singleton of nested records.
    Resource(Resource),
}

/// Declarative description of one field.
///
/// Attributes left at their default value are not rendered.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Schema {
    /// Value kind; `None` until classified or set by a filter.
    pub kind: Option<ValueKind>,
    /// Field may be omitted.
    pub optional: bool,
    /// Field must be set.
    pub required: bool,
    /// Default value.
    pub default: Option<AttrValue>,
    /// Human readable description.
    pub description: String,
    /// Default offered when prompting for input.
    pub input_default: String,
    /// Value is computed by the provider.
    pub computed: bool,
    /// Changing the value forces a new resource.
    pub force_new: bool,
    /// Element specification for collections and nested blocks.
    pub elem: Option<Elem>,
    /// Maximum number of elements (0 = unbounded).
    pub max_items: usize,
    /// Minimum number of elements.
    pub min_items: usize,
    /// Keys that cannot be set together with this one.
    pub conflicts_with: Vec<String>,
    /// Deprecation message.
    pub deprecated: String,
    /// Removal message.
    pub removed: String,
    /// Value is hidden from output.
    pub sensitive: bool,
    /// Runtime validation function.
    pub validate: Option<Validator>,
}

impl Schema {
    /// Creates an entry with only a value kind set.
    #[must_use]
    pub fn of_kind(kind: ValueKind) -> Self {
        Self {
            kind: Some(kind),
            ..Self::default()
        }
    }

    /// Marks the entry as required.
    #[must_use]
    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }

    /// Marks the entry as optional.
    #[must_use]
    pub fn optional(mut self) -> Self {
        self.optional = true;
        self
    }

    /// Sets the description.
    #[must_use]
    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Sets the default value.
    #[must_use]
    pub fn default_value(mut self, value: impl Into<AttrValue>) -> Self {
        self.default = Some(value.into());
        self
    }

    /// Returns the nested resource, if this entry has one.
    #[must_use]
    pub fn resource(&self) -> Option<&Resource> {
        match &self.elem {
            Some(Elem::Resource(resource)) => Some(resource),
            _ => None,
        }
    }
}
