//! Static type descriptors.
//!
//! A [`TypeDesc`] describes the shape of a Rust type well enough for the
//! schema walker to classify it and for the expand emitter to name it in
//! generated code. Nested types are referenced through [`TypeRef`] function
//! pointers, so descriptors of self-referential types can be built without
//! unbounded recursion.

use std::borrow::Cow;
use std::fmt;

/// Lazily resolved reference to a type descriptor.
pub type TypeRef = fn() -> TypeDesc;

/// Primitive scalar types.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PrimitiveType {
    /// Boolean.
    Bool,
    /// Unicode scalar value.
    Char,
    /// Owned UTF-8 string.
    String,
    /// Signed 8-bit integer.
    Int8,
    /// Signed 16-bit integer.
    Int16,
    /// Signed 32-bit integer.
    Int32,
    /// Signed 64-bit integer.
    Int64,
    /// Signed 128-bit integer.
    Int128,
    /// Pointer-sized signed integer.
    Isize,
    /// Unsigned 8-bit integer.
    Uint8,
    /// Unsigned 16-bit integer.
    Uint16,
    /// Unsigned 32-bit integer.
    Uint32,
    /// Unsigned 64-bit integer.
    Uint64,
    /// Unsigned 128-bit integer.
    Uint128,
    /// Pointer-sized unsigned integer.
    Usize,
    /// 32-bit floating point.
    Float,
    /// 64-bit floating point.
    Double,
}

impl PrimitiveType {
    /// Returns the Rust type name for this primitive.
    #[must_use]
    pub const fn rust_type(&self) -> &'static str {
        match self {
            Self::Bool => "bool",
            Self::Char => "char",
            Self::String => "String",
            Self::Int8 => "i8",
            Self::Int16 => "i16",
            Self::Int32 => "i32",
            Self::Int64 => "i64",
            Self::Int128 => "i128",
            Self::Isize => "isize",
            Self::Uint8 => "u8",
            Self::Uint16 => "u16",
            Self::Uint32 => "u32",
            Self::Uint64 => "u64",
            Self::Uint128 => "u128",
            Self::Usize => "usize",
            Self::Float => "f32",
            Self::Double => "f64",
        }
    }

    /// Returns true if this is a signed integer type.
    #[must_use]
    pub const fn is_signed(&self) -> bool {
        matches!(
            self,
            Self::Int8 | Self::Int16 | Self::Int32 | Self::Int64 | Self::Int128 | Self::Isize
        )
    }

    /// Returns true if this is an unsigned integer type.
    #[must_use]
    pub const fn is_unsigned(&self) -> bool {
        matches!(
            self,
            Self::Uint8 | Self::Uint16 | Self::Uint32 | Self::Uint64 | Self::Uint128 | Self::Usize
        )
    }

    /// Returns true if this is any integer type.
    #[must_use]
    pub const fn is_integer(&self) -> bool {
        self.is_signed() || self.is_unsigned()
    }

    /// Returns true if this is a floating point type.
    #[must_use]
    pub const fn is_float(&self) -> bool {
        matches!(self, Self::Float | Self::Double)
    }

    /// Returns true if this is a textual type.
    #[must_use]
    pub const fn is_text(&self) -> bool {
        matches!(self, Self::String | Self::Char)
    }
}

/// Transparent wrappers that the walker looks through.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PointerKind {
    /// `Option<T>`.
    Option,
    /// `Box<T>`.
    Box,
    /// `std::rc::Rc<T>`.
    Rc,
    /// `std::sync::Arc<T>`.
    Arc,
}

impl PointerKind {
    /// Returns the wrapper's type name.
    #[must_use]
    pub const fn type_name(&self) -> &'static str {
        match self {
            Self::Option => "Option",
            Self::Box => "Box",
            Self::Rc => "std::rc::Rc",
            Self::Arc => "std::sync::Arc",
        }
    }

    /// Wraps a value expression in this pointer.
    #[must_use]
    pub fn wrap(&self, expr: &str) -> String {
        match self {
            Self::Option => format!("Some({expr})"),
            Self::Box => format!("Box::new({expr})"),
            Self::Rc => format!("std::rc::Rc::new({expr})"),
            Self::Arc => format!("std::sync::Arc::new({expr})"),
        }
    }
}

/// Homogeneous collection flavours.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SeqKind {
    /// `Vec<T>`.
    Vec,
    /// `std::collections::VecDeque<T>`.
    VecDeque,
    /// `std::collections::HashSet<T>`.
    HashSet,
    /// `std::collections::BTreeSet<T>`.
    BTreeSet,
}

impl SeqKind {
    /// Returns the collection's type name.
    #[must_use]
    pub const fn type_name(&self) -> &'static str {
        match self {
            Self::Vec => "Vec",
            Self::VecDeque => "std::collections::VecDeque",
            Self::HashSet => "std::collections::HashSet",
            Self::BTreeSet => "std::collections::BTreeSet",
        }
    }
}

/// Keyed collection flavours.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MapKind {
    /// `std::collections::HashMap<K, V>`.
    HashMap,
    /// `std::collections::BTreeMap<K, V>`.
    BTreeMap,
}

impl MapKind {
    /// Returns the map's type name.
    #[must_use]
    pub const fn type_name(&self) -> &'static str {
        match self {
            Self::HashMap => "std::collections::HashMap",
            Self::BTreeMap => "std::collections::BTreeMap",
        }
    }
}

/// Structural category of a type.
#[derive(Debug, Clone)]
pub enum Shape {
    /// Scalar value.
    Primitive(PrimitiveType),
    /// Transparent wrapper around another type.
    Pointer(PointerKind, TypeRef),
    /// Homogeneous ordered or unordered collection.
    Seq(SeqKind, TypeRef),
    /// Keyed collection.
    Map(MapKind, TypeRef, TypeRef),
    /// Record with named fields, in declaration order.
    Struct(Vec<FieldDesc>),
    /// Anything the walker cannot look into (trait objects, functions, ...).
    Opaque,
}

/// Descriptor of a Rust type.
#[derive(Debug, Clone)]
pub struct TypeDesc {
    /// Short type name (`NestedBase`, `Vec<String>`).
    pub name: Cow<'static, str>,
    /// Path used when the type is named in generated code.
    pub path: Cow<'static, str>,
    /// Structural category.
    pub shape: Shape,
}

impl TypeDesc {
    /// Creates a descriptor for a primitive.
    #[must_use]
    pub fn primitive(prim: PrimitiveType) -> Self {
        Self {
            name: Cow::Borrowed(prim.rust_type()),
            path: Cow::Borrowed(prim.rust_type()),
            shape: Shape::Primitive(prim),
        }
    }

    /// Creates a descriptor for a struct with named fields.
    #[must_use]
    pub fn structure(
        name: impl Into<Cow<'static, str>>,
        path: impl Into<Cow<'static, str>>,
        fields: Vec<FieldDesc>,
    ) -> Self {
        Self {
            name: name.into(),
            path: path.into(),
            shape: Shape::Struct(fields),
        }
    }

    /// Creates a descriptor for a type the walker cannot look into.
    #[must_use]
    pub fn opaque(name: impl Into<Cow<'static, str>>, path: impl Into<Cow<'static, str>>) -> Self {
        Self {
            name: name.into(),
            path: path.into(),
            shape: Shape::Opaque,
        }
    }

    /// Creates a descriptor for a pointer-like wrapper.
    #[must_use]
    pub fn pointer(kind: PointerKind, inner: TypeRef) -> Self {
        let path = format!("{}<{}>", kind.type_name(), inner().path);
        Self {
            name: Cow::Owned(path.clone()),
            path: Cow::Owned(path),
            shape: Shape::Pointer(kind, inner),
        }
    }

    /// Creates a descriptor for a homogeneous collection.
    #[must_use]
    pub fn seq(kind: SeqKind, elem: TypeRef) -> Self {
        let path = format!("{}<{}>", kind.type_name(), elem().path);
        Self {
            name: Cow::Owned(path.clone()),
            path: Cow::Owned(path),
            shape: Shape::Seq(kind, elem),
        }
    }

    /// Creates a descriptor for a keyed collection.
    #[must_use]
    pub fn map(kind: MapKind, key: TypeRef, value: TypeRef) -> Self {
        let path = format!("{}<{}, {}>", kind.type_name(), key().path, value().path);
        Self {
            name: Cow::Owned(path.clone()),
            path: Cow::Owned(path),
            shape: Shape::Map(kind, key, value),
        }
    }

    /// Returns the type with every pointer layer removed.
    #[must_use]
    pub fn effective(&self) -> TypeDesc {
        match &self.shape {
            Shape::Pointer(_, inner) => inner().effective(),
            _ => self.clone(),
        }
    }

    /// Returns the pointer layers wrapping this type, outermost first.
    #[must_use]
    pub fn pointer_layers(&self) -> Vec<PointerKind> {
        let mut layers = Vec::new();
        let mut current = self.clone();
        while let Shape::Pointer(kind, inner) = current.shape {
            layers.push(kind);
            current = inner();
        }
        layers
    }

    /// Returns the fields of a struct descriptor, or an empty slice.
    #[must_use]
    pub fn fields(&self) -> &[FieldDesc] {
        match &self.shape {
            Shape::Struct(fields) => fields,
            _ => &[],
        }
    }

    /// Returns true if this is a struct descriptor.
    #[must_use]
    pub const fn is_struct(&self) -> bool {
        matches!(self.shape, Shape::Struct(_))
    }

    /// Returns the primitive type, if this is a primitive descriptor.
    #[must_use]
    pub const fn as_primitive(&self) -> Option<PrimitiveType> {
        match self.shape {
            Shape::Primitive(prim) => Some(prim),
            _ => None,
        }
    }

    /// Returns a short label of the shape, used in diagnostics.
    #[must_use]
    pub const fn shape_label(&self) -> &'static str {
        match self.shape {
            Shape::Primitive(_) => "primitive",
            Shape::Pointer(..) => "pointer",
            Shape::Seq(..) => "sequence",
            Shape::Map(..) => "map",
            Shape::Struct(_) => "struct",
            Shape::Opaque => "opaque",
        }
    }
}

impl fmt::Display for TypeDesc {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.path)
    }
}

/// Per-field hints recorded by `#[derive(Reflect)]`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldHints {
    /// Emitted key override.
    pub rename: Option<Cow<'static, str>>,
    /// Drop the field from the schema.
    pub skip: bool,
    /// Merge the nested struct's fields into the parent level.
    pub flatten: bool,
}

/// Descriptor of a named struct field.
#[derive(Debug, Clone)]
pub struct FieldDesc {
    /// Field identifier as written in the struct.
    pub name: Cow<'static, str>,
    /// Declared type, possibly pointer-wrapped.
    pub ty: TypeRef,
    /// Derive hints.
    pub hints: FieldHints,
}

impl FieldDesc {
    /// Creates a field descriptor without hints.
    #[must_use]
    pub fn new(name: impl Into<Cow<'static, str>>, ty: TypeRef) -> Self {
        Self {
            name: name.into(),
            ty,
            hints: FieldHints::default(),
        }
    }

    /// Attaches derive hints.
    #[must_use]
    pub fn with_hints(mut self, hints: FieldHints) -> Self {
        self.hints = hints;
        self
    }

    /// Resolves the declared type.
    #[must_use]
    pub fn declared_type(&self) -> TypeDesc {
        (self.ty)()
    }

    /// Resolves the declared type with pointer layers removed.
    #[must_use]
    pub fn effective_type(&self) -> TypeDesc {
        self.declared_type().effective()
    }

    /// Returns the field identifier usable in a local binding name.
    #[must_use]
    pub fn binding_name(&self) -> &str {
        self.name.strip_prefix("r#").unwrap_or(&self.name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn string_desc() -> TypeDesc {
        TypeDesc::primitive(PrimitiveType::String)
    }

    fn optional_boxed_string() -> TypeDesc {
        TypeDesc::pointer(PointerKind::Option, boxed_string)
    }

    fn boxed_string() -> TypeDesc {
        TypeDesc::pointer(PointerKind::Box, string_desc)
    }

    fn node_desc() -> TypeDesc {
        TypeDesc::structure(
            "Node",
            "crate::Node",
            vec![
                FieldDesc::new("value", string_desc),
                FieldDesc::new("children", node_children),
            ],
        )
    }

    fn node_children() -> TypeDesc {
        TypeDesc::seq(SeqKind::Vec, node_desc)
    }

    #[test]
    fn test_primitive_classification() {
        assert!(PrimitiveType::Int32.is_signed());
        assert!(PrimitiveType::Usize.is_unsigned());
        assert!(PrimitiveType::Uint8.is_integer());
        assert!(PrimitiveType::Double.is_float());
        assert!(PrimitiveType::Char.is_text());
        assert!(!PrimitiveType::Bool.is_integer());
    }

    #[test]
    fn test_pointer_path_and_effective() {
        let desc = optional_boxed_string();
        assert_eq!(desc.path, "Option<Box<String>>");
        assert_eq!(
            desc.pointer_layers(),
            vec![PointerKind::Option, PointerKind::Box]
        );
        let effective = desc.effective();
        assert_eq!(effective.as_primitive(), Some(PrimitiveType::String));
        assert!(effective.pointer_layers().is_empty());
    }

    #[test]
    fn test_self_referential_descriptor() {
        let node = node_desc();
        assert!(node.is_struct());
        assert_eq!(node.fields().len(), 2);
        let children = node.fields()[1].declared_type();
        assert_eq!(children.path, "Vec<crate::Node>");
        assert_eq!(children.shape_label(), "sequence");
    }

    #[test]
    fn test_pointer_wrap() {
        assert_eq!(PointerKind::Option.wrap("x"), "Some(x)");
        assert_eq!(PointerKind::Box.wrap("x"), "Box::new(x)");
        assert_eq!(PointerKind::Arc.wrap("x"), "std::sync::Arc::new(x)");
    }

    #[test]
    fn test_binding_name_strips_raw_prefix() {
        let field = FieldDesc::new("r#type", string_desc);
        assert_eq!(field.binding_name(), "type");
        let field = FieldDesc::new("plain", string_desc);
        assert_eq!(field.binding_name(), "plain");
    }

    #[test]
    fn test_map_path() {
        fn labels() -> TypeDesc {
            TypeDesc::map(MapKind::BTreeMap, string_desc, string_desc)
        }
        assert_eq!(
            labels().path,
            "std::collections::BTreeMap<String, String>"
        );
    }
}
