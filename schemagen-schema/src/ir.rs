//! Intermediate representation for code generation.
//!
//! The walker produces a schema mapping together with a metadata tree of
//! the same structure. The metadata keeps the original field descriptors and
//! nested type information that the expand emitter needs and that the schema
//! itself does not carry.

use crate::types::SchemaMap;
use schemagen_core::{FieldDesc, TypeDesc, underscore};
use std::borrow::Cow;
use std::collections::HashMap;

/// Result of deriving a schema from a type.
#[derive(Debug, Clone)]
pub struct Derivation {
    /// Field name to schema mapping.
    pub schema: SchemaMap,
    /// Metadata tree, symmetrical with `schema`.
    pub meta: MetaResource,
}

/// Metadata of one struct level: a top-level resource or a nested element.
#[derive(Debug, Clone)]
pub struct MetaResource {
    /// Type this level was derived from.
    pub ty: TypeDesc,
    /// Metadata per emitted key.
    pub schema: HashMap<String, MetaSchema>,
}

impl MetaResource {
    /// Creates an empty metadata level for a type.
    #[must_use]
    pub fn new(ty: TypeDesc) -> Self {
        Self {
            ty,
            schema: HashMap::new(),
        }
    }

    /// Returns the emitted keys in lexicographic order.
    #[must_use]
    pub fn sorted_keys(&self) -> Vec<&str> {
        let mut keys: Vec<&str> = self.schema.keys().map(String::as_str).collect();
        keys.sort_unstable();
        keys
    }

    /// Returns the name of the expand function generated for this level.
    #[must_use]
    pub fn expand_fn_name(&self) -> String {
        format!("expand_{}", underscore(&self.ty.name))
    }
}

/// Metadata of one schema entry.
#[derive(Debug, Clone)]
pub struct MetaSchema {
    /// Field the entry was derived from, after filtering.
    pub field: FieldDesc,
    /// Nested level, for struct fields and collections of structs.
    pub elem: Option<MetaResource>,
    /// Fields the entry was promoted through, outermost first.
    ///
    /// Empty unless the entry was merged up from a flattened struct.
    pub owners: Vec<Cow<'static, str>>,
}

impl MetaSchema {
    /// Creates a metadata entry without a nested level.
    #[must_use]
    pub fn new(field: FieldDesc) -> Self {
        Self {
            field,
            elem: None,
            owners: Vec::new(),
        }
    }

    /// Returns the place expression of the field relative to `base`.
    ///
    /// ```
    /// use schemagen_core::{FieldDesc, PrimitiveType, TypeDesc};
    /// use schemagen_schema::MetaSchema;
    ///
    /// fn string_desc() -> TypeDesc {
    ///     TypeDesc::primitive(PrimitiveType::String)
    /// }
    ///
    /// let mut meta = MetaSchema::new(FieldDesc::new("name", string_desc));
    /// assert_eq!(meta.place("obj"), "obj.name");
    /// meta.owners.push("common".into());
    /// assert_eq!(meta.place("obj"), "obj.common.name");
    /// ```
    #[must_use]
    pub fn place(&self, base: &str) -> String {
        let mut place = base.to_string();
        for owner in &self.owners {
            place.push('.');
            place.push_str(owner);
        }
        place.push('.');
        place.push_str(&self.field.name);
        place
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use schemagen_core::{PrimitiveType, TypeDesc};

    fn string_desc() -> TypeDesc {
        TypeDesc::primitive(PrimitiveType::String)
    }

    #[test]
    fn test_sorted_keys() {
        let mut meta = MetaResource::new(TypeDesc::structure("Plain", "crate::Plain", Vec::new()));
        for key in ["zeta", "alpha", "mid"] {
            meta.schema
                .insert(key.to_string(), MetaSchema::new(FieldDesc::new(key, string_desc)));
        }
        assert_eq!(meta.sorted_keys(), vec!["alpha", "mid", "zeta"]);
    }

    #[test]
    fn test_expand_fn_name() {
        let meta = MetaResource::new(TypeDesc::structure(
            "DVSCreateSpec",
            "types::DVSCreateSpec",
            Vec::new(),
        ));
        assert_eq!(meta.expand_fn_name(), "expand_dvs_create_spec");
    }
}
