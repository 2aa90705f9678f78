//! Type classification.
//!
//! Maps a type descriptor to the schema value kind the walker assigns when
//! no filter has chosen one.

use crate::types::ValueKind;
use schemagen_core::{SeqKind, Shape, TypeDesc};

/// Classifies a type into a schema value kind.
///
/// Returns `None` for types the walker cannot represent (trait objects,
/// opaque handles). That is not an error: the walker drops such fields
/// unless a filter supplied a kind first.
///
/// Ordered collections become `List`, unless their element itself classifies
/// as `List` (nested collections, structs), in which case they become `Set`.
/// Set collections are always `Set`. Filters override this per field by
/// setting the kind before classification runs.
#[must_use]
pub fn classify(ty: &TypeDesc) -> Option<ValueKind> {
    match &ty.shape {
        Shape::Primitive(prim) => {
            if prim.is_integer() {
                Some(ValueKind::Int)
            } else if prim.is_float() {
                Some(ValueKind::Float)
            } else if prim.is_text() {
                Some(ValueKind::String)
            } else {
                Some(ValueKind::Bool)
            }
        }
        Shape::Pointer(_, inner) => classify(&inner()),
        Shape::Seq(SeqKind::HashSet | SeqKind::BTreeSet, _) => Some(ValueKind::Set),
        Shape::Seq(_, elem) => {
            if classify(&elem()) == Some(ValueKind::List) {
                Some(ValueKind::Set)
            } else {
                Some(ValueKind::List)
            }
        }
        Shape::Map(..) => Some(ValueKind::Map),
        Shape::Struct(_) => Some(ValueKind::List),
        Shape::Opaque => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use schemagen_core::Reflect;
    use std::collections::{BTreeMap, HashSet};

    fn plain() -> TypeDesc {
        TypeDesc::structure("Plain", "crate::Plain", Vec::new())
    }

    fn plain_list() -> TypeDesc {
        TypeDesc::seq(SeqKind::Vec, plain)
    }

    fn any_desc() -> TypeDesc {
        <dyn std::any::Any as Reflect>::type_desc()
    }

    #[test]
    fn test_classify_primitives() {
        assert_eq!(classify(&i8::type_desc()), Some(ValueKind::Int));
        assert_eq!(classify(&u64::type_desc()), Some(ValueKind::Int));
        assert_eq!(classify(&f32::type_desc()), Some(ValueKind::Float));
        assert_eq!(classify(&String::type_desc()), Some(ValueKind::String));
        assert_eq!(classify(&char::type_desc()), Some(ValueKind::String));
        assert_eq!(classify(&bool::type_desc()), Some(ValueKind::Bool));
    }

    #[test]
    fn test_classify_sequences() {
        assert_eq!(classify(&<Vec<String>>::type_desc()), Some(ValueKind::List));
        assert_eq!(classify(&<Vec<Vec<i32>>>::type_desc()), Some(ValueKind::Set));
        assert_eq!(classify(&plain_list()), Some(ValueKind::Set));
        assert_eq!(classify(&<HashSet<String>>::type_desc()), Some(ValueKind::Set));
    }

    #[test]
    fn test_classify_sequence_of_opaque_stays_list() {
        fn opaque_list() -> TypeDesc {
            TypeDesc::seq(SeqKind::Vec, any_desc)
        }
        assert_eq!(classify(&opaque_list()), Some(ValueKind::List));
    }

    #[test]
    fn test_classify_composites() {
        assert_eq!(classify(&plain()), Some(ValueKind::List));
        assert_eq!(
            classify(&<BTreeMap<String, i64>>::type_desc()),
            Some(ValueKind::Map)
        );
        assert_eq!(classify(&<Option<Box<u8>>>::type_desc()), Some(ValueKind::Int));
    }

    #[test]
    fn test_classify_opaque() {
        assert_eq!(classify(&any_desc()), None);
        assert_eq!(classify(&<Box<dyn std::any::Any>>::type_desc()), None);
    }
}
