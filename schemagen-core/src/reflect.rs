//! The [`Reflect`] trait and its implementations for standard types.

use crate::types::{MapKind, PointerKind, PrimitiveType, SeqKind, TypeDesc};
use std::collections::{BTreeMap, BTreeSet, HashMap, HashSet, VecDeque};
use std::rc::Rc;
use std::sync::Arc;

/// Types that can describe their own structure.
///
/// Implemented for primitives, strings, standard collections and smart
/// pointers. Structs usually get an implementation from
/// `#[derive(Reflect)]`; types the walker should never look into (trait
/// objects, handles) can implement it by returning [`TypeDesc::opaque`].
pub trait Reflect {
    /// Returns the descriptor of this type.
    fn type_desc() -> TypeDesc;
}

macro_rules! impl_primitive {
    ($($ty:ty => $prim:ident),* $(,)?) => {
        $(
            impl Reflect for $ty {
                fn type_desc() -> TypeDesc {
                    TypeDesc::primitive(PrimitiveType::$prim)
                }
            }
        )*
    };
}

impl_primitive! {
    bool => Bool,
    char => Char,
    String => String,
    i8 => Int8,
    i16 => Int16,
    i32 => Int32,
    i64 => Int64,
    i128 => Int128,
    isize => Isize,
    u8 => Uint8,
    u16 => Uint16,
    u32 => Uint32,
    u64 => Uint64,
    u128 => Uint128,
    usize => Usize,
    f32 => Float,
    f64 => Double,
}

impl<T: Reflect> Reflect for Option<T> {
    fn type_desc() -> TypeDesc {
        TypeDesc::pointer(PointerKind::Option, T::type_desc)
    }
}

impl<T: Reflect + ?Sized> Reflect for Box<T> {
    fn type_desc() -> TypeDesc {
        TypeDesc::pointer(PointerKind::Box, T::type_desc)
    }
}

impl<T: Reflect + ?Sized> Reflect for Rc<T> {
    fn type_desc() -> TypeDesc {
        TypeDesc::pointer(PointerKind::Rc, T::type_desc)
    }
}

impl<T: Reflect + ?Sized> Reflect for Arc<T> {
    fn type_desc() -> TypeDesc {
        TypeDesc::pointer(PointerKind::Arc, T::type_desc)
    }
}

impl<T: Reflect> Reflect for Vec<T> {
    fn type_desc() -> TypeDesc {
        TypeDesc::seq(SeqKind::Vec, T::type_desc)
    }
}

impl<T: Reflect> Reflect for VecDeque<T> {
    fn type_desc() -> TypeDesc {
        TypeDesc::seq(SeqKind::VecDeque, T::type_desc)
    }
}

impl<T: Reflect, S> Reflect for HashSet<T, S> {
    fn type_desc() -> TypeDesc {
        TypeDesc::seq(SeqKind::HashSet, T::type_desc)
    }
}

impl<T: Reflect> Reflect for BTreeSet<T> {
    fn type_desc() -> TypeDesc {
        TypeDesc::seq(SeqKind::BTreeSet, T::type_desc)
    }
}

impl<K: Reflect, V: Reflect, S> Reflect for HashMap<K, V, S> {
    fn type_desc() -> TypeDesc {
        TypeDesc::map(MapKind::HashMap, K::type_desc, V::type_desc)
    }
}

impl<K: Reflect, V: Reflect> Reflect for BTreeMap<K, V> {
    fn type_desc() -> TypeDesc {
        TypeDesc::map(MapKind::BTreeMap, K::type_desc, V::type_desc)
    }
}

impl Reflect for dyn std::any::Any {
    fn type_desc() -> TypeDesc {
        TypeDesc::opaque("dyn Any", "dyn std::any::Any")
    }
}

impl Reflect for dyn std::any::Any + Send + Sync {
    fn type_desc() -> TypeDesc {
        TypeDesc::opaque("dyn Any + Send + Sync", "dyn std::any::Any + Send + Sync")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Shape;

    #[test]
    fn test_primitive_impls() {
        assert_eq!(
            u16::type_desc().as_primitive(),
            Some(PrimitiveType::Uint16)
        );
        assert_eq!(
            String::type_desc().as_primitive(),
            Some(PrimitiveType::String)
        );
        assert_eq!(f32::type_desc().path, "f32");
    }

    #[test]
    fn test_collection_impls() {
        let desc = <Vec<Option<i64>>>::type_desc();
        assert_eq!(desc.path, "Vec<Option<i64>>");
        match desc.shape {
            Shape::Seq(SeqKind::Vec, elem) => {
                assert_eq!(elem().pointer_layers(), vec![PointerKind::Option]);
            }
            other => panic!("unexpected shape: {other:?}"),
        }

        let desc = <HashMap<String, bool>>::type_desc();
        assert!(matches!(desc.shape, Shape::Map(MapKind::HashMap, _, _)));
    }

    #[test]
    fn test_boxed_trait_object_is_opaque_behind_pointer() {
        let desc = <Box<dyn std::any::Any>>::type_desc();
        assert_eq!(desc.shape_label(), "pointer");
        assert_eq!(desc.effective().shape_label(), "opaque");
    }
}
