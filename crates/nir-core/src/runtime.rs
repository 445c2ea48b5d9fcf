// runtime.rs
//
// Names of the well-known runtime classes the IR algebra refers to: boxed
// primitives, the typed array classes, and the boxing/unboxing table.

use crate::symbol::Top;
use crate::ty::Type;

pub const OBJECT: &str = "java.lang.Object";
pub const CLASS: &str = "java.lang.Class";
pub const STRING: &str = "java.lang.String";

pub const RUNTIME_PACKAGE: &str = "scala.scalanative.runtime.package$";
pub const RUNTIME_NOTHING: &str = "scala.runtime.Nothing$";
pub const BOXED_NULL: &str = "scala.runtime.Null$";
pub const BOXED_UNIT: &str = "scala.runtime.BoxedUnit";
pub const BOXED_UNIT_MODULE: &str = "scala.scalanative.runtime.BoxedUnit$";
pub const BOXED_POINTER: &str = "scala.scalanative.unsafe.Ptr";

pub const BOOLEAN_ARRAY: &str = "scala.scalanative.runtime.BooleanArray";
pub const CHAR_ARRAY: &str = "scala.scalanative.runtime.CharArray";
pub const BYTE_ARRAY: &str = "scala.scalanative.runtime.ByteArray";
pub const SHORT_ARRAY: &str = "scala.scalanative.runtime.ShortArray";
pub const INT_ARRAY: &str = "scala.scalanative.runtime.IntArray";
pub const LONG_ARRAY: &str = "scala.scalanative.runtime.LongArray";
pub const FLOAT_ARRAY: &str = "scala.scalanative.runtime.FloatArray";
pub const DOUBLE_ARRAY: &str = "scala.scalanative.runtime.DoubleArray";
pub const OBJECT_ARRAY: &str = "scala.scalanative.runtime.ObjectArray";

/// A plain (inexact, nullable) reference to the class named `name`.
pub fn reference(name: &str) -> Type {
    Type::Reference {
        name: Top::new(name),
        exact: false,
        nullable: true,
    }
}

/// The name of the runtime class representing arrays of `element`.
pub fn array_class_of(element: &Type) -> Top {
    let name = if *element == Type::u1() {
        BOOLEAN_ARRAY
    } else if *element == Type::u16() {
        CHAR_ARRAY
    } else if *element == Type::i8() {
        BYTE_ARRAY
    } else if *element == Type::i16() {
        SHORT_ARRAY
    } else if *element == Type::i32() {
        INT_ARRAY
    } else if *element == Type::i64() {
        LONG_ARRAY
    } else if *element == Type::f32() {
        FLOAT_ARRAY
    } else if *element == Type::f64() {
        DOUBLE_ARRAY
    } else {
        OBJECT_ARRAY
    };
    Top::new(name)
}

/// The primitive type boxed by the class named `name`, if it is one of the
/// designated box classes.
pub fn unboxed(name: &str) -> Option<Type> {
    match name {
        "scala.scalanative.unsafe.CArray"
        | "scala.scalanative.unsafe.CVarArgList"
        | "scala.scalanative.unsafe.Ptr" => Some(Type::pointer()),
        "scala.scalanative.unsafe.Size" => Some(Type::size()),
        "java.lang.Boolean" => Some(Type::u1()),
        "java.lang.Character" => Some(Type::u16()),
        "java.lang.Byte" => Some(Type::i8()),
        "java.lang.Short" => Some(Type::i16()),
        "java.lang.Integer" => Some(Type::i32()),
        "java.lang.Long" => Some(Type::i64()),
        "java.lang.Float" => Some(Type::f32()),
        "java.lang.Double" => Some(Type::f64()),
        _ => name
            .strip_prefix("scala.scalanative.unsafe.CFuncPtr")
            .filter(|suffix| (0..22u32).any(|arity| *suffix == arity.to_string()))
            .map(|_| Type::pointer()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn array_classes_by_element() {
        assert_eq!(array_class_of(&Type::u1()).id, BOOLEAN_ARRAY);
        assert_eq!(array_class_of(&Type::i32()).id, INT_ARRAY);
        assert_eq!(array_class_of(&Type::f64()).id, DOUBLE_ARRAY);
        assert_eq!(array_class_of(&reference(OBJECT)).id, OBJECT_ARRAY);
        // An unsigned 32-bit integer is not one of the primitive array
        // elements and falls back to the object array.
        assert_eq!(
            array_class_of(&Type::Numeric(crate::ty::Numeric::integer(32, false))).id,
            OBJECT_ARRAY
        );
    }

    #[test]
    fn unboxing_table() {
        assert_eq!(unboxed("java.lang.Integer"), Some(Type::i32()));
        assert_eq!(unboxed("java.lang.Boolean"), Some(Type::u1()));
        assert_eq!(unboxed("scala.scalanative.unsafe.Ptr"), Some(Type::pointer()));
        assert_eq!(unboxed("scala.scalanative.unsafe.Size"), Some(Type::size()));
        assert_eq!(unboxed("java.lang.Object"), None);
    }

    #[test]
    fn cfuncptr_family_unboxes_to_pointer() {
        for arity in 0..22 {
            let name = format!("scala.scalanative.unsafe.CFuncPtr{arity}");
            assert_eq!(unboxed(&name), Some(Type::pointer()), "{name}");
        }
        assert_eq!(unboxed("scala.scalanative.unsafe.CFuncPtr22"), None);
        assert_eq!(unboxed("scala.scalanative.unsafe.CFuncPtr"), None);
        assert_eq!(unboxed("scala.scalanative.unsafe.CFuncPtrX"), None);
    }
}
