// value.rs
//
// Constant and reference values appearing in the instruction stream.

use std::fmt;

use crate::local::Local;
use crate::runtime;
use crate::symbol::{Symbol, Top};
use crate::ty::Type;

/// A local SSA value together with its type.
#[derive(Debug, Clone, PartialEq)]
pub struct LocalValue {
    /// The identifier of the value.
    pub id: Local,
    /// The type of the value.
    pub ty: Type,
}

impl fmt::Display for LocalValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} : {}", self.id, self.ty)
    }
}

/// A value in the IR.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    /// The constant null reference.
    Null,
    /// The unit value.
    Unit,
    /// The zero value of the given type.
    Zero(Type),
    Boolean(bool),
    /// A 16-bit unsigned Unicode character.
    Char(u16),
    Byte(i8),
    Short(i16),
    Int(i32),
    Long(i64),
    Float(f32),
    Double(f64),
    /// A numeric value suitable to represent the size of a container.
    Size(u64),
    /// A homogeneous collection of values.
    ArrayValue { element: Type, elements: Vec<Value> },
    /// A heterogeneous collection of values.
    Struct(Vec<Value>),
    /// A collection of raw bytes.
    ByteString(Vec<u8>),
    /// A reference to a local SSA value.
    Local(LocalValue),
    /// A reference to a symbol.
    SymbolRef { name: Symbol, ty: Type },
    /// A constant value placed in static memory.
    Constant(Box<Value>),
    /// An instance of the runtime string class.
    String(String),
    /// A virtual value identified by a key.
    Virtual(u64),
    /// The runtime class object of a given symbol.
    ClassOf(Top),
}

impl Value {
    /// The IR type of this value.
    pub fn ty(&self) -> Type {
        match self {
            Value::Null => Type::null(),
            Value::Unit => Type::unit(),
            Value::Zero(t) => t.clone(),
            Value::Boolean(_) => Type::u1(),
            Value::Char(_) => Type::u16(),
            Value::Byte(_) => Type::i8(),
            Value::Short(_) => Type::i16(),
            Value::Int(_) => Type::i32(),
            Value::Long(_) => Type::i64(),
            Value::Float(_) => Type::f32(),
            Value::Double(_) => Type::f64(),
            Value::Size(_) => Type::size(),
            Value::ArrayValue { element, elements } => {
                Type::array_value(element.clone(), elements.len() as u64)
            }
            Value::Struct(elements) => Type::Struct(elements.iter().map(Value::ty).collect()),
            // The stored bytes are implicitly NUL-terminated.
            Value::ByteString(bytes) => Type::array_value(Type::i8(), bytes.len() as u64 + 1),
            Value::Local(local) => local.ty.clone(),
            Value::SymbolRef { ty, .. } => ty.clone(),
            Value::Constant(_) => Type::pointer(),
            Value::String(_) => Type::Reference {
                name: Top::new(runtime::STRING),
                exact: true,
                nullable: false,
            },
            Value::Virtual(_) => Type::virtual_(),
            Value::ClassOf(_) => runtime::reference(runtime::CLASS),
        }
    }

    /// Projects this value as a local.
    pub fn as_local(&self) -> Option<&LocalValue> {
        match self {
            Value::Local(local) => Some(local),
            _ => None,
        }
    }

    /// Consumes this value, yielding its local payload.
    pub fn into_local(self) -> Option<LocalValue> {
        match self {
            Value::Local(local) => Some(local),
            _ => None,
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Null => f.write_str("null"),
            Value::Unit => f.write_str("unit"),
            Value::Zero(t) => write!(f, "zero[{t}]"),
            Value::Boolean(b) => write!(f, "{b}"),
            Value::Char(c) => write!(f, "char {c}"),
            Value::Byte(v) => write!(f, "byte {v}"),
            Value::Short(v) => write!(f, "short {v}"),
            Value::Int(v) => write!(f, "int {v}"),
            Value::Long(v) => write!(f, "long {v}"),
            Value::Float(v) => write!(f, "float {v}"),
            Value::Double(v) => write!(f, "double {v}"),
            Value::Size(v) => write!(f, "size {v}"),
            Value::ArrayValue { element, elements } => {
                write!(f, "array[{element}] [")?;
                for (i, e) in elements.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    e.fmt(f)?;
                }
                f.write_str("]")
            }
            Value::Struct(elements) => {
                f.write_str("{")?;
                for (i, e) in elements.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    e.fmt(f)?;
                }
                f.write_str("}")
            }
            Value::ByteString(bytes) => write!(f, "bytes({})", bytes.len()),
            Value::Local(local) => local.id.fmt(f),
            Value::SymbolRef { name, ty } => write!(f, "@{name} : {ty}"),
            Value::Constant(inner) => write!(f, "const {inner}"),
            Value::String(s) => write!(f, "{s:?}"),
            Value::Virtual(key) => write!(f, "virtual {key}"),
            Value::ClassOf(name) => write!(f, "classOf[{name}]"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn primitive_types() {
        assert_eq!(Value::Null.ty(), Type::null());
        assert_eq!(Value::Unit.ty(), Type::unit());
        assert_eq!(Value::Boolean(true).ty(), Type::u1());
        assert_eq!(Value::Char(65).ty(), Type::u16());
        assert_eq!(Value::Byte(-1).ty(), Type::i8());
        assert_eq!(Value::Short(7).ty(), Type::i16());
        assert_eq!(Value::Int(42).ty(), Type::i32());
        assert_eq!(Value::Long(-9).ty(), Type::i64());
        assert_eq!(Value::Float(0.5).ty(), Type::f32());
        assert_eq!(Value::Double(0.25).ty(), Type::f64());
        assert_eq!(Value::Size(8).ty(), Type::size());
        assert_eq!(Value::Zero(Type::i64()).ty(), Type::i64());
    }

    #[test]
    fn composite_types() {
        let v = Value::Struct(vec![Value::Int(1), Value::Double(2.0)]);
        assert_eq!(v.ty(), Type::Struct(vec![Type::i32(), Type::f64()]));

        let v = Value::ArrayValue {
            element: Type::i32(),
            elements: vec![Value::Int(1), Value::Int(2), Value::Int(3)],
        };
        assert_eq!(v.ty(), Type::array_value(Type::i32(), 3));
    }

    #[test]
    fn byte_string_accounts_for_terminator() {
        let v = Value::ByteString(b"abc".to_vec());
        assert_eq!(v.ty(), Type::array_value(Type::i8(), 4));
    }

    #[test]
    fn reference_types() {
        assert_eq!(
            Value::String("hi".into()).ty(),
            Type::Reference {
                name: Top::new(runtime::STRING),
                exact: true,
                nullable: false,
            }
        );
        assert_eq!(
            Value::ClassOf(Top::new("A")).ty(),
            runtime::reference(runtime::CLASS)
        );
        assert_eq!(
            Value::Constant(Box::new(Value::Int(3))).ty(),
            Type::pointer()
        );
    }

    #[test]
    fn local_projection() {
        let local = LocalValue {
            id: Local(3),
            ty: Type::i32(),
        };
        let v = Value::Local(local.clone());
        assert_eq!(v.as_local(), Some(&local));
        assert_eq!(v.ty(), Type::i32());
        assert_eq!(Value::Int(1).as_local(), None);
    }
}
