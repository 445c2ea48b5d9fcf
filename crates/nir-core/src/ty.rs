// ty.rs
//
// The type algebra of the IR: predefined types, packed numeric types, and
// the recursive composites, together with normalization, element paths,
// and the boxing relations.

use std::fmt;

use thiserror::Error;

use crate::runtime;
use crate::symbol::Top;

/// A failure of a derived computation on types.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TypeError {
    #[error("index {index} is out of range in '{ty}'")]
    OutOfRange { index: u32, ty: String },

    #[error("type '{ty}' has no element types")]
    NotIndexable { ty: String },

    #[error("type '{ty}' has no corresponding class")]
    NoClass { ty: String },

    #[error("type '{ty}' is not a box")]
    NotABox { ty: String },

    #[error("type '{ty}' is not a variable slot")]
    NotAVar { ty: String },
}

/// A predefined type symbol.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Predefined {
    Null,
    Unit,
    Pointer,
    Size,
    Vararg,
    Nothing,
    Virtual,
}

impl fmt::Display for Predefined {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Predefined::Null => "null",
            Predefined::Unit => "unit",
            Predefined::Pointer => "ptr",
            Predefined::Size => "size",
            Predefined::Vararg => "...",
            Predefined::Nothing => "nothing",
            Predefined::Virtual => "virtual",
        };
        f.write_str(s)
    }
}

/// The type of a number, packed into 16 bits.
///
/// Bit 15 is set for integers, in which case bit 14 encodes signedness.
/// The 14 least significant bits encode the bit width.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Numeric(u16);

impl Numeric {
    const INTEGER_BIT: u16 = 1 << 15;
    const SIGNED_BIT: u16 = 1 << 14;
    const WIDTH_MASK: u16 = (1 << 14) - 1;

    /// The type of integers having `width` bits, signed iff `signed`.
    ///
    /// Panics unless `width` is smaller than 2^14.
    pub fn integer(width: u16, signed: bool) -> Self {
        assert!(width < (1 << 14), "invalid integer width");
        let sign = if signed { Self::SIGNED_BIT } else { 0 };
        Self(Self::INTEGER_BIT | sign | width)
    }

    /// The type of floating-point numbers having `width` bits.
    ///
    /// Panics unless `width` is 32 or 64.
    pub fn floating_point(width: u16) -> Self {
        assert!(width == 32 || width == 64, "invalid floating-point width");
        Self(width)
    }

    pub fn is_integer(self) -> bool {
        self.0 & Self::INTEGER_BIT != 0
    }

    pub fn is_signed(self) -> bool {
        self.0 & Self::SIGNED_BIT != 0
    }

    pub fn is_floating_point(self) -> bool {
        !self.is_integer()
    }

    /// The number of bits used by instances of the denoted type.
    pub fn bit_width(self) -> u32 {
        u32::from(self.0 & Self::WIDTH_MASK)
    }
}

impl fmt::Display for Numeric {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_integer() {
            let prefix = if self.is_signed() { 'i' } else { 'u' };
            write!(f, "{}{}", prefix, self.bit_width())
        } else {
            write!(f, "f{}", self.bit_width())
        }
    }
}

/// The type of a function.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct FunctionType {
    /// The types of the function's parameters.
    pub parameters: Vec<Type>,
    /// The type of the function's return value.
    pub return_type: Box<Type>,
}

impl FunctionType {
    pub fn new(parameters: Vec<Type>, return_type: Type) -> Self {
        Self {
            parameters,
            return_type: Box::new(return_type),
        }
    }
}

impl fmt::Display for FunctionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("(")?;
        for (i, p) in self.parameters.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            p.fmt(f)?;
        }
        write!(f, ") => {}", self.return_type)
    }
}

/// The type of an IR entity.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Type {
    /// A predefined type.
    Predefined(Predefined),
    /// An integer or floating-point type.
    Numeric(Numeric),
    /// A fixed-size homogeneous aggregate.
    ArrayValue { element: Box<Type>, size: u64 },
    /// A reference to a runtime-managed array.
    ArrayReference { element: Box<Type>, nullable: bool },
    /// A heterogeneous aggregate.
    Struct(Vec<Type>),
    /// A reference to a named class, trait, or module instance.
    Reference { name: Top, exact: bool, nullable: bool },
    /// A mutable cell holding a value of the inner type.
    Var(Box<Type>),
    /// The type of a function.
    Function(FunctionType),
}

impl Type {
    pub fn null() -> Self {
        Type::Predefined(Predefined::Null)
    }

    pub fn unit() -> Self {
        Type::Predefined(Predefined::Unit)
    }

    pub fn pointer() -> Self {
        Type::Predefined(Predefined::Pointer)
    }

    pub fn size() -> Self {
        Type::Predefined(Predefined::Size)
    }

    pub fn vararg() -> Self {
        Type::Predefined(Predefined::Vararg)
    }

    pub fn nothing() -> Self {
        Type::Predefined(Predefined::Nothing)
    }

    pub fn virtual_() -> Self {
        Type::Predefined(Predefined::Virtual)
    }

    /// A 1-bit unsigned integer, the type of Booleans.
    pub fn u1() -> Self {
        Type::Numeric(Numeric::integer(1, false))
    }

    /// An 8-bit signed integer.
    pub fn i8() -> Self {
        Type::Numeric(Numeric::integer(8, true))
    }

    /// A 16-bit signed integer.
    pub fn i16() -> Self {
        Type::Numeric(Numeric::integer(16, true))
    }

    /// A 16-bit unsigned integer, the type of characters.
    pub fn u16() -> Self {
        Type::Numeric(Numeric::integer(16, false))
    }

    /// A 32-bit signed integer.
    pub fn i32() -> Self {
        Type::Numeric(Numeric::integer(32, true))
    }

    /// A 64-bit signed integer.
    pub fn i64() -> Self {
        Type::Numeric(Numeric::integer(64, true))
    }

    /// A 32-bit IEEE 754 single-precision float.
    pub fn f32() -> Self {
        Type::Numeric(Numeric::floating_point(32))
    }

    /// A 64-bit IEEE 754 double-precision float.
    pub fn f64() -> Self {
        Type::Numeric(Numeric::floating_point(64))
    }

    pub fn array_value(element: Type, size: u64) -> Self {
        Type::ArrayValue {
            element: Box::new(element),
            size,
        }
    }

    pub fn array_reference(element: Type, nullable: bool) -> Self {
        Type::ArrayReference {
            element: Box::new(element),
            nullable,
        }
    }

    pub fn var(inner: Type) -> Self {
        Type::Var(Box::new(inner))
    }

    /// The type of the `index`-th part of an instance of this type.
    pub fn element_at(&self, index: u32) -> Result<&Type, TypeError> {
        match self {
            Type::ArrayValue { element, size } => {
                if u64::from(index) < *size {
                    Ok(element)
                } else {
                    Err(TypeError::OutOfRange {
                        index,
                        ty: self.to_string(),
                    })
                }
            }
            Type::Struct(elements) => {
                elements
                    .get(index as usize)
                    .ok_or_else(|| TypeError::OutOfRange {
                        index,
                        ty: self.to_string(),
                    })
            }
            _ => Err(TypeError::NotIndexable {
                ty: self.to_string(),
            }),
        }
    }

    /// The type of the part identified by `path` relative to an instance of
    /// this type. The empty path identifies the instance itself.
    pub fn element_at_path<I>(&self, path: I) -> Result<&Type, TypeError>
    where
        I: IntoIterator<Item = u32>,
    {
        let mut current = self;
        for index in path {
            current = current.element_at(index)?;
        }
        Ok(current)
    }

    /// The identifier of the class corresponding to this type.
    pub fn class_name(&self) -> Result<Top, TypeError> {
        match self {
            Type::Predefined(Predefined::Null) => Ok(Top::new(runtime::BOXED_NULL)),
            Type::Predefined(Predefined::Unit) => Ok(Top::new(runtime::BOXED_UNIT)),
            Type::ArrayReference { element, .. } => Ok(runtime::array_class_of(element)),
            Type::Reference { name, .. } => Ok(name.clone()),
            _ => Err(TypeError::NoClass {
                ty: self.to_string(),
            }),
        }
    }

    /// The type of a box's contents, if this type denotes a box.
    pub fn unboxed(&self) -> Option<Type> {
        match self {
            Type::Reference { name, .. } => runtime::unboxed(&name.id),
            _ => None,
        }
    }

    /// The canonical form of this type: reference refinements (exactness,
    /// non-nullability) are erased, componentwise.
    pub fn normalized(&self) -> Type {
        match self {
            Type::Predefined(_) | Type::Numeric(_) => self.clone(),
            Type::ArrayValue { element, size } => Type::array_value(element.normalized(), *size),
            Type::ArrayReference { element, .. } => {
                Type::array_reference(element.normalized(), true)
            }
            Type::Struct(elements) => {
                Type::Struct(elements.iter().map(Type::normalized).collect())
            }
            Type::Reference { name, .. } => Type::Reference {
                name: name.clone(),
                exact: false,
                nullable: true,
            },
            Type::Var(inner) => Type::var(inner.normalized()),
            Type::Function(function) => Type::Function(FunctionType::new(
                function.parameters.iter().map(Type::normalized).collect(),
                function.return_type.normalized(),
            )),
        }
    }

    /// Returns `true` if this type denotes a box of `t`.
    pub fn is_box_of(&self, t: &Type) -> bool {
        self.normalized().unboxed().as_ref() == Some(t)
    }

    /// Returns `true` if this type denotes a boxed pointer.
    pub fn is_pointer_box(&self) -> bool {
        self.is_box_of(&Type::pointer())
    }

    /// Returns `true` if this type denotes a reference type.
    pub fn is_reference(&self) -> bool {
        match self {
            Type::Predefined(p) => matches!(p, Predefined::Null | Predefined::Unit),
            Type::Reference { .. } | Type::ArrayReference { .. } => true,
            _ => false,
        }
    }

    /// Returns `true` if the size of this type is known at compile time.
    pub fn has_known_size(&self) -> bool {
        match self {
            Type::Predefined(p) => matches!(p, Predefined::Null | Predefined::Pointer),
            Type::ArrayValue { element, .. } => element.has_known_size(),
            Type::Struct(elements) => elements.iter().all(Type::has_known_size),
            _ => !self.is_reference(),
        }
    }
}

impl fmt::Display for Type {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Type::Predefined(p) => p.fmt(f),
            Type::Numeric(n) => n.fmt(f),
            Type::ArrayValue { element, size } => write!(f, "{element}[{size}]"),
            Type::ArrayReference { element, nullable } => {
                write!(f, "Array[{element}]")?;
                if *nullable {
                    f.write_str("?")?;
                }
                Ok(())
            }
            Type::Struct(elements) => {
                f.write_str("{")?;
                for (i, e) in elements.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    e.fmt(f)?;
                }
                f.write_str("}")
            }
            Type::Reference {
                name,
                exact,
                nullable,
            } => {
                name.fmt(f)?;
                if *exact {
                    f.write_str("!")?;
                }
                if *nullable {
                    f.write_str("?")?;
                }
                Ok(())
            }
            Type::Var(inner) => write!(f, "var[{inner}]"),
            Type::Function(function) => function.fmt(f),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn object() -> Type {
        runtime::reference(runtime::OBJECT)
    }

    #[test]
    fn numeric_packing() {
        let t = Numeric::integer(1, false);
        assert!(t.is_integer());
        assert!(!t.is_signed());
        assert_eq!(t.bit_width(), 1);

        let t = Numeric::integer(64, true);
        assert!(t.is_integer());
        assert!(t.is_signed());
        assert_eq!(t.bit_width(), 64);

        let t = Numeric::floating_point(64);
        assert!(t.is_floating_point());
        assert!(!t.is_integer());
        assert_eq!(t.bit_width(), 64);
    }

    #[test]
    #[should_panic(expected = "invalid integer width")]
    fn numeric_rejects_oversized_width() {
        let _ = Numeric::integer(1 << 14, true);
    }

    #[test]
    fn normalization_is_idempotent() {
        let types = [
            Type::i32(),
            Type::unit(),
            Type::Reference {
                name: Top::new("A"),
                exact: true,
                nullable: false,
            },
            Type::array_reference(Type::i8(), false),
            Type::Struct(vec![
                Type::i32(),
                Type::Reference {
                    name: Top::new("B"),
                    exact: true,
                    nullable: false,
                },
            ]),
            Type::Function(FunctionType::new(
                vec![Type::array_reference(Type::f64(), false)],
                Type::unit(),
            )),
            Type::var(Type::array_reference(object(), false)),
        ];
        for t in &types {
            assert_eq!(t.normalized().normalized(), t.normalized(), "{t}");
        }
    }

    #[test]
    fn normalization_erases_refinement() {
        let t = Type::Reference {
            name: Top::new("A"),
            exact: true,
            nullable: false,
        };
        assert_eq!(
            t.normalized(),
            Type::Reference {
                name: Top::new("A"),
                exact: false,
                nullable: true,
            }
        );

        let t = Type::array_reference(Type::i32(), false);
        assert_eq!(t.normalized(), Type::array_reference(Type::i32(), true));
    }

    #[test]
    fn struct_element_access() {
        let t = Type::Struct(vec![Type::i32(), Type::f64()]);
        assert_eq!(t.element_at(0), Ok(&Type::i32()));
        assert_eq!(t.element_at(1), Ok(&Type::f64()));
        assert_eq!(t.element_at_path([1]), Ok(&Type::f64()));
        assert_eq!(t.element_at_path([]), Ok(&t));
        assert!(matches!(t.element_at(2), Err(TypeError::OutOfRange { .. })));
    }

    #[test]
    fn nested_element_path() {
        let inner = Type::Struct(vec![Type::i8(), Type::i64()]);
        let t = Type::Struct(vec![Type::array_value(inner, 4), Type::pointer()]);
        assert_eq!(t.element_at_path([0, 3, 1]), Ok(&Type::i64()));
        assert!(t.element_at_path([0, 4]).is_err());
        assert!(matches!(
            Type::i32().element_at(0),
            Err(TypeError::NotIndexable { .. })
        ));
    }

    #[test]
    fn reference_classification() {
        assert!(Type::null().is_reference());
        assert!(Type::unit().is_reference());
        assert!(object().is_reference());
        assert!(Type::array_reference(Type::i32(), true).is_reference());

        assert!(!Type::pointer().is_reference());
        assert!(!Type::i32().is_reference());
        assert!(!Type::Struct(vec![object()]).is_reference());
    }

    #[test]
    fn known_sizes() {
        assert!(Type::null().has_known_size());
        assert!(Type::pointer().has_known_size());
        assert!(Type::i32().has_known_size());
        assert!(Type::Struct(vec![Type::i32(), Type::pointer()]).has_known_size());
        assert!(Type::array_value(Type::i8(), 16).has_known_size());

        assert!(!Type::unit().has_known_size());
        assert!(!object().has_known_size());
        assert!(!Type::Struct(vec![Type::i32(), object()]).has_known_size());
        assert!(!Type::array_value(object(), 2).has_known_size());
    }

    #[test]
    fn class_names() {
        assert_eq!(Type::null().class_name().unwrap().id, runtime::BOXED_NULL);
        assert_eq!(Type::unit().class_name().unwrap().id, runtime::BOXED_UNIT);
        assert_eq!(
            Type::array_reference(Type::i32(), false).class_name().unwrap().id,
            runtime::INT_ARRAY
        );
        assert_eq!(object().class_name().unwrap().id, runtime::OBJECT);
        assert!(Type::i32().class_name().is_err());
    }

    #[test]
    fn boxing_relations() {
        let boxed_int = Type::Reference {
            name: Top::new("java.lang.Integer"),
            exact: true,
            nullable: false,
        };
        assert!(boxed_int.is_box_of(&Type::i32()));
        assert!(!boxed_int.is_box_of(&Type::i64()));
        assert!(!boxed_int.is_pointer_box());

        let ptr_box = runtime::reference(runtime::BOXED_POINTER);
        assert!(ptr_box.is_pointer_box());
        assert_eq!(ptr_box.unboxed(), Some(Type::pointer()));

        assert_eq!(object().unboxed(), None);
        assert_eq!(Type::i32().unboxed(), None);
    }

    #[test]
    fn display() {
        assert_eq!(Type::i32().to_string(), "i32");
        assert_eq!(Type::u1().to_string(), "u1");
        assert_eq!(Type::f64().to_string(), "f64");
        assert_eq!(Type::vararg().to_string(), "...");
        assert_eq!(Type::array_value(Type::i8(), 3).to_string(), "i8[3]");
        assert_eq!(
            Type::array_reference(Type::i32(), true).to_string(),
            "Array[i32]?"
        );
        assert_eq!(
            Type::Struct(vec![Type::i32(), Type::f64()]).to_string(),
            "{i32, f64}"
        );
        assert_eq!(
            Type::Function(FunctionType::new(vec![Type::i32()], Type::unit())).to_string(),
            "(i32) => unit"
        );
        assert_eq!(
            Type::Reference {
                name: Top::new("A"),
                exact: true,
                nullable: true,
            }
            .to_string(),
            "A!?"
        );
        assert_eq!(Type::var(Type::i64()).to_string(), "var[i64]");
    }
}
