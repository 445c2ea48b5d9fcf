// operation.rs
//
// The operations that may appear on the right-hand side of a `let`
// instruction, and the derivation of their result types.

use std::fmt;

use smallvec::SmallVec;

use crate::ops::{BinaryOperator, ComparisonOperator, ConversionOperator, MemoryOrder};
use crate::symbol::{Member, Signature, Top};
use crate::ty::{FunctionType, Type, TypeError};
use crate::value::Value;

/// A path identifying a part nested in an aggregate. Most paths are one or
/// two levels deep.
pub type Path = SmallVec<[u32; 4]>;

/// An operation over typed values.
#[derive(Debug, Clone, PartialEq)]
pub enum Operation {
    /// A function call.
    Call {
        /// The type of the function being called.
        callee_type: FunctionType,
        callee: Value,
        arguments: Vec<Value>,
    },
    /// The loading of a value from memory.
    Load {
        /// The type of the value being loaded.
        ty: Type,
        /// The location in memory from which the value is loaded.
        source: Value,
        /// The atomic ordering constraint, for atomic loads.
        ordering: Option<MemoryOrder>,
    },
    /// The writing of a value to memory.
    Store {
        /// The type of the value being stored.
        ty: Type,
        /// The location in memory being written.
        target: Value,
        /// The value to store.
        source: Value,
        /// The atomic ordering constraint, for atomic stores.
        ordering: Option<MemoryOrder>,
    },
    /// The computation of the address of a part of an aggregate.
    Element {
        /// The type of the object containing the part being accessed.
        whole_type: Type,
        whole: Value,
        path: Path,
    },
    /// The copy of a part out of an aggregate.
    Extract { whole: Value, path: Path },
    /// The replacement of a part in an aggregate.
    Insert {
        whole: Value,
        part: Value,
        path: Path,
    },
    /// The allocation of stack storage.
    StackAllocate {
        /// The type of the storage being allocated.
        ty: Type,
        /// The number of instances for which storage is allocated.
        count: u64,
    },
    /// The application of a binary operator.
    BinaryApply {
        operator: BinaryOperator,
        /// The type of both operands.
        operand_type: Type,
        lhs: Value,
        rhs: Value,
    },
    /// A comparison.
    Compare {
        operator: ComparisonOperator,
        /// The type of both operands.
        operand_type: Type,
        lhs: Value,
        rhs: Value,
    },
    /// The conversion of a value from one type to another.
    Convert {
        operator: ConversionOperator,
        /// The type to which the source is converted.
        target: Type,
        source: Value,
    },
    /// The introduction of a happens-before edge between operations.
    Fence { ordering: MemoryOrder },
    /// The allocation of a class instance.
    ClassAllocate {
        /// The name of the class being allocated.
        name: Top,
        /// The allocation zone, if any.
        zone: Option<Value>,
    },
    /// The loading of a field of a class instance.
    FieldLoad {
        /// The type of the value being loaded.
        ty: Type,
        /// The object containing the field.
        owner: Value,
        /// The name of the field.
        name: Member,
    },
    /// The assignment of a field of a class instance.
    FieldStore {
        /// The type of the value being stored.
        ty: Type,
        /// The object containing the field.
        owner: Value,
        /// The name of the field.
        name: Member,
        /// The value to store.
        source: Value,
    },
    /// The selection of a field's address in a class instance.
    Field {
        /// The object containing the field.
        owner: Value,
        /// The name of the field.
        name: Member,
    },
    /// The selection of a method of a class instance.
    Method { owner: Value, signature: Signature },
    /// The dynamic selection of a method of a class instance.
    DynamicMethod { owner: Value, signature: Signature },
    /// The selection of a module instance.
    Module { name: Top },
    /// The checked conversion of a class instance to another type.
    As { target: Type, source: Value },
    /// A type test.
    Is { target: Type, source: Value },
    /// The copy of a value.
    Copy { source: Value },
    /// The query of a type's size.
    SizeOf { operand: Type },
    /// The query of a type's alignment.
    AlignmentOf { operand: Type },
    /// The boxing of a primitive value.
    Box {
        /// The type of the box.
        box_type: Type,
        /// The value being boxed.
        contents: Value,
    },
    /// The unboxing of a boxed value.
    Unbox {
        /// The type of the box.
        box_type: Type,
        /// The box.
        source: Value,
    },
    /// The introduction of a mutable slot.
    Var { ty: Type },
    /// The loading of a mutable slot.
    VarLoad { slot: Value },
    /// The assignment of a mutable slot.
    VarStore { slot: Value, source: Value },
    /// The allocation of a runtime-managed array.
    ArrayAllocate {
        /// The type of the array's elements.
        element: Type,
        /// The value initializing the array's contents.
        initializer: Value,
        /// The allocation zone, if any.
        zone: Option<Value>,
    },
    /// The loading of an element of a runtime-managed array.
    ArrayLoad {
        /// The type of the value being loaded.
        ty: Type,
        /// The array containing the value.
        owner: Value,
        /// The position of the value in the array.
        position: u32,
    },
    /// The assignment of an element of a runtime-managed array.
    ArrayStore {
        /// The type of the value being stored.
        ty: Type,
        /// The array containing the position being assigned.
        owner: Value,
        /// The position of the value in the array.
        position: u32,
        /// The value to store.
        source: Value,
    },
    /// The query of a runtime-managed array's length.
    ArrayLength { operand: Value },
}

impl Operation {
    /// The type of this operation's result.
    pub fn result_type(&self) -> Result<Type, TypeError> {
        match self {
            Operation::Call { callee_type, .. } => Ok((*callee_type.return_type).clone()),
            Operation::Load { ty, .. }
            | Operation::FieldLoad { ty, .. }
            | Operation::ArrayLoad { ty, .. } => Ok(ty.clone()),
            Operation::Store { .. }
            | Operation::FieldStore { .. }
            | Operation::ArrayStore { .. }
            | Operation::VarStore { .. }
            | Operation::Fence { .. } => Ok(Type::unit()),
            Operation::Element { .. }
            | Operation::Field { .. }
            | Operation::Method { .. }
            | Operation::DynamicMethod { .. }
            | Operation::StackAllocate { .. } => Ok(Type::pointer()),
            Operation::Extract { whole, path } => {
                let whole_type = whole.ty();
                let element = whole_type.element_at_path(path.iter().copied())?;
                Ok(element.clone())
            }
            Operation::Insert { whole, .. } => Ok(whole.ty()),
            Operation::BinaryApply { operand_type, .. } => Ok(operand_type.clone()),
            Operation::Compare { .. } | Operation::Is { .. } => Ok(Type::u1()),
            Operation::Convert { target, .. } | Operation::As { target, .. } => Ok(target.clone()),
            Operation::ClassAllocate { name, .. } | Operation::Module { name } => {
                Ok(Type::Reference {
                    name: name.clone(),
                    exact: true,
                    nullable: false,
                })
            }
            Operation::Copy { source } => Ok(source.ty()),
            Operation::SizeOf { .. } | Operation::AlignmentOf { .. } => Ok(Type::size()),
            Operation::Box { box_type, .. } => Ok(Type::Reference {
                name: box_type.class_name()?,
                exact: true,
                nullable: box_type.is_pointer_box(),
            }),
            Operation::Unbox { box_type, .. } => {
                box_type.unboxed().ok_or_else(|| TypeError::NotABox {
                    ty: box_type.to_string(),
                })
            }
            Operation::Var { ty } => Ok(Type::var(ty.clone())),
            Operation::VarLoad { slot } => match slot.ty() {
                Type::Var(inner) => Ok(*inner),
                other => Err(TypeError::NotAVar {
                    ty: other.to_string(),
                }),
            },
            Operation::ArrayAllocate { element, .. } => {
                Ok(Type::array_reference(element.clone(), false))
            }
            Operation::ArrayLength { .. } => Ok(Type::i32()),
        }
    }
}

fn write_path(f: &mut fmt::Formatter<'_>, path: &Path) -> fmt::Result {
    for index in path {
        write!(f, ", {index}")?;
    }
    Ok(())
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Operation::Call {
                callee_type,
                callee,
                arguments,
            } => {
                write!(f, "call[{callee_type}] {callee}(")?;
                for (i, a) in arguments.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    a.fmt(f)?;
                }
                f.write_str(")")
            }
            Operation::Load {
                ty,
                source,
                ordering,
            } => {
                write!(f, "load[{ty}] {source}")?;
                if let Some(ordering) = ordering {
                    write!(f, " {ordering}")?;
                }
                Ok(())
            }
            Operation::Store {
                ty,
                target,
                source,
                ordering,
            } => {
                write!(f, "store[{ty}] {target}, {source}")?;
                if let Some(ordering) = ordering {
                    write!(f, " {ordering}")?;
                }
                Ok(())
            }
            Operation::Element {
                whole_type,
                whole,
                path,
            } => {
                write!(f, "elem[{whole_type}] {whole}")?;
                write_path(f, path)
            }
            Operation::Extract { whole, path } => {
                write!(f, "extract {whole}")?;
                write_path(f, path)
            }
            Operation::Insert { whole, part, path } => {
                write!(f, "insert {whole}, {part}")?;
                write_path(f, path)
            }
            Operation::StackAllocate { ty, count } => write!(f, "stackalloc[{ty}] {count}"),
            Operation::BinaryApply {
                operator,
                operand_type,
                lhs,
                rhs,
            } => write!(f, "{operator}[{operand_type}] {lhs}, {rhs}"),
            Operation::Compare {
                operator,
                operand_type,
                lhs,
                rhs,
            } => write!(f, "{operator}[{operand_type}] {lhs}, {rhs}"),
            Operation::Convert {
                operator,
                target,
                source,
            } => write!(f, "{operator}[{target}] {source}"),
            Operation::Fence { ordering } => write!(f, "fence {ordering}"),
            Operation::ClassAllocate { name, zone } => {
                write!(f, "classalloc {name}")?;
                if let Some(zone) = zone {
                    write!(f, " in {zone}")?;
                }
                Ok(())
            }
            Operation::FieldLoad { ty, owner, name } => {
                write!(f, "fieldload[{ty}] {owner}, {name}")
            }
            Operation::FieldStore {
                ty,
                owner,
                name,
                source,
            } => write!(f, "fieldstore[{ty}] {owner}, {name}, {source}"),
            Operation::Field { owner, name } => write!(f, "field {owner}, {name}"),
            Operation::Method { owner, signature } => {
                write!(f, "method {owner}, \"{signature}\"")
            }
            Operation::DynamicMethod { owner, signature } => {
                write!(f, "dynmethod {owner}, \"{signature}\"")
            }
            Operation::Module { name } => write!(f, "module {name}"),
            Operation::As { target, source } => write!(f, "as[{target}] {source}"),
            Operation::Is { target, source } => write!(f, "is[{target}] {source}"),
            Operation::Copy { source } => write!(f, "copy {source}"),
            Operation::SizeOf { operand } => write!(f, "sizeof[{operand}]"),
            Operation::AlignmentOf { operand } => write!(f, "alignmentof[{operand}]"),
            Operation::Box { box_type, contents } => write!(f, "box[{box_type}] {contents}"),
            Operation::Unbox { box_type, source } => write!(f, "unbox[{box_type}] {source}"),
            Operation::Var { ty } => write!(f, "var[{ty}]"),
            Operation::VarLoad { slot } => write!(f, "varload {slot}"),
            Operation::VarStore { slot, source } => write!(f, "varstore {slot}, {source}"),
            Operation::ArrayAllocate {
                element,
                initializer,
                zone,
            } => {
                write!(f, "arrayalloc[{element}] {initializer}")?;
                if let Some(zone) = zone {
                    write!(f, " in {zone}")?;
                }
                Ok(())
            }
            Operation::ArrayLoad {
                ty,
                owner,
                position,
            } => write!(f, "arrayload[{ty}] {owner}, {position}"),
            Operation::ArrayStore {
                ty,
                owner,
                position,
                source,
            } => write!(f, "arraystore[{ty}] {owner}, {position}, {source}"),
            Operation::ArrayLength { operand } => write!(f, "arraylength {operand}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::local::Local;
    use crate::runtime;
    use crate::value::LocalValue;
    use smallvec::smallvec;

    fn local(id: u64, ty: Type) -> Value {
        Value::Local(LocalValue { id: Local(id), ty })
    }

    #[test]
    fn call_yields_return_type() {
        let op = Operation::Call {
            callee_type: FunctionType::new(vec![Type::i32()], Type::unit()),
            callee: local(1, Type::pointer()),
            arguments: vec![Value::Int(0)],
        };
        assert_eq!(op.result_type(), Ok(Type::unit()));
    }

    #[test]
    fn loads_and_stores() {
        let load = Operation::Load {
            ty: Type::i64(),
            source: local(1, Type::pointer()),
            ordering: None,
        };
        assert_eq!(load.result_type(), Ok(Type::i64()));

        let store = Operation::Store {
            ty: Type::i64(),
            target: local(1, Type::pointer()),
            source: Value::Long(2),
            ordering: Some(MemoryOrder::SequentiallyConsistent),
        };
        assert_eq!(store.result_type(), Ok(Type::unit()));

        let fence = Operation::Fence {
            ordering: MemoryOrder::Acquire,
        };
        assert_eq!(fence.result_type(), Ok(Type::unit()));
    }

    #[test]
    fn extract_follows_element_path() {
        let whole = Value::Struct(vec![
            Value::Int(1),
            Value::Struct(vec![Value::Double(0.0), Value::Byte(0)]),
        ]);
        let op = Operation::Extract {
            whole: whole.clone(),
            path: smallvec![1, 0],
        };
        assert_eq!(op.result_type(), Ok(Type::f64()));

        let op = Operation::Extract {
            whole,
            path: smallvec![2],
        };
        assert!(op.result_type().is_err());
    }

    #[test]
    fn insert_preserves_whole_type() {
        let whole = Value::Struct(vec![Value::Int(1), Value::Double(2.0)]);
        let op = Operation::Insert {
            whole: whole.clone(),
            part: Value::Int(9),
            path: smallvec![0],
        };
        assert_eq!(op.result_type(), Ok(whole.ty()));
    }

    #[test]
    fn comparisons_yield_booleans() {
        let op = Operation::Compare {
            operator: ComparisonOperator::Slt,
            operand_type: Type::i32(),
            lhs: Value::Int(1),
            rhs: Value::Int(2),
        };
        assert_eq!(op.result_type(), Ok(Type::u1()));
        // Both operands share the operand type.
        if let Operation::Compare {
            operand_type, lhs, rhs, ..
        } = op
        {
            assert_eq!(lhs.ty(), operand_type);
            assert_eq!(rhs.ty(), operand_type);
        }
    }

    #[test]
    fn allocations() {
        let op = Operation::ClassAllocate {
            name: Top::new("A"),
            zone: None,
        };
        assert_eq!(
            op.result_type(),
            Ok(Type::Reference {
                name: Top::new("A"),
                exact: true,
                nullable: false,
            })
        );

        let op = Operation::ArrayAllocate {
            element: Type::i32(),
            initializer: Value::Int(4),
            zone: None,
        };
        assert_eq!(op.result_type(), Ok(Type::array_reference(Type::i32(), false)));

        let op = Operation::StackAllocate {
            ty: Type::i64(),
            count: 2,
        };
        assert_eq!(op.result_type(), Ok(Type::pointer()));
    }

    #[test]
    fn boxing() {
        let boxed_int = runtime::reference("java.lang.Integer");
        let op = Operation::Box {
            box_type: boxed_int.clone(),
            contents: Value::Int(42),
        };
        assert_eq!(
            op.result_type(),
            Ok(Type::Reference {
                name: Top::new("java.lang.Integer"),
                exact: true,
                nullable: false,
            })
        );

        // Pointer boxes stay nullable: a null pointer boxes to null.
        let ptr_box = runtime::reference(runtime::BOXED_POINTER);
        let op = Operation::Box {
            box_type: ptr_box.clone(),
            contents: local(1, Type::pointer()),
        };
        assert_eq!(
            op.result_type(),
            Ok(Type::Reference {
                name: Top::new(runtime::BOXED_POINTER),
                exact: true,
                nullable: true,
            })
        );

        let op = Operation::Unbox {
            box_type: boxed_int,
            source: local(1, runtime::reference("java.lang.Integer")),
        };
        assert_eq!(op.result_type(), Ok(Type::i32()));

        let op = Operation::Unbox {
            box_type: runtime::reference(runtime::OBJECT),
            source: local(1, runtime::reference(runtime::OBJECT)),
        };
        assert!(matches!(op.result_type(), Err(TypeError::NotABox { .. })));
    }

    #[test]
    fn var_slots() {
        let op = Operation::Var { ty: Type::i32() };
        assert_eq!(op.result_type(), Ok(Type::var(Type::i32())));

        let op = Operation::VarLoad {
            slot: local(1, Type::var(Type::i32())),
        };
        assert_eq!(op.result_type(), Ok(Type::i32()));

        let op = Operation::VarLoad {
            slot: local(1, Type::i32()),
        };
        assert!(matches!(op.result_type(), Err(TypeError::NotAVar { .. })));

        let op = Operation::VarStore {
            slot: local(1, Type::var(Type::i32())),
            source: Value::Int(5),
        };
        assert_eq!(op.result_type(), Ok(Type::unit()));
    }

    #[test]
    fn queries() {
        assert_eq!(
            Operation::SizeOf { operand: Type::i64() }.result_type(),
            Ok(Type::size())
        );
        assert_eq!(
            Operation::AlignmentOf { operand: Type::i64() }.result_type(),
            Ok(Type::size())
        );
        assert_eq!(
            Operation::ArrayLength {
                operand: local(1, Type::array_reference(Type::i32(), false)),
            }
            .result_type(),
            Ok(Type::i32())
        );
    }
}
