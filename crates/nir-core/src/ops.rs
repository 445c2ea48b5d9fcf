// ops.rs
//
// Operator enumerations used by operations, and atomic memory orderings.

use std::fmt;

/// A binary operator applied to two operands of the same type.
///
/// Distinct from comparison operators, which result in a Boolean.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BinaryOperator {
    /// Integer addition.
    Iadd,
    /// Floating-point addition.
    Fadd,
    /// Integer subtraction.
    Isub,
    /// Floating-point subtraction.
    Fsub,
    /// Integer multiplication.
    Imul,
    /// Floating-point multiplication.
    Fmul,
    /// Signed integer division.
    Sdiv,
    /// Unsigned integer division.
    Udiv,
    /// Floating-point division.
    Fdiv,
    /// Signed integer remainder.
    Srem,
    /// Unsigned integer remainder.
    Urem,
    /// Floating-point remainder.
    Frem,
    /// Left shift.
    Shl,
    /// Logical right shift.
    Lshr,
    /// Arithmetic right shift.
    Ashr,
    And,
    Or,
    Xor,
}

impl fmt::Display for BinaryOperator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            BinaryOperator::Iadd => "iadd",
            BinaryOperator::Fadd => "fadd",
            BinaryOperator::Isub => "isub",
            BinaryOperator::Fsub => "fsub",
            BinaryOperator::Imul => "imul",
            BinaryOperator::Fmul => "fmul",
            BinaryOperator::Sdiv => "sdiv",
            BinaryOperator::Udiv => "udiv",
            BinaryOperator::Fdiv => "fdiv",
            BinaryOperator::Srem => "srem",
            BinaryOperator::Urem => "urem",
            BinaryOperator::Frem => "frem",
            BinaryOperator::Shl => "shl",
            BinaryOperator::Lshr => "lshr",
            BinaryOperator::Ashr => "ashr",
            BinaryOperator::And => "and",
            BinaryOperator::Or => "or",
            BinaryOperator::Xor => "xor",
        };
        f.write_str(s)
    }
}

/// A comparison operator, resulting in a Boolean.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ComparisonOperator {
    /// Integer equality.
    Ieq,
    /// Integer inequality.
    Ine,
    /// Unsigned greater than.
    Ugt,
    /// Unsigned greater than or equal.
    Uge,
    /// Unsigned less than.
    Ult,
    /// Unsigned less than or equal.
    Ule,
    /// Signed greater than.
    Sgt,
    /// Signed greater than or equal.
    Sge,
    /// Signed less than.
    Slt,
    /// Signed less than or equal.
    Sle,
    /// Floating-point equality.
    Feq,
    /// Floating-point inequality.
    Fne,
    /// Floating-point greater than.
    Fgt,
    /// Floating-point greater than or equal.
    Fge,
    /// Floating-point less than.
    Flt,
    /// Floating-point less than or equal.
    Fle,
}

impl fmt::Display for ComparisonOperator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            ComparisonOperator::Ieq => "ieq",
            ComparisonOperator::Ine => "ine",
            ComparisonOperator::Ugt => "ugt",
            ComparisonOperator::Uge => "uge",
            ComparisonOperator::Ult => "ult",
            ComparisonOperator::Ule => "ule",
            ComparisonOperator::Sgt => "sgt",
            ComparisonOperator::Sge => "sge",
            ComparisonOperator::Slt => "slt",
            ComparisonOperator::Sle => "sle",
            ComparisonOperator::Feq => "feq",
            ComparisonOperator::Fne => "fne",
            ComparisonOperator::Fgt => "fgt",
            ComparisonOperator::Fge => "fge",
            ComparisonOperator::Flt => "flt",
            ComparisonOperator::Fle => "fle",
        };
        f.write_str(s)
    }
}

/// A conversion operator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ConversionOperator {
    /// Integer truncation.
    Trunc,
    /// Zero extension.
    Zext,
    /// Sign extension.
    Sext,
    /// Floating-point truncation.
    Fptrunc,
    /// Floating-point extension.
    Fpext,
    /// Floating-point to unsigned integer.
    Fptoui,
    /// Floating-point to signed integer.
    Fptosi,
    /// Unsigned integer to floating-point.
    Uitofp,
    /// Signed integer to floating-point.
    Sitofp,
    /// Pointer to integer.
    Ptrtoint,
    /// Integer to pointer.
    Inttoptr,
    Bitcast,
    /// Signed conversion to or from a size.
    SsizeCast,
    /// Zero-extending conversion to or from a size.
    ZsizeCast,
}

impl fmt::Display for ConversionOperator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            ConversionOperator::Trunc => "trunc",
            ConversionOperator::Zext => "zext",
            ConversionOperator::Sext => "sext",
            ConversionOperator::Fptrunc => "fptrunc",
            ConversionOperator::Fpext => "fpext",
            ConversionOperator::Fptoui => "fptoui",
            ConversionOperator::Fptosi => "fptosi",
            ConversionOperator::Uitofp => "uitofp",
            ConversionOperator::Sitofp => "sitofp",
            ConversionOperator::Ptrtoint => "ptrtoint",
            ConversionOperator::Inttoptr => "inttoptr",
            ConversionOperator::Bitcast => "bitcast",
            ConversionOperator::SsizeCast => "ssizecast",
            ConversionOperator::ZsizeCast => "zsizecast",
        };
        f.write_str(s)
    }
}

/// A logical operator connecting linktime conditions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LogicalOperator {
    And,
    Or,
}

impl fmt::Display for LogicalOperator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LogicalOperator::And => f.write_str("and"),
            LogicalOperator::Or => f.write_str("or"),
        }
    }
}

/// An atomic memory ordering constraint.
///
/// Atomic operations take ordering parameters specifying with which other
/// operations they synchronize. See
/// https://llvm.org/docs/LangRef.html#atomic-memory-ordering-constraints.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum MemoryOrder {
    /// The set of observable values is governed by happens-before only.
    Unordered,
    /// A single total order exists for modifications of each address.
    Monotonic,
    /// May form a synchronizes-with edge with a release operation.
    Acquire,
    /// Synchronizes-with acquire operations reading the written value.
    Release,
    /// Both an acquire and a release operation.
    AcquireRelease,
    /// A single total order exists over all sequentially consistent
    /// operations.
    SequentiallyConsistent,
}

impl fmt::Display for MemoryOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            MemoryOrder::Unordered => "unordered",
            MemoryOrder::Monotonic => "monotonic",
            MemoryOrder::Acquire => "acquire",
            MemoryOrder::Release => "release",
            MemoryOrder::AcquireRelease => "acq_rel",
            MemoryOrder::SequentiallyConsistent => "seq_cst",
        };
        f.write_str(s)
    }
}
