// lib.rs
//
// In-memory data model for the NIR intermediate representation: symbols,
// types, values, operations, instructions, attributes, and definitions,
// together with the derived computations connecting them (result types,
// type normalization, boxing relations).
//
// Everything in this crate is an immutable value type: recursive terms own
// their children through `Box` and compare structurally.

pub mod attrs;
pub mod defs;
pub mod inst;
pub mod linktime;
pub mod local;
pub mod next;
pub mod operation;
pub mod ops;
pub mod pos;
pub mod runtime;
pub mod scope;
pub mod symbol;
pub mod ty;
pub mod value;

pub use attrs::{Attribute, AttributeKind, AttributeSet};
pub use defs::{DebugInformation, Definition};
pub use inst::Instruction;
pub use linktime::LinktimeCondition;
pub use local::Local;
pub use next::Next;
pub use operation::{Operation, Path};
pub use ops::{
    BinaryOperator, ComparisonOperator, ConversionOperator, LogicalOperator, MemoryOrder,
};
pub use pos::{SourceFile, SourcePosition};
pub use scope::{LexicalScope, ScopeId};
pub use symbol::{Member, Signature, Symbol, Top};
pub use ty::{FunctionType, Numeric, Predefined, Type, TypeError};
pub use value::{LocalValue, Value};
