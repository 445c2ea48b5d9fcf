// tags.rs
//
// The positional tag values of the wire format, one table per category.
// These must match the producer bit-exactly.

/// The marker announcing a back-reference into a memo table.
pub const BACK_REFERENCE: u8 = 0xff;

pub mod definition {
    pub const VARIABLE: u8 = 0;
    pub const CONSTANT: u8 = 1;
    pub const DECLARE: u8 = 2;
    pub const DEFINE: u8 = 3;
    pub const TRAIT: u8 = 4;
    pub const CLASS: u8 = 5;
    pub const MODULE: u8 = 6;
}

pub mod instruction {
    pub const LABEL: u8 = 0;
    pub const LET: u8 = 1;
    /// Unwind edges appear only inside a continuation, never as an
    /// instruction.
    pub const UNWIND: u8 = 2;
    pub const RETURN: u8 = 3;
    pub const JUMP: u8 = 4;
    pub const IF: u8 = 5;
    pub const SWITCH: u8 = 6;
    pub const THROW: u8 = 7;
    pub const UNREACHABLE: u8 = 8;
    pub const LINKTIME_IF: u8 = 9;
}

pub mod linktime {
    pub const SIMPLE: u8 = 0;
    pub const COMPLEX: u8 = 1;
}

pub mod logical {
    pub const AND: u8 = 0;
    pub const OR: u8 = 1;
}

pub mod binary {
    pub const IADD: u8 = 0;
    pub const FADD: u8 = 1;
    pub const ISUB: u8 = 2;
    pub const FSUB: u8 = 3;
    pub const IMUL: u8 = 4;
    pub const FMUL: u8 = 5;
    pub const SDIV: u8 = 6;
    pub const UDIV: u8 = 7;
    pub const FDIV: u8 = 8;
    pub const SREM: u8 = 9;
    pub const UREM: u8 = 10;
    pub const FREM: u8 = 11;
    pub const SHL: u8 = 12;
    pub const LSHR: u8 = 13;
    pub const ASHR: u8 = 14;
    pub const AND: u8 = 15;
    pub const OR: u8 = 16;
    pub const XOR: u8 = 17;
}

pub mod comparison {
    pub const IEQ: u8 = 0;
    pub const INE: u8 = 1;
    pub const UGT: u8 = 2;
    pub const UGE: u8 = 3;
    pub const ULT: u8 = 4;
    pub const ULE: u8 = 5;
    pub const SGT: u8 = 6;
    pub const SGE: u8 = 7;
    pub const SLT: u8 = 8;
    pub const SLE: u8 = 9;
    pub const FEQ: u8 = 10;
    pub const FNE: u8 = 11;
    pub const FGT: u8 = 12;
    pub const FGE: u8 = 13;
    pub const FLT: u8 = 14;
    pub const FLE: u8 = 15;
}

pub mod conversion {
    pub const TRUNC: u8 = 0;
    pub const ZEXT: u8 = 1;
    pub const SEXT: u8 = 2;
    pub const FPTRUNC: u8 = 3;
    pub const FPEXT: u8 = 4;
    pub const FPTOUI: u8 = 5;
    pub const FPTOSI: u8 = 6;
    pub const UITOFP: u8 = 7;
    pub const SITOFP: u8 = 8;
    pub const PTRTOINT: u8 = 9;
    pub const INTTOPTR: u8 = 10;
    pub const BITCAST: u8 = 11;
    pub const SSIZE_CAST: u8 = 12;
    pub const ZSIZE_CAST: u8 = 13;
}

pub mod next {
    pub const NONE: u8 = 0;
    pub const UNWIND: u8 = 1;
    pub const CASE: u8 = 2;
    pub const LABEL: u8 = 3;
}

pub mod operation {
    pub const CALL: u8 = 0;
    pub const LOAD: u8 = 1;
    pub const LOAD_ATOMIC: u8 = 2;
    pub const STORE: u8 = 3;
    pub const STORE_ATOMIC: u8 = 4;
    pub const ELEMENT: u8 = 5;
    pub const EXTRACT: u8 = 6;
    pub const INSERT: u8 = 7;
    pub const STACK_ALLOCATE: u8 = 8;
    pub const BINARY: u8 = 9;
    pub const COMPARE: u8 = 10;
    pub const CONVERT: u8 = 11;
    pub const CLASS_ALLOCATE: u8 = 12;
    pub const CLASS_ALLOCATE_ZONE: u8 = 13;
    pub const FIELD: u8 = 14;
    pub const FIELD_LOAD: u8 = 15;
    pub const FIELD_STORE: u8 = 16;
    pub const METHOD: u8 = 17;
    pub const MODULE: u8 = 18;
    pub const AS: u8 = 19;
    pub const IS: u8 = 20;
    pub const COPY: u8 = 21;
    pub const SIZE_OF: u8 = 22;
    pub const ALIGNMENT_OF: u8 = 23;
    pub const BOX: u8 = 24;
    pub const UNBOX: u8 = 25;
    pub const DYNAMIC_METHOD: u8 = 26;
    pub const VAR: u8 = 27;
    pub const VAR_LOAD: u8 = 28;
    pub const VAR_STORE: u8 = 29;
    pub const ARRAY_ALLOCATE: u8 = 30;
    pub const ARRAY_ALLOCATE_ZONE: u8 = 31;
    pub const ARRAY_LOAD: u8 = 32;
    pub const ARRAY_STORE: u8 = 33;
    pub const ARRAY_LENGTH: u8 = 34;
    pub const FENCE: u8 = 35;
}

pub mod string {
    pub const EMPTY: u8 = 0;
    pub const CONTAINED: u8 = 1;
    pub const INSERTED: u8 = 2;
    pub const APPENDED: u8 = 3;
}

pub mod symbol {
    pub const NONE: u8 = 0;
    pub const TOP: u8 = 1;
    pub const MEMBER: u8 = 2;
}

pub mod ty {
    pub const VARARG: u8 = 0;
    pub const BOOLEAN: u8 = 1;
    pub const POINTER: u8 = 2;
    pub const CHAR: u8 = 3;
    pub const BYTE: u8 = 4;
    pub const SHORT: u8 = 5;
    pub const INT: u8 = 6;
    pub const LONG: u8 = 7;
    pub const FLOAT: u8 = 8;
    pub const DOUBLE: u8 = 9;
    pub const ARRAY_VALUE: u8 = 10;
    pub const STRUCT_VALUE: u8 = 11;
    pub const FUNCTION: u8 = 12;
    pub const NULL: u8 = 13;
    pub const NOTHING: u8 = 14;
    pub const VIRTUAL: u8 = 15;
    pub const VAR: u8 = 16;
    pub const UNIT: u8 = 17;
    pub const ARRAY: u8 = 18;
    pub const REFERENCE: u8 = 19;
    pub const SIZE: u8 = 20;
}

pub mod value {
    pub const TRUE: u8 = 0;
    pub const FALSE: u8 = 1;
    pub const NULL: u8 = 2;
    pub const ZERO: u8 = 3;
    pub const CHAR: u8 = 4;
    pub const BYTE: u8 = 5;
    pub const SHORT: u8 = 6;
    pub const INT: u8 = 7;
    pub const LONG: u8 = 8;
    pub const FLOAT: u8 = 9;
    pub const DOUBLE: u8 = 10;
    pub const STRUCT: u8 = 11;
    pub const ARRAY: u8 = 12;
    pub const BYTE_STRING: u8 = 13;
    pub const LOCAL: u8 = 14;
    pub const SYMBOL: u8 = 15;
    pub const UNIT: u8 = 16;
    pub const CONSTANT: u8 = 17;
    pub const STRING: u8 = 18;
    pub const VIRTUAL: u8 = 19;
    pub const CLASS_OF: u8 = 20;
    /// Reserved by the producer; not emitted in a valid stream.
    pub const LINKTIME_CONDITION: u8 = 21;
    pub const SIZE: u8 = 22;
}

pub mod attribute {
    pub const MAY_INLINE: u8 = 0;
    pub const INLINE_HINT: u8 = 1;
    pub const NO_INLINE: u8 = 2;
    pub const ALWAYS_INLINE: u8 = 3;
    pub const MAY_SPECIALIZE: u8 = 4;
    pub const NO_SPECIALIZE: u8 = 5;
    pub const UN_OPT: u8 = 6;
    pub const NO_OPT: u8 = 7;
    pub const DID_OPT: u8 = 8;
    pub const BAIL_OPT: u8 = 9;
    pub const EXTERN: u8 = 10;
    pub const LINK: u8 = 11;
    pub const DYN: u8 = 12;
    pub const STUB: u8 = 13;
    pub const ABSTRACT: u8 = 14;
    pub const VOLATILE: u8 = 15;
    pub const FINAL: u8 = 16;
    pub const SAFE_PUBLISH: u8 = 17;
    pub const LINKTIME_RESOLVED: u8 = 18;
    pub const USES_INTRINSIC: u8 = 19;
    pub const ALIGN: u8 = 20;
    pub const DEFINE: u8 = 21;
}
