// deserializer.rs
//
// Tag-dispatched recursive descent over a byte source, reconstructing IR
// definitions. The deserializer owns four memo tables (strings, symbols,
// types, values) that mirror the producer's interning.

use rustc_hash::FxHashMap;
use tracing::trace;

use nir_core::{
    Attribute, AttributeKind, AttributeSet, BinaryOperator, ComparisonOperator,
    ConversionOperator, DebugInformation, Definition, FunctionType, Instruction, LexicalScope,
    LinktimeCondition, Local, LocalValue, LogicalOperator, Member, MemoryOrder, Next, Operation,
    Path, ScopeId, Signature, SourceFile, SourcePosition, Symbol, Top, Type, Value,
};

use crate::decoder::Decoder;
use crate::error::DecodeError;
use crate::tags;

/// The parsing of one file's serialized definitions.
///
/// A deserializer is scoped to a single file: its memo tables are never
/// shared. The byte order of `source` must already be set for the body.
pub struct Deserializer<'a> {
    /// The source from which binary data is being read.
    source: &'a mut Decoder,
    /// The interned strings decoded so far.
    strings: Vec<String>,
    /// The interned symbols decoded so far.
    symbols: Vec<Symbol>,
    /// The interned types decoded so far.
    types: Vec<Type>,
    /// The interned values decoded so far.
    values: Vec<Value>,
}

impl<'a> Deserializer<'a> {
    /// Creates an instance decoding data from `source`.
    pub fn new(source: &'a mut Decoder) -> Self {
        Self {
            source,
            strings: Vec::new(),
            symbols: Vec::new(),
            types: Vec::new(),
            values: Vec::new(),
        }
    }

    /// Returns `true` if the source has no byte left to read.
    pub fn is_empty(&self) -> bool {
        self.source.is_empty()
    }

    fn unexpected_tag(&self, offset: usize, tag: u8, category: &'static str) -> DecodeError {
        DecodeError::UnexpectedTag {
            offset,
            tag,
            category,
        }
    }

    /// Reads an internable element: either a back-reference into `memo`, or
    /// an inline encoding that is memoized when it consumed more than two
    /// bytes. The threshold separates single-tag encodings from substantive
    /// ones, mirroring the producer.
    fn interned<T: Clone>(
        &mut self,
        category: &'static str,
        memo: fn(&mut Self) -> &mut Vec<T>,
        decode: fn(&mut Self) -> Result<T, DecodeError>,
    ) -> Result<T, DecodeError> {
        if self.source.peek() == Some(tags::BACK_REFERENCE) {
            self.source.u8()?;
            let offset = self.source.position();
            let index = self.source.unsigned_leb128()? as usize;
            let table = memo(self);
            let len = table.len();
            match table.get(index) {
                Some(element) => Ok(element.clone()),
                None => Err(DecodeError::BadBackReference {
                    offset,
                    index,
                    len,
                    category,
                }),
            }
        } else {
            let start = self.source.position();
            let element = decode(self)?;
            if self.source.position() > start + 2 {
                memo(self).push(element.clone());
            }
            Ok(element)
        }
    }

    /// Reads a sequence: an unsigned LEB128 count followed by that many
    /// elements.
    fn sequence<T>(
        &mut self,
        decode: fn(&mut Self) -> Result<T, DecodeError>,
    ) -> Result<Vec<T>, DecodeError> {
        let count = self.source.unsigned_leb128()? as usize;
        // A corrupt count must fail on the reads, not abort on allocation.
        let mut result = Vec::with_capacity(count.min(4096));
        for _ in 0..count {
            result.push(decode(self)?);
        }
        Ok(result)
    }

    /// Reads an optional element: a Boolean byte followed by the element if
    /// the Boolean is true.
    fn optional<T>(
        &mut self,
        decode: fn(&mut Self) -> Result<T, DecodeError>,
    ) -> Result<Option<T>, DecodeError> {
        if self.boolean()? {
            decode(self).map(Some)
        } else {
            Ok(None)
        }
    }

    pub fn boolean(&mut self) -> Result<bool, DecodeError> {
        Ok(self.source.u8()? != 0)
    }

    /// Reads a 32-bit unsigned integer encoded as an unsigned LEB128,
    /// truncated to 32 bits.
    pub fn u32_index(&mut self) -> Result<u32, DecodeError> {
        Ok(self.source.unsigned_leb128()? as u32)
    }

    pub fn local(&mut self) -> Result<Local, DecodeError> {
        Ok(Local(self.source.unsigned_leb128()?))
    }

    pub fn scope(&mut self) -> Result<ScopeId, DecodeError> {
        Ok(ScopeId(self.source.unsigned_leb128()?))
    }

    // --- Strings ----------------------------------------------------------

    /// Reads a string through the tagged string table.
    pub fn string(&mut self) -> Result<String, DecodeError> {
        let offset = self.source.position();
        match self.source.u8()? {
            tags::string::EMPTY => Ok(String::new()),
            tags::string::CONTAINED => {
                let n = self.source.unsigned_leb128()? as usize;
                let prefix = self.string_prefix(n)?;
                Ok(prefix)
            }
            tags::string::INSERTED => {
                let s = self.inline_string()?;
                self.strings.push(s.clone());
                Ok(s)
            }
            tags::string::APPENDED => {
                let n = self.source.unsigned_leb128()? as usize;
                let mut s = self.string_prefix(n)?;
                s.push_str(&self.inline_string()?);
                self.strings.push(s.clone());
                Ok(s)
            }
            tag => Err(self.unexpected_tag(offset, tag, "string")),
        }
    }

    /// Reads a memo index and returns the first `n` bytes of the memoized
    /// string.
    fn string_prefix(&mut self, n: usize) -> Result<String, DecodeError> {
        let offset = self.source.position();
        let index = self.source.unsigned_leb128()? as usize;
        let s = self
            .strings
            .get(index)
            .ok_or(DecodeError::BadBackReference {
                offset,
                index,
                len: self.strings.len(),
                category: "string",
            })?;
        let n = n.min(s.len());
        let prefix = s
            .get(..n)
            .ok_or(DecodeError::IllFormedString { offset })?;
        Ok(prefix.to_string())
    }

    /// Reads a string written inline: an unsigned LEB128 length followed by
    /// that many UTF-8 bytes.
    fn inline_string(&mut self) -> Result<String, DecodeError> {
        let offset = self.source.position();
        let n = self.source.unsigned_leb128()? as usize;
        let mut bytes = vec![0u8; n];
        if self.source.bytes(n, &mut bytes) != n {
            return Err(DecodeError::IllFormedString { offset });
        }
        String::from_utf8(bytes).map_err(|_| DecodeError::IllFormedString { offset })
    }

    /// Reads an array of raw bytes: an unsigned LEB128 count followed by the
    /// bytes themselves.
    fn byte_string(&mut self) -> Result<Vec<u8>, DecodeError> {
        let count = self.source.unsigned_leb128()? as usize;
        let mut bytes = vec![0u8; count];
        let read = self.source.bytes(count, &mut bytes);
        if read != count {
            return Err(DecodeError::OutOfBytes {
                offset: self.source.position(),
            });
        }
        Ok(bytes)
    }

    // --- Symbols ----------------------------------------------------------

    /// Reads a symbol (aka a global).
    pub fn symbol(&mut self) -> Result<Symbol, DecodeError> {
        self.interned("symbol", |s| &mut s.symbols, Self::symbol_payload)
    }

    fn symbol_payload(&mut self) -> Result<Symbol, DecodeError> {
        let offset = self.source.position();
        match self.source.u8()? {
            tags::symbol::NONE => Ok(Symbol::None),
            tags::symbol::TOP => Ok(Symbol::Top(Top::new(self.string()?))),
            tags::symbol::MEMBER => {
                let owner = self.top()?;
                let signature = self.signature()?;
                Ok(Symbol::Member(Member { owner, signature }))
            }
            tag => Err(self.unexpected_tag(offset, tag, "symbol")),
        }
    }

    /// Reads a symbol that must be a top-level symbol.
    pub fn top(&mut self) -> Result<Top, DecodeError> {
        let offset = self.source.position();
        self.symbol()?
            .into_top()
            .ok_or(DecodeError::BadProjection {
                offset,
                expected: "a top-level symbol",
            })
    }

    /// Reads a symbol that must be a member symbol.
    pub fn member(&mut self) -> Result<Member, DecodeError> {
        let offset = self.source.position();
        self.symbol()?
            .into_member()
            .ok_or(DecodeError::BadProjection {
                offset,
                expected: "a member symbol",
            })
    }

    pub fn signature(&mut self) -> Result<Signature, DecodeError> {
        Ok(Signature::new(self.string()?))
    }

    // --- Types ------------------------------------------------------------

    /// Reads a type.
    pub fn ty(&mut self) -> Result<Type, DecodeError> {
        self.interned("type", |s| &mut s.types, Self::ty_payload)
    }

    fn ty_payload(&mut self) -> Result<Type, DecodeError> {
        let offset = self.source.position();
        match self.source.u8()? {
            tags::ty::VARARG => Ok(Type::vararg()),
            tags::ty::BOOLEAN => Ok(Type::u1()),
            tags::ty::POINTER => Ok(Type::pointer()),
            tags::ty::CHAR => Ok(Type::u16()),
            tags::ty::BYTE => Ok(Type::i8()),
            tags::ty::SHORT => Ok(Type::i16()),
            tags::ty::INT => Ok(Type::i32()),
            tags::ty::LONG => Ok(Type::i64()),
            tags::ty::FLOAT => Ok(Type::f32()),
            tags::ty::DOUBLE => Ok(Type::f64()),
            tags::ty::ARRAY_VALUE => {
                let element = self.ty()?;
                let size = self.source.unsigned_leb128()?;
                Ok(Type::array_value(element, size))
            }
            tags::ty::STRUCT_VALUE => Ok(Type::Struct(self.sequence(Self::ty)?)),
            tags::ty::FUNCTION => {
                let parameters = self.sequence(Self::ty)?;
                let return_type = self.ty()?;
                Ok(Type::Function(FunctionType::new(parameters, return_type)))
            }
            tags::ty::NULL => Ok(Type::null()),
            tags::ty::NOTHING => Ok(Type::nothing()),
            tags::ty::VIRTUAL => Ok(Type::virtual_()),
            tags::ty::VAR => Ok(Type::var(self.ty()?)),
            tags::ty::UNIT => Ok(Type::unit()),
            tags::ty::ARRAY => {
                let element = self.ty()?;
                let nullable = self.boolean()?;
                Ok(Type::array_reference(element, nullable))
            }
            tags::ty::REFERENCE => {
                let name = self.top()?;
                let exact = self.boolean()?;
                let nullable = self.boolean()?;
                Ok(Type::Reference {
                    name,
                    exact,
                    nullable,
                })
            }
            tags::ty::SIZE => Ok(Type::size()),
            tag => Err(self.unexpected_tag(offset, tag, "type")),
        }
    }

    /// Reads a type that must be a function type.
    pub fn function_type(&mut self) -> Result<FunctionType, DecodeError> {
        let offset = self.source.position();
        match self.ty()? {
            Type::Function(function) => Ok(function),
            _ => Err(DecodeError::BadProjection {
                offset,
                expected: "a function type",
            }),
        }
    }

    // --- Values -----------------------------------------------------------

    /// Reads a value.
    pub fn value(&mut self) -> Result<Value, DecodeError> {
        self.interned("value", |s| &mut s.values, Self::value_payload)
    }

    fn value_payload(&mut self) -> Result<Value, DecodeError> {
        let offset = self.source.position();
        match self.source.u8()? {
            tags::value::TRUE => Ok(Value::Boolean(true)),
            tags::value::FALSE => Ok(Value::Boolean(false)),
            tags::value::NULL => Ok(Value::Null),
            tags::value::ZERO => Ok(Value::Zero(self.ty()?)),
            tags::value::CHAR => {
                Ok(Value::Char((self.source.unsigned_leb128()? & 0xffff) as u16))
            }
            tags::value::BYTE => Ok(Value::Byte(self.source.i8()?)),
            tags::value::SHORT => Ok(Value::Short(self.source.signed_leb128()? as i16)),
            tags::value::INT => Ok(Value::Int(self.source.signed_leb128()? as i32)),
            tags::value::LONG => Ok(Value::Long(self.source.signed_leb128()?)),
            tags::value::FLOAT => Ok(Value::Float(self.source.f32()?)),
            tags::value::DOUBLE => Ok(Value::Double(self.source.f64()?)),
            tags::value::STRUCT => Ok(Value::Struct(self.sequence(Self::value)?)),
            tags::value::ARRAY => {
                let element = self.ty()?;
                let elements = self.sequence(Self::value)?;
                Ok(Value::ArrayValue { element, elements })
            }
            tags::value::BYTE_STRING => Ok(Value::ByteString(self.byte_string()?)),
            tags::value::LOCAL => {
                let id = self.local()?;
                let ty = self.ty()?;
                Ok(Value::Local(LocalValue { id, ty }))
            }
            tags::value::SYMBOL => {
                let name = self.symbol()?;
                let ty = self.ty()?;
                Ok(Value::SymbolRef { name, ty })
            }
            tags::value::UNIT => Ok(Value::Unit),
            tags::value::CONSTANT => Ok(Value::Constant(Box::new(self.value()?))),
            tags::value::STRING => Ok(Value::String(self.string()?)),
            tags::value::VIRTUAL => Ok(Value::Virtual(self.source.unsigned_leb128()?)),
            tags::value::CLASS_OF => Ok(Value::ClassOf(self.top()?)),
            // Reserved: the producer never emits condition values.
            tag @ tags::value::LINKTIME_CONDITION => {
                Err(self.unexpected_tag(offset, tag, "value"))
            }
            tags::value::SIZE => Ok(Value::Size(self.source.unsigned_leb128()?)),
            tag => Err(self.unexpected_tag(offset, tag, "value")),
        }
    }

    /// Reads a value that must be a local, as in label parameters and
    /// unwind continuations.
    pub fn label_argument(&mut self) -> Result<LocalValue, DecodeError> {
        let offset = self.source.position();
        self.value()?
            .into_local()
            .ok_or(DecodeError::BadProjection {
                offset,
                expected: "a local value",
            })
    }

    // --- Continuations ----------------------------------------------------

    /// Reads a continuation.
    pub fn next(&mut self) -> Result<Next, DecodeError> {
        let offset = self.source.position();
        match self.source.u8()? {
            tags::next::NONE => Ok(Next::None),
            tags::next::UNWIND => {
                let exception = self.label_argument()?;
                let next = self.next()?;
                Ok(Next::Unwind {
                    exception,
                    next: Box::new(next),
                })
            }
            tags::next::CASE => {
                let value = self.value()?;
                let next = self.next()?;
                Ok(Next::Case {
                    value,
                    next: Box::new(next),
                })
            }
            tags::next::LABEL => {
                let id = self.local()?;
                let arguments = self.sequence(Self::value)?;
                Ok(Next::Label { id, arguments })
            }
            tag => Err(self.unexpected_tag(offset, tag, "continuation")),
        }
    }

    // --- Operators --------------------------------------------------------

    pub fn binary_operator(&mut self) -> Result<BinaryOperator, DecodeError> {
        let offset = self.source.position();
        let operator = match self.source.u8()? {
            tags::binary::IADD => BinaryOperator::Iadd,
            tags::binary::FADD => BinaryOperator::Fadd,
            tags::binary::ISUB => BinaryOperator::Isub,
            tags::binary::FSUB => BinaryOperator::Fsub,
            tags::binary::IMUL => BinaryOperator::Imul,
            tags::binary::FMUL => BinaryOperator::Fmul,
            tags::binary::SDIV => BinaryOperator::Sdiv,
            tags::binary::UDIV => BinaryOperator::Udiv,
            tags::binary::FDIV => BinaryOperator::Fdiv,
            tags::binary::SREM => BinaryOperator::Srem,
            tags::binary::UREM => BinaryOperator::Urem,
            tags::binary::FREM => BinaryOperator::Frem,
            tags::binary::SHL => BinaryOperator::Shl,
            tags::binary::LSHR => BinaryOperator::Lshr,
            tags::binary::ASHR => BinaryOperator::Ashr,
            tags::binary::AND => BinaryOperator::And,
            tags::binary::OR => BinaryOperator::Or,
            tags::binary::XOR => BinaryOperator::Xor,
            tag => return Err(self.unexpected_tag(offset, tag, "binary operator")),
        };
        Ok(operator)
    }

    pub fn comparison_operator(&mut self) -> Result<ComparisonOperator, DecodeError> {
        let offset = self.source.position();
        let operator = match self.source.u8()? {
            tags::comparison::IEQ => ComparisonOperator::Ieq,
            tags::comparison::INE => ComparisonOperator::Ine,
            tags::comparison::UGT => ComparisonOperator::Ugt,
            tags::comparison::UGE => ComparisonOperator::Uge,
            tags::comparison::ULT => ComparisonOperator::Ult,
            tags::comparison::ULE => ComparisonOperator::Ule,
            tags::comparison::SGT => ComparisonOperator::Sgt,
            tags::comparison::SGE => ComparisonOperator::Sge,
            tags::comparison::SLT => ComparisonOperator::Slt,
            tags::comparison::SLE => ComparisonOperator::Sle,
            tags::comparison::FEQ => ComparisonOperator::Feq,
            tags::comparison::FNE => ComparisonOperator::Fne,
            tags::comparison::FGT => ComparisonOperator::Fgt,
            tags::comparison::FGE => ComparisonOperator::Fge,
            tags::comparison::FLT => ComparisonOperator::Flt,
            tags::comparison::FLE => ComparisonOperator::Fle,
            tag => return Err(self.unexpected_tag(offset, tag, "comparison operator")),
        };
        Ok(operator)
    }

    pub fn conversion_operator(&mut self) -> Result<ConversionOperator, DecodeError> {
        let offset = self.source.position();
        let operator = match self.source.u8()? {
            tags::conversion::TRUNC => ConversionOperator::Trunc,
            tags::conversion::ZEXT => ConversionOperator::Zext,
            tags::conversion::SEXT => ConversionOperator::Sext,
            tags::conversion::FPTRUNC => ConversionOperator::Fptrunc,
            tags::conversion::FPEXT => ConversionOperator::Fpext,
            tags::conversion::FPTOUI => ConversionOperator::Fptoui,
            tags::conversion::FPTOSI => ConversionOperator::Fptosi,
            tags::conversion::UITOFP => ConversionOperator::Uitofp,
            tags::conversion::SITOFP => ConversionOperator::Sitofp,
            tags::conversion::PTRTOINT => ConversionOperator::Ptrtoint,
            tags::conversion::INTTOPTR => ConversionOperator::Inttoptr,
            tags::conversion::BITCAST => ConversionOperator::Bitcast,
            tags::conversion::SSIZE_CAST => ConversionOperator::SsizeCast,
            tags::conversion::ZSIZE_CAST => ConversionOperator::ZsizeCast,
            tag => return Err(self.unexpected_tag(offset, tag, "conversion operator")),
        };
        Ok(operator)
    }

    pub fn logical_operator(&mut self) -> Result<LogicalOperator, DecodeError> {
        let offset = self.source.position();
        match self.source.u8()? {
            tags::logical::AND => Ok(LogicalOperator::And),
            tags::logical::OR => Ok(LogicalOperator::Or),
            tag => Err(self.unexpected_tag(offset, tag, "logical operator")),
        }
    }

    pub fn memory_order(&mut self) -> Result<MemoryOrder, DecodeError> {
        let offset = self.source.position();
        let order = match self.source.u8()? {
            0 => MemoryOrder::Unordered,
            1 => MemoryOrder::Monotonic,
            2 => MemoryOrder::Acquire,
            3 => MemoryOrder::Release,
            4 => MemoryOrder::AcquireRelease,
            5 => MemoryOrder::SequentiallyConsistent,
            value => return Err(DecodeError::BadMemoryOrder { offset, value }),
        };
        Ok(order)
    }

    // --- Operations -------------------------------------------------------

    fn path(&mut self) -> Result<Path, DecodeError> {
        let count = self.source.unsigned_leb128()? as usize;
        let mut path = Path::new();
        for _ in 0..count {
            path.push(self.u32_index()?);
        }
        Ok(path)
    }

    /// Reads an operation.
    pub fn operation(&mut self) -> Result<Operation, DecodeError> {
        let offset = self.source.position();
        match self.source.u8()? {
            tags::operation::CALL => {
                let callee_type = self.function_type()?;
                let callee = self.value()?;
                let arguments = self.sequence(Self::value)?;
                Ok(Operation::Call {
                    callee_type,
                    callee,
                    arguments,
                })
            }
            tags::operation::LOAD => {
                let ty = self.ty()?;
                let source = self.value()?;
                Ok(Operation::Load {
                    ty,
                    source,
                    ordering: None,
                })
            }
            tags::operation::LOAD_ATOMIC => {
                let ty = self.ty()?;
                let source = self.value()?;
                let ordering = self.memory_order()?;
                Ok(Operation::Load {
                    ty,
                    source,
                    ordering: Some(ordering),
                })
            }
            tags::operation::STORE => {
                let ty = self.ty()?;
                let target = self.value()?;
                let source = self.value()?;
                Ok(Operation::Store {
                    ty,
                    target,
                    source,
                    ordering: None,
                })
            }
            tags::operation::STORE_ATOMIC => {
                let ty = self.ty()?;
                let target = self.value()?;
                let source = self.value()?;
                let ordering = self.memory_order()?;
                Ok(Operation::Store {
                    ty,
                    target,
                    source,
                    ordering: Some(ordering),
                })
            }
            tags::operation::ELEMENT => {
                let whole_type = self.ty()?;
                let whole = self.value()?;
                let path = self.path()?;
                Ok(Operation::Element {
                    whole_type,
                    whole,
                    path,
                })
            }
            tags::operation::EXTRACT => {
                let whole = self.value()?;
                let path = self.path()?;
                Ok(Operation::Extract { whole, path })
            }
            tags::operation::INSERT => {
                let whole = self.value()?;
                let part = self.value()?;
                let path = self.path()?;
                Ok(Operation::Insert { whole, part, path })
            }
            tags::operation::STACK_ALLOCATE => {
                let ty = self.ty()?;
                let count = self.source.unsigned_leb128()?;
                Ok(Operation::StackAllocate { ty, count })
            }
            tags::operation::BINARY => {
                let operator = self.binary_operator()?;
                let operand_type = self.ty()?;
                let lhs = self.value()?;
                let rhs = self.value()?;
                Ok(Operation::BinaryApply {
                    operator,
                    operand_type,
                    lhs,
                    rhs,
                })
            }
            tags::operation::COMPARE => {
                let operator = self.comparison_operator()?;
                let operand_type = self.ty()?;
                let lhs = self.value()?;
                let rhs = self.value()?;
                Ok(Operation::Compare {
                    operator,
                    operand_type,
                    lhs,
                    rhs,
                })
            }
            tags::operation::CONVERT => {
                let operator = self.conversion_operator()?;
                let target = self.ty()?;
                let source = self.value()?;
                Ok(Operation::Convert {
                    operator,
                    target,
                    source,
                })
            }
            tags::operation::CLASS_ALLOCATE => {
                let name = self.top()?;
                Ok(Operation::ClassAllocate { name, zone: None })
            }
            tags::operation::CLASS_ALLOCATE_ZONE => {
                let name = self.top()?;
                let zone = self.value()?;
                Ok(Operation::ClassAllocate {
                    name,
                    zone: Some(zone),
                })
            }
            tags::operation::FIELD => {
                let owner = self.value()?;
                let name = self.member()?;
                Ok(Operation::Field { owner, name })
            }
            tags::operation::FIELD_LOAD => {
                let ty = self.ty()?;
                let owner = self.value()?;
                let name = self.member()?;
                Ok(Operation::FieldLoad { ty, owner, name })
            }
            tags::operation::FIELD_STORE => {
                let ty = self.ty()?;
                let owner = self.value()?;
                let name = self.member()?;
                let source = self.value()?;
                Ok(Operation::FieldStore {
                    ty,
                    owner,
                    name,
                    source,
                })
            }
            tags::operation::METHOD => {
                let owner = self.value()?;
                let signature = self.signature()?;
                Ok(Operation::Method { owner, signature })
            }
            tags::operation::MODULE => Ok(Operation::Module { name: self.top()? }),
            tags::operation::AS => {
                let target = self.ty()?;
                let source = self.value()?;
                Ok(Operation::As { target, source })
            }
            tags::operation::IS => {
                let target = self.ty()?;
                let source = self.value()?;
                Ok(Operation::Is { target, source })
            }
            tags::operation::COPY => Ok(Operation::Copy {
                source: self.value()?,
            }),
            tags::operation::SIZE_OF => Ok(Operation::SizeOf { operand: self.ty()? }),
            tags::operation::ALIGNMENT_OF => Ok(Operation::AlignmentOf {
                operand: self.ty()?,
            }),
            tags::operation::BOX => {
                let box_type = self.ty()?;
                let contents = self.value()?;
                Ok(Operation::Box { box_type, contents })
            }
            tags::operation::UNBOX => {
                let box_type = self.ty()?;
                let source = self.value()?;
                Ok(Operation::Unbox { box_type, source })
            }
            tags::operation::DYNAMIC_METHOD => {
                let owner = self.value()?;
                let signature = self.signature()?;
                Ok(Operation::DynamicMethod { owner, signature })
            }
            tags::operation::VAR => Ok(Operation::Var { ty: self.ty()? }),
            tags::operation::VAR_LOAD => Ok(Operation::VarLoad {
                slot: self.value()?,
            }),
            tags::operation::VAR_STORE => {
                let slot = self.value()?;
                let source = self.value()?;
                Ok(Operation::VarStore { slot, source })
            }
            tags::operation::ARRAY_ALLOCATE => {
                let element = self.ty()?;
                let initializer = self.value()?;
                Ok(Operation::ArrayAllocate {
                    element,
                    initializer,
                    zone: None,
                })
            }
            tags::operation::ARRAY_ALLOCATE_ZONE => {
                let element = self.ty()?;
                let initializer = self.value()?;
                let zone = self.value()?;
                Ok(Operation::ArrayAllocate {
                    element,
                    initializer,
                    zone: Some(zone),
                })
            }
            tags::operation::ARRAY_LOAD => {
                let ty = self.ty()?;
                let owner = self.value()?;
                let position = self.u32_index()?;
                Ok(Operation::ArrayLoad {
                    ty,
                    owner,
                    position,
                })
            }
            tags::operation::ARRAY_STORE => {
                let ty = self.ty()?;
                let owner = self.value()?;
                let position = self.u32_index()?;
                let source = self.value()?;
                Ok(Operation::ArrayStore {
                    ty,
                    owner,
                    position,
                    source,
                })
            }
            tags::operation::ARRAY_LENGTH => Ok(Operation::ArrayLength {
                operand: self.value()?,
            }),
            tags::operation::FENCE => Ok(Operation::Fence {
                ordering: self.memory_order()?,
            }),
            tag => Err(self.unexpected_tag(offset, tag, "operation")),
        }
    }

    // --- Instructions -----------------------------------------------------

    /// Reads an instruction.
    pub fn instruction(&mut self) -> Result<Instruction, DecodeError> {
        let offset = self.source.position();
        match self.source.u8()? {
            tags::instruction::LABEL => {
                let id = self.local()?;
                let parameters = self.sequence(Self::label_argument)?;
                let position = self.source_position()?;
                Ok(Instruction::Label {
                    id,
                    parameters,
                    position,
                })
            }
            tags::instruction::LET => {
                let id = self.local()?;
                let operation = self.operation()?;
                let next = self.next()?;
                let position = self.source_position()?;
                let scope = self.scope()?;
                Ok(Instruction::Let {
                    id,
                    operation,
                    next,
                    position,
                    scope,
                })
            }
            // Unwind edges appear only inside a continuation.
            tag @ tags::instruction::UNWIND => {
                Err(self.unexpected_tag(offset, tag, "instruction"))
            }
            tags::instruction::RETURN => {
                let value = self.value()?;
                let position = self.source_position()?;
                Ok(Instruction::Return { value, position })
            }
            tags::instruction::JUMP => {
                let target = self.next()?;
                let position = self.source_position()?;
                Ok(Instruction::Jump { target, position })
            }
            tags::instruction::IF => {
                let condition = self.value()?;
                let success = self.next()?;
                let failure = self.next()?;
                let position = self.source_position()?;
                Ok(Instruction::If {
                    condition,
                    success,
                    failure,
                    position,
                })
            }
            tags::instruction::SWITCH => {
                let value = self.value()?;
                let targets = self.sequence(Self::next)?;
                let position = self.source_position()?;
                Ok(Instruction::Switch {
                    value,
                    targets,
                    position,
                })
            }
            tags::instruction::THROW => {
                let exception = self.value()?;
                let unwind = self.next()?;
                let position = self.source_position()?;
                Ok(Instruction::Throw {
                    exception,
                    unwind,
                    position,
                })
            }
            tags::instruction::UNREACHABLE => {
                let unwind = self.next()?;
                let position = self.source_position()?;
                Ok(Instruction::Unreachable { unwind, position })
            }
            tags::instruction::LINKTIME_IF => {
                let condition = self.linktime_condition()?;
                let success = self.next()?;
                let failure = self.next()?;
                let position = self.source_position()?;
                Ok(Instruction::LinktimeJump {
                    condition,
                    success,
                    failure,
                    position,
                })
            }
            tag => Err(self.unexpected_tag(offset, tag, "instruction")),
        }
    }

    /// Reads a link-time condition.
    pub fn linktime_condition(&mut self) -> Result<LinktimeCondition, DecodeError> {
        let offset = self.source.position();
        match self.source.u8()? {
            tags::linktime::SIMPLE => {
                let lhs = self.string()?;
                let relation = self.comparison_operator()?;
                let rhs = self.value()?;
                Ok(LinktimeCondition::Simple { lhs, rhs, relation })
            }
            tags::linktime::COMPLEX => {
                let relation = self.logical_operator()?;
                let lhs = self.linktime_condition()?;
                let rhs = self.linktime_condition()?;
                Ok(LinktimeCondition::Complex {
                    lhs: Box::new(lhs),
                    rhs: Box::new(rhs),
                    relation,
                })
            }
            tag => Err(self.unexpected_tag(offset, tag, "linktime condition")),
        }
    }

    // --- Attributes -------------------------------------------------------

    /// Reads an attribute.
    pub fn attribute(&mut self) -> Result<Attribute, DecodeError> {
        let offset = self.source.position();
        let attribute = match self.source.u8()? {
            tags::attribute::MAY_INLINE => Attribute::Thin(AttributeKind::MayInline),
            tags::attribute::INLINE_HINT => Attribute::Thin(AttributeKind::InlineHint),
            tags::attribute::NO_INLINE => Attribute::Thin(AttributeKind::NoInline),
            tags::attribute::ALWAYS_INLINE => Attribute::Thin(AttributeKind::AlwaysInline),
            tags::attribute::MAY_SPECIALIZE => Attribute::Thin(AttributeKind::MaySpecialize),
            tags::attribute::NO_SPECIALIZE => Attribute::Thin(AttributeKind::NoSpecialize),
            tags::attribute::UN_OPT => Attribute::Thin(AttributeKind::UnOpt),
            tags::attribute::NO_OPT => Attribute::Thin(AttributeKind::NoOpt),
            tags::attribute::DID_OPT => Attribute::Thin(AttributeKind::DidOpt),
            tags::attribute::BAIL_OPT => Attribute::BailOpt {
                message: self.string()?,
            },
            tags::attribute::EXTERN => Attribute::Extern {
                blocking: self.boolean()?,
            },
            tags::attribute::LINK => Attribute::Link {
                name: self.string()?,
            },
            tags::attribute::DYN => Attribute::Thin(AttributeKind::Dyn),
            tags::attribute::STUB => Attribute::Thin(AttributeKind::Stub),
            tags::attribute::ABSTRACT => Attribute::Thin(AttributeKind::Abstract),
            tags::attribute::VOLATILE => Attribute::Thin(AttributeKind::Volatile),
            tags::attribute::FINAL => Attribute::Thin(AttributeKind::Final),
            tags::attribute::SAFE_PUBLISH => Attribute::Thin(AttributeKind::SafePublish),
            tags::attribute::LINKTIME_RESOLVED => {
                Attribute::Thin(AttributeKind::LinktimeResolved)
            }
            tags::attribute::USES_INTRINSIC => Attribute::Thin(AttributeKind::UsesIntrinsic),
            tags::attribute::ALIGN => {
                let size = self.source.signed_leb128()?;
                let group = self.optional(Self::string)?;
                Attribute::Alignment { size, group }
            }
            tags::attribute::DEFINE => Attribute::Define {
                name: self.string()?,
            },
            tag => return Err(self.unexpected_tag(offset, tag, "attribute")),
        };
        Ok(attribute)
    }

    // --- Positions and debug information ----------------------------------

    /// Reads a source position: a path, then 0-based line and column. An
    /// empty path denotes a virtual source.
    pub fn source_position(&mut self) -> Result<SourcePosition, DecodeError> {
        let path = self.string()?;
        let file = if path.is_empty() {
            SourceFile::Virtual
        } else {
            SourceFile::Concrete(path)
        };
        let line_index = self.source.unsigned_leb128()?;
        let column_index = self.source.unsigned_leb128()?;
        Ok(SourcePosition::new(file, line_index, column_index))
    }

    fn local_names(&mut self) -> Result<FxHashMap<Local, String>, DecodeError> {
        let count = self.source.unsigned_leb128()? as usize;
        let mut result = FxHashMap::default();
        result.reserve(count.min(4096));
        for _ in 0..count {
            let local = self.local()?;
            let name = self.string()?;
            result.insert(local, name);
        }
        Ok(result)
    }

    fn lexical_scope(&mut self) -> Result<LexicalScope, DecodeError> {
        let id = self.scope()?;
        let parent = self.scope()?;
        let position = self.source_position()?;
        Ok(LexicalScope {
            id,
            parent,
            position,
        })
    }

    fn debug_information(&mut self) -> Result<DebugInformation, DecodeError> {
        let local_names = self.local_names()?;
        let scopes = self.sequence(Self::lexical_scope)?;
        Ok(DebugInformation {
            local_names,
            scopes,
        })
    }

    // --- Definitions ------------------------------------------------------

    /// Reads a definition.
    pub fn definition(&mut self) -> Result<Definition, DecodeError> {
        let offset = self.source.position();
        let tag = self.source.u8()?;
        let attributes: AttributeSet = self.sequence(Self::attribute)?.into_iter().collect();
        trace!(offset, tag, "decoding definition");

        match tag {
            tags::definition::VARIABLE | tags::definition::CONSTANT => {
                let name = self.member()?;
                let ty = self.ty()?;
                let initializer = self.value()?;
                let position = self.source_position()?;
                Ok(Definition::Binding {
                    attributes,
                    name,
                    ty,
                    initializer,
                    constant: tag == tags::definition::CONSTANT,
                    position,
                })
            }
            tags::definition::DECLARE => {
                let name = self.member()?;
                let ty = self.function_type()?;
                let position = self.source_position()?;
                Ok(Definition::Forward {
                    attributes,
                    name,
                    ty,
                    position,
                })
            }
            tags::definition::DEFINE => {
                let name = self.member()?;
                let ty = self.function_type()?;
                let instructions = self.sequence(Self::instruction)?;
                let debug = self.debug_information()?;
                let position = self.source_position()?;
                Ok(Definition::Method {
                    attributes,
                    name,
                    ty,
                    instructions,
                    debug,
                    position,
                })
            }
            tags::definition::TRAIT => {
                let name = self.top()?;
                let bases = self.sequence(Self::top)?;
                let position = self.source_position()?;
                Ok(Definition::Trait {
                    attributes,
                    name,
                    bases,
                    position,
                })
            }
            tags::definition::CLASS => {
                let name = self.top()?;
                let parent = self.optional(Self::top)?;
                let traits = self.sequence(Self::top)?;
                let position = self.source_position()?;
                Ok(Definition::Class {
                    attributes,
                    name,
                    parent,
                    traits,
                    position,
                })
            }
            tags::definition::MODULE => {
                let name = self.top()?;
                let parent = self.optional(Self::top)?;
                let traits = self.sequence(Self::top)?;
                let position = self.source_position()?;
                Ok(Definition::Module {
                    attributes,
                    name,
                    parent,
                    traits,
                    position,
                })
            }
            tag => Err(self.unexpected_tag(offset, tag, "definition")),
        }
    }
}
