// attrs.rs
//
// Attributes attached to definitions. Thin attributes are payload-less
// flags stored in a bitset; fat attributes carry data and are stored in
// insertion order.

use std::fmt;

/// The kind of an attribute. Each kind occupies a distinct bit so that the
/// thin members of a set fit in one 32-bit word.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u32)]
pub enum AttributeKind {
    MayInline = 1,
    InlineHint = 1 << 1,
    NoInline = 1 << 2,
    AlwaysInline = 1 << 3,
    MaySpecialize = 1 << 4,
    NoSpecialize = 1 << 5,
    UnOpt = 1 << 6,
    NoOpt = 1 << 7,
    DidOpt = 1 << 8,
    BailOpt = 1 << 9,
    Dyn = 1 << 10,
    Stub = 1 << 11,
    Extern = 1 << 12,
    Link = 1 << 13,
    Define = 1 << 14,
    Abstract = 1 << 15,
    Volatile = 1 << 16,
    Final = 1 << 17,
    SafePublish = 1 << 18,
    LinktimeResolved = 1 << 19,
    UsesIntrinsic = 1 << 20,
    Alignment = 1 << 21,
}

impl AttributeKind {
    pub fn bit(self) -> u32 {
        self as u32
    }

    /// The kind occupying the given bit, if any.
    pub fn from_bit(bit: u32) -> Option<Self> {
        let kind = match bit {
            1 => AttributeKind::MayInline,
            0x2 => AttributeKind::InlineHint,
            0x4 => AttributeKind::NoInline,
            0x8 => AttributeKind::AlwaysInline,
            0x10 => AttributeKind::MaySpecialize,
            0x20 => AttributeKind::NoSpecialize,
            0x40 => AttributeKind::UnOpt,
            0x80 => AttributeKind::NoOpt,
            0x100 => AttributeKind::DidOpt,
            0x200 => AttributeKind::BailOpt,
            0x400 => AttributeKind::Dyn,
            0x800 => AttributeKind::Stub,
            0x1000 => AttributeKind::Extern,
            0x2000 => AttributeKind::Link,
            0x4000 => AttributeKind::Define,
            0x8000 => AttributeKind::Abstract,
            0x10000 => AttributeKind::Volatile,
            0x20000 => AttributeKind::Final,
            0x40000 => AttributeKind::SafePublish,
            0x80000 => AttributeKind::LinktimeResolved,
            0x100000 => AttributeKind::UsesIntrinsic,
            0x200000 => AttributeKind::Alignment,
            _ => return None,
        };
        Some(kind)
    }
}

impl fmt::Display for AttributeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            AttributeKind::MayInline => "mayinline",
            AttributeKind::InlineHint => "inlinehint",
            AttributeKind::NoInline => "noinline",
            AttributeKind::AlwaysInline => "alwaysinline",
            AttributeKind::MaySpecialize => "mayspecialize",
            AttributeKind::NoSpecialize => "nospecialize",
            AttributeKind::UnOpt => "unopt",
            AttributeKind::NoOpt => "noopt",
            AttributeKind::DidOpt => "didopt",
            AttributeKind::BailOpt => "bailopt",
            AttributeKind::Dyn => "dyn",
            AttributeKind::Stub => "stub",
            AttributeKind::Extern => "extern",
            AttributeKind::Link => "link",
            AttributeKind::Define => "define",
            AttributeKind::Abstract => "abstract",
            AttributeKind::Volatile => "volatile",
            AttributeKind::Final => "final",
            AttributeKind::SafePublish => "safe-publish",
            AttributeKind::LinktimeResolved => "linktime",
            AttributeKind::UsesIntrinsic => "uses-intrinsics",
            AttributeKind::Alignment => "align",
        };
        f.write_str(s)
    }
}

/// An attribute attached to a definition.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Attribute {
    /// A payload-less flag.
    Thin(AttributeKind),
    /// An optimizer bail-out with its reason.
    BailOpt { message: String },
    /// An external definition, optionally blocking.
    Extern { blocking: bool },
    /// A native library to link against.
    Link { name: String },
    /// A linker symbol to define.
    Define { name: String },
    /// An alignment constraint, optionally grouped.
    Alignment { size: i64, group: Option<String> },
}

impl Attribute {
    /// The kind of this attribute.
    pub fn kind(&self) -> AttributeKind {
        match self {
            Attribute::Thin(kind) => *kind,
            Attribute::BailOpt { .. } => AttributeKind::BailOpt,
            Attribute::Extern { .. } => AttributeKind::Extern,
            Attribute::Link { .. } => AttributeKind::Link,
            Attribute::Define { .. } => AttributeKind::Define,
            Attribute::Alignment { .. } => AttributeKind::Alignment,
        }
    }

    /// Returns `true` if this attribute has no associated payload.
    pub fn is_thin(&self) -> bool {
        matches!(self, Attribute::Thin(_))
    }
}

impl fmt::Display for Attribute {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Attribute::Thin(kind) => kind.fmt(f),
            Attribute::BailOpt { message } => write!(f, "bailopt({message})"),
            Attribute::Extern { blocking } => {
                f.write_str("extern")?;
                if *blocking {
                    f.write_str(" blocking")?;
                }
                Ok(())
            }
            Attribute::Link { name } => write!(f, "link({name})"),
            Attribute::Define { name } => write!(f, "define({name})"),
            Attribute::Alignment { size, group } => {
                write!(f, "align({size}")?;
                if let Some(group) = group {
                    write!(f, ", {group}")?;
                }
                f.write_str(")")
            }
        }
    }
}

/// An ordered set of attributes.
///
/// Iteration yields thin attributes first, ordered by ascending kind bit,
/// followed by fat attributes in insertion order. Insertion is idempotent.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AttributeSet {
    /// The bitset of thin members.
    thin: u32,
    /// The fat members, in insertion order.
    fat: Vec<Attribute>,
}

impl AttributeSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts `attribute` unless an equal one is already present.
    pub fn append(&mut self, attribute: Attribute) {
        match attribute {
            Attribute::Thin(kind) => self.thin |= kind.bit(),
            fat => {
                if !self.fat.contains(&fat) {
                    self.fat.push(fat);
                }
            }
        }
    }

    /// Returns `true` if the set contains an attribute of the given kind.
    pub fn contains(&self, kind: AttributeKind) -> bool {
        self.thin & kind.bit() != 0 || self.fat.iter().any(|a| a.kind() == kind)
    }

    /// The number of thin attributes in the set.
    pub fn thin_len(&self) -> usize {
        self.thin.count_ones() as usize
    }

    /// The number of fat attributes in the set.
    pub fn fat_len(&self) -> usize {
        self.fat.len()
    }

    pub fn len(&self) -> usize {
        self.thin_len() + self.fat_len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// The attributes in the set, in order.
    pub fn elements(&self) -> Vec<Attribute> {
        let mut result = Vec::with_capacity(self.len());
        for bit in 0..u32::BITS {
            let mask = 1 << bit;
            if self.thin & mask != 0 {
                if let Some(kind) = AttributeKind::from_bit(mask) {
                    result.push(Attribute::Thin(kind));
                }
                if result.len() == self.thin_len() {
                    break;
                }
            }
        }
        result.extend(self.fat.iter().cloned());
        result
    }
}

impl FromIterator<Attribute> for AttributeSet {
    fn from_iter<I: IntoIterator<Item = Attribute>>(iter: I) -> Self {
        let mut set = Self::new();
        for attribute in iter {
            set.append(attribute);
        }
        set
    }
}

impl fmt::Display for AttributeSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, a) in self.elements().iter().enumerate() {
            if i > 0 {
                f.write_str(" ")?;
            }
            a.fmt(f)?;
        }
        Ok(())
    }
}
