// error.rs
//
// Decoding failures. Every error carries the byte offset at which the
// inconsistency was detected; decoding never recovers inside a record.

use miette::Diagnostic;
use thiserror::Error;

/// An error that occurred while decoding a serialized module.
#[derive(Debug, Clone, PartialEq, Eq, Error, Diagnostic)]
pub enum DecodeError {
    #[error("not enough bytes at offset {offset}")]
    #[diagnostic(code(N1001))]
    OutOfBytes { offset: usize },

    #[error("LEB128 value at offset {offset} does not fit in 64 bits")]
    #[diagnostic(code(N1002))]
    LebOverflow { offset: usize },

    #[error("ill-formed string at offset {offset}")]
    #[diagnostic(code(N1003))]
    IllFormedString { offset: usize },

    #[error("unexpected {category} tag {tag:#04x} at offset {offset}")]
    #[diagnostic(code(N1004))]
    UnexpectedTag {
        offset: usize,
        tag: u8,
        category: &'static str,
    },

    #[error(
        "back-reference {index} at offset {offset} is outside the {category} memo (length {len})"
    )]
    #[diagnostic(code(N1005))]
    BadBackReference {
        offset: usize,
        index: usize,
        len: usize,
        category: &'static str,
    },

    #[error("expected {expected} at offset {offset}")]
    #[diagnostic(code(N1006))]
    BadProjection {
        offset: usize,
        expected: &'static str,
    },

    #[error("invalid memory ordering {value} at offset {offset}")]
    #[diagnostic(code(N1007))]
    BadMemoryOrder { offset: usize, value: u8 },

    #[error("invalid file magic {found:#010x} at offset {offset}")]
    #[diagnostic(code(N1008))]
    BadMagic { offset: usize, found: i32 },
}

impl DecodeError {
    /// The byte offset at which the error was detected.
    pub fn offset(&self) -> usize {
        match self {
            DecodeError::OutOfBytes { offset }
            | DecodeError::LebOverflow { offset }
            | DecodeError::IllFormedString { offset }
            | DecodeError::UnexpectedTag { offset, .. }
            | DecodeError::BadBackReference { offset, .. }
            | DecodeError::BadProjection { offset, .. }
            | DecodeError::BadMemoryOrder { offset, .. }
            | DecodeError::BadMagic { offset, .. } => *offset,
        }
    }
}

/// An error that occurred while loading a module from disk.
#[derive(Debug, Error, Diagnostic)]
pub enum FileError {
    #[error("could not read '{path}'")]
    #[diagnostic(code(N1009))]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error(transparent)]
    #[diagnostic(transparent)]
    Decode(#[from] DecodeError),
}
