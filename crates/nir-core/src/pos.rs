// pos.rs
//
// Source positions attached to instructions and definitions.

use std::fmt;

/// A source file referred to by a position.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub enum SourceFile {
    /// An abstract file without a physical location (e.g. a buffer in
    /// memory).
    #[default]
    Virtual,
    /// A concrete file identified by a path relative to the workspace the
    /// source was compiled in.
    Concrete(String),
}

impl fmt::Display for SourceFile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SourceFile::Virtual => f.write_str("<virtual>"),
            SourceFile::Concrete(path) => f.write_str(path),
        }
    }
}

/// A position in a source file. Line and column indices are 0-based.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SourcePosition {
    /// The source file containing this position.
    pub file: SourceFile,
    /// The 0-based line number of this position.
    pub line_index: u64,
    /// The 0-based column number of this position.
    pub column_index: u64,
}

impl SourcePosition {
    pub fn new(file: SourceFile, line_index: u64, column_index: u64) -> Self {
        Self {
            file,
            line_index,
            column_index,
        }
    }

    /// A position that does not correspond to any source location.
    pub fn invalid() -> Self {
        Self {
            file: SourceFile::Virtual,
            line_index: u64::MAX,
            column_index: u64::MAX,
        }
    }

    pub fn is_invalid(&self) -> bool {
        *self == Self::invalid()
    }

    /// The 1-based line number of this position.
    pub fn line_number(&self) -> u64 {
        self.line_index + 1
    }

    /// The 1-based column number of this position.
    pub fn column_number(&self) -> u64 {
        self.column_index + 1
    }
}

impl fmt::Display for SourcePosition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_invalid() {
            f.write_str("<unknown>")
        } else {
            write!(f, "{}:{}:{}", self.file, self.line_number(), self.column_number())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn invalid_position_round_trips() {
        assert!(SourcePosition::invalid().is_invalid());
        let p = SourcePosition::new(SourceFile::Concrete("a/B.scala".into()), 0, 4);
        assert!(!p.is_invalid());
        assert_eq!(p.line_number(), 1);
        assert_eq!(p.column_number(), 5);
    }
}
