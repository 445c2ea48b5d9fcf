// next.rs
//
// Continuations attached to terminator instructions.

use std::fmt;

use crate::local::Local;
use crate::value::{LocalValue, Value};

/// The continuation following a terminator: nothing, an unwinding edge, a
/// switch case, or a jump to a labeled block with arguments.
#[derive(Debug, Clone, PartialEq)]
pub enum Next {
    /// The absence of a continuation.
    None,
    /// An unwinding edge carrying the local that receives the exception.
    Unwind {
        exception: LocalValue,
        next: Box<Next>,
    },
    /// A switch case guarded by a constant value.
    Case { value: Value, next: Box<Next> },
    /// A jump to a labeled block, passing block arguments.
    Label { id: Local, arguments: Vec<Value> },
}

impl Next {
    pub fn is_none(&self) -> bool {
        matches!(self, Next::None)
    }

    /// A jump to `id` with no arguments.
    pub fn label(id: Local) -> Self {
        Next::Label {
            id,
            arguments: Vec::new(),
        }
    }
}

impl fmt::Display for Next {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Next::None => f.write_str("none"),
            Next::Unwind { exception, next } => {
                write!(f, "unwind {} to {}", exception.id, next)
            }
            Next::Case { value, next } => write!(f, "case {value} => {next}"),
            Next::Label { id, arguments } => {
                id.fmt(f)?;
                if !arguments.is_empty() {
                    f.write_str("(")?;
                    for (i, a) in arguments.iter().enumerate() {
                        if i > 0 {
                            f.write_str(", ")?;
                        }
                        a.fmt(f)?;
                    }
                    f.write_str(")")?;
                }
                Ok(())
            }
        }
    }
}
