// local.rs
//
// Identifier for an SSA value or basic-block parameter.

use std::fmt;

/// The identifier of a local SSA value or block parameter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Local(pub u64);

impl Local {
    pub fn index(self) -> u64 {
        self.0
    }
}

impl fmt::Display for Local {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "%{}", self.0)
    }
}
