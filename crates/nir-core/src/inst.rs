// inst.rs
//
// The instructions forming a method body. Bodies are SSA-shaped: `Label`
// opens a basic block with parameters, `Let` binds operation results, and
// the remaining shapes terminate blocks.

use crate::linktime::LinktimeCondition;
use crate::local::Local;
use crate::next::Next;
use crate::operation::Operation;
use crate::pos::SourcePosition;
use crate::scope::ScopeId;
use crate::value::{LocalValue, Value};

/// An instruction. Every instruction carries the source position it
/// corresponds to.
#[derive(Debug, Clone, PartialEq)]
pub enum Instruction {
    /// A label opening a basic block.
    Label {
        id: Local,
        /// The parameters of the block.
        parameters: Vec<LocalValue>,
        position: SourcePosition,
    },
    /// The binding of an operation's result to a local.
    Let {
        id: Local,
        operation: Operation,
        /// The unwinding continuation of the operation, if any.
        next: Next,
        position: SourcePosition,
        /// The lexical scope the binding belongs to.
        scope: ScopeId,
    },
    /// A return.
    Return { value: Value, position: SourcePosition },
    /// An unconditional jump.
    Jump { target: Next, position: SourcePosition },
    /// A conditional jump.
    If {
        condition: Value,
        success: Next,
        failure: Next,
        position: SourcePosition,
    },
    /// A multi-way jump. The first target is the default case.
    Switch {
        value: Value,
        targets: Vec<Next>,
        position: SourcePosition,
    },
    /// The throwing of an exception.
    Throw {
        exception: Value,
        unwind: Next,
        position: SourcePosition,
    },
    /// An unreachable program point.
    Unreachable { unwind: Next, position: SourcePosition },
    /// A conditional jump resolved at link time.
    LinktimeJump {
        condition: LinktimeCondition,
        success: Next,
        failure: Next,
        position: SourcePosition,
    },
}

impl Instruction {
    /// The source position to which this instruction corresponds.
    pub fn position(&self) -> &SourcePosition {
        match self {
            Instruction::Label { position, .. }
            | Instruction::Let { position, .. }
            | Instruction::Return { position, .. }
            | Instruction::Jump { position, .. }
            | Instruction::If { position, .. }
            | Instruction::Switch { position, .. }
            | Instruction::Throw { position, .. }
            | Instruction::Unreachable { position, .. }
            | Instruction::LinktimeJump { position, .. } => position,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn position_accessor() {
        let p = SourcePosition::new(crate::pos::SourceFile::Concrete("A.scala".into()), 3, 7);
        let inst = Instruction::Return {
            value: Value::Unit,
            position: p.clone(),
        };
        assert_eq!(inst.position(), &p);

        let inst = Instruction::Unreachable {
            unwind: Next::None,
            position: SourcePosition::invalid(),
        };
        assert!(inst.position().is_invalid());
    }
}
