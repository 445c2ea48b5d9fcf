// defs.rs
//
// Top-level definitions: bindings, method declarations and definitions,
// traits, classes, and modules.

use rustc_hash::FxHashMap;

use crate::attrs::AttributeSet;
use crate::inst::Instruction;
use crate::local::Local;
use crate::pos::SourcePosition;
use crate::scope::LexicalScope;
use crate::symbol::{Member, Symbol, Top};
use crate::ty::{FunctionType, Type};
use crate::value::Value;

/// Debugging metadata attached to a method definition.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct DebugInformation {
    /// The source-level names of locals.
    pub local_names: FxHashMap<Local, String>,
    /// The lexical scopes of the method body.
    pub scopes: Vec<LexicalScope>,
}

/// A top-level definition in a module.
#[derive(Debug, Clone, PartialEq)]
pub enum Definition {
    /// A variable or constant: a field of a class or module, or a global.
    Binding {
        attributes: AttributeSet,
        name: Member,
        ty: Type,
        /// The value initializing the binding.
        initializer: Value,
        /// `true` if the binding is constant.
        constant: bool,
        position: SourcePosition,
    },
    /// A method declaration without a body.
    Forward {
        attributes: AttributeSet,
        name: Member,
        ty: FunctionType,
        position: SourcePosition,
    },
    /// A method definition with its body.
    Method {
        attributes: AttributeSet,
        name: Member,
        ty: FunctionType,
        instructions: Vec<Instruction>,
        debug: DebugInformation,
        position: SourcePosition,
    },
    /// A trait definition.
    Trait {
        attributes: AttributeSet,
        name: Top,
        /// The traits extended by this trait.
        bases: Vec<Top>,
        position: SourcePosition,
    },
    /// A class definition.
    Class {
        attributes: AttributeSet,
        name: Top,
        /// The superclass, if any.
        parent: Option<Top>,
        /// The traits extended by this class.
        traits: Vec<Top>,
        position: SourcePosition,
    },
    /// A module definition.
    Module {
        attributes: AttributeSet,
        name: Top,
        /// The parent class, if any.
        parent: Option<Top>,
        /// The traits extended by this module.
        traits: Vec<Top>,
        position: SourcePosition,
    },
}

impl Definition {
    /// The attributes of this definition.
    pub fn attributes(&self) -> &AttributeSet {
        match self {
            Definition::Binding { attributes, .. }
            | Definition::Forward { attributes, .. }
            | Definition::Method { attributes, .. }
            | Definition::Trait { attributes, .. }
            | Definition::Class { attributes, .. }
            | Definition::Module { attributes, .. } => attributes,
        }
    }

    /// The name of this definition, as a symbol.
    pub fn name(&self) -> Symbol {
        match self {
            Definition::Binding { name, .. }
            | Definition::Forward { name, .. }
            | Definition::Method { name, .. } => Symbol::Member(name.clone()),
            Definition::Trait { name, .. }
            | Definition::Class { name, .. }
            | Definition::Module { name, .. } => Symbol::Top(name.clone()),
        }
    }

    /// The source position to which this definition corresponds.
    pub fn position(&self) -> &SourcePosition {
        match self {
            Definition::Binding { position, .. }
            | Definition::Forward { position, .. }
            | Definition::Method { position, .. }
            | Definition::Trait { position, .. }
            | Definition::Class { position, .. }
            | Definition::Module { position, .. } => position,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accessors() {
        let def = Definition::Class {
            attributes: AttributeSet::new(),
            name: Top::new("A"),
            parent: Some(Top::new("java.lang.Object")),
            traits: vec![],
            position: SourcePosition::invalid(),
        };
        assert_eq!(def.name(), Symbol::top("A"));
        assert!(def.position().is_invalid());
        assert!(def.attributes().is_empty());
    }

    #[test]
    fn method_name_is_a_member() {
        let def = Definition::Forward {
            attributes: AttributeSet::new(),
            name: Member {
                owner: Top::new("A"),
                signature: crate::symbol::Signature::new("m()"),
            },
            ty: FunctionType::new(vec![], Type::unit()),
            position: SourcePosition::invalid(),
        };
        assert!(def.name().as_member().is_some());
    }
}
