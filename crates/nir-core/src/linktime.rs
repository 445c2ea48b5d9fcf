// linktime.rs
//
// Conditions evaluated when the program is linked.

use std::fmt;

use crate::ops::{ComparisonOperator, LogicalOperator};
use crate::value::Value;

/// A condition evaluated at link time.
#[derive(Debug, Clone, PartialEq)]
pub enum LinktimeCondition {
    /// A predicate comparing a named linktime property against a value.
    Simple {
        /// The name of the property on which the predicate applies.
        lhs: String,
        /// The value the property is compared against.
        rhs: Value,
        relation: ComparisonOperator,
    },
    /// A conjunction or disjunction of two conditions.
    Complex {
        lhs: Box<LinktimeCondition>,
        rhs: Box<LinktimeCondition>,
        relation: LogicalOperator,
    },
}

impl fmt::Display for LinktimeCondition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LinktimeCondition::Simple { lhs, rhs, relation } => {
                write!(f, "{lhs} {relation} {rhs}")
            }
            LinktimeCondition::Complex { lhs, rhs, relation } => {
                write!(f, "({lhs}) {relation} ({rhs})")
            }
        }
    }
}
