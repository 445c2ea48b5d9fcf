// symbol.rs
//
// Identifiers of top-level entities and their members.

use std::fmt;

/// The signature of a member symbol, as a mangled name.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Signature {
    pub mangled_name: String,
}

impl Signature {
    pub fn new(mangled_name: impl Into<String>) -> Self {
        Self {
            mangled_name: mangled_name.into(),
        }
    }
}

impl fmt::Display for Signature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.mangled_name)
    }
}

/// A top-level symbol: the identifier of a class, trait, or module.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Top {
    pub id: String,
}

impl Top {
    pub fn new(id: impl Into<String>) -> Self {
        Self { id: id.into() }
    }
}

impl fmt::Display for Top {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.id)
    }
}

/// A member of a top-level symbol, disambiguated by its signature.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Member {
    pub owner: Top,
    pub signature: Signature,
}

impl fmt::Display for Member {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.owner, self.signature)
    }
}

/// The identifier of a type or method (aka a global).
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Symbol {
    /// The absence of a symbol.
    None,
    /// A top-level symbol.
    Top(Top),
    /// A member of a top-level symbol.
    Member(Member),
}

impl Symbol {
    /// Creates a top-level symbol with the given identifier.
    pub fn top(id: impl Into<String>) -> Self {
        Symbol::Top(Top::new(id))
    }

    /// Creates a member of `owner` having the given mangled signature.
    pub fn member(owner: Top, signature: impl Into<String>) -> Self {
        Symbol::Member(Member {
            owner,
            signature: Signature::new(signature),
        })
    }

    pub fn is_none(&self) -> bool {
        matches!(self, Symbol::None)
    }

    /// Projects this symbol as a top-level symbol.
    pub fn as_top(&self) -> Option<&Top> {
        match self {
            Symbol::Top(t) => Some(t),
            _ => None,
        }
    }

    /// Projects this symbol as a member.
    pub fn as_member(&self) -> Option<&Member> {
        match self {
            Symbol::Member(m) => Some(m),
            _ => None,
        }
    }

    /// Consumes this symbol, yielding its top-level payload.
    pub fn into_top(self) -> Option<Top> {
        match self {
            Symbol::Top(t) => Some(t),
            _ => None,
        }
    }

    /// Consumes this symbol, yielding its member payload.
    pub fn into_member(self) -> Option<Member> {
        match self {
            Symbol::Member(m) => Some(m),
            _ => None,
        }
    }
}

impl fmt::Display for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Symbol::None => f.write_str("null"),
            Symbol::Top(t) => t.fmt(f),
            Symbol::Member(m) => m.fmt(f),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn equality_is_structural() {
        let a = Symbol::top("java.lang.Object");
        let b = Symbol::top("java.lang.Object");
        let c = Symbol::top("java.lang.String");

        assert_eq!(a, b);
        assert_ne!(a, c);
        assert_ne!(a, Symbol::None);
    }

    #[test]
    fn projections() {
        let top = Top::new("A");
        let member = Symbol::member(top.clone(), "m()");

        assert!(member.as_member().is_some());
        assert!(member.as_top().is_none());
        assert_eq!(member.as_member().unwrap().owner, top);
        assert_eq!(Symbol::Top(top.clone()).into_top(), Some(top));
    }

    #[test]
    fn display() {
        assert_eq!(Symbol::None.to_string(), "null");
        assert_eq!(Symbol::top("A").to_string(), "A");
        assert_eq!(Symbol::member(Top::new("A"), "m()").to_string(), "A.m()");
    }
}
