//! Policy module - declared rules between components

use crate::ComponentId;
use std::collections::BTreeSet;
use std::fmt;

/// Kind of a dependency between two components
///
/// Explicit kinds come straight from a declared policy. Implicit kinds are
/// inferred for dependencies that only exist in the implementation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum PolicyKind {
    /// Declared as allowed
    AllowExplicit,

    /// Allowed through an ancestor policy or the target's visibility
    AllowImplicit,

    /// Declared as forbidden
    DenyExplicit,

    /// Forbidden through an ancestor policy or by default
    DenyImplicit,

    /// Declared as forbidden except for a fixed set of type dependencies
    TolerateExplicit,
}

impl PolicyKind {
    /// Get the kind name as a string
    pub fn as_str(&self) -> &'static str {
        match self {
            PolicyKind::AllowExplicit => "allow_explicit",
            PolicyKind::AllowImplicit => "allow_implicit",
            PolicyKind::DenyExplicit => "deny_explicit",
            PolicyKind::DenyImplicit => "deny_implicit",
            PolicyKind::TolerateExplicit => "tolerate_explicit",
        }
    }

    /// Parse a kind from a string (case-insensitive)
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "allow_explicit" => Some(PolicyKind::AllowExplicit),
            "allow_implicit" => Some(PolicyKind::AllowImplicit),
            "deny_explicit" => Some(PolicyKind::DenyExplicit),
            "deny_implicit" => Some(PolicyKind::DenyImplicit),
            "tolerate_explicit" => Some(PolicyKind::TolerateExplicit),
            _ => None,
        }
    }

    /// Whether the kind was declared rather than inferred
    pub fn is_explicit(&self) -> bool {
        match self {
            PolicyKind::AllowExplicit | PolicyKind::DenyExplicit | PolicyKind::TolerateExplicit => {
                true
            }
            PolicyKind::AllowImplicit | PolicyKind::DenyImplicit => false,
        }
    }

    /// All kinds in declaration order
    pub fn all() -> [PolicyKind; 5] {
        [
            PolicyKind::AllowExplicit,
            PolicyKind::AllowImplicit,
            PolicyKind::DenyExplicit,
            PolicyKind::DenyImplicit,
            PolicyKind::TolerateExplicit,
        ]
    }
}

impl fmt::Display for PolicyKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for PolicyKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s).ok_or_else(|| format!("Invalid policy kind: {}", s))
    }
}

/// An observed dependency between two types
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TypeDependency {
    /// The depending type
    pub source: String,

    /// The type depended upon
    pub target: String,
}

impl TypeDependency {
    /// Create a new type dependency
    pub fn new(source: impl Into<String>, target: impl Into<String>) -> Self {
        Self {
            source: source.into(),
            target: target.into(),
        }
    }
}

impl fmt::Display for TypeDependency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} -> {}", self.source, self.target)
    }
}

/// A declared rule from one component to another
///
/// Only explicit kinds can be declared; tolerated type dependencies are only
/// carried by [`PolicyKind::TolerateExplicit`] policies.
#[derive(Debug, Clone, PartialEq)]
pub struct Policy {
    pub(crate) source: ComponentId,
    pub(crate) target: ComponentId,
    pub(crate) kind: PolicyKind,
    pub(crate) tolerated: BTreeSet<TypeDependency>,
}

impl Policy {
    /// Source component
    pub fn source(&self) -> ComponentId {
        self.source
    }

    /// Target component
    pub fn target(&self) -> ComponentId {
        self.target
    }

    /// Declared kind
    pub fn kind(&self) -> PolicyKind {
        self.kind
    }

    /// Type dependencies tolerated by this policy (empty unless tolerate)
    pub fn tolerated(&self) -> &BTreeSet<TypeDependency> {
        &self.tolerated
    }
}
