//! Component module - nodes of the architecture hierarchy

use std::fmt;

/// Handle of a component inside an [`Architecture`](crate::Architecture)
///
/// Handles are indices into the architecture's arena and are only meaningful
/// for the architecture that issued them. Ordering follows declaration order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ComponentId(usize);

impl ComponentId {
    /// Create a handle from a raw arena index
    pub(crate) fn from_index(index: usize) -> Self {
        Self(index)
    }

    /// Get the raw arena index
    pub fn index(&self) -> usize {
        self.0
    }
}

impl fmt::Display for ComponentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Visibility of a component towards the rest of the architecture
///
/// - Private: reachable only through declared policies
/// - ComponentPublic: reachable from everything inside the same parent
/// - Public: reachable from everywhere
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Stereotype {
    /// Only declared policies grant access
    #[default]
    Private,

    /// Visible to siblings and their descendants
    ComponentPublic,

    /// Visible to every component
    Public,
}

impl Stereotype {
    /// Get the stereotype name as a string
    pub fn as_str(&self) -> &'static str {
        match self {
            Stereotype::Private => "private",
            Stereotype::ComponentPublic => "component_public",
            Stereotype::Public => "public",
        }
    }

    /// Parse a stereotype from a string (case-insensitive)
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "private" | "none" => Some(Stereotype::Private),
            "component_public" | "component-public" => Some(Stereotype::ComponentPublic),
            "public" => Some(Stereotype::Public),
            _ => None,
        }
    }
}

impl std::str::FromStr for Stereotype {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s).ok_or_else(|| format!("Invalid stereotype: {}", s))
    }
}

/// Whether a code mapping adds or removes types from a component
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MappingKind {
    /// Types matching the pattern belong to the component
    Include,

    /// Types matching the pattern never belong to the component
    Exclude,
}

/// A regular expression attached to a component
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CodeMapping {
    /// Pattern text, matched against the whole type name
    pub pattern: String,

    /// Include or exclude
    pub kind: MappingKind,
}

impl CodeMapping {
    /// Create an include mapping
    pub fn include(pattern: impl Into<String>) -> Self {
        Self {
            pattern: pattern.into(),
            kind: MappingKind::Include,
        }
    }

    /// Create an exclude mapping
    pub fn exclude(pattern: impl Into<String>) -> Self {
        Self {
            pattern: pattern.into(),
            kind: MappingKind::Exclude,
        }
    }
}

/// A named node of the architecture tree
///
/// Components are created through the
/// [`ArchitectureBuilder`](crate::ArchitectureBuilder) and are immutable
/// afterwards. Parent and children are stored as handles into the owning
/// architecture.
#[derive(Debug, Clone, PartialEq)]
pub struct Component {
    pub(crate) id: ComponentId,
    pub(crate) name: String,
    pub(crate) description: String,
    pub(crate) stereotype: Stereotype,
    pub(crate) parent: Option<ComponentId>,
    pub(crate) children: Vec<ComponentId>,
    pub(crate) code_mappings: Vec<CodeMapping>,
}

impl Component {
    /// Handle of this component
    pub fn id(&self) -> ComponentId {
        self.id
    }

    /// Unique name of this component
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Human-readable description (may be empty)
    pub fn description(&self) -> &str {
        &self.description
    }

    /// Stereotype of this component
    pub fn stereotype(&self) -> Stereotype {
        self.stereotype
    }

    /// Parent component, `None` for top-level components
    pub fn parent(&self) -> Option<ComponentId> {
        self.parent
    }

    /// Direct children in declaration order
    pub fn children(&self) -> &[ComponentId] {
        &self.children
    }

    /// Include and exclude patterns in declaration order
    pub fn code_mappings(&self) -> &[CodeMapping] {
        &self.code_mappings
    }

    /// Whether this component has no parent
    pub fn is_toplevel(&self) -> bool {
        self.parent.is_none()
    }

    /// Iterate over patterns of the given kind
    pub fn patterns(&self, kind: MappingKind) -> impl Iterator<Item = &str> {
        self.code_mappings
            .iter()
            .filter(move |mapping| mapping.kind == kind)
            .map(|mapping| mapping.pattern.as_str())
    }
}

impl fmt::Display for Component {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stereotype_parse() {
        assert_eq!(Stereotype::parse("PUBLIC"), Some(Stereotype::Public));
        assert_eq!(
            Stereotype::parse("component_public"),
            Some(Stereotype::ComponentPublic)
        );
        assert_eq!(Stereotype::parse("private"), Some(Stereotype::Private));
        assert_eq!(Stereotype::parse("protected"), None);
    }

    #[test]
    fn test_stereotype_from_str_roundtrip() {
        for stereotype in [
            Stereotype::Private,
            Stereotype::ComponentPublic,
            Stereotype::Public,
        ] {
            let parsed: Stereotype = stereotype.as_str().parse().unwrap();
            assert_eq!(parsed, stereotype);
        }
        assert!("bogus".parse::<Stereotype>().is_err());
    }

    #[test]
    fn test_code_mapping_constructors() {
        let include = CodeMapping::include("ui\\..*");
        assert_eq!(include.kind, MappingKind::Include);
        assert_eq!(include.pattern, "ui\\..*");

        let exclude = CodeMapping::exclude(".*Test");
        assert_eq!(exclude.kind, MappingKind::Exclude);
    }

    #[test]
    fn test_patterns_filter_by_kind() {
        let component = Component {
            id: ComponentId::from_index(0),
            name: "UI".to_string(),
            description: String::new(),
            stereotype: Stereotype::Private,
            parent: None,
            children: Vec::new(),
            code_mappings: vec![
                CodeMapping::include("ui\\..*"),
                CodeMapping::exclude("ui\\.internal\\..*"),
                CodeMapping::include("widgets\\..*"),
            ],
        };

        let includes: Vec<&str> = component.patterns(MappingKind::Include).collect();
        assert_eq!(includes, vec!["ui\\..*", "widgets\\..*"]);
        let excludes: Vec<&str> = component.patterns(MappingKind::Exclude).collect();
        assert_eq!(excludes, vec!["ui\\.internal\\..*"]);
        assert!(component.is_toplevel());
        assert_eq!(component.to_string(), "UI");
    }
}
