//! Component-level dependencies and their assessment

use archguard_domain::{Architecture, Assessment, ComponentId, PolicyKind, TypeDependency};
use std::cell::OnceCell;
use std::collections::BTreeSet;

/// A dependency between two components
///
/// Created either from a declared policy or from type dependencies observed in
/// the implementation. Carries the type-level evidence found between the two
/// components and, for tolerate policies, the tolerated type dependencies.
#[derive(Debug, Clone)]
pub struct Dependency {
    source: ComponentId,
    target: ComponentId,
    kind: PolicyKind,
    evidence: BTreeSet<TypeDependency>,
    tolerated: BTreeSet<TypeDependency>,
    assessment: OnceCell<Assessment>,
}

impl Dependency {
    pub(crate) fn new(source: ComponentId, target: ComponentId, kind: PolicyKind) -> Self {
        Self {
            source,
            target,
            kind,
            evidence: BTreeSet::new(),
            tolerated: BTreeSet::new(),
            assessment: OnceCell::new(),
        }
    }

    /// Source component
    pub fn source(&self) -> ComponentId {
        self.source
    }

    /// Target component
    pub fn target(&self) -> ComponentId {
        self.target
    }

    /// Declared or inferred kind
    pub fn kind(&self) -> PolicyKind {
        self.kind
    }

    /// Type dependencies found between the two components, sorted
    pub fn evidence(&self) -> &BTreeSet<TypeDependency> {
        &self.evidence
    }

    /// Type dependencies tolerated by the underlying policy, sorted
    pub fn tolerated(&self) -> &BTreeSet<TypeDependency> {
        &self.tolerated
    }

    /// Whether any type dependency backs this dependency
    pub fn has_evidence(&self) -> bool {
        !self.evidence.is_empty()
    }

    /// Verdict for this dependency, computed on first access
    pub fn assessment(&self) -> Assessment {
        *self
            .assessment
            .get_or_init(|| evaluate(self.kind, &self.evidence, &self.tolerated))
    }

    /// `source -> target` using the component names
    pub fn label(&self, architecture: &Architecture) -> String {
        format!(
            "{} -> {}",
            architecture.name(self.source),
            architecture.name(self.target)
        )
    }

    pub(crate) fn add_evidence(&mut self, evidence: impl IntoIterator<Item = TypeDependency>) {
        self.evidence.extend(evidence);
        self.assessment.take();
    }

    /// # Panics
    /// Panics unless the dependency is a tolerate dependency.
    pub(crate) fn add_tolerated(&mut self, tolerated: impl IntoIterator<Item = TypeDependency>) {
        assert!(
            self.kind == PolicyKind::TolerateExplicit,
            "Type dependencies can be tolerated only if the dependency's kind is {}, got {}",
            PolicyKind::TolerateExplicit,
            self.kind
        );
        self.tolerated.extend(tolerated);
        self.assessment.take();
    }
}

impl PartialEq for Dependency {
    // The cached verdict follows from the other fields.
    fn eq(&self, other: &Self) -> bool {
        self.source == other.source
            && self.target == other.target
            && self.kind == other.kind
            && self.evidence == other.evidence
            && self.tolerated == other.tolerated
    }
}

impl Eq for Dependency {}

/// The assessment table
///
/// | Kind | no evidence | evidence |
/// |---|---|---|
/// | allow (explicit or implicit) | unnecessary | valid |
/// | deny (explicit or implicit) | valid | invalid |
/// | tolerate | unnecessary | valid iff all evidence is tolerated |
pub fn evaluate(
    kind: PolicyKind,
    evidence: &BTreeSet<TypeDependency>,
    tolerated: &BTreeSet<TypeDependency>,
) -> Assessment {
    let empty = evidence.is_empty();
    match kind {
        PolicyKind::AllowExplicit | PolicyKind::AllowImplicit => {
            if empty {
                Assessment::Unnecessary
            } else {
                Assessment::Valid
            }
        }
        PolicyKind::DenyExplicit | PolicyKind::DenyImplicit => {
            if empty {
                Assessment::Valid
            } else {
                Assessment::Invalid
            }
        }
        PolicyKind::TolerateExplicit => {
            if empty {
                Assessment::Unnecessary
            } else if evidence.is_subset(tolerated) {
                Assessment::Valid
            } else {
                Assessment::Invalid
            }
        }
    }
}
