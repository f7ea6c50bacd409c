//! Serializable snapshot of an assessment

use crate::dependency::Dependency;
use archguard_domain::{Architecture, TypeDependency};
use serde::Serialize;

/// Everything an assessment produced, sorted for stable output
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AssessmentReport {
    /// Top-level components sorted by name, each with its subtree
    pub components: Vec<ComponentReport>,
    /// Types matching no component, sorted
    pub orphans: Vec<String>,
    /// Dependencies sorted by source and target name
    pub dependencies: Vec<DependencyReport>,
}

/// A component with the types assigned to it
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ComponentReport {
    /// Component name
    pub name: String,
    /// Stereotype name
    pub stereotype: String,
    /// Free-text description
    #[serde(skip_serializing_if = "String::is_empty")]
    pub description: String,
    /// Types assigned to the component, sorted
    pub types: Vec<String>,
    /// Child components sorted by name
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<ComponentReport>,
}

/// A dependency with its verdict and evidence
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DependencyReport {
    /// Source component name
    pub source: String,
    /// Target component name
    pub target: String,
    /// Kind name
    pub kind: String,
    /// Verdict name
    pub assessment: String,
    /// Backing type dependencies, sorted
    pub evidence: Vec<EvidenceReport>,
    /// Tolerated type dependencies, sorted
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub tolerated: Vec<EvidenceReport>,
}

/// One type dependency
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EvidenceReport {
    /// Depending type
    pub from: String,
    /// Type depended upon
    pub to: String,
}

impl From<&TypeDependency> for EvidenceReport {
    fn from(dependency: &TypeDependency) -> Self {
        Self {
            from: dependency.source.clone(),
            to: dependency.target.clone(),
        }
    }
}

impl DependencyReport {
    pub(crate) fn new(dependency: &Dependency, architecture: &Architecture) -> Self {
        Self {
            source: architecture.name(dependency.source()).to_string(),
            target: architecture.name(dependency.target()).to_string(),
            kind: dependency.kind().as_str().to_string(),
            assessment: dependency.assessment().as_str().to_string(),
            evidence: dependency.evidence().iter().map(EvidenceReport::from).collect(),
            tolerated: dependency.tolerated().iter().map(EvidenceReport::from).collect(),
        }
    }
}
