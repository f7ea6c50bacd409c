//! Result of an architecture assessment

use crate::assessor::DependencyIndex;
use crate::dependency::Dependency;
use crate::report::{AssessmentReport, ComponentReport, DependencyReport};
use crate::summary::AssessmentSummary;
use crate::violation::Violation;
use crate::AssessorConfig;
use archguard_domain::{Architecture, Assessment, ComponentId};
use archguard_mapper::TypeMapping;
use std::collections::BTreeMap;

/// An assessed architecture
///
/// Holds the computed dependencies together with the type mapping they were
/// derived from. Orphans, ambiguous types and invalid dependencies are all
/// regular query results.
#[derive(Debug, Clone)]
pub struct ArchitectureAssessment<'a> {
    architecture: &'a Architecture,
    mapping: TypeMapping,
    dependencies: Vec<Dependency>,
    index: DependencyIndex,
}

impl<'a> ArchitectureAssessment<'a> {
    pub(crate) fn new(
        architecture: &'a Architecture,
        mapping: TypeMapping,
        dependencies: Vec<Dependency>,
        index: DependencyIndex,
    ) -> Self {
        Self {
            architecture,
            mapping,
            dependencies,
            index,
        }
    }

    /// The assessed architecture
    pub fn architecture(&self) -> &'a Architecture {
        self.architecture
    }

    /// All dependencies: declared ones in policy order, then inferred ones
    pub fn dependencies(&self) -> &[Dependency] {
        &self.dependencies
    }

    /// Dependencies with the given verdict
    pub fn dependencies_with(&self, assessment: Assessment) -> impl Iterator<Item = &Dependency> {
        self.dependencies
            .iter()
            .filter(move |d| d.assessment() == assessment)
    }

    /// The dependency from `source` to `target`, if one was computed
    pub fn dependency(&self, source: ComponentId, target: ComponentId) -> Option<&Dependency> {
        self.index
            .get(&(source, target))
            .map(|i| &self.dependencies[*i])
    }

    /// Like [`dependency`](Self::dependency), with component names
    pub fn dependency_by_name(&self, source: &str, target: &str) -> Option<&Dependency> {
        let source = self.architecture.id_of(source)?;
        let target = self.architecture.id_of(target)?;
        self.dependency(source, target)
    }

    /// The underlying type mapping
    pub fn mapping(&self) -> &TypeMapping {
        &self.mapping
    }

    /// Types matching no component
    pub fn orphans(&self) -> &[String] {
        self.mapping.orphans()
    }

    /// Types matching several components, with the component names sorted
    pub fn ambiguous_types(&self) -> BTreeMap<&str, Vec<&str>> {
        self.mapping
            .ambiguous_types()
            .into_iter()
            .map(|(type_name, components)| {
                let names = components
                    .iter()
                    .map(|c| self.architecture.name(*c))
                    .collect();
                (type_name, names)
            })
            .collect()
    }

    /// The component a type is assigned to
    pub fn mapped_component(&self, type_name: &str) -> Option<ComponentId> {
        self.mapping.mapped_component(type_name)
    }

    /// Types assigned to the component, sorted
    pub fn mapped_types(&self, component: ComponentId) -> impl Iterator<Item = &str> {
        self.mapping.mapped_types(component)
    }

    /// Number of assessed types, orphans included
    pub fn type_count(&self) -> usize {
        self.mapping.type_count()
    }

    /// Counts per verdict and per kind
    pub fn summary(&self) -> AssessmentSummary {
        let mut summary = AssessmentSummary::new();
        summary.types = self.type_count();
        summary.orphans = self.orphans().len();
        summary.ambiguous = self.mapping.ambiguous_types().len();
        for dependency in &self.dependencies {
            summary.record(dependency.kind(), dependency.assessment());
        }
        summary
    }

    /// One violation per type dependency backing an invalid dependency
    ///
    /// Ordered by source and target component name, then by evidence.
    pub fn violations(&self, config: &AssessorConfig) -> Vec<Violation> {
        self.sorted_dependencies()
            .into_iter()
            .filter(|d| d.assessment() == Assessment::Invalid)
            .flat_map(|dependency| {
                let group = config
                    .violation_group
                    .clone()
                    .unwrap_or_else(|| Violation::default_group(&dependency.label(self.architecture)));
                dependency
                    .evidence()
                    .iter()
                    .map(move |evidence| Violation::new(group.clone(), evidence.clone()))
            })
            .collect()
    }

    /// A serializable snapshot of the whole result
    pub fn report(&self) -> AssessmentReport {
        let mut components: Vec<ComponentReport> = self
            .architecture
            .toplevel_components()
            .map(|c| self.component_report(c.id()))
            .collect();
        components.sort_by(|a, b| a.name.cmp(&b.name));

        let mut orphans = self.orphans().to_vec();
        orphans.sort();

        let dependencies = self
            .sorted_dependencies()
            .into_iter()
            .map(|d| DependencyReport::new(d, self.architecture))
            .collect();

        AssessmentReport {
            components,
            orphans,
            dependencies,
        }
    }

    fn component_report(&self, id: ComponentId) -> ComponentReport {
        let component = self.architecture.component(id);
        let mut children: Vec<ComponentReport> = component
            .children()
            .iter()
            .map(|child| self.component_report(*child))
            .collect();
        children.sort_by(|a, b| a.name.cmp(&b.name));

        ComponentReport {
            name: component.name().to_string(),
            stereotype: component.stereotype().as_str().to_string(),
            description: component.description().to_string(),
            types: self.mapped_types(id).map(str::to_string).collect(),
            children,
        }
    }

    fn sorted_dependencies(&self) -> Vec<&Dependency> {
        let mut sorted: Vec<&Dependency> = self.dependencies.iter().collect();
        sorted.sort_by(|a, b| {
            let names = |d: &Dependency| {
                (
                    self.architecture.name(d.source()),
                    self.architecture.name(d.target()),
                )
            };
            names(a).cmp(&names(b))
        });
        sorted
    }
}
