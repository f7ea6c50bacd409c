//! Core assessment logic
//!
//! An assessment runs in four steps:
//! 1. Every declared policy becomes a dependency with the declared kind.
//! 2. Type dependencies are lifted to component pairs. Pairs in a containment
//!    relation or covered by an explicit ancestor dependency are dropped, the
//!    rest become dependencies with an inferred kind.
//! 3. Every dependency collects the type dependencies backing it, including
//!    those of sub-components that have no dependency of their own.
//! 4. Verdicts are computed lazily from kind and evidence.

use crate::classify::classify;
use crate::dependency::Dependency;
use crate::progress::ProgressTracker;
use crate::{ArchitectureAssessment, AssessorConfig, AssessorError, LogLevel};
use archguard_domain::{
    Architecture, ComponentId, PolicyKind, ProgressMonitor, TypeDependency, TypeDependencyMap,
};
use archguard_mapper::{TypeMapping, TypeToComponentMapper};
use std::collections::{BTreeSet, HashMap};

/// Index of dependencies by `(source, target)`
pub(crate) type DependencyIndex = HashMap<(ComponentId, ComponentId), usize>;

/// Assesses a type dependency graph against an architecture
///
/// The assessor keeps its mapper between runs, so repeated assessments of the
/// same architecture compile every pattern once.
///
/// # Examples
///
/// ```
/// use archguard_assessor::ArchitectureAssessor;
/// use archguard_domain::{
///     ArchitectureBuilder, Assessment, CodeMapping, PolicyKind, Stereotype, TypeDependencyMap,
/// };
///
/// let mut builder = ArchitectureBuilder::new();
/// builder.add_component("Core", Stereotype::Public, None).unwrap();
/// builder.add_component("UI", Stereotype::Private, None).unwrap();
/// builder.add_mapping("Core", CodeMapping::include("core\\..*")).unwrap();
/// builder.add_mapping("UI", CodeMapping::include("ui\\..*")).unwrap();
/// builder.add_policy("UI", "Core", PolicyKind::AllowExplicit).unwrap();
/// let architecture = builder.build();
///
/// let mut types = TypeDependencyMap::new();
/// types.entry("ui.Button".to_string()).or_default().insert("core.Model".to_string());
/// types.entry("core.Model".to_string()).or_default();
///
/// let mut assessor = ArchitectureAssessor::new(&architecture, &types);
/// let assessment = assessor.assess().unwrap();
///
/// let dependency = assessment.dependency_by_name("UI", "Core").unwrap();
/// assert_eq!(dependency.assessment(), Assessment::Valid);
/// ```
pub struct ArchitectureAssessor<'a> {
    architecture: &'a Architecture,
    types: &'a TypeDependencyMap,
    mapper: TypeToComponentMapper<'a>,
    config: AssessorConfig,
}

impl<'a> ArchitectureAssessor<'a> {
    /// Create an assessor with the default configuration
    pub fn new(architecture: &'a Architecture, types: &'a TypeDependencyMap) -> Self {
        Self::with_config(architecture, types, AssessorConfig::default())
    }

    /// Create an assessor with a custom configuration
    pub fn with_config(
        architecture: &'a Architecture,
        types: &'a TypeDependencyMap,
        config: AssessorConfig,
    ) -> Self {
        Self {
            architecture,
            types,
            mapper: TypeToComponentMapper::new(architecture),
            config,
        }
    }

    /// Replace the type dependencies used by the next assessment
    pub fn set_types(&mut self, types: &'a TypeDependencyMap) {
        self.types = types;
    }

    /// The configuration in use
    pub fn config(&self) -> &AssessorConfig {
        &self.config
    }

    /// Number of progress steps of one assessment
    ///
    /// One step per type for mapping, one per type for lifting type
    /// dependencies to components and one per declared policy.
    pub fn total_work(&self) -> usize {
        2 * self.types.len() + self.architecture.all_policies().len()
    }

    /// Run an assessment
    pub fn assess(&mut self) -> Result<ArchitectureAssessment<'a>, AssessorError> {
        self.run(None)
    }

    /// Run an assessment and report progress to the monitor
    ///
    /// The monitor sees [`total_work`](Self::total_work) as the total.
    pub fn assess_with_progress(
        &mut self,
        monitor: &mut dyn ProgressMonitor,
    ) -> Result<ArchitectureAssessment<'a>, AssessorError> {
        self.run(Some(monitor))
    }

    fn run(
        &mut self,
        monitor: Option<&mut dyn ProgressMonitor>,
    ) -> Result<ArchitectureAssessment<'a>, AssessorError> {
        let architecture = self.architecture;
        let types = self.types;
        let mut tracker = ProgressTracker::new(self.total_work(), monitor);

        tracing::debug!(
            components = architecture.len(),
            policies = architecture.all_policies().len(),
            types = types.len(),
            "Starting architecture assessment"
        );

        let mapping = {
            let mut tick = |_: usize, _: usize| tracker.step();
            self.mapper.map(types.keys(), Some(&mut tick))?
        };
        self.log_mapping(&mapping);

        let mut dependencies = Vec::new();
        let mut index = DependencyIndex::new();
        add_declared_dependencies(architecture, &mut dependencies, &mut index, &mut tracker);

        let adjacency = component_adjacency(&mapping, types, &mut tracker);
        add_observed_dependencies(architecture, &adjacency, &mut dependencies, &mut index);

        let collector = EvidenceCollector {
            architecture,
            mapping: &mapping,
            types,
            recorded: &index,
        };
        for dependency in &mut dependencies {
            let evidence = collector.collect(dependency.source(), dependency.target());
            dependency.add_evidence(evidence);
        }

        tracing::debug!(
            steps = tracker.done(),
            dependencies = dependencies.len(),
            "Finished architecture assessment"
        );
        self.log_dependencies(architecture, &dependencies);

        if dependencies.is_empty() && self.config.fail_on_empty {
            tracing::error!("No dependencies found");
            return Err(AssessorError::NoDependencies);
        }

        Ok(ArchitectureAssessment::new(
            architecture,
            mapping,
            dependencies,
            index,
        ))
    }

    fn log_mapping(&self, mapping: &TypeMapping) {
        let orphans = mapping.orphans();
        if !orphans.is_empty() {
            let count = orphans.len();
            let names = orphans.join(", ");
            match self.config.orphan_log_level {
                LogLevel::Off => {}
                LogLevel::Trace => tracing::trace!(count, orphans = %names, "Types not matching any component"),
                LogLevel::Debug => tracing::debug!(count, orphans = %names, "Types not matching any component"),
                LogLevel::Info => tracing::info!(count, orphans = %names, "Types not matching any component"),
                LogLevel::Warn => tracing::warn!(count, orphans = %names, "Types not matching any component"),
                LogLevel::Error => tracing::error!(count, orphans = %names, "Types not matching any component"),
            }
        }

        for (type_name, components) in mapping.ambiguous_types() {
            let names: Vec<&str> = components
                .iter()
                .map(|c| self.architecture.name(*c))
                .collect();
            tracing::warn!(
                "Type '{}' can be mapped to more than one component ({})",
                type_name,
                names.join(", ")
            );
        }
    }

    fn log_dependencies(&self, architecture: &Architecture, dependencies: &[Dependency]) {
        if !self.config.log_dependencies {
            return;
        }
        tracing::info!(count = dependencies.len(), "Computed component dependencies");
        for dependency in dependencies {
            tracing::debug!(
                dependency = %dependency.label(architecture),
                kind = %dependency.kind(),
                assessment = %dependency.assessment(),
                evidence = dependency.evidence().len(),
                "Component dependency"
            );
        }
    }
}

/// Assess with the default configuration and no progress reporting
pub fn assess<'a>(
    architecture: &'a Architecture,
    types: &'a TypeDependencyMap,
) -> Result<ArchitectureAssessment<'a>, AssessorError> {
    ArchitectureAssessor::new(architecture, types).assess()
}

fn record(dependencies: &mut Vec<Dependency>, index: &mut DependencyIndex, dependency: Dependency) {
    index.insert((dependency.source(), dependency.target()), dependencies.len());
    dependencies.push(dependency);
}

/// One dependency per declared policy, in declaration order
fn add_declared_dependencies(
    architecture: &Architecture,
    dependencies: &mut Vec<Dependency>,
    index: &mut DependencyIndex,
    tracker: &mut ProgressTracker<'_>,
) {
    for policy in architecture.all_policies() {
        let mut dependency = Dependency::new(policy.source(), policy.target(), policy.kind());
        if policy.kind() == PolicyKind::TolerateExplicit {
            dependency.add_tolerated(policy.tolerated().iter().cloned());
        }
        record(dependencies, index, dependency);
        tracker.step();
    }
}

/// Component pairs connected by at least one type dependency
///
/// Only types that are keys of the map are mapped, so a dependency on a type
/// outside the corpus has no component and is ignored.
fn component_adjacency(
    mapping: &TypeMapping,
    types: &TypeDependencyMap,
    tracker: &mut ProgressTracker<'_>,
) -> BTreeSet<(ComponentId, ComponentId)> {
    let mut adjacency = BTreeSet::new();
    for (from, targets) in types {
        if let Some(source) = mapping.mapped_component(from) {
            for to in targets {
                if let Some(target) = mapping.mapped_component(to) {
                    adjacency.insert((source, target));
                }
            }
        }
        tracker.step();
    }
    adjacency
}

fn add_observed_dependencies(
    architecture: &Architecture,
    adjacency: &BTreeSet<(ComponentId, ComponentId)>,
    dependencies: &mut Vec<Dependency>,
    index: &mut DependencyIndex,
) {
    for &(source, target) in adjacency {
        if architecture.is_descendant(source, target) || architecture.is_descendant(target, source) {
            continue;
        }
        if is_subsumed(architecture, dependencies, index, source, target) {
            continue;
        }
        let kind = classify(architecture, source, target);
        tracing::trace!(
            source = architecture.name(source),
            target = architecture.name(target),
            %kind,
            "Inferred component dependency"
        );
        record(dependencies, index, Dependency::new(source, target, kind));
    }
}

/// Whether an explicit dependency exists between any ancestors of the pair
fn is_subsumed(
    architecture: &Architecture,
    dependencies: &[Dependency],
    index: &DependencyIndex,
    source: ComponentId,
    target: ComponentId,
) -> bool {
    architecture.ancestors(source).iter().any(|source_ancestor| {
        architecture.ancestors(target).iter().any(|target_ancestor| {
            index
                .get(&(*source_ancestor, *target_ancestor))
                .is_some_and(|i| dependencies[*i].kind().is_explicit())
        })
    })
}

/// Collects the type dependencies backing a component dependency
///
/// Evidence of sub-components is included unless the sub-component pair has a
/// dependency of its own, which then owns that evidence.
struct EvidenceCollector<'r> {
    architecture: &'r Architecture,
    mapping: &'r TypeMapping,
    types: &'r TypeDependencyMap,
    recorded: &'r DependencyIndex,
}

impl EvidenceCollector<'_> {
    fn collect(&self, source: ComponentId, target: ComponentId) -> BTreeSet<TypeDependency> {
        let mut evidence = BTreeSet::new();
        self.collect_into(source, target, &mut evidence);
        evidence
    }

    fn collect_into(
        &self,
        source: ComponentId,
        target: ComponentId,
        evidence: &mut BTreeSet<TypeDependency>,
    ) {
        for from in self.mapping.mapped_types(source) {
            let Some(targets) = self.types.get(from) else {
                continue;
            };
            for to in targets {
                if self.mapping.mapped_component(to) == Some(target) {
                    evidence.insert(TypeDependency::new(from, to.as_str()));
                }
            }
        }

        for child in self.architecture.component(source).children() {
            if !self.recorded.contains_key(&(*child, target)) {
                self.collect_into(*child, target, evidence);
            }
        }
        for child in self.architecture.component(target).children() {
            if !self.recorded.contains_key(&(source, *child)) {
                self.collect_into(source, *child, evidence);
            }
        }
    }
}
