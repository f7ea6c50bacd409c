//! Type-to-component mapping logic

use crate::{MapperError, PatternCache};
use archguard_domain::{Architecture, ComponentId, MappingKind, ProgressMonitor};
use regex::Regex;
use std::cmp::Reverse;
use std::collections::{BTreeMap, BTreeSet};

/// Result of mapping a type corpus onto the components of an architecture
///
/// Every type is either mapped (it has at least one matching component) or an
/// orphan. Matches are sorted by component name; the first one is the
/// component the type is assigned to.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TypeMapping {
    matches: BTreeMap<String, Vec<ComponentId>>,
    orphans: Vec<String>,
    mapped_types: BTreeMap<ComponentId, BTreeSet<String>>,
    type_count: usize,
}

impl TypeMapping {
    /// The component a type is assigned to, `None` for orphans and unknown types
    pub fn mapped_component(&self, type_name: &str) -> Option<ComponentId> {
        self.matches
            .get(type_name)
            .and_then(|components| components.first().copied())
    }

    /// All components matching a type, sorted by name
    pub fn matches(&self, type_name: &str) -> &[ComponentId] {
        self.matches
            .get(type_name)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    /// Types matching no component, in processing order
    pub fn orphans(&self) -> &[String] {
        &self.orphans
    }

    /// Whether the type was processed and matched no component
    pub fn is_orphan(&self, type_name: &str) -> bool {
        self.orphans.iter().any(|orphan| orphan == type_name)
    }

    /// Types matching more than one component, with all their matches
    pub fn ambiguous_types(&self) -> BTreeMap<&str, &[ComponentId]> {
        self.matches
            .iter()
            .filter(|(_, components)| components.len() > 1)
            .map(|(type_name, components)| (type_name.as_str(), components.as_slice()))
            .collect()
    }

    /// Types assigned to the component (empty for unknown components)
    pub fn mapped_types(&self, component: ComponentId) -> impl Iterator<Item = &str> {
        self.mapped_types
            .get(&component)
            .into_iter()
            .flat_map(|types| types.iter().map(String::as_str))
    }

    /// Number of types assigned to the component
    pub fn mapped_type_count(&self, component: ComponentId) -> usize {
        self.mapped_types.get(&component).map_or(0, BTreeSet::len)
    }

    /// Number of processed types, orphans included
    pub fn type_count(&self) -> usize {
        self.type_count
    }
}

/// Maps types onto the components of one architecture
///
/// The mapper owns the compiled-pattern cache, so mapping the same
/// architecture repeatedly compiles every pattern only once. A mapper does not
/// notice changes to the architecture; create a new one when it changes.
///
/// # Examples
///
/// ```
/// use archguard_domain::{ArchitectureBuilder, CodeMapping, Stereotype};
/// use archguard_mapper::TypeToComponentMapper;
///
/// let mut builder = ArchitectureBuilder::new();
/// builder.add_component("UI", Stereotype::Private, None).unwrap();
/// builder.add_mapping("UI", CodeMapping::include("ui\\..*")).unwrap();
/// let architecture = builder.build();
///
/// let mut mapper = TypeToComponentMapper::new(&architecture);
/// let mapping = mapper.map(["ui.Button", "db.Table"], None).unwrap();
///
/// assert_eq!(mapping.mapped_component("ui.Button"), architecture.id_of("UI"));
/// assert_eq!(mapping.orphans(), ["db.Table".to_string()]);
/// ```
pub struct TypeToComponentMapper<'a> {
    architecture: &'a Architecture,
    patterns: PatternCache,
    deepest_first: Vec<ComponentId>,
}

impl<'a> TypeToComponentMapper<'a> {
    /// Create a mapper for the given architecture
    pub fn new(architecture: &'a Architecture) -> Self {
        // Deepest components first: a type is most likely to belong to a
        // leaf, and the first match is the most specific one. The sort is
        // stable, so ties keep declaration order.
        let mut deepest_first: Vec<ComponentId> =
            architecture.components().iter().map(|c| c.id()).collect();
        deepest_first.sort_by_key(|id| Reverse(architecture.depth(*id)));

        Self {
            architecture,
            patterns: PatternCache::new(),
            deepest_first,
        }
    }

    /// The architecture this mapper works on
    pub fn architecture(&self) -> &'a Architecture {
        self.architecture
    }

    /// Compile every pattern of the architecture
    ///
    /// Called by [`map`](Self::map) before the first type is looked at, so an
    /// invalid pattern aborts the run without a partial mapping.
    pub fn prepare(&mut self) -> Result<(), MapperError> {
        self.compile_all().map(|_| ())
    }

    /// Map every given type to its matching components
    ///
    /// Repeated names are mapped once, at their first occurrence. If a monitor
    /// is given it receives one notification per distinct type.
    pub fn map<I, S>(
        &mut self,
        types: I,
        mut progress: Option<&mut dyn ProgressMonitor>,
    ) -> Result<TypeMapping, MapperError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let compiled = self.compile_all()?;

        let mut seen = BTreeSet::new();
        let types: Vec<S> = types
            .into_iter()
            .filter(|type_name| {
                let name: &str = type_name.as_ref();
                seen.insert(name.to_string())
            })
            .collect();
        let total = types.len();
        let mut mapping = TypeMapping {
            type_count: total,
            ..TypeMapping::default()
        };

        for (processed, type_name) in types.iter().enumerate() {
            let type_name = type_name.as_ref();
            let matching = self.matching_components(type_name, &compiled);
            tracing::trace!(
                type_name,
                components = ?self.component_names(&matching),
                "Mapped type to components"
            );

            match matching.first() {
                None => mapping.orphans.push(type_name.to_string()),
                Some(primary) => {
                    mapping
                        .mapped_types
                        .entry(*primary)
                        .or_default()
                        .insert(type_name.to_string());
                    mapping.matches.insert(type_name.to_string(), matching);
                }
            }

            if let Some(monitor) = progress.as_deref_mut() {
                monitor.report_progress(processed + 1, total);
            }
        }

        Ok(mapping)
    }

    /// Compiled include/exclude patterns per component, indexed like the arena
    fn compile_all(&mut self) -> Result<Vec<CompiledMappings>, MapperError> {
        let architecture = self.architecture;
        let mut compiled = Vec::with_capacity(architecture.len());
        for component in architecture.components() {
            let mut mappings = CompiledMappings::default();
            for mapping in component.code_mappings() {
                let regex = self
                    .patterns
                    .compile(&mapping.pattern)
                    .map_err(|e| MapperError::InvalidPattern {
                        component: component.name().to_string(),
                        pattern: mapping.pattern.clone(),
                        message: e.to_string(),
                    })?
                    .clone();
                match mapping.kind {
                    MappingKind::Include => mappings.includes.push(regex),
                    MappingKind::Exclude => mappings.excludes.push(regex),
                }
            }
            compiled.push(mappings);
        }
        Ok(compiled)
    }

    fn component_names(&self, components: &[ComponentId]) -> Vec<&'a str> {
        let architecture = self.architecture;
        components.iter().map(|c| architecture.name(*c)).collect()
    }

    /// Components matching the type, sorted by name
    ///
    /// Once a component matches, its ancestors are not evaluated for this
    /// type: nested components are expected to narrow their parent's patterns.
    fn matching_components(&self, type_name: &str, compiled: &[CompiledMappings]) -> Vec<ComponentId> {
        let architecture = self.architecture;
        let mut checked = vec![false; architecture.len()];
        let mut matching = Vec::new();

        for id in &self.deepest_first {
            if checked[id.index()] {
                continue;
            }
            if compiled[id.index()].matches(type_name) {
                matching.push(*id);
                for ancestor in architecture.ancestors(*id) {
                    checked[ancestor.index()] = true;
                }
            } else {
                checked[id.index()] = true;
            }
        }

        matching.sort_by(|a, b| architecture.name(*a).cmp(architecture.name(*b)));
        matching
    }
}

/// The code mappings of one component in compiled form
#[derive(Debug, Default)]
struct CompiledMappings {
    includes: Vec<Regex>,
    excludes: Vec<Regex>,
}

impl CompiledMappings {
    /// Whether a type matches an include and no exclude pattern
    ///
    /// Excludes are only evaluated for included types.
    fn matches(&self, type_name: &str) -> bool {
        self.includes.iter().any(|regex| regex.is_match(type_name))
            && !self.excludes.iter().any(|regex| regex.is_match(type_name))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use archguard_domain::{ArchitectureBuilder, CodeMapping, Stereotype};
    use std::io;
    use std::sync::{Arc, Mutex};

    fn create_layered_architecture() -> Architecture {
        let mut builder = ArchitectureBuilder::new();
        builder.add_component("App", Stereotype::Private, None).unwrap();
        builder.add_component("Ui", Stereotype::Private, Some("App")).unwrap();
        builder.add_component("Core", Stereotype::Public, Some("App")).unwrap();
        builder.add_mapping("App", CodeMapping::include("app\\..*")).unwrap();
        builder.add_mapping("Ui", CodeMapping::include("app\\.ui\\..*")).unwrap();
        builder.add_mapping("Ui", CodeMapping::exclude(".*Test")).unwrap();
        builder.add_mapping("Core", CodeMapping::include("app\\.core\\..*")).unwrap();
        builder.build()
    }

    #[test]
    fn test_deepest_component_wins() {
        let arch = create_layered_architecture();
        let mut mapper = TypeToComponentMapper::new(&arch);
        let mapping = mapper.map(["app.ui.Button"], None).unwrap();

        assert_eq!(mapping.mapped_component("app.ui.Button"), arch.id_of("Ui"));
        // The parent matches too, but is pruned once the child matched.
        assert_eq!(mapping.matches("app.ui.Button").len(), 1);
    }

    #[test]
    fn test_exclude_falls_back_to_parent() {
        let arch = create_layered_architecture();
        let mut mapper = TypeToComponentMapper::new(&arch);
        let mapping = mapper.map(["app.ui.ButtonTest"], None).unwrap();

        assert_eq!(mapping.mapped_component("app.ui.ButtonTest"), arch.id_of("App"));
    }

    #[test]
    fn test_orphans() {
        let arch = create_layered_architecture();
        let mut mapper = TypeToComponentMapper::new(&arch);
        let mapping = mapper.map(["lib.Util", "app.core.Model"], None).unwrap();

        assert_eq!(mapping.orphans(), ["lib.Util".to_string()]);
        assert!(mapping.is_orphan("lib.Util"));
        assert!(!mapping.is_orphan("app.core.Model"));
        assert_eq!(mapping.mapped_component("lib.Util"), None);
        assert!(mapping.matches("lib.Util").is_empty());
        assert_eq!(mapping.type_count(), 2);
    }

    #[test]
    fn test_mapped_types_per_component() {
        let arch = create_layered_architecture();
        let mut mapper = TypeToComponentMapper::new(&arch);
        let mapping = mapper
            .map(["app.core.B", "app.core.A", "app.ui.View"], None)
            .unwrap();

        let core = arch.id_of("Core").unwrap();
        let core_types: Vec<&str> = mapping.mapped_types(core).collect();
        assert_eq!(core_types, vec!["app.core.A", "app.core.B"]);
        assert_eq!(mapping.mapped_type_count(core), 2);
        assert_eq!(mapping.mapped_type_count(arch.id_of("App").unwrap()), 0);
    }

    #[test]
    fn test_component_without_includes_matches_nothing() {
        let mut builder = ArchitectureBuilder::new();
        builder.add_component("Empty", Stereotype::Private, None).unwrap();
        builder.add_mapping("Empty", CodeMapping::exclude(".*")).unwrap();
        let arch = builder.build();

        let mut mapper = TypeToComponentMapper::new(&arch);
        let mapping = mapper.map(["anything"], None).unwrap();
        assert_eq!(mapping.orphans().len(), 1);
    }

    #[test]
    fn test_invalid_pattern_is_reported() {
        let mut builder = ArchitectureBuilder::new();
        builder.add_component("Broken", Stereotype::Private, None).unwrap();
        builder.add_mapping("Broken", CodeMapping::include("broken\\.(")).unwrap();
        let arch = builder.build();

        let mut mapper = TypeToComponentMapper::new(&arch);
        match mapper.map(["broken.X"], None) {
            Err(MapperError::InvalidPattern { component, pattern, .. }) => {
                assert_eq!(component, "Broken");
                assert_eq!(pattern, "broken\\.(");
            }
            other => panic!("Expected InvalidPattern, got {:?}", other),
        }
    }

    #[test]
    fn test_progress_ticks_once_per_type() {
        let arch = create_layered_architecture();
        let mut mapper = TypeToComponentMapper::new(&arch);
        let mut ticks = Vec::new();
        let mut monitor = |done: usize, total: usize| ticks.push((done, total));

        mapper
            .map(["app.ui.A", "x.Y", "app.core.B"], Some(&mut monitor))
            .unwrap();

        assert_eq!(ticks, vec![(1, 3), (2, 3), (3, 3)]);
    }

    #[test]
    fn test_repeated_type_is_mapped_once() {
        let arch = create_layered_architecture();
        let mut mapper = TypeToComponentMapper::new(&arch);
        let mut ticks = Vec::new();
        let mut monitor = |done: usize, total: usize| ticks.push((done, total));

        let mapping = mapper
            .map(["z", "app.ui.A", "z", "app.ui.A"], Some(&mut monitor))
            .unwrap();

        assert_eq!(mapping.type_count(), 2);
        assert_eq!(mapping.orphans(), ["z".to_string()]);
        assert_eq!(mapping.mapped_type_count(arch.id_of("Ui").unwrap()), 1);
        assert_eq!(ticks, vec![(1, 2), (2, 2)]);
    }

    #[derive(Clone, Default)]
    struct LogBuffer(Arc<Mutex<Vec<u8>>>);

    impl io::Write for LogBuffer {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn test_trace_lists_matching_component_names() {
        let mut builder = ArchitectureBuilder::new();
        builder.add_component("Beta", Stereotype::Private, None).unwrap();
        builder.add_component("Alpha", Stereotype::Private, None).unwrap();
        builder.add_mapping("Alpha", CodeMapping::include("x\\..*")).unwrap();
        builder.add_mapping("Beta", CodeMapping::include("x\\.Y")).unwrap();
        let arch = builder.build();

        let buffer = LogBuffer::default();
        let writer = buffer.clone();
        let subscriber = tracing_subscriber::fmt()
            .with_writer(move || writer.clone())
            .with_max_level(tracing::Level::TRACE)
            .with_ansi(false)
            .finish();
        tracing::subscriber::with_default(subscriber, || {
            TypeToComponentMapper::new(&arch).map(["x.Y"], None).unwrap();
        });

        let logs = String::from_utf8(buffer.0.lock().unwrap().clone()).unwrap();
        let line = logs
            .lines()
            .find(|line| line.contains("Mapped type to components"))
            .unwrap();
        assert!(line.contains(r#"components=["Alpha", "Beta"]"#), "{}", line);
    }
}
