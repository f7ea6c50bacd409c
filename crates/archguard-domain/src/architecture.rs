//! Architecture module - the component tree and its policies
//!
//! Components live in an arena owned by [`Architecture`]; parents and children
//! are stored as [`ComponentId`] handles. Ancestor paths are computed once when
//! the architecture is built, since every assessment queries them repeatedly.

use crate::error::ArchitectureError;
use crate::{CodeMapping, Component, ComponentId, Policy, PolicyKind, Stereotype, TypeDependency};
use std::collections::{BTreeSet, HashMap};

/// An immutable architecture: components plus directed policies
#[derive(Debug, Clone, Default)]
pub struct Architecture {
    components: Vec<Component>,
    by_name: HashMap<String, ComponentId>,
    policies: Vec<Policy>,
    policy_index: HashMap<(ComponentId, ComponentId), usize>,
    outgoing: Vec<Vec<usize>>,
    incoming: Vec<Vec<usize>>,
    ancestors: Vec<Vec<ComponentId>>,
}

impl Architecture {
    /// Start building a new architecture
    pub fn builder() -> ArchitectureBuilder {
        ArchitectureBuilder::new()
    }

    /// Number of components
    pub fn len(&self) -> usize {
        self.components.len()
    }

    /// Whether the architecture has no components
    pub fn is_empty(&self) -> bool {
        self.components.is_empty()
    }

    /// All components in declaration order
    pub fn components(&self) -> &[Component] {
        &self.components
    }

    /// Get a component by handle
    ///
    /// # Panics
    /// Panics if the handle was issued by a different architecture.
    pub fn component(&self, id: ComponentId) -> &Component {
        &self.components[id.index()]
    }

    /// Name of the component with the given handle
    pub fn name(&self, id: ComponentId) -> &str {
        self.component(id).name()
    }

    /// Look up a component by name
    pub fn find(&self, name: &str) -> Option<&Component> {
        self.by_name.get(name).map(|id| self.component(*id))
    }

    /// Look up a component handle by name
    pub fn id_of(&self, name: &str) -> Option<ComponentId> {
        self.by_name.get(name).copied()
    }

    /// All policies in declaration order
    pub fn all_policies(&self) -> &[Policy] {
        &self.policies
    }

    /// Components without a parent
    pub fn toplevel_components(&self) -> impl Iterator<Item = &Component> {
        self.components.iter().filter(|c| c.is_toplevel())
    }

    /// Whether the component has no parent
    pub fn is_toplevel(&self, id: ComponentId) -> bool {
        self.component(id).is_toplevel()
    }

    /// Path from the component up to its root, starting with the component
    pub fn ancestors(&self, id: ComponentId) -> &[ComponentId] {
        &self.ancestors[id.index()]
    }

    /// Number of components on the path to the root, including the component
    pub fn depth(&self, id: ComponentId) -> usize {
        self.ancestors(id).len()
    }

    /// The component and its whole subtree in pre-order
    pub fn descendants(&self, id: ComponentId) -> Vec<ComponentId> {
        let mut result = Vec::new();
        let mut stack = vec![id];
        while let Some(current) = stack.pop() {
            result.push(current);
            // Reverse so children come out in declaration order.
            stack.extend(self.component(current).children().iter().rev());
        }
        result
    }

    /// Whether `a` lies in the subtree of `b` (a component is its own descendant)
    pub fn is_descendant(&self, a: ComponentId, b: ComponentId) -> bool {
        self.ancestors(a).contains(&b)
    }

    /// The policy declared directly from `source` to `target`
    pub fn policy_to(&self, source: ComponentId, target: ComponentId) -> Option<&Policy> {
        self.policy_index
            .get(&(source, target))
            .map(|index| &self.policies[*index])
    }

    /// Whether a policy is declared directly from `source` to `target`
    pub fn has_policy_to(&self, source: ComponentId, target: ComponentId) -> bool {
        self.policy_index.contains_key(&(source, target))
    }

    /// Policies whose source is the component
    pub fn outgoing_policies(&self, id: ComponentId) -> impl Iterator<Item = &Policy> {
        self.outgoing[id.index()].iter().map(|i| &self.policies[*i])
    }

    /// Policies whose target is the component
    pub fn incoming_policies(&self, id: ComponentId) -> impl Iterator<Item = &Policy> {
        self.incoming[id.index()].iter().map(|i| &self.policies[*i])
    }

    /// Whether the component or one of its ancestors is public
    pub fn is_public(&self, id: ComponentId) -> bool {
        self.has_stereotype_ancestor(id, Stereotype::Public)
    }

    /// Whether the component or one of its ancestors is component-public
    pub fn is_component_public(&self, id: ComponentId) -> bool {
        self.has_stereotype_ancestor(id, Stereotype::ComponentPublic)
    }

    fn has_stereotype_ancestor(&self, id: ComponentId, stereotype: Stereotype) -> bool {
        self.ancestors(id)
            .iter()
            .any(|a| self.component(*a).stereotype() == stereotype)
    }
}

/// Assembles an [`Architecture`] and validates it on the way
///
/// Parents must be added before their children, which rules out cycles.
///
/// # Examples
///
/// ```
/// use archguard_domain::{ArchitectureBuilder, CodeMapping, PolicyKind, Stereotype};
///
/// let mut builder = ArchitectureBuilder::new();
/// builder.add_component("Core", Stereotype::Public, None).unwrap();
/// builder.add_component("UI", Stereotype::Private, None).unwrap();
/// builder.add_mapping("Core", CodeMapping::include("core\\..*")).unwrap();
/// builder.add_mapping("UI", CodeMapping::include("ui\\..*")).unwrap();
/// builder.add_policy("UI", "Core", PolicyKind::AllowExplicit).unwrap();
///
/// let architecture = builder.build();
/// assert_eq!(architecture.len(), 2);
/// assert_eq!(architecture.all_policies().len(), 1);
/// ```
#[derive(Debug, Default)]
pub struct ArchitectureBuilder {
    architecture: Architecture,
}

impl ArchitectureBuilder {
    /// Create an empty builder
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a component under an optional, already existing parent
    pub fn add_component(
        &mut self,
        name: &str,
        stereotype: Stereotype,
        parent: Option<&str>,
    ) -> Result<ComponentId, ArchitectureError> {
        if name.is_empty() {
            return Err(ArchitectureError::EmptyName);
        }
        if self.architecture.by_name.contains_key(name) {
            return Err(ArchitectureError::DuplicateComponent(name.to_string()));
        }
        let parent = parent.map(|p| self.resolve(p)).transpose()?;

        let arch = &mut self.architecture;
        let id = ComponentId::from_index(arch.components.len());
        arch.components.push(Component {
            id,
            name: name.to_string(),
            description: String::new(),
            stereotype,
            parent,
            children: Vec::new(),
            code_mappings: Vec::new(),
        });
        arch.by_name.insert(name.to_string(), id);
        arch.outgoing.push(Vec::new());
        arch.incoming.push(Vec::new());

        let mut path = vec![id];
        if let Some(parent) = parent {
            arch.components[parent.index()].children.push(id);
            path.extend_from_slice(&arch.ancestors[parent.index()]);
        }
        arch.ancestors.push(path);

        Ok(id)
    }

    /// Set the description of a component
    pub fn describe(&mut self, component: &str, description: &str) -> Result<(), ArchitectureError> {
        let id = self.resolve(component)?;
        self.architecture.components[id.index()].description = description.to_string();
        Ok(())
    }

    /// Append an include or exclude pattern to a component
    ///
    /// Patterns are not compiled here; invalid expressions surface when a
    /// mapper first prepares the architecture.
    pub fn add_mapping(&mut self, component: &str, mapping: CodeMapping) -> Result<(), ArchitectureError> {
        let id = self.resolve(component)?;
        self.architecture.components[id.index()].code_mappings.push(mapping);
        Ok(())
    }

    /// Declare an allow or deny policy
    ///
    /// Declaring a [`PolicyKind::TolerateExplicit`] policy this way tolerates
    /// nothing; use [`add_tolerate_policy`](Self::add_tolerate_policy) to list
    /// the tolerated type dependencies.
    pub fn add_policy(&mut self, source: &str, target: &str, kind: PolicyKind) -> Result<(), ArchitectureError> {
        self.push_policy(source, target, kind, BTreeSet::new())
    }

    /// Declare a tolerate policy with its tolerated type dependencies
    pub fn add_tolerate_policy<I>(&mut self, source: &str, target: &str, tolerated: I) -> Result<(), ArchitectureError>
    where
        I: IntoIterator<Item = TypeDependency>,
    {
        self.push_policy(
            source,
            target,
            PolicyKind::TolerateExplicit,
            tolerated.into_iter().collect(),
        )
    }

    /// Finish building
    pub fn build(self) -> Architecture {
        self.architecture
    }

    fn push_policy(
        &mut self,
        source: &str,
        target: &str,
        kind: PolicyKind,
        tolerated: BTreeSet<TypeDependency>,
    ) -> Result<(), ArchitectureError> {
        if !kind.is_explicit() {
            return Err(ArchitectureError::ImplicitPolicy {
                from: source.to_string(),
                to: target.to_string(),
                kind: kind.to_string(),
            });
        }
        let source_id = self.resolve(source)?;
        let target_id = self.resolve(target)?;

        let arch = &mut self.architecture;
        if arch.policy_index.contains_key(&(source_id, target_id)) {
            return Err(ArchitectureError::DuplicatePolicy {
                from: source.to_string(),
                to: target.to_string(),
            });
        }

        let index = arch.policies.len();
        arch.policies.push(Policy {
            source: source_id,
            target: target_id,
            kind,
            tolerated,
        });
        arch.policy_index.insert((source_id, target_id), index);
        arch.outgoing[source_id.index()].push(index);
        arch.incoming[target_id.index()].push(index);
        Ok(())
    }

    fn resolve(&self, name: &str) -> Result<ComponentId, ArchitectureError> {
        self.architecture
            .id_of(name)
            .ok_or_else(|| ArchitectureError::UnknownComponent(name.to_string()))
    }
}


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    /// Builds a forest where component `i` hangs below `parents[i] % i` when set.
    fn build_forest(parents: &[Option<usize>]) -> Architecture {
        let mut builder = ArchitectureBuilder::new();
        for (i, parent) in parents.iter().enumerate() {
            let parent_name = match parent {
                Some(p) if i > 0 => Some(format!("c{}", p % i)),
                _ => None,
            };
            builder
                .add_component(&format!("c{}", i), Stereotype::Private, parent_name.as_deref())
                .unwrap();
        }
        builder.build()
    }

    proptest! {
        /// Property: ancestors start with the component and end at a top-level component
        #[test]
        fn test_ancestor_path_shape(parents in prop::collection::vec(prop::option::of(0usize..32), 1..24)) {
            let arch = build_forest(&parents);
            for component in arch.components() {
                let path = arch.ancestors(component.id());
                prop_assert_eq!(path[0], component.id());
                let root = *path.last().unwrap();
                prop_assert!(arch.is_toplevel(root));
            }
        }

        /// Property: descendants and is_descendant agree
        #[test]
        fn test_descendants_match_is_descendant(parents in prop::collection::vec(prop::option::of(0usize..32), 1..24)) {
            let arch = build_forest(&parents);
            for a in arch.components() {
                let subtree = arch.descendants(a.id());
                for b in arch.components() {
                    prop_assert_eq!(subtree.contains(&b.id()), arch.is_descendant(b.id(), a.id()));
                }
            }
        }
    }
}
