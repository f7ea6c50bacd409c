//! Inference of dependency kinds

use archguard_domain::{Architecture, ComponentId, PolicyKind, Stereotype};

/// Kind of the dependency from `source` to `target`
///
/// A policy declared directly between the two components decides the kind.
/// Otherwise ancestor pairs are tried, source ancestors (starting with the
/// source itself) in the outer loop and target ancestors in the inner loop.
/// The first pair that
/// - has a declared policy yields deny-implicit for deny policies and
///   allow-implicit for all others,
/// - has a public target yields allow-implicit,
/// - has a component-public, non-top-level target whose parent contains the
///   source yields allow-implicit.
///
/// Without any such pair the dependency is denied.
pub fn classify(architecture: &Architecture, source: ComponentId, target: ComponentId) -> PolicyKind {
    if let Some(policy) = architecture.policy_to(source, target) {
        return policy.kind();
    }

    for source_ancestor in architecture.ancestors(source) {
        for target_ancestor in architecture.ancestors(target) {
            if let Some(policy) = architecture.policy_to(*source_ancestor, *target_ancestor) {
                return match policy.kind() {
                    PolicyKind::DenyExplicit | PolicyKind::DenyImplicit => PolicyKind::DenyImplicit,
                    PolicyKind::AllowExplicit
                    | PolicyKind::AllowImplicit
                    | PolicyKind::TolerateExplicit => PolicyKind::AllowImplicit,
                };
            }

            let candidate = architecture.component(*target_ancestor);
            match candidate.stereotype() {
                Stereotype::Public => return PolicyKind::AllowImplicit,
                Stereotype::ComponentPublic => {
                    if let Some(parent) = candidate.parent() {
                        if architecture.is_descendant(*source_ancestor, parent) {
                            return PolicyKind::AllowImplicit;
                        }
                    }
                }
                Stereotype::Private => {}
            }
        }
    }

    PolicyKind::DenyImplicit
}

#[cfg(test)]
mod tests {
    use super::*;
    use archguard_domain::ArchitectureBuilder;

    /// Root
    /// ├── Client
    /// │   └── Gui
    /// ├── Server (component public)
    /// │   ├── Api (component public)
    /// │   └── Db
    /// ├── Shared (public)
    /// │   └── Util
    /// └── Legacy
    fn create_test_architecture() -> Architecture {
        let mut builder = ArchitectureBuilder::new();
        builder.add_component("Root", Stereotype::Private, None).unwrap();
        builder.add_component("Client", Stereotype::Private, Some("Root")).unwrap();
        builder.add_component("Gui", Stereotype::Private, Some("Client")).unwrap();
        builder.add_component("Server", Stereotype::ComponentPublic, Some("Root")).unwrap();
        builder.add_component("Api", Stereotype::ComponentPublic, Some("Server")).unwrap();
        builder.add_component("Db", Stereotype::Private, Some("Server")).unwrap();
        builder.add_component("Shared", Stereotype::Public, Some("Root")).unwrap();
        builder.add_component("Util", Stereotype::Private, Some("Shared")).unwrap();
        builder.add_component("Legacy", Stereotype::Private, Some("Root")).unwrap();
        builder.add_policy("Client", "Legacy", PolicyKind::DenyExplicit).unwrap();
        builder.add_policy("Legacy", "Client", PolicyKind::TolerateExplicit).unwrap();
        builder.add_policy("Gui", "Db", PolicyKind::AllowExplicit).unwrap();
        builder.build()
    }

    fn kind(arch: &Architecture, source: &str, target: &str) -> PolicyKind {
        classify(arch, arch.id_of(source).unwrap(), arch.id_of(target).unwrap())
    }

    #[test]
    fn test_direct_policy_is_explicit() {
        let arch = create_test_architecture();
        assert_eq!(kind(&arch, "Gui", "Db"), PolicyKind::AllowExplicit);
        assert_eq!(kind(&arch, "Client", "Legacy"), PolicyKind::DenyExplicit);
    }

    #[test]
    fn test_ancestor_deny_policy() {
        let arch = create_test_architecture();
        assert_eq!(kind(&arch, "Gui", "Legacy"), PolicyKind::DenyImplicit);
    }

    #[test]
    fn test_ancestor_tolerate_policy_allows() {
        let arch = create_test_architecture();
        assert_eq!(kind(&arch, "Legacy", "Gui"), PolicyKind::AllowImplicit);
    }

    #[test]
    fn test_public_target_ancestor() {
        let arch = create_test_architecture();
        assert_eq!(kind(&arch, "Gui", "Util"), PolicyKind::AllowImplicit);
        assert_eq!(kind(&arch, "Legacy", "Shared"), PolicyKind::AllowImplicit);
    }

    #[test]
    fn test_component_public_sibling_rule() {
        let arch = create_test_architecture();
        // Api is visible inside Server, and Server is visible inside Root.
        assert_eq!(kind(&arch, "Db", "Api"), PolicyKind::AllowImplicit);
        assert_eq!(kind(&arch, "Legacy", "Api"), PolicyKind::AllowImplicit);
    }

    #[test]
    fn test_component_public_requires_parent() {
        let mut builder = ArchitectureBuilder::new();
        builder.add_component("Top", Stereotype::ComponentPublic, None).unwrap();
        builder.add_component("Other", Stereotype::Private, None).unwrap();
        let arch = builder.build();

        assert_eq!(kind(&arch, "Other", "Top"), PolicyKind::DenyImplicit);
    }

    #[test]
    fn test_default_deny() {
        let arch = create_test_architecture();
        assert_eq!(kind(&arch, "Legacy", "Util"), PolicyKind::AllowImplicit);
        assert_eq!(kind(&arch, "Db", "Gui"), PolicyKind::DenyImplicit);
        assert_eq!(kind(&arch, "Shared", "Legacy"), PolicyKind::DenyImplicit);
    }
}
