//! Findings for invalid dependencies

use archguard_domain::TypeDependency;
use serde::Serialize;
use std::fmt;

/// Category of all architecture violations
pub const VIOLATION_CATEGORY: &str = "Architecture Conformance";

/// A type dependency that violates the architecture
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Violation {
    /// Always [`VIOLATION_CATEGORY`]
    pub category: String,
    /// Group, by default the violated component dependency
    pub group: String,
    /// Type that has the dependency
    pub source_type: String,
    /// Type depended upon
    pub target_type: String,
    /// Human-readable message
    pub message: String,
}

impl Violation {
    pub(crate) fn new(group: String, evidence: TypeDependency) -> Self {
        let message = format!(
            "Type depends on {}. This violates the architecture specification.",
            evidence.target
        );
        Self {
            category: VIOLATION_CATEGORY.to_string(),
            group,
            source_type: evidence.source,
            target_type: evidence.target,
            message,
        }
    }

    pub(crate) fn default_group(label: &str) -> String {
        format!("Architecture components: {}", label)
    }
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}: {}", self.group, self.source_type, self.message)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_violation_message() {
        let violation = Violation::new(
            Violation::default_group("UI -> Core"),
            TypeDependency::new("ui.Button", "core.Model"),
        );

        assert_eq!(violation.category, "Architecture Conformance");
        assert_eq!(violation.group, "Architecture components: UI -> Core");
        assert_eq!(
            violation.message,
            "Type depends on core.Model. This violates the architecture specification."
        );
        assert_eq!(
            violation.to_string(),
            "[Architecture components: UI -> Core] ui.Button: Type depends on core.Model. This violates the architecture specification."
        );
    }
}
