//! Counts collected from an assessment

use archguard_domain::{Assessment, PolicyKind};
use std::collections::BTreeMap;

/// Summary of an assessment
///
/// Tracks dependencies per verdict and per kind plus mapping statistics.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AssessmentSummary {
    /// Dependencies per verdict
    pub by_assessment: BTreeMap<Assessment, usize>,

    /// Dependencies per kind
    pub by_kind: BTreeMap<PolicyKind, usize>,

    /// Assessed types, orphans included
    pub types: usize,

    /// Types matching no component
    pub orphans: usize,

    /// Types matching several components
    pub ambiguous: usize,
}

impl AssessmentSummary {
    /// Create an empty summary
    pub fn new() -> Self {
        Self::default()
    }

    /// Record one dependency
    pub fn record(&mut self, kind: PolicyKind, assessment: Assessment) {
        *self.by_assessment.entry(assessment).or_insert(0) += 1;
        *self.by_kind.entry(kind).or_insert(0) += 1;
    }

    /// Number of dependencies with the given verdict
    pub fn count(&self, assessment: Assessment) -> usize {
        self.by_assessment.get(&assessment).copied().unwrap_or(0)
    }

    /// Number of dependencies with the given kind
    pub fn count_kind(&self, kind: PolicyKind) -> usize {
        self.by_kind.get(&kind).copied().unwrap_or(0)
    }

    /// Total number of dependencies
    pub fn total_dependencies(&self) -> usize {
        self.by_assessment.values().sum()
    }

    /// Whether no dependency is invalid
    pub fn is_conformant(&self) -> bool {
        self.count(Assessment::Invalid) == 0
    }

    /// Human-readable report
    pub fn render(&self) -> String {
        let mut lines = vec![
            "Architecture Assessment Summary".to_string(),
            "===============================".to_string(),
            format!("Types: {}", self.types),
            format!("Orphans: {}", self.orphans),
            format!("Ambiguous: {}", self.ambiguous),
            String::new(),
        ];

        if !self.by_kind.is_empty() {
            lines.push("Dependencies by kind:".to_string());
            for (kind, count) in &self.by_kind {
                lines.push(format!("  {}: {}", kind, count));
            }
            lines.push(String::new());
        }

        lines.push("Dependencies by assessment:".to_string());
        for assessment in Assessment::all() {
            lines.push(format!("  {}: {}", assessment, self.count(assessment)));
        }
        lines.push(format!("  Total: {}", self.total_dependencies()));

        lines.join("\n")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_summary_creation() {
        let summary = AssessmentSummary::new();
        assert_eq!(summary.total_dependencies(), 0);
        assert!(summary.is_conformant());
    }

    #[test]
    fn test_record() {
        let mut summary = AssessmentSummary::new();
        summary.record(PolicyKind::AllowExplicit, Assessment::Valid);
        summary.record(PolicyKind::DenyImplicit, Assessment::Invalid);
        summary.record(PolicyKind::DenyImplicit, Assessment::Valid);

        assert_eq!(summary.count(Assessment::Valid), 2);
        assert_eq!(summary.count(Assessment::Invalid), 1);
        assert_eq!(summary.count(Assessment::Unnecessary), 0);
        assert_eq!(summary.count_kind(PolicyKind::DenyImplicit), 2);
        assert_eq!(summary.total_dependencies(), 3);
        assert!(!summary.is_conformant());
    }

    #[test]
    fn test_render() {
        let mut summary = AssessmentSummary::new();
        summary.types = 4;
        summary.orphans = 1;
        summary.record(PolicyKind::TolerateExplicit, Assessment::Unnecessary);

        let rendered = summary.render();
        assert!(rendered.contains("Types: 4"));
        assert!(rendered.contains("Orphans: 1"));
        assert!(rendered.contains("unnecessary: 1"));
        assert!(rendered.contains("Total: 1"));
    }
}
