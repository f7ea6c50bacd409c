//! Assessment module - verdicts for component dependencies

use std::fmt;

/// Verdict for a dependency given its kind and evidence
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Assessment {
    /// The implementation conforms to the architecture
    Valid,

    /// The implementation violates the architecture
    Invalid,

    /// An allowed or tolerated dependency is not used by the implementation
    Unnecessary,
}

impl Assessment {
    /// Get the assessment name as a string
    pub fn as_str(&self) -> &'static str {
        match self {
            Assessment::Valid => "valid",
            Assessment::Invalid => "invalid",
            Assessment::Unnecessary => "unnecessary",
        }
    }

    /// All assessments in declaration order
    pub fn all() -> [Assessment; 3] {
        [Assessment::Valid, Assessment::Invalid, Assessment::Unnecessary]
    }
}

impl fmt::Display for Assessment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
