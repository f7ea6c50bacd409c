//! Error types for building architectures

use thiserror::Error;

/// Errors that can occur while assembling an architecture
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ArchitectureError {
    /// Component names must be non-empty
    #[error("Component name cannot be empty")]
    EmptyName,

    /// Component names must be unique
    #[error("Duplicate component: {0}")]
    DuplicateComponent(String),

    /// A referenced component does not exist
    #[error("Unknown component: {0}")]
    UnknownComponent(String),

    /// At most one policy per ordered component pair
    #[error("Duplicate policy from {from} to {to}")]
    DuplicatePolicy {
        /// Source component name
        from: String,
        /// Target component name
        to: String,
    },

    /// Implicit kinds cannot be declared
    #[error("Policy from {from} to {to} must have an explicit kind, got {kind}")]
    ImplicitPolicy {
        /// Source component name
        from: String,
        /// Target component name
        to: String,
        /// The rejected kind
        kind: String,
    },
}
