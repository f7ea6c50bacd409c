//! Error types for assessments

use archguard_mapper::MapperError;
use thiserror::Error;

/// Errors that abort an assessment
///
/// Orphans, ambiguous types and invalid dependencies are results, not errors.
#[derive(Error, Debug)]
pub enum AssessorError {
    /// Type-to-component mapping failed (invalid pattern)
    #[error("Mapping error: {0}")]
    Mapper(#[from] MapperError),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// TOML parsing error
    #[error("TOML parsing error: {0}")]
    Toml(#[from] toml::de::Error),

    /// I/O error while reading configuration
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The assessment produced no dependency at all
    #[error("No dependencies found. Probably the type corpus or the architecture is misconfigured.")]
    NoDependencies,
}
