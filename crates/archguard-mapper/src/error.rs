//! Mapper error types

use thiserror::Error;

/// Errors that can occur while mapping types to components
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum MapperError {
    /// A code mapping does not hold a valid regular expression
    #[error("Invalid regular expression '{pattern}' in component {component}: {message}")]
    InvalidPattern {
        /// Component carrying the mapping
        component: String,
        /// Pattern text as declared
        pattern: String,
        /// Message from the regex compiler
        message: String,
    },
}
