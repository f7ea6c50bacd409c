//! Archguard Domain Layer
//!
//! This crate contains the architecture model that every other layer works
//! on: the component tree, the declared policies between components, and the
//! vocabulary used to describe assessment results.
//!
//! ## Key Concepts
//!
//! - **Component**: a named node in the architecture hierarchy
//! - **Code mapping**: include/exclude patterns assigning types to components
//! - **Policy**: a declared allow / deny / tolerate rule between two components
//! - **Type dependency**: an observed edge between two low-level types
//! - **Assessment**: the valid / invalid / unnecessary verdict for a dependency
//!
//! ## Architecture
//!
//! - Minimal external dependencies
//! - Components live in an arena and refer to each other by [`ComponentId`]
//! - Everything is immutable once [`ArchitectureBuilder::build`] returns
//! - Trait definitions for the seams towards the embedding tool

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod architecture;
pub mod assessment;
pub mod component;
pub mod error;
pub mod policy;
pub mod traits;

use std::collections::{BTreeMap, BTreeSet};

// Re-exports for convenience
pub use architecture::{Architecture, ArchitectureBuilder};
pub use assessment::Assessment;
pub use component::{CodeMapping, Component, ComponentId, MappingKind, Stereotype};
pub use error::ArchitectureError;
pub use policy::{Policy, PolicyKind, TypeDependency};
pub use traits::ProgressMonitor;

/// Every known type mapped to the set of types it depends on
///
/// The keys are the complete type corpus; a type without outgoing
/// dependencies maps to an empty set.
pub type TypeDependencyMap = BTreeMap<String, BTreeSet<String>>;
