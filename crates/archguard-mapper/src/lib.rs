//! Archguard Mapper
//!
//! Maps low-level types onto the components of an architecture using the
//! components' include and exclude patterns.
//!
//! The mapper provides:
//! - Whole-name regular expression matching with a per-mapper pattern cache
//! - Deepest-first component traversal with ancestor pruning
//! - Orphan detection (types matching no component)
//! - Ambiguity detection (types matching several components)
//!
//! # Examples
//!
//! ```
//! use archguard_domain::{ArchitectureBuilder, CodeMapping, Stereotype};
//! use archguard_mapper::TypeToComponentMapper;
//!
//! let mut builder = ArchitectureBuilder::new();
//! builder.add_component("A", Stereotype::Private, None).unwrap();
//! builder.add_component("B", Stereotype::Private, None).unwrap();
//! builder.add_mapping("A", CodeMapping::include("x\\..*")).unwrap();
//! builder.add_mapping("B", CodeMapping::include("x\\.Y")).unwrap();
//! let architecture = builder.build();
//!
//! let mut mapper = TypeToComponentMapper::new(&architecture);
//! let mapping = mapper.map(["x.Y"], None).unwrap();
//!
//! // Matches are sorted by name, the first one wins.
//! assert_eq!(mapping.ambiguous_types().len(), 1);
//! assert_eq!(mapping.mapped_component("x.Y"), architecture.id_of("A"));
//! ```

#![warn(missing_docs)]

mod error;
mod mapper;
mod pattern;

pub use error::MapperError;
pub use mapper::{TypeMapping, TypeToComponentMapper};
pub use pattern::PatternCache;
