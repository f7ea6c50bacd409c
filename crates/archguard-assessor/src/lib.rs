//! Archguard Assessor
//!
//! Checks the type-level dependencies of an implementation against an
//! architecture of nested components and the policies declared between them.
//!
//! # Overview
//!
//! The assessor is responsible for:
//! - **Dependency inference**: lifting type dependencies to component pairs
//! - **Classification**: deciding whether an undeclared dependency is allowed
//! - **Evidence collection**: attaching the backing type dependencies
//! - **Assessment**: judging every dependency valid, invalid or unnecessary
//!
//! # Verdicts
//!
//! | Kind | no evidence | evidence |
//! |------|-------------|----------|
//! | **allow** (explicit or implicit) | unnecessary | valid |
//! | **deny** (explicit or implicit) | valid | invalid |
//! | **tolerate** | unnecessary | valid if every piece is tolerated, else invalid |
//!
//! # Usage
//!
//! ```
//! use archguard_assessor::{ArchitectureAssessor, AssessorConfig};
//! use archguard_domain::{ArchitectureBuilder, Assessment, CodeMapping, Stereotype, TypeDependencyMap};
//!
//! let mut builder = ArchitectureBuilder::new();
//! builder.add_component("Core", Stereotype::Private, None).unwrap();
//! builder.add_component("UI", Stereotype::Private, None).unwrap();
//! builder.add_mapping("Core", CodeMapping::include("core\\..*")).unwrap();
//! builder.add_mapping("UI", CodeMapping::include("ui\\..*")).unwrap();
//! let architecture = builder.build();
//!
//! let mut types = TypeDependencyMap::new();
//! types.entry("ui.Button".to_string()).or_default().insert("core.Model".to_string());
//! types.entry("core.Model".to_string()).or_default();
//!
//! let config = AssessorConfig::quiet();
//! let mut assessor = ArchitectureAssessor::with_config(&architecture, &types, config.clone());
//! let assessment = assessor.assess().unwrap();
//!
//! // Core is private and nothing allows the dependency.
//! let dependency = assessment.dependency_by_name("UI", "Core").unwrap();
//! assert_eq!(dependency.assessment(), Assessment::Invalid);
//! assert_eq!(assessment.violations(&config).len(), 1);
//! println!("{}", assessment.summary().render());
//! ```
//!
//! ## Configuration Presets
//!
//! ```
//! use archguard_assessor::AssessorConfig;
//!
//! // Default: dependencies listed, orphans at warn level
//! let config = AssessorConfig::default();
//!
//! // Quiet: for embedding in larger pipelines
//! let config = AssessorConfig::quiet();
//!
//! // Strict: an assessment without dependencies is an error
//! let config = AssessorConfig::strict();
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

mod assessment;
mod assessor;
mod classify;
mod config;
mod dependency;
mod error;
mod progress;
mod report;
mod summary;
mod violation;

pub use assessment::ArchitectureAssessment;
pub use assessor::{assess, ArchitectureAssessor};
pub use classify::classify;
pub use config::{AssessorConfig, LogLevel};
pub use dependency::{evaluate, Dependency};
pub use error::AssessorError;
pub use report::{AssessmentReport, ComponentReport, DependencyReport, EvidenceReport};
pub use summary::AssessmentSummary;
pub use violation::{Violation, VIOLATION_CATEGORY};
