//! Configuration for assessments
//!
//! Controls how results are logged and which outcomes abort a run.

use crate::AssessorError;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Level at which a class of findings is logged
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    /// Not logged at all
    Off,
    /// `tracing::trace!`
    Trace,
    /// `tracing::debug!`
    Debug,
    /// `tracing::info!`
    Info,
    /// `tracing::warn!`
    Warn,
    /// `tracing::error!`
    Error,
}

/// Configuration for the architecture assessor
///
/// # Examples
///
/// ```
/// use archguard_assessor::{AssessorConfig, LogLevel};
///
/// // Default configuration
/// let config = AssessorConfig::default();
/// assert_eq!(config.orphan_log_level, LogLevel::Warn);
///
/// // Strict: an empty result is an error
/// let config = AssessorConfig::strict();
/// assert!(config.fail_on_empty);
///
/// // Quiet: only the essentials are logged
/// let config = AssessorConfig::quiet();
/// assert!(!config.log_dependencies);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AssessorConfig {
    /// Log every computed dependency after an assessment
    /// Default: true
    pub log_dependencies: bool,

    /// Level at which types matching no component are logged
    /// Default: warn
    pub orphan_log_level: LogLevel,

    /// Treat an assessment without any dependency as a configuration error
    /// Default: false
    pub fail_on_empty: bool,

    /// Group label for violations, replacing the per-dependency default
    /// ("Architecture components: <source> -> <target>")
    #[serde(skip_serializing_if = "Option::is_none")]
    pub violation_group: Option<String>,
}

impl Default for AssessorConfig {
    fn default() -> Self {
        Self {
            log_dependencies: true,
            orphan_log_level: LogLevel::Warn,
            fail_on_empty: false,
            violation_group: None,
        }
    }
}

/// A configuration file holding an optional `[assessor]` section
#[derive(Debug, Deserialize)]
struct ConfigFile {
    assessor: Option<AssessorConfig>,
}

impl AssessorConfig {
    /// Quiet configuration for embedding in larger pipelines
    ///
    /// - No dependency listing
    /// - Orphans at debug level
    pub fn quiet() -> Self {
        Self {
            log_dependencies: false,
            orphan_log_level: LogLevel::Debug,
            fail_on_empty: false,
            violation_group: None,
        }
    }

    /// Strict configuration for CI gates
    ///
    /// - Orphans at error level
    /// - An empty result fails the run
    pub fn strict() -> Self {
        Self {
            log_dependencies: true,
            orphan_log_level: LogLevel::Error,
            fail_on_empty: true,
            violation_group: None,
        }
    }

    /// Parse a configuration from TOML
    ///
    /// Keys may sit at the top level or inside an `[assessor]` table. Missing
    /// keys take their default values.
    pub fn from_toml_str(contents: &str) -> Result<Self, AssessorError> {
        let table: toml::Table = toml::from_str(contents)?;
        let config = if table.contains_key("assessor") {
            let file: ConfigFile = toml::from_str(contents)?;
            file.assessor.unwrap_or_default()
        } else {
            toml::from_str(contents)?
        };
        config.validate()?;
        Ok(config)
    }

    /// Load a configuration file
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, AssessorError> {
        let contents = fs::read_to_string(path)?;
        Self::from_toml_str(&contents)
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), AssessorError> {
        if let Some(group) = &self.violation_group {
            if group.trim().is_empty() {
                return Err(AssessorError::Config(
                    "violation_group cannot be empty".to_string(),
                ));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = AssessorConfig::default();
        assert!(config.log_dependencies);
        assert_eq!(config.orphan_log_level, LogLevel::Warn);
        assert!(!config.fail_on_empty);
        assert!(config.violation_group.is_none());
    }

    #[test]
    fn test_presets() {
        let quiet = AssessorConfig::quiet();
        assert!(!quiet.log_dependencies);
        assert_eq!(quiet.orphan_log_level, LogLevel::Debug);

        let strict = AssessorConfig::strict();
        assert!(strict.fail_on_empty);
        assert_eq!(strict.orphan_log_level, LogLevel::Error);
    }

    #[test]
    fn test_from_toml_top_level() {
        let config = AssessorConfig::from_toml_str(
            r#"
            log_dependencies = false
            orphan_log_level = "off"
            "#,
        )
        .unwrap();

        assert!(!config.log_dependencies);
        assert_eq!(config.orphan_log_level, LogLevel::Off);
        assert!(!config.fail_on_empty);
    }

    #[test]
    fn test_from_toml_section() {
        let config = AssessorConfig::from_toml_str(
            r#"
            [assessor]
            fail_on_empty = true
            violation_group = "Layering"
            "#,
        )
        .unwrap();

        assert!(config.fail_on_empty);
        assert_eq!(config.violation_group.as_deref(), Some("Layering"));
        assert!(config.log_dependencies);
    }

    #[test]
    fn test_from_toml_empty() {
        let config = AssessorConfig::from_toml_str("").unwrap();
        assert_eq!(config, AssessorConfig::default());
    }

    #[test]
    fn test_invalid_level_rejected() {
        let result = AssessorConfig::from_toml_str(r#"orphan_log_level = "loud""#);
        assert!(matches!(result, Err(AssessorError::Toml(_))));
    }

    #[test]
    fn test_empty_group_rejected() {
        let result = AssessorConfig::from_toml_str(r#"violation_group = "  ""#);
        assert!(matches!(result, Err(AssessorError::Config(_))));
    }

    #[test]
    fn test_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("archguard.toml");
        fs::write(&path, "[assessor]\nlog_dependencies = false\n").unwrap();

        let config = AssessorConfig::from_file(&path).unwrap();
        assert!(!config.log_dependencies);

        let missing = AssessorConfig::from_file(dir.path().join("missing.toml"));
        assert!(matches!(missing, Err(AssessorError::Io(_))));
    }

    #[test]
    fn test_serde_roundtrip() {
        let config = AssessorConfig {
            violation_group: Some("Layers".to_string()),
            ..AssessorConfig::strict()
        };
        let serialized = serde_json::to_string(&config).unwrap();
        let deserialized: AssessorConfig = serde_json::from_str(&serialized).unwrap();
        assert_eq!(config, deserialized);

        let as_toml = toml::to_string(&config).unwrap();
        assert_eq!(AssessorConfig::from_toml_str(&as_toml).unwrap(), config);
    }
}
