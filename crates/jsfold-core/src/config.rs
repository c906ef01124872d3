//! Pass configuration, loadable from a YAML file.
//!
//! ```yaml
//! debugTrace: true
//! shiftSemantics: unsigned
//! ```

use crate::error::ConfigError;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// How `>>>` is evaluated when both operands are constant.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ShiftSemantics {
    /// `>>>` folds exactly like `>>`. This is the historical output and
    /// ignores the unsigned conversion JavaScript performs.
    #[default]
    Arithmetic,
    /// JavaScript semantics: `ToUint32(left) >>> (right & 31)`.
    Unsigned,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct FoldConfig {
    /// Record one line per visited node in the pass report.
    pub debug_trace: bool,
    pub shift_semantics: ShiftSemantics,
}

impl FoldConfig {
    pub fn from_yaml_str(source: &str) -> Result<Self, ConfigError> {
        // An empty document deserializes to `null`, which serde_yaml rejects
        // for a struct; treat it as "all defaults".
        if source.trim().is_empty() {
            return Ok(Self::default());
        }
        Ok(serde_yaml::from_str(source)?)
    }

    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let source = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_yaml_str(&source)
    }

    pub fn with_debug_trace(mut self, enabled: bool) -> Self {
        self.debug_trace = enabled;
        self
    }

    pub fn with_shift_semantics(mut self, semantics: ShiftSemantics) -> Self {
        self.shift_semantics = semantics;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_defaults() {
        let config = FoldConfig::default();
        assert!(!config.debug_trace);
        assert_eq!(config.shift_semantics, ShiftSemantics::Arithmetic);
    }

    #[test]
    fn test_parse_full_document() {
        let config = FoldConfig::from_yaml_str("debugTrace: true\nshiftSemantics: unsigned\n")
            .expect("valid config");
        assert!(config.debug_trace);
        assert_eq!(config.shift_semantics, ShiftSemantics::Unsigned);
    }

    #[test]
    fn test_missing_keys_use_defaults() {
        let config = FoldConfig::from_yaml_str("debugTrace: true\n").expect("valid config");
        assert!(config.debug_trace);
        assert_eq!(config.shift_semantics, ShiftSemantics::Arithmetic);
    }

    #[test]
    fn test_empty_document() {
        assert_eq!(FoldConfig::from_yaml_str("").unwrap(), FoldConfig::default());
    }

    #[test]
    fn test_unknown_shift_semantics_is_rejected() {
        let err = FoldConfig::from_yaml_str("shiftSemantics: logical\n").unwrap_err();
        assert!(matches!(err, ConfigError::Yaml(_)));
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "shiftSemantics: unsigned").unwrap();
        let config = FoldConfig::load(file.path()).expect("config loads");
        assert_eq!(config.shift_semantics, ShiftSemantics::Unsigned);
    }

    #[test]
    fn test_load_missing_file() {
        let err = FoldConfig::load(Path::new("/definitely/not/here/jsfold.yaml")).unwrap_err();
        assert!(matches!(err, ConfigError::Io { .. }));
    }
}
