//! Configuration for building a filter chain.

use crate::chain::DEFAULT_MAX_PASSES;
use crate::directive::DEFAULT_PREFIX;
use crate::error::DemockError;
use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DemockConfig {
    /// Prefix marking directive keys in fixtures
    #[serde(default = "default_filter_prefix")]
    pub filter_prefix: String,

    /// Document appended to directory-like URLs, e.g. `index.json`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_document: Option<String>,

    /// Upper bound on `$data` unwrapping passes per response
    #[serde(default = "default_max_passes")]
    pub max_passes: usize,

    /// Register the method filter (non-GET verbs become a path segment)
    #[serde(default = "default_true")]
    pub method_rewrite: bool,
}

fn default_filter_prefix() -> String {
    DEFAULT_PREFIX.to_string()
}

fn default_max_passes() -> usize {
    DEFAULT_MAX_PASSES
}

fn default_true() -> bool {
    true
}

impl Default for DemockConfig {
    fn default() -> Self {
        Self {
            filter_prefix: default_filter_prefix(),
            default_document: None,
            max_passes: default_max_passes(),
            method_rewrite: true,
        }
    }
}

impl DemockConfig {
    /// Load from a YAML or JSON file (JSON is valid YAML).
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, anyhow::Error> {
        let contents = std::fs::read_to_string(path)?;
        let config: DemockConfig = serde_yaml::from_str(&contents)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), DemockError> {
        if self.filter_prefix.is_empty() {
            return Err(DemockError::InvalidConfig(
                "filterPrefix must not be empty".to_string(),
            ));
        }
        if self.max_passes == 0 {
            return Err(DemockError::InvalidConfig(
                "maxPasses must be at least 1".to_string(),
            ));
        }
        if let Some(document) = &self.default_document {
            if document.is_empty() || document.contains('/') {
                return Err(DemockError::InvalidConfig(format!(
                    "defaultDocument must be a plain file name, got '{document}'"
                )));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_defaults() {
        let config = DemockConfig::default();
        assert_eq!(config.filter_prefix, "$");
        assert_eq!(config.max_passes, 32);
        assert!(config.method_rewrite);
        assert!(config.default_document.is_none());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_yaml_partial_uses_defaults() {
        let yaml = r#"
defaultDocument: index.json
maxPasses: 8
"#;
        let config: DemockConfig = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(config.default_document.as_deref(), Some("index.json"));
        assert_eq!(config.max_passes, 8);
        assert_eq!(config.filter_prefix, "$");
        assert!(config.method_rewrite);
    }

    #[test]
    fn test_from_file_json() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"{{ "filterPrefix": "@", "methodRewrite": false }}"#
        )
        .unwrap();

        let config = DemockConfig::from_file(file.path()).unwrap();
        assert_eq!(config.filter_prefix, "@");
        assert!(!config.method_rewrite);
    }

    #[test]
    fn test_from_file_rejects_invalid() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "maxPasses: 0").unwrap();
        let err = DemockConfig::from_file(file.path()).unwrap_err();
        assert!(err.to_string().contains("maxPasses"));
    }

    #[test]
    fn test_validate() {
        let config = DemockConfig {
            filter_prefix: String::new(),
            ..Default::default()
        };
        assert!(matches!(config.validate(), Err(DemockError::InvalidConfig(_))));

        let config = DemockConfig {
            default_document: Some("api/index.json".to_string()),
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }
}
