//! File-based provider configuration.
//!
//! Only the plain-data fields of [`StyleProviderProps`] can be expressed in a
//! file. Runtime handles (cache, container, transformers, linters) are attached
//! afterwards with the builder methods on the returned props.
//!
//! ```rust
//! use cssinjs_context::{HashPriority, StyleConfig};
//!
//! let config = StyleConfig::from_yaml_str("hashPriority: high\nautoClear: true\n").unwrap();
//! assert_eq!(config.hash_priority, Some(HashPriority::High));
//!
//! let props = config.into_provider_props();
//! assert_eq!(props.auto_clear, Some(true));
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::context::{HashPriority, MockMode, StyleProviderProps};
use crate::error::ConfigError;

/// Serializable subset of the provider configuration.
///
/// Keys use camelCase. Unknown keys are ignored rather than rejected, since
/// validating them is up to whatever consumes the context.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct StyleConfig {
    pub auto_clear: Option<bool>,
    pub hash_priority: Option<HashPriority>,
    pub ssr_inline: Option<bool>,
    /// Test only.
    pub mock: Option<MockMode>,
}

impl StyleConfig {
    /// Parses a configuration from YAML.
    pub fn from_yaml_str(source: &str) -> Result<Self, ConfigError> {
        Ok(serde_yaml::from_str(source)?)
    }

    /// Parses a configuration from JSON.
    pub fn from_json_str(source: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(source)?)
    }

    /// Reads a configuration file, choosing the format by extension.
    ///
    /// `.yaml` and `.yml` are parsed as YAML, `.json` as JSON.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let extension = path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(str::to_ascii_lowercase);

        let parse: fn(&str) -> Result<Self, ConfigError> = match extension.as_deref() {
            Some("yaml") | Some("yml") => Self::from_yaml_str,
            Some("json") => Self::from_json_str,
            _ => {
                return Err(ConfigError::UnsupportedFormat {
                    path: path.to_path_buf(),
                })
            }
        };

        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        log::debug!("loading style config from {}", path.display());
        parse(&content)
    }

    /// Converts the configuration into provider overrides.
    pub fn into_provider_props(self) -> StyleProviderProps {
        StyleProviderProps {
            auto_clear: self.auto_clear,
            hash_priority: self.hash_priority,
            ssr_inline: self.ssr_inline,
            mock: self.mock,
            ..StyleProviderProps::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_from_yaml_all_fields() {
        let yaml = "autoClear: true\nhashPriority: low\nssrInline: false\nmock: server\n";
        let config = StyleConfig::from_yaml_str(yaml).unwrap();
        assert_eq!(
            config,
            StyleConfig {
                auto_clear: Some(true),
                hash_priority: Some(HashPriority::Low),
                ssr_inline: Some(false),
                mock: Some(MockMode::Server),
            }
        );
    }

    #[test]
    fn test_from_json_partial() {
        let config = StyleConfig::from_json_str(r#"{"ssrInline": true}"#).unwrap();
        assert_eq!(config.ssr_inline, Some(true));
        assert_eq!(config.auto_clear, None);
        assert_eq!(config.hash_priority, None);
    }

    #[test]
    fn test_unknown_keys_are_ignored() {
        let config =
            StyleConfig::from_json_str(r#"{"hashPriority": "high", "prefix": "ant"}"#).unwrap();
        assert_eq!(config.hash_priority, Some(HashPriority::High));
    }

    #[test]
    fn test_invalid_priority_is_an_error() {
        let result = StyleConfig::from_yaml_str("hashPriority: medium\n");
        assert!(matches!(result, Err(ConfigError::Yaml(_))));
    }

    #[test]
    fn test_from_path_yaml() {
        let mut file = tempfile::Builder::new().suffix(".yml").tempfile().unwrap();
        writeln!(file, "autoClear: true").unwrap();

        let config = StyleConfig::from_path(file.path()).unwrap();
        assert_eq!(config.auto_clear, Some(true));
    }

    #[test]
    fn test_from_path_json() {
        let mut file = tempfile::Builder::new().suffix(".json").tempfile().unwrap();
        write!(file, r#"{{"mock": "client"}}"#).unwrap();

        let config = StyleConfig::from_path(file.path()).unwrap();
        assert_eq!(config.mock, Some(MockMode::Client));
    }

    #[test]
    fn test_from_path_unsupported_extension() {
        let result = StyleConfig::from_path("styles.toml");
        assert!(matches!(
            result,
            Err(ConfigError::UnsupportedFormat { .. })
        ));
    }

    #[test]
    fn test_from_path_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let result = StyleConfig::from_path(dir.path().join("absent.yaml"));
        assert!(matches!(result, Err(ConfigError::Io { .. })));
    }

    #[test]
    fn test_into_provider_props() {
        let props = StyleConfig {
            auto_clear: Some(false),
            hash_priority: Some(HashPriority::High),
            ssr_inline: None,
            mock: None,
        }
        .into_provider_props();

        assert_eq!(props.auto_clear, Some(false));
        assert_eq!(props.hash_priority, Some(HashPriority::High));
        assert!(props.cache.is_none());
        assert!(props.transformers.is_none());
    }
}
