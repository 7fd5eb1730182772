//! Top-level analysis configuration and YAML I/O

use super::error::{ConfigError, ConfigResult};
use super::stage_configs::{CallGraphConfig, ConstPropConfig, DeadCodeConfig, PtaConfig};
use super::validation::Validatable;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Supported YAML schema versions
const SUPPORTED_VERSIONS: &[u32] = &[1];

/// Complete configuration for one analysis run
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AnalysisConfig {
    pub call_graph: CallGraphConfig,
    pub pta: PtaConfig,
    pub constprop: ConstPropConfig,
    pub dead_code: DeadCodeConfig,
}

/// YAML Schema v1
#[derive(Debug, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
struct ConfigFileV1 {
    version: Option<u32>,
    #[serde(default)]
    call_graph: CallGraphConfig,
    #[serde(default)]
    pta: PtaConfig,
    #[serde(default)]
    constprop: ConstPropConfig,
    #[serde(default)]
    dead_code: DeadCodeConfig,
}

impl ConfigFileV1 {
    fn into_config(self) -> AnalysisConfig {
        AnalysisConfig {
            call_graph: self.call_graph,
            pta: self.pta,
            constprop: self.constprop,
            dead_code: self.dead_code,
        }
    }
}

impl AnalysisConfig {
    /// Builder: Override call graph section
    pub fn call_graph(mut self, f: impl FnOnce(CallGraphConfig) -> CallGraphConfig) -> Self {
        self.call_graph = f(self.call_graph);
        self
    }

    /// Builder: Override pointer analysis section
    pub fn pta(mut self, f: impl FnOnce(PtaConfig) -> PtaConfig) -> Self {
        self.pta = f(self.pta);
        self
    }

    /// Builder: Override constant propagation section
    pub fn constprop(mut self, f: impl FnOnce(ConstPropConfig) -> ConstPropConfig) -> Self {
        self.constprop = f(self.constprop);
        self
    }

    /// Builder: Override dead code section
    pub fn dead_code(mut self, f: impl FnOnce(DeadCodeConfig) -> DeadCodeConfig) -> Self {
        self.dead_code = f(self.dead_code);
        self
    }

    /// Load configuration from a YAML file
    pub fn from_yaml(path: impl AsRef<Path>) -> ConfigResult<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_yaml_str(&content)
    }

    /// Parse configuration from YAML text, rejecting unknown fields with a
    /// suggestion and validating the result.
    pub fn from_yaml_str(content: &str) -> ConfigResult<Self> {
        let file: ConfigFileV1 =
            serde_yaml::from_str(content).map_err(ConfigError::from_yaml_error)?;
        match file.version {
            None => return Err(ConfigError::MissingVersion),
            Some(v) if !SUPPORTED_VERSIONS.contains(&v) => {
                return Err(ConfigError::UnsupportedVersion {
                    found: v,
                    supported: SUPPORTED_VERSIONS.to_vec(),
                })
            }
            Some(_) => {}
        }

        let config = file.into_config();
        config.validate()?;
        Ok(config)
    }

    /// Serialize to YAML (schema v1)
    pub fn to_yaml(&self) -> ConfigResult<String> {
        let file = ConfigFileV1 {
            version: Some(1),
            call_graph: self.call_graph.clone(),
            pta: self.pta.clone(),
            constprop: self.constprop.clone(),
            dead_code: self.dead_code.clone(),
        };
        Ok(serde_yaml::to_string(&file)?)
    }
}

impl Validatable for AnalysisConfig {
    fn validate(&self) -> ConfigResult<()> {
        self.call_graph.validate()?;
        self.pta.validate()?;
        self.constprop.validate()?;
        self.dead_code.validate()?;
        Ok(())
    }

    fn config_name(&self) -> &'static str {
        "AnalysisConfig"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{CallGraphAlgorithm, HeapModelKind};

    #[test]
    fn test_parse_full_config() {
        let yaml = r#"
version: 1
call_graph:
  algorithm: cha
  entry: "<Main: void main()>"
pta:
  heap_model: type_based
constprop:
  inter_procedural: true
dead_code:
  enabled: false
"#;
        let config = AnalysisConfig::from_yaml_str(yaml).unwrap();
        assert_eq!(config.call_graph.algorithm, CallGraphAlgorithm::Cha);
        assert_eq!(config.call_graph.entry.as_deref(), Some("<Main: void main()>"));
        assert_eq!(config.pta.heap_model, HeapModelKind::TypeBased);
        assert!(config.constprop.inter_procedural);
        assert!(!config.dead_code.enabled);
    }

    #[test]
    fn test_partial_config_uses_defaults() {
        let config = AnalysisConfig::from_yaml_str("version: 1\npta:\n  heap_model: allocation_site\n").unwrap();
        assert_eq!(config, AnalysisConfig::default());
    }

    #[test]
    fn test_missing_version() {
        let err = AnalysisConfig::from_yaml_str("pta: {}\n").unwrap_err();
        assert!(matches!(err, ConfigError::MissingVersion));
    }

    #[test]
    fn test_unsupported_version() {
        let err = AnalysisConfig::from_yaml_str("version: 7\n").unwrap_err();
        assert!(matches!(err, ConfigError::UnsupportedVersion { found: 7, .. }));
    }

    #[test]
    fn test_unknown_field_suggestion() {
        let err = AnalysisConfig::from_yaml_str("version: 1\npta:\n  heap_modle: type_based\n")
            .unwrap_err();
        match err {
            ConfigError::UnknownField {
                field,
                section,
                suggestion,
                ..
            } => {
                assert_eq!(field, "heap_modle");
                assert_eq!(section, "pta");
                assert!(suggestion.contains("heap_model"));
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_unknown_top_level_section() {
        let err = AnalysisConfig::from_yaml_str("version: 1\ndead_cod:\n  enabled: false\n")
            .unwrap_err();
        match err {
            ConfigError::UnknownField {
                field,
                section,
                suggestion,
                valid_fields,
            } => {
                assert_eq!(field, "dead_cod");
                assert_eq!(section, "<root>");
                assert!(suggestion.contains("dead_code"));
                assert!(valid_fields.contains(&"call_graph".to_string()));
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_malformed_value_stays_yaml_error() {
        let err = AnalysisConfig::from_yaml_str("version: 1\npta:\n  heap_model: heap\n")
            .unwrap_err();
        assert!(matches!(err, ConfigError::Yaml(_)));
    }

    #[test]
    fn test_invalid_entry_rejected() {
        let err = AnalysisConfig::from_yaml_str("version: 1\ncall_graph:\n  entry: main\n")
            .unwrap_err();
        assert!(matches!(err, ConfigError::Validation(_)));
    }

    #[test]
    fn test_yaml_roundtrip() {
        let config = AnalysisConfig::default()
            .call_graph(|c| c.algorithm(CallGraphAlgorithm::Cha))
            .constprop(|c| c.inter_procedural(true));
        let yaml = config.to_yaml().unwrap();
        assert!(yaml.contains("version: 1"));
        assert_eq!(AnalysisConfig::from_yaml_str(&yaml).unwrap(), config);
    }
}
