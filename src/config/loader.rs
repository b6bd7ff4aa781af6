// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::entry::Field;
use crate::errors::{ConfigError, ConfigErrorKind, LoadError};
use crate::operator::{Logger, Registry};
use crate::pipeline::Pipeline;
use crate::traits::Builder;

/// Options holding a field expression, checked before the builder sees them.
const FIELD_OPTIONS: [&str; 3] = ["write_to", "parse_from", "parse_to"];

/// One operator entry of a pipeline configuration.
///
/// Only `type` and `id` are interpreted here; every other key is handed to the
/// builder registered for `type`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OperatorConfig {
    #[serde(rename = "type")]
    pub operator_type: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(flatten)]
    pub options: Map<String, Value>,
}

impl OperatorConfig {
    pub fn new(operator_type: impl Into<String>) -> Self {
        Self {
            operator_type: operator_type.into(),
            id: None,
            options: Map::new(),
        }
    }

    /// The configured ID, or the type name when none is set.
    pub fn id(&self) -> &str {
        self.id.as_deref().unwrap_or(&self.operator_type)
    }

    /// Resolves the builder for this operator's type and deserializes the
    /// options into it.
    pub fn builder(&self, registry: &Registry) -> Result<Box<dyn Builder>, ConfigError> {
        let factory = registry.lookup(&self.operator_type).ok_or_else(|| {
            ConfigError::new(
                self.id(),
                ConfigErrorKind::UnsupportedType(self.operator_type.clone()),
            )
        })?;

        for key in FIELD_OPTIONS {
            if let Some(Value::String(expression)) = self.options.get(key) {
                expression
                    .parse::<Field>()
                    .map_err(|e| ConfigError::new(self.id(), e.into()))?;
            }
        }

        let mut raw = self.options.clone();
        raw.insert("type".to_string(), Value::String(self.operator_type.clone()));
        raw.insert("id".to_string(), Value::String(self.id().to_string()));

        factory(Value::Object(raw)).map_err(|e| {
            ConfigError::new(self.id(), ConfigErrorKind::InvalidConfig(e.to_string()))
        })
    }
}

/// A complete pipeline definition.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PipelineConfig {
    #[serde(default)]
    pub pipeline: Vec<OperatorConfig>,
}

impl PipelineConfig {
    pub fn from_yaml(content: &str) -> Result<Self, LoadError> {
        Ok(serde_yaml::from_str(content)?)
    }

    pub fn build(&self, registry: &Registry, logger: Logger) -> Result<Pipeline, ConfigError> {
        Pipeline::build(&self.pipeline, registry, logger)
    }
}

pub fn load_config<P: AsRef<Path>>(path: P) -> Result<PipelineConfig, LoadError> {
    let content = fs::read_to_string(path)?;
    PipelineConfig::from_yaml(&content)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::io::Write;

    const PIPELINE_YAML: &str = r#"
pipeline:
  - id: generator
    type: generate_input
    record: '{"message": "hello"}'
    count: 2
    output: parser
  - id: parser
    type: json_parser
    output: [sink]
  - id: sink
    type: drop_output
"#;

    #[test]
    fn parse_basic_config() {
        let cfg = PipelineConfig::from_yaml(PIPELINE_YAML).unwrap();
        assert_eq!(cfg.pipeline.len(), 3);

        let generator = &cfg.pipeline[0];
        assert_eq!(generator.id(), "generator");
        assert_eq!(generator.operator_type, "generate_input");
        assert_eq!(generator.options["count"], json!(2));
        assert_eq!(generator.options["output"], json!("parser"));
        assert!(!generator.options.contains_key("type"));

        assert_eq!(cfg.pipeline[1].id(), "parser");
        assert_eq!(cfg.pipeline[1].operator_type, "json_parser");
        assert_eq!(cfg.pipeline[1].options["output"], json!(["sink"]));
    }

    #[test]
    fn test_builder_resolution() {
        struct TestCase {
            name: &'static str,
            config: OperatorConfig,
            expected: Result<(&'static str, &'static str), ConfigErrorKind>,
        }

        let mut with_id = OperatorConfig::new("noop");
        with_id.id = Some("first".to_string());

        let mut bad_options = OperatorConfig::new("csv_parser");
        bad_options.options.insert("header".to_string(), json!(["not", "a", "string"]));

        let cases = vec![
            TestCase {
                name: "explicit id",
                config: with_id,
                expected: Ok(("first", "noop")),
            },
            TestCase {
                name: "id defaults to type",
                config: OperatorConfig::new("drop_output"),
                expected: Ok(("drop_output", "drop_output")),
            },
            TestCase {
                name: "unknown type",
                config: OperatorConfig::new("nonexistent"),
                expected: Err(ConfigErrorKind::UnsupportedType("nonexistent".to_string())),
            },
        ];

        let registry = Registry::with_builtins();
        for case in cases {
            let result = case
                .config
                .builder(&registry)
                .map(|builder| (builder.id().to_string(), builder.type_name().to_string()))
                .map_err(|e| e.kind);
            let expected = case
                .expected
                .map(|(id, ty)| (id.to_string(), ty.to_string()));
            assert_eq!(result, expected, "case: {}", case.name);
        }

        let err = bad_options.builder(&registry).unwrap_err();
        assert!(matches!(err.kind, ConfigErrorKind::InvalidConfig(_)));
        assert_eq!(err.operator_id, "csv_parser");

        let mut bad_field = OperatorConfig::new("json_parser");
        bad_field.options.insert("parse_from".to_string(), json!("$nowhere.key"));
        let err = bad_field.builder(&registry).unwrap_err();
        assert!(matches!(err.kind, ConfigErrorKind::InvalidField(_)));
        assert!(std::error::Error::source(&err).is_some());
    }

    #[test]
    fn test_load_config_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(PIPELINE_YAML.as_bytes()).unwrap();

        let cfg = load_config(file.path()).unwrap();
        assert_eq!(cfg.pipeline.len(), 3);
        assert_eq!(cfg.pipeline[2].id(), "sink");
    }

    #[test]
    fn test_load_config_errors() {
        let dir = tempfile::tempdir().unwrap();
        let missing = load_config(dir.path().join("absent.yaml")).unwrap_err();
        assert!(matches!(missing, LoadError::Io(_)));

        let malformed = PipelineConfig::from_yaml("pipeline: [ {type: ").unwrap_err();
        assert!(matches!(malformed, LoadError::Yaml(_)));

        let untyped = PipelineConfig::from_yaml("pipeline:\n  - id: nameless\n").unwrap_err();
        assert!(matches!(untyped, LoadError::Yaml(_)));
    }

    #[test]
    fn test_build_from_config() {
        let cfg = PipelineConfig::from_yaml(PIPELINE_YAML).unwrap();
        let pipeline = cfg
            .build(&Registry::with_builtins(), Logger::new("config-test"))
            .unwrap();
        let ids: Vec<&str> = pipeline.operators().iter().map(|op| op.id()).collect();
        assert_eq!(ids, vec!["generator", "parser", "sink"]);
    }
}
