//! Build file types
//!
//! This module defines the data structures that represent a molt.yml file.

use indexmap::IndexMap;
use serde::{Deserialize, Deserializer, Serialize};

/// Top-level build file structure
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct BuildFile {
    /// Application name (optional)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    /// Application usage description (optional)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub usage: Option<String>,

    /// Interpreter to use for commands (e.g., ["sh", "-c"])
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub interpreter: Option<Vec<String>>,

    /// Properties file with base values for environment arguments
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub envargs_file: Option<String>,

    /// Environment arguments, in declaration order
    #[serde(default, skip_serializing_if = "IndexMap::is_empty")]
    pub envargs: IndexMap<String, EnvArgConfig>,

    /// Per-environment configuration sections, selected by `ENV`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub environments: Option<serde_yaml::Mapping>,

    /// Targets, in declaration order
    #[serde(default)]
    pub targets: IndexMap<String, TargetConfig>,
}

/// An environment argument definition
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct EnvArgConfig {
    /// Default value
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        deserialize_with = "deserialize_scalar"
    )]
    pub default: Option<String>,

    /// Description for listings
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// Mask the value in output
    #[serde(default)]
    pub sensitive: bool,
}

/// A target definition
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct TargetConfig {
    /// Description for listings
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// Listing group
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub group: Option<String>,

    /// Targets to run first
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub depends: Vec<String>,

    /// Target does not use environment arguments
    #[serde(default)]
    pub phony: bool,

    /// Hide commands from logs
    #[serde(default)]
    pub sensitive: bool,

    /// Shell commands to run
    #[serde(default, deserialize_with = "deserialize_commands")]
    pub run: Vec<String>,
}

/// Accept strings, numbers and booleans as a string value
fn deserialize_scalar<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    use serde::de::Error;
    use serde_yaml::Value;

    match Value::deserialize(deserializer)? {
        Value::Null => Ok(None),
        Value::String(s) => Ok(Some(s)),
        Value::Number(n) => Ok(Some(n.to_string())),
        Value::Bool(b) => Ok(Some(b.to_string())),
        _ => Err(D::Error::custom("default must be a string, number, or boolean")),
    }
}

/// Custom deserializer for commands that handles both single values and arrays
fn deserialize_commands<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    use serde::de::Error;
    use serde_yaml::Value;

    match Value::deserialize(deserializer)? {
        // Single command
        Value::String(s) => Ok(vec![s]),
        // Array of commands
        Value::Sequence(seq) => seq
            .into_iter()
            .map(|item| match item {
                Value::String(s) => Ok(s),
                _ => Err(D::Error::custom("each run command must be a string")),
            })
            .collect(),
        // Null or not present
        Value::Null => Ok(Vec::new()),
        _ => Err(D::Error::custom("run must be a string or array")),
    }
}
