//! Configuration values
//!
//! A YAML value tree with key-path lookup and per-environment sections.
//! An environment section may name another section to inherit from; keys
//! set closer to the selected environment win.

use crate::error::{ConfigError, ConfigResult, MoltError};
use serde_yaml::{Mapping, Value};
use std::collections::HashMap;
use std::fs;
use std::path::Path;

/// Default root key holding environment sections
pub const ENVIRONMENTS_ROOT: &str = "Environments";

/// Default key naming the section an environment inherits from
pub const INHERIT_KEY: &str = "Inherit";

/// One step of a key path
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key<'a> {
    Name(&'a str),
    Index(usize),
}

impl<'a> From<&'a str> for Key<'a> {
    fn from(name: &'a str) -> Self {
        Key::Name(name)
    }
}

impl From<usize> for Key<'_> {
    fn from(index: usize) -> Self {
        Key::Index(index)
    }
}

fn describe(keys: &[Key<'_>]) -> String {
    keys.iter()
        .map(|k| match k {
            Key::Name(name) => name.to_string(),
            Key::Index(i) => i.to_string(),
        })
        .collect::<Vec<_>>()
        .join("->")
}

/// Loaded configuration tree
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ConfigValues {
    root: Value,
}

impl ConfigValues {
    pub fn new(root: Value) -> Self {
        ConfigValues { root }
    }

    /// Load configuration from a YAML file
    pub fn load(path: &Path) -> Result<Self, MoltError> {
        let contents = fs::read_to_string(path).map_err(|e| {
            ConfigError::Invalid(format!("Config {} not readable: {}", path.display(), e))
        })?;
        Ok(ConfigValues::new(serde_yaml::from_str(&contents)?))
    }

    pub fn root(&self) -> &Value {
        &self.root
    }

    /// Walk mappings by name and sequences by index
    pub fn get_path(&self, keys: &[Key<'_>]) -> Option<&Value> {
        keys.iter().try_fold(&self.root, |value, key| match (value, key) {
            (Value::Mapping(map), Key::Name(name)) => map.get(*name),
            (Value::Sequence(seq), Key::Index(i)) => seq.get(*i),
            _ => None,
        })
    }

    /// Like `get_path`, failing when the path is missing
    pub fn require_path(&self, keys: &[Key<'_>]) -> ConfigResult<&Value> {
        self.get_path(keys)
            .ok_or_else(|| ConfigError::MissingKey(describe(keys)))
    }

    /// Environment section under the default root, with inheritance applied
    pub fn env_config(&self, env: &str) -> ConfigResult<Mapping> {
        self.env_config_in(&[Key::Name(ENVIRONMENTS_ROOT)], env, INHERIT_KEY)
    }

    /// Environment section under `root`, following `inherit` links.
    ///
    /// The inherit key itself is removed from the result.
    pub fn env_config_in(&self, root: &[Key<'_>], env: &str, inherit: &str) -> ConfigResult<Mapping> {
        let sections = self.get_path(root).and_then(Value::as_mapping);
        let mut merged = Mapping::new();
        let mut chain: Vec<String> = Vec::new();
        let mut next = Some(env.to_string());

        while let Some(name) = next.take() {
            if chain.contains(&name) {
                chain.push(name);
                return Err(ConfigError::InheritanceLoop(chain.join(" -> ")));
            }

            let section = sections
                .and_then(|s| s.get(name.as_str()))
                .and_then(Value::as_mapping)
                .ok_or_else(|| ConfigError::MissingEnvironment(name.clone()))?;

            for (key, value) in section {
                if key.as_str() == Some(inherit) {
                    next = value.as_str().map(String::from);
                } else if !merged.contains_key(key) {
                    merged.insert(key.clone(), value.clone());
                }
            }
            chain.push(name);
        }

        Ok(merged)
    }
}

/// Flatten scalar leaves of a mapping into `prefix.key.subkey` entries
pub fn flatten_scalars(prefix: &str, mapping: &Mapping) -> HashMap<String, String> {
    let mut out = HashMap::new();
    flatten_into(prefix, mapping, &mut out);
    out
}

fn flatten_into(prefix: &str, mapping: &Mapping, out: &mut HashMap<String, String>) {
    for (key, value) in mapping {
        let key = match key {
            Value::String(s) => s.clone(),
            Value::Number(n) => n.to_string(),
            Value::Bool(b) => b.to_string(),
            _ => continue,
        };
        let path = if prefix.is_empty() {
            key
        } else {
            format!("{}.{}", prefix, key)
        };

        match value {
            Value::String(s) => {
                out.insert(path, s.clone());
            }
            Value::Number(n) => {
                out.insert(path, n.to_string());
            }
            Value::Bool(b) => {
                out.insert(path, b.to_string());
            }
            Value::Mapping(inner) => flatten_into(&path, inner, out),
            _ => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    const CONFIG: &str = r#"
Environments:
  base:
    Region: us-east-1
    Name: base
  dev:
    Inherit: base
    Name: development
    Replicas: 1
  prod:
    Inherit: dev
    Name: production
  loop1:
    Inherit: loop2
  loop2:
    Inherit: loop1
  orphan:
    Inherit: missing
Servers:
  - host: a.example.com
  - host: b.example.com
"#;

    fn values() -> ConfigValues {
        ConfigValues::new(serde_yaml::from_str(CONFIG).unwrap())
    }

    #[test]
    fn test_get_path() {
        let values = values();
        let name = values.get_path(&["Environments".into(), "dev".into(), "Name".into()]);
        assert_eq!(name.and_then(Value::as_str), Some("development"));

        let host = values.get_path(&["Servers".into(), 1.into(), "host".into()]);
        assert_eq!(host.and_then(Value::as_str), Some("b.example.com"));
    }

    #[test]
    fn test_get_path_mismatch() {
        let values = values();
        assert!(values.get_path(&["Servers".into(), "host".into()]).is_none());
        assert!(values.get_path(&["Environments".into(), 0.into()]).is_none());
        assert!(values.get_path(&["Nope".into()]).is_none());
        assert_eq!(values.get_path(&[]), Some(values.root()));
    }

    #[test]
    fn test_require_path() {
        let err = values()
            .require_path(&["Environments".into(), "qa".into(), "Name".into()])
            .unwrap_err();
        assert_eq!(err.to_string(), "Cannot find Environments->qa->Name in configuration");
    }

    #[test]
    fn test_env_config_inheritance() {
        let prod = values().env_config("prod").unwrap();
        let flat = flatten_scalars("", &prod);

        assert_eq!(flat["Name"], "production");
        assert_eq!(flat["Replicas"], "1");
        assert_eq!(flat["Region"], "us-east-1");
        assert!(!flat.contains_key("Inherit"));
    }

    #[test]
    fn test_env_config_loop() {
        let err = values().env_config("loop1").unwrap_err();
        assert!(matches!(err, ConfigError::InheritanceLoop(path) if path == "loop1 -> loop2 -> loop1"));
    }

    #[test]
    fn test_env_config_missing() {
        assert!(matches!(
            values().env_config("qa"),
            Err(ConfigError::MissingEnvironment(name)) if name == "qa"
        ));
        assert!(matches!(
            values().env_config("orphan"),
            Err(ConfigError::MissingEnvironment(name)) if name == "missing"
        ));
    }

    #[test]
    fn test_flatten_nested() {
        let mapping: Mapping = serde_yaml::from_str("a: 1\nb:\n  c: x\n  d: [1, 2]\n").unwrap();
        let flat = flatten_scalars("config", &mapping);
        assert_eq!(flat.len(), 2);
        assert_eq!(flat["config.a"], "1");
        assert_eq!(flat["config.b.c"], "x");
    }

    #[test]
    fn test_load() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("build.yaml");
        fs::write(&path, CONFIG).unwrap();

        assert_eq!(ConfigValues::load(&path).unwrap(), values());
        assert!(ConfigValues::load(&temp_dir.path().join("missing.yaml")).is_err());
    }
}
