//! Environment argument declarations
//!
//! Each argument is resolved exactly once, when it is declared, so every
//! target observes the same value.

use crate::envarg::{ArgSources, ValueSource};
use crate::error::{EnvArgError, EnvArgResult};
use std::collections::HashMap;
use tracing::debug;

/// Declaration of an environment argument, before resolution
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EnvArgSpec {
    pub name: String,
    pub default: Option<String>,
    pub description: Option<String>,
    pub sensitive: bool,
}

impl EnvArgSpec {
    pub fn new(name: impl Into<String>) -> Self {
        EnvArgSpec {
            name: name.into(),
            ..Self::default()
        }
    }
}

/// A declared and resolved environment argument
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnvArg {
    pub name: String,
    pub default: Option<String>,
    pub description: Option<String>,
    pub sensitive: bool,

    /// Value computed at declaration time; `None` when no source had one
    pub value: Option<String>,

    /// Source of `value`
    pub source: Option<ValueSource>,
}

impl EnvArg {
    /// Interpret the value as a boolean (`true`, case-insensitive)
    pub fn as_bool(&self) -> bool {
        self.value
            .as_deref()
            .map(|v| v.eq_ignore_ascii_case("true"))
            .unwrap_or(false)
    }

    /// Interpret the value as a non-negative decimal integer
    pub fn as_int(&self) -> EnvArgResult<Option<u64>> {
        match self.value.as_deref() {
            None => Ok(None),
            Some(v) if !v.is_empty() && v.chars().all(|c| c.is_ascii_digit()) => {
                v.parse().map(Some).map_err(|_| self.invalid_integer(v))
            }
            Some(v) => Err(self.invalid_integer(v)),
        }
    }

    fn invalid_integer(&self, value: &str) -> EnvArgError {
        EnvArgError::InvalidInteger {
            name: self.name.clone(),
            value: value.to_string(),
        }
    }
}

/// Declared environment arguments, in declaration order
#[derive(Debug, Default)]
pub struct EnvArgs {
    args: Vec<EnvArg>,
    index: HashMap<String, usize>,
}

impl EnvArgs {
    pub fn new() -> Self {
        Self::default()
    }

    /// Declare an argument and resolve its value against `sources`
    pub fn declare(&mut self, spec: EnvArgSpec, sources: &ArgSources) -> EnvArgResult<&EnvArg> {
        if self.index.contains_key(&spec.name) {
            return Err(EnvArgError::Duplicate(spec.name));
        }

        let resolved = sources.resolve(&spec.name, spec.default.as_deref());
        debug!(
            name = %spec.name,
            source = ?resolved.as_ref().map(|(_, s)| *s),
            "Resolved environment argument"
        );
        let (value, source) = match resolved {
            Some((value, source)) => (Some(value), Some(source)),
            None => (None, None),
        };

        let i = self.args.len();
        self.index.insert(spec.name.clone(), i);
        self.args.push(EnvArg {
            name: spec.name,
            default: spec.default,
            description: spec.description,
            sensitive: spec.sensitive,
            value,
            source,
        });
        Ok(&self.args[i])
    }

    pub fn get(&self, name: &str) -> Option<&EnvArg> {
        self.index.get(name).map(|&i| &self.args[i])
    }

    /// Resolved value of an argument, if declared and set
    pub fn value(&self, name: &str) -> Option<&str> {
        self.get(name).and_then(|a| a.value.as_deref())
    }

    pub fn iter(&self) -> impl Iterator<Item = &EnvArg> {
        self.args.iter()
    }

    pub fn len(&self) -> usize {
        self.args.len()
    }

    pub fn is_empty(&self) -> bool {
        self.args.is_empty()
    }

    /// Name/value pairs of every argument that has a value
    pub fn values(&self) -> HashMap<String, String> {
        self.args
            .iter()
            .filter_map(|a| a.value.clone().map(|v| (a.name.clone(), v)))
            .collect()
    }
}
