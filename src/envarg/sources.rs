//! Value sources for environment arguments
//!
//! Precedence, highest first: `--arg` overrides, the process environment,
//! envargs file values, then the declared default.

use std::collections::HashMap;
use std::env;

/// Where environment variables are read from
#[derive(Debug, Clone, Default)]
pub enum EnvLookup {
    /// The real process environment
    #[default]
    Process,

    /// A fixed mapping, used by tests and embedders
    Fixed(HashMap<String, String>),
}

impl EnvLookup {
    pub fn get(&self, name: &str) -> Option<String> {
        match self {
            EnvLookup::Process => env::var(name).ok(),
            EnvLookup::Fixed(vars) => vars.get(name).cloned(),
        }
    }
}

/// Which source produced a resolved value
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValueSource {
    Override,
    Environment,
    File,
    Default,
}

/// All sources consulted when resolving an environment argument
#[derive(Debug, Clone, Default)]
pub struct ArgSources {
    overrides: HashMap<String, String>,
    file_values: HashMap<String, String>,
    env: EnvLookup,
}

impl ArgSources {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add `--arg` overrides; a later value for the same name wins
    pub fn with_overrides<I>(mut self, overrides: I) -> Self
    where
        I: IntoIterator<Item = (String, String)>,
    {
        self.overrides.extend(overrides);
        self
    }

    /// Replace the environment lookup
    pub fn with_env(mut self, env: EnvLookup) -> Self {
        self.env = env;
        self
    }

    /// Add envargs file values; keys already present are kept
    pub fn add_file_values<I>(&mut self, values: I)
    where
        I: IntoIterator<Item = (String, String)>,
    {
        for (key, value) in values {
            self.file_values.entry(key).or_insert(value);
        }
    }

    /// Resolve a value by precedence
    pub fn resolve(&self, name: &str, default: Option<&str>) -> Option<(String, ValueSource)> {
        if let Some(value) = self.overrides.get(name) {
            return Some((value.clone(), ValueSource::Override));
        }
        if let Some(value) = self.env.get(name) {
            return Some((value, ValueSource::Environment));
        }
        if let Some(value) = self.file_values.get(name) {
            return Some((value.clone(), ValueSource::File));
        }
        default.map(|d| (d.to_string(), ValueSource::Default))
    }
}

/// Parse a `NAME=VALUE` override, splitting at the first `=`
pub fn parse_override(s: &str) -> Result<(String, String), String> {
    match s.split_once('=') {
        Some((name, value)) if !name.is_empty() => Ok((name.to_string(), value.to_string())),
        _ => Err(format!("expected NAME=VALUE, got '{}'", s)),
    }
}
