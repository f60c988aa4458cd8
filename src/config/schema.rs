//! Build file validation
//!
//! Structural checks only. Dependency names are not checked here; they are
//! validated when a run actually reaches them.

use crate::config::types::{BuildFile, TargetConfig};
use crate::error::{ConfigError, ConfigResult};

/// Validate a complete build file
pub fn validate_config(config: &BuildFile) -> ConfigResult<()> {
    for name in config.envargs.keys() {
        validate_name("environment argument", name)?;
        if name.contains('=') {
            return Err(ConfigError::Invalid(format!(
                "environment argument '{}' must not contain '='",
                name
            )));
        }
    }

    for (name, target) in &config.targets {
        validate_target(name, target)?;
    }

    if let Some(interpreter) = &config.interpreter {
        if interpreter.is_empty() {
            return Err(ConfigError::Invalid("interpreter must not be empty".to_string()));
        }
    }

    Ok(())
}

/// Validate a single target
pub fn validate_target(name: &str, target: &TargetConfig) -> ConfigResult<()> {
    validate_name("target", name)?;

    if target.run.is_empty() && target.depends.is_empty() {
        return Err(ConfigError::Invalid(format!(
            "target '{}' has nothing to run and no dependencies",
            name
        )));
    }

    for dependency in &target.depends {
        validate_name("dependency", dependency)?;
    }

    Ok(())
}

fn validate_name(kind: &str, name: &str) -> ConfigResult<()> {
    if name.is_empty() {
        return Err(ConfigError::Invalid(format!("{} name must not be empty", kind)));
    }
    if name.chars().any(char::is_whitespace) {
        return Err(ConfigError::Invalid(format!(
            "{} name '{}' must not contain whitespace",
            kind, name
        )));
    }
    Ok(())
}
