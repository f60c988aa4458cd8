//! Error types for Molt

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for Molt operations
pub type Result<T> = std::result::Result<T, MoltError>;

/// Main error type for Molt
#[derive(Error, Debug)]
pub enum MoltError {
    /// Target registration and resolution errors
    #[error(transparent)]
    Target(#[from] TargetError),

    /// Target execution errors
    #[error(transparent)]
    Execution(#[from] ExecutionError),

    /// Environment argument errors
    #[error("Environment argument error: {0}")]
    EnvArg(#[from] EnvArgError),

    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// I/O errors
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// YAML parsing errors
    #[error("YAML parsing error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// Rejected command line
    #[error("Invalid command line: {0}")]
    Usage(String),
}

impl MoltError {
    /// Process exit code for this error
    pub fn exit_code(&self) -> i32 {
        match self {
            MoltError::Target(TargetError::Unknown(_)) => 2,
            MoltError::Target(TargetError::Cycle(_)) => 3,
            MoltError::Target(TargetError::Duplicate(_)) => 4,
            _ => 1,
        }
    }
}

/// Errors raised while registering or resolving targets
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TargetError {
    #[error("Target '{0}' is already defined")]
    Duplicate(String),

    #[error("Target '{0}' not found")]
    Unknown(String),

    /// Cycle path, starting and ending at the same target
    #[error("Circular dependency detected: {}", .0.join(" -> "))]
    Cycle(Vec<String>),
}

/// Target execution errors
#[derive(Error, Debug)]
pub enum ExecutionError {
    #[error("Target '{target}' failed: {cause:#}")]
    ActionFailure {
        target: String,
        cause: anyhow::Error,
    },

    #[error("Command failed with exit code {code:?}")]
    CommandFailed { code: Option<i32>, stderr: String },

    #[error("Failed to spawn '{program}': {error}")]
    Spawn { program: String, error: io::Error },
}

/// Environment argument declaration errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum EnvArgError {
    #[error("Environment argument '{0}' is already declared")]
    Duplicate(String),

    #[error("Invalid integer for '{name}': {value}")]
    InvalidInteger { name: String, value: String },
}

/// Configuration parsing and validation errors
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to find build file (searched: {0})")]
    NotFound(String),

    #[error("Invalid configuration: {0}")]
    Invalid(String),

    #[error("Cannot find {0} in configuration")]
    MissingKey(String),

    #[error("Environment '{0}' is not defined in configuration")]
    MissingEnvironment(String),

    #[error("Environment inheritance loop: {0}")]
    InheritanceLoop(String),

    #[error("Failed to read envargs file '{path}': {error}")]
    EnvFile { path: PathBuf, error: String },
}

/// Specialized result type for target registry and resolver operations
pub type TargetResult<T> = std::result::Result<T, TargetError>;

/// Specialized result type for configuration operations
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;

/// Specialized result type for execution operations
pub type ExecutionResult<T> = std::result::Result<T, ExecutionError>;

/// Specialized result type for environment argument operations
pub type EnvArgResult<T> = std::result::Result<T, EnvArgError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cycle_message_shows_full_path() {
        let err = TargetError::Cycle(vec!["a".into(), "b".into(), "c".into(), "a".into()]);
        assert_eq!(err.to_string(), "Circular dependency detected: a -> b -> c -> a");
    }

    #[test]
    fn test_exit_codes() {
        assert_eq!(MoltError::from(TargetError::Unknown("x".into())).exit_code(), 2);
        assert_eq!(MoltError::from(TargetError::Cycle(vec![])).exit_code(), 3);
        assert_eq!(MoltError::from(TargetError::Duplicate("x".into())).exit_code(), 4);

        let failure = ExecutionError::ActionFailure {
            target: "build".into(),
            cause: anyhow::anyhow!("boom"),
        };
        assert_eq!(MoltError::from(failure).exit_code(), 1);
    }
}
