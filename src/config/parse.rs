//! Build file parsing and discovery

use crate::config::types::BuildFile;
use crate::error::{ConfigError, ConfigResult, MoltError};
use std::env;
use std::fs;
use std::path::{Path, PathBuf};

/// Default build file names to search for
pub const CONFIG_FILE_NAMES: &[&str] = &["molt.yml", "molt.yaml"];

/// Find the build file by searching current and parent directories
pub fn find_config_file() -> ConfigResult<PathBuf> {
    find_config_file_from(env::current_dir().map_err(|e| {
        ConfigError::Invalid(format!("Failed to get current directory: {}", e))
    })?)
}

/// Find the build file starting from a specific directory
pub fn find_config_file_from(start_dir: PathBuf) -> ConfigResult<PathBuf> {
    let mut searched_paths = Vec::new();

    for dir in start_dir.ancestors() {
        for file_name in CONFIG_FILE_NAMES {
            let config_path = dir.join(file_name);
            if config_path.is_file() {
                return Ok(config_path);
            }
            searched_paths.push(config_path.display().to_string());
        }
    }

    Err(ConfigError::NotFound(searched_paths.join(", ")))
}

/// Parse a build file from a path
pub fn parse_config_file(path: &Path) -> Result<BuildFile, MoltError> {
    let contents = fs::read_to_string(path).map_err(|e| {
        ConfigError::Invalid(format!("Failed to read {}: {}", path.display(), e))
    })?;

    parse_config(&contents)
}

/// Parse a build file from a string
pub fn parse_config(yaml: &str) -> Result<BuildFile, MoltError> {
    Ok(serde_yaml::from_str(yaml)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    const SIMPLE: &str = r#"
targets:
  test:
    run: echo "test"
"#;

    #[test]
    fn test_parse_simple_config() {
        let config = parse_config(SIMPLE).unwrap();
        assert_eq!(config.targets.len(), 1);
        assert!(config.targets.contains_key("test"));
    }

    #[test]
    fn test_find_config_in_current_dir() {
        let temp_dir = TempDir::new().unwrap();
        let config_path = temp_dir.path().join("molt.yml");
        fs::write(&config_path, SIMPLE).unwrap();

        let found = find_config_file_from(temp_dir.path().to_path_buf()).unwrap();
        assert_eq!(found, config_path);
    }

    #[test]
    fn test_find_yaml_extension() {
        let temp_dir = TempDir::new().unwrap();
        let config_path = temp_dir.path().join("molt.yaml");
        fs::write(&config_path, SIMPLE).unwrap();

        let found = find_config_file_from(temp_dir.path().to_path_buf()).unwrap();
        assert_eq!(found, config_path);
    }

    #[test]
    fn test_find_config_in_parent_dir() {
        let temp_dir = TempDir::new().unwrap();
        let config_path = temp_dir.path().join("molt.yml");
        let sub_dir = temp_dir.path().join("subdir");

        fs::create_dir(&sub_dir).unwrap();
        fs::write(&config_path, SIMPLE).unwrap();

        let found = find_config_file_from(sub_dir).unwrap();
        assert_eq!(found, config_path);
    }

    #[test]
    fn test_config_not_found() {
        let temp_dir = TempDir::new().unwrap();
        let result = find_config_file_from(temp_dir.path().to_path_buf());
        assert!(matches!(result, Err(ConfigError::NotFound(_))));
    }

    #[test]
    fn test_parse_config_with_name_and_usage() {
        let yaml = r#"
name: my-app
usage: My application
interpreter: [bash, -c]
targets:
  hello:
    run: echo "hello"
"#;
        let config = parse_config(yaml).unwrap();
        assert_eq!(config.name, Some("my-app".to_string()));
        assert_eq!(config.usage, Some("My application".to_string()));
        assert_eq!(
            config.interpreter,
            Some(vec!["bash".to_string(), "-c".to_string()])
        );
    }

    #[test]
    fn test_parse_invalid_yaml() {
        let result = parse_config("targets: [unclosed");
        assert!(matches!(result, Err(MoltError::Yaml(_))));
    }
}
