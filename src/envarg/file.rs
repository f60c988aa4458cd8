//! Envargs properties files
//!
//! Simple `KEY = VALUE` files supplying base values for environment
//! arguments:
//!
//! ```text
//! # Some comment
//! KEY1 = VALUE1
//! KEY2=VALUE2
//! KEY3 = "VALUE3"
//! ```

use crate::error::{ConfigError, ConfigResult};
use std::fs;
use std::path::Path;

/// Parse properties file contents into key/value pairs, in file order
pub fn parse_envargs(contents: &str) -> Vec<(String, String)> {
    contents
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .map(|line| {
            let (key, value) = line.split_once('=').unwrap_or((line, ""));
            let value = value.trim();
            let value = value.strip_prefix('"').unwrap_or(value);
            let value = value.strip_suffix('"').unwrap_or(value);
            (key.trim().to_string(), value.to_string())
        })
        .collect()
}

/// Read an envargs file.
///
/// A missing file yields `Ok(None)` so callers can warn and carry on.
pub fn read_envargs_file(path: &Path) -> ConfigResult<Option<Vec<(String, String)>>> {
    if !path.is_file() {
        return Ok(None);
    }

    let contents = fs::read_to_string(path).map_err(|e| ConfigError::EnvFile {
        path: path.to_path_buf(),
        error: e.to_string(),
    })?;

    Ok(Some(parse_envargs(&contents)))
}
