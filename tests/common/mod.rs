//! Common test utilities

#![allow(dead_code)]

use assert_cmd::Command;
use molt::runner::Reporter;
use molt::target::Target;
use molt::{ArgSources, EnvLookup, Orchestrator};
use std::collections::HashMap;
use std::fs;
use std::path::PathBuf;
use tempfile::TempDir;

/// Create a temporary directory with a molt.yml file
pub fn create_test_config(content: &str) -> (TempDir, PathBuf) {
    let temp_dir = TempDir::new().unwrap();
    let config_path = temp_dir.path().join("molt.yml");
    fs::write(&config_path, content).unwrap();
    (temp_dir, config_path)
}

/// Create a test config with an empty subdirectory next to it
pub fn create_test_config_in_subdir(content: &str) -> (TempDir, PathBuf, PathBuf) {
    let (temp_dir, config_path) = create_test_config(content);
    let sub_dir = temp_dir.path().join("subdir");
    fs::create_dir(&sub_dir).unwrap();
    (temp_dir, config_path, sub_dir)
}

/// The molt binary, run in `dir` with a predictable environment
pub fn molt_in(dir: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("molt").unwrap();
    cmd.current_dir(dir.path())
        .env("NO_COLOR", "1")
        .env_remove("ENV")
        .env_remove("MOLT_LOG");
    cmd
}

/// Orchestrator reading a fixed environment instead of the process one
pub fn orchestrator(env: &[(&str, &str)], overrides: &[(&str, &str)]) -> Orchestrator {
    let env: HashMap<String, String> = env
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();
    Orchestrator::new(
        ArgSources::new()
            .with_env(EnvLookup::Fixed(env))
            .with_overrides(overrides.iter().map(|(k, v)| (k.to_string(), v.to_string()))),
    )
}

/// Reporter recording which targets were started
#[derive(Default)]
pub struct Recorder {
    pub started: Vec<String>,
}

impl Reporter for Recorder {
    fn target_starting(&mut self, target: &Target) {
        self.started.push(target.name.clone());
    }
}
