//! Helpers for target actions

use crate::error::ExecutionResult;
use crate::runner::{shell, Context, ShellOptions};
use sha2::{Digest, Sha256};
use std::fs;
use std::io;
use std::path::Path;

/// Commit hash of `HEAD` in the context's working directory
pub fn git_hash(ctx: &Context) -> ExecutionResult<String> {
    let output = shell("git rev-parse --verify HEAD", ShellOptions::piped(), ctx)?;
    Ok(output.unwrap_or_default().trim().to_string())
}

/// Combined SHA-256 checksum of file contents, hex encoded.
///
/// Paths that are not regular files are skipped.
pub fn checksum<P: AsRef<Path>>(files: &[P]) -> io::Result<String> {
    let mut hasher = Sha256::new();
    for file in files {
        let path = file.as_ref();
        if path.is_file() {
            hasher.update(fs::read(path)?);
        }
    }
    Ok(hex::encode(hasher.finalize()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ExecutionError;
    use crate::ui::Verbosity;
    use tempfile::TempDir;

    const HELLO_SHA256: &str = "2cf24dba5fb0a30e26e83b2ac5b9e29e1b161e5c1fa7425e73043362938b9824";

    #[test]
    fn test_checksum_combines_files() {
        let dir = TempDir::new().unwrap();
        let first = dir.path().join("first");
        let second = dir.path().join("second");
        fs::write(&first, "hel").unwrap();
        fs::write(&second, "lo").unwrap();

        assert_eq!(checksum(&[&first, &second]).unwrap(), HELLO_SHA256);
    }

    #[test]
    fn test_checksum_skips_missing_files() {
        let dir = TempDir::new().unwrap();
        let file = dir.path().join("file");
        fs::write(&file, "hello").unwrap();

        let missing = dir.path().join("missing");
        assert_eq!(checksum(&[&file, &missing]).unwrap(), HELLO_SHA256);
        assert_eq!(checksum(&[dir.path()]).unwrap(), checksum::<&Path>(&[]).unwrap());
    }

    #[test]
    fn test_git_hash_outside_repository() {
        let dir = TempDir::new().unwrap();
        let ctx = Context::new()
            .with_working_dir(dir.path().to_path_buf())
            .with_verbosity(Verbosity::Silent);

        let result = git_hash(&ctx);
        assert!(matches!(result, Err(ExecutionError::CommandFailed { .. })));
    }
}
