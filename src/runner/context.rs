//! Shell execution context
//!
//! Settings shared by every shell command a build file target runs.

use crate::ui::Verbosity;
use std::collections::HashMap;
use std::env;
use std::path::PathBuf;

/// Context for running shell commands
#[derive(Debug, Clone)]
pub struct Context {
    /// Working directory for commands
    pub working_dir: PathBuf,

    /// Interpreter and its arguments (e.g., ["sh", "-c"])
    pub interpreter: Vec<String>,

    /// Variables exported to commands
    pub vars: HashMap<String, String>,

    /// Verbosity level
    pub verbosity: Verbosity,
}

impl Context {
    /// Create a new context with default settings
    pub fn new() -> Self {
        Context {
            working_dir: env::current_dir().unwrap_or_else(|_| PathBuf::from(".")),
            interpreter: vec!["sh".to_string(), "-c".to_string()],
            vars: HashMap::new(),
            verbosity: Verbosity::Normal,
        }
    }

    /// Create a context with a specific working directory
    pub fn with_working_dir(mut self, dir: PathBuf) -> Self {
        self.working_dir = dir;
        self
    }

    /// Set the interpreter; an empty list keeps the default
    pub fn with_interpreter(mut self, interpreter: Vec<String>) -> Self {
        if !interpreter.is_empty() {
            self.interpreter = interpreter;
        }
        self
    }

    /// Set variables
    pub fn with_vars(mut self, vars: HashMap<String, String>) -> Self {
        self.vars = vars;
        self
    }

    /// Set verbosity level
    pub fn with_verbosity(mut self, verbosity: Verbosity) -> Self {
        self.verbosity = verbosity;
        self
    }
}

impl Default for Context {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_context_new() {
        let ctx = Context::new();
        assert_eq!(ctx.verbosity, Verbosity::Normal);
        assert_eq!(ctx.interpreter, vec!["sh", "-c"]);
        assert!(ctx.vars.is_empty());
    }

    #[test]
    fn test_context_with_vars() {
        let mut vars = HashMap::new();
        vars.insert("key".to_string(), "value".to_string());

        let ctx = Context::new().with_vars(vars);
        assert_eq!(ctx.vars.get("key").map(String::as_str), Some("value"));
    }

    #[test]
    fn test_with_interpreter() {
        let ctx = Context::new().with_interpreter(vec!["bash".to_string(), "-c".to_string()]);
        assert_eq!(ctx.interpreter, vec!["bash", "-c"]);

        let ctx = Context::new().with_interpreter(Vec::new());
        assert_eq!(ctx.interpreter, vec!["sh", "-c"]);
    }
}
