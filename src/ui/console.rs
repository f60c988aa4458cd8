//! Console output for runs
//!
//! All status output goes to stderr so target output on stdout stays clean.

use crate::envarg::EnvArgs;
use crate::runner::{Reporter, RunReport, RunStatus};
use crate::target::Target;
use crate::ui::display_value;
use colored::Colorize;

/// Verbosity levels for output
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Verbosity {
    Silent = 0,
    Quiet = 1,
    Normal = 2,
    Verbose = 3,
}

/// Reporter printing run progress to the terminal
pub struct Console {
    verbosity: Verbosity,

    /// Masked `NAME=VALUE` lines printed before the first non-phony target
    environment: Vec<String>,
    environment_listed: bool,
}

impl Console {
    pub fn new(verbosity: Verbosity) -> Self {
        Console {
            verbosity,
            environment: Vec::new(),
            environment_listed: false,
        }
    }

    /// Snapshot the environment listing from resolved arguments
    pub fn with_environment(mut self, env_args: &EnvArgs) -> Self {
        self.environment = environment_lines(env_args);
        self
    }

    pub fn verbosity(&self) -> Verbosity {
        self.verbosity
    }

    /// Print info message
    pub fn print_info(&self, message: &str) {
        if self.verbosity >= Verbosity::Normal {
            eprintln!("{}", message);
        }
    }

    /// Print debug message (only in verbose mode)
    pub fn print_debug(&self, message: &str) {
        if self.verbosity >= Verbosity::Verbose {
            eprintln!("{}", message.dimmed());
        }
    }

    /// Print the summary of a finished run
    pub fn print_summary(&self, report: &RunReport) {
        let skipped = report.names_where(RunStatus::is_skipped);
        if !skipped.is_empty() {
            self.print_debug(&format!("Skipped targets: {}", skipped.join(", ")));
        }
    }

    fn print_environment(&mut self) {
        if self.environment_listed {
            return;
        }
        self.environment_listed = true;

        if self.verbosity >= Verbosity::Normal {
            eprintln!("environment:");
            for line in &self.environment {
                eprintln!("  {}", line);
            }
            eprintln!();
        }
    }
}

impl Default for Console {
    fn default() -> Self {
        Self::new(Verbosity::Normal)
    }
}

impl Reporter for Console {
    fn target_starting(&mut self, target: &Target) {
        if !target.phony {
            self.print_environment();
        }
        self.print_info(&format!("{} {}", "→ Executing target:".green(), target.name.bold()));
    }

    // Failure causes surface once, through the run's final error.
    fn target_finished(&mut self, target: &Target, status: &RunStatus) {
        match status {
            RunStatus::Failed(_) => self.print_debug(&format!("Target failed: {}", target.name)),
            _ => self.print_debug(&format!("Target completed: {}", target.name)),
        }
    }

    fn target_skipped(&mut self, target: &Target) {
        self.print_debug(&format!("Skipping target '{}'", target.name));
    }
}

/// `NAME=VALUE` lines for every declared argument, sensitive values masked
pub fn environment_lines(env_args: &EnvArgs) -> Vec<String> {
    env_args
        .iter()
        .map(|arg| format!("{}={}", arg.name, display_value(arg)))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::envarg::{ArgSources, EnvArgSpec, EnvLookup};
    use std::collections::HashMap;

    #[test]
    fn test_verbosity_levels() {
        assert!(Verbosity::Verbose > Verbosity::Normal);
        assert!(Verbosity::Normal > Verbosity::Quiet);
        assert!(Verbosity::Quiet > Verbosity::Silent);
    }

    #[test]
    fn test_environment_lines_mask_sensitive() {
        let env: HashMap<String, String> =
            [("TOKEN".to_string(), "hunter2".to_string())].into_iter().collect();
        let sources = ArgSources::new().with_env(EnvLookup::Fixed(env));

        let mut args = EnvArgs::new();
        args.declare(
            EnvArgSpec {
                default: Some("dev".to_string()),
                ..EnvArgSpec::new("ENV")
            },
            &sources,
        )
        .unwrap();
        args.declare(
            EnvArgSpec {
                sensitive: true,
                ..EnvArgSpec::new("TOKEN")
            },
            &sources,
        )
        .unwrap();
        args.declare(EnvArgSpec::new("UNSET"), &sources).unwrap();

        assert_eq!(
            environment_lines(&args),
            vec!["ENV=dev", "TOKEN=**********", "UNSET="]
        );
    }

    #[test]
    fn test_environment_listed_once_for_non_phony() {
        let mut console = Console::new(Verbosity::Silent);
        let phony = Target::new("list", || Ok(())).with_phony(true);
        let real = Target::new("build", || Ok(()));

        console.target_starting(&phony);
        assert!(!console.environment_listed);

        console.target_starting(&real);
        assert!(console.environment_listed);
    }
}
