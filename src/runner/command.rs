//! Shell command execution

use crate::error::{ExecutionError, ExecutionResult};
use crate::runner::Context;
use crate::ui::Verbosity;
use std::process::{Command as StdCommand, Stdio};

/// How a shell command is run
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ShellOptions {
    /// Capture and return stdout instead of printing it
    pub piped: bool,

    /// Hide the command text from logs
    pub sensitive: bool,
}

impl ShellOptions {
    pub fn piped() -> Self {
        ShellOptions {
            piped: true,
            ..Self::default()
        }
    }
}

/// Strip leading whitespace from each line of a block command
pub fn dedent(command: &str) -> String {
    command
        .split('\n')
        .map(str::trim_start)
        .collect::<Vec<_>>()
        .join("\n")
}

/// Run a command through the context's interpreter.
///
/// Returns captured stdout when piped. A non-zero exit status fails with
/// `ExecutionError::CommandFailed`.
pub fn shell(command: &str, options: ShellOptions, ctx: &Context) -> ExecutionResult<Option<String>> {
    let command_str = dedent(command);

    if ctx.verbosity >= Verbosity::Normal {
        if options.sensitive {
            eprintln!("+ Shell");
        } else {
            eprintln!("+ Shell: {}", command_str);
        }
    }

    let (program, args) = match ctx.interpreter.split_first() {
        Some((program, args)) => (program.as_str(), args),
        None => ("sh", &[] as &[String]),
    };

    let mut cmd = StdCommand::new(program);
    cmd.args(args)
        .arg(&command_str)
        .current_dir(&ctx.working_dir)
        .stdin(Stdio::inherit())
        .envs(&ctx.vars);

    if options.piped {
        cmd.stdout(Stdio::piped()).stderr(Stdio::piped());
    } else {
        cmd.stdout(Stdio::inherit()).stderr(Stdio::inherit());
    }

    let output = cmd.output().map_err(|error| ExecutionError::Spawn {
        program: program.to_string(),
        error,
    })?;

    if !output.status.success() {
        return Err(ExecutionError::CommandFailed {
            code: output.status.code(),
            stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
        });
    }

    if options.piped {
        Ok(Some(String::from_utf8_lossy(&output.stdout).into_owned()))
    } else {
        Ok(None)
    }
}
