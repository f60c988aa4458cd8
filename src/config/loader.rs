//! Build file registration
//!
//! Turns a parsed `BuildFile` into environment arguments and targets on an
//! `Orchestrator`. Each target's action runs its commands with the shell
//! helper.

use crate::config::types::BuildFile;
use crate::config::values::{flatten_scalars, ConfigValues, INHERIT_KEY};
use crate::envarg::EnvArgSpec;
use crate::error::Result;
use crate::orchestrator::Orchestrator;
use crate::runner::{interpolate_with, shell, Context, ShellOptions};
use crate::target::{Action, Target, UNGROUPED};
use crate::ui::Verbosity;
use anyhow::Context as _;
use serde_yaml::Value;
use std::collections::{HashMap, HashSet};
use std::env;
use std::path::Path;
use std::rc::Rc;
use tracing::debug;

/// Argument selecting the environment section
pub const ENV_ARG: &str = "ENV";

/// Prefix for environment section values in interpolation
pub const CONFIG_PREFIX: &str = "config";

/// Action running a target's shell commands in order
pub struct ShellAction {
    commands: Vec<String>,
    sensitive: bool,
    ctx: Rc<Context>,
}

impl ShellAction {
    pub fn new(commands: Vec<String>, sensitive: bool, ctx: Rc<Context>) -> Self {
        ShellAction {
            commands,
            sensitive,
            ctx,
        }
    }

    pub fn commands(&self) -> &[String] {
        &self.commands
    }
}

impl Action for ShellAction {
    fn invoke(&self) -> anyhow::Result<()> {
        let options = ShellOptions {
            piped: false,
            sensitive: self.sensitive,
        };

        for (index, command) in self.commands.iter().enumerate() {
            shell(command, options, &self.ctx).with_context(|| {
                if self.sensitive {
                    format!("command {} failed", index + 1)
                } else {
                    format!("command `{}` failed", command.trim())
                }
            })?;
        }
        Ok(())
    }
}

/// Declare the build file's arguments and register its targets.
///
/// Relative paths in the file are resolved against `base_dir`, which is also
/// the working directory of every command.
pub fn register_build_file(
    molt: &mut Orchestrator,
    file: &BuildFile,
    base_dir: &Path,
    verbosity: Verbosity,
) -> Result<()> {
    if let Some(envargs_file) = &file.envargs_file {
        molt.envargs_file(base_dir.join(envargs_file))?;
    }

    for (name, config) in &file.envargs {
        molt.declare(EnvArgSpec {
            name: name.clone(),
            default: config.default.clone(),
            description: config.description.clone(),
            sensitive: config.sensitive,
        })?;
    }

    let mut config_vars = HashMap::new();
    if let Some(environments) = &file.environments {
        if molt.env_args().get(ENV_ARG).is_none() {
            molt.envarg(ENV_ARG)
                .description("build environment, e.g. dev, test, prod")
                .declare()?;
        }

        match molt.env_args().value(ENV_ARG) {
            Some(env) => {
                let values = ConfigValues::new(Value::Mapping(environments.clone()));
                let section = values.env_config_in(&[], env, INHERIT_KEY)?;
                debug!(env, keys = section.len(), "Selected environment section");
                config_vars = flatten_scalars(CONFIG_PREFIX, &section);
            }
            None => debug!("No environment selected"),
        }
    }

    // Sensitive values stay out of command text; the shell expands them
    // from the exported environment.
    let exported = molt.env_args().values();
    let hidden: HashSet<String> = molt
        .env_args()
        .iter()
        .filter(|arg| arg.sensitive)
        .map(|arg| arg.name.clone())
        .collect();
    let mut vars: HashMap<String, String> = exported
        .iter()
        .filter(|(name, _)| !hidden.contains(*name))
        .map(|(name, value)| (name.clone(), value.clone()))
        .collect();
    vars.extend(config_vars);
    let lookup = |name: &str| {
        if hidden.contains(name) {
            None
        } else {
            vars.get(name).cloned().or_else(|| env::var(name).ok())
        }
    };

    let ctx = Rc::new(
        Context::new()
            .with_working_dir(base_dir.to_path_buf())
            .with_interpreter(file.interpreter.clone().unwrap_or_default())
            .with_vars(exported)
            .with_verbosity(verbosity),
    );

    for (name, config) in &file.targets {
        let commands = config
            .run
            .iter()
            .map(|command| interpolate_with(command, lookup))
            .collect();
        let action = ShellAction::new(commands, config.sensitive, Rc::clone(&ctx));

        let mut target = Target::from_action(name.clone(), action)
            .with_group(config.group.clone().unwrap_or_else(|| UNGROUPED.to_string()))
            .with_dependencies(config.depends.clone())
            .with_phony(config.phony);
        if let Some(description) = &config.description {
            target = target.with_description(description.clone());
        }
        molt.register(target)?;
    }

    Ok(())
}
