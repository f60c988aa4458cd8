//! The orchestrator
//!
//! Owns the target registry and the environment arguments. Targets and
//! arguments are declared on it explicitly, then requested targets are
//! resolved into a plan and executed.
//!
//! ```no_run
//! use molt::{ArgSources, Orchestrator};
//! use molt::ui::Console;
//!
//! # fn main() -> molt::Result<()> {
//! let mut molt = Orchestrator::new(ArgSources::new());
//! let env = molt.envarg("ENV").default("dev").declare()?;
//!
//! molt.target("build")
//!     .description("compile everything")
//!     .action(move || {
//!         println!("building for {:?}", env);
//!         Ok(())
//!     })?;
//! molt.target("deploy").depends(["build"]).action(|| Ok(()))?;
//!
//! let report = molt.run(&["deploy"], &mut Console::default())?;
//! report.into_result()?;
//! # Ok(())
//! # }
//! ```

use crate::envarg::{read_envargs_file, ArgSources, EnvArg, EnvArgSpec, EnvArgs};
use crate::error::{MoltError, Result, TargetResult};
use crate::runner::{self, ExecutionPlan, Reporter, RunReport};
use crate::target::{Action, Target, TargetRegistry, BUILTIN_GROUP, UNGROUPED};
use crate::ui::render_list;
use std::cell::RefCell;
use std::path::Path;
use std::rc::Rc;
use tracing::{debug, warn};

/// Name of the built-in listing target
pub const LIST_TARGET: &str = "list";

/// Registry of targets and environment arguments for one invocation
pub struct Orchestrator {
    registry: TargetRegistry,
    env_args: EnvArgs,
    sources: ArgSources,

    /// Listing printed by the built-in `list` target, refreshed before each run
    listing: Rc<RefCell<String>>,
}

impl Orchestrator {
    /// Create an orchestrator with the built-in `list` target registered
    pub fn new(sources: ArgSources) -> Self {
        let listing = Rc::new(RefCell::new(String::new()));

        let shown = Rc::clone(&listing);
        let list = Target::new(LIST_TARGET, move || {
            print!("{}", shown.borrow());
            Ok(())
        })
        .with_description("lists all available targets")
        .with_group(BUILTIN_GROUP)
        .with_phony(true);

        Orchestrator {
            registry: TargetRegistry::with_target(list),
            env_args: EnvArgs::new(),
            sources,
            listing,
        }
    }

    /// Start declaring a target
    pub fn target(&mut self, name: impl Into<String>) -> TargetBuilder<'_> {
        TargetBuilder {
            orchestrator: self,
            name: name.into(),
            description: None,
            group: None,
            depends: Vec::new(),
            phony: false,
        }
    }

    /// Register a fully built target
    pub fn register(&mut self, target: Target) -> TargetResult<()> {
        debug!(target_name = %target.name, "Registering target");
        self.registry.register(target)
    }

    /// Start declaring an environment argument
    pub fn envarg(&mut self, name: impl Into<String>) -> EnvArgBuilder<'_> {
        EnvArgBuilder {
            orchestrator: self,
            spec: EnvArgSpec::new(name),
        }
    }

    /// Declare an environment argument, resolving its value now
    pub fn declare(&mut self, spec: EnvArgSpec) -> Result<&EnvArg> {
        Ok(self.env_args.declare(spec, &self.sources)?)
    }

    /// Load base argument values from a properties file.
    ///
    /// Values sit below the process environment in precedence and only
    /// affect arguments declared afterwards. A missing file is a warning.
    pub fn envargs_file(&mut self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        match read_envargs_file(path)? {
            Some(values) => {
                debug!(path = %path.display(), count = values.len(), "Loaded envargs file");
                self.sources.add_file_values(values);
            }
            None => warn!("Envargs {} not found", path.display()),
        }
        Ok(())
    }

    pub fn registry(&self) -> &TargetRegistry {
        &self.registry
    }

    pub fn env_args(&self) -> &EnvArgs {
        &self.env_args
    }

    /// Resolve requested targets without running anything
    pub fn plan<S: AsRef<str>>(&self, requested: &[S]) -> TargetResult<ExecutionPlan> {
        runner::resolve(&self.registry, requested)
    }

    /// Listing of targets and arguments, as printed by `list`
    pub fn render_list(&self) -> String {
        render_list(&self.registry, &self.env_args)
    }

    /// Resolve and execute requested targets.
    ///
    /// Resolution errors are returned before any target runs. Action
    /// failures are recorded in the report; use `RunReport::into_result`
    /// to turn them into an error.
    pub fn run<S: AsRef<str>>(
        &self,
        requested: &[S],
        reporter: &mut dyn Reporter,
    ) -> Result<RunReport> {
        let plan = self.plan(requested)?;
        debug!(plan = ?plan.names(), "Resolved execution plan");

        *self.listing.borrow_mut() = self.render_list();
        Ok(runner::execute(&self.registry, &plan, reporter)?)
    }
}

/// Builder for a target declaration
pub struct TargetBuilder<'o> {
    orchestrator: &'o mut Orchestrator,
    name: String,
    description: Option<String>,
    group: Option<String>,
    depends: Vec<String>,
    phony: bool,
}

impl TargetBuilder<'_> {
    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn group(mut self, group: impl Into<String>) -> Self {
        self.group = Some(group.into());
        self
    }

    /// Names of targets this one depends on; they may be declared later
    pub fn depends<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.depends.extend(names.into_iter().map(Into::into));
        self
    }

    /// Mark the target as not using environment arguments
    pub fn phony(mut self) -> Self {
        self.phony = true;
        self
    }

    /// Attach a closure as the action and register the target
    pub fn action<F>(self, action: F) -> Result<()>
    where
        F: Fn() -> anyhow::Result<()> + 'static,
    {
        self.action_from(action)
    }

    /// Attach any `Action` implementation and register the target
    pub fn action_from(self, action: impl Action + 'static) -> Result<()> {
        let mut target = Target::from_action(self.name, action)
            .with_group(self.group.unwrap_or_else(|| UNGROUPED.to_string()))
            .with_dependencies(self.depends)
            .with_phony(self.phony);
        if let Some(description) = self.description {
            target = target.with_description(description);
        }

        self.orchestrator.register(target).map_err(MoltError::from)
    }
}

/// Builder for an environment argument declaration
pub struct EnvArgBuilder<'o> {
    orchestrator: &'o mut Orchestrator,
    spec: EnvArgSpec,
}

impl EnvArgBuilder<'_> {
    pub fn default(mut self, value: impl Into<String>) -> Self {
        self.spec.default = Some(value.into());
        self
    }

    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.spec.description = Some(description.into());
        self
    }

    /// Mask the value wherever it is displayed
    pub fn sensitive(mut self) -> Self {
        self.spec.sensitive = true;
        self
    }

    /// Declare the argument and return its resolved value
    pub fn declare(self) -> Result<Option<String>> {
        let arg = self.orchestrator.declare(self.spec)?;
        Ok(arg.value.clone())
    }

    /// Declare the argument and interpret it as a boolean
    pub fn declare_bool(self) -> Result<bool> {
        let arg = self.orchestrator.declare(self.spec)?;
        Ok(arg.as_bool())
    }

    /// Declare the argument and interpret it as an integer; unset is 0
    pub fn declare_int(self) -> Result<u64> {
        let arg = self.orchestrator.declare(self.spec)?;
        Ok(arg.as_int()?.unwrap_or(0))
    }
}
