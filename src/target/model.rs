//! Target definitions
//!
//! A target is a named unit of work with an ordered list of dependency names
//! and an action. Targets are immutable once registered.

use std::fmt;

/// Group used for targets declared without one
pub const UNGROUPED: &str = "<ungrouped>";

/// Group holding the built-in targets
pub const BUILTIN_GROUP: &str = "<builtin>";

/// Description shown for targets declared without one
pub const NO_DESCRIPTION: &str = "<no description>";

/// A unit of work invoked with no arguments.
///
/// Any error returned is captured by the engine as the failure cause of the
/// target; the engine never retries or interprets it.
pub trait Action {
    fn invoke(&self) -> anyhow::Result<()>;
}

impl<F> Action for F
where
    F: Fn() -> anyhow::Result<()>,
{
    fn invoke(&self) -> anyhow::Result<()> {
        self()
    }
}

/// Registered target
pub struct Target {
    /// Unique name
    pub name: String,

    /// Human-readable description
    pub description: Option<String>,

    /// Listing group
    pub group: String,

    /// Names of targets that must run first, in declared order
    pub dependencies: Vec<String>,

    /// Phony targets do not use environment arguments
    pub phony: bool,

    action: Box<dyn Action>,
}

impl Target {
    /// Create a target whose action is a closure
    pub fn new<F>(name: impl Into<String>, action: F) -> Self
    where
        F: Fn() -> anyhow::Result<()> + 'static,
    {
        Self::from_action(name, action)
    }

    /// Create a target from any `Action` implementation
    pub fn from_action(name: impl Into<String>, action: impl Action + 'static) -> Self {
        Target {
            name: name.into(),
            description: None,
            group: UNGROUPED.to_string(),
            dependencies: Vec::new(),
            phony: false,
            action: Box::new(action),
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn with_group(mut self, group: impl Into<String>) -> Self {
        self.group = group.into();
        self
    }

    pub fn with_dependencies<I, S>(mut self, dependencies: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.dependencies = dependencies.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_phony(mut self, phony: bool) -> Self {
        self.phony = phony;
        self
    }

    /// Description for listings
    pub fn description_or_default(&self) -> &str {
        self.description.as_deref().unwrap_or(NO_DESCRIPTION)
    }

    /// Run the target's action
    pub fn invoke(&self) -> anyhow::Result<()> {
        self.action.invoke()
    }
}

impl fmt::Debug for Target {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Target")
            .field("name", &self.name)
            .field("description", &self.description)
            .field("group", &self.group)
            .field("dependencies", &self.dependencies)
            .field("phony", &self.phony)
            .finish_non_exhaustive()
    }
}
