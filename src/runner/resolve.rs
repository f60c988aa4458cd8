//! Dependency resolution
//!
//! Turns an ordered list of requested target names into a single
//! deduplicated execution plan using a depth-first traversal with
//! three-coloring. Traversal follows the requested order and, within a
//! target, the declared dependency order, so plans are deterministic.

use crate::error::{TargetError, TargetResult};
use crate::target::TargetRegistry;
use std::collections::HashMap;
use tracing::debug;

/// Ordered, duplicate-free list of targets to run, dependencies first
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExecutionPlan {
    order: Vec<String>,
}

impl ExecutionPlan {
    pub fn names(&self) -> &[String] {
        &self.order
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.order.iter().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.order.iter().any(|n| n == name)
    }

    /// Position of a target in the plan
    pub fn position(&self, name: &str) -> Option<usize> {
        self.order.iter().position(|n| n == name)
    }
}

impl IntoIterator for ExecutionPlan {
    type Item = String;
    type IntoIter = std::vec::IntoIter<String>;

    fn into_iter(self) -> Self::IntoIter {
        self.order.into_iter()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Mark {
    Visiting,
    Resolved,
}

/// Resolve requested targets into an execution plan.
///
/// Fails with `TargetError::Unknown` for a requested or depended-upon name
/// that is not registered, and with `TargetError::Cycle` carrying the
/// cycle path when the traversal reaches a target already on its stack.
pub fn resolve<S: AsRef<str>>(
    registry: &TargetRegistry,
    requested: &[S],
) -> TargetResult<ExecutionPlan> {
    let mut resolver = Resolver {
        registry,
        marks: HashMap::new(),
        stack: Vec::new(),
        plan: Vec::new(),
    };

    for name in requested {
        let name = name.as_ref();
        registry.get(name)?;
        resolver.visit(name)?;
    }

    Ok(ExecutionPlan {
        order: resolver.plan,
    })
}

struct Resolver<'a> {
    registry: &'a TargetRegistry,
    marks: HashMap<&'a str, Mark>,
    stack: Vec<&'a str>,
    plan: Vec<String>,
}

impl<'a> Resolver<'a> {
    fn visit(&mut self, name: &str) -> TargetResult<()> {
        let registry = self.registry;
        let target = registry.get(name)?;
        let name = target.name.as_str();

        match self.marks.get(name) {
            Some(Mark::Resolved) => return Ok(()),
            Some(Mark::Visiting) => return Err(TargetError::Cycle(self.cycle_path(name))),
            None => {}
        }

        debug!(target_name = name, "Evaluating target");
        self.marks.insert(name, Mark::Visiting);
        self.stack.push(name);

        for dependency in &target.dependencies {
            self.visit(dependency)?;
        }

        self.stack.pop();
        self.marks.insert(name, Mark::Resolved);
        self.plan.push(name.to_string());
        Ok(())
    }

    /// Stack slice from the first occurrence of `name`, closed back on itself
    fn cycle_path(&self, name: &str) -> Vec<String> {
        let start = self.stack.iter().position(|n| *n == name).unwrap_or(0);
        self.stack[start..]
            .iter()
            .chain(std::iter::once(&name))
            .map(|n| n.to_string())
            .collect()
    }
}
