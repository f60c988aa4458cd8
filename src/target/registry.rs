//! Target registry
//!
//! Append-only store of targets keyed by name, preserving registration order.

use crate::error::{TargetError, TargetResult};
use crate::target::Target;
use std::collections::HashMap;

/// Registry of all declared targets
#[derive(Debug, Default)]
pub struct TargetRegistry {
    targets: Vec<Target>,
    index: HashMap<String, usize>,
}

impl TargetRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry holding a single target
    pub fn with_target(target: Target) -> Self {
        let index = HashMap::from([(target.name.clone(), 0)]);
        TargetRegistry {
            targets: vec![target],
            index,
        }
    }

    /// Insert a target, rejecting duplicate names
    pub fn register(&mut self, target: Target) -> TargetResult<()> {
        if self.index.contains_key(&target.name) {
            return Err(TargetError::Duplicate(target.name));
        }

        self.index.insert(target.name.clone(), self.targets.len());
        self.targets.push(target);
        Ok(())
    }

    /// Look up a target by name
    pub fn get(&self, name: &str) -> TargetResult<&Target> {
        self.index
            .get(name)
            .map(|&i| &self.targets[i])
            .ok_or_else(|| TargetError::Unknown(name.to_string()))
    }

    pub fn contains(&self, name: &str) -> bool {
        self.index.contains_key(name)
    }

    /// All targets in registration order
    pub fn all(&self) -> impl Iterator<Item = &Target> {
        self.targets.iter()
    }

    pub fn len(&self) -> usize {
        self.targets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.targets.is_empty()
    }

    /// Targets grouped for listing.
    ///
    /// Groups are sorted alphabetically (case-insensitive); targets keep
    /// registration order within their group.
    pub fn by_group(&self) -> Vec<(&str, Vec<&Target>)> {
        let mut groups: Vec<(&str, Vec<&Target>)> = Vec::new();

        for target in &self.targets {
            match groups.iter_mut().find(|(g, _)| *g == target.group) {
                Some((_, members)) => members.push(target),
                None => groups.push((target.group.as_str(), vec![target])),
            }
        }

        groups.sort_by(|(a, _), (b, _)| a.to_lowercase().cmp(&b.to_lowercase()).then(a.cmp(b)));
        groups
    }
}
