//! Sequential execution of a resolved plan
//!
//! Each target moves `Pending -> Running -> Succeeded | Failed`. Once a
//! target fails, every remaining target is `Skipped` without running its
//! action. Completed side effects are never rolled back.

use crate::error::{ExecutionError, ExecutionResult, TargetResult};
use crate::runner::ExecutionPlan;
use crate::target::{Target, TargetRegistry};
use tracing::debug;

/// Final state of one target in a run
#[derive(Debug)]
pub enum RunStatus {
    Succeeded,
    Failed(anyhow::Error),
    Skipped,
}

impl RunStatus {
    pub fn is_succeeded(&self) -> bool {
        matches!(self, RunStatus::Succeeded)
    }

    pub fn is_failed(&self) -> bool {
        matches!(self, RunStatus::Failed(_))
    }

    pub fn is_skipped(&self) -> bool {
        matches!(self, RunStatus::Skipped)
    }
}

/// Observer of execution boundaries
pub trait Reporter {
    /// Called right before a target's action is invoked
    fn target_starting(&mut self, target: &Target);

    /// Called once a target has succeeded or failed
    fn target_finished(&mut self, _target: &Target, _status: &RunStatus) {}

    /// Called for targets skipped after an earlier failure
    fn target_skipped(&mut self, _target: &Target) {}
}

/// Per-target outcome of a run, in plan order
#[derive(Debug, Default)]
pub struct RunReport {
    entries: Vec<(String, RunStatus)>,
}

impl RunReport {
    /// True when every target in the plan succeeded
    pub fn is_success(&self) -> bool {
        self.entries.iter().all(|(_, status)| status.is_succeeded())
    }

    pub fn status(&self, name: &str) -> Option<&RunStatus> {
        self.entries.iter().find(|(n, _)| n == name).map(|(_, s)| s)
    }

    pub fn entries(&self) -> &[(String, RunStatus)] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Names of targets with the given status
    pub fn names_where(&self, pred: impl Fn(&RunStatus) -> bool) -> Vec<&str> {
        self.entries
            .iter()
            .filter(|(_, s)| pred(s))
            .map(|(n, _)| n.as_str())
            .collect()
    }

    /// Convert a failed run into the failure of its failing target
    pub fn into_result(self) -> ExecutionResult<()> {
        for (target, status) in self.entries {
            if let RunStatus::Failed(cause) = status {
                return Err(ExecutionError::ActionFailure { target, cause });
            }
        }
        Ok(())
    }
}

/// Run every target of `plan` in order.
///
/// Only fails when a plan entry is not registered; action failures are
/// reported through the returned `RunReport`.
pub fn execute(
    registry: &TargetRegistry,
    plan: &ExecutionPlan,
    reporter: &mut dyn Reporter,
) -> TargetResult<RunReport> {
    let targets = plan
        .iter()
        .map(|name| registry.get(name))
        .collect::<TargetResult<Vec<_>>>()?;

    let mut report = RunReport::default();
    let mut failed = false;

    for target in targets {
        if failed {
            debug!(target_name = %target.name, "Skipping target");
            reporter.target_skipped(target);
            report.entries.push((target.name.clone(), RunStatus::Skipped));
            continue;
        }

        reporter.target_starting(target);
        let status = match target.invoke() {
            Ok(()) => RunStatus::Succeeded,
            Err(cause) => {
                failed = true;
                RunStatus::Failed(cause)
            }
        };
        reporter.target_finished(target, &status);
        report.entries.push((target.name.clone(), status));
    }

    Ok(report)
}
