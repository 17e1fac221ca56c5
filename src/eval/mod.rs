//! Evaluation engine: builds the guard set from configuration and runs
//! every enabled guard over the segmented command, keeping the worst
//! decision.

pub mod context;
pub mod decision;

pub use context::{CommandLine, SegmentContext};
pub use decision::{Decision, RuleMatch};

use std::path::PathBuf;

use crate::config::Settings;
use crate::guards::{
    Guard, gh_write::GhWriteGuard, legacy_cli::LegacyCliGuard,
    python_manager::PythonManagerGuard, timeout::TimeoutGuard,
};
use crate::probe::ToolProbe;

/// The set of enabled guards for one invocation.
///
/// Built fresh per process from the settings file; nothing here outlives
/// the invocation, so a toggled setting takes effect on the next command.
pub struct GuardRegistry {
    guards: Vec<Box<dyn Guard>>,
}

impl GuardRegistry {
    /// Assemble the enabled guards. Tool availability is probed here, once,
    /// and reused across every segment of the evaluation.
    pub fn from_settings(
        settings: &Settings,
        probe: &dyn ToolProbe,
        project_dir: PathBuf,
    ) -> Self {
        let mut guards: Vec<Box<dyn Guard>> = Vec::new();

        if settings.modern_cli_enforcer.enabled {
            guards.push(Box::new(LegacyCliGuard::new(probe)));
        }
        if settings.github_write_guard.enabled {
            guards.push(Box::new(GhWriteGuard::new(
                settings.github_write_guard.allowed_write_commands.clone(),
            )));
        }
        if settings.native_timeout_enforcer.enabled {
            guards.push(Box::new(TimeoutGuard));
        }
        if settings.python_manager_enforcer.enabled {
            guards.push(Box::new(PythonManagerGuard::new(project_dir)));
        }

        Self { guards }
    }

    /// Evaluate a full command string. A restricted command in any segment
    /// is sufficient to block; across guards the worst decision wins.
    pub fn evaluate(&self, command: &str) -> RuleMatch {
        if command.trim().is_empty() {
            return RuleMatch::allow();
        }

        let line = CommandLine::parse(command);
        let mut worst: Option<RuleMatch> = None;

        for guard in &self.guards {
            if let Some(found) = guard.evaluate(&line) {
                log::debug!(
                    "{}: {} on '{}'",
                    guard.name(),
                    found.decision.label(),
                    found.fragment
                );
                if worst
                    .as_ref()
                    .is_none_or(|w| found.decision > w.decision)
                {
                    worst = Some(found);
                }
            }
        }

        worst.unwrap_or_else(RuleMatch::allow)
    }
}
