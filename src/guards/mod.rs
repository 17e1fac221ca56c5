//! Guard implementations: per-plugin rules for deciding allow/warn/block.
//!
//! Each guard is a pure function from the segmented command line (plus the
//! environment snapshot captured at construction) to an optional verdict.
//! Guards never error: anything they cannot classify is no opinion, which
//! the engine resolves to allow.

/// Blocks state-mutating GitHub CLI operations.
pub mod gh_write;
/// Suggests modern replacements for legacy CLI tools.
pub mod legacy_cli;
/// Enforces project package-manager usage over direct python calls.
pub mod python_manager;
/// Enforces the Bash tool's native timeout over subprocess wrappers.
pub mod timeout;

use crate::eval::{CommandLine, RuleMatch};

/// A single enforcement rule set.
pub trait Guard: Send + Sync {
    /// Short name used in logs.
    fn name(&self) -> &'static str;

    /// Inspect the whole command line. `None` means no opinion; guards see
    /// every segment so they can report all matches in one diagnostic.
    fn evaluate(&self, line: &CommandLine) -> Option<RuleMatch>;
}
