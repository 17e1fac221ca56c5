//! cc-cmdguard: a PreToolUse hook for Claude Code that classifies Bash
//! commands against four guard rule sets and signals allow/block through
//! the process exit status.
//!
//! Commands are split into segments at unquoted shell operators, each
//! segment's leading token is classified, and every enabled guard gets to
//! veto: legacy CLI tools with modern replacements installed, `gh` write
//! operations, `timeout` subprocess wrappers, and direct python calls in
//! manager-controlled projects. Everything fails open — a decode error,
//! probe failure, or internal bug resolves to allow, because a false block
//! interrupts legitimate work while a false allow merely misses one
//! enforcement opportunity.
//!
//! # Architecture
//!
//! - **[`hook`]** — stdin payload decoding (`tool_name`, `tool_input.command`).
//! - **[`parse`]** — best-effort shell segmentation and tokenization.
//! - **[`eval`]** — guard registry, segment contexts, decision types.
//! - **[`guards`]** — the four rule sets.
//! - **[`probe`]** — injected PATH-availability probe.
//! - **[`config`]** — host settings from `~/.claude/settings.json`.
//! - **[`logging`]** — append-only block log, debug logger, notifications.

/// Host settings loading.
pub mod config;
/// Evaluation engine: registry, decision aggregation, segment context.
pub mod eval;
/// Per-plugin guard rule sets.
pub mod guards;
/// PreToolUse stdin payload decoding.
pub mod hook;
/// Block logging and diagnostics.
pub mod logging;
/// Shell command segmentation and tokenization.
pub mod parse;
/// Executable availability probing.
pub mod probe;

use eval::RuleMatch;

/// Evaluate a command with default settings, the real PATH probe, and the
/// current directory as the project root.
///
/// Convenience entry point; the hook binary and tests that need
/// determinism build a [`eval::GuardRegistry`] directly.
pub fn evaluate(command: &str) -> RuleMatch {
    let settings = config::Settings::default();
    let project_dir = std::env::current_dir().unwrap_or_default();
    let registry = eval::GuardRegistry::from_settings(&settings, &probe::PathProbe, project_dir);
    registry.evaluate(command)
}
