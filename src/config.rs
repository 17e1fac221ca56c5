//! Host settings: read fresh from `~/.claude/settings.json` at the start of
//! every invocation, never cached across calls — each invocation is a new
//! process and a toggled guard must take effect immediately.
//!
//! Unknown keys are ignored (the settings file belongs to the host and
//! carries plenty of unrelated configuration). Any read or parse failure
//! yields the defaults: guards stay enabled unless explicitly disabled.

use serde::Deserialize;
use std::path::PathBuf;

fn default_true() -> bool {
    true
}

#[derive(Debug, Deserialize, Default)]
pub struct Settings {
    #[serde(rename = "modernCliEnforcer", default)]
    pub modern_cli_enforcer: GuardToggle,
    #[serde(rename = "githubWriteGuard", default)]
    pub github_write_guard: GithubSettings,
    #[serde(rename = "nativeTimeoutEnforcer", default)]
    pub native_timeout_enforcer: GuardToggle,
    #[serde(rename = "pythonManagerEnforcer", default)]
    pub python_manager_enforcer: GuardToggle,
    #[serde(rename = "commandGuards", default)]
    pub command_guards: SharedSettings,
}

/// Per-guard enable flag.
#[derive(Debug, Deserialize)]
pub struct GuardToggle {
    #[serde(default = "default_true")]
    pub enabled: bool,
}

impl Default for GuardToggle {
    fn default() -> Self {
        Self { enabled: true }
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GithubSettings {
    #[serde(default = "default_true")]
    pub enabled: bool,
    /// Full-command prefixes exempt from the write guard.
    #[serde(default)]
    pub allowed_write_commands: Vec<String>,
}

impl Default for GithubSettings {
    fn default() -> Self {
        Self {
            enabled: true,
            allowed_write_commands: Vec::new(),
        }
    }
}

/// Settings shared by all guards: one block log, one notification switch.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SharedSettings {
    #[serde(default = "default_true")]
    pub log_blocked_attempts: bool,
    /// Block-log path; `~` expands. Defaults under ~/.claude/logs.
    #[serde(default)]
    pub log_path: Option<String>,
    #[serde(default)]
    pub notify_on_block: bool,
}

impl Default for SharedSettings {
    fn default() -> Self {
        Self {
            log_blocked_attempts: true,
            log_path: None,
            notify_on_block: false,
        }
    }
}

impl Settings {
    /// Load from the host settings file; defaults on any failure.
    pub fn load() -> Self {
        Self::settings_path()
            .and_then(|path| std::fs::read_to_string(path).ok())
            .map(|text| Self::from_json(&text))
            .unwrap_or_default()
    }

    /// Parse a settings document. Malformed JSON falls back to defaults.
    pub fn from_json(text: &str) -> Self {
        match serde_json::from_str(text) {
            Ok(settings) => settings,
            Err(e) => {
                log::warn!("settings parse error, using defaults: {e}");
                Self::default()
            }
        }
    }

    fn settings_path() -> Option<PathBuf> {
        let home = std::env::var_os("HOME")?;
        Some(PathBuf::from(home).join(".claude/settings.json"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_enable_everything() {
        let s = Settings::default();
        assert!(s.modern_cli_enforcer.enabled);
        assert!(s.github_write_guard.enabled);
        assert!(s.native_timeout_enforcer.enabled);
        assert!(s.python_manager_enforcer.enabled);
        assert!(s.command_guards.log_blocked_attempts);
        assert!(!s.command_guards.notify_on_block);
        assert!(s.github_write_guard.allowed_write_commands.is_empty());
    }

    #[test]
    fn explicit_disable() {
        let s = Settings::from_json(r#"{"modernCliEnforcer": {"enabled": false}}"#);
        assert!(!s.modern_cli_enforcer.enabled);
        // Other guards untouched
        assert!(s.native_timeout_enforcer.enabled);
    }

    #[test]
    fn allowed_write_commands_parse() {
        let s = Settings::from_json(
            r#"{"githubWriteGuard": {"allowedWriteCommands": ["gh pr comment"]}}"#,
        );
        assert!(s.github_write_guard.enabled);
        assert_eq!(
            s.github_write_guard.allowed_write_commands,
            vec!["gh pr comment"]
        );
    }

    #[test]
    fn shared_section_parses() {
        let s = Settings::from_json(
            r#"{"commandGuards": {"logBlockedAttempts": false, "logPath": "/tmp/g.log", "notifyOnBlock": true}}"#,
        );
        assert!(!s.command_guards.log_blocked_attempts);
        assert_eq!(s.command_guards.log_path.as_deref(), Some("/tmp/g.log"));
        assert!(s.command_guards.notify_on_block);
    }

    #[test]
    fn unknown_keys_ignored() {
        let s = Settings::from_json(r#"{"model": "opus", "hooks": {"PreToolUse": []}}"#);
        assert!(s.modern_cli_enforcer.enabled);
    }

    #[test]
    fn malformed_json_yields_defaults() {
        let s = Settings::from_json("{not json");
        assert!(s.github_write_guard.enabled);
    }
}
