//! Decoding of the PreToolUse payload delivered on stdin.
//!
//! Malformed JSON, a non-object top level, or missing fields all collapse
//! to the empty event, which evaluates to an unconditional allow — a decode
//! problem must never block a command.

use serde::Deserialize;

#[derive(Debug, Deserialize, Default)]
pub struct HookEvent {
    tool_name: Option<String>,
    tool_input: Option<CommandHolder>,
    /// Older hosts nested the command under `input`.
    input: Option<CommandHolder>,
}

#[derive(Debug, Deserialize, Default)]
struct CommandHolder {
    command: Option<String>,
}

fn holder_command(holder: &Option<CommandHolder>) -> &str {
    holder
        .as_ref()
        .and_then(|h| h.command.as_deref())
        .unwrap_or("")
}

impl HookEvent {
    /// Decode a payload; anything unparseable becomes the empty event.
    pub fn from_json(text: &str) -> Self {
        serde_json::from_str(text).unwrap_or_default()
    }

    /// Only Bash tool calls are classified; every other tool passes.
    pub fn is_bash(&self) -> bool {
        self.tool_name.as_deref() == Some("Bash")
    }

    /// The command string, preferring the modern payload path.
    pub fn command(&self) -> &str {
        let primary = holder_command(&self.tool_input);
        if primary.is_empty() {
            holder_command(&self.input)
        } else {
            primary
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decodes_modern_payload() {
        let e = HookEvent::from_json(
            r#"{"tool_name": "Bash", "tool_input": {"command": "ls -la"}}"#,
        );
        assert!(e.is_bash());
        assert_eq!(e.command(), "ls -la");
    }

    #[test]
    fn legacy_input_path_fallback() {
        let e = HookEvent::from_json(r#"{"tool_name": "Bash", "input": {"command": "pwd"}}"#);
        assert_eq!(e.command(), "pwd");
    }

    #[test]
    fn modern_path_wins_over_legacy() {
        let e = HookEvent::from_json(
            r#"{"tool_name": "Bash", "tool_input": {"command": "a"}, "input": {"command": "b"}}"#,
        );
        assert_eq!(e.command(), "a");
    }

    #[test]
    fn non_bash_tool() {
        let e = HookEvent::from_json(r#"{"tool_name": "Read", "tool_input": {"command": "x"}}"#);
        assert!(!e.is_bash());
    }

    #[test]
    fn missing_command_is_empty() {
        let e = HookEvent::from_json(r#"{"tool_name": "Bash", "tool_input": {}}"#);
        assert!(e.is_bash());
        assert_eq!(e.command(), "");
    }

    #[test]
    fn malformed_json_is_empty_event() {
        let e = HookEvent::from_json("{nope");
        assert!(!e.is_bash());
        assert_eq!(e.command(), "");
    }

    #[test]
    fn non_object_top_level_is_empty_event() {
        let e = HookEvent::from_json("[1, 2, 3]");
        assert!(!e.is_bash());
    }

    #[test]
    fn extra_fields_ignored() {
        let e = HookEvent::from_json(
            r#"{"tool_name": "Bash", "session_id": "s", "tool_input": {"command": "ls", "description": "list"}}"#,
        );
        assert_eq!(e.command(), "ls");
    }
}
