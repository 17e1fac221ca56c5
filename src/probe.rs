//! Executable availability probing.
//!
//! Guards never shell out per segment; they ask an injected probe once per
//! evaluation, which keeps tests deterministic and the hot path cheap.

/// Availability probe for external binaries.
pub trait ToolProbe: Send + Sync {
    /// Whether `tool` resolves to an executable on PATH.
    fn available(&self, tool: &str) -> bool;
}

/// Probe backed by a real PATH lookup.
///
/// A lookup error reads as "not available": a probe failure must weaken
/// enforcement, never block a command.
pub struct PathProbe;

impl ToolProbe for PathProbe {
    fn available(&self, tool: &str) -> bool {
        which::which(tool).is_ok()
    }
}

/// Deterministic probe where exactly the listed tools exist. Used by tests
/// in place of the real PATH.
pub struct StaticProbe {
    tools: Vec<String>,
}

impl StaticProbe {
    pub fn new(tools: &[&str]) -> Self {
        Self {
            tools: tools.iter().map(|t| t.to_string()).collect(),
        }
    }
}

impl ToolProbe for StaticProbe {
    fn available(&self, tool: &str) -> bool {
        self.tools.iter().any(|t| t == tool)
    }
}
