use crate::eval::{CommandLine, Decision, RuleMatch};
use crate::guards::Guard;
use crate::probe::ToolProbe;

/// Legacy tool → modern replacement pairs.
const REPLACEMENTS: &[(&str, &str)] = &[
    ("grep", "rg"),
    ("find", "fd"),
    ("cat", "bat"),
    ("ls", "eza"),
];

/// Blocks legacy CLI tools when their modern replacement is installed.
///
/// A legacy name only matches as the leading token of a segment, never as a
/// path or argument. When the replacement is absent the pair contributes
/// nothing — the legacy tool keeps working rather than leaving the user
/// with no tool at all.
pub struct LegacyCliGuard {
    /// Pairs whose modern tool was found on PATH at construction.
    replacements: Vec<(&'static str, &'static str)>,
}

impl LegacyCliGuard {
    pub fn new(probe: &dyn ToolProbe) -> Self {
        let replacements = REPLACEMENTS
            .iter()
            .copied()
            .filter(|(_, modern)| probe.available(modern))
            .collect();
        Self { replacements }
    }
}

impl Guard for LegacyCliGuard {
    fn name(&self) -> &'static str {
        "modern-cli-enforcer"
    }

    fn evaluate(&self, line: &CommandLine) -> Option<RuleMatch> {
        // Every legacy tool in the command is reported, not just the first.
        let mut hits: Vec<(&str, &str)> = Vec::new();
        for segment in &line.segments {
            for &(legacy, modern) in &self.replacements {
                if segment.leading == legacy && !hits.contains(&(legacy, modern)) {
                    hits.push((legacy, modern));
                }
            }
        }
        if hits.is_empty() {
            return None;
        }

        let lines: Vec<String> = hits
            .iter()
            .map(|(old, new)| format!("USE '{new}' instead of '{old}'"))
            .collect();
        let fragment = hits
            .iter()
            .map(|(old, _)| *old)
            .collect::<Vec<_>>()
            .join(", ");
        let suggestion = hits
            .iter()
            .map(|(_, new)| *new)
            .collect::<Vec<_>>()
            .join(", ");

        Some(RuleMatch {
            decision: Decision::Block,
            fragment,
            suggestion,
            message: format!("❌ Legacy CLI blocked.\n{}", lines.join("\n")),
        })
    }
}
