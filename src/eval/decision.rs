/// Verdict for an evaluated command, ordered so the worst wins.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Decision {
    Allow,
    /// Allowed, but a warning is printed to stderr.
    Warn,
    Block,
}

impl Decision {
    pub fn label(self) -> &'static str {
        match self {
            Decision::Allow => "ALLOW",
            Decision::Warn => "WARN",
            Decision::Block => "BLOCK",
        }
    }

    /// Exit status understood by the hook host: 0 allows the command,
    /// 2 blocks it. Any other status means "log but allow" and is never
    /// emitted on purpose.
    pub fn exit_code(self) -> i32 {
        match self {
            Decision::Allow | Decision::Warn => 0,
            Decision::Block => 2,
        }
    }
}

/// A guard's verdict on a command line.
///
/// `fragment` is the literal command text that triggered the match and
/// `suggestion` the concrete replacement; both always appear in `message`
/// so every diagnostic is actionable rather than a generic refusal.
#[derive(Debug, Clone)]
pub struct RuleMatch {
    pub decision: Decision,
    pub fragment: String,
    pub suggestion: String,
    pub message: String,
}

impl RuleMatch {
    /// The silent pass-through verdict.
    pub fn allow() -> Self {
        Self {
            decision: Decision::Allow,
            fragment: String::new(),
            suggestion: String::new(),
            message: String::new(),
        }
    }
}
