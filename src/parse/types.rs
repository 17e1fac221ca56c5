//! Types produced by the shell segmenter and consumed by the eval layer.

/// Shell control operator separating consecutive segments.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operator {
    /// `&&` — run next only if previous succeeded
    And,
    /// `||` — run next only if previous failed
    Or,
    /// `;` — run next unconditionally
    Semi,
    /// `|` — pipe stdout
    Pipe,
    /// `|&` — pipe stdout+stderr
    PipeErr,
}

/// A command line decomposed at top-level operators.
///
/// `parts` are evaluated independently: a restricted command in any one of
/// them is sufficient to block, regardless of position. `substitutions`
/// holds the bodies of `$()`, backtick, and process substitutions found
/// anywhere outside single quotes; the eval layer segments those
/// recursively.
#[derive(Debug, Clone)]
pub struct SplitCommand {
    pub parts: Vec<String>,
    pub operators: Vec<Operator>,
    pub substitutions: Vec<String>,
}
