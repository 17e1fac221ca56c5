use crate::parse;

/// Substitutions nest via the parser; anything deeper than this is not a
/// command a person typed.
const MAX_SUBST_DEPTH: usize = 8;

/// One independently evaluated sub-command.
#[derive(Debug, Clone)]
pub struct SegmentContext {
    /// The segment text as split out of the command line.
    pub raw: String,
    /// The leading token: first real command word, basename-reduced.
    pub leading: String,
    /// All words of the segment (shlex splitting).
    pub words: Vec<String>,
}

impl SegmentContext {
    pub fn new(raw: &str) -> Self {
        Self {
            raw: raw.trim().to_string(),
            leading: parse::leading_token(raw),
            words: parse::tokenize(raw),
        }
    }

    /// The segment text from the command word on, leading `VAR=value`
    /// assignments stripped. This is what a rewrite suggestion quotes —
    /// a run prefix goes before the command, not before its environment.
    pub fn command_text(&self) -> &str {
        let mut rest = self.raw.trim_start();
        while let Some(word) = rest.split_whitespace().next() {
            if !parse::is_assignment(word) {
                break;
            }
            rest = rest[word.len()..].trim_start();
        }
        rest
    }

    /// Words after the command itself, leading assignments skipped.
    pub fn args(&self) -> &[String] {
        let mut idx = 0;
        while idx < self.words.len() && parse::is_assignment(&self.words[idx]) {
            idx += 1;
        }
        if idx < self.words.len() {
            idx += 1; // the command word
        }
        &self.words[idx..]
    }
}

/// A decoded command line with every evaluable segment, including the
/// bodies of command substitutions (recursively segmented).
#[derive(Debug, Clone)]
pub struct CommandLine {
    pub raw: String,
    pub segments: Vec<SegmentContext>,
}

impl CommandLine {
    pub fn parse(command: &str) -> Self {
        let mut segments = Vec::new();
        collect_segments(command, &mut segments, 0);
        Self {
            raw: command.to_string(),
            segments,
        }
    }
}

fn collect_segments(command: &str, out: &mut Vec<SegmentContext>, depth: usize) {
    if depth > MAX_SUBST_DEPTH {
        return;
    }
    let split = parse::split(command);
    for part in &split.parts {
        out.push(SegmentContext::new(part));
    }
    for inner in &split.substitutions {
        collect_segments(inner, out, depth + 1);
    }
}
