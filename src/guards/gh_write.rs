use crate::eval::{CommandLine, Decision, RuleMatch, SegmentContext};
use crate::guards::Guard;

/// HTTP methods that mutate state through `gh api`.
const WRITE_METHODS: &[&str] = &["POST", "PUT", "PATCH", "DELETE"];

/// Field-parameter flags. `gh api` defaults to POST when any of these is
/// supplied without an explicit method — the implicit-POST trap.
const FIELD_FLAGS: &[&str] = &["-f", "-F", "--field", "--raw-field"];

/// Two-word gh subcommands that mutate state. Prefix-matched against the
/// first two words after `gh`, so trailing flags never hide a match.
const WRITE_SUBCOMMANDS: &[&str] = &[
    "repo create", "repo delete", "repo fork", "repo rename", "repo archive",
    "issue create", "issue edit", "issue close", "issue delete",
    "issue pin", "issue unpin", "issue transfer",
    "pr create", "pr edit", "pr close", "pr merge", "pr reopen",
    "pr ready", "pr comment", "pr review",
    "release create", "release delete", "release edit", "release upload",
    "run cancel", "run rerun",
    "workflow enable", "workflow disable", "workflow run",
    "gist create", "gist edit", "gist delete",
    "project create", "project edit", "project delete",
    "project item-add", "project item-edit", "project item-delete",
    "project field-create", "project field-delete",
];

/// Blocks state-mutating GitHub CLI invocations.
pub struct GhWriteGuard {
    /// Full-command prefixes that override a block to allow.
    allowed_prefixes: Vec<String>,
}

impl GhWriteGuard {
    pub fn new(allowed_prefixes: Vec<String>) -> Self {
        Self { allowed_prefixes }
    }

    /// The HTTP method requested via `-X`/`--method`, uppercased.
    /// Flag and value are both matched case-insensitively: the classified
    /// target is a protocol verb, not a filesystem path.
    fn api_method(args: &[String]) -> Option<String> {
        for (i, word) in args.iter().enumerate() {
            if word.eq_ignore_ascii_case("-x") || word.eq_ignore_ascii_case("--method") {
                if let Some(value) = args.get(i + 1) {
                    return Some(value.to_ascii_uppercase());
                }
            } else if word
                .get(..9)
                .is_some_and(|prefix| prefix.eq_ignore_ascii_case("--method="))
            {
                return Some(word[9..].to_ascii_uppercase());
            } else if word.len() > 2
                && (word.starts_with("-X") || word.starts_with("-x"))
                && !word.starts_with("--")
            {
                return Some(word[2..].to_ascii_uppercase());
            }
        }
        None
    }

    /// Whether any field-parameter flag is present, including joined forms
    /// like `-ftitle=test`.
    fn has_field_flag(args: &[String]) -> bool {
        args.iter().any(|word| {
            FIELD_FLAGS.contains(&word.as_str())
                || (!word.starts_with("--")
                    && (word.starts_with("-f") || word.starts_with("-F")))
        })
    }

    fn block(fragment: String, suggestion: String, detail: String) -> RuleMatch {
        RuleMatch {
            message: format!("❌ GitHub write blocked: {fragment}\n{detail}\n→ {suggestion}"),
            decision: Decision::Block,
            fragment,
            suggestion,
        }
    }

    fn evaluate_segment(&self, segment: &SegmentContext) -> Option<RuleMatch> {
        let args = segment.args();
        let sub = args.first().map(String::as_str)?;

        if sub == "api" {
            if let Some(method) = Self::api_method(args) {
                if WRITE_METHODS.contains(&method.as_str()) {
                    return Some(Self::block(
                        format!("gh api {method}"),
                        "use '--method GET' for reads, or run the write yourself".into(),
                        format!("{method} requests mutate repository state."),
                    ));
                }
                // Explicit non-write method (GET, HEAD, OPTIONS...) is fine
                // even with field parameters.
                return None;
            }
            if Self::has_field_flag(args) {
                return Some(Self::block(
                    "gh api with -f/-F flags".into(),
                    "add '--method GET' to keep the request read-only".into(),
                    "gh api defaults to POST when field parameters are supplied.".into(),
                ));
            }
            return None;
        }

        if args.len() >= 2 {
            let pair = format!("{} {}", args[0], args[1]);
            if WRITE_SUBCOMMANDS.contains(&pair.as_str()) {
                return Some(Self::block(
                    format!("gh {pair}"),
                    format!(
                        "run 'gh {pair}' yourself, or whitelist it under \
                         githubWriteGuard.allowedWriteCommands in ~/.claude/settings.json"
                    ),
                    "This subcommand mutates GitHub state.".into(),
                ));
            }
        }
        None
    }
}

impl Guard for GhWriteGuard {
    fn name(&self) -> &'static str {
        "github-write-guard"
    }

    fn evaluate(&self, line: &CommandLine) -> Option<RuleMatch> {
        let full = line.raw.trim_start();
        if self
            .allowed_prefixes
            .iter()
            .any(|prefix| !prefix.is_empty() && full.starts_with(prefix.as_str()))
        {
            return None;
        }

        line.segments
            .iter()
            .filter(|segment| segment.leading == "gh")
            .find_map(|segment| self.evaluate_segment(segment))
    }
}
