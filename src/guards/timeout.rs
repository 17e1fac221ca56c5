use crate::eval::{CommandLine, Decision, RuleMatch};
use crate::guards::Guard;

/// timeout(1) flags whose value arrives as a separate token.
const VALUE_FLAGS: &[&str] = &["-k", "-s", "--kill-after", "--signal"];

/// Blocks `timeout`/`gtimeout` subprocess wrappers in favor of the Bash
/// tool's native timeout parameter.
///
/// Matching is strictly positional: the word only counts as the leading
/// token of a segment, so `echo "timeout is 5 seconds"` and
/// `python -c "set_timeout(5)"` pass untouched while
/// `echo ok || timeout 5 python x.py` blocks.
pub struct TimeoutGuard;

/// Whether a word is a duration argument: bare digits or `<digits>[smhd]`.
fn is_duration(word: &str) -> bool {
    let digits = word
        .strip_suffix(['s', 'm', 'h', 'd'])
        .unwrap_or(word);
    !digits.is_empty() && digits.bytes().all(|b| b.is_ascii_digit())
}

/// Duration → milliseconds. Bare digits are seconds, per timeout(1).
fn duration_to_ms(duration: &str) -> u64 {
    let (value, scale) = if let Some(v) = duration.strip_suffix('s') {
        (v, 1_000)
    } else if let Some(v) = duration.strip_suffix('m') {
        (v, 60_000)
    } else if let Some(v) = duration.strip_suffix('h') {
        (v, 3_600_000)
    } else if let Some(v) = duration.strip_suffix('d') {
        (v, 86_400_000)
    } else {
        (duration, 1_000)
    };
    value.parse::<u64>().unwrap_or(5).saturating_mul(scale)
}

/// Split timeout arguments into (duration, wrapped command), skipping any
/// leading flags. `None` when no duration argument is present.
fn split_timeout_args(args: &[String]) -> Option<(String, String)> {
    let mut i = 0;
    while i < args.len() {
        let word = &args[i];
        if VALUE_FLAGS.contains(&word.as_str()) {
            i += 2; // flag + its value
            continue;
        }
        if word.starts_with('-') {
            i += 1; // --foreground, --preserve-status, --kill-after=N, ...
            continue;
        }
        if !is_duration(word) {
            return None;
        }
        let rest = &args[i + 1..];
        let wrapped = shlex::try_join(rest.iter().map(String::as_str))
            .unwrap_or_else(|_| rest.join(" "));
        return Some((word.clone(), wrapped));
    }
    None
}

impl Guard for TimeoutGuard {
    fn name(&self) -> &'static str {
        "native-timeout-enforcer"
    }

    fn evaluate(&self, line: &CommandLine) -> Option<RuleMatch> {
        for segment in &line.segments {
            if segment.leading != "timeout" && segment.leading != "gtimeout" {
                continue;
            }
            let Some((duration, wrapped)) = split_timeout_args(segment.args()) else {
                continue;
            };
            let ms = duration_to_ms(&duration);
            let suggestion = format!("Bash(command=\"{wrapped}\", timeout={ms})");
            return Some(RuleMatch {
                message: format!(
                    "⚠️ Direct {} {duration} blocked\nUse the Bash timeout parameter instead: {suggestion}",
                    segment.leading
                ),
                decision: Decision::Block,
                fragment: format!("{} {duration}", segment.leading),
                suggestion,
            });
        }
        None
    }
}
