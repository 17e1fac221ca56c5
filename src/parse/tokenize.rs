/// Whether a word is a `VAR=value` environment assignment.
pub fn is_assignment(word: &str) -> bool {
    let Some(eq) = word.find('=') else {
        return false;
    };
    let name = &word[..eq];
    let mut chars = name.chars();
    chars
        .next()
        .is_some_and(|c| c.is_ascii_alphabetic() || c == '_')
        && name
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '_')
}

/// The first real command word of a segment.
///
/// Leading `VAR=value` assignments are skipped and a path prefix is reduced
/// to its basename, so `FOO=1 /usr/bin/grep pat` classifies as `grep` while
/// `bat /path/to/grep/file.txt` stays `bat` — a restricted name occurring
/// inside an argument never matches.
// Assignments with quoted values (FOO="a b") confuse the whitespace scan;
// the remaining words are then misattributed. Rare enough in hook traffic
// that shlex-based recovery hasn't been worth it yet.
pub fn leading_token(segment: &str) -> String {
    let mut rest = segment.trim_start();
    loop {
        let Some(word) = rest.split_whitespace().next() else {
            return String::new();
        };
        if !is_assignment(word) {
            return match word.rsplit_once('/') {
                Some((_, name)) if !name.is_empty() => name.to_string(),
                _ => word.to_string(),
            };
        }
        rest = rest[word.len()..].trim_start();
    }
}

/// Tokenize a segment into words using shlex (POSIX word splitting).
pub fn tokenize(segment: &str) -> Vec<String> {
    shlex::split(segment).unwrap_or_else(|| {
        // Fallback: plain whitespace splitting when shlex can't parse
        segment.split_whitespace().map(String::from).collect()
    })
}
