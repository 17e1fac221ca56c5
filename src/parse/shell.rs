use super::types::{Operator, SplitCommand};

/// Quote tracking for the best-effort scanner.
///
/// This is deliberately NOT a shell grammar. The contract is only that we
/// avoid splitting inside straightforward single/double-quoted strings and
/// after backslash escapes; heredocs, `${}` parameter expansion, and other
/// constructs pass through untouched. False negatives are acceptable here,
/// false splits are not.
#[derive(Debug, Default, Clone, Copy)]
struct QuoteState {
    single: bool,
    double: bool,
    escaped: bool,
}

impl QuoteState {
    /// Advance over one character. Returns true when the character sits
    /// outside any quoting construct and may act as an operator.
    fn observe(&mut self, c: char) -> bool {
        if self.escaped {
            self.escaped = false;
            return false;
        }
        match c {
            '\\' if !self.single => {
                self.escaped = true;
                false
            }
            '\'' if !self.double => {
                self.single = !self.single;
                false
            }
            '"' if !self.single => {
                self.double = !self.double;
                false
            }
            _ => !self.single && !self.double,
        }
    }
}

fn push_part(parts: &mut Vec<String>, buf: &str) {
    let trimmed = buf.trim();
    if !trimmed.is_empty() {
        parts.push(trimmed.to_string());
    }
}

/// Split a command at unquoted `&&`, `||`, `|&`, `|`, and `;`.
pub fn split_operators(command: &str) -> (Vec<String>, Vec<Operator>) {
    let chars: Vec<char> = command.chars().collect();
    let mut parts = Vec::new();
    let mut operators = Vec::new();
    let mut buf = String::new();
    let mut state = QuoteState::default();
    let mut i = 0;

    while i < chars.len() {
        let c = chars[i];
        if !state.observe(c) {
            buf.push(c);
            i += 1;
            continue;
        }

        let next = chars.get(i + 1).copied();
        let op = match (c, next) {
            ('&', Some('&')) => Some((Operator::And, 2)),
            ('|', Some('|')) => Some((Operator::Or, 2)),
            ('|', Some('&')) => Some((Operator::PipeErr, 2)),
            ('|', _) => Some((Operator::Pipe, 1)),
            (';', _) => Some((Operator::Semi, 1)),
            _ => None,
        };

        match op {
            Some((op, width)) => {
                push_part(&mut parts, &buf);
                operators.push(op);
                buf.clear();
                i += width;
            }
            None => {
                buf.push(c);
                i += 1;
            }
        }
    }

    push_part(&mut parts, &buf);
    (parts, operators)
}

/// Scan to the parenthesis matching an already-consumed `(`.
/// Returns the body and the number of characters consumed, closing paren
/// included. Quoted parens inside the body do not affect nesting depth.
fn scan_balanced(chars: &[char]) -> (String, usize) {
    let mut depth: u32 = 1;
    let mut body = String::new();
    let mut state = QuoteState::default();
    let mut i = 0;

    while i < chars.len() {
        let c = chars[i];
        if state.observe(c) {
            match c {
                '(' => depth += 1,
                ')' => {
                    depth -= 1;
                    if depth == 0 {
                        return (body, i + 1);
                    }
                }
                _ => {}
            }
        }
        body.push(c);
        i += 1;
    }
    (body, i)
}

/// Scan to the closing backtick. Backticks do not nest; a backslash escapes
/// the next character.
fn scan_backtick(chars: &[char]) -> (String, usize) {
    let mut body = String::new();
    let mut i = 0;

    while i < chars.len() {
        match chars[i] {
            '`' => return (body, i + 1),
            '\\' if i + 1 < chars.len() => {
                body.push(chars[i]);
                body.push(chars[i + 1]);
                i += 2;
            }
            c => {
                body.push(c);
                i += 1;
            }
        }
    }
    (body, i)
}

/// Extract `$()`, backtick, and `<()`/`>()` substitution bodies.
///
/// Returns the outer command with each span replaced by a `__SUBST__`
/// placeholder, plus the extracted bodies. Single quotes suppress
/// extraction (the shell would not expand there); double quotes do not.
pub fn extract_substitutions(command: &str) -> (String, Vec<String>) {
    let chars: Vec<char> = command.chars().collect();
    let mut outer = String::new();
    let mut inners = Vec::new();
    let mut state = QuoteState::default();
    let mut i = 0;

    let mut capture = |inners: &mut Vec<String>, body: String| {
        let trimmed = body.trim();
        if !trimmed.is_empty() {
            inners.push(trimmed.to_string());
        }
    };

    while i < chars.len() {
        let c = chars[i];

        if state.escaped {
            state.escaped = false;
            outer.push(c);
            i += 1;
            continue;
        }
        match c {
            '\\' if !state.single => {
                state.escaped = true;
                outer.push(c);
                i += 1;
            }
            '\'' if !state.double => {
                state.single = !state.single;
                outer.push(c);
                i += 1;
            }
            '"' if !state.single => {
                state.double = !state.double;
                outer.push(c);
                i += 1;
            }
            _ if state.single => {
                outer.push(c);
                i += 1;
            }
            '$' if chars.get(i + 1) == Some(&'(') => {
                let (body, consumed) = scan_balanced(&chars[i + 2..]);
                capture(&mut inners, body);
                outer.push_str("__SUBST__");
                i += 2 + consumed;
            }
            '`' => {
                let (body, consumed) = scan_backtick(&chars[i + 1..]);
                capture(&mut inners, body);
                outer.push_str("__SUBST__");
                i += 1 + consumed;
            }
            // Process substitution. The < or > prefix is dropped from the
            // outer text along with the span.
            '<' | '>' if chars.get(i + 1) == Some(&'(') && !state.double => {
                let (body, consumed) = scan_balanced(&chars[i + 2..]);
                capture(&mut inners, body);
                outer.push_str("__SUBST__");
                i += 2 + consumed;
            }
            _ => {
                outer.push(c);
                i += 1;
            }
        }
    }

    (outer, inners)
}

/// Decompose a command line: substitutions out first, then operator splits.
pub fn split(command: &str) -> SplitCommand {
    let (outer, substitutions) = extract_substitutions(command);
    let (parts, operators) = split_operators(&outer);
    SplitCommand {
        parts,
        operators,
        substitutions,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn split_simple() {
        let (parts, ops) = split_operators("ls -la");
        assert_eq!(parts, vec!["ls -la"]);
        assert!(ops.is_empty());
    }

    #[test]
    fn split_and() {
        let (parts, ops) = split_operators("ls && pwd");
        assert_eq!(parts, vec!["ls", "pwd"]);
        assert_eq!(ops, vec![Operator::And]);
    }

    #[test]
    fn split_or() {
        let (parts, ops) = split_operators("make || echo failed");
        assert_eq!(parts, vec!["make", "echo failed"]);
        assert_eq!(ops, vec![Operator::Or]);
    }

    #[test]
    fn split_pipe() {
        let (parts, ops) = split_operators("cat file | grep pat");
        assert_eq!(parts, vec!["cat file", "grep pat"]);
        assert_eq!(ops, vec![Operator::Pipe]);
    }

    #[test]
    fn split_semi() {
        let (parts, _) = split_operators("a; b ;c");
        assert_eq!(parts, vec!["a", "b", "c"]);
    }

    #[test]
    fn split_pipe_err() {
        let (parts, ops) = split_operators("make |& tee log");
        assert_eq!(parts, vec!["make", "tee log"]);
        assert_eq!(ops, vec![Operator::PipeErr]);
    }

    #[test]
    fn split_mixed_operators() {
        let (parts, ops) = split_operators("a && b | c ; d");
        assert_eq!(parts, vec!["a", "b", "c", "d"]);
        assert_eq!(
            ops,
            vec![Operator::And, Operator::Pipe, Operator::Semi]
        );
    }

    #[test]
    fn split_single_quoted_operator() {
        let (parts, ops) = split_operators("echo 'a && b'");
        assert_eq!(parts, vec!["echo 'a && b'"]);
        assert!(ops.is_empty());
    }

    #[test]
    fn split_double_quoted_operator() {
        let (parts, ops) = split_operators("echo \"a && b\"");
        assert_eq!(parts, vec!["echo \"a && b\""]);
        assert!(ops.is_empty());
    }

    #[test]
    fn split_escaped_pipe() {
        let (parts, _) = split_operators("echo a\\|b");
        assert_eq!(parts, vec!["echo a\\|b"]);
    }

    #[test]
    fn split_empty_segments_dropped() {
        let (parts, _) = split_operators("; a ;;");
        assert_eq!(parts, vec!["a"]);
    }

    #[test]
    fn extract_dollar_paren() {
        let (outer, inners) = extract_substitutions("ls $(which cargo)");
        assert_eq!(outer, "ls __SUBST__");
        assert_eq!(inners, vec!["which cargo"]);
    }

    #[test]
    fn extract_backtick() {
        let (outer, inners) = extract_substitutions("echo `whoami`");
        assert_eq!(outer, "echo __SUBST__");
        assert_eq!(inners, vec!["whoami"]);
    }

    #[test]
    fn extract_nested() {
        let (_, inners) = extract_substitutions("ls $(cat $(which foo))");
        assert_eq!(inners, vec!["cat $(which foo)"]);
    }

    #[test]
    fn extract_single_quoted_suppressed() {
        let (_, inners) = extract_substitutions("echo '$(rm -rf /)'");
        assert!(inners.is_empty());
    }

    #[test]
    fn extract_double_quoted_expanded() {
        let (_, inners) = extract_substitutions("echo \"$(timeout 5 x)\"");
        assert_eq!(inners, vec!["timeout 5 x"]);
    }

    #[test]
    fn extract_process_substitution() {
        let (outer, inners) = extract_substitutions("diff <(sort a) <(sort b)");
        assert!(!outer.contains('<'));
        assert_eq!(inners, vec!["sort a", "sort b"]);
    }

    #[test]
    fn split_combines_both() {
        let out = split("ls $(which cargo) && cat f | grep x");
        assert_eq!(
            out.parts,
            vec!["ls __SUBST__", "cat f", "grep x"]
        );
        assert_eq!(out.substitutions, vec!["which cargo"]);
        assert_eq!(out.operators, vec![Operator::And, Operator::Pipe]);
    }
}
