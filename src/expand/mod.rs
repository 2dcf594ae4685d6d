//! Process-id expansion for raw input lines.

/// Replace each `$$` pair with `pid` in a single left-to-right pass.
///
/// Any `$` not immediately followed by another `$` (including one at
/// end of line) stays a literal `$`. The inserted digits are never
/// rescanned, so a pid can never trigger further expansion. Cannot
/// fail for a well-formed line.
pub fn expand_pid(input: &str, pid: &str) -> String {
    let mut out = String::with_capacity(input.len());
    let mut chars = input.chars().peekable();
    while let Some(ch) = chars.next() {
        if ch == '$' && chars.peek() == Some(&'$') {
            chars.next();
            out.push_str(pid);
        } else {
            out.push(ch);
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn expands_pair_to_pid() {
        assert_eq!(expand_pid("echo $$", "4567"), "echo 4567");
    }

    #[test]
    fn expands_every_pair() {
        assert_eq!(expand_pid("$$ and $$", "12"), "12 and 12");
    }

    #[test]
    fn lone_dollar_is_literal() {
        assert_eq!(expand_pid("cost $5", "99"), "cost $5");
    }

    #[test]
    fn trailing_dollar_is_literal() {
        assert_eq!(expand_pid("echo $", "99"), "echo $");
    }

    #[test]
    fn odd_run_leaves_literal_remainder() {
        // pairs consume left to right; the odd one out stays
        assert_eq!(expand_pid("$$$", "7"), "7$");
        assert_eq!(expand_pid("$$$$", "7"), "77");
    }

    #[test]
    fn adjacent_to_text() {
        assert_eq!(expand_pid("file$$_log", "300"), "file300_log");
    }

    #[test]
    fn no_dollar_passes_through() {
        assert_eq!(expand_pid("ls -la /tmp", "1"), "ls -la /tmp");
    }
}
