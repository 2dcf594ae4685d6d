//! Tokenizer for the command-line grammar: whitespace-separated words
//! with `<`, `>` and a trailing `&` as the only reserved tokens. No
//! quoting or escaping.

use crate::cmd::CommandLine;
use crate::error::ShellError;

/// Tokenize one expanded line into a `CommandLine`.
///
/// Returns `Ok(None)` for a line that produces nothing to dispatch: all
/// whitespace, a comment (first character `#`), or a line whose tokens
/// were consumed entirely by redirections. `<` or `>` with no following
/// token is a parse error; the caller reports it and keeps looping.
///
/// A repeated `<` or `>` overwrites the earlier path, and `&` anywhere
/// but last is an ordinary argument.
pub fn parse_line(line: &str) -> Result<Option<CommandLine>, ShellError> {
    if line.starts_with('#') || line.trim().is_empty() {
        return Ok(None);
    }

    let tokens: Vec<&str> = line.split_whitespace().collect();
    let mut cmd = CommandLine::default();
    let mut i = 0;
    while i < tokens.len() {
        match tokens[i] {
            "<" => {
                let path = tokens.get(i + 1).ok_or_else(|| {
                    ShellError::ParseError("`<` with no input file".to_string())
                })?;
                cmd.stdin = Some(path.to_string());
                i += 2;
            }
            ">" => {
                let path = tokens.get(i + 1).ok_or_else(|| {
                    ShellError::ParseError("`>` with no output file".to_string())
                })?;
                cmd.stdout = Some(path.to_string());
                i += 2;
            }
            "&" if i + 1 == tokens.len() => {
                cmd.background = true;
                i += 1;
            }
            word => {
                cmd.argv.push(word.to_string());
                i += 1;
            }
        }
    }

    if cmd.argv.is_empty() {
        return Ok(None);
    }
    Ok(Some(cmd))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parsed(line: &str) -> CommandLine {
        parse_line(line).unwrap().unwrap()
    }

    #[test]
    fn plain_words() {
        let c = parsed("ls -la /tmp");
        assert_eq!(c.argv, vec!["ls", "-la", "/tmp"]);
        assert_eq!(c.stdin, None);
        assert_eq!(c.stdout, None);
        assert!(!c.background);
    }

    #[test]
    fn redirections_any_order() {
        // the three clauses may appear in any permutation
        for line in [
            "cmd < in.txt > out.txt arg1",
            "cmd > out.txt < in.txt arg1",
            "cmd arg1 < in.txt > out.txt",
            "cmd arg1 > out.txt < in.txt",
            "cmd < in.txt arg1 > out.txt",
            "cmd > out.txt arg1 < in.txt",
        ] {
            let c = parsed(line);
            assert_eq!(c.argv, vec!["cmd", "arg1"], "line: {}", line);
            assert_eq!(c.stdin.as_deref(), Some("in.txt"));
            assert_eq!(c.stdout.as_deref(), Some("out.txt"));
            assert!(!c.background);
        }
    }

    #[test]
    fn trailing_ampersand_sets_background() {
        let c = parsed("sleep 5 &");
        assert_eq!(c.argv, vec!["sleep", "5"]);
        assert!(c.background);
    }

    #[test]
    fn inner_ampersand_is_an_argument() {
        let c = parsed("echo a & b");
        assert_eq!(c.argv, vec!["echo", "a", "&", "b"]);
        assert!(!c.background);
    }

    #[test]
    fn missing_input_file_is_parse_error() {
        let err = parse_line("cat <").unwrap_err();
        assert!(matches!(err, ShellError::ParseError(_)));
    }

    #[test]
    fn missing_output_file_is_parse_error() {
        let err = parse_line("ls >").unwrap_err();
        assert!(matches!(err, ShellError::ParseError(_)));
    }

    #[test]
    fn blank_and_comment_lines_yield_nothing() {
        assert!(parse_line("").unwrap().is_none());
        assert!(parse_line("   \t ").unwrap().is_none());
        assert!(parse_line("# a comment").unwrap().is_none());
        assert!(parse_line("#ls").unwrap().is_none());
    }

    #[test]
    fn redirection_only_line_yields_nothing() {
        assert!(parse_line("< in.txt").unwrap().is_none());
    }

    #[test]
    fn repeated_redirection_last_wins() {
        let c = parsed("cmd > a.txt > b.txt");
        assert_eq!(c.stdout.as_deref(), Some("b.txt"));
    }

    #[test]
    fn lone_ampersand_yields_nothing() {
        assert!(parse_line("&").unwrap().is_none());
    }
}
