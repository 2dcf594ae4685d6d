//! Command modeling for one parsed input line.

/// One line of input after tokenization. Built fresh per prompt cycle
/// and discarded after dispatch.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CommandLine {
    pub argv: Vec<String>,
    pub stdin: Option<String>,
    pub stdout: Option<String>,
    pub background: bool,
}

impl CommandLine {
    /// The program name. Callers only dispatch non-empty argv.
    pub fn program(&self) -> &str {
        &self.argv[0]
    }
}

/// Where a child's stdin or stdout ends up once the background rule
/// has been applied.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Redirect {
    Inherit,
    Null,
    File(String),
}

impl Default for Redirect {
    fn default() -> Self { Redirect::Inherit }
}

/// An explicit redirection always wins. A direction left unredirected
/// inherits the shell's terminal in the foreground, and is pointed at
/// the null device for a background run so the job cannot contend for
/// the terminal.
pub fn resolve_redirect(path: Option<&str>, background: bool) -> Redirect {
    match path {
        Some(p) => Redirect::File(p.to_string()),
        None if background => Redirect::Null,
        None => Redirect::Inherit,
    }
}
