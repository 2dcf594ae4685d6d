use std::fmt;

#[derive(Debug)]
pub enum ShellError {
    ParseError(String),
    SpawnError(String),
    SignalError(String),
    IoError(String),
}

impl fmt::Display for ShellError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ShellError::ParseError(s) => write!(f, "Parse error: {}", s),
            ShellError::SpawnError(s) => write!(f, "Spawn error: {}", s),
            ShellError::SignalError(s) => write!(f, "Signal error: {}", s),
            ShellError::IoError(s) => write!(f, "I/O error: {}", s),
        }
    }
}

impl std::error::Error for ShellError {}
