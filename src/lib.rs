//! smallsh: an interactive command interpreter with redirection and
//! background job control.

pub mod error;
pub mod cmd;
pub mod expand;
pub mod parse;
pub mod builtin;
pub mod exec;
pub mod signals;
pub mod shell;
pub mod prelude;

pub use error::ShellError;
