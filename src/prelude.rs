//! smallsh::prelude - grab-and-go exports

pub use crate::cmd::{CommandLine, Redirect};
pub use crate::error::ShellError;
pub use crate::exec::{JobTable, Status};
pub use crate::shell::Shell;
