//! Built-in commands, handled in-process without forking. Built-ins
//! never consult redirection and never touch the last foreground
//! status (except `status`, which reads it).

use std::env;
use std::io::{self, Write};
use std::path::Path;

use nix::unistd::chdir;

use crate::exec::{JobTable, Status};

/// What the main loop does after a built-in ran.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Exit,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Builtin {
    Exit,
    Cd,
    Status,
}

impl Builtin {
    /// Recognized iff the program name matches exactly.
    pub fn lookup(name: &str) -> Option<Builtin> {
        match name {
            "exit" => Some(Builtin::Exit),
            "cd" => Some(Builtin::Cd),
            "status" => Some(Builtin::Status),
            _ => None,
        }
    }
}

/// Execute a built-in. `argv` is the full argument vector including
/// the built-in's own name.
pub fn run(builtin: Builtin, argv: &[String], last_status: Status, jobs: &JobTable) -> Flow {
    match builtin {
        Builtin::Exit => {
            // signal every tracked job, do not wait for them to die
            jobs.kill_all();
            Flow::Exit
        }
        Builtin::Cd => {
            cd(argv.get(1).map(String::as_str));
            Flow::Continue
        }
        Builtin::Status => {
            println!("{}", last_status);
            Flow::Continue
        }
    }
}

/// `cd [path]`; no path means `$HOME`. Failure is reported and never
/// fatal, and leaves the last foreground status untouched.
fn cd(arg: Option<&str>) {
    let target = match arg {
        Some(path) => path.to_string(),
        None => match env::var("HOME") {
            Ok(home) => home,
            Err(_) => {
                let _ = writeln!(io::stderr(), "smallsh: cd: HOME not set");
                return;
            }
        },
    };
    if let Err(e) = chdir(Path::new(&target)) {
        let _ = writeln!(io::stderr(), "smallsh: cd: {}: {}", target, e);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(words: &[&str]) -> Vec<String> {
        words.iter().map(|w| w.to_string()).collect()
    }

    #[test]
    fn lookup_recognizes_exact_names_only() {
        assert_eq!(Builtin::lookup("exit"), Some(Builtin::Exit));
        assert_eq!(Builtin::lookup("cd"), Some(Builtin::Cd));
        assert_eq!(Builtin::lookup("status"), Some(Builtin::Status));
        assert_eq!(Builtin::lookup("exits"), None);
        assert_eq!(Builtin::lookup("CD"), None);
        assert_eq!(Builtin::lookup(""), None);
    }

    #[test]
    fn exit_flows_exit_and_status_flows_continue() {
        let jobs = JobTable::new();
        assert_eq!(run(Builtin::Exit, &args(&["exit"]), Status::default(), &jobs), Flow::Exit);
        assert_eq!(run(Builtin::Status, &args(&["status"]), Status::Exited(2), &jobs), Flow::Continue);
    }

    #[test]
    fn cd_changes_directory_and_survives_failure() {
        let jobs = JobTable::new();
        let orig = env::current_dir().unwrap();

        assert_eq!(run(Builtin::Cd, &args(&["cd", "/"]), Status::default(), &jobs), Flow::Continue);
        assert_eq!(env::current_dir().unwrap(), Path::new("/"));

        // a bad target is reported but changes nothing
        run(Builtin::Cd, &args(&["cd", "/definitely/not/a/dir"]), Status::default(), &jobs);
        assert_eq!(env::current_dir().unwrap(), Path::new("/"));

        // no argument means $HOME
        if let Ok(home) = env::var("HOME") {
            run(Builtin::Cd, &args(&["cd"]), Status::default(), &jobs);
            assert_eq!(env::current_dir().unwrap(), Path::new(&home));
        }

        env::set_current_dir(orig).unwrap();
    }
}
