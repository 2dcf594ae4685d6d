//! Job control engine: spawning external commands, waiting on
//! foreground children, and opportunistically reaping background jobs.

use std::collections::BTreeMap;
use std::ffi::CString;
use std::fmt;
use std::io::{self, Write};
use std::process;

use nix::errno::Errno;
use nix::fcntl::{open, OFlag};
use nix::sys::signal::{kill, Signal};
use nix::sys::stat::Mode;
use nix::sys::wait::{waitpid, WaitPidFlag, WaitStatus};
use nix::unistd::{close, dup2, execvp, fork, ForkResult, Pid};

use crate::cmd::{resolve_redirect, CommandLine, Redirect};
use crate::error::ShellError;
use crate::signals;

/// Outcome of a completed child: normal exit code or the signal that
/// ended it. This is what the `status` built-in reports.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Status {
    Exited(i32),
    Signaled(i32),
}

impl Default for Status {
    fn default() -> Self { Status::Exited(0) }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Status::Exited(code) => write!(f, "exit value {}", code),
            Status::Signaled(signo) => write!(f, "terminated by signal {}", signo),
        }
    }
}

impl Status {
    fn from_wait(ws: &WaitStatus) -> Option<Status> {
        match ws {
            WaitStatus::Exited(_, code) => Some(Status::Exited(*code)),
            WaitStatus::Signaled(_, sig, _) => Some(Status::Signaled(*sig as i32)),
            _ => None,
        }
    }
}

/// A tracked background process.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Job {
    pub pid: Pid,
}

/// Background jobs keyed by pid. Touched only by the single-threaded
/// main loop; the signal handler never reaches in here.
#[derive(Debug, Default)]
pub struct JobTable {
    jobs: BTreeMap<libc::pid_t, Job>,
}

impl JobTable {
    pub fn new() -> Self { JobTable::default() }

    pub fn add(&mut self, pid: Pid) {
        self.jobs.insert(pid.as_raw(), Job { pid });
    }

    pub fn remove(&mut self, pid: Pid) -> Option<Job> {
        self.jobs.remove(&pid.as_raw())
    }

    pub fn pids(&self) -> Vec<Pid> {
        self.jobs.values().map(|j| j.pid).collect()
    }

    pub fn len(&self) -> usize { self.jobs.len() }

    pub fn is_empty(&self) -> bool { self.jobs.is_empty() }

    /// Best-effort SIGTERM to every tracked job. Used by `exit`; does
    /// not wait for the jobs to die.
    pub fn kill_all(&self) {
        for job in self.jobs.values() {
            let _ = kill(job.pid, Signal::SIGTERM);
        }
    }
}

/// Fork and exec a non-built-in command. The parent side returns the
/// child's pid; the child side never returns. A fork failure aborts
/// only this command.
pub fn spawn(cmd: &CommandLine, background: bool) -> Result<Pid, ShellError> {
    match unsafe { fork() } {
        Ok(ForkResult::Parent { child }) => Ok(child),
        Ok(ForkResult::Child) => exec_child(cmd, background),
        Err(e) => Err(ShellError::SpawnError(format!("failed to spawn: {}", e))),
    }
}

/// Child-side continuation after fork: reset SIGINT to default so a
/// foreground command is interruptible, wire redirections, and replace
/// the process image. Every failure path reports and exits the child
/// with a non-zero status; the shell is never affected.
fn exec_child(cmd: &CommandLine, background: bool) -> ! {
    signals::restore_child_defaults();

    if let Err(msg) = wire(&resolve_redirect(cmd.stdin.as_deref(), background), 0) {
        child_fail(&msg);
    }
    if let Err(msg) = wire(&resolve_redirect(cmd.stdout.as_deref(), background), 1) {
        child_fail(&msg);
    }

    let argv: Vec<CString> = match cmd
        .argv
        .iter()
        .map(|a| CString::new(a.as_bytes()))
        .collect()
    {
        Ok(v) => v,
        Err(_) => child_fail("argument contains an interior NUL"),
    };
    // returns only on failure
    let _ = execvp(&argv[0], &argv);
    child_fail(&format!("{}: no such file or directory", cmd.program()));
}

fn child_fail(msg: &str) -> ! {
    let _ = writeln!(io::stderr(), "smallsh: {}", msg);
    process::exit(1);
}

/// Rebind `target_fd` (0 for stdin, 1 for stdout) according to the
/// resolved redirect. Input opens read-only and must exist; output is
/// created or truncated with a permissive mode.
fn wire(redirect: &Redirect, target_fd: libc::c_int) -> Result<(), String> {
    let path = match redirect {
        Redirect::Inherit => return Ok(()),
        Redirect::Null => "/dev/null",
        Redirect::File(p) => p.as_str(),
    };
    let flags = if target_fd == 0 {
        OFlag::O_RDONLY
    } else {
        OFlag::O_WRONLY | OFlag::O_CREAT | OFlag::O_TRUNC
    };
    let fd = open(path, flags, Mode::from_bits_truncate(0o666))
        .map_err(|e| format!("cannot open {}: {}", path, e))?;
    if fd != target_fd {
        dup2(fd, target_fd).map_err(|e| format!("cannot redirect {}: {}", path, e))?;
        let _ = close(fd);
    }
    Ok(())
}

/// Block until this specific child terminates. Retries an interrupted
/// wait; a SIGTSTP arriving here only toggles the mode for later
/// cycles. A child ended by a signal is announced immediately.
pub fn wait_foreground(pid: Pid) -> Result<Status, ShellError> {
    loop {
        match waitpid(pid, None) {
            Ok(ws) => {
                if let Some(status) = Status::from_wait(&ws) {
                    if let Status::Signaled(_) = status {
                        println!("{}", status);
                    }
                    return Ok(status);
                }
                // stopped/continued: keep waiting for termination
            }
            Err(Errno::EINTR) => continue,
            Err(e) => return Err(ShellError::SpawnError(format!("wait failed: {}", e))),
        }
    }
}

/// Opportunistic reap sweep: poll every tracked job without blocking,
/// announce each terminated one exactly once, and drop it from the
/// table.
pub fn reap(jobs: &mut JobTable) {
    for pid in jobs.pids() {
        match waitpid(pid, Some(WaitPidFlag::WNOHANG)) {
            Ok(WaitStatus::StillAlive) => {}
            Ok(ws) => {
                if let Some(status) = Status::from_wait(&ws) {
                    println!("background pid {} is done: {}", pid, status);
                    jobs.remove(pid);
                }
            }
            // already gone (or never ours): stop tracking it
            Err(_) => {
                jobs.remove(pid);
            }
        }
    }
}
