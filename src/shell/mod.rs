//! The interactive prompt/read/dispatch loop.

use std::io::{self, BufRead, Write};

use nix::unistd::getpid;

use crate::builtin::{self, Builtin, Flow};
use crate::cmd::CommandLine;
use crate::error::ShellError;
use crate::exec::{self, JobTable, Status};
use crate::expand::expand_pid;
use crate::parse::parse_line;
use crate::signals::{self, ModeState};

const PROMPT: &str = ": ";

pub struct Shell {
    last_status: Status,
    jobs: JobTable,
    mode: &'static ModeState,
}

impl Default for Shell {
    fn default() -> Self { Shell::new() }
}

impl Shell {
    pub fn new() -> Shell {
        Shell {
            last_status: Status::default(),
            jobs: JobTable::new(),
            mode: signals::mode(),
        }
    }

    /// Run the interpreter until `exit` or end of input.
    ///
    /// The mode-change marker is checked after every step a SIGTSTP
    /// could have interrupted (prompting, reading, parsing); when it
    /// fires, the cycle restarts and any partial input is discarded.
    pub fn run(&mut self) -> Result<(), ShellError> {
        signals::install()?;
        let pid = getpid().to_string();
        let stdin = io::stdin();
        let mut line = String::new();

        loop {
            print!("{}", PROMPT);
            io::stdout()
                .flush()
                .map_err(|e| ShellError::IoError(e.to_string()))?;
            if self.mode.take_change() {
                continue;
            }

            line.clear();
            let n = stdin
                .lock()
                .read_line(&mut line)
                .map_err(|e| ShellError::IoError(e.to_string()))?;
            if self.mode.take_change() {
                continue;
            }
            if n == 0 {
                // end of input behaves like `exit`
                self.jobs.kill_all();
                return Ok(());
            }

            let expanded = expand_pid(&line, &pid);
            let cmd = match parse_line(&expanded) {
                Ok(Some(cmd)) => cmd,
                Ok(None) => continue,
                Err(e) => {
                    eprintln!("smallsh: {}", e);
                    continue;
                }
            };
            if self.mode.take_change() {
                continue;
            }

            if let Some(b) = Builtin::lookup(cmd.program()) {
                match builtin::run(b, &cmd.argv, self.last_status, &self.jobs) {
                    Flow::Exit => return Ok(()),
                    Flow::Continue => continue,
                }
            }

            self.dispatch_external(&cmd);
        }
    }

    /// Spawn a non-built-in command, wait or track it, then sweep for
    /// finished background jobs.
    fn dispatch_external(&mut self, cmd: &CommandLine) {
        // latch the decision once so parent bookkeeping and child
        // null-device wiring cannot disagree if the mode flips mid-spawn
        let background = cmd.background && !self.mode.foreground_only();
        match exec::spawn(cmd, background) {
            Ok(pid) => {
                if background {
                    println!("background pid is {}", pid);
                    self.jobs.add(pid);
                } else {
                    match exec::wait_foreground(pid) {
                        Ok(status) => self.last_status = status,
                        Err(e) => eprintln!("smallsh: {}", e),
                    }
                }
            }
            Err(e) => eprintln!("smallsh: {}", e),
        }
        exec::reap(&mut self.jobs);
    }
}
