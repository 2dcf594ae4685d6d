//! Signal plumbing: the SIGTSTP-driven foreground-only toggle and the
//! shell's SIGINT policy.
//!
//! The handler shares exactly two flag-sized values with the main loop
//! and performs one raw `write(2)`; nothing in it allocates or takes a
//! lock, so it is safe to run while the loop is blocked in a read or a
//! wait.

use std::sync::atomic::{AtomicBool, Ordering};

use nix::sys::signal::{sigaction, SaFlags, SigAction, SigHandler, SigSet, Signal};

use crate::error::ShellError;

const ENTER_NOTICE: &[u8] = b"\nEntering foreground-only mode (& is now ignored)\n";
const EXIT_NOTICE: &[u8] = b"\nExiting foreground-only mode\n";

/// The two process-wide flags shared between the SIGTSTP handler and
/// the main loop. Single writer on each side, plain load/store, no
/// compound mutation.
pub struct ModeState {
    foreground_only: AtomicBool,
    changed: AtomicBool,
}

impl ModeState {
    const fn new() -> Self {
        ModeState {
            foreground_only: AtomicBool::new(false),
            changed: AtomicBool::new(false),
        }
    }

    /// True while a trailing `&` is to be ignored.
    pub fn foreground_only(&self) -> bool {
        self.foreground_only.load(Ordering::SeqCst)
    }

    /// Observe-and-clear the "mode changed mid-cycle" marker. The main
    /// loop calls this wherever a signal could have interrupted a
    /// blocking step and restarts the cycle when it returns true.
    pub fn take_change(&self) -> bool {
        self.changed.swap(false, Ordering::SeqCst)
    }
}

static MODE: ModeState = ModeState::new();

/// The shared mode flags. Captured once by the shell loop; the same
/// statics are what the registered handler flips.
pub fn mode() -> &'static ModeState {
    &MODE
}

extern "C" fn on_sigtstp(_signal: libc::c_int) {
    let entering = !MODE.foreground_only.load(Ordering::SeqCst);
    MODE.foreground_only.store(entering, Ordering::SeqCst);
    MODE.changed.store(true, Ordering::SeqCst);
    let notice = if entering { ENTER_NOTICE } else { EXIT_NOTICE };
    // raw write only: buffered I/O is not reentrant-safe here
    unsafe {
        libc::write(
            libc::STDOUT_FILENO,
            notice.as_ptr() as *const libc::c_void,
            notice.len(),
        );
    }
}

/// Register the shell's dispositions: SIGTSTP toggles foreground-only
/// mode, SIGINT is ignored so only a foreground child can be
/// interrupted. The SIGTSTP registration masks everything while the
/// handler runs and sets no SA_RESTART, so a blocked read observes the
/// interruption.
pub fn install() -> Result<(), ShellError> {
    let toggle = SigAction::new(
        SigHandler::Handler(on_sigtstp),
        SaFlags::empty(),
        SigSet::all(),
    );
    unsafe { sigaction(Signal::SIGTSTP, &toggle) }
        .map_err(|e| ShellError::SignalError(e.to_string()))?;

    let ignore = SigAction::new(SigHandler::SigIgn, SaFlags::empty(), SigSet::empty());
    unsafe { sigaction(Signal::SIGINT, &ignore) }
        .map_err(|e| ShellError::SignalError(e.to_string()))?;
    Ok(())
}

/// Restore default SIGINT handling in a freshly forked child so a
/// foreground command is interruptible even though the shell ignores
/// the signal.
pub fn restore_child_defaults() {
    let default = SigAction::new(SigHandler::SigDfl, SaFlags::empty(), SigSet::empty());
    unsafe {
        let _ = sigaction(Signal::SIGINT, &default);
    }
}
