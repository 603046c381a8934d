//! OS signal identifiers.

use nix::libc;
use nix::sys::signal::Signal as NixSignal;
use std::fmt;

/// An OS signal, identified by its raw number on the host platform.
///
/// Displays as the conventional name (`SIGTERM`) when the platform knows
/// the number, and as `signal <n>` otherwise.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Signal(i32);

impl Signal {
    pub const SIGHUP: Signal = Signal(libc::SIGHUP);
    pub const SIGINT: Signal = Signal(libc::SIGINT);
    pub const SIGQUIT: Signal = Signal(libc::SIGQUIT);
    pub const SIGKILL: Signal = Signal(libc::SIGKILL);
    pub const SIGUSR1: Signal = Signal(libc::SIGUSR1);
    pub const SIGUSR2: Signal = Signal(libc::SIGUSR2);
    pub const SIGPIPE: Signal = Signal(libc::SIGPIPE);
    pub const SIGALRM: Signal = Signal(libc::SIGALRM);
    pub const SIGTERM: Signal = Signal(libc::SIGTERM);
    pub const SIGCHLD: Signal = Signal(libc::SIGCHLD);

    pub const fn from_raw(signo: i32) -> Self {
        Self(signo)
    }

    pub const fn as_raw(&self) -> i32 {
        self.0
    }

    /// Conventional name, if the platform defines this signal number.
    pub fn name(&self) -> Option<&'static str> {
        NixSignal::try_from(self.0).ok().map(|sig| sig.as_str())
    }
}

impl From<NixSignal> for Signal {
    fn from(sig: NixSignal) -> Self {
        Self(sig as i32)
    }
}

impl fmt::Display for Signal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.name() {
            Some(name) => f.write_str(name),
            None => write!(f, "signal {}", self.0),
        }
    }
}
