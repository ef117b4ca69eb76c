//! Running the shell from a periodic poll.
//!
//! Three contexts cooperate:
//!
//! 1. The tick interrupt calls [`TickCounter::on_tick`] every millisecond.
//! 2. A periodic callback runs [`InputMonitor::service`]. Every
//!    [`POLL_PERIOD_TICKS`] ticks it asks the port whether input is waiting
//!    and, if so, raises a [`WakeSignal`].
//! 3. The shell task blocks on the kernel's semaphore (or spins) and calls
//!    [`ShellTask::run_once`], which drains the port and dispatches any
//!    complete lines before going back to sleep.
//!
//! ```rust
//! use diagshell::serial::SerialPort;
//! use diagshell::system::builtins::BUILTINS;
//! use diagshell::system::shell::Shell;
//! use diagshell::system::task::{InputMonitor, ShellTask, WakeSignal};
//! use diagshell::system::Platform;
//! use diagshell::time::TickCounter;
//! # struct Uart { rx: &'static [u8] }
//! # impl SerialPort for Uart {
//! #     type Error = ();
//! #     fn is_ready(&self) -> bool { !self.rx.is_empty() }
//! #     fn read_byte(&mut self) -> Result<u8, ()> {
//! #         let (&byte, rest) = self.rx.split_first().ok_or(())?;
//! #         self.rx = rest;
//! #         Ok(byte)
//! #     }
//! #     fn write_byte(&mut self, _byte: u8) -> Result<(), ()> { Ok(()) }
//! # }
//! # struct Board;
//! # impl Platform for Board {
//! #     fn reset(&mut self) {}
//! #     fn delay_ms(&mut self, _ms: u32) {}
//! # }
//!
//! static TICKS: TickCounter = TickCounter::new();
//! static WAKE: WakeSignal = WakeSignal::new();
//!
//! let mut uart = Uart { rx: b"help\r" };
//! let mut board = Board;
//! let mut monitor = InputMonitor::new();
//! let mut task = ShellTask::new(Shell::new(&BUILTINS, &TICKS), &WAKE);
//!
//! for _ in 0..20 {
//!     TICKS.on_tick();
//! }
//! assert!(monitor.service(&TICKS, &uart, &WAKE));
//! assert_eq!(task.run_once(&mut uart, &mut board), Ok(1));
//! ```

use core::cell::Cell;
use core::fmt;

use critical_section::Mutex;

use super::Platform;
use super::buffer::LINE_CAPACITY;
use super::shell::Shell;
use crate::serial::SerialPort;
use crate::time::{POLL_PERIOD_TICKS, PollTimer, TickCounter};

/// A one-slot wake flag between a producer in interrupt context and a single
/// consumer task.
///
/// Raising an already raised signal has no further effect, like a binary
/// semaphore.
pub struct WakeSignal {
    raised: Mutex<Cell<bool>>,
}

impl WakeSignal {
    /// Create a lowered signal.
    pub const fn new() -> Self {
        Self {
            raised: Mutex::new(Cell::new(false)),
        }
    }

    /// Raise the signal.
    pub fn signal(&self) {
        critical_section::with(|cs| self.raised.borrow(cs).set(true));
    }

    /// Lower the signal, returning whether it was raised.
    pub fn take(&self) -> bool {
        critical_section::with(|cs| self.raised.borrow(cs).replace(false))
    }

    /// Whether the signal is raised, without lowering it.
    pub fn is_raised(&self) -> bool {
        critical_section::with(|cs| self.raised.borrow(cs).get())
    }
}

impl Default for WakeSignal {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for WakeSignal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("WakeSignal")
            .field("raised", &self.is_raised())
            .finish()
    }
}

/// The periodic side: checks the port at the poll period and wakes the shell
/// task when input is waiting.
#[derive(Debug, Default)]
pub struct InputMonitor {
    timer: PollTimer,
}

impl InputMonitor {
    /// Check the port every [`POLL_PERIOD_TICKS`] ticks.
    pub const fn new() -> Self {
        Self::with_period(POLL_PERIOD_TICKS)
    }

    /// Check the port every `period` ticks.
    pub const fn with_period(period: u32) -> Self {
        Self {
            timer: PollTimer::new(period),
        }
    }

    /// Run from the periodic context. Returns `true` when the task was woken.
    pub fn service<S>(&mut self, ticks: &TickCounter, port: &S, wake: &WakeSignal) -> bool
    where
        S: SerialPort + ?Sized,
    {
        if !self.timer.expired(ticks) || !port.is_ready() {
            return false;
        }
        wake.signal();
        true
    }
}

/// The consumer side: a shell that only runs once woken.
#[derive(Debug)]
pub struct ShellTask<const N: usize = LINE_CAPACITY> {
    shell: Shell<N>,
    wake: &'static WakeSignal,
}

impl<const N: usize> ShellTask<N> {
    /// Pair a shell with the signal that wakes it.
    pub fn new(shell: Shell<N>, wake: &'static WakeSignal) -> Self {
        Self { shell, wake }
    }

    /// If woken, drain the port through the shell.
    ///
    /// Returns the number of lines dispatched; zero when the signal was not
    /// raised.
    pub fn run_once<S, P>(&mut self, port: &mut S, platform: &mut P) -> Result<usize, S::Error>
    where
        S: SerialPort,
        P: Platform,
    {
        if !self.wake.take() {
            return Ok(0);
        }
        self.shell.poll(port, platform)
    }

    /// The shell being driven.
    pub fn shell(&self) -> &Shell<N> {
        &self.shell
    }

    /// The shell being driven, mutably (for reconfiguring echo or prompt).
    pub fn shell_mut(&mut self) -> &mut Shell<N> {
        &mut self.shell
    }
}
