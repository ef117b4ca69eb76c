//! Tick accounting for the shell and the rest of the firmware.
//!
//! A periodic source (the kernel's 1 ms timer, see [`TICK_PERIOD_MS`]) calls
//! [`TICKS.on_tick()`](TickCounter::on_tick). Two kinds of reader sit on the
//! other side:
//!
//! - **Tick consumers** drain pending ticks one at a time. [`PollTimer`] does
//!   this to derive the 20 ms shell poll period.
//! - **Elapsed-time readers** keep their own `last_seen` snapshot and ask for
//!   the wrapping difference, optionally moving the snapshot forward.
//!
//! ```rust
//! use diagshell::time::{PollTimer, TickCounter};
//!
//! static TICKS: TickCounter = TickCounter::new();
//! let mut timer = PollTimer::new(20);
//!
//! for _ in 0..19 {
//!     TICKS.on_tick();
//! }
//! assert!(!timer.expired(&TICKS));
//!
//! TICKS.on_tick();
//! assert!(timer.expired(&TICKS));
//! ```

#![deny(unsafe_code)]

mod tick;
mod timer;

pub use tick::{TICKS, TickCounter};
pub use timer::{POLL_PERIOD_TICKS, PollTimer, TICK_PERIOD_MS};

#[cfg(test)]
mod tests;
