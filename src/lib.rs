//! # diagshell - serial diagnostic shell for microcontrollers
//!
//! A small command-line interpreter that firmware runs over a UART, paired
//! with the tick service that decides when the UART gets looked at. The crate
//! is `no_std`, allocation-free and built around fixed-capacity buffers.
//!
//! ## Features
//!
//! ### Command Shell
//! - Byte-at-a-time line editing with echo, prompt and backspace redisplay
//! - Tokenizing into a command and up to four parameters
//! - Case-insensitive dispatch against a static command table
//! - `<COMMAND> ?` help lookup and "at most N" parameter validation
//! - Built-in `HELP`, `RESET`, `TEST`, `TEST2` and `CLS` commands
//!
//! ### Tick Service
//! - Wrapping pending/cumulative tick counters guarded by a critical section
//! - Single-consumer tick draining and elapsed-since snapshots
//! - Coarse poll timer and wake signal for driving the shell from a task
//!
//! ## Usage
//!
//! Add this to your `Cargo.toml`:
//!
//! ```toml
//! [dependencies]
//! diagshell = "0.1.0"
//! ```
//!
//! ### Wiring the shell to a UART
//!
//! ```rust,no_run
//! use diagshell::serial::SerialPort;
//! use diagshell::system::builtins::BUILTINS;
//! use diagshell::system::shell::Shell;
//! use diagshell::system::Platform;
//! use diagshell::time::TICKS;
//! # struct Uart;
//! # impl SerialPort for Uart {
//! #     type Error = ();
//! #     fn is_ready(&self) -> bool { false }
//! #     fn read_byte(&mut self) -> Result<u8, Self::Error> { Err(()) }
//! #     fn write_byte(&mut self, _byte: u8) -> Result<(), Self::Error> { Ok(()) }
//! # }
//! # struct Board;
//! # impl Platform for Board {
//! #     fn reset(&mut self) {}
//! #     fn delay_ms(&mut self, _ms: u32) {}
//! # }
//!
//! let mut uart = Uart;
//! let mut board = Board;
//! let mut shell = Shell::new(&BUILTINS, &TICKS);
//!
//! // From the 1 ms timer interrupt: TICKS.on_tick();
//! // From the shell task, once woken:
//! shell.poll(&mut uart, &mut board).unwrap();
//! ```
//!
//! ## Optional Features
//!
//! - `std`: Hosted builds; enables the `critical-section` std implementation
//! - `defmt`: Enable defmt logging support for embedded debugging

#![cfg_attr(not(any(test, feature = "std")), no_std)]
#![deny(missing_docs)]
#![warn(missing_debug_implementations)]

#[macro_use]
mod fmt;

/// Serial port abstraction the shell reads from and writes to.
pub mod serial;

/// The command shell: line editing, tokenizing, dispatch and built-in commands.
///
/// Everything that runs in the shell task's context lives here.
pub mod system;

/// Tick accounting and the coarse poll timer built on it.
pub mod time;
