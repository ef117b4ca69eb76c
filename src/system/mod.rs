//! Diagnostic command shell for embedded devices.
//!
//! The shell reads a serial port one byte at a time, builds up a line with
//! simple editing, and when the user presses Enter runs the line against a
//! static command table.
//!
//! # Components
//!
//! ```text
//! ┌──────────────┐   ┌──────────────┐   ┌──────────────┐   ┌──────────────┐
//! │ Serial Port  │──▶│ Shell        │──▶│ Tokenizer    │──▶│ Command      │
//! │ (bytes in)   │   │ (edit, echo) │   │ (cmd + ≤4)   │   │ Table        │
//! └──────────────┘   └──────────────┘   └──────────────┘   └──────────────┘
//!        ▲                  │                                      │
//!        │                  ▼                                      ▼
//!        │           ┌──────────────┐                      ┌──────────────┐
//!        └───────────│ Edit Buffer  │                      │ Handler      │
//!      echo/output   └──────────────┘                      └──────────────┘
//! ```
//!
//! - **[`buffer`]**: fixed-capacity line buffer
//! - **[`tokenizer`]**: splits a line into command and parameters
//! - **[`command`]**: command table, dispatch and outcomes
//! - **[`builtins`]**: the `HELP`/`RESET`/`TEST`/`TEST2`/`CLS` table
//! - **[`shell`]**: the byte-by-byte input loop
//! - **[`task`]**: wake signal and task wrapper for running the shell from a
//!   periodic poll
//!
//! # Usage
//!
//! ```rust
//! use core::fmt::{self, Write};
//!
//! use diagshell::system::command::{CommandEntry, CommandTable, Context, Handler};
//! use diagshell::system::shell::Shell;
//! use diagshell::system::tokenizer::ParsedCommand;
//! use diagshell::time::TickCounter;
//!
//! fn status(ctx: &mut Context<'_>, _args: &ParsedCommand<'_>) -> fmt::Result {
//!     ctx.out.write_str("OK\r\n")
//! }
//!
//! static TICKS: TickCounter = TickCounter::new();
//! static COMMANDS: CommandTable = CommandTable::new(&[CommandEntry {
//!     name: "STATUS",
//!     handler: Handler::Function(status),
//!     max_params: 0,
//!     help: Some("Show device status"),
//! }]);
//!
//! let shell = Shell::new(&COMMANDS, &TICKS);
//! assert!(shell.buffer().is_empty());
//! ```

#![deny(unsafe_code)]

/// Error types for the command shell
pub mod error;

pub mod buffer;
pub mod builtins;
pub mod command;
pub mod numeric;
pub mod shell;
pub mod task;
pub mod tokenizer;

pub use error::Error;

/// ASCII backspace character (0x08).
pub const ASCII_BACKSPACE: u8 = 0x08;
/// ASCII line feed character (0x0A).
pub const ASCII_LF: u8 = 0x0A;
/// ASCII carriage return character (0x0D).
pub const ASCII_CR: u8 = 0x0D;
/// ASCII delete character (0x7F).
pub const ASCII_DEL: u8 = 0x7F;
/// ASCII space character (0x20).
pub const ASCII_SPACE: u8 = 0x20;

/// Board services the built-in commands need.
///
/// # Examples
///
/// ```rust
/// use diagshell::system::Platform;
///
/// struct Board {
///     resets: u32,
/// }
///
/// impl Platform for Board {
///     fn reset(&mut self) {
///         // cortex_m::peripheral::SCB::sys_reset() on real hardware
///         self.resets += 1;
///     }
///
///     fn delay_ms(&mut self, _ms: u32) {}
/// }
/// ```
pub trait Platform {
    /// Reset the device. On hardware this does not return.
    fn reset(&mut self);

    /// Busy-wait or sleep for `ms` milliseconds.
    fn delay_ms(&mut self, ms: u32);
}
