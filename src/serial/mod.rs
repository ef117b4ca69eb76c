//! A byte-oriented serial port abstraction
//!
//! The shell never touches UART registers itself. Firmware implements
//! [`SerialPort`] over its driver and hands it to the shell on every poll.
//! The trait is small: a readiness query plus single-byte
//! read and write, which is what nearly every UART peripheral offers.
//!
//! # Examples
//!
//! ```rust
//! use diagshell::serial::{Error, SerialPort};
//!
//! struct Loopback {
//!     last: Option<u8>,
//! }
//!
//! impl SerialPort for Loopback {
//!     type Error = Error;
//!
//!     fn is_ready(&self) -> bool {
//!         self.last.is_some()
//!     }
//!
//!     fn read_byte(&mut self) -> Result<u8, Self::Error> {
//!         self.last.take().ok_or(Error::NotReady)
//!     }
//!
//!     fn write_byte(&mut self, byte: u8) -> Result<(), Self::Error> {
//!         self.last = Some(byte);
//!         Ok(())
//!     }
//! }
//!
//! let mut port = Loopback { last: None };
//! port.write_str("A").unwrap();
//! assert_eq!(port.read_byte(), Ok(b'A'));
//! ```

#![deny(unsafe_code)]

use core::fmt;

/// Common error types for serial port drivers
pub mod error;

pub use error::Error;

/// A serial port that can be polled for input and written to.
pub trait SerialPort {
    /// Associated error type
    type Error: core::fmt::Debug;

    /// Returns `true` when at least one received byte is waiting.
    ///
    /// This must not block and must not consume input. It is called from the
    /// periodic poll context as well as from the shell task.
    fn is_ready(&self) -> bool;

    /// Read one received byte.
    fn read_byte(&mut self) -> Result<u8, Self::Error>;

    /// Write one byte.
    fn write_byte(&mut self, byte: u8) -> Result<(), Self::Error>;

    /// Write a run of bytes, stopping at the first failure.
    fn write_bytes(&mut self, bytes: &[u8]) -> Result<(), Self::Error> {
        for &byte in bytes {
            self.write_byte(byte)?;
        }
        Ok(())
    }

    /// Write a string.
    fn write_str(&mut self, text: &str) -> Result<(), Self::Error> {
        self.write_bytes(text.as_bytes())
    }
}

/// Adapts a [`SerialPort`] to [`core::fmt::Write`].
///
/// `fmt::Error` carries no payload, so the first driver error is kept here and
/// returned by [`finish`](Self::finish). Once a write has failed every later
/// write fails too, which stops a handler from interleaving partial output.
pub struct SerialWriter<'a, S: SerialPort> {
    port: &'a mut S,
    error: Option<S::Error>,
}

impl<'a, S: SerialPort> SerialWriter<'a, S> {
    /// Wrap a port.
    pub fn new(port: &'a mut S) -> Self {
        Self { port, error: None }
    }

    /// Returns the first driver error seen, if any.
    pub fn finish(self) -> Result<(), S::Error> {
        match self.error {
            Some(error) => Err(error),
            None => Ok(()),
        }
    }
}

impl<S: SerialPort> fmt::Write for SerialWriter<'_, S> {
    fn write_str(&mut self, s: &str) -> fmt::Result {
        if self.error.is_some() {
            return Err(fmt::Error);
        }
        self.port.write_str(s).map_err(|error| {
            self.error = Some(error);
            fmt::Error
        })
    }
}

impl<S: SerialPort> fmt::Debug for SerialWriter<'_, S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SerialWriter")
            .field("error", &self.error)
            .finish()
    }
}
