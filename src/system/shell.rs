//! The byte-by-byte input loop.
//!
//! [`Shell`] owns the line buffer and turns a stream of received bytes into
//! dispatched commands:
//!
//! ```text
//!            printable byte                    CR
//!   Idle ───────────────────▶ Editing ─────────────────▶ Processing
//!    ▲  (prompt, echo)          │  ▲                          │
//!    │                          │  │ printable byte / BS      │
//!    │   BS empties the line    │  └──────────┘               │
//!    └──────────────────────────┘                             │
//!    └────────────────────────────────────────────────────────┘
//!                 tokenize, dispatch, clear the line
//! ```
//!
//! # Character Handling
//!
//! - **Printable ASCII**: appended and echoed. The first byte of a line is
//!   preceded by the prompt. Bytes past the line capacity are dropped.
//! - **Backspace/Delete**: removes the last byte, then redisplays the prompt
//!   and whatever is left of the line.
//! - **CR**: ends the line and dispatches it.
//! - **Anything else**: ignored, including the LF of a CRLF pair.

use super::buffer::{EditBuffer, LINE_CAPACITY};
use super::command::{CommandTable, Context, DispatchOutcome};
use super::error::Error;
use super::tokenizer::tokenize;
use super::{ASCII_BACKSPACE, ASCII_CR, ASCII_DEL, Platform};
use crate::serial::{SerialPort, SerialWriter};
use crate::time::TickCounter;

/// Prompt shown at the start of each line.
pub const DEFAULT_PROMPT: &str = "> ";

/// Where the shell is within a line.
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum State {
    /// Nothing typed yet.
    Idle,
    /// At least one byte is buffered.
    Editing,
    /// A line is being tokenized and dispatched.
    Processing,
}

#[cfg(feature = "defmt")]
impl defmt::Format for State {
    fn format(&self, f: defmt::Formatter) {
        match self {
            State::Idle => defmt::write!(f, "Idle"),
            State::Editing => defmt::write!(f, "Editing"),
            State::Processing => defmt::write!(f, "Processing"),
        }
    }
}

/// A single shell session.
///
/// All line and parse state lives here, so a `Shell` can be built and driven
/// in isolation. The session is not reentrant: [`poll`](Self::poll) and
/// [`process_byte`](Self::process_byte) take `&mut self` and each dispatch
/// runs to completion before the next byte is looked at.
///
/// # Examples
///
/// ```rust
/// use diagshell::system::builtins::BUILTINS;
/// use diagshell::system::shell::Shell;
/// use diagshell::time::TICKS;
///
/// let mut shell = Shell::new(&BUILTINS, &TICKS);
/// shell.set_prompt("diag> ");
/// shell.set_echo(true);
/// ```
#[derive(Debug)]
pub struct Shell<const N: usize = LINE_CAPACITY> {
    buffer: EditBuffer<N>,
    state: State,
    commands: &'static CommandTable,
    ticks: &'static TickCounter,
    last_line: u32,
    prompt: &'static str,
    prompt_shown: bool,
    echo_enabled: bool,
}

impl Shell {
    /// Create a shell with the default line capacity.
    ///
    /// Echo is enabled and the prompt is [`DEFAULT_PROMPT`].
    pub fn new(commands: &'static CommandTable, ticks: &'static TickCounter) -> Self {
        Self::with_line_capacity(commands, ticks)
    }
}

impl<const N: usize> Shell<N> {
    /// Create a shell whose line buffer holds `N` bytes.
    pub fn with_line_capacity(commands: &'static CommandTable, ticks: &'static TickCounter) -> Self {
        Self {
            buffer: EditBuffer::new(),
            state: State::Idle,
            commands,
            ticks,
            last_line: ticks.cumulative(),
            prompt: DEFAULT_PROMPT,
            prompt_shown: false,
            echo_enabled: true,
        }
    }

    /// Enable or disable echoing of typed bytes, prompts and line redisplay.
    ///
    /// Command output and diagnostics are written either way.
    pub fn set_echo(&mut self, enabled: bool) {
        self.echo_enabled = enabled;
    }

    /// Replace the prompt.
    pub fn set_prompt(&mut self, prompt: &'static str) {
        self.prompt = prompt;
    }

    /// Current line state.
    pub fn state(&self) -> State {
        self.state
    }

    /// The line typed so far.
    pub fn buffer(&self) -> &EditBuffer<N> {
        &self.buffer
    }

    /// Process every byte the port has ready, then return.
    ///
    /// Never waits for more input. Returns the number of lines dispatched.
    pub fn poll<S, P>(&mut self, port: &mut S, platform: &mut P) -> Result<usize, S::Error>
    where
        S: SerialPort,
        P: Platform,
    {
        let mut lines = 0;
        while port.is_ready() {
            let byte = port.read_byte()?;
            if self.process_byte(byte, port, platform)?.is_some() {
                lines += 1;
            }
        }
        Ok(lines)
    }

    /// Process one received byte.
    ///
    /// Returns the dispatch outcome when the byte completed a non-blank line.
    pub fn process_byte<S, P>(
        &mut self,
        byte: u8,
        port: &mut S,
        platform: &mut P,
    ) -> Result<Option<DispatchOutcome>, S::Error>
    where
        S: SerialPort,
        P: Platform,
    {
        match byte {
            ASCII_CR => self.process_line(port, platform),
            ASCII_BACKSPACE | ASCII_DEL => {
                self.erase(port)?;
                Ok(None)
            }
            0x20..=0x7E => {
                self.append(byte, port)?;
                Ok(None)
            }
            _ => Ok(None),
        }
    }

    fn append<S: SerialPort>(&mut self, byte: u8, port: &mut S) -> Result<(), S::Error> {
        if !self.buffer.push(byte) {
            warn!("dropped keystroke: {}", Error::BufferOverflow);
            return Ok(());
        }

        let first = self.state == State::Idle;
        self.state = State::Editing;
        if self.echo_enabled {
            if first && !self.prompt_shown {
                port.write_str(self.prompt)?;
            }
            port.write_byte(byte)?;
        }
        self.prompt_shown = true;
        Ok(())
    }

    fn erase<S: SerialPort>(&mut self, port: &mut S) -> Result<(), S::Error> {
        if self.state != State::Editing || !self.buffer.pop() {
            return Ok(());
        }

        if self.buffer.is_empty() {
            self.state = State::Idle;
        }
        if self.echo_enabled {
            port.write_str("\r\n")?;
            port.write_str(self.prompt)?;
            port.write_bytes(self.buffer.as_bytes())?;
        }
        Ok(())
    }

    fn process_line<S, P>(
        &mut self,
        port: &mut S,
        platform: &mut P,
    ) -> Result<Option<DispatchOutcome>, S::Error>
    where
        S: SerialPort,
        P: Platform,
    {
        self.state = State::Processing;
        let idle_ticks = self.ticks.elapsed_since_and_update(&mut self.last_line);
        let result = self.run_line(idle_ticks, port, platform);

        self.buffer.clear();
        self.state = State::Idle;
        self.prompt_shown = false;
        result
    }

    fn run_line<S, P>(
        &self,
        idle_ticks: u32,
        port: &mut S,
        platform: &mut P,
    ) -> Result<Option<DispatchOutcome>, S::Error>
    where
        S: SerialPort,
        P: Platform,
    {
        if self.echo_enabled {
            port.write_str("\r\n")?;
        }

        let args = tokenize(self.buffer.as_bytes());
        if args.is_blank() {
            return Ok(None);
        }

        let mut out = SerialWriter::new(port);
        let mut ctx = Context {
            out: &mut out,
            platform,
            commands: self.commands,
            ticks: self.ticks,
            idle_ticks,
        };
        let outcome = self.commands.dispatch(&args, &mut ctx);
        debug!("dispatched line: {}", outcome);
        out.finish()?;

        if let Some(error) = outcome.error() {
            port.write_str(error.message())?;
            port.write_str("\r\n")?;
        }
        Ok(Some(outcome))
    }
}
