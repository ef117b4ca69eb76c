//! Static command table and the dispatcher that runs it.
//!
//! A [`CommandTable`] is a fixed slice of [`CommandEntry`] values, normally a
//! `static` built at compile time. Dispatching a [`ParsedCommand`] against it
//! goes through these steps, in order:
//!
//! 1. Fold the command token to uppercase, the table's canonical case.
//! 2. Scan the table for an entry with the same length and bytes. There is no
//!    prefix or abbreviation matching.
//! 3. No entry: [`DispatchOutcome::Unrecognized`].
//! 4. First parameter is exactly `?`: print the entry's help text and return
//!    [`DispatchOutcome::HelpRequested`] without running the handler.
//! 5. More parameters than the entry accepts:
//!    [`DispatchOutcome::ParamCountInvalid`].
//! 6. Run the handler: [`DispatchOutcome::Executed`].
//!
//! Step 5 only rejects *too many* parameters. Fewer than the maximum is
//! accepted and handlers must check for the ones they need.

use core::fmt;

use heapless::Vec;

use super::Platform;
use super::error::Error;
use super::tokenizer::ParsedCommand;
use crate::time::TickCounter;

/// Longest command name a table may hold.
pub const MAX_NAME_LEN: usize = 16;

/// Function signature for command handlers.
///
/// Handlers write through `ctx.out` and report only write failures; command
/// level problems such as a bad parameter are printed, not returned.
pub type CommandFn = fn(ctx: &mut Context<'_>, args: &ParsedCommand<'_>) -> fmt::Result;

/// What a command does once validated.
#[derive(Clone, Copy)]
pub enum Handler {
    /// Call this function.
    Function(CommandFn),
    /// Validate the line and do nothing else.
    Nop,
}

impl fmt::Debug for Handler {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Handler::Function(_) => f.write_str("Function"),
            Handler::Nop => f.write_str("Nop"),
        }
    }
}

/// One row of the command table.
#[derive(Debug, Clone)]
pub struct CommandEntry {
    /// Command name in uppercase.
    pub name: &'static str,
    /// Handler run after validation.
    pub handler: Handler,
    /// Maximum number of parameters accepted.
    pub max_params: usize,
    /// Text printed for `<name> ?`. `None` prints an empty line.
    pub help: Option<&'static str>,
}

/// Everything a handler may touch while it runs.
pub struct Context<'a> {
    /// Output stream back to the terminal.
    pub out: &'a mut dyn fmt::Write,
    /// Board services (reset, delays).
    pub platform: &'a mut dyn Platform,
    /// The table the command was found in.
    pub commands: &'a CommandTable,
    /// The tick counter the shell runs on.
    pub ticks: &'a TickCounter,
    /// Ticks between the previous command line and this one.
    pub idle_ticks: u32,
}

impl fmt::Debug for Context<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Context")
            .field("commands", &self.commands)
            .field("ticks", &self.ticks)
            .field("idle_ticks", &self.idle_ticks)
            .finish_non_exhaustive()
    }
}

/// Result of dispatching one line.
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum DispatchOutcome {
    /// The handler ran (or was [`Handler::Nop`]).
    Executed,
    /// Help text was printed instead of running the handler.
    HelpRequested,
    /// No command by that name.
    Unrecognized,
    /// Too many parameters for the command.
    ParamCountInvalid,
}

impl DispatchOutcome {
    /// `true` when the line named a command and was valid for it.
    pub fn is_success(&self) -> bool {
        matches!(self, DispatchOutcome::Executed | DispatchOutcome::HelpRequested)
    }

    /// The error to report, if the line was rejected.
    pub fn error(&self) -> Option<Error> {
        match self {
            DispatchOutcome::Executed | DispatchOutcome::HelpRequested => None,
            DispatchOutcome::Unrecognized => Some(Error::Unrecognized),
            DispatchOutcome::ParamCountInvalid => Some(Error::ParamCountInvalid),
        }
    }
}

#[cfg(feature = "defmt")]
impl defmt::Format for DispatchOutcome {
    fn format(&self, f: defmt::Formatter) {
        match self {
            DispatchOutcome::Executed => defmt::write!(f, "Executed"),
            DispatchOutcome::HelpRequested => defmt::write!(f, "HelpRequested"),
            DispatchOutcome::Unrecognized => defmt::write!(f, "Unrecognized"),
            DispatchOutcome::ParamCountInvalid => defmt::write!(f, "ParamCountInvalid"),
        }
    }
}

/// A fixed set of commands.
///
/// # Examples
///
/// ```rust
/// use diagshell::system::command::{CommandEntry, CommandTable, Handler};
///
/// static COMMANDS: CommandTable = CommandTable::new(&[
///     CommandEntry { name: "PING", handler: Handler::Nop, max_params: 0, help: Some("Does nothing") },
/// ]);
///
/// assert!(COMMANDS.find(b"ping").is_some());
/// assert!(COMMANDS.find(b"PIN").is_none());
/// ```
#[derive(Debug)]
pub struct CommandTable {
    entries: &'static [CommandEntry],
}

impl CommandTable {
    /// Wrap a slice of entries. Names must already be uppercase.
    pub const fn new(entries: &'static [CommandEntry]) -> Self {
        Self { entries }
    }

    /// All entries in table order.
    pub fn entries(&self) -> &'static [CommandEntry] {
        self.entries
    }

    /// Look up a command token, ignoring case.
    pub fn find(&self, token: &[u8]) -> Option<&'static CommandEntry> {
        let name = canonical_name(token)?;
        self.entries
            .iter()
            .find(|entry| entry.name.len() == name.len() && entry.name.as_bytes() == &name[..])
    }

    /// Validate a parsed line and run its handler.
    ///
    /// Help text goes to `ctx.out` here; reporting rejected lines is left to
    /// the caller. A handler's write failure is logged and otherwise ignored
    /// since the command did run.
    pub fn dispatch(&self, args: &ParsedCommand<'_>, ctx: &mut Context<'_>) -> DispatchOutcome {
        let Some(entry) = self.find(args.command()) else {
            return DispatchOutcome::Unrecognized;
        };

        if args.param(0) == Some(&b"?"[..]) {
            let help = entry.help.unwrap_or("");
            if write!(ctx.out, "{help}\r\n").is_err() {
                warn!("help output for {=str} failed", entry.name);
            }
            return DispatchOutcome::HelpRequested;
        }

        if args.param_count() > entry.max_params {
            return DispatchOutcome::ParamCountInvalid;
        }

        if let Handler::Function(handler) = entry.handler {
            if handler(ctx, args).is_err() {
                warn!("output from {=str} failed", entry.name);
            }
        }
        DispatchOutcome::Executed
    }
}

/// Uppercase copy of a command token, or `None` when it is too long to
/// match any entry.
fn canonical_name(token: &[u8]) -> Option<Vec<u8, MAX_NAME_LEN>> {
    let mut name = Vec::new();
    for &byte in token {
        name.push(byte.to_ascii_uppercase()).ok()?;
    }
    Some(name)
}
