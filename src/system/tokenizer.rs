//! Splits a finished line into a command token and its parameters.
//!
//! Tokens are maximal runs of non-space bytes. The first is the command; up
//! to [`MAX_PARAMS`] more become parameters and anything after that is
//! dropped without complaint.
//!
//! ```text
//! TEST2   AA  0 16 extra extra     command "TEST2"
//!                                  params  "AA", "0", "16", "extra"
//! ```

use heapless::Vec;

use super::{ASCII_CR, ASCII_LF, ASCII_SPACE};

/// Maximum number of parameters kept per line.
pub const MAX_PARAMS: usize = 4;

/// A tokenized line.
///
/// Every slice borrows from the line buffer it was built from, so a
/// `ParsedCommand` cannot outlive the next edit of that buffer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedCommand<'a> {
    command: &'a [u8],
    params: Vec<&'a [u8], MAX_PARAMS>,
}

impl<'a> ParsedCommand<'a> {
    /// The command token as typed (not case-folded).
    pub fn command(&self) -> &'a [u8] {
        self.command
    }

    /// Number of parameters, at most [`MAX_PARAMS`].
    pub fn param_count(&self) -> usize {
        self.params.len()
    }

    /// Parameter `index` (zero-based), if supplied.
    pub fn param(&self, index: usize) -> Option<&'a [u8]> {
        self.params.get(index).copied()
    }

    /// Parameter `index` as text. `None` when missing or not UTF-8.
    pub fn param_str(&self, index: usize) -> Option<&'a str> {
        self.param(index)
            .and_then(|param| core::str::from_utf8(param).ok())
    }

    /// All parameters in order.
    pub fn params(&self) -> &[&'a [u8]] {
        &self.params
    }

    /// `true` when the line held no tokens at all.
    ///
    /// A lone space survives tokenizing as the command, so a command made
    /// only of spaces also counts as blank.
    pub fn is_blank(&self) -> bool {
        self.params.is_empty() && self.command.iter().all(|&byte| byte == ASCII_SPACE)
    }
}

/// Tokenize one line.
///
/// A single leading CR or LF left over from the previous line's terminator is
/// skipped. If the line has no space, or its only candidate split is a
/// trailing space, the whole line is the command and there are no
/// parameters.
///
/// # Examples
///
/// ```rust
/// use diagshell::system::tokenizer::tokenize;
///
/// let parsed = tokenize(b"TEST2 1 2 3");
/// assert_eq!(parsed.command(), b"TEST2");
/// assert_eq!(parsed.params(), &[&b"1"[..], &b"2"[..], &b"3"[..]]);
///
/// let parsed = tokenize(b"HELP");
/// assert_eq!(parsed.command(), b"HELP");
/// assert_eq!(parsed.param_count(), 0);
/// ```
pub fn tokenize(line: &[u8]) -> ParsedCommand<'_> {
    let line = match line.first() {
        Some(&ASCII_LF) | Some(&ASCII_CR) => &line[1..],
        _ => line,
    };

    let mut parsed = ParsedCommand {
        command: line,
        params: Vec::new(),
    };

    let split = match line.iter().position(|&byte| byte == ASCII_SPACE) {
        Some(index) if index + 1 < line.len() => index,
        _ => return parsed,
    };
    parsed.command = &line[..split];

    let mut i = split;
    while i < line.len() && !parsed.params.is_full() {
        if line[i] == ASCII_SPACE {
            i += 1;
            continue;
        }

        let start = i;
        while i < line.len() && line[i] != ASCII_SPACE {
            i += 1;
        }
        // Cannot fail: the loop condition checked for room
        let _ = parsed.params.push(&line[start..i]);
    }

    parsed
}
