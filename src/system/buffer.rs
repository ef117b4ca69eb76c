//! Fixed-capacity line buffer.

use heapless::Vec;

/// Default line capacity in bytes.
pub const LINE_CAPACITY: usize = 100;

/// The line being typed.
///
/// A fixed-capacity byte buffer supporting append and truncate-last only.
/// Appends past capacity are refused rather than wrapping, and
/// [`clear`](Self::clear) just resets the length: bytes past it stay in
/// memory but can no longer be reached.
///
/// # Examples
///
/// ```rust
/// use diagshell::system::buffer::EditBuffer;
///
/// let mut line = EditBuffer::<4>::new();
/// assert!(line.push(b'h'));
/// assert!(line.push(b'i'));
/// assert!(line.pop());
/// assert_eq!(line.as_bytes(), b"h");
/// ```
#[derive(Debug, Default)]
pub struct EditBuffer<const N: usize = LINE_CAPACITY> {
    bytes: Vec<u8, N>,
}

impl<const N: usize> EditBuffer<N> {
    /// Create an empty buffer.
    pub const fn new() -> Self {
        Self { bytes: Vec::new() }
    }

    /// Append a byte. Returns `false`, leaving the buffer untouched, when full.
    pub fn push(&mut self, byte: u8) -> bool {
        self.bytes.push(byte).is_ok()
    }

    /// Remove the last byte. Returns `false` when already empty.
    pub fn pop(&mut self) -> bool {
        self.bytes.pop().is_some()
    }

    /// Number of bytes currently held.
    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    /// `true` when nothing has been typed.
    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    /// `true` when another append would be refused.
    pub fn is_full(&self) -> bool {
        self.bytes.is_full()
    }

    /// Maximum number of bytes the buffer holds.
    pub const fn capacity(&self) -> usize {
        N
    }

    /// The current line.
    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// Forget the current line.
    pub fn clear(&mut self) {
        self.bytes.clear();
    }
}
