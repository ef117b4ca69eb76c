#![allow(dead_code)]

use diagshell::serial::{Error, SerialPort};
use diagshell::system::Platform;
use std::collections::VecDeque;

/// Serial port backed by in-memory queues
#[derive(Default)]
pub struct MockPort {
    rx: VecDeque<u8>,
    tx: Vec<u8>,
    fail_writes: bool,
}

impl MockPort {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_input(input: &[u8]) -> Self {
        let mut port = Self::new();
        port.feed(input);
        port
    }

    /// Queue bytes as if typed at the terminal
    pub fn feed(&mut self, input: &[u8]) {
        self.rx.extend(input.iter().copied());
    }

    pub fn pending_input(&self) -> usize {
        self.rx.len()
    }

    /// Everything written since the last call
    pub fn take_output(&mut self) -> String {
        let output = String::from_utf8_lossy(&self.tx).into_owned();
        self.tx.clear();
        output
    }

    pub fn set_fail_writes(&mut self, fail: bool) {
        self.fail_writes = fail;
    }
}

impl SerialPort for MockPort {
    type Error = Error;

    fn is_ready(&self) -> bool {
        !self.rx.is_empty()
    }

    fn read_byte(&mut self) -> Result<u8, Self::Error> {
        self.rx.pop_front().ok_or(Error::NotReady)
    }

    fn write_byte(&mut self, byte: u8) -> Result<(), Self::Error> {
        if self.fail_writes {
            return Err(Error::WriteError);
        }
        self.tx.push(byte);
        Ok(())
    }
}

/// Platform that records resets and delays instead of performing them
#[derive(Default)]
pub struct MockPlatform {
    pub resets: u32,
    pub delayed_ms: u32,
}

impl Platform for MockPlatform {
    fn reset(&mut self) {
        self.resets += 1;
    }

    fn delay_ms(&mut self, ms: u32) {
        self.delayed_ms += ms;
    }
}
