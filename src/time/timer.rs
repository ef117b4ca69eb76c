use super::TickCounter;

/// Period of the tick source in milliseconds.
pub const TICK_PERIOD_MS: u32 = 1;

/// How many ticks pass between two looks at the serial port (20 ms).
pub const POLL_PERIOD_TICKS: u32 = 20;

/// Divides the tick stream down to a coarser period.
///
/// The timer is the single consumer of [`TickCounter`]'s pending ticks: each
/// call to [`expired`](Self::expired) drains what is pending and reports
/// whether a whole period has gone by. This lets the shell be polled at
/// 20 ms regardless of the kernel timer's native resolution.
#[derive(Debug)]
pub struct PollTimer {
    period: u32,
    counted: u32,
}

impl PollTimer {
    /// Create a timer firing every `period` ticks. A period of zero is
    /// treated as one.
    pub const fn new(period: u32) -> Self {
        Self {
            period: if period == 0 { 1 } else { period },
            counted: 0,
        }
    }

    /// The period in ticks.
    pub fn period(&self) -> u32 {
        self.period
    }

    /// Consume pending ticks and return `true` once per elapsed period.
    ///
    /// Ticks beyond the current period stay pending for the next call, so a
    /// late caller catches up one period at a time rather than losing ticks.
    pub fn expired(&mut self, ticks: &TickCounter) -> bool {
        while self.counted < self.period && ticks.try_consume_tick() {
            self.counted += 1;
        }
        if self.counted < self.period {
            return false;
        }
        self.counted = 0;
        true
    }
}

impl Default for PollTimer {
    fn default() -> Self {
        Self::new(POLL_PERIOD_TICKS)
    }
}
