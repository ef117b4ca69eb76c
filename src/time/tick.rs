//! Monotonic tick bookkeeping shared between interrupt and task context.

use core::cell::Cell;
use core::fmt;

use critical_section::Mutex;

/// The process-wide tick counter.
///
/// The firmware's periodic tick interrupt calls [`TickCounter::on_tick`] on
/// this instance; everything else reads it.
pub static TICKS: TickCounter = TickCounter::new();

#[derive(Clone, Copy)]
struct Counts {
    pending: u32,
    cumulative: u32,
}

/// Two wrapping 32-bit tick counters.
///
/// `pending` counts ticks not yet taken by the single logical consumer through
/// [`try_consume_tick`](Self::try_consume_tick). `cumulative` only ever grows
/// (modulo 2^32) and serves elapsed-time snapshots. Consumers must only ever
/// compare counts by wrapping difference.
///
/// The tick source writes from interrupt context while readers run in task
/// context, so every access goes through a critical section.
///
/// # Examples
///
/// ```rust
/// use diagshell::time::TickCounter;
///
/// let ticks = TickCounter::new();
/// let mut last_seen = 0;
///
/// ticks.on_tick();
/// ticks.on_tick();
/// assert_eq!(ticks.elapsed_since_and_update(&mut last_seen), 2);
/// assert_eq!(ticks.elapsed_since_and_update(&mut last_seen), 0);
/// ```
pub struct TickCounter {
    counts: Mutex<Cell<Counts>>,
}

impl TickCounter {
    /// Create a counter with both counts at zero.
    pub const fn new() -> Self {
        Self {
            counts: Mutex::new(Cell::new(Counts {
                pending: 0,
                cumulative: 0,
            })),
        }
    }

    #[cfg(test)]
    pub(crate) const fn starting_at(pending: u32, cumulative: u32) -> Self {
        Self {
            counts: Mutex::new(Cell::new(Counts {
                pending,
                cumulative,
            })),
        }
    }

    /// Record one tick. Called from the periodic tick source only.
    pub fn on_tick(&self) {
        critical_section::with(|cs| {
            let cell = self.counts.borrow(cs);
            let mut counts = cell.get();
            counts.pending = counts.pending.wrapping_add(1);
            counts.cumulative = counts.cumulative.wrapping_add(1);
            cell.set(counts);
        });
    }

    /// Take one pending tick if there is one.
    ///
    /// Meant for a single consumer; two consumers would split the ticks
    /// between them.
    pub fn try_consume_tick(&self) -> bool {
        critical_section::with(|cs| {
            let cell = self.counts.borrow(cs);
            let mut counts = cell.get();
            if counts.pending == 0 {
                return false;
            }
            counts.pending -= 1;
            cell.set(counts);
            true
        })
    }

    /// Ticks recorded but not yet consumed.
    pub fn pending(&self) -> u32 {
        critical_section::with(|cs| self.counts.borrow(cs).get().pending)
    }

    /// Ticks recorded since startup, wrapping at 2^32.
    pub fn cumulative(&self) -> u32 {
        critical_section::with(|cs| self.counts.borrow(cs).get().cumulative)
    }

    /// Ticks elapsed since the `last_seen` snapshot.
    pub fn elapsed_since(&self, last_seen: u32) -> u32 {
        self.cumulative().wrapping_sub(last_seen)
    }

    /// Ticks elapsed since `*last_seen`, then moves the snapshot to now.
    ///
    /// The read and the snapshot update happen in one critical section so no
    /// tick can fall between them.
    pub fn elapsed_since_and_update(&self, last_seen: &mut u32) -> u32 {
        critical_section::with(|cs| {
            let now = self.counts.borrow(cs).get().cumulative;
            let elapsed = now.wrapping_sub(*last_seen);
            *last_seen = now;
            elapsed
        })
    }
}

impl Default for TickCounter {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for TickCounter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let counts = critical_section::with(|cs| self.counts.borrow(cs).get());
        f.debug_struct("TickCounter")
            .field("pending", &counts.pending)
            .field("cumulative", &counts.cumulative)
            .finish()
    }
}
