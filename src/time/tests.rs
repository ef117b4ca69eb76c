use super::*;

fn counter_with(ticks: u32) -> TickCounter {
    let counter = TickCounter::new();
    for _ in 0..ticks {
        counter.on_tick();
    }
    counter
}

#[test]
fn test_new_counter_is_zeroed() {
    let counter = TickCounter::new();
    assert_eq!(counter.pending(), 0);
    assert_eq!(counter.cumulative(), 0);
    assert!(!counter.try_consume_tick());
}

#[test]
fn test_on_tick_increments_both_counts() {
    let counter = counter_with(3);
    assert_eq!(counter.pending(), 3);
    assert_eq!(counter.cumulative(), 3);
}

#[test]
fn test_try_consume_tick_drains_pending_exactly() {
    let counter = counter_with(5);

    for remaining in (0..5).rev() {
        assert!(counter.try_consume_tick());
        assert_eq!(counter.pending(), remaining);
    }
    assert!(!counter.try_consume_tick());
    assert_eq!(counter.pending(), 0);

    // Consuming never touches the cumulative count
    assert_eq!(counter.cumulative(), 5);
}

#[test]
fn test_elapsed_since_and_update() {
    let counter = counter_with(7);
    let mut last_seen = 0;

    assert_eq!(counter.elapsed_since_and_update(&mut last_seen), 7);
    assert_eq!(last_seen, 7);
    assert_eq!(counter.elapsed_since_and_update(&mut last_seen), 0);

    counter.on_tick();
    assert_eq!(counter.elapsed_since(last_seen), 1);
    // elapsed_since leaves the caller's snapshot alone
    assert_eq!(counter.elapsed_since(last_seen), 1);
}

#[test]
fn test_elapsed_since_wraps() {
    let counter = counter_with(4);

    // A snapshot taken just before the counter wrapped
    let last_seen = u32::MAX - 1;
    assert_eq!(counter.elapsed_since(last_seen), 6);
}

#[test]
fn test_poll_timer_fires_once_per_period() {
    let counter = counter_with(45);
    let mut timer = PollTimer::new(20);

    assert!(timer.expired(&counter));
    assert!(timer.expired(&counter));
    // Five ticks left over, not enough for a third period
    assert!(!timer.expired(&counter));
    assert_eq!(counter.pending(), 0);

    for _ in 0..15 {
        counter.on_tick();
    }
    assert!(timer.expired(&counter));
}

#[test]
fn test_poll_timer_leaves_surplus_pending() {
    let counter = counter_with(25);
    let mut timer = PollTimer::new(20);

    assert!(timer.expired(&counter));
    assert_eq!(counter.pending(), 5);
}

#[test]
fn test_poll_timer_zero_period() {
    let counter = counter_with(1);
    let mut timer = PollTimer::new(0);

    assert_eq!(timer.period(), 1);
    assert!(timer.expired(&counter));
    assert!(!timer.expired(&counter));
}

#[test]
fn test_defaults() {
    assert_eq!(PollTimer::default().period(), POLL_PERIOD_TICKS);
    assert_eq!(POLL_PERIOD_TICKS * TICK_PERIOD_MS, 20);
    assert_eq!(TickCounter::default().cumulative(), 0);
}

#[test]
fn test_on_tick_wraps_both_counts() {
    let counter = TickCounter::starting_at(u32::MAX, u32::MAX - 1);
    let mut last_seen = counter.cumulative();

    counter.on_tick();
    assert_eq!(counter.pending(), 0);
    assert_eq!(counter.cumulative(), u32::MAX);

    counter.on_tick();
    assert_eq!(counter.pending(), 1);
    assert_eq!(counter.cumulative(), 0);
    assert_eq!(counter.elapsed_since_and_update(&mut last_seen), 2);
    assert_eq!(last_seen, 0);
}
