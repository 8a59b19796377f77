//! Cycle timer tests - gravity pacing independent of frame cadence

use std::time::{Duration, Instant};

use blockfall::core::CycleTimer;
use blockfall::types::{BASE_SPEED, SOFT_DROP_SPEED};

fn ms(n: u64) -> Duration {
    Duration::from_millis(n)
}

#[test]
fn test_base_speed_one_cycle_per_second() {
    let t0 = Instant::now();
    let mut timer = CycleTimer::new(BASE_SPEED, t0);

    // Fifty 20 ms frames make one second.
    for frame in 1..50 {
        timer.advance(t0 + ms(frame * 20));
        assert!(!timer.peek(), "cycle after {} ms", frame * 20);
    }
    timer.advance(t0 + ms(1_010));
    assert!(timer.peek());
    assert!(timer.consume_cycle());
    assert!(!timer.consume_cycle());
}

#[test]
fn test_soft_drop_rate_period() {
    let t0 = Instant::now();
    let mut timer = CycleTimer::new(SOFT_DROP_SPEED, t0);

    timer.advance(t0 + ms(205));
    assert_eq!(timer.pending_cycles(), 5);
}

#[test]
fn test_frame_jitter_does_not_change_cadence() {
    let t0 = Instant::now();
    let mut steady = CycleTimer::new(10.0, t0);
    let mut jittery = CycleTimer::new(10.0, t0);

    for step in 1..=50 {
        steady.advance(t0 + ms(step * 20));
    }
    steady.advance(t0 + ms(1_010));
    for offset in [7, 33, 34, 120, 121, 500, 733, 999, 1_010] {
        jittery.advance(t0 + ms(offset));
    }

    assert_eq!(steady.pending_cycles(), 10);
    assert_eq!(jittery.pending_cycles(), 10);
}

#[test]
fn test_rate_change_does_not_rescale_pending() {
    let t0 = Instant::now();
    let mut timer = CycleTimer::new(10.0, t0);

    timer.advance(t0 + ms(310));
    assert_eq!(timer.pending_cycles(), 3);

    timer.set_cycles_per_second(SOFT_DROP_SPEED);
    assert_eq!(timer.pending_cycles(), 3);
    assert_eq!(timer.cycles_per_second(), SOFT_DROP_SPEED);

    timer.advance(t0 + ms(395));
    assert_eq!(timer.pending_cycles(), 5);
}

#[test]
fn test_peek_is_non_destructive() {
    let t0 = Instant::now();
    let mut timer = CycleTimer::new(10.0, t0);
    timer.advance(t0 + ms(150));

    assert!(timer.peek());
    assert!(timer.peek());
    assert_eq!(timer.pending_cycles(), 1);
}

#[test]
fn test_pause_freezes_accumulation_without_burst() {
    let t0 = Instant::now();
    let mut timer = CycleTimer::new(10.0, t0);

    timer.advance(t0 + ms(50));
    timer.set_paused(true);
    timer.advance(t0 + ms(10_000));
    assert_eq!(timer.pending_cycles(), 0);

    timer.set_paused(false);
    // The 50 ms carried before the pause still counts.
    timer.advance(t0 + ms(10_060));
    assert_eq!(timer.pending_cycles(), 1);
}

#[test]
fn test_reset_drops_pending_and_unpauses() {
    let t0 = Instant::now();
    let mut timer = CycleTimer::new(10.0, t0);
    timer.advance(t0 + ms(450));
    timer.set_paused(true);

    timer.reset(t0 + ms(450));

    assert!(!timer.is_paused());
    assert_eq!(timer.pending_cycles(), 0);
    timer.advance(t0 + ms(560));
    assert_eq!(timer.pending_cycles(), 1);
}
