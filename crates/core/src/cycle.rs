//! Cycle timer - fixed-rate gravity pacing decoupled from the render loop
//!
//! Elapsed wall time is converted into whole cycles at the configured rate;
//! the fractional leftover carries into the next [`CycleTimer::advance`].
//! Completed cycles queue up in a counter and are consumed one at a time.

use std::time::Instant;

/// Gravity cycle accumulator
#[derive(Debug, Clone)]
pub struct CycleTimer {
    cycles_per_second: f32,
    millis_per_cycle: f32,
    last_update: Instant,
    pending_cycles: u32,
    carry_ms: f32,
    paused: bool,
}

impl CycleTimer {
    /// Create a running timer at `cycles_per_second`, anchored at `now`
    pub fn new(cycles_per_second: f32, now: Instant) -> Self {
        let mut timer = Self {
            cycles_per_second,
            millis_per_cycle: 0.0,
            last_update: now,
            pending_cycles: 0,
            carry_ms: 0.0,
            paused: false,
        };
        timer.set_cycles_per_second(cycles_per_second);
        timer
    }

    /// Change the rate. Already pending cycles and the carried remainder are
    /// kept as they are; only later [`advance`](Self::advance) calls use the new rate.
    pub fn set_cycles_per_second(&mut self, cycles_per_second: f32) {
        debug_assert!(cycles_per_second > 0.0, "cycle rate must be positive");
        self.cycles_per_second = cycles_per_second;
        self.millis_per_cycle = 1000.0 / cycles_per_second;
    }

    pub fn cycles_per_second(&self) -> f32 {
        self.cycles_per_second
    }

    pub fn set_paused(&mut self, paused: bool) {
        self.paused = paused;
    }

    pub fn is_paused(&self) -> bool {
        self.paused
    }

    /// Accumulate the cycles completed since the last update.
    ///
    /// The timestamp moves forward even while paused, so resuming does not
    /// release a burst of cycles for the paused interval.
    pub fn advance(&mut self, now: Instant) {
        let elapsed_ms = now.saturating_duration_since(self.last_update).as_secs_f32() * 1000.0;

        if !self.paused {
            let total = elapsed_ms + self.carry_ms;
            self.pending_cycles += (total / self.millis_per_cycle).floor() as u32;
            self.carry_ms = total % self.millis_per_cycle;
        }

        self.last_update = now;
    }

    /// Take one completed cycle, if any
    pub fn consume_cycle(&mut self) -> bool {
        if self.pending_cycles > 0 {
            self.pending_cycles -= 1;
            return true;
        }
        false
    }

    /// Whether a completed cycle is waiting, without consuming it
    pub fn peek(&self) -> bool {
        self.pending_cycles > 0
    }

    pub fn pending_cycles(&self) -> u32 {
        self.pending_cycles
    }

    /// Drop pending cycles and the carried remainder, unpause, and re-anchor at `now`
    pub fn reset(&mut self, now: Instant) {
        self.paused = false;
        self.pending_cycles = 0;
        self.carry_ms = 0.0;
        self.last_update = now;
    }
}
