//! Time sources
//!
//! `now()` is a wall-clock timestamp in seconds used for invulnerability
//! windows and scheduled callbacks. `delta()` is the length of the current
//! simulation step.

use std::cell::Cell;
use std::time::Instant;

/// Supplies timestamps and per-step deltas
pub trait Clock {
    /// Seconds since the clock's epoch
    fn now(&self) -> f64;
    /// Seconds since the previous step
    fn delta(&self) -> f32;
}

/// A clock advanced by hand. Used by tests and the headless runner.
#[derive(Debug, Clone, Default)]
pub struct ManualClock {
    now: f64,
    delta: f32,
}

impl ManualClock {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start at an arbitrary timestamp
    pub fn starting_at(now: f64) -> Self {
        Self { now, delta: 0.0 }
    }

    /// Advance by one step of `delta` seconds
    pub fn advance(&mut self, delta: f32) {
        self.now += f64::from(delta);
        self.delta = delta;
    }

    /// Jump the wall clock without producing a step delta
    pub fn skip(&mut self, seconds: f64) {
        self.now += seconds;
        self.delta = 0.0;
    }
}

impl Clock for ManualClock {
    fn now(&self) -> f64 {
        self.now
    }

    fn delta(&self) -> f32 {
        self.delta
    }
}

/// Real-time clock backed by `Instant`
#[derive(Debug)]
pub struct SystemClock {
    epoch: Instant,
    last_tick: Cell<Instant>,
    delta: Cell<f32>,
    /// Deltas are capped so a stall does not teleport entities
    max_delta: f32,
}

impl SystemClock {
    pub fn new() -> Self {
        let now = Instant::now();
        Self {
            epoch: now,
            last_tick: Cell::new(now),
            delta: Cell::new(0.0),
            max_delta: 0.25,
        }
    }

    pub fn with_max_delta(mut self, max_delta: f32) -> Self {
        self.max_delta = max_delta;
        self
    }

    /// Mark the start of a new step
    pub fn tick(&self) {
        let now = Instant::now();
        let elapsed = now.duration_since(self.last_tick.get()).as_secs_f32();
        self.delta.set(elapsed.min(self.max_delta));
        self.last_tick.set(now);
    }
}

impl Default for SystemClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for SystemClock {
    fn now(&self) -> f64 {
        self.epoch.elapsed().as_secs_f64()
    }

    fn delta(&self) -> f32 {
        self.delta.get()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_manual_clock() {
        let mut clock = ManualClock::starting_at(10.0);
        assert_eq!(clock.delta(), 0.0);

        clock.advance(0.5);
        assert_eq!(clock.now(), 10.5);
        assert_eq!(clock.delta(), 0.5);

        clock.skip(2.0);
        assert_eq!(clock.now(), 12.5);
        assert_eq!(clock.delta(), 0.0);
    }

    #[test]
    fn test_system_clock_delta_capped() {
        let clock = SystemClock::new().with_max_delta(0.0);
        clock.tick();
        assert_eq!(clock.delta(), 0.0);
        assert!(clock.now() >= 0.0);
    }
}
