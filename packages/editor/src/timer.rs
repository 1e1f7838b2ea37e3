//! # Generations and the debounce timer
//!
//! A [`Generation`] is a monotonically increasing tag. Anything that can be
//! superseded (a pending timer, an in-flight render) is stamped with one;
//! a completion is honoured only if its stamp is still the latest issued.
//!
//! [`DebounceTimer`] is the arm/cancel/fire state of a single restartable
//! timer. It does not sleep itself: the runtime sleeps and reports back with
//! the generation it was armed with, and [`DebounceTimer::fire`] decides
//! whether that wake-up still counts.

use std::fmt;

/// Monotonic identity for superseded-work detection
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub struct Generation(u64);

impl Generation {
    pub const ZERO: Generation = Generation(0);

    pub fn get(self) -> u64 {
        self.0
    }
}

impl fmt::Display for Generation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Issues generations; only the newest one is current
#[derive(Debug, Default, Clone)]
pub struct GenerationCounter {
    latest: Generation,
}

impl GenerationCounter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Issue a fresh generation, superseding every earlier one
    pub fn advance(&mut self) -> Generation {
        self.latest = Generation(self.latest.0 + 1);
        self.latest
    }

    pub fn latest(&self) -> Generation {
        self.latest
    }

    pub fn is_current(&self, generation: Generation) -> bool {
        generation == self.latest
    }
}

/// Restartable one-shot timer state
#[derive(Debug, Default, Clone)]
pub struct DebounceTimer {
    generations: GenerationCounter,
    armed: Option<Generation>,
}

impl DebounceTimer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Arm (or re-arm) the timer. Any earlier arming is superseded.
    pub fn arm(&mut self) -> Generation {
        let generation = self.generations.advance();
        self.armed = Some(generation);
        generation
    }

    /// Disarm. Returns whether a timer was pending.
    pub fn cancel(&mut self) -> bool {
        self.armed.take().is_some()
    }

    /// Consume a wake-up. True only for the currently armed generation;
    /// the timer is disarmed afterwards.
    pub fn fire(&mut self, generation: Generation) -> bool {
        if self.armed == Some(generation) {
            self.armed = None;
            true
        } else {
            false
        }
    }

    pub fn is_armed(&self) -> bool {
        self.armed.is_some()
    }

    pub fn armed(&self) -> Option<Generation> {
        self.armed
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_counter_only_latest_is_current() {
        let mut counter = GenerationCounter::new();
        let first = counter.advance();
        let second = counter.advance();

        assert!(second > first);
        assert!(!counter.is_current(first));
        assert!(counter.is_current(second));
    }

    #[test]
    fn test_rearm_supersedes_previous() {
        let mut timer = DebounceTimer::new();
        let first = timer.arm();
        let second = timer.arm();

        assert!(!timer.fire(first));
        assert!(timer.is_armed());
        assert!(timer.fire(second));
        assert!(!timer.is_armed());
    }

    #[test]
    fn test_fire_is_one_shot() {
        let mut timer = DebounceTimer::new();
        let generation = timer.arm();
        assert!(timer.fire(generation));
        assert!(!timer.fire(generation));
    }

    #[test]
    fn test_cancel_drops_pending_fire() {
        let mut timer = DebounceTimer::new();
        let generation = timer.arm();
        assert!(timer.cancel());
        assert!(!timer.fire(generation));
        assert!(!timer.cancel());
    }
}
