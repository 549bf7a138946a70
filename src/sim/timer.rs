//! Countdown timer shared by power-ups, spawning, pickup respawn and scoring

use serde::{Deserialize, Serialize};

/// A countdown advanced by the simulation's elapsed time
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Countdown {
    remaining: f32,
}

impl Countdown {
    pub fn new(secs: f32) -> Self {
        Self { remaining: secs }
    }

    /// Seconds left (zero or negative once expired)
    pub fn remaining(&self) -> f32 {
        self.remaining
    }

    pub fn expired(&self) -> bool {
        self.remaining <= 0.0
    }

    /// Advance by `dt`. Returns true only on the step that reaches zero.
    pub fn tick(&mut self, dt: f32) -> bool {
        if self.expired() {
            return false;
        }
        self.remaining -= dt;
        self.expired()
    }

    /// Re-arm with a fresh duration
    pub fn reset(&mut self, secs: f32) {
        self.remaining = secs;
    }

    /// Advance a periodic timer; returns how many periods elapsed.
    ///
    /// Overshoot carries into the next period so long frames do not lose time.
    pub fn tick_repeating(&mut self, dt: f32, period: f32) -> u32 {
        if period <= 0.0 {
            return 0;
        }
        self.remaining -= dt;
        let mut fired = 0;
        while self.remaining <= 0.0 {
            self.remaining += period;
            fired += 1;
        }
        fired
    }
}
