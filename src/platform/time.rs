//! Frame clocks

use std::time::Instant;

/// Source of elapsed time between frames
pub trait Clock {
    /// Seconds since the previous call (zero on the first call)
    fn elapsed_secs(&mut self) -> f32;
}

/// Wall clock backed by [`Instant`]
#[derive(Debug, Default)]
pub struct SystemClock {
    last: Option<Instant>,
}

impl SystemClock {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Clock for SystemClock {
    fn elapsed_secs(&mut self) -> f32 {
        let now = Instant::now();
        let dt = self
            .last
            .map(|last| now.duration_since(last).as_secs_f32())
            .unwrap_or(0.0);
        self.last = Some(now);
        dt
    }
}

/// Clock that always reports the same step (headless runs and tests)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FixedClock {
    step: f32,
}

impl FixedClock {
    pub fn new(step: f32) -> Self {
        Self {
            step: step.max(0.0),
        }
    }
}

impl Clock for FixedClock {
    fn elapsed_secs(&mut self) -> f32 {
        self.step
    }
}
