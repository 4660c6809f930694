/// Fixed-interval countdown clock that decouples the simulation rate from
/// the host's frame rate.
///
/// Each frame's elapsed time is subtracted from the remaining countdown;
/// when it reaches zero the clock fires one step and resets to the full
/// interval. Overshoot is dropped, so at most one step fires per frame and
/// missed steps during frame drops are never caught up.
#[derive(Debug, Clone, PartialEq)]
pub struct TickClock {
    interval: f32,
    remaining: f32,
}

impl TickClock {
    pub fn new(interval: f32) -> Self {
        Self {
            interval,
            remaining: interval,
        }
    }

    /// Advance by a frame's elapsed seconds. Returns true when a step fires.
    pub fn advance(&mut self, delta: f32) -> bool {
        self.remaining -= delta;
        if self.remaining <= 0.0 {
            self.remaining = self.interval;
            true
        } else {
            false
        }
    }

    pub fn interval(&self) -> f32 {
        self.interval
    }
}
