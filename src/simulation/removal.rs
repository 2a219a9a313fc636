/// Countdown for a temporary removal of all markers from the path.
///
/// While the timer runs the markers are held still; once it expires they
/// re-enter the path. The host clock drives it through [`RemovalTimer::tick`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RemovalTimer {
    remaining: f64,
}

impl RemovalTimer {
    /// Starts a countdown of `delay` seconds.
    #[must_use]
    pub fn start(delay: f64) -> Self {
        Self {
            remaining: delay.max(0.0),
        }
    }

    /// Seconds left before re-entry.
    #[must_use]
    pub fn remaining(&self) -> f64 {
        self.remaining
    }

    /// Consumes `dt` seconds. Returns `true` once the delay has fully elapsed.
    pub fn tick(&mut self, dt: f64) -> bool {
        self.remaining = (self.remaining - dt).max(0.0);
        self.remaining <= 0.0
    }
}
