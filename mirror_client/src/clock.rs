//! Virtual simulation time.
//!
//! The authority measures time in ticks; the client approximates it by
//! dividing measured frame deltas by the server-specified tick duration
//! and snapping to the authoritative value carried on each event batch.

/// Client-side approximation of the authority's tick clock.
#[derive(Debug, Clone, Copy)]
pub struct SimClock {
    time: f64,
    tick_duration: f64,
}

impl SimClock {
    /// `tick_duration` is wall-clock seconds per tick, fixed for the
    /// session. Non-positive values are pinned to a minimum so a broken
    /// snapshot cannot make `advance` divide by zero.
    pub fn new(initial_time: f64, tick_duration: f64) -> Self {
        Self {
            time: initial_time,
            tick_duration: tick_duration.max(1e-6),
        }
    }

    /// Current virtual time, in ticks.
    pub fn time(&self) -> f64 {
        self.time
    }

    pub fn tick_duration(&self) -> f64 {
        self.tick_duration
    }

    /// Advances by a measured frame delta (seconds). Called once per
    /// frame; never blocks.
    pub fn advance(&mut self, dt_secs: f64) {
        self.time += dt_secs / self.tick_duration;
    }

    /// Unconditionally snaps to the authoritative time, forward or
    /// backward. No smoothing; dependent interpolators clamp progress,
    /// so a large jump snaps visuals but never produces NaN.
    pub fn resync(&mut self, authoritative_time: f64) {
        self.time = authoritative_time;
    }
}
