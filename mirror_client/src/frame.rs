//! Frame loop driver.
//!
//! Single-threaded and cooperative: the binary schedules one call per
//! display-rate interval, each call measures its own delta, advances the
//! clock and every entity's interpolator, and returns. Termination is
//! external; the driver never stops on its own.

use std::time::Instant;

use crate::{clock::SimClock, interp::update_entity, mirror::MirrorStore};

/// Wall-clock frame driver.
#[derive(Debug)]
pub struct FrameLoop {
    last: Option<Instant>,
    max_frame_dt: f32,
    turn_rate: f32,
}

impl FrameLoop {
    pub fn new(max_frame_dt: f32, turn_rate: f32) -> Self {
        Self {
            last: None,
            max_frame_dt,
            turn_rate,
        }
    }

    /// Runs one frame using measured wall-clock delta. The delta is
    /// clamped so a resume-from-background frame cannot teleport every
    /// animation to its end in one step.
    pub fn tick(&mut self, store: &mut MirrorStore, clock: &mut SimClock) {
        let now = Instant::now();
        let dt = match self.last {
            Some(last) => (now - last).as_secs_f32().clamp(0.0, self.max_frame_dt),
            None => 0.0,
        };
        self.last = Some(now);
        advance(store, clock, dt, self.turn_rate);
    }
}

/// Pure frame step: advances virtual time, then every interpolator.
/// Split from [`FrameLoop::tick`] so tests can drive synthetic deltas.
pub fn advance(store: &mut MirrorStore, clock: &mut SimClock, dt_secs: f32, turn_rate: f32) {
    clock.advance(dt_secs as f64);
    let time = clock.time();
    for (_, rec) in store.iter_entities_mut() {
        update_entity(rec, time, dt_secs, turn_rate);
    }
}
