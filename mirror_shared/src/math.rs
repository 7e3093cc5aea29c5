//! Math types for the visual layer.
//!
//! This module intentionally stays small and deterministic.
//! Grid coordinates live in [`crate::grid`]; here we only deal with the
//! continuous values the interpolator produces.

use std::f32::consts::{PI, TAU};

use serde::{Deserialize, Serialize};

use crate::grid::Point;

/// Continuous 2D position (displayed, not authoritative).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Default)]
pub struct Vec2 {
    pub x: f32,
    pub y: f32,
}

impl Vec2 {
    pub const ZERO: Self = Self { x: 0.0, y: 0.0 };

    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    pub fn lerp(self, to: Self, t: f32) -> Self {
        let t = t.clamp(0.0, 1.0);
        Self::new(self.x + (to.x - self.x) * t, self.y + (to.y - self.y) * t)
    }
}

impl From<Point> for Vec2 {
    fn from(p: Point) -> Self {
        Self::new(p.x as f32, p.y as f32)
    }
}

/// Ease-out curve applied to animation progress.
///
/// Fast at the start, settling softly into the target.
pub fn ease_out(t: f32) -> f32 {
    (t.clamp(0.0, 1.0) * PI / 2.0).sin()
}

/// Interpolates between two angles along the shortest arc.
///
/// Angles are in radians in `[0, 2π)`. The traversed arc never exceeds
/// half a turn: when the naive difference `b - a` crosses ±π the target
/// is shifted by a full turn before interpolating and the result is
/// wrapped back into range.
pub fn lerp_angle(a: f32, b: f32, t: f32) -> f32 {
    let lerp = |a: f32, b: f32, t: f32| (1.0 - t) * a + t * b;
    let t = t.clamp(0.0, 1.0);
    let diff = b - a;

    if diff < -PI {
        // lerp upwards past 2π
        let result = lerp(a, b + TAU, t);
        if result >= TAU {
            result - TAU
        } else {
            result
        }
    } else if diff > PI {
        // lerp downwards past 0
        let result = lerp(a, b - TAU, t);
        if result < 0.0 {
            result + TAU
        } else {
            result
        }
    } else {
        lerp(a, b, t)
    }
}
