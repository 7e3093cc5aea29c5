//! Per-entity visual interpolation.
//!
//! The authority sends discrete state changes; the client renders at its
//! own rate and advances each entity's displayed position/heading toward
//! the authoritative target every frame.

use mirror_shared::math::{ease_out, lerp_angle, Vec2};

use crate::mirror::EntityRecord;

/// Transient animation descriptor for a scheduled move.
///
/// Owned by the entity it animates; discarded once complete, replaced
/// outright if a newer move supersedes it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MoveAnimation {
    pub start: Vec2,
    pub end: Vec2,
    /// Virtual time at which the animation began.
    pub start_time: f64,
    /// Animation window in virtual-time units.
    pub duration: f64,
}

impl MoveAnimation {
    /// Raw progress in `[0, 1]`. Zero or negative durations complete
    /// immediately, so a degenerate event can never yield NaN or an
    /// unfinishable animation.
    pub fn progress(&self, time: f64) -> f64 {
        if self.duration <= 0.0 {
            return 1.0;
        }
        ((time - self.start_time) / self.duration).clamp(0.0, 1.0)
    }
}

/// Advances one entity's displayed state by one frame.
///
/// `time` is current virtual time, `dt_secs` the measured frame delta,
/// `turn_rate` the angular smoothing constant.
pub fn update_entity(rec: &mut EntityRecord, time: f64, dt_secs: f32, turn_rate: f32) {
    if let Some(anim) = rec.move_anim {
        let progress = anim.progress(time);
        rec.displayed = anim.start.lerp(anim.end, ease_out(progress as f32));
        if progress >= 1.0 {
            // Land exactly on the end value before dropping the descriptor.
            rec.displayed = anim.end;
            rec.move_anim = None;
        }
    }

    // Heading converges every frame, animation or not, so facing changes
    // delivered as plain state updates still turn smoothly.
    let target = rec.entity.facing();
    rec.heading = lerp_angle(rec.heading, target, (turn_rate * dt_secs).min(1.0));
}

#[cfg(test)]
mod tests {
    use super::*;
    use mirror_shared::{
        grid::{Direction, Point},
        world::Entity,
    };

    fn record_with_anim(duration: f64) -> EntityRecord {
        let mut rec = EntityRecord::new(Entity::Box, Point::new(0, 0));
        rec.move_anim = Some(MoveAnimation {
            start: Vec2::ZERO,
            end: Vec2::new(1.0, 0.0),
            start_time: 0.0,
            duration,
        });
        rec
    }

    #[test]
    fn progress_is_clamped_and_monotone() {
        let anim = MoveAnimation {
            start: Vec2::ZERO,
            end: Vec2::new(1.0, 0.0),
            start_time: 1.0,
            duration: 2.0,
        };
        assert_eq!(anim.progress(-10.0), 0.0);
        assert_eq!(anim.progress(1.0), 0.0);
        let mut last = 0.0;
        for i in 0..=20 {
            let p = anim.progress(1.0 + i as f64 * 0.2);
            assert!(p >= last, "progress decreased");
            assert!((0.0..=1.0).contains(&p));
            last = p;
        }
        assert_eq!(anim.progress(100.0), 1.0);
    }

    #[test]
    fn displayed_hits_endpoints_exactly() {
        let mut rec = record_with_anim(2.0);
        update_entity(&mut rec, 0.0, 0.016, 10.0);
        assert_eq!(rec.displayed, Vec2::ZERO);

        update_entity(&mut rec, 2.0, 0.016, 10.0);
        assert_eq!(rec.displayed, Vec2::new(1.0, 0.0));
        assert!(rec.move_anim.is_none(), "descriptor discarded on completion");
    }

    #[test]
    fn zero_duration_completes_in_one_frame() {
        let mut rec = record_with_anim(0.0);
        update_entity(&mut rec, 0.0, 0.016, 10.0);
        assert_eq!(rec.displayed, Vec2::new(1.0, 0.0));
        assert!(rec.move_anim.is_none());
    }

    #[test]
    fn midpoint_is_eased_ahead_of_linear() {
        let mut rec = record_with_anim(2.0);
        update_entity(&mut rec, 1.0, 0.016, 10.0);
        // sin(π/4) ≈ 0.707, so the eased position leads the linear one.
        assert!(rec.displayed.x > 0.5);
        assert!(rec.displayed.x < 1.0);
    }

    #[test]
    fn heading_converges_to_facing() {
        let mut rec = EntityRecord::new(
            Entity::Player {
                orientation: Direction::North,
            },
            Point::new(0, 0),
        );
        rec.entity = Entity::Player {
            orientation: Direction::West,
        };
        for _ in 0..120 {
            update_entity(&mut rec, 0.0, 1.0 / 60.0, 10.0);
        }
        assert!((rec.heading - Direction::West.angle()).abs() < 1e-3);
    }

    #[test]
    fn huge_frame_delta_clamps_blend() {
        let mut rec = EntityRecord::new(
            Entity::Player {
                orientation: Direction::South,
            },
            Point::new(0, 0),
        );
        rec.heading = 0.0;
        update_entity(&mut rec, 0.0, 1000.0, 10.0);
        assert!((rec.heading - Direction::South.angle()).abs() < 1e-5);
        assert!(rec.heading.is_finite());
    }
}
