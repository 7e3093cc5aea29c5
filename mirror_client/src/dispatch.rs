//! Change record dispatch.
//!
//! Routes inbound tagged records to mutations of the mirror's target
//! state. Runs on the same cooperative scheduler as the frame loop, so a
//! burst is always fully applied before the next frame reads the store.
//!
//! Error policy: nothing here returns an error and nothing panics. A
//! malformed or stale record is logged (or silently dropped, for the
//! expected despawn race) and the rest of the burst proceeds; the frame
//! loop must never stop ticking because of one bad record.

use tracing::{trace, warn};

use mirror_shared::{
    math::Vec2,
    protocol::{Effect, GameEvent, ScheduledEvent},
    world::{Entity, Tile},
};

use crate::{assets::SoundQueue, clock::SimClock, interp::MoveAnimation, mirror::MirrorStore};

/// Applies a burst of immediate effects in delivery order.
pub fn apply_effects(store: &mut MirrorStore, effects: &[Effect], sounds: &mut SoundQueue) {
    for effect in effects {
        apply_effect(store, effect, sounds);
    }
}

fn apply_effect(store: &mut MirrorStore, effect: &Effect, sounds: &mut SoundQueue) {
    match effect {
        Effect::TileUpdate { position, tile } => {
            if let Err(e) = store.set_tile(*position, tile.clone()) {
                warn!(error = %e, "dropping tile update");
            }
        }
        Effect::EntityUpdate { id, entity } => {
            match store.entity_mut(*id) {
                Some(rec) => rec.entity = entity.clone(),
                // Despawned before the update arrived; expected race.
                None => trace!(id = id.0, "update for absent entity"),
            }
        }
        Effect::EntityMove { id, position } => {
            match store.entity_mut(*id) {
                Some(rec) => {
                    rec.target = *position;
                    rec.displayed = Vec2::from(*position);
                    rec.move_anim = None;
                }
                None => trace!(id = id.0, "move for absent entity"),
            }
        }
        Effect::EntitySpawn {
            id,
            entity,
            position,
        } => {
            if let Err(e) = store.spawn(*id, entity.clone(), *position) {
                warn!(error = %e, "dropping spawn, keeping existing entity");
            }
        }
        Effect::EntityDespawn { id } => {
            store.despawn(*id);
        }
        Effect::Sound { cue } => {
            sounds.push(cue.clone());
        }
        Effect::Unknown => {
            warn!("unknown effect kind, ignoring");
        }
    }
}

/// Applies a scheduled event batch: resyncs the clock to the batch's
/// authoritative time, then applies every event in delivery order.
pub fn apply_event_batch(
    store: &mut MirrorStore,
    clock: &mut SimClock,
    events: &[ScheduledEvent],
    batch_time: f64,
) {
    clock.resync(batch_time);
    for scheduled in events {
        apply_event(store, clock, scheduled);
    }
}

fn apply_event(store: &mut MirrorStore, clock: &SimClock, scheduled: &ScheduledEvent) {
    match &scheduled.event {
        GameEvent::EntityMoved { id, from: _, to } => {
            match store.entity_mut(*id) {
                Some(rec) => {
                    rec.target = *to;
                    // Animate from wherever the entity is currently
                    // displayed; a superseded animation is dropped, not
                    // queued behind.
                    rec.move_anim = Some(MoveAnimation {
                        start: rec.displayed,
                        end: Vec2::from(*to),
                        start_time: clock.time(),
                        duration: scheduled.duration,
                    });
                }
                None => trace!(id = id.0, "move event for absent entity"),
            }
        }
        GameEvent::PlayerRotated { id, orientation } => match store.entity_mut(*id) {
            Some(rec) => match &mut rec.entity {
                Entity::Player { orientation: o } | Entity::Piston { orientation: o } => {
                    *o = *orientation;
                }
                other => warn!(id = id.0, ?other, "rotation for non-directional entity"),
            },
            None => trace!(id = id.0, "rotation for absent entity"),
        },
        GameEvent::GateOpened { position } => set_tile_logged(store, *position, Tile::Gate { open: true }),
        GameEvent::GateClosed { position } => {
            set_tile_logged(store, *position, Tile::Gate { open: false })
        }
        GameEvent::ButtonPressed { position } => {
            set_tile_logged(store, *position, Tile::Button { pressed: true })
        }
        GameEvent::ButtonReleased { position } => {
            set_tile_logged(store, *position, Tile::Button { pressed: false })
        }
        GameEvent::BalloonColored {
            id,
            color,
            ink_position,
        } => {
            match store.entity_mut(*id) {
                Some(rec) => rec.entity = Entity::Balloon { color: *color },
                None => trace!(id = id.0, "recolor for absent entity"),
            }
            // The ink source is consumed regardless of whether the
            // balloon still exists locally.
            set_tile_logged(store, *ink_position, Tile::Path);
        }
        GameEvent::BalloonPopped { id, pool_position: _ } => {
            store.despawn(*id);
        }
        GameEvent::Unknown => {
            warn!("unknown event kind, ignoring");
        }
    }
}

fn set_tile_logged(store: &mut MirrorStore, position: mirror_shared::grid::Point, tile: Tile) {
    if let Err(e) = store.set_tile(position, tile) {
        warn!(error = %e, "dropping tile change");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mirror_shared::{
        grid::{Direction, Point},
        world::{EntityEntry, EntityId, InkColor, MapSnapshot},
    };

    fn store_5x5() -> MirrorStore {
        MirrorStore::from_snapshot(&MapSnapshot {
            size: Point::new(5, 5),
            tiles: vec![Tile::Path; 25],
            entities: vec![EntityEntry {
                id: EntityId(1),
                entity: Entity::Player {
                    orientation: Direction::North,
                },
                position: Point::new(2, 2),
            }],
        })
        .unwrap()
    }

    #[test]
    fn unknown_records_leave_store_unchanged() {
        let mut store = store_5x5();
        let mut clock = SimClock::new(0.0, 0.1);
        let mut sounds = SoundQueue::default();

        apply_effects(&mut store, &[Effect::Unknown], &mut sounds);
        apply_event_batch(
            &mut store,
            &mut clock,
            &[ScheduledEvent {
                event: GameEvent::Unknown,
                duration: 1.0,
            }],
            0.0,
        );

        assert_eq!(store.entity_count(), 1);
        assert!(store.iter_tiles().all(|(_, t)| *t == Tile::Path));
        assert!(sounds.is_empty());
    }

    #[test]
    fn despawn_race_is_silent_noop() {
        let mut store = store_5x5();
        let mut sounds = SoundQueue::default();
        apply_effects(
            &mut store,
            &[Effect::EntityDespawn { id: EntityId(7) }],
            &mut sounds,
        );
        assert_eq!(store.entity_count(), 1);
    }

    #[test]
    fn late_records_for_despawned_entity_are_noops() {
        let mut store = store_5x5();
        let mut clock = SimClock::new(0.0, 0.1);
        let mut sounds = SoundQueue::default();

        apply_effects(
            &mut store,
            &[Effect::EntityDespawn { id: EntityId(1) }],
            &mut sounds,
        );
        // A whole burst referencing the gone id.
        apply_effects(
            &mut store,
            &[
                Effect::EntityUpdate {
                    id: EntityId(1),
                    entity: Entity::Box,
                },
                Effect::EntityMove {
                    id: EntityId(1),
                    position: Point::new(0, 0),
                },
            ],
            &mut sounds,
        );
        apply_event_batch(
            &mut store,
            &mut clock,
            &[ScheduledEvent {
                event: GameEvent::EntityMoved {
                    id: EntityId(1),
                    from: Point::new(2, 2),
                    to: Point::new(3, 2),
                },
                duration: 1.0,
            }],
            1.0,
        );
        assert_eq!(store.entity_count(), 0);
    }

    #[test]
    fn move_event_animates_from_displayed_position() {
        let mut store = store_5x5();
        let mut clock = SimClock::new(0.0, 0.1);
        apply_event_batch(
            &mut store,
            &mut clock,
            &[ScheduledEvent {
                event: GameEvent::EntityMoved {
                    id: EntityId(1),
                    from: Point::new(2, 2),
                    to: Point::new(3, 2),
                },
                duration: 2.0,
            }],
            4.0,
        );
        assert_eq!(clock.time(), 4.0);
        let rec = store.entity(EntityId(1)).unwrap();
        assert_eq!(rec.target, Point::new(3, 2));
        let anim = rec.move_anim.unwrap();
        assert_eq!(anim.start, Vec2::new(2.0, 2.0));
        assert_eq!(anim.end, Vec2::new(3.0, 2.0));
        assert_eq!(anim.start_time, 4.0);
        assert_eq!(anim.duration, 2.0);
    }

    #[test]
    fn later_records_in_a_burst_supersede_earlier_ones() {
        let mut store = store_5x5();
        let mut clock = SimClock::new(0.0, 0.1);
        apply_event_batch(
            &mut store,
            &mut clock,
            &[
                ScheduledEvent {
                    event: GameEvent::EntityMoved {
                        id: EntityId(1),
                        from: Point::new(2, 2),
                        to: Point::new(3, 2),
                    },
                    duration: 2.0,
                },
                ScheduledEvent {
                    event: GameEvent::BalloonPopped {
                        id: EntityId(1),
                        pool_position: Point::new(3, 2),
                    },
                    duration: 0.0,
                },
            ],
            0.0,
        );
        assert!(store.entity(EntityId(1)).is_none());
    }

    #[test]
    fn instantaneous_move_cancels_animation() {
        let mut store = store_5x5();
        let mut clock = SimClock::new(0.0, 0.1);
        let mut sounds = SoundQueue::default();
        apply_event_batch(
            &mut store,
            &mut clock,
            &[ScheduledEvent {
                event: GameEvent::EntityMoved {
                    id: EntityId(1),
                    from: Point::new(2, 2),
                    to: Point::new(3, 2),
                },
                duration: 5.0,
            }],
            0.0,
        );
        apply_effects(
            &mut store,
            &[Effect::EntityMove {
                id: EntityId(1),
                position: Point::new(0, 4),
            }],
            &mut sounds,
        );
        let rec = store.entity(EntityId(1)).unwrap();
        assert!(rec.move_anim.is_none());
        assert_eq!(rec.target, Point::new(0, 4));
        assert_eq!(rec.displayed, Vec2::new(0.0, 4.0));
    }

    #[test]
    fn duplicate_spawn_keeps_existing_entity() {
        let mut store = store_5x5();
        let mut sounds = SoundQueue::default();
        apply_effects(
            &mut store,
            &[Effect::EntitySpawn {
                id: EntityId(1),
                entity: Entity::Box,
                position: Point::new(0, 0),
            }],
            &mut sounds,
        );
        let rec = store.entity(EntityId(1)).unwrap();
        assert!(matches!(rec.entity, Entity::Player { .. }));
        assert_eq!(rec.target, Point::new(2, 2));
    }

    #[test]
    fn balloon_recolor_consumes_ink_tile() {
        let mut store = store_5x5();
        let mut clock = SimClock::new(0.0, 0.1);
        let mut sounds = SoundQueue::default();
        apply_effects(
            &mut store,
            &[
                Effect::EntitySpawn {
                    id: EntityId(2),
                    entity: Entity::Balloon {
                        color: InkColor::Blue,
                    },
                    position: Point::new(1, 1),
                },
                Effect::TileUpdate {
                    position: Point::new(1, 1),
                    tile: Tile::Ink {
                        color: InkColor::Red,
                    },
                },
            ],
            &mut sounds,
        );
        apply_event_batch(
            &mut store,
            &mut clock,
            &[ScheduledEvent {
                event: GameEvent::BalloonColored {
                    id: EntityId(2),
                    color: InkColor::Red,
                    ink_position: Point::new(1, 1),
                },
                duration: 0.5,
            }],
            0.0,
        );
        assert_eq!(
            store.entity(EntityId(2)).unwrap().entity,
            Entity::Balloon {
                color: InkColor::Red
            }
        );
        assert_eq!(store.tile(Point::new(1, 1)).unwrap(), &Tile::Path);
    }

    #[test]
    fn gate_and_button_events_replace_tiles() {
        let mut store = store_5x5();
        let mut clock = SimClock::new(0.0, 0.1);
        apply_event_batch(
            &mut store,
            &mut clock,
            &[
                ScheduledEvent {
                    event: GameEvent::ButtonPressed {
                        position: Point::new(0, 0),
                    },
                    duration: 0.0,
                },
                ScheduledEvent {
                    event: GameEvent::GateOpened {
                        position: Point::new(4, 4),
                    },
                    duration: 0.0,
                },
            ],
            0.0,
        );
        assert_eq!(
            store.tile(Point::new(0, 0)).unwrap(),
            &Tile::Button { pressed: true }
        );
        assert_eq!(
            store.tile(Point::new(4, 4)).unwrap(),
            &Tile::Gate { open: true }
        );
    }

    #[test]
    fn out_of_bounds_tile_update_is_dropped() {
        let mut store = store_5x5();
        let mut sounds = SoundQueue::default();
        apply_effects(
            &mut store,
            &[Effect::TileUpdate {
                position: Point::new(9, 9),
                tile: Tile::Wall,
            }],
            &mut sounds,
        );
        assert!(store.iter_tiles().all(|(_, t)| *t == Tile::Path));
    }

    #[test]
    fn sound_effect_is_queued_not_applied() {
        let mut store = store_5x5();
        let mut sounds = SoundQueue::default();
        apply_effects(
            &mut store,
            &[Effect::Sound {
                cue: "click".into(),
            }],
            &mut sounds,
        );
        assert_eq!(sounds.drain(), vec!["click".to_string()]);
        assert_eq!(store.entity_count(), 1);
    }
}
