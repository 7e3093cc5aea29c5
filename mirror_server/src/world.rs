//! Authoritative world for the scripted demo authority.
//!
//! Just enough rules to exercise the client contract: walls and closed
//! gates block, boxes get pushed, every accepted command advances time
//! by one tick and comes back as a scheduled event batch.

use std::collections::HashMap;

use mirror_shared::{
    grid::{Direction, Point},
    protocol::{Effect, GameEvent, ScheduledEvent, ServerMsg},
    world::{Entity, EntityEntry, EntityId, InkColor, MapSnapshot, Tile},
};

/// Seconds per simulation tick served to clients.
pub const TICK_DURATION: f64 = 0.1;
/// Animation window for a single-cell move, in ticks.
const MOVE_DURATION: f64 = 2.0;

pub struct World {
    size: Point,
    tiles: Vec<Tile>,
    entities: HashMap<EntityId, (Entity, Point)>,
    time: f64,
    player: EntityId,
}

impl World {
    /// Builds the built-in demo level: bordered walls, a player, a
    /// pushable box, a balloon next to an ink tile, a gate.
    pub fn demo() -> Self {
        let size = Point::new(7, 5);
        let mut tiles = Vec::with_capacity((size.x * size.y) as usize);
        for y in 0..size.y {
            for x in 0..size.x {
                let border = x == 0 || y == 0 || x == size.x - 1 || y == size.y - 1;
                tiles.push(if border { Tile::Wall } else { Tile::Path });
            }
        }

        let mut world = Self {
            size,
            tiles,
            entities: HashMap::new(),
            time: 0.0,
            player: EntityId(1),
        };

        world.set_tile(Point::new(5, 1), Tile::Ink {
            color: InkColor::Red,
        });
        world.set_tile(Point::new(4, 3), Tile::Gate { open: true });
        world.set_tile(Point::new(1, 3), Tile::Button { pressed: false });

        world.entities.insert(
            EntityId(1),
            (
                Entity::Player {
                    orientation: Direction::East,
                },
                Point::new(1, 1),
            ),
        );
        world
            .entities
            .insert(EntityId(2), (Entity::Box, Point::new(3, 1)));
        world.entities.insert(
            EntityId(3),
            (
                Entity::Balloon {
                    color: InkColor::Blue,
                },
                Point::new(5, 3),
            ),
        );

        world
    }

    fn set_tile(&mut self, p: Point, tile: Tile) {
        let i = (p.y * self.size.x + p.x) as usize;
        self.tiles[i] = tile;
    }

    fn tile(&self, p: Point) -> Option<&Tile> {
        if p.x < 0 || p.y < 0 || p.x >= self.size.x || p.y >= self.size.y {
            return None;
        }
        self.tiles.get((p.y * self.size.x + p.x) as usize)
    }

    fn entity_at(&self, p: Point) -> Option<EntityId> {
        self.entities
            .iter()
            .find(|(_, (_, pos))| *pos == p)
            .map(|(id, _)| *id)
    }

    fn walkable(&self, p: Point) -> bool {
        self.tile(p).map(|t| !t.blocks_movement()).unwrap_or(false)
    }

    pub fn time(&self) -> f64 {
        self.time
    }

    pub fn snapshot(&self) -> MapSnapshot {
        let mut entities: Vec<EntityEntry> = self
            .entities
            .iter()
            .map(|(id, (entity, position))| EntityEntry {
                id: *id,
                entity: entity.clone(),
                position: *position,
            })
            .collect();
        // Stable wire order regardless of map iteration.
        entities.sort_by_key(|e| e.id.0);
        MapSnapshot {
            size: self.size,
            tiles: self.tiles.clone(),
            entities,
        }
    }

    /// Processes one move request and returns the messages to send.
    pub fn handle_move(&mut self, direction: Direction) -> Vec<ServerMsg> {
        self.time += 1.0;

        let mut events = Vec::new();
        let Some((entity, position)) = self.entities.get(&self.player).cloned() else {
            return Vec::new();
        };

        if let Entity::Player { orientation } = entity {
            if orientation != direction {
                if let Some((e, _)) = self.entities.get_mut(&self.player) {
                    *e = Entity::Player {
                        orientation: direction,
                    };
                }
                events.push(ScheduledEvent {
                    event: GameEvent::PlayerRotated {
                        id: self.player,
                        orientation: direction,
                    },
                    duration: 0.0,
                });
            }
        }

        let target = position.offset(direction);
        let mut messages = Vec::new();

        if !self.walkable(target) {
            messages.push(ServerMsg::Effects {
                effects: vec![Effect::Sound {
                    cue: "click".into(),
                }],
            });
            messages.push(ServerMsg::DebugText {
                text: format!("move to {target} blocked"),
            });
        } else if let Some(obstacle) = self.entity_at(target) {
            // Pushable box: both it and the player move in one burst.
            let beyond = target.offset(direction);
            let box_like = matches!(self.entities.get(&obstacle), Some((Entity::Box, _)));
            if box_like && self.walkable(beyond) && self.entity_at(beyond).is_none() {
                if let Some(slot) = self.entities.get_mut(&obstacle) {
                    slot.1 = beyond;
                }
                if let Some(slot) = self.entities.get_mut(&self.player) {
                    slot.1 = target;
                }
                events.push(ScheduledEvent {
                    event: GameEvent::EntityMoved {
                        id: obstacle,
                        from: target,
                        to: beyond,
                    },
                    duration: MOVE_DURATION,
                });
                events.push(ScheduledEvent {
                    event: GameEvent::EntityMoved {
                        id: self.player,
                        from: position,
                        to: target,
                    },
                    duration: MOVE_DURATION,
                });
                messages.push(ServerMsg::Effects {
                    effects: vec![Effect::Sound {
                        cue: "boxscrape".into(),
                    }],
                });
            } else {
                messages.push(ServerMsg::DebugText {
                    text: format!("entity at {target} blocks the move"),
                });
            }
        } else {
            if let Some(slot) = self.entities.get_mut(&self.player) {
                slot.1 = target;
            }
            events.push(ScheduledEvent {
                event: GameEvent::EntityMoved {
                    id: self.player,
                    from: position,
                    to: target,
                },
                duration: MOVE_DURATION,
            });
        }

        if !events.is_empty() {
            messages.insert(
                0,
                ServerMsg::Events {
                    events,
                    time: self.time,
                },
            );
        }
        messages
    }
}
