//! World model: tiles, entities, and the initial snapshot.
//!
//! Both families are closed sum types tagged on the wire with a `kind`
//! field. The authority may ship kinds this build does not know; those
//! only ever appear inside change records, which carry their own
//! `Unknown` arms (see [`crate::protocol`]).

use serde::{Deserialize, Serialize};

use crate::grid::{Direction, Point};

/// Stable identifier assigned by the authority. Never reused within a
/// session and never derived from position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct EntityId(pub u64);

/// Ink / pool / balloon color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum InkColor {
    Red,
    Green,
    Blue,
}

/// A tile. Tiles are addressed by grid position and never move;
/// a tile-update record replaces the whole tagged value in place.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind")]
pub enum Tile {
    Path,
    Wall,
    Button { pressed: bool },
    Gate { open: bool },
    Ink { color: InkColor },
    Pool { color: InkColor },
    Corner { orientation: Direction },
    Piston { orientation: Direction },
    Teleporter,
}

impl Tile {
    /// Whether an entity can be moved onto this tile.
    /// Only the authority decides moves; the demo server uses this.
    pub fn blocks_movement(&self) -> bool {
        matches!(self, Tile::Wall | Tile::Gate { open: false })
    }
}

/// An entity. Addressed exclusively by [`EntityId`]; position is state,
/// not identity.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind")]
pub enum Entity {
    Player { orientation: Direction },
    Box,
    Balloon { color: InkColor },
    Piston { orientation: Direction },
}

impl Entity {
    /// Target facing angle for directional kinds; non-directional
    /// entities always face north.
    pub fn facing(&self) -> f32 {
        match self {
            Entity::Player { orientation } | Entity::Piston { orientation } => {
                orientation.angle()
            }
            Entity::Box | Entity::Balloon { .. } => 0.0,
        }
    }
}

/// One entity in the initial snapshot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EntityEntry {
    pub id: EntityId,
    pub entity: Entity,
    pub position: Point,
}

/// Authoritative initial snapshot: grid dimensions, tiles in row-major
/// order, and all live entities.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MapSnapshot {
    pub size: Point,
    pub tiles: Vec<Tile>,
    pub entities: Vec<EntityEntry>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn gate_blocks_only_when_closed() {
        assert!(Tile::Gate { open: false }.blocks_movement());
        assert!(!Tile::Gate { open: true }.blocks_movement());
        assert!(Tile::Wall.blocks_movement());
        assert!(!Tile::Path.blocks_movement());
    }

    #[test]
    fn tile_kind_tag_on_wire() {
        let json = serde_json::to_value(&Tile::Ink {
            color: InkColor::Red,
        })
        .unwrap();
        assert_eq!(json["kind"], "Ink");
        assert_eq!(json["color"], "Red");
    }

    #[test]
    fn facing_matches_orientation() {
        let p = Entity::Player {
            orientation: Direction::South,
        };
        assert!((p.facing() - std::f32::consts::PI).abs() < 1e-6);
        assert_eq!(Entity::Box.facing(), 0.0);
    }
}
