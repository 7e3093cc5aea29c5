//! The mirror store: the client-local copy of authoritative world state.
//!
//! Owns the fixed-size tile grid and the identifier-keyed entity
//! collection. The dispatcher writes target fields, the interpolator
//! writes displayed fields; nothing else mutates the store.

use std::collections::HashMap;

use tracing::warn;

use mirror_shared::{
    error::MirrorError,
    grid::Point,
    math::Vec2,
    world::{Entity, EntityId, MapSnapshot, Tile},
};

use crate::interp::MoveAnimation;

/// Per-entity record: authoritative target state plus the continuously
/// interpolated displayed state.
#[derive(Debug, Clone)]
pub struct EntityRecord {
    pub entity: Entity,
    /// Authoritative grid position.
    pub target: Point,
    /// Continuous position shown to the user, converging on `target`.
    pub displayed: Vec2,
    /// Displayed facing angle in radians, converging on `entity.facing()`.
    pub heading: f32,
    /// Live position animation, if any. Superseded, never queued.
    pub move_anim: Option<MoveAnimation>,
}

impl EntityRecord {
    pub fn new(entity: Entity, position: Point) -> Self {
        let heading = entity.facing();
        Self {
            entity,
            target: position,
            displayed: Vec2::from(position),
            heading,
            move_anim: None,
        }
    }
}

/// Client-local mirror of the grid world.
pub struct MirrorStore {
    size: Point,
    tiles: Vec<Tile>,
    entities: HashMap<EntityId, EntityRecord>,
}

impl MirrorStore {
    /// Builds the mirror from the authoritative initial snapshot.
    pub fn from_snapshot(snapshot: &MapSnapshot) -> Result<Self, MirrorError> {
        let expected = (snapshot.size.x.max(0) as usize) * (snapshot.size.y.max(0) as usize);
        if expected != snapshot.tiles.len() {
            return Err(MirrorError::MalformedSnapshot {
                expected,
                actual: snapshot.tiles.len(),
            });
        }

        let mut entities = HashMap::with_capacity(snapshot.entities.len());
        for entry in &snapshot.entities {
            if entities
                .insert(entry.id, EntityRecord::new(entry.entity.clone(), entry.position))
                .is_some()
            {
                return Err(MirrorError::DuplicateIdentifier(entry.id));
            }
        }

        Ok(Self {
            size: snapshot.size,
            tiles: snapshot.tiles.clone(),
            entities,
        })
    }

    pub fn size(&self) -> Point {
        self.size
    }

    fn index(&self, position: Point) -> Result<usize, MirrorError> {
        if position.x < 0
            || position.y < 0
            || position.x >= self.size.x
            || position.y >= self.size.y
        {
            return Err(MirrorError::OutOfBounds {
                position,
                size: self.size,
            });
        }
        Ok(position.y as usize * self.size.x as usize + position.x as usize)
    }

    pub fn tile(&self, position: Point) -> Result<&Tile, MirrorError> {
        let i = self.index(position)?;
        Ok(&self.tiles[i])
    }

    /// Replaces the tile at `position` wholesale.
    pub fn set_tile(&mut self, position: Point, tile: Tile) -> Result<(), MirrorError> {
        let i = self.index(position)?;
        self.tiles[i] = tile;
        Ok(())
    }

    /// Absence is normal: the entity may have despawned between a record
    /// being sent and processed.
    pub fn entity(&self, id: EntityId) -> Option<&EntityRecord> {
        self.entities.get(&id)
    }

    pub fn entity_mut(&mut self, id: EntityId) -> Option<&mut EntityRecord> {
        self.entities.get_mut(&id)
    }

    pub fn spawn(
        &mut self,
        id: EntityId,
        entity: Entity,
        position: Point,
    ) -> Result<(), MirrorError> {
        if self.entities.contains_key(&id) {
            return Err(MirrorError::DuplicateIdentifier(id));
        }
        self.entities.insert(id, EntityRecord::new(entity, position));
        Ok(())
    }

    /// Removes an entity. Returns false (after a debug log) when the id
    /// was already absent; that is a recoverable race, not a fault.
    pub fn despawn(&mut self, id: EntityId) -> bool {
        if self.entities.remove(&id).is_some() {
            true
        } else {
            warn!(id = id.0, "despawn for absent entity, ignoring");
            false
        }
    }

    pub fn entity_count(&self) -> usize {
        self.entities.len()
    }

    pub fn iter_entities(&self) -> impl Iterator<Item = (EntityId, &EntityRecord)> {
        self.entities.iter().map(|(id, rec)| (*id, rec))
    }

    pub fn iter_entities_mut(&mut self) -> impl Iterator<Item = (EntityId, &mut EntityRecord)> {
        self.entities.iter_mut().map(|(id, rec)| (*id, rec))
    }

    /// Tiles in row-major order with their grid positions.
    pub fn iter_tiles(&self) -> impl Iterator<Item = (Point, &Tile)> {
        let w = self.size.x;
        self.tiles.iter().enumerate().map(move |(i, tile)| {
            let i = i as i32;
            (Point::new(i % w, i / w), tile)
        })
    }
}
