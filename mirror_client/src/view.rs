//! Presentation read model.
//!
//! The renderer is an external collaborator; each frame it reads a flat
//! scene description from here. Sprite keys reproduce the asset naming
//! the art pack uses: state-dependent kinds (gates, inks, pools,
//! balloons) select a keyed variant, everything else maps straight from
//! its kind, with a `NoSprite` fallback the renderer shows for kinds it
//! has no art for.

use mirror_shared::{
    grid::Point,
    math::Vec2,
    world::{Entity, EntityId, InkColor, Tile},
};

use crate::mirror::MirrorStore;

pub const NO_SPRITE: &str = "NoSprite";

/// One tile to draw.
#[derive(Debug, Clone, PartialEq)]
pub struct TileSprite {
    pub position: Point,
    pub sprite: String,
}

/// One entity to draw, at its displayed (interpolated) state.
#[derive(Debug, Clone, PartialEq)]
pub struct EntitySprite {
    pub id: EntityId,
    pub sprite: String,
    pub position: Vec2,
    pub angle: f32,
}

fn color_suffix(color: InkColor) -> &'static str {
    match color {
        InkColor::Red => "Red",
        InkColor::Green => "Green",
        InkColor::Blue => "Blue",
    }
}

pub fn tile_sprite_key(tile: &Tile) -> String {
    match tile {
        Tile::Path => "Path".to_string(),
        Tile::Wall => "Wall".to_string(),
        Tile::Button { .. } => "Button".to_string(),
        Tile::Gate { open: true } => "GateOpened".to_string(),
        Tile::Gate { open: false } => "GateClosed".to_string(),
        Tile::Ink { color } => format!("Ink{}", color_suffix(*color)),
        Tile::Pool { color } => format!("Pool{}", color_suffix(*color)),
        Tile::Corner { .. } => "Corner".to_string(),
        Tile::Piston { .. } => "Piston".to_string(),
        Tile::Teleporter => "Teleporter".to_string(),
    }
}

pub fn entity_sprite_key(entity: &Entity) -> String {
    match entity {
        Entity::Player { .. } => "Player".to_string(),
        Entity::Box => "Box".to_string(),
        Entity::Balloon { color } => format!("Balloon{}", color_suffix(*color)),
        Entity::Piston { .. } => "PistonEntity".to_string(),
    }
}

/// Flattens the mirror into draw lists for the current frame.
pub fn scene_sprites(store: &MirrorStore) -> (Vec<TileSprite>, Vec<EntitySprite>) {
    let tiles = store
        .iter_tiles()
        .map(|(position, tile)| TileSprite {
            position,
            sprite: tile_sprite_key(tile),
        })
        .collect();

    let entities = store
        .iter_entities()
        .map(|(id, rec)| EntitySprite {
            id,
            sprite: entity_sprite_key(&rec.entity),
            position: rec.displayed,
            angle: rec.heading,
        })
        .collect();

    (tiles, entities)
}
