//! Wire protocol between the authority and the mirror client.
//!
//! Two change-record families exist, distinguished by the message that
//! carries them:
//! - [`Effect`]: immediate, no visual transition.
//! - [`GameEvent`] inside a [`ScheduledEvent`]: applied with a
//!   server-specified animation window.
//!
//! Both are internally tagged (`kind`) with a `#[serde(other)]` arm so a
//! newer authority can ship record kinds this build does not know; the
//! dispatcher logs and ignores those instead of failing the session.

use serde::{Deserialize, Serialize};

use crate::{
    grid::{Direction, Point},
    world::{Entity, EntityId, InkColor, MapSnapshot, Tile},
};

/// Protocol version for compatibility checks.
pub const PROTOCOL_VERSION: u32 = 1;

/// Immediate change record: applied instantly, no animation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind")]
pub enum Effect {
    /// Replace the tile at a position wholesale.
    TileUpdate { position: Point, tile: Tile },
    /// Replace an entity's tagged state; identity and position keep.
    EntityUpdate { id: EntityId, entity: Entity },
    /// Instantaneous reposition: target and displayed jump together.
    EntityMove { id: EntityId, position: Point },
    EntitySpawn {
        id: EntityId,
        entity: Entity,
        position: Point,
    },
    EntityDespawn { id: EntityId },
    /// Fire-and-forget audio cue.
    Sound { cue: String },
    /// Forward-compatibility arm for unrecognized kinds.
    #[serde(other)]
    Unknown,
}

/// Scheduled change record payload.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind")]
pub enum GameEvent {
    /// Entity moves; the client animates displayed position from its
    /// current value to `to` over the event's duration.
    EntityMoved {
        id: EntityId,
        from: Point,
        to: Point,
    },
    /// Player turned in place; facing converges via angular smoothing.
    PlayerRotated {
        id: EntityId,
        orientation: Direction,
    },
    GateOpened { position: Point },
    GateClosed { position: Point },
    ButtonPressed { position: Point },
    ButtonReleased { position: Point },
    /// Balloon takes a color; the originating ink tile is consumed and
    /// becomes a plain path tile.
    BalloonColored {
        id: EntityId,
        color: InkColor,
        ink_position: Point,
    },
    /// Balloon destroyed on a pool tile; despawn, no animation.
    BalloonPopped {
        id: EntityId,
        pool_position: Point,
    },
    #[serde(other)]
    Unknown,
}

/// A [`GameEvent`] plus its animation window, in virtual-time units.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScheduledEvent {
    pub event: GameEvent,
    pub duration: f64,
}

/// Authority → client messages.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum ServerMsg {
    /// Delivered once at session start.
    InitialMap {
        map: MapSnapshot,
        /// Authoritative virtual time at the snapshot.
        time: f64,
        /// Wall-clock seconds per simulation tick, constant per session.
        tick_duration: f64,
    },
    Effects { effects: Vec<Effect> },
    /// Event batch, tagged with the authoritative virtual time the
    /// client resyncs to before applying the batch.
    Events {
        events: Vec<ScheduledEvent>,
        time: f64,
    },
    /// Diagnostic text for a debug overlay.
    DebugText { text: String },
    Disconnect { reason: String },
}

/// Client → authority messages.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum ClientMsg {
    Join { protocol: u32, player_name: String },
    /// Move request; the client applies nothing locally until the
    /// corresponding change records arrive.
    MovePlayer { direction: Direction },
}

/// Convenience codec helpers.
pub fn encode_to_vec<M: Serialize>(msg: &M) -> anyhow::Result<Vec<u8>> {
    use anyhow::Context;
    serde_json::to_vec(msg).context("serialize")
}

pub fn decode_from_bytes<M: serde::de::DeserializeOwned>(b: &[u8]) -> anyhow::Result<M> {
    use anyhow::Context;
    serde_json::from_slice(b).context("deserialize")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn effect_roundtrip() {
        let eff = Effect::EntitySpawn {
            id: EntityId(7),
            entity: Entity::Box,
            position: Point::new(1, 2),
        };
        let bytes = encode_to_vec(&eff).unwrap();
        assert_eq!(decode_from_bytes::<Effect>(&bytes).unwrap(), eff);
    }

    #[test]
    fn server_msg_roundtrip() {
        let msg = ServerMsg::Events {
            events: vec![ScheduledEvent {
                event: GameEvent::EntityMoved {
                    id: EntityId(1),
                    from: Point::new(0, 0),
                    to: Point::new(1, 0),
                },
                duration: 2.0,
            }],
            time: 4.5,
        };
        let bytes = encode_to_vec(&msg).unwrap();
        assert_eq!(decode_from_bytes::<ServerMsg>(&bytes).unwrap(), msg);
    }

    #[test]
    fn unrecognized_kind_decodes_to_unknown() {
        let eff: Effect =
            serde_json::from_str(r#"{"kind":"GravityReversed","strength":9}"#).unwrap();
        assert_eq!(eff, Effect::Unknown);

        let ev: GameEvent = serde_json::from_str(r#"{"kind":"WormholeOpened"}"#).unwrap();
        assert_eq!(ev, GameEvent::Unknown);
    }
}
