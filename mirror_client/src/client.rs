//! Client session.
//!
//! Owns the connection to the authority and the core state it feeds:
//! mirror store, simulation clock, frame loop, sound queue. Message
//! handling and frame ticks run on the same task, so a burst of change
//! records is always fully applied before the next frame reads the
//! store.

use std::net::SocketAddr;

use anyhow::Context;
use tracing::{debug, info, warn};

use mirror_shared::{
    config::ClientConfig,
    grid::Direction,
    net::SignalConn,
    protocol::{ClientMsg, ServerMsg, PROTOCOL_VERSION},
};

use crate::{
    assets::SoundQueue,
    clock::SimClock,
    dispatch,
    frame::FrameLoop,
    input::build_move_request,
    mirror::MirrorStore,
    view::{self, EntitySprite, TileSprite},
};

/// Session state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    /// Joined, waiting for the initial map.
    Joined,
    /// Mirror initialized; frames are meaningful.
    Ready,
    /// Connection lost. The frame loop keeps ticking; only input
    /// forwarding stops.
    Disconnected,
}

/// High-level mirror client.
pub struct GameClient {
    pub state: SessionState,
    conn: SignalConn,
    frame: FrameLoop,
    sounds: SoundQueue,
    mirror: Option<MirrorStore>,
    clock: Option<SimClock>,
    /// Diagnostic text from the authority, for a debug overlay.
    pub debug_messages: Vec<String>,
}

impl GameClient {
    /// Connects to the authority and sends the join request.
    pub async fn connect(cfg: &ClientConfig) -> anyhow::Result<Self> {
        let addr: SocketAddr = cfg.server_addr.parse().context("parse server_addr")?;

        info!(server = %addr, "Connecting to authority");
        let mut conn = SignalConn::connect(addr).await?;
        conn.send(&ClientMsg::Join {
            protocol: PROTOCOL_VERSION,
            player_name: cfg.player_name.clone(),
        })
        .await?;

        Ok(Self {
            state: SessionState::Joined,
            conn,
            frame: FrameLoop::new(cfg.max_frame_dt, cfg.turn_rate),
            sounds: SoundQueue::default(),
            mirror: None,
            clock: None,
            debug_messages: Vec::new(),
        })
    }

    /// Polls the connection briefly and routes any inbound message.
    ///
    /// Only a malformed initial snapshot is fatal; per-record problems
    /// are handled inside the dispatcher and never reach the caller.
    pub async fn poll_server(&mut self) -> anyhow::Result<()> {
        if self.state == SessionState::Disconnected {
            return Ok(());
        }
        match self
            .conn
            .recv_timeout::<ServerMsg>(std::time::Duration::from_millis(10))
            .await
        {
            Ok(Some(msg)) => self.handle_message(msg),
            Ok(None) => Ok(()),
            Err(e) => {
                warn!(error = %e, "Connection lost");
                self.state = SessionState::Disconnected;
                Ok(())
            }
        }
    }

    fn handle_message(&mut self, msg: ServerMsg) -> anyhow::Result<()> {
        match msg {
            ServerMsg::InitialMap {
                map,
                time,
                tick_duration,
            } => {
                let store = MirrorStore::from_snapshot(&map).context("initial snapshot")?;
                info!(
                    size = %map.size,
                    entities = store.entity_count(),
                    tick_duration,
                    "Initial map received"
                );
                self.mirror = Some(store);
                self.clock = Some(SimClock::new(time, tick_duration));
                self.state = SessionState::Ready;
            }
            ServerMsg::Effects { effects } => {
                if let Some(store) = self.mirror.as_mut() {
                    dispatch::apply_effects(store, &effects, &mut self.sounds);
                } else {
                    debug!(count = effects.len(), "Effects before initial map, dropped");
                }
            }
            ServerMsg::Events { events, time } => {
                if let (Some(store), Some(clock)) = (self.mirror.as_mut(), self.clock.as_mut()) {
                    dispatch::apply_event_batch(store, clock, &events, time);
                } else {
                    debug!(count = events.len(), "Events before initial map, dropped");
                }
            }
            ServerMsg::DebugText { text } => {
                debug!(text = %text, "Authority debug message");
                self.debug_messages.push(text);
            }
            ServerMsg::Disconnect { reason } => {
                info!(reason = %reason, "Authority closed the session");
                self.state = SessionState::Disconnected;
            }
        }
        Ok(())
    }

    /// Forwards a move request. No local effect: the mirror changes only
    /// when the corresponding change records arrive.
    pub async fn request_move(&mut self, direction: Direction) -> anyhow::Result<()> {
        if self.state != SessionState::Ready {
            debug!(?direction, "Move request while not ready, dropped");
            return Ok(());
        }
        self.conn.send(&build_move_request(direction)).await
    }

    /// Runs one visual frame. Keeps ticking while disconnected so any
    /// in-flight animation still settles onto its target.
    pub fn frame_tick(&mut self) {
        if let (Some(store), Some(clock)) = (self.mirror.as_mut(), self.clock.as_mut()) {
            self.frame.tick(store, clock);
        }
    }

    /// Current virtual time, once the session is initialized.
    pub fn time(&self) -> Option<f64> {
        self.clock.map(|c| c.time())
    }

    pub fn mirror(&self) -> Option<&MirrorStore> {
        self.mirror.as_ref()
    }

    /// Per-frame draw lists for the presentation layer.
    pub fn scene(&self) -> Option<(Vec<TileSprite>, Vec<EntitySprite>)> {
        self.mirror.as_ref().map(view::scene_sprites)
    }

    /// Pending fire-and-forget audio cues.
    pub fn drain_sounds(&mut self) -> Vec<String> {
        self.sounds.drain()
    }
}
