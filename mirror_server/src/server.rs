//! Session handling for the scripted authority.
//!
//! One ordered TCP connection per client; each session owns its own
//! demo world. The accept loop is sequential: this server exists to
//! exercise the client contract, not to scale.

use std::net::SocketAddr;

use anyhow::Context;
use tracing::{info, warn};

use mirror_shared::{
    net::{SignalConn, SignalListener},
    protocol::{ClientMsg, ServerMsg, PROTOCOL_VERSION},
};

use crate::world::{World, TICK_DURATION};

pub struct MirrorServer {
    listener: SignalListener,
}

impl MirrorServer {
    pub async fn bind(addr: SocketAddr) -> anyhow::Result<Self> {
        let listener = SignalListener::bind(addr).await?;
        Ok(Self { listener })
    }

    pub fn local_addr(&self) -> anyhow::Result<SocketAddr> {
        self.listener.local_addr()
    }

    /// Accepts one client and performs the join handshake: expects
    /// `Join`, replies with the initial map, time, and tick duration.
    pub async fn accept_session(&self) -> anyhow::Result<Session> {
        let (mut conn, peer) = self.listener.accept().await?;

        let msg: ClientMsg = conn.recv().await.context("read join")?;
        let player_name = match msg {
            ClientMsg::Join {
                protocol,
                player_name,
            } if protocol == PROTOCOL_VERSION => player_name,
            other => anyhow::bail!("expected Join, got {other:?}"),
        };

        let world = World::demo();
        conn.send(&ServerMsg::InitialMap {
            map: world.snapshot(),
            time: world.time(),
            tick_duration: TICK_DURATION,
        })
        .await?;

        info!(%peer, player = %player_name, "Session started");
        Ok(Session { conn, world })
    }

    /// Serves sessions forever, one client at a time.
    pub async fn run(&self) -> anyhow::Result<()> {
        loop {
            match self.accept_session().await {
                Ok(mut session) => {
                    if let Err(e) = session.run().await {
                        info!(error = %e, "Session ended");
                    }
                }
                Err(e) => warn!(error = %e, "Handshake failed"),
            }
        }
    }
}

/// A joined client with its own world.
pub struct Session {
    conn: SignalConn,
    world: World,
}

impl Session {
    /// Processes move requests until the client goes away.
    pub async fn run(&mut self) -> anyhow::Result<()> {
        loop {
            self.step().await?;
        }
    }

    /// Handles exactly one inbound request.
    pub async fn step(&mut self) -> anyhow::Result<()> {
        let msg: ClientMsg = self.conn.recv().await?;
        match msg {
            ClientMsg::MovePlayer { direction } => {
                for reply in self.world.handle_move(direction) {
                    self.conn.send(&reply).await?;
                }
            }
            ClientMsg::Join { .. } => {
                warn!("duplicate join, ignoring");
            }
        }
        Ok(())
    }
}

/// Helper for tests: bind to an ephemeral loopback port.
pub async fn bind_ephemeral() -> anyhow::Result<(MirrorServer, SocketAddr)> {
    let server = MirrorServer::bind("127.0.0.1:0".parse()?).await?;
    let addr = server.local_addr()?;
    Ok((server, addr))
}
