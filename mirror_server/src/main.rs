//! Standalone authority binary.
//!
//! Usage:
//!   cargo run -p mirror_server -- [--addr 127.0.0.1:40100]

use std::env;

use anyhow::Context;
use mirror_server::MirrorServer;
use tracing::info;

fn parse_addr() -> String {
    let args: Vec<String> = env::args().collect();
    let mut addr = "127.0.0.1:40100".to_string();
    let mut i = 1;
    while i < args.len() {
        if args[i] == "--addr" && i + 1 < args.len() {
            addr = args[i + 1].clone();
            i += 2;
        } else {
            i += 1;
        }
    }
    addr
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()),
        )
        .init();

    let addr = parse_addr();
    let server = MirrorServer::bind(addr.parse().context("parse addr")?)
        .await
        .context("bind")?;
    info!(addr = %server.local_addr()?, "Authority listening");

    server.run().await
}
