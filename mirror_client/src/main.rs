//! Standalone client binary.
//!
//! Usage:
//!   cargo run -p mirror_client -- [--addr 127.0.0.1:40100] [--name Player]
//!
//! The client joins the authority, mirrors its world, and runs the frame
//! loop. Headless presentation: type a key name (w/a/s/d or ArrowUp etc.)
//! and press enter to request a move; `status` prints the scene, `quit`
//! exits.

use std::env;
use std::io::{BufRead, Write};
use std::time::Duration;

use anyhow::Context;
use mirror_client::client::{GameClient, SessionState};
use mirror_client::input::direction_for_key;
use mirror_shared::config::ClientConfig;
use tokio::sync::mpsc;
use tracing::info;

fn parse_args() -> ClientConfig {
    let mut cfg = ClientConfig::default();
    let args: Vec<String> = env::args().collect();
    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--addr" if i + 1 < args.len() => {
                cfg.server_addr = args[i + 1].clone();
                i += 2;
            }
            "--name" if i + 1 < args.len() => {
                cfg.player_name = args[i + 1].clone();
                i += 2;
            }
            _ => i += 1,
        }
    }
    cfg
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()),
        )
        .init();

    let cfg = parse_args();
    info!(server = %cfg.server_addr, name = %cfg.player_name, "Starting client");

    let mut client = GameClient::connect(&cfg).await.context("connect")?;

    // Stdin reader thread feeding key names into the loop.
    let (key_tx, mut key_rx) = mpsc::channel::<String>(32);
    std::thread::spawn(move || {
        let stdin = std::io::stdin();
        let mut stdout = std::io::stdout();
        loop {
            print!("] ");
            let _ = stdout.flush();
            let mut line = String::new();
            if stdin.lock().read_line(&mut line).is_err() {
                break;
            }
            let line = line.trim().to_string();
            if !line.is_empty() && key_tx.blocking_send(line).is_err() {
                break;
            }
        }
    });

    println!("Joined. Keys: w/a/s/d move, 'status' prints the scene, 'quit' exits.");
    println!();

    // ~60 Hz cooperative frame loop; actual deltas are measured.
    let frame_interval = Duration::from_secs_f32(1.0 / 60.0);

    loop {
        while let Ok(line) = key_rx.try_recv() {
            match line.as_str() {
                "quit" | "exit" => return Ok(()),
                "status" => print_status(&client),
                key => {
                    if let Some(direction) = direction_for_key(key) {
                        client.request_move(direction).await?;
                    } else {
                        println!("Unbound key '{key}'");
                    }
                }
            }
        }

        client.poll_server().await?;
        client.frame_tick();

        for cue in client.drain_sounds() {
            // Headless build: audio cues are just reported.
            println!("[sound] {cue}");
        }

        if client.state == SessionState::Disconnected {
            println!("Disconnected from authority.");
            break;
        }

        tokio::time::sleep(frame_interval).await;
    }

    Ok(())
}

fn print_status(client: &GameClient) {
    println!("State: {:?}", client.state);
    if let Some(time) = client.time() {
        println!("Virtual time: {time:.2}");
    }
    if let Some((tiles, entities)) = client.scene() {
        println!("Tiles: {}", tiles.len());
        for e in entities {
            println!(
                "  #{} {} at ({:.2}, {:.2}) angle {:.2}",
                e.id.0, e.sprite, e.position.x, e.position.y, e.angle
            );
        }
    }
    for text in &client.debug_messages {
        println!("[debug] {text}");
    }
}
