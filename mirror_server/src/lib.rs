//! `mirror_server`
//!
//! A scripted authority for the mirror client:
//! - Serves the built-in demo level as the initial snapshot
//! - Validates move requests against a minimal rule set
//! - Replies with scheduled-event batches tagged with authoritative time
//!
//! The real game logic lives with the authority this stands in for; the
//! client treats both identically.

pub mod server;
pub mod world;

pub use server::MirrorServer;
