//! `mirror_client`
//!
//! Client-side state reconciliation and interpolation:
//! - Mirror store keyed by stable entity identifiers
//! - Change-record dispatch (immediate effects + scheduled events)
//! - Virtual time synchronized to the authority
//! - Per-entity position/heading interpolation
//! - Frame loop driver
//! - Presentation/asset/input seams

pub mod assets;
pub mod client;
pub mod clock;
pub mod dispatch;
pub mod frame;
pub mod input;
pub mod interp;
pub mod mirror;
pub mod view;

pub use client::GameClient;
