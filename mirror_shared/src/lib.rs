//! `mirror_shared`
//!
//! Libraries shared by the mirror client and the authority:
//!
//! Design goals:
//! - Deterministic and modular where practical.
//! - Clear separation of concerns (math, grid, world, protocol, net).
//! - Closed tagged unions for every wire family, each with an explicit
//!   forward-compatibility arm.
//! - No `unsafe`.

pub mod config;
pub mod error;
pub mod grid;
pub mod math;
pub mod net;
pub mod protocol;
pub mod world;

pub mod prelude {
    //! Commonly used exports.

    pub use crate::config::*;
    pub use crate::error::*;
    pub use crate::grid::*;
    pub use crate::math::*;
    pub use crate::protocol::*;
    pub use crate::world::*;
}
