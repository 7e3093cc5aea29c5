//! Typed domain errors.
//!
//! These cover the mirror store contract. Transport and I/O paths use
//! `anyhow` with context instead.

use thiserror::Error;

use crate::{grid::Point, world::EntityId};

#[derive(Debug, Error, PartialEq)]
pub enum MirrorError {
    /// Snapshot grid dimensions do not match the tile array length.
    /// Fatal to session start.
    #[error("malformed snapshot: {expected} tiles expected for grid, got {actual}")]
    MalformedSnapshot { expected: usize, actual: usize },

    /// Position outside the grid. A protocol bug; the dispatcher logs
    /// and drops the offending record rather than crashing rendering.
    #[error("position {position} outside grid of size {size}")]
    OutOfBounds { position: Point, size: Point },

    /// Spawn for an identifier that is already live.
    #[error("entity id {0:?} already exists")]
    DuplicateIdentifier(EntityId),
}
