//! Grid coordinates and directions.

use std::f32::consts::PI;
use std::fmt;

use serde::{Deserialize, Serialize};

/// Discrete grid coordinate. Also used for grid dimensions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub struct Point {
    pub x: i32,
    pub y: i32,
}

impl Point {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    pub fn offset(self, d: Direction) -> Self {
        let (dx, dy) = d.delta();
        Self::new(self.x + dx, self.y + dy)
    }
}

impl fmt::Display for Point {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// Cardinal direction, as used for movement requests and facings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    North,
    East,
    South,
    West,
}

impl Direction {
    /// Unit grid offset. North points toward increasing `y`.
    pub fn delta(self) -> (i32, i32) {
        match self {
            Direction::North => (0, 1),
            Direction::East => (1, 0),
            Direction::South => (0, -1),
            Direction::West => (-1, 0),
        }
    }

    /// Facing angle in radians, counter-clockwise with north at zero.
    pub fn angle(self) -> f32 {
        match self {
            Direction::North => 0.0,
            Direction::East => 1.5 * PI,
            Direction::South => PI,
            Direction::West => 0.5 * PI,
        }
    }
}
