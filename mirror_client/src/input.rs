//! Input handling.
//!
//! Maps key names to move directions and builds the corresponding wire
//! request. Moves have no local effect; the mirror changes only when the
//! authority's change records come back.

use mirror_shared::{grid::Direction, protocol::ClientMsg};

/// Resolves a key name (browser-style, e.g. `"ArrowLeft"`, `"w"`) to a
/// move direction. Unbound keys resolve to `None`.
pub fn direction_for_key(key: &str) -> Option<Direction> {
    match key {
        "ArrowUp" | "w" | "W" => Some(Direction::North),
        "ArrowRight" | "d" | "D" => Some(Direction::East),
        "ArrowDown" | "s" | "S" => Some(Direction::South),
        "ArrowLeft" | "a" | "A" => Some(Direction::West),
        _ => None,
    }
}

/// Builds the move request forwarded to the authority.
pub fn build_move_request(direction: Direction) -> ClientMsg {
    ClientMsg::MovePlayer { direction }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn arrow_and_wasd_bindings_agree() {
        assert_eq!(direction_for_key("ArrowUp"), Some(Direction::North));
        assert_eq!(direction_for_key("w"), Some(Direction::North));
        assert_eq!(direction_for_key("A"), Some(Direction::West));
        assert_eq!(direction_for_key("d"), Some(Direction::East));
        assert_eq!(direction_for_key("S"), Some(Direction::South));
        assert_eq!(direction_for_key("Escape"), None);
    }
}
