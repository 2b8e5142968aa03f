// ============================================================================
// input.rs - Glidepan
// Pan directions and the set of directions currently held.
// ============================================================================

use serde::{Deserialize, Serialize};

/// One of the four pan directions a key handler can report.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    pub const ALL: [Direction; 4] = [
        Direction::Up,
        Direction::Down,
        Direction::Left,
        Direction::Right,
    ];

    /// Sign of this direction along its axis (UP/LEFT negative).
    pub fn sign(self) -> f32 {
        match self {
            Direction::Up | Direction::Left => -1.0,
            Direction::Down | Direction::Right => 1.0,
        }
    }

    pub fn is_horizontal(self) -> bool {
        matches!(self, Direction::Left | Direction::Right)
    }

    pub fn name(self) -> &'static str {
        match self {
            Direction::Up => "up",
            Direction::Down => "down",
            Direction::Left => "left",
            Direction::Right => "right",
        }
    }
}

/// Tracks which pan directions are currently held. Opposite directions may
/// both be held at once.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct DirectionFlags {
    pub up: bool,
    pub down: bool,
    pub left: bool,
    pub right: bool,
}

impl DirectionFlags {
    pub fn get(&self, direction: Direction) -> bool {
        match direction {
            Direction::Up => self.up,
            Direction::Down => self.down,
            Direction::Left => self.left,
            Direction::Right => self.right,
        }
    }

    pub fn set(&mut self, direction: Direction, held: bool) {
        match direction {
            Direction::Up => self.up = held,
            Direction::Down => self.down = held,
            Direction::Left => self.left = held,
            Direction::Right => self.right = held,
        }
    }

    pub fn any(&self) -> bool {
        self.up || self.down || self.left || self.right
    }

    pub fn horizontal_held(&self) -> bool {
        self.left || self.right
    }

    pub fn vertical_held(&self) -> bool {
        self.up || self.down
    }

    pub fn count(&self) -> u32 {
        Direction::ALL.iter().filter(|d| self.get(**d)).count() as u32
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flags_are_independent() {
        let mut flags = DirectionFlags::default();
        flags.set(Direction::Up, true);
        flags.set(Direction::Down, true);
        assert!(flags.up && flags.down);
        assert!(flags.vertical_held());
        assert!(!flags.horizontal_held());
        assert_eq!(flags.count(), 2);

        flags.set(Direction::Up, false);
        flags.set(Direction::Down, false);
        assert!(!flags.any());
    }

    #[test]
    fn direction_parses_lowercase() {
        let dir: Direction = serde_json::from_str("\"left\"").unwrap();
        assert_eq!(dir, Direction::Left);
        assert_eq!(dir.sign(), -1.0);
        assert!(dir.is_horizontal());
    }
}
