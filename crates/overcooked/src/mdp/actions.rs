//! Player orientations and the six-symbol action vocabulary.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Grid coordinate `(x, y)`: x grows to the east, y grows to the south.
pub type Position = (usize, usize);

/// Cardinal direction a player can face or move towards.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Direction {
    North,
    South,
    East,
    West,
}

impl Direction {
    /// All directions, in orientation-channel order
    pub const ALL: [Direction; 4] = [
        Direction::North,
        Direction::South,
        Direction::East,
        Direction::West,
    ];

    /// Unit step `(dx, dy)` for this direction
    pub const fn delta(self) -> (i32, i32) {
        match self {
            Direction::North => (0, -1),
            Direction::South => (0, 1),
            Direction::East => (1, 0),
            Direction::West => (-1, 0),
        }
    }

    /// Index into [`Direction::ALL`]
    pub const fn index(self) -> usize {
        match self {
            Direction::North => 0,
            Direction::South => 1,
            Direction::East => 2,
            Direction::West => 3,
        }
    }

    /// Arrow glyph used by the text renderer
    pub const fn arrow(self) -> char {
        match self {
            Direction::North => '↑',
            Direction::South => '↓',
            Direction::East => '→',
            Direction::West => '←',
        }
    }

    /// Cell adjacent to `pos` in this direction, if it is not off the top/left edge.
    pub fn step_from(self, pos: Position) -> Option<Position> {
        let (dx, dy) = self.delta();
        let x = pos.0 as i64 + dx as i64;
        let y = pos.1 as i64 + dy as i64;
        if x < 0 || y < 0 {
            None
        } else {
            Some((x as usize, y as usize))
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (dx, dy) = self.delta();
        write!(f, "({}, {})", dx, dy)
    }
}

/// A single player's action for one timestep.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Action {
    /// Turn towards the direction and move one cell if it is free floor
    Move(Direction),
    /// Do nothing
    Stay,
    /// Interact with the cell the player is facing
    Interact,
}

impl Action {
    /// Number of distinct actions
    pub const NUM_ACTIONS: usize = 6;

    /// All actions, indexed by their discrete action id
    pub const ALL: [Action; Self::NUM_ACTIONS] = [
        Action::Move(Direction::North),
        Action::Move(Direction::South),
        Action::Move(Direction::East),
        Action::Move(Direction::West),
        Action::Stay,
        Action::Interact,
    ];

    /// Look up the action for a discrete id
    pub fn from_index(index: usize) -> Option<Action> {
        Self::ALL.get(index).copied()
    }

    /// Discrete id of this action
    pub fn index(self) -> usize {
        match self {
            Action::Move(d) => d.index(),
            Action::Stay => 4,
            Action::Interact => 5,
        }
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Action::Move(d) => write!(f, "{}", d),
            Action::Stay => f.write_str("(0, 0)"),
            Action::Interact => f.write_str("interact"),
        }
    }
}

/// Format a list of actions the way the diagnostics print them
pub fn format_actions(actions: &[Action]) -> String {
    let items: Vec<String> = actions.iter().map(|a| a.to_string()).collect();
    format!("[{}]", items.join(", "))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_action_index_round_trip() {
        for (i, action) in Action::ALL.iter().enumerate() {
            assert_eq!(action.index(), i);
            assert_eq!(Action::from_index(i), Some(*action));
        }
        assert_eq!(Action::from_index(6), None);
    }

    #[test]
    fn test_action_display() {
        assert_eq!(
            format_actions(&Action::ALL),
            "[(0, -1), (0, 1), (1, 0), (-1, 0), (0, 0), interact]"
        );
    }

    #[test]
    fn test_step_from_edges() {
        assert_eq!(Direction::North.step_from((2, 0)), None);
        assert_eq!(Direction::West.step_from((0, 3)), None);
        assert_eq!(Direction::East.step_from((2, 3)), Some((3, 3)));
        assert_eq!(Direction::South.step_from((2, 3)), Some((2, 4)));
    }
}
