use crate::error::GameError;

/// Direction the snake can move
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

/// All directions in action-index order
pub const ACTIONS: [Direction; 4] = [
    Direction::Up,
    Direction::Down,
    Direction::Left,
    Direction::Right,
];

/// Number of discrete actions available to the agent
pub const ACTION_COUNT: usize = ACTIONS.len();

impl Direction {
    /// Returns the delta (dx, dy) for moving in this direction
    pub fn delta(&self) -> (i32, i32) {
        match self {
            Direction::Up => (0, -1),
            Direction::Down => (0, 1),
            Direction::Left => (-1, 0),
            Direction::Right => (1, 0),
        }
    }

    /// Index of this direction in the agent's action space
    pub fn index(&self) -> usize {
        match self {
            Direction::Up => 0,
            Direction::Down => 1,
            Direction::Left => 2,
            Direction::Right => 3,
        }
    }
}

impl TryFrom<usize> for Direction {
    type Error = GameError;

    /// Convert an action index to a direction.
    ///
    /// Out-of-range indices are rejected rather than silently mapped to a
    /// default, so a buggy policy fails loudly.
    fn try_from(idx: usize) -> Result<Self, Self::Error> {
        ACTIONS.get(idx).copied().ok_or(GameError::InvalidAction(idx))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_direction_delta() {
        assert_eq!(Direction::Up.delta(), (0, -1));
        assert_eq!(Direction::Down.delta(), (0, 1));
        assert_eq!(Direction::Left.delta(), (-1, 0));
        assert_eq!(Direction::Right.delta(), (1, 0));
    }

    #[test]
    fn test_index_round_trip() {
        for direction in ACTIONS {
            assert_eq!(Direction::try_from(direction.index()).unwrap(), direction);
        }
    }

    #[test]
    fn test_invalid_index_rejected() {
        assert!(matches!(
            Direction::try_from(4),
            Err(GameError::InvalidAction(4))
        ));
        assert!(Direction::try_from(usize::MAX).is_err());
    }
}
