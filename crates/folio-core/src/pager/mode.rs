//! Reading-direction policy: which slot sits on which side.

pub use crate::config::ReadingMode;

/// One of the three fixed slot roles
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SlotRole {
    Previous,
    Current,
    Next,
}

/// Logical direction of an advance
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    /// Towards index 0
    Backward,
    /// Towards the last index
    Forward,
}

impl Direction {
    /// Slot holding the page this direction advances to
    pub fn role(self) -> SlotRole {
        match self {
            Direction::Backward => SlotRole::Previous,
            Direction::Forward => SlotRole::Next,
        }
    }
}

/// Screen side
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Side {
    Left,
    Right,
}

impl Side {
    pub fn opposite(self) -> Self {
        match self {
            Side::Left => Side::Right,
            Side::Right => Side::Left,
        }
    }
}

impl ReadingMode {
    /// Logical direction of the page shown on `side`
    pub fn direction(self, side: Side) -> Direction {
        match (self, side) {
            (ReadingMode::LeftToRight, Side::Left) => Direction::Backward,
            (ReadingMode::LeftToRight, Side::Right) => Direction::Forward,
            (ReadingMode::RightToLeft, Side::Left) => Direction::Forward,
            (ReadingMode::RightToLeft, Side::Right) => Direction::Backward,
        }
    }

    /// Slot shown on `side`
    #[inline]
    pub fn role(self, side: Side) -> SlotRole {
        self.direction(side).role()
    }

    pub fn toggled(self) -> Self {
        match self {
            ReadingMode::LeftToRight => ReadingMode::RightToLeft,
            ReadingMode::RightToLeft => ReadingMode::LeftToRight,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_left_to_right_roles() {
        let mode = ReadingMode::LeftToRight;
        assert_eq!(mode.role(Side::Left), SlotRole::Previous);
        assert_eq!(mode.role(Side::Right), SlotRole::Next);
    }

    #[test]
    fn test_right_to_left_mirrors() {
        for side in [Side::Left, Side::Right] {
            assert_eq!(
                ReadingMode::RightToLeft.direction(side),
                ReadingMode::LeftToRight.direction(side.opposite())
            );
        }
    }

    #[test]
    fn test_toggle() {
        assert_eq!(ReadingMode::LeftToRight.toggled(), ReadingMode::RightToLeft);
        assert_eq!(ReadingMode::RightToLeft.toggled().toggled(), ReadingMode::RightToLeft);
    }
}
