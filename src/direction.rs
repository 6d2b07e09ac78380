use strum::{Display, EnumIter};

use crate::position::Position;

/// The four directions the character can walk in.
#[derive(Copy, Clone, Debug, Display, EnumIter, Eq, PartialEq, Hash)]
pub enum Direction {
    Left,
    Right,
    Up,
    Down,
}

impl Direction {
    /// The unit offset of a single step in this direction.
    pub(crate) fn offset(self) -> Position {
        match self {
            Direction::Left => Position::new(-1, 0),
            Direction::Right => Position::new(1, 0),
            Direction::Up => Position::new(0, -1),
            Direction::Down => Position::new(0, 1),
        }
    }
}

impl std::ops::Neg for Direction {
    type Output = Direction;
    fn neg(self) -> Self::Output {
        match self {
            Direction::Left => Direction::Right,
            Direction::Right => Direction::Left,
            Direction::Up => Direction::Down,
            Direction::Down => Direction::Up,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use strum::IntoEnumIterator;

    #[test]
    fn iteration() {
        let mut iter = Direction::iter();
        assert_eq!(iter.next(), Some(Direction::Left));
        assert_eq!(iter.next(), Some(Direction::Right));
        assert_eq!(iter.next(), Some(Direction::Up));
        assert_eq!(iter.next(), Some(Direction::Down));
        assert_eq!(iter.next(), None);
    }

    #[test]
    fn opposite() {
        assert_eq!(-Direction::Up, Direction::Down);
        assert_eq!(-Direction::Down, Direction::Up);
        assert_eq!(-Direction::Left, Direction::Right);
        assert_eq!(-Direction::Right, Direction::Left);
    }

    #[test]
    fn opposite_offsets_cancel() {
        for direction in Direction::iter() {
            assert_eq!(direction.offset() + (-direction).offset(), Position::default());
        }
    }

    #[test]
    fn display() {
        assert_eq!(Direction::Left.to_string(), "Left");
        assert_eq!(Direction::Down.to_string(), "Down");
    }
}
