use crate::direction::Direction;

/// A cell coordinate on the level grid.
///
/// `x` grows to the right and `y` grows downwards. Coordinates may be negative or lie beyond the
/// stored cells; looking such a cell up yields an empty tile.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq, Hash)]
pub struct Position {
    pub x: i32,
    pub y: i32,
}

impl Position {
    pub fn new(x: i32, y: i32) -> Self {
        Position { x, y }
    }

    /// The position `steps` cells away in `direction`.
    pub fn step(self, direction: Direction, steps: i32) -> Self {
        self + direction.offset() * steps
    }

    /// True if neither coordinate is negative.
    pub fn is_non_negative(&self) -> bool {
        self.x >= 0 && self.y >= 0
    }
}

impl From<(i32, i32)> for Position {
    fn from(v: (i32, i32)) -> Self {
        Position { x: v.0, y: v.1 }
    }
}

impl std::fmt::Display for Position {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

impl std::ops::Add for Position {
    type Output = Self;

    fn add(self, rhs: Self) -> Self::Output {
        Position {
            x: self.x + rhs.x,
            y: self.y + rhs.y,
        }
    }
}

impl std::ops::Mul<i32> for Position {
    type Output = Self;

    fn mul(self, rhs: i32) -> Self::Output {
        Position {
            x: self.x * rhs,
            y: self.y * rhs,
        }
    }
}
