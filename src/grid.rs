pub use crate::position::Position;

/// A grid of cells stored row by row.
///
/// The cell at the top-left corner has the position (0, 0). Rows may have different lengths.
/// Cells which are not stored (beyond the end of a row, beyond the last row, or at negative
/// coordinates) read as `T::default()`.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct Grid<T> {
    rows: Vec<Vec<T>>,
}

impl<T: Copy + Default> Grid<T> {
    pub fn from_rows(rows: Vec<Vec<T>>) -> Self {
        Grid { rows }
    }

    /// Number of stored rows.
    pub fn rows(&self) -> usize {
        self.rows.len()
    }

    /// Length of the longest row.
    pub fn cols(&self) -> usize {
        self.rows.iter().map(Vec::len).max().unwrap_or(0)
    }

    pub fn contains(&self, pos: Position) -> bool {
        self.get(pos).is_some()
    }

    /// The stored cell at `pos`, if any.
    pub fn get(&self, pos: Position) -> Option<&T> {
        if !pos.is_non_negative() {
            return None;
        }
        self.rows.get(pos.y as usize)?.get(pos.x as usize)
    }

    /// The cell at `pos`, or the default value if it is not stored.
    pub fn get_or_default(&self, pos: Position) -> T {
        self.get(pos).copied().unwrap_or_default()
    }

    /// Store `value` at `pos`, padding the grid with default cells as needed.
    ///
    /// Returns false and leaves the grid untouched if `pos` has a negative coordinate.
    pub fn set(&mut self, pos: Position, value: T) -> bool {
        if !pos.is_non_negative() {
            return false;
        }
        let (x, y) = (pos.x as usize, pos.y as usize);
        if self.rows.len() <= y {
            self.rows.resize_with(y + 1, Vec::new);
        }
        let row = &mut self.rows[y];
        if row.len() <= x {
            row.resize(x + 1, T::default());
        }
        row[x] = value;
        true
    }

    /// The stored cells of row `y`.
    pub fn row(&self, y: usize) -> Option<&[T]> {
        self.rows.get(y).map(Vec::as_slice)
    }

    /// Iterate over all stored cells in row-major order together with their positions.
    pub fn indexed_iter(&self) -> impl Iterator<Item = (Position, &T)> + '_ {
        self.rows.iter().enumerate().flat_map(|(y, row)| {
            row.iter()
                .enumerate()
                .map(move |(x, cell)| (Position::new(x as i32, y as i32), cell))
        })
    }

    /// Iterate over all stored cells in row-major order.
    pub fn iter(&self) -> impl Iterator<Item = &T> + '_ {
        self.rows.iter().flatten()
    }
}
