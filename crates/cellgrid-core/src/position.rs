//! Grid coordinates.

use std::fmt::{self, Display};

/// A `(row, col)` coordinate in a square grid.
///
/// Positions are plain values: they carry no reference to the grid they were
/// taken from, so holding one across a reload never dangles. Whether a position
/// is valid depends on the size of the grid it is used with.
///
/// Ordering is row-major, which is also the order in which multi-cell
/// operations visit their cells.
///
/// # Examples
///
/// ```
/// use cellgrid_core::Position;
///
/// let pos = Position::new(2, 7);
/// assert_eq!(pos.index(9), 25);
/// assert_eq!(Position::from_index(25, 9), pos);
/// assert_eq!(pos.block_index(3), 2);
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Position {
    /// Row index, counted from the top.
    pub row: usize,
    /// Column index, counted from the left.
    pub col: usize,
}

impl Position {
    /// The top-left cell.
    pub const ORIGIN: Self = Self::new(0, 0);

    /// Creates a position from a row and a column.
    #[must_use]
    pub const fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }

    /// Converts a row-major index into a position in a grid of `size` columns.
    #[must_use]
    pub const fn from_index(index: usize, size: usize) -> Self {
        Self::new(index / size, index % size)
    }

    /// Returns the row-major index of this position in a grid of `size` columns.
    #[must_use]
    pub const fn index(self, size: usize) -> usize {
        self.row * size + self.col
    }

    /// Returns `true` if both coordinates lie in `0..size`.
    #[must_use]
    pub const fn is_within(self, size: usize) -> bool {
        self.row < size && self.col < size
    }

    /// Returns the index of the block containing this position.
    ///
    /// Blocks are numbered left to right, top to bottom.
    #[must_use]
    pub const fn block_index(self, block_size: usize) -> usize {
        (self.row / block_size) * block_size + self.col / block_size
    }

    /// Returns the position one row up, wrapping from the top row to the bottom.
    #[must_use]
    pub const fn wrapping_up(self, size: usize) -> Self {
        let row = if self.row == 0 { size - 1 } else { self.row - 1 };
        Self::new(row, self.col)
    }

    /// Returns the position one row down, wrapping from the bottom row to the top.
    #[must_use]
    pub const fn wrapping_down(self, size: usize) -> Self {
        Self::new((self.row + 1) % size, self.col)
    }

    /// Returns the position one column left, wrapping to the last column.
    #[must_use]
    pub const fn wrapping_left(self, size: usize) -> Self {
        let col = if self.col == 0 { size - 1 } else { self.col - 1 };
        Self::new(self.row, col)
    }

    /// Returns the position one column right, wrapping to the first column.
    #[must_use]
    pub const fn wrapping_right(self, size: usize) -> Self {
        Self::new(self.row, (self.col + 1) % size)
    }
}

impl From<(usize, usize)> for Position {
    fn from((row, col): (usize, usize)) -> Self {
        Self::new(row, col)
    }
}

impl Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use super::*;

    #[test]
    fn test_index_roundtrip() {
        for index in 0..81 {
            let pos = Position::from_index(index, 9);
            assert!(pos.is_within(9));
            assert_eq!(pos.index(9), index);
        }
    }

    #[test]
    fn test_block_index() {
        assert_eq!(Position::new(0, 0).block_index(3), 0);
        assert_eq!(Position::new(0, 8).block_index(3), 2);
        assert_eq!(Position::new(4, 4).block_index(3), 4);
        assert_eq!(Position::new(8, 0).block_index(3), 6);
        assert_eq!(Position::new(3, 1).block_index(2), 2);
    }

    #[test]
    fn test_wrapping_edges() {
        assert_eq!(Position::new(0, 3).wrapping_up(9), Position::new(8, 3));
        assert_eq!(Position::new(8, 3).wrapping_down(9), Position::new(0, 3));
        assert_eq!(Position::new(5, 0).wrapping_left(9), Position::new(5, 8));
        assert_eq!(Position::new(5, 8).wrapping_right(9), Position::new(5, 0));
    }

    #[test]
    fn test_display() {
        assert_eq!(Position::new(2, 7).to_string(), "(2, 7)");
    }

    proptest! {
        #[test]
        fn prop_wrapping_steps_are_inverse(size in 4usize..=25, row in 0usize..25, col in 0usize..25) {
            let pos = Position::new(row % size, col % size);
            prop_assert_eq!(pos.wrapping_up(size).wrapping_down(size), pos);
            prop_assert_eq!(pos.wrapping_left(size).wrapping_right(size), pos);
        }

        #[test]
        fn prop_vertical_steps_keep_column(size in 4usize..=25, row in 0usize..25, col in 0usize..25) {
            let pos = Position::new(row % size, col % size);
            prop_assert_eq!(pos.wrapping_up(size).col, pos.col);
            prop_assert_eq!(pos.wrapping_down(size).col, pos.col);
            prop_assert_eq!(pos.wrapping_left(size).row, pos.row);
            prop_assert_eq!(pos.wrapping_right(size).row, pos.row);
        }
    }
}
