//! Square matrix of numeric cells.
//!
//! A [`Matrix`] is a `size × size` grid whose `size` is a perfect square of at
//! least [`MIN_SIZE`], so it partitions into `block_size × block_size` blocks.
//! Cells live in a flat row-major arena addressed by `row * size + col`; every
//! lookup goes through a bounds check and hands out either a [`Cell`] copy or a
//! reference tied to the matrix borrow.

use std::{
    fmt::{self, Display},
    slice,
    str::FromStr,
};

use crate::Position;

/// Smallest accepted grid size.
///
/// Sizes 1 to 3 have no meaningful block partition.
pub const MIN_SIZE: usize = 4;

/// One addressable cell of a [`Matrix`].
///
/// A cell's position never changes after the matrix is built; only its value
/// and selection flag are mutated, and only through the owning matrix.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Cell {
    pos: Position,
    value: u32,
    selected: bool,
}

impl Cell {
    const fn new(pos: Position, value: u32) -> Self {
        Self {
            pos,
            value,
            selected: false,
        }
    }

    /// Returns the coordinates of this cell.
    #[must_use]
    pub const fn position(&self) -> Position {
        self.pos
    }

    /// Returns the row of this cell.
    #[must_use]
    pub const fn row(&self) -> usize {
        self.pos.row
    }

    /// Returns the column of this cell.
    #[must_use]
    pub const fn col(&self) -> usize {
        self.pos.col
    }

    /// Returns the numeric value; `0` means empty.
    #[must_use]
    pub const fn value(&self) -> u32 {
        self.value
    }

    /// Returns `true` if the cell holds no value.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.value == 0
    }

    /// Returns `true` if the cell is currently selected.
    #[must_use]
    pub const fn is_selected(&self) -> bool {
        self.selected
    }
}

/// Why a load input was rejected.
#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display)]
pub enum InvalidInputReason {
    /// The input contained no values at all.
    #[display("input is empty")]
    Empty,
    /// The grid size is below [`MIN_SIZE`].
    #[display("grid size {size} is below the minimum of 4")]
    TooSmall {
        /// Requested size.
        size: usize,
    },
    /// The grid size has no integer square root, so blocks cannot be formed.
    #[display("grid size {size} has no integer square root")]
    NonSquareSize {
        /// Requested size.
        size: usize,
    },
    /// A flat input whose length is not `size²` for any `size`.
    #[display("flat input of length {len} is not a square number of cells")]
    NonSquareLength {
        /// Number of values supplied.
        len: usize,
    },
    /// A text token that is neither a number nor an empty marker.
    #[display("cannot parse cell value {token:?}")]
    InvalidToken {
        /// The offending token.
        token: String,
    },
}

/// Errors produced by [`Matrix`] construction and access.
#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display, derive_more::Error)]
pub enum MatrixError {
    /// Malformed or too-small load input.
    #[display("invalid grid input: {reason}")]
    InvalidInput {
        /// What was wrong with the input.
        reason: InvalidInputReason,
    },
    /// A coordinate outside the current matrix.
    #[display("position ({row}, {col}) is outside the {size}x{size} grid")]
    OutOfBounds {
        /// Requested row.
        row: usize,
        /// Requested column.
        col: usize,
        /// Current grid size.
        size: usize,
    },
    /// A nested load where a row's length differs from the number of rows.
    #[display("row {row} has {actual} values, expected {expected}")]
    InconsistentRowLength {
        /// Index of the offending row.
        row: usize,
        /// Number of rows, which every row length must match.
        expected: usize,
        /// Actual length of the row.
        actual: usize,
    },
}

impl MatrixError {
    fn invalid(reason: InvalidInputReason) -> Self {
        Self::InvalidInput { reason }
    }

    /// Returns `true` for [`MatrixError::InvalidInput`].
    #[must_use]
    pub fn is_invalid_input(&self) -> bool {
        matches!(self, Self::InvalidInput { .. })
    }

    /// Returns `true` for [`MatrixError::OutOfBounds`].
    #[must_use]
    pub fn is_out_of_bounds(&self) -> bool {
        matches!(self, Self::OutOfBounds { .. })
    }
}

/// Load input for a [`Matrix`]: either row-major flat values or nested rows.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GridData {
    /// `size²` values in row-major order.
    Flat(Vec<u32>),
    /// `size` rows of `size` values each.
    Rows(Vec<Vec<u32>>),
}

impl From<Vec<u32>> for GridData {
    fn from(values: Vec<u32>) -> Self {
        Self::Flat(values)
    }
}

impl From<&[u32]> for GridData {
    fn from(values: &[u32]) -> Self {
        Self::Flat(values.to_vec())
    }
}

impl From<Vec<Vec<u32>>> for GridData {
    fn from(rows: Vec<Vec<u32>>) -> Self {
        Self::Rows(rows)
    }
}

impl<const N: usize> From<[[u32; N]; N]> for GridData {
    fn from(rows: [[u32; N]; N]) -> Self {
        Self::Rows(rows.iter().map(|row| row.to_vec()).collect())
    }
}

/// A square grid of numeric cells.
///
/// # Examples
///
/// ```
/// use cellgrid_core::{Matrix, Position};
///
/// let mut matrix = Matrix::empty(9).unwrap();
/// assert_eq!(matrix.block_size(), 3);
/// assert!(matrix.cells().all(|cell| cell.is_empty() && !cell.is_selected()));
///
/// matrix.set_value(Position::new(2, 2), 5).unwrap();
/// let flat = matrix.to_flat();
/// assert_eq!(flat[2 * 9 + 2], 5);
///
/// let reloaded = Matrix::load(flat).unwrap();
/// assert_eq!(reloaded, matrix);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Matrix {
    size: usize,
    block_size: usize,
    cells: Vec<Cell>,
}

impl Matrix {
    /// Builds a matrix from flat or nested input.
    ///
    /// All cells start unselected.
    ///
    /// # Errors
    ///
    /// See [`Matrix::from_flat`] and [`Matrix::from_rows`].
    pub fn load(data: impl Into<GridData>) -> Result<Self, MatrixError> {
        match data.into() {
            GridData::Flat(values) => Self::from_flat(&values),
            GridData::Rows(rows) => Self::from_rows(&rows),
        }
    }

    /// Builds a matrix from `size²` row-major values.
    ///
    /// # Errors
    ///
    /// Returns [`MatrixError::InvalidInput`] if `values` is empty, if its length
    /// is not a square number, or if the derived size is below [`MIN_SIZE`] or
    /// has no integer square root.
    pub fn from_flat(values: &[u32]) -> Result<Self, MatrixError> {
        if values.is_empty() {
            return Err(MatrixError::invalid(InvalidInputReason::Empty));
        }
        let len = values.len();
        let size = len.isqrt();
        if size * size != len {
            return Err(MatrixError::invalid(InvalidInputReason::NonSquareLength {
                len,
            }));
        }
        let block_size = validate_size(size)?;
        let cells = values
            .iter()
            .enumerate()
            .map(|(i, &value)| Cell::new(Position::from_index(i, size), value))
            .collect();
        Ok(Self {
            size,
            block_size,
            cells,
        })
    }

    /// Builds a matrix from `size` rows of `size` values.
    ///
    /// # Errors
    ///
    /// Returns [`MatrixError::InvalidInput`] if `rows` is empty or the row count
    /// is not an acceptable size, and [`MatrixError::InconsistentRowLength`] if
    /// any row's length differs from the row count.
    pub fn from_rows<R>(rows: &[R]) -> Result<Self, MatrixError>
    where
        R: AsRef<[u32]>,
    {
        if rows.is_empty() {
            return Err(MatrixError::invalid(InvalidInputReason::Empty));
        }
        let size = rows.len();
        for (row, values) in rows.iter().enumerate() {
            let actual = values.as_ref().len();
            if actual != size {
                return Err(MatrixError::InconsistentRowLength {
                    row,
                    expected: size,
                    actual,
                });
            }
        }
        let block_size = validate_size(size)?;
        let cells = rows
            .iter()
            .enumerate()
            .flat_map(|(row, values)| {
                values
                    .as_ref()
                    .iter()
                    .enumerate()
                    .map(move |(col, &value)| Cell::new(Position::new(row, col), value))
            })
            .collect();
        Ok(Self {
            size,
            block_size,
            cells,
        })
    }

    /// Builds a matrix of the given size with every cell empty and unselected.
    ///
    /// # Errors
    ///
    /// Returns [`MatrixError::InvalidInput`] if `size` is below [`MIN_SIZE`] or
    /// has no integer square root.
    pub fn empty(size: usize) -> Result<Self, MatrixError> {
        let block_size = validate_size(size)?;
        let cells = (0..size * size)
            .map(|i| Cell::new(Position::from_index(i, size), 0))
            .collect();
        Ok(Self {
            size,
            block_size,
            cells,
        })
    }

    /// Returns the number of rows (and columns).
    #[must_use]
    pub const fn size(&self) -> usize {
        self.size
    }

    /// Returns the side length of one block, `sqrt(size)`.
    #[must_use]
    pub const fn block_size(&self) -> usize {
        self.block_size
    }

    /// Returns `true` if `pos` addresses a cell of this matrix.
    #[must_use]
    pub const fn contains(&self, pos: Position) -> bool {
        pos.is_within(self.size)
    }

    /// Checks that `pos` addresses a cell of this matrix.
    ///
    /// # Errors
    ///
    /// Returns [`MatrixError::OutOfBounds`] if it does not.
    pub fn check_bounds(&self, pos: Position) -> Result<(), MatrixError> {
        if self.contains(pos) {
            Ok(())
        } else {
            Err(MatrixError::OutOfBounds {
                row: pos.row,
                col: pos.col,
                size: self.size,
            })
        }
    }

    /// Returns the cell at `pos`.
    ///
    /// # Errors
    ///
    /// Returns [`MatrixError::OutOfBounds`] if `pos` is outside the matrix.
    pub fn cell(&self, pos: Position) -> Result<&Cell, MatrixError> {
        self.check_bounds(pos)?;
        Ok(&self.cells[pos.index(self.size)])
    }

    /// Returns the cell at `(row, col)`.
    ///
    /// # Errors
    ///
    /// Returns [`MatrixError::OutOfBounds`] if the coordinates are outside the matrix.
    pub fn get(&self, row: usize, col: usize) -> Result<&Cell, MatrixError> {
        self.cell(Position::new(row, col))
    }

    /// Returns the value at `pos`.
    ///
    /// # Errors
    ///
    /// Returns [`MatrixError::OutOfBounds`] if `pos` is outside the matrix.
    pub fn value(&self, pos: Position) -> Result<u32, MatrixError> {
        self.cell(pos).map(Cell::value)
    }

    /// Iterates over all cells in row-major order.
    pub fn cells(&self) -> slice::Iter<'_, Cell> {
        self.cells.iter()
    }

    /// Iterates over the positions of selected cells in row-major order.
    pub fn selected_positions(&self) -> impl Iterator<Item = Position> + '_ {
        self.cells
            .iter()
            .filter(|cell| cell.selected)
            .map(Cell::position)
    }

    /// Stores `value` at `pos` and returns the previous value.
    ///
    /// Values are not range-checked here; the interaction layer decides what a
    /// sensible value is.
    ///
    /// # Errors
    ///
    /// Returns [`MatrixError::OutOfBounds`] if `pos` is outside the matrix.
    pub fn set_value(&mut self, pos: Position, value: u32) -> Result<u32, MatrixError> {
        self.check_bounds(pos)?;
        let cell = &mut self.cells[pos.index(self.size)];
        Ok(std::mem::replace(&mut cell.value, value))
    }

    /// Sets the selection flag at `pos` and returns whether it changed.
    ///
    /// # Errors
    ///
    /// Returns [`MatrixError::OutOfBounds`] if `pos` is outside the matrix.
    pub fn set_selected(&mut self, pos: Position, selected: bool) -> Result<bool, MatrixError> {
        self.check_bounds(pos)?;
        let cell = &mut self.cells[pos.index(self.size)];
        let changed = cell.selected != selected;
        cell.selected = selected;
        Ok(changed)
    }

    /// Returns all values in row-major order.
    ///
    /// This is the representation exchanged with a [`GridSolver`](crate::GridSolver).
    #[must_use]
    pub fn to_flat(&self) -> Vec<u32> {
        self.cells.iter().map(Cell::value).collect()
    }

    /// Returns all values as nested rows.
    #[must_use]
    pub fn to_rows(&self) -> Vec<Vec<u32>> {
        self.cells
            .chunks(self.size)
            .map(|row| row.iter().map(Cell::value).collect())
            .collect()
    }

    /// Returns the index of the block containing `pos`.
    #[must_use]
    pub const fn block_of(&self, pos: Position) -> usize {
        pos.block_index(self.block_size)
    }

    /// Iterates over the positions of one block, row by row inside the block.
    ///
    /// # Panics
    ///
    /// Panics if `block` is not less than [`Matrix::size`].
    pub fn block_positions(&self, block: usize) -> impl Iterator<Item = Position> + use<> {
        assert!(block < self.size, "block {block} out of range");
        let block_size = self.block_size;
        let top = block / block_size * block_size;
        let left = block % block_size * block_size;
        (0..block_size * block_size)
            .map(move |i| Position::new(top + i / block_size, left + i % block_size))
    }

    /// Iterates over every block, each as a list of its positions.
    pub fn blocks(&self) -> impl Iterator<Item = Vec<Position>> + '_ {
        (0..self.size).map(|block| self.block_positions(block).collect())
    }
}

fn validate_size(size: usize) -> Result<usize, MatrixError> {
    if size < MIN_SIZE {
        return Err(MatrixError::invalid(InvalidInputReason::TooSmall { size }));
    }
    let block_size = size.isqrt();
    if block_size * block_size != size {
        return Err(MatrixError::invalid(InvalidInputReason::NonSquareSize {
            size,
        }));
    }
    Ok(block_size)
}

/// Parses whitespace-separated values, one row per line.
///
/// `_`, `.` and `0` denote empty cells. Blank lines are ignored. A single line
/// holding all values is read as flat row-major input.
impl FromStr for Matrix {
    type Err = MatrixError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut rows = vec![];
        for line in s.lines() {
            let row = line
                .split_whitespace()
                .map(parse_token)
                .collect::<Result<Vec<_>, _>>()?;
            if !row.is_empty() {
                rows.push(row);
            }
        }
        match rows.as_slice() {
            [] => Err(MatrixError::invalid(InvalidInputReason::Empty)),
            [flat] => Self::from_flat(flat),
            _ => Self::from_rows(&rows),
        }
    }
}

fn parse_token(token: &str) -> Result<u32, MatrixError> {
    match token {
        "_" | "." => Ok(0),
        _ => token.parse().map_err(|_| {
            MatrixError::invalid(InvalidInputReason::InvalidToken {
                token: token.to_owned(),
            })
        }),
    }
}

/// Formats one row per line with empty cells as `_`, right-aligned to the
/// widest possible value.
impl Display for Matrix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let width = self.size.to_string().len();
        for (i, row) in self.cells.chunks(self.size).enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            for (j, cell) in row.iter().enumerate() {
                if j > 0 {
                    write!(f, " ")?;
                }
                if cell.is_empty() {
                    write!(f, "{:>width$}", "_")?;
                } else {
                    write!(f, "{:>width$}", cell.value)?;
                }
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use super::*;

    fn grid_values() -> impl Strategy<Value = Vec<u32>> {
        (2usize..=4).prop_flat_map(|block_size| {
            let size = block_size * block_size;
            let max = u32::try_from(size).unwrap();
            prop::collection::vec(0..=max, size * size)
        })
    }

    #[test]
    fn test_empty_matrix_is_blank() {
        for size in [4, 9, 16, 25] {
            let matrix = Matrix::empty(size).unwrap();
            assert_eq!(matrix.size(), size);
            assert_eq!(matrix.block_size(), size.isqrt());
            assert_eq!(matrix.cells().count(), size * size);
            assert!(
                matrix
                    .cells()
                    .all(|cell| cell.value() == 0 && !cell.is_selected())
            );
        }
    }

    #[test]
    fn test_rejects_empty_and_small_input() {
        let empty: Vec<u32> = vec![];
        assert!(Matrix::load(empty).unwrap_err().is_invalid_input());
        let empty_rows: Vec<Vec<u32>> = vec![];
        assert!(Matrix::load(empty_rows).unwrap_err().is_invalid_input());
        assert_eq!(
            Matrix::empty(3).unwrap_err(),
            MatrixError::InvalidInput {
                reason: InvalidInputReason::TooSmall { size: 3 }
            }
        );
        assert!(Matrix::empty(0).unwrap_err().is_invalid_input());
        assert!(Matrix::load(vec![0; 9]).unwrap_err().is_invalid_input());
    }

    #[test]
    fn test_rejects_size_without_square_root() {
        assert_eq!(
            Matrix::empty(8).unwrap_err(),
            MatrixError::InvalidInput {
                reason: InvalidInputReason::NonSquareSize { size: 8 }
            }
        );
        assert!(Matrix::load(vec![0; 64]).unwrap_err().is_invalid_input());
    }

    #[test]
    fn test_rejects_flat_length_that_is_not_square() {
        assert_eq!(
            Matrix::load(vec![0; 17]).unwrap_err(),
            MatrixError::InvalidInput {
                reason: InvalidInputReason::NonSquareLength { len: 17 }
            }
        );
    }

    #[test]
    fn test_rejects_inconsistent_row_length() {
        let rows = vec![vec![0; 4], vec![0; 4], vec![0; 3], vec![0; 4]];
        assert_eq!(
            Matrix::load(rows).unwrap_err(),
            MatrixError::InconsistentRowLength {
                row: 2,
                expected: 4,
                actual: 3
            }
        );
    }

    #[test]
    fn test_flat_and_nested_load_agree() {
        let flat: Vec<u32> = (0..16).map(|i| i % 5).collect();
        let nested: Vec<Vec<u32>> = flat.chunks(4).map(<[u32]>::to_vec).collect();
        let a = Matrix::load(flat.clone()).unwrap();
        let b = Matrix::load(nested.clone()).unwrap();
        assert_eq!(a, b);
        assert_eq!(a.to_flat(), flat);
        assert_eq!(a.to_rows(), nested);
        assert_eq!(a.get(1, 2).unwrap().value(), 6 % 5);
    }

    #[test]
    fn test_get_out_of_bounds() {
        let matrix = Matrix::empty(4).unwrap();
        assert_eq!(
            matrix.get(4, 0).unwrap_err(),
            MatrixError::OutOfBounds {
                row: 4,
                col: 0,
                size: 4
            }
        );
        assert!(matrix.get(0, 7).unwrap_err().is_out_of_bounds());
        assert!(matrix.get(3, 3).is_ok());
    }

    #[test]
    fn test_set_value_and_selection() {
        let mut matrix = Matrix::empty(4).unwrap();
        let pos = Position::new(1, 3);
        assert_eq!(matrix.set_value(pos, 3).unwrap(), 0);
        assert_eq!(matrix.set_value(pos, 40).unwrap(), 3);
        assert_eq!(matrix.value(pos).unwrap(), 40);

        assert!(matrix.set_selected(pos, true).unwrap());
        assert!(!matrix.set_selected(pos, true).unwrap());
        assert_eq!(matrix.selected_positions().collect::<Vec<_>>(), vec![pos]);
        assert!(matrix.set_selected(pos, false).unwrap());
        assert_eq!(matrix.selected_positions().count(), 0);

        assert!(
            matrix
                .set_value(Position::new(4, 4), 1)
                .unwrap_err()
                .is_out_of_bounds()
        );
    }

    #[test]
    fn test_reload_resets_selection() {
        let mut matrix =
            Matrix::load([[1u32, 0, 0, 4], [0, 0, 1, 0], [0, 1, 0, 0], [4, 0, 0, 1]]).unwrap();
        matrix.set_selected(Position::new(0, 0), true).unwrap();
        let reloaded = Matrix::load(matrix.to_flat()).unwrap();
        assert_eq!(reloaded.to_flat(), matrix.to_flat());
        assert_eq!(reloaded.selected_positions().count(), 0);
    }

    #[test]
    fn test_block_positions_group_cells() {
        let matrix =
            Matrix::load([[1u32, 2, 3, 4], [1, 2, 3, 4], [1, 2, 3, 4], [1, 2, 3, 4]]).unwrap();
        let blocks = matrix
            .blocks()
            .map(|block| {
                block
                    .into_iter()
                    .map(|pos| matrix.value(pos).unwrap())
                    .collect::<Vec<_>>()
            })
            .collect::<Vec<_>>();
        assert_eq!(
            blocks,
            vec![
                vec![1, 2, 1, 2],
                vec![3, 4, 3, 4],
                vec![1, 2, 1, 2],
                vec![3, 4, 3, 4],
            ]
        );
        for block in 0..4 {
            for pos in matrix.block_positions(block) {
                assert_eq!(matrix.block_of(pos), block);
            }
        }
    }

    #[test]
    fn test_parse_and_display() {
        let matrix: Matrix = "
            1 _ _ 4
            _ . 1 _
            _ 1 0 _
            4 _ _ 1
        "
        .parse()
        .unwrap();
        assert_eq!(matrix.to_rows()[0], vec![1, 0, 0, 4]);
        assert_eq!(matrix.to_string(), "1 _ _ 4\n_ _ 1 _\n_ 1 _ _\n4 _ _ 1");
        assert_eq!(matrix.to_string().parse::<Matrix>().unwrap(), matrix);

        let wide = Matrix::empty(16).unwrap();
        assert!(wide.to_string().starts_with(" _  _"));
    }

    #[test]
    fn test_parse_single_line_as_flat() {
        let matrix: Matrix = "1 2 3 4 0 0 0 0 0 0 0 0 0 0 0 16".parse().unwrap();
        assert_eq!(matrix.size(), 4);
        assert_eq!(matrix.get(3, 3).unwrap().value(), 16);
    }

    #[test]
    fn test_parse_rejects_bad_tokens() {
        let err = "1 x _ _\n_ _ _ _\n_ _ _ _\n_ _ _ _".parse::<Matrix>().unwrap_err();
        assert_eq!(
            err,
            MatrixError::InvalidInput {
                reason: InvalidInputReason::InvalidToken {
                    token: "x".to_owned()
                }
            }
        );
        assert!("   \n  ".parse::<Matrix>().unwrap_err().is_invalid_input());
    }

    proptest! {
        #[test]
        fn prop_flat_roundtrip(values in grid_values()) {
            let matrix = Matrix::load(values.clone()).unwrap();
            prop_assert_eq!(matrix.to_flat(), values);
            let reloaded = Matrix::load(matrix.to_rows()).unwrap();
            prop_assert_eq!(reloaded, matrix);
        }

        #[test]
        fn prop_text_roundtrip(values in grid_values()) {
            let matrix = Matrix::load(values).unwrap();
            let parsed: Matrix = matrix.to_string().parse().unwrap();
            prop_assert_eq!(parsed, matrix);
        }
    }
}
