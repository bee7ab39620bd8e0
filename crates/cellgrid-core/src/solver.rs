//! Boundary to an external puzzle solver.
//!
//! The grid never inspects puzzle rules itself. Solving and validation are
//! delegated to an implementation of [`GridSolver`], which sees only the
//! row-major flat values produced by [`Matrix::to_flat`](crate::Matrix::to_flat).

/// Errors reported across the solver boundary.
#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display, derive_more::Error)]
pub enum SolverError {
    /// The solver could not produce a solution.
    #[display("solver failed: {message}")]
    Failed {
        /// Solver-provided description.
        message: String,
    },
    /// The solver returned a grid with a different number of cells.
    #[display("solver returned {actual} values, expected {expected}")]
    LengthMismatch {
        /// Number of cells in the grid that was submitted.
        expected: usize,
        /// Number of values returned.
        actual: usize,
    },
}

/// A puzzle engine operating on flat row-major grids.
///
/// Both methods receive `size * size` values where `0` marks an empty cell.
///
/// # Examples
///
/// ```
/// use cellgrid_core::{GridSolver, Matrix, SolverError};
///
/// /// Fills every empty cell with 1.
/// struct Ones;
///
/// impl GridSolver for Ones {
///     fn solve(&self, grid: &[u32]) -> Result<Vec<u32>, SolverError> {
///         Ok(grid.iter().map(|&v| if v == 0 { 1 } else { v }).collect())
///     }
///
///     fn is_valid(&self, grid: &[u32]) -> bool {
///         grid.iter().all(|&v| v != 0)
///     }
/// }
///
/// let matrix = Matrix::empty(4).unwrap();
/// let solved = Ones.solve(&matrix.to_flat()).unwrap();
/// assert!(Ones.is_valid(&solved));
/// ```
pub trait GridSolver {
    /// Returns a fully determined grid of the same length as `grid`.
    ///
    /// # Errors
    ///
    /// Returns [`SolverError`] if no solution can be produced.
    fn solve(&self, grid: &[u32]) -> Result<Vec<u32>, SolverError>;

    /// Returns `true` if `grid` satisfies the puzzle rules.
    fn is_valid(&self, grid: &[u32]) -> bool;
}

impl<T> GridSolver for &T
where
    T: GridSolver + ?Sized,
{
    fn solve(&self, grid: &[u32]) -> Result<Vec<u32>, SolverError> {
        (**self).solve(grid)
    }

    fn is_valid(&self, grid: &[u32]) -> bool {
        (**self).is_valid(grid)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Unsolvable;

    impl GridSolver for Unsolvable {
        fn solve(&self, _grid: &[u32]) -> Result<Vec<u32>, SolverError> {
            Err(SolverError::Failed {
                message: "no solution".to_owned(),
            })
        }

        fn is_valid(&self, _grid: &[u32]) -> bool {
            false
        }
    }

    #[test]
    fn test_solver_through_reference_and_trait_object() {
        let solver: &dyn GridSolver = &Unsolvable;
        let err = (&solver).solve(&[0; 16]).unwrap_err();
        assert_eq!(err.to_string(), "solver failed: no solution");
        assert!(!solver.is_valid(&[0; 16]));
    }

    #[test]
    fn test_length_mismatch_message() {
        let err = SolverError::LengthMismatch {
            expected: 81,
            actual: 80,
        };
        assert_eq!(err.to_string(), "solver returned 80 values, expected 81");
    }
}
