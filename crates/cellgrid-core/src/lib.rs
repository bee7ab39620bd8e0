//! Core data structures for interactive number grids.
//!
//! This crate provides the square [`Matrix`] of numeric cells that the
//! interaction layer edits, together with the coordinate type used to address
//! it and the boundary through which an external solver is consulted.
//!
//! # Overview
//!
//! 1. **Coordinates** - [`position`]: `(row, col)` pairs, row-major indexing,
//!    block membership and wrap-around stepping.
//! 2. **Storage** - [`matrix`]: a `size × size` arena of [`Cell`]s whose size
//!    must be a perfect square of at least [`MIN_SIZE`], loaded from flat or
//!    nested input or from text.
//! 3. **Solver boundary** - [`solver`]: the [`GridSolver`] trait consuming the
//!    row-major flat representation produced by [`Matrix::to_flat`].
//!
//! # Examples
//!
//! ```
//! use cellgrid_core::{Matrix, Position};
//!
//! let matrix: Matrix = "
//!     1 _ _ 4
//!     _ _ 1 _
//!     _ 1 _ _
//!     4 _ _ 1
//! "
//! .parse()
//! .unwrap();
//!
//! assert_eq!(matrix.size(), 4);
//! assert_eq!(matrix.block_size(), 2);
//! assert_eq!(matrix.get(0, 3).unwrap().value(), 4);
//! assert_eq!(matrix.block_of(Position::new(3, 3)), 3);
//! ```

pub mod matrix;
pub mod position;
pub mod solver;

pub use self::{
    matrix::{Cell, GridData, InvalidInputReason, MIN_SIZE, Matrix, MatrixError},
    position::Position,
    solver::{GridSolver, SolverError},
};
