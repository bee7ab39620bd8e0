//! Seed-board generation for cellgrid.
//!
//! [`GridGenerator`] scatters values over an empty [`Matrix`] at distinct
//! random cells. The board is a starting point for play, not a puzzle with a
//! guaranteed unique solution; checking that is the job of an external
//! [`GridSolver`](cellgrid_core::GridSolver).
//!
//! Generation is reproducible: the same [`GridSeed`] with the same generator
//! settings always yields the same board.
//!
//! # Examples
//!
//! ```
//! use cellgrid_generator::{GridGenerator, GridSeed};
//!
//! let generator = GridGenerator::new(9).unwrap();
//! let seed = GridSeed::from_phrase("example");
//! let grid = generator.generate_with_seed(seed);
//!
//! assert_eq!(grid.seed, seed);
//! let mut values = grid.matrix.to_flat();
//! values.retain(|&v| v != 0);
//! values.sort_unstable();
//! assert_eq!(values, (1..=9).collect::<Vec<_>>());
//! assert_eq!(generator.generate_with_seed(seed), grid);
//! ```

use cellgrid_core::{Matrix, MatrixError, Position};
use rand::{SeedableRng as _, seq::SliceRandom as _};
use rand_pcg::Pcg64;

pub use self::seed::{GridSeed, ParseGridSeedError};

mod seed;

/// A generated board together with the seed that reproduces it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedGrid {
    /// The board; unplaced cells are empty.
    pub matrix: Matrix,
    /// Seed passed to [`GridGenerator::generate_with_seed`].
    pub seed: GridSeed,
}

/// Places values at distinct random cells of an empty board.
///
/// By default one of each value `1..=size` is placed. With
/// [`GridGenerator::with_clues`] any number of values is placed, cycling
/// through `1..=size`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GridGenerator {
    size: usize,
    clues: usize,
}

impl GridGenerator {
    /// Creates a generator for `size × size` boards.
    ///
    /// # Errors
    ///
    /// Returns [`MatrixError::InvalidInput`] if `size` is not a valid grid size.
    pub fn new(size: usize) -> Result<Self, MatrixError> {
        // Validates the size once so that generation itself cannot fail.
        Matrix::empty(size)?;
        Ok(Self { size, clues: size })
    }

    /// Sets how many cells receive a value, capped at the number of cells.
    #[must_use]
    pub fn with_clues(self, clues: usize) -> Self {
        Self {
            clues: clues.min(self.size * self.size),
            ..self
        }
    }

    /// Board side length.
    #[must_use]
    pub fn size(&self) -> usize {
        self.size
    }

    /// Number of cells that receive a value.
    #[must_use]
    pub fn clues(&self) -> usize {
        self.clues
    }

    /// Generates a board from a fresh random seed.
    #[must_use]
    pub fn generate(&self) -> GeneratedGrid {
        self.generate_with_seed(GridSeed::random())
    }

    /// Generates the board determined by `seed`.
    #[must_use]
    pub fn generate_with_seed(&self, seed: GridSeed) -> GeneratedGrid {
        let mut rng = Pcg64::from_seed(*seed.as_bytes());
        let mut positions = (0..self.size * self.size)
            .map(|index| Position::from_index(index, self.size))
            .collect::<Vec<_>>();
        positions.shuffle(&mut rng);

        let mut values = vec![0; self.size * self.size];
        for (pos, value) in positions.into_iter().take(self.clues).zip(self.values()) {
            values[pos.index(self.size)] = value;
        }
        log::debug!(
            "generated {0}x{0} board with {1} clues from seed {seed}",
            self.size,
            self.clues
        );

        let matrix = match Matrix::from_flat(&values) {
            Ok(matrix) => matrix,
            Err(err) => unreachable!("size was validated on construction: {err}"),
        };
        GeneratedGrid { matrix, seed }
    }

    fn values(&self) -> impl Iterator<Item = u32> + use<> {
        let max = u32::try_from(self.size).unwrap_or(u32::MAX);
        (1..=max).cycle()
    }
}
