//! The set of selected cells and the navigation anchor.

use std::collections::BTreeSet;

use cellgrid_core::{Matrix, MatrixError, Position};

/// Selected coordinates plus the most recently selected one.
///
/// The set stores coordinates, never cell references, so it cannot dangle
/// when the matrix is replaced; the controller calls [`SelectionSet::reset`]
/// on every load. Every mutation takes the matrix so that the cells'
/// `selected` flags always mirror the set's membership.
///
/// The anchor ([`SelectionSet::last_selected`]) is the most recently selected
/// member. Deselecting it falls back to the most recent remaining member.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SelectionSet {
    members: BTreeSet<Position>,
    // Members in selection order; the last entry is the anchor.
    history: Vec<Position>,
}

impl SelectionSet {
    /// Creates an empty selection.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Selects `pos` and makes it the anchor.
    ///
    /// Returns `true` if the cell was not selected before. Selecting an
    /// already-selected cell changes nothing but the anchor.
    ///
    /// # Errors
    ///
    /// Returns [`MatrixError::OutOfBounds`] if `pos` is outside `matrix`; the
    /// selection is left unchanged.
    pub fn select(&mut self, matrix: &mut Matrix, pos: Position) -> Result<bool, MatrixError> {
        let changed = matrix.set_selected(pos, true)?;
        self.members.insert(pos);
        self.history.retain(|&p| p != pos);
        self.history.push(pos);
        Ok(changed)
    }

    /// Deselects `pos`.
    ///
    /// Returns `true` if the cell was selected before.
    ///
    /// # Errors
    ///
    /// Returns [`MatrixError::OutOfBounds`] if `pos` is outside `matrix`.
    pub fn deselect(&mut self, matrix: &mut Matrix, pos: Position) -> Result<bool, MatrixError> {
        let changed = matrix.set_selected(pos, false)?;
        if self.members.remove(&pos) {
            self.history.retain(|&p| p != pos);
        }
        Ok(changed)
    }

    /// Deselects every member not listed in `except`.
    ///
    /// Returns the cleared positions in row-major order.
    pub fn clear(&mut self, matrix: &mut Matrix, except: &[Position]) -> Vec<Position> {
        let cleared = self
            .members
            .iter()
            .copied()
            .filter(|pos| !except.contains(pos))
            .collect::<Vec<_>>();
        for &pos in &cleared {
            if let Err(err) = matrix.set_selected(pos, false) {
                log::warn!("stale selection entry {pos}: {err}");
            }
            self.members.remove(&pos);
        }
        self.history.retain(|pos| self.members.contains(pos));
        cleared
    }

    /// Forgets every member without touching any matrix.
    ///
    /// Used when the matrix the selection referred to has been replaced.
    pub fn reset(&mut self) {
        self.members.clear();
        self.history.clear();
    }

    /// Returns `true` if `pos` is selected.
    #[must_use]
    pub fn contains(&self, pos: Position) -> bool {
        self.members.contains(&pos)
    }

    /// Iterates over the selected positions in row-major order.
    pub fn members(&self) -> impl Iterator<Item = Position> + '_ {
        self.members.iter().copied()
    }

    /// Returns the number of selected cells.
    #[must_use]
    pub fn len(&self) -> usize {
        self.members.len()
    }

    /// Returns `true` if nothing is selected.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    /// Returns the navigation anchor, or `None` if nothing is selected.
    #[must_use]
    pub fn last_selected(&self) -> Option<Position> {
        self.history.last().copied()
    }
}
