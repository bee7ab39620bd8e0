//! The interaction state machine.

use cellgrid_core::{GridData, GridSolver, Matrix, MatrixError, Position, SolverError};

use crate::{
    command::{Command, CommandQueue},
    input::{RawEvent, interpret},
    notifier::{ChangeEvent, ChangeNotifier, ListenerId},
    selection::SelectionSet,
};

/// Whether the next digit replaces or extends the selected values.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, derive_more::IsVariant)]
pub enum Composition {
    /// The next digit replaces every selected value.
    #[default]
    Idle,
    /// The next digit is appended to every selected value.
    Composing,
}

/// Errors returned by [`InteractionController`] operations.
#[derive(Debug, derive_more::Display, derive_more::Error, derive_more::From)]
pub enum ControllerError {
    /// The matrix rejected the operation.
    #[display("{_0}")]
    Matrix(#[from] MatrixError),
    /// The external solver failed.
    #[display("{_0}")]
    Solver(#[from] SolverError),
    /// [`Command::EnterDigit`] carried something other than a decimal digit.
    #[display("{digit} is not a decimal digit")]
    InvalidDigit {
        /// The rejected value.
        digit: u8,
    },
}

/// Single writer of a [`Matrix`] and its [`SelectionSet`].
///
/// Every command is applied to completion or not at all: coordinates are
/// validated before any cell is touched. The resulting [`ChangeEvent`]s are
/// returned and also published, as one batch, to every subscribed listener.
///
/// Listeners must not call back into the controller. Follow-up work goes into
/// a [`CommandQueue`] that the owner drains with
/// [`InteractionController::apply_all`].
#[derive(Debug)]
pub struct InteractionController {
    matrix: Matrix,
    selection: SelectionSet,
    composition: Composition,
    notifier: ChangeNotifier,
}

impl InteractionController {
    /// Takes ownership of `matrix`.
    ///
    /// Any `selected` flags already set on the matrix are cleared so that the
    /// controller starts with an empty selection.
    #[must_use]
    pub fn new(mut matrix: Matrix) -> Self {
        clear_selected_flags(&mut matrix);
        Self {
            matrix,
            selection: SelectionSet::new(),
            composition: Composition::Idle,
            notifier: ChangeNotifier::new(),
        }
    }

    /// Creates a controller over an empty `size × size` matrix.
    ///
    /// # Errors
    ///
    /// Returns [`MatrixError::InvalidInput`] if `size` is not a valid grid size.
    pub fn with_empty(size: usize) -> Result<Self, MatrixError> {
        Matrix::empty(size).map(Self::new)
    }

    /// Replaces the matrix with one built from `data`.
    ///
    /// Selection and composition are reset. No change events are published;
    /// renderers should re-read [`InteractionController::matrix`].
    ///
    /// # Errors
    ///
    /// Returns the [`Matrix::load`] error; the current state is kept.
    pub fn load(&mut self, data: impl Into<GridData>) -> Result<(), MatrixError> {
        let matrix = Matrix::load(data)?;
        self.replace_matrix(matrix);
        Ok(())
    }

    /// Replaces the matrix with an empty one.
    ///
    /// # Errors
    ///
    /// Returns [`MatrixError::InvalidInput`] if `size` is not a valid grid
    /// size; the current state is kept.
    pub fn load_empty(&mut self, size: usize) -> Result<(), MatrixError> {
        let matrix = Matrix::empty(size)?;
        self.replace_matrix(matrix);
        Ok(())
    }

    fn replace_matrix(&mut self, mut matrix: Matrix) {
        clear_selected_flags(&mut matrix);
        log::debug!("matrix replaced: {0}x{0}", matrix.size());
        self.matrix = matrix;
        self.selection.reset();
        self.composition = Composition::Idle;
    }

    /// Read-only view of the grid.
    #[must_use]
    pub fn matrix(&self) -> &Matrix {
        &self.matrix
    }

    /// Read-only view of the selection.
    #[must_use]
    pub fn selection(&self) -> &SelectionSet {
        &self.selection
    }

    /// Current composition state.
    #[must_use]
    pub fn composition(&self) -> Composition {
        self.composition
    }

    /// Registers a change listener.
    ///
    /// Listeners only see the deltas produced by commands and solutions.
    /// [`InteractionController::load`] and
    /// [`InteractionController::load_empty`] publish nothing, so a listener
    /// that patches a view must re-read [`InteractionController::matrix`] after
    /// a load; the selection is empty at that point.
    pub fn subscribe<F>(&mut self, listener: F) -> ListenerId
    where
        F: FnMut(&[ChangeEvent]) + 'static,
    {
        self.notifier.subscribe(listener)
    }

    /// Removes a change listener. Returns `false` if it was not registered.
    pub fn unsubscribe(&mut self, id: ListenerId) -> bool {
        self.notifier.unsubscribe(id)
    }

    /// Interprets a raw event and applies the resulting command, if any.
    ///
    /// Events without meaning for the grid yield an empty change list.
    ///
    /// # Errors
    ///
    /// See [`InteractionController::apply`].
    pub fn handle_event(&mut self, event: &RawEvent) -> Result<Vec<ChangeEvent>, ControllerError> {
        match interpret(event, self.matrix.size()) {
            Some(command) => self.apply(command),
            None => Ok(vec![]),
        }
    }

    /// Applies every queued command in request order.
    ///
    /// Commands that fail are logged and dropped; the others still apply.
    /// Returns the concatenated changes of the successful commands.
    pub fn apply_all(&mut self, queue: &mut CommandQueue) -> Vec<ChangeEvent> {
        let mut changes = vec![];
        for command in queue.take_all() {
            match self.apply(command) {
                Ok(batch) => changes.extend(batch),
                Err(err) => log::warn!("dropped {command:?}: {err}"),
            }
        }
        changes
    }

    /// Applies one command.
    ///
    /// # Errors
    ///
    /// - [`ControllerError::Matrix`] with [`MatrixError::OutOfBounds`] if the
    ///   command targets a cell outside the current matrix.
    /// - [`ControllerError::InvalidDigit`] if an [`Command::EnterDigit`]
    ///   carries a value above 9.
    ///
    /// Nothing is changed and nothing is published on error.
    pub fn apply(&mut self, command: Command) -> Result<Vec<ChangeEvent>, ControllerError> {
        self.validate(command)?;
        log::trace!("apply {command:?}");

        let mut changes = vec![];
        match command {
            Command::FocusCell(pos) => {
                self.composition = Composition::Idle;
                self.clear_selection(&[pos], &mut changes);
                self.select(pos, &mut changes)?;
            }
            Command::ToggleCell(pos) => {
                self.composition = Composition::Idle;
                if self.selection.contains(pos) {
                    self.deselect(pos, &mut changes)?;
                } else {
                    self.select(pos, &mut changes)?;
                }
            }
            Command::ClearSelection => {
                self.composition = Composition::Idle;
                self.clear_selection(&[], &mut changes);
            }
            Command::Move(direction) => {
                self.composition = Composition::Idle;
                let anchor = self.selection.last_selected().unwrap_or(Position::ORIGIN);
                let next = direction.apply_to(anchor, self.matrix.size());
                self.clear_selection(&[next], &mut changes);
                self.select(next, &mut changes)?;
            }
            Command::EnterDigit(digit) => {
                let digit = u32::from(digit);
                let limit = u64::try_from(self.matrix.size()).unwrap_or(u64::MAX);
                let composing = self.composition.is_composing();
                self.composition = Composition::Composing;
                self.update_selected(&mut changes, |prev| {
                    if composing {
                        compose(prev, digit, limit)
                    } else {
                        digit
                    }
                })?;
            }
            Command::Truncate => self.update_selected(&mut changes, |prev| prev / 10)?,
            Command::ClearValue => self.update_selected(&mut changes, |_| 0)?,
        }

        self.notifier.publish(&changes);
        Ok(changes)
    }

    /// Replaces every value with the solver's solution.
    ///
    /// Emits one [`ChangeEvent`] per cell whose value differs; the selection
    /// and composition state are kept.
    ///
    /// # Errors
    ///
    /// Returns [`ControllerError::Solver`] if the solver fails or returns a
    /// grid of the wrong length; the matrix is left unchanged.
    pub fn apply_solution<S>(&mut self, solver: &S) -> Result<Vec<ChangeEvent>, ControllerError>
    where
        S: GridSolver + ?Sized,
    {
        let current = self.matrix.to_flat();
        let solution = solver.solve(&current)?;
        if solution.len() != current.len() {
            return Err(SolverError::LengthMismatch {
                expected: current.len(),
                actual: solution.len(),
            }
            .into());
        }

        let size = self.matrix.size();
        let mut changes = vec![];
        for (index, (&old, &new)) in current.iter().zip(&solution).enumerate() {
            if old == new {
                continue;
            }
            let pos = Position::from_index(index, size);
            self.matrix.set_value(pos, new)?;
            log::debug!("cell{pos} value {old} -> {new}");
            changes.push(ChangeEvent::value_changed(pos, new));
        }

        self.notifier.publish(&changes);
        Ok(changes)
    }

    /// Asks `solver` whether the current values satisfy the puzzle rules.
    #[must_use]
    pub fn is_valid<S>(&self, solver: &S) -> bool
    where
        S: GridSolver + ?Sized,
    {
        solver.is_valid(&self.matrix.to_flat())
    }

    fn validate(&self, command: Command) -> Result<(), ControllerError> {
        if let Command::EnterDigit(digit) = command
            && digit > 9
        {
            return Err(ControllerError::InvalidDigit { digit });
        }
        let result = command
            .target()
            .into_iter()
            .chain(self.selection.members())
            .try_for_each(|pos| self.matrix.check_bounds(pos));
        if let Err(err) = &result {
            log::warn!("rejected {command:?}: {err}");
        }
        Ok(result?)
    }

    fn select(
        &mut self,
        pos: Position,
        changes: &mut Vec<ChangeEvent>,
    ) -> Result<(), MatrixError> {
        if self.selection.select(&mut self.matrix, pos)? {
            log::debug!("cell{pos} -> true");
            changes.push(ChangeEvent::selection_changed(pos, true));
        }
        Ok(())
    }

    fn deselect(
        &mut self,
        pos: Position,
        changes: &mut Vec<ChangeEvent>,
    ) -> Result<(), MatrixError> {
        if self.selection.deselect(&mut self.matrix, pos)? {
            log::debug!("cell{pos} -> false");
            changes.push(ChangeEvent::selection_changed(pos, false));
        }
        Ok(())
    }

    fn clear_selection(&mut self, except: &[Position], changes: &mut Vec<ChangeEvent>) {
        for pos in self.selection.clear(&mut self.matrix, except) {
            log::debug!("cell{pos} -> false");
            changes.push(ChangeEvent::selection_changed(pos, false));
        }
    }

    fn update_selected<F>(
        &mut self,
        changes: &mut Vec<ChangeEvent>,
        mut update: F,
    ) -> Result<(), MatrixError>
    where
        F: FnMut(u32) -> u32,
    {
        let targets = self.selection.members().collect::<Vec<_>>();
        for pos in targets {
            let prev = self.matrix.value(pos)?;
            let next = update(prev);
            if next != prev {
                self.matrix.set_value(pos, next)?;
                log::debug!("cell{pos} value {prev} -> {next}");
                changes.push(ChangeEvent::value_changed(pos, next));
            }
        }
        Ok(())
    }
}

/// Appends `digit` to `prev`, restarting at `digit` if the result exceeds `limit`.
fn compose(prev: u32, digit: u32, limit: u64) -> u32 {
    let extended = u64::from(prev) * 10 + u64::from(digit);
    if extended > limit {
        digit
    } else {
        // `extended <= limit` and the previous value fits in u32.
        u32::try_from(extended).unwrap_or(digit)
    }
}

fn clear_selected_flags(matrix: &mut Matrix) {
    let selected = matrix.selected_positions().collect::<Vec<_>>();
    for pos in selected {
        if let Err(err) = matrix.set_selected(pos, false) {
            log::warn!("failed to clear selection at {pos}: {err}");
        }
    }
}
