//! Semantic commands applied by the controller.

use std::mem;

use cellgrid_core::Position;

/// A semantic edit or selection request.
///
/// Produced by [`interpret`](crate::interpret) from raw input, or built
/// directly by callers that drive the grid programmatically.
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::IsVariant)]
pub enum Command {
    /// Select exactly this cell, clearing every other selection.
    FocusCell(Position),
    /// Flip this cell's selection without touching other cells.
    ToggleCell(Position),
    /// Deselect everything.
    ClearSelection,
    /// Move the selection one step from the anchor, wrapping at the edges.
    Move(MoveDirection),
    /// Type a decimal digit (0-9) into every selected cell.
    EnterDigit(u8),
    /// Drop the last decimal digit of every selected cell.
    Truncate,
    /// Empty every selected cell.
    ClearValue,
}

impl Command {
    /// Returns the cell this command addresses directly, if any.
    #[must_use]
    pub const fn target(&self) -> Option<Position> {
        match self {
            Self::FocusCell(pos) | Self::ToggleCell(pos) => Some(*pos),
            Self::ClearSelection
            | Self::Move(_)
            | Self::EnterDigit(_)
            | Self::Truncate
            | Self::ClearValue => None,
        }
    }
}

/// Direction of a [`Command::Move`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, derive_more::IsVariant)]
pub enum MoveDirection {
    /// Towards row 0.
    Up,
    /// Towards the last row.
    Down,
    /// Towards column 0.
    Left,
    /// Towards the last column.
    Right,
}

impl MoveDirection {
    /// All four directions.
    pub const ALL: [Self; 4] = [Self::Up, Self::Down, Self::Left, Self::Right];

    /// Steps `pos` one cell in this direction on a `size × size` torus.
    ///
    /// Vertical moves never change the column and horizontal moves never
    /// change the row.
    #[must_use]
    pub const fn apply_to(self, pos: Position, size: usize) -> Position {
        match self {
            Self::Up => pos.wrapping_up(size),
            Self::Down => pos.wrapping_down(size),
            Self::Left => pos.wrapping_left(size),
            Self::Right => pos.wrapping_right(size),
        }
    }
}

/// Commands deferred to the next turn.
///
/// Change listeners must not re-enter the controller; they push follow-up
/// commands here instead, and the owner drains the queue with
/// [`InteractionController::apply_all`](crate::InteractionController::apply_all).
#[derive(Debug, Default)]
pub struct CommandQueue {
    commands: Vec<Command>,
}

impl CommandQueue {
    /// Creates an empty queue.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a command.
    pub fn request(&mut self, command: Command) {
        self.commands.push(command);
    }

    /// Removes and returns all queued commands in request order.
    pub fn take_all(&mut self) -> Vec<Command> {
        mem::take(&mut self.commands)
    }

    /// Returns `true` if nothing is queued.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    /// Returns the number of queued commands.
    #[must_use]
    pub fn len(&self) -> usize {
        self.commands.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn take_all_returns_commands_and_clears_queue() {
        let mut queue = CommandQueue::new();
        queue.request(Command::EnterDigit(4));
        queue.request(Command::ClearValue);
        assert_eq!(queue.len(), 2);

        let drained = queue.take_all();
        assert_eq!(drained, vec![Command::EnterDigit(4), Command::ClearValue]);
        assert!(queue.is_empty());
        assert!(queue.take_all().is_empty());
    }

    #[test]
    fn target_only_for_cell_commands() {
        let pos = Position::new(1, 2);
        assert_eq!(Command::FocusCell(pos).target(), Some(pos));
        assert_eq!(Command::ToggleCell(pos).target(), Some(pos));
        assert_eq!(Command::Move(MoveDirection::Up).target(), None);
        assert_eq!(Command::Truncate.target(), None);
    }

    #[test]
    fn move_wraps_on_every_edge() {
        let size = 9;
        assert_eq!(
            MoveDirection::Up.apply_to(Position::new(0, 4), size),
            Position::new(8, 4)
        );
        assert_eq!(
            MoveDirection::Down.apply_to(Position::new(8, 4), size),
            Position::new(0, 4)
        );
        assert_eq!(
            MoveDirection::Left.apply_to(Position::new(4, 0), size),
            Position::new(4, 8)
        );
        assert_eq!(
            MoveDirection::Right.apply_to(Position::new(4, 8), size),
            Position::new(4, 0)
        );
        assert_eq!(
            MoveDirection::Right.apply_to(Position::new(4, 3), size),
            Position::new(4, 4)
        );
    }
}
