//! Interaction state machine for number-grid input.
//!
//! This crate turns pointer and keyboard input into selection and value
//! changes on a [`Matrix`](cellgrid_core::Matrix):
//!
//! - [`input`]: raw events and the stateless [`interpret`] step that maps them
//!   to a [`Command`].
//! - [`command`]: the closed set of semantic commands, plus [`CommandQueue`]
//!   for deferring commands to the next turn.
//! - [`selection`]: [`SelectionSet`], the selected coordinates and the
//!   navigation anchor.
//! - [`controller`]: [`InteractionController`], the only writer of the matrix
//!   and selection; applies one command at a time, all or nothing.
//! - [`notifier`]: [`ChangeEvent`] batches published to subscribed renderers.
//!
//! # Examples
//!
//! ```
//! use cellgrid_core::Position;
//! use cellgrid_interaction::{ChangeEvent, InteractionController, Key, RawEvent};
//!
//! let mut controller = InteractionController::with_empty(9).unwrap();
//! let pos = Position::new(2, 2);
//!
//! controller.handle_event(&RawEvent::click(pos)).unwrap();
//! let changes = controller.handle_event(&RawEvent::key(Key::Char('5'))).unwrap();
//! assert_eq!(changes, vec![ChangeEvent::value_changed(pos, 5)]);
//!
//! // 55 does not fit in a 9x9 grid, so composition restarts at 5.
//! controller.handle_event(&RawEvent::key(Key::Char('5'))).unwrap();
//! assert_eq!(controller.matrix().value(pos).unwrap(), 5);
//!
//! controller.handle_event(&RawEvent::key(Key::Delete)).unwrap();
//! assert_eq!(controller.matrix().value(pos).unwrap(), 0);
//! ```

pub mod command;
pub mod controller;
pub mod input;
pub mod notifier;
pub mod selection;

pub use self::{
    command::{Command, CommandQueue, MoveDirection},
    controller::{Composition, ControllerError, InteractionController},
    input::{Key, KeyEvent, Modifiers, PointerEvent, RawEvent, interpret},
    notifier::{ChangeEvent, ChangeKind, ChangeNotifier, ListenerId},
    selection::SelectionSet,
};
