//! Raw input events and their classification into [`Command`]s.
//!
//! Classification is pure: [`interpret`] looks only at the event and the
//! current grid size, never at cell values or the selection.

use cellgrid_core::Position;

use crate::command::{Command, MoveDirection};

bitflags::bitflags! {
    /// Modifier keys held while an event fired.
    #[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
    pub struct Modifiers: u8 {
        /// Shift.
        const SHIFT = 0b0000_0001;
        /// Control.
        const CTRL = 0b0000_0010;
        /// Alt / Option.
        const ALT = 0b0000_0100;
        /// Meta / Command / Windows.
        const META = 0b0000_1000;
    }
}

impl Modifiers {
    /// Returns `true` if a multi-select modifier (Ctrl or Meta) is held.
    #[must_use]
    pub fn is_multi_select(self) -> bool {
        self.intersects(Self::CTRL | Self::META)
    }
}

/// A keyboard key, named after DOM `KeyboardEvent.key` values.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Key {
    /// A key producing a single character.
    Char(char),
    /// `Tab`.
    Tab,
    /// `Escape`.
    Escape,
    /// `Backspace`.
    Backspace,
    /// `Delete`.
    Delete,
    /// `Enter`.
    Enter,
    /// `ArrowUp`.
    ArrowUp,
    /// `ArrowDown`.
    ArrowDown,
    /// `ArrowLeft`.
    ArrowLeft,
    /// `ArrowRight`.
    ArrowRight,
    /// Any other named key.
    Other(String),
}

impl Key {
    /// Parses a DOM key name such as `"ArrowUp"`, `"Escape"` or `"7"`.
    ///
    /// Names are case-sensitive, as in the DOM. A single character maps to
    /// [`Key::Char`]; unknown names map to [`Key::Other`].
    #[must_use]
    pub fn from_name(name: &str) -> Self {
        let mut chars = name.chars();
        if let (Some(ch), None) = (chars.next(), chars.next()) {
            return Self::Char(ch);
        }
        match name {
            "Tab" => Self::Tab,
            "Escape" | "Esc" => Self::Escape,
            "Backspace" => Self::Backspace,
            "Delete" | "Del" => Self::Delete,
            "Enter" => Self::Enter,
            "ArrowUp" | "Up" => Self::ArrowUp,
            "ArrowDown" | "Down" => Self::ArrowDown,
            "ArrowLeft" | "Left" => Self::ArrowLeft,
            "ArrowRight" | "Right" => Self::ArrowRight,
            _ => Self::Other(name.to_owned()),
        }
    }

    /// Returns the numeric value of an ASCII digit key.
    #[must_use]
    pub fn digit(&self) -> Option<u8> {
        match self {
            Self::Char(ch) => ch.to_digit(10).and_then(|d| u8::try_from(d).ok()),
            _ => None,
        }
    }
}

/// A pointer click.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PointerEvent {
    /// Coordinates attached to the clicked element, or `None` if the click
    /// landed outside any cell.
    pub target: Option<Position>,
    /// Modifiers held during the click.
    pub modifiers: Modifiers,
}

/// A key press.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyEvent {
    /// The pressed key.
    pub key: Key,
    /// Modifiers held during the press.
    pub modifiers: Modifiers,
}

/// An input event as delivered by the host toolkit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RawEvent {
    /// A pointer click.
    Pointer(PointerEvent),
    /// A key press.
    Key(KeyEvent),
    /// Keyboard focus moved onto a cell.
    Focus(Position),
}

impl RawEvent {
    /// A click on `pos` without modifiers.
    #[must_use]
    pub const fn click(pos: Position) -> Self {
        Self::Pointer(PointerEvent {
            target: Some(pos),
            modifiers: Modifiers::empty(),
        })
    }

    /// A click on `pos` with the given modifiers.
    #[must_use]
    pub const fn click_with(pos: Position, modifiers: Modifiers) -> Self {
        Self::Pointer(PointerEvent {
            target: Some(pos),
            modifiers,
        })
    }

    /// A click that hit no cell.
    #[must_use]
    pub const fn click_outside() -> Self {
        Self::Pointer(PointerEvent {
            target: None,
            modifiers: Modifiers::empty(),
        })
    }

    /// A key press without modifiers.
    #[must_use]
    pub const fn key(key: Key) -> Self {
        Self::Key(KeyEvent {
            key,
            modifiers: Modifiers::empty(),
        })
    }

    /// Keyboard focus landing on `pos`.
    #[must_use]
    pub const fn focus(pos: Position) -> Self {
        Self::Focus(pos)
    }
}

struct KeyBinding {
    key: Key,
    command: Command,
}

impl KeyBinding {
    const fn new(key: Key, command: Command) -> Self {
        Self { key, command }
    }
}

// Tab clears the selection; the focus event that follows selects the newly focused cell.
const KEY_BINDINGS: [KeyBinding; 8] = [
    KeyBinding::new(Key::Tab, Command::ClearSelection),
    KeyBinding::new(Key::Escape, Command::ClearSelection),
    KeyBinding::new(Key::Backspace, Command::Truncate),
    KeyBinding::new(Key::Delete, Command::ClearValue),
    KeyBinding::new(Key::ArrowUp, Command::Move(MoveDirection::Up)),
    KeyBinding::new(Key::ArrowDown, Command::Move(MoveDirection::Down)),
    KeyBinding::new(Key::ArrowLeft, Command::Move(MoveDirection::Left)),
    KeyBinding::new(Key::ArrowRight, Command::Move(MoveDirection::Right)),
];

/// Classifies a raw event for a grid of `size × size` cells.
///
/// Returns `None` for events that carry no meaning for the grid, such as
/// unbound keys or focus on a coordinate outside the grid. Clicks outside the
/// grid, including clicks whose attached coordinates fall outside it, clear
/// the selection. Key modifiers are ignored.
///
/// # Examples
///
/// ```
/// use cellgrid_core::Position;
/// use cellgrid_interaction::{Command, Key, Modifiers, MoveDirection, RawEvent, interpret};
///
/// let pos = Position::new(1, 1);
/// assert_eq!(interpret(&RawEvent::click(pos), 9), Some(Command::FocusCell(pos)));
/// assert_eq!(
///     interpret(&RawEvent::click_with(pos, Modifiers::CTRL), 9),
///     Some(Command::ToggleCell(pos))
/// );
/// assert_eq!(
///     interpret(&RawEvent::key(Key::ArrowLeft), 9),
///     Some(Command::Move(MoveDirection::Left))
/// );
/// assert_eq!(interpret(&RawEvent::key(Key::Char('x')), 9), None);
/// ```
#[must_use]
pub fn interpret(event: &RawEvent, size: usize) -> Option<Command> {
    let command = match event {
        RawEvent::Pointer(pointer) => Some(interpret_pointer(pointer, size)),
        RawEvent::Key(key) => interpret_key(key),
        RawEvent::Focus(pos) => pos.is_within(size).then_some(Command::FocusCell(*pos)),
    };
    log::trace!("interpret {event:?} -> {command:?}");
    command
}

fn interpret_pointer(pointer: &PointerEvent, size: usize) -> Command {
    match pointer.target {
        Some(pos) if pos.is_within(size) => {
            if pointer.modifiers.is_multi_select() {
                Command::ToggleCell(pos)
            } else {
                Command::FocusCell(pos)
            }
        }
        _ => Command::ClearSelection,
    }
}

fn interpret_key(event: &KeyEvent) -> Option<Command> {
    if let Some(digit) = event.key.digit() {
        return Some(Command::EnterDigit(digit));
    }
    KEY_BINDINGS
        .iter()
        .find(|binding| binding.key == event.key)
        .map(|binding| binding.command)
}
