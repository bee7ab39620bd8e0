//! Change publication to external renderers.

use std::fmt::{self, Debug, Display};

use cellgrid_core::Position;

/// What changed about a cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, derive_more::IsVariant)]
pub enum ChangeKind {
    /// The cell now holds this value.
    ValueChanged(u32),
    /// The cell's selection flag is now this.
    SelectionChanged(bool),
}

/// A single cell delta produced by applying a command.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ChangeEvent {
    /// The affected cell.
    pub pos: Position,
    /// The new state.
    pub kind: ChangeKind,
}

impl ChangeEvent {
    /// A value change at `pos`.
    #[must_use]
    pub const fn value_changed(pos: Position, value: u32) -> Self {
        Self {
            pos,
            kind: ChangeKind::ValueChanged(value),
        }
    }

    /// A selection change at `pos`.
    #[must_use]
    pub const fn selection_changed(pos: Position, selected: bool) -> Self {
        Self {
            pos,
            kind: ChangeKind::SelectionChanged(selected),
        }
    }
}

impl Display for ChangeEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.kind {
            ChangeKind::ValueChanged(value) => write!(f, "{} value -> {value}", self.pos),
            ChangeKind::SelectionChanged(selected) => {
                write!(f, "{} selected -> {selected}", self.pos)
            }
        }
    }
}

/// Handle returned by [`ChangeNotifier::subscribe`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ListenerId(u64);

type Listener = Box<dyn FnMut(&[ChangeEvent])>;

/// Synchronous listener list.
///
/// Each applied command publishes its events as one batch, in production
/// order, to every listener in subscription order. Empty batches are not
/// delivered.
#[derive(Default)]
pub struct ChangeNotifier {
    listeners: Vec<(ListenerId, Listener)>,
    next_id: u64,
}

impl Debug for ChangeNotifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ChangeNotifier")
            .field("listeners", &self.listeners.len())
            .field("next_id", &self.next_id)
            .finish()
    }
}

impl ChangeNotifier {
    /// Creates a notifier with no listeners.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a listener and returns its handle.
    pub fn subscribe<F>(&mut self, listener: F) -> ListenerId
    where
        F: FnMut(&[ChangeEvent]) + 'static,
    {
        let id = ListenerId(self.next_id);
        self.next_id += 1;
        self.listeners.push((id, Box::new(listener)));
        id
    }

    /// Removes a listener. Returns `false` if `id` was not registered.
    pub fn unsubscribe(&mut self, id: ListenerId) -> bool {
        let before = self.listeners.len();
        self.listeners.retain(|(listener_id, _)| *listener_id != id);
        self.listeners.len() != before
    }

    /// Returns the number of registered listeners.
    #[must_use]
    pub fn listener_count(&self) -> usize {
        self.listeners.len()
    }

    /// Delivers one batch to every listener.
    pub fn publish(&mut self, batch: &[ChangeEvent]) {
        if batch.is_empty() {
            return;
        }
        for (_, listener) in &mut self.listeners {
            listener(batch);
        }
    }
}

#[cfg(test)]
mod tests {
    use std::{cell::RefCell, rc::Rc};

    use super::*;

    #[test]
    fn test_publish_reaches_listeners_in_order() {
        let log = Rc::new(RefCell::new(vec![]));
        let mut notifier = ChangeNotifier::new();
        for name in ["first", "second"] {
            let log = Rc::clone(&log);
            notifier.subscribe(move |batch| log.borrow_mut().push((name, batch.len())));
        }

        let pos = Position::new(0, 1);
        notifier.publish(&[
            ChangeEvent::selection_changed(pos, true),
            ChangeEvent::value_changed(pos, 3),
        ]);
        assert_eq!(*log.borrow(), vec![("first", 2), ("second", 2)]);
    }

    #[test]
    fn test_empty_batches_are_not_delivered() {
        let calls = Rc::new(RefCell::new(0));
        let mut notifier = ChangeNotifier::new();
        let counter = Rc::clone(&calls);
        notifier.subscribe(move |_| *counter.borrow_mut() += 1);
        notifier.publish(&[]);
        assert_eq!(*calls.borrow(), 0);
    }

    #[test]
    fn test_unsubscribe() {
        let calls = Rc::new(RefCell::new(0));
        let mut notifier = ChangeNotifier::new();
        let counter = Rc::clone(&calls);
        let id = notifier.subscribe(move |_| *counter.borrow_mut() += 1);
        assert_eq!(notifier.listener_count(), 1);

        assert!(notifier.unsubscribe(id));
        assert!(!notifier.unsubscribe(id));
        notifier.publish(&[ChangeEvent::value_changed(Position::ORIGIN, 1)]);
        assert_eq!(*calls.borrow(), 0);
        assert_eq!(notifier.listener_count(), 0);
    }

    #[test]
    fn test_display() {
        let pos = Position::new(2, 3);
        assert_eq!(
            ChangeEvent::value_changed(pos, 12).to_string(),
            "(2, 3) value -> 12"
        );
        assert_eq!(
            ChangeEvent::selection_changed(pos, false).to_string(),
            "(2, 3) selected -> false"
        );
    }
}
