// File: crates/chart-core/src/extension/mod.rs
// Summary: Per-item dataset extensions (selection, label) and their batched change notification.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use crate::dataset::DatasetId;

pub mod label;
pub mod manager;
pub mod selection;
pub mod table;

pub use label::{DatasetLabelExtension, LabelExtension, NO_LABEL};
pub use manager::{Capability, DatasetExtensionManager, ExtensionHandle};
pub use selection::{DatasetSelectionExtension, IterableSelection, SelectionExtension};

/// Common surface of every extension: which dataset it belongs to.
pub trait DatasetExtension {
    fn dataset_id(&self) -> DatasetId;

    /// Whether the owning dataset is still alive.
    fn is_attached(&self) -> bool;
}

/// Which extension state changed.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ExtensionKind {
    Selection,
    Label,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ExtensionChangeEvent {
    pub dataset: DatasetId,
    pub kind: ExtensionKind,
}

/// Handle returned when registering a change listener, used to remove it.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct ListenerId(u64);

pub type ExtensionChangeListener = Rc<dyn Fn(&ExtensionChangeEvent)>;

/// Notification state of one extension.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum NotifyState {
    Live,
    /// Events are held back; `dirty` records whether anything changed meanwhile.
    Muted { dirty: bool },
}

/// Listener list plus the live/muted state machine.
///
/// While muted, mutations only set the dirty bit. Unmuting fires exactly one
/// event if the bit is set and nothing otherwise.
pub struct ChangeNotifier {
    event: ExtensionChangeEvent,
    state: Cell<NotifyState>,
    next_id: Cell<u64>,
    listeners: RefCell<Vec<(ListenerId, ExtensionChangeListener)>>,
}

impl ChangeNotifier {
    pub fn new(dataset: DatasetId, kind: ExtensionKind) -> Self {
        Self {
            event: ExtensionChangeEvent { dataset, kind },
            state: Cell::new(NotifyState::Live),
            next_id: Cell::new(0),
            listeners: RefCell::new(Vec::new()),
        }
    }

    pub fn add_listener(&self, listener: ExtensionChangeListener) -> ListenerId {
        let id = ListenerId(self.next_id.get());
        self.next_id.set(id.0 + 1);
        self.listeners.borrow_mut().push((id, listener));
        id
    }

    pub fn remove_listener(&self, id: ListenerId) -> bool {
        let mut listeners = self.listeners.borrow_mut();
        let before = listeners.len();
        listeners.retain(|(lid, _)| *lid != id);
        listeners.len() != before
    }

    pub fn state(&self) -> NotifyState { self.state.get() }

    pub fn is_notify(&self) -> bool { self.state.get() == NotifyState::Live }

    pub fn set_notify(&self, notify: bool) {
        match (self.state.get(), notify) {
            (NotifyState::Live, false) => self.state.set(NotifyState::Muted { dirty: false }),
            (NotifyState::Muted { dirty }, true) => {
                self.state.set(NotifyState::Live);
                if dirty {
                    self.fire();
                }
            }
            _ => {}
        }
    }

    /// Record a mutation: fire now when live, mark dirty when muted.
    pub fn changed(&self) {
        match self.state.get() {
            NotifyState::Live => self.fire(),
            NotifyState::Muted { .. } => self.state.set(NotifyState::Muted { dirty: true }),
        }
    }

    fn fire(&self) {
        // Snapshot so listeners may query the extension or (un)register listeners.
        let listeners: Vec<ExtensionChangeListener> =
            self.listeners.borrow().iter().map(|(_, l)| l.clone()).collect();
        for listener in listeners {
            listener(&self.event);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn counting(n: &ChangeNotifier) -> Rc<Cell<usize>> {
        let count = Rc::new(Cell::new(0));
        let c = count.clone();
        n.add_listener(Rc::new(move |_: &ExtensionChangeEvent| c.set(c.get() + 1)));
        count
    }

    #[test]
    fn unmute_without_mutation_is_silent() {
        let n = ChangeNotifier::new(DatasetId::next(), ExtensionKind::Selection);
        let count = counting(&n);
        n.set_notify(false);
        n.set_notify(true);
        n.set_notify(true);
        assert_eq!(count.get(), 0);
    }

    #[test]
    fn muted_mutations_coalesce() {
        let n = ChangeNotifier::new(DatasetId::next(), ExtensionKind::Label);
        let count = counting(&n);
        n.set_notify(false);
        for _ in 0..5 {
            n.changed();
        }
        assert_eq!(n.state(), NotifyState::Muted { dirty: true });
        n.set_notify(true);
        assert_eq!(count.get(), 1);
        n.changed();
        assert_eq!(count.get(), 2);
    }

    #[test]
    fn removed_listener_is_not_called() {
        let n = ChangeNotifier::new(DatasetId::next(), ExtensionKind::Selection);
        let count = Rc::new(Cell::new(0));
        let c = count.clone();
        let id = n.add_listener(Rc::new(move |_: &ExtensionChangeEvent| c.set(c.get() + 1)));
        assert!(n.remove_listener(id));
        assert!(!n.remove_listener(id));
        n.changed();
        assert_eq!(count.get(), 0);
    }
}
