// File: crates/chart-core/src/extension/selection.rs
// Summary: Per-item selection state attachable to any dataset, with iteration over selected positions.

use std::cell::RefCell;
use std::rc::{Rc, Weak};

use super::table::ItemTable;
use super::{ChangeNotifier, DatasetExtension, ExtensionChangeListener, ExtensionKind, ListenerId};
use crate::dataset::{
    Dataset, DatasetChangeEvent, DatasetChangeKind, DatasetChangeListener, DatasetCursor, DatasetCursors,
    DatasetId,
};

/// Boolean "selected" flag per data item.
///
/// Cursors that no longer resolve against the current dataset shape read as
/// unselected and are ignored on write.
pub trait DatasetSelectionExtension: DatasetExtension {
    fn is_selected(&self, cursor: &DatasetCursor) -> bool;

    fn set_selected(&self, cursor: &DatasetCursor, selected: bool);

    /// Reset every position to unselected. Always counts as one change.
    fn clear_selection(&self);

    fn add_change_listener(&self, listener: ExtensionChangeListener) -> ListenerId;

    fn remove_change_listener(&self, id: ListenerId) -> bool;

    /// `false` mutes change events; `true` unmutes and flushes one event if
    /// anything changed while muted.
    fn set_notify(&self, notify: bool);

    fn is_notify(&self) -> bool;

    fn as_iterable(&self) -> Option<&dyn IterableSelection> { None }
}

/// Enumeration over the positions of a selection extension.
///
/// Iterators are single pass and do not support removal. Mutating the table
/// or the dataset while iterating is not detected: filtered iterators read
/// the state as it is at each step.
pub trait IterableSelection {
    fn iter(&self) -> Box<dyn Iterator<Item = DatasetCursor> + '_>;

    fn selection_iter(&self, selected: bool) -> Box<dyn Iterator<Item = DatasetCursor> + '_>;
}

/// Selection table for a dataset of any family.
///
/// Holds its dataset weakly; once the dataset is dropped the extension
/// behaves as if the dataset were empty.
pub struct SelectionExtension {
    dataset: Weak<dyn Dataset>,
    dataset_id: DatasetId,
    table: RefCell<ItemTable<bool>>,
    notifier: ChangeNotifier,
}

impl SelectionExtension {
    /// Create an all-unselected table for `dataset` and subscribe to its
    /// structural changes.
    pub fn attach<D: Dataset + 'static>(dataset: &Rc<D>) -> Rc<Self> {
        let weak: Weak<dyn Dataset> = Rc::downgrade(dataset);
        let id = dataset.id();
        let ext = Rc::new(Self {
            dataset: weak,
            dataset_id: id,
            table: RefCell::new(ItemTable::shaped_like(dataset.as_ref(), false)),
            notifier: ChangeNotifier::new(id, ExtensionKind::Selection),
        });
        let listener: Weak<dyn DatasetChangeListener> = Rc::downgrade(&ext);
        dataset.add_change_listener(listener);
        ext
    }

    pub fn selected_count(&self) -> usize { self.table.borrow().count(true) }

    fn dataset(&self) -> Option<Rc<dyn Dataset>> { self.dataset.upgrade() }

    fn reinitialize(&self) {
        let table = match self.dataset() {
            Some(ds) => ItemTable::shaped_like(ds.as_ref(), false),
            None => ItemTable::default(),
        };
        *self.table.borrow_mut() = table;
        log::trace!("selection table for dataset {} reinitialised", self.dataset_id.get());
    }
}

impl DatasetExtension for SelectionExtension {
    fn dataset_id(&self) -> DatasetId { self.dataset_id }

    fn is_attached(&self) -> bool { self.dataset.strong_count() > 0 }
}

impl DatasetSelectionExtension for SelectionExtension {
    fn is_selected(&self, cursor: &DatasetCursor) -> bool {
        let Some(ds) = self.dataset() else { return false };
        ds.position_of(cursor)
            .and_then(|(s, i)| self.table.borrow().get(s, i))
            .unwrap_or(false)
    }

    fn set_selected(&self, cursor: &DatasetCursor, selected: bool) {
        let position = self.dataset().and_then(|ds| ds.position_of(cursor));
        let Some((s, i)) = position else {
            log::debug!("ignoring unresolvable cursor {cursor} for dataset {}", self.dataset_id.get());
            return;
        };
        let changed = self.table.borrow_mut().set(s, i, selected);
        if changed == Some(true) {
            self.notifier.changed();
        }
    }

    fn clear_selection(&self) {
        self.table.borrow_mut().fill(false);
        self.notifier.changed();
    }

    fn add_change_listener(&self, listener: ExtensionChangeListener) -> ListenerId {
        self.notifier.add_listener(listener)
    }

    fn remove_change_listener(&self, id: ListenerId) -> bool { self.notifier.remove_listener(id) }

    fn set_notify(&self, notify: bool) { self.notifier.set_notify(notify) }

    fn is_notify(&self) -> bool { self.notifier.is_notify() }

    fn as_iterable(&self) -> Option<&dyn IterableSelection> { Some(self) }
}

impl IterableSelection for SelectionExtension {
    fn iter(&self) -> Box<dyn Iterator<Item = DatasetCursor> + '_> {
        match self.dataset() {
            Some(ds) => Box::new(DatasetCursors::new(ds)),
            None => Box::new(std::iter::empty()),
        }
    }

    fn selection_iter(&self, selected: bool) -> Box<dyn Iterator<Item = DatasetCursor> + '_> {
        Box::new(self.iter().filter(move |c| self.is_selected(c) == selected))
    }
}

impl DatasetChangeListener for SelectionExtension {
    fn dataset_changed(&self, event: &DatasetChangeEvent) {
        // Positions cannot be mapped across a structural change, so start over.
        let stale = match event.kind {
            DatasetChangeKind::Structure => true,
            DatasetChangeKind::Values => match self.dataset() {
                Some(ds) => !self.table.borrow().matches_shape(ds.as_ref()),
                None => false,
            },
        };
        if stale {
            self.reinitialize();
            self.notifier.changed();
        }
    }
}
