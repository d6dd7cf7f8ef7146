// File: crates/chart-core/src/extension/label.rs
// Summary: Per-item integer label state attachable to any dataset.

use std::cell::RefCell;
use std::rc::{Rc, Weak};

use super::table::ItemTable;
use super::{ChangeNotifier, DatasetExtension, ExtensionChangeListener, ExtensionKind, ListenerId};
use crate::dataset::{Dataset, DatasetChangeEvent, DatasetChangeKind, DatasetChangeListener, DatasetCursor, DatasetId};

/// Label value of an item that carries no label.
pub const NO_LABEL: i32 = -1;

/// Integer class label per data item, [`NO_LABEL`] by default.
pub trait DatasetLabelExtension: DatasetExtension {
    fn label(&self, cursor: &DatasetCursor) -> i32;

    fn set_label(&self, cursor: &DatasetCursor, label: i32);

    fn clear_labels(&self);

    fn add_change_listener(&self, listener: ExtensionChangeListener) -> ListenerId;

    fn remove_change_listener(&self, id: ListenerId) -> bool;

    fn set_notify(&self, notify: bool);

    fn is_notify(&self) -> bool;
}

pub struct LabelExtension {
    dataset: Weak<dyn Dataset>,
    dataset_id: DatasetId,
    table: RefCell<ItemTable<i32>>,
    notifier: ChangeNotifier,
}

impl LabelExtension {
    pub fn attach<D: Dataset + 'static>(dataset: &Rc<D>) -> Rc<Self> {
        let weak: Weak<dyn Dataset> = Rc::downgrade(dataset);
        let id = dataset.id();
        let ext = Rc::new(Self {
            dataset: weak,
            dataset_id: id,
            table: RefCell::new(ItemTable::shaped_like(dataset.as_ref(), NO_LABEL)),
            notifier: ChangeNotifier::new(id, ExtensionKind::Label),
        });
        let listener: Weak<dyn DatasetChangeListener> = Rc::downgrade(&ext);
        dataset.add_change_listener(listener);
        ext
    }

    /// Number of items currently carrying `label`.
    pub fn count(&self, label: i32) -> usize { self.table.borrow().count(label) }
}

impl DatasetExtension for LabelExtension {
    fn dataset_id(&self) -> DatasetId { self.dataset_id }

    fn is_attached(&self) -> bool { self.dataset.strong_count() > 0 }
}

impl DatasetLabelExtension for LabelExtension {
    fn label(&self, cursor: &DatasetCursor) -> i32 {
        self.dataset
            .upgrade()
            .and_then(|ds| ds.position_of(cursor))
            .and_then(|(s, i)| self.table.borrow().get(s, i))
            .unwrap_or(NO_LABEL)
    }

    fn set_label(&self, cursor: &DatasetCursor, label: i32) {
        let Some((s, i)) = self.dataset.upgrade().and_then(|ds| ds.position_of(cursor)) else {
            log::debug!("ignoring label for unresolvable cursor {cursor}");
            return;
        };
        let changed = self.table.borrow_mut().set(s, i, label);
        if changed == Some(true) {
            self.notifier.changed();
        }
    }

    fn clear_labels(&self) {
        self.table.borrow_mut().fill(NO_LABEL);
        self.notifier.changed();
    }

    fn add_change_listener(&self, listener: ExtensionChangeListener) -> ListenerId {
        self.notifier.add_listener(listener)
    }

    fn remove_change_listener(&self, id: ListenerId) -> bool { self.notifier.remove_listener(id) }

    fn set_notify(&self, notify: bool) { self.notifier.set_notify(notify) }

    fn is_notify(&self) -> bool { self.notifier.is_notify() }
}

impl DatasetChangeListener for LabelExtension {
    fn dataset_changed(&self, event: &DatasetChangeEvent) {
        let Some(ds) = self.dataset.upgrade() else { return };
        if event.kind == DatasetChangeKind::Structure || !self.table.borrow().matches_shape(ds.as_ref()) {
            *self.table.borrow_mut() = ItemTable::shaped_like(ds.as_ref(), NO_LABEL);
            log::trace!("label table for dataset {} reinitialised", self.dataset_id.get());
            self.notifier.changed();
        }
    }
}
