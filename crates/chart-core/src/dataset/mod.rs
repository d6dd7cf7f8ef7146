// File: crates/chart-core/src/dataset/mod.rs
// Summary: Dataset contract shared by every dataset family: identity, cursor addressing and change signals.

use std::cell::RefCell;
use std::rc::{Rc, Weak};
use std::sync::atomic::{AtomicU64, Ordering};

use crate::extension::label::DatasetLabelExtension;
use crate::extension::selection::DatasetSelectionExtension;

pub mod category;
pub mod cursor;
pub mod pie;
pub mod xy;

pub use category::{CategoryDataset, DefaultCategoryDataset};
pub use cursor::{DatasetCursor, DatasetCursors};
pub use pie::{DefaultPieDataset, PieDataset};
pub use xy::{XyDataset, XySeries, XySeriesCollection};

/// Stable identity token for a dataset instance.
///
/// Registries and entities refer to datasets through this token rather than
/// through pointer equality.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct DatasetId(u64);

impl DatasetId {
    /// Allocate a fresh, process-unique id.
    pub fn next() -> Self {
        static NEXT: AtomicU64 = AtomicU64::new(1);
        Self(NEXT.fetch_add(1, Ordering::Relaxed))
    }

    pub const fn get(&self) -> u64 { self.0 }
}

/// What kind of mutation a dataset went through.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DatasetChangeKind {
    /// Item or series count changed; cursors produced earlier may now name other items.
    Structure,
    /// Values changed in place; every position still names the same item.
    Values,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct DatasetChangeEvent {
    pub dataset: DatasetId,
    pub kind: DatasetChangeKind,
}

/// Receiver of dataset change signals (extensions, plots, application code).
pub trait DatasetChangeListener {
    fn dataset_changed(&self, event: &DatasetChangeEvent);
}

/// Cursor-addressable item contract every dataset family satisfies.
///
/// Positions are `(series, item)` pairs in natural series-then-item order;
/// each family maps them to its own [`DatasetCursor`] shape.
pub trait Dataset {
    fn id(&self) -> DatasetId;

    fn series_count(&self) -> usize;

    fn item_count(&self, series: usize) -> usize;

    /// Build the family-specific cursor for a position, `None` when out of range.
    fn cursor_at(&self, series: usize, item: usize) -> Option<DatasetCursor>;

    /// Resolve a cursor back to a position, `None` when it does not belong to this
    /// dataset's family or no longer names a valid item.
    fn position_of(&self, cursor: &DatasetCursor) -> Option<(usize, usize)>;

    fn add_change_listener(&self, listener: Weak<dyn DatasetChangeListener>);

    /// Selection state the dataset carries itself, if any.
    fn selection_extension(&self) -> Option<Rc<dyn DatasetSelectionExtension>> { None }

    /// Label state the dataset carries itself, if any.
    fn label_extension(&self) -> Option<Rc<dyn DatasetLabelExtension>> { None }
}

/// Weakly-held listener list used by the concrete datasets.
///
/// Listeners are held weakly so an extension never keeps its dataset's
/// notifier alive and vice versa; dead entries are pruned on every fire.
#[derive(Default)]
pub struct DatasetListeners {
    listeners: RefCell<Vec<Weak<dyn DatasetChangeListener>>>,
}

impl DatasetListeners {
    pub fn new() -> Self { Self::default() }

    pub fn add(&self, listener: Weak<dyn DatasetChangeListener>) {
        self.listeners.borrow_mut().push(listener);
    }

    /// Deliver `event` to every live listener.
    ///
    /// The list is snapshotted first: listeners may query the dataset or
    /// register further listeners while being notified.
    pub fn fire(&self, event: &DatasetChangeEvent) {
        let live: Vec<Rc<dyn DatasetChangeListener>> = {
            let mut listeners = self.listeners.borrow_mut();
            listeners.retain(|w| w.strong_count() > 0);
            listeners.iter().filter_map(Weak::upgrade).collect()
        };
        for listener in live {
            listener.dataset_changed(event);
        }
    }
}
