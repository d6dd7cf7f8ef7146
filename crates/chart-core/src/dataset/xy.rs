// File: crates/chart-core/src/dataset/xy.rs
// Summary: XY series and series collection; cursors are (series, item) index pairs.

use std::cell::{OnceCell, RefCell};
use std::rc::{Rc, Weak};

use super::{
    Dataset, DatasetChangeEvent, DatasetChangeKind, DatasetChangeListener, DatasetCursor, DatasetId,
    DatasetListeners,
};
use crate::error::DatasetError;
use crate::extension::selection::{DatasetSelectionExtension, SelectionExtension};

/// XY dataset family: ordered series of (x, y) items.
pub trait XyDataset: Dataset {
    fn series_key(&self, series: usize) -> Option<String>;
    fn x(&self, series: usize, item: usize) -> Option<f64>;
    fn y(&self, series: usize, item: usize) -> Option<f64>;
}

/// A keyed list of (x, y) points.
#[derive(Clone, Debug, PartialEq)]
pub struct XySeries {
    pub key: String,
    pub data: Vec<(f64, f64)>,
}

impl XySeries {
    pub fn new(key: impl Into<String>) -> Self {
        Self { key: key.into(), data: Vec::new() }
    }

    pub fn with_data(key: impl Into<String>, data: Vec<(f64, f64)>) -> Self {
        Self { key: key.into(), data }
    }

    pub fn len(&self) -> usize { self.data.len() }

    pub fn is_empty(&self) -> bool { self.data.is_empty() }
}

/// Collection of XY series with change notification.
///
/// Mutators take `&self`: the collection is shared (`Rc`) between the plot,
/// its extensions and the selection manager.
pub struct XySeriesCollection {
    id: DatasetId,
    series: RefCell<Vec<XySeries>>,
    listeners: DatasetListeners,
    native_selection: OnceCell<Rc<SelectionExtension>>,
}

impl XySeriesCollection {
    pub fn new() -> Self {
        Self {
            id: DatasetId::next(),
            series: RefCell::new(Vec::new()),
            listeners: DatasetListeners::new(),
            native_selection: OnceCell::new(),
        }
    }

    pub fn from_series(series: Vec<XySeries>) -> Result<Self, DatasetError> {
        let collection = Self::new();
        for s in series {
            collection.add_series(s)?;
        }
        Ok(collection)
    }

    /// Give this collection its own selection state, so it no longer needs an
    /// externally registered extension. Idempotent.
    pub fn enable_selection(self: &Rc<Self>) -> Rc<SelectionExtension> {
        self.native_selection
            .get_or_init(|| SelectionExtension::attach(self))
            .clone()
    }

    pub fn add_series(&self, series: XySeries) -> Result<(), DatasetError> {
        {
            let mut all = self.series.borrow_mut();
            if all.iter().any(|s| s.key == series.key) {
                return Err(DatasetError::DuplicateSeriesKey(series.key));
            }
            all.push(series);
        }
        self.fire(DatasetChangeKind::Structure);
        Ok(())
    }

    pub fn remove_series(&self, index: usize) -> Result<XySeries, DatasetError> {
        let removed = {
            let mut all = self.series.borrow_mut();
            if index >= all.len() {
                return Err(DatasetError::UnknownSeries(index));
            }
            all.remove(index)
        };
        self.fire(DatasetChangeKind::Structure);
        Ok(removed)
    }

    pub fn add_item(&self, series: usize, x: f64, y: f64) -> Result<(), DatasetError> {
        {
            let mut all = self.series.borrow_mut();
            let s = all.get_mut(series).ok_or(DatasetError::UnknownSeries(series))?;
            s.data.push((x, y));
        }
        self.fire(DatasetChangeKind::Structure);
        Ok(())
    }

    pub fn remove_item(&self, series: usize, item: usize) -> Result<(f64, f64), DatasetError> {
        let removed = {
            let mut all = self.series.borrow_mut();
            let s = all.get_mut(series).ok_or(DatasetError::UnknownSeries(series))?;
            if item >= s.data.len() {
                return Err(DatasetError::ItemOutOfRange { series, item });
            }
            s.data.remove(item)
        };
        self.fire(DatasetChangeKind::Structure);
        Ok(removed)
    }

    pub fn update_y(&self, series: usize, item: usize, y: f64) -> Result<(), DatasetError> {
        {
            let mut all = self.series.borrow_mut();
            let s = all.get_mut(series).ok_or(DatasetError::UnknownSeries(series))?;
            let p = s.data.get_mut(item).ok_or(DatasetError::ItemOutOfRange { series, item })?;
            p.1 = y;
        }
        self.fire(DatasetChangeKind::Values);
        Ok(())
    }

    fn fire(&self, kind: DatasetChangeKind) {
        self.listeners.fire(&DatasetChangeEvent { dataset: self.id, kind });
    }
}

impl Default for XySeriesCollection {
    fn default() -> Self { Self::new() }
}

impl Dataset for XySeriesCollection {
    fn id(&self) -> DatasetId { self.id }

    fn series_count(&self) -> usize { self.series.borrow().len() }

    fn item_count(&self, series: usize) -> usize {
        self.series.borrow().get(series).map_or(0, XySeries::len)
    }

    fn cursor_at(&self, series: usize, item: usize) -> Option<DatasetCursor> {
        (item < self.item_count(series)).then(|| DatasetCursor::xy(series, item))
    }

    fn position_of(&self, cursor: &DatasetCursor) -> Option<(usize, usize)> {
        match cursor {
            DatasetCursor::IndexPair { series, item } if *item < self.item_count(*series) => {
                Some((*series, *item))
            }
            _ => None,
        }
    }

    fn add_change_listener(&self, listener: Weak<dyn DatasetChangeListener>) {
        self.listeners.add(listener);
    }

    fn selection_extension(&self) -> Option<Rc<dyn DatasetSelectionExtension>> {
        self.native_selection
            .get()
            .map(|ext| ext.clone() as Rc<dyn DatasetSelectionExtension>)
    }
}

impl XyDataset for XySeriesCollection {
    fn series_key(&self, series: usize) -> Option<String> {
        self.series.borrow().get(series).map(|s| s.key.clone())
    }

    fn x(&self, series: usize, item: usize) -> Option<f64> {
        self.series.borrow().get(series)?.data.get(item).map(|p| p.0)
    }

    fn y(&self, series: usize, item: usize) -> Option<f64> {
        self.series.borrow().get(series)?.data.get(item).map(|p| p.1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn duplicate_key_rejected() {
        let c = XySeriesCollection::new();
        c.add_series(XySeries::new("a")).unwrap();
        assert_eq!(c.add_series(XySeries::new("a")), Err(DatasetError::DuplicateSeriesKey("a".into())));
    }

    #[test]
    fn position_of_rejects_foreign_cursor_kinds() {
        let c = XySeriesCollection::from_series(vec![XySeries::with_data("a", vec![(0.0, 1.0)])]).unwrap();
        assert_eq!(c.position_of(&DatasetCursor::xy(0, 0)), Some((0, 0)));
        assert_eq!(c.position_of(&DatasetCursor::xy(0, 1)), None);
        assert_eq!(c.position_of(&DatasetCursor::pie("a")), None);
    }
}
