// File: crates/chart-core/src/dataset/pie.rs
// Summary: Keyed pie dataset; a single series whose items are sections, addressed by key.

use std::cell::RefCell;
use std::rc::Weak;

use super::{
    Dataset, DatasetChangeEvent, DatasetChangeKind, DatasetChangeListener, DatasetCursor, DatasetId,
    DatasetListeners,
};
use crate::error::DatasetError;

pub trait PieDataset: Dataset {
    fn key_count(&self) -> usize;
    fn key(&self, index: usize) -> Option<String>;
    fn index_of(&self, key: &str) -> Option<usize>;
    fn value(&self, index: usize) -> Option<f64>;
}

pub struct DefaultPieDataset {
    id: DatasetId,
    sections: RefCell<Vec<(String, f64)>>,
    listeners: DatasetListeners,
}

impl DefaultPieDataset {
    pub fn new() -> Self {
        Self { id: DatasetId::next(), sections: RefCell::new(Vec::new()), listeners: DatasetListeners::new() }
    }

    pub fn set_value(&self, key: &str, value: f64) {
        let kind = {
            let mut sections = self.sections.borrow_mut();
            match sections.iter_mut().find(|(k, _)| k == key) {
                Some(section) => {
                    section.1 = value;
                    DatasetChangeKind::Values
                }
                None => {
                    sections.push((key.to_string(), value));
                    DatasetChangeKind::Structure
                }
            }
        };
        self.fire(kind);
    }

    pub fn remove(&self, key: &str) -> Result<f64, DatasetError> {
        let removed = {
            let mut sections = self.sections.borrow_mut();
            let i = sections.iter().position(|(k, _)| k == key).ok_or_else(|| DatasetError::UnknownKey(key.to_string()))?;
            sections.remove(i).1
        };
        self.fire(DatasetChangeKind::Structure);
        Ok(removed)
    }

    fn fire(&self, kind: DatasetChangeKind) {
        self.listeners.fire(&DatasetChangeEvent { dataset: self.id, kind });
    }
}

impl Default for DefaultPieDataset {
    fn default() -> Self { Self::new() }
}

impl Dataset for DefaultPieDataset {
    fn id(&self) -> DatasetId { self.id }

    fn series_count(&self) -> usize { 1 }

    fn item_count(&self, series: usize) -> usize {
        if series == 0 { self.key_count() } else { 0 }
    }

    fn cursor_at(&self, series: usize, item: usize) -> Option<DatasetCursor> {
        if series != 0 {
            return None;
        }
        self.key(item).map(DatasetCursor::SingleKey)
    }

    fn position_of(&self, cursor: &DatasetCursor) -> Option<(usize, usize)> {
        match cursor {
            DatasetCursor::SingleKey(key) => self.index_of(key).map(|i| (0, i)),
            _ => None,
        }
    }

    fn add_change_listener(&self, listener: Weak<dyn DatasetChangeListener>) {
        self.listeners.add(listener);
    }
}

impl PieDataset for DefaultPieDataset {
    fn key_count(&self) -> usize { self.sections.borrow().len() }

    fn key(&self, index: usize) -> Option<String> { self.sections.borrow().get(index).map(|(k, _)| k.clone()) }

    fn index_of(&self, key: &str) -> Option<usize> { self.sections.borrow().iter().position(|(k, _)| k == key) }

    fn value(&self, index: usize) -> Option<f64> { self.sections.borrow().get(index).map(|(_, v)| *v) }
}
