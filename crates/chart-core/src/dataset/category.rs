// File: crates/chart-core/src/dataset/category.rs
// Summary: Category (row key x column key) table dataset; cursors are key pairs.

use std::cell::RefCell;
use std::rc::Weak;

use super::{
    Dataset, DatasetChangeEvent, DatasetChangeKind, DatasetChangeListener, DatasetCursor, DatasetId,
    DatasetListeners,
};
use crate::error::DatasetError;

/// Category dataset family: a value table indexed by row key and column key.
/// Rows play the role of series and columns the role of items.
pub trait CategoryDataset: Dataset {
    fn row_count(&self) -> usize;
    fn column_count(&self) -> usize;
    fn row_key(&self, row: usize) -> Option<String>;
    fn column_key(&self, column: usize) -> Option<String>;
    fn row_index(&self, key: &str) -> Option<usize>;
    fn column_index(&self, key: &str) -> Option<usize>;
    fn value(&self, row: usize, column: usize) -> Option<f64>;
}

#[derive(Default)]
struct Table {
    rows: Vec<String>,
    columns: Vec<String>,
    // values[row][column]
    values: Vec<Vec<Option<f64>>>,
}

pub struct DefaultCategoryDataset {
    id: DatasetId,
    table: RefCell<Table>,
    listeners: DatasetListeners,
}

impl DefaultCategoryDataset {
    pub fn new() -> Self {
        Self { id: DatasetId::next(), table: RefCell::new(Table::default()), listeners: DatasetListeners::new() }
    }

    /// Set the value at (row, column), adding either key if it is new.
    pub fn set_value(&self, value: f64, row: &str, column: &str) {
        let kind = {
            let mut t = self.table.borrow_mut();
            let mut kind = DatasetChangeKind::Values;
            let r = match t.rows.iter().position(|k| k == row) {
                Some(r) => r,
                None => {
                    let width = t.columns.len();
                    t.rows.push(row.to_string());
                    t.values.push(vec![None; width]);
                    kind = DatasetChangeKind::Structure;
                    t.rows.len() - 1
                }
            };
            let c = match t.columns.iter().position(|k| k == column) {
                Some(c) => c,
                None => {
                    t.columns.push(column.to_string());
                    for row_values in t.values.iter_mut() {
                        row_values.push(None);
                    }
                    kind = DatasetChangeKind::Structure;
                    t.columns.len() - 1
                }
            };
            t.values[r][c] = Some(value);
            kind
        };
        self.fire(kind);
    }

    pub fn remove_row(&self, row: &str) -> Result<(), DatasetError> {
        {
            let mut t = self.table.borrow_mut();
            let r = t.rows.iter().position(|k| k == row).ok_or_else(|| DatasetError::UnknownKey(row.to_string()))?;
            t.rows.remove(r);
            t.values.remove(r);
        }
        self.fire(DatasetChangeKind::Structure);
        Ok(())
    }

    pub fn remove_column(&self, column: &str) -> Result<(), DatasetError> {
        {
            let mut t = self.table.borrow_mut();
            let c = t
                .columns
                .iter()
                .position(|k| k == column)
                .ok_or_else(|| DatasetError::UnknownKey(column.to_string()))?;
            t.columns.remove(c);
            for row_values in t.values.iter_mut() {
                row_values.remove(c);
            }
        }
        self.fire(DatasetChangeKind::Structure);
        Ok(())
    }

    fn fire(&self, kind: DatasetChangeKind) {
        self.listeners.fire(&DatasetChangeEvent { dataset: self.id, kind });
    }
}

impl Default for DefaultCategoryDataset {
    fn default() -> Self { Self::new() }
}

impl Dataset for DefaultCategoryDataset {
    fn id(&self) -> DatasetId { self.id }

    fn series_count(&self) -> usize { self.row_count() }

    fn item_count(&self, series: usize) -> usize {
        if series < self.row_count() { self.column_count() } else { 0 }
    }

    fn cursor_at(&self, series: usize, item: usize) -> Option<DatasetCursor> {
        let t = self.table.borrow();
        let row = t.rows.get(series)?;
        let column = t.columns.get(item)?;
        Some(DatasetCursor::category(row.as_str(), column.as_str()))
    }

    fn position_of(&self, cursor: &DatasetCursor) -> Option<(usize, usize)> {
        match cursor {
            DatasetCursor::KeyPair { row, column } => Some((self.row_index(row)?, self.column_index(column)?)),
            _ => None,
        }
    }

    fn add_change_listener(&self, listener: Weak<dyn DatasetChangeListener>) {
        self.listeners.add(listener);
    }
}

impl CategoryDataset for DefaultCategoryDataset {
    fn row_count(&self) -> usize { self.table.borrow().rows.len() }

    fn column_count(&self) -> usize { self.table.borrow().columns.len() }

    fn row_key(&self, row: usize) -> Option<String> { self.table.borrow().rows.get(row).cloned() }

    fn column_key(&self, column: usize) -> Option<String> { self.table.borrow().columns.get(column).cloned() }

    fn row_index(&self, key: &str) -> Option<usize> { self.table.borrow().rows.iter().position(|k| k == key) }

    fn column_index(&self, key: &str) -> Option<usize> {
        self.table.borrow().columns.iter().position(|k| k == key)
    }

    fn value(&self, row: usize, column: usize) -> Option<f64> {
        *self.table.borrow().values.get(row)?.get(column)?
    }
}
