// File: crates/chart-core/src/dataset/cursor.rs
// Summary: Cursor variants addressing one data item, and a forward-only enumerator over a dataset's positions.

use std::fmt;
use std::rc::Rc;

use super::Dataset;

/// Position of a single data item, shaped by the dataset family that produced it.
///
/// A cursor is only meaningful relative to its dataset and only while the
/// dataset's structure is unchanged.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum DatasetCursor {
    /// XY datasets: series index and item index.
    IndexPair { series: usize, item: usize },
    /// Category datasets: row key and column key.
    KeyPair { row: String, column: String },
    /// Pie datasets: section key.
    SingleKey(String),
}

impl DatasetCursor {
    pub fn xy(series: usize, item: usize) -> Self { Self::IndexPair { series, item } }

    pub fn category(row: impl Into<String>, column: impl Into<String>) -> Self {
        Self::KeyPair { row: row.into(), column: column.into() }
    }

    pub fn pie(key: impl Into<String>) -> Self { Self::SingleKey(key.into()) }
}

impl fmt::Display for DatasetCursor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::IndexPair { series, item } => write!(f, "[{series}, {item}]"),
            Self::KeyPair { row, column } => write!(f, "[{row}, {column}]"),
            Self::SingleKey(key) => write!(f, "[{key}]"),
        }
    }
}

/// Lazy enumerator over every valid position of a dataset, series then item.
///
/// Counts are re-read on each step. Mutating the dataset's structure while
/// iterating is not detected; the remaining cursors then follow the new shape.
pub struct DatasetCursors {
    dataset: Rc<dyn Dataset>,
    series: usize,
    item: usize,
}

impl DatasetCursors {
    pub fn new(dataset: Rc<dyn Dataset>) -> Self {
        Self { dataset, series: 0, item: 0 }
    }
}

impl Iterator for DatasetCursors {
    type Item = DatasetCursor;

    fn next(&mut self) -> Option<DatasetCursor> {
        while self.series < self.dataset.series_count() {
            if self.item < self.dataset.item_count(self.series) {
                let cursor = self.dataset.cursor_at(self.series, self.item);
                self.item += 1;
                if cursor.is_some() {
                    return cursor;
                }
            } else {
                self.series += 1;
                self.item = 0;
            }
        }
        None
    }
}
