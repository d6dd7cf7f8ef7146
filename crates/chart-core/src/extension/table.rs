// File: crates/chart-core/src/extension/table.rs
// Summary: Ragged per-position state table shaped after a dataset.

use crate::dataset::Dataset;

/// One value per (series, item) position, sized from a dataset's counts.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ItemTable<T> {
    rows: Vec<Vec<T>>,
}

impl<T: Copy + PartialEq> ItemTable<T> {
    pub fn shaped_like(dataset: &dyn Dataset, fill: T) -> Self {
        let rows = (0..dataset.series_count())
            .map(|s| vec![fill; dataset.item_count(s)])
            .collect();
        Self { rows }
    }

    pub fn get(&self, series: usize, item: usize) -> Option<T> {
        self.rows.get(series)?.get(item).copied()
    }

    /// Store `value`; returns whether the stored value changed, `None` if out of range.
    pub fn set(&mut self, series: usize, item: usize, value: T) -> Option<bool> {
        let slot = self.rows.get_mut(series)?.get_mut(item)?;
        let changed = *slot != value;
        *slot = value;
        Some(changed)
    }

    pub fn fill(&mut self, value: T) {
        for row in self.rows.iter_mut() {
            row.fill(value);
        }
    }

    pub fn matches_shape(&self, dataset: &dyn Dataset) -> bool {
        self.rows.len() == dataset.series_count()
            && self.rows.iter().enumerate().all(|(s, row)| row.len() == dataset.item_count(s))
    }

    pub fn count(&self, value: T) -> usize {
        self.rows.iter().flatten().filter(|v| **v == value).count()
    }
}
