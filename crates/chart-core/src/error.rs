// File: crates/chart-core/src/error.rs
// Summary: Error type for dataset mutations.

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum DatasetError {
    #[error("series index {0} out of range")]
    UnknownSeries(usize),

    #[error("item {item} out of range for series {series}")]
    ItemOutOfRange { series: usize, item: usize },

    #[error("duplicate series key '{0}'")]
    DuplicateSeriesKey(String),

    #[error("unknown key '{0}'")]
    UnknownKey(String),
}
