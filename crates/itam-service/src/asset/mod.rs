//! Asset store and spreadsheet import cleaning.

pub mod import;
pub mod store;

pub use import::{CleanedBatch, clean_batch, parse_date_cell};
pub use store::{AssetStore, BatchOutcome};
