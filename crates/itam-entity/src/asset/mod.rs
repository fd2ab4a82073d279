//! Asset records, asset forms, and spreadsheet import rows.

pub mod import;
pub mod model;

pub use import::AssetImportRow;
pub use model::{Asset, AssetUpdate, NewAsset};
