//! Raw spreadsheet rows for bulk asset import.

use serde::{Deserialize, Serialize};

/// One spreadsheet row as read from the import file. Cells stay as text
/// until the batch is cleaned; ids are passed through for the server to
/// resolve.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AssetImportRow {
    /// Display name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub asset_name: Option<String>,
    /// Serial number. Rows without one are dropped.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub serial_number: Option<String>,
    /// Brand.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub brand: Option<String>,
    /// Model.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub model: Option<String>,
    /// Category id cell.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category_id: Option<String>,
    /// Subcategory id cell.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sub_category_id: Option<String>,
    /// Type id cell.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub type_id: Option<String>,
    /// Status id cell.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status_id: Option<String>,
    /// Condition id cell.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub asset_condition_id: Option<String>,
    /// Purchase date cell, any accepted format.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub purchase_date: Option<String>,
    /// Warranty date cell, any accepted format.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub warranty_expiry: Option<String>,
    /// Price cell.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub purchase_price: Option<String>,
    /// Notes.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub remarks: Option<String>,
}

impl AssetImportRow {
    /// Create a row with just a serial number and a name.
    pub fn new(serial_number: Option<&str>, asset_name: &str) -> Self {
        Self {
            serial_number: serial_number.map(str::to_string),
            asset_name: Some(asset_name.to_string()),
            ..Self::default()
        }
    }

    /// The trimmed serial number, if the cell is non-blank.
    pub fn serial(&self) -> Option<&str> {
        self.serial_number
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
    }

    /// Mutable access to every date cell, for normalization.
    pub fn date_cells_mut(&mut self) -> [&mut Option<String>; 2] {
        [&mut self.purchase_date, &mut self.warranty_expiry]
    }
}
