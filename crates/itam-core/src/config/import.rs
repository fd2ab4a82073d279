//! Spreadsheet import configuration.

use serde::{Deserialize, Serialize};

/// Controls how batch-imported rows are cleaned before submission.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ImportConfig {
    /// `chrono` format strings tried in order when normalizing a date cell.
    #[serde(default = "default_date_formats")]
    pub accepted_date_formats: Vec<String>,
    /// Whether bare numbers are read as spreadsheet serial day numbers.
    #[serde(default = "default_true")]
    pub excel_serial_dates: bool,
}

impl Default for ImportConfig {
    fn default() -> Self {
        Self {
            accepted_date_formats: default_date_formats(),
            excel_serial_dates: true,
        }
    }
}

fn default_date_formats() -> Vec<String> {
    ["%Y-%m-%d", "%m/%d/%Y", "%d-%m-%Y", "%Y/%m/%d"]
        .iter()
        .map(|s| s.to_string())
        .collect()
}

fn default_true() -> bool {
    true
}
