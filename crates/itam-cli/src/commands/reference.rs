//! Reference lookup summary command.

use serde::Serialize;
use tabled::Tabled;

use crate::output::{self, OutputFormat};
use itam_core::error::AppError;

/// Lookup display row for table output
#[derive(Debug, Serialize, Tabled)]
struct LookupRow {
    /// Lookup name
    lookup: String,
    /// Rows loaded
    rows: usize,
    /// Load status
    status: &'static str,
}

/// Load every lookup and print its row count
pub async fn execute(config_path: &str, format: OutputFormat) -> Result<(), AppError> {
    let conn = super::connect(config_path).await?;
    let store = conn.reference_store();
    let report = store.load().await?;
    let data = store.snapshot().await;

    let rows: Vec<LookupRow> = data
        .counts()
        .into_iter()
        .map(|(lookup, rows)| LookupRow {
            lookup: lookup.to_string(),
            rows,
            status: if report.failed.contains(&lookup) {
                "failed"
            } else {
                "ok"
            },
        })
        .collect();

    output::print_list(&rows, format);
    if !report.is_complete() && format == OutputFormat::Table {
        output::print_warning(&format!(
            "{} lookup(s) could not be loaded",
            report.failed.len()
        ));
    }
    Ok(())
}
