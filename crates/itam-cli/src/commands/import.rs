//! Bulk asset import from a spreadsheet exported as CSV.

use std::io::Read;
use std::path::PathBuf;

use clap::Args;
use csv::StringRecord;

use crate::output;
use itam_core::error::{AppError, ErrorKind};
use itam_entity::asset::AssetImportRow;
use itam_service::AssetStore;

/// Arguments for the import command
#[derive(Debug, Args)]
pub struct ImportArgs {
    /// CSV file with a header row
    pub file: PathBuf,
    /// Skip the confirmation prompt
    #[arg(short, long)]
    pub yes: bool,
}

/// Execute the import command
pub async fn execute(args: &ImportArgs, config_path: &str) -> Result<(), AppError> {
    let bytes = tokio::fs::read(&args.file).await.map_err(|e| {
        AppError::with_source(
            ErrorKind::Validation,
            format!("Failed to read '{}'", args.file.display()),
            e,
        )
    })?;
    let rows = read_rows(bytes.as_slice())?;

    let with_serial = rows.iter().filter(|r| r.serial().is_some()).count();
    output::print_kv("Rows read", &rows.len().to_string());
    output::print_kv("With serial number", &with_serial.to_string());
    if with_serial < rows.len() {
        output::print_warning(&format!(
            "{} row(s) without a serial number will be skipped",
            rows.len() - with_serial
        ));
    }

    if !args.yes {
        let confirm = dialoguer::Confirm::new()
            .with_prompt(format!("Import {} asset(s)?", with_serial))
            .default(false)
            .interact()
            .map_err(|e| AppError::internal(format!("Input error: {}", e)))?;

        if !confirm {
            println!("Cancelled.");
            return Ok(());
        }
    }

    let conn = super::connect(config_path).await?;
    let store = AssetStore::new(
        conn.transport.clone(),
        conn.config.import.clone(),
        conn.session.child_token(),
    );

    match store.insert_many(rows).await {
        Ok(outcome) => {
            output::print_success(&format!(
                "Imported {} asset(s), skipped {}",
                outcome.submitted, outcome.dropped
            ));
            Ok(())
        }
        Err(e) => {
            output::print_error(&format!("Import failed: {}", e.message));
            Err(e)
        }
    }
}

/// Parse CSV rows. Headers are matched after lowercasing and turning
/// spaces into underscores, so "Serial Number" reads as `serial_number`.
pub fn read_rows<R: Read>(reader: R) -> Result<Vec<AssetImportRow>, AppError> {
    let mut reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .flexible(true)
        .from_reader(reader);

    let headers: StringRecord = reader
        .headers()
        .map_err(csv_error)?
        .iter()
        .map(normalize_header)
        .collect();
    reader.set_headers(headers);

    reader
        .deserialize::<AssetImportRow>()
        .map(|row| row.map_err(csv_error))
        .collect()
}

fn normalize_header(raw: &str) -> String {
    raw.trim().to_lowercase().replace([' ', '-'], "_")
}

fn csv_error(e: csv::Error) -> AppError {
    AppError::with_source(ErrorKind::Validation, "Malformed CSV input", e)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_headers_are_normalized() {
        let input = "Asset Name,Serial Number,Purchase Date\n\
                     Laptop,SN-1,03/15/2024\n\
                     Desktop,,2024-01-02\n";
        let rows = read_rows(input.as_bytes()).unwrap();

        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].serial(), Some("SN-1"));
        assert_eq!(rows[0].purchase_date.as_deref(), Some("03/15/2024"));
        assert_eq!(rows[1].serial(), None);
    }

    #[test]
    fn test_unknown_columns_are_ignored() {
        let input = "serial_number,location\nSN-9,Warehouse\n";
        let rows = read_rows(input.as_bytes()).unwrap();
        assert_eq!(rows[0].serial(), Some("SN-9"));
        assert_eq!(rows[0].asset_name, None);
    }
}
