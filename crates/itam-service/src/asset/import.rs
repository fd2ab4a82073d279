//! Cleaning of spreadsheet rows before a batch insert.

use chrono::{DateTime, Days, NaiveDate, NaiveDateTime};

use itam_core::config::import::ImportConfig;
use itam_entity::asset::AssetImportRow;

/// Canonical wire format for dates.
pub const CANONICAL_DATE: &str = "%Y-%m-%d";

/// Day zero of spreadsheet serial dates (includes the 1900 leap-year bug).
const SERIAL_EPOCH: (i32, u32, u32) = (1899, 12, 30);

/// Largest serial a spreadsheet accepts (9999-12-31).
const MAX_SERIAL: f64 = 2_958_465.0;

/// Rows that survived cleaning, plus how many were dropped.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CleanedBatch {
    /// Rows with a serial number and normalized dates.
    pub rows: Vec<AssetImportRow>,
    /// Rows dropped for a missing serial number.
    pub dropped: usize,
}

/// Parse one date cell with the configured formats, RFC 3339, and
/// (optionally) spreadsheet serial numbers.
pub fn parse_date_cell(cell: &str, config: &ImportConfig) -> Option<NaiveDate> {
    let cell = cell.trim();
    if cell.is_empty() {
        return None;
    }

    for format in &config.accepted_date_formats {
        if let Ok(day) = NaiveDate::parse_from_str(cell, format) {
            return Some(day);
        }
    }
    if let Ok(ts) = DateTime::parse_from_rfc3339(cell) {
        return Some(ts.date_naive());
    }
    if let Ok(ts) = NaiveDateTime::parse_from_str(cell, "%Y-%m-%d %H:%M:%S") {
        return Some(ts.date());
    }

    if config.excel_serial_dates {
        return parse_serial(cell);
    }
    None
}

fn parse_serial(cell: &str) -> Option<NaiveDate> {
    let serial: f64 = cell.parse().ok()?;
    if !(1.0..=MAX_SERIAL).contains(&serial) {
        return None;
    }
    let (y, m, d) = SERIAL_EPOCH;
    NaiveDate::from_ymd_opt(y, m, d)?.checked_add_days(Days::new(serial.trunc() as u64))
}

/// Rewrite a date cell to `yyyy-MM-dd`, or clear it when unparseable.
pub fn normalize_date_cell(cell: &mut Option<String>, config: &ImportConfig) {
    *cell = cell
        .as_deref()
        .and_then(|raw| parse_date_cell(raw, config))
        .map(|day| day.format(CANONICAL_DATE).to_string());
}

/// Drop rows without a serial number and normalize the rest.
pub fn clean_batch(rows: Vec<AssetImportRow>, config: &ImportConfig) -> CleanedBatch {
    let total = rows.len();
    let rows: Vec<AssetImportRow> = rows
        .into_iter()
        .filter_map(|mut row| {
            let serial = row.serial()?.to_string();
            row.serial_number = Some(serial);
            for cell in row.date_cells_mut() {
                normalize_date_cell(cell, config);
            }
            Some(row)
        })
        .collect();

    CleanedBatch {
        dropped: total - rows.len(),
        rows,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ymd(y: i32, m: u32, d: u32) -> Option<NaiveDate> {
        NaiveDate::from_ymd_opt(y, m, d)
    }

    #[test]
    fn test_accepted_formats() {
        let config = ImportConfig::default();
        assert_eq!(parse_date_cell("2024-03-05", &config), ymd(2024, 3, 5));
        assert_eq!(parse_date_cell("03/05/2024", &config), ymd(2024, 3, 5));
        assert_eq!(parse_date_cell("05-03-2024", &config), ymd(2024, 3, 5));
        assert_eq!(parse_date_cell("2024/03/05", &config), ymd(2024, 3, 5));
        assert_eq!(
            parse_date_cell("2024-03-05T10:00:00+08:00", &config),
            ymd(2024, 3, 5)
        );
    }

    #[test]
    fn test_serial_dates() {
        let config = ImportConfig::default();
        assert_eq!(parse_date_cell("45356", &config), ymd(2024, 3, 5));
        assert_eq!(parse_date_cell("45356.75", &config), ymd(2024, 3, 5));

        let strict = ImportConfig {
            excel_serial_dates: false,
            ..ImportConfig::default()
        };
        assert_eq!(parse_date_cell("45356", &strict), None);
    }

    #[test]
    fn test_unparseable_cleared() {
        let config = ImportConfig::default();
        let mut cell = Some("next tuesday".to_string());
        normalize_date_cell(&mut cell, &config);
        assert_eq!(cell, None);
    }

    #[test]
    fn test_clean_batch_trims_serial_and_counts_drops() {
        let mut row = AssetImportRow::new(Some("  SN-1 "), "Laptop");
        row.purchase_date = Some("03/05/2024".to_string());
        let rows = vec![row, AssetImportRow::new(Some("   "), "Ghost")];

        let cleaned = clean_batch(rows, &ImportConfig::default());
        assert_eq!(cleaned.dropped, 1);
        assert_eq!(cleaned.rows[0].serial_number.as_deref(), Some("SN-1"));
        assert_eq!(cleaned.rows[0].purchase_date.as_deref(), Some("2024-03-05"));
    }
}
