//! Table-level filtering: global search, column conditions, a date
//! window, and tab scoping, AND-combined over rows already narrowed by
//! the cascade.

use chrono::NaiveDate;

use itam_core::types::TableFilter;
use itam_entity::asset::Asset;
use itam_entity::transaction::{BorrowRecord, IssuanceRecord, RepairRequest};

/// A row a table view can filter.
pub trait TableRow {
    /// Text of one named column, if the row has it.
    fn cell(&self, column: &str) -> Option<String>;

    /// Cells covered by the global search box.
    fn searchable(&self) -> Vec<String>;

    /// The row's primary date for the date window.
    fn row_date(&self) -> Option<NaiveDate>;

    /// Tab key the row belongs to.
    fn tab(&self) -> Option<&str> {
        None
    }
}

/// Whether one row passes every condition of the filter.
pub fn row_matches<R: TableRow + ?Sized>(row: &R, filter: &TableFilter) -> bool {
    if let Some(tab) = &filter.tab {
        if row.tab() != Some(tab.as_str()) {
            return false;
        }
    }

    let needle = filter.global.as_deref().map(str::trim).unwrap_or_default();
    if !needle.is_empty() {
        let needle = needle.to_lowercase();
        if !row
            .searchable()
            .iter()
            .any(|cell| cell.to_lowercase().contains(&needle))
        {
            return false;
        }
    }

    let columns_pass = filter.columns.iter().all(|condition| {
        row.cell(&condition.column)
            .is_some_and(|cell| condition.op.matches(&cell, &condition.value))
    });
    if !columns_pass {
        return false;
    }

    match filter.date_range {
        Some(range) if !range.is_open() => row.row_date().is_some_and(|day| range.contains(day)),
        _ => true,
    }
}

/// Rows passing the filter, in their original order.
pub fn apply_table_filter<'a, R: TableRow>(rows: &[&'a R], filter: &TableFilter) -> Vec<&'a R> {
    if filter.is_empty() {
        return rows.to_vec();
    }
    rows.iter()
        .copied()
        .filter(|row| row_matches(*row, filter))
        .collect()
}

fn text(value: &Option<String>) -> Option<String> {
    value.clone()
}

fn day(value: Option<NaiveDate>) -> Option<String> {
    value.map(|d| d.format("%Y-%m-%d").to_string())
}

impl TableRow for Asset {
    fn cell(&self, column: &str) -> Option<String> {
        match column {
            "asset_name" => Some(self.asset_name.clone()),
            "serial_number" => Some(self.serial_number.clone()),
            "brand" => text(&self.brand),
            "model" => text(&self.model),
            "purchase_date" => day(self.purchase_date),
            "warranty_expiry" => day(self.warranty_expiry),
            "remarks" => text(&self.remarks),
            _ => None,
        }
    }

    fn searchable(&self) -> Vec<String> {
        [
            Some(self.asset_name.clone()),
            Some(self.serial_number.clone()),
            self.brand.clone(),
            self.model.clone(),
        ]
        .into_iter()
        .flatten()
        .collect()
    }

    fn row_date(&self) -> Option<NaiveDate> {
        self.purchase_date
    }
}

impl TableRow for BorrowRecord {
    fn cell(&self, column: &str) -> Option<String> {
        match column {
            "asset_name" => text(&self.asset_name),
            "borrower_name" => text(&self.borrower_name),
            "borrow_date" => day(self.borrow_date),
            "due_date" => day(self.due_date),
            "return_date" => day(self.return_date),
            "status" => Some(self.status.clone()),
            "remarks" => text(&self.remarks),
            _ => None,
        }
    }

    fn searchable(&self) -> Vec<String> {
        [
            self.asset_name.clone(),
            self.borrower_name.clone(),
            Some(self.status.clone()),
            self.remarks.clone(),
        ]
        .into_iter()
        .flatten()
        .collect()
    }

    fn row_date(&self) -> Option<NaiveDate> {
        self.borrow_date
    }

    fn tab(&self) -> Option<&str> {
        Some(self.status.as_str())
    }
}

impl TableRow for RepairRequest {
    fn cell(&self, column: &str) -> Option<String> {
        match column {
            "asset_name" => text(&self.asset_name),
            "issue_description" => Some(self.issue_description.clone()),
            "status" => Some(self.status.clone()),
            "technician" => text(&self.technician),
            "request_date" => day(self.request_date),
            "completed_date" => day(self.completed_date),
            "remarks" => text(&self.remarks),
            _ => None,
        }
    }

    fn searchable(&self) -> Vec<String> {
        [
            self.asset_name.clone(),
            Some(self.issue_description.clone()),
            Some(self.status.clone()),
            self.technician.clone(),
        ]
        .into_iter()
        .flatten()
        .collect()
    }

    fn row_date(&self) -> Option<NaiveDate> {
        self.request_date
    }

    fn tab(&self) -> Option<&str> {
        Some(self.status.as_str())
    }
}

impl TableRow for IssuanceRecord {
    fn cell(&self, column: &str) -> Option<String> {
        match column {
            "asset_name" => text(&self.asset_name),
            "issued_to_name" => text(&self.issued_to_name),
            "issued_date" => day(self.issued_date),
            "pullout_date" => day(self.pullout_date),
            "status" => Some(self.status.clone()),
            "remarks" => text(&self.remarks),
            _ => None,
        }
    }

    fn searchable(&self) -> Vec<String> {
        [
            self.asset_name.clone(),
            self.issued_to_name.clone(),
            Some(self.status.clone()),
            self.remarks.clone(),
        ]
        .into_iter()
        .flatten()
        .collect()
    }

    fn row_date(&self) -> Option<NaiveDate> {
        self.issued_date
    }

    fn tab(&self) -> Option<&str> {
        Some(self.status.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use itam_core::types::{ColumnFilter, DateRange};

    struct Row {
        name: &'static str,
        status: &'static str,
        date: Option<NaiveDate>,
    }

    impl TableRow for Row {
        fn cell(&self, column: &str) -> Option<String> {
            match column {
                "name" => Some(self.name.to_string()),
                "status" => Some(self.status.to_string()),
                _ => None,
            }
        }

        fn searchable(&self) -> Vec<String> {
            vec![self.name.to_string()]
        }

        fn row_date(&self) -> Option<NaiveDate> {
            self.date
        }

        fn tab(&self) -> Option<&str> {
            Some(self.status)
        }
    }

    fn ymd(y: i32, m: u32, d: u32) -> Option<NaiveDate> {
        NaiveDate::from_ymd_opt(y, m, d)
    }

    fn rows() -> Vec<Row> {
        vec![
            Row {
                name: "Dell Latitude",
                status: "Borrowed",
                date: ymd(2024, 3, 1),
            },
            Row {
                name: "HP LaserJet",
                status: "Returned",
                date: ymd(2024, 3, 15),
            },
            Row {
                name: "Dell Monitor",
                status: "Returned",
                date: None,
            },
        ]
    }

    fn names(rows: Vec<&Row>) -> Vec<&'static str> {
        rows.into_iter().map(|r| r.name).collect()
    }

    #[test]
    fn test_global_search_case_insensitive() {
        let rows = rows();
        let refs: Vec<&Row> = rows.iter().collect();
        let filter = TableFilter {
            global: Some("dell".to_string()),
            ..TableFilter::default()
        };
        assert_eq!(
            names(apply_table_filter(&refs, &filter)),
            vec!["Dell Latitude", "Dell Monitor"]
        );
    }

    #[test]
    fn test_tab_and_column_conjunction() {
        let rows = rows();
        let refs: Vec<&Row> = rows.iter().collect();
        let filter = TableFilter {
            columns: vec![ColumnFilter::contains("name", "dell")],
            tab: Some("Returned".to_string()),
            ..TableFilter::default()
        };
        assert_eq!(names(apply_table_filter(&refs, &filter)), vec!["Dell Monitor"]);
    }

    #[test]
    fn test_date_range_inclusive_and_drops_undated() {
        let rows = rows();
        let refs: Vec<&Row> = rows.iter().collect();
        let filter = TableFilter {
            date_range: Some(DateRange::new(ymd(2024, 3, 1), ymd(2024, 3, 15))),
            ..TableFilter::default()
        };
        assert_eq!(
            names(apply_table_filter(&refs, &filter)),
            vec!["Dell Latitude", "HP LaserJet"]
        );

        let open = TableFilter {
            date_range: Some(DateRange::default()),
            ..TableFilter::default()
        };
        assert_eq!(apply_table_filter(&refs, &open).len(), 3);
    }

    #[test]
    fn test_unknown_column_excludes_row() {
        let rows = rows();
        let refs: Vec<&Row> = rows.iter().collect();
        let filter = TableFilter {
            columns: vec![ColumnFilter::equals("serial", "x")],
            ..TableFilter::default()
        };
        assert!(apply_table_filter(&refs, &filter).is_empty());
    }
}
