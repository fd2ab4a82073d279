//! Filter value types for tab-scoped table views.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Column comparison operator. All comparisons are case-insensitive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FilterOp {
    /// Whole-cell equality.
    Equals,
    /// Substring match.
    #[default]
    Contains,
    /// Prefix match.
    StartsWith,
}

impl FilterOp {
    /// Apply the operator to a cell value.
    pub fn matches(&self, cell: &str, needle: &str) -> bool {
        let cell = cell.to_lowercase();
        let needle = needle.to_lowercase();
        match self {
            Self::Equals => cell == needle,
            Self::Contains => cell.contains(&needle),
            Self::StartsWith => cell.starts_with(&needle),
        }
    }
}

/// A single filter condition on a named column.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColumnFilter {
    /// The column key, as understood by the row type.
    pub column: String,
    /// The comparison operator.
    #[serde(default)]
    pub op: FilterOp,
    /// The value to compare against.
    pub value: String,
}

impl ColumnFilter {
    /// Create a new column filter.
    pub fn new(column: impl Into<String>, op: FilterOp, value: impl Into<String>) -> Self {
        Self {
            column: column.into(),
            op,
            value: value.into(),
        }
    }

    /// Shorthand for an equality filter.
    pub fn equals(column: impl Into<String>, value: impl Into<String>) -> Self {
        Self::new(column, FilterOp::Equals, value)
    }

    /// Shorthand for a substring filter.
    pub fn contains(column: impl Into<String>, value: impl Into<String>) -> Self {
        Self::new(column, FilterOp::Contains, value)
    }
}

/// Inclusive date window. Either bound may be open.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct DateRange {
    /// First day included.
    pub from: Option<NaiveDate>,
    /// Last day included.
    pub to: Option<NaiveDate>,
}

impl DateRange {
    /// Create a range from optional bounds.
    pub fn new(from: Option<NaiveDate>, to: Option<NaiveDate>) -> Self {
        Self { from, to }
    }

    /// Whether neither bound is set.
    pub fn is_open(&self) -> bool {
        self.from.is_none() && self.to.is_none()
    }

    /// Whether the day falls inside the range (bounds inclusive).
    pub fn contains(&self, day: NaiveDate) -> bool {
        self.from.is_none_or(|from| day >= from) && self.to.is_none_or(|to| day <= to)
    }
}

/// Everything a table view can filter by. Empty fields impose no
/// constraint; set fields are AND-combined.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TableFilter {
    /// Free-text search across every searchable cell.
    #[serde(default)]
    pub global: Option<String>,
    /// Per-column conditions.
    #[serde(default)]
    pub columns: Vec<ColumnFilter>,
    /// Date window applied to each row's primary date.
    #[serde(default)]
    pub date_range: Option<DateRange>,
    /// Active tab key (e.g. a status name).
    #[serde(default)]
    pub tab: Option<String>,
}

impl TableFilter {
    /// Whether the filter imposes no constraint at all.
    pub fn is_empty(&self) -> bool {
        self.global.as_deref().is_none_or(|g| g.trim().is_empty())
            && self.columns.is_empty()
            && self.date_range.is_none_or(|r| r.is_open())
            && self.tab.is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn day(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").expect("date")
    }

    #[test]
    fn test_ops_ignore_case() {
        assert!(FilterOp::Equals.matches("Laptop", "laptop"));
        assert!(FilterOp::Contains.matches("Dell Latitude", "LATI"));
        assert!(FilterOp::StartsWith.matches("SN-0042", "sn-"));
        assert!(!FilterOp::StartsWith.matches("SN-0042", "0042"));
    }

    #[test]
    fn test_date_range_inclusive() {
        let range = DateRange::new(Some(day("2024-01-01")), Some(day("2024-01-31")));
        assert!(range.contains(day("2024-01-01")));
        assert!(range.contains(day("2024-01-31")));
        assert!(!range.contains(day("2024-02-01")));
        assert!(DateRange::default().contains(day("1999-12-31")));
    }

    #[test]
    fn test_blank_global_is_empty() {
        let filter = TableFilter {
            global: Some("   ".to_string()),
            ..TableFilter::default()
        };
        assert!(filter.is_empty());
    }
}
