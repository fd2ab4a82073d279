//! Dashboard statistics payloads.

use chrono::NaiveDate;
use itam_core::request::Endpoint;
use itam_core::types::id::opt_id;
use itam_core::types::{BorrowId, RepairId};
use serde::{Deserialize, Serialize};

use crate::serde_helpers::{count, opt_date, opt_text};

/// Script serving every dashboard action.
pub const DASHBOARD_SCRIPT: &str = "dashboard";

/// The read-only actions exposed by `dashboard.php`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DashboardAction {
    /// Headline counters.
    AllStats,
    /// Borrowed assets grouped by company.
    BorrowedByCompany,
    /// Issued assets grouped by company.
    IssuedByCompany,
    /// Borrows past their due date.
    OverdueBorrowed,
    /// Open high-urgency repair tickets.
    UrgentRepairs,
    /// Repairs per month for the current year.
    MonthlyRepairs,
    /// Assets grouped by condition.
    AssetsByCondition,
}

impl DashboardAction {
    /// Every action, in dashboard display order.
    pub const ALL: [DashboardAction; 7] = [
        Self::AllStats,
        Self::BorrowedByCompany,
        Self::IssuedByCompany,
        Self::OverdueBorrowed,
        Self::UrgentRepairs,
        Self::MonthlyRepairs,
        Self::AssetsByCondition,
    ];

    /// The `action=` value.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::AllStats => "getAllDashboardStats",
            Self::BorrowedByCompany => "getBorrowedAssetsByCompany",
            Self::IssuedByCompany => "getIssuedAssetsByCompany",
            Self::OverdueBorrowed => "getOverdueBorrowedAssets",
            Self::UrgentRepairs => "getUrgentRepairRequests",
            Self::MonthlyRepairs => "getMonthlyRepairsThisYear",
            Self::AssetsByCondition => "getAssetsByCondition",
        }
    }

    /// The endpoint serving this action.
    pub fn endpoint(&self) -> Endpoint {
        Endpoint::action_only(DASHBOARD_SCRIPT, self.as_str())
    }
}

/// Headline counters.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DashboardStats {
    /// All registered assets.
    #[serde(default, with = "count")]
    pub total_assets: u64,
    /// Assets free to lend or issue.
    #[serde(default, with = "count")]
    pub available_assets: u64,
    /// Assets currently borrowed.
    #[serde(default, with = "count")]
    pub borrowed_assets: u64,
    /// Assets currently issued.
    #[serde(default, with = "count")]
    pub issued_assets: u64,
    /// Assets with an open repair ticket.
    #[serde(default, with = "count")]
    pub under_repair: u64,
    /// Open repair tickets.
    #[serde(default, with = "count")]
    pub pending_repairs: u64,
}

/// A per-company count row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompanyCount {
    /// Company name.
    #[serde(alias = "company", default)]
    pub company_name: String,
    /// Count.
    #[serde(alias = "total", default, with = "count")]
    pub count: u64,
}

/// A borrow past its due date.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OverdueBorrow {
    /// Borrow transaction.
    #[serde(alias = "borrow_id", default, with = "opt_id")]
    pub id: Option<BorrowId>,
    /// Asset name.
    #[serde(default)]
    pub asset_name: String,
    /// Borrower name.
    #[serde(default, with = "opt_text")]
    pub borrower_name: Option<String>,
    /// Due date.
    #[serde(default, with = "opt_date")]
    pub due_date: Option<NaiveDate>,
    /// Days past due, as reported by the server.
    #[serde(default, with = "count")]
    pub days_overdue: u64,
}

/// An open urgent repair ticket.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UrgentRepair {
    /// Ticket.
    #[serde(alias = "repair_id", default, with = "opt_id")]
    pub id: Option<RepairId>,
    /// Asset name.
    #[serde(default)]
    pub asset_name: String,
    /// Urgency label.
    #[serde(alias = "urgency_level", default)]
    pub urgency: String,
    /// Status text.
    #[serde(default)]
    pub status: String,
    /// Request date.
    #[serde(default, with = "opt_date")]
    pub request_date: Option<NaiveDate>,
}

/// A month bucket.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MonthlyCount {
    /// Month label or number as sent by the server.
    #[serde(default)]
    pub month: serde_json::Value,
    /// Count.
    #[serde(alias = "total", default, with = "count")]
    pub count: u64,
}

/// A condition bucket.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConditionCount {
    /// Condition name.
    #[serde(alias = "asset_condition_name", alias = "condition_name", default)]
    pub condition: String,
    /// Count.
    #[serde(alias = "total", default, with = "count")]
    pub count: u64,
}
