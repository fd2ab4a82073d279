//! Dashboard read service.

use std::sync::Arc;

use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;
use tokio_util::sync::CancellationToken;
use tracing::{info, instrument, warn};

use itam_core::error::AppError;
use itam_core::request::ApiReply;
use itam_core::result::AppResult;
use itam_core::traits::{ApiTransport, Service};
use itam_entity::dashboard::{
    CompanyCount, ConditionCount, DashboardAction, DashboardStats, MonthlyCount, OverdueBorrow,
    UrgentRepair,
};

use crate::reply::fetch_list;

/// Everything the dashboard shows. A part that failed to load is `None`
/// and its action is listed in `failed`.
#[derive(Debug, Clone, Default, Serialize)]
pub struct DashboardSnapshot {
    /// Headline asset counts.
    pub stats: Option<DashboardStats>,
    /// Borrowed assets per company.
    pub borrowed_by_company: Option<Vec<CompanyCount>>,
    /// Issued assets per company.
    pub issued_by_company: Option<Vec<CompanyCount>>,
    /// Borrows past their due date.
    pub overdue_borrowed: Option<Vec<OverdueBorrow>>,
    /// Open repairs flagged urgent.
    pub urgent_repairs: Option<Vec<UrgentRepair>>,
    /// Repair requests per month.
    pub monthly_repairs: Option<Vec<MonthlyCount>>,
    /// Asset counts per condition.
    pub assets_by_condition: Option<Vec<ConditionCount>>,
    /// `action=` names that failed.
    pub failed: Vec<&'static str>,
}

impl DashboardSnapshot {
    /// Whether every part loaded.
    pub fn is_complete(&self) -> bool {
        self.failed.is_empty()
    }
}

/// Fetches the dashboard aggregates.
#[derive(Debug, Clone)]
pub struct DashboardService {
    /// API transport.
    transport: Arc<dyn ApiTransport>,
    /// Aborts in-flight requests.
    cancel: CancellationToken,
}

impl DashboardService {
    /// Creates a new dashboard service.
    pub fn new(transport: Arc<dyn ApiTransport>, cancel: CancellationToken) -> Self {
        Self { transport, cancel }
    }

    /// Headline counters. Accepts a bare object or a one-element array.
    pub async fn stats(&self) -> AppResult<DashboardStats> {
        let endpoint = DashboardAction::AllStats.endpoint();
        let body = ApiReply::interpret(self.transport.get(&endpoint, &self.cancel).await?)?;
        let object = match body {
            Value::Array(mut items) if !items.is_empty() => items.swap_remove(0),
            other => other,
        };
        Ok(serde_json::from_value(object)?)
    }

    async fn rows<T: DeserializeOwned>(&self, action: DashboardAction) -> AppResult<Vec<T>> {
        fetch_list(self.transport.as_ref(), &action.endpoint(), &self.cancel).await
    }

    /// Load every part concurrently. Only cancellation is an error.
    #[instrument(skip(self))]
    pub async fn snapshot(&self) -> AppResult<DashboardSnapshot> {
        let (stats, borrowed, issued, overdue, urgent, monthly, condition) = tokio::join!(
            self.stats(),
            self.rows::<CompanyCount>(DashboardAction::BorrowedByCompany),
            self.rows::<CompanyCount>(DashboardAction::IssuedByCompany),
            self.rows::<OverdueBorrow>(DashboardAction::OverdueBorrowed),
            self.rows::<UrgentRepair>(DashboardAction::UrgentRepairs),
            self.rows::<MonthlyCount>(DashboardAction::MonthlyRepairs),
            self.rows::<ConditionCount>(DashboardAction::AssetsByCondition),
        );

        if self.cancel.is_cancelled() {
            return Err(AppError::cancelled("Dashboard load was cancelled"));
        }

        let mut failed = Vec::new();
        let snapshot = DashboardSnapshot {
            stats: keep(DashboardAction::AllStats, stats, &mut failed),
            borrowed_by_company: keep(DashboardAction::BorrowedByCompany, borrowed, &mut failed),
            issued_by_company: keep(DashboardAction::IssuedByCompany, issued, &mut failed),
            overdue_borrowed: keep(DashboardAction::OverdueBorrowed, overdue, &mut failed),
            urgent_repairs: keep(DashboardAction::UrgentRepairs, urgent, &mut failed),
            monthly_repairs: keep(DashboardAction::MonthlyRepairs, monthly, &mut failed),
            assets_by_condition: keep(DashboardAction::AssetsByCondition, condition, &mut failed),
            failed,
        };

        info!(failed = snapshot.failed.len(), "Dashboard loaded");
        Ok(snapshot)
    }
}

fn keep<T>(
    action: DashboardAction,
    result: AppResult<T>,
    failed: &mut Vec<&'static str>,
) -> Option<T> {
    match result {
        Ok(value) => Some(value),
        Err(e) => {
            warn!(action = action.as_str(), error = %e, "Dashboard part failed");
            failed.push(action.as_str());
            None
        }
    }
}

impl Service for DashboardService {}

#[cfg(test)]
mod tests {
    use super::*;
    use itam_client::MemoryTransport;
    use serde_json::json;

    #[tokio::test]
    async fn test_partial_snapshot() {
        let transport = Arc::new(MemoryTransport::new());
        transport.set_reply(
            &DashboardAction::AllStats.endpoint(),
            json!([{"total_assets": "40", "borrowed_assets": "3"}]),
        );
        transport.set_reply(
            &DashboardAction::BorrowedByCompany.endpoint(),
            json!([{"company_name": "Acme", "count": 3}]),
        );
        transport.set_reply(&DashboardAction::MonthlyRepairs.endpoint(), json!([]));

        let service = DashboardService::new(transport, CancellationToken::new());
        let snapshot = service.snapshot().await.unwrap();

        assert_eq!(snapshot.stats.as_ref().map(|s| s.total_assets), Some(40));
        assert_eq!(snapshot.borrowed_by_company.as_ref().map(Vec::len), Some(1));
        assert_eq!(snapshot.monthly_repairs, Some(Vec::new()));
        assert!(snapshot.overdue_borrowed.is_none());
        assert_eq!(snapshot.failed.len(), 4);
    }
}
