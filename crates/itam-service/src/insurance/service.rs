//! Insurance read service.

use std::sync::Arc;

use chrono::NaiveDate;
use tokio_util::sync::CancellationToken;
use tracing::{debug, instrument};

use itam_core::result::AppResult;
use itam_core::traits::{ApiTransport, Service};
use itam_entity::insurance::InsurancePolicy;

use crate::reply::fetch_list;

/// Lists insurance policies.
#[derive(Debug, Clone)]
pub struct InsuranceService {
    /// API transport.
    transport: Arc<dyn ApiTransport>,
    /// Aborts in-flight requests.
    cancel: CancellationToken,
}

impl InsuranceService {
    /// Creates a new insurance service.
    pub fn new(transport: Arc<dyn ApiTransport>, cancel: CancellationToken) -> Self {
        Self { transport, cancel }
    }

    /// Every policy.
    #[instrument(skip(self))]
    pub async fn list(&self) -> AppResult<Vec<InsurancePolicy>> {
        let policies: Vec<InsurancePolicy> = fetch_list(
            self.transport.as_ref(),
            &InsurancePolicy::list_endpoint(),
            &self.cancel,
        )
        .await?;
        debug!(count = policies.len(), "Insurance policies fetched");
        Ok(policies)
    }

    /// Policies lapsing within `days` of `today`, soonest first.
    pub async fn expiring_within(
        &self,
        today: NaiveDate,
        days: i64,
    ) -> AppResult<Vec<InsurancePolicy>> {
        let mut expiring: Vec<InsurancePolicy> = self
            .list()
            .await?
            .into_iter()
            .filter(|p| p.days_remaining(today).is_some_and(|left| (0..=days).contains(&left)))
            .collect();
        expiring.sort_by_key(|p| p.end_date);
        Ok(expiring)
    }
}

impl Service for InsuranceService {}
