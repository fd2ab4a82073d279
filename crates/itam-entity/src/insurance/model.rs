//! Insurance policy model.

use chrono::NaiveDate;
use itam_core::request::Endpoint;
use itam_core::types::id::opt_id;
use itam_core::types::{AssetId, InsurancePolicyId};
use serde::{Deserialize, Serialize};

use crate::serde_helpers::{opt_date, opt_number, opt_text};

/// An insurance policy covering one or more assets.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InsurancePolicy {
    /// Unique policy identifier.
    #[serde(alias = "insurance_id", alias = "policy_id")]
    pub id: InsurancePolicyId,
    /// Policy number issued by the insurer.
    #[serde(default)]
    pub policy_number: String,
    /// Insurer name.
    #[serde(alias = "insurance_provider", default, with = "opt_text")]
    pub provider: Option<String>,
    /// Covered asset, when the policy is per-asset.
    #[serde(default, with = "opt_id")]
    pub asset_id: Option<AssetId>,
    /// Coverage amount.
    #[serde(default, with = "opt_number")]
    pub coverage_amount: Option<f64>,
    /// Premium.
    #[serde(default, with = "opt_number")]
    pub premium: Option<f64>,
    /// First covered day.
    #[serde(default, with = "opt_date")]
    pub start_date: Option<NaiveDate>,
    /// Last covered day.
    #[serde(default, with = "opt_date")]
    pub end_date: Option<NaiveDate>,
}

impl InsurancePolicy {
    /// The list endpoint.
    pub fn list_endpoint() -> Endpoint {
        Endpoint::action_only("insurance", "getAll")
    }

    /// Whether the policy covers `today` (open bounds count as covered).
    pub fn is_active(&self, today: NaiveDate) -> bool {
        self.start_date.is_none_or(|start| start <= today)
            && self.end_date.is_none_or(|end| today <= end)
    }

    /// Days until the policy lapses, negative when already lapsed.
    pub fn days_remaining(&self, today: NaiveDate) -> Option<i64> {
        self.end_date.map(|end| (end - today).num_days())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_active_window() {
        let policy: InsurancePolicy = serde_json::from_value(serde_json::json!({
            "insurance_id": "1", "policy_number": "P-1",
            "start_date": "2024-01-01", "end_date": "2024-12-31"
        }))
        .expect("policy");
        let mid = NaiveDate::from_ymd_opt(2024, 6, 1).expect("date");
        let after = NaiveDate::from_ymd_opt(2025, 1, 1).expect("date");
        assert!(policy.is_active(mid));
        assert!(!policy.is_active(after));
        assert_eq!(policy.days_remaining(after), Some(-1));
    }
}
