//! Flat lookup lists: asset condition, lifecycle status, repair urgency.

use itam_core::traits::{Keyed, Labeled};
use itam_core::types::{ConditionId, StatusId, UrgencyId};
use serde::{Deserialize, Serialize};

/// Physical condition of an asset (e.g. "Good", "Defective").
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Condition {
    /// Unique condition identifier.
    #[serde(alias = "asset_condition_id", alias = "condition_id")]
    pub id: ConditionId,
    /// Condition name.
    #[serde(alias = "asset_condition_name", alias = "condition_name")]
    pub name: String,
}

/// Lifecycle status of an asset (e.g. "Available", "Borrowed").
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Status {
    /// Unique status identifier.
    #[serde(alias = "status_id")]
    pub id: StatusId,
    /// Status name.
    #[serde(alias = "status_name")]
    pub name: String,
}

/// Urgency level for repair requests.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Urgency {
    /// Unique urgency identifier.
    #[serde(alias = "urgency_id")]
    pub id: UrgencyId,
    /// Urgency name.
    #[serde(alias = "urgency_level", alias = "urgency_name")]
    pub name: String,
}

macro_rules! keyed_lookup {
    ($ty:ty, $key:ty) => {
        impl Keyed for $ty {
            type Key = $key;

            fn key(&self) -> $key {
                self.id
            }
        }

        impl Labeled for $ty {
            fn label(&self) -> &str {
                &self.name
            }
        }
    };
}

keyed_lookup!(Condition, ConditionId);
keyed_lookup!(Status, StatusId);
keyed_lookup!(Urgency, UrgencyId);
