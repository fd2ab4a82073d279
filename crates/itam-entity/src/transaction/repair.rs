//! Repair tickets.

use chrono::NaiveDate;
use itam_core::traits::{CatalogScoped, OrgScoped, RemoteResource};
use itam_core::types::id::opt_id;
use itam_core::types::{
    AssetId, AssetTypeId, CategoryId, CompanyId, DepartmentId, RepairId, SubcategoryId, UnitId,
    UrgencyId, UserId,
};
use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationError};

use super::ensure_ordered;
use crate::serde_helpers::{opt_date, opt_number, opt_text};

/// A repair request raised against an asset.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RepairRequest {
    /// Unique ticket identifier.
    #[serde(alias = "repair_id", alias = "repair_request_id")]
    pub id: RepairId,
    /// Requester's company.
    pub company_id: CompanyId,
    /// Requester's department.
    #[serde(default, with = "opt_id")]
    pub department_id: Option<DepartmentId>,
    /// Requester's unit.
    #[serde(default, with = "opt_id")]
    pub unit_id: Option<UnitId>,
    /// Requester.
    pub user_id: UserId,
    /// Asset category.
    pub category_id: CategoryId,
    /// Asset subcategory.
    #[serde(default, with = "opt_id")]
    pub sub_category_id: Option<SubcategoryId>,
    /// Asset type.
    #[serde(default, with = "opt_id")]
    pub type_id: Option<AssetTypeId>,
    /// Asset under repair.
    pub asset_id: AssetId,
    /// Denormalized asset name.
    #[serde(default, with = "opt_text")]
    pub asset_name: Option<String>,
    /// Urgency level.
    #[serde(default, with = "opt_id")]
    pub urgency_id: Option<UrgencyId>,
    /// Problem description.
    #[serde(default, alias = "issue")]
    pub issue_description: String,
    /// Server status text (e.g. "Pending", "In Progress", "Completed").
    #[serde(default)]
    pub status: String,
    /// Day the ticket was raised.
    #[serde(default, with = "opt_date")]
    pub request_date: Option<NaiveDate>,
    /// Day the repair finished.
    #[serde(default, with = "opt_date")]
    pub completed_date: Option<NaiveDate>,
    /// Repair cost.
    #[serde(default, with = "opt_number")]
    pub repair_cost: Option<f64>,
    /// Assigned technician or vendor.
    #[serde(default, with = "opt_text")]
    pub technician: Option<String>,
    /// Free-text notes.
    #[serde(default, with = "opt_text")]
    pub remarks: Option<String>,
}

impl RepairRequest {
    /// Whether the ticket is closed.
    pub fn is_completed(&self) -> bool {
        self.completed_date.is_some() || self.status.eq_ignore_ascii_case("completed")
    }
}

impl OrgScoped for RepairRequest {
    fn company_id(&self) -> Option<CompanyId> {
        Some(self.company_id)
    }

    fn department_id(&self) -> Option<DepartmentId> {
        self.department_id
    }

    fn unit_id(&self) -> Option<UnitId> {
        self.unit_id
    }

    fn user_id(&self) -> Option<UserId> {
        Some(self.user_id)
    }
}

impl CatalogScoped for RepairRequest {
    fn category_id(&self) -> Option<CategoryId> {
        Some(self.category_id)
    }

    fn subcategory_id(&self) -> Option<SubcategoryId> {
        self.sub_category_id
    }

    fn asset_type_id(&self) -> Option<AssetTypeId> {
        self.type_id
    }

    fn asset_id(&self) -> Option<AssetId> {
        Some(self.asset_id)
    }
}

impl RemoteResource for RepairRequest {
    type Id = RepairId;

    const SCRIPT: &'static str = "RepairRequest";
    const RESOURCE: &'static str = "repair_request";
    const LABEL: &'static str = "repair request";

    fn id(&self) -> RepairId {
        self.id
    }
}

/// Form payload for raising a repair ticket.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct NewRepair {
    /// Requester's company.
    pub company_id: CompanyId,
    /// Requester's department.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub department_id: Option<DepartmentId>,
    /// Requester's unit.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub unit_id: Option<UnitId>,
    /// Requester.
    pub user_id: UserId,
    /// Asset category.
    pub category_id: CategoryId,
    /// Asset subcategory.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sub_category_id: Option<SubcategoryId>,
    /// Asset type.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub type_id: Option<AssetTypeId>,
    /// Asset needing repair.
    pub asset_id: AssetId,
    /// Urgency level.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub urgency_id: Option<UrgencyId>,
    /// Problem description.
    #[validate(length(min = 1, max = 1000, message = "Describe the issue"))]
    pub issue_description: String,
    /// Day the ticket is raised.
    #[serde(with = "opt_date")]
    pub request_date: Option<NaiveDate>,
    /// Estimated cost.
    #[validate(range(min = 0.0, message = "Cost cannot be negative"))]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub repair_cost: Option<f64>,
    /// Free-text notes.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub remarks: Option<String>,
}

/// Partial update for a repair ticket.
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
#[validate(schema(function = "validate_repair_update"))]
pub struct RepairUpdate {
    /// New status text.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    /// Final cost.
    #[validate(range(min = 0.0, message = "Cost cannot be negative"))]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub repair_cost: Option<f64>,
    /// Day the repair finished.
    #[serde(
        default,
        with = "opt_date",
        skip_serializing_if = "Option::is_none"
    )]
    pub completed_date: Option<NaiveDate>,
    /// The ticket's original request date, used only to check ordering.
    #[serde(skip)]
    pub request_date: Option<NaiveDate>,
    /// Assigned technician or vendor.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub technician: Option<String>,
    /// New remarks.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub remarks: Option<String>,
}

fn validate_repair_update(form: &RepairUpdate) -> Result<(), ValidationError> {
    ensure_ordered(
        form.request_date,
        form.completed_date,
        "completed_before_request",
        "Completion date cannot be before the request date",
    )
}
