//! Long-term asset issuance to employees.

use chrono::NaiveDate;
use itam_core::traits::{CatalogScoped, OrgScoped, RemoteResource};
use itam_core::types::id::opt_id;
use itam_core::types::{
    AssetId, AssetTypeId, CategoryId, CompanyId, DepartmentId, IssuanceId, SubcategoryId, UnitId,
    UserId,
};
use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationError};

use super::ensure_ordered;
use crate::serde_helpers::{opt_date, opt_text};

/// An issuance record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IssuanceRecord {
    /// Unique issuance identifier.
    #[serde(alias = "issuance_id")]
    pub id: IssuanceId,
    /// Recipient's company.
    pub company_id: CompanyId,
    /// Recipient's department.
    #[serde(default, with = "opt_id")]
    pub department_id: Option<DepartmentId>,
    /// Recipient's unit.
    #[serde(default, with = "opt_id")]
    pub unit_id: Option<UnitId>,
    /// Recipient.
    pub user_id: UserId,
    /// Asset category.
    pub category_id: CategoryId,
    /// Asset subcategory.
    #[serde(default, with = "opt_id")]
    pub sub_category_id: Option<SubcategoryId>,
    /// Asset type.
    #[serde(default, with = "opt_id")]
    pub type_id: Option<AssetTypeId>,
    /// Issued asset.
    pub asset_id: AssetId,
    /// Denormalized asset name.
    #[serde(default, with = "opt_text")]
    pub asset_name: Option<String>,
    /// Denormalized recipient name.
    #[serde(default, with = "opt_text")]
    pub issued_to_name: Option<String>,
    /// Day the asset was issued.
    #[serde(default, with = "opt_date")]
    pub issued_date: Option<NaiveDate>,
    /// Day the asset was pulled back out.
    #[serde(default, with = "opt_date")]
    pub pullout_date: Option<NaiveDate>,
    /// Server status text (e.g. "Issued", "Pulled Out").
    #[serde(default)]
    pub status: String,
    /// Free-text notes.
    #[serde(default, with = "opt_text")]
    pub remarks: Option<String>,
}

impl IssuanceRecord {
    /// Whether the asset is still with the recipient.
    pub fn is_active(&self) -> bool {
        self.pullout_date.is_none()
    }
}

impl OrgScoped for IssuanceRecord {
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

impl CatalogScoped for IssuanceRecord {
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

impl RemoteResource for IssuanceRecord {
    type Id = IssuanceId;

    const SCRIPT: &'static str = "AssetIssuance";
    const RESOURCE: &'static str = "asset_issuance";
    const LABEL: &'static str = "issuance";

    fn id(&self) -> IssuanceId {
        self.id
    }
}

/// Form payload for issuing an asset.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[validate(schema(function = "validate_new_issuance"))]
pub struct NewIssuance {
    /// Recipient's company.
    pub company_id: CompanyId,
    /// Recipient's department.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub department_id: Option<DepartmentId>,
    /// Recipient's unit.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub unit_id: Option<UnitId>,
    /// Recipient.
    pub user_id: UserId,
    /// Asset category.
    pub category_id: CategoryId,
    /// Asset subcategory.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sub_category_id: Option<SubcategoryId>,
    /// Asset type.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub type_id: Option<AssetTypeId>,
    /// Asset being issued.
    pub asset_id: AssetId,
    /// Day of issue.
    #[serde(with = "opt_date")]
    pub issued_date: Option<NaiveDate>,
    /// Free-text notes.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub remarks: Option<String>,
}

fn validate_new_issuance(form: &NewIssuance) -> Result<(), ValidationError> {
    if form.issued_date.is_none() {
        return Err(ValidationError::new("issued_date_required")
            .with_message("Issue date is required".into()));
    }
    Ok(())
}

/// Partial update for an issuance, typically the pull-out.
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
#[validate(schema(function = "validate_issuance_update"))]
pub struct IssuanceUpdate {
    /// Day the asset was pulled out.
    #[serde(
        default,
        with = "opt_date",
        skip_serializing_if = "Option::is_none"
    )]
    pub pullout_date: Option<NaiveDate>,
    /// The record's issue date, used only to check ordering.
    #[serde(skip)]
    pub issued_date: Option<NaiveDate>,
    /// New status text.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    /// New remarks.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub remarks: Option<String>,
}

fn validate_issuance_update(form: &IssuanceUpdate) -> Result<(), ValidationError> {
    ensure_ordered(
        form.issued_date,
        form.pullout_date,
        "pullout_before_issue",
        "Pull-out date cannot be before the issue date",
    )
}
