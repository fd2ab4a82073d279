//! Borrow/return transactions.

use chrono::NaiveDate;
use itam_core::traits::{CatalogScoped, OrgScoped, RemoteResource};
use itam_core::types::id::opt_id;
use itam_core::types::{
    AssetId, AssetTypeId, BorrowId, CategoryId, CompanyId, ConditionId, DepartmentId,
    SubcategoryId, UnitId, UserId,
};
use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationError};

use super::ensure_ordered;
use crate::serde_helpers::{opt_date, opt_text};

/// Status text the server writes once an asset is back.
pub const STATUS_RETURNED: &str = "Returned";

/// A borrow transaction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BorrowRecord {
    /// Unique transaction identifier.
    #[serde(alias = "borrow_id")]
    pub id: BorrowId,
    /// Borrower's company.
    pub company_id: CompanyId,
    /// Borrower's department.
    #[serde(default, with = "opt_id")]
    pub department_id: Option<DepartmentId>,
    /// Borrower's unit.
    #[serde(default, with = "opt_id")]
    pub unit_id: Option<UnitId>,
    /// Borrower.
    pub user_id: UserId,
    /// Asset category.
    pub category_id: CategoryId,
    /// Asset subcategory.
    #[serde(default, with = "opt_id")]
    pub sub_category_id: Option<SubcategoryId>,
    /// Asset type.
    #[serde(default, with = "opt_id")]
    pub type_id: Option<AssetTypeId>,
    /// Borrowed asset.
    pub asset_id: AssetId,
    /// Denormalized asset name.
    #[serde(default, with = "opt_text")]
    pub asset_name: Option<String>,
    /// Denormalized borrower name.
    #[serde(default, with = "opt_text")]
    pub borrower_name: Option<String>,
    /// Day the asset left.
    #[serde(default, with = "opt_date")]
    pub borrow_date: Option<NaiveDate>,
    /// Day the asset is due back.
    #[serde(default, with = "opt_date")]
    pub due_date: Option<NaiveDate>,
    /// Day the asset came back.
    #[serde(default, with = "opt_date")]
    pub return_date: Option<NaiveDate>,
    /// Server status text (e.g. "Borrowed", "Returned").
    #[serde(default)]
    pub status: String,
    /// Free-text notes.
    #[serde(default, with = "opt_text")]
    pub remarks: Option<String>,
}

impl BorrowRecord {
    /// Whether the asset has been returned.
    pub fn is_returned(&self) -> bool {
        self.return_date.is_some() || self.status.eq_ignore_ascii_case(STATUS_RETURNED)
    }

    /// Whether the asset is still out past its due date.
    pub fn is_overdue(&self, today: NaiveDate) -> bool {
        !self.is_returned() && self.due_date.is_some_and(|due| due < today)
    }
}

impl OrgScoped for BorrowRecord {
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

impl CatalogScoped for BorrowRecord {
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

impl RemoteResource for BorrowRecord {
    type Id = BorrowId;

    const SCRIPT: &'static str = "BorrowedAssets";
    const RESOURCE: &'static str = "borrowed_assets";
    const LABEL: &'static str = "borrow";

    fn id(&self) -> BorrowId {
        self.id
    }
}

/// Form payload for lending an asset.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[validate(schema(function = "validate_borrow_dates"))]
pub struct NewBorrow {
    /// Borrower's company.
    pub company_id: CompanyId,
    /// Borrower's department.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub department_id: Option<DepartmentId>,
    /// Borrower's unit.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub unit_id: Option<UnitId>,
    /// Borrower.
    pub user_id: UserId,
    /// Asset category.
    pub category_id: CategoryId,
    /// Asset subcategory.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sub_category_id: Option<SubcategoryId>,
    /// Asset type.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub type_id: Option<AssetTypeId>,
    /// Asset being lent.
    pub asset_id: AssetId,
    /// Day the asset leaves.
    #[serde(with = "opt_date")]
    pub borrow_date: Option<NaiveDate>,
    /// Day it is due back.
    #[serde(with = "opt_date")]
    pub due_date: Option<NaiveDate>,
    /// Free-text notes.
    #[validate(length(max = 500, message = "Remarks are limited to 500 characters"))]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub remarks: Option<String>,
}

fn validate_borrow_dates(form: &NewBorrow) -> Result<(), ValidationError> {
    if form.borrow_date.is_none() {
        return Err(ValidationError::new("borrow_date_required")
            .with_message("Borrow date is required".into()));
    }
    ensure_ordered(
        form.borrow_date,
        form.due_date,
        "due_before_borrow",
        "Due date cannot be before the borrow date",
    )
}

/// Partial update for a borrow, typically the return.
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
pub struct BorrowUpdate {
    /// Day the asset came back.
    #[serde(
        default,
        with = "opt_date",
        skip_serializing_if = "Option::is_none"
    )]
    pub return_date: Option<NaiveDate>,
    /// New status text.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    /// Condition observed on return.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub asset_condition_id: Option<ConditionId>,
    /// New remarks.
    #[validate(length(max = 500, message = "Remarks are limited to 500 characters"))]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub remarks: Option<String>,
}

impl BorrowUpdate {
    /// Mark the borrow returned on the given day.
    pub fn returned_on(day: NaiveDate) -> Self {
        Self {
            return_date: Some(day),
            status: Some(STATUS_RETURNED.to_string()),
            ..Self::default()
        }
    }
}
