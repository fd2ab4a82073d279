//! Asset entity model and its forms.

use chrono::NaiveDate;
use itam_core::traits::{CatalogScoped, Keyed, RemoteResource};
use itam_core::types::id::opt_id;
use itam_core::types::{AssetId, AssetTypeId, CategoryId, ConditionId, StatusId, SubcategoryId};
use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationError};

use crate::serde_helpers::{opt_date, opt_number, opt_text};

/// A tracked piece of hardware.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Asset {
    /// Unique asset identifier.
    #[serde(alias = "asset_id")]
    pub id: AssetId,
    /// Display name.
    #[serde(alias = "name", default)]
    pub asset_name: String,
    /// Manufacturer serial number (natural key).
    #[serde(default)]
    pub serial_number: String,
    /// Brand.
    #[serde(default, with = "opt_text")]
    pub brand: Option<String>,
    /// Model.
    #[serde(default, with = "opt_text")]
    pub model: Option<String>,
    /// Category.
    pub category_id: CategoryId,
    /// Subcategory, when classified that far.
    #[serde(default, with = "opt_id")]
    pub sub_category_id: Option<SubcategoryId>,
    /// Type, when classified that far.
    #[serde(default, with = "opt_id")]
    pub type_id: Option<AssetTypeId>,
    /// Lifecycle status.
    #[serde(default, with = "opt_id")]
    pub status_id: Option<StatusId>,
    /// Physical condition.
    #[serde(default, with = "opt_id")]
    pub asset_condition_id: Option<ConditionId>,
    /// Purchase date.
    #[serde(default, with = "opt_date")]
    pub purchase_date: Option<NaiveDate>,
    /// Warranty end date.
    #[serde(default, with = "opt_date")]
    pub warranty_expiry: Option<NaiveDate>,
    /// Purchase price.
    #[serde(default, with = "opt_number")]
    pub purchase_price: Option<f64>,
    /// Stored image path on the server.
    #[serde(default, with = "opt_text")]
    pub image_path: Option<String>,
    /// Free-text notes.
    #[serde(default, with = "opt_text")]
    pub remarks: Option<String>,
}

impl Asset {
    /// Whether the warranty has lapsed as of `today`.
    pub fn warranty_expired(&self, today: NaiveDate) -> bool {
        self.warranty_expiry.is_some_and(|end| end < today)
    }
}

impl Keyed for Asset {
    type Key = AssetId;

    fn key(&self) -> AssetId {
        self.id
    }
}

impl CatalogScoped for Asset {
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
        Some(self.id)
    }
}

impl RemoteResource for Asset {
    type Id = AssetId;

    const SCRIPT: &'static str = "asset";
    const RESOURCE: &'static str = "asset";
    const LABEL: &'static str = "asset";

    fn id(&self) -> AssetId {
        self.id
    }
}

/// Form payload for registering an asset.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[validate(schema(function = "validate_new_asset_dates"))]
pub struct NewAsset {
    /// Display name.
    #[validate(length(min = 1, max = 150, message = "Asset name is required"))]
    pub asset_name: String,
    /// Serial number.
    #[validate(length(min = 1, max = 100, message = "Serial number is required"))]
    pub serial_number: String,
    /// Brand.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub brand: Option<String>,
    /// Model.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub model: Option<String>,
    /// Category.
    pub category_id: CategoryId,
    /// Subcategory.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sub_category_id: Option<SubcategoryId>,
    /// Type.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub type_id: Option<AssetTypeId>,
    /// Lifecycle status.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status_id: Option<StatusId>,
    /// Physical condition.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub asset_condition_id: Option<ConditionId>,
    /// Purchase date.
    #[serde(default, with = "opt_date", skip_serializing_if = "Option::is_none")]
    pub purchase_date: Option<NaiveDate>,
    /// Warranty end date.
    #[serde(default, with = "opt_date", skip_serializing_if = "Option::is_none")]
    pub warranty_expiry: Option<NaiveDate>,
    /// Purchase price.
    #[validate(range(min = 0.0, message = "Price cannot be negative"))]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub purchase_price: Option<f64>,
    /// Free-text notes.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub remarks: Option<String>,
}

impl NewAsset {
    /// Start a form with the required fields.
    pub fn new(
        asset_name: impl Into<String>,
        serial_number: impl Into<String>,
        category_id: CategoryId,
    ) -> Self {
        Self {
            asset_name: asset_name.into(),
            serial_number: serial_number.into(),
            brand: None,
            model: None,
            category_id,
            sub_category_id: None,
            type_id: None,
            status_id: None,
            asset_condition_id: None,
            purchase_date: None,
            warranty_expiry: None,
            purchase_price: None,
            remarks: None,
        }
    }
}

fn validate_new_asset_dates(form: &NewAsset) -> Result<(), ValidationError> {
    if let (Some(bought), Some(warranty)) = (form.purchase_date, form.warranty_expiry) {
        if warranty < bought {
            return Err(ValidationError::new("warranty_before_purchase")
                .with_message("Warranty cannot end before the purchase date".into()));
        }
    }
    Ok(())
}

/// Partial update for an asset. Unset fields are left untouched.
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
pub struct AssetUpdate {
    /// New display name.
    #[validate(length(min = 1, max = 150, message = "Asset name cannot be blank"))]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub asset_name: Option<String>,
    /// New lifecycle status.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status_id: Option<StatusId>,
    /// New condition.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub asset_condition_id: Option<ConditionId>,
    /// New subcategory.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sub_category_id: Option<SubcategoryId>,
    /// New type.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub type_id: Option<AssetTypeId>,
    /// New remarks.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub remarks: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::validate_form;
    use itam_core::error::ErrorKind;

    #[test]
    fn test_asset_from_loose_row() {
        let asset: Asset = serde_json::from_str(
            r#"{"asset_id":"9","asset_name":"Latitude 5420","serial_number":"SN-9",
                "category_id":"1","sub_category_id":"","type_id":"4",
                "purchase_price":"55000.00","purchase_date":"2023-06-01 00:00:00"}"#,
        )
        .expect("asset");
        assert_eq!(asset.id, AssetId(9));
        assert_eq!(asset.sub_category_id, None);
        assert_eq!(asset.type_id, Some(AssetTypeId(4)));
        assert_eq!(asset.purchase_price, Some(55000.0));
        assert_eq!(asset.purchase_date, NaiveDate::from_ymd_opt(2023, 6, 1));
    }

    #[test]
    fn test_new_asset_requires_serial() {
        let form = NewAsset::new("Monitor", "", CategoryId(1));
        let err = validate_form(&form).unwrap_err();
        assert_eq!(err.kind, ErrorKind::Validation);
        assert!(err.message.contains("serial_number"));
    }

    #[test]
    fn test_new_asset_rejects_warranty_before_purchase() {
        let mut form = NewAsset::new("Monitor", "SN-1", CategoryId(1));
        form.purchase_date = NaiveDate::from_ymd_opt(2024, 5, 1);
        form.warranty_expiry = NaiveDate::from_ymd_opt(2024, 1, 1);
        assert!(validate_form(&form).is_err());
        form.warranty_expiry = NaiveDate::from_ymd_opt(2026, 5, 1);
        assert!(validate_form(&form).is_ok());
    }

    #[test]
    fn test_update_skips_unset_fields() {
        let patch = AssetUpdate {
            status_id: Some(StatusId(2)),
            ..AssetUpdate::default()
        };
        let json = serde_json::to_value(&patch).expect("serialize");
        assert_eq!(json, serde_json::json!({"status_id": 2}));
    }
}
