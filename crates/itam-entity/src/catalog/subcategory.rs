//! Subcategory entity model.

use itam_core::traits::{ChildOf, Keyed, Labeled};
use itam_core::types::{CategoryId, SubcategoryId};
use serde::{Deserialize, Serialize};
use validator::Validate;

/// A subcategory. Belongs to exactly one category.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Subcategory {
    /// Unique subcategory identifier.
    #[serde(alias = "sub_category_id")]
    pub id: SubcategoryId,
    /// Owning category.
    pub category_id: CategoryId,
    /// Subcategory name.
    #[serde(alias = "sub_category_name")]
    pub name: String,
}

impl Keyed for Subcategory {
    type Key = SubcategoryId;

    fn key(&self) -> SubcategoryId {
        self.id
    }
}

impl ChildOf<CategoryId> for Subcategory {
    fn parent(&self) -> Option<CategoryId> {
        Some(self.category_id)
    }
}

impl Labeled for Subcategory {
    fn label(&self) -> &str {
        &self.name
    }
}

/// Form payload for creating a subcategory.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct NewSubcategory {
    /// Owning category.
    pub category_id: CategoryId,
    /// Subcategory name.
    #[validate(length(min = 1, max = 100, message = "Subcategory name is required"))]
    pub sub_category_name: String,
}
