//! Category entity model.

use itam_core::traits::{Keyed, Labeled};
use itam_core::types::CategoryId;
use serde::{Deserialize, Serialize};
use validator::Validate;

/// Root of the classification hierarchy (e.g. "Internal" vs "External").
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Category {
    /// Unique category identifier.
    #[serde(alias = "category_id")]
    pub id: CategoryId,
    /// Category name.
    #[serde(alias = "category_name")]
    pub name: String,
}

impl Keyed for Category {
    type Key = CategoryId;

    fn key(&self) -> CategoryId {
        self.id
    }
}

impl Labeled for Category {
    fn label(&self) -> &str {
        &self.name
    }
}

/// Form payload for creating a category.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct NewCategory {
    /// Category name.
    #[validate(length(min = 1, max = 100, message = "Category name is required"))]
    pub category_name: String,
}
