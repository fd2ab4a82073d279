//! Asset type and the subcategory↔type mapping.

use itam_core::traits::{ChildOf, Keyed, Labeled};
use itam_core::types::{AssetTypeId, MappedTypeId, SubcategoryId};
use serde::{Deserialize, Serialize};
use validator::Validate;

/// An asset type (e.g. "Laptop"). Related to subcategories only through
/// [`MappedType`] rows.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AssetType {
    /// Unique type identifier.
    #[serde(alias = "type_id")]
    pub id: AssetTypeId,
    /// Type name.
    #[serde(alias = "type_name")]
    pub name: String,
}

impl Keyed for AssetType {
    type Key = AssetTypeId;

    fn key(&self) -> AssetTypeId {
        self.id
    }
}

impl Labeled for AssetType {
    fn label(&self) -> &str {
        &self.name
    }
}

/// Many-to-many join row between subcategories and types.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MappedType {
    /// Join-row identifier.
    #[serde(alias = "id")]
    pub map_id: MappedTypeId,
    /// Subcategory side.
    pub sub_category_id: SubcategoryId,
    /// Type side.
    pub type_id: AssetTypeId,
}

impl Keyed for MappedType {
    type Key = MappedTypeId;

    fn key(&self) -> MappedTypeId {
        self.map_id
    }
}

impl ChildOf<SubcategoryId> for MappedType {
    fn parent(&self) -> Option<SubcategoryId> {
        Some(self.sub_category_id)
    }
}

/// Form payload for mapping a type under a subcategory.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct NewMappedType {
    /// Subcategory side.
    pub sub_category_id: SubcategoryId,
    /// Type side.
    pub type_id: AssetTypeId,
}
