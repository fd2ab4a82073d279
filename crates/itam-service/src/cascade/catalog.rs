//! Catalog hierarchy: category → subcategory → type → asset.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use itam_core::traits::CatalogScoped;
use itam_core::types::{AssetId, AssetTypeId, CategoryId, SubcategoryId};
use itam_entity::asset::Asset;
use itam_entity::catalog::{AssetType, MappedType, Subcategory};

use super::engine::{LevelMatch, child_options};

/// A (possibly partial) selection along the catalog path.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogPath {
    /// Selected category.
    pub category: Option<CategoryId>,
    /// Selected subcategory.
    pub subcategory: Option<SubcategoryId>,
    /// Selected type.
    pub asset_type: Option<AssetTypeId>,
    /// Selected asset.
    pub asset: Option<AssetId>,
}

impl CatalogPath {
    /// Path constrained to one category.
    pub fn category(category: CategoryId) -> Self {
        Self {
            category: Some(category),
            ..Self::default()
        }
    }

    /// Per-level comparison, top down.
    pub fn levels<R: CatalogScoped + ?Sized>(&self, record: &R) -> [LevelMatch; 4] {
        [
            LevelMatch::of(self.category, record.category_id()),
            LevelMatch::of(self.subcategory, record.subcategory_id()),
            LevelMatch::of(self.asset_type, record.asset_type_id()),
            LevelMatch::of(self.asset, record.asset_id()),
        ]
    }

    /// Whether the record satisfies every selected level.
    pub fn matches<R: CatalogScoped + ?Sized>(&self, record: &R) -> bool {
        self.levels(record).into_iter().all(LevelMatch::passes)
    }
}

/// Subcategories of the selected category.
pub fn subcategory_options(
    subcategories: &[Subcategory],
    category: Option<CategoryId>,
) -> Vec<&Subcategory> {
    child_options(subcategories, category)
}

/// Types mapped under the selected subcategory, in type-list order and
/// without repeats.
pub fn type_options<'a>(
    types: &'a [AssetType],
    mapped: &[MappedType],
    subcategory: Option<SubcategoryId>,
) -> Vec<&'a AssetType> {
    let reachable: HashSet<AssetTypeId> = child_options(mapped, subcategory)
        .into_iter()
        .map(|m| m.type_id)
        .collect();
    if reachable.is_empty() {
        return Vec::new();
    }

    let mut seen = HashSet::new();
    types
        .iter()
        .filter(|t| reachable.contains(&t.id) && seen.insert(t.id))
        .collect()
}

/// Assets on the selected path.
pub fn filter_assets<'a>(assets: &'a [Asset], path: &CatalogPath) -> Vec<&'a Asset> {
    assets.iter().filter(|asset| path.matches(*asset)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use itam_core::types::MappedTypeId;

    fn asset_type(id: i64, name: &str) -> AssetType {
        AssetType {
            id: AssetTypeId::new(id),
            name: name.to_string(),
        }
    }

    fn mapping(map_id: i64, sub: i64, ty: i64) -> MappedType {
        MappedType {
            map_id: MappedTypeId::new(map_id),
            sub_category_id: SubcategoryId::new(sub),
            type_id: AssetTypeId::new(ty),
        }
    }

    #[test]
    fn test_type_options_follow_mapping() {
        let types = vec![
            asset_type(1, "Laptop"),
            asset_type(2, "Desktop"),
            asset_type(3, "Printer"),
        ];
        let mapped = vec![mapping(1, 10, 3), mapping(2, 10, 1), mapping(3, 11, 2)];

        let names: Vec<_> = type_options(&types, &mapped, Some(SubcategoryId::new(10)))
            .iter()
            .map(|t| t.name.as_str())
            .collect();
        assert_eq!(names, vec!["Laptop", "Printer"]);
    }

    #[test]
    fn test_type_options_dedup_repeated_mappings() {
        let types = vec![asset_type(1, "Laptop")];
        let mapped = vec![mapping(1, 10, 1), mapping(2, 10, 1)];
        assert_eq!(
            type_options(&types, &mapped, Some(SubcategoryId::new(10))).len(),
            1
        );
    }

    #[test]
    fn test_type_options_empty_without_subcategory() {
        let types = vec![asset_type(1, "Laptop")];
        let mapped = vec![mapping(1, 10, 1)];
        assert!(type_options(&types, &mapped, None).is_empty());
    }
}
