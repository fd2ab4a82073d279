//! Traits describing how reference entities and leaf records sit in the
//! organization (company → department → unit → user) and catalog
//! (category → subcategory → type → asset) hierarchies.

use std::hash::Hash;

use crate::types::id::{
    AssetId, AssetTypeId, CategoryId, CompanyId, DepartmentId, SubcategoryId, UnitId, UserId,
};

/// An entity with a unique key.
pub trait Keyed {
    /// Key type.
    type Key: Copy + Eq + Hash;

    /// The entity's key.
    fn key(&self) -> Self::Key;
}

/// An entity that hangs under a parent of key type `P`.
///
/// `None` means the entity does not participate in that level (e.g. a
/// unit attached directly to a company has no department parent).
pub trait ChildOf<P> {
    /// The parent key at this level.
    fn parent(&self) -> Option<P>;
}

/// An entity with a display label.
pub trait Labeled {
    /// The label shown in option lists.
    fn label(&self) -> &str;
}

/// A record positioned on the organization path.
pub trait OrgScoped {
    /// Company the record belongs to.
    fn company_id(&self) -> Option<CompanyId>;
    /// Department, when the record has one.
    fn department_id(&self) -> Option<DepartmentId>;
    /// Unit, when the record has one.
    fn unit_id(&self) -> Option<UnitId>;
    /// Employee, for records that point at a person.
    fn user_id(&self) -> Option<UserId> {
        None
    }
}

/// A record positioned on the catalog path.
pub trait CatalogScoped {
    /// Category the record belongs to.
    fn category_id(&self) -> Option<CategoryId>;
    /// Subcategory, when present.
    fn subcategory_id(&self) -> Option<SubcategoryId>;
    /// Type, when present.
    fn asset_type_id(&self) -> Option<AssetTypeId>;
    /// Asset, for records that point at one.
    fn asset_id(&self) -> Option<AssetId> {
        None
    }
}
