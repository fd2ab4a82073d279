//! Selection state for one form session.
//!
//! Setters reset every lower level when a level changes to a different
//! value. Re-selecting the current value is a no-op.

use serde::{Deserialize, Serialize};

use itam_core::types::{
    AssetId, AssetTypeId, CategoryId, CompanyId, DepartmentId, SubcategoryId, UnitId, UserId,
};

use super::catalog::CatalogPath;
use super::org::OrgPath;

/// Current choice at each organization level.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrgSelection {
    company: Option<CompanyId>,
    department: Option<DepartmentId>,
    unit: Option<UnitId>,
    user: Option<UserId>,
}

impl OrgSelection {
    /// Selected company.
    pub fn company(&self) -> Option<CompanyId> {
        self.company
    }

    /// Selected department.
    pub fn department(&self) -> Option<DepartmentId> {
        self.department
    }

    /// Selected unit.
    pub fn unit(&self) -> Option<UnitId> {
        self.unit
    }

    /// Selected employee.
    pub fn user(&self) -> Option<UserId> {
        self.user
    }

    /// Choose a company. Returns whether the selection changed.
    pub fn select_company(&mut self, company: Option<CompanyId>) -> bool {
        if self.company == company {
            return false;
        }
        self.company = company;
        self.department = None;
        self.unit = None;
        self.user = None;
        true
    }

    /// Choose a department. Returns whether the selection changed.
    pub fn select_department(&mut self, department: Option<DepartmentId>) -> bool {
        if self.department == department {
            return false;
        }
        self.department = department;
        self.unit = None;
        self.user = None;
        true
    }

    /// Choose a unit. Returns whether the selection changed.
    pub fn select_unit(&mut self, unit: Option<UnitId>) -> bool {
        if self.unit == unit {
            return false;
        }
        self.unit = unit;
        self.user = None;
        true
    }

    /// Choose an employee. Returns whether the selection changed.
    pub fn select_user(&mut self, user: Option<UserId>) -> bool {
        if self.user == user {
            return false;
        }
        self.user = user;
        true
    }

    /// Drop every choice.
    pub fn clear(&mut self) {
        *self = Self::default();
    }

    /// The selection as a filter path.
    pub fn path(&self) -> OrgPath {
        OrgPath {
            company: self.company,
            department: self.department,
            unit: self.unit,
            user: self.user,
        }
    }
}

/// Current choice at each catalog level.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogSelection {
    category: Option<CategoryId>,
    subcategory: Option<SubcategoryId>,
    asset_type: Option<AssetTypeId>,
    asset: Option<AssetId>,
}

impl CatalogSelection {
    /// Selected category.
    pub fn category(&self) -> Option<CategoryId> {
        self.category
    }

    /// Selected subcategory.
    pub fn subcategory(&self) -> Option<SubcategoryId> {
        self.subcategory
    }

    /// Selected type.
    pub fn asset_type(&self) -> Option<AssetTypeId> {
        self.asset_type
    }

    /// Selected asset.
    pub fn asset(&self) -> Option<AssetId> {
        self.asset
    }

    /// Choose a category. Returns whether the selection changed.
    pub fn select_category(&mut self, category: Option<CategoryId>) -> bool {
        if self.category == category {
            return false;
        }
        self.category = category;
        self.subcategory = None;
        self.asset_type = None;
        self.asset = None;
        true
    }

    /// Choose a subcategory. Returns whether the selection changed.
    pub fn select_subcategory(&mut self, subcategory: Option<SubcategoryId>) -> bool {
        if self.subcategory == subcategory {
            return false;
        }
        self.subcategory = subcategory;
        self.asset_type = None;
        self.asset = None;
        true
    }

    /// Choose a type. Returns whether the selection changed.
    pub fn select_asset_type(&mut self, asset_type: Option<AssetTypeId>) -> bool {
        if self.asset_type == asset_type {
            return false;
        }
        self.asset_type = asset_type;
        self.asset = None;
        true
    }

    /// Choose an asset. Returns whether the selection changed.
    pub fn select_asset(&mut self, asset: Option<AssetId>) -> bool {
        if self.asset == asset {
            return false;
        }
        self.asset = asset;
        true
    }

    /// Drop every choice.
    pub fn clear(&mut self) {
        *self = Self::default();
    }

    /// The selection as a filter path.
    pub fn path(&self) -> CatalogPath {
        CatalogPath {
            category: self.category,
            subcategory: self.subcategory,
            asset_type: self.asset_type,
            asset: self.asset,
        }
    }
}

/// A user input that changes one selection level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "level", content = "id", rename_all = "snake_case")]
pub enum SelectionEvent {
    /// Company dropdown changed.
    Company(Option<CompanyId>),
    /// Department dropdown changed.
    Department(Option<DepartmentId>),
    /// Unit dropdown changed.
    Unit(Option<UnitId>),
    /// Employee dropdown changed.
    User(Option<UserId>),
    /// Category dropdown changed.
    Category(Option<CategoryId>),
    /// Subcategory dropdown changed.
    Subcategory(Option<SubcategoryId>),
    /// Type dropdown changed.
    AssetType(Option<AssetTypeId>),
    /// Asset dropdown changed.
    Asset(Option<AssetId>),
    /// Form reset or submitted.
    Reset,
}

/// Both hierarchies of a transaction form.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FormSelection {
    /// Employee side.
    pub org: OrgSelection,
    /// Asset side.
    pub catalog: CatalogSelection,
}

impl FormSelection {
    /// Apply one event. Returns whether anything changed.
    pub fn apply(&mut self, event: SelectionEvent) -> bool {
        match event {
            SelectionEvent::Company(id) => self.org.select_company(id),
            SelectionEvent::Department(id) => self.org.select_department(id),
            SelectionEvent::Unit(id) => self.org.select_unit(id),
            SelectionEvent::User(id) => self.org.select_user(id),
            SelectionEvent::Category(id) => self.catalog.select_category(id),
            SelectionEvent::Subcategory(id) => self.catalog.select_subcategory(id),
            SelectionEvent::AssetType(id) => self.catalog.select_asset_type(id),
            SelectionEvent::Asset(id) => self.catalog.select_asset(id),
            SelectionEvent::Reset => {
                let changed = *self != Self::default();
                *self = Self::default();
                changed
            }
        }
    }

    /// Reducer form of [`Self::apply`].
    pub fn reduce(mut self, event: SelectionEvent) -> Self {
        self.apply(event);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reselecting_same_company_keeps_children() {
        let mut sel = OrgSelection::default();
        sel.select_company(Some(CompanyId::new(1)));
        sel.select_department(Some(DepartmentId::new(4)));

        assert!(!sel.select_company(Some(CompanyId::new(1))));
        assert_eq!(sel.department(), Some(DepartmentId::new(4)));
    }

    #[test]
    fn test_unit_change_resets_user_only() {
        let mut sel = OrgSelection::default();
        sel.select_company(Some(CompanyId::new(1)));
        sel.select_department(Some(DepartmentId::new(4)));
        sel.select_unit(Some(UnitId::new(2)));
        sel.select_user(Some(UserId::new(9)));

        assert!(sel.select_unit(Some(UnitId::new(3))));
        assert_eq!(sel.user(), None);
        assert_eq!(sel.department(), Some(DepartmentId::new(4)));
    }

    #[test]
    fn test_clearing_category_resets_children() {
        let mut sel = CatalogSelection::default();
        sel.select_category(Some(CategoryId::new(1)));
        sel.select_subcategory(Some(SubcategoryId::new(2)));
        sel.select_asset_type(Some(AssetTypeId::new(3)));

        assert!(sel.select_category(None));
        assert_eq!(sel.path(), CatalogPath::default());
    }

    #[test]
    fn test_reducer_keeps_hierarchies_independent() {
        let state = FormSelection::default()
            .reduce(SelectionEvent::Company(Some(CompanyId::new(1))))
            .reduce(SelectionEvent::Category(Some(CategoryId::new(2))))
            .reduce(SelectionEvent::Subcategory(Some(SubcategoryId::new(5))))
            .reduce(SelectionEvent::Company(Some(CompanyId::new(3))));

        assert_eq!(state.org.company(), Some(CompanyId::new(3)));
        assert_eq!(state.catalog.subcategory(), Some(SubcategoryId::new(5)));
    }

    #[test]
    fn test_reset_event() {
        let mut state = FormSelection::default();
        assert!(!state.apply(SelectionEvent::Reset));
        state.apply(SelectionEvent::Asset(Some(AssetId::new(1))));
        assert!(state.apply(SelectionEvent::Reset));
        assert_eq!(state, FormSelection::default());
    }
}
