//! Unit entity model.

use itam_core::traits::{ChildOf, Keyed, Labeled};
use itam_core::types::id::opt_id;
use itam_core::types::{CompanyId, DepartmentId, UnitId};
use serde::{Deserialize, Serialize};

/// A unit. Belongs to one company and, optionally, one department; some
/// companies expose units directly with no department level.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Unit {
    /// Unique unit identifier.
    #[serde(alias = "unit_id")]
    pub id: UnitId,
    /// Owning company.
    pub company_id: CompanyId,
    /// Owning department, if the unit sits under one.
    #[serde(default, with = "opt_id")]
    pub department_id: Option<DepartmentId>,
    /// Unit name.
    #[serde(alias = "unit_name")]
    pub name: String,
}

impl Unit {
    /// Whether the unit hangs directly off its company.
    pub fn is_direct(&self) -> bool {
        self.department_id.is_none()
    }
}

impl Keyed for Unit {
    type Key = UnitId;

    fn key(&self) -> UnitId {
        self.id
    }
}

impl ChildOf<CompanyId> for Unit {
    fn parent(&self) -> Option<CompanyId> {
        Some(self.company_id)
    }
}

impl ChildOf<DepartmentId> for Unit {
    fn parent(&self) -> Option<DepartmentId> {
        self.department_id
    }
}

impl Labeled for Unit {
    fn label(&self) -> &str {
        &self.name
    }
}
