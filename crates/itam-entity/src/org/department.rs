//! Department entity model.

use itam_core::traits::{ChildOf, Keyed, Labeled};
use itam_core::types::{CompanyId, DepartmentId};
use serde::{Deserialize, Serialize};

/// A department. Belongs to exactly one company.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Department {
    /// Unique department identifier.
    #[serde(alias = "department_id")]
    pub id: DepartmentId,
    /// Owning company.
    pub company_id: CompanyId,
    /// Department name.
    #[serde(alias = "department_name")]
    pub name: String,
}

impl Keyed for Department {
    type Key = DepartmentId;

    fn key(&self) -> DepartmentId {
        self.id
    }
}

impl ChildOf<CompanyId> for Department {
    fn parent(&self) -> Option<CompanyId> {
        Some(self.company_id)
    }
}

impl Labeled for Department {
    fn label(&self) -> &str {
        &self.name
    }
}
