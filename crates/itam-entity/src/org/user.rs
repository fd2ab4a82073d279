//! Employee entity model.

use itam_core::traits::{Keyed, OrgScoped};
use itam_core::types::id::opt_id;
use itam_core::types::{CompanyId, DepartmentId, UnitId, UserId};
use serde::{Deserialize, Serialize};

use crate::serde_helpers::opt_text;

/// An employee. Follows the same optionality rule as [`super::Unit`]:
/// always in a company, optionally in a department and/or unit.
///
/// The user listing is denormalized: each row repeats the names of its
/// company, department, and unit.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    /// Unique employee identifier.
    #[serde(alias = "user_id")]
    pub id: UserId,
    /// Given name.
    #[serde(default)]
    pub first_name: String,
    /// Family name.
    #[serde(default)]
    pub last_name: String,
    /// Work email.
    #[serde(default, with = "opt_text")]
    pub email: Option<String>,
    /// Company.
    pub company_id: CompanyId,
    /// Department, when assigned.
    #[serde(default, with = "opt_id")]
    pub department_id: Option<DepartmentId>,
    /// Unit, when assigned.
    #[serde(default, with = "opt_id")]
    pub unit_id: Option<UnitId>,
    /// Denormalized company name.
    #[serde(default, with = "opt_text")]
    pub company_name: Option<String>,
    /// Denormalized department name.
    #[serde(default, with = "opt_text")]
    pub department_name: Option<String>,
    /// Denormalized unit name.
    #[serde(default, with = "opt_text")]
    pub unit_name: Option<String>,
}

impl User {
    /// Create an employee record.
    pub fn new(
        id: UserId,
        first_name: impl Into<String>,
        last_name: impl Into<String>,
        company_id: CompanyId,
        department_id: Option<DepartmentId>,
        unit_id: Option<UnitId>,
    ) -> Self {
        Self {
            id,
            first_name: first_name.into(),
            last_name: last_name.into(),
            email: None,
            company_id,
            department_id,
            unit_id,
            company_name: None,
            department_name: None,
            unit_name: None,
        }
    }

    /// Attach the denormalized department name.
    pub fn with_department_name(mut self, name: impl Into<String>) -> Self {
        self.department_name = Some(name.into());
        self
    }

    /// Attach the denormalized unit name.
    pub fn with_unit_name(mut self, name: impl Into<String>) -> Self {
        self.unit_name = Some(name.into());
        self
    }

    /// `First Last`, trimmed.
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name.trim(), self.last_name.trim())
            .trim()
            .to_string()
    }
}

impl Keyed for User {
    type Key = UserId;

    fn key(&self) -> UserId {
        self.id
    }
}

impl OrgScoped for User {
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
        Some(self.id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_full_name_trims() {
        let user: User = serde_json::from_str(
            r#"{"id":1,"first_name":"Ana ","last_name":"Cruz","company_id":"1","unit_id":null}"#,
        )
        .expect("user");
        assert_eq!(user.full_name(), "Ana Cruz");
        assert_eq!(user.unit_id, None);
    }
}
