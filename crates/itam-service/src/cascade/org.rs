//! Organization hierarchy: company → department → unit → employee.

use serde::{Deserialize, Serialize};

use itam_core::traits::OrgScoped;
use itam_core::types::{CompanyId, DepartmentId, UnitId, UserId};
use itam_entity::org::{Department, Unit, User};

use super::engine::{LevelMatch, child_options, distinct_by_key};

/// A (possibly partial) selection along the organization path.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrgPath {
    /// Selected company.
    pub company: Option<CompanyId>,
    /// Selected department.
    pub department: Option<DepartmentId>,
    /// Selected unit.
    pub unit: Option<UnitId>,
    /// Selected employee.
    pub user: Option<UserId>,
}

impl OrgPath {
    /// Path constrained to one company.
    pub fn company(company: CompanyId) -> Self {
        Self {
            company: Some(company),
            ..Self::default()
        }
    }

    /// Per-level comparison, top down.
    pub fn levels<R: OrgScoped + ?Sized>(&self, record: &R) -> [LevelMatch; 4] {
        [
            LevelMatch::of(self.company, record.company_id()),
            LevelMatch::of(self.department, record.department_id()),
            LevelMatch::of(self.unit, record.unit_id()),
            LevelMatch::of(self.user, record.user_id()),
        ]
    }

    /// Whether the record satisfies every selected level.
    pub fn matches<R: OrgScoped + ?Sized>(&self, record: &R) -> bool {
        self.levels(record).into_iter().all(LevelMatch::passes)
    }
}

/// Departments of the selected company.
pub fn department_options(
    departments: &[Department],
    company: Option<CompanyId>,
) -> Vec<&Department> {
    child_options(departments, company)
}

/// Units under the selected company and department.
///
/// With a department selected, the units of that department. Without
/// one, the units attached directly to the company. Nothing until a
/// company is chosen.
pub fn unit_options(
    units: &[Unit],
    company: Option<CompanyId>,
    department: Option<DepartmentId>,
) -> Vec<&Unit> {
    child_options(units, company)
        .into_iter()
        .filter(|unit| unit.department_id == department)
        .collect()
}

/// Department options projected from the denormalized user listing.
pub fn departments_from_users(users: &[User], company: Option<CompanyId>) -> Vec<Department> {
    let Some(company) = company else {
        return Vec::new();
    };
    distinct_by_key(
        users
            .iter()
            .filter(|user| user.company_id == company)
            .filter_map(|user| {
                Some(Department {
                    id: user.department_id?,
                    company_id: user.company_id,
                    name: user.department_name.clone().unwrap_or_default(),
                })
            }),
    )
}

/// Unit options projected from the denormalized user listing, with the
/// same department rule as [`unit_options`].
pub fn units_from_users(
    users: &[User],
    company: Option<CompanyId>,
    department: Option<DepartmentId>,
) -> Vec<Unit> {
    let Some(company) = company else {
        return Vec::new();
    };
    distinct_by_key(
        users
            .iter()
            .filter(|user| user.company_id == company && user.department_id == department)
            .filter_map(|user| {
                Some(Unit {
                    id: user.unit_id?,
                    company_id: user.company_id,
                    department_id: user.department_id,
                    name: user.unit_name.clone().unwrap_or_default(),
                })
            }),
    )
}

/// Employees on the selected path.
pub fn filter_users<'a>(users: &'a [User], path: &OrgPath) -> Vec<&'a User> {
    users.iter().filter(|user| path.matches(*user)).collect()
}
