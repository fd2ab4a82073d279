//! Shared fixtures for the service integration tests.

#![allow(dead_code)]

use std::sync::Arc;

use serde_json::{Value, json};

use itam_client::MemoryTransport;
use itam_core::types::{
    AssetId, AssetTypeId, CategoryId, CompanyId, DepartmentId, SubcategoryId, UnitId, UserId,
};
use itam_entity::org::{Company, Department, Unit, User};
use itam_service::reference::Lookup;

pub const COMPANY_A: CompanyId = CompanyId::new(1);
pub const COMPANY_B: CompanyId = CompanyId::new(2);
pub const HR: DepartmentId = DepartmentId::new(10);
pub const UNIT_X: UnitId = UnitId::new(20);
pub const UNIT_Y: UnitId = UnitId::new(21);

/// Company A has one department ("HR") and no direct units. Company B
/// has no departments and two direct units ("X", "Y").
pub fn companies() -> Vec<Company> {
    vec![
        Company {
            id: COMPANY_A,
            name: "A".to_string(),
        },
        Company {
            id: COMPANY_B,
            name: "B".to_string(),
        },
    ]
}

pub fn departments() -> Vec<Department> {
    vec![Department {
        id: HR,
        company_id: COMPANY_A,
        name: "HR".to_string(),
    }]
}

pub fn units() -> Vec<Unit> {
    vec![
        Unit {
            id: UNIT_X,
            company_id: COMPANY_B,
            department_id: None,
            name: "X".to_string(),
        },
        Unit {
            id: UNIT_Y,
            company_id: COMPANY_B,
            department_id: None,
            name: "Y".to_string(),
        },
    ]
}

pub fn user(
    id: i64,
    company: CompanyId,
    department: Option<DepartmentId>,
    unit: Option<UnitId>,
) -> User {
    User::new(
        UserId::new(id),
        "Test",
        format!("User {id}"),
        company,
        department,
        unit,
    )
}

fn rows<T: serde::Serialize>(items: &[T]) -> Vec<Value> {
    items
        .iter()
        .map(|item| serde_json::to_value(item).expect("fixture row"))
        .collect()
}

/// A memory transport seeded with the two-company fixture plus a small
/// catalog.
pub fn seeded_transport() -> Arc<MemoryTransport> {
    let transport = MemoryTransport::new();
    transport.set_rows(&Lookup::Company.endpoint(), rows(&companies()));
    transport.set_rows(&Lookup::Department.endpoint(), rows(&departments()));
    transport.set_rows(&Lookup::Unit.endpoint(), rows(&units()));
    transport.set_rows(
        &Lookup::User.endpoint(),
        rows(&[
            user(1, COMPANY_A, Some(HR), None).with_department_name("HR"),
            user(2, COMPANY_B, None, Some(UNIT_X)).with_unit_name("X"),
        ]),
    );
    transport.set_rows(
        &Lookup::Category.endpoint(),
        vec![
            json!({"id": 1, "name": "Internal"}),
            json!({"id": 2, "name": "External"}),
        ],
    );
    transport.set_rows(
        &Lookup::Subcategory.endpoint(),
        vec![
            json!({"id": 5, "category_id": 1, "name": "Computers"}),
            json!({"id": 6, "category_id": 2, "name": "Rentals"}),
        ],
    );
    transport.set_rows(
        &Lookup::AssetType.endpoint(),
        vec![json!({"id": 7, "name": "Laptop"}), json!({"id": 8, "name": "Desktop"})],
    );
    transport.set_rows(
        &Lookup::MappedType.endpoint(),
        vec![json!({"map_id": 1, "sub_category_id": 5, "type_id": 8})],
    );
    Arc::new(transport)
}

/// A borrow row as the server sends it.
pub fn borrow_row(
    id: i64,
    company: CompanyId,
    department: Option<DepartmentId>,
    unit: Option<UnitId>,
    category: CategoryId,
    subcategory: Option<SubcategoryId>,
) -> Value {
    json!({
        "id": id,
        "company_id": company,
        "department_id": department,
        "unit_id": unit,
        "user_id": UserId::new(id * 10),
        "category_id": category,
        "sub_category_id": subcategory,
        "type_id": Option::<AssetTypeId>::None,
        "asset_id": AssetId::new(id * 100),
        "status": "Borrowed"
    })
}
