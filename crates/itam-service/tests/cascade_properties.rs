//! Properties of the cascading filter engine and selection state.

mod common;

use itam_core::types::{
    AssetTypeId, CategoryId, CompanyId, DepartmentId, SubcategoryId, UnitId, UserId,
};
use itam_entity::org::Department;
use itam_entity::transaction::BorrowRecord;
use itam_service::cascade::{
    CatalogPath, CatalogSelection, OrgPath, OrgSelection, department_options,
    departments_from_users, filter_transactions, filter_users, unit_options,
};

use common::{COMPANY_A, COMPANY_B, HR, UNIT_X, borrow_row, user};

#[test]
fn parent_change_resets_every_lower_org_level() {
    let mut sel = OrgSelection::default();
    sel.select_company(Some(COMPANY_A));
    sel.select_department(Some(HR));
    sel.select_unit(Some(UnitId::new(3)));
    sel.select_user(Some(UserId::new(4)));

    assert!(sel.select_company(Some(COMPANY_B)));
    assert_eq!(sel.company(), Some(COMPANY_B));
    assert_eq!(sel.department(), None);
    assert_eq!(sel.unit(), None);
    assert_eq!(sel.user(), None);

    sel.select_department(Some(DepartmentId::new(11)));
    sel.select_unit(Some(UnitId::new(3)));
    assert!(sel.select_department(Some(DepartmentId::new(12))));
    assert_eq!(sel.unit(), None);
}

#[test]
fn parent_change_resets_every_lower_catalog_level() {
    let mut sel = CatalogSelection::default();
    sel.select_category(Some(CategoryId::new(1)));
    sel.select_subcategory(Some(SubcategoryId::new(5)));
    sel.select_asset_type(Some(AssetTypeId::new(7)));

    assert!(sel.select_subcategory(Some(SubcategoryId::new(6))));
    assert_eq!(sel.category(), Some(CategoryId::new(1)));
    assert_eq!(sel.asset_type(), None);

    sel.select_asset_type(Some(AssetTypeId::new(7)));
    assert!(sel.select_category(Some(CategoryId::new(2))));
    assert_eq!(sel.subcategory(), None);
    assert_eq!(sel.asset_type(), None);
}

#[test]
fn child_options_are_exactly_the_children_of_the_parent() {
    let departments: Vec<Department> = (1..=6)
        .map(|i| Department {
            id: DepartmentId::new(i),
            company_id: CompanyId::new(i % 3),
            name: format!("D{i}"),
        })
        .collect();

    for company in 0..3 {
        let parent = CompanyId::new(company);
        let got: Vec<DepartmentId> = department_options(&departments, Some(parent))
            .iter()
            .map(|d| d.id)
            .collect();
        let want: Vec<DepartmentId> = departments
            .iter()
            .filter(|d| d.company_id == parent)
            .map(|d| d.id)
            .collect();
        assert_eq!(got, want);
    }

    assert!(department_options(&departments, None).is_empty());
    assert!(unit_options(&common::units(), None, None).is_empty());
}

#[test]
fn filter_is_the_conjunction_of_selected_levels() {
    let records: Vec<BorrowRecord> = [
        borrow_row(
            1,
            COMPANY_A,
            Some(HR),
            None,
            CategoryId::new(1),
            Some(SubcategoryId::new(5)),
        ),
        borrow_row(2, COMPANY_B, None, Some(UNIT_X), CategoryId::new(2), None),
        borrow_row(3, COMPANY_A, Some(HR), None, CategoryId::new(2), None),
    ]
    .into_iter()
    .map(|row| serde_json::from_value(row).expect("borrow row"))
    .collect();

    let org = OrgPath {
        company: Some(COMPANY_A),
        department: Some(HR),
        ..OrgPath::default()
    };
    let catalog = CatalogPath {
        category: Some(CategoryId::new(1)),
        subcategory: Some(SubcategoryId::new(5)),
        ..CatalogPath::default()
    };

    let ids: Vec<i64> = filter_transactions(&records, &org, &catalog)
        .iter()
        .map(|r| r.id.get())
        .collect();
    // 1 matches every level, 2 matches none, 3 matches only the org path.
    assert_eq!(ids, vec![1]);

    let all = filter_transactions(&records, &OrgPath::default(), &CatalogPath::default());
    assert_eq!(all.len(), 3);
}

#[test]
fn department_selection_excludes_records_without_a_department() {
    let users = vec![
        user(1, COMPANY_B, None, Some(UNIT_X)),
        user(2, COMPANY_B, Some(DepartmentId::new(30)), None),
    ];

    let by_company = filter_users(&users, &OrgPath::company(COMPANY_B));
    assert_eq!(by_company.len(), 2);

    let by_department = filter_users(
        &users,
        &OrgPath {
            company: Some(COMPANY_B),
            department: Some(DepartmentId::new(30)),
            ..OrgPath::default()
        },
    );
    assert_eq!(by_department.len(), 1);
    assert_eq!(by_department[0].id, UserId::new(2));
}

#[test]
fn derived_department_options_are_deduplicated() {
    let users: Vec<_> = (1..=10)
        .map(|i| user(i, COMPANY_A, Some(HR), None).with_department_name("HR"))
        .chain([user(11, COMPANY_A, Some(DepartmentId::new(11)), None).with_department_name("IT")])
        .collect();

    let options = departments_from_users(&users, Some(COMPANY_A));
    let ids: Vec<DepartmentId> = options.iter().map(|d| d.id).collect();
    assert_eq!(ids, vec![HR, DepartmentId::new(11)]);
    assert_eq!(options[0].name, "HR");

    assert!(departments_from_users(&users, None).is_empty());
}
