//! Reference data load followed by cascading form selection.

mod common;

use std::sync::Arc;

use tokio_util::sync::CancellationToken;

use itam_core::traits::Labeled;
use itam_core::types::{AssetTypeId, CategoryId, SubcategoryId};
use itam_service::ReferenceDataStore;
use itam_service::cascade::{
    FormSelection, SelectionEvent, departments_from_users, units_from_users,
};

use common::{COMPANY_A, COMPANY_B, HR, UNIT_X};

fn names<T: Labeled>(items: &[&T]) -> Vec<String> {
    items.iter().map(|item| item.label().to_string()).collect()
}

#[tokio::test]
async fn company_switch_drives_department_and_unit_options() {
    let transport = common::seeded_transport();
    let store = ReferenceDataStore::new(Arc::clone(&transport) as _, CancellationToken::new());
    let report = store.load().await.unwrap();
    assert!(report.is_complete());

    let data = store.snapshot().await;
    let mut form = FormSelection::default();

    form.apply(SelectionEvent::Company(Some(COMPANY_A)));
    let org = form.org.path();
    assert_eq!(names(&data.department_options(org.company)), vec!["HR"]);
    assert!(data.unit_options(org.company, org.department).is_empty());

    form.apply(SelectionEvent::Department(Some(HR)));
    assert_eq!(form.org.department(), Some(HR));

    form.apply(SelectionEvent::Company(Some(COMPANY_B)));
    assert_eq!(form.org.department(), None);
    assert_eq!(form.org.unit(), None);

    let org = form.org.path();
    assert!(data.department_options(org.company).is_empty());
    assert_eq!(names(&data.unit_options(org.company, org.department)), vec!["X", "Y"]);
}

#[tokio::test]
async fn options_derived_from_users_follow_the_company() {
    let transport = common::seeded_transport();
    let store = ReferenceDataStore::new(Arc::clone(&transport) as _, CancellationToken::new());
    store.load().await.unwrap();
    let data = store.read().await;

    let departments = departments_from_users(&data.users, Some(COMPANY_A));
    assert_eq!(departments.len(), 1);
    assert_eq!(departments[0].id, HR);

    let units = units_from_users(&data.users, Some(COMPANY_B), None);
    assert_eq!(units.len(), 1);
    assert_eq!(units[0].id, UNIT_X);
}

#[tokio::test]
async fn type_options_follow_the_mapping_table() {
    let transport = common::seeded_transport();
    let store = ReferenceDataStore::new(Arc::clone(&transport) as _, CancellationToken::new());
    store.load().await.unwrap();
    let data = store.snapshot().await;

    let mut form = FormSelection::default();
    form.apply(SelectionEvent::Category(Some(CategoryId::new(1))));
    let subcategories = data.subcategory_options(form.catalog.category());
    assert_eq!(names(&subcategories), vec!["Computers"]);

    form.apply(SelectionEvent::Subcategory(Some(SubcategoryId::new(5))));
    let types: Vec<AssetTypeId> = data
        .type_options(form.catalog.subcategory())
        .iter()
        .map(|t| t.id)
        .collect();
    assert_eq!(types, vec![AssetTypeId::new(8)]);

    form.apply(SelectionEvent::AssetType(Some(AssetTypeId::new(8))));
    form.apply(SelectionEvent::Category(Some(CategoryId::new(2))));
    assert_eq!(form.catalog.subcategory(), None);
    assert_eq!(form.catalog.asset_type(), None);
    assert!(data.type_options(form.catalog.subcategory()).is_empty());
}
