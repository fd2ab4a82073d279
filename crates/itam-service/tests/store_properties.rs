//! Store behaviour against the in-memory server double.

mod common;

use std::sync::Arc;
use std::time::Duration;

use serde_json::json;
use tokio_util::sync::CancellationToken;

use itam_client::MemoryTransport;
use itam_core::config::import::ImportConfig;
use itam_core::error::ErrorKind;
use itam_core::traits::RemoteResource;
use itam_core::types::{AssetId, CategoryId, CompanyId, StatusId};
use itam_entity::asset::{Asset, AssetImportRow, AssetUpdate, NewAsset};
use itam_entity::catalog::NewCategory;
use itam_entity::transaction::BorrowRecord;
use itam_service::{AssetStore, BorrowStore, ReferenceDataStore};

fn asset_store(transport: &Arc<MemoryTransport>) -> AssetStore {
    AssetStore::new(
        Arc::clone(transport) as _,
        ImportConfig::default(),
        CancellationToken::new(),
    )
}

fn borrow(id: i64, company: CompanyId) -> serde_json::Value {
    common::borrow_row(id, company, None, None, CategoryId::new(1), None)
}

fn asset_row(id: i64, serial: &str) -> serde_json::Value {
    json!({
        "id": id,
        "asset_name": format!("Asset {id}"),
        "serial_number": serial,
        "category_id": 1
    })
}

#[tokio::test]
async fn batch_insert_submits_only_rows_with_serials() {
    let transport = Arc::new(MemoryTransport::new());
    let store = asset_store(&transport);

    let row = |serial: Option<&str>, name: &str| AssetImportRow {
        category_id: Some("1".to_string()),
        ..AssetImportRow::new(serial, name)
    };
    let mut first = row(Some("SN-1"), "Laptop");
    first.purchase_date = Some("03/15/2024".to_string());
    let rows = vec![
        first,
        row(None, "No serial"),
        row(Some("SN-2"), "Desktop"),
        row(Some("  "), "Blank serial"),
        row(Some("SN-3"), "Printer"),
    ];

    let outcome = store.insert_many(rows).await.unwrap();
    assert_eq!(outcome.submitted, 3);
    assert_eq!(outcome.dropped, 2);

    let batch_route = "asset.php?resource=asset&action=batchInsert";
    let calls = transport.calls();
    let batch = calls
        .iter()
        .find(|call| call.route == batch_route)
        .expect("batch call");
    let payload = batch.payload.as_ref().and_then(|p| p.as_array()).expect("array");
    assert_eq!(payload.len(), 3);
    assert_eq!(payload[0]["purchase_date"], json!("2024-03-15"));

    // The collection was refetched after the batch.
    let records = store.records().await;
    assert_eq!(records.len(), 3);
    assert_eq!(
        records[0].purchase_date,
        chrono::NaiveDate::from_ymd_opt(2024, 3, 15)
    );
}

#[tokio::test]
async fn batch_without_any_serial_fails_before_the_network() {
    let transport = Arc::new(MemoryTransport::new());
    let store = asset_store(&transport);

    let rows = vec![
        AssetImportRow::new(None, "A"),
        AssetImportRow::new(Some(""), "B"),
    ];
    let err = store.insert_many(rows).await.unwrap_err();
    assert_eq!(err.kind, ErrorKind::EmptyBatch);
    assert_eq!(err.message, "no valid rows");
    assert_eq!(transport.call_count(), 0);
}

#[tokio::test]
async fn insert_replaces_collection_with_fresh_list() {
    let transport = Arc::new(MemoryTransport::new());
    transport.set_rows(&Asset::endpoint(), vec![asset_row(1, "SN-1")]);
    let store = asset_store(&transport);
    store.list().await.unwrap();
    assert_eq!(store.records().await.len(), 1);

    // The server's list changes behind the client's back.
    transport.set_rows(&Asset::endpoint(), vec![asset_row(2, "SN-2")]);

    store
        .insert(&NewAsset::new("Monitor", "SN-3", CategoryId::new(1)))
        .await
        .unwrap();

    let serials: Vec<String> = store
        .records()
        .await
        .into_iter()
        .map(|a| a.serial_number)
        .collect();
    assert_eq!(serials, vec!["SN-2", "SN-3"]);
}

#[tokio::test]
async fn update_replaces_collection_with_fresh_list() {
    let transport = Arc::new(MemoryTransport::new());
    transport.set_rows(&Asset::endpoint(), vec![asset_row(1, "SN-1"), asset_row(2, "SN-2")]);
    let store = asset_store(&transport);
    store.list().await.unwrap();

    let patch = AssetUpdate {
        status_id: Some(StatusId::new(4)),
        ..AssetUpdate::default()
    };
    store.update(Some(AssetId::new(2)), &patch).await.unwrap();

    let records = store.records().await;
    assert_eq!(records.len(), 2);
    assert_eq!(records[1].status_id, Some(StatusId::new(4)));
    assert_eq!(
        transport.calls_to("asset.php?resource=asset&action=update&id=2"),
        1
    );
}

#[tokio::test]
async fn rejected_update_leaves_collection_untouched() {
    let transport = Arc::new(MemoryTransport::new());
    transport.set_rows(&Asset::endpoint(), vec![asset_row(1, "SN-1")]);
    let store = asset_store(&transport);
    store.list().await.unwrap();
    transport.clear_calls();

    let patch = AssetUpdate {
        remarks: Some("moved".to_string()),
        ..AssetUpdate::default()
    };
    let err = store
        .update(Some(AssetId::new(99)), &patch)
        .await
        .unwrap_err();
    assert_eq!(err.kind, ErrorKind::Rejected);
    assert_eq!(transport.call_count(), 1);
    assert_eq!(store.records().await[0].remarks, None);
}

#[tokio::test]
async fn reference_insert_triggers_full_reload() {
    let transport = common::seeded_transport();
    let store = ReferenceDataStore::new(Arc::clone(&transport) as _, CancellationToken::new());
    store.load().await.unwrap();
    assert_eq!(store.read().await.categories.len(), 2);
    transport.clear_calls();

    store
        .insert_category(&NewCategory {
            category_name: "Leased".to_string(),
        })
        .await
        .unwrap();

    assert_eq!(store.read().await.categories.len(), 3);
    // One post plus one GET per lookup.
    assert_eq!(transport.call_count(), 1 + 11);
}

#[tokio::test]
async fn failed_lookup_keeps_previous_list() {
    let transport = common::seeded_transport();
    let store = ReferenceDataStore::new(Arc::clone(&transport) as _, CancellationToken::new());
    store.load().await.unwrap();

    transport.set_reply(&itam_service::reference::Lookup::Unit.endpoint(), json!(null));
    let report = store.load().await.unwrap();

    assert_eq!(report.failed, vec![itam_service::reference::Lookup::Unit]);
    assert_eq!(store.read().await.units.len(), 2);
}

#[tokio::test]
async fn cancelled_store_rejects_load() {
    let transport = common::seeded_transport();
    let cancel = CancellationToken::new();
    let store = ReferenceDataStore::new(Arc::clone(&transport) as _, cancel.child_token());
    cancel.cancel();

    let err = store.load().await.unwrap_err();
    assert!(err.is_cancelled());
    assert!(store.read().await.companies.is_empty());
    assert_eq!(transport.call_count(), 0);
}

#[tokio::test]
async fn cancel_during_reference_request_discards_results() {
    let transport = Arc::new(MemoryTransport::new().with_latency(Duration::from_millis(200)));
    transport.set_rows(
        &itam_service::reference::Lookup::Company.endpoint(),
        vec![json!({"id": 1, "name": "A"})],
    );
    let store = ReferenceDataStore::new(Arc::clone(&transport) as _, CancellationToken::new());

    let task = tokio::spawn({
        let store = store.clone();
        async move { store.load().await }
    });
    tokio::time::sleep(Duration::from_millis(50)).await;
    store.cancel_token().cancel();

    let err = task.await.unwrap().unwrap_err();
    assert!(err.is_cancelled());
    assert!(store.read().await.companies.is_empty());
}

#[tokio::test]
async fn cancel_while_reference_load_waits_for_lock_discards_results() {
    let transport = common::seeded_transport();
    let store = ReferenceDataStore::new(Arc::clone(&transport) as _, CancellationToken::new());

    let guard = store.read().await;
    let task = tokio::spawn({
        let store = store.clone();
        async move { store.load().await }
    });
    tokio::time::sleep(Duration::from_millis(50)).await;
    store.cancel_token().cancel();
    drop(guard);

    let err = task.await.unwrap().unwrap_err();
    assert!(err.is_cancelled());
    assert_eq!(transport.call_count(), 11);
    let data = store.read().await;
    assert!(data.companies.is_empty());
    assert!(data.units.is_empty());
}

#[tokio::test]
async fn cancel_during_list_request_keeps_previous_records() {
    let transport = Arc::new(MemoryTransport::new().with_latency(Duration::from_millis(200)));
    transport.set_rows(&BorrowRecord::endpoint(), vec![borrow(1, common::COMPANY_A)]);
    let store = BorrowStore::new(Arc::clone(&transport) as _, CancellationToken::new());
    store.list().await.unwrap();

    transport.set_rows(
        &BorrowRecord::endpoint(),
        vec![borrow(1, common::COMPANY_A), borrow(2, common::COMPANY_B)],
    );
    let task = tokio::spawn({
        let store = store.clone();
        async move { store.list().await }
    });
    tokio::time::sleep(Duration::from_millis(50)).await;
    store.cancel();

    let err = task.await.unwrap().unwrap_err();
    assert!(err.is_cancelled());
    assert_eq!(store.records().await.len(), 1);
}
