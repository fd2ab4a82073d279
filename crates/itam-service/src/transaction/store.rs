//! Generic store for a record collection served by one resource endpoint.

use std::fmt;
use std::sync::Arc;

use serde::Serialize;
use serde_json::Value;
use tokio::sync::RwLock;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, instrument, warn};
use validator::Validate;

use itam_core::error::AppError;
use itam_core::request::{Attachment, RequestBody};
use itam_core::result::AppResult;
use itam_core::traits::{ApiTransport, RemoteResource, Service};
use itam_entity::validate_form;

use crate::reply::{fetch_list, submit};

/// Holds the collection behind `R::endpoint()`.
///
/// Mutations never patch the local collection: after the server accepts
/// an insert or update, the whole list is fetched again.
pub struct TransactionStore<R: RemoteResource> {
    /// API transport.
    transport: Arc<dyn ApiTransport>,
    /// Last successfully fetched collection.
    records: Arc<RwLock<Vec<R>>>,
    /// Aborts in-flight requests and blocks later writes.
    cancel: CancellationToken,
}

impl<R: RemoteResource> Clone for TransactionStore<R> {
    fn clone(&self) -> Self {
        Self {
            transport: Arc::clone(&self.transport),
            records: Arc::clone(&self.records),
            cancel: self.cancel.clone(),
        }
    }
}

impl<R: RemoteResource> fmt::Debug for TransactionStore<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TransactionStore")
            .field("resource", &R::RESOURCE)
            .field("transport", &self.transport.transport_name())
            .field("cancelled", &self.cancel.is_cancelled())
            .finish()
    }
}

impl<R: RemoteResource> TransactionStore<R> {
    /// Creates a new store with an empty collection.
    pub fn new(transport: Arc<dyn ApiTransport>, cancel: CancellationToken) -> Self {
        Self {
            transport,
            records: Arc::new(RwLock::new(Vec::new())),
            cancel,
        }
    }

    /// The store's cancellation token.
    pub fn cancel_token(&self) -> &CancellationToken {
        &self.cancel
    }

    /// Abort in-flight requests and stop accepting results.
    pub fn cancel(&self) {
        self.cancel.cancel();
    }

    /// The last fetched collection.
    pub async fn records(&self) -> Vec<R> {
        self.records.read().await.clone()
    }

    /// Fetch the collection and replace the local copy.
    #[instrument(skip(self), fields(resource = R::RESOURCE))]
    pub async fn list(&self) -> AppResult<Vec<R>> {
        let rows: Vec<R> = fetch_list(self.transport.as_ref(), &R::endpoint(), &self.cancel).await?;

        // A cancel can land while waiting for the lock.
        let mut records = self.records.write().await;
        if self.cancel.is_cancelled() {
            return Err(AppError::cancelled(format!(
                "Discarding {} list after cancellation",
                R::LABEL
            )));
        }
        *records = rows.clone();
        drop(records);

        debug!(count = rows.len(), "Collection replaced");
        Ok(rows)
    }

    /// [`Self::list`] that logs failures and keeps the previous collection.
    /// Returns whether the collection was replaced.
    pub async fn refresh(&self) -> bool {
        match self.list().await {
            Ok(_) => true,
            Err(e) if e.is_cancelled() => {
                debug!(resource = R::RESOURCE, "Refresh cancelled");
                false
            }
            Err(e) => {
                warn!(
                    resource = R::RESOURCE,
                    error = %e,
                    "Refresh failed, keeping previous records"
                );
                false
            }
        }
    }

    /// Validate and post a new record, then refetch.
    pub async fn insert<F>(&self, form: &F) -> AppResult<Value>
    where
        F: Serialize + Validate,
    {
        self.insert_with_files(form, Vec::new()).await
    }

    /// Like [`Self::insert`], sent as multipart when files are attached.
    #[instrument(skip(self, form, files), fields(resource = R::RESOURCE, files = files.len()))]
    pub async fn insert_with_files<F>(&self, form: &F, files: Vec<Attachment>) -> AppResult<Value>
    where
        F: Serialize + Validate,
    {
        validate_form(form)?;
        let body = RequestBody::for_record(form, files)?;
        let reply = submit(self.transport.as_ref(), &R::endpoint(), body, &self.cancel).await?;

        info!("{} inserted", R::LABEL);
        self.refresh().await;
        Ok(reply)
    }

    /// Validate and post a partial update, then refetch.
    ///
    /// A missing id fails before any request is made.
    pub async fn update<F>(&self, id: Option<R::Id>, patch: &F) -> AppResult<Value>
    where
        F: Serialize + Validate,
    {
        self.update_with_files(id, patch, Vec::new()).await
    }

    /// Like [`Self::update`], sent as multipart when files are attached.
    #[instrument(
        skip(self, id, patch, files),
        fields(resource = R::RESOURCE, id = ?id.map(|i| i.to_string()))
    )]
    pub async fn update_with_files<F>(
        &self,
        id: Option<R::Id>,
        patch: &F,
        files: Vec<Attachment>,
    ) -> AppResult<Value>
    where
        F: Serialize + Validate,
    {
        let id = id.ok_or_else(|| {
            AppError::missing_identifier(format!("Cannot update a {} without its id", R::LABEL))
        })?;
        validate_form(patch)?;

        let body = RequestBody::for_record(patch, files)?;
        let reply = submit(
            self.transport.as_ref(),
            &R::update_endpoint(id),
            body,
            &self.cancel,
        )
        .await?;

        info!(id = %id, "{} updated", R::LABEL);
        self.refresh().await;
        Ok(reply)
    }

    /// Find a record in the local collection.
    pub async fn find(&self, id: R::Id) -> Option<R> {
        self.records
            .read()
            .await
            .iter()
            .find(|record| record.id() == id)
            .cloned()
    }
}

impl<R: RemoteResource> Service for TransactionStore<R> {}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use itam_client::MemoryTransport;
    use itam_core::error::ErrorKind;
    use itam_core::types::{AssetId, BorrowId, CategoryId, CompanyId, UserId};
    use itam_entity::transaction::{BorrowRecord, BorrowUpdate, NewBorrow};
    use serde_json::json;

    fn store(transport: Arc<MemoryTransport>) -> TransactionStore<BorrowRecord> {
        TransactionStore::new(transport, CancellationToken::new())
    }

    fn new_borrow(due: Option<NaiveDate>) -> NewBorrow {
        NewBorrow {
            company_id: CompanyId::new(1),
            department_id: None,
            unit_id: None,
            user_id: UserId::new(3),
            category_id: CategoryId::new(1),
            sub_category_id: None,
            type_id: None,
            asset_id: AssetId::new(9),
            borrow_date: NaiveDate::from_ymd_opt(2024, 5, 1),
            due_date: due,
            remarks: None,
        }
    }

    #[tokio::test]
    async fn test_update_without_id_makes_no_request() {
        let transport = Arc::new(MemoryTransport::new());
        let store = store(Arc::clone(&transport));

        let err = store
            .update(None, &BorrowUpdate::default())
            .await
            .unwrap_err();
        assert_eq!(err.kind, ErrorKind::MissingIdentifier);
        assert_eq!(transport.call_count(), 0);
    }

    #[tokio::test]
    async fn test_invalid_form_makes_no_request() {
        let transport = Arc::new(MemoryTransport::new());
        let store = store(Arc::clone(&transport));

        let form = new_borrow(NaiveDate::from_ymd_opt(2024, 4, 1));
        let err = store.insert(&form).await.unwrap_err();
        assert_eq!(err.kind, ErrorKind::Validation);
        assert_eq!(transport.call_count(), 0);
    }

    #[tokio::test]
    async fn test_rejected_reply_is_error_and_skips_refetch() {
        let transport = Arc::new(MemoryTransport::new());
        transport.set_reply(&BorrowRecord::endpoint(), json!({}));
        let store = store(Arc::clone(&transport));

        let err = store
            .insert(&new_borrow(NaiveDate::from_ymd_opt(2024, 5, 8)))
            .await
            .unwrap_err();
        assert_eq!(err.kind, ErrorKind::Rejected);
        assert_eq!(transport.call_count(), 1);
    }

    #[tokio::test]
    async fn test_refresh_failure_keeps_previous_records() {
        let transport = Arc::new(MemoryTransport::new());
        transport.set_rows(
            &BorrowRecord::endpoint(),
            vec![json!({
                "borrow_id": "1", "company_id": "1", "user_id": "3",
                "category_id": "1", "asset_id": "9", "status": "Borrowed"
            })],
        );
        let store = store(Arc::clone(&transport));
        assert!(store.refresh().await);

        transport.fail_next(AppError::transport("connection refused"));
        assert!(!store.refresh().await);
        assert_eq!(store.records().await.len(), 1);
        assert!(store.find(BorrowId::new(1)).await.is_some());
    }

    #[tokio::test]
    async fn test_cancelled_store_does_not_write() {
        let transport = Arc::new(MemoryTransport::new());
        let store = store(Arc::clone(&transport));
        store.cancel();

        let err = store.list().await.unwrap_err();
        assert!(err.is_cancelled());
        assert!(store.records().await.is_empty());
    }

    #[tokio::test]
    async fn test_cancel_while_waiting_for_lock_does_not_write() {
        let transport = Arc::new(MemoryTransport::new());
        transport.set_rows(
            &BorrowRecord::endpoint(),
            vec![json!({
                "borrow_id": "1", "company_id": "1", "user_id": "3",
                "category_id": "1", "asset_id": "9", "status": "Borrowed"
            })],
        );
        let store = store(Arc::clone(&transport));

        let guard = store.records.read().await;
        let task = tokio::spawn({
            let store = store.clone();
            async move { store.list().await }
        });
        tokio::time::sleep(std::time::Duration::from_millis(50)).await;
        store.cancel();
        drop(guard);

        let err = task.await.unwrap().unwrap_err();
        assert!(err.is_cancelled());
        assert_eq!(transport.call_count(), 1);
        assert!(store.records().await.is_empty());
    }
}
