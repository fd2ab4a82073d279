//! Asset store: the generic collection store plus spreadsheet batch insert.

use std::sync::Arc;

use serde::Serialize;
use serde_json::Value;
use tokio_util::sync::CancellationToken;
use tracing::{info, instrument, warn};
use validator::Validate;

use itam_core::config::import::ImportConfig;
use itam_core::error::AppError;
use itam_core::request::{Attachment, DATA_FIELD, RequestBody};
use itam_core::result::AppResult;
use itam_core::traits::{ApiTransport, RemoteResource, Service};
use itam_core::types::AssetId;
use itam_entity::asset::{Asset, AssetImportRow};

use super::import::clean_batch;
use crate::reply::submit;
use crate::transaction::TransactionStore;

/// `action=` value of the batch insert endpoint.
const BATCH_INSERT_ACTION: &str = "batchInsert";

/// Result of an accepted batch insert.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BatchOutcome {
    /// Rows sent to the server.
    pub submitted: usize,
    /// Rows dropped for a missing serial number.
    pub dropped: usize,
    /// Server reply.
    pub reply: Value,
}

/// Asset collection with batch import.
#[derive(Debug, Clone)]
pub struct AssetStore {
    /// Shared list/insert/update behaviour.
    inner: TransactionStore<Asset>,
    /// API transport, for the batch endpoint.
    transport: Arc<dyn ApiTransport>,
    /// Date parsing rules for imported cells.
    import: ImportConfig,
}

impl AssetStore {
    /// Creates a new asset store.
    pub fn new(
        transport: Arc<dyn ApiTransport>,
        import: ImportConfig,
        cancel: CancellationToken,
    ) -> Self {
        Self {
            inner: TransactionStore::new(Arc::clone(&transport), cancel),
            transport,
            import,
        }
    }

    /// The underlying collection store.
    pub fn store(&self) -> &TransactionStore<Asset> {
        &self.inner
    }

    /// Abort in-flight requests and stop accepting results.
    pub fn cancel(&self) {
        self.inner.cancel();
    }

    /// The last fetched assets.
    pub async fn records(&self) -> Vec<Asset> {
        self.inner.records().await
    }

    /// Fetch the assets and replace the local copy.
    pub async fn list(&self) -> AppResult<Vec<Asset>> {
        self.inner.list().await
    }

    /// Fetch, logging failures and keeping the previous assets.
    pub async fn refresh(&self) -> bool {
        self.inner.refresh().await
    }

    /// Register one asset.
    pub async fn insert<F>(&self, form: &F) -> AppResult<Value>
    where
        F: Serialize + Validate,
    {
        self.inner.insert(form).await
    }

    /// Register one asset with files (e.g. a photo).
    pub async fn insert_with_files<F>(&self, form: &F, files: Vec<Attachment>) -> AppResult<Value>
    where
        F: Serialize + Validate,
    {
        self.inner.insert_with_files(form, files).await
    }

    /// Update one asset.
    pub async fn update<F>(&self, id: Option<AssetId>, patch: &F) -> AppResult<Value>
    where
        F: Serialize + Validate,
    {
        self.inner.update(id, patch).await
    }

    /// Update one asset with files.
    pub async fn update_with_files<F>(
        &self,
        id: Option<AssetId>,
        patch: &F,
        files: Vec<Attachment>,
    ) -> AppResult<Value>
    where
        F: Serialize + Validate,
    {
        self.inner.update_with_files(id, patch, files).await
    }

    /// Insert many spreadsheet rows in one request.
    ///
    /// Rows without a serial number are dropped and date cells are
    /// rewritten as `yyyy-MM-dd`. When nothing survives, no request is
    /// made.
    #[instrument(skip(self, rows), fields(rows = rows.len()))]
    pub async fn insert_many(&self, rows: Vec<AssetImportRow>) -> AppResult<BatchOutcome> {
        let cleaned = clean_batch(rows, &self.import);
        if cleaned.dropped > 0 {
            warn!(dropped = cleaned.dropped, "Dropped rows without a serial number");
        }
        if cleaned.rows.is_empty() {
            return Err(AppError::empty_batch("no valid rows"));
        }

        let data = serde_json::to_string(&cleaned.rows)?;
        let body = RequestBody::UrlEncoded(vec![(DATA_FIELD.to_string(), data)]);
        let endpoint = Asset::endpoint().with_action(BATCH_INSERT_ACTION);
        let reply = submit(
            self.transport.as_ref(),
            &endpoint,
            body,
            self.inner.cancel_token(),
        )
        .await?;

        let submitted = cleaned.rows.len();
        info!(submitted, dropped = cleaned.dropped, "Batch insert accepted");
        self.inner.refresh().await;

        Ok(BatchOutcome {
            submitted,
            dropped: cleaned.dropped,
            reply,
        })
    }
}

impl Service for AssetStore {}
