//! Shared request helpers: fetch-and-decode for lists, submit for
//! mutations. Both read the raw body through [`ApiReply`] exactly once.

use serde::de::DeserializeOwned;
use serde_json::Value;
use tokio_util::sync::CancellationToken;
use tracing::{debug, warn};

use itam_core::request::{ApiReply, Endpoint, RequestBody};
use itam_core::result::AppResult;
use itam_core::traits::ApiTransport;

/// GET a list endpoint and decode each row.
///
/// Rows that fail to decode are skipped and logged; a rejected body is an
/// error.
pub(crate) async fn fetch_list<T: DeserializeOwned>(
    transport: &dyn ApiTransport,
    endpoint: &Endpoint,
    cancel: &CancellationToken,
) -> AppResult<Vec<T>> {
    let body = transport.get(endpoint, cancel).await?;
    let rows = ApiReply::into_list(ApiReply::interpret(body)?);
    let total = rows.len();

    let decoded: Vec<T> = rows
        .into_iter()
        .enumerate()
        .filter_map(|(index, row)| match serde_json::from_value(row) {
            Ok(item) => Some(item),
            Err(e) => {
                warn!(endpoint = %endpoint, index, error = %e, "Skipping undecodable row");
                None
            }
        })
        .collect();

    debug!(endpoint = %endpoint, total, decoded = decoded.len(), "Fetched list");
    Ok(decoded)
}

/// POST a mutation and return the accepted reply.
pub(crate) async fn submit(
    transport: &dyn ApiTransport,
    endpoint: &Endpoint,
    body: RequestBody,
    cancel: &CancellationToken,
) -> AppResult<Value> {
    ApiReply::interpret(transport.post(endpoint, body, cancel).await?)
}
