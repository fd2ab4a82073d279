//! Transport trait for reaching the remote API.

use async_trait::async_trait;
use serde_json::Value;
use tokio_util::sync::CancellationToken;

use crate::request::{Endpoint, RequestBody};
use crate::result::AppResult;

/// Trait for API transports (HTTP, or an in-memory server double).
///
/// Transports return the raw JSON body; deciding whether a body means
/// success is left to [`crate::request::ApiReply`]. Every call observes
/// the caller's cancellation token and fails with
/// [`crate::ErrorKind::Cancelled`] once it fires.
#[async_trait]
pub trait ApiTransport: Send + Sync + std::fmt::Debug + 'static {
    /// Return the transport name (e.g. "http", "memory").
    fn transport_name(&self) -> &str;

    /// Issue a `GET` against the endpoint.
    async fn get(&self, endpoint: &Endpoint, cancel: &CancellationToken) -> AppResult<Value>;

    /// Issue a `POST` with the given body against the endpoint.
    async fn post(
        &self,
        endpoint: &Endpoint,
        body: RequestBody,
        cancel: &CancellationToken,
    ) -> AppResult<Value>;
}
