//! In-memory transport that mimics the remote API.
//!
//! Resource tables are plain JSON rows keyed by the endpoint's
//! `script.php?resource=..` route. Inserts, updates, and batch inserts
//! mutate those rows the way the server does, and every request that
//! reaches the "network" is appended to a call log.

use std::collections::VecDeque;
use std::sync::Mutex;
use std::time::Duration;

use async_trait::async_trait;
use dashmap::DashMap;
use serde_json::{Map, Value, json};
use tokio_util::sync::CancellationToken;
use tracing::debug;

use itam_core::error::AppError;
use itam_core::request::{Endpoint, RequestBody};
use itam_core::result::AppResult;
use itam_core::traits::ApiTransport;

/// Field holding a row's primary key.
const ID_FIELD: &str = "id";

/// One request that reached the transport.
#[derive(Debug, Clone, PartialEq)]
pub struct RecordedCall {
    /// `GET` or `POST`.
    pub method: &'static str,
    /// Full route key including action and id.
    pub route: String,
    /// JSON payload for mutations.
    pub payload: Option<Value>,
}

/// In-memory server double.
#[derive(Debug, Default)]
pub struct MemoryTransport {
    /// Rows per resource route.
    tables: DashMap<String, Vec<Value>>,
    /// Fixed replies per full route, taking precedence over tables.
    replies: DashMap<String, Value>,
    /// Errors returned by the next calls, in order.
    failures: Mutex<VecDeque<AppError>>,
    /// Every call that was not cancelled up front.
    calls: Mutex<Vec<RecordedCall>>,
    /// Simulated round-trip time.
    latency: Option<Duration>,
}

impl MemoryTransport {
    /// Create an empty transport.
    pub fn new() -> Self {
        Self::default()
    }

    /// Delay every reply by `latency`.
    pub fn with_latency(mut self, latency: Duration) -> Self {
        self.latency = Some(latency);
        self
    }

    /// Seed the rows behind a resource endpoint.
    pub fn set_rows(&self, endpoint: &Endpoint, rows: Vec<Value>) {
        self.tables.insert(table_key(endpoint), rows);
    }

    /// Current rows behind a resource endpoint.
    pub fn rows(&self, endpoint: &Endpoint) -> Vec<Value> {
        self.tables
            .get(&table_key(endpoint))
            .map(|rows| rows.clone())
            .unwrap_or_default()
    }

    /// Return `reply` for every call to exactly this route.
    pub fn set_reply(&self, endpoint: &Endpoint, reply: Value) {
        self.replies.insert(endpoint.route_key(), reply);
    }

    /// Fail the next call with `error`.
    pub fn fail_next(&self, error: AppError) {
        self.failures
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .push_back(error);
    }

    /// Snapshot of the call log.
    pub fn calls(&self) -> Vec<RecordedCall> {
        self.calls
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .clone()
    }

    /// Number of calls that reached the transport.
    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap_or_else(|e| e.into_inner()).len()
    }

    /// Number of calls to routes starting with `prefix`.
    pub fn calls_to(&self, prefix: &str) -> usize {
        self.calls
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .iter()
            .filter(|call| call.route.starts_with(prefix))
            .count()
    }

    /// Forget recorded calls.
    pub fn clear_calls(&self) {
        self.calls
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .clear();
    }

    async fn round_trip(
        &self,
        method: &'static str,
        endpoint: &Endpoint,
        payload: Option<Value>,
        cancel: &CancellationToken,
    ) -> AppResult<()> {
        if cancel.is_cancelled() {
            return Err(AppError::cancelled(format!(
                "Request to {endpoint} was cancelled"
            )));
        }

        self.calls
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .push(RecordedCall {
                method,
                route: endpoint.route_key(),
                payload,
            });
        debug!(method, route = %endpoint, "Memory transport call");

        if let Some(latency) = self.latency {
            tokio::select! {
                _ = cancel.cancelled() => {
                    return Err(AppError::cancelled(format!(
                        "Request to {endpoint} was cancelled"
                    )));
                }
                _ = tokio::time::sleep(latency) => {}
            }
        }

        let failure = self
            .failures
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .pop_front();
        match failure {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }

    fn insert_row(&self, key: &str, payload: Value) -> Option<i64> {
        let Value::Object(mut row) = payload else {
            return None;
        };
        let mut rows = self.tables.entry(key.to_string()).or_default();
        let next_id = rows.iter().filter_map(row_id).max().unwrap_or(0) + 1;
        row.insert(ID_FIELD.to_string(), json!(next_id));
        rows.push(Value::Object(row));
        Some(next_id)
    }

    fn update_row(&self, key: &str, id: &str, patch: Value) -> bool {
        let Value::Object(patch) = patch else {
            return false;
        };
        let Some(mut rows) = self.tables.get_mut(key) else {
            return false;
        };
        let Some(Value::Object(row)) = rows
            .iter_mut()
            .find(|row| row_id(row).map(|v| v.to_string()).as_deref() == Some(id))
        else {
            return false;
        };
        merge(row, patch);
        true
    }

    fn mutate(&self, endpoint: &Endpoint, payload: Option<Value>) -> Value {
        let key = table_key(endpoint);
        let payload = payload.unwrap_or(Value::Null);
        match (endpoint.action.as_deref(), endpoint.id.as_deref()) {
            (None, _) => match self.insert_row(&key, payload) {
                Some(id) => json!({ "success": true, "id": id }),
                None => json!({ "error": "Invalid payload" }),
            },
            (Some("update"), Some(id)) => {
                if self.update_row(&key, id, payload) {
                    json!({ "success": true })
                } else {
                    json!({ "error": format!("Record {id} not found") })
                }
            }
            (Some("batchInsert"), _) => {
                let Value::Array(items) = payload else {
                    return json!({ "error": "Expected an array" });
                };
                let inserted = items
                    .into_iter()
                    .filter_map(|item| self.insert_row(&key, item))
                    .count();
                json!({ "success": true, "inserted": inserted })
            }
            _ => Value::Null,
        }
    }
}

/// Route of the resource table an endpoint reads or mutates.
fn table_key(endpoint: &Endpoint) -> String {
    Endpoint {
        action: None,
        id: None,
        ..endpoint.clone()
    }
    .route_key()
}

fn row_id(row: &Value) -> Option<i64> {
    match row.get(ID_FIELD)? {
        Value::Number(n) => n.as_i64(),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

fn merge(row: &mut Map<String, Value>, patch: Map<String, Value>) {
    for (field, value) in patch {
        row.insert(field, value);
    }
}

#[async_trait]
impl ApiTransport for MemoryTransport {
    fn transport_name(&self) -> &str {
        "memory"
    }

    async fn get(&self, endpoint: &Endpoint, cancel: &CancellationToken) -> AppResult<Value> {
        self.round_trip("GET", endpoint, None, cancel).await?;

        if let Some(reply) = self.replies.get(&endpoint.route_key()) {
            return Ok(reply.clone());
        }
        if endpoint.action.is_none() && endpoint.resource.is_some() {
            return Ok(Value::Array(self.rows(endpoint)));
        }
        Ok(Value::Null)
    }

    async fn post(
        &self,
        endpoint: &Endpoint,
        body: RequestBody,
        cancel: &CancellationToken,
    ) -> AppResult<Value> {
        let payload = body.payload();
        self.round_trip("POST", endpoint, payload.clone(), cancel)
            .await?;

        if let Some(reply) = self.replies.get(&endpoint.route_key()) {
            return Ok(reply.clone());
        }
        Ok(self.mutate(endpoint, payload))
    }
}
