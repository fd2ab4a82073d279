//! Endpoint addressing, request bodies, and reply interpretation for the
//! remote `<script>.php?resource=..&action=..&id=..` API.

use bytes::Bytes;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::AppError;
use crate::result::AppResult;

/// A single addressable API endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Endpoint {
    /// PHP script name without extension, e.g. `asset`.
    pub script: String,
    /// `resource=` query value.
    pub resource: Option<String>,
    /// `action=` query value.
    pub action: Option<String>,
    /// `id=` query value.
    pub id: Option<String>,
}

impl Endpoint {
    /// Address a resource served by a script.
    pub fn resource(script: impl Into<String>, resource: impl Into<String>) -> Self {
        Self {
            script: script.into(),
            resource: Some(resource.into()),
            action: None,
            id: None,
        }
    }

    /// Address an action-only endpoint (dashboard, insurance).
    pub fn action_only(script: impl Into<String>, action: impl Into<String>) -> Self {
        Self {
            script: script.into(),
            resource: None,
            action: Some(action.into()),
            id: None,
        }
    }

    /// Attach an `action=` parameter.
    pub fn with_action(mut self, action: impl Into<String>) -> Self {
        self.action = Some(action.into());
        self
    }

    /// Attach an `id=` parameter.
    pub fn with_id(mut self, id: impl ToString) -> Self {
        self.id = Some(id.to_string());
        self
    }

    /// Script file name, e.g. `asset.php`.
    pub fn file_name(&self) -> String {
        format!("{}.php", self.script)
    }

    /// Query parameters in wire order (`resource`, `action`, `id`).
    pub fn query_pairs(&self) -> Vec<(&'static str, &str)> {
        let mut pairs = Vec::with_capacity(3);
        if let Some(resource) = &self.resource {
            pairs.push(("resource", resource.as_str()));
        }
        if let Some(action) = &self.action {
            pairs.push(("action", action.as_str()));
        }
        if let Some(id) = &self.id {
            pairs.push(("id", id.as_str()));
        }
        pairs
    }

    /// A stable key for logs and the in-memory transport, e.g.
    /// `asset.php?resource=asset&action=update&id=4`.
    pub fn route_key(&self) -> String {
        let query = self
            .query_pairs()
            .iter()
            .map(|(k, v)| format!("{k}={v}"))
            .collect::<Vec<_>>()
            .join("&");
        if query.is_empty() {
            self.file_name()
        } else {
            format!("{}?{}", self.file_name(), query)
        }
    }
}

impl std::fmt::Display for Endpoint {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.route_key())
    }
}

/// A file attached to a multipart mutation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Attachment {
    /// Form field name.
    pub field: String,
    /// Original file name.
    pub file_name: String,
    /// MIME type, if known.
    pub mime_type: Option<String>,
    /// File contents.
    pub data: Bytes,
}

impl Attachment {
    /// Create an attachment.
    pub fn new(field: impl Into<String>, file_name: impl Into<String>, data: Bytes) -> Self {
        Self {
            field: field.into(),
            file_name: file_name.into(),
            mime_type: None,
            data,
        }
    }

    /// Set the MIME type.
    pub fn with_mime_type(mut self, mime: impl Into<String>) -> Self {
        self.mime_type = Some(mime.into());
        self
    }
}

/// Name of the form field that carries the JSON payload.
pub const DATA_FIELD: &str = "data";

/// Body of a mutation request.
#[derive(Debug, Clone, PartialEq)]
pub enum RequestBody {
    /// Form body with a single `data` field holding a JSON string.
    JsonField(Value),
    /// `multipart/form-data` with the JSON `data` field plus files.
    Multipart {
        /// The record payload.
        data: Value,
        /// Attached files.
        files: Vec<Attachment>,
    },
    /// `application/x-www-form-urlencoded` pairs (batch insert).
    UrlEncoded(Vec<(String, String)>),
}

impl RequestBody {
    /// Serialize a payload into the right body shape: multipart when files
    /// are present, a JSON `data` field otherwise.
    pub fn for_record<T: Serialize>(record: &T, files: Vec<Attachment>) -> AppResult<Self> {
        let data = serde_json::to_value(record)?;
        if files.is_empty() {
            Ok(Self::JsonField(data))
        } else {
            Ok(Self::Multipart { data, files })
        }
    }

    /// The JSON payload carried by the body, if any. For url-encoded
    /// bodies the `data` pair is parsed back.
    pub fn payload(&self) -> Option<Value> {
        match self {
            Self::JsonField(data) | Self::Multipart { data, .. } => Some(data.clone()),
            Self::UrlEncoded(pairs) => pairs
                .iter()
                .find(|(k, _)| k == DATA_FIELD)
                .and_then(|(_, v)| serde_json::from_str(v).ok()),
        }
    }
}

/// Typed reading of a raw server reply.
///
/// The server has no success discriminant, so the shape of the body is
/// read once here: `null`, `false`, `""`, `{}`, and objects with an
/// `error` key or `success: false` are rejections. Anything else,
/// including an empty array, is success.
pub struct ApiReply;

impl ApiReply {
    /// Turn a raw body into `Ok(body)` or a `Rejected` error.
    pub fn interpret(body: Value) -> AppResult<Value> {
        match &body {
            Value::Null => Err(AppError::rejected("server returned an empty response")),
            Value::Bool(false) => Err(AppError::rejected("server returned false")),
            Value::String(s) if s.trim().is_empty() => {
                Err(AppError::rejected("server returned an empty response"))
            }
            Value::Object(map) if map.is_empty() => {
                Err(AppError::rejected("server returned an empty object"))
            }
            Value::Object(map) => {
                if let Some(err) = map.get("error").filter(|v| !v.is_null()) {
                    let message = err
                        .as_str()
                        .map(str::to_string)
                        .unwrap_or_else(|| err.to_string());
                    return Err(AppError::rejected(message));
                }
                if map.get("success").and_then(Value::as_bool) == Some(false) {
                    let message = map
                        .get("message")
                        .and_then(Value::as_str)
                        .unwrap_or("server reported failure");
                    return Err(AppError::rejected(message));
                }
                Ok(body)
            }
            _ => Ok(body),
        }
    }

    /// Extract a list from a reply: a bare array, or an object wrapping
    /// one under `data`. Anything else is an empty list.
    pub fn into_list(body: Value) -> Vec<Value> {
        match body {
            Value::Array(items) => items,
            Value::Object(mut map) => match map.remove("data") {
                Some(Value::Array(items)) => items,
                _ => Vec::new(),
            },
            _ => Vec::new(),
        }
    }
}
