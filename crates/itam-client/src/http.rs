//! HTTP transport using reqwest.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::multipart::{Form, Part};
use reqwest::{Client, RequestBuilder, Url};
use serde_json::Value;
use tokio_util::sync::CancellationToken;
use tracing::{debug, instrument, warn};

use itam_core::config::api::ApiConfig;
use itam_core::error::{AppError, ErrorKind};
use itam_core::request::{DATA_FIELD, Endpoint, RequestBody};
use itam_core::result::AppResult;
use itam_core::traits::ApiTransport;

/// Transport that talks to the remote API over HTTP.
#[derive(Debug, Clone)]
pub struct HttpTransport {
    /// Shared connection pool.
    client: Client,
    /// `<base_url>/<api_prefix>`.
    root: Url,
}

impl HttpTransport {
    /// Build a transport from configuration.
    pub fn new(config: &ApiConfig) -> AppResult<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds))
            .connect_timeout(Duration::from_secs(config.connect_timeout_seconds))
            .user_agent(config.user_agent.clone())
            .build()
            .map_err(|e| transport_error("Failed to build HTTP client", e))?;

        let root = Url::parse(&format!("{}/", config.root_url())).map_err(|e| {
            AppError::configuration(format!("Invalid API base URL '{}': {e}", config.base_url))
        })?;

        Ok(Self { client, root })
    }

    /// Full URL for an endpoint, including the query string.
    pub fn url_for(&self, endpoint: &Endpoint) -> AppResult<Url> {
        let mut url = self.root.join(&endpoint.file_name()).map_err(|e| {
            AppError::configuration(format!("Invalid endpoint '{}': {e}", endpoint.script))
        })?;
        {
            let pairs = endpoint.query_pairs();
            if !pairs.is_empty() {
                let mut query = url.query_pairs_mut();
                for (key, value) in pairs {
                    query.append_pair(key, value);
                }
            }
        }
        Ok(url)
    }

    fn apply_body(builder: RequestBuilder, body: RequestBody) -> AppResult<RequestBuilder> {
        Ok(match body {
            RequestBody::JsonField(data) => {
                builder.form(&[(DATA_FIELD, serde_json::to_string(&data)?)])
            }
            RequestBody::Multipart { data, files } => {
                let mut form = Form::new().text(DATA_FIELD, serde_json::to_string(&data)?);
                for file in files {
                    let mut part =
                        Part::bytes(file.data.to_vec()).file_name(file.file_name.clone());
                    if let Some(mime) = &file.mime_type {
                        part = part.mime_str(mime).map_err(|e| {
                            AppError::validation(format!("Invalid MIME type '{mime}': {e}"))
                        })?;
                    }
                    form = form.part(file.field, part);
                }
                builder.multipart(form)
            }
            RequestBody::UrlEncoded(pairs) => builder.form(&pairs),
        })
    }

    async fn execute(
        &self,
        endpoint: &Endpoint,
        builder: RequestBuilder,
        cancel: &CancellationToken,
    ) -> AppResult<Value> {
        let send = async {
            let response = builder
                .send()
                .await
                .and_then(|r| r.error_for_status())
                .map_err(|e| transport_error(&format!("Request to {endpoint} failed"), e))?;
            let text = response
                .text()
                .await
                .map_err(|e| transport_error(&format!("Reading {endpoint} failed"), e))?;
            parse_body(&text)
        };

        tokio::select! {
            biased;
            _ = cancel.cancelled() => {
                debug!(endpoint = %endpoint, "Request cancelled");
                Err(AppError::cancelled(format!("Request to {endpoint} was cancelled")))
            }
            result = send => result,
        }
    }
}

/// Parse a response body. Empty bodies read as `null` so that the caller's
/// reply interpretation sees them as rejections.
fn parse_body(text: &str) -> AppResult<Value> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return Ok(Value::Null);
    }
    serde_json::from_str(trimmed).map_err(|e| {
        warn!(body_len = trimmed.len(), "Server returned a non-JSON body");
        AppError::with_source(
            ErrorKind::Serialization,
            format!("Server returned invalid JSON: {e}"),
            e,
        )
    })
}

fn transport_error(context: &str, err: reqwest::Error) -> AppError {
    let message = match err.status() {
        Some(status) => format!("{context}: HTTP {status}"),
        None => format!("{context}: {err}"),
    };
    AppError::with_source(ErrorKind::Transport, message, err)
}

#[async_trait]
impl ApiTransport for HttpTransport {
    fn transport_name(&self) -> &str {
        "http"
    }

    #[instrument(skip(self, cancel), fields(endpoint = %endpoint))]
    async fn get(&self, endpoint: &Endpoint, cancel: &CancellationToken) -> AppResult<Value> {
        let url = self.url_for(endpoint)?;
        self.execute(endpoint, self.client.get(url), cancel).await
    }

    #[instrument(skip(self, body, cancel), fields(endpoint = %endpoint))]
    async fn post(
        &self,
        endpoint: &Endpoint,
        body: RequestBody,
        cancel: &CancellationToken,
    ) -> AppResult<Value> {
        let url = self.url_for(endpoint)?;
        let builder = Self::apply_body(self.client.post(url), body)?;
        self.execute(endpoint, builder, cancel).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn transport() -> HttpTransport {
        HttpTransport::new(&ApiConfig {
            base_url: "http://192.168.1.20".to_string(),
            ..ApiConfig::default()
        })
        .expect("transport")
    }

    #[test]
    fn test_url_for_resource() {
        let url = transport()
            .url_for(&Endpoint::resource("asset", "subcategory"))
            .expect("url");
        assert_eq!(
            url.as_str(),
            "http://192.168.1.20/itam_api/asset.php?resource=subcategory"
        );
    }

    #[test]
    fn test_url_for_update() {
        let endpoint = Endpoint::resource("BorrowedAssets", "borrowed_assets")
            .with_action("update")
            .with_id(12);
        let url = transport().url_for(&endpoint).expect("url");
        assert_eq!(
            url.as_str(),
            "http://192.168.1.20/itam_api/BorrowedAssets.php?resource=borrowed_assets&action=update&id=12"
        );
    }

    #[test]
    fn test_empty_body_is_null() {
        assert_eq!(parse_body("  \n").expect("null"), Value::Null);
        assert!(parse_body("<html>").is_err());
    }

    #[tokio::test]
    async fn test_cancelled_before_send() {
        let cancel = CancellationToken::new();
        cancel.cancel();
        let err = transport()
            .get(&Endpoint::resource("asset", "asset"), &cancel)
            .await
            .unwrap_err();
        assert_eq!(err.kind, ErrorKind::Cancelled);
    }
}
