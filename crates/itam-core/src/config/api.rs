//! Remote API client configuration.

use serde::{Deserialize, Serialize};

/// Settings for the remote PHP API the dashboard consumes.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiConfig {
    /// Scheme and host of the API server, e.g. `http://localhost`.
    #[serde(default = "default_base_url")]
    pub base_url: String,
    /// Path segment between the host and the `<script>.php` files.
    #[serde(default = "default_api_prefix")]
    pub api_prefix: String,
    /// Whole-request timeout in seconds.
    #[serde(default = "default_timeout")]
    pub timeout_seconds: u64,
    /// TCP connect timeout in seconds.
    #[serde(default = "default_connect_timeout")]
    pub connect_timeout_seconds: u64,
    /// `User-Agent` header sent with every request.
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            api_prefix: default_api_prefix(),
            timeout_seconds: default_timeout(),
            connect_timeout_seconds: default_connect_timeout(),
            user_agent: default_user_agent(),
        }
    }
}

impl ApiConfig {
    /// The root every `<script>.php` path is joined onto, without a
    /// trailing slash.
    pub fn root_url(&self) -> String {
        let base = self.base_url.trim_end_matches('/');
        let prefix = self.api_prefix.trim_matches('/');
        if prefix.is_empty() {
            base.to_string()
        } else {
            format!("{base}/{prefix}")
        }
    }
}

fn default_base_url() -> String {
    "http://localhost".to_string()
}

fn default_api_prefix() -> String {
    "itam_api".to_string()
}

fn default_timeout() -> u64 {
    30
}

fn default_connect_timeout() -> u64 {
    10
}

fn default_user_agent() -> String {
    format!("itam-dashboard/{}", env!("CARGO_PKG_VERSION"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_root_url_trims_slashes() {
        let config = ApiConfig {
            base_url: "http://10.0.0.5/".to_string(),
            api_prefix: "/itam_api/".to_string(),
            ..ApiConfig::default()
        };
        assert_eq!(config.root_url(), "http://10.0.0.5/itam_api");
    }

    #[test]
    fn test_root_url_without_prefix() {
        let config = ApiConfig {
            api_prefix: String::new(),
            ..ApiConfig::default()
        };
        assert_eq!(config.root_url(), "http://localhost");
    }
}
