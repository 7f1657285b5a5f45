//! Backend HTTP client handle.
//!
//! # Responsibilities
//! - Carry the endpoint, credential and session options of one backend session
//! - Attach `apikey` and bearer headers to every request
//! - Build REST, auth and functions URLs under the project base
//! - Provide a health check for backend connectivity

use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION};
use std::time::Duration;
use url::Url;
use uuid::Uuid;

use crate::config::{AuthOptions, ConnectorConfig};
use crate::connector::types::{ConnectorError, ConnectorResult, MISSING_URL_OR_KEY};
use crate::observability::metrics;

const CLIENT_INFO: &str = concat!("backend-connector/", env!("CARGO_PKG_VERSION"));

/// Connection handle to the backend service.
#[derive(Clone)]
pub struct ServiceClient {
    http: reqwest::Client,
    base_url: Url,
    anon_key: String,
    auth: AuthOptions,
    instance_id: Uuid,
}

impl ServiceClient {
    /// Build a handle from configuration.
    ///
    /// Fails with [`MISSING_URL_OR_KEY`] when either service value is empty.
    pub fn new(config: &ConnectorConfig) -> ConnectorResult<Self> {
        let raw_url = config.service.url.trim();
        let anon_key = config.service.anon_key.trim();
        if raw_url.is_empty() || anon_key.is_empty() {
            return Err(ConnectorError::ConstructionFailed(MISSING_URL_OR_KEY.to_string()));
        }

        let base_url: Url = raw_url.parse().map_err(|e| {
            ConnectorError::ConstructionFailed(format!("Invalid service URL '{}': {}", raw_url, e))
        })?;

        let mut headers = HeaderMap::new();
        let key_value = HeaderValue::from_str(anon_key).map_err(|_| {
            ConnectorError::ConstructionFailed("Anon key is not a valid header value".to_string())
        })?;
        let bearer = HeaderValue::from_str(&format!("Bearer {}", anon_key)).map_err(|_| {
            ConnectorError::ConstructionFailed("Anon key is not a valid header value".to_string())
        })?;
        headers.insert("apikey", key_value);
        headers.insert(AUTHORIZATION, bearer);
        headers.insert("x-client-info", HeaderValue::from_static(CLIENT_INFO));

        let http = reqwest::Client::builder()
            .default_headers(headers)
            .connect_timeout(Duration::from_secs(config.timeouts.connect_secs))
            .timeout(Duration::from_secs(config.timeouts.request_secs))
            .build()
            .map_err(|e| ConnectorError::ConstructionFailed(format!("HTTP client build failed: {}", e)))?;

        let client = Self {
            http,
            base_url,
            anon_key: anon_key.to_string(),
            auth: config.auth.clone(),
            instance_id: Uuid::new_v4(),
        };

        tracing::info!(
            url = %client.base_url,
            instance_id = %client.instance_id,
            persist_session = client.auth.persist_session,
            auto_refresh_token = client.auth.auto_refresh_token,
            "Backend client constructed"
        );

        Ok(client)
    }

    /// Identifier assigned at construction.
    pub fn instance_id(&self) -> Uuid {
        self.instance_id
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Session options this handle was built with.
    pub fn auth_options(&self) -> &AuthOptions {
        &self.auth
    }

    pub fn anon_key(&self) -> &str {
        &self.anon_key
    }

    /// Underlying HTTP client with auth headers preset.
    pub fn http(&self) -> &reqwest::Client {
        &self.http
    }

    /// URL of a path below the project base.
    pub fn endpoint(&self, path: &str) -> String {
        format!(
            "{}/{}",
            self.base_url.as_str().trim_end_matches('/'),
            path.trim_start_matches('/')
        )
    }

    /// REST endpoint for a table.
    pub fn rest_url(&self, table: &str) -> String {
        self.endpoint(&format!("rest/v1/{}", table.trim_start_matches('/')))
    }

    /// Auth endpoint for a path (e.g., "token", "user").
    pub fn auth_url(&self, path: &str) -> String {
        self.endpoint(&format!("auth/v1/{}", path.trim_start_matches('/')))
    }

    /// Edge function endpoint.
    pub fn functions_url(&self, name: &str) -> String {
        self.endpoint(&format!("functions/v1/{}", name.trim_start_matches('/')))
    }

    /// GET a path below the project base and decode the JSON body.
    pub async fn get_json(&self, path: &str) -> ConnectorResult<serde_json::Value> {
        let res = self.http.get(self.endpoint(path)).send().await?;
        let status = res.status();
        if !status.is_success() {
            let body = match res.text().await {
                Ok(body) => body,
                Err(e) => {
                    tracing::debug!(status = %status, error = %e, "Failed to read error response body");
                    format!("<unreadable body: {}>", e)
                }
            };
            return Err(ConnectorError::Status {
                status: status.as_u16(),
                body,
            });
        }
        Ok(res.json().await?)
    }

    /// Check if the backend is reachable and healthy.
    ///
    /// Returns true if the auth health endpoint answers with a success status.
    pub async fn is_healthy(&self) -> bool {
        let healthy = match self.http.get(self.auth_url("health")).send().await {
            Ok(res) => {
                let ok = res.status().is_success();
                if !ok {
                    tracing::warn!(status = %res.status(), "Backend health check failed: non-success status");
                }
                ok
            }
            Err(e) => {
                tracing::warn!(error = %e, "Backend health check failed: request error");
                false
            }
        };
        metrics::record_backend_health(self.base_url.as_str(), healthy);
        healthy
    }
}

impl std::fmt::Debug for ServiceClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ServiceClient")
            .field("base_url", &self.base_url.as_str())
            .field("instance_id", &self.instance_id)
            .field("auth", &self.auth)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_config() -> ConnectorConfig {
        ConnectorConfig::with_service("https://x.supabase.co", "validlookingkey1234")
    }

    #[test]
    fn test_client_creation() {
        let client = ServiceClient::new(&test_config()).unwrap();
        assert_eq!(client.base_url().as_str(), "https://x.supabase.co/");
        assert_eq!(client.anon_key(), "validlookingkey1234");
        assert!(client.auth_options().persist_session);
        assert!(client.auth_options().detect_session_in_url);
    }

    #[test]
    fn test_missing_url_or_key() {
        for (url, key) in [("", "validlookingkey1234"), ("https://x.supabase.co", ""), ("", "")] {
            let err = ServiceClient::new(&ConnectorConfig::with_service(url, key)).unwrap_err();
            assert!(err.to_string().contains(MISSING_URL_OR_KEY));
        }
    }

    #[test]
    fn test_invalid_url() {
        let err = ServiceClient::new(&ConnectorConfig::with_service("::nope", "validlookingkey1234"))
            .unwrap_err();
        assert!(err.to_string().contains("Invalid service URL"));
    }

    #[test]
    fn test_key_with_newline_rejected() {
        let err = ServiceClient::new(&ConnectorConfig::with_service(
            "https://x.supabase.co",
            "bad\nkey-value-1234",
        ))
        .unwrap_err();
        assert!(err.to_string().contains("header value"));
    }

    #[test]
    fn test_endpoint_urls() {
        let client = ServiceClient::new(&test_config()).unwrap();
        assert_eq!(client.rest_url("notes"), "https://x.supabase.co/rest/v1/notes");
        assert_eq!(client.auth_url("/user"), "https://x.supabase.co/auth/v1/user");
        assert_eq!(
            client.functions_url("transcribe"),
            "https://x.supabase.co/functions/v1/transcribe"
        );
    }

    #[test]
    fn test_each_construction_gets_new_identity() {
        let a = ServiceClient::new(&test_config()).unwrap();
        let b = ServiceClient::new(&test_config()).unwrap();
        assert_ne!(a.instance_id(), b.instance_id());
    }

    #[test]
    fn test_debug_hides_key() {
        let client = ServiceClient::new(&test_config()).unwrap();
        let debug = format!("{:?}", client);
        assert!(!debug.contains("validlookingkey1234"));
        assert!(debug.contains("x.supabase.co"));
    }

    #[tokio::test]
    async fn test_unreachable_backend_is_unhealthy() {
        let mut config = ConnectorConfig::with_service("http://127.0.0.1:9", "validlookingkey1234");
        config.timeouts.connect_secs = 1;
        config.timeouts.request_secs = 2;
        let client = ServiceClient::new(&config).unwrap();
        assert!(!client.is_healthy().await);
    }
}
