//! HTTP client for the Livepeer asset API.
//!
//! Provides [`AssetClient`], which holds the credential and one pooled HTTP client,
//! plus the asset operations (request upload + upload, retrieve, export to IPFS,
//! wait for a playback URL) in [`api`]. The CLI uses this client directly.

pub mod api;

use livepeer_core::{ApiKey, AssetClientError, AuthScheme, ClientConfig, Endpoint, Result};
use reqwest::header::AUTHORIZATION;
use reqwest::{Client, RequestBuilder, Response};
use serde::Serialize;
use serde_json::Value;

pub use api::WaitOptions;
pub use livepeer_core::{AssetRecord, ErrorKind, UploadTarget};

const X_API_KEY: &str = "X-API-Key";

/// Authenticated client for the asset endpoints.
///
/// The underlying connection pool lives exactly as long as this value (and its
/// clones); there is no process-wide transport state to initialize or tear down.
#[derive(Clone, Debug)]
pub struct AssetClient {
    client: Client,
    base_url: String,
    api_key: ApiKey,
    auth_scheme: AuthScheme,
}

impl AssetClient {
    pub fn new(config: ClientConfig) -> Result<Self> {
        let mut builder = Client::builder();
        if let Some(timeout) = config.timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder.build().map_err(|e| {
            AssetClientError::Configuration(format!("Failed to create HTTP client: {}", e))
        })?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            api_key: config.api_key,
            auth_scheme: config.auth_scheme,
        })
    }

    /// Create client from environment: LIVEPEER_API_KEY (required), LIVEPEER_API_URL,
    /// LIVEPEER_AUTH_SCHEME, LIVEPEER_HTTP_TIMEOUT_SECS.
    pub fn from_env() -> Result<Self> {
        Self::new(ClientConfig::from_env()?)
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn apply_auth(&self, request: RequestBuilder) -> RequestBuilder {
        match self.auth_scheme {
            AuthScheme::Bearer => request.header(
                AUTHORIZATION,
                format!("Bearer {}", self.api_key.expose()),
            ),
            AuthScheme::XApiKey => request.header(X_API_KEY, self.api_key.expose()),
        }
    }

    /// Authenticated call to one of the asset endpoints, with an optional JSON
    /// body. Returns the parsed JSON response.
    pub(crate) async fn call<B: Serialize + ?Sized>(
        &self,
        endpoint: &Endpoint<'_>,
        body: Option<&B>,
    ) -> Result<Value> {
        let url = endpoint.url(&self.base_url);
        tracing::debug!(method = %endpoint.method(), path = %endpoint.path(), "Sending API request");

        let mut request = self.client.request(endpoint.method(), &url);
        if let Some(body) = body {
            request = request.json(body);
        }
        let request = self.apply_auth(request);

        let response = request.send().await?;
        let response = ensure_success(response).await?;
        parse_json(response).await
    }

    /// Raw client for requests that must not carry the credential (pre-signed URLs).
    pub(crate) fn http(&self) -> &Client {
        &self.client
    }
}

/// Turn a non-2xx response into `HttpStatus`, keeping the body for diagnostics.
pub(crate) async fn ensure_success(response: Response) -> Result<Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let body = response
        .text()
        .await
        .unwrap_or_else(|_| "Unknown error".to_string());
    tracing::warn!(status = status.as_u16(), "API request failed");
    Err(AssetClientError::HttpStatus {
        status: status.as_u16(),
        body,
    })
}

async fn parse_json(response: Response) -> Result<Value> {
    let text = response.text().await?;
    serde_json::from_str(&text).map_err(AssetClientError::Parse)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(base_url: &str) -> ClientConfig {
        ClientConfig::new(ApiKey::new("test-key").unwrap()).with_base_url(base_url)
    }

    #[test]
    fn test_base_url_is_trimmed() {
        let client = AssetClient::new(config("http://localhost:1234///")).unwrap();
        assert_eq!(client.base_url(), "http://localhost:1234");
    }

    #[test]
    fn test_debug_does_not_leak_key() {
        let client = AssetClient::new(config("http://localhost:1234")).unwrap();
        assert!(!format!("{:?}", client).contains("test-key"));
    }

    #[tokio::test]
    async fn test_bearer_auth_header() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("GET", "/api/asset/a1")
            .match_header("authorization", "Bearer test-key")
            .with_status(200)
            .with_body(r#"{"id":"a1"}"#)
            .create_async()
            .await;

        let client = AssetClient::new(config(&server.url())).unwrap();
        let body = client
            .call::<()>(&Endpoint::Asset("a1"), None)
            .await
            .unwrap();
        assert_eq!(body["id"], "a1");
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_x_api_key_auth_header() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("GET", "/api/asset/a1")
            .match_header("x-api-key", "test-key")
            .match_header("authorization", mockito::Matcher::Missing)
            .with_status(200)
            .with_body("{}")
            .create_async()
            .await;

        let client = AssetClient::new(
            config(&server.url()).with_auth_scheme(AuthScheme::XApiKey),
        )
        .unwrap();
        client
            .call::<()>(&Endpoint::Asset("a1"), None)
            .await
            .unwrap();
        mock.assert_async().await;
    }
}
