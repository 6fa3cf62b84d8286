//! Configuration module
//!
//! Client configuration is resolved from process environment variables. The API key is
//! the only required setting. Loading a `.env` file is left to the binary, which does it
//! once at startup.

use std::env;
use std::fmt::{Debug, Formatter, Result as FmtResult};
use std::time::Duration;

use crate::error::{AssetClientError, Result};

pub const API_KEY_VAR: &str = "LIVEPEER_API_KEY";
pub const API_URL_VAR: &str = "LIVEPEER_API_URL";
pub const AUTH_SCHEME_VAR: &str = "LIVEPEER_AUTH_SCHEME";
pub const HTTP_TIMEOUT_VAR: &str = "LIVEPEER_HTTP_TIMEOUT_SECS";

pub const DEFAULT_API_URL: &str = "https://livepeer.studio";

/// Opaque API credential. Never printed.
#[derive(Clone, PartialEq, Eq)]
pub struct ApiKey(String);

impl ApiKey {
    /// Rejects empty and whitespace-only keys.
    pub fn new(key: impl Into<String>) -> Result<Self> {
        let key = key.into();
        if key.trim().is_empty() {
            return Err(AssetClientError::Configuration(format!(
                "{} is set but empty",
                API_KEY_VAR
            )));
        }
        Ok(Self(key))
    }

    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl Debug for ApiKey {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.write_str("ApiKey(***)")
    }
}

/// How the credential is attached to authenticated requests.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum AuthScheme {
    /// `Authorization: Bearer {key}`
    #[default]
    Bearer,
    /// `X-API-Key: {key}`
    XApiKey,
}

impl AuthScheme {
    pub fn parse(value: &str) -> Result<Self> {
        match value.trim().to_lowercase().as_str() {
            "bearer" => Ok(AuthScheme::Bearer),
            "x-api-key" | "xapikey" | "api-key" => Ok(AuthScheme::XApiKey),
            other => Err(AssetClientError::Configuration(format!(
                "{} must be 'bearer' or 'x-api-key', got '{}'",
                AUTH_SCHEME_VAR, other
            ))),
        }
    }
}

/// Resolved client configuration.
#[derive(Clone, Debug)]
pub struct ClientConfig {
    pub api_key: ApiKey,
    pub base_url: String,
    pub auth_scheme: AuthScheme,
    /// `None` leaves the transport default (no timeout).
    pub timeout: Option<Duration>,
}

impl ClientConfig {
    pub fn new(api_key: ApiKey) -> Self {
        Self {
            api_key,
            base_url: DEFAULT_API_URL.to_string(),
            auth_scheme: AuthScheme::default(),
            timeout: None,
        }
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }

    pub fn with_auth_scheme(mut self, auth_scheme: AuthScheme) -> Self {
        self.auth_scheme = auth_scheme;
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Load configuration from the process environment.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Resolve configuration through an arbitrary variable lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let api_key = lookup(API_KEY_VAR).ok_or_else(|| {
            AssetClientError::Configuration(format!("Missing {}", API_KEY_VAR))
        })?;
        let api_key = ApiKey::new(api_key)?;

        let base_url = lookup(API_URL_VAR)
            .filter(|url| !url.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_API_URL.to_string());

        let auth_scheme = match lookup(AUTH_SCHEME_VAR) {
            Some(value) => AuthScheme::parse(&value)?,
            None => AuthScheme::default(),
        };

        let timeout = match lookup(HTTP_TIMEOUT_VAR) {
            Some(value) => {
                let secs = value.trim().parse::<u64>().map_err(|_| {
                    AssetClientError::Configuration(format!(
                        "{} must be a whole number of seconds, got '{}'",
                        HTTP_TIMEOUT_VAR, value
                    ))
                })?;
                Some(Duration::from_secs(secs))
            }
            None => None,
        };

        let mut config = ClientConfig::new(api_key)
            .with_base_url(base_url)
            .with_auth_scheme(auth_scheme);
        config.timeout = timeout;
        Ok(config)
    }
}
