/*
[INPUT]:  HTTP configuration (API URL, timeouts, proxy)
[OUTPUT]: Configured reqwest client ready for JSON-RPC calls
[POS]:    HTTP layer - core client implementation
[UPDATE]: When adding connection options or changing client behavior
*/

use std::time::Duration;

use reqwest::{Client, Proxy, Url};

use crate::auth::TokenManager;
use crate::http::{AvtocodError, Result};

/// Production JSON-RPC endpoint of the Avtocod Profi API
const API_URL: &str = "https://api-profi.avtocod.ru/rpc";

/// HTTP client configuration
#[derive(Debug, Clone)]
pub struct ClientConfig {
    pub timeout: Duration,
    pub connect_timeout: Duration,
    /// Override for the API endpoint (mock servers, staging)
    pub api_url: Option<String>,
    /// Proxy URL. `http://` and `https://` always work; `socks5://` and
    /// `socks5h://` require the `socks` cargo feature.
    pub proxy: Option<String>,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(30),
            connect_timeout: Duration::from_secs(10),
            api_url: None,
            proxy: None,
        }
    }
}

/// Main client for the Avtocod Profi API.
///
/// One instance owns one pooled `reqwest` connection manager; clones of
/// the inner client are never exposed. All endpoint methods live in
/// `http::report`, `http::profile` and `auth`.
#[derive(Debug)]
pub struct AvtocodClient {
    http_client: Client,
    api_url: Url,
    timeout: Duration,
    token_manager: TokenManager,
}

impl AvtocodClient {
    /// Create a new client with default configuration
    pub fn new() -> Result<Self> {
        Self::with_config(ClientConfig::default())
    }

    /// Create a new client with custom configuration
    pub fn with_config(config: ClientConfig) -> Result<Self> {
        let mut builder = Client::builder()
            .timeout(config.timeout)
            .connect_timeout(config.connect_timeout);

        if let Some(proxy_url) = &config.proxy {
            builder = builder.proxy(Proxy::all(proxy_url)?);
        }

        let http_client = builder.build()?;
        let api_url = match &config.api_url {
            Some(url) => Url::parse(url)?,
            None => Url::parse(API_URL)?,
        };

        Ok(Self {
            http_client,
            api_url,
            timeout: config.timeout,
            token_manager: TokenManager::new(),
        })
    }

    /// Create a client against a non-production endpoint
    pub fn with_config_and_api_url(mut config: ClientConfig, api_url: &str) -> Result<Self> {
        config.api_url = Some(api_url.to_string());
        Self::with_config(config)
    }

    /// Create a client from a pre-acquired API token
    pub fn from_token(token: impl Into<String>) -> Result<Self> {
        let client = Self::new()?;
        client.token_manager.set_token(token.into(), None, None);
        Ok(client)
    }

    /// Get the token manager
    pub fn token_manager(&self) -> &TokenManager {
        &self.token_manager
    }

    pub(crate) fn http_client(&self) -> &Client {
        &self.http_client
    }

    pub(crate) fn api_url(&self) -> &Url {
        &self.api_url
    }

    pub(crate) fn request_timeout(&self) -> Duration {
        self.timeout
    }

    /// Bearer token for authenticated calls.
    ///
    /// Fails locally before any network I/O when no usable token is stored.
    pub(crate) fn bearer_token(&self) -> Result<String> {
        match self.token_manager.token_data() {
            Some(data) if data.is_expired() => Err(AvtocodError::TokenExpired),
            Some(data) => Ok(data.token),
            None => Err(AvtocodError::Unauthorized),
        }
    }
}
