//! Client configuration.

use std::fmt;
use std::sync::Arc;

use crate::catalog::Catalogs;
use crate::error::{RailDataError, Result};
use crate::token::{Credentials, TokenListener, TokenUpdate};

/// Production RailData endpoint.
pub const PRODUCTION_BASE_URL: &str = "https://raildata.njtransit.com/api/TrainData";

/// Test RailData endpoint.
pub const TEST_BASE_URL: &str = "https://testraildata.njtransit.com/api/TrainData";

/// Default request timeout
const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Configuration for [`crate::Client`].
///
/// NJ Transit only issues a few tokens per day, so callers should persist the
/// token (see [`ClientConfig::with_token_listener`]) and pass it back in
/// through [`ClientConfig::with_token`] on the next start.
#[derive(Clone)]
pub struct ClientConfig {
    /// Token to start with. May be empty if credentials are given.
    pub token: String,
    /// Used to obtain a new token when the current one is rejected
    pub credentials: Option<Credentials>,
    /// Called after each token refresh
    pub listeners: Vec<TokenListener>,
    /// Base URL for the API (defaults to production)
    pub base_url: String,
    /// Request timeout in seconds, applied to the default HTTP client
    pub timeout_secs: u64,
    /// HTTP client to use instead of building one
    pub http: Option<reqwest::Client>,
    /// Catalogs to resolve stations and lines with (defaults to the built-in tables)
    pub catalogs: Option<Arc<Catalogs>>,
}

impl ClientConfig {
    pub fn new() -> Self {
        Self {
            token: String::new(),
            credentials: None,
            listeners: Vec::new(),
            base_url: PRODUCTION_BASE_URL.to_string(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
            http: None,
            catalogs: None,
        }
    }

    /// Read configuration from the `RAILDATA_*` environment variables.
    ///
    /// | Variable | Meaning |
    /// |---|---|
    /// | `RAILDATA_TOKEN` | initial token |
    /// | `RAILDATA_USERNAME`, `RAILDATA_PASSWORD` | credentials (both or neither) |
    /// | `RAILDATA_TEST_ENDPOINT` | `1` or `true` selects the test endpoint |
    /// | `RAILDATA_BASE_URL` | overrides the endpoint |
    /// | `RAILDATA_TIMEOUT_SECS` | request timeout |
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Like [`ClientConfig::from_env`], reading variables through `lookup`.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let var = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());
        let mut config = Self::new();

        if let Some(token) = var("RAILDATA_TOKEN") {
            config = config.with_token(token.trim());
        }

        match (var("RAILDATA_USERNAME"), var("RAILDATA_PASSWORD")) {
            (Some(username), Some(password)) => {
                config = config.with_credentials(username, password);
            }
            (None, None) => {}
            _ => {
                return Err(RailDataError::Configuration(
                    "RAILDATA_USERNAME and RAILDATA_PASSWORD must be set together".to_string(),
                ));
            }
        }

        if let Some(flag) = var("RAILDATA_TEST_ENDPOINT") {
            let flag = flag.trim();
            config = config.with_test_endpoint(flag == "1" || flag.eq_ignore_ascii_case("true"));
        }

        if let Some(url) = var("RAILDATA_BASE_URL") {
            config = config.with_base_url(url.trim());
        }

        if let Some(secs) = var("RAILDATA_TIMEOUT_SECS") {
            let secs = secs.trim().parse().map_err(|_| {
                RailDataError::Configuration(format!("invalid RAILDATA_TIMEOUT_SECS: {secs:?}"))
            })?;
            config = config.with_timeout(secs);
        }

        Ok(config)
    }

    /// Set the initial token.
    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        self.token = token.into();
        self
    }

    /// Set credentials so the client can obtain new tokens.
    pub fn with_credentials(
        mut self,
        username: impl Into<String>,
        password: impl Into<String>,
    ) -> Self {
        self.credentials = Some(Credentials::new(username, password));
        self
    }

    /// Register a function called with every new token.
    ///
    /// Listeners run on a blocking thread after the refresh completes; they
    /// may do file I/O. There is no ordering between calls, so use
    /// [`TokenUpdate::previous_token`] to detect stale writes.
    pub fn with_token_listener(
        mut self,
        listener: impl Fn(TokenUpdate) + Send + Sync + 'static,
    ) -> Self {
        self.listeners.push(Arc::new(listener));
        self
    }

    /// Select the test endpoint (`true`) or the production one (`false`).
    pub fn with_test_endpoint(self, test: bool) -> Self {
        self.with_base_url(if test { TEST_BASE_URL } else { PRODUCTION_BASE_URL })
    }

    /// Set a custom base URL (for testing).
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    /// Use a preconfigured HTTP client. The timeout setting is then ignored.
    pub fn with_http_client(mut self, http: reqwest::Client) -> Self {
        self.http = Some(http);
        self
    }

    /// Set request timeout.
    pub fn with_timeout(mut self, secs: u64) -> Self {
        self.timeout_secs = secs;
        self
    }

    pub fn with_catalogs(mut self, catalogs: Arc<Catalogs>) -> Self {
        self.catalogs = Some(catalogs);
        self
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for ClientConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ClientConfig")
            .field("token", &if self.token.is_empty() { "" } else { "<redacted>" })
            .field("credentials", &self.credentials)
            .field("listeners", &self.listeners.len())
            .field("base_url", &self.base_url)
            .field("timeout_secs", &self.timeout_secs)
            .field("custom_http", &self.http.is_some())
            .field("custom_catalogs", &self.catalogs.is_some())
            .finish()
    }
}
