//! API token storage and renewal.
//!
//! The RailData API only issues a handful of tokens per day, so the store
//! makes sure that a burst of callers all holding the same stale token
//! causes a single `getToken` call.

use std::fmt;
use std::sync::Arc;

use tokio::sync::{Mutex, RwLock};
use tracing::{debug, info, warn};

use crate::api::{GET_TOKEN, GetTokenRequest, TokenIssuer};
use crate::context::RequestContext;
use crate::error::{RailDataError, Result};

/// Username and password used to obtain new tokens.
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    pub username: String,
    pub password: String,
}

impl Credentials {
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
        }
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .finish()
    }
}

/// Delivered to listeners after every successful refresh.
///
/// Carries the previous token as well, so a listener persisting tokens can
/// tell which write is the latest when refreshes overlap.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TokenUpdate {
    pub new_token: String,
    pub previous_token: String,
}

/// Callback invoked with each [`TokenUpdate`].
pub type TokenListener = Arc<dyn Fn(TokenUpdate) + Send + Sync>;

/// Holds the current token and renews it on demand.
///
/// Reads never wait on the network: the token itself sits behind a
/// short-lived lock, and a separate refresh gate serializes renewals.
pub struct TokenStore {
    token: RwLock<String>,
    refresh_gate: Mutex<()>,
    credentials: Option<Credentials>,
    listeners: Vec<TokenListener>,
}

impl TokenStore {
    pub fn new(
        token: impl Into<String>,
        credentials: Option<Credentials>,
        listeners: Vec<TokenListener>,
    ) -> Self {
        Self {
            token: RwLock::new(token.into()),
            refresh_gate: Mutex::new(()),
            credentials,
            listeners,
        }
    }

    /// The token currently in use.
    pub async fn current_token(&self) -> String {
        self.token.read().await.clone()
    }

    pub fn has_credentials(&self) -> bool {
        self.credentials.is_some()
    }

    /// Replace the stored token if it still equals `observed`.
    ///
    /// When another caller has already replaced `observed`, this returns
    /// `Ok(())` without contacting the API. Otherwise it asks `issuer` for a
    /// new token, stores it, and notifies listeners in the background.
    ///
    /// Fails with `MissingCredentials` when no credentials were configured,
    /// and with `BadCredentials` when the API rejects them; in both cases the
    /// stored token is left unchanged.
    pub async fn refresh<T: TokenIssuer>(
        &self,
        observed: &str,
        issuer: &T,
        ctx: &RequestContext,
    ) -> Result<()> {
        let Some(credentials) = &self.credentials else {
            return Err(RailDataError::MissingCredentials);
        };

        let gate = ctx
            .run(GET_TOKEN.name(), async { Ok(self.refresh_gate.lock().await) })
            .await?;

        if *self.token.read().await != observed {
            debug!("token already refreshed by a concurrent caller");
            return Ok(());
        }

        let request = GetTokenRequest {
            username: credentials.username.clone(),
            password: credentials.password.clone(),
        };
        let response = issuer.issue_token(&request, ctx).await?;

        if response.authenticated.as_deref() != Some("True") {
            warn!(username = %credentials.username, "token request rejected credentials");
            return Err(RailDataError::BadCredentials);
        }

        let new_token = response
            .user_token
            .filter(|t| !t.is_empty())
            .ok_or_else(|| RailDataError::Decode {
                method: GET_TOKEN.name(),
                message: "authenticated response without UserToken".to_string(),
            })?;

        *self.token.write().await = new_token.clone();
        drop(gate);

        info!(listeners = self.listeners.len(), "obtained new API token");
        self.notify(TokenUpdate {
            new_token,
            previous_token: observed.to_string(),
        });
        Ok(())
    }

    /// Run every listener on its own blocking task.
    ///
    /// Delivery is fire-and-forget: there is no ordering between refreshes,
    /// and a listener that panics or stalls affects nobody else.
    fn notify(&self, update: TokenUpdate) {
        for listener in &self.listeners {
            let listener = Arc::clone(listener);
            let update = update.clone();
            tokio::task::spawn_blocking(move || listener(update));
        }
    }
}

impl fmt::Debug for TokenStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TokenStore")
            .field("credentials", &self.credentials)
            .field("listeners", &self.listeners.len())
            .finish_non_exhaustive()
    }
}
