//! Credential model and the collaborator seams of the lifecycle manager

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::Result;

/// An OAuth2 credential as persisted in the token store
///
/// The token material is opaque to this crate; only the expiry and the
/// presence of a refresh token drive lifecycle decisions.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Credential {
    pub access_token: String,
    #[serde(default)]
    pub refresh_token: Option<String>,
    #[serde(default)]
    pub expiry: Option<DateTime<Utc>>,
    #[serde(default)]
    pub scopes: Vec<String>,
}

impl Credential {
    /// A credential is valid when it carries a token that has not expired.
    /// A missing expiry is treated as non-expiring.
    pub fn is_valid(&self, now: DateTime<Utc>) -> bool {
        !self.access_token.is_empty() && self.expiry.map_or(true, |expiry| expiry > now)
    }

    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        !self.is_valid(now)
    }

    /// Whether a refresh can be attempted instead of a full re-authorization
    pub fn can_refresh(&self) -> bool {
        self.refresh_token.is_some()
    }
}

/// Lifecycle states observed while obtaining a credential
///
/// `LoadedValid` and `PersistedValid` are the terminal success states and are
/// reported back to the caller; the rest are logged transitions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CredentialState {
    Absent,
    LoadedInvalid,
    LoadedValid,
    Refreshing,
    Authorizing,
    PersistedValid,
    Failed,
}

/// Interactive consent flow (e.g. browser-based OAuth installed-app flow)
///
/// `authorize` blocks until the user completes consent out-of-band; it is not
/// cancellable once started.
#[async_trait]
pub trait AuthorizationFlow: Send + Sync {
    async fn authorize(&self, scopes: &[String]) -> Result<Credential>;
}

/// Token refresh against the remote authorization server
///
/// Fails with [`SheetsError::RefreshRejected`](crate::SheetsError::RefreshRejected)
/// when the server no longer accepts the refresh token.
#[async_trait]
pub trait RefreshFlow: Send + Sync {
    async fn refresh(&self, credential: &Credential) -> Result<Credential>;
}
