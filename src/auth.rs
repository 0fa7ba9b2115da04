//! Credential lifecycle management
//!
//! `obtain` drives the load/refresh/authorize/persist state machine over the
//! token store and the two remote collaborators. No retries beyond the single
//! refresh attempt; callers re-invoke `obtain` to retry, and every invocation
//! re-reads the store from scratch.

use chrono::Utc;
use tracing::{debug, info, warn};

use crate::credential::{AuthorizationFlow, Credential, CredentialState, RefreshFlow};
use crate::error::Result;
use crate::store::TokenStore;

/// Scope granting read/write access to spreadsheets
pub const SPREADSHEET_SCOPES: &[&str] = &["https://www.googleapis.com/auth/spreadsheets"];

/// Scope for sending mail on the user's behalf
pub const MAIL_SEND_SCOPES: &[&str] = &["https://www.googleapis.com/auth/gmail.send"];

/// A credential handed back by [`CredentialManager::obtain`], with the
/// terminal state that produced it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ObtainedCredential {
    pub credential: Credential,
    pub state: CredentialState,
}

/// Drives a credential from whatever the store holds to a valid, persisted one
///
/// The returned credential is an explicit value threaded by the caller; the
/// manager keeps no token cached in memory between calls.
pub struct CredentialManager {
    store: TokenStore,
    scopes: Vec<String>,
}

impl CredentialManager {
    pub fn new(store: TokenStore, scopes: impl IntoIterator<Item = impl Into<String>>) -> Self {
        Self {
            store,
            scopes: scopes.into_iter().map(Into::into).collect(),
        }
    }

    pub fn store(&self) -> &TokenStore {
        &self.store
    }

    pub fn scopes(&self) -> &[String] {
        &self.scopes
    }

    /// Obtain a valid credential, refreshing or re-authorizing as needed
    ///
    /// A stored valid credential is returned as-is with zero collaborator
    /// calls and zero writes. Otherwise a single refresh is attempted when a
    /// refresh token exists; a rejected refresh falls through to the
    /// interactive flow. Any credential produced by a collaborator is
    /// persisted before being returned. Collaborator failures surface as
    /// [`SheetsError::CredentialUnavailable`]; store I/O failures surface
    /// directly.
    pub async fn obtain(
        &self,
        authorization: &dyn AuthorizationFlow,
        refresh: &dyn RefreshFlow,
    ) -> Result<ObtainedCredential> {
        let state = match self.store.load().await? {
            None => CredentialState::Absent,
            Some(credential) if credential.is_valid(Utc::now()) => {
                debug!("stored credential is valid, no refresh needed");
                return Ok(ObtainedCredential {
                    credential,
                    state: CredentialState::LoadedValid,
                });
            }
            Some(credential) => {
                debug!("stored credential is expired or incomplete");
                if credential.can_refresh() {
                    match self.try_refresh(refresh, &credential).await? {
                        Some(obtained) => return Ok(obtained),
                        None => CredentialState::Authorizing,
                    }
                } else {
                    CredentialState::LoadedInvalid
                }
            }
        };

        debug!(?state, "falling back to interactive authorization");
        self.authorize(authorization).await
    }

    /// Single refresh attempt; `Ok(None)` means the refresh was rejected and
    /// the interactive flow should run instead
    async fn try_refresh(
        &self,
        refresh: &dyn RefreshFlow,
        credential: &Credential,
    ) -> Result<Option<ObtainedCredential>> {
        debug!(state = ?CredentialState::Refreshing, "refreshing expired credential");
        match refresh.refresh(credential).await {
            Ok(refreshed) => {
                self.store.save(&refreshed).await?;
                info!(
                    state = ?CredentialState::PersistedValid,
                    "credential refreshed and persisted"
                );
                Ok(Some(ObtainedCredential {
                    credential: refreshed,
                    state: CredentialState::PersistedValid,
                }))
            }
            Err(e) if e.is_recoverable() => {
                warn!("refresh rejected, re-authorization required: {}", e);
                Ok(None)
            }
            Err(e) => Err(e.into_unavailable()),
        }
    }

    /// Interactive consent; blocks until the user completes the flow
    async fn authorize(
        &self,
        authorization: &dyn AuthorizationFlow,
    ) -> Result<ObtainedCredential> {
        info!(
            state = ?CredentialState::Authorizing,
            scopes = ?self.scopes,
            "requesting interactive authorization"
        );
        let credential = match authorization.authorize(&self.scopes).await {
            Ok(credential) => credential,
            Err(e) => {
                warn!(state = ?CredentialState::Failed, "authorization failed: {}", e);
                return Err(e.into_unavailable());
            }
        };

        self.store.save(&credential).await?;
        info!(state = ?CredentialState::PersistedValid, "new credential persisted");
        Ok(ObtainedCredential {
            credential,
            state: CredentialState::PersistedValid,
        })
    }
}
