//! Sheets Automation core
//!
//! The reusable core of a Google Sheets/Gmail session helper: an A1-notation
//! column/range codec and an OAuth2 credential lifecycle manager with an
//! atomically-overwritten on-disk token cache.
//!
//! # Overview
//!
//! - **Column codec**: bijective base-26 column letters (1 -> "A", 27 -> "AA"),
//!   cell-reference parsing, and `"Sheet!A1:D20"`-style range composition for
//!   rectangular data blocks, including header-preserving clear ranges.
//! - **Credential lifecycle**: load a persisted credential, hand it back when
//!   still valid, refresh it when expired, or drive an interactive
//!   authorization flow, then persist the result for reuse. The remote flows
//!   are collaborator traits so the lifecycle is testable without a network.
//!
//! # Example Usage
//!
//! ```no_run
//! use sheets_automation::{
//!     auth::{CredentialManager, SPREADSHEET_SCOPES},
//!     range, AuthorizationFlow, RefreshFlow, TokenStore,
//! };
//!
//! # async fn run(
//! #     consent: &dyn AuthorizationFlow,
//! #     refresher: &dyn RefreshFlow,
//! # ) -> sheets_automation::Result<()> {
//! let store = TokenStore::new("token.json");
//! let manager = CredentialManager::new(store, SPREADSHEET_SCOPES.iter().copied());
//! let obtained = manager.obtain(consent, refresher).await?;
//!
//! // range for a 20-row, 4-column block appended from A1
//! let range = range::build_range("Sheet1", "A1", 20, 4)?;
//! assert_eq!(range, "Sheet1!A1:D20");
//! # Ok(())
//! # }
//! ```
//!
//! # Module Organization
//!
//! - [`auth`] - credential lifecycle state machine and scope constants
//! - [`config`] - TOML configuration (credential paths, scopes)
//! - [`credential`] - credential model and collaborator traits
//! - [`error`] - error types and result alias
//! - [`range`] - column-letter codec and A1 range composition
//! - [`store`] - on-disk token cache with atomic overwrite
//!
//! The on-disk token cache is single-writer: nothing here coordinates
//! concurrent processes. `obtain` blocks for the duration of a refresh call or
//! an interactive consent flow and exposes no cancellation.

pub mod auth;
pub mod config;
pub mod credential;
pub mod error;
pub mod range;
pub mod store;

// Re-export commonly used types for convenience
pub use error::{Result, SheetsError};

pub use auth::{CredentialManager, ObtainedCredential, MAIL_SEND_SCOPES, SPREADSHEET_SCOPES};
pub use config::{AuthConfig, Config};
pub use credential::{AuthorizationFlow, Credential, CredentialState, RefreshFlow};
pub use range::{
    build_range, clear_range, column_index, column_letters, CellRef, ClearScope, HeaderWidth,
};
pub use store::TokenStore;
