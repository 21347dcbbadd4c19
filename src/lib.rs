//! Crowdin API client - typed async Rust client library
//!
//! This library exposes the Crowdin translation-management REST API through
//! a single request/response pipeline: base-URL resolution from credentials,
//! bearer authentication, JSON (de)serialization, JSON-Patch partial updates
//! and status-code-to-error mapping.
//!
//! Resource executors are built on top of six primitives:
//! [`CrowdinApiClient::send_get`], [`CrowdinApiClient::send_post`],
//! [`CrowdinApiClient::send_put`], [`CrowdinApiClient::send_patch`],
//! [`CrowdinApiClient::send_delete`] and [`CrowdinApiClient::upload_file`].
//!
//! ```no_run
//! use crowdin_api::{CrowdinApiClient, CrowdinCredentials, PatchEntry};
//!
//! # async fn run() -> crowdin_api::Result<()> {
//! let client = CrowdinApiClient::new(
//!     CrowdinCredentials::new("token").with_organization("acme"),
//! )?;
//!
//! let storages = client.send_get("/storages", None).await?;
//! println!("{}", storages.json_body);
//!
//! let operations = vec![
//!     PatchEntry::test("/cname", "old.example.com"),
//!     PatchEntry::replace("/cname", "new.example.com"),
//! ];
//! client.send_patch("/projects/1", &operations).await?;
//! # Ok(())
//! # }
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod core;

// Re-export key types for convenience
pub use crate::core::{
    client::CrowdinApiClient,
    config::{CrowdinCredentials, DEFAULT_BASE_URL},
    errors::{CrowdinError, ErrorResource, Result},
    models::{ApiResult, DataWrapper, Pagination, ResponseList, ResponseObject},
    patch::{PatchEntry, PatchOperation, PatchValue, PointerPath},
};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Library name
pub const NAME: &str = env!("CARGO_PKG_NAME");
