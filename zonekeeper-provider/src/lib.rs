//! # zonekeeper-provider
//!
//! Cloudflare DNS API client for zonekeeper.
//!
//! This crate is the sole gateway to the external DNS provider. It:
//!
//! - builds authenticated requests (Global API Key header scheme),
//! - classifies every failure into the closed [`ProviderError`] taxonomy
//!   before it leaves the crate — callers never see wire shapes or raw
//!   transport errors,
//! - applies a bounded request timeout (default 30s) and bounded retry
//!   (default 3) with exponential backoff, retrying only transient
//!   failures (network, timeout, rate limit),
//! - masks secret keys in all `Debug`/`Display` output.
//!
//! ## Usage
//!
//! ```rust,no_run
//! use zonekeeper_provider::{CloudflareClient, CloudflareCredentials, DnsApi, SecretKey};
//!
//! # async fn example() -> zonekeeper_provider::Result<()> {
//! let client = CloudflareClient::new(CloudflareCredentials {
//!     email: "ops@example.com".into(),
//!     api_key: SecretKey::new("your-global-api-key"),
//!     account_id: "account-id".into(),
//! })?;
//!
//! client.verify_credentials().await?;
//! for zone in client.list_zones().await? {
//!     println!("{} ({})", zone.name, zone.id);
//! }
//! # Ok(())
//! # }
//! ```

mod client;
mod error;
mod http;
mod mapping;
mod secret;
mod traits;
mod types;
mod util;

pub use client::{ClientConfig, CloudflareClient};
pub use error::{ProviderError, Result};
pub use secret::SecretKey;
pub use traits::DnsApi;
pub use types::{
    CloudflareCredentials, DnsRecord, NewRecord, RecordType, UpdateRecord, Zone,
};
pub use util::{mask_secret, truncate_for_log};
