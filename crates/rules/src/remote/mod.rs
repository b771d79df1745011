//! Remote config-store client seam.
//!
//! `RemoteConfigClient` is the trait boundary between this crate and the
//! actual configuration service; `HttpConfigClient` is the bundled
//! open-API implementation. Tests swap in mocks at the same seam.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tokio::sync::mpsc;

use flowgate_core::RemoteConfig;

mod http;

pub use http::HttpConfigClient;

/// One key/value entry of a remote namespace.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ConfigItem {
    pub key: String,
    pub value: String,
}

/// Errors surfaced by a remote config client.
#[derive(Debug, thiserror::Error)]
pub enum FetchError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("remote config API error: {status}: {body}")]
    Api { status: u16, body: String },
    #[error("watch subscription failed: {0}")]
    Subscribe(String),
}

/// Trait for remote config-store backends.
#[async_trait]
pub trait RemoteConfigClient: Send + Sync {
    /// Fetch every item of the bound namespace, in the remote's
    /// delivery order. Connection, auth, and missing-namespace failures
    /// all surface as [`FetchError`].
    async fn namespace_items(&self, config: &RemoteConfig) -> Result<Vec<ConfigItem>, FetchError>;

    /// Subscribe to one key. Every new value of the key is delivered on
    /// the returned channel, strictly in order; transient fetch failures
    /// are retried by the client and never appear as values. The
    /// subscription ends when the receiver is dropped.
    async fn watch(
        &self,
        config: &RemoteConfig,
        key: &str,
    ) -> Result<mpsc::Receiver<String>, FetchError>;
}
