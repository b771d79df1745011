//! Open-API backed implementation of [`RemoteConfigClient`].

use async_trait::async_trait;
use tokio::sync::mpsc;
use tracing::{debug, warn};

use flowgate_core::RemoteConfig;

use super::{ConfigItem, FetchError, RemoteConfigClient};

/// Buffered values per watch before the poll loop awaits the consumer.
const WATCH_CHANNEL_CAPACITY: usize = 16;

/// HTTP client for the config service's open API.
///
/// `namespace_items` is a single GET; `watch` is a polling loop that
/// pushes a value into the channel whenever the watched key's value
/// differs from the last one seen. Poll failures are logged and retried
/// on the next tick, so a flaky network never tears down a subscription.
#[derive(Clone)]
pub struct HttpConfigClient {
    client: reqwest::Client,
}

impl HttpConfigClient {
    pub fn new() -> Self {
        Self {
            client: reqwest::Client::new(),
        }
    }

    fn items_url(&self, config: &RemoteConfig) -> String {
        format!(
            "{}/openapi/v1/envs/{}/apps/{}/clusters/{}/namespaces/{}/items",
            config.server_address,
            config.environment,
            config.app_id,
            config.cluster,
            config.namespace
        )
    }

    async fn fetch_items(&self, config: &RemoteConfig) -> Result<Vec<ConfigItem>, FetchError> {
        let url = self.items_url(config);
        debug!("fetching namespace items from {}", url);

        let mut request = self.client.get(&url).header("Content-Type", "application/json");
        if let Some(token) = &config.token {
            request = request.header("Authorization", token.clone());
        }

        let response = request.send().await?;
        let status = response.status().as_u16();
        if status != 200 {
            let body = response.text().await.unwrap_or_default();
            return Err(FetchError::Api { status, body });
        }

        let items: Vec<ConfigItem> = response.json().await?;
        Ok(items)
    }
}

impl Default for HttpConfigClient {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl RemoteConfigClient for HttpConfigClient {
    async fn namespace_items(&self, config: &RemoteConfig) -> Result<Vec<ConfigItem>, FetchError> {
        self.fetch_items(config).await
    }

    async fn watch(
        &self,
        config: &RemoteConfig,
        key: &str,
    ) -> Result<mpsc::Receiver<String>, FetchError> {
        let (tx, rx) = mpsc::channel(WATCH_CHANNEL_CAPACITY);
        let client = self.clone();
        let config = config.clone();
        let key = key.to_string();
        let interval = config.poll_interval();

        tokio::spawn(async move {
            // A missing key reads as empty string, so "key deleted" is a
            // change like any other.
            let mut last_seen: Option<String> = None;
            loop {
                match client.fetch_items(&config).await {
                    Ok(items) => {
                        let value = items
                            .into_iter()
                            .find(|item| item.key == key)
                            .map(|item| item.value)
                            .unwrap_or_default();
                        if last_seen.as_deref() != Some(value.as_str()) {
                            last_seen = Some(value.clone());
                            if tx.send(value).await.is_err() {
                                debug!(key = %key, "watch receiver dropped, stopping poll loop");
                                break;
                            }
                        }
                    }
                    Err(e) => {
                        warn!(key = %key, error = %e, "poll failed, retrying next tick");
                    }
                }
                tokio::time::sleep(interval).await;
            }
        });

        Ok(rx)
    }
}
