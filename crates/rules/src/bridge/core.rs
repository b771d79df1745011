//! Core [`PropertyBridge`]: keeps the local registry synced with one remote key.

use std::sync::Arc;

use tokio::task::JoinHandle;
use tracing::{info, warn};

use flowgate_core::RemoteConfig;

use crate::convert::convert;
use crate::registry::LocalRuleRegistry;
use crate::remote::{FetchError, RemoteConfigClient};

/// Errors that can abort a bind.
///
/// Decode problems are deliberately absent: a bad payload is logged and
/// skipped, it never fails the bind or the watch loop.
#[derive(Debug, thiserror::Error)]
pub enum BridgeError {
    /// The initial fetch or the watch subscription could not be established.
    #[error("bind failed: {0}")]
    Fetch(#[from] FetchError),
}

/// Standing subscription from one remote config key into the registry.
///
/// Built once at startup via [`bind`](Self::bind) and then driven by the
/// remote's change deliveries for the life of the process. Each binding
/// carries its own [`RemoteConfig`], so independent bridges (e.g. one
/// per test) never share state.
pub struct PropertyBridge {
    registry: Arc<LocalRuleRegistry>,
    /// Held so the apply loop lives exactly as long as the bridge.
    _apply_task: JoinHandle<()>,
}

impl PropertyBridge {
    /// Bind `key` in the configured namespace to `registry`.
    ///
    /// Performs one initial fetch-and-apply so the registry is populated
    /// before returning, then spawns a single consumer over the watch
    /// channel. One consumer per key means deliveries are applied
    /// strictly in delivery order: a stale value can never overwrite a
    /// newer one.
    pub async fn bind<C>(
        client: Arc<C>,
        config: RemoteConfig,
        key: String,
        registry: Arc<LocalRuleRegistry>,
    ) -> Result<Self, BridgeError>
    where
        C: RemoteConfigClient + 'static,
    {
        info!(
            namespace = %config.namespace,
            key = %key,
            server = %config.server_address,
            "binding property bridge"
        );

        // Initial fetch-and-apply. A fetch failure aborts the bind; a
        // decode failure does not (the registry just stays empty).
        let items = client.namespace_items(&config).await?;
        let initial = items
            .into_iter()
            .find(|item| item.key == key)
            .map(|item| item.value)
            .unwrap_or_default();
        apply(&registry, &key, &initial);

        let mut deliveries = client.watch(&config, &key).await?;
        let task_registry = Arc::clone(&registry);
        let task_key = key.clone();
        let apply_task = tokio::spawn(async move {
            while let Some(value) = deliveries.recv().await {
                apply(&task_registry, &task_key, &value);
            }
            info!(key = %task_key, "watch channel closed, bridge loop ended");
        });

        Ok(Self {
            registry,
            _apply_task: apply_task,
        })
    }

    /// The registry this bridge publishes into.
    pub fn registry(&self) -> Arc<LocalRuleRegistry> {
        Arc::clone(&self.registry)
    }
}

/// Decode one delivered value and republish it into the registry.
///
/// A well-formed payload replaces the rule set wholesale (`[]` and the
/// empty string both mean "no rules" and are honored). A malformed
/// payload is logged and the previous rule set is kept.
fn apply(registry: &LocalRuleRegistry, key: &str, raw: &str) {
    match convert(raw) {
        Ok(rules) => {
            info!(key = %key, count = rules.len(), "applied rule update");
            registry.replace(rules);
        }
        Err(e) => {
            warn!(key = %key, error = %e, "undecodable rule update, keeping previous rules");
        }
    }
}
