//! Core [`FlowRuleProvider`]: on-demand fetch-and-convert for one application.

use std::sync::Arc;

use tracing::debug;

use flowgate_core::RemoteConfig;

use crate::convert::convert;
use crate::keys::flow_rule_key;
use crate::remote::RemoteConfigClient;
use crate::schema::FlowRule;

use super::error::Result;

/// Pull accessor over the remote config store.
///
/// Stateless apart from its client handle and binding: each call derives
/// the application's config key, reads the namespace, and converts the
/// matching value. Safe to call concurrently from multiple tasks.
pub struct FlowRuleProvider<C> {
    client: Arc<C>,
    config: RemoteConfig,
}

impl<C: RemoteConfigClient> FlowRuleProvider<C> {
    pub fn new(client: Arc<C>, config: RemoteConfig) -> Self {
        Self { client, config }
    }

    /// Fetch the current flow rules for `app_name`.
    ///
    /// A namespace that does not contain the derived key is a normal
    /// condition (key not configured yet) and yields an empty set.
    /// Should the remote ever deliver duplicate keys, the first match in
    /// its delivery order wins; later duplicates are ignored.
    pub async fn get_rules(&self, app_name: &str) -> Result<Vec<FlowRule>> {
        let key = flow_rule_key(app_name);

        let items = self.client.namespace_items(&self.config).await?;
        let raw = items
            .into_iter()
            .find(|item| item.key == key)
            .map(|item| item.value)
            .unwrap_or_default();

        debug!(app = %app_name, key = %key, bytes = raw.len(), "resolved rule payload");
        Ok(convert(&raw)?)
    }
}
