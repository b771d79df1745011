//! Integration test: pull provider and push bridge working against the
//! same mock remote store, end to end through the public API.

use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use tokio::sync::mpsc;

use flowgate_core::RemoteConfig;
use flowgate_rules::bridge::PropertyBridge;
use flowgate_rules::keys::flow_rule_key;
use flowgate_rules::provider::FlowRuleProvider;
use flowgate_rules::registry::LocalRuleRegistry;
use flowgate_rules::remote::{ConfigItem, FetchError, RemoteConfigClient};

fn test_config() -> RemoteConfig {
    RemoteConfig {
        server_address: "http://localhost:8070".into(),
        token: None,
        app_id: "SampleApp".into(),
        environment: "DEV".into(),
        cluster: "default".into(),
        namespace: "application".into(),
        poll_interval_secs: 1,
    }
}

/// In-memory remote store: mutable items plus test-driven watch deliveries.
struct FakeStore {
    items: Mutex<Vec<ConfigItem>>,
    watch_tx: Mutex<Option<mpsc::Sender<String>>>,
}

impl FakeStore {
    fn new(items: Vec<(&str, &str)>) -> Arc<Self> {
        Arc::new(Self {
            items: Mutex::new(
                items
                    .into_iter()
                    .map(|(key, value)| ConfigItem {
                        key: key.to_string(),
                        value: value.to_string(),
                    })
                    .collect(),
            ),
            watch_tx: Mutex::new(None),
        })
    }

    /// Update a key's value and notify the watcher, like a real remote would.
    async fn publish(&self, key: &str, value: &str) {
        {
            let mut items = self.items.lock().unwrap();
            match items.iter_mut().find(|item| item.key == key) {
                Some(item) => item.value = value.to_string(),
                None => items.push(ConfigItem {
                    key: key.to_string(),
                    value: value.to_string(),
                }),
            }
        }
        let tx = self.watch_tx.lock().unwrap().clone();
        if let Some(tx) = tx {
            tx.send(value.to_string()).await.unwrap();
        }
    }
}

#[async_trait]
impl RemoteConfigClient for FakeStore {
    async fn namespace_items(&self, _config: &RemoteConfig) -> Result<Vec<ConfigItem>, FetchError> {
        Ok(self.items.lock().unwrap().clone())
    }

    async fn watch(
        &self,
        _config: &RemoteConfig,
        _key: &str,
    ) -> Result<mpsc::Receiver<String>, FetchError> {
        let (tx, rx) = mpsc::channel(16);
        *self.watch_tx.lock().unwrap() = Some(tx);
        Ok(rx)
    }
}

async fn wait_for_len(registry: &LocalRuleRegistry, len: usize) {
    for _ in 0..100 {
        if registry.len() == len {
            return;
        }
        tokio::time::sleep(Duration::from_millis(10)).await;
    }
    panic!("registry never reached {} rules (at {})", len, registry.len());
}

#[tokio::test]
async fn provider_and_bridge_see_the_same_store() {
    let key = flow_rule_key("OrderService");
    let store = FakeStore::new(vec![
        ("other-key", "x"),
        (&key, r#"[{"resource":"/pay","count":100}]"#),
    ]);

    // Pull path.
    let provider = FlowRuleProvider::new(Arc::clone(&store), test_config());
    let rules = provider.get_rules("OrderService").await.unwrap();
    assert_eq!(rules.len(), 1);
    assert_eq!(rules[0].resource, "/pay");
    assert_eq!(rules[0].count, 100.0);

    // Push path: bind populates from the same value.
    let registry = Arc::new(LocalRuleRegistry::new());
    let _bridge = PropertyBridge::bind(
        Arc::clone(&store),
        test_config(),
        key.clone(),
        Arc::clone(&registry),
    )
    .await
    .unwrap();
    assert_eq!(registry.len(), 1);

    // A remote publish reaches both consumers.
    store
        .publish(
            &key,
            r#"[{"resource":"/pay","count":200},{"resource":"/refund","count":50}]"#,
        )
        .await;
    wait_for_len(&registry, 2).await;

    let pulled = provider.get_rules("OrderService").await.unwrap();
    assert_eq!(pulled.len(), 2);
    assert_eq!(pulled[0].count, 200.0);

    // A bad publish corrupts neither consumer's view.
    store.publish(&key, "garbage {{{").await;
    tokio::time::sleep(Duration::from_millis(100)).await;
    assert_eq!(registry.len(), 2);
    assert!(provider.get_rules("OrderService").await.is_err());
}
