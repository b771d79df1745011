use std::env;
use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Load .env file (silently ignores if missing).
pub fn load_dotenv() {
    dotenvy::dotenv().ok();
}

fn env_or(key: &str, default: &str) -> String {
    env::var(key).unwrap_or_else(|_| default.to_string())
}

fn env_opt(key: &str) -> Option<String> {
    env::var(key).ok().filter(|s| !s.is_empty())
}

fn env_u64(key: &str, default: u64) -> u64 {
    env_opt(key).and_then(|v| v.parse().ok()).unwrap_or(default)
}

// ── Remote config store addressing ────────────────────────────

/// Addressing and identity for one remote config-store binding.
///
/// One value of this struct fully identifies a (server, app, environment,
/// cluster, namespace) tuple. It is passed explicitly to the client,
/// provider, and bridge, so independent bindings (e.g. in tests) never
/// share hidden state.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RemoteConfig {
    /// Base URL of the remote configuration service.
    pub server_address: String,
    /// Open-API bearer token. Optional for unauthenticated test servers.
    pub token: Option<String>,
    /// Application id owning the namespace.
    pub app_id: String,
    /// Environment name (e.g. `DEV`, `PROD`).
    pub environment: String,
    /// Cluster within the environment.
    pub cluster: String,
    /// Namespace holding the rule keys.
    pub namespace: String,
    /// Poll interval for the watch loop, in seconds.
    pub poll_interval_secs: u64,
}

impl RemoteConfig {
    /// Build config from environment variables (call `load_dotenv()` first).
    pub fn from_env() -> Self {
        Self {
            server_address: env_or("CONFIG_SERVER_ADDR", "http://localhost:8070"),
            token: env_opt("CONFIG_TOKEN"),
            app_id: env_or("CONFIG_APP_ID", "SampleApp"),
            environment: env_or("CONFIG_ENV", "DEV"),
            cluster: env_or("CONFIG_CLUSTER", "default"),
            namespace: env_or("CONFIG_NAMESPACE", "application"),
            poll_interval_secs: env_u64("CONFIG_POLL_INTERVAL_SECS", 5),
        }
    }

    /// Poll interval as a [`Duration`].
    pub fn poll_interval(&self) -> Duration {
        Duration::from_secs(self.poll_interval_secs.max(1))
    }

    /// Print a redacted summary for startup logs (token never shown).
    pub fn log_summary(&self) {
        tracing::info!("Remote config binding:");
        tracing::info!("  server:     {}", self.server_address);
        tracing::info!(
            "  identity:   app={}, env={}, cluster={}",
            self.app_id,
            self.environment,
            self.cluster
        );
        tracing::info!("  namespace:  {}", self.namespace);
        tracing::info!(
            "  auth:       {}",
            if self.token.is_some() { "token set" } else { "none" }
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn poll_interval_never_zero() {
        let mut cfg = RemoteConfig {
            server_address: "http://localhost:8070".into(),
            token: None,
            app_id: "SampleApp".into(),
            environment: "DEV".into(),
            cluster: "default".into(),
            namespace: "application".into(),
            poll_interval_secs: 0,
        };
        assert_eq!(cfg.poll_interval(), Duration::from_secs(1));
        cfg.poll_interval_secs = 30;
        assert_eq!(cfg.poll_interval(), Duration::from_secs(30));
    }
}
