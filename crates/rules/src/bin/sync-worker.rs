//! sync-worker — keeps a local flow-rule registry in sync with the remote
//! config store for one application.
//!
//! Binds a `PropertyBridge` at startup and then idles, logging a periodic
//! rule-count heartbeat until ctrl-c.

use std::sync::Arc;
use std::time::Duration;

use clap::Parser;
use tracing::info;

use flowgate_core::{config::load_dotenv, RemoteConfig};
use flowgate_rules::bridge::PropertyBridge;
use flowgate_rules::keys::flow_rule_key;
use flowgate_rules::registry::LocalRuleRegistry;
use flowgate_rules::remote::HttpConfigClient;

// ── CLI ─────────────────────────────────────────────────────────────

/// Flow-rule sync worker — watches one application's rules.
#[derive(Parser, Debug)]
#[command(name = "sync-worker", version, about)]
struct Cli {
    /// Application name whose flow rules to watch.
    #[arg(long, env = "SYNC_APP_NAME", default_value = "SampleApp")]
    app_name: String,

    /// Heartbeat interval in seconds.
    #[arg(long, env = "SYNC_HEARTBEAT_SECS", default_value_t = 30)]
    heartbeat_secs: u64,
}

// ── main ────────────────────────────────────────────────────────────

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    load_dotenv();
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();
    let config = RemoteConfig::from_env();
    config.log_summary();

    let client = Arc::new(HttpConfigClient::new());
    let registry = Arc::new(LocalRuleRegistry::new());
    let key = flow_rule_key(&cli.app_name);

    let bridge =
        PropertyBridge::bind(client, config, key.clone(), Arc::clone(&registry)).await?;
    info!(key = %key, rules = registry.len(), "bridge bound, entering sync loop");

    let mut heartbeat = tokio::time::interval(Duration::from_secs(cli.heartbeat_secs.max(1)));
    heartbeat.tick().await; // first tick fires immediately
    loop {
        tokio::select! {
            _ = heartbeat.tick() => {
                info!(key = %key, rules = bridge.registry().len(), "sync heartbeat");
            }
            _ = tokio::signal::ctrl_c() => {
                info!("shutting down sync worker");
                break;
            }
        }
    }

    Ok(())
}
