//! roblox-proxy
//!
//! Forwards `/{subdomain}/{path}` to `https://{subdomain}.roblox.com/{path}`.
//!
//! # Architecture Overview
//!
//! ```text
//!                     ┌──────────────────────────────────────────────────────┐
//!                     │                     PROXY                            │
//!                     │                                                      │
//!   Client Request    │  ┌──────────┐   ┌──────────┐   ┌──────────────┐      │
//!   ──────────────────┼─▶│ security │──▶│ routing  │──▶│    cache     │──┐   │
//!                     │  │ PROXYKEY │   │ resolver │   │   lookup     │  │   │
//!                     │  └──────────┘   └──────────┘   └──────┬───────┘  │   │
//!                     │       │ 407          │ 400            │ hit      │   │
//!                     │       ▼              ▼                ▼          │   │
//!   Client Response   │  ┌──────────────────────────────────────────┐    │   │
//!   ◀─────────────────┼──│              http::response              │    │   │
//!                     │  └──────────────────────────────────────────┘    │   │
//!                     │                       ▲                          │   │
//!                     │                       │ response / 500     miss  │   │
//!                     │                ┌──────┴───────┐                  │   │
//!                     │                │   upstream   │◀─────────────────┘   │
//!                     │                │  forwarder   │──── store 200 ──▶ cache
//!                     │                │  + retries   │                      │
//!                     │                └──────┬───────┘                      │
//!                     └───────────────────────┼──────────────────────────────┘
//!                                             ▼
//!                                 https://{subdomain}.roblox.com
//! ```

use roblox_proxy::config;
use roblox_proxy::lifecycle::startup;
use roblox_proxy::observability::logging;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = match config::load_from_env() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Invalid configuration: {e}");
            return Err(e.into());
        }
    };

    logging::init(&config.observability);

    tracing::info!(
        bind_address = %config.listener.bind_address,
        timeout_secs = config.timeouts.request_secs,
        retries = config.retries.max_retries,
        cache_ttl_secs = config.cache.ttl_secs,
        "Configuration loaded"
    );

    if let Err(e) = startup::run(config).await {
        tracing::error!(error = %e, "Fatal startup error");
        return Err(e.into());
    }

    tracing::info!("Shutdown complete");
    Ok(())
}
