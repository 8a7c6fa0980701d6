//! Contract gateway server binary.
//!
//! ```text
//!                    ┌──────────────────────────────────────────────┐
//!                    │               CAMPUS GATEWAY                  │
//!                    │                                               │
//!   HTTP / form ─────┼─▶ http ──▶ contract binding ──▶ reader ──────┼──▶ eth_call
//!   CLI (via HTTP)   │              (address + ABI)     writer ─────┼──▶ sign + broadcast
//!                    │                   ▲                           │
//!                    │            facade │ fixed university          │
//!                    │            ops    │ contracts (registry)      │
//!                    │                                               │
//!                    │  config · observability · wallet · node client│
//!                    └──────────────────────────────────────────────┘
//! ```

use std::path::Path;
use std::sync::Arc;
use tokio::net::TcpListener;

use campus_gateway::blockchain::{NodeClient, Wallet};
use campus_gateway::config::{load_config, GatewayConfig};
use campus_gateway::contract::{Reader, Writer};
use campus_gateway::facade::UniversityFacade;
use campus_gateway::http::{AppState, HttpServer};
use campus_gateway::observability;
use campus_gateway::registry::ContractRegistry;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Config file path from the first argument, default path otherwise.
    let config_path = std::env::args().nth(1).unwrap_or_else(|| "campus-gateway.toml".to_string());
    let config = if Path::new(&config_path).exists() {
        load_config(Path::new(&config_path))?
    } else {
        GatewayConfig::default()
    };

    observability::logging::init(&config.observability.log_level);

    tracing::info!(
        config_path = %config_path,
        bind_address = %config.listener.bind_address,
        rpc_url = %config.chain.rpc_url,
        chain_id = config.chain.chain_id,
        "campus-gateway v0.1.0 starting"
    );

    if config.observability.metrics_enabled {
        match config.observability.metrics_address.parse() {
            Ok(addr) => observability::metrics::init_metrics(addr),
            Err(_) => tracing::error!(
                metrics_address = %config.observability.metrics_address,
                "Failed to parse metrics address"
            ),
        }
    }

    // Explicit construction, injected everywhere; no ambient globals.
    let client = NodeClient::connect(&config.chain).await?;
    let wallet = Wallet::from_env(&config.signer.key_env)?;
    let registry = ContractRegistry::load(&config.artifacts)?;

    let reader = Reader::new(client.clone());
    let writer = Writer::new(client.clone(), wallet, &config.chain);
    let facade = Arc::new(UniversityFacade::new(
        registry,
        reader.clone(),
        writer.clone(),
    )?);

    let state = AppState {
        client,
        reader,
        writer,
        facade,
    };

    let listener = TcpListener::bind(&config.listener.bind_address).await?;
    tracing::info!(address = %listener.local_addr()?, "Listening for connections");

    let server = HttpServer::new(&config, state);
    server.run(listener).await?;

    tracing::info!("Shutdown complete");
    Ok(())
}
