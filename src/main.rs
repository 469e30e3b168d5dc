use std::sync::Arc;

use htcpcp::config::Config;
use htcpcp::pot::{BrewHandler, PotRegistry};
use htcpcp::server;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_target(false)
        .with_level(true)
        .init();

    let cfg = Config::load()?;
    let registry = PotRegistry::from_config(&cfg.pots)?;
    let handler = Arc::new(BrewHandler::new(registry));

    tokio::select! {
        res = server::listener::run(&cfg, handler) => {
            res?;
        }

        _ = tokio::signal::ctrl_c() => {
            tracing::info!("Shutdown signal received");
        }
    }

    Ok(())
}
