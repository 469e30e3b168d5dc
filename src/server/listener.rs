use std::sync::Arc;

use tokio::net::TcpListener;
use tracing::info;

use crate::config::{Config, ServerConfig};
use crate::http::connection::Connection;
use crate::pot::BrewHandler;

pub async fn run(cfg: &Config, handler: Arc<BrewHandler>) -> anyhow::Result<()> {
    let listener = TcpListener::bind(&cfg.server.listen_addr).await?;
    info!("Listening on {}", listener.local_addr()?);

    serve(listener, handler, cfg.server.clone()).await
}

/// Accepts connections on an already bound listener, one task each.
pub async fn serve(
    listener: TcpListener,
    handler: Arc<BrewHandler>,
    server: ServerConfig,
) -> anyhow::Result<()> {
    loop {
        let (socket, peer) = listener.accept().await?;
        info!("Accepted connection from {}", peer);

        let handler = handler.clone();
        let server = server.clone();
        tokio::spawn(async move {
            let mut conn = Connection::new(socket, handler, &server);
            if let Err(e) = conn.run().await {
                tracing::error!("Connection error from {}: {:#}", peer, e);
            }
        });
    }
}
