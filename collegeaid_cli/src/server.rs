use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Result;
use clap::Args;
use collegeaid_lib::config::ServerConfig;
use collegeaid_lib::AidClient;
use tokio::net::TcpListener;
use tracing::{info, warn};

use crate::routes;

#[derive(Args)]
pub struct ServeArgs {
    /// Interface to bind (defaults to HOST or 127.0.0.1)
    #[arg(long)]
    pub host: Option<String>,

    /// Port to listen on (defaults to PORT or 5174)
    #[arg(long)]
    pub port: Option<u16>,
}

impl ServeArgs {
    fn apply(&self, mut server: ServerConfig) -> ServerConfig {
        if let Some(host) = &self.host {
            server.host = host.clone();
        }
        if let Some(port) = self.port {
            server.port = port;
        }
        server
    }
}

pub async fn run(args: &ServeArgs, server: ServerConfig, client: AidClient) -> Result<()> {
    let addr = args.apply(server).socket_addr()?;
    if !client.has_api_key() {
        warn!("DATAGOV_API_KEY is not set; data requests will be rejected");
    }

    let app = routes::router(Arc::new(client));
    let (listener, bound) = bind(addr).await?;
    info!("listening on http://{}", bound);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    info!("server stopped");
    Ok(())
}

/// Binds `addr` and reports the address actually bound, which differs for port 0.
async fn bind(addr: SocketAddr) -> Result<(TcpListener, SocketAddr)> {
    let listener = TcpListener::bind(addr).await?;
    let bound = listener.local_addr()?;
    Ok((listener, bound))
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!("failed to listen for ctrl-c: {}", e);
        std::future::pending::<()>().await;
    }
}
