//! Standalone HTTP server for the catalog endpoints.

use std::{net::SocketAddr, sync::Arc};

use anyhow::Context;
use backend::{api::catalog::default_backend, server_extra::catalog_routes::catalog_router};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "backend=info,catalog_server=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let backend = Arc::new(default_backend());
    tracing::info!("catalog config: {:?}", backend.config);
    let app = catalog_router(backend);

    let host = std::env::var("HOST").unwrap_or_else(|_| "0.0.0.0".into());
    let port: u16 = std::env::var("PORT")
        .unwrap_or_else(|_| "3000".into())
        .parse()
        .context("PORT must be a number")?;
    let addr = SocketAddr::new(host.parse().context("Invalid HOST")?, port);
    tracing::info!("Starting catalog server on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;
    Ok(())
}
