use std::sync::Arc;

use anyhow::{Context, Result};
use bidwin::{bids::ReqwestSenderFactory, server, Aggregator, Config};
use log::info;
use tokio::net::TcpListener;

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config = Config::from_env()?;
    let aggregator = Aggregator::new(Arc::new(ReqwestSenderFactory::new(config.timeout)));

    let listener = TcpListener::bind(config.addr)
        .await
        .with_context(|| format!("Cannot bind {}", config.addr))?;
    info!(
        "Server starting on {} (source timeout {:?}) ...",
        config.addr, config.timeout
    );
    axum::serve(listener, server::router(aggregator))
        .with_graceful_shutdown(server::shutdown_signal())
        .await?;
    info!("Server is stopped");
    Ok(())
}
