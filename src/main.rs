//! Authorization relay service entry point.

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;
use tokio::net::TcpListener;

use auth_relay::config::{loader::load_config, RelayConfig};
use auth_relay::endpoints::HttpEndpointResolver;
use auth_relay::http::HttpServer;
use auth_relay::observability;
use auth_relay::outbound::HttpRequestSender;
use auth_relay::relay::Relay;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Config path from the first argument; defaults when absent.
    let config = match std::env::args().nth(1).map(PathBuf::from) {
        Some(path) => load_config(&path)?,
        None => RelayConfig::default(),
    };

    observability::logging::init(&config.observability);

    tracing::info!(
        bind_address = %config.listener.bind_address,
        endpoint_service = %config.endpoint_service.url,
        switch_participant = %config.switch.participant_id,
        "Configuration loaded"
    );

    let resolver = HttpEndpointResolver::new(
        config.endpoint_service.url.clone(),
        Duration::from_secs(config.endpoint_service.timeout_secs),
    )?;
    let sender = HttpRequestSender::new(Duration::from_secs(
        config.outbound.request_timeout_secs,
    ))?;
    let relay = Arc::new(Relay::new(
        Arc::new(resolver),
        Arc::new(sender),
        config.switch.participant_id.clone(),
        config.error_handling.clone(),
    ));

    let listener = TcpListener::bind(&config.listener.bind_address).await?;
    let local_addr = listener.local_addr()?;
    tracing::info!(address = %local_addr, "Listening for connections");

    let server = HttpServer::new(config, relay);
    server.run(listener).await?;

    tracing::info!("Shutdown complete");
    Ok(())
}
