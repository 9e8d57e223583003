//! Server binary for the did:key HTTP resolver.

use std::sync::Arc;

use did_key_resolver::http::{self, AppState};
use did_key_resolver::{RemoteDidIo, Resolver, ServerConfig};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "did_key_resolver=info,tower_http=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = ServerConfig::from_env()?;
    info!(
        provider = %config.provider_endpoint,
        methods = ?config.resolver.supported_methods,
        "starting did resolver"
    );

    let provider = Arc::new(RemoteDidIo::new(config.provider_endpoint.clone()));
    let resolver = Resolver::new(config.resolver.clone(), provider);
    let state = Arc::new(AppState { resolver });

    http::serve(&config, state).await?;

    Ok(())
}
