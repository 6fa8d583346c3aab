use std::sync::Arc;

use anyhow::Context;

use provider_profiles::config::Config;
use provider_profiles::server::profile_routes;
use provider_profiles::store::{LibSqlBackend, ProfileStore};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_target(false)
        .init();

    let config = Config::from_env().context("Failed to load configuration")?;

    let store: Arc<dyn ProfileStore> = Arc::new(
        LibSqlBackend::new_local(&config.db_path)
            .await
            .with_context(|| {
                format!("Failed to open database at {}", config.db_path.display())
            })?,
    );

    tracing::info!(
        port = config.port,
        base = %config.public_base_url,
        "Serving public profiles at {}/p/{{slug}}",
        config.public_base_url
    );

    let app = profile_routes(store);
    let listener = tokio::net::TcpListener::bind(("0.0.0.0", config.port))
        .await
        .with_context(|| format!("Failed to bind port {}", config.port))?;
    axum::serve(listener, app)
        .await
        .context("Server terminated")?;

    Ok(())
}
