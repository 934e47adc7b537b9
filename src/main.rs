use anyhow::Context;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::RwLock;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use user_mesh::prelude::*;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "user_mesh=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = AppConfig::load(&ConfigService::new())?;
    tracing::info!("Starting user-mesh on {}", config.bind_addr());

    let database = Arc::new(RwLock::new(Database::new(config.database.clone())));

    let app = Application::builder()
        .register_lifecycle(Arc::clone(&database), "Database")
        .init_timeout(Duration::from_secs(30))
        .build()
        .await
        .context("failed to initialize application")?;

    let users = UserModule::from_connection(database.read().await.connection()?);
    let router = build_router(&[&users]);

    let listener = tokio::net::TcpListener::bind(config.bind_addr())
        .await
        .with_context(|| format!("failed to bind {}", config.bind_addr()))?;
    tracing::info!("Server running on http://{}", listener.local_addr()?);

    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Initiating graceful shutdown...");
    app.shutdown().await?;
    tracing::info!("Server stopped");
    Ok(())
}
