//! FarmTech Irrigation Pipeline - Predictor Server
//!
//! Loads the model artifact once at startup and serves sensor ingestion
//! and on-demand irrigation predictions over HTTP.

use std::net::SocketAddr;
use std::path::Path;
use std::sync::Arc;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use farmtech_backend::ml::ModelArtifact;
use farmtech_backend::store::SensorStore;
use farmtech_backend::{create_app, AppState, Config};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "farmtech_backend=debug,tower_http=debug,sqlx=warn".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load configuration
    dotenvy::dotenv().ok();
    let config = Config::load()?;

    tracing::info!("Starting FarmTech predictor server");
    tracing::info!("Environment: {}", config.environment);

    // Open the store and make sure the schema exists
    tracing::info!("Opening store at {}", config.database.path);
    let store = SensorStore::connect(&config.database).await?;
    store.init_schema().await?;
    tracing::info!("Store initialized");

    // Load the model artifact once. A missing or corrupt artifact leaves
    // the service degraded: /health and /sensor-data stay up, /predict
    // answers ModelUnavailable.
    let model = match ModelArtifact::load(Path::new(&config.model.artifact_path)) {
        Ok(artifact) => {
            tracing::info!(
                path = %config.model.artifact_path,
                accuracy = artifact.test_accuracy,
                synthetic = artifact.synthetic,
                "model artifact loaded"
            );
            Some(Arc::new(artifact))
        }
        Err(e) => {
            tracing::error!("Failed to load model artifact: {}", e);
            None
        }
    };

    // Create application state
    let state = AppState {
        store,
        model,
        config: Arc::new(config.clone()),
    };

    // Build application
    let app = create_app(state);

    // Start server
    let addr = SocketAddr::new(config.server.host.parse()?, config.server.port);
    tracing::info!("Listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
