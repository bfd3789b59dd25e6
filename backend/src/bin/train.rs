//! FarmTech Irrigation Pipeline - Batch Trainer
//!
//! Operator-run binary: fits the irrigation classifier from stored
//! readings (or synthetic data when the store is empty) and atomically
//! replaces the model artifact. The predictor server picks up the new
//! artifact on its next start.

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use farmtech_backend::services::Trainer;
use farmtech_backend::store::SensorStore;
use farmtech_backend::Config;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "farmtech_backend=info,sqlx=warn".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    dotenvy::dotenv().ok();
    let config = Config::load()?;

    tracing::info!("Starting irrigation model training");
    tracing::info!("Store: {}", config.database.path);
    tracing::info!("Artifact: {}", config.model.artifact_path);

    let store = SensorStore::connect(&config.database).await?;
    store.init_schema().await?;

    let trainer = Trainer::new(store, &config.model.artifact_path);
    let report = trainer.train().await?;

    tracing::info!(
        total = report.total_samples,
        train = report.train_samples,
        test = report.test_samples,
        synthetic = report.synthetic,
        "training complete, test accuracy {:.2}%",
        report.accuracy * 100.0
    );

    Ok(())
}
