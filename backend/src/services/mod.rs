//! Business logic services for the FarmTech irrigation pipeline

pub mod ingestion;
pub mod predictor;
pub mod trainer;

pub use ingestion::IngestionService;
pub use predictor::PredictorService;
pub use trainer::Trainer;
