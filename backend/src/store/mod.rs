//! Persisted store for readings, irrigation events, and predictions
//!
//! One SQLite file holds the three append-only collections. Every append
//! is a single durable row; SQLite's single-writer transaction semantics
//! serialize concurrent appends through the pool.

use std::str::FromStr;
use std::time::Duration;

use chrono::{DateTime, Utc};
use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions};
use sqlx::{Pool, Sqlite};

use shared::models::{
    IrrigationEvent, NewIrrigationEvent, NewPrediction, NewSensorReading, Prediction,
    SensorReading, TriggerType,
};

use crate::config::DatabaseConfig;
use crate::error::{AppError, AppResult};

/// Handle to the persisted store.
#[derive(Clone)]
pub struct SensorStore {
    pool: Pool<Sqlite>,
}

/// One projected feature row for training. Columns may be NULL when a row
/// was written by something other than the ingestion path; the trainer
/// drops those.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct FeatureRow {
    pub soil_moisture: Option<f64>,
    pub temperature: Option<f64>,
    pub humidity: Option<f64>,
    pub ph_soil: Option<f64>,
    pub nutrient_level: Option<f64>,
    pub irrigation_active: Option<bool>,
}

impl FeatureRow {
    /// Dense (features, label) pair, or None when any column is missing.
    pub fn complete(&self) -> Option<([f64; 5], bool)> {
        Some((
            [
                self.soil_moisture?,
                self.temperature?,
                self.humidity?,
                self.ph_soil?,
                self.nutrient_level?,
            ],
            self.irrigation_active?,
        ))
    }
}

#[derive(Debug, Clone, sqlx::FromRow)]
struct SensorReadingRow {
    id: i64,
    timestamp: DateTime<Utc>,
    soil_moisture: f64,
    temperature: f64,
    humidity: f64,
    ph_soil: f64,
    nutrient_level: f64,
    rainfall: f64,
    irrigation_active: bool,
    system_error: bool,
}

impl From<SensorReadingRow> for SensorReading {
    fn from(row: SensorReadingRow) -> Self {
        Self {
            id: row.id,
            timestamp: row.timestamp,
            soil_moisture: row.soil_moisture,
            temperature: row.temperature,
            humidity: row.humidity,
            ph_soil: row.ph_soil,
            nutrient_level: row.nutrient_level,
            rainfall: row.rainfall,
            irrigation_active: row.irrigation_active,
            system_error: row.system_error,
        }
    }
}

#[derive(Debug, Clone, sqlx::FromRow)]
struct IrrigationEventRow {
    id: i64,
    timestamp: DateTime<Utc>,
    duration_minutes: f64,
    trigger_type: String,
    soil_moisture_before: f64,
    soil_moisture_after: f64,
    water_amount_ml: f64,
}

impl TryFrom<IrrigationEventRow> for IrrigationEvent {
    type Error = AppError;

    fn try_from(row: IrrigationEventRow) -> Result<Self, Self::Error> {
        let trigger_type = TriggerType::from_str(&row.trigger_type)
            .map_err(|e| AppError::StoreUnavailable(format!("schema mismatch: {}", e)))?;
        Ok(Self {
            id: row.id,
            timestamp: row.timestamp,
            duration_minutes: row.duration_minutes,
            trigger_type,
            soil_moisture_before: row.soil_moisture_before,
            soil_moisture_after: row.soil_moisture_after,
            water_amount_ml: row.water_amount_ml,
        })
    }
}

#[derive(Debug, Clone, sqlx::FromRow)]
struct PredictionRow {
    id: i64,
    timestamp: DateTime<Utc>,
    irrigation_probability: f64,
    irrigation_score: bool,
    recommendation: String,
    actual_irrigation: Option<bool>,
}

impl From<PredictionRow> for Prediction {
    fn from(row: PredictionRow) -> Self {
        Self {
            id: row.id,
            timestamp: row.timestamp,
            irrigation_probability: row.irrigation_probability,
            irrigation_decision: row.irrigation_score,
            recommendation: row.recommendation,
            actual_irrigation: row.actual_irrigation,
        }
    }
}

impl SensorStore {
    /// Wrap an existing pool.
    pub fn new(pool: Pool<Sqlite>) -> Self {
        Self { pool }
    }

    /// Open (creating if missing) the database file from configuration.
    pub async fn connect(config: &DatabaseConfig) -> AppResult<Self> {
        let options = SqliteConnectOptions::new()
            .filename(&config.path)
            .create_if_missing(true)
            .journal_mode(SqliteJournalMode::Wal)
            .busy_timeout(Duration::from_secs(5));

        let pool = SqlitePoolOptions::new()
            .max_connections(config.max_connections)
            .connect_with(options)
            .await
            .map_err(|e| AppError::StoreUnavailable(e.to_string()))?;

        Ok(Self::new(pool))
    }

    /// The underlying pool, for callers that need raw queries.
    pub fn pool(&self) -> &Pool<Sqlite> {
        &self.pool
    }

    /// Create the three tables. Idempotent: re-running against an existing
    /// database neither fails nor destroys data.
    pub async fn init_schema(&self) -> AppResult<()> {
        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS sensor_data (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                timestamp DATETIME,
                soil_moisture REAL,
                temperature REAL,
                humidity REAL,
                ph_soil REAL,
                nutrient_level REAL,
                rainfall REAL,
                irrigation_active BOOLEAN,
                system_error BOOLEAN
            )
            "#,
        )
        .execute(&self.pool)
        .await?;

        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS irrigation_history (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                timestamp DATETIME,
                duration_minutes REAL,
                trigger_type TEXT,
                soil_moisture_before REAL,
                soil_moisture_after REAL,
                water_amount_ml REAL
            )
            "#,
        )
        .execute(&self.pool)
        .await?;

        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS predictions (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                timestamp DATETIME,
                irrigation_probability REAL,
                irrigation_score BOOLEAN,
                recommendation TEXT,
                actual_irrigation BOOLEAN
            )
            "#,
        )
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    /// Append one sensor reading. Durable before return.
    pub async fn append_reading(&self, reading: &NewSensorReading) -> AppResult<i64> {
        let result = sqlx::query(
            r#"
            INSERT INTO sensor_data
            (timestamp, soil_moisture, temperature, humidity, ph_soil, nutrient_level, rainfall, irrigation_active, system_error)
            VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(reading.timestamp)
        .bind(reading.soil_moisture)
        .bind(reading.temperature)
        .bind(reading.humidity)
        .bind(reading.ph_soil)
        .bind(reading.nutrient_level)
        .bind(reading.rainfall)
        .bind(reading.irrigation_active)
        .bind(reading.system_error)
        .execute(&self.pool)
        .await?;

        Ok(result.last_insert_rowid())
    }

    /// Append one irrigation event.
    pub async fn append_event(&self, event: &NewIrrigationEvent) -> AppResult<i64> {
        let result = sqlx::query(
            r#"
            INSERT INTO irrigation_history
            (timestamp, duration_minutes, trigger_type, soil_moisture_before, soil_moisture_after, water_amount_ml)
            VALUES (?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(event.timestamp)
        .bind(event.duration_minutes)
        .bind(event.trigger_type.as_str())
        .bind(event.soil_moisture_before)
        .bind(event.soil_moisture_after)
        .bind(event.water_amount_ml)
        .execute(&self.pool)
        .await?;

        Ok(result.last_insert_rowid())
    }

    /// Append one prediction.
    pub async fn append_prediction(&self, prediction: &NewPrediction) -> AppResult<i64> {
        let result = sqlx::query(
            r#"
            INSERT INTO predictions
            (timestamp, irrigation_probability, irrigation_score, recommendation, actual_irrigation)
            VALUES (?, ?, ?, ?, ?)
            "#,
        )
        .bind(prediction.timestamp)
        .bind(prediction.irrigation_probability)
        .bind(prediction.irrigation_decision)
        .bind(&prediction.recommendation)
        .bind(prediction.actual_irrigation)
        .execute(&self.pool)
        .await?;

        Ok(result.last_insert_rowid())
    }

    /// The most recent reading. Equal timestamps resolve to the most
    /// recent insert.
    pub async fn latest_reading(&self) -> AppResult<Option<SensorReading>> {
        let row = sqlx::query_as::<_, SensorReadingRow>(
            r#"
            SELECT id, timestamp, soil_moisture, temperature, humidity, ph_soil,
                   nutrient_level, rainfall, irrigation_active, system_error
            FROM sensor_data
            ORDER BY timestamp DESC, id DESC
            LIMIT 1
            "#,
        )
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(SensorReading::from))
    }

    /// All readings in insertion order, optionally restricted to
    /// timestamps at or after `since`.
    pub async fn all_readings(
        &self,
        since: Option<DateTime<Utc>>,
    ) -> AppResult<Vec<SensorReading>> {
        let rows = match since {
            Some(since) => {
                sqlx::query_as::<_, SensorReadingRow>(
                    r#"
                    SELECT id, timestamp, soil_moisture, temperature, humidity, ph_soil,
                           nutrient_level, rainfall, irrigation_active, system_error
                    FROM sensor_data
                    WHERE timestamp >= ?
                    ORDER BY timestamp ASC, id ASC
                    "#,
                )
                .bind(since)
                .fetch_all(&self.pool)
                .await?
            }
            None => {
                sqlx::query_as::<_, SensorReadingRow>(
                    r#"
                    SELECT id, timestamp, soil_moisture, temperature, humidity, ph_soil,
                           nutrient_level, rainfall, irrigation_active, system_error
                    FROM sensor_data
                    ORDER BY timestamp ASC, id ASC
                    "#,
                )
                .fetch_all(&self.pool)
                .await?
            }
        };

        Ok(rows.into_iter().map(SensorReading::from).collect())
    }

    /// Project the training columns from every stored reading.
    pub async fn feature_rows(&self) -> AppResult<Vec<FeatureRow>> {
        let rows = sqlx::query_as::<_, FeatureRow>(
            r#"
            SELECT soil_moisture, temperature, humidity, ph_soil, nutrient_level, irrigation_active
            FROM sensor_data
            ORDER BY id ASC
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(rows)
    }

    /// Most recent irrigation events, newest first.
    pub async fn recent_events(&self, limit: i64) -> AppResult<Vec<IrrigationEvent>> {
        let rows = sqlx::query_as::<_, IrrigationEventRow>(
            r#"
            SELECT id, timestamp, duration_minutes, trigger_type,
                   soil_moisture_before, soil_moisture_after, water_amount_ml
            FROM irrigation_history
            ORDER BY timestamp DESC, id DESC
            LIMIT ?
            "#,
        )
        .bind(limit)
        .fetch_all(&self.pool)
        .await?;

        rows.into_iter().map(IrrigationEvent::try_from).collect()
    }

    /// Most recent predictions, newest first.
    pub async fn recent_predictions(&self, limit: i64) -> AppResult<Vec<Prediction>> {
        let rows = sqlx::query_as::<_, PredictionRow>(
            r#"
            SELECT id, timestamp, irrigation_probability, irrigation_score,
                   recommendation, actual_irrigation
            FROM predictions
            ORDER BY timestamp DESC, id DESC
            LIMIT ?
            "#,
        )
        .bind(limit)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(Prediction::from).collect())
    }

    /// Number of stored readings.
    pub async fn reading_count(&self) -> AppResult<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM sensor_data")
            .fetch_one(&self.pool)
            .await?;
        Ok(count)
    }

    /// Number of stored predictions.
    pub async fn prediction_count(&self) -> AppResult<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM predictions")
            .fetch_one(&self.pool)
            .await?;
        Ok(count)
    }
}
