//! HTTP surface integration tests
//!
//! Drives the router directly with tower's `oneshot`, covering the
//! endpoint contract: status codes, degraded-mode behavior, and the
//! ingestion-to-prediction flow.

use std::sync::Arc;

use axum::body::Body;
use axum::http::{header, Request, StatusCode};
use axum::Router;
use sqlx::sqlite::SqlitePoolOptions;
use tower::ServiceExt;

use farmtech_backend::config::{Config, DatabaseConfig, ModelConfig, ServerConfig};
use farmtech_backend::ml::{IrrigationForest, LabeledSample, ModelArtifact};
use farmtech_backend::store::SensorStore;
use farmtech_backend::{create_app, AppState};

async fn memory_store() -> SensorStore {
    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .connect("sqlite::memory:")
        .await
        .unwrap();
    let store = SensorStore::new(pool);
    store.init_schema().await.unwrap();
    store
}

fn test_config() -> Config {
    Config {
        environment: "test".to_string(),
        server: ServerConfig {
            port: 0,
            host: "127.0.0.1".to_string(),
        },
        database: DatabaseConfig {
            path: ":memory:".to_string(),
            max_connections: 1,
        },
        model: ModelConfig {
            artifact_path: "unused".to_string(),
        },
    }
}

fn threshold_artifact() -> Arc<ModelArtifact> {
    let samples: Vec<LabeledSample> = (0..80)
        .map(|i| {
            let soil = i as f64;
            LabeledSample::new([soil, 23.0, 55.0, 6.5, 50.0], soil < 30.0)
        })
        .collect();
    let mut model = IrrigationForest::new(15, 8);
    model.fit(&samples);

    Arc::new(ModelArtifact {
        model,
        feature_columns: shared::FEATURE_COLUMNS
            .iter()
            .map(|c| c.to_string())
            .collect(),
        trained_at: chrono::Utc::now(),
        test_accuracy: 1.0,
        synthetic: true,
    })
}

async fn app(store: SensorStore, model: Option<Arc<ModelArtifact>>) -> Router {
    create_app(AppState {
        store,
        model,
        config: Arc::new(test_config()),
    })
}

fn post_json(uri: &str, body: serde_json::Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

fn get(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

async fn body_json(response: axum::response::Response) -> serde_json::Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

fn valid_reading() -> serde_json::Value {
    serde_json::json!({
        "soil_moisture": 42.5,
        "temperature": 23.1,
        "humidity": 55.0,
        "ph_soil": 6.8,
        "nutrient_level": 50.0,
        "rainfall": 0.0,
        "irrigation_active": false,
        "system_error": false,
    })
}

#[tokio::test]
async fn test_health_is_alive_without_model() {
    let app = app(memory_store().await, None).await;

    let response = app.oneshot(get("/health")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = body_json(response).await;
    assert_eq!(body["status"], "alive");
}

#[tokio::test]
async fn test_sensor_data_accepted_without_model() {
    let store = memory_store().await;
    let app = app(store.clone(), None).await;

    let response = app
        .oneshot(post_json("/sensor-data", valid_reading()))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = body_json(response).await;
    assert_eq!(body["status"], "ok");
    assert_eq!(store.reading_count().await.unwrap(), 1);
}

#[tokio::test]
async fn test_predict_without_model_is_500() {
    let store = memory_store().await;
    let app = app(store.clone(), None).await;

    // A reading exists, but no artifact was ever trained.
    app.clone()
        .oneshot(post_json("/sensor-data", valid_reading()))
        .await
        .unwrap();

    let response = app.oneshot(get("/predict")).await.unwrap();
    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

    let body = body_json(response).await;
    assert_eq!(body["error"]["code"], "MODEL_UNAVAILABLE");
}

#[tokio::test]
async fn test_predict_without_readings_is_404() {
    let app = app(memory_store().await, Some(threshold_artifact())).await;

    let response = app.oneshot(get("/predict")).await.unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let body = body_json(response).await;
    assert_eq!(body["error"]["code"], "NO_DATA");
}

#[tokio::test]
async fn test_ingest_then_predict_flow() {
    let store = memory_store().await;
    let app = app(store.clone(), Some(threshold_artifact())).await;

    let mut dry = valid_reading();
    dry["soil_moisture"] = serde_json::json!(10.0);
    let response = app
        .clone()
        .oneshot(post_json("/sensor-data", dry))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let response = app.clone().oneshot(get("/predict")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = body_json(response).await;
    assert_eq!(body["decision"], true);
    assert_eq!(body["recommendation"], "start irrigation");
    assert!(body["probability"].as_f64().unwrap() > 0.5);

    // The prediction was persisted and is listed newest-first.
    let response = app.oneshot(get("/predictions?limit=5")).await.unwrap();
    let body = body_json(response).await;
    assert_eq!(body["predictions"].as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn test_sensor_data_rejects_malformed_booleans() {
    let store = memory_store().await;
    let app = app(store.clone(), None).await;

    let mut bad = valid_reading();
    bad["irrigation_active"] = serde_json::json!("yes");

    let response = app
        .oneshot(post_json("/sensor-data", bad))
        .await
        .unwrap();
    assert!(response.status().is_client_error());
    assert_eq!(store.reading_count().await.unwrap(), 0);
}

#[tokio::test]
async fn test_irrigation_event_recorded_and_listed() {
    let store = memory_store().await;
    let app = app(store.clone(), None).await;

    let event = serde_json::json!({
        "duration_minutes": 1.0,
        "trigger_type": "manual",
        "soil_moisture_before": 25.0,
        "soil_moisture_after": 40.0,
        "water_amount_ml": 1000.0,
    });
    let response = app
        .clone()
        .oneshot(post_json("/irrigation-events", event))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let response = app.oneshot(get("/irrigation-history")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = body_json(response).await;
    let events = body["events"].as_array().unwrap();
    assert_eq!(events.len(), 1);
    assert_eq!(events[0]["trigger_type"], "manual");
}

#[tokio::test]
async fn test_irrigation_event_negative_duration_is_400() {
    let store = memory_store().await;
    let app = app(store.clone(), None).await;

    let event = serde_json::json!({
        "duration_minutes": -2.0,
        "trigger_type": "manual",
        "soil_moisture_before": 25.0,
        "soil_moisture_after": 40.0,
        "water_amount_ml": 1000.0,
    });
    let response = app
        .oneshot(post_json("/irrigation-events", event))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let body = body_json(response).await;
    assert_eq!(body["error"]["code"], "VALIDATION_ERROR");
    assert_eq!(body["error"]["field"], "duration_minutes");
}

#[tokio::test]
async fn test_root_banner() {
    let app = app(memory_store().await, None).await;

    let response = app.oneshot(get("/")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = body_json(response).await;
    assert!(body["message"].as_str().unwrap().contains("FarmTech"));
}
