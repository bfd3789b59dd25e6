//! HTTP handlers for the FarmTech irrigation pipeline

mod health;
mod irrigation;
mod predict;
mod sensor_data;

pub use health::health_check;
pub use irrigation::{list_irrigation_history, record_irrigation_event};
pub use predict::{list_predictions, predict_irrigation};
pub use sensor_data::receive_sensor_data;
