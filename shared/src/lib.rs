//! Shared types and models for the FarmTech irrigation pipeline
//!
//! This crate contains the domain types shared between the backend server,
//! the batch trainer, and any other components of the system.

pub mod models;
pub mod validation;

pub use models::*;
pub use validation::*;
