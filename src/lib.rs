//! # HealthScope
//!
//! Terminal disease-risk screening backed by pre-trained binary classifiers.
//!
//! This crate provides:
//! - Fixed, ordered feature schemas for five disease categories
//! - Integrity-checked loading of model artifacts at startup
//! - A dispatcher mapping each submission to its category's model
//! - Terminal UI with per-category forms and a result panel
//!
//! ## Architecture
//!
//! The crate follows Hexagonal Architecture:
//! - `domain`: Core types (categories, field bounds, feature vectors, labels)
//! - `ports`: Trait definitions for classifiers and model sources
//! - `adapters`: Concrete implementations (JSON artifacts, log sanitizing)
//! - `application`: Model registry and prediction dispatch
//! - `config`: Environment-driven runtime settings
//! - `tui`: Terminal user interface

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;
pub mod tui;

pub use domain::{DiseaseCategory, FeatureVector, Prediction, RiskLabel};

/// Result type for HealthScope operations
pub type Result<T> = std::result::Result<T, HealthScopeError>;

/// Main error type for HealthScope
#[derive(Debug, thiserror::Error)]
pub enum HealthScopeError {
    #[error("Failed to load {category} model: {source}")]
    ModelLoad {
        category: DiseaseCategory,
        #[source]
        source: ports::ModelError,
    },

    #[error("{category} model schema mismatch: {detail}")]
    SchemaMismatch {
        category: DiseaseCategory,
        detail: String,
    },

    #[error("Prediction failed: {0}")]
    Prediction(#[from] ports::ModelError),

    #[error("{0} model returned no prediction")]
    EmptyPrediction(DiseaseCategory),

    #[error("{category} model returned unexpected label {class}")]
    UnexpectedLabel { category: DiseaseCategory, class: i64 },

    #[error("Invalid input: {0}")]
    Validation(#[from] domain::FeatureError),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}
