//! Application layer: Use cases and services.
//!
//! This module wires loaded models to the prediction use case.

mod dispatcher;
pub mod models;

pub use dispatcher::Dispatcher;
pub use models::ModelSet;
