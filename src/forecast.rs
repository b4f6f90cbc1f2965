//! Demand forecasting core.
//!
//! Loads a serialized regression model from disk once per process and exposes
//! a single synchronous predict operation over it. Everything here is
//! UI-agnostic; the egui layer assembles a [`ForecastInput`] per interaction
//! and passes it by value.

pub mod forecaster;
pub mod input;
pub mod loader;
pub mod model;

pub use forecaster::{ForecastOutput, Forecaster, InferenceError};
pub use input::{FEATURE_COUNT, FEATURE_NAMES, ForecastInput, InputError, PRICE_SENSITIVITY_MAX};
pub use loader::{ArtifactLoadError, ModelCache, shared_model};
pub use model::{DemandModel, OUTPUT_COUNT};
