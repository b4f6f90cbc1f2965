//! Thin prediction wrapper over the cached demand model.

use std::{path::Path, sync::Arc};

use thiserror::Error;
use tracing::debug;

use super::input::ForecastInput;
use super::loader::{self, ArtifactLoadError};
use super::model::{DemandModel, OUTPUT_COUNT};

/// Integer predictions for one input row. Transient, recomputed per run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ForecastOutput {
    /// Predicted units sold.
    pub units_sold: i64,
    /// Predicted demand.
    pub demand_forecast: i64,
}

/// Errors raised while running inference.
///
/// These indicate a data-shape problem between the loaded artifact and the
/// input contract; they propagate to the caller instead of being masked,
/// since a silently misaligned prediction is worse than a visible failure.
#[derive(Debug, Error, PartialEq)]
pub enum InferenceError {
    /// The model expects a different number of features per row.
    #[error("Model expects {expected} features per row but got {actual}")]
    FeatureShape {
        /// Feature count the model was trained on.
        expected: usize,
        /// Feature count of the submitted row.
        actual: usize,
    },
    /// The model produced an unexpected number of outputs.
    #[error("Model produced {actual} outputs per row but {expected} were expected")]
    OutputShape {
        /// Output count the contract requires.
        expected: usize,
        /// Output count the model produced.
        actual: usize,
    },
    /// The model produced a value that cannot be rounded to an integer.
    #[error("Model produced a non-finite value for output {index}")]
    NonFinite {
        /// Index of the offending output.
        index: usize,
    },
}

/// Wraps the loaded model and exposes a single synchronous predict call.
pub struct Forecaster {
    model: Arc<DemandModel>,
}

impl Forecaster {
    /// Wrap an already-loaded model handle.
    pub fn new(model: Arc<DemandModel>) -> Self {
        Self { model }
    }

    /// Fetch the process-wide cached model, loading it on first use.
    pub fn from_artifact(path: &Path) -> Result<Self, ArtifactLoadError> {
        Ok(Self::new(loader::shared_model(path)?))
    }

    /// Predict units sold and demand forecast for one input row.
    ///
    /// Exactly one row in, one pair out, synchronous. Continuous outputs are
    /// rounded independently with a half-to-even tie-break
    /// ([`f32::round_ties_even`]); the tie-break is part of the observable
    /// output contract and covered by tests.
    pub fn predict(&self, input: &ForecastInput) -> Result<ForecastOutput, InferenceError> {
        let row = input.feature_row();
        if row.len() != self.model.feature_len() {
            return Err(InferenceError::FeatureShape {
                expected: self.model.feature_len(),
                actual: row.len(),
            });
        }
        let outputs = self.model.predict_row(&row);
        if outputs.len() != OUTPUT_COUNT {
            return Err(InferenceError::OutputShape {
                expected: OUTPUT_COUNT,
                actual: outputs.len(),
            });
        }
        let output = round_outputs(&outputs)?;
        debug!(
            units_sold = output.units_sold,
            demand_forecast = output.demand_forecast,
            "Forecast computed"
        );
        Ok(output)
    }
}

fn round_outputs(outputs: &[f32]) -> Result<ForecastOutput, InferenceError> {
    let mut rounded = [0i64; OUTPUT_COUNT];
    for (index, &value) in outputs.iter().enumerate() {
        if !value.is_finite() {
            return Err(InferenceError::NonFinite { index });
        }
        rounded[index] = value.round_ties_even() as i64;
    }
    Ok(ForecastOutput {
        units_sold: rounded[0],
        demand_forecast: rounded[1],
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::forecast::input::{FEATURE_COUNT, FEATURE_NAMES, PRICE_SENSITIVITY_MAX};
    use crate::forecast::model::MODEL_VERSION;

    fn demand_passthrough_model() -> DemandModel {
        DemandModel {
            model_version: MODEL_VERSION,
            feature_names: FEATURE_NAMES.iter().map(|name| name.to_string()).collect(),
            feature_mean: vec![0.0; FEATURE_COUNT],
            feature_std: vec![1.0; FEATURE_COUNT],
            hidden_size: 1,
            // Hidden unit picks Inventory_Demand straight through.
            weights1: vec![0.0, 0.0, 0.0, 1.0, 0.0],
            bias1: vec![0.0],
            weights2: vec![2.0, 1.0],
            bias2: vec![0.5, 0.0],
        }
    }

    fn forecaster() -> Forecaster {
        Forecaster::new(Arc::new(demand_passthrough_model()))
    }

    #[test]
    fn predicts_a_pair_of_integers() {
        let input = ForecastInput {
            inventory_level: 100,
            price: 9.99,
            seasonality_summer: true,
            inventory_demand: 50,
            units_sold_price: 3.5,
        };
        let output = forecaster().predict(&input).unwrap();
        // Hidden activation is 50, so the head yields (100.5, 50.0) and the
        // tie rounds down to the even integer.
        assert_eq!(
            output,
            ForecastOutput {
                units_sold: 100,
                demand_forecast: 50
            }
        );
    }

    #[test]
    fn repeated_predictions_are_identical() {
        let input = ForecastInput {
            inventory_level: 100,
            price: 9.99,
            seasonality_summer: true,
            inventory_demand: 50,
            units_sold_price: 3.5,
        };
        let forecaster = forecaster();
        let first = forecaster.predict(&input).unwrap();
        let second = forecaster.predict(&input).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn sensitivity_boundaries_predict_without_error() {
        let forecaster = forecaster();
        for sensitivity in [0.0, PRICE_SENSITIVITY_MAX] {
            let input = ForecastInput {
                units_sold_price: sensitivity,
                ..ForecastInput::default()
            };
            assert!(forecaster.predict(&input).is_ok());
        }
    }

    #[test]
    fn ties_round_to_even() {
        // bias2 alone drives the outputs when every weight is zero.
        let mut model = demand_passthrough_model();
        model.weights1 = vec![0.0; FEATURE_COUNT];
        model.weights2 = vec![0.0, 0.0];
        model.bias2 = vec![1.5, 2.5];
        let forecaster = Forecaster::new(Arc::new(model));
        let output = forecaster.predict(&ForecastInput::default()).unwrap();
        assert_eq!(output.units_sold, 2);
        assert_eq!(output.demand_forecast, 2);
    }

    #[test]
    fn mismatched_feature_count_is_rejected() {
        let mut model = demand_passthrough_model();
        model.feature_names.push("Extra".to_string());
        let forecaster = Forecaster::new(Arc::new(model));
        let err = forecaster.predict(&ForecastInput::default()).unwrap_err();
        assert_eq!(
            err,
            InferenceError::FeatureShape {
                expected: 6,
                actual: FEATURE_COUNT
            }
        );
    }

    #[test]
    fn non_finite_output_is_rejected() {
        let mut model = demand_passthrough_model();
        model.bias2 = vec![f32::NAN, 0.0];
        model.weights1 = vec![0.0; FEATURE_COUNT];
        model.weights2 = vec![0.0, 0.0];
        let forecaster = Forecaster::new(Arc::new(model));
        let err = forecaster.predict(&ForecastInput::default()).unwrap_err();
        assert_eq!(err, InferenceError::NonFinite { index: 0 });
    }
}
