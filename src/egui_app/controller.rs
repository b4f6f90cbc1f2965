//! Bridges the forecasting core to the egui UI.

use tracing::warn;

use crate::config;
use crate::egui_app::state::{StatusBarState, UiState};
use crate::forecast::{ForecastInput, Forecaster};

/// Maintains UI state and runs forecasts on demand.
pub struct ForecastController {
    /// State rendered by the egui views.
    pub ui: UiState,
    forecaster: Forecaster,
}

impl ForecastController {
    /// Load settings, resolve the artifact path and bring up the model.
    ///
    /// A missing or incompatible artifact is fatal here: without a model no
    /// prediction is possible, so the error is returned to the launcher
    /// instead of being masked.
    pub fn from_config() -> Result<Self, String> {
        let settings = config::load_or_default().map_err(|err| err.to_string())?;
        let model_path = config::resolve_model_path(&settings).map_err(|err| err.to_string())?;
        let forecaster = Forecaster::from_artifact(&model_path).map_err(|err| err.to_string())?;
        Ok(Self::new(forecaster))
    }

    /// Wrap an already-initialized forecaster.
    pub fn new(forecaster: Forecaster) -> Self {
        Self {
            ui: UiState::default(),
            forecaster,
        }
    }

    /// Assemble an immutable input record from the current widget values.
    pub fn current_input(&self) -> ForecastInput {
        let inputs = &self.ui.inputs;
        ForecastInput {
            inventory_level: inputs.inventory_level,
            price: inputs.price,
            seasonality_summer: inputs.seasonality_summer,
            inventory_demand: inputs.inventory_demand,
            units_sold_price: inputs.units_sold_price,
        }
    }

    /// Run one synchronous prediction and route the result into UI state.
    ///
    /// Failures surface in the status bar and leave the previous forecast
    /// untouched; the next run proceeds normally.
    pub fn run_forecast(&mut self) {
        let input = self.current_input();
        if let Err(err) = input.validate() {
            self.ui.status = StatusBarState::error(err.to_string());
            return;
        }
        match self.forecaster.predict(&input) {
            Ok(output) => {
                self.ui.forecast = Some(output);
                self.ui.status = StatusBarState::ready("Forecast updated");
            }
            Err(err) => {
                warn!(error = %err, "Inference failed");
                self.ui.status = StatusBarState::error(err.to_string());
            }
        }
    }
}
