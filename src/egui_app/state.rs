//! UI state owned by the controller and rendered by the egui views.

use crate::forecast::ForecastOutput;

/// Tabs shown in the central panel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ActiveTab {
    /// Prediction results.
    #[default]
    Dashboard,
    /// Formatted echo of the current inputs.
    InputAnalysis,
}

/// Widget-bound values for the five model parameters.
///
/// These mirror [`crate::forecast::ForecastInput`] but stay mutable for the
/// widgets; an immutable input record is assembled from them per run.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ParameterInputs {
    /// Current on-hand inventory units.
    pub inventory_level: u32,
    /// Selling price per unit in USD.
    pub price: f64,
    /// Whether it is currently summer season.
    pub seasonality_summer: bool,
    /// Current customer demand for inventory.
    pub inventory_demand: u32,
    /// Price sensitivity, `0.0..=10.0` in 0.5 steps.
    pub units_sold_price: f64,
}

impl Default for ParameterInputs {
    fn default() -> Self {
        Self {
            inventory_level: 0,
            price: 0.0,
            seasonality_summer: false,
            inventory_demand: 0,
            units_sold_price: 0.0,
        }
    }
}

/// Tone for the footer status badge.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusTone {
    /// No forecast has been run yet.
    Idle,
    /// The last forecast succeeded.
    Ready,
    /// The last forecast failed.
    Error,
}

/// Status badge + text shown in the footer.
#[derive(Debug, Clone, PartialEq)]
pub struct StatusBarState {
    /// Main status message text.
    pub text: String,
    /// Badge tone.
    pub tone: StatusTone,
}

impl StatusBarState {
    /// Default status shown before the first run.
    pub fn idle() -> Self {
        Self {
            text: "Set the model parameters and run a forecast".into(),
            tone: StatusTone::Idle,
        }
    }

    /// Status after a successful forecast.
    pub fn ready(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            tone: StatusTone::Ready,
        }
    }

    /// Status after a failed forecast.
    pub fn error(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            tone: StatusTone::Error,
        }
    }
}

impl Default for StatusBarState {
    fn default() -> Self {
        Self::idle()
    }
}

/// Aggregate state rendered by the egui views.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct UiState {
    /// Widget-bound parameter values.
    pub inputs: ParameterInputs,
    /// Currently selected central tab.
    pub active_tab: ActiveTab,
    /// Most recent successful forecast, if any.
    pub forecast: Option<ForecastOutput>,
    /// Footer status.
    pub status: StatusBarState,
}
