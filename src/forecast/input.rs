//! The fixed five-field input record crossing the UI/core boundary.

use thiserror::Error;

/// Number of numeric features the demand model consumes per row.
pub const FEATURE_COUNT: usize = 5;

/// Feature column names in the exact order the model was trained on.
///
/// The trained artifact consumes a plain numeric row, not a keyed structure;
/// this list is the only guard against silently misaligned columns, so it
/// must never be reordered or renamed.
pub const FEATURE_NAMES: [&str; FEATURE_COUNT] = [
    "Inventory Level",
    "Price",
    "Seasonality_Summer",
    "Inventory_Demand",
    "UnitsSold_Price",
];

/// Upper bound accepted for the price-sensitivity input.
pub const PRICE_SENSITIVITY_MAX: f64 = 10.0;

/// One row of operational inputs for the demand model.
///
/// Assembled fresh on every interaction, passed by value into the
/// forecaster, never persisted.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ForecastInput {
    /// Current on-hand inventory units.
    pub inventory_level: u32,
    /// Selling price per unit in USD.
    pub price: f64,
    /// Whether it is currently summer season.
    pub seasonality_summer: bool,
    /// Current customer demand for inventory.
    pub inventory_demand: u32,
    /// Units sold influenced by price sensitivity, `0.0..=10.0`.
    pub units_sold_price: f64,
}

impl Default for ForecastInput {
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

/// Errors raised by [`ForecastInput::validate`].
#[derive(Debug, Error, PartialEq)]
pub enum InputError {
    /// Price is negative or not a finite number.
    #[error("Price must be a finite, non-negative amount (got {0})")]
    InvalidPrice(f64),
    /// Price sensitivity is outside its accepted range.
    #[error("Price sensitivity must be within 0.0..=10.0 (got {0})")]
    SensitivityOutOfRange(f64),
}

impl ForecastInput {
    /// Check the range constraints the widgets normally enforce.
    pub fn validate(&self) -> Result<(), InputError> {
        if !self.price.is_finite() || self.price < 0.0 {
            return Err(InputError::InvalidPrice(self.price));
        }
        if !self.units_sold_price.is_finite()
            || self.units_sold_price < 0.0
            || self.units_sold_price > PRICE_SENSITIVITY_MAX
        {
            return Err(InputError::SensitivityOutOfRange(self.units_sold_price));
        }
        Ok(())
    }

    /// Numeric feature row in training order (see [`FEATURE_NAMES`]).
    pub fn feature_row(&self) -> [f32; FEATURE_COUNT] {
        [
            self.inventory_level as f32,
            self.price as f32,
            if self.seasonality_summer { 1.0 } else { 0.0 },
            self.inventory_demand as f32,
            self.units_sold_price as f32,
        ]
    }

    /// Inventory units times unit price.
    pub fn potential_inventory_value(&self) -> f64 {
        f64::from(self.inventory_level) * self.price
    }
}
