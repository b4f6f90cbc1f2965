//! Helpers to convert forecast data into display strings.

use crate::forecast::{FEATURE_NAMES, ForecastInput};

/// One labelled row for the input-analysis table.
#[derive(Debug, Clone, PartialEq)]
pub struct InputRow {
    /// Feature column name.
    pub name: &'static str,
    /// Formatted value.
    pub value: String,
}

/// Group an integer with comma thousands separators.
pub fn group_thousands(value: i64) -> String {
    let digits = value.unsigned_abs().to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (index, ch) in digits.chars().enumerate() {
        if index > 0 && (digits.len() - index) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    if value < 0 {
        format!("-{grouped}")
    } else {
        grouped
    }
}

/// Format a USD amount with two decimals and thousands separators.
pub fn format_usd(amount: f64) -> String {
    let cents = (amount * 100.0).round() as i64;
    let sign = if cents < 0 { "-" } else { "" };
    format!(
        "{sign}${}.{:02}",
        group_thousands((cents / 100).abs()),
        (cents % 100).abs()
    )
}

/// Build display rows echoing the inputs in training-column order.
pub fn input_rows(input: &ForecastInput) -> Vec<InputRow> {
    let values = [
        group_thousands(i64::from(input.inventory_level)),
        format_usd(input.price),
        u8::from(input.seasonality_summer).to_string(),
        group_thousands(i64::from(input.inventory_demand)),
        format!("{:.1}", input.units_sold_price),
    ];
    FEATURE_NAMES
        .iter()
        .copied()
        .zip(values)
        .map(|(name, value)| InputRow { name, value })
        .collect()
}
