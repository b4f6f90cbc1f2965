//! Serialized regression artifact and its forward pass.

use serde::{Deserialize, Serialize};

use super::input::{FEATURE_COUNT, FEATURE_NAMES};

/// Number of continuous outputs the model produces per row.
pub const OUTPUT_COUNT: usize = 2;

/// Artifact format version this build understands.
pub const MODEL_VERSION: i64 = 1;

/// Pre-trained regression network predicting units sold and demand forecast.
///
/// Produced by an external training pipeline and treated as read-only here:
/// normalization vectors, one hidden ReLU layer and a linear two-output head,
/// serialized as JSON.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DemandModel {
    /// Artifact format version.
    pub model_version: i64,
    /// Feature column names in training order.
    pub feature_names: Vec<String>,
    /// Per-feature mean used for input normalization.
    pub feature_mean: Vec<f32>,
    /// Per-feature standard deviation used for input normalization.
    pub feature_std: Vec<f32>,
    /// Number of hidden units.
    pub hidden_size: usize,
    /// Shape `[hidden_size][feature_count]`, row-major.
    pub weights1: Vec<f32>,
    /// Hidden-layer bias, length `hidden_size`.
    pub bias1: Vec<f32>,
    /// Shape `[OUTPUT_COUNT][hidden_size]`, row-major.
    pub weights2: Vec<f32>,
    /// Output bias, length `OUTPUT_COUNT`.
    pub bias2: Vec<f32>,
}

impl DemandModel {
    /// Validate structural invariants of the artifact.
    ///
    /// Column names are checked against [`FEATURE_NAMES`] because the model
    /// takes a plain numeric row; a renamed or reordered column would
    /// otherwise corrupt predictions silently.
    pub fn validate(&self) -> Result<(), String> {
        if self.model_version != MODEL_VERSION {
            return Err(format!(
                "Unsupported model_version {} (expected {MODEL_VERSION})",
                self.model_version
            ));
        }
        if self.feature_names.len() != FEATURE_COUNT {
            return Err(format!(
                "Model was trained on {} features but {FEATURE_COUNT} are expected",
                self.feature_names.len()
            ));
        }
        for (index, expected) in FEATURE_NAMES.iter().enumerate() {
            let found = &self.feature_names[index];
            if found != expected {
                return Err(format!(
                    "Feature column {index} is {found:?} but the input contract expects {expected:?}"
                ));
            }
        }
        if self.hidden_size == 0 {
            return Err("hidden_size must be at least 1".to_string());
        }
        let input = self.feature_names.len();
        let hidden = self.hidden_size;
        if self.feature_mean.len() != input {
            return Err("feature_mean length mismatch".to_string());
        }
        if self.feature_std.len() != input {
            return Err("feature_std length mismatch".to_string());
        }
        if self.weights1.len() != hidden * input {
            return Err("weights1 length mismatch".to_string());
        }
        if self.bias1.len() != hidden {
            return Err("bias1 length mismatch".to_string());
        }
        if self.weights2.len() != OUTPUT_COUNT * hidden {
            return Err("weights2 length mismatch".to_string());
        }
        if self.bias2.len() != OUTPUT_COUNT {
            return Err("bias2 length mismatch".to_string());
        }
        Ok(())
    }

    /// Number of features expected per input row.
    pub fn feature_len(&self) -> usize {
        self.feature_names.len()
    }

    /// Run the regression forward pass over one feature row.
    ///
    /// Returns an empty vector when the row length does not match the model;
    /// callers that need a typed error check the shape first.
    pub fn predict_row(&self, features: &[f32]) -> Vec<f32> {
        let input = self.feature_len();
        if features.len() != input {
            return Vec::new();
        }
        let hidden = self.hidden_size;

        let mut normalized = vec![0.0f32; input];
        for i in 0..input {
            let std = self.feature_std[i].max(1e-6);
            normalized[i] = (features[i] - self.feature_mean[i]) / std;
        }

        let mut hidden_act = vec![0.0f32; hidden];
        for h in 0..hidden {
            let mut sum = self.bias1[h];
            let base = h * input;
            for i in 0..input {
                sum += self.weights1[base + i] * normalized[i];
            }
            hidden_act[h] = sum.max(0.0);
        }

        let mut outputs = vec![0.0f32; OUTPUT_COUNT];
        for c in 0..OUTPUT_COUNT {
            let mut sum = self.bias2[c];
            let base = c * hidden;
            for h in 0..hidden {
                sum += self.weights2[base + h] * hidden_act[h];
            }
            outputs[c] = sum;
        }
        outputs
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pass_through_model() -> DemandModel {
        DemandModel {
            model_version: MODEL_VERSION,
            feature_names: FEATURE_NAMES.iter().map(|name| name.to_string()).collect(),
            feature_mean: vec![0.0; FEATURE_COUNT],
            feature_std: vec![1.0; FEATURE_COUNT],
            hidden_size: 1,
            weights1: vec![0.0, 0.0, 0.0, 1.0, 0.0],
            bias1: vec![0.0],
            weights2: vec![2.0, 1.0],
            bias2: vec![0.5, 0.0],
        }
    }

    #[test]
    fn valid_model_passes_validation() {
        assert!(pass_through_model().validate().is_ok());
    }

    #[test]
    fn renamed_column_fails_validation() {
        let mut model = pass_through_model();
        model.feature_names[1] = "price".to_string();
        let err = model.validate().unwrap_err();
        assert!(err.contains("Feature column 1"));
    }

    #[test]
    fn reordered_columns_fail_validation() {
        let mut model = pass_through_model();
        model.feature_names.swap(0, 3);
        assert!(model.validate().is_err());
    }

    #[test]
    fn weight_length_mismatch_fails_validation() {
        let mut model = pass_through_model();
        model.weights1.push(0.0);
        let err = model.validate().unwrap_err();
        assert!(err.contains("weights1"));
    }

    #[test]
    fn forward_pass_produces_two_outputs() {
        let model = pass_through_model();
        let outputs = model.predict_row(&[100.0, 9.99, 1.0, 50.0, 3.5]);
        assert_eq!(outputs.len(), OUTPUT_COUNT);
        // hidden = relu(50), head = (0.5 + 2*50, 0 + 1*50)
        assert_eq!(outputs[0], 100.5);
        assert_eq!(outputs[1], 50.0);
    }

    #[test]
    fn wrong_row_length_yields_empty_output() {
        let model = pass_through_model();
        assert!(model.predict_row(&[1.0, 2.0]).is_empty());
    }

    #[test]
    fn forward_pass_is_deterministic() {
        let model = pass_through_model();
        let row = [3.0, 1.5, 0.0, 7.0, 10.0];
        assert_eq!(model.predict_row(&row), model.predict_row(&row));
    }
}
