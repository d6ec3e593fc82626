//! Filter parameters.
//!
//! `FilterParameters` is the validated value handed to every pipeline
//! invocation. `FilterOptions` is what arrives from outside (JSON, host
//! bindings) and may be partial or invalid; merging it never lets a bad value
//! through, the previous value is kept instead.

use std::fs;
use std::path::Path;

use log::warn;
use serde::{Deserialize, Deserializer, Serialize};

use crate::error::{Result, TranslucifyError};

pub const DEFAULT_THRESHOLD_VALUE: u8 = 250;
pub const DEFAULT_TOLERANCE_FRACTION: f32 = 0.05;

/// Validated parameters for the high-pass and flood-fill filters.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FilterParameters {
    /// Pixels with R, G and B all at or above this value are erased by high-pass.
    #[serde(alias = "thresholdValue")]
    pub threshold_value: u8,
    /// Relative per-channel tolerance around the flood-fill seed color (0.0-1.0).
    #[serde(alias = "toleranceFraction")]
    pub tolerance_fraction: f32,
}

impl Default for FilterParameters {
    fn default() -> Self {
        Self {
            threshold_value: DEFAULT_THRESHOLD_VALUE,
            tolerance_fraction: DEFAULT_TOLERANCE_FRACTION,
        }
    }
}

/// Unvalidated parameter overrides.
///
/// Non-numeric JSON values deserialize to NaN so they are rejected by the
/// setters like any other invalid value.
#[derive(Clone, Copy, Debug, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct FilterOptions {
    #[serde(alias = "thresholdValue", deserialize_with = "lenient_number")]
    pub threshold_value: Option<f64>,
    #[serde(alias = "toleranceFraction", deserialize_with = "lenient_number")]
    pub tolerance_fraction: Option<f64>,
}

fn lenient_number<'de, D>(deserializer: D) -> std::result::Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<serde_json::Value>::deserialize(deserializer)?;
    Ok(value.map(|v| v.as_f64().unwrap_or(f64::NAN)))
}

impl FilterParameters {
    /// Set the high-pass threshold. Returns false (and keeps the old value) if
    /// `value` is not a finite number in 0-255.
    pub fn set_threshold_value(&mut self, value: f64) -> bool {
        if !value.is_finite() || !(0.0..=255.0).contains(&value) {
            warn!(
                "ignoring threshold value {value}, keeping {}",
                self.threshold_value
            );
            return false;
        }
        self.threshold_value = value.round() as u8;
        true
    }

    /// Set the flood-fill tolerance. Returns false (and keeps the old value) if
    /// `value` is not a finite number in 0.0-1.0.
    pub fn set_tolerance_fraction(&mut self, value: f64) -> bool {
        if !value.is_finite() || !(0.0..=1.0).contains(&value) {
            warn!(
                "ignoring tolerance fraction {value}, keeping {}",
                self.tolerance_fraction
            );
            return false;
        }
        self.tolerance_fraction = value as f32;
        true
    }

    /// Merge overrides, skipping unset and invalid values.
    pub fn apply_options(&mut self, options: &FilterOptions) {
        if let Some(value) = options.threshold_value {
            self.set_threshold_value(value);
        }
        if let Some(value) = options.tolerance_fraction {
            self.set_tolerance_fraction(value);
        }
    }

    /// Defaults overlaid with the options in `json`.
    pub fn from_json(json: &str) -> Result<Self> {
        let options: FilterOptions = serde_json::from_str(json)
            .map_err(|e| TranslucifyError::Config(format!("failed to parse options: {e}")))?;
        let mut params = Self::default();
        params.apply_options(&options);
        Ok(params)
    }

    /// Load options from a JSON file on top of the defaults.
    pub fn load(path: &Path) -> Result<Self> {
        let data = fs::read_to_string(path).map_err(|e| {
            TranslucifyError::Config(format!("failed to read {}: {e}", path.display()))
        })?;
        Self::from_json(&data)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let params = FilterParameters::default();
        assert_eq!(params.threshold_value, 250);
        assert!((params.tolerance_fraction - 0.05).abs() < 1e-6);
    }

    #[test]
    fn test_nan_keeps_previous_value() {
        let mut params = FilterParameters::default();
        assert!(params.set_threshold_value(200.0));
        assert!(!params.set_threshold_value(f64::NAN));
        assert_eq!(params.threshold_value, 200);

        assert!(params.set_tolerance_fraction(0.2));
        assert!(!params.set_tolerance_fraction(f64::NAN));
        assert!((params.tolerance_fraction - 0.2).abs() < 1e-6);
    }

    #[test]
    fn test_out_of_range_rejected() {
        let mut params = FilterParameters::default();
        assert!(!params.set_threshold_value(256.0));
        assert!(!params.set_threshold_value(-1.0));
        assert!(!params.set_tolerance_fraction(1.5));
        assert!(!params.set_tolerance_fraction(f64::INFINITY));
        assert_eq!(params, FilterParameters::default());
    }

    #[test]
    fn test_apply_options_partial() {
        let mut params = FilterParameters::default();
        params.apply_options(&FilterOptions {
            threshold_value: Some(240.0),
            tolerance_fraction: None,
        });
        assert_eq!(params.threshold_value, 240);
        assert!((params.tolerance_fraction - DEFAULT_TOLERANCE_FRACTION).abs() < 1e-6);
    }

    #[test]
    fn test_from_json_accepts_camel_case() {
        let params =
            FilterParameters::from_json(r#"{"thresholdValue": 248, "toleranceFraction": 0.1}"#)
                .unwrap();
        assert_eq!(params.threshold_value, 248);
        assert!((params.tolerance_fraction - 0.1).abs() < 1e-6);
    }

    #[test]
    fn test_from_json_invalid_value_falls_back() {
        let params = FilterParameters::from_json(r#"{"threshold_value": 900}"#).unwrap();
        assert_eq!(params.threshold_value, DEFAULT_THRESHOLD_VALUE);
    }

    #[test]
    fn test_from_json_non_numeric_falls_back() {
        let params =
            FilterParameters::from_json(r#"{"threshold_value": "bright", "tolerance_fraction": 0.3}"#)
                .unwrap();
        assert_eq!(params.threshold_value, DEFAULT_THRESHOLD_VALUE);
        assert!((params.tolerance_fraction - 0.3).abs() < 1e-6);
    }

    #[test]
    fn test_malformed_json_is_config_error() {
        let err = FilterParameters::from_json("{threshold_value: 1").unwrap_err();
        assert!(matches!(err, TranslucifyError::Config(_)));
    }

    #[test]
    fn test_null_is_unset() {
        let params = FilterParameters::from_json(r#"{"tolerance_fraction": null}"#).unwrap();
        assert_eq!(params, FilterParameters::default());
    }

    #[test]
    fn test_empty_object_is_defaults() {
        let params = FilterParameters::from_json("{}").unwrap();
        assert_eq!(params, FilterParameters::default());
    }
}
