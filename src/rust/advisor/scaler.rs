//! Fitted feature scalers.
//!
//! Both scalers are stored as small JSON documents holding the parameters a
//! fitted scaler learned. Field names follow the attributes of the fitted
//! objects, so `min_`, `scale_` and `mean_` are accepted next to the short
//! forms.

use std::fs;
use std::path::Path;

use ndarray::{Array1, Array2};
use serde::Deserialize;

use super::error::AdvisorError;
use super::features::FEATURE_COUNT;

/// A fitted, immutable transform over rows of seven features.
pub trait FeatureScaler: Send + Sync {
    /// Transforms every row of `rows`. The output has the same shape as the input.
    fn transform(&self, rows: &Array2<f64>) -> Result<Array2<f64>, AdvisorError>;
}

/// Rescales each feature into a fixed range: `x * scale + min`.
#[derive(Debug, Clone, PartialEq)]
pub struct MinMaxScaler {
    min: Array1<f64>,
    scale: Array1<f64>,
    clip: Option<(f64, f64)>,
}

#[derive(Deserialize)]
struct MinMaxParams {
    #[serde(alias = "min_")]
    min: Vec<f64>,
    #[serde(alias = "scale_")]
    scale: Vec<f64>,
    #[serde(default)]
    clip: bool,
    #[serde(default = "default_feature_range")]
    feature_range: (f64, f64),
}

fn default_feature_range() -> (f64, f64) {
    (0.0, 1.0)
}

impl MinMaxScaler {
    pub fn new(min: Vec<f64>, scale: Vec<f64>) -> Result<Self, AdvisorError> {
        Ok(Self {
            min: fitted_vector("min", min)?,
            scale: fitted_vector("scale", scale)?,
            clip: None,
        })
    }

    /// Clamps transformed values into `range`.
    pub fn with_clip(mut self, range: (f64, f64)) -> Self {
        self.clip = Some(range);
        self
    }

    /// Builds a scaler from the observed minimum and maximum of each feature,
    /// mapping them onto `[0, 1]`.
    pub fn from_data_range(data_min: &[f64], data_max: &[f64]) -> Result<Self, AdvisorError> {
        if data_min.len() != data_max.len() {
            return Err(AdvisorError::ArtifactError(
                "data_min and data_max differ in length".into(),
            ));
        }
        let scale: Vec<f64> = data_min
            .iter()
            .zip(data_max)
            .map(|(lo, hi)| handle_zero_range(hi - lo).recip())
            .collect();
        let min = data_min.iter().zip(&scale).map(|(lo, s)| -lo * s).collect();
        Self::new(min, scale)
    }

    pub fn from_json(json: &str) -> Result<Self, AdvisorError> {
        let params: MinMaxParams = serde_json::from_str(json)
            .map_err(|e| AdvisorError::ArtifactError(format!("Invalid min-max scaler: {}", e)))?;
        let scaler = Self::new(params.min, params.scale)?;
        Ok(if params.clip { scaler.with_clip(params.feature_range) } else { scaler })
    }

    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, AdvisorError> {
        Self::from_json(&read_artifact(path.as_ref())?)
    }
}

impl FeatureScaler for MinMaxScaler {
    fn transform(&self, rows: &Array2<f64>) -> Result<Array2<f64>, AdvisorError> {
        check_width(rows)?;
        let mut out = rows * &self.scale + &self.min;
        if let Some((lo, hi)) = self.clip {
            out.mapv_inplace(|v| v.clamp(lo, hi));
        }
        Ok(out)
    }
}

/// Centers and scales each feature: `(x - mean) / scale`.
///
/// Either half can be disabled, matching a scaler fitted without centering
/// or without scaling.
#[derive(Debug, Clone, PartialEq)]
pub struct StandardScaler {
    mean: Option<Array1<f64>>,
    scale: Option<Array1<f64>>,
}

#[derive(Deserialize)]
struct StandardParams {
    #[serde(default, alias = "mean_")]
    mean: Option<Vec<f64>>,
    #[serde(default, alias = "scale_")]
    scale: Option<Vec<f64>>,
}

impl StandardScaler {
    pub fn new(mean: Option<Vec<f64>>, scale: Option<Vec<f64>>) -> Result<Self, AdvisorError> {
        let mean = mean.map(|m| fitted_vector("mean", m)).transpose()?;
        let scale = scale
            .map(|s| fitted_vector("scale", s))
            .transpose()?
            .map(|s| s.mapv(handle_zero_range));
        Ok(Self { mean, scale })
    }

    pub fn from_json(json: &str) -> Result<Self, AdvisorError> {
        let params: StandardParams = serde_json::from_str(json)
            .map_err(|e| AdvisorError::ArtifactError(format!("Invalid standard scaler: {}", e)))?;
        Self::new(params.mean, params.scale)
    }

    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, AdvisorError> {
        Self::from_json(&read_artifact(path.as_ref())?)
    }
}

impl FeatureScaler for StandardScaler {
    fn transform(&self, rows: &Array2<f64>) -> Result<Array2<f64>, AdvisorError> {
        check_width(rows)?;
        let mut out = rows.to_owned();
        if let Some(mean) = &self.mean {
            out -= mean;
        }
        if let Some(scale) = &self.scale {
            out /= scale;
        }
        Ok(out)
    }
}

// A constant feature would otherwise divide by zero.
fn handle_zero_range(v: f64) -> f64 {
    if v == 0.0 { 1.0 } else { v }
}

fn fitted_vector(name: &str, values: Vec<f64>) -> Result<Array1<f64>, AdvisorError> {
    if values.len() != FEATURE_COUNT {
        return Err(AdvisorError::ArtifactError(format!(
            "Scaler parameter '{}' has {} values, expected {}",
            name,
            values.len(),
            FEATURE_COUNT
        )));
    }
    Ok(Array1::from(values))
}

fn check_width(rows: &Array2<f64>) -> Result<(), AdvisorError> {
    if rows.ncols() != FEATURE_COUNT {
        return Err(AdvisorError::PredictionError(format!(
            "Expected {} features per row, got {}",
            FEATURE_COUNT,
            rows.ncols()
        )));
    }
    Ok(())
}

fn read_artifact(path: &Path) -> Result<String, AdvisorError> {
    fs::read_to_string(path)
        .map_err(|e| AdvisorError::ArtifactError(format!("Failed to read {:?}: {}", path, e)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;

    fn row() -> Array2<f64> {
        array![[10.0, 20.0, 30.0, 40.0, 50.0, 60.0, 70.0]]
    }

    #[test]
    fn test_min_max_transform() {
        let scaler = MinMaxScaler::new(vec![-1.0; 7], vec![0.1; 7]).unwrap();
        let out = scaler.transform(&row()).unwrap();
        assert!((out[[0, 0]] - 0.0).abs() < 1e-12);
        assert!((out[[0, 6]] - 6.0).abs() < 1e-12);
    }

    #[test]
    fn test_min_max_from_data_range() {
        let scaler = MinMaxScaler::from_data_range(&[0.0; 7], &[100.0, 100.0, 100.0, 100.0, 100.0, 100.0, 0.0]).unwrap();
        let out = scaler.transform(&row()).unwrap();
        assert!((out[[0, 0]] - 0.1).abs() < 1e-12);
        // zero range keeps the raw value
        assert!((out[[0, 6]] - 70.0).abs() < 1e-12);
    }

    #[test]
    fn test_min_max_clip() {
        let json = r#"{"min_": [0,0,0,0,0,0,0], "scale_": [1,1,1,1,1,1,1], "clip": true}"#;
        let scaler = MinMaxScaler::from_json(json).unwrap();
        let out = scaler.transform(&array![[-5.0, 0.5, 2.0, 1.0, 0.0, 0.25, 9.0]]).unwrap();
        assert_eq!(out, array![[0.0, 0.5, 1.0, 1.0, 0.0, 0.25, 1.0]]);
    }

    #[test]
    fn test_standard_transform() {
        let scaler = StandardScaler::new(Some(vec![10.0; 7]), Some(vec![2.0; 7])).unwrap();
        let out = scaler.transform(&row()).unwrap();
        assert_eq!(out, array![[0.0, 5.0, 10.0, 15.0, 20.0, 25.0, 30.0]]);
    }

    #[test]
    fn test_standard_without_mean() {
        let scaler = StandardScaler::from_json(r#"{"mean_": null, "scale_": [10,10,10,10,10,10,10]}"#).unwrap();
        let out = scaler.transform(&row()).unwrap();
        assert_eq!(out, array![[1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0]]);
    }

    #[test]
    fn test_rejects_wrong_dimension() {
        let err = MinMaxScaler::from_json(r#"{"min": [0, 0], "scale": [1, 1]}"#).unwrap_err();
        assert!(matches!(err, AdvisorError::ArtifactError(_)));
        let err = StandardScaler::new(Some(vec![0.0; 8]), None).unwrap_err();
        assert!(matches!(err, AdvisorError::ArtifactError(_)));
    }

    #[test]
    fn test_rejects_malformed_json() {
        assert!(MinMaxScaler::from_json("not json").is_err());
        assert!(StandardScaler::from_json("[1, 2, 3]").is_err());
    }

    #[test]
    fn test_rejects_wrong_row_width() {
        let scaler = StandardScaler::new(None, None).unwrap();
        let err = scaler.transform(&array![[1.0, 2.0]]).unwrap_err();
        assert!(matches!(err, AdvisorError::PredictionError(_)));
    }
}
