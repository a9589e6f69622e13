use std::collections::HashMap;
use std::fmt;

use ndarray::Array2;

use super::error::FeatureError;

/// Number of measurements every model and scaler works with.
pub const FEATURE_COUNT: usize = 7;

/// Form field names, in the column order the scalers and model were fitted on.
pub const FEATURE_NAMES: [&str; FEATURE_COUNT] = [
    "Nitrogen",
    "Phosphorus",
    "Potassium",
    "Temperature",
    "Humidity",
    "pH",
    "Rainfall",
];

/// Older forms posted the phosphorus reading under this misspelt name.
const PHOSPHORUS_ALIAS: &str = "Phosporus";

/// The seven soil and climate measurements for a single site.
///
/// No bounds are enforced; anything that parses as a float is accepted.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FeatureVector(pub [f64; FEATURE_COUNT]);

impl FeatureVector {
    pub fn new(
        nitrogen: f64,
        phosphorus: f64,
        potassium: f64,
        temperature: f64,
        humidity: f64,
        ph: f64,
        rainfall: f64,
    ) -> Self {
        Self([nitrogen, phosphorus, potassium, temperature, humidity, ph, rainfall])
    }

    /// Reads all seven measurements out of submitted form fields.
    ///
    /// Fields are looked up by the names in [`FEATURE_NAMES`]. Surrounding
    /// whitespace is ignored. The first missing or non-numeric field aborts
    /// the parse.
    pub fn from_fields(fields: &HashMap<String, String>) -> Result<Self, FeatureError> {
        let mut values = [0.0; FEATURE_COUNT];
        for (slot, name) in values.iter_mut().zip(FEATURE_NAMES) {
            let raw = field_value(fields, name).ok_or(FeatureError::Missing(name))?;
            *slot = raw.trim().parse::<f64>().map_err(|_| FeatureError::Invalid {
                field: name,
                value: raw.to_string(),
            })?;
        }
        Ok(Self(values))
    }

    pub fn values(&self) -> &[f64; FEATURE_COUNT] {
        &self.0
    }

    /// Reshapes the measurements into a single-row matrix of shape (1, 7).
    pub fn to_row(&self) -> Array2<f64> {
        Array2::from_shape_fn((1, FEATURE_COUNT), |(_, j)| self.0[j])
    }
}

impl fmt::Display for FeatureVector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let parts: Vec<String> = FEATURE_NAMES
            .iter()
            .zip(self.0.iter())
            .map(|(name, value)| format!("{}={}", name, value))
            .collect();
        write!(f, "{}", parts.join(", "))
    }
}

/// Looks up `name` in submitted form fields, honoring the legacy `Phosporus` spelling.
pub(crate) fn field_value<'a>(fields: &'a HashMap<String, String>, name: &str) -> Option<&'a str> {
    fields
        .get(name)
        .or_else(|| {
            if name == "Phosphorus" {
                fields.get(PHOSPHORUS_ALIAS)
            } else {
                None
            }
        })
        .map(String::as_str)
}
