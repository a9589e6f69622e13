use std::collections::HashMap;

use log::debug;
use ndarray::Array2;

use super::catalog::{lookup_crop, lookup_image, DEFAULT_IMAGE_URL};
use super::error::AdvisorError;
use super::features::FeatureVector;
use super::model::CropModel;
use super::scaler::FeatureScaler;

/// Message shown when the classifier emits a label outside the crop catalog.
pub const UNDETERMINED_MESSAGE: &str =
    "Sorry, we could not determine the best crop to be cultivated with the provided data.";

/// The outcome of a prediction, ready to be rendered.
#[derive(Debug, Clone, PartialEq)]
pub struct Recommendation {
    /// Raw label emitted by the classifier
    pub label: i64,
    /// Crop name, when the label is in the catalog
    pub crop: Option<&'static str>,
    pub message: String,
    pub image_url: &'static str,
}

impl Recommendation {
    /// Maps a classifier label to the message and image shown to the user.
    ///
    /// This is a pure function of the label.
    pub fn from_label(label: i64) -> Self {
        match lookup_crop(label) {
            Some(crop) => Self {
                label,
                crop: Some(crop),
                message: format!("{} is the best crop to be cultivated right there.", crop),
                image_url: lookup_image(crop),
            },
            None => Self {
                label,
                crop: None,
                message: UNDETERMINED_MESSAGE.to_string(),
                image_url: DEFAULT_IMAGE_URL,
            },
        }
    }
}

/// Recommends a crop from soil and climate measurements.
///
/// Holds the two fitted scalers and the classifier. All three are read-only
/// after construction, so one instance can be shared across request handlers
/// behind an `Arc`.
///
/// ```rust
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// use crop_advisor::{CropAdvisor, CropModel, AdvisorError, FeatureVector, MinMaxScaler, StandardScaler};
/// use ndarray::Array2;
///
/// struct AlwaysRice;
///
/// impl CropModel for AlwaysRice {
///     fn predict(&self, _rows: &Array2<f64>) -> Result<i64, AdvisorError> {
///         Ok(1)
///     }
/// }
///
/// let advisor = CropAdvisor::builder()
///     .with_min_max_scaler(MinMaxScaler::new(vec![0.0; 7], vec![1.0; 7])?)
///     .with_standard_scaler(StandardScaler::new(None, None)?)
///     .with_model(AlwaysRice)
///     .build()?;
///
/// let features = FeatureVector::new(90.0, 42.0, 43.0, 20.88, 82.0, 6.5, 202.9);
/// let recommendation = advisor.predict(&features)?;
/// assert_eq!(recommendation.crop, Some("Rice"));
/// # Ok(())
/// # }
/// ```
pub struct CropAdvisor {
    pub(super) min_max_scaler: Box<dyn FeatureScaler>,
    pub(super) standard_scaler: Box<dyn FeatureScaler>,
    pub(super) model: Box<dyn CropModel>,
}

// Compile-time verification of thread-safety
const _: () = {
    fn assert_send_sync<T: Send + Sync>() {}
    fn verify_thread_safety() {
        assert_send_sync::<CropAdvisor>();
    }
};

impl CropAdvisor {
    /// Creates a new CropAdvisorBuilder for fluent construction
    pub fn builder() -> super::builder::CropAdvisorBuilder {
        super::builder::CropAdvisorBuilder::new()
    }

    /// Applies the min-max scaler and then the standard scaler.
    ///
    /// The scalers were fitted in this order, so it must not change.
    pub fn scale(&self, rows: &Array2<f64>) -> Result<Array2<f64>, AdvisorError> {
        let normalized = self.min_max_scaler.transform(rows)?;
        self.standard_scaler.transform(&normalized)
    }

    /// Makes a recommendation for one set of measurements
    pub fn predict(&self, features: &FeatureVector) -> Result<Recommendation, AdvisorError> {
        let scaled = self.scale(&features.to_row())?;
        let label = self.model.predict(&scaled)?;
        debug!("Predicted label {} for [{}]", label, features);
        Ok(Recommendation::from_label(label))
    }

    /// Parses submitted form fields and makes a recommendation.
    ///
    /// # Errors
    /// - `ValidationError` if a field is missing or not a number
    /// - any error from [`CropAdvisor::predict`]
    pub fn predict_fields(&self, fields: &HashMap<String, String>) -> Result<Recommendation, AdvisorError> {
        let features = FeatureVector::from_fields(fields)?;
        self.predict(&features)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_label_message() {
        let rec = Recommendation::from_label(1);
        assert_eq!(rec.crop, Some("Rice"));
        assert_eq!(rec.message, "Rice is the best crop to be cultivated right there.");
        assert_eq!(rec.image_url, "https://images.pexels.com/photos/164504/pexels-photo-164504.jpeg");
    }

    #[test]
    fn test_unknown_label_falls_back() {
        for label in [0, 23, i64::MAX] {
            let rec = Recommendation::from_label(label);
            assert_eq!(rec.crop, None);
            assert_eq!(rec.message, UNDETERMINED_MESSAGE);
            assert_eq!(rec.image_url, DEFAULT_IMAGE_URL);
        }
    }

    #[test]
    fn test_label_mapping_is_stable() {
        for label in 1..=22 {
            let first = Recommendation::from_label(label);
            let second = Recommendation::from_label(label);
            assert_eq!(first, second);
            assert!(first.message.starts_with(first.crop.unwrap()));
        }
    }
}
