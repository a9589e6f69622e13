mod advisor;
mod builder;
pub mod catalog;
mod error;
mod features;
mod model;
mod scaler;

pub use advisor::{CropAdvisor, Recommendation, UNDETERMINED_MESSAGE};
pub use builder::CropAdvisorBuilder;
pub use catalog::{lookup_crop, lookup_image, DEFAULT_IMAGE_URL};
pub use error::{AdvisorError, FeatureError};
pub(crate) use features::field_value;
pub use features::{FeatureVector, FEATURE_COUNT, FEATURE_NAMES};
pub use model::{CropModel, ModelSignature, OnnxCropModel, DEFAULT_INPUT_NAME, DEFAULT_OUTPUT_NAME};
pub use scaler::{FeatureScaler, MinMaxScaler, StandardScaler};
