//! A small web service that recommends a crop from seven soil and climate
//! measurements, using two fitted scalers and an ONNX classifier.
//!
//! # Basic Usage
//!
//! ```no_run
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! use crop_advisor::{ArtifactManager, CropAdvisor, FeatureVector};
//!
//! let manager = ArtifactManager::new_default()?;
//! manager.verify()?;
//!
//! let advisor = CropAdvisor::builder()
//!     .with_artifacts(&manager.paths())?
//!     .build()?;
//!
//! let features = FeatureVector::new(90.0, 42.0, 43.0, 20.88, 82.0, 6.5, 202.9);
//! let recommendation = advisor.predict(&features)?;
//! println!("{}", recommendation.message);
//! # Ok(())
//! # }
//! ```
//!
//! # Thread Safety
//!
//! `CropAdvisor` is immutable after construction and can be shared across
//! request handlers or threads using `Arc`.

pub mod advisor;
mod runtime;
pub mod artifact_manager;
pub mod server;

pub use advisor::{
    AdvisorError, CropAdvisor, CropAdvisorBuilder, CropModel, FeatureError, FeatureScaler,
    FeatureVector, MinMaxScaler, ModelSignature, OnnxCropModel, Recommendation, StandardScaler,
};
pub use artifact_manager::{ArtifactError, ArtifactManager, ArtifactPaths};
pub use runtime::{create_session_builder, RuntimeConfig};

/// Initializes logging from `RUST_LOG`, defaulting to `info`.
pub fn init_logger() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
}
