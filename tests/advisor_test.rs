use std::collections::HashMap;
use std::fs;
use std::sync::{Arc, Mutex};

use crop_advisor::advisor::{DEFAULT_IMAGE_URL, FEATURE_NAMES, UNDETERMINED_MESSAGE};
use crop_advisor::{
    AdvisorError, ArtifactPaths, CropAdvisor, CropModel, FeatureError, FeatureScaler, FeatureVector,
    MinMaxScaler, StandardScaler,
};
use env_logger::{Builder, Env};
use ndarray::{array, Array2};

// Initialize test logger
fn init() {
    let _ = Builder::from_env(Env::default().default_filter_or("warn"))
        .is_test(true)
        .try_init();
}

/// Returns a fixed label and remembers the last row it was given.
#[derive(Clone, Default)]
struct StubModel {
    label: i64,
    seen: Arc<Mutex<Option<Array2<f64>>>>,
}

impl StubModel {
    fn returning(label: i64) -> Self {
        Self { label, ..Self::default() }
    }

    fn last_row(&self) -> Option<Array2<f64>> {
        self.seen.lock().unwrap().clone()
    }
}

impl CropModel for StubModel {
    fn predict(&self, rows: &Array2<f64>) -> Result<i64, AdvisorError> {
        *self.seen.lock().unwrap() = Some(rows.clone());
        Ok(self.label)
    }
}

fn identity_advisor(model: StubModel) -> CropAdvisor {
    CropAdvisor::builder()
        .with_min_max_scaler(MinMaxScaler::new(vec![0.0; 7], vec![1.0; 7]).unwrap())
        .with_standard_scaler(StandardScaler::new(None, None).unwrap())
        .with_model(model)
        .build()
        .unwrap()
}

fn rice_fields() -> HashMap<String, String> {
    FEATURE_NAMES
        .iter()
        .zip(["90", "42", "43", "20.88", "82.0", "6.5", "202.9"])
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect()
}

#[test]
fn test_rice_scenario() -> Result<(), AdvisorError> {
    init();
    let advisor = identity_advisor(StubModel::returning(1));
    let features = FeatureVector::new(90.0, 42.0, 43.0, 20.88, 82.0, 6.5, 202.9);

    let rec = advisor.predict(&features)?;
    assert_eq!(rec.crop, Some("Rice"));
    assert_eq!(rec.message, "Rice is the best crop to be cultivated right there.");
    assert_eq!(rec.image_url, "https://images.pexels.com/photos/164504/pexels-photo-164504.jpeg");
    Ok(())
}

#[test]
fn test_predict_fields_matches_predict() -> Result<(), AdvisorError> {
    init();
    let model = StubModel::returning(1);
    let advisor = identity_advisor(model.clone());

    let from_form = advisor.predict_fields(&rice_fields())?;
    assert_eq!(from_form.crop, Some("Rice"));
    assert_eq!(
        model.last_row().unwrap(),
        array![[90.0, 42.0, 43.0, 20.88, 82.0, 6.5, 202.9]]
    );
    Ok(())
}

#[test]
fn test_every_known_label_yields_message_and_image() -> Result<(), AdvisorError> {
    init();
    let features = FeatureVector::new(1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0);
    for label in 1..=22 {
        let rec = identity_advisor(StubModel::returning(label)).predict(&features)?;
        let crop = rec.crop.expect("known label");
        assert_eq!(rec.message, format!("{} is the best crop to be cultivated right there.", crop));
        assert!(!rec.image_url.is_empty());
    }
    Ok(())
}

#[test]
fn test_unknown_label_fallback() -> Result<(), AdvisorError> {
    init();
    let features = FeatureVector::new(1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0);
    for label in [0, 23] {
        let rec = identity_advisor(StubModel::returning(label)).predict(&features)?;
        assert_eq!(rec.crop, None);
        assert_eq!(rec.message, UNDETERMINED_MESSAGE);
        assert_eq!(rec.image_url, DEFAULT_IMAGE_URL);
    }
    Ok(())
}

#[test]
fn test_invalid_field_is_a_validation_error() {
    init();
    let advisor = identity_advisor(StubModel::returning(1));
    let mut fields = rice_fields();
    fields.insert("Rainfall".into(), "lots".into());

    let err = advisor.predict_fields(&fields).err().unwrap();
    assert!(matches!(
        err,
        AdvisorError::ValidationError(FeatureError::Invalid { field: "Rainfall", .. })
    ));

    fields.remove("Nitrogen");
    let err = advisor.predict_fields(&fields).err().unwrap();
    assert!(matches!(err, AdvisorError::ValidationError(FeatureError::Missing("Nitrogen"))));
}

#[test]
fn test_min_max_is_applied_before_standard() -> Result<(), AdvisorError> {
    init();
    let min_max = MinMaxScaler::new(vec![1.0; 7], vec![0.5; 7])?;
    let standard = StandardScaler::new(Some(vec![2.0; 7]), Some(vec![4.0; 7]))?;
    let input = FeatureVector::new(10.0, 10.0, 10.0, 10.0, 10.0, 10.0, 10.0);

    let forward = standard.transform(&min_max.transform(&input.to_row())?)?;
    let reversed = min_max.transform(&standard.transform(&input.to_row())?)?;
    assert_ne!(forward, reversed, "scalers must not commute for this check");

    let model = StubModel::returning(5);
    let advisor = CropAdvisor::builder()
        .with_min_max_scaler(min_max)
        .with_standard_scaler(standard)
        .with_model(model.clone())
        .build()?;
    advisor.predict(&input)?;

    let seen = model.last_row().unwrap();
    assert_eq!(seen, forward);
    assert_eq!(seen, array![[1.0, 1.0, 1.0, 1.0, 1.0, 1.0, 1.0]]);
    assert_eq!(advisor.scale(&input.to_row())?, forward);
    Ok(())
}

#[test]
fn test_scalers_load_from_artifact_files() -> Result<(), Box<dyn std::error::Error>> {
    init();
    let dir = tempfile::tempdir()?;
    let paths = ArtifactPaths::in_dir(dir.path());
    fs::write(
        &paths.min_max_scaler,
        r#"{"min_": [0, 0, 0, 0, 0, 0, 0], "scale_": [0.01, 0.01, 0.01, 0.01, 0.01, 0.01, 0.001]}"#,
    )?;
    fs::write(
        &paths.standard_scaler,
        r#"{"mean_": [0.5, 0.5, 0.5, 0.5, 0.5, 0.5, 0.5], "scale_": [0.5, 0.5, 0.5, 0.5, 0.5, 0.5, 0.5]}"#,
    )?;

    let model = StubModel::returning(2);
    let advisor = CropAdvisor::builder()
        .with_min_max_scaler(MinMaxScaler::from_file(&paths.min_max_scaler)?)
        .with_standard_scaler(StandardScaler::from_file(&paths.standard_scaler)?)
        .with_model(model.clone())
        .build()?;

    let rec = advisor.predict(&FeatureVector::new(50.0, 100.0, 0.0, 50.0, 50.0, 50.0, 500.0))?;
    assert_eq!(rec.crop, Some("Maize"));

    let seen = model.last_row().unwrap();
    let expected = [0.0, 1.0, -1.0, 0.0, 0.0, 0.0, 0.0];
    for (got, want) in seen.iter().zip(expected) {
        assert!((got - want).abs() < 1e-9, "got {}, want {}", got, want);
    }
    Ok(())
}

#[test]
fn test_advisor_is_shareable_across_threads() {
    init();
    let advisor = Arc::new(identity_advisor(StubModel::returning(12)));
    let handles: Vec<_> = (0..4)
        .map(|i| {
            let advisor = Arc::clone(&advisor);
            std::thread::spawn(move || {
                let v = i as f64;
                advisor.predict(&FeatureVector::new(v, v, v, v, v, v, v)).unwrap()
            })
        })
        .collect();

    for handle in handles {
        assert_eq!(handle.join().unwrap().crop, Some("Mango"));
    }
}
