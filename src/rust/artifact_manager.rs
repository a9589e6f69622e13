use std::collections::HashMap;
use std::env;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use sha2::{Digest, Sha256};
use tokio::sync::Mutex;

pub const MIN_MAX_SCALER_FILE: &str = "minmaxscaler.json";
pub const STANDARD_SCALER_FILE: &str = "standscaler.json";
pub const MODEL_FILE: &str = "model.onnx";
/// Optional map of artifact file name to SHA-256 hex digest.
pub const CHECKSUMS_FILE: &str = "checksums.json";

pub const ARTIFACT_FILES: [&str; 3] = [MIN_MAX_SCALER_FILE, STANDARD_SCALER_FILE, MODEL_FILE];

#[derive(Debug, thiserror::Error)]
pub enum ArtifactError {
    #[error("Artifacts not found in {dir:?}: {missing:?}")]
    NotFound { dir: PathBuf, missing: Vec<String> },
    #[error("Download error: {0}")]
    DownloadError(#[from] reqwest::Error),
    #[error("IO error: {0}")]
    IoError(#[from] io::Error),
    #[error("Invalid checksum file: {0}")]
    InvalidChecksums(String),
    #[error("Hash mismatch: expected {expected}, got {actual} for {file}")]
    HashMismatch {
        file: String,
        expected: String,
        actual: String,
    },
}

/// Locations of the three fitted artifacts the advisor needs.
#[derive(Debug, Clone, PartialEq)]
pub struct ArtifactPaths {
    pub min_max_scaler: PathBuf,
    pub standard_scaler: PathBuf,
    pub model: PathBuf,
}

impl ArtifactPaths {
    pub fn in_dir<P: AsRef<Path>>(dir: P) -> Self {
        let dir = dir.as_ref();
        Self {
            min_max_scaler: dir.join(MIN_MAX_SCALER_FILE),
            standard_scaler: dir.join(STANDARD_SCALER_FILE),
            model: dir.join(MODEL_FILE),
        }
    }

    /// Pairs each artifact's file name with its full path.
    pub fn entries(&self) -> [(&'static str, &Path); 3] {
        [
            (MIN_MAX_SCALER_FILE, self.min_max_scaler.as_path()),
            (STANDARD_SCALER_FILE, self.standard_scaler.as_path()),
            (MODEL_FILE, self.model.as_path()),
        ]
    }
}

/// Owns the directory the fitted artifacts live in.
#[derive(Clone)]
pub struct ArtifactManager {
    artifacts_dir: PathBuf,
    download_lock: Arc<Mutex<()>>,
}

impl ArtifactManager {
    /// Creates a new ArtifactManager with the default artifacts directory
    pub fn new_default() -> io::Result<Self> {
        Self::new(Self::default_artifacts_dir())
    }

    /// Returns the default artifacts directory path
    pub fn default_artifacts_dir() -> PathBuf {
        // 1. Check environment variable
        if let Ok(path) = env::var("CROP_ADVISOR_ARTIFACTS") {
            return PathBuf::from(path);
        }

        // 2. Use platform-specific data directory
        if let Some(data_dir) = dirs::data_dir() {
            return data_dir.join("crop_advisor").join("artifacts");
        }

        // 3. Fallback to user's home directory
        if let Some(home_dir) = dirs::home_dir() {
            return home_dir.join(".local").join("share").join("crop_advisor").join("artifacts");
        }

        env::temp_dir().join("crop_advisor").join("artifacts")
    }

    pub fn new<P: AsRef<Path>>(artifacts_dir: P) -> io::Result<Self> {
        let artifacts_dir = artifacts_dir.as_ref().to_path_buf();
        fs::create_dir_all(&artifacts_dir)?;
        Ok(Self {
            artifacts_dir,
            download_lock: Arc::new(Mutex::new(())),
        })
    }

    pub fn dir(&self) -> &Path {
        &self.artifacts_dir
    }

    pub fn paths(&self) -> ArtifactPaths {
        ArtifactPaths::in_dir(&self.artifacts_dir)
    }

    /// Names of the artifact files not present on disk.
    pub fn missing(&self) -> Vec<&'static str> {
        self.paths()
            .entries()
            .iter()
            .filter(|(_, path)| !path.exists())
            .map(|(name, _)| *name)
            .collect()
    }

    pub fn is_complete(&self) -> bool {
        let complete = self.missing().is_empty();
        log::info!("Artifacts in {:?} complete: {}", self.artifacts_dir, complete);
        complete
    }

    /// Reads the checksum file, if the directory has one.
    pub fn load_checksums(&self) -> Result<Option<HashMap<String, String>>, ArtifactError> {
        let path = self.artifacts_dir.join(CHECKSUMS_FILE);
        if !path.exists() {
            return Ok(None);
        }
        let text = fs::read_to_string(&path)?;
        parse_checksums(&text).map(Some)
    }

    /// Checks that every artifact exists and matches its recorded checksum.
    ///
    /// Without a checksum file only presence is checked.
    pub fn verify(&self) -> Result<(), ArtifactError> {
        let missing = self.missing();
        if !missing.is_empty() {
            return Err(ArtifactError::NotFound {
                dir: self.artifacts_dir.clone(),
                missing: missing.into_iter().map(String::from).collect(),
            });
        }

        let Some(checksums) = self.load_checksums()? else {
            log::info!("No {} in {:?}, skipping hash verification", CHECKSUMS_FILE, self.artifacts_dir);
            return Ok(());
        };

        for (name, path) in self.paths().entries() {
            if let Some(expected) = checksums.get(name) {
                let actual = sha256_hex(&fs::read(path)?);
                log::debug!("{}: expected {}, calculated {}", name, expected, actual);
                check_hash(name, expected, &actual)?;
            }
        }
        log::info!("Artifact checksums verified");
        Ok(())
    }

    /// Downloads missing artifacts from `{base_url}/{file name}`.
    ///
    /// A `checksums.json` next to the artifacts is fetched too when the server
    /// has one, and every downloaded file is checked against it before it is
    /// written. With `fresh`, existing artifacts are removed first.
    pub async fn fetch(&self, base_url: &str, fresh: bool) -> Result<(), ArtifactError> {
        let _lock = self.download_lock.lock().await;
        let base_url = base_url.trim_end_matches('/');

        if fresh {
            log::info!("Fresh download requested - removing existing artifacts...");
            self.remove_all()?;
        }

        let checksums = match self.fetch_checksums(base_url).await? {
            Some(checksums) => Some(checksums),
            None => self.load_checksums()?,
        };

        for (name, path) in self.paths().entries() {
            if path.exists() {
                log::info!("{} already present, skipping", name);
                continue;
            }
            let expected = checksums.as_ref().and_then(|c| c.get(name));
            let url = format!("{}/{}", base_url, name);
            if let Err(e) = self.download_file(&url, path, name, expected).await {
                log::error!("Failed to fetch {}: {}", name, e);
                // Cleanup on failure
                let _ = fs::remove_file(path);
                return Err(e);
            }
        }

        log::info!("Artifacts ready in {:?}", self.artifacts_dir);
        Ok(())
    }

    async fn fetch_checksums(&self, base_url: &str) -> Result<Option<HashMap<String, String>>, ArtifactError> {
        let url = format!("{}/{}", base_url, CHECKSUMS_FILE);
        let response = reqwest::get(&url).await?;
        if response.status() == reqwest::StatusCode::NOT_FOUND {
            log::info!("No checksum file at {}", url);
            return Ok(None);
        }
        let text = response.error_for_status()?.text().await?;
        let checksums = parse_checksums(&text)?;
        fs::write(self.artifacts_dir.join(CHECKSUMS_FILE), &text)?;
        Ok(Some(checksums))
    }

    async fn download_file(
        &self,
        url: &str,
        path: &Path,
        name: &str,
        expected_hash: Option<&String>,
    ) -> Result<(), ArtifactError> {
        log::info!("Downloading {} from {}", name, url);
        let response = reqwest::get(url).await?.error_for_status()?;
        let bytes = response.bytes().await?;
        log::info!("Downloaded {} bytes", bytes.len());

        if let Some(expected) = expected_hash {
            check_hash(name, expected, &sha256_hex(&bytes))?;
        }

        fs::write(path, &bytes)?;
        Ok(())
    }

    /// Removes every artifact and the checksum file.
    pub fn remove_all(&self) -> Result<(), ArtifactError> {
        for name in ARTIFACT_FILES.iter().chain([CHECKSUMS_FILE].iter()) {
            let path = self.artifacts_dir.join(name);
            if path.exists() {
                fs::remove_file(&path)?;
            }
        }
        Ok(())
    }
}

pub fn sha256_hex(bytes: &[u8]) -> String {
    let mut hasher = Sha256::new();
    hasher.update(bytes);
    format!("{:x}", hasher.finalize())
}

fn check_hash(name: &str, expected: &str, actual: &str) -> Result<(), ArtifactError> {
    if !expected.eq_ignore_ascii_case(actual) {
        log::error!("{} hash mismatch: expected {}, got {}", name, expected, actual);
        return Err(ArtifactError::HashMismatch {
            file: name.to_string(),
            expected: expected.to_string(),
            actual: actual.to_string(),
        });
    }
    Ok(())
}

fn parse_checksums(text: &str) -> Result<HashMap<String, String>, ArtifactError> {
    serde_json::from_str(text).map_err(|e| ArtifactError::InvalidChecksums(e.to_string()))
}
