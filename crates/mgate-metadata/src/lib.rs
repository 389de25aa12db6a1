//! The "current production model" record.
//!
//! Exactly one [`ModelMetadata`] file is current at any time. Promotion
//! overwrites it in place; there is no history.

use anyhow::{Context, Result};
use chrono::Local;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fs;
use std::io;
use std::path::Path;

/// Hold-out metrics recorded for a trained model.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RegressionMetrics {
    pub r2_score: f64,
    pub rmse: f64,
    pub mae: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModelMetadata {
    /// ISO-8601 local time of the training run.
    pub timestamp: String,
    pub metrics: RegressionMetrics,
    pub model_type: String,
    /// Hyper-parameters as given to the trainer.
    #[serde(default)]
    pub params: Map<String, Value>,
}

impl ModelMetadata {
    /// Build a record stamped with the current local time.
    pub fn new(
        metrics: RegressionMetrics,
        model_type: impl Into<String>,
        params: Map<String, Value>,
    ) -> Self {
        Self {
            timestamp: Local::now()
                .naive_local()
                .format("%Y-%m-%dT%H:%M:%S%.6f")
                .to_string(),
            metrics,
            model_type: model_type.into(),
            params,
        }
    }
}

/// Parse a metadata document. Missing keys or wrong types are fatal.
pub fn parse_metadata(raw: &str) -> Result<ModelMetadata> {
    serde_json::from_str(raw).context("malformed model metadata")
}

/// Read a metadata file that must exist (e.g. a freshly evaluated candidate).
pub fn read_metadata(path: &Path) -> Result<ModelMetadata> {
    let raw = fs::read_to_string(path)
        .with_context(|| format!("read metadata failed: {}", path.display()))?;
    parse_metadata(&raw).with_context(|| format!("parse metadata failed: {}", path.display()))
}

/// Load the current production model record.
///
/// A missing file means no model has been deployed yet and yields `Ok(None)`.
/// Any other read or parse failure is an error.
pub fn load_current(path: &Path) -> Result<Option<ModelMetadata>> {
    let raw = match fs::read_to_string(path) {
        Ok(raw) => raw,
        Err(e) if e.kind() == io::ErrorKind::NotFound => {
            tracing::warn!(path = %path.display(), "no current model found; next promotion is the first");
            return Ok(None);
        }
        Err(e) => {
            return Err(e).with_context(|| format!("read metadata failed: {}", path.display()))
        }
    };

    let meta = parse_metadata(&raw)
        .with_context(|| format!("parse metadata failed: {}", path.display()))?;
    tracing::info!(
        path = %path.display(),
        r2_score = meta.metrics.r2_score,
        timestamp = %meta.timestamp,
        "current model metadata loaded"
    );
    Ok(Some(meta))
}

/// Write a metadata record, overwriting any existing file. Parent directories
/// are created. Promotion calls this on the current-model path.
pub fn write_metadata(path: &Path, meta: &ModelMetadata) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)
            .with_context(|| format!("create metadata dir failed: {}", parent.display()))?;
    }

    let json = serde_json::to_string_pretty(meta).context("serialize metadata failed")?;
    fs::write(path, format!("{json}\n"))
        .with_context(|| format!("write metadata failed: {}", path.display()))?;
    tracing::info!(path = %path.display(), r2_score = meta.metrics.r2_score, "metadata written");
    Ok(())
}
