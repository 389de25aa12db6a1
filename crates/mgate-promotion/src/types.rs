use std::io;
use std::path::{Path, PathBuf};

use anyhow::Result;
use serde::{Deserialize, Serialize};
use serde_json::Value;

// ---------------------------------------------------------------------------
// Config
// ---------------------------------------------------------------------------

/// Thresholds for promotion gating. Immutable for the duration of a comparison.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GateThresholds {
    /// Minimum R² gain over the current model (inclusive).
    pub improvement_threshold: f64,
    /// Absolute R² floor a new model must reach, whatever the current model scores.
    pub min_r2_score: f64,
}

impl GateThresholds {
    /// Read `thresholds.improvement_threshold` and `thresholds.min_r2_score`.
    /// Either key missing or non-numeric is fatal.
    pub fn from_config_json(config: &Value) -> Result<Self> {
        Ok(Self {
            improvement_threshold: mgate_config::require_f64(
                config,
                "/thresholds/improvement_threshold",
            )?,
            min_r2_score: mgate_config::require_f64(config, "/thresholds/min_r2_score")?,
        })
    }
}

// ---------------------------------------------------------------------------
// Decision
// ---------------------------------------------------------------------------

/// Gate result. Returned synchronously; the gate never persists it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Decision {
    pub should_deploy: bool,
    pub reason: String,
}

impl Decision {
    pub(crate) fn deploy(reason: impl Into<String>) -> Self {
        Self {
            should_deploy: true,
            reason: reason.into(),
        }
    }

    pub(crate) fn reject(reason: impl Into<String>) -> Self {
        Self {
            should_deploy: false,
            reason: reason.into(),
        }
    }

    /// `DEPLOY` / `KEEP_CURRENT`, as printed by the CLI.
    pub fn label(&self) -> &'static str {
        if self.should_deploy {
            "DEPLOY"
        } else {
            "KEEP_CURRENT"
        }
    }
}

// ---------------------------------------------------------------------------
// Report
// ---------------------------------------------------------------------------

/// Promotion report artifact (serializable to JSON).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PromotionReport {
    /// Hash of the merged config the thresholds were read from.
    pub config_hash: String,
    pub thresholds: GateThresholds,
    pub new_score: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub current_score: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub current_timestamp: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub improvement: Option<f64>,
    pub decision: Decision,
}

/// Write the report as pretty-printed JSON to `out_dir/promotion_report.json`.
/// Returns the path written.
pub fn write_promotion_report_json(
    out_dir: &Path,
    report: &PromotionReport,
) -> io::Result<PathBuf> {
    std::fs::create_dir_all(out_dir)?;
    let path = out_dir.join("promotion_report.json");
    let json = serde_json::to_string_pretty(report).map_err(io::Error::other)?;
    std::fs::write(&path, json)?;
    Ok(path)
}
