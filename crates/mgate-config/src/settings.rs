use std::path::PathBuf;

use anyhow::Result;
use serde_json::{Map, Value};

use crate::pointer::{optional_object, require_str};

/// Filesystem locations the gate reads and writes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PathSettings {
    /// JSON record of the current production model (`paths.metadata`).
    pub metadata: PathBuf,
}

impl PathSettings {
    pub fn from_config_json(config: &Value) -> Result<Self> {
        Ok(Self {
            metadata: PathBuf::from(require_str(config, "/paths/metadata")?),
        })
    }
}

/// Model identity copied into a candidate's metadata record.
#[derive(Debug, Clone, PartialEq)]
pub struct ModelSettings {
    /// `model.type`, e.g. `RandomForestRegressor`.
    pub model_type: String,
    /// Hyper-parameters passed to the trainer (`params`), recorded verbatim.
    pub params: Map<String, Value>,
}

impl ModelSettings {
    pub fn from_config_json(config: &Value) -> Result<Self> {
        Ok(Self {
            model_type: require_str(config, "/model/type")?.to_string(),
            params: optional_object(config, "/params")?,
        })
    }
}
