//! Command handler modules for mgate-cli.
//!
//! Shared utilities used by multiple command paths live here.
//! Command-specific logic lives in the submodules.

pub mod gate;
pub mod model;

use std::path::PathBuf;

use anyhow::Result;
use mgate_config::{report_unused_keys, ConfigMode, LoadedConfig, UnusedKeyPolicy};

/// How a command finished, mapped to the process exit code in `main`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Deploy,
    Reject,
    Done,
}

// ---------------------------------------------------------------------------
// Shared helpers
// ---------------------------------------------------------------------------

/// Where config comes from and how strictly it is linted.
#[derive(Debug, Clone)]
pub struct ConfigSource {
    pub paths: Vec<PathBuf>,
    /// `Fail` under `--strict-config`; the shared pipeline config needs `Warn`.
    pub unused_keys: UnusedKeyPolicy,
}

/// Load layered config and lint keys this command does not read.
pub fn load_config(source: &ConfigSource, mode: Option<ConfigMode>) -> Result<LoadedConfig> {
    let loaded = mgate_config::load_layered_yaml(source.paths.as_slice())?;
    tracing::debug!(
        config_hash = %loaded.config_hash,
        layers = source.paths.len(),
        "config loaded"
    );

    if let Some(mode) = mode {
        let report = report_unused_keys(mode, &loaded.config_json, source.unused_keys)?;
        if !report.is_clean() {
            tracing::debug!(
                mode = %report.mode,
                unused = ?report.unused_leaf_pointers,
                "config keys not read by this command"
            );
        }
    }
    Ok(loaded)
}
