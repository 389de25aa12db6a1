//! Which config keys each gate command reads, and a lint for the rest.
//!
//! Entries in the registry are JSON Pointer prefixes: "/params" covers
//! "/params/max_depth", but "/paths/metadata" does not cover
//! "/paths/metadata_backup". The shared `config.yaml` also carries
//! training-side sections (`mlflow`, `paths/data`, `model/test_size`), so the
//! CLI lints in warn mode unless `--strict-config` asks for a dedicated,
//! gate-only config.

use anyhow::{bail, Result};
use serde::Serialize;
use serde_json::Value;

/// Which gate command is reading the config.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigMode {
    Compare,
    Evaluate,
    Promote,
}

impl ConfigMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            ConfigMode::Compare => "COMPARE",
            ConfigMode::Evaluate => "EVALUATE",
            ConfigMode::Promote => "PROMOTE",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum UnusedKeyPolicy {
    #[default]
    Warn,
    Fail,
}

#[derive(Debug, Clone, Serialize)]
pub struct UnusedKeyReport {
    pub mode: String,
    /// Registry prefixes the report was computed against (sorted).
    pub consumed_prefixes: Vec<String>,
    /// Leaf pointers outside every consumed prefix (sorted).
    pub unused_leaf_pointers: Vec<String>,
}

impl UnusedKeyReport {
    pub fn is_clean(&self) -> bool {
        self.unused_leaf_pointers.is_empty()
    }
}

/// Consumed prefixes per command. Keep in step with the readers:
/// `GateThresholds::from_config_json` (mgate-promotion),
/// `PathSettings::from_config_json` and `ModelSettings::from_config_json`.
pub fn consumed_pointers_for_mode(mode: ConfigMode) -> &'static [&'static str] {
    const GATE: &[&str] = &[
        "/paths/metadata",
        "/thresholds/improvement_threshold",
        "/thresholds/min_r2_score",
    ];
    match mode {
        ConfigMode::Compare | ConfigMode::Promote => GATE,
        ConfigMode::Evaluate => &["/model/type", "/params"],
    }
}

/// Lint `config_json` for keys `mode` never reads.
///
/// Under [`UnusedKeyPolicy::Fail`] a non-empty result is an error
/// (`CONFIG_UNUSED_KEYS`); under `Warn` the report is returned for logging.
pub fn report_unused_keys(
    mode: ConfigMode,
    config_json: &Value,
    policy: UnusedKeyPolicy,
) -> Result<UnusedKeyReport> {
    let consumed = consumed_pointers_for_mode(mode);

    let mut unused = Vec::new();
    find_unused(config_json, String::new(), consumed, &mut unused);
    unused.sort();

    let mut consumed_prefixes: Vec<String> = consumed.iter().map(|p| p.to_string()).collect();
    consumed_prefixes.sort();

    let report = UnusedKeyReport {
        mode: mode.as_str().to_string(),
        consumed_prefixes,
        unused_leaf_pointers: unused,
    };

    if policy == UnusedKeyPolicy::Fail && !report.is_clean() {
        bail!(
            "CONFIG_UNUSED_KEYS mode={} count={}: {}",
            report.mode,
            report.unused_leaf_pointers.len(),
            report.unused_leaf_pointers.join(", ")
        );
    }
    Ok(report)
}

/// Depth-first walk that stops at consumed prefixes. Empty mappings and
/// arrays count as leaves; the document root never does.
fn find_unused(v: &Value, at: String, consumed: &[&str], out: &mut Vec<String>) {
    if consumed.iter().any(|prefix| covers(prefix, &at)) {
        return;
    }
    match v {
        Value::Object(map) if !map.is_empty() => {
            for (key, child) in map {
                find_unused(child, format!("{at}/{}", pointer_token(key)), consumed, out);
            }
        }
        Value::Array(items) if !items.is_empty() => {
            for (i, child) in items.iter().enumerate() {
                find_unused(child, format!("{at}/{i}"), consumed, out);
            }
        }
        _ if at.is_empty() => {}
        _ => out.push(at),
    }
}

fn covers(prefix: &str, pointer: &str) -> bool {
    match pointer.strip_prefix(prefix) {
        Some(rest) => rest.is_empty() || rest.starts_with('/'),
        None => false,
    }
}

/// RFC 6901 token escaping.
fn pointer_token(key: &str) -> String {
    key.replace('~', "~0").replace('/', "~1")
}
