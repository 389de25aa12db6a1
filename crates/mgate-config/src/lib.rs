//! Layered YAML configuration for the promotion gate.
//!
//! The pipeline's `config.yaml` is shared with the training job. Layers are
//! merged in order (later layers override mapping entries of earlier ones),
//! then written as key-sorted compact JSON and hashed so every promotion
//! report names the exact thresholds it was decided under. Typed readers live
//! in [`pointer`] and [`settings`]; the unused-key lint lives in
//! [`consumption`].

mod consumption;
pub mod pointer;
pub mod settings;

pub use consumption::{
    consumed_pointers_for_mode, report_unused_keys, ConfigMode, UnusedKeyPolicy,
    UnusedKeyReport,
};
pub use pointer::{optional_object, require_f64, require_str};
pub use settings::{ModelSettings, PathSettings};

use anyhow::{Context, Result};
use serde_json::Value;
use sha2::{Digest, Sha256};
use std::fs;
use std::path::Path;

/// Merged configuration plus its identity.
#[derive(Debug, Clone)]
pub struct LoadedConfig {
    /// SHA-256 of `canonical_json`, lowercase hex.
    pub config_hash: String,
    pub canonical_json: String,
    pub config_json: Value,
}

/// Read and merge YAML files in the given order.
pub fn load_layered_yaml<P: AsRef<Path>>(paths: &[P]) -> Result<LoadedConfig> {
    let mut merged = Value::Object(Default::default());
    for p in paths {
        let p = p.as_ref();
        let raw = fs::read_to_string(p)
            .with_context(|| format!("failed to read yaml path: {}", p.display()))?;
        tracing::debug!(path = %p.display(), bytes = raw.len(), "config layer read");
        let layer = yaml_layer(&raw).with_context(|| format!("config layer {}", p.display()))?;
        merge_layer(&mut merged, layer);
    }
    finish(merged)
}

/// Same as [`load_layered_yaml`] for in-memory documents.
pub fn load_layered_yaml_from_strings(yaml_docs: &[&str]) -> Result<LoadedConfig> {
    let mut merged = Value::Object(Default::default());
    for (i, raw) in yaml_docs.iter().enumerate() {
        let layer = yaml_layer(raw).with_context(|| format!("config layer #{i}"))?;
        merge_layer(&mut merged, layer);
    }
    finish(merged)
}

fn yaml_layer(raw: &str) -> Result<Value> {
    let doc: serde_yaml::Value = serde_yaml::from_str(raw).context("invalid yaml")?;
    serde_json::to_value(doc).context("yaml document is not representable as json")
}

fn finish(config_json: Value) -> Result<LoadedConfig> {
    let canonical_json = canonicalize_json(&config_json)?;
    let config_hash = hex::encode(Sha256::digest(canonical_json.as_bytes()));
    Ok(LoadedConfig {
        config_hash,
        canonical_json,
        config_json,
    })
}

/// Overlay `layer` onto `base`. Mappings merge key by key; anything else in
/// the layer replaces the base value. A null layer (empty YAML document or
/// `key: ~`) leaves the base untouched.
fn merge_layer(base: &mut Value, layer: Value) {
    match (base, layer) {
        (_, Value::Null) => {}
        (Value::Object(base_map), Value::Object(layer_map)) => {
            for (key, value) in layer_map {
                merge_layer(base_map.entry(key).or_insert(Value::Null), value);
            }
        }
        (slot, value) => *slot = value,
    }
}

/// Compact JSON with object keys sorted at every level.
fn canonicalize_json(v: &Value) -> Result<String> {
    let mut out = String::new();
    write_canonical(v, &mut out)?;
    Ok(out)
}

fn write_canonical(v: &Value, out: &mut String) -> Result<()> {
    match v {
        Value::Object(map) => {
            let mut entries: Vec<(&String, &Value)> = map.iter().collect();
            entries.sort_by(|a, b| a.0.cmp(b.0));
            out.push('{');
            for (i, (key, value)) in entries.into_iter().enumerate() {
                if i > 0 {
                    out.push(',');
                }
                out.push_str(&serde_json::to_string(key).context("canonical key")?);
                out.push(':');
                write_canonical(value, out)?;
            }
            out.push('}');
        }
        Value::Array(items) => {
            out.push('[');
            for (i, item) in items.iter().enumerate() {
                if i > 0 {
                    out.push(',');
                }
                write_canonical(item, out)?;
            }
            out.push(']');
        }
        scalar => out.push_str(&serde_json::to_string(scalar).context("canonical scalar")?),
    }
    Ok(())
}
