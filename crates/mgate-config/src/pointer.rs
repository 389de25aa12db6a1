//! Typed reads from the merged config JSON.
//!
//! Every required read fails with the JSON pointer in the message so a
//! malformed `config.yaml` is diagnosable from the CLI error alone.

use anyhow::{anyhow, bail, Result};
use serde_json::{Map, Value};

/// Read a required number. YAML integers (`0`) are accepted as floats.
pub fn require_f64(config: &Value, pointer: &str) -> Result<f64> {
    let v = config
        .pointer(pointer)
        .ok_or_else(|| anyhow!("CONFIG_MISSING_KEY {pointer}"))?;
    match v.as_f64() {
        Some(n) if n.is_finite() => Ok(n),
        Some(n) => bail!("CONFIG_INVALID_VALUE {pointer}: expected a finite number, got {n}"),
        None => bail!("CONFIG_INVALID_VALUE {pointer}: expected a number, got {v}"),
    }
}

/// Read a required, non-blank string (trimmed).
pub fn require_str<'a>(config: &'a Value, pointer: &str) -> Result<&'a str> {
    let v = config
        .pointer(pointer)
        .ok_or_else(|| anyhow!("CONFIG_MISSING_KEY {pointer}"))?;
    let s = v
        .as_str()
        .ok_or_else(|| anyhow!("CONFIG_INVALID_VALUE {pointer}: expected a string, got {v}"))?
        .trim();
    if s.is_empty() {
        bail!("CONFIG_INVALID_VALUE {pointer}: must not be blank");
    }
    Ok(s)
}

/// Read an optional mapping. Absent or `null` yields an empty map; any other
/// non-object value is an error.
pub fn optional_object(config: &Value, pointer: &str) -> Result<Map<String, Value>> {
    match config.pointer(pointer) {
        None | Some(Value::Null) => Ok(Map::new()),
        Some(Value::Object(m)) => Ok(m.clone()),
        Some(other) => bail!("CONFIG_INVALID_VALUE {pointer}: expected a mapping, got {other}"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn require_f64_accepts_integers() {
        let cfg = json!({"thresholds": {"min_r2_score": 0}});
        assert_eq!(require_f64(&cfg, "/thresholds/min_r2_score").unwrap(), 0.0);
    }

    #[test]
    fn require_f64_names_missing_pointer() {
        let cfg = json!({"thresholds": {}});
        let err = require_f64(&cfg, "/thresholds/min_r2_score").unwrap_err();
        assert!(err.to_string().contains("CONFIG_MISSING_KEY /thresholds/min_r2_score"));
    }

    #[test]
    fn require_f64_rejects_strings() {
        let cfg = json!({"thresholds": {"min_r2_score": "high"}});
        let err = require_f64(&cfg, "/thresholds/min_r2_score").unwrap_err();
        assert!(err.to_string().contains("expected a number"));
    }

    #[test]
    fn require_str_rejects_blank() {
        let cfg = json!({"paths": {"metadata": "   "}});
        assert!(require_str(&cfg, "/paths/metadata").is_err());
    }

    #[test]
    fn optional_object_defaults_to_empty() {
        let cfg = json!({"params": null});
        assert!(optional_object(&cfg, "/params").unwrap().is_empty());
        assert!(optional_object(&cfg, "/missing").unwrap().is_empty());
        assert!(optional_object(&json!({"params": [1]}), "/params").is_err());
    }
}
