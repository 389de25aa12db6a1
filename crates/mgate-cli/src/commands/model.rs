//! Model record command handlers: `mgate evaluate` and `mgate current`.

use std::path::Path;

use anyhow::{Context, Result};
use mgate_config::{ConfigMode, ModelSettings, PathSettings};
use mgate_metadata::ModelMetadata;

use super::{load_config, ConfigSource, Outcome};

/// Execute `mgate evaluate`: score a predictions CSV and optionally write a
/// candidate metadata record for `mgate promote`.
pub fn evaluate(config: &ConfigSource, predictions: &Path, out: Option<&Path>) -> Result<Outcome> {
    let preds = mgate_promotion::read_predictions_csv(predictions)
        .with_context(|| format!("read predictions failed: {}", predictions.display()))?;
    let metrics = preds.metrics().context("evaluate predictions failed")?;
    tracing::info!(
        samples = preds.y_true.len(),
        r2_score = metrics.r2_score,
        rmse = metrics.rmse,
        mae = metrics.mae,
        "predictions evaluated"
    );

    println!("samples={}", preds.y_true.len());
    println!("rmse={:.4}", metrics.rmse);
    println!("mae={:.4}", metrics.mae);
    println!("r2_score={:.4}", metrics.r2_score);

    // Config is only needed to describe the model in a candidate record.
    if let Some(out) = out {
        let loaded = load_config(config, Some(ConfigMode::Evaluate))?;
        let model = ModelSettings::from_config_json(&loaded.config_json)?;
        let candidate = ModelMetadata::new(metrics, model.model_type, model.params);
        mgate_metadata::write_metadata(out, &candidate)?;
        println!("candidate_path={}", out.display());
    }

    Ok(Outcome::Done)
}

/// Execute `mgate current`.
pub fn current(config: &ConfigSource) -> Result<Outcome> {
    let loaded = load_config(config, None)?;
    let paths = PathSettings::from_config_json(&loaded.config_json)?;

    match mgate_metadata::load_current(&paths.metadata)? {
        Some(meta) => {
            println!("current_model=present");
            println!("timestamp={}", meta.timestamp);
            println!("model_type={}", meta.model_type);
            println!("r2_score={:.4}", meta.metrics.r2_score);
            println!("rmse={:.4}", meta.metrics.rmse);
            println!("mae={:.4}", meta.metrics.mae);
            println!(
                "params={}",
                serde_json::to_string(&meta.params).context("serialize params failed")?
            );
        }
        None => println!("current_model=none"),
    }

    Ok(Outcome::Done)
}
