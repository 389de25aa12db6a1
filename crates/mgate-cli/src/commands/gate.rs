//! Promotion gate command handlers: `mgate compare` and `mgate promote`.

use std::path::Path;

use anyhow::{Context, Result};
use mgate_config::{ConfigMode, LoadedConfig, PathSettings};
use mgate_metadata::ModelMetadata;
use mgate_promotion::{build_report, Decision, GateThresholds};

use super::{load_config, ConfigSource, Outcome};

/// Execute `mgate compare <SCORE>`.
pub fn compare(config: &ConfigSource, score: &str, report_dir: Option<&Path>) -> Result<Outcome> {
    let new_score = mgate_promotion::parse_score(score).context("invalid score argument")?;

    let loaded = load_config(config, Some(ConfigMode::Compare))?;
    let thresholds = GateThresholds::from_config_json(&loaded.config_json)?;
    let paths = PathSettings::from_config_json(&loaded.config_json)?;

    let current = mgate_metadata::load_current(&paths.metadata)?;
    let decision = mgate_promotion::decide(new_score, current.as_ref(), &thresholds);

    finish(&loaded, &thresholds, new_score, current.as_ref(), &decision, report_dir)
}

/// Execute `mgate promote --candidate <JSON>`.
///
/// The candidate replaces the current-model record only on a deploy decision.
pub fn promote(
    config: &ConfigSource,
    candidate_path: &Path,
    report_dir: Option<&Path>,
) -> Result<Outcome> {
    let loaded = load_config(config, Some(ConfigMode::Promote))?;
    let thresholds = GateThresholds::from_config_json(&loaded.config_json)?;
    let paths = PathSettings::from_config_json(&loaded.config_json)?;

    let candidate = mgate_metadata::read_metadata(candidate_path)?;
    let current = mgate_metadata::load_current(&paths.metadata)?;
    let decision = mgate_promotion::promote(&candidate, current.as_ref(), &thresholds);

    if decision.should_deploy {
        mgate_metadata::write_metadata(&paths.metadata, &candidate)?;
        println!("promoted=true metadata_path={}", paths.metadata.display());
    } else {
        println!("promoted=false");
    }

    finish(
        &loaded,
        &thresholds,
        candidate.metrics.r2_score,
        current.as_ref(),
        &decision,
        report_dir,
    )
}

fn finish(
    loaded: &LoadedConfig,
    thresholds: &GateThresholds,
    new_score: f64,
    current: Option<&ModelMetadata>,
    decision: &Decision,
    report_dir: Option<&Path>,
) -> Result<Outcome> {
    println!("config_hash={}", loaded.config_hash);
    println!("new_score={:.4}", new_score);
    match current {
        Some(c) => {
            println!("current_score={:.4}", c.metrics.r2_score);
            println!("current_timestamp={}", c.timestamp);
        }
        None => println!("current_model=none"),
    }
    println!("decision={}", decision.label());
    println!("reason={}", decision.reason);

    if let Some(dir) = report_dir {
        let report = build_report(&loaded.config_hash, thresholds, new_score, current, decision);
        let path = mgate_promotion::write_promotion_report_json(dir, &report)
            .with_context(|| format!("write promotion report failed: {}", dir.display()))?;
        println!("report_path={}", path.display());
    }

    Ok(if decision.should_deploy {
        Outcome::Deploy
    } else {
        Outcome::Reject
    })
}
