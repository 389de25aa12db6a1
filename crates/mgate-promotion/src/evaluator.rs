use mgate_metadata::ModelMetadata;

use crate::types::{Decision, GateThresholds, PromotionReport};

/// Rounding slack on the improvement boundary, in machine epsilons of the
/// largest operand. `0.82 - 0.80` lands about 1e-16 under `0.02`.
const BOUNDARY_EPSILONS: f64 = 4.0;

// ============================================================================
// Public API
// ============================================================================

/// Decide whether a newly trained model replaces the current one.
///
/// Rules, in order:
/// 1. No current model: deploy.
/// 2. `new_score` below `min_r2_score`: reject, even if the current model is worse.
/// 3. Deploy iff `new_score - current r2 >= improvement_threshold` (inclusive).
pub fn decide(
    new_score: f64,
    current: Option<&ModelMetadata>,
    thresholds: &GateThresholds,
) -> Decision {
    let Some(current) = current else {
        tracing::info!(new_score, "no existing model; deploying new model");
        return Decision::deploy("First model deployment");
    };

    let current_score = current.metrics.r2_score;
    let improvement = new_score - current_score;
    tracing::info!(
        current_score,
        new_score,
        improvement,
        required = thresholds.improvement_threshold,
        current_timestamp = %current.timestamp,
        "model comparison"
    );

    if new_score.is_nan() || new_score < thresholds.min_r2_score {
        let reason = format!(
            "New model R² ({:.4}) below minimum threshold ({:.4})",
            new_score, thresholds.min_r2_score
        );
        tracing::info!(%reason, "rejected");
        return Decision::reject(reason);
    }

    if meets_improvement(new_score, current_score, thresholds.improvement_threshold) {
        let reason = format!(
            "New model improved by {:.4} (≥ {:.4})",
            improvement, thresholds.improvement_threshold
        );
        tracing::info!(%reason, "approved");
        Decision::deploy(reason)
    } else {
        let reason = format!(
            "Improvement {:.4} below threshold ({:.4})",
            improvement, thresholds.improvement_threshold
        );
        tracing::info!(%reason, "rejected");
        Decision::reject(reason)
    }
}

/// Inclusive `new - current >= threshold`, tolerating only the rounding error
/// of the subtraction itself. A model that scores worse never clears a
/// non-negative threshold.
fn meets_improvement(new_score: f64, current_score: f64, threshold: f64) -> bool {
    let improvement = new_score - current_score;
    if improvement < 0.0 && threshold >= 0.0 {
        return false;
    }
    if improvement >= threshold {
        return true;
    }
    let scale = new_score
        .abs()
        .max(current_score.abs())
        .max(threshold.abs())
        .max(1.0);
    threshold - improvement <= BOUNDARY_EPSILONS * f64::EPSILON * scale
}

/// Gate a fully described candidate on its recorded R² score.
pub fn promote(
    candidate: &ModelMetadata,
    current: Option<&ModelMetadata>,
    thresholds: &GateThresholds,
) -> Decision {
    decide(candidate.metrics.r2_score, current, thresholds)
}

/// Assemble the report artifact for one decision.
pub fn build_report(
    config_hash: &str,
    thresholds: &GateThresholds,
    new_score: f64,
    current: Option<&ModelMetadata>,
    decision: &Decision,
) -> PromotionReport {
    PromotionReport {
        config_hash: config_hash.to_string(),
        thresholds: *thresholds,
        new_score,
        current_score: current.map(|c| c.metrics.r2_score),
        current_timestamp: current.map(|c| c.timestamp.clone()),
        improvement: current.map(|c| new_score - c.metrics.r2_score),
        decision: decision.clone(),
    }
}
