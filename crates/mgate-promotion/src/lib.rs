mod evaluator;
mod metrics;
mod score;
mod types;

pub use evaluator::{build_report, decide, promote};
pub use metrics::{
    compute_regression_metrics, read_predictions, read_predictions_csv, MetricsError,
    Predictions,
};
pub use score::{parse_score, ScoreError};
pub use types::{write_promotion_report_json, Decision, GateThresholds, PromotionReport};

pub use mgate_metadata::{ModelMetadata, RegressionMetrics};
