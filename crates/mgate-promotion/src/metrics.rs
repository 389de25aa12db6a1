//! Hold-out regression metrics (RMSE, MAE, R²).
//!
//! ## Predictions CSV contract (case-insensitive, order-independent)
//!
//! | Column   | Example  | Notes                       |
//! |----------|----------|-----------------------------|
//! | `y_true` | `4.526`  | Observed target             |
//! | `y_pred` | `4.131`  | Model prediction            |
//!
//! Extra columns (feature values, row ids) are ignored.

use std::fmt;
use std::fs::File;
use std::io::Read;
use std::path::Path;

use mgate_metadata::RegressionMetrics;

/// Errors from reading predictions or computing metrics.
#[derive(Debug, Clone, PartialEq)]
pub enum MetricsError {
    /// No samples to score.
    Empty,
    /// `y_true` and `y_pred` differ in length.
    LengthMismatch { y_true: usize, y_pred: usize },
    /// A sample is NaN or infinite.
    NonFinite { index: usize },
    /// An I/O or CSV-library error.
    Io(String),
    /// The header row is missing a required column.
    MissingHeader(&'static str),
    /// A record field could not be parsed as a number.
    ParseField {
        row: usize,
        field: &'static str,
        raw: String,
    },
}

impl fmt::Display for MetricsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MetricsError::Empty => write!(f, "no samples to evaluate"),
            MetricsError::LengthMismatch { y_true, y_pred } => {
                write!(f, "length mismatch: {y_true} targets vs {y_pred} predictions")
            }
            MetricsError::NonFinite { index } => {
                write!(f, "sample {index} contains a non-finite value")
            }
            MetricsError::Io(msg) => write!(f, "csv io error: {msg}"),
            MetricsError::MissingHeader(col) => {
                write!(f, "csv missing required header column: '{col}'")
            }
            MetricsError::ParseField { row, field, raw } => {
                write!(f, "csv row {row}: cannot parse field '{field}' from value '{raw}'")
            }
        }
    }
}

impl std::error::Error for MetricsError {}

impl From<csv::Error> for MetricsError {
    fn from(e: csv::Error) -> Self {
        MetricsError::Io(e.to_string())
    }
}

/// Paired targets and predictions, in file order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Predictions {
    pub y_true: Vec<f64>,
    pub y_pred: Vec<f64>,
}

impl Predictions {
    pub fn metrics(&self) -> Result<RegressionMetrics, MetricsError> {
        compute_regression_metrics(&self.y_true, &self.y_pred)
    }
}

/// Compute RMSE, MAE and R² over paired samples.
///
/// R² is `1 - SS_res / SS_tot`. A constant target (`SS_tot == 0`) scores 1.0
/// when predicted exactly and 0.0 otherwise, so the result is always finite.
pub fn compute_regression_metrics(
    y_true: &[f64],
    y_pred: &[f64],
) -> Result<RegressionMetrics, MetricsError> {
    if y_true.len() != y_pred.len() {
        return Err(MetricsError::LengthMismatch {
            y_true: y_true.len(),
            y_pred: y_pred.len(),
        });
    }
    if y_true.is_empty() {
        return Err(MetricsError::Empty);
    }
    if let Some(index) = y_true
        .iter()
        .zip(y_pred)
        .position(|(t, p)| !t.is_finite() || !p.is_finite())
    {
        return Err(MetricsError::NonFinite { index });
    }

    let n = y_true.len() as f64;
    let mean_true = y_true.iter().sum::<f64>() / n;

    let mut ss_res = 0.0_f64;
    let mut ss_tot = 0.0_f64;
    let mut abs_err = 0.0_f64;
    for (&t, &p) in y_true.iter().zip(y_pred) {
        let err = t - p;
        ss_res += err * err;
        abs_err += err.abs();
        ss_tot += (t - mean_true) * (t - mean_true);
    }

    let r2_score = if ss_tot > 0.0 {
        1.0 - ss_res / ss_tot
    } else if ss_res == 0.0 {
        1.0
    } else {
        0.0
    };

    Ok(RegressionMetrics {
        r2_score,
        rmse: (ss_res / n).sqrt(),
        mae: abs_err / n,
    })
}

/// Read a predictions CSV from disk.
pub fn read_predictions_csv(path: &Path) -> Result<Predictions, MetricsError> {
    let file = File::open(path).map_err(|e| MetricsError::Io(format!("{}: {e}", path.display())))?;
    read_predictions(file)
}

/// Read predictions from any CSV source.
pub fn read_predictions<R: Read>(source: R) -> Result<Predictions, MetricsError> {
    let mut rdr = csv::ReaderBuilder::new()
        .has_headers(true)
        .trim(csv::Trim::All)
        .from_reader(source);

    let headers = rdr.headers()?.clone();
    let col = |name: &'static str| {
        headers
            .iter()
            .position(|h| h.eq_ignore_ascii_case(name))
            .ok_or(MetricsError::MissingHeader(name))
    };
    let true_idx = col("y_true")?;
    let pred_idx = col("y_pred")?;

    let mut out = Predictions::default();
    for (i, record) in rdr.records().enumerate() {
        let record = record?;
        // Row numbers are 1-based and count the header.
        let row = i + 2;
        out.y_true.push(parse_field(&record, true_idx, row, "y_true")?);
        out.y_pred.push(parse_field(&record, pred_idx, row, "y_pred")?);
    }
    Ok(out)
}

fn parse_field(
    record: &csv::StringRecord,
    idx: usize,
    row: usize,
    field: &'static str,
) -> Result<f64, MetricsError> {
    let raw = record.get(idx).unwrap_or("");
    raw.parse().map_err(|_| MetricsError::ParseField {
        row,
        field,
        raw: raw.to_string(),
    })
}
