use std::fmt;

/// Errors from [`parse_score`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScoreError {
    /// The argument is not a decimal number.
    NotNumeric(String),
    /// The argument parsed to NaN or ±infinity.
    NotFinite(String),
}

impl fmt::Display for ScoreError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ScoreError::NotNumeric(raw) => write!(f, "score '{raw}' is not a number"),
            ScoreError::NotFinite(raw) => write!(f, "score '{raw}' is not finite"),
        }
    }
}

impl std::error::Error for ScoreError {}

/// Parse a new-model R² score given on the command line.
pub fn parse_score(raw: &str) -> Result<f64, ScoreError> {
    let trimmed = raw.trim();
    let score: f64 = trimmed
        .parse()
        .map_err(|_| ScoreError::NotNumeric(trimmed.to_string()))?;
    if !score.is_finite() {
        return Err(ScoreError::NotFinite(trimmed.to_string()));
    }
    Ok(score)
}
