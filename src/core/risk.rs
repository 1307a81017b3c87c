use chrono::{DateTime, NaiveDateTime};
use serde::{Deserialize, Serialize};

use crate::error::ValidationError;

pub const SCORE_MIN: f64 = 0.0;
pub const SCORE_MAX: f64 = 100.0;
pub const HIGH_RISK_THRESHOLD: f64 = 80.0;
pub const MEDIUM_RISK_THRESHOLD: f64 = 40.0;

/// Raw score exactly as the backend sent it.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ScoreValue {
    Number(f64),
    Text(String),
    #[default]
    Missing,
}

impl ScoreValue {
    /// Converts the raw value to a finite number.
    pub fn coerce(&self) -> Result<f64, ValidationError> {
        match self {
            Self::Number(value) if value.is_finite() => Ok(*value),
            Self::Number(_) => Err(ValidationError::NotFinite {
                field: "risk_score",
            }),
            Self::Text(text) => parse_finite("risk_score", text),
            Self::Missing => Err(ValidationError::Missing {
                field: "risk_score",
            }),
        }
    }

    /// Numeric reading without the finiteness check; `"1e400"` yields infinity.
    #[must_use]
    pub fn parsed_number(&self) -> Option<f64> {
        match self {
            Self::Number(value) => Some(*value),
            Self::Text(text) => text.trim().parse().ok(),
            Self::Missing => None,
        }
    }
}

impl From<f64> for ScoreValue {
    fn from(value: f64) -> Self {
        Self::Number(value)
    }
}

impl From<&str> for ScoreValue {
    fn from(value: &str) -> Self {
        Self::Text(value.to_owned())
    }
}

/// One historical observation for a user.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RiskPoint {
    #[serde(default)]
    pub timestamp: String,
    #[serde(default)]
    pub risk_score: ScoreValue,
}

impl RiskPoint {
    #[must_use]
    pub fn new(timestamp: impl Into<String>, risk_score: impl Into<ScoreValue>) -> Self {
        Self {
            timestamp: timestamp.into(),
            risk_score: risk_score.into(),
        }
    }

    /// Parses the informational timestamp. Not used for layout.
    #[must_use]
    pub fn parsed_timestamp(&self) -> Option<NaiveDateTime> {
        parse_timestamp(&self.timestamp)
    }
}

/// Parses RFC 3339, HTML `datetime-local` and Python `str(datetime)` forms.
#[must_use]
pub fn parse_timestamp(raw: &str) -> Option<NaiveDateTime> {
    let raw = raw.trim();
    if let Ok(parsed) = DateTime::parse_from_rfc3339(raw) {
        return Some(parsed.naive_utc());
    }
    ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%dT%H:%M", "%Y-%m-%d %H:%M:%S%.f"]
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(raw, format).ok())
}

pub(crate) fn parse_finite(field: &'static str, raw: &str) -> Result<f64, ValidationError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(ValidationError::Missing { field });
    }
    let value: f64 = trimmed.parse().map_err(|_| ValidationError::NotNumeric {
        field,
        value: raw.to_owned(),
    })?;
    if !value.is_finite() {
        return Err(ValidationError::NotFinite { field });
    }
    Ok(value)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RiskTier {
    Low,
    Medium,
    High,
}

impl RiskTier {
    /// Upper tier wins on boundaries: 80 is high, 40 is medium.
    #[must_use]
    pub fn classify(score: f64) -> Self {
        if score >= HIGH_RISK_THRESHOLD {
            Self::High
        } else if score >= MEDIUM_RISK_THRESHOLD {
            Self::Medium
        } else {
            Self::Low
        }
    }

    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::Low => "Low",
            Self::Medium => "Medium",
            Self::High => "High",
        }
    }
}

/// Restricts a score to the drawable `[0, 100]` range.
#[must_use]
pub fn clamp_score(score: f64) -> f64 {
    if score.is_nan() {
        return SCORE_MIN;
    }
    score.clamp(SCORE_MIN, SCORE_MAX)
}
