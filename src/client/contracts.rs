use serde::{Deserialize, Serialize};

use crate::core::risk::parse_finite;
use crate::core::{RiskPoint, RiskTier, parse_timestamp};
use crate::error::ValidationError;

/// Body of `POST /predict`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    pub transaction_id: String,
    pub user_id: String,
    pub amount: f64,
    pub timestamp: String,
    pub device_id: String,
    #[serde(rename = "oldbalanceOrg")]
    pub old_balance_orig: f64,
    #[serde(rename = "newbalanceOrig")]
    pub new_balance_orig: f64,
    #[serde(rename = "oldbalanceDest")]
    pub old_balance_dest: f64,
    #[serde(rename = "newbalanceDest")]
    pub new_balance_dest: f64,
}

/// Raw form input, every field still text.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransactionForm {
    pub transaction_id: String,
    pub user_id: String,
    pub amount: String,
    pub timestamp: String,
    pub device_id: String,
    pub old_balance_orig: String,
    pub new_balance_orig: String,
    pub old_balance_dest: String,
    pub new_balance_dest: String,
}

impl TransactionForm {
    /// Converts the form into a request body, naming the first bad field.
    ///
    /// Timestamps are normalized to `YYYY-MM-DDTHH:MM:SS`.
    pub fn validate(&self) -> Result<Transaction, ValidationError> {
        Ok(Transaction {
            transaction_id: required("transaction_id", &self.transaction_id)?,
            user_id: required("user_id", &self.user_id)?,
            amount: parse_finite("amount", &self.amount)?,
            timestamp: normalized_timestamp(&self.timestamp)?,
            device_id: required("device_id", &self.device_id)?,
            old_balance_orig: parse_finite("oldbalanceOrg", &self.old_balance_orig)?,
            new_balance_orig: parse_finite("newbalanceOrig", &self.new_balance_orig)?,
            old_balance_dest: parse_finite("oldbalanceDest", &self.old_balance_dest)?,
            new_balance_dest: parse_finite("newbalanceDest", &self.new_balance_dest)?,
        })
    }
}

fn required(field: &'static str, value: &str) -> Result<String, ValidationError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(ValidationError::Missing { field });
    }
    Ok(trimmed.to_owned())
}

fn normalized_timestamp(value: &str) -> Result<String, ValidationError> {
    let raw = required("timestamp", value)?;
    let parsed = parse_timestamp(&raw).ok_or_else(|| ValidationError::InvalidTimestamp {
        field: "timestamp",
        value: value.to_owned(),
    })?;
    Ok(parsed.format("%Y-%m-%dT%H:%M:%S").to_string())
}

/// Response of `POST /predict`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Prediction {
    pub transaction_id: String,
    pub risk_score: f64,
    pub risk_level: String,
    #[serde(default)]
    pub reasons: Vec<String>,
    #[serde(default)]
    pub llm_summary: String,
}

impl Prediction {
    #[must_use]
    pub fn tier(&self) -> RiskTier {
        RiskTier::classify(self.risk_score)
    }
}

/// One row of `POST /upload_csv` results.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BatchPrediction {
    pub transaction_id: String,
    pub risk_score: f64,
    pub risk_level: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RiskHistoryResponse {
    pub risk_history: Vec<RiskPoint>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UploadResponse {
    pub results: Vec<BatchPrediction>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResetStatus {
    pub status: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct HealthStatus {
    pub ok: bool,
}
