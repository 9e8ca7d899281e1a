use crate::core::DecisionError;
use crate::models::domain::{DecisionResult, WeightShare};
use serde::{Deserialize, Serialize};

/// Response for the decide endpoint
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DecisionResponse {
    #[serde(rename = "decisionId")]
    pub decision_id: String,
    pub result: DecisionResult,
    #[serde(rename = "decidedAt")]
    pub decided_at: chrono::DateTime<chrono::Utc>,
}

/// Response for the weight preview endpoint
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WeightPreviewResponse {
    #[serde(rename = "windowDays")]
    pub window_days: u32,
    pub weights: Vec<WeightShare>,
}

/// Health check response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub timestamp: chrono::DateTime<chrono::Utc>,
}

/// Error response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
    pub message: String,
    #[serde(rename = "statusCode")]
    pub status_code: u16,
}

impl ErrorResponse {
    pub fn from_decision_error(err: &DecisionError, status_code: u16) -> Self {
        Self {
            error: err.code().to_string(),
            message: err.to_string(),
            status_code,
        }
    }
}
