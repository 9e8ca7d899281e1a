use crate::models::domain::{DecisionInput, HistoryEntry, RestaurantRef};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

/// Request to compute a decision
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct DecideRequest {
    /// Caller's decision key; generated when omitted
    #[validate(length(min = 1))]
    #[serde(alias = "decision_id", rename = "decisionId", default)]
    pub decision_id: Option<String>,
    pub decision: DecisionInput,
    /// Fixes the random source so the outcome can be reproduced
    #[serde(default)]
    pub seed: Option<u64>,
}

/// Request to preview random-selection weights for a collection
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct WeightPreviewRequest {
    #[validate(length(min = 1))]
    pub restaurants: Vec<RestaurantRef>,
    #[serde(default)]
    pub history: Vec<HistoryEntry>,
    #[serde(default)]
    pub now: Option<DateTime<Utc>>,
}

/// Request to list the decision methods a collection supports
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MethodsRequest {
    pub restaurants: Vec<RestaurantRef>,
}
