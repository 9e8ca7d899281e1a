use thiserror::Error;

/// Errors raised by the decision engine
///
/// Every variant is a caller-input error. The engine performs no I/O, so there
/// is nothing transient to retry.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum DecisionError {
    #[error("Invalid ballot from {voter_id}: {reason}")]
    InvalidBallot { voter_id: String, reason: String },

    #[error("At least one vote is required to complete this decision")]
    NoVotesSubmitted,

    #[error("The collection has no restaurants to choose from")]
    EmptyUniverse,

    #[error("Tiered decisions need at least {required} restaurants, but the collection has {available}")]
    NotEnoughRestaurants { required: usize, available: usize },

    #[error("Invalid weighting parameters: {0}")]
    InvalidParameters(String),
}

impl DecisionError {
    pub(crate) fn invalid_ballot(voter_id: &str, reason: impl Into<String>) -> Self {
        Self::InvalidBallot {
            voter_id: voter_id.to_string(),
            reason: reason.into(),
        }
    }

    /// Stable machine-readable code, used in API error bodies
    pub fn code(&self) -> &'static str {
        match self {
            Self::InvalidBallot { .. } => "invalid_ballot",
            Self::NoVotesSubmitted => "no_votes_submitted",
            Self::EmptyUniverse => "empty_universe",
            Self::NotEnoughRestaurants { .. } => "not_enough_restaurants",
            Self::InvalidParameters(_) => "invalid_parameters",
        }
    }
}
