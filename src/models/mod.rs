// Model exports
pub mod domain;
pub mod requests;
pub mod responses;

pub use domain::{
    Ballot, DecisionInput, DecisionMethod, DecisionResult, HistoryEntry, RandomInput, RestaurantId,
    RestaurantRef, ScoreTable, TieredInput, WeightShare, BALLOT_SIZE,
};
pub use requests::{DecideRequest, MethodsRequest, WeightPreviewRequest};
pub use responses::{DecisionResponse, ErrorResponse, HealthResponse, WeightPreviewResponse};
