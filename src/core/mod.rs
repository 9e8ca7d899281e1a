// Core decision engine exports
pub mod ballots;
pub mod decision;
pub mod error;
pub mod reasoning;
pub mod ties;
pub mod weights;

pub use ballots::{aggregate, BallotBox, RANK_POINTS};
pub use decision::{
    available_methods, check_tiered_eligibility, rng_from_seed, DecisionEngine, MethodAvailability,
    MIN_TIERED_RESTAURANTS,
};
pub use error::DecisionError;
pub use ties::{resolve, Resolution, ResolveMode};
pub use weights::{compute_weights, recent_selections, WeightParams, BASELINE_WEIGHT, MAX_WINDOW_DAYS};
