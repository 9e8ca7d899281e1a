//! Tablevote Algo - group decision engine for Tablevote restaurant picks
//!
//! This library turns a group's ranked ballots, or a collection's recent
//! decision history, into a single chosen restaurant with a human-readable
//! justification. Tie-breaks and weighted picks draw from an injected random
//! source, so any outcome can be reproduced from its seed.

pub mod config;
pub mod core;
pub mod models;
pub mod routes;

// Re-export commonly used types
pub use crate::core::{aggregate, compute_weights, resolve, DecisionEngine, DecisionError, ResolveMode, WeightParams};
pub use crate::models::{Ballot, DecisionInput, DecisionMethod, DecisionResult, HistoryEntry, RandomInput, RestaurantRef, ScoreTable, TieredInput};
