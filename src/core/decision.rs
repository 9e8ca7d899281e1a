use crate::core::{
    ballots::{aggregate, BallotBox},
    error::DecisionError,
    reasoning::{self, RestaurantNames},
    ties::{resolve, ResolveMode},
    weights::{compute_weights, recent_selections, WeightParams},
};
use crate::models::{
    DecisionInput, DecisionMethod, DecisionResult, HistoryEntry, RandomInput, RestaurantId,
    RestaurantRef, TieredInput, WeightShare, BALLOT_SIZE,
};
use chrono::{DateTime, Utc};
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Minimum collection size for a tiered decision
pub const MIN_TIERED_RESTAURANTS: usize = BALLOT_SIZE;

/// Random source for a decision: seeded when the caller wants a reproducible
/// outcome, from OS entropy otherwise
pub fn rng_from_seed(seed: Option<u64>) -> SmallRng {
    match seed {
        Some(seed) => SmallRng::seed_from_u64(seed),
        None => SmallRng::from_entropy(),
    }
}

/// Which decision methods a collection can currently use
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MethodAvailability {
    pub tiered: bool,
    pub random: bool,
    #[serde(rename = "restaurantCount")]
    pub restaurant_count: usize,
}

fn distinct_ids(restaurants: &[RestaurantRef]) -> BTreeSet<RestaurantId> {
    restaurants.iter().map(|r| r.id.clone()).collect()
}

/// Fail before voting opens when a collection is too small to rank
pub fn check_tiered_eligibility(restaurants: &[RestaurantRef]) -> Result<(), DecisionError> {
    let available = distinct_ids(restaurants).len();
    if available < MIN_TIERED_RESTAURANTS {
        return Err(DecisionError::NotEnoughRestaurants {
            required: MIN_TIERED_RESTAURANTS,
            available,
        });
    }
    Ok(())
}

pub fn available_methods(restaurants: &[RestaurantRef]) -> MethodAvailability {
    let restaurant_count = distinct_ids(restaurants).len();
    MethodAvailability {
        tiered: restaurant_count >= MIN_TIERED_RESTAURANTS,
        random: restaurant_count > 0,
        restaurant_count,
    }
}

/// Group decision orchestrator
///
/// Dispatches a [`DecisionInput`] to ballot aggregation (tiered) or history
/// weighting (random), resolves the winner through the shared tie resolver
/// and assembles the [`DecisionResult`]. Holds no per-decision state, so one
/// engine can serve concurrent decisions.
#[derive(Debug, Clone)]
pub struct DecisionEngine {
    params: WeightParams,
}

impl DecisionEngine {
    pub fn new(params: WeightParams) -> Result<Self, DecisionError> {
        params.validate()?;
        Ok(Self { params })
    }

    pub fn with_default_params() -> Self {
        Self {
            params: WeightParams::default(),
        }
    }

    pub fn params(&self) -> &WeightParams {
        &self.params
    }

    /// Compute a decision
    ///
    /// Identical input and an identically seeded `rng` give an identical
    /// result. With a fresh random source, tied or weighted cases may pick a
    /// different winner.
    pub fn decide<R>(&self, input: &DecisionInput, rng: &mut R) -> Result<DecisionResult, DecisionError>
    where
        R: Rng + ?Sized,
    {
        match input {
            DecisionInput::Tiered(tiered) => self.decide_tiered(tiered, rng),
            DecisionInput::Random(random) => self.decide_random(random, rng),
        }
    }

    /// Ranked-choice decision over a frozen ballot set
    pub fn decide_tiered<R>(&self, input: &TieredInput, rng: &mut R) -> Result<DecisionResult, DecisionError>
    where
        R: Rng + ?Sized,
    {
        let universe = distinct_ids(&input.restaurants);
        if universe.is_empty() {
            return Err(DecisionError::EmptyUniverse);
        }
        if input.ballots.is_empty() {
            return Err(DecisionError::NoVotesSubmitted);
        }

        // Later ballots from the same voter replace earlier ones
        let ballot_box: BallotBox = input.ballots.iter().cloned().collect();
        let votes = ballot_box.len();
        if votes < input.ballots.len() {
            tracing::debug!(
                "Collapsed {} ballots to {} after re-votes",
                input.ballots.len(),
                votes
            );
        }

        let scores = aggregate(ballot_box.ballots(), &universe)?;
        let resolution = resolve(&scores, ResolveMode::MaxScore, rng)?;

        let names = RestaurantNames::new(&input.restaurants);
        let name = names.name_of(&resolution.winner);
        let reasoning = if resolution.is_tie() {
            reasoning::tie_break(name, resolution.tie_count(), resolution.value, votes)
        } else {
            reasoning::clear_winner(name, resolution.value, votes)
        };

        tracing::debug!(
            "Tiered decision: {} wins with {} points ({} votes, tie breadth {})",
            resolution.winner,
            resolution.value,
            votes,
            resolution.tie_count()
        );

        Ok(DecisionResult {
            tie_count: resolution.tie_count(),
            restaurant_id: resolution.winner,
            reasoning,
            method: DecisionMethod::Tiered,
            score_table: scores,
        })
    }

    /// History-weighted random pick; needs no ballots
    pub fn decide_random<R>(&self, input: &RandomInput, rng: &mut R) -> Result<DecisionResult, DecisionError>
    where
        R: Rng + ?Sized,
    {
        let universe: Vec<RestaurantId> = distinct_ids(&input.restaurants).into_iter().collect();
        if universe.is_empty() {
            return Err(DecisionError::EmptyUniverse);
        }

        let weights = compute_weights(&universe, &input.history, input.now, &self.params);
        let resolution = resolve(&weights, ResolveMode::WeightedSample, rng)?;
        let percent = reasoning::percent_of(resolution.value, weights.total());

        let names = RestaurantNames::new(&input.restaurants);
        let reasoning = reasoning::weighted_pick(
            names.name_of(&resolution.winner),
            percent,
            self.params.window_days,
        );

        tracing::debug!(
            "Random decision: {} picked from {} restaurants ({:.1}% chance)",
            resolution.winner,
            universe.len(),
            percent
        );

        Ok(DecisionResult {
            restaurant_id: resolution.winner,
            reasoning,
            method: DecisionMethod::Random,
            score_table: weights,
            tie_count: 0,
        })
    }

    /// Weight table for display, without making a pick
    pub fn preview_weights(
        &self,
        restaurants: &[RestaurantRef],
        history: &[HistoryEntry],
        now: DateTime<Utc>,
    ) -> Result<Vec<WeightShare>, DecisionError> {
        let universe: Vec<RestaurantId> = distinct_ids(restaurants).into_iter().collect();
        if universe.is_empty() {
            return Err(DecisionError::EmptyUniverse);
        }

        let weights = compute_weights(&universe, history, now, &self.params);
        let recent = recent_selections(&universe, history, now, &self.params);
        let names = RestaurantNames::new(restaurants);

        Ok(reasoning::weight_shares(&weights, &names, &recent))
    }
}

impl Default for DecisionEngine {
    fn default() -> Self {
        Self::with_default_params()
    }
}
