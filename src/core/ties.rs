use crate::core::error::DecisionError;
use crate::models::{RestaurantId, ScoreTable};
use rand::seq::SliceRandom as _;
use rand::Rng;

/// How the resolver picks from a score table
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResolveMode {
    /// Highest value wins; ties broken uniformly at random
    MaxScore,
    /// Values are relative weights; one restaurant drawn proportionally
    WeightedSample,
}

/// Winner plus the set it was drawn from
#[derive(Debug, Clone, PartialEq)]
pub struct Resolution {
    pub winner: RestaurantId,
    /// Restaurants sharing the top value in `MaxScore` mode, in id order.
    /// Just the winner in `WeightedSample` mode.
    pub tied: Vec<RestaurantId>,
    /// The winner's value in the table
    pub value: f64,
}

impl Resolution {
    /// Tie breadth (2-way, 3-way, ...), or 0 when there was no tie
    pub fn tie_count(&self) -> usize {
        if self.tied.len() > 1 {
            self.tied.len()
        } else {
            0
        }
    }

    pub fn is_tie(&self) -> bool {
        self.tie_count() > 0
    }
}

/// Pick one restaurant from `table` using `mode` and the injected `rng`
///
/// The same table and an identically seeded `rng` always give the same
/// resolution.
pub fn resolve<R>(table: &ScoreTable, mode: ResolveMode, rng: &mut R) -> Result<Resolution, DecisionError>
where
    R: Rng + ?Sized,
{
    let max = table.max_value().ok_or(DecisionError::EmptyUniverse)?;

    match mode {
        ResolveMode::MaxScore => {
            let tied: Vec<RestaurantId> = table
                .iter()
                .filter(|(_, value)| *value == max)
                .map(|(id, _)| id.clone())
                .collect();
            let winner = tied.choose(rng).cloned().ok_or(DecisionError::EmptyUniverse)?;
            Ok(Resolution { winner, tied, value: max })
        }
        ResolveMode::WeightedSample => {
            let (winner, value) = weighted_sample(table, rng)?;
            Ok(Resolution {
                tied: vec![winner.clone()],
                winner,
                value,
            })
        }
    }
}

/// Draw from the cumulative distribution `p_i = w_i / sum(w)` using a single
/// uniform draw. Negative or non-finite weights count as 0; if nothing has
/// positive weight the draw is uniform over the whole table.
fn weighted_sample<R>(table: &ScoreTable, rng: &mut R) -> Result<(RestaurantId, f64), DecisionError>
where
    R: Rng + ?Sized,
{
    let weights: Vec<(&RestaurantId, f64)> = table
        .iter()
        .map(|(id, weight)| (id, if weight.is_finite() && weight > 0.0 { weight } else { 0.0 }))
        .collect();
    let total: f64 = weights.iter().map(|(_, weight)| weight).sum();

    if total <= 0.0 || !total.is_finite() {
        let (id, weight) = weights.choose(rng).ok_or(DecisionError::EmptyUniverse)?;
        return Ok(((*id).clone(), *weight));
    }

    let target = rng.gen::<f64>() * total;
    let mut cumulative = 0.0;
    for (id, weight) in &weights {
        cumulative += weight;
        if *weight > 0.0 && target < cumulative {
            return Ok(((*id).clone(), *weight));
        }
    }

    // Rounding can leave `target` a hair above the final cumulative sum
    weights
        .iter()
        .rev()
        .find(|(_, weight)| *weight > 0.0)
        .map(|(id, weight)| ((*id).clone(), *weight))
        .ok_or(DecisionError::EmptyUniverse)
}
