use crate::models::{RestaurantId, RestaurantRef, ScoreTable, WeightShare};
use std::collections::BTreeMap;

/// Lookup from restaurant id to display name, falling back to the id
#[derive(Debug, Clone, Default)]
pub struct RestaurantNames<'a> {
    names: BTreeMap<&'a str, &'a str>,
}

impl<'a> RestaurantNames<'a> {
    pub fn new(restaurants: &'a [RestaurantRef]) -> Self {
        Self {
            names: restaurants
                .iter()
                .map(|r| (r.id.as_str(), r.name.as_str()))
                .collect(),
        }
    }

    pub fn name_of<'b>(&self, id: &'b str) -> &'b str
    where
        'a: 'b,
    {
        self.names.get(id).copied().unwrap_or(id)
    }
}

/// "<name> is the clear winner with <N> points from <V> vote(s) total"
pub fn clear_winner(name: &str, points: f64, votes: usize) -> String {
    format!(
        "{} is the clear winner with {} points from {} vote(s) total",
        name, points, votes
    )
}

/// Reasoning for a tie broken at random among `tied` restaurants
pub fn tie_break(name: &str, tied: usize, points: f64, votes: usize) -> String {
    format!(
        "{} won a random tie-break: tie between {} restaurants with {} points each from {} vote(s) total",
        name, tied, points, votes
    )
}

/// Reasoning for a weighted random pick
pub fn weighted_pick(name: &str, percent: f64, window_days: u32) -> String {
    format!(
        "{} was picked by weighted random selection with a {:.1}% chance; restaurants chosen in the last {} days are weighted down",
        name, percent, window_days
    )
}

/// Share of `total` held by `weight`, as a percentage
pub fn percent_of(weight: f64, total: f64) -> f64 {
    if total > 0.0 {
        weight / total * 100.0
    } else {
        0.0
    }
}

/// Per-restaurant weight rows for display, heaviest first then by id
pub fn weight_shares(
    weights: &ScoreTable,
    names: &RestaurantNames<'_>,
    recent: &BTreeMap<RestaurantId, u32>,
) -> Vec<WeightShare> {
    let total = weights.total();
    let mut shares: Vec<WeightShare> = weights
        .iter()
        .map(|(id, weight)| WeightShare {
            restaurant_id: id.clone(),
            name: names.name_of(id).to_string(),
            weight,
            percent: percent_of(weight, total),
            recent_selections: recent.get(id).copied().unwrap_or(0),
        })
        .collect();

    shares.sort_by(|a, b| {
        b.weight
            .partial_cmp(&a.weight)
            .unwrap_or(std::cmp::Ordering::Equal)
            .then_with(|| a.restaurant_id.cmp(&b.restaurant_id))
    });
    shares
}
