use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Opaque restaurant identifier
pub type RestaurantId = String;

/// Number of restaurants ranked on every ballot
pub const BALLOT_SIZE: usize = 3;

/// Restaurant as seen by the engine: an id plus a display name
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RestaurantRef {
    pub id: RestaurantId,
    pub name: String,
}

impl RestaurantRef {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
        }
    }
}

/// One voter's ranked top three; `rankings[0]` is the first preference
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Ballot {
    #[serde(rename = "voterId")]
    pub voter_id: String,
    pub rankings: [RestaurantId; BALLOT_SIZE],
}

/// A prior completed decision for the same collection
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoryEntry {
    #[serde(rename = "restaurantId")]
    pub restaurant_id: RestaurantId,
    #[serde(rename = "selectedAt")]
    pub selected_at: DateTime<Utc>,
}

impl HistoryEntry {
    pub fn new(restaurant_id: impl Into<String>, selected_at: DateTime<Utc>) -> Self {
        Self {
            restaurant_id: restaurant_id.into(),
            selected_at,
        }
    }
}

/// Per-restaurant points (tiered) or weights (random)
///
/// Backed by an ordered map so iteration order only depends on the ids.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ScoreTable(BTreeMap<RestaurantId, f64>);

impl ScoreTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, id: impl Into<String>, value: f64) {
        self.0.insert(id.into(), value);
    }

    /// Add `amount` to an existing entry; unknown ids are ignored
    pub fn add(&mut self, id: &str, amount: f64) {
        if let Some(value) = self.0.get_mut(id) {
            *value += amount;
        }
    }

    pub fn get(&self, id: &str) -> Option<f64> {
        self.0.get(id).copied()
    }

    pub fn contains(&self, id: &str) -> bool {
        self.0.contains_key(id)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&RestaurantId, f64)> + '_ {
        self.0.iter().map(|(id, value)| (id, *value))
    }

    /// Largest value in the table, `None` when empty
    pub fn max_value(&self) -> Option<f64> {
        self.0.values().copied().reduce(f64::max)
    }

    /// Sum of all values
    pub fn total(&self) -> f64 {
        self.0.values().sum()
    }
}

impl FromIterator<(RestaurantId, f64)> for ScoreTable {
    fn from_iter<I: IntoIterator<Item = (RestaurantId, f64)>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

/// How a decision was reached
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DecisionMethod {
    Tiered,
    Random,
}

impl DecisionMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Tiered => "tiered",
            Self::Random => "random",
        }
    }
}

/// Input for a ranked-choice decision, given once voting has closed
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TieredInput {
    pub restaurants: Vec<RestaurantRef>,
    pub ballots: Vec<Ballot>,
}

/// Input for a history-weighted random decision
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RandomInput {
    pub restaurants: Vec<RestaurantRef>,
    #[serde(default)]
    pub history: Vec<HistoryEntry>,
    /// Reference time for the rolling window; defaults to the current time
    #[serde(default = "Utc::now")]
    pub now: DateTime<Utc>,
}

/// A decision request, discriminated by method
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "method", rename_all = "lowercase")]
pub enum DecisionInput {
    Tiered(TieredInput),
    Random(RandomInput),
}

impl DecisionInput {
    pub fn method(&self) -> DecisionMethod {
        match self {
            Self::Tiered(_) => DecisionMethod::Tiered,
            Self::Random(_) => DecisionMethod::Random,
        }
    }
}

/// Outcome of a completed decision, handed back to the caller for persistence
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DecisionResult {
    #[serde(rename = "restaurantId")]
    pub restaurant_id: RestaurantId,
    pub reasoning: String,
    pub method: DecisionMethod,
    #[serde(rename = "scoreTable")]
    pub score_table: ScoreTable,
    /// Breadth of the tie that was broken, 0 when there was none
    #[serde(rename = "tieCount")]
    pub tie_count: usize,
}

/// Display row for one restaurant's selection weight
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeightShare {
    #[serde(rename = "restaurantId")]
    pub restaurant_id: RestaurantId,
    pub name: String,
    pub weight: f64,
    /// Probability of being picked, 0-100
    pub percent: f64,
    #[serde(rename = "recentSelections")]
    pub recent_selections: u32,
}
