use crate::core::error::DecisionError;
use crate::models::{Ballot, RestaurantId, ScoreTable, BALLOT_SIZE};
use std::collections::{BTreeMap, BTreeSet};

/// Points awarded per rank position: first choice 3, second 2, third 1
pub const RANK_POINTS: [u32; BALLOT_SIZE] = [3, 2, 1];

impl Ballot {
    /// Build a ballot, rejecting repeated restaurants
    pub fn new(
        voter_id: impl Into<String>,
        rankings: [RestaurantId; BALLOT_SIZE],
    ) -> Result<Self, DecisionError> {
        let ballot = Self {
            voter_id: voter_id.into(),
            rankings,
        };
        ballot.check_distinct()?;
        Ok(ballot)
    }

    /// Check the ballot ranks distinct restaurants drawn from `universe`
    pub fn validate(&self, universe: &BTreeSet<RestaurantId>) -> Result<(), DecisionError> {
        self.check_distinct()?;
        match self.rankings.iter().find(|id| !universe.contains(*id)) {
            Some(unknown) => Err(DecisionError::invalid_ballot(
                &self.voter_id,
                format!("restaurant {} is not in this collection", unknown),
            )),
            None => Ok(()),
        }
    }

    fn check_distinct(&self) -> Result<(), DecisionError> {
        for (i, id) in self.rankings.iter().enumerate() {
            if self.rankings[..i].contains(id) {
                return Err(DecisionError::invalid_ballot(
                    &self.voter_id,
                    format!("restaurant {} is ranked more than once", id),
                ));
            }
        }
        Ok(())
    }
}

/// Collects ballots for one decision, one per voter
///
/// Re-voting overwrites: a later submission from the same voter replaces the
/// earlier one.
#[derive(Debug, Clone, Default)]
pub struct BallotBox {
    ballots: BTreeMap<String, Ballot>,
}

impl BallotBox {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store a ballot, returning the one it replaced (if any)
    pub fn submit(&mut self, ballot: Ballot) -> Option<Ballot> {
        self.ballots.insert(ballot.voter_id.clone(), ballot)
    }

    /// Remove a voter's ballot, e.g. when they leave the group before the
    /// decision closes
    pub fn withdraw(&mut self, voter_id: &str) -> Option<Ballot> {
        self.ballots.remove(voter_id)
    }

    pub fn get(&self, voter_id: &str) -> Option<&Ballot> {
        self.ballots.get(voter_id)
    }

    pub fn len(&self) -> usize {
        self.ballots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ballots.is_empty()
    }

    /// Ballots ordered by voter id
    pub fn ballots(&self) -> impl Iterator<Item = &Ballot> + '_ {
        self.ballots.values()
    }
}

impl FromIterator<Ballot> for BallotBox {
    fn from_iter<I: IntoIterator<Item = Ballot>>(iter: I) -> Self {
        let mut ballot_box = Self::new();
        for ballot in iter {
            ballot_box.submit(ballot);
        }
        ballot_box
    }
}

/// Sum rank points per restaurant across all ballots
///
/// Every restaurant in `universe` gets an entry, so with zero ballots the
/// whole universe ties at 0. Any ballot ranking a restaurant outside the
/// universe fails the whole aggregation.
pub fn aggregate<'b, I>(ballots: I, universe: &BTreeSet<RestaurantId>) -> Result<ScoreTable, DecisionError>
where
    I: IntoIterator<Item = &'b Ballot>,
{
    let mut table: ScoreTable = universe.iter().map(|id| (id.clone(), 0.0)).collect();

    for ballot in ballots {
        ballot.validate(universe)?;
        for (id, points) in ballot.rankings.iter().zip(RANK_POINTS) {
            table.add(id, f64::from(points));
        }
    }

    Ok(table)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ballot(voter: &str, rankings: [&str; 3]) -> Ballot {
        Ballot {
            voter_id: voter.to_string(),
            rankings: rankings.map(str::to_string),
        }
    }

    fn universe(ids: &[&str]) -> BTreeSet<RestaurantId> {
        ids.iter().map(|id| id.to_string()).collect()
    }

    #[test]
    fn test_rank_points() {
        let ballots = vec![ballot("u1", ["a", "b", "c"])];
        let table = aggregate(&ballots, &universe(&["a", "b", "c", "d"])).unwrap();

        assert_eq!(table.get("a"), Some(3.0));
        assert_eq!(table.get("b"), Some(2.0));
        assert_eq!(table.get("c"), Some(1.0));
        assert_eq!(table.get("d"), Some(0.0));
    }

    #[test]
    fn test_zero_ballots_scores_everything_zero() {
        let ballots: Vec<Ballot> = vec![];
        let table = aggregate(&ballots, &universe(&["a", "b", "c"])).unwrap();

        assert_eq!(table.len(), 3);
        assert!(table.iter().all(|(_, points)| points == 0.0));
    }

    #[test]
    fn test_rejects_restaurant_outside_universe() {
        let ballots = vec![ballot("u1", ["a", "b", "x"])];
        let err = aggregate(&ballots, &universe(&["a", "b", "c"])).unwrap_err();

        assert!(matches!(err, DecisionError::InvalidBallot { ref voter_id, .. } if voter_id == "u1"));
    }

    #[test]
    fn test_rejects_duplicate_rankings() {
        let err = Ballot::new("u1", ["a".into(), "b".into(), "a".into()]).unwrap_err();
        assert_eq!(err.code(), "invalid_ballot");

        // Deserialized ballots skip `new`, so aggregation checks again
        let ballots = vec![ballot("u2", ["a", "a", "b"])];
        assert!(aggregate(&ballots, &universe(&["a", "b", "c"])).is_err());
    }

    #[test]
    fn test_ballot_box_revote_overwrites() {
        let mut ballot_box = BallotBox::new();
        assert!(ballot_box.submit(ballot("u1", ["a", "b", "c"])).is_none());
        let replaced = ballot_box.submit(ballot("u1", ["c", "b", "a"]));

        assert_eq!(replaced.unwrap().rankings[0], "a");
        assert_eq!(ballot_box.len(), 1);
        assert_eq!(ballot_box.get("u1").unwrap().rankings[0], "c");
    }

    #[test]
    fn test_ballot_box_withdraw() {
        let mut ballot_box: BallotBox = vec![ballot("u1", ["a", "b", "c"]), ballot("u2", ["b", "c", "a"])]
            .into_iter()
            .collect();

        assert!(ballot_box.withdraw("u1").is_some());
        assert!(ballot_box.withdraw("u1").is_none());
        assert_eq!(ballot_box.len(), 1);
        assert_eq!(ballot_box.ballots().next().unwrap().voter_id, "u2");
    }
}
