// Unit tests for Tablevote Algo

use tablevote_algo::core::{
    ballots::{aggregate, BallotBox},
    ties::{resolve, ResolveMode},
    weights::{compute_weights, WeightParams},
    DecisionError,
};
use tablevote_algo::models::{Ballot, HistoryEntry, RestaurantId, ScoreTable};
use chrono::{DateTime, Duration, TimeZone, Utc};
use rand::{rngs::SmallRng, SeedableRng};
use std::collections::BTreeSet;

fn ballot(voter: &str, rankings: [&str; 3]) -> Ballot {
    Ballot::new(voter, rankings.map(str::to_string)).unwrap()
}

fn universe(ids: &[&str]) -> BTreeSet<RestaurantId> {
    ids.iter().map(|id| id.to_string()).collect()
}

fn now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 3, 15, 18, 30, 0).unwrap()
}

#[test]
fn test_aggregate_sums_across_ballots() {
    let ballots = vec![
        ballot("u1", ["a", "b", "c"]),
        ballot("u2", ["b", "a", "d"]),
        ballot("u3", ["a", "d", "b"]),
    ];
    let table = aggregate(&ballots, &universe(&["a", "b", "c", "d", "e"])).unwrap();

    assert_eq!(table.get("a"), Some(3.0 + 2.0 + 3.0));
    assert_eq!(table.get("b"), Some(2.0 + 3.0 + 1.0));
    assert_eq!(table.get("c"), Some(1.0));
    assert_eq!(table.get("d"), Some(1.0 + 2.0));
    assert_eq!(table.get("e"), Some(0.0));
}

#[test]
fn test_aggregate_order_independent() {
    let forward = vec![
        ballot("u1", ["a", "b", "c"]),
        ballot("u2", ["c", "a", "b"]),
        ballot("u3", ["b", "c", "d"]),
    ];
    let mut reversed = forward.clone();
    reversed.reverse();
    let ids = universe(&["a", "b", "c", "d"]);

    assert_eq!(aggregate(&forward, &ids).unwrap(), aggregate(&reversed, &ids).unwrap());
}

#[test]
fn test_aggregate_rejects_whole_set_on_one_bad_ballot() {
    let ballots = vec![ballot("u1", ["a", "b", "c"]), ballot("u2", ["a", "b", "zzz"])];
    let err = aggregate(&ballots, &universe(&["a", "b", "c"])).unwrap_err();

    match err {
        DecisionError::InvalidBallot { voter_id, reason } => {
            assert_eq!(voter_id, "u2");
            assert!(reason.contains("zzz"));
        }
        other => panic!("expected InvalidBallot, got {:?}", other),
    }
}

#[test]
fn test_zero_ballots_all_tied_at_zero() {
    let ballots: Vec<Ballot> = Vec::new();
    let table = aggregate(&ballots, &universe(&["a", "b", "c"])).unwrap();
    let mut rng = SmallRng::seed_from_u64(11);
    let resolution = resolve(&table, ResolveMode::MaxScore, &mut rng).unwrap();

    assert_eq!(resolution.tie_count(), 3);
    assert_eq!(resolution.value, 0.0);
}

#[test]
fn test_ballot_box_feeds_aggregate() {
    let mut ballot_box = BallotBox::new();
    ballot_box.submit(ballot("u1", ["a", "b", "c"]));
    ballot_box.submit(ballot("u2", ["b", "c", "a"]));
    ballot_box.submit(ballot("u1", ["b", "a", "c"]));

    let table = aggregate(ballot_box.ballots(), &universe(&["a", "b", "c"])).unwrap();

    assert_eq!(ballot_box.len(), 2);
    assert_eq!(table.get("b"), Some(6.0));
    assert_eq!(table.get("a"), Some(3.0));
    assert_eq!(table.get("c"), Some(3.0));
}

#[test]
fn test_out_of_window_history_restores_baseline() {
    let params = WeightParams::default();
    let history = vec![
        HistoryEntry::new("a", now() - Duration::days(31)),
        HistoryEntry::new("a", now() - Duration::days(90)),
        HistoryEntry::new("a", now() - Duration::days(365)),
    ];
    let weights = compute_weights(&["a".to_string()], &history, now(), &params);

    assert_eq!(weights.get("a"), Some(1.0));
}

#[test]
fn test_weights_respect_floor_at_any_depth() {
    let params = WeightParams {
        window_days: 30,
        decay_per_recent_selection: 0.9,
        floor: 0.02,
    };
    for depth in 0..40 {
        let history: Vec<HistoryEntry> = (0..depth)
            .map(|i| HistoryEntry::new("a", now() - Duration::hours(i)))
            .collect();
        let weight = compute_weights(&["a".to_string()], &history, now(), &params)
            .get("a")
            .unwrap();

        assert!(weight >= params.floor, "depth {} gave weight {}", depth, weight);
        assert!(weight > 0.0);
    }
}

#[test]
fn test_weighted_sample_is_reproducible() {
    let table: ScoreTable = vec![
        ("a".to_string(), 0.25),
        ("b".to_string(), 1.0),
        ("c".to_string(), 0.5),
    ]
    .into_iter()
    .collect();

    let picks = |seed: u64| -> Vec<String> {
        let mut rng = SmallRng::seed_from_u64(seed);
        (0..20)
            .map(|_| resolve(&table, ResolveMode::WeightedSample, &mut rng).unwrap().winner)
            .collect()
    };

    assert_eq!(picks(99), picks(99));
}
