use crate::core::error::DecisionError;
use crate::models::{HistoryEntry, RestaurantId, ScoreTable};
use chrono::{DateTime, Duration, Utc};
use std::collections::BTreeMap;

/// Weight every restaurant starts from before decay
pub const BASELINE_WEIGHT: f64 = 1.0;

/// Longest accepted window, about a century
pub const MAX_WINDOW_DAYS: u32 = 36_500;

/// Parameters for history-based weight decay
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WeightParams {
    /// Length of the rolling window in days
    pub window_days: u32,
    /// Fraction of weight removed per selection inside the window
    pub decay_per_recent_selection: f64,
    /// Lowest weight a restaurant can decay to, in (0, 1]
    pub floor: f64,
}

impl Default for WeightParams {
    fn default() -> Self {
        Self {
            window_days: 30,
            decay_per_recent_selection: 0.5,
            floor: 0.1,
        }
    }
}

impl WeightParams {
    pub fn validate(&self) -> Result<(), DecisionError> {
        if self.window_days == 0 {
            return Err(DecisionError::InvalidParameters(
                "window_days must be at least 1".to_string(),
            ));
        }
        if self.window_days > MAX_WINDOW_DAYS {
            return Err(DecisionError::InvalidParameters(format!(
                "window_days must be at most {}, got {}",
                MAX_WINDOW_DAYS, self.window_days
            )));
        }
        if !(0.0..=1.0).contains(&self.decay_per_recent_selection) {
            return Err(DecisionError::InvalidParameters(format!(
                "decay_per_recent_selection must be within [0, 1], got {}",
                self.decay_per_recent_selection
            )));
        }
        if !(self.floor > 0.0 && self.floor <= BASELINE_WEIGHT) {
            return Err(DecisionError::InvalidParameters(format!(
                "floor must be within (0, 1], got {}",
                self.floor
            )));
        }
        Ok(())
    }

    /// Earliest instant still inside the window ending at `now`
    ///
    /// Saturates at the start of the representable range, in which case the
    /// window covers all history up to `now`.
    fn window_start(&self, now: DateTime<Utc>) -> DateTime<Utc> {
        Duration::try_days(i64::from(self.window_days))
            .and_then(|window| now.checked_sub_signed(window))
            .unwrap_or(DateTime::<Utc>::MIN_UTC)
    }
}

/// Count selections per restaurant that fall inside `[now - window, now]`
///
/// Entries for restaurants outside `universe` are dropped.
pub fn recent_selections(
    universe: &[RestaurantId],
    history: &[HistoryEntry],
    now: DateTime<Utc>,
    params: &WeightParams,
) -> BTreeMap<RestaurantId, u32> {
    let window_start = params.window_start(now);
    let mut counts: BTreeMap<RestaurantId, u32> =
        universe.iter().map(|id| (id.clone(), 0)).collect();

    for entry in history {
        if entry.selected_at < window_start || entry.selected_at > now {
            continue;
        }
        if let Some(count) = counts.get_mut(&entry.restaurant_id) {
            *count += 1;
        }
    }

    counts
}

/// Compute a raw sampling weight for every restaurant in `universe`
///
/// Each in-window selection multiplies the weight by
/// `1 - decay_per_recent_selection`; the result never drops below `floor`.
/// Normalization is left to the sampler.
pub fn compute_weights(
    universe: &[RestaurantId],
    history: &[HistoryEntry],
    now: DateTime<Utc>,
    params: &WeightParams,
) -> ScoreTable {
    // Zero would take a restaurant out of contention entirely
    let floor = params.floor.clamp(f64::MIN_POSITIVE, BASELINE_WEIGHT);
    let retained = (1.0 - params.decay_per_recent_selection).clamp(0.0, 1.0);

    recent_selections(universe, history, now, params)
        .into_iter()
        .map(|(id, count)| {
            let mut weight = BASELINE_WEIGHT;
            for _ in 0..count {
                weight *= retained;
            }
            (id, weight.max(floor))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 6, 1, 12, 0, 0).unwrap()
    }

    fn ids(ids: &[&str]) -> Vec<RestaurantId> {
        ids.iter().map(|id| id.to_string()).collect()
    }

    fn picked(id: &str, days_ago: i64) -> HistoryEntry {
        HistoryEntry::new(id, now() - Duration::days(days_ago))
    }

    #[test]
    fn test_no_history_keeps_baseline() {
        let weights = compute_weights(&ids(&["a", "b"]), &[], now(), &WeightParams::default());

        assert_eq!(weights.get("a"), Some(1.0));
        assert_eq!(weights.get("b"), Some(1.0));
    }

    #[test]
    fn test_recent_selection_decays() {
        let params = WeightParams::default();
        let history = vec![picked("a", 3)];
        let weights = compute_weights(&ids(&["a", "b"]), &history, now(), &params);

        assert_eq!(weights.get("a"), Some(0.5));
        assert_eq!(weights.get("b"), Some(1.0));
    }

    #[test]
    fn test_repeated_selections_compound() {
        let params = WeightParams {
            decay_per_recent_selection: 0.2,
            floor: 0.01,
            ..WeightParams::default()
        };
        let history = vec![picked("a", 1), picked("a", 2)];
        let weights = compute_weights(&ids(&["a"]), &history, now(), &params);

        assert!((weights.get("a").unwrap() - 0.64).abs() < 1e-12);
    }

    #[test]
    fn test_weight_clamped_to_floor() {
        let params = WeightParams::default();
        let history: Vec<HistoryEntry> = (0..10).map(|d| picked("a", d)).collect();
        let weights = compute_weights(&ids(&["a"]), &history, now(), &params);

        assert_eq!(weights.get("a"), Some(params.floor));
    }

    #[test]
    fn test_full_decay_still_leaves_floor() {
        let params = WeightParams {
            decay_per_recent_selection: 1.0,
            floor: 0.05,
            ..WeightParams::default()
        };
        let weights = compute_weights(&ids(&["a"]), &[picked("a", 0)], now(), &params);

        assert_eq!(weights.get("a"), Some(0.05));
    }

    #[test]
    fn test_window_boundaries() {
        let params = WeightParams::default();
        let history = vec![
            picked("edge", 30),
            picked("old", 31),
            HistoryEntry::new("future", now() + Duration::hours(1)),
        ];
        let counts = recent_selections(&ids(&["edge", "old", "future"]), &history, now(), &params);

        assert_eq!(counts["edge"], 1);
        assert_eq!(counts["old"], 0);
        assert_eq!(counts["future"], 0);
    }

    #[test]
    fn test_history_outside_universe_ignored() {
        let counts = recent_selections(&ids(&["a"]), &[picked("gone", 1)], now(), &WeightParams::default());

        assert_eq!(counts.len(), 1);
        assert_eq!(counts["a"], 0);
    }

    #[test]
    fn test_validate_params() {
        assert!(WeightParams::default().validate().is_ok());

        let bad_floor = WeightParams { floor: 0.0, ..WeightParams::default() };
        assert!(bad_floor.validate().is_err());

        let bad_decay = WeightParams { decay_per_recent_selection: 1.5, ..WeightParams::default() };
        assert!(bad_decay.validate().is_err());

        let bad_window = WeightParams { window_days: 0, ..WeightParams::default() };
        assert!(bad_window.validate().is_err());

        let huge_window = WeightParams { window_days: 200_000_000, ..WeightParams::default() };
        assert!(matches!(huge_window.validate(), Err(DecisionError::InvalidParameters(_))));

        let longest = WeightParams { window_days: MAX_WINDOW_DAYS, ..WeightParams::default() };
        assert!(longest.validate().is_ok());
    }

    #[test]
    fn test_window_saturates_near_min_time() {
        let earliest = DateTime::<Utc>::MIN_UTC + Duration::days(1);
        let history = vec![
            HistoryEntry::new("a", earliest),
            HistoryEntry::new("a", DateTime::<Utc>::MIN_UTC),
        ];
        let params = WeightParams::default();
        let weights = compute_weights(&ids(&["a", "b"]), &history, earliest, &params);

        // Both entries fall inside the clamped window
        assert_eq!(weights.get("a"), Some(0.25));
        assert_eq!(weights.get("b"), Some(1.0));
    }

    #[test]
    fn test_unvalidated_huge_window_counts_all_past_history() {
        let params = WeightParams { window_days: u32::MAX, ..WeightParams::default() };
        let history = vec![picked("a", 1), picked("a", 100_000)];
        let counts = recent_selections(&ids(&["a"]), &history, now(), &params);

        assert_eq!(counts["a"], 2);
    }
}
