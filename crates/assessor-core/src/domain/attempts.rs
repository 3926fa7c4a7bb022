//! Attempts ledger: limit, usage, best and history.

use std::fmt;

use serde::de::{self, Deserializer, Visitor};
use serde::{Deserialize, Serialize, Serializer};
use serde_json::Value;
use tracing::warn;

use super::attempt::{Attempt, AttemptState};
use super::ids::AttemptId;

/// Attempt cap. Configured as a positive integer, `"infinite"`, or any value
/// `<= 0` (also infinite).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AttemptLimit {
    Finite(u32),
    Infinite,
}

impl Default for AttemptLimit {
    fn default() -> Self {
        AttemptLimit::Finite(1)
    }
}

impl AttemptLimit {
    fn from_i64(value: i64) -> Self {
        if value <= 0 {
            AttemptLimit::Infinite
        } else {
            AttemptLimit::Finite(u32::try_from(value).unwrap_or(u32::MAX))
        }
    }
}

impl Serialize for AttemptLimit {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            AttemptLimit::Finite(n) => serializer.serialize_u32(*n),
            AttemptLimit::Infinite => serializer.serialize_str("infinite"),
        }
    }
}

impl<'de> Deserialize<'de> for AttemptLimit {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct LimitVisitor;

        impl<'de> Visitor<'de> for LimitVisitor {
            type Value = AttemptLimit;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("an attempt count or \"infinite\"")
            }

            fn visit_i64<E: de::Error>(self, v: i64) -> Result<AttemptLimit, E> {
                Ok(AttemptLimit::from_i64(v))
            }

            fn visit_u64<E: de::Error>(self, v: u64) -> Result<AttemptLimit, E> {
                Ok(AttemptLimit::from_i64(i64::try_from(v).unwrap_or(i64::MAX)))
            }

            fn visit_f64<E: de::Error>(self, v: f64) -> Result<AttemptLimit, E> {
                Ok(AttemptLimit::from_i64(v.trunc() as i64))
            }

            fn visit_str<E: de::Error>(self, v: &str) -> Result<AttemptLimit, E> {
                let v = v.trim();
                if v.eq_ignore_ascii_case("infinite") {
                    return Ok(AttemptLimit::Infinite);
                }
                v.parse::<i64>()
                    .map(AttemptLimit::from_i64)
                    .map_err(|_| E::invalid_value(de::Unexpected::Str(v), &self))
            }
        }

        deserializer.deserialize_any(LimitVisitor)
    }
}

/// `_attempts` configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AttemptsConfig {
    #[serde(rename = "_limit")]
    pub limit: AttemptLimit,

    /// Keep every attempt in history. Resets never clear it.
    #[serde(rename = "_shouldStoreAttempts")]
    pub should_store_attempts: bool,
}

/// The attempt history ledger.
///
/// Invariants:
/// - `used` only grows; resets never touch it.
/// - `best` holds the strictly highest scoring attempt ever recorded and is
///   never reassigned by a reset.
/// - without `should_store_attempts`, history holds at most the latest attempt.
#[derive(Debug, Clone, PartialEq)]
pub struct Attempts {
    limit: AttemptLimit,
    used: u32,
    should_store_attempts: bool,
    best: Option<Attempt>,
    history: Vec<Attempt>,
}

impl Attempts {
    pub fn new(config: AttemptsConfig) -> Self {
        Self {
            limit: config.limit,
            used: 0,
            should_store_attempts: config.should_store_attempts,
            best: None,
            history: Vec::new(),
        }
    }

    /// Count one attempt as used. Callers check `has_remaining` first.
    pub fn spend(&mut self) {
        self.used = self.used.saturating_add(1);
    }

    /// Record a frozen attempt.
    pub fn record(&mut self, attempt: Attempt) {
        if !self.should_store_attempts && self.last().is_some() {
            self.reset(false);
        }
        let best_score = self.best.as_ref().map_or(f64::NEG_INFINITY, Attempt::score);
        if attempt.score() > best_score {
            self.best = Some(attempt.clone());
        }
        self.history.push(attempt);
    }

    /// Prune history unless every attempt is stored.
    ///
    /// A soft reset keeps only the latest attempt; with a single entry it is a
    /// no-op. A hard reset clears history.
    pub fn reset(&mut self, is_soft: bool) {
        if self.should_store_attempts {
            return;
        }
        if !is_soft {
            self.history.clear();
        } else if self.history.len() > 1 {
            let last = self.history.pop();
            self.history = last.into_iter().collect();
        }
    }

    /// Replace the ledger with persisted state.
    ///
    /// Expects `[[used], [best] | [], [history...]]`. Missing or malformed parts
    /// fall back to zero / none / empty; nothing here fails.
    pub fn restore(&mut self, data: &Value, mut next_id: impl FnMut() -> AttemptId) {
        self.used = match data.get(0).and_then(|v| v.get(0)).and_then(Value::as_u64) {
            Some(used) => u32::try_from(used).unwrap_or(u32::MAX),
            None => {
                warn!(state = %data, "persisted attempts count missing, assuming 0");
                0
            }
        };

        self.best = data
            .get(1)
            .and_then(|v| v.get(0))
            .and_then(parse_attempt_state)
            .map(|state| Attempt::restore(next_id(), state));

        self.history = match data.get(2).and_then(Value::as_array) {
            Some(entries) => entries
                .iter()
                .filter_map(|entry| {
                    let state = parse_attempt_state(entry);
                    if state.is_none() {
                        warn!(entry = %entry, "skipping malformed persisted attempt");
                    }
                    state
                })
                .map(|state| Attempt::restore(next_id(), state))
                .collect(),
            None => Vec::new(),
        };
    }

    pub fn save_state(&self) -> LedgerState {
        LedgerState(
            [self.used],
            self.best.iter().map(Attempt::save_state).collect(),
            self.history.iter().map(Attempt::save_state).collect(),
        )
    }

    pub fn limit(&self) -> AttemptLimit {
        self.limit
    }

    pub fn used(&self) -> u32 {
        self.used
    }

    /// `None` when infinite: there is no meaningful count to do arithmetic on.
    pub fn remaining(&self) -> Option<u32> {
        match self.limit {
            AttemptLimit::Finite(limit) => Some(limit.saturating_sub(self.used)),
            AttemptLimit::Infinite => None,
        }
    }

    pub fn is_infinite(&self) -> bool {
        self.limit == AttemptLimit::Infinite
    }

    pub fn has_remaining(&self) -> bool {
        self.remaining().is_none_or(|n| n > 0)
    }

    pub fn should_store_attempts(&self) -> bool {
        self.should_store_attempts
    }

    pub fn history(&self) -> &[Attempt] {
        &self.history
    }

    pub fn last(&self) -> Option<&Attempt> {
        self.history.last()
    }

    pub fn best(&self) -> Option<&Attempt> {
        self.best.as_ref()
    }

    /// Best attempt's outcome; any history entry when there is no best.
    pub fn was_complete(&self) -> bool {
        match &self.best {
            Some(best) => best.is_complete(),
            None => self.history.iter().any(Attempt::is_complete),
        }
    }

    pub fn was_passed(&self) -> bool {
        match &self.best {
            Some(best) => best.is_passed(),
            None => self.history.iter().any(Attempt::is_passed),
        }
    }
}

fn parse_attempt_state(value: &Value) -> Option<AttemptState> {
    serde_json::from_value(value.clone()).ok()
}

/// Persisted ledger: `[[used], [best] | [], [history...]]`.
///
/// Arrays are nested because the attempt entries are arrays themselves.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LedgerState(pub [u32; 1], pub Vec<AttemptState>, pub Vec<AttemptState>);

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use rstest::rstest;
    use ulid::Ulid;

    fn id() -> AttemptId {
        AttemptId::from_ulid(Ulid::new())
    }

    fn ended(score: f64, is_passed: bool) -> Attempt {
        let mut a = Attempt::new(id());
        a.start(Utc::now()).unwrap();
        a.update_score(crate::domain::ScoreSnapshot::new(score, score, 0.0, 10.0));
        a.end(is_passed, Utc::now()).unwrap();
        a
    }

    fn ledger(limit: AttemptLimit, should_store_attempts: bool) -> Attempts {
        Attempts::new(AttemptsConfig {
            limit,
            should_store_attempts,
        })
    }

    #[rstest]
    #[case::number("3", AttemptLimit::Finite(3))]
    #[case::infinite_str("\"infinite\"", AttemptLimit::Infinite)]
    #[case::numeric_str("\"2\"", AttemptLimit::Finite(2))]
    #[case::minus_one("-1", AttemptLimit::Infinite)]
    #[case::zero("0", AttemptLimit::Infinite)]
    fn limit_parses_counts_and_sentinels(#[case] json: &str, #[case] expected: AttemptLimit) {
        let limit: AttemptLimit = serde_json::from_str(json).unwrap();
        assert_eq!(limit, expected);
    }

    #[test]
    fn remaining_is_clamped_at_zero() {
        let mut l = ledger(AttemptLimit::Finite(2), false);
        assert_eq!(l.remaining(), Some(2));
        l.spend();
        l.spend();
        l.spend();
        assert_eq!(l.remaining(), Some(0));
        assert!(!l.has_remaining());
    }

    #[test]
    fn infinite_always_has_remaining() {
        let mut l = ledger(AttemptLimit::Infinite, false);
        for _ in 0..100 {
            l.spend();
        }
        assert!(l.is_infinite());
        assert!(l.has_remaining());
        assert_eq!(l.remaining(), None);
    }

    #[test]
    fn single_slot_history_keeps_best_after_eviction() {
        let mut l = ledger(AttemptLimit::Finite(3), false);
        let first = ended(8.0, true);
        let second = ended(3.0, false);

        l.record(first.clone());
        l.record(second.clone());

        assert_eq!(l.history(), &[second]);
        assert_eq!(l.best(), Some(&first));
        assert!(l.was_passed());
    }

    #[test]
    fn ties_keep_the_earlier_best() {
        let mut l = ledger(AttemptLimit::Infinite, true);
        let first = ended(5.0, true);
        let second = ended(5.0, false);
        l.record(first.clone());
        l.record(second);
        assert_eq!(l.best().map(Attempt::id), Some(first.id()));
    }

    #[test]
    fn best_tracks_maximum_when_storing_all() {
        let mut l = ledger(AttemptLimit::Infinite, true);
        for score in [2.0, 7.0, 4.0, 9.0, 1.0] {
            l.record(ended(score, false));
        }
        let max = l.history().iter().map(Attempt::score).fold(f64::MIN, f64::max);
        assert_eq!(l.history().len(), 5);
        assert_eq!(l.best().map(Attempt::score), Some(max));
    }

    #[test]
    fn storing_ledger_ignores_resets() {
        let mut l = ledger(AttemptLimit::Infinite, true);
        l.record(ended(1.0, false));
        l.record(ended(2.0, false));
        l.reset(false);
        l.reset(true);
        assert_eq!(l.history().len(), 2);
    }

    #[test]
    fn hard_reset_clears_history_but_not_used_or_best() {
        let mut l = ledger(AttemptLimit::Finite(3), false);
        l.spend();
        l.record(ended(4.0, false));
        l.reset(false);
        assert!(l.history().is_empty());
        assert_eq!(l.used(), 1);
        assert!(l.best().is_some());
    }

    #[test]
    fn soft_reset_with_single_entry_is_noop() {
        let mut l = ledger(AttemptLimit::Finite(3), false);
        let only = ended(4.0, true);
        l.record(only.clone());
        l.reset(true);
        assert_eq!(l.history(), &[only]);
    }

    #[test]
    fn was_complete_scans_history_without_best() {
        let mut l = ledger(AttemptLimit::Finite(3), false);
        let data = serde_json::json!([[1], [], [[3.0, 3.0, 0.0, 5.0, true, false]]]);
        l.restore(&data, id);
        assert!(l.best().is_none());
        assert!(l.was_complete());
        assert!(!l.was_passed());
    }

    #[rstest]
    #[case::whole_scores(3.0, 6.0)]
    #[case::fractional_scores(0.1 + 0.2, 207.02392338633334)]
    fn restore_is_idempotent_and_round_trips(#[case] first: f64, #[case] second: f64) {
        let mut l = ledger(AttemptLimit::Infinite, true);
        l.spend();
        l.record(ended(first, false));
        l.spend();
        l.record(ended(second, true));
        let text = serde_json::to_string(&l.save_state()).unwrap();
        let saved: Value = serde_json::from_str(&text).unwrap();

        let mut restored = ledger(AttemptLimit::Infinite, true);
        restored.restore(&saved, id);
        let once = restored.save_state();
        restored.restore(&saved, id);

        assert_eq!(restored.save_state(), once);
        assert_eq!(serde_json::to_string(&once).unwrap(), text);
        assert_eq!(restored.used(), 2);
        assert_eq!(restored.best().map(Attempt::score), Some(second));
        assert_eq!(restored.history()[0].score(), first);
    }

    #[test]
    fn spending_past_the_counter_range_saturates() {
        let mut l = ledger(AttemptLimit::Infinite, false);
        l.restore(&serde_json::json!([[u32::MAX], [], []]), id);
        assert_eq!(l.used(), u32::MAX);

        l.spend();
        assert_eq!(l.used(), u32::MAX);
        assert!(l.has_remaining());
    }

    #[test]
    fn restore_tolerates_garbage() {
        let mut l = ledger(AttemptLimit::Finite(2), false);
        l.restore(&serde_json::json!({"not": "a ledger"}), id);
        assert_eq!(l.used(), 0);
        assert!(l.best().is_none());
        assert!(l.history().is_empty());

        l.restore(&serde_json::json!([[2], [["x"]], [[1.0], [1.0, 1.0, 0.0, 1.0, true, true]]]), id);
        assert_eq!(l.used(), 2);
        assert!(l.best().is_none());
        assert_eq!(l.history().len(), 1);
    }

    #[test]
    fn save_state_shape() {
        let mut l = ledger(AttemptLimit::Finite(2), false);
        l.spend();
        l.record(ended(2.0, false));
        let json = serde_json::to_string(&l.save_state()).unwrap();
        assert_eq!(
            json,
            "[[1],[[2.0,2.0,0.0,10.0,true,false]],[[2.0,2.0,0.0,10.0,true,false]]]"
        );
    }
}
