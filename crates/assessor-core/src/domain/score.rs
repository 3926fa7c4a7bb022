//! Score snapshots and percentage scaling.

use serde::{Deserialize, Serialize};

/// Raw score figures over a set of items, live or frozen.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct ScoreSnapshot {
    pub score: f64,
    /// Number of correct questions.
    pub correctness: f64,
    pub min_score: f64,
    pub max_score: f64,
}

impl ScoreSnapshot {
    pub fn new(score: f64, correctness: f64, min_score: f64, max_score: f64) -> Self {
        Self {
            score,
            correctness,
            min_score,
            max_score,
        }
    }

    pub fn scaled_score(&self) -> f64 {
        scaled_score(self.score, self.min_score, self.max_score)
    }
}

/// Score as a whole percentage of its range.
///
/// The range is split at zero: positive scores scale against `max_score`,
/// negative ones against `min_score` and keep their sign.
pub fn scaled_score(score: f64, min_score: f64, max_score: f64) -> f64 {
    let range = if score > 0.0 { max_score } else { min_score };
    if score == 0.0 || range == 0.0 {
        return 0.0;
    }
    let sign = if score < 0.0 { -1.0 } else { 1.0 };
    ((score / range) * 100.0).round() * sign
}

/// Correct answers as a whole percentage of the question count.
pub fn scaled_correctness(correctness: f64, question_count: usize) -> f64 {
    if question_count == 0 {
        return 0.0;
    }
    ((correctness / question_count as f64) * 100.0).round()
}
