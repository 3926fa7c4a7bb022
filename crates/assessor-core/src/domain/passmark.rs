//! Passmark: the pass/fail rule of an assessment.

use serde::{Deserialize, Serialize};

/// Score and correctness thresholds required to pass.
///
/// When `is_scaled` is set the thresholds are percentages (0-100) and the
/// caller must evaluate against scaled values; otherwise they are absolute
/// score / correct-answer counts.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Passmark {
    /// When false, any completed attempt passes.
    #[serde(rename = "_isEnabled")]
    pub is_enabled: bool,

    #[serde(rename = "_score")]
    pub score: f64,

    #[serde(rename = "_correctness")]
    pub correctness: f64,

    #[serde(rename = "_isScaled")]
    pub is_scaled: bool,
}

impl Passmark {
    pub fn new(is_enabled: bool, score: f64, correctness: f64, is_scaled: bool) -> Self {
        Self {
            is_enabled,
            score,
            correctness,
            is_scaled,
        }
    }

    /// Both thresholds must be met (inclusive).
    pub fn evaluate(&self, score: f64, correctness: f64) -> bool {
        score >= self.score && correctness >= self.correctness
    }
}

impl Default for Passmark {
    fn default() -> Self {
        Self::new(true, 60.0, 60.0, true)
    }
}
