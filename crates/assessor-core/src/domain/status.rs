//! Status views: serializable snapshots of an assessment's derived state.

use serde::{Deserialize, Serialize};

use super::attempts::AttemptLimit;
use super::ids::{AssessmentId, ItemId};

/// Everything an assessment exposes to the host, read at one instant.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AssessmentStatus {
    pub id: AssessmentId,
    pub title: String,
    pub is_complete: bool,
    pub is_passed: bool,
    pub score: f64,
    pub scaled_score: f64,
    pub correctness: f64,
    pub scaled_correctness: f64,
    pub min_score: f64,
    pub max_score: f64,
    pub can_reset: bool,
    pub should_reset_on_revisit: bool,
    pub attempts_used: u32,
    /// `None` when attempts are infinite.
    pub attempts_remaining: Option<u32>,
    pub is_attempt_in_progress: bool,
    pub is_attempt_in_session: bool,
}

/// Version of the legacy projection below.
pub const COMPATIBILITY_VERSION: u32 = 1;

/// Legacy `article-assessment` state record for older consumers.
///
/// A read-only projection; nothing flows back from it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CompatibilityState {
    pub version: u32,
    pub id: AssessmentId,
    #[serde(rename = "type")]
    pub kind: String,
    pub page_id: Option<ItemId>,
    pub article_id: ItemId,
    pub is_enabled: bool,
    pub is_complete: bool,
    pub is_percentage_based: bool,
    pub score_to_pass: f64,
    pub score: f64,
    pub score_as_percent: f64,
    pub min_score: f64,
    pub max_score: f64,
    pub correct_count: f64,
    pub correct_as_percent: f64,
    pub correct_to_pass: f64,
    pub question_count: usize,
    pub is_pass: bool,
    pub include_in_total_score: bool,
    pub assessment_weight: u32,
    /// Attempt limit; serialized as a number or `"infinite"`.
    pub attempts: AttemptLimit,
    pub attempts_spent: u32,
    pub attempts_left: AttemptLimit,
    pub attempt_in_progress: bool,
    pub last_attempt_score_as_percent: Option<f64>,
    pub questions: Vec<CompatibilityQuestion>,
    pub reset_type: String,
    pub allow_reset_if_passed: bool,
    pub is_reset_on_revisit: bool,
    pub can_reset_in_page: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompatibilityQuestion {
    #[serde(rename = "_id")]
    pub id: ItemId,
    #[serde(rename = "_isCorrect")]
    pub is_correct: bool,
}
