//! Assessment configuration (the host's `_scoringAssessment` object).
//!
//! Parsing is lenient: a malformed section falls back to its defaults instead
//! of rejecting the whole assessment.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::warn;

use super::attempts::AttemptsConfig;
use super::ids::AssessmentId;
use super::item::QuestionPresentation;
use super::marking::Marking;
use super::passmark::Passmark;
use super::reset::ResetConfig;

/// `_questions`: presentation settings forced onto assessment questions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct QuestionsConfig {
    #[serde(rename = "_canShowFeedback")]
    pub can_show_feedback: bool,

    #[serde(rename = "_canShowMarking")]
    pub can_show_marking: bool,

    #[serde(rename = "_canShowModelAnswer")]
    pub can_show_model_answer: bool,
}

impl Default for QuestionsConfig {
    fn default() -> Self {
        Self {
            can_show_feedback: false,
            can_show_marking: true,
            can_show_model_answer: false,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AssessmentConfig {
    #[serde(rename = "_id")]
    pub id: AssessmentId,

    pub title: String,

    #[serde(rename = "_isEnabled")]
    pub is_enabled: bool,

    #[serde(rename = "_isScoreIncluded")]
    pub is_score_included: bool,

    #[serde(rename = "_isCompletionRequired")]
    pub is_completion_required: bool,

    #[serde(rename = "_attempts")]
    pub attempts: AttemptsConfig,

    #[serde(rename = "_passmark")]
    pub passmark: Passmark,

    #[serde(rename = "_reset")]
    pub reset: ResetConfig,

    #[serde(rename = "_questions")]
    pub questions: QuestionsConfig,

    #[serde(rename = "_suppressMarking")]
    pub suppress_marking: bool,
}

impl AssessmentConfig {
    /// Section-by-section parse; never fails.
    pub fn from_value(value: &Value) -> Self {
        let defaults = Self::default();
        Self {
            id: value
                .get("_id")
                .and_then(Value::as_str)
                .map(AssessmentId::new)
                .unwrap_or(defaults.id),
            title: value
                .get("title")
                .and_then(Value::as_str)
                .map(str::to_string)
                .unwrap_or(defaults.title),
            is_enabled: flag(value, "_isEnabled", defaults.is_enabled),
            is_score_included: flag(value, "_isScoreIncluded", defaults.is_score_included),
            is_completion_required: flag(
                value,
                "_isCompletionRequired",
                defaults.is_completion_required,
            ),
            attempts: section(value, "_attempts"),
            passmark: section(value, "_passmark"),
            reset: section(value, "_reset"),
            questions: section(value, "_questions"),
            suppress_marking: flag(value, "_suppressMarking", defaults.suppress_marking),
        }
    }

    pub fn marking(&self) -> Marking {
        Marking::new(self.questions.can_show_marking, self.suppress_marking)
    }

    /// Presentation for every question given the remaining-attempts state.
    pub fn question_presentation(&self, has_remaining: bool) -> QuestionPresentation {
        let can_show_marking = self.marking().is_visible(has_remaining);
        QuestionPresentation {
            can_show_feedback: self.questions.can_show_feedback,
            can_show_marking,
            can_show_model_answer: can_show_marking && self.questions.can_show_model_answer,
            is_part_of_assessment: true,
        }
    }
}

fn flag(value: &Value, key: &str, default: bool) -> bool {
    match value.get(key) {
        None | Some(Value::Null) => default,
        Some(v) => v.as_bool().unwrap_or_else(|| {
            warn!(key, value = %v, "expected a boolean, using default");
            default
        }),
    }
}

fn section<T: DeserializeOwned + Default>(value: &Value, key: &str) -> T {
    match value.get(key) {
        None | Some(Value::Null) => T::default(),
        Some(v) => serde_json::from_value(v.clone()).unwrap_or_else(|err| {
            warn!(section = key, error = %err, "invalid config section, using defaults");
            T::default()
        }),
    }
}
