//! Host items as seen by an assessment.
//!
//! The host owns the items; these types are per-call reads of their state and
//! the presentation settings an assessment pushes back onto its questions.

use serde::{Deserialize, Serialize};

use super::ids::ItemId;

/// Item categories that are reset and counted separately.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ItemCategory {
    Question,
    PresentationComponent,
}

impl ItemCategory {
    pub const ALL: [ItemCategory; 2] = [ItemCategory::Question, ItemCategory::PresentationComponent];
}

/// Completion/correctness flags of one trackable item.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemState {
    pub id: ItemId,
    pub category: ItemCategory,

    /// The learner has finished interacting (answered, viewed, ...).
    pub is_interaction_complete: bool,

    /// Fully complete. Stricter than interaction-complete: it may require an
    /// explicit marking or review step, and survives a soft reset.
    pub is_complete: bool,

    /// Only meaningful for questions.
    pub is_correct: bool,
}

impl ItemState {
    pub fn new(id: impl Into<ItemId>, category: ItemCategory) -> Self {
        Self {
            id: id.into(),
            category,
            is_interaction_complete: false,
            is_complete: false,
            is_correct: false,
        }
    }

    pub fn is_question(&self) -> bool {
        self.category == ItemCategory::Question
    }
}

/// Feedback and marking visibility applied to every question of an assessment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuestionPresentation {
    pub can_show_feedback: bool,
    pub can_show_marking: bool,
    pub can_show_model_answer: bool,
    pub is_part_of_assessment: bool,
}
