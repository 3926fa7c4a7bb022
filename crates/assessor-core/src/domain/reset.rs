//! Reset policy of an assessment.

use serde::{Deserialize, Serialize};

use super::item::ItemCategory;

/// Granularity of an item reset.
///
/// - `Soft`: interaction state is cleared, the completion bit is kept.
/// - `Hard`: everything is cleared.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ResetType {
    Soft,
    #[default]
    Hard,
}

impl ResetType {
    pub fn is_soft(self) -> bool {
        matches!(self, ResetType::Soft)
    }
}

/// What is allowed after one outcome (passed or failed).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ResetPolicy {
    #[serde(rename = "_canReset")]
    pub can_reset: bool,

    #[serde(rename = "_isResetOnRevisit")]
    pub is_reset_on_revisit: bool,
}

/// Reset configuration split by outcome, plus per-category granularity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ResetConfig {
    #[serde(rename = "_passed")]
    pub passed: ResetPolicy,

    #[serde(rename = "_failed")]
    pub failed: ResetPolicy,

    #[serde(rename = "_questionsType")]
    pub questions_type: ResetType,

    #[serde(rename = "_presentationComponentsType")]
    pub presentation_components_type: ResetType,

    /// Reload to the assessment itself instead of the current location.
    #[serde(rename = "_scrollTo")]
    pub scroll_to: bool,
}

impl ResetConfig {
    /// Policy keyed by the outcome as it stands right now.
    pub fn policy_for(&self, is_passed: bool) -> ResetPolicy {
        if is_passed { self.passed } else { self.failed }
    }

    pub fn reset_type_for(&self, category: ItemCategory) -> ResetType {
        match category {
            ItemCategory::Question => self.questions_type,
            ItemCategory::PresentationComponent => self.presentation_components_type,
        }
    }
}

impl Default for ResetConfig {
    fn default() -> Self {
        Self {
            passed: ResetPolicy {
                can_reset: false,
                is_reset_on_revisit: false,
            },
            failed: ResetPolicy {
                can_reset: true,
                is_reset_on_revisit: false,
            },
            questions_type: ResetType::Hard,
            presentation_components_type: ResetType::Hard,
            scroll_to: true,
        }
    }
}
