//! Scenario files: a course layout plus a scripted list of learner actions.

use std::path::Path;

use anyhow::{Context, Result};
use serde::Deserialize;
use serde_json::Value;

use assessor_core::domain::{ItemCategory, ItemState};

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Scenario {
    /// The host's `_scoringAssessment` object, parsed leniently.
    pub config: Value,
    pub page_id: String,
    pub container_id: String,
    pub items: Vec<ScenarioItem>,
    #[serde(default)]
    pub backward_compatible: bool,
    /// Serialized `[ledger, active]` to seed the store with.
    #[serde(default)]
    pub saved_state: Option<Value>,
    pub steps: Vec<Step>,
}

#[derive(Debug, Deserialize)]
pub struct ScenarioItem {
    pub id: String,
    pub category: ItemCategory,
    #[serde(default)]
    pub min_score: Option<f64>,
    #[serde(default)]
    pub max_score: Option<f64>,
}

impl ScenarioItem {
    pub fn state(&self) -> ItemState {
        ItemState::new(self.id.as_str(), self.category)
    }
}

#[derive(Debug, Deserialize)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum Step {
    /// Navigate to a page; defaults to the assessment's page.
    Visit {
        #[serde(default)]
        location: Option<String>,
    },
    /// Navigate to a menu, leaving the assessment.
    Leave {
        #[serde(default = "default_menu")]
        location: String,
    },
    Answer {
        item: String,
        correct: bool,
    },
    /// Mark a presentation component as viewed.
    View {
        item: String,
    },
    /// The host reports the assessment's items complete.
    Complete,
    /// The host flips the container's own completion flag.
    ContainerCompletion {
        complete: bool,
    },
    Update,
    Reset,
    Restore,
}

fn default_menu() -> String {
    "course".to_string()
}

impl Scenario {
    pub fn load(path: &Path) -> Result<Self> {
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("reading scenario {}", path.display()))?;
        serde_json::from_str(&raw).with_context(|| format!("parsing scenario {}", path.display()))
    }
}
