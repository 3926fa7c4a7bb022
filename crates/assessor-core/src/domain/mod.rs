//! Domain model (passmark, reset policy, attempts, configuration, events).

pub mod attempt;
pub mod attempts;
pub mod config;
pub mod errors;
pub mod events;
pub mod ids;
pub mod item;
pub mod location;
pub mod marking;
pub mod passmark;
pub mod reset;
pub mod score;
pub mod status;

pub use attempt::{Attempt, AttemptState};
pub use attempts::{AttemptLimit, Attempts, AttemptsConfig, LedgerState};
pub use config::{AssessmentConfig, QuestionsConfig};
pub use errors::AttemptError;
pub use events::{AssessmentEvent, AssessmentEventKind};
pub use ids::{AssessmentId, AttemptId, ItemId};
pub use item::{ItemCategory, ItemState, QuestionPresentation};
pub use location::{ContentType, Location};
pub use marking::Marking;
pub use passmark::Passmark;
pub use reset::{ResetConfig, ResetPolicy, ResetType};
pub use score::{ScoreSnapshot, scaled_correctness, scaled_score};
pub use status::{AssessmentStatus, COMPATIBILITY_VERSION, CompatibilityQuestion, CompatibilityState};
