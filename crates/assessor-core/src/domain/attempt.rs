//! Attempt: one grading session of an assessment.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::errors::AttemptError;
use super::ids::AttemptId;
use super::score::ScoreSnapshot;

/// A single grading session.
///
/// Lifecycle:
/// - created empty
/// - `start()` -> in progress, in session
/// - `update_score()` while in progress keeps a live snapshot
/// - `end()` freezes score and outcome; the snapshot is authoritative thereafter
///
/// `is_in_session` is transient: the owner clears it on every navigation,
/// independently of progress.
#[derive(Debug, Clone, PartialEq)]
pub struct Attempt {
    id: AttemptId,
    is_in_progress: bool,
    is_in_session: bool,
    snapshot: ScoreSnapshot,
    is_complete: bool,
    is_passed: bool,

    /// When this attempt started (not persisted).
    started_at: Option<DateTime<Utc>>,

    /// When this attempt ended (not persisted).
    ended_at: Option<DateTime<Utc>>,
}

impl Attempt {
    pub fn new(id: AttemptId) -> Self {
        Self {
            id,
            is_in_progress: false,
            is_in_session: false,
            snapshot: ScoreSnapshot::default(),
            is_complete: false,
            is_passed: false,
            started_at: None,
            ended_at: None,
        }
    }

    /// Rebuild a frozen attempt from persisted numbers.
    ///
    /// Nothing is re-derived from live items.
    pub fn restore(id: AttemptId, state: AttemptState) -> Self {
        let AttemptState(score, correctness, min_score, max_score, is_complete, is_passed) = state;
        Self {
            snapshot: ScoreSnapshot::new(score, correctness, min_score, max_score),
            is_complete,
            is_passed,
            ..Self::new(id)
        }
    }

    /// Mark in progress and in session.
    pub fn start(&mut self, now: DateTime<Utc>) -> Result<(), AttemptError> {
        if self.is_in_progress || self.is_complete {
            return Err(AttemptError::AlreadyStarted(self.id));
        }
        self.is_in_progress = true;
        self.is_in_session = true;
        self.started_at = Some(now);
        Ok(())
    }

    /// Re-enter an attempt that is already in progress.
    pub fn resume(&mut self) -> Result<(), AttemptError> {
        if !self.is_in_progress {
            return Err(AttemptError::NotInProgress(self.id));
        }
        self.is_in_session = true;
        Ok(())
    }

    pub fn leave_session(&mut self) {
        self.is_in_session = false;
    }

    /// Keep the live figures while in progress; ignored otherwise.
    pub fn update_score(&mut self, live: ScoreSnapshot) {
        if self.is_in_progress {
            self.snapshot = live;
        }
    }

    /// Freeze the outcome. `is_passed` is the owning assessment's verdict.
    pub fn end(&mut self, is_passed: bool, now: DateTime<Utc>) -> Result<(), AttemptError> {
        if !self.is_in_progress {
            return Err(AttemptError::NotInProgress(self.id));
        }
        self.is_in_progress = false;
        self.is_complete = true;
        self.is_passed = is_passed;
        self.ended_at = Some(now);
        Ok(())
    }

    pub fn save_state(&self) -> AttemptState {
        AttemptState(
            self.snapshot.score,
            self.snapshot.correctness,
            self.snapshot.min_score,
            self.snapshot.max_score,
            self.is_complete,
            self.is_passed,
        )
    }

    pub fn id(&self) -> AttemptId {
        self.id
    }

    pub fn is_in_progress(&self) -> bool {
        self.is_in_progress
    }

    pub fn is_in_session(&self) -> bool {
        self.is_in_session
    }

    pub fn is_complete(&self) -> bool {
        self.is_complete
    }

    pub fn is_passed(&self) -> bool {
        self.is_passed
    }

    pub fn snapshot(&self) -> ScoreSnapshot {
        self.snapshot
    }

    pub fn score(&self) -> f64 {
        self.snapshot.score
    }

    pub fn started_at(&self) -> Option<DateTime<Utc>> {
        self.started_at
    }

    pub fn ended_at(&self) -> Option<DateTime<Utc>> {
        self.ended_at
    }
}

/// Persisted attempt snapshot:
/// `[score, correctness, minScore, maxScore, isComplete, isPassed]`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AttemptState(pub f64, pub f64, pub f64, pub f64, pub bool, pub bool);
