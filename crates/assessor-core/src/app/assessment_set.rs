//! AssessmentSet - 採点・試行・reset のオーケストレーション
//!
//! Passmark / ResetConfig / Attempts / 現在の Attempt を一つにまとめ、
//! ホストから読んだ item 状態と組み合わせて
//! `is_complete` / `is_passed` / `can_reset` / `should_reset_on_revisit` を導出します。
//!
//! # 状態の持ち方
//! - 導出値はキャッシュしない（呼ぶたびにホストから読み直す）
//! - 保持する可変状態は ledger・現在の attempt・「このサイクルで reset 済み」フラグのみ
//! - ホストのイベントモデルは単一フロー。reset の await 中に他の操作は走らない

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{debug, info, warn};

use super::compat;
use crate::domain::{
    AssessmentConfig, AssessmentEvent, AssessmentEventKind, AssessmentId, AssessmentStatus,
    Attempt, AttemptError, AttemptState, Attempts, ItemCategory, ItemId, ItemState, LedgerState,
    Location, Passmark, ResetConfig, ResetPolicy, ScoreSnapshot, scaled_correctness,
};
use crate::error::AssessmentError;
use crate::ports::{
    Clock, EventSink, IdGenerator, ItemCollection, Lifecycle, Navigator, ScoreAggregator,
    StateStore, StoreError,
};

/// StateStore 上の namespace
pub const SAVE_STATE_NAMESPACE: &str = "sas";

/// Persisted pair: `[ledger, active attempt]`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SaveState(pub LedgerState, pub AttemptState);

/// ホスト側の協調者一式（AssessmentBuilder が組み立てる）
pub(crate) struct Ports {
    pub items: Arc<dyn ItemCollection>,
    pub scoring: Arc<dyn ScoreAggregator>,
    pub navigator: Arc<dyn Navigator>,
    pub lifecycle: Arc<dyn Lifecycle>,
    pub store: Arc<dyn StateStore>,
    pub events: Arc<dyn EventSink>,
    pub clock: Arc<dyn Clock>,
    pub ids: Arc<dyn IdGenerator>,
}

/// One assessment attempt/scoring/reset state machine.
pub struct AssessmentSet {
    config: AssessmentConfig,
    container_id: ItemId,
    attempts: Attempts,
    attempt: Attempt,
    /// Set by a reset, cleared when the learner revisits.
    has_reset: bool,
    is_backward_compatible: bool,
    ports: Ports,
}

impl AssessmentSet {
    pub(crate) fn new(
        config: AssessmentConfig,
        container_id: ItemId,
        is_backward_compatible: bool,
        ports: Ports,
    ) -> Self {
        let attempt = Attempt::new(ports.ids.generate_attempt_id());
        let attempts = Attempts::new(config.attempts);
        Self {
            config,
            container_id,
            attempts,
            attempt,
            has_reset: false,
            is_backward_compatible,
            ports,
        }
    }

    // ========================================
    // 設定と所有物
    // ========================================

    pub fn id(&self) -> &AssessmentId {
        &self.config.id
    }

    pub fn title(&self) -> &str {
        &self.config.title
    }

    pub fn config(&self) -> &AssessmentConfig {
        &self.config
    }

    /// Host model carrying the assessment configuration (e.g. an article).
    pub fn container_id(&self) -> &ItemId {
        &self.container_id
    }

    pub fn passmark(&self) -> &Passmark {
        &self.config.passmark
    }

    pub fn reset_config(&self) -> &ResetConfig {
        &self.config.reset
    }

    pub fn attempts(&self) -> &Attempts {
        &self.attempts
    }

    pub fn attempt(&self) -> &Attempt {
        &self.attempt
    }

    pub fn is_score_included(&self) -> bool {
        self.config.is_score_included
    }

    pub fn is_completion_required(&self) -> bool {
        self.config.is_completion_required
    }

    // ========================================
    // ホストからの読み取り
    // ========================================

    /// Trackable items, read fresh from the host.
    pub fn items(&self) -> Vec<ItemState> {
        self.ports.items.items()
    }

    pub fn questions(&self) -> Vec<ItemState> {
        self.items().into_iter().filter(ItemState::is_question).collect()
    }

    pub fn is_awaiting_children(&self) -> bool {
        self.ports.items.is_awaiting_children()
    }

    pub fn page_id(&self) -> Option<ItemId> {
        self.ports.navigator.page_of(&self.container_id)
    }

    fn is_unreachable(&self) -> bool {
        self.is_awaiting_children() || !self.ports.items.is_available()
    }

    // ========================================
    // 導出値
    // ========================================

    /// Every trackable item reports interaction-complete.
    pub fn is_attempt_complete(&self) -> bool {
        if self.is_unreachable() {
            return false;
        }
        self.items().iter().all(|item| item.is_interaction_complete)
    }

    /// Every category that has members is configured soft.
    pub fn is_soft_reset(&self) -> bool {
        let items = self.items();
        ItemCategory::ALL.into_iter().all(|category| {
            !items.iter().any(|item| item.category == category)
                || self.config.reset.reset_type_for(category).is_soft()
        })
    }

    /// In session this mirrors the running attempt. Out of session a soft-reset
    /// assessment still counts as complete when any earlier attempt was.
    pub fn is_complete(&self) -> bool {
        if self.is_unreachable() {
            return false;
        }
        if self.attempt.is_in_session() {
            return self.is_attempt_complete();
        }
        if self.is_soft_reset() {
            return self.attempts.was_complete();
        }
        self.items().iter().all(|item| item.is_complete)
    }

    pub fn is_passed(&self) -> bool {
        let is_complete = self.is_complete();
        if self.attempt.is_in_progress() && !is_complete {
            return false;
        }
        if !self.config.passmark.is_enabled && is_complete {
            return true;
        }
        if !self.attempt.is_in_session() && self.is_soft_reset() {
            return self.attempts.was_passed();
        }
        let passmark = self.config.passmark;
        let (score, correctness) = if passmark.is_scaled {
            (self.scaled_score(), self.scaled_correctness())
        } else {
            (self.score(), self.correctness())
        };
        passmark.evaluate(score, correctness)
    }

    fn selected_policy(&self) -> ResetPolicy {
        self.config.reset.policy_for(self.is_passed())
    }

    pub fn can_reset(&self) -> bool {
        self.is_complete()
            && self.attempts.has_remaining()
            && self.selected_policy().can_reset
            && !self.has_reset
    }

    pub fn should_reset_on_revisit(&self) -> bool {
        !self.attempt.is_in_progress()
            && self.can_reset()
            && self.selected_policy().is_reset_on_revisit
    }

    /// The learner is currently on the assessment's page.
    pub fn can_reload(&self) -> bool {
        match (self.page_id(), self.ports.navigator.current_location()) {
            (Some(page), Some(location)) => page == location,
            _ => false,
        }
    }

    /// Last recorded attempt, when numbers should come from history.
    fn frozen_attempt(&self) -> Option<&Attempt> {
        if self.is_complete() && !self.attempt.is_in_session() {
            self.attempts.last()
        } else {
            None
        }
    }

    pub fn score_snapshot(&self) -> ScoreSnapshot {
        match self.frozen_attempt() {
            Some(attempt) => attempt.snapshot(),
            None => self.ports.scoring.live_score(),
        }
    }

    pub fn score(&self) -> f64 {
        self.score_snapshot().score
    }

    pub fn scaled_score(&self) -> f64 {
        self.score_snapshot().scaled_score()
    }

    pub fn correctness(&self) -> f64 {
        self.score_snapshot().correctness
    }

    pub fn scaled_correctness(&self) -> f64 {
        scaled_correctness(self.correctness(), self.questions().len())
    }

    pub fn min_score(&self) -> f64 {
        self.score_snapshot().min_score
    }

    pub fn max_score(&self) -> f64 {
        self.score_snapshot().max_score
    }

    pub fn status(&self) -> AssessmentStatus {
        let snapshot = self.score_snapshot();
        AssessmentStatus {
            id: self.id().clone(),
            title: self.title().to_string(),
            is_complete: self.is_complete(),
            is_passed: self.is_passed(),
            score: snapshot.score,
            scaled_score: snapshot.scaled_score(),
            correctness: snapshot.correctness,
            scaled_correctness: scaled_correctness(snapshot.correctness, self.questions().len()),
            min_score: snapshot.min_score,
            max_score: snapshot.max_score,
            can_reset: self.can_reset(),
            should_reset_on_revisit: self.should_reset_on_revisit(),
            attempts_used: self.attempts.used(),
            attempts_remaining: self.attempts.remaining(),
            is_attempt_in_progress: self.attempt.is_in_progress(),
            is_attempt_in_session: self.attempt.is_in_session(),
        }
    }

    // ========================================
    // 永続化
    // ========================================

    pub fn save_state(&self) -> SaveState {
        SaveState(self.attempts.save_state(), self.attempt.save_state())
    }

    pub fn save(&self) -> Result<(), AssessmentError> {
        let serialized = serde_json::to_string(&self.save_state())
            .map_err(|err| self.store_error(StoreError::from(err)))?;
        self.ports
            .store
            .set(SAVE_STATE_NAMESPACE, self.id().as_str(), serialized)
            .map_err(|source| self.store_error(source))?;
        debug!(assessment_id = %self.id(), "saved assessment state");
        Ok(())
    }

    /// Hydrate ledger and active attempt from the store.
    ///
    /// Only a failing store is an error; a corrupt entry is logged and ignored.
    pub fn restore(&mut self) -> Result<(), AssessmentError> {
        let stored = self
            .ports
            .store
            .get(SAVE_STATE_NAMESPACE, self.id().as_str())
            .map_err(|source| self.store_error(source))?;
        match stored {
            Some(raw) => self.restore_from(&raw),
            None => debug!(assessment_id = %self.id(), "no saved state"),
        }
        self.emit(AssessmentEventKind::Restored);
        Ok(())
    }

    /// Hydrate from a serialized `[ledger, active attempt]` pair.
    pub fn restore_from(&mut self, raw: &str) {
        let data: Value = match serde_json::from_str(raw) {
            Ok(data) => data,
            Err(err) => {
                warn!(assessment_id = %self.id(), error = %err, "discarding unreadable saved state");
                return;
            }
        };
        let ids = Arc::clone(&self.ports.ids);
        let null = Value::Null;

        self.attempts
            .restore(data.get(0).unwrap_or(&null), || ids.generate_attempt_id());

        let active = data
            .get(1)
            .and_then(|state| serde_json::from_value::<AttemptState>(state.clone()).ok());
        self.attempt = match active {
            Some(state) => Attempt::restore(ids.generate_attempt_id(), state),
            None => {
                warn!(assessment_id = %self.id(), "saved active attempt missing, starting fresh");
                Attempt::new(ids.generate_attempt_id())
            }
        };

        info!(
            assessment_id = %self.id(),
            used = self.attempts.used(),
            history = self.attempts.history().len(),
            has_best = self.attempts.best().is_some(),
            "restored assessment state"
        );
    }

    // ========================================
    // プロトコル
    // ========================================

    /// Scoring update cycle: refresh the live snapshot and persist.
    pub fn update(&mut self) -> Result<(), AssessmentError> {
        debug!(
            assessment_id = %self.id(),
            min_score = self.min_score(),
            max_score = self.max_score(),
            score = self.score(),
            scaled_score = self.scaled_score(),
            "scores"
        );
        debug!(
            assessment_id = %self.id(),
            is_attempt_complete = self.is_attempt_complete(),
            is_complete = self.is_complete(),
            is_passed = self.is_passed(),
            "completion"
        );
        self.attempt.update_score(self.ports.scoring.live_score());
        if self.ports.lifecycle.is_started() {
            self.save()?;
        }
        Ok(())
    }

    /// Reset protocol. Returns `Ok(false)` without doing anything when the
    /// assessment cannot be reset.
    ///
    /// Events are emitted in order: `PreReset` before items change, `Reset`
    /// once the host has settled, `PostReset` after navigation.
    pub async fn reset(&mut self) -> Result<bool, AssessmentError> {
        if !self.can_reset() {
            debug!(assessment_id = %self.id(), "reset ignored, assessment cannot be reset");
            return Ok(false);
        }
        info!(
            assessment_id = %self.id(),
            used = self.attempts.used(),
            remaining = ?self.attempts.remaining(),
            "resetting assessment"
        );
        self.emit(AssessmentEventKind::PreReset);

        let is_soft = self.is_soft_reset();
        for item in self.items() {
            let reset_type = self.config.reset.reset_type_for(item.category);
            self.ports.items.reset_item(&item.id, reset_type);
        }
        self.attempts.reset(is_soft);
        self.attempt = self.new_attempt();
        self.has_reset = true;

        self.ports.lifecycle.completion_settled().await;
        self.emit(AssessmentEventKind::Reset);

        if self.can_reload() {
            self.reload();
            self.attempt.start(self.ports.clock.now())?;
        }
        let saved = self.save();
        self.emit(AssessmentEventKind::PostReset);
        saved?;
        Ok(true)
    }

    /// Navigate back to the assessment (or stay where the learner is).
    pub fn reload(&self) {
        let target = if self.config.reset.scroll_to {
            Some(self.container_id.clone())
        } else {
            self.ports.navigator.current_location()
        };
        match target {
            Some(target) => {
                debug!(assessment_id = %self.id(), target = %target, "reloading");
                self.ports.navigator.reload(&target);
            }
            None => warn!(assessment_id = %self.id(), "no reload target"),
        }
    }

    /// Route change handler.
    pub async fn on_navigation(&mut self, location: &Location) -> Result<(), AssessmentError> {
        self.attempt.leave_session();
        if !location.is_page() {
            return Ok(());
        }
        let item_ids: Vec<ItemId> = self.items().into_iter().map(|item| item.id).collect();
        if !self
            .ports
            .navigator
            .intersects(&location.current_model, &item_ids)
        {
            return Ok(());
        }
        debug!(assessment_id = %self.id(), location = %location.current_model, "assessment revisited");

        if self.should_reset_on_revisit() {
            self.reset().await?;
        }
        self.has_reset = false;
        self.apply_question_presentation();

        if !self.is_attempt_complete() {
            self.begin_attempt()?;
            self.save()?;
        }
        Ok(())
    }

    /// The host reports the item collection as complete.
    pub fn on_completed(&mut self) -> Result<(), AssessmentError> {
        if self.attempt.is_in_progress() {
            self.attempt.update_score(self.ports.scoring.live_score());
            let is_passed = self.is_passed();
            self.attempt.end(is_passed, self.ports.clock.now())?;
            self.attempts.spend();
            self.attempts.record(self.attempt.clone());
            info!(
                assessment_id = %self.id(),
                attempt_id = %self.attempt.id(),
                score = self.attempt.score(),
                is_passed,
                used = self.attempts.used(),
                "attempt ended"
            );
            self.save()?;
        }

        let marking = self.config.marking();
        if marking.is_enabled && marking.is_suppressed && !self.attempts.has_remaining() {
            self.apply_question_presentation();
            for question in self.questions() {
                self.ports.items.refresh_question(&question.id);
            }
        }

        self.emit(AssessmentEventKind::Completed);
        Ok(())
    }

    /// The container's own completion flag changed; losing it resets.
    pub async fn on_container_completion_changed(
        &mut self,
        is_complete: bool,
    ) -> Result<(), AssessmentError> {
        if !is_complete {
            self.reset().await?;
        }
        Ok(())
    }

    /// Push feedback/marking visibility onto every question.
    pub fn apply_question_presentation(&self) {
        let presentation = self
            .config
            .question_presentation(self.attempts.has_remaining());
        for question in self.questions() {
            self.ports.items.present_question(&question.id, presentation);
        }
    }

    // ========================================
    // 内部
    // ========================================

    fn new_attempt(&self) -> Attempt {
        Attempt::new(self.ports.ids.generate_attempt_id())
    }

    /// Start, resume, or replace a finished attempt and start that.
    fn begin_attempt(&mut self) -> Result<(), AttemptError> {
        if self.attempt.is_in_progress() {
            return self.attempt.resume();
        }
        if self.attempt.is_complete() {
            self.attempt = self.new_attempt();
        }
        self.attempt.start(self.ports.clock.now())
    }

    fn emit(&self, kind: AssessmentEventKind) {
        let event = AssessmentEvent {
            kind,
            assessment_id: self.id().clone(),
            status: self.status(),
            compat: self.is_backward_compatible.then(|| compat::project(self)),
        };
        self.ports.events.emit(event);
    }

    fn store_error(&self, source: StoreError) -> AssessmentError {
        AssessmentError::Store {
            id: self.id().clone(),
            source,
        }
    }
}
