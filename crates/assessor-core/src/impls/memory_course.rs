//! InMemoryCourse - 開発用・テスト用のホスト
//!
//! 一つのページ（`page_id`）上に一つのアセスメント（`container_id`）が置かれ、
//! その配下に trackable な item が並ぶ、最小のコース構造を表します。
//!
//! # 学習ポイント
//! - 一つの struct で ItemCollection / ScoreAggregator / Navigator / Lifecycle を実装
//! - `&self` のまま状態を書き換えるための Mutex
//! - reset の粒度（soft / hard）の違いを item 状態で再現

use std::sync::{Mutex, MutexGuard, PoisonError};

use async_trait::async_trait;
use tracing::debug;

use crate::domain::{ItemId, ItemState, QuestionPresentation, ResetType, ScoreSnapshot};
use crate::ports::{ItemCollection, Lifecycle, Navigator, ScoreAggregator};

/// 採点対象の質問一問の配点
#[derive(Debug, Clone, Copy, PartialEq)]
struct Scoring {
    score: f64,
    min_score: f64,
    max_score: f64,
}

impl Default for Scoring {
    fn default() -> Self {
        Self {
            score: 0.0,
            min_score: 0.0,
            max_score: 1.0,
        }
    }
}

#[derive(Debug)]
struct Entry {
    state: ItemState,
    scoring: Scoring,
    presentation: Option<QuestionPresentation>,
    refreshes: usize,
}

#[derive(Debug)]
struct CourseState {
    entries: Vec<Entry>,
    location: Option<ItemId>,
    reloads: Vec<ItemId>,
    is_available: bool,
    is_awaiting_children: bool,
    is_started: bool,
}

impl CourseState {
    fn entry_mut(&mut self, id: &ItemId) -> Option<&mut Entry> {
        self.entries.iter_mut().find(|entry| &entry.state.id == id)
    }
}

/// InMemoryCourse は 1 ページ・1 アセスメントのホスト
///
/// # 使用例
/// ```ignore
/// let course = Arc::new(InMemoryCourse::new("co-05", "a-05", items));
/// course.set_location("co-05");
/// course.answer(&ItemId::from("c-10"), true);
/// ```
pub struct InMemoryCourse {
    page_id: ItemId,
    container_id: ItemId,
    state: Mutex<CourseState>,
}

impl InMemoryCourse {
    pub fn new(
        page_id: impl Into<ItemId>,
        container_id: impl Into<ItemId>,
        items: Vec<ItemState>,
    ) -> Self {
        let entries = items
            .into_iter()
            .map(|state| Entry {
                state,
                scoring: Scoring::default(),
                presentation: None,
                refreshes: 0,
            })
            .collect();
        Self {
            page_id: page_id.into(),
            container_id: container_id.into(),
            state: Mutex::new(CourseState {
                entries,
                location: None,
                reloads: Vec::new(),
                is_available: true,
                is_awaiting_children: false,
                is_started: true,
            }),
        }
    }

    pub fn page_id(&self) -> &ItemId {
        &self.page_id
    }

    pub fn container_id(&self) -> &ItemId {
        &self.container_id
    }

    fn lock(&self) -> MutexGuard<'_, CourseState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// 質問の配点を変更（既定は min 0 / max 1）
    pub fn set_score_range(&self, id: &ItemId, min_score: f64, max_score: f64) {
        if let Some(entry) = self.lock().entry_mut(id) {
            entry.scoring.min_score = min_score;
            entry.scoring.max_score = max_score;
        }
    }

    /// 質問に回答する。正解なら満点、不正解なら最低点
    pub fn answer(&self, id: &ItemId, is_correct: bool) {
        if let Some(entry) = self.lock().entry_mut(id) {
            entry.state.is_interaction_complete = true;
            entry.state.is_complete = true;
            entry.state.is_correct = is_correct;
            entry.scoring.score = if is_correct {
                entry.scoring.max_score
            } else {
                entry.scoring.min_score
            };
        }
    }

    /// presentation component を閲覧済みにする
    pub fn complete_item(&self, id: &ItemId) {
        if let Some(entry) = self.lock().entry_mut(id) {
            entry.state.is_interaction_complete = true;
            entry.state.is_complete = true;
        }
    }

    pub fn item(&self, id: &ItemId) -> Option<ItemState> {
        self.lock()
            .entries
            .iter()
            .find(|entry| &entry.state.id == id)
            .map(|entry| entry.state.clone())
    }

    pub fn set_location(&self, location: impl Into<ItemId>) {
        self.lock().location = Some(location.into());
    }

    pub fn clear_location(&self) {
        self.lock().location = None;
    }

    pub fn set_available(&self, is_available: bool) {
        self.lock().is_available = is_available;
    }

    pub fn set_awaiting_children(&self, is_awaiting_children: bool) {
        self.lock().is_awaiting_children = is_awaiting_children;
    }

    pub fn set_started(&self, is_started: bool) {
        self.lock().is_started = is_started;
    }

    /// これまでの reload 先
    pub fn reloads(&self) -> Vec<ItemId> {
        self.lock().reloads.clone()
    }

    /// 最後に適用された表示設定
    pub fn presentation(&self, id: &ItemId) -> Option<QuestionPresentation> {
        self.lock()
            .entries
            .iter()
            .find(|entry| &entry.state.id == id)
            .and_then(|entry| entry.presentation)
    }

    /// 再描画を依頼された回数
    pub fn refreshes(&self, id: &ItemId) -> usize {
        self.lock()
            .entries
            .iter()
            .find(|entry| &entry.state.id == id)
            .map_or(0, |entry| entry.refreshes)
    }
}

impl ItemCollection for InMemoryCourse {
    fn items(&self) -> Vec<ItemState> {
        self.lock()
            .entries
            .iter()
            .map(|entry| entry.state.clone())
            .collect()
    }

    /// soft は完了フラグを残し、hard はすべて消す
    fn reset_item(&self, id: &ItemId, reset_type: ResetType) {
        let mut state = self.lock();
        let Some(entry) = state.entry_mut(id) else {
            return;
        };
        entry.state.is_interaction_complete = false;
        entry.state.is_correct = false;
        entry.scoring.score = 0.0;
        if !reset_type.is_soft() {
            entry.state.is_complete = false;
        }
        debug!(item = %id, ?reset_type, "item reset");
    }

    fn present_question(&self, id: &ItemId, presentation: QuestionPresentation) {
        if let Some(entry) = self.lock().entry_mut(id) {
            entry.presentation = Some(presentation);
        }
    }

    fn refresh_question(&self, id: &ItemId) {
        if let Some(entry) = self.lock().entry_mut(id) {
            entry.refreshes += 1;
        }
    }

    fn is_awaiting_children(&self) -> bool {
        self.lock().is_awaiting_children
    }

    fn is_available(&self) -> bool {
        self.lock().is_available
    }
}

impl ScoreAggregator for InMemoryCourse {
    /// 質問のみを集計する
    fn live_score(&self) -> ScoreSnapshot {
        let state = self.lock();
        let questions = state.entries.iter().filter(|entry| entry.state.is_question());

        let mut snapshot = ScoreSnapshot::new(0.0, 0.0, 0.0, 0.0);
        for entry in questions {
            snapshot.score += entry.scoring.score;
            snapshot.min_score += entry.scoring.min_score;
            snapshot.max_score += entry.scoring.max_score;
            if entry.state.is_correct {
                snapshot.correctness += 1.0;
            }
        }
        snapshot
    }
}

impl Navigator for InMemoryCourse {
    fn current_location(&self) -> Option<ItemId> {
        self.lock().location.clone()
    }

    fn page_of(&self, model: &ItemId) -> Option<ItemId> {
        let state = self.lock();
        let is_on_page = model == &self.page_id
            || model == &self.container_id
            || state.entries.iter().any(|entry| &entry.state.id == model);
        is_on_page.then(|| self.page_id.clone())
    }

    /// ページ・コンテナ・item は同じ系統に属する
    fn intersects(&self, model: &ItemId, items: &[ItemId]) -> bool {
        if model == &self.page_id || model == &self.container_id {
            return !items.is_empty();
        }
        items.contains(model)
    }

    fn reload(&self, target: &ItemId) {
        self.lock().reloads.push(target.clone());
    }
}

#[async_trait]
impl Lifecycle for InMemoryCourse {
    fn is_started(&self) -> bool {
        self.lock().is_started
    }

    async fn completion_settled(&self) {
        tokio::task::yield_now().await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ItemCategory;

    fn course() -> InMemoryCourse {
        InMemoryCourse::new(
            "co-05",
            "a-05",
            vec![
                ItemState::new("c-10", ItemCategory::Question),
                ItemState::new("c-15", ItemCategory::Question),
                ItemState::new("c-20", ItemCategory::PresentationComponent),
            ],
        )
    }

    #[test]
    fn test_live_score_counts_questions_only() {
        let course = course();
        course.answer(&ItemId::from("c-10"), true);
        course.answer(&ItemId::from("c-15"), false);
        course.complete_item(&ItemId::from("c-20"));

        let snapshot = course.live_score();
        assert_eq!(snapshot.score, 1.0);
        assert_eq!(snapshot.correctness, 1.0);
        assert_eq!(snapshot.max_score, 2.0);
        assert_eq!(snapshot.min_score, 0.0);
    }

    #[test]
    fn test_soft_reset_keeps_completion() {
        let course = course();
        let id = ItemId::from("c-10");
        course.answer(&id, true);

        course.reset_item(&id, ResetType::Soft);
        let item = course.item(&id).unwrap();
        assert!(!item.is_interaction_complete);
        assert!(!item.is_correct);
        assert!(item.is_complete);

        course.reset_item(&id, ResetType::Hard);
        assert!(!course.item(&id).unwrap().is_complete);
        assert_eq!(course.live_score().score, 0.0);
    }

    #[test]
    fn test_navigation() {
        let course = course();
        assert_eq!(course.page_of(&ItemId::from("c-20")), Some(ItemId::from("co-05")));
        assert_eq!(course.page_of(&ItemId::from("m-01")), None);

        let items = vec![ItemId::from("c-10")];
        assert!(course.intersects(&ItemId::from("co-05"), &items));
        assert!(course.intersects(&ItemId::from("c-10"), &items));
        assert!(!course.intersects(&ItemId::from("co-99"), &items));

        course.reload(&ItemId::from("a-05"));
        assert_eq!(course.reloads(), vec![ItemId::from("a-05")]);
    }
}
