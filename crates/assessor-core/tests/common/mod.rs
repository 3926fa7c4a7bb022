//! 統合テスト用のハーネス
//!
//! co-05 ページ上の a-05 アセスメントを InMemoryCourse で組み立て、
//! 学習者の操作（訪問・回答・完了・離脱）を一行で呼べるようにします。

#![allow(dead_code)]

use std::sync::Arc;

use chrono::{TimeZone, Utc};
use serde_json::{Value, json};

use assessor_core::domain::{ItemCategory, ItemId, ItemState, Location};
use assessor_core::impls::{InMemoryCourse, InMemoryStateStore, RecordingEventSink};
use assessor_core::ports::{FixedClock, ItemCollection, SequentialIdGenerator};
use assessor_core::{AssessmentBuilder, AssessmentSet};

pub const PAGE: &str = "co-05";
pub const CONTAINER: &str = "a-05";
pub const MENU: &str = "course";

pub struct Harness {
    pub course: Arc<InMemoryCourse>,
    pub store: Arc<InMemoryStateStore>,
    pub events: Arc<RecordingEventSink>,
    pub set: AssessmentSet,
}

/// `_id` と `_isEnabled` を補った設定
pub fn config(overrides: Value) -> Value {
    let mut config = json!({ "_id": CONTAINER, "title": "Knowledge check", "_isEnabled": true });
    if let (Some(base), Value::Object(extra)) = (config.as_object_mut(), overrides) {
        base.extend(extra);
    }
    config
}

/// `questions` 問の質問と `components` 個の presentation component
pub fn items(questions: usize, components: usize) -> Vec<ItemState> {
    let questions = (0..questions)
        .map(|n| ItemState::new(format!("q-{n:02}").as_str(), ItemCategory::Question));
    let components = (0..components).map(|n| {
        ItemState::new(
            format!("p-{n:02}").as_str(),
            ItemCategory::PresentationComponent,
        )
    });
    questions.chain(components).collect()
}

impl Harness {
    pub fn new(config: Value, items: Vec<ItemState>) -> Self {
        Self::with_store(config, items, Arc::new(InMemoryStateStore::new()), false)
    }

    pub fn with_store(
        config: Value,
        items: Vec<ItemState>,
        store: Arc<InMemoryStateStore>,
        backward_compatible: bool,
    ) -> Self {
        let course = Arc::new(InMemoryCourse::new(PAGE, CONTAINER, items));
        let events = Arc::new(RecordingEventSink::new());
        let clock = FixedClock::new(Utc.with_ymd_and_hms(2024, 1, 1, 12, 0, 0).unwrap());
        let set = AssessmentBuilder::new(assessor_core::AssessmentConfig::from_value(&config))
            .container(CONTAINER)
            .backward_compatible(backward_compatible)
            .host(Arc::clone(&course))
            .store(store.clone())
            .events(events.clone())
            .clock(Arc::new(clock))
            .ids(Arc::new(SequentialIdGenerator::new()))
            .build()
            .expect("assessment builds");
        Self {
            course,
            store,
            events,
            set,
        }
    }

    pub async fn visit(&mut self) {
        self.course.set_location(PAGE);
        self.set.on_navigation(&Location::page(PAGE)).await.unwrap();
    }

    pub async fn leave(&mut self) {
        self.course.set_location(MENU);
        self.set.on_navigation(&Location::menu(MENU)).await.unwrap();
    }

    /// 最初の `correct` 問を正解、残りを不正解にし、component はすべて閲覧する
    pub fn answer(&mut self, correct: usize) {
        let mut correct_left = correct;
        for item in self.course.items() {
            if item.is_question() {
                self.course.answer(&item.id, correct_left > 0);
                correct_left = correct_left.saturating_sub(1);
            } else {
                self.course.complete_item(&item.id);
            }
            self.set.update().unwrap();
        }
    }

    pub fn complete(&mut self) {
        self.set.on_completed().unwrap();
    }

    /// 訪問して回答し、完了させる
    pub async fn take_attempt(&mut self, correct: usize) {
        self.visit().await;
        self.answer(correct);
        self.complete();
    }

    pub fn item(&self, id: &str) -> ItemState {
        self.course.item(&ItemId::from(id)).unwrap()
    }
}
