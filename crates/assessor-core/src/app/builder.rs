//! AssessmentBuilder - AssessmentSet の構築とワイヤリング
//!
//! # Fail-fast 設計
//! - 必須の port（items / scoring / navigator / lifecycle / store）が揃っているか
//! - 設定が有効（`_isEnabled`）で `_id` を持つか
//!
//! を build() 時にまとめてチェックし、不足があれば BuildError を返します。

use std::sync::Arc;

use tracing::debug;

use super::assessment_set::{AssessmentSet, Ports};
use crate::domain::{AssessmentConfig, AssessmentId, ItemId};
use crate::impls::TracingEventSink;
use crate::ports::{
    Clock, EventSink, IdGenerator, ItemCollection, Lifecycle, Navigator, ScoreAggregator,
    StateStore, SystemClock, UlidGenerator,
};

/// AssessmentBuilder は AssessmentSet を構築
///
/// # 使用例
/// ```ignore
/// let set = AssessmentBuilder::new(config)
///     .container("a-05")
///     .host(course.clone())
///     .store(store.clone())
///     .build()?;
/// ```
///
/// 省略可能な port のデフォルト:
/// - events: TracingEventSink
/// - clock: SystemClock
/// - ids: clock を使う UlidGenerator
pub struct AssessmentBuilder {
    config: AssessmentConfig,
    container_id: Option<ItemId>,
    is_backward_compatible: bool,
    items: Option<Arc<dyn ItemCollection>>,
    scoring: Option<Arc<dyn ScoreAggregator>>,
    navigator: Option<Arc<dyn Navigator>>,
    lifecycle: Option<Arc<dyn Lifecycle>>,
    store: Option<Arc<dyn StateStore>>,
    events: Option<Arc<dyn EventSink>>,
    clock: Option<Arc<dyn Clock>>,
    ids: Option<Arc<dyn IdGenerator>>,
}

/// BuildError は構築時のエラー
#[derive(Debug, thiserror::Error)]
pub enum BuildError {
    #[error("assessment '{0}' is not enabled")]
    Disabled(AssessmentId),

    #[error("assessment configuration has no _id")]
    MissingId,

    #[error("Missing ports: {0:?}. These ports must be wired before build().")]
    MissingPorts(Vec<&'static str>),
}

impl AssessmentBuilder {
    /// 新しい AssessmentBuilder を作成
    pub fn new(config: AssessmentConfig) -> Self {
        Self {
            config,
            container_id: None,
            is_backward_compatible: false,
            items: None,
            scoring: None,
            navigator: None,
            lifecycle: None,
            store: None,
            events: None,
            clock: None,
            ids: None,
        }
    }

    /// 設定を持つホストモデルの ID（省略時は assessment の `_id`）
    pub fn container(mut self, id: impl Into<ItemId>) -> Self {
        self.container_id = Some(id.into());
        self
    }

    /// イベントに旧来形式のレコードを添付する
    pub fn backward_compatible(mut self, is_backward_compatible: bool) -> Self {
        self.is_backward_compatible = is_backward_compatible;
        self
    }

    /// 一つのホストが items / scoring / navigator / lifecycle をまとめて実装する場合
    pub fn host<H>(self, host: Arc<H>) -> Self
    where
        H: ItemCollection + ScoreAggregator + Navigator + Lifecycle + 'static,
    {
        self.items(host.clone())
            .scoring(host.clone())
            .navigator(host.clone())
            .lifecycle(host)
    }

    pub fn items(mut self, items: Arc<dyn ItemCollection>) -> Self {
        self.items = Some(items);
        self
    }

    pub fn scoring(mut self, scoring: Arc<dyn ScoreAggregator>) -> Self {
        self.scoring = Some(scoring);
        self
    }

    pub fn navigator(mut self, navigator: Arc<dyn Navigator>) -> Self {
        self.navigator = Some(navigator);
        self
    }

    pub fn lifecycle(mut self, lifecycle: Arc<dyn Lifecycle>) -> Self {
        self.lifecycle = Some(lifecycle);
        self
    }

    pub fn store(mut self, store: Arc<dyn StateStore>) -> Self {
        self.store = Some(store);
        self
    }

    pub fn events(mut self, events: Arc<dyn EventSink>) -> Self {
        self.events = Some(events);
        self
    }

    pub fn clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = Some(clock);
        self
    }

    pub fn ids(mut self, ids: Arc<dyn IdGenerator>) -> Self {
        self.ids = Some(ids);
        self
    }

    /// AssessmentSet を構築
    ///
    /// 構築直後に質問へ表示設定を適用します。
    pub fn build(self) -> Result<AssessmentSet, BuildError> {
        if self.config.id.as_str().is_empty() {
            return Err(BuildError::MissingId);
        }
        if !self.config.is_enabled {
            return Err(BuildError::Disabled(self.config.id));
        }

        let missing_ports: Vec<&'static str> = [
            ("items", self.items.is_none()),
            ("scoring", self.scoring.is_none()),
            ("navigator", self.navigator.is_none()),
            ("lifecycle", self.lifecycle.is_none()),
            ("store", self.store.is_none()),
        ]
        .into_iter()
        .filter(|(_, is_missing)| *is_missing)
        .map(|(name, _)| name)
        .collect();

        let (Some(items), Some(scoring), Some(navigator), Some(lifecycle), Some(store)) = (
            self.items,
            self.scoring,
            self.navigator,
            self.lifecycle,
            self.store,
        ) else {
            return Err(BuildError::MissingPorts(missing_ports));
        };

        let clock = self
            .clock
            .unwrap_or_else(|| Arc::new(SystemClock) as Arc<dyn Clock>);
        let ids = self
            .ids
            .unwrap_or_else(|| Arc::new(UlidGenerator::new(Arc::clone(&clock))) as Arc<dyn IdGenerator>);
        let events = self
            .events
            .unwrap_or_else(|| Arc::new(TracingEventSink) as Arc<dyn EventSink>);
        let container_id = self
            .container_id
            .unwrap_or_else(|| ItemId::new(self.config.id.as_str()));

        debug!(assessment_id = %self.config.id, container = %container_id, "building assessment");

        let set = AssessmentSet::new(
            self.config,
            container_id,
            self.is_backward_compatible,
            Ports {
                items,
                scoring,
                navigator,
                lifecycle,
                store,
                events,
                clock,
                ids,
            },
        );
        set.apply_question_presentation();
        Ok(set)
    }
}
