//! EventSink の実装
//!
//! - NoopEventSink: 捨てる
//! - TracingEventSink: tracing に記録（AssessmentBuilder のデフォルト）
//! - ChannelEventSink: tokio の unbounded mpsc に送る
//! - RecordingEventSink: メモリに溜める（テスト・CLI 用）

use std::sync::{Mutex, PoisonError};

use tokio::sync::mpsc::UnboundedSender;
use tracing::{debug, info};

use crate::domain::{AssessmentEvent, AssessmentEventKind};
use crate::ports::EventSink;

/// 何もしない EventSink
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopEventSink;

impl EventSink for NoopEventSink {
    fn emit(&self, _event: AssessmentEvent) {}
}

/// tracing にイベントを書き出す EventSink
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingEventSink;

impl EventSink for TracingEventSink {
    fn emit(&self, event: AssessmentEvent) {
        info!(
            assessment_id = %event.assessment_id,
            kind = ?event.kind,
            is_complete = event.status.is_complete,
            is_passed = event.status.is_passed,
            score = event.status.score,
            attempts_used = event.status.attempts_used,
            "assessment event"
        );
    }
}

/// tokio mpsc にイベントを送る EventSink
///
/// 受信側が閉じていてもエラーにはしません（debug ログのみ）。
#[derive(Debug, Clone)]
pub struct ChannelEventSink {
    tx: UnboundedSender<AssessmentEvent>,
}

impl ChannelEventSink {
    pub fn new(tx: UnboundedSender<AssessmentEvent>) -> Self {
        Self { tx }
    }
}

impl EventSink for ChannelEventSink {
    fn emit(&self, event: AssessmentEvent) {
        if let Err(err) = self.tx.send(event) {
            debug!(kind = ?err.0.kind, "event receiver dropped");
        }
    }
}

/// 受け取ったイベントを順に保持する EventSink
#[derive(Debug, Default)]
pub struct RecordingEventSink {
    events: Mutex<Vec<AssessmentEvent>>,
}

impl RecordingEventSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn events(&self) -> Vec<AssessmentEvent> {
        self.events
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    pub fn kinds(&self) -> Vec<AssessmentEventKind> {
        self.events().into_iter().map(|event| event.kind).collect()
    }

    /// 溜まったイベントを取り出して空にする
    pub fn take(&self) -> Vec<AssessmentEvent> {
        std::mem::take(&mut *self.events.lock().unwrap_or_else(PoisonError::into_inner))
    }
}

impl EventSink for RecordingEventSink {
    fn emit(&self, event: AssessmentEvent) {
        self.events
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(event);
    }
}
