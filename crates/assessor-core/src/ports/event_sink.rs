//! EventSink port - イベント通知の抽象化
//!
//! # 実装
//! - NoopEventSink: 何もしない
//! - TracingEventSink: tracing に記録
//! - ChannelEventSink: tokio mpsc に送る
//! - RecordingEventSink: メモリに溜める（テスト用）

use crate::domain::AssessmentEvent;

/// EventSink はドメインイベントを受け取る
///
/// コア側はイベントを「報告」するだけで、配送の成否に依存しません。
pub trait EventSink: Send + Sync {
    fn emit(&self, event: AssessmentEvent);
}
