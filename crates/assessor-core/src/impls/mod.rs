//! Impls - 実装（開発用・テスト用）
//!
//! このモジュールには ports の実装を含めます。
//!
//! # 含まれる実装
//! - **InMemoryCourse**: 1 ページ・1 アセスメントのホスト（ItemCollection / ScoreAggregator / Navigator / Lifecycle）
//! - **InMemoryStateStore**: プロセス内の StateStore
//! - **EventSink**: Noop / Tracing / Channel / Recording
//!
//! # 本番用実装
//! 実際のホスト（コンテンツ描画側）や offline storage への接続は
//! 利用側のクレートで ports を実装してください。

pub mod event_sinks;
pub mod memory_course;
pub mod memory_store;

// 主要な型を再エクスポート
pub use self::event_sinks::{ChannelEventSink, NoopEventSink, RecordingEventSink, TracingEventSink};
pub use self::memory_course::InMemoryCourse;
pub use self::memory_store::InMemoryStateStore;
