//! Ports - 抽象化レイヤー
//!
//! このモジュールは Hexagonal Architecture の「ポート」を定義します。
//! 各 trait はホスト（コンテンツ描画側）への
//! インターフェースを提供し、実装の詳細を隠蔽します。
//!
//! # 設計原則
//! - item の描画・完了伝播・採点はホストの責務
//! - コアはホストから読み、ホストに依頼するだけ
//! - 永続化は形（シリアライズ形式）だけを決め、保存先は差し替え可能

pub mod clock;
pub mod event_sink;
pub mod id_generator;
pub mod items;
pub mod lifecycle;
pub mod navigation;
pub mod scoring;
pub mod state_store;

// 主要な trait を再エクスポート
pub use self::clock::{Clock, FixedClock, SystemClock};
pub use self::event_sink::EventSink;
pub use self::id_generator::{IdGenerator, SequentialIdGenerator, UlidGenerator};
pub use self::items::ItemCollection;
pub use self::lifecycle::Lifecycle;
pub use self::navigation::Navigator;
pub use self::scoring::ScoreAggregator;
pub use self::state_store::{StateStore, StoreError};
