//! IdGenerator port - Attempt ID の採番
//!
//! # 実装
//! - **UlidGenerator**: Clock の時刻 + 乱数の ULID（本番用）
//! - **SequentialIdGenerator**: 連番の ULID（テスト用、決定的）

use std::sync::atomic::{AtomicU64, Ordering};

use ulid::Ulid;

use crate::domain::ids::AttemptId;
use crate::ports::Clock;

/// IdGenerator は Attempt ID を生成
///
/// attempt は開始・reset・復元のたびに新しい ID を受け取ります。
/// ID は保存されないので、復元のたびに採番し直されます。
pub trait IdGenerator: Send + Sync {
    fn generate_attempt_id(&self) -> AttemptId;
}

/// UlidGenerator は ULID ベースの ID 生成器
///
/// timestamp 部分は Clock から取るので、FixedClock を渡せば時刻だけは固定できます。
pub struct UlidGenerator<C> {
    clock: C,
}

impl<C: Clock> UlidGenerator<C> {
    pub fn new(clock: C) -> Self {
        Self { clock }
    }
}

impl<C: Clock> IdGenerator for UlidGenerator<C> {
    fn generate_attempt_id(&self) -> AttemptId {
        let timestamp_ms = self.clock.now().timestamp_millis() as u64;
        AttemptId::from(Ulid::from_parts(timestamp_ms, rand::random()))
    }
}

/// SequentialIdGenerator は 1, 2, 3, ... を random 部分に入れる
#[derive(Debug, Default)]
pub struct SequentialIdGenerator {
    next: AtomicU64,
}

impl SequentialIdGenerator {
    pub fn new() -> Self {
        Self::default()
    }

    /// これまでに採番した数
    pub fn issued(&self) -> u64 {
        self.next.load(Ordering::SeqCst)
    }
}

impl IdGenerator for SequentialIdGenerator {
    fn generate_attempt_id(&self) -> AttemptId {
        let n = self.next.fetch_add(1, Ordering::SeqCst) + 1;
        AttemptId::from(Ulid::from_parts(0, u128::from(n)))
    }
}
