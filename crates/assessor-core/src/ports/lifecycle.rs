//! Lifecycle port - ホスト側の完了状態の同期点

use async_trait::async_trait;

/// Lifecycle はホストの進行状態と同期点を提供
///
/// # 同期点
/// item を一括 reset した後、ホストは完了状態を非同期に再計算します。
/// `completion_settled()` はそれが落ち着くまで待ちます（reset 一回につき一度だけ）。
#[async_trait]
pub trait Lifecycle: Send + Sync {
    /// コースが開始済みか（開始前は保存しない）
    fn is_started(&self) -> bool;

    /// 完了状態の再計算が終わるまで待つ
    async fn completion_settled(&self);
}
