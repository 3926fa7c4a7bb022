//! Events - アセスメントのライフサイクルイベント
//!
//! EventSink に送られる通知。プロセス全体のイベントバスには依存せず、
//! AssessmentSet が自分の EventSink に publish するだけです。

use serde::{Deserialize, Serialize};

use super::ids::AssessmentId;
use super::status::{AssessmentStatus, CompatibilityState};

/// イベント種類
///
/// reset は三段階（PreReset → Reset → PostReset）で、この順序は保証されます。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AssessmentEventKind {
    /// 永続化された状態から復元した
    Restored,
    /// item を reset する直前
    PreReset,
    /// ledger と attempt の差し替え、完了状態の再計算が終わった
    Reset,
    /// ナビゲーション（reload）まで終わった
    PostReset,
    /// item collection が完了した
    Completed,
}

/// AssessmentEvent はドメインで発生したイベント
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AssessmentEvent {
    pub kind: AssessmentEventKind,
    pub assessment_id: AssessmentId,
    pub status: AssessmentStatus,

    /// backward_compatible で構築した場合のみ
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub compat: Option<CompatibilityState>,
}
