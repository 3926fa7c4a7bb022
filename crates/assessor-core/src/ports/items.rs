//! ItemCollection port - ホストが所有する item 集合
//!
//! AssessmentSet は item を所有しません。呼び出しごとに状態を読み、
//! reset や表示設定の変更はホストに依頼します。

use crate::domain::{ItemId, ItemState, QuestionPresentation, ResetType};

/// ItemCollection はアセスメント配下の trackable な item へのアクセス
///
/// # 設計原則
/// - `items()` は trackable な member のみを返す（質問 + presentation component）
/// - 戻り値はその時点のスナップショット（キャッシュしない）
/// - trackable でない item には一切触れない
pub trait ItemCollection: Send + Sync {
    /// trackable な item の現在の状態
    fn items(&self) -> Vec<ItemState>;

    /// item を指定の粒度で reset
    fn reset_item(&self, id: &ItemId, reset_type: ResetType);

    /// 質問に表示設定（feedback / marking / model answer）を適用
    fn present_question(&self, id: &ItemId, presentation: QuestionPresentation);

    /// 質問の表示を再描画させる
    fn refresh_question(&self, id: &ItemId);

    /// 子 item がまだ揃っていない（必要完了数が「無限」の番兵値）
    fn is_awaiting_children(&self) -> bool;

    /// 分岐やロックにより現在到達可能か
    fn is_available(&self) -> bool;
}
