//! Navigator port - ルーティングと現在位置

use crate::domain::ItemId;

/// Navigator はホストのルーターへのアクセス
pub trait Navigator: Send + Sync {
    /// 現在表示中のモデル ID
    fn current_location(&self) -> Option<ItemId>;

    /// `model` を含むページの ID
    fn page_of(&self, model: &ItemId) -> Option<ItemId>;

    /// `model` が `items` のいずれかと階層的に交差するか（祖先・子孫・同一）
    fn intersects(&self, model: &ItemId, items: &[ItemId]) -> bool;

    /// `target` へ履歴を置き換えて再遷移
    fn reload(&self, target: &ItemId);
}
