//! ScoreAggregator port - 異種 item をまたぐ採点集計
//!
//! 集計そのもの（item ごとの score / correctness の合算）はホスト側の
//! scoring set が担当します。ここではその結果だけを受け取ります。

use crate::domain::ScoreSnapshot;

/// ScoreAggregator は現在の item 集合に対する live な集計値を返す
pub trait ScoreAggregator: Send + Sync {
    fn live_score(&self) -> ScoreSnapshot;
}
