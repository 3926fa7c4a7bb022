//! Errors - 契約違反の分類
//!
//! Attempt のライフサイクルは呼び出し側（AssessmentSet）が守るべき契約です。
//! ここで定義するエラーは「回復すべきもの」ではなく、
//! オーケストレーションのバグを大きな声で知らせるためのものです。

use super::ids::AttemptId;

/// AttemptError は Attempt の契約違反
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AttemptError {
    #[error("{0} has already been started")]
    AlreadyStarted(AttemptId),

    #[error("{0} is not in progress")]
    NotInProgress(AttemptId),
}
