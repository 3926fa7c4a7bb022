//! StateStore port - オフラインストレージ
//!
//! namespace ごとの key-value。AssessmentSet は namespace `"sas"` の下に
//! assessment id をキーとしてシリアライズ済みの状態を保存します。
//! 書き込みは単一ライター（ホストが保証）なので、ここでは調停しません。

/// StateStore の操作エラー
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("store unavailable: {0}")]
    Unavailable(String),

    #[error("serialization failed: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// StateStore は永続化先
pub trait StateStore: Send + Sync {
    fn get(&self, namespace: &str, key: &str) -> Result<Option<String>, StoreError>;

    fn set(&self, namespace: &str, key: &str, value: String) -> Result<(), StoreError>;
}
