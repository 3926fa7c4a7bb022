//! App - アプリケーション層
//!
//! このモジュールは、ports を組み合わせてアプリケーションロジックを実装します。
//!
//! # 主要コンポーネント
//! - **AssessmentBuilder**: ports のワイヤリングと起動時検証
//! - **AssessmentSet**: 試行・採点・reset の状態機械
//! - **compat**: 旧来の consumer 向けの射影

pub mod assessment_set;
pub mod builder;
pub mod compat;

// 主要な型を再エクスポート
pub use self::assessment_set::{AssessmentSet, SAVE_STATE_NAMESPACE, SaveState};
pub use self::builder::{AssessmentBuilder, BuildError};
