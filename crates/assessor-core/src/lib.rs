//! assessor-core
//!
//! Attempt, scoring and reset state machine for scored assessments embedded in
//! page-structured learning content.
//!
//! # モジュール構成
//! - **domain**: ドメインモデル（ids, passmark, reset, attempt, attempts, config, status, events, errors）
//! - **ports**: 抽象化レイヤー（ItemCollection, ScoreAggregator, Navigator, Lifecycle, StateStore, EventSink, Clock, IdGenerator）
//! - **app**: アプリケーションロジック（AssessmentBuilder, AssessmentSet, compat）
//! - **impls**: 実装（InMemoryCourse など開発用）
//! - **error**: AssessmentSet の操作エラー

pub mod app;
pub mod domain;
pub mod error;
pub mod impls;
pub mod ports;

pub use app::{AssessmentBuilder, AssessmentSet, BuildError};
pub use domain::{AssessmentConfig, AssessmentEvent, AssessmentEventKind, AssessmentStatus};
pub use error::AssessmentError;
