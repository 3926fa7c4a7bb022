//! Compat - 旧来の consumer 向けの読み取り専用ビュー
//!
//! ホストのモデルにメソッドを差し込む代わりに、AssessmentSet から
//! バージョン付きのレコードを射影する純粋関数を提供します。

use crate::domain::{
    AttemptLimit, COMPATIBILITY_VERSION, CompatibilityQuestion, CompatibilityState,
};

use super::AssessmentSet;

/// `article-assessment` 形式のレコードを射影
pub fn project(set: &AssessmentSet) -> CompatibilityState {
    let config = set.config();
    let passmark = set.passmark();
    let attempts = set.attempts();
    let questions = set
        .questions()
        .into_iter()
        .map(|question| CompatibilityQuestion {
            id: question.id,
            is_correct: question.is_correct,
        })
        .collect();

    CompatibilityState {
        version: COMPATIBILITY_VERSION,
        id: set.id().clone(),
        kind: "article-assessment".to_string(),
        page_id: set.page_id(),
        article_id: set.container_id().clone(),
        is_enabled: config.is_enabled,
        is_complete: set.is_complete(),
        is_percentage_based: passmark.is_scaled,
        score_to_pass: passmark.score,
        score: set.score(),
        score_as_percent: set.scaled_score(),
        min_score: set.min_score(),
        max_score: set.max_score(),
        correct_count: set.correctness(),
        correct_as_percent: set.scaled_correctness(),
        correct_to_pass: passmark.correctness,
        question_count: set.items().len(),
        is_pass: set.is_passed(),
        include_in_total_score: config.is_score_included,
        assessment_weight: 1,
        attempts: attempts.limit(),
        attempts_spent: attempts.used(),
        attempts_left: attempts
            .remaining()
            .map_or(AttemptLimit::Infinite, AttemptLimit::Finite),
        attempt_in_progress: set.attempt().is_in_progress(),
        last_attempt_score_as_percent: attempts.last().map(|attempt| attempt.snapshot().scaled_score()),
        questions,
        reset_type: if set.is_soft_reset() { "soft" } else { "hard" }.to_string(),
        allow_reset_if_passed: config.reset.passed.can_reset,
        is_reset_on_revisit: set.should_reset_on_revisit(),
        can_reset_in_page: set.can_reset() && set.can_reload(),
    }
}
