//! 保存・復元と旧来形式ビューの統合テスト

mod common;

use std::sync::Arc;

use serde_json::json;

use assessor_core::app::SAVE_STATE_NAMESPACE;
use assessor_core::domain::{AssessmentEventKind, AttemptLimit, ItemId};
use assessor_core::impls::InMemoryStateStore;
use assessor_core::ports::StateStore;
use common::{CONTAINER, Harness, PAGE, config, items};

fn stored(store: &InMemoryStateStore) -> Option<String> {
    store.get(SAVE_STATE_NAMESPACE, CONTAINER).unwrap()
}

#[tokio::test]
async fn completion_persists_ledger_and_active_attempt() {
    let mut h = Harness::new(config(json!({ "_attempts": { "_limit": 2 } })), items(5, 0));
    h.take_attempt(4).await;

    let attempt = "[4.0,4.0,0.0,5.0,true,true]";
    assert_eq!(
        stored(&h.store).unwrap(),
        format!("[[[1],[{attempt}],[{attempt}]],{attempt}]")
    );
}

#[tokio::test]
async fn restore_reproduces_saved_state() {
    let store = Arc::new(InMemoryStateStore::new());
    let cfg = config(json!({ "_attempts": { "_limit": 3, "_shouldStoreAttempts": true } }));

    let mut first = Harness::with_store(cfg.clone(), items(4, 1), store.clone(), false);
    first.take_attempt(1).await;
    first.leave().await;
    assert!(first.set.reset().await.unwrap());
    first.take_attempt(3).await;
    assert_eq!(first.set.attempts().history().len(), 2);

    let mut second = Harness::with_store(cfg, items(4, 1), store.clone(), false);
    second.set.restore().unwrap();
    assert_eq!(second.set.save_state(), first.set.save_state());
    assert_eq!(second.events.kinds(), vec![AssessmentEventKind::Restored]);

    second.set.restore().unwrap();
    let ledger = second.set.attempts();
    assert_eq!(ledger.used(), first.set.attempts().used());
    assert_eq!(ledger.history().len(), first.set.attempts().history().len());
    assert_eq!(
        ledger.best().map(|best| best.score()),
        first.set.attempts().best().map(|best| best.score())
    );
    assert_eq!(second.set.save_state(), first.set.save_state());
}

#[tokio::test]
async fn restore_after_reset_round_trips() {
    let store = Arc::new(InMemoryStateStore::new());
    let cfg = config(json!({
        "_attempts": { "_limit": 3 },
        "_reset": { "_questionsType": "soft" }
    }));

    let mut first = Harness::with_store(cfg.clone(), items(2, 0), store.clone(), false);
    first.take_attempt(0).await;
    first.leave().await;
    assert!(first.set.reset().await.unwrap());
    let saved = stored(&store).unwrap();

    let mut second = Harness::with_store(cfg, items(2, 0), store.clone(), false);
    second.set.restore_from(&saved);
    assert_eq!(serde_json::to_string(&second.set.save_state()).unwrap(), saved);
    assert_eq!(second.set.attempts().used(), 1);
    assert!(!second.set.attempt().is_complete());
}

#[tokio::test]
async fn fractional_scores_survive_a_restore() {
    let store = Arc::new(InMemoryStateStore::new());
    let cfg = config(json!({ "_attempts": { "_limit": 2 } }));

    let mut first = Harness::with_store(cfg.clone(), items(3, 0), store.clone(), false);
    for (id, max_score) in [("q-00", 207.02392338633334), ("q-01", 0.1), ("q-02", 0.2)] {
        first.course.set_score_range(&ItemId::from(id), 0.0, max_score);
    }
    first.take_attempt(3).await;
    let saved = stored(&store).unwrap();

    let mut second = Harness::with_store(cfg, items(3, 0), store.clone(), false);
    second.set.restore_from(&saved);
    assert_eq!(serde_json::to_string(&second.set.save_state()).unwrap(), saved);
    second.set.restore_from(&saved);
    assert_eq!(serde_json::to_string(&second.set.save_state()).unwrap(), saved);
    assert_eq!(
        second.set.attempts().best().map(|best| best.score()),
        first.set.attempts().best().map(|best| best.score())
    );
}

#[tokio::test]
async fn stored_fractions_are_written_back_unchanged() {
    let attempt = "[207.02392338633334,0.30000000000000004,0.0,208.5,true,true]";
    let saved = format!("[[[1],[{attempt}],[{attempt}]],{attempt}]");

    let mut h = Harness::new(config(json!({ "_attempts": { "_limit": 2 } })), items(3, 0));
    h.set.restore_from(&saved);

    assert_eq!(serde_json::to_string(&h.set.save_state()).unwrap(), saved);
    assert_eq!(h.set.attempts().best().map(|best| best.score()), Some(207.02392338633334));
}

#[tokio::test]
async fn corrupt_state_is_ignored() {
    let store = Arc::new(InMemoryStateStore::new());
    store
        .set(SAVE_STATE_NAMESPACE, CONTAINER, "not json".to_string())
        .unwrap();

    let mut h = Harness::with_store(config(json!({})), items(2, 0), store, false);
    h.set.restore().unwrap();

    assert_eq!(h.set.attempts().used(), 0);
    assert!(h.set.attempts().history().is_empty());
    assert!(!h.set.attempt().is_complete());
}

#[tokio::test]
async fn partial_state_falls_back_to_history() {
    let store = Arc::new(InMemoryStateStore::new());
    let partial = json!([[[2], [], [[1, 1, 0, 2, true, false], "junk"]], null]);
    store
        .set(SAVE_STATE_NAMESPACE, CONTAINER, partial.to_string())
        .unwrap();

    let mut h = Harness::with_store(
        config(json!({ "_attempts": { "_limit": 3 }, "_reset": { "_questionsType": "soft" } })),
        items(2, 0),
        store,
        false,
    );
    h.set.restore().unwrap();

    let ledger = h.set.attempts();
    assert_eq!(ledger.used(), 2);
    assert!(ledger.best().is_none());
    assert_eq!(ledger.history().len(), 1);
    assert!(ledger.was_complete());
    assert!(!ledger.was_passed());
    assert!(!h.set.attempt().is_in_progress());

    assert!(h.set.is_complete());
    assert!(!h.set.is_passed());
    assert_eq!(h.set.score(), 1.0);
}

#[tokio::test]
async fn update_waits_for_the_course_to_start() {
    let mut h = Harness::new(config(json!({})), items(2, 0));
    h.course.set_started(false);

    h.set.update().unwrap();
    assert_eq!(stored(&h.store), None);

    h.course.set_started(true);
    h.set.update().unwrap();
    assert!(stored(&h.store).is_some());
}

#[tokio::test]
async fn events_carry_the_legacy_record_when_asked() {
    let mut h = Harness::with_store(
        config(json!({ "_attempts": { "_limit": 2 }, "_isScoreIncluded": true })),
        items(2, 0),
        Arc::new(InMemoryStateStore::new()),
        true,
    );
    h.take_attempt(1).await;

    let event = h.events.events().remove(0);
    assert_eq!(event.kind, AssessmentEventKind::Completed);
    let compat = event.compat.unwrap();

    assert_eq!(compat.kind, "article-assessment");
    assert_eq!(compat.page_id.as_ref().map(|id| id.as_str()), Some(PAGE));
    assert_eq!(compat.article_id.as_str(), CONTAINER);
    assert_eq!(compat.question_count, 2);
    assert_eq!(compat.score, 1.0);
    assert_eq!(compat.score_as_percent, 50.0);
    assert_eq!(compat.correct_count, 1.0);
    assert!(!compat.is_pass);
    assert!(compat.include_in_total_score);
    assert_eq!(compat.attempts, AttemptLimit::Finite(2));
    assert_eq!(compat.attempts_spent, 1);
    assert_eq!(compat.attempts_left, AttemptLimit::Finite(1));
    assert_eq!(compat.last_attempt_score_as_percent, Some(50.0));
    assert_eq!(compat.reset_type, "hard");
    assert!(compat.questions[0].is_correct);
    assert!(!compat.questions[1].is_correct);

    let value = serde_json::to_value(&compat).unwrap();
    assert_eq!(value["type"], "article-assessment");
    assert_eq!(value["attemptsLeft"], 1);
    assert_eq!(value["questions"][0]["_isCorrect"], true);
}

#[tokio::test]
async fn infinite_attempts_project_as_infinite() {
    let mut h = Harness::with_store(
        config(json!({ "_attempts": { "_limit": 0 } })),
        items(1, 0),
        Arc::new(InMemoryStateStore::new()),
        true,
    );
    h.take_attempt(1).await;

    let compat = h.events.events().remove(0).compat.unwrap();
    let value = serde_json::to_value(&compat).unwrap();
    assert_eq!(value["attempts"], "infinite");
    assert_eq!(value["attemptsLeft"], "infinite");
}
