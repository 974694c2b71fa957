// tests/store_tests.rs
//
// Store-level tests exercise the in-memory maps directly, without HTTP.

use std::collections::HashSet;
use std::sync::Arc;

use chrono::NaiveDate;

use prepwise_backend::domain::{NewQuestion, CATEGORIES, DIFFICULTIES, ROLES};
use prepwise_backend::evaluator::{Evaluation, HeuristicEvaluator, ResponseEvaluator};
use prepwise_backend::interview::{InterviewScript, InterviewSession, InterviewSetupError};
use prepwise_backend::protocol::{
    NewResponseIn, NewSessionIn, NewUserIn, ProgressUpdate, SessionPatch,
};
use prepwise_backend::state::AppState;
use prepwise_backend::store::{current_streak, Store};

fn new_session_in(role: &str, category: &str) -> NewSessionIn {
    NewSessionIn {
        role: role.to_string(),
        category: category.to_string(),
        duration: 30,
        total_questions: 5,
        questions_completed: 0,
        is_active: true,
    }
}

#[tokio::test]
async fn seeded_bank_uses_insertion_order_ids() {
    let store = Store::seeded(vec![]);

    let all = store.questions(None, None).await;
    assert_eq!(all.len(), 5);
    let ids: Vec<i64> = all.iter().map(|q| q.id).collect();
    assert_eq!(ids, vec![1, 2, 3, 4, 5]);
}

#[tokio::test]
async fn seeded_bank_respects_the_closed_attribute_sets() {
    let store = Store::seeded(vec![]);

    for q in store.questions(None, None).await {
        assert!(ROLES.contains(&q.role.as_str()), "unexpected role {}", q.role);
        assert!(
            CATEGORIES.contains(&q.category.as_str()),
            "unexpected category {}",
            q.category
        );
        assert!(
            DIFFICULTIES.contains(&q.difficulty.as_str()),
            "unexpected difficulty {}",
            q.difficulty
        );
    }
}

#[tokio::test]
async fn question_filters_match_exactly() {
    let store = Store::seeded(vec![]);

    let filtered = store
        .questions(Some("software-developer"), Some("collaboration"))
        .await;
    assert!(!filtered.is_empty());
    assert!(filtered
        .iter()
        .all(|q| q.role == "software-developer" && q.category == "collaboration"));

    // A single filter matches across the other attribute.
    let by_role = store.questions(Some("software-developer"), None).await;
    assert_eq!(by_role.len(), 3);

    // Unknown values match nothing.
    assert!(store.questions(Some("astronaut"), None).await.is_empty());
}

#[tokio::test]
async fn random_questions_are_a_distinct_subset() {
    let store = Store::seeded(vec![]);

    // More than available: best effort, the whole filtered set comes back.
    let sample = store
        .random_questions("software-developer", "collaboration", 100)
        .await;
    assert_eq!(sample.len(), 2);

    let ids: HashSet<i64> = sample.iter().map(|q| q.id).collect();
    assert_eq!(ids.len(), sample.len());
    assert!(sample
        .iter()
        .all(|q| q.role == "software-developer" && q.category == "collaboration"));

    // Truncation applies when the pool is bigger than the limit.
    let one = store
        .random_questions("software-developer", "collaboration", 1)
        .await;
    assert_eq!(one.len(), 1);

    // Empty pool is not an error.
    assert!(store.random_questions("astronaut", "navigation", 3).await.is_empty());
}

#[tokio::test]
async fn created_questions_extend_the_bank() {
    let store = Store::seeded(vec![]);

    let created = store
        .create_question(NewQuestion {
            title: "Estimating Under Pressure".into(),
            description: "A stakeholder asks for a same-day estimate on a feature you barely know.".into(),
            category: "problem-solving".into(),
            role: "principal".into(),
            difficulty: "senior".into(),
            sample_answer: String::new(),
            tips: vec![],
            keywords: vec![],
        })
        .await;

    assert_eq!(created.id, 6);
    let listed = store.questions(Some("principal"), None).await;
    assert_eq!(listed.len(), 1);
    assert_eq!(listed[0].title, "Estimating Under Pressure");
}

#[tokio::test]
async fn users_can_be_looked_up_by_username() {
    let store = Store::seeded(vec![]);

    let seeded = store.user_by_username("alexchen").await.unwrap();
    assert_eq!(seeded.id, 1);

    let created = store
        .create_user(NewUserIn {
            username: "jordan".into(),
            password: "password".into(),
            name: "Jordan Ruiz".into(),
            email: "jordan@example.com".into(),
            current_role: "tech-lead".into(),
        })
        .await;
    assert_eq!(created.id, 2);
    assert_eq!(store.user_by_username("jordan").await.unwrap().id, 2);
    assert!(store.user_by_username("nobody").await.is_none());
}

#[tokio::test]
async fn session_patch_merges_and_preserves_unset_fields() {
    let store = Store::seeded(vec![]);

    let session = store
        .create_session(1, new_session_in("software-developer", "communication"))
        .await;
    assert!(session.is_active);
    assert!(session.completed_at.is_none());

    let patched = store
        .update_session(
            session.id,
            SessionPatch {
                is_active: Some(false),
                completed_at: Some(chrono::Utc::now()),
                questions_completed: Some(4),
                ..Default::default()
            },
        )
        .await
        .unwrap();

    assert!(!patched.is_active);
    assert!(patched.completed_at.is_some());
    assert_eq!(patched.questions_completed, 4);
    // Untouched fields survive the merge.
    assert_eq!(patched.role, "software-developer");
    assert_eq!(patched.category, "communication");
    assert_eq!(patched.duration, 30);

    assert!(store.update_session(999, SessionPatch::default()).await.is_none());
}

#[tokio::test]
async fn progress_upsert_collapses_to_one_row_per_key() {
    let store = Store::seeded(vec![]);

    let first = store
        .update_user_progress(
            1,
            "tech-lead",
            "leadership",
            ProgressUpdate {
                questions_completed: Some(3),
                ..Default::default()
            },
        )
        .await;
    assert_eq!(first.questions_completed, 3);
    assert_eq!(first.total_practice_time, 0);

    let second = store
        .update_user_progress(
            1,
            "tech-lead",
            "leadership",
            ProgressUpdate {
                questions_completed: Some(5),
                total_practice_time: Some(45),
                ..Default::default()
            },
        )
        .await;
    assert_eq!(second.id, first.id);
    assert_eq!(second.questions_completed, 5);
    assert_eq!(second.total_practice_time, 45);

    let rows = store.user_progress(1).await;
    assert_eq!(rows.len(), 1);

    // A different category is a different row.
    store
        .update_user_progress(1, "tech-lead", "communication", ProgressUpdate::default())
        .await;
    assert_eq!(store.user_progress(1).await.len(), 2);
}

#[tokio::test]
async fn stats_scan_responses_and_progress() {
    let store = Store::seeded(vec![]);

    let session = store
        .create_session(1, new_session_in("software-developer", "communication"))
        .await;
    store
        .create_response(NewResponseIn {
            session_id: session.id,
            question_id: 1,
            response: "Lead with the business impact.".into(),
            time_spent: 90,
            is_flagged: false,
        })
        .await;

    store
        .update_user_progress(
            1,
            "software-developer",
            "communication",
            ProgressUpdate {
                questions_completed: Some(1),
                total_practice_time: Some(130),
                ..Default::default()
            },
        )
        .await;

    let stats = store.user_stats(1).await;
    assert_eq!(stats.questions_completed, 1);
    assert_eq!(stats.practice_hours, 2);
    assert_eq!(stats.skills_improved, 1);
    assert_eq!(stats.current_streak, 1);

    // Another user's stats stay untouched.
    let other = store.user_stats(2).await;
    assert_eq!(other.questions_completed, 0);
    assert_eq!(other.current_streak, 0);
}

#[test]
fn streak_counts_consecutive_days_back_from_today() {
    let d = |y, m, day| NaiveDate::from_ymd_opt(y, m, day).unwrap();
    let today = d(2026, 8, 4);

    assert_eq!(current_streak(&HashSet::new(), today), 0);

    let just_today: HashSet<NaiveDate> = [today].into_iter().collect();
    assert_eq!(current_streak(&just_today, today), 1);

    // Practiced yesterday but not yet today still counts as an open streak.
    let yesterday: HashSet<NaiveDate> = [d(2026, 8, 3)].into_iter().collect();
    assert_eq!(current_streak(&yesterday, today), 1);

    let three: HashSet<NaiveDate> = [d(2026, 8, 4), d(2026, 8, 3), d(2026, 8, 2)]
        .into_iter()
        .collect();
    assert_eq!(current_streak(&three, today), 3);

    // A gap breaks the chain.
    let gapped: HashSet<NaiveDate> = [d(2026, 8, 4), d(2026, 8, 2), d(2026, 8, 1)]
        .into_iter()
        .collect();
    assert_eq!(current_streak(&gapped, today), 1);

    // Older activity alone is no current streak.
    let stale: HashSet<NaiveDate> = [d(2026, 7, 20)].into_iter().collect();
    assert_eq!(current_streak(&stale, today), 0);
}

#[test]
fn heuristic_evaluator_applies_length_and_keyword_bonuses() {
    let evaluator = HeuristicEvaluator;

    // Short and vague: baseline.
    let short = evaluator.evaluate("I fixed it.");
    assert_eq!(short.score, 5);
    assert!(short.feedback.contains("Consider providing more detail"));
    assert!(short.feedback.contains("specific examples"));

    // Medium length without keywords: one length bonus.
    let medium = evaluator.evaluate(&"a".repeat(150));
    assert_eq!(medium.score, 6);

    // Long, with an example and teamwork language: capped at 10.
    let strong = format!(
        "For example, our team had to {} and we shipped it together.",
        "refactor the payment pipeline step by step, measuring each change, "
            .repeat(4)
    );
    let best = evaluator.evaluate(&strong);
    assert_eq!(best.score, 10);
    assert!(best.feedback.starts_with("Excellent response"));
}

#[test]
fn interview_walks_the_script_then_falls_back_to_follow_ups() {
    let script = InterviewScript::default();
    let evaluator = HeuristicEvaluator;

    let mut session = InterviewSession::begin(&script, "sarah", "mid").unwrap();
    // Greeting plus the first scripted question.
    assert_eq!(session.transcript.len(), 2);
    assert_eq!(session.questions_asked, 1);

    // Three more scripted questions follow, each prefixed conversationally.
    for _ in 0..3 {
        let eval = evaluator.evaluate("A perfectly ordinary answer.");
        let reply = session.submit(&script, "A perfectly ordinary answer.".into(), &eval);
        assert!(reply.starts_with("That's interesting. "));
    }
    assert_eq!(session.questions_asked, 4);

    // Script exhausted: the reply comes from the follow-up pool.
    let eval = evaluator.evaluate("Yet another answer.");
    let reply = session.submit(&script, "Yet another answer.".into(), &eval);
    assert!(script.follow_ups.contains(&reply));

    // Four answers at score 5 average to 5.
    let (final_score, closing) = session.finish(&script);
    assert_eq!(final_score, 5);
    assert!(closing.contains("5/10"));
    assert!(session.ended_at.is_some());
}

struct ConstantEvaluator;

impl ResponseEvaluator for ConstantEvaluator {
    fn evaluate(&self, _text: &str) -> Evaluation {
        Evaluation { score: 9, feedback: "Noted.".into() }
    }
}

#[test]
fn evaluator_is_pluggable_through_app_state() {
    let state = AppState::new().with_evaluator(Arc::new(ConstantEvaluator));

    let eval = state.evaluator.evaluate("anything at all");
    assert_eq!(eval.score, 9);
    assert_eq!(eval.feedback, "Noted.");
}

#[test]
fn interview_rejects_unknown_setup() {
    let script = InterviewScript::default();

    assert!(matches!(
        InterviewSession::begin(&script, "nobody", "mid"),
        Err(InterviewSetupError::UnknownInterviewer)
    ));
    assert!(matches!(
        InterviewSession::begin(&script, "sarah", "staff"),
        Err(InterviewSetupError::UnknownLevel)
    ));
}
