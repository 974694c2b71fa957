//! Domain models persisted in the in-memory store: users, questions,
//! practice sessions, question responses, and per-role/category progress.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Professional tracks a question can target. Closed set by convention only:
/// filters treat unknown values as matching nothing rather than erroring.
pub const ROLES: &[&str] = &["software-developer", "tech-lead", "architect", "principal"];

/// Skill areas a question can belong to.
pub const CATEGORIES: &[&str] = &[
  "communication",
  "collaboration",
  "leadership",
  "problem-solving",
  "technical-mentoring",
];

/// Seniority bands. Also used as interview script levels.
pub const DIFFICULTIES: &[&str] = &["junior", "mid", "senior"];

/// Demo account. Authentication is mocked client-side; every HTTP call that
/// needs a user resolves to this id.
pub const DEMO_USER_ID: i64 = 1;

#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
  pub id: i64,
  pub username: String,
  // Plaintext on purpose: the login flow is a client-side mock.
  pub password: String,
  pub name: String,
  pub email: String,
  pub current_role: String,
  pub created_at: DateTime<Utc>,
}

/// One practice question. Immutable after seeding.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Question {
  pub id: i64,
  pub title: String,
  pub description: String,
  pub category: String,
  pub role: String,
  pub difficulty: String,
  pub sample_answer: String,
  pub tips: Vec<String>,
  pub keywords: Vec<String>,
}

/// Insert shape for a question; the store assigns the id.
#[derive(Clone, Debug, Deserialize)]
pub struct NewQuestion {
  pub title: String,
  pub description: String,
  pub category: String,
  pub role: String,
  pub difficulty: String,
  #[serde(default)]
  pub sample_answer: String,
  #[serde(default)]
  pub tips: Vec<String>,
  #[serde(default)]
  pub keywords: Vec<String>,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PracticeSession {
  pub id: i64,
  pub user_id: i64,
  pub role: String,
  pub category: String,
  /// Time budget in minutes.
  pub duration: i32,
  pub questions_completed: i32,
  pub total_questions: i32,
  pub started_at: DateTime<Utc>,
  pub completed_at: Option<DateTime<Utc>>,
  pub is_active: bool,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuestionResponse {
  pub id: i64,
  pub session_id: i64,
  pub question_id: i64,
  pub response: String,
  /// Seconds spent on the question before answering or skipping.
  pub time_spent: i32,
  pub is_flagged: bool,
  pub answered_at: DateTime<Utc>,
}

/// Identity of a progress row. At most one row exists per key.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct ProgressKey {
  pub user_id: i64,
  pub role: String,
  pub category: String,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserProgress {
  pub id: i64,
  pub user_id: i64,
  pub role: String,
  pub category: String,
  pub questions_completed: i32,
  /// Minutes across all sessions for this role/category.
  pub total_practice_time: i32,
  /// Percentage, 0..=100.
  pub average_score: i32,
  pub last_practiced: DateTime<Utc>,
}
