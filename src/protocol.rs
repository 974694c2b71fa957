//! Public request/response structs for the HTTP endpoints (serde ready).
//! These are shared between the route handlers and the store, so the insert
//! and patch shapes live here rather than in `domain`.

use serde::{Deserialize, Serialize};
use validator::Validate;

//
// Query parameters
//

#[derive(Debug, Deserialize)]
pub struct QuestionsQuery {
    pub role: Option<String>,
    pub category: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct RandomQuery {
    pub role: Option<String>,
    pub category: Option<String>,
    pub limit: Option<usize>,
}

/// Default sample size when the client doesn't pass `limit`.
pub const DEFAULT_RANDOM_LIMIT: usize = 20;

//
// Insert bodies (validated before touching the store)
//

#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct NewSessionIn {
    #[validate(length(min = 1, message = "role is required"))]
    pub role: String,
    #[validate(length(min = 1, message = "category is required"))]
    pub category: String,
    #[validate(range(min = 1, message = "duration must be at least one minute"))]
    pub duration: i32,
    #[validate(range(min = 1, message = "totalQuestions must be positive"))]
    pub total_questions: i32,
    #[serde(default)]
    pub questions_completed: i32,
    #[serde(default = "default_true")]
    pub is_active: bool,
}

#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct NewResponseIn {
    pub session_id: i64,
    pub question_id: i64,
    // May be empty: skipped questions are recorded too.
    pub response: String,
    #[validate(range(min = 0, message = "timeSpent cannot be negative"))]
    pub time_spent: i32,
    #[serde(default)]
    pub is_flagged: bool,
}

/// Insert shape for a user. No HTTP route creates users (the login flow is a
/// client-side mock), but the store supports it.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewUserIn {
    pub username: String,
    pub password: String,
    pub name: String,
    pub email: String,
    pub current_role: String,
}

//
// Partial updates (absent field = unchanged)
//

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionPatch {
    pub role: Option<String>,
    pub category: Option<String>,
    pub duration: Option<i32>,
    pub questions_completed: Option<i32>,
    pub total_questions: Option<i32>,
    pub completed_at: Option<chrono::DateTime<chrono::Utc>>,
    pub is_active: Option<bool>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResponsePatch {
    pub response: Option<String>,
    pub time_spent: Option<i32>,
    pub is_flagged: Option<bool>,
}

/// Numeric fields of a progress upsert.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProgressUpdate {
    pub questions_completed: Option<i32>,
    pub total_practice_time: Option<i32>,
    pub average_score: Option<i32>,
}

/// Body of `PATCH /api/users/:id/progress`; role and category identify the
/// row and are required (enforced in the handler, 400 otherwise).
#[derive(Debug, Deserialize)]
pub struct ProgressPatchIn {
    pub role: Option<String>,
    pub category: Option<String>,
    #[serde(flatten)]
    pub updates: ProgressUpdate,
}

//
// Aggregates
//

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserStats {
    pub questions_completed: usize,
    pub practice_hours: i32,
    pub skills_improved: usize,
    pub current_streak: u32,
}

//
// Interview endpoints
//

#[derive(Debug, Deserialize)]
pub struct NewInterviewIn {
    #[serde(default = "default_interviewer")]
    pub interviewer: String,
    #[serde(default = "default_level")]
    pub level: String,
}

#[derive(Debug, Deserialize, Validate)]
pub struct InterviewMessageIn {
    #[validate(length(min = 1, message = "text is required"))]
    pub text: String,
}

#[derive(Debug, Serialize)]
pub struct InterviewMessageOut {
    pub score: u8,
    pub feedback: String,
    pub reply: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InterviewEndOut {
    pub final_score: u8,
    pub closing: String,
}

#[derive(Serialize)]
pub struct HealthOut {
    pub ok: bool,
}

fn default_true() -> bool {
    true
}

fn default_interviewer() -> String {
    "sarah".into()
}

fn default_level() -> String {
    "mid".into()
}
