//! HTTP endpoint handlers. These are thin wrappers that validate input,
//! forward to the store, and serialize JSON.
//! Each handler is instrumented; notable results are logged with a target.

use std::sync::Arc;

use axum::{
  extract::{Path, Query, State},
  http::StatusCode,
  response::IntoResponse,
  Json,
};
use tracing::{info, instrument};
use uuid::Uuid;
use validator::Validate;

use crate::domain::DEMO_USER_ID;
use crate::error::AppError;
use crate::interview::{InterviewPhase, InterviewSession};
use crate::protocol::*;
use crate::state::AppState;

#[instrument(level = "info")]
pub async fn http_health() -> impl IntoResponse {
  Json(HealthOut { ok: true })
}

/// Current user. Auth is mocked client-side, so this always resolves the
/// demo account.
#[instrument(level = "info", skip(state))]
pub async fn http_get_user(
  State(state): State<Arc<AppState>>,
) -> Result<impl IntoResponse, AppError> {
  let user = state
    .store
    .user(DEMO_USER_ID)
    .await
    .ok_or_else(|| AppError::NotFound("User not found".to_string()))?;
  Ok(Json(user))
}

#[instrument(level = "info", skip(state), fields(role = ?q.role, category = ?q.category))]
pub async fn http_list_questions(
  State(state): State<Arc<AppState>>,
  Query(q): Query<QuestionsQuery>,
) -> impl IntoResponse {
  let questions = state
    .store
    .questions(q.role.as_deref(), q.category.as_deref())
    .await;
  Json(questions)
}

#[instrument(level = "info", skip(state), fields(role = ?q.role, category = ?q.category, limit = ?q.limit))]
pub async fn http_random_questions(
  State(state): State<Arc<AppState>>,
  Query(q): Query<RandomQuery>,
) -> Result<impl IntoResponse, AppError> {
  let (role, category) = match (q.role, q.category) {
    (Some(role), Some(category)) => (role, category),
    _ => return Err(AppError::BadRequest("Role and category are required".to_string())),
  };
  let limit = q.limit.unwrap_or(DEFAULT_RANDOM_LIMIT);
  let questions = state.store.random_questions(&role, &category, limit).await;
  info!(target: "bank", %role, %category, served = questions.len(), "Random questions served");
  Ok(Json(questions))
}

#[instrument(level = "info", skip(state))]
pub async fn http_get_question(
  State(state): State<Arc<AppState>>,
  Path(id): Path<i64>,
) -> Result<impl IntoResponse, AppError> {
  let question = state
    .store
    .question(id)
    .await
    .ok_or_else(|| AppError::NotFound("Question not found".to_string()))?;
  Ok(Json(question))
}

/// Create a practice session for the demo user.
#[instrument(level = "info", skip(state, body), fields(role = %body.role, category = %body.category))]
pub async fn http_create_session(
  State(state): State<Arc<AppState>>,
  Json(body): Json<NewSessionIn>,
) -> Result<impl IntoResponse, AppError> {
  body.validate()?;
  let session = state.store.create_session(DEMO_USER_ID, body).await;
  info!(target: "session", id = session.id, role = %session.role, category = %session.category, "Practice session started");
  Ok((StatusCode::CREATED, Json(session)))
}

#[instrument(level = "info", skip(state))]
pub async fn http_get_session(
  State(state): State<Arc<AppState>>,
  Path(id): Path<i64>,
) -> Result<impl IntoResponse, AppError> {
  let session = state
    .store
    .session(id)
    .await
    .ok_or_else(|| AppError::NotFound("Session not found".to_string()))?;
  Ok(Json(session))
}

#[instrument(level = "info", skip(state, patch))]
pub async fn http_patch_session(
  State(state): State<Arc<AppState>>,
  Path(id): Path<i64>,
  Json(patch): Json<SessionPatch>,
) -> Result<impl IntoResponse, AppError> {
  let session = state
    .store
    .update_session(id, patch)
    .await
    .ok_or_else(|| AppError::NotFound("Session not found".to_string()))?;
  info!(target: "session", id = session.id, is_active = session.is_active, "Practice session updated");
  Ok(Json(session))
}

#[instrument(level = "info", skip(state))]
pub async fn http_session_responses(
  State(state): State<Arc<AppState>>,
  Path(id): Path<i64>,
) -> impl IntoResponse {
  Json(state.store.session_responses(id).await)
}

#[instrument(level = "info", skip(state))]
pub async fn http_user_active_sessions(
  State(state): State<Arc<AppState>>,
  Path(id): Path<i64>,
) -> impl IntoResponse {
  Json(state.store.user_active_sessions(id).await)
}

#[instrument(level = "info", skip(state, body), fields(session_id = body.session_id, question_id = body.question_id))]
pub async fn http_create_response(
  State(state): State<Arc<AppState>>,
  Json(body): Json<NewResponseIn>,
) -> Result<impl IntoResponse, AppError> {
  body.validate()?;
  let response = state.store.create_response(body).await;
  info!(target: "session", id = response.id, session_id = response.session_id, "Question response recorded");
  Ok((StatusCode::CREATED, Json(response)))
}

#[instrument(level = "info", skip(state, patch))]
pub async fn http_patch_response(
  State(state): State<Arc<AppState>>,
  Path(id): Path<i64>,
  Json(patch): Json<ResponsePatch>,
) -> Result<impl IntoResponse, AppError> {
  let response = state
    .store
    .update_response(id, patch)
    .await
    .ok_or_else(|| AppError::NotFound("Response not found".to_string()))?;
  Ok(Json(response))
}

#[instrument(level = "info", skip(state))]
pub async fn http_user_progress(
  State(state): State<Arc<AppState>>,
  Path(id): Path<i64>,
) -> impl IntoResponse {
  Json(state.store.user_progress(id).await)
}

/// Upsert a progress row. Role and category identify the row and must be
/// present in the body.
#[instrument(level = "info", skip(state, body))]
pub async fn http_patch_progress(
  State(state): State<Arc<AppState>>,
  Path(id): Path<i64>,
  Json(body): Json<ProgressPatchIn>,
) -> Result<impl IntoResponse, AppError> {
  let (role, category) = match (body.role, body.category) {
    (Some(role), Some(category)) => (role, category),
    _ => return Err(AppError::BadRequest("Role and category are required".to_string())),
  };
  let row = state
    .store
    .update_user_progress(id, &role, &category, body.updates)
    .await;
  info!(target: "session", user_id = id, %role, %category, "Progress upserted");
  Ok(Json(row))
}

#[instrument(level = "info", skip(state))]
pub async fn http_user_stats(
  State(state): State<Arc<AppState>>,
  Path(id): Path<i64>,
) -> impl IntoResponse {
  Json(state.store.user_stats(id).await)
}

/// Open a scripted interview with the chosen interviewer and level.
#[instrument(level = "info", skip(state, body), fields(interviewer = %body.interviewer, level = %body.level))]
pub async fn http_create_interview(
  State(state): State<Arc<AppState>>,
  Json(body): Json<NewInterviewIn>,
) -> Result<impl IntoResponse, AppError> {
  let session = InterviewSession::begin(&state.script, &body.interviewer, &body.level)?;
  let session = state.store.create_interview(session).await;
  info!(target: "interview", id = %session.id, level = %session.level, "Interview started");
  Ok((StatusCode::CREATED, Json(session)))
}

#[instrument(level = "info", skip(state))]
pub async fn http_get_interview(
  State(state): State<Arc<AppState>>,
  Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
  let session = state
    .store
    .interview(id)
    .await
    .ok_or_else(|| AppError::NotFound("Interview not found".to_string()))?;
  Ok(Json(session))
}

/// Score a candidate message and produce the interviewer's reply.
#[instrument(level = "info", skip(state, body), fields(%id, text_len = body.text.len()))]
pub async fn http_interview_message(
  State(state): State<Arc<AppState>>,
  Path(id): Path<Uuid>,
  Json(body): Json<InterviewMessageIn>,
) -> Result<impl IntoResponse, AppError> {
  body.validate()?;
  let eval = state.evaluator.evaluate(&body.text);
  let text = body.text;
  let out = state
    .store
    .update_interview(id, |session| {
      if session.phase == InterviewPhase::Ended {
        return Err(AppError::Conflict("Interview already ended".to_string()));
      }
      let reply = session.submit(&state.script, text, &eval);
      Ok(InterviewMessageOut {
        score: eval.score,
        feedback: eval.feedback.clone(),
        reply,
      })
    })
    .await
    .ok_or_else(|| AppError::NotFound("Interview not found".to_string()))??;
  info!(target: "interview", %id, score = out.score, "Candidate message evaluated");
  Ok(Json(out))
}

/// Close the interview and return the averaged score.
#[instrument(level = "info", skip(state), fields(%id))]
pub async fn http_end_interview(
  State(state): State<Arc<AppState>>,
  Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
  let out = state
    .store
    .update_interview(id, |session| {
      if session.phase == InterviewPhase::Ended {
        return Err(AppError::Conflict("Interview already ended".to_string()));
      }
      let (final_score, closing) = session.finish(&state.script);
      Ok(InterviewEndOut { final_score, closing })
    })
    .await
    .ok_or_else(|| AppError::NotFound("Interview not found".to_string()))??;
  info!(target: "interview", %id, final_score = out.final_score, "Interview ended");
  Ok(Json(out))
}
