//! In-memory persistence: one `RwLock<HashMap>` per entity plus per-entity
//! id counters.
//!
//! This module owns:
//!   - the question bank (filtered and sampled views)
//!   - CRUD for users, practice sessions, and question responses
//!   - the per-(user, role, category) progress upsert and stats aggregation
//!   - interview sessions created by the scripted interviewer
//!
//! Lookups for absent ids return `None`; the HTTP layer decides what that
//! means. There are no transactions: concurrent writes to the same progress
//! key are last-write-wins.

use std::collections::{HashMap, HashSet};
use std::sync::atomic::{AtomicI64, Ordering};

use chrono::{NaiveDate, Utc};
use rand::seq::SliceRandom;
use tokio::sync::RwLock;
use tracing::{error, info, instrument};
use uuid::Uuid;

use crate::domain::{
    NewQuestion, PracticeSession, ProgressKey, Question, QuestionResponse, User, UserProgress,
};
use crate::interview::InterviewSession;
use crate::protocol::{
    NewResponseIn, NewSessionIn, NewUserIn, ProgressUpdate, ResponsePatch, SessionPatch, UserStats,
};
use crate::seeds::{seed_questions, seed_user};

pub struct Store {
    users: RwLock<HashMap<i64, User>>,
    questions: RwLock<HashMap<i64, Question>>,
    sessions: RwLock<HashMap<i64, PracticeSession>>,
    responses: RwLock<HashMap<i64, QuestionResponse>>,
    progress: RwLock<HashMap<ProgressKey, UserProgress>>,
    interviews: RwLock<HashMap<Uuid, InterviewSession>>,

    next_user_id: AtomicI64,
    next_question_id: AtomicI64,
    next_session_id: AtomicI64,
    next_response_id: AtomicI64,
    next_progress_id: AtomicI64,
}

impl Store {
    /// Build a store seeded with the demo user and the question bank
    /// (built-in seeds first, then any config-provided extras).
    #[instrument(level = "info", skip_all, fields(extra = extra.len()))]
    pub fn seeded(extra: Vec<NewQuestion>) -> Self {
        let mut users = HashMap::new();
        let demo = seed_user();
        let next_user_id = demo.id + 1;
        users.insert(demo.id, demo);

        let mut questions = HashMap::new();
        let mut next_question_id: i64 = 1;
        for nq in seed_questions().into_iter().chain(extra) {
            if nq.title.trim().is_empty() || nq.description.trim().is_empty() {
                error!(target: "bank", title = %nq.title, "Skipping bank item: missing title or description.");
                continue;
            }
            let id = next_question_id;
            next_question_id += 1;
            questions.insert(id, materialize_question(id, nq));
        }

        // Inventory summary by role.
        let mut count_by_role: HashMap<String, usize> = HashMap::new();
        for q in questions.values() {
            *count_by_role.entry(q.role.clone()).or_insert(0) += 1;
        }
        for (role, n) in count_by_role {
            info!(target: "bank", %role, questions = n, "Startup question inventory");
        }

        Self {
            users: RwLock::new(users),
            questions: RwLock::new(questions),
            sessions: RwLock::new(HashMap::new()),
            responses: RwLock::new(HashMap::new()),
            progress: RwLock::new(HashMap::new()),
            interviews: RwLock::new(HashMap::new()),
            next_user_id: AtomicI64::new(next_user_id),
            next_question_id: AtomicI64::new(next_question_id),
            next_session_id: AtomicI64::new(1),
            next_response_id: AtomicI64::new(1),
            next_progress_id: AtomicI64::new(1),
        }
    }

    // ----- users -----

    #[instrument(level = "debug", skip(self))]
    pub async fn user(&self, id: i64) -> Option<User> {
        self.users.read().await.get(&id).cloned()
    }

    #[instrument(level = "debug", skip(self))]
    pub async fn user_by_username(&self, username: &str) -> Option<User> {
        self.users
            .read()
            .await
            .values()
            .find(|u| u.username == username)
            .cloned()
    }

    #[instrument(level = "debug", skip(self, new), fields(username = %new.username))]
    pub async fn create_user(&self, new: NewUserIn) -> User {
        let user = User {
            id: self.next_user_id.fetch_add(1, Ordering::SeqCst),
            username: new.username,
            password: new.password,
            name: new.name,
            email: new.email,
            current_role: new.current_role,
            created_at: Utc::now(),
        };
        self.users.write().await.insert(user.id, user.clone());
        user
    }

    // ----- question bank -----

    /// All questions matching the optional filters, in insertion (id) order.
    /// Unknown role/category values match nothing rather than erroring.
    #[instrument(level = "debug", skip(self))]
    pub async fn questions(&self, role: Option<&str>, category: Option<&str>) -> Vec<Question> {
        let questions = self.questions.read().await;
        let mut filtered: Vec<Question> = questions
            .values()
            .filter(|q| role.map_or(true, |r| q.role == r))
            .filter(|q| category.map_or(true, |c| q.category == c))
            .cloned()
            .collect();
        filtered.sort_by_key(|q| q.id);
        filtered
    }

    #[instrument(level = "debug", skip(self))]
    pub async fn question(&self, id: i64) -> Option<Question> {
        self.questions.read().await.get(&id).cloned()
    }

    #[instrument(level = "debug", skip(self, new), fields(title = %new.title))]
    pub async fn create_question(&self, new: NewQuestion) -> Question {
        let id = self.next_question_id.fetch_add(1, Ordering::SeqCst);
        let question = materialize_question(id, new);
        self.questions
            .write()
            .await
            .insert(question.id, question.clone());
        question
    }

    /// Best-effort sample: up to `limit` distinct questions from the filtered
    /// set, in random order. Fewer (possibly zero) when the set is small.
    #[instrument(level = "debug", skip(self))]
    pub async fn random_questions(&self, role: &str, category: &str, limit: usize) -> Vec<Question> {
        let mut filtered = self.questions(Some(role), Some(category)).await;
        filtered.shuffle(&mut rand::thread_rng());
        filtered.truncate(limit);
        filtered
    }

    // ----- practice sessions -----

    #[instrument(level = "debug", skip(self, new), fields(%user_id, role = %new.role, category = %new.category))]
    pub async fn create_session(&self, user_id: i64, new: NewSessionIn) -> PracticeSession {
        let session = PracticeSession {
            id: self.next_session_id.fetch_add(1, Ordering::SeqCst),
            user_id,
            role: new.role,
            category: new.category,
            duration: new.duration,
            questions_completed: new.questions_completed,
            total_questions: new.total_questions,
            started_at: Utc::now(),
            completed_at: None,
            is_active: new.is_active,
        };
        self.sessions
            .write()
            .await
            .insert(session.id, session.clone());
        session
    }

    #[instrument(level = "debug", skip(self))]
    pub async fn session(&self, id: i64) -> Option<PracticeSession> {
        self.sessions.read().await.get(&id).cloned()
    }

    /// Shallow-merge the patch into the session. `None` when the id is absent.
    #[instrument(level = "debug", skip(self, patch))]
    pub async fn update_session(&self, id: i64, patch: SessionPatch) -> Option<PracticeSession> {
        let mut sessions = self.sessions.write().await;
        let session = sessions.get_mut(&id)?;
        if let Some(v) = patch.role {
            session.role = v;
        }
        if let Some(v) = patch.category {
            session.category = v;
        }
        if let Some(v) = patch.duration {
            session.duration = v;
        }
        if let Some(v) = patch.questions_completed {
            session.questions_completed = v;
        }
        if let Some(v) = patch.total_questions {
            session.total_questions = v;
        }
        if let Some(v) = patch.completed_at {
            session.completed_at = Some(v);
        }
        if let Some(v) = patch.is_active {
            session.is_active = v;
        }
        Some(session.clone())
    }

    #[instrument(level = "debug", skip(self))]
    pub async fn user_active_sessions(&self, user_id: i64) -> Vec<PracticeSession> {
        let sessions = self.sessions.read().await;
        let mut active: Vec<PracticeSession> = sessions
            .values()
            .filter(|s| s.user_id == user_id && s.is_active)
            .cloned()
            .collect();
        active.sort_by_key(|s| s.id);
        active
    }

    // ----- question responses -----

    #[instrument(level = "debug", skip(self, new), fields(session_id = new.session_id, question_id = new.question_id))]
    pub async fn create_response(&self, new: NewResponseIn) -> QuestionResponse {
        let response = QuestionResponse {
            id: self.next_response_id.fetch_add(1, Ordering::SeqCst),
            session_id: new.session_id,
            question_id: new.question_id,
            response: new.response,
            time_spent: new.time_spent,
            is_flagged: new.is_flagged,
            answered_at: Utc::now(),
        };
        self.responses
            .write()
            .await
            .insert(response.id, response.clone());
        response
    }

    #[instrument(level = "debug", skip(self))]
    pub async fn session_responses(&self, session_id: i64) -> Vec<QuestionResponse> {
        let responses = self.responses.read().await;
        let mut rows: Vec<QuestionResponse> = responses
            .values()
            .filter(|r| r.session_id == session_id)
            .cloned()
            .collect();
        rows.sort_by_key(|r| r.id);
        rows
    }

    #[instrument(level = "debug", skip(self, patch))]
    pub async fn update_response(&self, id: i64, patch: ResponsePatch) -> Option<QuestionResponse> {
        let mut responses = self.responses.write().await;
        let response = responses.get_mut(&id)?;
        if let Some(v) = patch.response {
            response.response = v;
        }
        if let Some(v) = patch.time_spent {
            response.time_spent = v;
        }
        if let Some(v) = patch.is_flagged {
            response.is_flagged = v;
        }
        Some(response.clone())
    }

    // ----- progress -----

    #[instrument(level = "debug", skip(self))]
    pub async fn user_progress(&self, user_id: i64) -> Vec<UserProgress> {
        let progress = self.progress.read().await;
        let mut rows: Vec<UserProgress> = progress
            .values()
            .filter(|p| p.user_id == user_id)
            .cloned()
            .collect();
        rows.sort_by_key(|p| p.id);
        rows
    }

    /// Upsert keyed by (user, role, category). Existing rows get the updates
    /// merged in and `last_practiced` refreshed; missing rows are created
    /// with zero defaults first. Last write wins.
    #[instrument(level = "debug", skip(self, updates), fields(%user_id, %role, %category))]
    pub async fn update_user_progress(
        &self,
        user_id: i64,
        role: &str,
        category: &str,
        updates: ProgressUpdate,
    ) -> UserProgress {
        let key = ProgressKey {
            user_id,
            role: role.to_string(),
            category: category.to_string(),
        };
        let mut progress = self.progress.write().await;
        match progress.get_mut(&key) {
            Some(row) => {
                if let Some(v) = updates.questions_completed {
                    row.questions_completed = v;
                }
                if let Some(v) = updates.total_practice_time {
                    row.total_practice_time = v;
                }
                if let Some(v) = updates.average_score {
                    row.average_score = v;
                }
                row.last_practiced = Utc::now();
                row.clone()
            }
            None => {
                let row = UserProgress {
                    id: self.next_progress_id.fetch_add(1, Ordering::SeqCst),
                    user_id,
                    role: key.role.clone(),
                    category: key.category.clone(),
                    questions_completed: updates.questions_completed.unwrap_or(0),
                    total_practice_time: updates.total_practice_time.unwrap_or(0),
                    average_score: updates.average_score.unwrap_or(0),
                    last_practiced: Utc::now(),
                };
                progress.insert(key, row.clone());
                row
            }
        }
    }

    /// Aggregate counters derived by scanning the user's responses and
    /// progress rows.
    #[instrument(level = "debug", skip(self))]
    pub async fn user_stats(&self, user_id: i64) -> UserStats {
        let (questions_completed, practice_days) = {
            let sessions = self.sessions.read().await;
            let responses = self.responses.read().await;
            let mut count = 0usize;
            let mut days = HashSet::new();
            for r in responses.values() {
                let owned = sessions
                    .get(&r.session_id)
                    .map_or(false, |s| s.user_id == user_id);
                if owned {
                    count += 1;
                    days.insert(r.answered_at.date_naive());
                }
            }
            (count, days)
        };

        let progress = self.user_progress(user_id).await;
        let total_minutes: i32 = progress.iter().map(|p| p.total_practice_time).sum();

        UserStats {
            questions_completed,
            practice_hours: total_minutes / 60,
            skills_improved: progress.iter().filter(|p| p.questions_completed > 0).count(),
            current_streak: current_streak(&practice_days, Utc::now().date_naive()),
        }
    }

    // ----- interviews -----

    #[instrument(level = "debug", skip(self, session), fields(id = %session.id))]
    pub async fn create_interview(&self, session: InterviewSession) -> InterviewSession {
        self.interviews
            .write()
            .await
            .insert(session.id, session.clone());
        session
    }

    #[instrument(level = "debug", skip(self))]
    pub async fn interview(&self, id: Uuid) -> Option<InterviewSession> {
        self.interviews.read().await.get(&id).cloned()
    }

    /// Run a mutation against an interview under the write lock. `None` when
    /// the id is absent; otherwise whatever the closure returns.
    pub async fn update_interview<F, T>(&self, id: Uuid, f: F) -> Option<T>
    where
        F: FnOnce(&mut InterviewSession) -> T,
    {
        let mut interviews = self.interviews.write().await;
        interviews.get_mut(&id).map(f)
    }
}

fn materialize_question(id: i64, new: NewQuestion) -> Question {
    Question {
        id,
        title: new.title,
        description: new.description,
        category: new.category,
        role: new.role,
        difficulty: new.difficulty,
        sample_answer: new.sample_answer,
        tips: new.tips,
        keywords: new.keywords,
    }
}

/// Consecutive practice days ending today (or yesterday, when today has no
/// activity yet).
pub fn current_streak(practice_days: &HashSet<NaiveDate>, today: NaiveDate) -> u32 {
    let mut day = if practice_days.contains(&today) {
        today
    } else {
        match today.pred_opt() {
            Some(yesterday) if practice_days.contains(&yesterday) => yesterday,
            _ => return 0,
        }
    };

    let mut streak = 1;
    while let Some(prev) = day.pred_opt() {
        if !practice_days.contains(&prev) {
            break;
        }
        streak += 1;
        day = prev;
    }
    streak
}
