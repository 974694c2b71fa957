//! Application state shared by every handler: the in-memory store, the
//! interviewer script, and the response evaluator.
//!
//! The evaluator is held as a trait object so a real scorer can replace the
//! keyword heuristic without touching the interview flow or the routes.

use std::sync::Arc;

use tracing::{info, instrument};

use crate::config::load_app_config_from_env;
use crate::evaluator::{HeuristicEvaluator, ResponseEvaluator};
use crate::interview::InterviewScript;
use crate::store::Store;

pub struct AppState {
    pub store: Store,
    pub script: InterviewScript,
    pub evaluator: Arc<dyn ResponseEvaluator>,
}

impl AppState {
    /// Build state from env: load the optional TOML config, seed the store,
    /// install the default evaluator.
    #[instrument(level = "info", skip_all)]
    pub fn new() -> Self {
        let cfg = load_app_config_from_env().unwrap_or_default();
        let script = cfg.interview.unwrap_or_default();
        let store = Store::seeded(cfg.questions);

        info!(
            target: "prepwise_backend",
            interviewers = script.interviewers.len(),
            follow_ups = script.follow_ups.len(),
            "Interview script ready"
        );

        Self {
            store,
            script,
            evaluator: Arc::new(HeuristicEvaluator),
        }
    }

    /// Swap the response evaluator (used by tests and future real scorers).
    pub fn with_evaluator(mut self, evaluator: Arc<dyn ResponseEvaluator>) -> Self {
        self.evaluator = evaluator;
        self
    }
}
