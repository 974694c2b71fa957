//! Loading application configuration (extra bank questions + interview
//! script overrides) from TOML.
//!
//! See `AppConfig` for the expected schema. Everything is optional: with no
//! config file the built-in seeds and the default script are used.

use serde::Deserialize;
use tracing::{error, info};

use crate::domain::NewQuestion;
use crate::interview::InterviewScript;

#[derive(Clone, Debug, Deserialize, Default)]
pub struct AppConfig {
  /// Extra questions appended to the built-in bank at startup.
  #[serde(default)]
  pub questions: Vec<NewQuestion>,
  /// Partial or full override of the interviewer script.
  #[serde(default)]
  pub interview: Option<InterviewScript>,
}

/// Attempt to load `AppConfig` from APP_CONFIG_PATH. On any parsing/IO error,
/// returns None and the caller falls back to defaults.
pub fn load_app_config_from_env() -> Option<AppConfig> {
  let path = std::env::var("APP_CONFIG_PATH").ok()?;
  match std::fs::read_to_string(&path) {
    Ok(s) => match toml::from_str::<AppConfig>(&s) {
      Ok(cfg) => {
        info!(target: "prepwise_backend", %path, "Loaded app config (TOML)");
        Some(cfg)
      }
      Err(e) => {
        error!(target: "prepwise_backend", %path, error = %e, "Failed to parse TOML config");
        None
      }
    },
    Err(e) => {
      error!(target: "prepwise_backend", %path, error = %e, "Failed to read TOML config file");
      None
    }
  }
}
