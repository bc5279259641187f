//! Engine configuration loaded from TOML.
//!
//! Every table and key is optional:
//!
//! ```toml
//! [scoring]
//! penalty_below_50 = 4
//! penalty_below_70 = 6
//! penalty_below_90 = 8
//! penalty_top = 10
//!
//! [session]
//! consult_store = true
//! stub_answer = "skip"
//! ```

use std::path::Path;

use serde::Deserialize;
use tracing::{error, info};

use crate::practice_engine::error::ConfigError;
use crate::practice_engine::scoring::ScoringConfig;

/// Env var naming the TOML file read by [`EngineConfig::load_from_env`].
pub const CONFIG_PATH_VAR: &str = "PRACTICE_ENGINE_CONFIG";

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Default)]
#[serde(default)]
pub struct EngineConfig {
    pub scoring: ScoringConfig,
    pub session: SessionConfig,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct SessionConfig {
    /// Ask the exercise store before falling back to generation.
    pub consult_store: bool,
    /// Answer that clears the stub exercise shown when generation fails.
    pub stub_answer: String,
}

impl Default for SessionConfig {
    fn default() -> Self {
        SessionConfig {
            consult_store: true,
            stub_answer: "skip".into(),
        }
    }
}

impl EngineConfig {
    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(s)?)
    }

    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let s = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_toml_str(&s)
    }

    /// Load from the file named by `PRACTICE_ENGINE_CONFIG`. Unset, unreadable
    /// or unparsable all yield `None`; the latter two are logged.
    pub fn load_from_env() -> Option<Self> {
        let path = std::env::var(CONFIG_PATH_VAR).ok()?;
        match Self::from_path(&path) {
            Ok(cfg) => {
                info!(target: "practice_engine", %path, "Loaded engine config (TOML)");
                Some(cfg)
            }
            Err(e) => {
                error!(target: "practice_engine", %path, error = %e, "Failed to load engine config");
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_document_is_all_defaults() {
        let cfg = EngineConfig::from_toml_str("").unwrap();
        assert_eq!(cfg, EngineConfig::default());
        assert!(cfg.session.consult_store);
        assert_eq!(cfg.session.stub_answer, "skip");
        assert_eq!(cfg.scoring.penalty_for(95), 10);
    }

    #[test]
    fn partial_tables_keep_remaining_defaults() {
        let cfg = EngineConfig::from_toml_str(
            "[scoring]\npenalty_top = 3\n\n[session]\nconsult_store = false\n",
        )
        .unwrap();
        assert_eq!(cfg.scoring.penalty_top, 3);
        assert_eq!(cfg.scoring.penalty_below_50, 4);
        assert!(!cfg.session.consult_store);
        assert_eq!(cfg.session.stub_answer, "skip");
    }

    #[test]
    fn bad_toml_is_a_parse_error() {
        let err = EngineConfig::from_toml_str("[scoring\npenalty_top = 3").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
        let err = EngineConfig::from_toml_str("[scoring]\npenalty_top = \"lots\"").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn missing_file_is_a_read_error() {
        let err = EngineConfig::from_path("/nonexistent/practice_engine.toml").unwrap_err();
        assert!(matches!(err, ConfigError::Read { .. }));
    }
}
