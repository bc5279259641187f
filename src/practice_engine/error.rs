//! Error types for generation, storage, sessions and configuration.
//!
//! Malformed learner submissions are deliberately absent: the validator turns
//! them into an incorrect verdict.

use crate::practice_engine::models::DifficultyTier;

/// Failures raised while producing an exercise.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum EngineError {
    /// No generator is registered under this topic id.
    #[error("topic not found: {topic_id}")]
    TopicNotFound { topic_id: String },

    /// The topic is known but its generator does not implement this case.
    #[error("topic {topic_id} does not support {tier}: {reason}")]
    TopicNotSupported {
        topic_id: String,
        tier: DifficultyTier,
        reason: String,
    },
}

impl EngineError {
    pub fn not_supported(topic_id: &str, tier: DifficultyTier, reason: impl Into<String>) -> Self {
        EngineError::TopicNotSupported {
            topic_id: topic_id.to_string(),
            tier,
            reason: reason.into(),
        }
    }
}

/// Failures reported by an external exercise store.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("exercise store unavailable: {0}")]
    Unavailable(String),

    #[error("stored exercise record is malformed: {0}")]
    MalformedRecord(#[from] serde_json::Error),
}

/// Misuse of the session loop.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SessionError {
    #[error("no exercise is awaiting an answer")]
    NoActiveExercise,

    #[error("topic {topic_id} is already mastered")]
    Mastered { topic_id: String },
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read config file {path}: {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),
}
