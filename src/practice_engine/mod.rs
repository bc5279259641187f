//! Core practice engine: exercise generation, answer validation and adaptive
//! scoring.
//!
//! ## Module overview
//!
//! | Module         | Purpose |
//! |----------------|---------|
//! | `models`       | Exercise record, variant payloads, tiers, score state |
//! | `random`       | Seeded RNG: inclusive integers, Fisher-Yates shuffle, distinct draws |
//! | `helpers`      | Shared builders used across topic generators |
//! | `registry`     | Topic id → generator table, aliases, grade-parameterized families |
//! | `generator`    | Entry point `generate()` over the standard table |
//! | `topics`       | Generators grouped by exercise family |
//! | `validator`    | One answer check per variant; `validate()` |
//! | `scoring`      | Mastery score bands and next-tier selection |
//! | `session`      | Store-first / generate-fallback practice loop |
//! | `presentation` | Ground-truth-free client view |
//! | `config`       | TOML configuration |
//! | `error`        | Error enums |

pub mod config;
pub mod error;
pub mod generator;
pub mod helpers;
pub mod models;
pub mod presentation;
pub mod random;
pub mod registry;
pub mod scoring;
pub mod session;
pub mod topics;
pub mod validator;

pub use config::{EngineConfig, SessionConfig};
pub use error::{ConfigError, EngineError, SessionError, StoreError};
pub use generator::{default_registry, generate};
pub use models::{DifficultyTier, Exercise, Payload, ScoreState, Variant};
pub use presentation::client_view;
pub use registry::TopicRegistry;
pub use scoring::{apply_result, next_difficulty, ScoringConfig};
pub use session::{Attempt, ExerciseSource, ExerciseStore, Grade, InMemoryStore, NoStore, Session};
pub use validator::validate;
