//! # math_drill_gen
//!
//! A deterministic, offline math practice engine for elementary grades.
//!
//! Generators produce self-consistent exercises (prompt, ground truth and
//! explanation together) across eight interaction variants: choice,
//! ordering, blank-fill, grid-fill, point-plot, categorize, number-line and
//! free-text. A validator grades submitted answers with a comparison rule per
//! variant, and an adaptive score picks the difficulty of the next exercise.
//!
//! ## How it works
//!
//! 1. Call [`generate`] with a topic id, a [`DifficultyTier`] and a seed. The
//!    same triple always yields the same exercise, id included.
//! 2. Render from [`client_view`], which carries no answers.
//! 3. Grade the learner's submission with [`validate`]. Structured variants
//!    take a JSON array or object; choice and free-text take a bare string.
//! 4. Feed the verdict to [`apply_result`] and generate the next exercise at
//!    [`next_difficulty`] of the new score.
//!
//! [`Session`] wraps that loop, consulting an [`ExerciseStore`] before
//! falling back to generation.
//!
//! ## Quick start
//!
//! ```rust
//! use math_drill_gen::{
//!     apply_result, generate, next_difficulty, validate, DifficultyTier, Payload, ScoreState,
//! };
//!
//! let exercise = generate("nl-find-integer", DifficultyTier::Easy, 42).unwrap();
//! println!("Q: {}", exercise.prompt.text);
//!
//! let mut state = ScoreState::new();
//! // The window starts at 0 or later and the target is never an endpoint.
//! let correct = validate(&exercise, "[0]");
//! assert!(!correct);
//! apply_result(&mut state, correct);
//! assert_eq!(state.streak, 0);
//! assert_eq!(next_difficulty(state.score), DifficultyTier::Easy);
//! assert!(matches!(exercise.payload, Payload::NumberLine(_)));
//! ```

pub mod practice_engine;

pub use practice_engine::{
    apply_result, client_view, generate, next_difficulty, validate, Attempt, DifficultyTier,
    EngineConfig, EngineError, Exercise, ExerciseSource, ExerciseStore, Grade, InMemoryStore,
    NoStore, Payload, ScoreState, ScoringConfig, Session, SessionError, TopicRegistry, Variant,
};

#[cfg(test)]
mod tests;
