//! Practice session loop for one topic.
//!
//! ```text
//! next_exercise ─► store.fetch(topic, tier) ──hit──► present
//!                        │ miss / error / foreign topic
//!                        ▼
//!                  registry.generate(topic, tier, seed + n) ──ok──► present
//!                        │ TopicNotFound / TopicNotSupported
//!                        ▼
//!                  stub exercise ("type 'skip'")
//!
//! submit ─► validate ─► ScoringConfig::apply ─► Grade { next_tier, .. }
//! ```
//!
//! The session owns its [`ScoreState`]; nothing is shared between sessions.

use std::cell::Cell;
use std::time::{SystemTime, UNIX_EPOCH};

use serde::Deserialize;
use tracing::{debug, info, warn};

use crate::practice_engine::{
    config::EngineConfig,
    error::{EngineError, SessionError, StoreError},
    generator::default_registry,
    models::{DifficultyTier, Exercise, Explanation, ScoreState},
    registry::TopicRegistry,
    scoring::MAX_SCORE,
    validator::validate,
};

// ---------------------------------------------------------------------------
// Store
// ---------------------------------------------------------------------------

/// Source of pre-authored exercises, consulted before generation.
pub trait ExerciseStore {
    /// `tier` is a hint; a store may return any tier for the topic.
    fn fetch(&self, topic_id: &str, tier: DifficultyTier) -> Result<Option<Exercise>, StoreError>;
}

/// A store with nothing in it. Every exercise is generated.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoStore;

impl ExerciseStore for NoStore {
    fn fetch(&self, _topic_id: &str, _tier: DifficultyTier) -> Result<Option<Exercise>, StoreError> {
        Ok(None)
    }
}

/// Exercise records kept in their JSON exchange form.
///
/// Matching records are served round-robin, records at the requested tier
/// first. A record without a readable `topic_id` is skipped. A broken record
/// for the requested topic fails only the fetch that would serve it.
#[derive(Debug, Default)]
pub struct InMemoryStore {
    records: Vec<String>,
    served: Cell<usize>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, exercise: &Exercise) -> Result<(), StoreError> {
        self.records.push(exercise.to_json()?);
        Ok(())
    }

    pub fn insert_json(&mut self, record: impl Into<String>) {
        self.records.push(record.into());
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

/// The routing fields of a record that does not decode as an [`Exercise`].
#[derive(Deserialize)]
struct RecordHeader {
    topic_id: String,
    difficulty: Option<DifficultyTier>,
}

impl ExerciseStore for InMemoryStore {
    fn fetch(&self, topic_id: &str, tier: DifficultyTier) -> Result<Option<Exercise>, StoreError> {
        let mut exact = Vec::new();
        let mut other = Vec::new();
        for (index, record) in self.records.iter().enumerate() {
            let (topic, difficulty, decoded) = match Exercise::from_json(record) {
                Ok(ex) => (ex.topic_id.clone(), Some(ex.difficulty), Ok(ex)),
                Err(e) => match serde_json::from_str::<RecordHeader>(record) {
                    Ok(header) => (header.topic_id, header.difficulty, Err(e)),
                    Err(_) => {
                        warn!(target: "practice_engine", index, error = %e, "skipping unreadable store record");
                        continue;
                    }
                },
            };
            if topic != topic_id {
                continue;
            }
            if difficulty == Some(tier) { exact.push(decoded) } else { other.push(decoded) }
        }
        let mut pool = if exact.is_empty() { other } else { exact };
        if pool.is_empty() {
            return Ok(None);
        }
        let n = self.served.get();
        self.served.set(n.wrapping_add(1));
        Ok(Some(pool.swap_remove(n % pool.len())?))
    }
}

// ---------------------------------------------------------------------------
// Session
// ---------------------------------------------------------------------------

/// Where the presented exercise came from.
#[derive(Debug, Clone, PartialEq)]
pub enum ExerciseSource {
    Store,
    Generated { seed: u64 },
    /// Generation failed; the exercise is a placeholder and is not scored.
    Stub { error: EngineError },
}

#[derive(Debug, Clone, PartialEq)]
pub struct Attempt {
    pub exercise: Exercise,
    pub source: ExerciseSource,
    /// Tier requested for this attempt.
    pub tier: DifficultyTier,
}

impl Attempt {
    pub fn is_stub(&self) -> bool {
        matches!(self.source, ExerciseSource::Stub { .. })
    }
}

/// Outcome of one submission.
#[derive(Debug, Clone, PartialEq)]
pub struct Grade {
    pub correct: bool,
    pub score: u8,
    pub streak: u32,
    pub next_tier: DifficultyTier,
    pub challenge_zone: bool,
    pub mastered: bool,
    /// Shown after a wrong answer only.
    pub explanation: Option<Explanation>,
}

pub struct Session<'r, S: ExerciseStore = NoStore> {
    topic_id: String,
    seed: u64,
    served: u64,
    registry: &'r TopicRegistry,
    store: S,
    config: EngineConfig,
    state: ScoreState,
    current: Option<Attempt>,
}

impl<S: ExerciseStore> Session<'static, S> {
    /// Session over the standard topic table with an explicit base seed.
    pub fn with_seed(topic_id: impl Into<String>, store: S, seed: u64) -> Self {
        Session {
            topic_id: topic_id.into(),
            seed,
            served: 0,
            registry: default_registry(),
            store,
            config: EngineConfig::default(),
            state: ScoreState::new(),
            current: None,
        }
    }

    /// Base seed taken from the wall clock.
    pub fn from_clock(topic_id: impl Into<String>, store: S) -> Self {
        let seed = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_nanos() as u64)
            .unwrap_or_default();
        Self::with_seed(topic_id, store, seed)
    }
}

impl<'r, S: ExerciseStore> Session<'r, S> {
    pub fn with_registry<'a>(self, registry: &'a TopicRegistry) -> Session<'a, S> {
        Session {
            topic_id: self.topic_id,
            seed: self.seed,
            served: self.served,
            registry,
            store: self.store,
            config: self.config,
            state: self.state,
            current: self.current,
        }
    }

    pub fn with_config(mut self, config: EngineConfig) -> Self {
        self.config = config;
        self
    }

    /// Resume from a previously reached score.
    /// Resume from a saved state; a score above the maximum is clamped.
    pub fn with_state(mut self, state: ScoreState) -> Self {
        self.state = ScoreState { score: state.score.min(MAX_SCORE), ..state };
        self
    }

    pub fn topic_id(&self) -> &str {
        &self.topic_id
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    pub fn state(&self) -> ScoreState {
        self.state
    }

    pub fn current(&self) -> Option<&Attempt> {
        self.current.as_ref()
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    fn from_store(&self, tier: DifficultyTier) -> Option<Exercise> {
        if !self.config.session.consult_store {
            return None;
        }
        match self.store.fetch(&self.topic_id, tier) {
            Ok(Some(ex)) if ex.topic_id == self.topic_id => Some(ex),
            Ok(Some(ex)) => {
                warn!(
                    target: "practice_engine",
                    topic_id = %self.topic_id, returned = %ex.topic_id,
                    "store returned a foreign-topic exercise; generating instead"
                );
                None
            }
            Ok(None) => {
                debug!(target: "practice_engine", topic_id = %self.topic_id, %tier, "store miss");
                None
            }
            Err(e) => {
                warn!(
                    target: "practice_engine",
                    topic_id = %self.topic_id, error = %e,
                    "store fetch failed; generating instead"
                );
                None
            }
        }
    }

    /// Present the next exercise at the tier the current score calls for.
    ///
    /// An unanswered exercise is discarded.
    pub fn next_exercise(&mut self) -> Result<&Attempt, SessionError> {
        if self.state.is_mastered() {
            return Err(SessionError::Mastered { topic_id: self.topic_id.clone() });
        }
        let tier = self.state.tier();
        let index = self.served;
        self.served = self.served.wrapping_add(1);

        let attempt = match self.from_store(tier) {
            Some(exercise) => Attempt { exercise, source: ExerciseSource::Store, tier },
            None => {
                let seed = self.seed.wrapping_add(index);
                match self.registry.generate(&self.topic_id, tier, seed) {
                    Ok(exercise) => Attempt { exercise, source: ExerciseSource::Generated { seed }, tier },
                    Err(error) => {
                        warn!(
                            target: "practice_engine",
                            topic_id = %self.topic_id, %tier, error = %error,
                            "generation failed; presenting stub exercise"
                        );
                        let exercise =
                            Exercise::stub(&self.topic_id, tier, &self.config.session.stub_answer);
                        Attempt { exercise, source: ExerciseSource::Stub { error }, tier }
                    }
                }
            }
        };
        Ok(&*self.current.insert(attempt))
    }

    /// Grade the presented exercise and update the score.
    pub fn submit(&mut self, answer: &str) -> Result<Grade, SessionError> {
        let attempt = self.current.take().ok_or(SessionError::NoActiveExercise)?;
        let correct = validate(&attempt.exercise, answer);
        if !attempt.is_stub() {
            self.config.scoring.apply(&mut self.state, correct);
        }

        let grade = Grade {
            correct,
            score: self.state.score,
            streak: self.state.streak,
            next_tier: self.state.tier(),
            challenge_zone: self.state.is_challenge_zone(),
            mastered: self.state.is_mastered(),
            explanation: (!correct).then(|| attempt.exercise.explanation.clone()),
        };
        info!(
            target: "practice_engine",
            topic_id = %self.topic_id, id = %attempt.exercise.id, correct,
            score = grade.score, streak = grade.streak, next_tier = %grade.next_tier,
            "graded attempt"
        );
        Ok(grade)
    }
}
