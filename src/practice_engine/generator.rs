use std::sync::OnceLock;

use tracing::debug;

use crate::practice_engine::{
    error::EngineError,
    models::{DifficultyTier, Exercise},
    random::SeededRandom,
    registry::TopicRegistry,
};

/// What a topic generator needs besides the RNG.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerationContext {
    /// The id the caller asked for (an alias keeps its own id).
    pub topic_id: String,
    pub tier: DifficultyTier,
    pub exercise_id: String,
}

/// Build a deterministic exercise id from the family prefix, topic and seed.
pub fn make_exercise_id(prefix: &str, topic_id: &str, rng: &mut SeededRandom) -> String {
    format!("{}-{}-{:08X}", prefix, topic_id, rng.next_u32())
}

/// Shared standard topic table, built on first use.
pub fn default_registry() -> &'static TopicRegistry {
    static REGISTRY: OnceLock<TopicRegistry> = OnceLock::new();
    REGISTRY.get_or_init(TopicRegistry::standard)
}

/// Generate one exercise from the standard topic table.
///
/// Pure function of its arguments: the same `(topic_id, tier, seed)` always
/// yields the same exercise, ground truth included.
pub fn generate(topic_id: &str, tier: DifficultyTier, seed: u64) -> Result<Exercise, EngineError> {
    let exercise = default_registry().generate(topic_id, tier, seed)?;
    debug!(
        target: "practice_engine",
        topic_id, %tier, seed, id = %exercise.id, variant = %exercise.variant(),
        "generated exercise"
    );
    Ok(exercise)
}
